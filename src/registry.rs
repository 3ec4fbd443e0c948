//! Known BI4 scalar properties and particle-count keys
//!
//! Simulation-wide constants are stored once in the head file. Each entry
//! records the marker name, how many elements follow it and their type.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::dtype::ElementType;

/// Describes one named scalar or 3-vector property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScalarSpec {
    /// Marker name
    pub name: &'static str,
    /// Number of elements (1 or 3)
    pub count: usize,
    /// Element type
    pub element_type: ElementType,
    /// Human-readable meaning, with units
    pub description: &'static str,
}

impl ScalarSpec {
    const fn new(
        name: &'static str,
        count: usize,
        element_type: ElementType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            count,
            element_type,
            description,
        }
    }
}

/// Viscosity formulation (1: artificial, 2: laminar + SPS)
pub const VISCO_TYPE: ScalarSpec = ScalarSpec::new(
    "ViscoType",
    1,
    ElementType::I32,
    "Viscosity formulation 1:Artificial, 2:Laminar+SPS",
);
/// Viscosity value
pub const VISCO_VALUE: ScalarSpec =
    ScalarSpec::new("ViscoValue", 1, ElementType::F32, "Viscosity value");
/// Boundary viscosity multiplier
pub const VISCO_BOUND_FACTOR: ScalarSpec = ScalarSpec::new(
    "ViscoBoundFactor",
    1,
    ElementType::F32,
    "Multiply viscosity value with boundary",
);
/// Particle splitting flag
pub const SPLITTING: ScalarSpec =
    ScalarSpec::new("Splitting", 1, ElementType::U8, "Particle splitting enabled");
/// Initial inter-particle distance
pub const DP: ScalarSpec = ScalarSpec::new(
    "Dp",
    1,
    ElementType::F64,
    "Distance between particles (m)",
);
/// Smoothing length
pub const H: ScalarSpec = ScalarSpec::new("H", 1, ElementType::F64, "Interaction radius (m)");
/// Equation-of-state constant B
pub const B: ScalarSpec = ScalarSpec::new(
    "B",
    1,
    ElementType::F64,
    "Constant B of the equation of state",
);
/// Reference density
pub const RHOP_ZERO: ScalarSpec = ScalarSpec::new(
    "RhopZero",
    1,
    ElementType::F64,
    "Reference density of the fluid (kg/m^3)",
);
/// Mass of a boundary particle
pub const MASS_BOUND: ScalarSpec =
    ScalarSpec::new("MassBound", 1, ElementType::F64, "Boundary particle mass (kg)");
/// Mass of a fluid particle
pub const MASS_FLUID: ScalarSpec =
    ScalarSpec::new("MassFluid", 1, ElementType::F64, "Fluid particle mass (kg)");
/// Polytropic constant
pub const GAMMA: ScalarSpec = ScalarSpec::new(
    "Gamma",
    1,
    ElementType::F64,
    "Polytropic constant for water used in the state equation",
);
/// Gravity vector
pub const GRAVITY: ScalarSpec = ScalarSpec::new(
    "Gravity",
    3,
    ElementType::F32,
    "Gravitational acceleration (m/s^2)",
);
/// Lower domain corner
pub const CASE_POS_MIN: ScalarSpec =
    ScalarSpec::new("CasePosMin", 3, ElementType::F64, "Simulation range minimum (m)");
/// Upper domain corner
pub const CASE_POS_MAX: ScalarSpec =
    ScalarSpec::new("CasePosMax", 3, ElementType::F64, "Simulation range maximum (m)");
/// Periodic increment along x
pub const PERI_XINC: ScalarSpec =
    ScalarSpec::new("PeriXinc", 3, ElementType::F64, "Periodic increment in X (m)");
/// Periodic increment along y
pub const PERI_YINC: ScalarSpec =
    ScalarSpec::new("PeriYinc", 3, ElementType::F64, "Periodic increment in Y (m)");
/// Periodic increment along z
pub const PERI_ZINC: ScalarSpec =
    ScalarSpec::new("PeriZinc", 3, ElementType::F64, "Periodic increment in Z (m)");
/// 2-D simulation flag
pub const DATA_2D: ScalarSpec =
    ScalarSpec::new("Data2d", 1, ElementType::U8, "Simulation dimension 0:3D 1:2D");
/// Plane position of a 2-D simulation
pub const DATA_2D_POS_Y: ScalarSpec = ScalarSpec::new(
    "Data2dPosY",
    1,
    ElementType::F64,
    "Simulation plane position (m)",
);
/// Number of pieces the case is split into
pub const NPIECE: ScalarSpec =
    ScalarSpec::new("Npiece", 1, ElementType::I32, "Number of data pieces");
/// Index of the first particle in this piece
pub const FIRST_PART: ScalarSpec =
    ScalarSpec::new("FirstPart", 1, ElementType::I32, "Index of the first particle");

/// Every known property, in display order
pub const PROPERTIES: [ScalarSpec; 21] = [
    VISCO_TYPE,
    VISCO_VALUE,
    VISCO_BOUND_FACTOR,
    SPLITTING,
    DP,
    H,
    B,
    RHOP_ZERO,
    MASS_BOUND,
    MASS_FLUID,
    GAMMA,
    GRAVITY,
    CASE_POS_MIN,
    CASE_POS_MAX,
    PERI_XINC,
    PERI_YINC,
    PERI_ZINC,
    DATA_2D,
    DATA_2D_POS_Y,
    NPIECE,
    FIRST_PART,
];

/// Find a property by its marker name
pub fn lookup(name: &str) -> Option<&'static ScalarSpec> {
    PROPERTIES.iter().find(|spec| spec.name == name)
}

/// Particle-count markers present in every snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CountKey {
    /// All particles
    All,
    /// Fixed boundary particles
    Fixed,
    /// Moving boundary particles
    Moving,
    /// Floating body particles
    Floating,
    /// Fluid particles
    Fluid,
}

impl CountKey {
    /// All keys, in display order
    pub const ALL: [CountKey; 5] = [
        CountKey::All,
        CountKey::Fixed,
        CountKey::Moving,
        CountKey::Floating,
        CountKey::Fluid,
    ];

    /// Marker name in the file
    pub const fn marker(&self) -> &'static str {
        match self {
            CountKey::All => "CaseNp",
            CountKey::Fixed => "CaseNfixed",
            CountKey::Moving => "CaseNmoving",
            CountKey::Floating => "CaseNfloat",
            CountKey::Fluid => "CaseNfluid",
        }
    }

    /// Short label for display
    pub const fn label(&self) -> &'static str {
        match self {
            CountKey::All => "all",
            CountKey::Fixed => "fixed",
            CountKey::Moving => "moving",
            CountKey::Floating => "float",
            CountKey::Fluid => "fluid",
        }
    }
}

impl fmt::Display for CountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

impl FromStr for CountKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CountKey::ALL
            .iter()
            .copied()
            .find(|k| k.marker() == s || k.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown particle count key: {}", s))
    }
}
