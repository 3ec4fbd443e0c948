use super::*;
use crate::array::ArrayKey;
use crate::dtype::{TypedArray, Value};
use crate::error::Bi4Error;
use crate::head::{FieldScope, ParticleType};
use crate::locator::marker_pattern;
use crate::registry::{CountKey, DP, GRAVITY};
use crate::snapshot::Snapshot;
use tempfile::tempdir;

fn fixed_field(buf: &mut Vec<u8>, name: &str, payload: &[u8]) {
    buf.extend(marker_pattern(name, b'\x0c'));
    buf.extend([0u8; 4]);
    buf.extend_from_slice(payload);
}

fn property(buf: &mut Vec<u8>, name: &str, payload: &[u8]) {
    buf.extend(marker_pattern(name, b'\x0b'));
    buf.extend([0u8; 3]);
    buf.extend_from_slice(payload);
}

fn snapshot_bytes(time: f64, ids: &[i32]) -> Vec<u8> {
    let mut buf = b"BI4".to_vec();
    fixed_field(&mut buf, "TimeStep", &time.to_le_bytes());
    fixed_field(&mut buf, "CaseNp", &(ids.len() as i32).to_le_bytes());
    fixed_field(&mut buf, "CaseNfluid", &(ids.len() as i32 - 2).to_le_bytes());
    buf.extend(ArrayKey::IDP.signature());
    buf.extend([0u8; 8]);
    buf.extend((ids.len() as i32).to_le_bytes());
    buf.extend([0u8; 4]);
    for id in ids {
        buf.extend(id.to_le_bytes());
    }
    buf
}

fn head_bytes() -> Vec<u8> {
    let mut buf = b"#ITEM ITEM ".to_vec();
    property(&mut buf, "Dp", &0.02f64.to_le_bytes());
    let mut gravity = Vec::new();
    for g in [0.0f32, 0.0, -9.81] {
        gravity.extend(g.to_le_bytes());
    }
    property(&mut buf, "Gravity", &gravity);
    let mut min = Vec::new();
    let mut max = Vec::new();
    for v in [-1.0f64, -1.0, 0.0] {
        min.extend(v.to_le_bytes());
    }
    for v in [1.0f64, 1.0, 2.0] {
        max.extend(v.to_le_bytes());
    }
    property(&mut buf, "CasePosMin", &min);
    property(&mut buf, "CasePosMax", &max);
    for (kind, mk, count) in [("Fixed", 0, 2), ("Fluid", 1, 4)] {
        buf.extend(b"ITEM");
        buf.extend(kind.as_bytes());
        property(&mut buf, "MkType", &0i32.to_le_bytes());
        property(&mut buf, "Mk", &(mk as i32).to_le_bytes());
        property(&mut buf, "Count", &(count as i32).to_le_bytes());
    }
    buf
}

fn in_memory_reader(config: ReaderConfig) -> Bi4Reader {
    let snapshots = vec![
        Snapshot::from_bytes("Part_0000.bi4", snapshot_bytes(0.0, &[0, 1, 2, 3, 4, 5])),
        Snapshot::from_bytes("Part_0001.bi4", snapshot_bytes(0.1, &[5, 4, 3, 2, 1, 0])),
        Snapshot::from_bytes("Part_0002.bi4", b"truncated".to_vec()),
    ];
    let head = Snapshot::from_bytes("Part_Head.ibi4", head_bytes());
    Bi4Reader::from_snapshots(snapshots, Some(head), config)
}

#[test]
fn test_times_isolate_failures() {
    let reader = in_memory_reader(ReaderConfig::default());
    let times = reader.times();

    assert_eq!(times.len(), 3);
    assert_eq!(times["Part_0000.bi4"].as_ref().ok(), Some(&0.0));
    assert_eq!(times["Part_0001.bi4"].as_ref().ok(), Some(&0.1));
    assert!(times["Part_0002.bi4"].as_ref().unwrap_err().is_not_found());
}

#[test]
fn test_counts() {
    let reader = in_memory_reader(ReaderConfig::default());
    let all = reader.counts(CountKey::All);
    assert_eq!(all["Part_0001.bi4"].as_ref().ok(), Some(&6));
    let fluid = reader.particle_counts("CaseNfluid");
    assert_eq!(fluid["Part_0000.bi4"].as_ref().ok(), Some(&4));
    assert_eq!(reader.count_of("Part_0000.bi4", "CaseNp").unwrap(), 6);
    assert!(reader.count_of("Part_0042.bi4", "CaseNp").unwrap_err().is_not_found());
}

#[test]
fn test_properties_come_from_head() {
    let reader = in_memory_reader(ReaderConfig::default());
    assert_eq!(
        reader.property(&DP).unwrap().as_scalar(),
        Some(Value::F64(0.02))
    );
    assert_eq!(reader.property(&GRAVITY).unwrap().values()[2], Value::F32(-9.81));

    let range: Vec<f64> = reader.case_range().unwrap().iter().map(Value::as_f64).collect();
    assert_eq!(range, vec![-1.0, -1.0, 0.0, 1.0, 1.0, 2.0]);
}

#[test]
fn test_particle_groups_block_scoped() {
    let reader = in_memory_reader(ReaderConfig::default().with_block_scoped_groups(true));
    let groups = reader.particle_groups().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].particle_type, Some(ParticleType::Fixed));
    assert_eq!((groups[1].begin, groups[1].count), (2, 4));

    let fluid_ids = reader
        .group_array("Part_0001.bi4", &ArrayKey::IDP, &groups[1])
        .unwrap();
    assert_eq!(fluid_ids.data, TypedArray::I32(vec![3, 2, 1, 0]));
}

#[test]
fn test_particle_groups_default_scope() {
    let reader = in_memory_reader(ReaderConfig::default());
    assert_eq!(reader.config().field_scope, FieldScope::WholeBuffer);
    let groups = reader.particle_groups().unwrap();
    // every block repeats the first Count
    assert_eq!(groups[1].count, 2);
    assert_eq!(groups[1].begin, 2);
}

#[test]
fn test_arrays() {
    let reader = in_memory_reader(ReaderConfig::default());
    let arrays = reader.arrays(&ArrayKey::IDP);
    assert_eq!(
        arrays["Part_0000.bi4"].as_ref().unwrap().data,
        TypedArray::I32(vec![0, 1, 2, 3, 4, 5])
    );
    assert!(arrays["Part_0002.bi4"].is_err());
    assert!(reader
        .array_of("Part_0000.bi4", &ArrayKey::POS)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_missing_head() {
    let reader = Bi4Reader::from_snapshots(Vec::new(), None, ReaderConfig::default());
    assert!(reader.is_empty());
    assert!(reader.head().unwrap_err().is_not_found());
    assert!(reader.property(&DP).unwrap_err().is_not_found());
    assert!(reader.particle_groups().is_err());
}

#[test]
fn test_open_directory() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("Part_0000.bi4"), snapshot_bytes(0.0, &[1, 2, 3]))?;
    std::fs::write(dir.path().join("Part_0001.bi4"), snapshot_bytes(0.5, &[1, 2, 3]))?;
    std::fs::write(dir.path().join("Part_Head.ibi4"), head_bytes())?;

    let reader = Bi4Reader::open(dir.path())?;
    assert_eq!(
        reader.file_names().collect::<Vec<_>>(),
        vec!["Part_0000.bi4", "Part_0001.bi4"]
    );
    assert_eq!(reader.time_of("Part_0001.bi4")?, 0.5);
    assert!(reader.load_errors().is_empty());
    assert_eq!(reader.particle_groups()?.len(), 2);
    Ok(())
}

#[test]
fn test_unreadable_file_is_isolated() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("Part_0000.bi4");
    std::fs::write(&good, snapshot_bytes(1.0, &[7, 8, 9])).unwrap();
    let missing = dir.path().join("Part_0001.bi4");

    let reader = Bi4Reader::from_paths(
        vec![
            ("Part_0000.bi4".to_string(), good),
            ("Part_0001.bi4".to_string(), missing.clone()),
        ],
        None,
        ReaderConfig::default(),
    );

    let errors = reader.load_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, "Part_0001.bi4");

    let times = reader.times();
    assert_eq!(times["Part_0000.bi4"].as_ref().ok(), Some(&1.0));
    match &times["Part_0001.bi4"] {
        Err(Bi4Error::Io { path, .. }) => assert_eq!(path, &missing),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    let sequential = in_memory_reader(ReaderConfig::default());
    let parallel = in_memory_reader(ReaderConfig::default().with_parallel(true));

    let a: Vec<_> = sequential.times().into_iter().map(|(k, v)| (k, v.ok())).collect();
    let b: Vec<_> = parallel.times().into_iter().map(|(k, v)| (k, v.ok())).collect();
    assert_eq!(a, b);
}
