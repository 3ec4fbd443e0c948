#![no_main]

use bi4::array::ArrayKey;
use bi4::head::{parse_particle_groups, FieldScope};
use bi4::registry::{CountKey, PROPERTIES};
use bi4::snapshot::Snapshot;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every accessor must either decode or return an error - never panic
    let snapshot = Snapshot::from_bytes("fuzz", data.to_vec());

    let _ = snapshot.time();
    for key in CountKey::ALL {
        let _ = snapshot.count(key);
    }
    for spec in PROPERTIES.iter() {
        let _ = snapshot.property(spec);
    }
    for key in ArrayKey::KNOWN.iter() {
        if let Ok(array) = snapshot.array(key) {
            let rows = array.row_count();
            let _ = array.rows(rows / 2, rows - rows / 2);
        }
    }

    let _ = parse_particle_groups(&snapshot, FieldScope::WholeBuffer);
    let _ = parse_particle_groups(&snapshot, FieldScope::Block);
});
