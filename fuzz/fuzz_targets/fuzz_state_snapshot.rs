//! Fuzz target: `StateSnapshot::decode`
//!
//! Feeds arbitrary bytes to the state-file decoder.  A snapshot that
//! decodes must encode again, and the re-encoded bytes must decode to the
//! same arming mode, alarm status and sensor list.
//!
//! cargo fuzz run fuzz_state_snapshot

#![no_main]

use catpoint::adapters::file_store::StateSnapshot;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(snapshot) = StateSnapshot::decode(data) else {
        return;
    };

    let bytes = snapshot.encode().expect("decoded snapshot must encode");
    let again = StateSnapshot::decode(&bytes).expect("encoded snapshot must decode");

    assert_eq!(again.arming_mode, snapshot.arming_mode);
    assert_eq!(again.alarm_status, snapshot.alarm_status);
    assert_eq!(again.sensors.len(), snapshot.sensors.len());
    for (a, b) in again.sensors.iter().zip(&snapshot.sensors) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.is_active(), b.is_active());
    }
});
