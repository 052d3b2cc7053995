#![cfg(feature = "serde")]

use rover_tools::{TraceEvent, TraceLog};

#[test]
fn trace_log_json_roundtrip() {
    let log = TraceLog {
        events: vec![
            TraceEvent::new(1, "bt.preempt").with_a(0).with_b(1),
            TraceEvent::new(2, "bt.parallel.halt").with_a(1).with_b(0),
            TraceEvent::new(3, "bt.repeat.cycle").with_a(2).with_b(0),
        ],
    };

    let json = serde_json::to_string(&log).expect("serialize");
    let roundtrip: TraceLog = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, log);
}
