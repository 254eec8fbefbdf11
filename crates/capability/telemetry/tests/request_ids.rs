use gate_telemetry::{metrics, new_request_ids, record_codes_superseded, record_edit_latency_ms};

#[test]
fn request_ids_non_empty() {
    let ids = new_request_ids();
    assert!(!ids.request_id.is_empty());
    assert!(!ids.trace_id.is_empty());
    assert_ne!(ids.request_id, ids.trace_id);
}

#[test]
fn counters_accumulate() {
    let before = metrics().snapshot();
    record_codes_superseded(3);
    record_edit_latency_ms(15);
    let after = metrics().snapshot();
    assert!(after.codes_superseded >= before.codes_superseded + 3);
    assert!(after.edit_latency_ms_count > before.edit_latency_ms_count);
    assert!(after.edit_latency_ms_total >= before.edit_latency_ms_total + 15);
}
