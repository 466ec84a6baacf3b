//! Integration tests for telemetry initialization and span helpers.

use uuid::Uuid;

#[test]
fn telemetry_initializes_without_endpoint() {
    // A global subscriber can only be set once per process, so a second
    // initialization in the same test binary may return Err; that is fine.
    let config = evalbatch::telemetry::TelemetryConfig {
        endpoint: None,
        service_name: "evalbatch-test".to_string(),
        log_level: "not a valid filter ===".to_string(),
    };
    if let Ok(guard) = evalbatch::telemetry::init_telemetry(config) {
        assert!(!guard.is_exporting());
        guard.force_flush();
    }
}

#[test]
fn batch_span_records_completion() {
    let span = evalbatch::telemetry::batch::start_batch_span("my_task", &Uuid::new_v4(), 10, 4);
    evalbatch::telemetry::batch::record_batch_completed(&span, 10);
}

#[test]
fn worker_span_creates() {
    let span = evalbatch::telemetry::batch::start_worker_span(3, 7);
    let _enter = span.enter();
}

#[test]
fn metric_instruments_work_without_a_provider() {
    use opentelemetry::KeyValue;

    let labels = [KeyValue::new("task", "my_task")];
    evalbatch::telemetry::metrics::items_completed().add(1, &labels);
    evalbatch::telemetry::metrics::items_failed().add(1, &labels);
    evalbatch::telemetry::metrics::warnings_surfaced().add(2, &labels);
    evalbatch::telemetry::metrics::item_duration_ms().record(12.5, &labels);
    evalbatch::telemetry::metrics::batch_duration_ms().record(250.0, &labels);
}
