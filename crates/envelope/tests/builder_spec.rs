use envelope::*;
use futures_util::stream;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct TestData {
    message: String,
    id: String,
}

fn test_data() -> TestData {
    TestData {
        message: "Operation completed successfully".to_string(),
        id: "op-12345".to_string(),
    }
}

#[tokio::test]
async fn given_future_when_building_with_custom_success_then_uses_overrides() {
    let envelope = EnvelopeBuilder::from_future(async { Ok::<_, anyhow::Error>(test_data()) })
        .success_code(0)
        .success_message("custom success")
        .build()
        .await;

    assert!(envelope.is_ok());
    assert_eq!(envelope.code(), 0);
    assert_eq!(envelope.message(), "custom success");
    assert_eq!(envelope.into_data(), Some(test_data()));
}

#[tokio::test]
async fn given_recognized_error_when_building_without_handlers_then_keeps_code_and_message() {
    let envelope = EnvelopeBuilder::from_future(async {
        Err::<TestData, _>(RecognizedError::new(1003, "business rule violated"))
    })
    .success_code(0)
    .success_message("never used")
    .build()
    .await;

    assert!(!envelope.is_ok());
    assert_eq!(envelope.code(), 1003);
    assert_eq!(envelope.message(), "business rule violated");
    assert!(envelope.data().is_none());
}

#[tokio::test]
async fn given_recognized_handler_when_recognized_error_then_handler_wins() {
    let envelope = EnvelopeBuilder::from_future(async {
        Err::<TestData, _>(RecognizedError::new(1004, "missing"))
    })
    .on_recognized(|err| Envelope::failure(err.code() + 1, format!("handled: {}", err)))
    .build()
    .await;

    assert_eq!(envelope.code(), 1005);
    assert_eq!(envelope.message(), "handled: missing");
}

#[tokio::test]
async fn given_only_recognized_handler_when_unclassified_fault_then_default_applies() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let envelope = EnvelopeBuilder::from_future(async {
        Err::<TestData, _>(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
    })
    .on_recognized(move |err| {
        counter.fetch_add(1, Ordering::SeqCst);
        Envelope::from_recognized(&err)
    })
    .build()
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(envelope.code(), 9999);
    assert_eq!(envelope.message(), "disk gone");
}

#[tokio::test]
async fn given_only_unrecognized_handler_when_recognized_error_then_default_applies() {
    let envelope = EnvelopeBuilder::from_future(async {
        Err::<TestData, _>(RecognizedError::new(1001, "unauthorized"))
    })
    .on_unrecognized(|_| Envelope::failure(1, "should not run"))
    .build()
    .await;

    assert_eq!(envelope.code(), 1001);
    assert_eq!(envelope.message(), "unauthorized");
}

#[tokio::test]
async fn given_unrecognized_handler_when_unclassified_fault_then_handler_wins() {
    let envelope = EnvelopeBuilder::from_future(async {
        Err::<TestData, _>(anyhow::anyhow!("socket closed"))
    })
    .on_unrecognized(|fault| Envelope::failure(503, format!("upstream: {}", fault)))
    .build()
    .await;

    assert_eq!(envelope.code(), 503);
    assert_eq!(envelope.message(), "upstream: socket closed");
}

#[tokio::test]
async fn given_stream_when_building_then_collects_in_order_with_overrides() {
    let envelope = EnvelopeBuilder::from_stream(stream::iter(vec![
        Ok::<_, anyhow::Error>("a"),
        Ok("b"),
        Ok("c"),
    ]))
    .success_code(7)
    .success_message("listed")
    .build()
    .await;

    assert!(envelope.is_ok());
    assert_eq!(envelope.code(), 7);
    assert_eq!(envelope.message(), "listed");
    assert_eq!(envelope.into_data(), Some(vec!["a", "b", "c"]));
}

#[tokio::test]
async fn given_stream_with_handler_when_mid_stream_failure_then_handler_sees_error() {
    let envelope = EnvelopeBuilder::from_stream(stream::iter(vec![
        Ok(1),
        Ok(2),
        Err(RecognizedError::new(1000, "third item rejected")),
        Ok(4),
    ]))
    .on_recognized(|err| Envelope::failure(err.code(), format!("stream: {}", err)))
    .build()
    .await;

    assert!(!envelope.is_ok());
    assert_eq!(envelope.message(), "stream: third item rejected");
    assert!(envelope.data().is_none());
}

#[tokio::test]
async fn given_service_builder_when_building_then_starts_from_service_config() {
    let service = EnvelopeService::new(EnvelopeConfig {
        success_code: 200,
        success_message: "ok".to_string(),
        fault_code: 500,
    });

    let success = service
        .from_future(async { Ok::<_, anyhow::Error>(1) })
        .build()
        .await;
    assert_eq!(success.code(), 200);
    assert_eq!(success.message(), "ok");

    let failure = service
        .from_stream(stream::iter(vec![Err::<i32, _>(anyhow::anyhow!("bad row"))]))
        .success_message("overridden")
        .build()
        .await;
    assert_eq!(failure.code(), 500);
    assert_eq!(failure.message(), "bad row");
}

#[test]
fn given_value_builder_when_failure_carries_data_then_build_is_rejected() {
    let result = Envelope::builder()
        .ok(false)
        .code(1001)
        .message("unauthorized")
        .data("secret")
        .build();

    assert_eq!(result, Err(EnvelopeError::DataOnFailure { code: 1001 }));
}

#[test]
fn given_value_builder_when_success_has_custom_code_then_envelope_matches() {
    let envelope = Envelope::builder()
        .code(201)
        .message("created")
        .data(vec![1, 2])
        .build()
        .expect("success with data should build");

    assert!(envelope.is_ok());
    assert_eq!(envelope.code(), 201);
    assert_eq!(envelope.message(), "created");
    assert_eq!(envelope.into_data(), Some(vec![1, 2]));
}
