use envelope::*;
use serde_json::Value;
use std::path::Path;

const FIXTURES_DIR: &str = "../../contracts/fixtures/envelopes";

fn read_fixture(name: &str) -> String {
    let fixture_path = Path::new(FIXTURES_DIR).join(name);
    std::fs::read_to_string(&fixture_path)
        .unwrap_or_else(|e| panic!("Should be able to read fixture {}: {}", name, e))
}

#[test]
fn given_success_fixture_when_deserializing_then_data_is_present() {
    let envelope: Envelope<Value> =
        serde_json::from_str(&read_fixture("success.json")).expect("Should deserialize");

    assert!(envelope.is_ok());
    assert_eq!(envelope.code(), 0);
    let data = envelope.data().expect("success fixture carries data");
    assert_eq!(data["orderId"], "ord-1001");
    assert_eq!(envelope.created_at().to_rfc3339(), "2025-03-14T09:26:53.589+00:00");
}

#[test]
fn given_empty_success_fixture_when_unwrapping_then_no_value() {
    let envelope: Envelope<Value> =
        serde_json::from_str(&read_fixture("success_empty.json")).expect("Should deserialize");

    assert!(envelope.is_ok());
    assert!(matches!(envelope.into_result(), Ok(None)));
}

#[test]
fn given_failure_fixture_when_unwrapping_then_recognized_error() {
    let envelope: Envelope<Value> =
        serde_json::from_str(&read_fixture("failure.json")).expect("Should deserialize");

    let err = envelope.into_result().expect_err("failure fixture should raise");
    assert_eq!(err.code(), 1003);
    assert_eq!(err.message(), "forbidden");
}

#[test]
fn given_failure_fixture_with_data_when_deserializing_then_rejected() {
    let result = serde_json::from_str::<Envelope<Value>>(&read_fixture("failure_with_data.json"));

    let err = result.expect_err("failure with data must be rejected");
    assert!(err.to_string().contains("must not carry data"));
}

#[test]
fn given_fixture_when_reserializing_then_field_names_are_stable() {
    let envelope: Envelope<Value> =
        serde_json::from_str(&read_fixture("failure.json")).expect("Should deserialize");
    let value = serde_json::to_value(&envelope).expect("Should serialize");

    let mut keys: Vec<&str> = value
        .as_object()
        .expect("envelope serializes as an object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["code", "createdAt", "data", "message", "ok"]);
}
