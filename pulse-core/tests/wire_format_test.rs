//! Wire-format tests: the JSON shape consumed by the upstream producer
//! and the downstream dashboard is part of the contract.

use pulse_core::types::alert::{AlertId, AlertRecord, AlertSignificance, AlertType};
use pulse_core::types::observation::{PatternId, PatternObservation};

#[test]
fn observation_round_trips_with_snake_case_fields() {
    let json = r#"{
        "pattern_id": "checkout-retry",
        "confidence_score": 0.82,
        "sample_size": 45,
        "success_rate": 0.7,
        "statistical_significance": 0.04,
        "timestamp_ms": 1700000000000
    }"#;

    let obs: PatternObservation = serde_json::from_str(json).unwrap();
    assert_eq!(obs.pattern_id, PatternId::from("checkout-retry"));
    assert_eq!(obs.sample_size, 45);
    assert!((obs.confidence_score - 0.82).abs() < 1e-12);

    let back = serde_json::to_value(&obs).unwrap();
    assert_eq!(back["pattern_id"], "checkout-retry");
    assert_eq!(back["timestamp_ms"], 1_700_000_000_000u64);
}

#[test]
fn alert_type_serializes_as_snake_case() {
    assert_eq!(
        serde_json::to_value(AlertType::ConfidenceIncrease).unwrap(),
        "confidence_increase"
    );
    assert_eq!(
        serde_json::to_value(AlertType::StatisticalSignificance).unwrap(),
        "statistical_significance"
    );
    assert_eq!(serde_json::to_value(AlertType::NewPattern).unwrap(), "new_pattern");
    assert_eq!(
        serde_json::to_value(AlertSignificance::High).unwrap(),
        "high"
    );
}

#[test]
fn alert_record_round_trips() {
    let alert = AlertRecord {
        id: AlertId::new("checkout-retry-confidence_increase-0"),
        alert_type: AlertType::ConfidenceIncrease,
        pattern_id: PatternId::from("checkout-retry"),
        message: "Confidence for pattern checkout-retry rose from 0.55 to 0.78".to_string(),
        significance: AlertSignificance::High,
        confidence: 0.78,
        previous_confidence: Some(0.55),
        sample_size: 20,
        recommended_action: "Monitor for further validation".to_string(),
        created_at_ms: 4_000,
    };

    let json = serde_json::to_string(&alert).unwrap();
    let back: AlertRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, alert.id);
    assert_eq!(back.alert_type, alert.alert_type);
    assert_eq!(back.previous_confidence, Some(0.55));
    assert_eq!(back.significance, AlertSignificance::High);
}

#[test]
fn optional_previous_confidence_serializes_as_null() {
    let alert = AlertRecord {
        id: AlertId::new("a"),
        alert_type: AlertType::StatisticalSignificance,
        pattern_id: PatternId::from("p"),
        message: String::new(),
        significance: AlertSignificance::Low,
        confidence: 0.5,
        previous_confidence: None,
        sample_size: 10,
        recommended_action: String::new(),
        created_at_ms: 0,
    };
    let value = serde_json::to_value(&alert).unwrap();
    assert!(value["previous_confidence"].is_null());
}
