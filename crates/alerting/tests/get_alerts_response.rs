//! GetAlertsResponse through both codecs

use chrono::{DateTime, Utc};
use herald_core::document::{from_json_str, to_json_string, ToDocument};
use herald_core::wire::{from_bytes, to_bytes};
use herald_alerting::{
    ActionExecutionResult, Alert, AlertError, AlertFields, AlertState, GetAlertsResponse, User,
};

fn at(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap()
}

fn alert() -> Alert {
    Alert::new(AlertFields {
        id: "id".to_string(),
        version: 0,
        schema_version: 0,
        monitor_id: "monitorId".to_string(),
        monitor_name: "monitorName".to_string(),
        monitor_version: 0,
        monitor_user: Some(User::new("admin", vec![], vec![], vec![], None)),
        trigger_id: "triggerId".to_string(),
        trigger_name: "triggerName".to_string(),
        finding_ids: vec![],
        related_doc_ids: vec![],
        state: AlertState::Acknowledged,
        start_time: at(1_600_000_000_000),
        end_time: None,
        last_notification_time: None,
        acknowledged_time: Some(at(1_600_000_100_000)),
        error_message: None,
        error_history: vec![AlertError::new(at(1_600_000_050_000), "first failure")],
        severity: "severity".to_string(),
        action_execution_results: vec![ActionExecutionResult::new("action", None, 0)],
    })
    .unwrap()
}

#[test]
fn test_empty_response_round_trips() {
    let response = GetAlertsResponse::new(vec![], Some(0));
    let decoded = from_bytes::<GetAlertsResponse>(&to_bytes(&response)).unwrap();
    assert!(decoded.alerts().is_empty());
    assert_eq!(decoded.total_alerts(), Some(0));
}

#[test]
fn test_one_alert_round_trips() {
    let response = GetAlertsResponse::new(vec![alert()], Some(1));
    let decoded = from_bytes::<GetAlertsResponse>(&to_bytes(&response)).unwrap();
    assert_eq!(decoded.alerts().len(), 1);
    assert_eq!(decoded.alerts()[0], alert());
    assert_eq!(decoded.total_alerts(), Some(1));

    let from_doc = from_json_str::<GetAlertsResponse>(&to_json_string(&response)).unwrap();
    assert_eq!(from_doc, response);
}

#[test]
fn test_document_keys() {
    let response = GetAlertsResponse::new(vec![alert()], Some(1));
    let doc = response.to_document();
    assert_eq!(doc["totalAlerts"], 1);
    let first = &doc["alerts"][0];
    assert_eq!(first["monitor_id"], "monitorId");
    assert_eq!(first["state"], "ACKNOWLEDGED");
    assert_eq!(first["start_time"], 1_600_000_000_000i64);
    assert_eq!(first["alert_history"][0]["message"], "first failure");
    assert!(first.get("end_time").is_none());
}

#[test]
fn test_truncated_response_fails() {
    let bytes = to_bytes(&GetAlertsResponse::new(vec![alert()], None));
    for end in [0, 1, bytes.len() / 2, bytes.len() - 1] {
        assert!(from_bytes::<GetAlertsResponse>(&bytes[..end]).is_err());
    }
}
