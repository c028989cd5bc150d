//! Response to a get-alerts query

use crate::model::Alert;
use herald_core::document::{
    object_list, parse_object, required, DocumentBuilder, FieldAction, FromDocument, ToDocument,
    Token, TokenStream,
};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::Result;
use serde_json::Value;

const ALERTS_TAG: &str = "alerts";
const TOTAL_ALERTS_TAG: &str = "totalAlerts";

/// A page of alerts plus the total match count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAlertsResponse {
    alerts: Vec<Alert>,
    total_alerts: Option<i32>,
}

impl GetAlertsResponse {
    /// Create a response
    pub fn new(alerts: Vec<Alert>, total_alerts: Option<i32>) -> Self {
        GetAlertsResponse {
            alerts,
            total_alerts,
        }
    }

    /// Alerts on this page
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Total matches across all pages, if counted
    pub fn total_alerts(&self) -> Option<i32> {
        self.total_alerts
    }
}

impl Writeable for GetAlertsResponse {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_list(&self.alerts);
        out.write_optional_i32(self.total_alerts);
    }
}

impl Readable for GetAlertsResponse {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let alerts = input.read_list()?;
        let total_alerts = input.read_optional_i32()?;
        Ok(GetAlertsResponse::new(alerts, total_alerts))
    }
}

impl ToDocument for GetAlertsResponse {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .object_list(ALERTS_TAG, &self.alerts)
            .field(TOTAL_ALERTS_TAG, self.total_alerts.map_or(Value::Null, Value::from))
            .build()
    }
}

impl FromDocument for GetAlertsResponse {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut alerts = None;
        let mut total_alerts = None;
        parse_object(stream, "GetAlertsResponse", |field, stream| {
            match field {
                ALERTS_TAG => alerts = Some(object_list(stream, Alert::parse)?),
                TOTAL_ALERTS_TAG => {
                    total_alerts = match stream.current_token() {
                        Some(Token::Null) => None,
                        _ => Some(stream.i32_value()?),
                    }
                }
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let alerts = required(alerts, "GetAlertsResponse", ALERTS_TAG)?;
        Ok(GetAlertsResponse::new(alerts, total_alerts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::document::to_json_string;

    #[test]
    fn test_empty_response_document() {
        let response = GetAlertsResponse::new(vec![], Some(0));
        assert_eq!(to_json_string(&response), r#"{"alerts":[],"totalAlerts":0}"#);
    }

    #[test]
    fn test_missing_total_written_as_null() {
        let response = GetAlertsResponse::new(vec![], None);
        assert_eq!(to_json_string(&response), r#"{"alerts":[],"totalAlerts":null}"#);
    }
}
