//! HealthCheckHandler - Query handler reporting service liveness.
//!
//! Always succeeds. Encoder availability is reported, not enforced: an
//! unavailable encoder still yields `status: "ok"`. Availability is checked
//! once at startup and passed in, so a health check never spawns the encoder.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health report returned by `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub encoder: String,
    pub encoder_available: bool,
}

/// Handler for health checks.
pub struct HealthCheckHandler {
    encoder: String,
    encoder_available: bool,
}

impl HealthCheckHandler {
    pub fn new(encoder: impl Into<String>, encoder_available: bool) -> Self {
        Self {
            encoder: encoder.into(),
            encoder_available,
        }
    }

    pub fn handle(&self) -> HealthReport {
        HealthReport {
            status: "ok",
            message: "FIT workout service is running".to_string(),
            timestamp: Utc::now(),
            encoder: self.encoder.clone(),
            encoder_available: self.encoder_available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_ok_with_available_encoder() {
        let handler = HealthCheckHandler::new("sdk+native", true);

        let report = handler.handle();

        assert_eq!(report.status, "ok");
        assert_eq!(report.encoder, "sdk+native");
        assert!(report.encoder_available);
    }

    #[test]
    fn reports_ok_even_when_encoder_is_unavailable() {
        let report = HealthCheckHandler::new("sdk", false).handle();

        assert_eq!(report.status, "ok");
        assert!(!report.encoder_available);
    }

    #[test]
    fn report_serializes_expected_fields() {
        let report = HealthReport {
            status: "ok",
            message: "up".to_string(),
            timestamp: Utc::now(),
            encoder: "native".to_string(),
            encoder_available: true,
        };

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["encoder"], "native");
        assert_eq!(json["encoder_available"], true);
        assert!(json["timestamp"].is_string());
    }
}
