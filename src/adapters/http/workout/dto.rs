//! Data Transfer Objects for workout HTTP endpoints.
//!
//! Request fields are optional at the serde level so that a missing field
//! produces a precise validation message instead of a generic parse error.

use serde::{Deserialize, Serialize};

use crate::application::GenerateFitCommand;
use crate::domain::workout::{DurationInput, StepInput};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /generate-fit`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateFitRequest {
    pub routine_name: Option<String>,
    pub steps: Option<Vec<StepDto>>,
}

/// One step of the workout.
#[derive(Debug, Clone, Deserialize)]
pub struct StepDto {
    #[serde(rename = "type")]
    pub step_type: Option<String>,
    #[serde(alias = "time")]
    pub duration: Option<DurationDto>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Step duration as sent by clients: `300` or `"5min"`, `"05:00"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DurationDto {
    Seconds(i64),
    Text(String),
}

impl From<DurationDto> for DurationInput {
    fn from(dto: DurationDto) -> Self {
        match dto {
            DurationDto::Seconds(secs) => DurationInput::Seconds(secs),
            DurationDto::Text(text) => DurationInput::Text(text),
        }
    }
}

impl GenerateFitRequest {
    /// Checks presence of required fields and builds the command.
    ///
    /// Value validation (blank names, non-positive durations) is left to
    /// the domain.
    pub fn into_command(self) -> Result<GenerateFitCommand, String> {
        let routine_name = self
            .routine_name
            .ok_or_else(|| "routine_name is required".to_string())?;
        let steps = self.steps.ok_or_else(|| "steps is required".to_string())?;

        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| step.into_input(i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GenerateFitCommand::new(routine_name, steps))
    }
}

impl StepDto {
    fn into_input(self, index: usize) -> Result<StepInput, String> {
        let step_type = self
            .step_type
            .ok_or_else(|| format!("step {}: type is required", index + 1))?;
        let duration = self
            .duration
            .ok_or_else(|| format!("step {}: duration is required", index + 1))?;

        let input = StepInput::new(step_type, DurationInput::from(duration));
        Ok(match self.name {
            Some(name) => input.with_name(name),
            None => input,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response body for `GET /test`.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub endpoints: Vec<EndpointInfo>,
}

/// One entry of the endpoint listing.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            description: description.to_string(),
        }
    }
}

impl DiagnosticsResponse {
    pub fn current() -> Self {
        Self {
            status: "ok".to_string(),
            message: "API is working correctly".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: vec![
                EndpointInfo::new("GET", "/", "Health check"),
                EndpointInfo::new("GET", "/test", "Diagnostics"),
                EndpointInfo::new("POST", "/generate-fit", "Generate a FIT workout file"),
            ],
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn encoding_unavailable(message: impl Into<String>) -> Self {
        Self {
            code: "ENCODING_UNAVAILABLE".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_integer_and_text_durations() {
        let json = r#"{
            "routine_name": "Mi Rutina",
            "steps": [
                {"type": "EEC", "duration": 300},
                {"type": "Pasada", "duration": "2min", "name": "Fast"},
                {"type": "Pausa", "time": "01:30"}
            ]
        }"#;
        let req: GenerateFitRequest = serde_json::from_str(json).unwrap();
        let steps = req.steps.unwrap();

        assert_eq!(steps[0].duration, Some(DurationDto::Seconds(300)));
        assert_eq!(steps[1].duration, Some(DurationDto::Text("2min".to_string())));
        assert_eq!(steps[1].name.as_deref(), Some("Fast"));
        assert_eq!(steps[2].duration, Some(DurationDto::Text("01:30".to_string())));
    }

    #[test]
    fn into_command_keeps_step_order() {
        let json = r#"{"routine_name": "R", "steps": [
            {"type": "EEC", "duration": 300},
            {"type": "VAC", "duration": 120}
        ]}"#;
        let req: GenerateFitRequest = serde_json::from_str(json).unwrap();

        let cmd = req.into_command().unwrap();

        assert_eq!(cmd.routine_name, "R");
        assert_eq!(cmd.steps.len(), 2);
        assert_eq!(cmd.steps[0].step_type, "EEC");
        assert_eq!(cmd.steps[1].step_type, "VAC");
    }

    #[test]
    fn missing_routine_name_is_reported() {
        let req: GenerateFitRequest = serde_json::from_str(r#"{"steps": []}"#).unwrap();
        assert_eq!(req.into_command().unwrap_err(), "routine_name is required");
    }

    #[test]
    fn missing_steps_is_reported() {
        let req: GenerateFitRequest = serde_json::from_str(r#"{"routine_name": "R"}"#).unwrap();
        assert_eq!(req.into_command().unwrap_err(), "steps is required");
    }

    #[test]
    fn missing_step_duration_names_the_step() {
        let json = r#"{"routine_name": "R", "steps": [
            {"type": "EEC", "duration": 300},
            {"type": "Pasada"}
        ]}"#;
        let req: GenerateFitRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            req.into_command().unwrap_err(),
            "step 2: duration is required"
        );
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::bad_request("nope")).unwrap();
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn diagnostics_lists_all_endpoints() {
        let diag = DiagnosticsResponse::current();
        let paths: Vec<_> = diag.endpoints.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/test", "/generate-fit"]);
    }
}
