//! View model handed to the page renderer, and the normalization from
//! prediction results into it.

use prediction_sdk::{FormInput, PredictionError, PredictionOutcome};
use serde::Serialize;

use crate::validation::FormValidationError;

/// Shown when a successful reply carries no narrative
pub const NO_ANALYSIS_FALLBACK: &str = "No AI analysis available";

/// Shown when the prediction service refuses the connection
pub const SERVICE_NOT_RUNNING: &str =
    "Prediction service is not running. Please start the prediction server and try again.";

/// Everything the page template needs.
///
/// `crop_content` holds either the narrative or an error/status message.
/// The result modal is shown exactly when one of the result fields is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub crop: Option<String>,
    pub fertilizer: Option<String>,
    pub crop_content: Option<String>,
    pub input_data: Option<FormInput>,
}

impl ViewModel {
    /// Fresh form, nothing to show
    pub fn empty() -> Self {
        Self::default()
    }

    /// Submission rejected before any remote call
    pub fn validation_failed(input: FormInput, err: &FormValidationError) -> Self {
        Self::message(input, err.to_string())
    }

    /// Normalize a prediction call into a view model. Pure: the same
    /// arguments always produce the same result.
    pub fn from_prediction(
        input: FormInput,
        result: &Result<PredictionOutcome, PredictionError>,
    ) -> Self {
        match result {
            Ok(PredictionOutcome::Success {
                crop,
                fertilizer,
                narrative,
            }) => Self {
                crop: Some(crop.clone()),
                fertilizer: fertilizer.clone(),
                crop_content: Some(
                    narrative
                        .clone()
                        .unwrap_or_else(|| NO_ANALYSIS_FALLBACK.to_string()),
                ),
                input_data: Some(input),
            },
            Ok(PredictionOutcome::Failure { message }) => {
                Self::message(input, format!("Error: {}", message))
            }
            Err(err) => Self::message(input, error_message(err)),
        }
    }

    /// Whether there is a result or error to display
    pub fn has_result(&self) -> bool {
        self.crop.is_some() || self.fertilizer.is_some() || self.crop_content.is_some()
    }

    /// Submitted value of a field, for re-filling the form
    pub fn input_value(&self, name: &str) -> Option<&str> {
        self.input_data.as_ref().and_then(|input| input.get(name))
    }

    fn message(input: FormInput, message: String) -> Self {
        Self {
            crop: None,
            fertilizer: None,
            crop_content: Some(message),
            input_data: Some(input),
        }
    }
}

/// User-facing text for a failed prediction call
pub fn error_message(err: &PredictionError) -> String {
    match err {
        PredictionError::ConnectionRefused(_) => SERVICE_NOT_RUNNING.to_string(),
        other => format!("Error: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_form;

    fn scenario_input() -> FormInput {
        FormInput::new()
            .with("N", "50")
            .with("P", "40")
            .with("K", "30")
            .with("temperature", "25")
            .with("humidity", "60")
            .with("ph", "6.5")
            .with("rainfall", "100")
    }

    #[test]
    fn test_empty_view_model_shows_nothing() {
        let vm = ViewModel::empty();
        assert!(!vm.has_result());
        assert_eq!(vm.input_data, None);
        assert_eq!(vm.input_value("N"), None);
    }

    #[test]
    fn test_full_success() {
        let result = Ok(PredictionOutcome::Success {
            crop: "rice".to_string(),
            fertilizer: Some("urea".to_string()),
            narrative: Some("Rice thrives...".to_string()),
        });

        let vm = ViewModel::from_prediction(scenario_input(), &result);
        assert_eq!(
            vm,
            ViewModel {
                crop: Some("rice".to_string()),
                fertilizer: Some("urea".to_string()),
                crop_content: Some("Rice thrives...".to_string()),
                input_data: Some(scenario_input()),
            }
        );
        assert!(vm.has_result());
    }

    #[test]
    fn test_remote_logical_error() {
        let result = Ok(PredictionOutcome::Failure {
            message: "model not loaded".to_string(),
        });

        let vm = ViewModel::from_prediction(scenario_input(), &result);
        assert_eq!(vm.crop, None);
        assert_eq!(vm.fertilizer, None);
        assert_eq!(vm.crop_content.as_deref(), Some("Error: model not loaded"));
        assert_eq!(vm.input_data, Some(scenario_input()));
    }

    #[test]
    fn test_missing_field_message() {
        let input: FormInput = scenario_input()
            .iter()
            .filter(|(name, _)| *name != "ph")
            .collect();
        let err = validate_form(&input).unwrap_err();

        let vm = ViewModel::validation_failed(input.clone(), &err);
        assert_eq!(vm.crop, None);
        assert_eq!(vm.fertilizer, None);
        assert_eq!(vm.crop_content.as_deref(), Some("Missing required fields: ph"));
        assert_eq!(vm.input_data, Some(input));
    }

    #[test]
    fn test_connection_refused_message() {
        let result = Err(PredictionError::connection_refused("tcp connect error"));

        let vm = ViewModel::from_prediction(scenario_input(), &result);
        let content = vm.crop_content.unwrap();
        assert!(content.contains("service is not running"));
        assert_eq!(vm.crop, None);
    }

    #[test]
    fn test_http_status_message() {
        let result = Err(PredictionError::remote_http(
            502,
            "Bad Gateway",
            Some("upstream".to_string()),
        ));

        let vm = ViewModel::from_prediction(scenario_input(), &result);
        assert_eq!(
            vm.crop_content.as_deref(),
            Some("Error: Prediction service responded with 502 Bad Gateway")
        );
    }

    #[test]
    fn test_other_transport_error_message() {
        let result = Err(PredictionError::transport("dns error: no such host"));

        let vm = ViewModel::from_prediction(scenario_input(), &result);
        assert_eq!(
            vm.crop_content.as_deref(),
            Some("Error: Transport error: dns error: no such host")
        );
        assert_eq!(vm.input_data, Some(scenario_input()));
    }

    #[test]
    fn test_missing_narrative_falls_back() {
        let result = Ok(PredictionOutcome::Success {
            crop: "wheat".to_string(),
            fertilizer: None,
            narrative: None,
        });

        let vm = ViewModel::from_prediction(scenario_input(), &result);
        assert_eq!(vm.crop.as_deref(), Some("wheat"));
        assert_eq!(vm.fertilizer, None);
        assert_eq!(vm.crop_content.as_deref(), Some(NO_ANALYSIS_FALLBACK));
    }

    #[test]
    fn test_normalization_is_repeatable() {
        let results = [
            Ok(PredictionOutcome::Success {
                crop: "rice".to_string(),
                fertilizer: None,
                narrative: Some("text".to_string()),
            }),
            Ok(PredictionOutcome::Failure {
                message: "boom".to_string(),
            }),
            Err(PredictionError::decode("bad json")),
        ];

        for result in &results {
            let first = ViewModel::from_prediction(scenario_input(), result);
            let second = ViewModel::from_prediction(scenario_input(), result);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_serializes_with_template_field_names() {
        let vm = ViewModel::from_prediction(
            FormInput::new().with("N", "1"),
            &Ok(PredictionOutcome::Failure {
                message: "x".to_string(),
            }),
        );

        let json = serde_json::to_value(&vm).unwrap();
        assert_eq!(json["cropContent"], "Error: x");
        assert!(json["crop"].is_null());
        assert_eq!(json["inputData"]["N"], "1");
    }
}
