//! Host-facing result line
//!
//! Exactly one JSON object per invocation, written to stdout. The host
//! parses this line and nothing else, so field names, field order and the
//! 4-decimal probability formatting are frozen.

use serde::Serialize;

use crate::decision::PredictionResult;
use crate::error::ScreenError;

/// The single structured result emitted per invocation
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Report {
    Success {
        /// Positive-class probability as a 4-decimal fixed string
        probability: String,
        ml_score: u32,
        ai_analysis: &'static str,
    },
    Error {
        message: String,
    },
}

impl Report {
    pub fn success(result: &PredictionResult) -> Self {
        Report::Success {
            probability: format!("{:.4}", result.probability),
            ml_score: result.score(),
            ai_analysis: result.category.label(),
        }
    }

    pub fn failure(err: &ScreenError) -> Self {
        Report::Error {
            message: err.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Report::Error {
            message: message.into(),
        }
    }

    /// Serialize to the one-line JSON the host parses
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"status":"error","message":"internal: report serialization failed"}"#.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision;

    #[test]
    fn test_success_line_format() {
        let result = decision::decide(0.7312);
        let line = Report::success(&result).to_json_line();
        assert_eq!(
            line,
            r#"{"status":"success","probability":"0.7312","ml_score":15,"ai_analysis":"Positif (High Risk)"}"#
        );
    }

    #[test]
    fn test_probability_has_four_decimals() {
        let result = decision::decide(0.5);
        let line = Report::success(&result).to_json_line();
        assert!(line.contains(r#""probability":"0.5000""#));
    }

    #[test]
    fn test_error_line_format() {
        let line = Report::error("Parameter kurang").to_json_line();
        assert_eq!(line, r#"{"status":"error","message":"Parameter kurang"}"#);
    }

    #[test]
    fn test_failure_carries_protocol_message() {
        let err = ScreenError::MissingArtifact {
            kind: "Model",
            path: "tb_multimodal_final.onnx".to_string(),
        };
        let line = Report::failure(&err).to_json_line();
        assert!(line.contains("hilang"));
        assert!(line.contains("tb_multimodal_final.onnx"));
        assert!(line.starts_with(r#"{"status":"error""#));
    }

    #[test]
    fn test_line_is_single_line() {
        let err = ScreenError::AudioDecode("bad\nheader".to_string());
        let line = Report::failure(&err).to_json_line();
        // serde escapes the newline; the host reads exactly one line
        assert!(!line.contains('\n'));
    }
}
