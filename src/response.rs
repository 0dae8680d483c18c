//! Explained recognition results handed to the presentation layer.

use crate::classifier;
use crate::engine::DisplayState;
use crate::error::{SfResult, SignForgeError};
use crate::explain::{self, Explanation};
use crate::gestures::FrameOutcome;
use crate::landmarks::Frame;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignResult {
    pub label: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SignResult {
    pub fn new(label: impl Into<String>, confidence: f64, at: Option<DateTime<Utc>>) -> Self {
        Self {
            label: label.into(),
            confidence,
            timestamp: at.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    fn validate(&self, path: &str) -> SfResult<()> {
        if self.label.is_empty() {
            return Err(SignForgeError::Validation(format!(
                "{}.label: must not be empty",
                path
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(SignForgeError::Validation(format!(
                "{}.confidence: {} is outside [0, 1]",
                path, self.confidence
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignResponse {
    pub recognized: SignResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<SignResult>,
    pub explanation: Explanation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl SignResponse {
    pub fn validate(&self) -> SfResult<()> {
        self.recognized.validate("recognized")?;
        for (i, alt) in self.alternatives.iter().enumerate() {
            alt.validate(&format!("alternatives[{}]", i))?;
        }
        if self.explanation.meaning.chars().count() < 3 {
            return Err(SignForgeError::Validation(
                "explanation.meaning: must be at least 3 characters".to_string(),
            ));
        }
        Ok(())
    }

    /// One log record: `<timestamp>: <label> (<pct>% confidence)` or JSON.
    pub fn to_log(&self, format: LogFormat) -> SfResult<String> {
        match format {
            LogFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            LogFormat::Text => {
                let stamp = self.recognized.timestamp.clone().unwrap_or_else(|| {
                    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
                });
                Ok(format!(
                    "{}: {} ({:.1}% confidence)",
                    stamp,
                    self.recognized.label,
                    self.recognized.confidence * 100.0
                ))
            }
        }
    }
}

/// Explains a single-frame classification, without debouncing.
pub fn from_outcome(outcome: &FrameOutcome, at: DateTime<Utc>) -> SfResult<SignResponse> {
    let response = SignResponse {
        recognized: SignResult::new(outcome.label(), outcome.confidence(), Some(at)),
        alternatives: Vec::new(),
        explanation: *explain::for_outcome(outcome)?,
    };
    response.validate()?;
    Ok(response)
}

/// Classifies raw landmarks and explains the result, listing the
/// lower-priority gestures that also matched as alternatives.
pub fn from_points(points: &[Vec<f64>], at: DateTime<Utc>) -> SfResult<SignResponse> {
    let outcome = classifier::classify_raw(points);
    let mut response = from_outcome(&outcome, at)?;

    if let (FrameOutcome::Gesture(_), Ok(frame)) = (&outcome, Frame::from_points(points)) {
        response.alternatives = classifier::alternatives(&frame)
            .into_iter()
            .map(|alt| SignResult::new(alt.label.as_str(), alt.confidence, Some(at)))
            .collect();
        response.validate()?;
    }

    Ok(response)
}

/// Explains a debounced display state. Fails for states without a gesture.
pub fn from_display(state: &DisplayState, at: DateTime<Utc>) -> SfResult<SignResponse> {
    let response = SignResponse {
        recognized: SignResult::new(state.label(), state.confidence(), Some(at)),
        alternatives: Vec::new(),
        explanation: *explain::for_display(state)?,
    };
    response.validate()?;
    Ok(response)
}
