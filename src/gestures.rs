use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

pub const NO_HAND_LABEL: &str = "No Hand Detected";
pub const INVALID_LANDMARKS_LABEL: &str = "Invalid Landmarks";
pub const INVALID_DATA_LABEL: &str = "Invalid Data";

/// Gesture taxonomy produced by the frame classifier.
///
/// The display strings double as keys into the explanation table, so they
/// must not change without updating `explain`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum GestureLabel {
    #[strum(serialize = "Closed Fist")]
    #[serde(rename = "Closed Fist")]
    ClosedFist,
    #[strum(serialize = "Open Hand")]
    #[serde(rename = "Open Hand")]
    OpenHand,
    #[strum(serialize = "Stop Sign")]
    #[serde(rename = "Stop Sign")]
    StopSign,
    #[strum(serialize = "Pointing")]
    #[serde(rename = "Pointing")]
    Pointing,
    #[strum(serialize = "Peace Sign")]
    #[serde(rename = "Peace Sign")]
    PeaceSign,
    #[strum(serialize = "Thumbs Up")]
    #[serde(rename = "Thumbs Up")]
    ThumbsUp,
    #[strum(serialize = "OK Sign")]
    #[serde(rename = "OK Sign")]
    OkSign,
    #[strum(serialize = "Wave")]
    #[serde(rename = "Wave")]
    Wave,
    #[strum(serialize = "Unknown Gesture")]
    #[serde(rename = "Unknown Gesture")]
    Unknown,
}

impl GestureLabel {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// False only for the low-confidence fallback.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: GestureLabel,
    pub confidence: f64,
}

/// Why a raw frame could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InvalidReason {
    /// Landmark count other than 21.
    WrongPointCount { found: usize },
    /// Landmark at `index` has fewer than 3 coordinates or a non-finite one.
    BadCoordinates { index: usize },
}

impl InvalidReason {
    pub fn label(&self) -> &'static str {
        match self {
            Self::WrongPointCount { .. } => INVALID_LANDMARKS_LABEL,
            Self::BadCoordinates { .. } => INVALID_DATA_LABEL,
        }
    }
}

/// Result of classifying one raw frame.
///
/// Error conditions are their own variants so a sentinel can never be
/// mistaken for a recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameOutcome {
    Gesture(ClassificationResult),
    NoHand,
    Invalid { reason: InvalidReason },
}

impl FrameOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gesture(r) => r.label.as_str(),
            Self::NoHand => NO_HAND_LABEL,
            Self::Invalid { reason } => reason.label(),
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::Gesture(r) => r.confidence,
            Self::NoHand | Self::Invalid { .. } => 0.0,
        }
    }

    pub fn gesture(&self) -> Option<&ClassificationResult> {
        match self {
            Self::Gesture(r) => Some(r),
            _ => None,
        }
    }
}

impl From<ClassificationResult> for FrameOutcome {
    fn from(r: ClassificationResult) -> Self {
        Self::Gesture(r)
    }
}
