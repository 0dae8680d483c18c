//! Static explanation table keyed by display label.

use crate::engine::DisplayState;
use crate::error::{SfResult, SignForgeError};
use crate::gestures::{FrameOutcome, INVALID_DATA_LABEL, INVALID_LANDMARKS_LABEL, NO_HAND_LABEL};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub meaning: &'static str,
    pub context: &'static [&'static str],
    pub suggestions: &'static [&'static str],
}

static TABLE: [(&str, Explanation); 12] = [
    (
        "Closed Fist",
        Explanation {
            meaning: "A closed fist gesture, often used to show determination or agreement",
            context: &["Agreement", "Determination", "Solidarity"],
            suggestions: &["Keep fingers tightly closed", "Ensure thumb is visible", "Hold steady"],
        },
    ),
    (
        "Open Hand",
        Explanation {
            meaning: "An open palm gesture, commonly used for greeting or stopping",
            context: &["Greeting", "Stop signal", "Openness"],
            suggestions: &[
                "Spread fingers naturally",
                "Keep palm flat",
                "Make sure all fingers are visible",
            ],
        },
    ),
    (
        "Stop Sign",
        Explanation {
            meaning: "A stop or halt gesture with open palm facing forward",
            context: &["Traffic control", "Stop signal", "Attention"],
            suggestions: &["Palm facing forward", "Fingers together", "Arm extended"],
        },
    ),
    (
        "Pointing",
        Explanation {
            meaning: "A pointing gesture with index finger extended",
            context: &["Direction", "Attention", "Indication"],
            suggestions: &[
                "Extend index finger clearly",
                "Keep other fingers closed",
                "Point directly at target",
            ],
        },
    ),
    (
        "Peace Sign",
        Explanation {
            meaning: "A peace sign with index and middle fingers extended",
            context: &["Peace", "Victory", "Photo pose"],
            suggestions: &[
                "Extend index and middle fingers",
                "Keep other fingers closed",
                "Form a V shape",
            ],
        },
    ),
    (
        "Thumbs Up",
        Explanation {
            meaning: "A positive approval gesture with thumb extended upward",
            context: &["Approval", "Good job", "Encouragement"],
            suggestions: &[
                "Keep thumb straight up",
                "Close other fingers",
                "Make sure thumb is clearly visible",
            ],
        },
    ),
    (
        "OK Sign",
        Explanation {
            meaning: "An OK gesture forming a circle with thumb and index finger",
            context: &["Approval", "Everything is fine", "Agreement"],
            suggestions: &[
                "Form a circle with thumb and index",
                "Keep other fingers extended",
                "Make the circle clearly visible",
            ],
        },
    ),
    (
        "Wave",
        Explanation {
            meaning: "A waving gesture with open hand moving side to side",
            context: &["Greeting", "Goodbye", "Attention"],
            suggestions: &[
                "Move hand side to side",
                "Keep fingers together",
                "Use a gentle motion",
            ],
        },
    ),
    (
        NO_HAND_LABEL,
        Explanation {
            meaning: "No hand was detected in the camera view",
            context: &["Camera setup", "Hand positioning"],
            suggestions: &[
                "Ensure your hand is in the camera frame",
                "Check lighting",
                "Move closer to the camera",
            ],
        },
    ),
    (
        INVALID_LANDMARKS_LABEL,
        Explanation {
            meaning: "The hand detection data appears to be invalid",
            context: &["Technical issue", "Data processing"],
            suggestions: &[
                "Try moving your hand",
                "Check camera connection",
                "Restart recognition",
            ],
        },
    ),
    (
        INVALID_DATA_LABEL,
        Explanation {
            meaning: "The hand landmark data contains invalid values",
            context: &["Data quality", "Processing error"],
            suggestions: &[
                "Ensure good lighting",
                "Keep hand steady",
                "Try a different position",
            ],
        },
    ),
    (
        "Unknown Gesture",
        Explanation {
            meaning: "The hand gesture was not recognized by the system",
            context: &["Recognition limits", "New gesture"],
            suggestions: &[
                "Try a more common gesture",
                "Ensure clear hand positioning",
                "Check lighting conditions",
            ],
        },
    ),
];

/// Looks up the explanation for a label. Unknown labels are an error, never
/// a substitute entry.
pub fn lookup(label: &str) -> SfResult<&'static Explanation> {
    TABLE
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, explanation)| explanation)
        .ok_or_else(|| SignForgeError::MissingExplanation(label.to_string()))
}

pub fn for_outcome(outcome: &FrameOutcome) -> SfResult<&'static Explanation> {
    lookup(outcome.label())
}

/// Explains the gesture behind a display state. `Settling` and `Waiting`
/// carry no gesture and have no entry.
pub fn for_display(state: &DisplayState) -> SfResult<&'static Explanation> {
    match state {
        DisplayState::Confirmed { label, .. } | DisplayState::InProgress { label, .. } => {
            lookup(label.as_str())
        }
        other => Err(SignForgeError::MissingExplanation(other.label())),
    }
}

pub fn known_labels() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|(key, _)| *key)
}
