//! Frame classifier: one frame of landmarks in, one labeled gesture out.
//!
//! Pure and stateless. Malformed input degrades to a `FrameOutcome` variant
//! instead of failing.

pub mod features;
pub mod rules;

pub use self::features::{HandFeatures, EXTENSION_THRESHOLD};
pub use self::rules::{Rule, FALLBACK, RULES};

use crate::gestures::{ClassificationResult, FrameOutcome};
use crate::landmarks::{select_dominant, Frame, HandDetection, RawFrame};
use rayon::prelude::*;

/// Classifies a validated frame.
pub fn classify(frame: &Frame) -> ClassificationResult {
    rules::evaluate(&HandFeatures::extract(frame))
}

/// Lower-priority labels whose rules also match `frame`, one per label.
///
/// The winning label is excluded; confidences are the rule constants.
pub fn alternatives(frame: &Frame) -> Vec<ClassificationResult> {
    let features = HandFeatures::extract(frame);
    let primary = rules::evaluate(&features).label;

    let mut out: Vec<ClassificationResult> = Vec::new();
    for rule in rules::matching(&features) {
        if rule.label != primary && out.iter().all(|r| r.label != rule.label) {
            out.push(rule.result());
        }
    }
    out
}

/// Validates and classifies untrusted landmark data.
///
/// Checks run in order: empty input, point count, coordinate quality.
pub fn classify_raw(points: &[Vec<f64>]) -> FrameOutcome {
    if points.is_empty() {
        return FrameOutcome::NoHand;
    }

    match Frame::from_points(points) {
        Ok(frame) => FrameOutcome::Gesture(classify(&frame)),
        Err(reason) => FrameOutcome::Invalid { reason },
    }
}

/// Classifies the most confident hand among `detections`.
pub fn classify_detections(detections: &[HandDetection]) -> FrameOutcome {
    match select_dominant(detections) {
        Some(hand) => classify_raw(&hand.to_raw()),
        None => FrameOutcome::NoHand,
    }
}

/// Classifies many independent frames in parallel; output order matches input.
pub fn classify_batch(frames: &[RawFrame]) -> Vec<FrameOutcome> {
    frames.par_iter().map(|f| classify_raw(f)).collect()
}
