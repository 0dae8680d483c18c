//! The ordered gesture cascade.
//!
//! Rules overlap geometrically, so `RULES` is evaluated top to bottom and the
//! first match wins. Reordering entries changes classification results.
//! Note that `wave` is fully shadowed by `open_hand`/`stop_sign` under this
//! order; it stays in the table to keep the label taxonomy intact.

use super::features::HandFeatures;
use crate::gestures::{ClassificationResult, GestureLabel};

pub const OPEN_HAND_OPENNESS: f64 = 0.6;
pub const STOP_SIGN_OPENNESS: f64 = 0.5;
pub const OK_SIGN_MAX_DISTANCE: f64 = 0.1;
pub const WAVE_OPENNESS: f64 = 0.7;
pub const WAVE_CURVATURE: f64 = 0.1;
pub const BROAD_OPENNESS: f64 = 0.4;

pub const FALLBACK: ClassificationResult = ClassificationResult {
    label: GestureLabel::Unknown,
    confidence: 0.25,
};

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub label: GestureLabel,
    pub confidence: f64,
    predicate: fn(&HandFeatures) -> bool,
}

impl Rule {
    #[inline(always)]
    pub fn matches(&self, f: &HandFeatures) -> bool {
        (self.predicate)(f)
    }

    pub fn result(&self) -> ClassificationResult {
        ClassificationResult {
            label: self.label,
            confidence: self.confidence,
        }
    }
}

fn closed_fist(f: &HandFeatures) -> bool {
    f.no_fingers() && !f.thumb
}

fn open_hand(f: &HandFeatures) -> bool {
    f.all_fingers() && f.thumb && f.openness > OPEN_HAND_OPENNESS
}

fn stop_sign(f: &HandFeatures) -> bool {
    f.all_fingers() && !f.thumb && f.openness > STOP_SIGN_OPENNESS
}

fn pointing(f: &HandFeatures) -> bool {
    f.index && !f.middle && !f.ring && !f.pinky && !f.thumb
}

fn peace_sign(f: &HandFeatures) -> bool {
    f.index && f.middle && !f.ring && !f.pinky && !f.thumb
}

fn thumbs_up(f: &HandFeatures) -> bool {
    f.thumb && f.no_fingers()
}

fn ok_sign(f: &HandFeatures) -> bool {
    f.thumb
        && f.index
        && !f.middle
        && !f.ring
        && !f.pinky
        && f.thumb_index_distance < OK_SIGN_MAX_DISTANCE
}

fn wave(f: &HandFeatures) -> bool {
    f.openness > WAVE_OPENNESS && f.all_fingers() && f.curvature > WAVE_CURVATURE
}

fn broad_open(f: &HandFeatures) -> bool {
    f.extended_fingers() >= 3 && f.openness > BROAD_OPENNESS
}

fn two_finger(f: &HandFeatures) -> bool {
    f.extended_fingers() == 2 && f.index && f.middle
}

fn one_finger(f: &HandFeatures) -> bool {
    f.extended_fingers() == 1 && f.index
}

pub static RULES: [Rule; 11] = [
    Rule {
        name: "closed_fist",
        label: GestureLabel::ClosedFist,
        confidence: 0.95,
        predicate: closed_fist,
    },
    Rule {
        name: "open_hand",
        label: GestureLabel::OpenHand,
        confidence: 0.92,
        predicate: open_hand,
    },
    Rule {
        name: "stop_sign",
        label: GestureLabel::StopSign,
        confidence: 0.90,
        predicate: stop_sign,
    },
    Rule {
        name: "pointing",
        label: GestureLabel::Pointing,
        confidence: 0.88,
        predicate: pointing,
    },
    Rule {
        name: "peace_sign",
        label: GestureLabel::PeaceSign,
        confidence: 0.87,
        predicate: peace_sign,
    },
    Rule {
        name: "thumbs_up",
        label: GestureLabel::ThumbsUp,
        confidence: 0.93,
        predicate: thumbs_up,
    },
    Rule {
        name: "ok_sign",
        label: GestureLabel::OkSign,
        confidence: 0.89,
        predicate: ok_sign,
    },
    Rule {
        name: "wave",
        label: GestureLabel::Wave,
        confidence: 0.82,
        predicate: wave,
    },
    Rule {
        name: "broad_open",
        label: GestureLabel::OpenHand,
        confidence: 0.80,
        predicate: broad_open,
    },
    Rule {
        name: "two_finger",
        label: GestureLabel::PeaceSign,
        confidence: 0.85,
        predicate: two_finger,
    },
    Rule {
        name: "one_finger",
        label: GestureLabel::Pointing,
        confidence: 0.83,
        predicate: one_finger,
    },
];

/// Position and rule of the first match, if any.
pub fn first_match(f: &HandFeatures) -> Option<(usize, &'static Rule)> {
    RULES.iter().enumerate().find(|(_, rule)| rule.matches(f))
}

/// Every rule whose predicate holds, in priority order.
pub fn matching(f: &HandFeatures) -> impl Iterator<Item = &'static Rule> + '_ {
    RULES.iter().filter(move |rule| rule.matches(f))
}

pub fn evaluate(f: &HandFeatures) -> ClassificationResult {
    first_match(f).map_or(FALLBACK, |(_, rule)| rule.result())
}

pub fn rule_by_name(name: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.name == name)
}
