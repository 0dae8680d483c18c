//! Temporal confirmation engine.
//!
//! Debounces the per-frame label stream: a label is confirmed only after it
//! has been seen `confirmation_count` times within `confirmation_window_ms`
//! of its first sighting. One engine per recognition session; all calls take
//! `&mut self`, so transitions are serialized by construction.

pub mod clock;
pub mod history;

pub use self::clock::{Clock, ManualClock, MonotonicClock};
pub use self::history::{GestureHistory, HistoryEntry};

use crate::config::EngineConfig;
use crate::gestures::{FrameOutcome, GestureLabel};
use serde::Serialize;
use tracing::debug;

pub const SETTLING_LABEL: &str = "Detecting...";
pub const SETTLING_CONFIDENCE: f64 = 0.5;
pub const WAITING_LABEL: &str = "Waiting for gesture...";

/// The label currently being tracked for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureCandidate {
    pub label: GestureLabel,
    /// Highest confidence seen for this label so far.
    pub confidence: f64,
    pub count: u32,
    pub first_seen_ms: u64,
}

/// What the presentation layer should show after a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayState {
    Confirmed {
        label: GestureLabel,
        confidence: f64,
    },
    /// Candidate changed within the grace period.
    Settling,
    InProgress {
        label: GestureLabel,
        count: u32,
        confidence: f64,
    },
    Waiting,
}

impl DisplayState {
    pub fn label(&self) -> String {
        match self {
            Self::Confirmed { label, .. } => label.to_string(),
            Self::Settling => SETTLING_LABEL.to_string(),
            Self::InProgress { label, .. } => format!("Detecting {}...", label),
            Self::Waiting => WAITING_LABEL.to_string(),
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::Confirmed { confidence, .. } | Self::InProgress { confidence, .. } => *confidence,
            Self::Settling => SETTLING_CONFIDENCE,
            Self::Waiting => 0.0,
        }
    }

    pub fn confirmed(&self) -> Option<GestureLabel> {
        match self {
            Self::Confirmed { label, .. } => Some(*label),
            _ => None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed().is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    pub candidate: Option<GestureCandidate>,
    pub last_change_ms: Option<u64>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone)]
pub struct ConfirmationEngine {
    config: EngineConfig,
    candidate: Option<GestureCandidate>,
    last_change_ms: Option<u64>,
    history: GestureHistory,
}

impl ConfirmationEngine {
    pub fn new(config: EngineConfig) -> Self {
        let history = GestureHistory::new(config.history_size);
        Self {
            config,
            candidate: None,
            last_change_ms: None,
            history,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn candidate(&self) -> Option<&GestureCandidate> {
        self.candidate.as_ref()
    }

    pub fn history(&self) -> &GestureHistory {
        &self.history
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            candidate: self.candidate,
            last_change_ms: self.last_change_ms,
            history: self.history.to_vec(),
        }
    }

    /// Feeds one classification taken at `now_ms` and returns the display state.
    pub fn process(&mut self, outcome: &FrameOutcome, now_ms: u64) -> DisplayState {
        self.detect(outcome, now_ms);
        let state = self.evaluate(now_ms);

        self.history.push(HistoryEntry {
            label: outcome.label(),
            confidence: outcome.confidence(),
            timestamp_ms: now_ms,
        });

        state
    }

    /// Re-evaluates expiry and display without new input. History is untouched.
    pub fn poll(&mut self, now_ms: u64) -> DisplayState {
        self.evaluate(now_ms)
    }

    /// Back to idle: no candidate, no history, no recent change.
    pub fn reset(&mut self) {
        self.history.clear();
        self.candidate = None;
        self.last_change_ms = None;
        debug!("Confirmation engine reset");
    }

    fn detect(&mut self, outcome: &FrameOutcome, now_ms: u64) {
        let Some(result) = outcome.gesture() else {
            return;
        };
        if result.confidence < self.config.detection_threshold || !result.label.is_recognized() {
            return;
        }

        match self.candidate.as_mut() {
            Some(c) if c.label == result.label => {
                c.count = c.count.saturating_add(1);
                c.confidence = c.confidence.max(result.confidence);
                if c.count == self.config.confirmation_count {
                    debug!(
                        "Confirmed '{}' after {}ms",
                        c.label,
                        now_ms.saturating_sub(c.first_seen_ms)
                    );
                }
            }
            _ => {
                debug!("New candidate '{}' ({:.2})", result.label, result.confidence);
                self.candidate = Some(GestureCandidate {
                    label: result.label,
                    confidence: result.confidence,
                    count: 1,
                    first_seen_ms: now_ms,
                });
                self.last_change_ms = Some(now_ms);
            }
        }
    }

    fn evaluate(&mut self, now_ms: u64) -> DisplayState {
        if let Some(c) = self.candidate {
            if now_ms.saturating_sub(c.first_seen_ms) > self.config.confirmation_window_ms {
                debug!("Candidate '{}' expired at count {}", c.label, c.count);
                self.candidate = None;
            }
        }

        let Some(c) = self.candidate else {
            return DisplayState::Waiting;
        };

        if c.count >= self.config.confirmation_count {
            return DisplayState::Confirmed {
                label: c.label,
                confidence: (c.confidence + self.config.confirmation_bonus).min(1.0),
            };
        }

        let in_grace = self
            .last_change_ms
            .is_some_and(|t| now_ms.saturating_sub(t) < self.config.grace_period_ms);
        if in_grace {
            return DisplayState::Settling;
        }

        DisplayState::InProgress {
            label: c.label,
            count: c.count,
            confidence: c.confidence * (c.count as f64 / self.config.confirmation_count as f64),
        }
    }
}

impl Default for ConfirmationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
