use crate::classifier;
use crate::config::EngineConfig;
use crate::engine::{Clock, ConfirmationEngine, DisplayState, EngineSnapshot, MonotonicClock};
use crate::error::{SfResult, SignForgeError};
use crate::gestures::FrameOutcome;
use crate::landmarks::HandDetection;
use crate::response::{self, SignResponse};
use chrono::Utc;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// One processed frame as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recognition {
    pub outcome: FrameOutcome,
    pub display: DisplayState,
    pub timestamp_ms: u64,
}

/// A recognition session safe to share between threads.
///
/// Frames are serialized through the inner mutex, one at a time, each
/// processed to completion before the next.
pub struct RecognitionSession {
    engine: Mutex<ConfirmationEngine>,
    clock: Box<dyn Clock>,
}

impl RecognitionSession {
    pub fn new(config: EngineConfig) -> SfResult<Self> {
        Self::with_clock(config, Box::new(MonotonicClock::new()))
    }

    pub fn with_clock(config: EngineConfig, clock: Box<dyn Clock>) -> SfResult<Self> {
        config.validate()?;
        info!(
            "Session started: {} sightings within {}ms, threshold {:.2}",
            config.confirmation_count, config.confirmation_window_ms, config.detection_threshold
        );
        Ok(Self {
            engine: Mutex::new(ConfirmationEngine::new(config)),
            clock,
        })
    }

    fn engine(&self) -> SfResult<MutexGuard<'_, ConfirmationEngine>> {
        self.engine
            .lock()
            .map_err(|e| SignForgeError::Validation(format!("Session state poisoned: {}", e)))
    }

    /// Classifies raw landmarks and advances the session.
    pub fn submit(&self, points: &[Vec<f64>]) -> SfResult<Recognition> {
        self.submit_outcome(classifier::classify_raw(points))
    }

    /// Same as `submit` for a multi-hand detector result.
    pub fn submit_detections(&self, detections: &[HandDetection]) -> SfResult<Recognition> {
        self.submit_outcome(classifier::classify_detections(detections))
    }

    fn submit_outcome(&self, outcome: FrameOutcome) -> SfResult<Recognition> {
        let now = self.clock.now_ms();
        let display = self.engine()?.process(&outcome, now);
        Ok(Recognition {
            outcome,
            display,
            timestamp_ms: now,
        })
    }

    /// Current display state without new input.
    pub fn poll(&self) -> SfResult<DisplayState> {
        let now = self.clock.now_ms();
        Ok(self.engine()?.poll(now))
    }

    /// Explains what the session shows right now, re-evaluated at the
    /// session clock. Waiting and settling states have no explanation and
    /// yield an error.
    pub fn explain_current(&self) -> SfResult<SignResponse> {
        let display = self.poll()?;
        response::from_display(&display, Utc::now())
    }

    pub fn snapshot(&self) -> SfResult<EngineSnapshot> {
        Ok(self.engine()?.snapshot())
    }

    pub fn reset(&self) -> SfResult<()> {
        self.engine()?.reset();
        info!("Session reset");
        Ok(())
    }
}
