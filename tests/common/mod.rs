#![allow(dead_code)]

use signforge::gestures::{ClassificationResult, FrameOutcome, GestureLabel};
use signforge::landmarks::*;

const FINGER_X: [f64; 4] = [0.40, 0.48, 0.57, 0.66];
const FINGER_MCP: [usize; 4] = [INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

pub const PIP_Y: f64 = 0.54;
pub const THUMB_IP_X: f64 = 0.36;

/// Builds hand frames starting from a closed fist: every fingertip below
/// its PIP joint, thumb tip left of the thumb IP joint.
pub struct HandBuilder {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandBuilder {
    pub fn fist() -> Self {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        points[WRIST] = Landmark::new(0.50, 0.80, 0.0);
        points[THUMB_CMC] = Landmark::new(0.42, 0.74, 0.0);
        points[THUMB_MCP] = Landmark::new(0.38, 0.68, 0.0);
        points[THUMB_IP] = Landmark::new(THUMB_IP_X, 0.62, 0.0);
        points[THUMB_TIP] = Landmark::new(0.30, 0.62, 0.0);

        for (f, &mcp) in FINGER_MCP.iter().enumerate() {
            let x = FINGER_X[f];
            points[mcp] = Landmark::new(x, 0.62, 0.0);
            points[mcp + 1] = Landmark::new(x, PIP_Y, 0.0);
            points[mcp + 2] = Landmark::new(x, 0.58, 0.0);
            points[mcp + 3] = Landmark::new(x, 0.62, 0.0);
        }
        Self { points }
    }

    /// Raises a fingertip (0 = index .. 3 = pinky) to `tip_y`.
    pub fn finger_tip(mut self, finger: usize, tip_y: f64) -> Self {
        let mcp = FINGER_MCP[finger];
        self.points[mcp + 2].y = (PIP_Y + tip_y) / 2.0;
        self.points[mcp + 3].y = tip_y;
        self
    }

    pub fn raise(self, finger: usize) -> Self {
        self.finger_tip(finger, 0.36)
    }

    pub fn index(self) -> Self {
        self.raise(0)
    }

    pub fn middle(self) -> Self {
        self.raise(1)
    }

    pub fn ring(self) -> Self {
        self.raise(2)
    }

    pub fn pinky(self) -> Self {
        self.raise(3)
    }

    pub fn all_fingers(self) -> Self {
        self.index().middle().ring().pinky()
    }

    /// Thumb tip to the right of the IP joint, away from the index tip.
    pub fn thumb_out(self) -> Self {
        self.thumb_tip(0.42, 0.55)
    }

    pub fn thumb_tip(mut self, x: f64, y: f64) -> Self {
        self.points[THUMB_TIP] = Landmark::new(x, y, 0.0);
        self
    }

    pub fn set(mut self, index: usize, x: f64, y: f64) -> Self {
        self.points[index] = Landmark::new(x, y, self.points[index].z);
        self
    }

    pub fn build(self) -> Frame {
        Frame::new(self.points).expect("builder produces finite points")
    }

    pub fn raw(self) -> RawFrame {
        landmarks_to_raw(&self.points)
    }
}

pub fn gesture(label: GestureLabel, confidence: f64) -> FrameOutcome {
    FrameOutcome::Gesture(ClassificationResult { label, confidence })
}
