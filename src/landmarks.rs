//! Hand landmark layout and the boundary to landmark sources.
//!
//! Index convention (21 points): wrist, then thumb/index/middle/ring/pinky
//! each from base to tip. Callers must reproduce it exactly.

use crate::gestures::InvalidReason;
use serde::{Deserialize, Serialize};

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Untrusted landmark data as delivered by a detector or a recording.
pub type RawFrame = Vec<Vec<f64>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance in the image plane; depth is ignored.
    #[inline(always)]
    pub fn planar_distance(&self, other: &Landmark) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A validated set of 21 landmarks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    points: [Landmark; LANDMARK_COUNT],
}

impl Frame {
    /// Fails on non-finite coordinates.
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Result<Self, InvalidReason> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(InvalidReason::BadCoordinates { index });
        }
        Ok(Self { points })
    }

    /// Validates a raw frame. Coordinates past the third are ignored.
    pub fn from_points(points: &[Vec<f64>]) -> Result<Self, InvalidReason> {
        if points.len() != LANDMARK_COUNT {
            return Err(InvalidReason::WrongPointCount {
                found: points.len(),
            });
        }

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (index, coords) in points.iter().enumerate() {
            if coords.len() < 3 || !coords.iter().all(|c| c.is_finite()) {
                return Err(InvalidReason::BadCoordinates { index });
            }
            landmarks[index] = Landmark::new(coords[0], coords[1], coords[2]);
        }

        Ok(Self { points: landmarks })
    }

    #[inline(always)]
    pub fn point(&self, index: usize) -> &Landmark {
        &self.points[index]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    pub fn to_raw(&self) -> RawFrame {
        landmarks_to_raw(&self.points)
    }
}

pub fn landmarks_to_raw(landmarks: &[Landmark]) -> RawFrame {
    landmarks.iter().map(|l| vec![l.x, l.y, l.z]).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// One detected hand as reported by a landmark source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandDetection {
    pub landmarks: Vec<Landmark>,
    pub handedness: Handedness,
    pub confidence: f64,
}

impl HandDetection {
    pub fn to_raw(&self) -> RawFrame {
        landmarks_to_raw(&self.landmarks)
    }
}

/// Picks the detection with the highest confidence. Ties keep the first.
pub fn select_dominant(detections: &[HandDetection]) -> Option<&HandDetection> {
    detections.iter().reduce(|dominant, current| {
        if current.confidence > dominant.confidence {
            current
        } else {
            dominant
        }
    })
}

/// Anything that produces hand detections on demand (camera pipeline,
/// recording, simulator).
pub trait LandmarkSource {
    fn next_detections(&mut self) -> Vec<HandDetection>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_open() -> RawFrame {
        (0..LANDMARK_COUNT)
            .map(|i| vec![0.5, 0.5 - i as f64 * 0.01, 0.0])
            .collect()
    }

    #[test]
    fn test_from_points_accepts_extra_coordinates() {
        let mut raw = raw_open();
        raw[3].push(42.0);
        let frame = Frame::from_points(&raw).unwrap();
        assert_eq!(frame.point(3).z, 0.0);
    }

    #[test]
    fn test_from_points_rejects_nan() {
        let mut raw = raw_open();
        raw[7][1] = f64::NAN;
        assert_eq!(
            Frame::from_points(&raw),
            Err(InvalidReason::BadCoordinates { index: 7 })
        );
    }

    #[test]
    fn test_from_points_rejects_short_landmark() {
        let mut raw = raw_open();
        raw[0] = vec![0.1, 0.2];
        assert_eq!(
            Frame::from_points(&raw),
            Err(InvalidReason::BadCoordinates { index: 0 })
        );
    }

    #[test]
    fn test_select_dominant() {
        let make = |confidence| HandDetection {
            landmarks: vec![],
            handedness: Handedness::Right,
            confidence,
        };
        let hands = vec![make(0.7), make(0.95), make(0.9)];
        assert_eq!(select_dominant(&hands).unwrap().confidence, 0.95);
        assert!(select_dominant(&[]).is_none());
    }
}
