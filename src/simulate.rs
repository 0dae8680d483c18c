//! Simulated landmark source for demos, tests and benchmarks.
//!
//! Produces anatomically plausible right-hand poses in normalized image
//! coordinates with seeded jitter, so runs are reproducible.

use crate::landmarks::*;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SimGesture {
    Fist,
    Open,
    Stop,
    Point,
    Peace,
    ThumbsUp,
    Ok,
    /// Open hand swaying sideways.
    Wave,
    /// No hand in view.
    None,
}

/// How the simulator picks the next pose.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureScript {
    Fixed(SimGesture),
    /// Each gesture is held for `hold_frames` frames, then the next one.
    Cycle {
        gestures: Vec<SimGesture>,
        hold_frames: u64,
    },
    /// A random gesture every `hold_frames` frames.
    Random { hold_frames: u64 },
}

const WRIST_POS: (f64, f64) = (0.50, 0.80);
// Finger columns, index to pinky.
const FINGER_X: [f64; 4] = [0.40, 0.48, 0.57, 0.66];
const FINGER_TIP_Y: [f64; 4] = [0.36, 0.34, 0.36, 0.42];
const FINGER_BASE: [usize; 4] = [INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

#[derive(Debug, Clone, Copy)]
enum Thumb {
    Folded,
    Out,
    Pinch,
}

/// Noise-free landmarks for `gesture`, or `None` for `SimGesture::None`.
pub fn template(gesture: SimGesture) -> Option<[Landmark; LANDMARK_COUNT]> {
    use SimGesture as G;
    let (fingers, thumb) = match gesture {
        G::None => return None,
        G::Fist => ([false; 4], Thumb::Folded),
        G::Open | G::Wave => ([true; 4], Thumb::Out),
        G::Stop => ([true; 4], Thumb::Folded),
        G::Point => ([true, false, false, false], Thumb::Folded),
        G::Peace => ([true, true, false, false], Thumb::Folded),
        G::ThumbsUp => ([false; 4], Thumb::Out),
        G::Ok => ([true, false, false, false], Thumb::Pinch),
    };

    let mut points = [Landmark::default(); LANDMARK_COUNT];
    points[WRIST] = Landmark::new(WRIST_POS.0, WRIST_POS.1, 0.0);

    points[THUMB_CMC] = Landmark::new(0.42, 0.74, 0.0);
    points[THUMB_MCP] = Landmark::new(0.38, 0.68, 0.0);
    points[THUMB_IP] = Landmark::new(0.36, 0.62, 0.0);
    points[THUMB_TIP] = match thumb {
        Thumb::Folded => Landmark::new(0.30, 0.62, 0.0),
        Thumb::Out => Landmark::new(0.42, 0.55, 0.0),
        Thumb::Pinch => Landmark::new(0.43, 0.40, 0.0),
    };

    for (f, &extended) in fingers.iter().enumerate() {
        let x = FINGER_X[f];
        let base = FINGER_BASE[f];
        let ys = if extended {
            [0.62, 0.52, 0.44, FINGER_TIP_Y[f]]
        } else {
            [0.62, 0.54, 0.58, 0.62]
        };
        for (j, y) in ys.into_iter().enumerate() {
            points[base + j] = Landmark::new(x, y, 0.0);
        }
    }

    Some(points)
}

pub struct SimulatedDetector {
    rng: fastrand::Rng,
    script: GestureScript,
    noise: f64,
    frame: u64,
    current: SimGesture,
}

impl SimulatedDetector {
    pub const DEFAULT_NOISE: f64 = 0.005;

    pub fn new(script: GestureScript, seed: u64) -> Self {
        let current = match &script {
            GestureScript::Fixed(g) => *g,
            GestureScript::Cycle { gestures, .. } => {
                gestures.first().copied().unwrap_or(SimGesture::None)
            }
            GestureScript::Random { .. } => SimGesture::None,
        };
        Self {
            rng: fastrand::Rng::with_seed(seed),
            script,
            noise: Self::DEFAULT_NOISE,
            frame: 0,
            current,
        }
    }

    /// Max absolute jitter added to x and y (z gets half).
    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise.max(0.0);
        self
    }

    /// Gesture shown by the most recently produced frame.
    pub fn current(&self) -> SimGesture {
        self.current
    }

    fn advance_script(&mut self) {
        const POOL: [SimGesture; 9] = [
            SimGesture::Fist,
            SimGesture::Open,
            SimGesture::Stop,
            SimGesture::Point,
            SimGesture::Peace,
            SimGesture::ThumbsUp,
            SimGesture::Ok,
            SimGesture::Wave,
            SimGesture::None,
        ];

        match &self.script {
            GestureScript::Fixed(g) => self.current = *g,
            GestureScript::Cycle {
                gestures,
                hold_frames,
            } => {
                if !gestures.is_empty() {
                    let slot = self.frame / (*hold_frames).max(1);
                    self.current = gestures[(slot % gestures.len() as u64) as usize];
                }
            }
            GestureScript::Random { hold_frames } => {
                if self.frame % (*hold_frames).max(1) == 0 {
                    self.current = POOL[self.rng.usize(..POOL.len())];
                }
            }
        }
    }

    fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.rng.f64() - 0.5) * 2.0 * amplitude
    }
}

impl LandmarkSource for SimulatedDetector {
    fn next_detections(&mut self) -> Vec<HandDetection> {
        self.advance_script();
        let frame = self.frame;
        self.frame += 1;

        let Some(mut points) = template(self.current) else {
            return Vec::new();
        };

        let sway = if self.current == SimGesture::Wave {
            0.05 * (frame as f64 * 0.8).sin()
        } else {
            0.0
        };

        for p in points.iter_mut() {
            p.x += sway + self.jitter(self.noise);
            p.y += self.jitter(self.noise);
            p.z += self.jitter(self.noise * 0.5);
        }

        vec![HandDetection {
            landmarks: points.to_vec(),
            handedness: Handedness::Right,
            confidence: 0.85 + self.rng.f64() * 0.15,
        }]
    }
}
