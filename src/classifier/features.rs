use crate::landmarks::*;

/// Minimum tip-to-joint offset (normalized image units) for a digit to
/// count as extended.
pub const EXTENSION_THRESHOLD: f64 = 0.02;

/// Geometric summary of one frame. Everything the rule table looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandFeatures {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
    pub thumb: bool,

    /// Thumb tip to pinky tip.
    pub hand_size: f64,
    /// Index tip to pinky tip.
    pub finger_spread: f64,
    /// `finger_spread / hand_size`, 0 for a degenerate hand.
    pub openness: f64,
    pub thumb_index_distance: f64,
    /// Vertical tip/PIP offsets of index and middle, summed.
    pub curvature: f64,
}

impl HandFeatures {
    pub fn extract(frame: &Frame) -> Self {
        let p = |i: usize| frame.point(i);

        // y grows downward: a raised tip has the smaller y.
        let finger_up = |pip: usize, tip: usize| p(pip).y - p(tip).y > EXTENSION_THRESHOLD;

        let hand_size = p(THUMB_TIP).planar_distance(p(PINKY_TIP));
        let finger_spread = p(INDEX_TIP).planar_distance(p(PINKY_TIP));
        let openness = if hand_size > 0.0 {
            finger_spread / hand_size
        } else {
            0.0
        };

        Self {
            index: finger_up(INDEX_PIP, INDEX_TIP),
            middle: finger_up(MIDDLE_PIP, MIDDLE_TIP),
            ring: finger_up(RING_PIP, RING_TIP),
            pinky: finger_up(PINKY_PIP, PINKY_TIP),
            thumb: p(THUMB_TIP).x - p(THUMB_IP).x > EXTENSION_THRESHOLD,
            hand_size,
            finger_spread,
            openness,
            thumb_index_distance: p(THUMB_TIP).planar_distance(p(INDEX_TIP)),
            curvature: (p(INDEX_TIP).y - p(INDEX_PIP).y).abs()
                + (p(MIDDLE_TIP).y - p(MIDDLE_PIP).y).abs(),
        }
    }

    /// Count of extended fingers, thumb excluded.
    pub fn extended_fingers(&self) -> usize {
        [self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|&&up| up)
            .count()
    }

    pub fn all_fingers(&self) -> bool {
        self.index && self.middle && self.ring && self.pinky
    }

    pub fn no_fingers(&self) -> bool {
        !self.index && !self.middle && !self.ring && !self.pinky
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_frame() -> [Landmark; LANDMARK_COUNT] {
        [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT]
    }

    #[test]
    fn test_degenerate_hand_has_zero_openness() {
        let frame = Frame::new(flat_frame()).unwrap();
        let f = HandFeatures::extract(&frame);
        assert_eq!(f.hand_size, 0.0);
        assert_eq!(f.openness, 0.0);
        assert!(f.no_fingers());
        assert!(!f.thumb);
    }

    #[test]
    fn test_extension_needs_margin() {
        let mut points = flat_frame();
        // Inside the threshold.
        points[INDEX_TIP].y = 0.49;
        points[MIDDLE_TIP].y = 0.45;
        let f = HandFeatures::extract(&Frame::new(points).unwrap());
        assert!(!f.index);
        assert!(f.middle);
        assert_eq!(f.extended_fingers(), 1);
    }

    #[test]
    fn test_openness_is_scale_invariant() {
        let mut small = flat_frame();
        small[THUMB_TIP] = Landmark::new(0.40, 0.50, 0.0);
        small[INDEX_TIP] = Landmark::new(0.45, 0.40, 0.0);
        small[PINKY_TIP] = Landmark::new(0.60, 0.45, 0.0);

        let mut big = small;
        for p in big.iter_mut() {
            p.x *= 2.0;
            p.y *= 2.0;
        }

        let a = HandFeatures::extract(&Frame::new(small).unwrap());
        let b = HandFeatures::extract(&Frame::new(big).unwrap());
        assert!((a.openness - b.openness).abs() < 1e-9);
        assert!((b.hand_size - 2.0 * a.hand_size).abs() < 1e-9);
    }
}
