//! Proximity gate: finger tip to ring distance against the alert threshold

use glam::Vec2;

/// Classifies a distance as near or far
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityGate {
    threshold: f32,
}

impl ProximityGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Euclidean distance on the 2D plane
    pub fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        a.distance(b)
    }

    /// Inclusive: exactly on the threshold counts as near
    pub fn is_near(&self, distance: f32) -> bool {
        distance <= self.threshold
    }

    /// Distance and classification in one call
    pub fn measure(&self, a: Vec2, b: Vec2) -> (f32, bool) {
        let d = self.distance(a, b);
        (d, self.is_near(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let gate = ProximityGate::new(2.5);
        assert_eq!(gate.distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let gate = ProximityGate::new(2.5);
        assert!(gate.is_near(2.5));
        assert!(gate.is_near(0.0));
        assert!(!gate.is_near(2.5001));
    }

    #[test]
    fn test_measure() {
        let gate = ProximityGate::new(1.0);
        let (d, near) = gate.measure(Vec2::new(2.0, 0.0), Vec2::ZERO);
        assert_eq!(d, 2.0);
        assert!(!near);
    }
}
