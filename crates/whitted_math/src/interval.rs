/// A closed range of ray parameters `[min, max]`.
///
/// Intersection routines accept only `t` strictly inside the interval
/// (see [`Interval::surrounds`]), so `Interval::new(0.0, best_t)` reads as
/// "in front of the origin and strictly closer than the current best".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Everything in front of the ray origin.
    pub fn positive() -> Self {
        Self::new(0.0, f32::INFINITY)
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Same lower bound, new upper bound. Used to shrink the search window
    /// as closer hits are found.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surrounds_excludes_endpoints() {
        let interval = Interval::new(0.0, 4.0);

        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(4.0));
        assert!(interval.surrounds(1e-6));
        assert!(interval.surrounds(3.999));
    }

    #[test]
    fn test_positive_rejects_behind_origin() {
        let ahead = Interval::positive();

        assert!(!ahead.surrounds(-1.0));
        assert!(!ahead.surrounds(0.0));
        assert!(ahead.surrounds(1e10));
    }

    #[test]
    fn test_with_max_shrinks_window() {
        let shrunk = Interval::positive().with_max(2.5);

        assert_eq!(shrunk.min, 0.0);
        assert_eq!(shrunk.max, 2.5);
        assert!(!shrunk.surrounds(3.0));
    }
}
