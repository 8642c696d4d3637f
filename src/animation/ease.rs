use crate::foundation::error::{SegueError, SegueResult};

/// Frame-stepped ease-out used to advance transition progress.
///
/// Each frame applies `progress = min(1, progress + progress / k + epsilon)`. The proportional
/// term dominates once the run is underway (fast start, slow settle) while `epsilon` guarantees
/// forward motion from zero, so any `k > 0, epsilon > 0` reaches exactly `1.0` after a finite,
/// deterministic number of frames. There is no wall-clock duration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EaseOut {
    /// Divisor of the proportional term.
    pub k: f64,
    /// Additive floor applied every frame.
    pub epsilon: f64,
}

impl Default for EaseOut {
    fn default() -> Self {
        Self::GENTLE
    }
}

impl EaseOut {
    /// Short, punchy settle.
    pub const SNAPPY: Self = Self {
        k: 6.0,
        epsilon: 0.02,
    };
    /// Middle ground.
    pub const STANDARD: Self = Self {
        k: 8.0,
        epsilon: 0.02,
    };
    /// Long settle; the default.
    pub const GENTLE: Self = Self {
        k: 20.0,
        epsilon: 0.02,
    };

    /// Create a validated stepper.
    pub fn new(k: f64, epsilon: f64) -> SegueResult<Self> {
        let ease = Self { k, epsilon };
        ease.validate()?;
        Ok(ease)
    }

    /// Check the termination constraint: both terms finite and strictly positive.
    pub fn validate(&self) -> SegueResult<()> {
        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(SegueError::validation("easing k must be finite and > 0"));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SegueError::validation(
                "easing epsilon must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Advance `progress` by one frame.
    pub fn step(&self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        (p + p / self.k + self.epsilon).min(1.0)
    }

    /// Number of frames needed to go from `0` to exactly `1`.
    pub fn frames_to_settle(&self) -> u64 {
        self.curve().len() as u64
    }

    /// Progress value after each frame, ending with `1.0`.
    pub fn curve(&self) -> Vec<f64> {
        let mut out = Vec::new();
        let mut p = 0.0;
        while p < 1.0 {
            p = self.step(p);
            out.push(p);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
