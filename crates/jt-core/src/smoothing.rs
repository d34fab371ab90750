use crate::constants::SMOOTHING_ALPHA;
use crate::model::clamp01;

/// First-order low-pass between the requested distortion and the one on screen.
///
/// `target` moves whenever the controller publishes a value; `current` only
/// moves in [`SmoothedDistortion::step`], once per rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedDistortion {
    target: f32,
    current: f32,
    alpha: f32,
}

impl Default for SmoothedDistortion {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl SmoothedDistortion {
    /// Start at rest on `initial`.
    pub fn new(initial: f32) -> Self {
        let v = clamp01(initial);
        Self {
            target: v,
            current: v,
            alpha: SMOOTHING_ALPHA,
        }
    }

    /// Override the per-frame step fraction; values outside (0, 1] are clamped.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(f32::EPSILON, 1.0);
        self
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = clamp01(target);
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        clamp01(self.current)
    }

    /// Advance one frame and return the progress to draw.
    pub fn step(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.alpha;
        self.current()
    }
}
