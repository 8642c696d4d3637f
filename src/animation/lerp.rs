use crate::foundation::core::Bounds;

/// Interpolation contract for animated values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    ///
    /// `t <= 0` yields `a` and `t >= 1` yields `b` exactly.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if t <= 0.0 {
            *a
        } else if t >= 1.0 {
            // `a + (b - a)` is not always bit-equal to `b`.
            *b
        } else {
            a + (b - a) * t
        }
    }
}

impl Lerp for Bounds {
    /// Interpolates the four independent channels; `right`/`bottom` are re-derived.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if t >= 1.0 {
            return *b;
        }
        Bounds::new(
            f64::lerp(&a.top, &b.top, t),
            f64::lerp(&a.left, &b.left, t),
            f64::lerp(&a.width, &b.width, t),
            f64::lerp(&a.height, &b.height, t),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;
