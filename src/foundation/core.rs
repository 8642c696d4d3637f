pub use kurbo::{Point, Rect, Size, Vec2};

/// Axis-aligned snapshot of the screen area a node occupied at one instant.
///
/// Coordinates are viewport-space floats. `right` and `bottom` are always derived from
/// `left + width` and `top + height`; a snapshot is never edited in place, a fresh capture
/// replaces it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "BoundsRepr")]
pub struct Bounds {
    /// Top edge.
    pub top: f64,
    /// Right edge (`left + width`).
    pub right: f64,
    /// Bottom edge (`top + height`).
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

// Scripts and configs only need the four independent channels.
#[derive(serde::Deserialize)]
struct BoundsRepr {
    top: f64,
    left: f64,
    width: f64,
    height: f64,
}

impl From<BoundsRepr> for Bounds {
    fn from(r: BoundsRepr) -> Self {
        Self::new(r.top, r.left, r.width, r.height)
    }
}

impl Bounds {
    /// Zero-sized snapshot at the origin.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Build a snapshot from its four independent channels.
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            right: left + width,
            bottom: top + height,
            left,
            width,
            height,
        }
    }

    /// Convert from a kurbo rectangle (`x0`/`y0` is the top-left corner).
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.y0, rect.x0, rect.width(), rect.height())
    }

    /// Convert into a kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size())
    }

    /// Top-left corner.
    pub fn origin(self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Width and height.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Shift the snapshot by `delta` (x moves `left`, y moves `top`).
    pub fn translate(self, delta: Vec2) -> Self {
        Self::new(
            self.top + delta.y,
            self.left + delta.x,
            self.width,
            self.height,
        )
    }

    /// Return `true` when the node had no laid-out area (e.g. it was hidden).
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

/// Host-assigned identity of a floating overlay node.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct OverlayId(pub u64);

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
