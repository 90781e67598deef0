use serde::{Deserialize, Serialize};

/// A labeled disk in 2-D space, extracted from a generated SVG document.
///
/// The label is the circle's identifying attribute (`id` or fill color),
/// normalized to lowercase. A non-positive radius is unusual but not an
/// error; such a circle still participates in overlap checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub label: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Circle {
    pub fn new(label: impl Into<String>, cx: f64, cy: f64, r: f64) -> Self {
        Self {
            label: label.into().to_ascii_lowercase(),
            cx,
            cy,
            r,
        }
    }

    /// Euclidean distance between the centers of two circles.
    pub fn center_distance(&self, other: &Circle) -> f64 {
        let dx = self.cx - other.cx;
        let dy = self.cy - other.cy;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether two circles overlap.
    ///
    /// Overlap requires the center distance to be strictly less than the
    /// sum of the radii: externally tangent circles do NOT overlap.
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.center_distance(other) < self.r + other.r
    }
}
