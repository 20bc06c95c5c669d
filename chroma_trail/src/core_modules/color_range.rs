use opencv::core::Scalar;

/// An inclusive lower/upper bound pair in HSV space, fixed for the session.
///
/// Pixels whose three channels all fall inside `[lower, upper]` are treated
/// as foreground by the segmentation stage. OpenCV hue runs 0..=179.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRange {
    pub lower: Scalar,
    pub upper: Scalar,
}

impl ColorRange {
    pub fn new(lower: (u8, u8, u8), upper: (u8, u8, u8)) -> Self {
        Self {
            lower: Scalar::new(lower.0 as f64, lower.1 as f64, lower.2 as f64, 0.0),
            upper: Scalar::new(upper.0 as f64, upper.1 as f64, upper.2 as f64, 0.0),
        }
    }

    /// True when every channel of `lower` is at most the matching channel of
    /// `upper`, i.e. the range can match at least one color.
    pub fn is_ordered(&self) -> bool {
        (0..3).all(|c| self.lower[c] <= self.upper[c])
    }
}

impl Default for ColorRange {
    /// The green of a standard tennis ball, the most common practice ball.
    fn default() -> Self {
        Self::new((29, 88, 10), (62, 255, 255))
    }
}
