use crate::error::FitError;

/// A rectangle size in pixels or logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// Long side over short side, so the result is always >= 1 and does not
    /// depend on orientation.
    pub fn target_ratio(&self) -> Result<f64, FitError> {
        let valid = |side: f64| side.is_finite() && side > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(FitError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.width.max(self.height) / self.width.min(self.height))
    }
}

/// Size reported by the UI each time the preview container is laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEvent {
    pub width: f64,
    pub height: f64,
}

impl From<LayoutEvent> for Dimensions {
    fn from(event: LayoutEvent) -> Self {
        Self::new(event.width, event.height)
    }
}
