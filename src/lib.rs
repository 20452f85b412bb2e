//! Best-fit camera aspect ratio and preview size for a display region.
//!
//! - [`fit`] holds the pure selection and size derivation functions.
//! - [`binding::AutoSize`] keeps a suggestion current as the container is laid
//!   out and the camera reports its capabilities.

pub mod binding;
pub mod config;
pub mod error;
pub mod events;
pub mod fit;
pub mod geometry;
pub mod ratio;
pub mod tasks {
    pub mod capabilities;
}

pub use binding::{AutoSize, FitState};
pub use config::AutoSizeConfig;
pub use error::{FitError, RatioReason};
pub use fit::{SizeDerivation, Suggestion, derive_size, select_best_ratio, suggest};
pub use geometry::{Dimensions, LayoutEvent};
pub use ratio::AspectRatio;
pub use tasks::capabilities::CameraHandle;
