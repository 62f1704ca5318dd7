//! Time-windowed activity series and their distances
//!
//! - [`FeatureCell`] - one window's feature vector
//! - [`SeriesLine`] - an ordered run of cells with a name and time origin
//! - [`distance`] - warp and sliding-offset alignment distances

pub mod cell;
pub mod distance;
pub mod line;

pub use cell::{CellWeights, FeatureCell};
pub use distance::{array_alignment_distance, sliding_offset_distance, warp_distance};
pub use line::{SeriesLine, DEFAULT_WINDOW_SIZE};
