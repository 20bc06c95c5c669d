pub mod color_range;
pub mod detector;
pub mod overlay;
pub mod segmentation;
pub mod trail;
pub mod utils;
