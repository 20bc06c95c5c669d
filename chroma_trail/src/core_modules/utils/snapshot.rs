use std::fs::File;
use std::path::Path;

use image::{ImageEncoder, codecs::png::PngEncoder};
use opencv::prelude::*;

use crate::error::PipelineError;

/// Writes a single-channel mask out as a grayscale PNG.
///
/// Handy for tuning a color range: run once with a mask dump and inspect
/// which pixels survived the threshold.
pub fn save_mask(path: &Path, mask: &Mat) -> Result<(), PipelineError> {
    let output = File::create(path)?;
    let encoder = PngEncoder::new(output);
    encoder.write_image(
        mask.data_bytes()?,
        mask.cols() as u32,
        mask.rows() as u32,
        image::ExtendedColorType::L8,
    )?;
    Ok(())
}
