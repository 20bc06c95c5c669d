// THEORY:
// The `segmentation` module turns a raw BGR frame into a binary mask where
// foreground means "looks like the tracked color". Every operation here is a
// single OpenCV call: resize for throughput, Gaussian blur to knock out
// sensor noise, BGR-to-HSV conversion so the range test is a hue test, then
// an inclusive in-range threshold cleaned up by erosion and dilation.

use opencv::{core, imgproc, prelude::*};

use crate::core_modules::color_range::ColorRange;
use crate::error::PipelineError;

/// Shrinks the frame to `resize_width` (preserving aspect ratio), blurs it
/// and converts to HSV. Returns both the resized frame, which the overlay
/// draws on, and its HSV counterpart.
pub fn preprocess(
    frame: &Mat,
    resize_width: i32,
    blur_kernel: i32,
) -> Result<(Mat, Mat), PipelineError> {
    let scale = resize_width as f64 / frame.cols() as f64;
    let size = core::Size::new(resize_width, (frame.rows() as f64 * scale).round() as i32);

    let mut resized = Mat::default();
    imgproc::resize(frame, &mut resized, size, 0.0, 0.0, imgproc::INTER_AREA)?;

    let mut blurred = Mat::default();
    imgproc::gaussian_blur(
        &resized,
        &mut blurred,
        core::Size::new(blur_kernel, blur_kernel),
        0.0,
        0.0,
        core::BORDER_DEFAULT,
    )?;

    let mut hsv = Mat::default();
    imgproc::cvt_color(&blurred, &mut hsv, imgproc::COLOR_BGR2HSV, 0)?;

    Ok((resized, hsv))
}

/// Thresholds the HSV frame against the configured color range, then erodes
/// and dilates to drop speckle noise and close small gaps.
pub fn color_mask(
    hsv: &Mat,
    range: &ColorRange,
    erode_iterations: i32,
    dilate_iterations: i32,
) -> Result<Mat, PipelineError> {
    let mut mask = Mat::default();
    core::in_range(hsv, &range.lower, &range.upper, &mut mask)?;

    // A default (empty) kernel gives the 3x3 rectangular structuring element.
    let kernel = Mat::default();
    let anchor = core::Point::new(-1, -1);

    let mut eroded = Mat::default();
    imgproc::erode(
        &mask,
        &mut eroded,
        &kernel,
        anchor,
        erode_iterations,
        core::BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;

    let mut dilated = Mat::default();
    imgproc::dilate(
        &eroded,
        &mut dilated,
        &kernel,
        anchor,
        dilate_iterations,
        core::BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;

    Ok(dilated)
}
