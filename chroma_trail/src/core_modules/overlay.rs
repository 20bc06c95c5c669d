use opencv::{
    core::{Point, Scalar},
    imgproc,
    prelude::*,
};

use crate::core_modules::detector::Detection;
use crate::core_modules::trail::PointTrail;
use crate::error::PipelineError;

/// Red, for the enclosing circle and centroid dot (BGR order).
fn marker_color() -> Scalar {
    Scalar::new(0.0, 0.0, 255.0, 0.0)
}

/// Blue, for the motion trail (BGR order).
fn trail_color() -> Scalar {
    Scalar::new(255.0, 0.0, 0.0, 0.0)
}

const MARKER_THICKNESS: i32 = 2;
const CENTROID_DOT_RADIUS: i32 = 5;

/// Draws the enclosing-circle outline and a filled centroid dot in place.
pub fn draw_marker(frame: &mut Mat, detection: &Detection) -> Result<(), PipelineError> {
    let circle_center = Point::new(
        detection.circle_center.x as i32,
        detection.circle_center.y as i32,
    );
    imgproc::circle(
        frame,
        circle_center,
        detection.radius as i32,
        marker_color(),
        MARKER_THICKNESS,
        imgproc::LINE_8,
        0,
    )?;
    imgproc::circle(
        frame,
        detection.centroid,
        CENTROID_DOT_RADIUS,
        marker_color(),
        -1,
        imgproc::LINE_8,
        0,
    )?;
    Ok(())
}

/// Draws the fading tail: one line per pair of consecutive detections,
/// thicker for newer segments. Frames without a detection leave gaps.
pub fn draw_trail(frame: &mut Mat, trail: &PointTrail) -> Result<(), PipelineError> {
    for segment in trail.segments() {
        imgproc::line(
            frame,
            segment.from,
            segment.to,
            trail_color(),
            segment.thickness,
            imgproc::LINE_8,
            0,
        )?;
    }
    Ok(())
}
