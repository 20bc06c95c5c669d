// THEORY:
// The `pipeline` module is the top-level API for the tracker. One call per
// frame: segment the configured color, pick the largest contour, measure it,
// gate it by radius, record the outcome in the trail and draw the overlay.
// It owns the only persistent state (the trail); everything else is computed
// fresh from the frame passed in.

use opencv::prelude::*;
use tracing::{debug, info, trace};

use crate::core_modules::color_range::ColorRange;
use crate::core_modules::detector::{self, Detection};
use crate::core_modules::overlay;
use crate::core_modules::segmentation;
use crate::core_modules::trail::PointTrail;
use crate::error::PipelineError;

/// Configuration for the tracker, allowing for tunable behavior.
///
/// Every stage is explicit here: the color bounds, the preprocessing sizes,
/// the morphology iteration counts and the gating radius.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// HSV bounds that count as "the object's color".
    pub color_range: ColorRange,
    /// Width every frame is scaled to before processing.
    pub resize_width: i32,
    /// Side of the Gaussian blur kernel. Must be odd.
    pub blur_kernel: i32,
    /// Erosion passes applied to the raw mask.
    pub erode_iterations: i32,
    /// Dilation passes applied after erosion.
    pub dilate_iterations: i32,
    /// Detections with an enclosing circle at or below this radius are
    /// treated as noise and recorded as a gap.
    pub min_radius: f32,
    /// Maximum number of trail entries kept on screen.
    pub trail_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            color_range: ColorRange::default(),
            resize_width: 600,
            blur_kernel: 11,
            erode_iterations: 2,
            dilate_iterations: 2,
            min_radius: 15.0,
            trail_capacity: 128,
        }
    }
}

impl PipelineConfig {
    fn validate(&self) -> Result<(), PipelineError> {
        if self.resize_width <= 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "resize width must be positive, got {}",
                self.resize_width
            )));
        }
        if self.blur_kernel <= 0 || self.blur_kernel % 2 == 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "blur kernel must be a positive odd number, got {}",
                self.blur_kernel
            )));
        }
        if self.trail_capacity == 0 {
            return Err(PipelineError::InvalidConfig(
                "trail capacity must be non-zero".to_string(),
            ));
        }
        if !self.color_range.is_ordered() {
            return Err(PipelineError::InvalidConfig(
                "color range lower bound exceeds upper bound".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything produced for one frame: the annotated frame ready for display,
/// the binary mask it was derived from, and the gated detection, if any.
pub struct FrameOutput {
    pub frame: Mat,
    pub mask: Mat,
    pub detection: Option<Detection>,
}

/// The main, top-level struct for the tracker.
pub struct TrackerPipeline {
    config: PipelineConfig,
    trail: PointTrail,
}

impl TrackerPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        info!(
            trail_capacity = config.trail_capacity,
            min_radius = config.min_radius,
            "tracker pipeline ready"
        );
        let trail = PointTrail::new(config.trail_capacity);
        Ok(Self { config, trail })
    }

    /// Processes one frame and returns its annotated copy.
    ///
    /// The trail always advances by exactly one entry per call: the centroid
    /// when an object passed the gate, an empty marker otherwise.
    pub fn process(&mut self, frame: &Mat) -> Result<FrameOutput, PipelineError> {
        let (mut annotated, hsv) = segmentation::preprocess(
            frame,
            self.config.resize_width,
            self.config.blur_kernel,
        )?;
        let mask = segmentation::color_mask(
            &hsv,
            &self.config.color_range,
            self.config.erode_iterations,
            self.config.dilate_iterations,
        )?;

        let mut detection = None;
        if let Some(contour) = detector::find_largest_contour(&mask)? {
            if let Some(candidate) = detector::measure(&contour)? {
                if candidate.radius > self.config.min_radius {
                    overlay::draw_marker(&mut annotated, &candidate)?;
                    detection = Some(candidate);
                } else {
                    trace!(radius = candidate.radius, "contour below gating radius");
                }
            }
        }

        self.trail.push(detection.map(|d| d.centroid));
        overlay::draw_trail(&mut annotated, &self.trail)?;

        if let Some(d) = &detection {
            debug!(
                x = d.centroid.x,
                y = d.centroid.y,
                radius = d.radius,
                "object tracked"
            );
        }

        Ok(FrameOutput {
            frame: annotated,
            mask,
            detection,
        })
    }

    pub fn trail(&self) -> &PointTrail {
        &self.trail
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
