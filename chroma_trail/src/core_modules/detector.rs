use opencv::{
    core::{Point, Point2f, Vector},
    imgproc,
    prelude::*,
};

use crate::error::PipelineError;

/// A single measured object candidate for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Centroid derived from the contour's image moments (m10/m00, m01/m00).
    pub centroid: Point,
    /// Center of the minimal enclosing circle.
    pub circle_center: Point2f,
    /// Radius of the minimal enclosing circle, in pixels.
    pub radius: f32,
}

/// Extracts all external contours from the binary mask and returns the one
/// enclosing the greatest area, or `None` when the mask has no foreground.
/// Picking the largest keeps the tracker on the dominant object when two
/// matching regions are in frame.
pub fn find_largest_contour(mask: &Mat) -> Result<Option<Vector<Point>>, PipelineError> {
    let mut contours = Vector::<Vector<Point>>::new();
    imgproc::find_contours(
        mask,
        &mut contours,
        imgproc::RETR_EXTERNAL,
        imgproc::CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    let mut largest: Option<Vector<Point>> = None;
    let mut largest_area = 0.0f64;
    for contour in contours {
        let area = imgproc::contour_area(&contour, false)?;
        if largest.is_none() || area > largest_area {
            largest_area = area;
            largest = Some(contour);
        }
    }
    Ok(largest)
}

/// Measures a contour's enclosing circle and moment centroid.
///
/// A degenerate contour (a bare point or line) has zero m00, which would
/// divide by zero; that case is reported as `None` rather than a fault.
pub fn measure(contour: &Vector<Point>) -> Result<Option<Detection>, PipelineError> {
    let mut circle_center = Point2f::default();
    let mut radius = 0.0f32;
    imgproc::min_enclosing_circle(contour, &mut circle_center, &mut radius)?;

    let moments = imgproc::moments(contour, false)?;
    if moments.m00.abs() < f64::EPSILON {
        return Ok(None);
    }
    let centroid = Point::new(
        (moments.m10 / moments.m00) as i32,
        (moments.m01 / moments.m00) as i32,
    );

    Ok(Some(Detection {
        centroid,
        circle_center,
        radius,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{self, Scalar};

    fn disk_mask(rows: i32, cols: i32, center: Point, radius: i32) -> Mat {
        let mut mask =
            Mat::new_rows_cols_with_default(rows, cols, core::CV_8UC1, Scalar::all(0.0)).unwrap();
        imgproc::circle(
            &mut mask,
            center,
            radius,
            Scalar::all(255.0),
            -1,
            imgproc::LINE_8,
            0,
        )
        .unwrap();
        mask
    }

    #[test]
    fn empty_mask_has_no_contour() {
        let mask =
            Mat::new_rows_cols_with_default(100, 100, core::CV_8UC1, Scalar::all(0.0)).unwrap();
        assert!(find_largest_contour(&mask).unwrap().is_none());
    }

    #[test]
    fn largest_of_two_regions_wins() {
        let mut mask = disk_mask(200, 200, Point::new(60, 60), 30);
        imgproc::circle(
            &mut mask,
            Point::new(160, 160),
            8,
            Scalar::all(255.0),
            -1,
            imgproc::LINE_8,
            0,
        )
        .unwrap();

        let contour = find_largest_contour(&mask).unwrap().unwrap();
        let detection = measure(&contour).unwrap().unwrap();
        assert!((detection.centroid.x - 60).abs() <= 2);
        assert!((detection.centroid.y - 60).abs() <= 2);
        assert!((detection.radius - 30.0).abs() <= 3.0);
    }

    #[test]
    fn circle_and_centroid_agree_for_a_disk() {
        let mask = disk_mask(120, 160, Point::new(80, 60), 20);
        let contour = find_largest_contour(&mask).unwrap().unwrap();
        let detection = measure(&contour).unwrap().unwrap();
        assert!((detection.circle_center.x - detection.centroid.x as f32).abs() <= 2.0);
        assert!((detection.circle_center.y - detection.centroid.y as f32).abs() <= 2.0);
    }

    #[test]
    fn degenerate_contour_measures_none() {
        let contour: Vector<Point> = [Point::new(5, 5), Point::new(6, 5)].into_iter().collect();
        assert!(measure(&contour).unwrap().is_none());
    }
}
