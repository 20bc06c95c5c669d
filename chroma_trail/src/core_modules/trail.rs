// THEORY:
// The `trail` module is the only stateful piece of the tracker. It remembers
// where the object has been so the overlay can draw a comet-like tail behind
// it. Entries are ordered most-recent-first and an entry can be empty, which
// records "the object was not seen this frame" and breaks the tail there.
//
// The buffer is a fixed-size ring indexed by insertion order rather than a
// growable deque: capacity is decided once, pushes never allocate, and the
// oldest entry is overwritten in place once the ring is full.

use opencv::core::Point;

/// Scale factor applied to the per-segment thickness curve.
const TRAIL_THICKNESS_SCALE: f64 = 2.33;

/// One drawable piece of the trail, connecting two consecutive detections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    /// The older of the two endpoints.
    pub from: Point,
    /// The newer of the two endpoints.
    pub to: Point,
    /// Line thickness in pixels, non-increasing with segment age.
    pub thickness: i32,
}

/// A fixed-capacity, most-recent-first ring of optional centroids.
///
/// Capacity must be non-zero; the pipeline enforces this when validating its
/// configuration.
#[derive(Debug, Clone)]
pub struct PointTrail {
    slots: Vec<Option<Point>>,
    head: usize,
    len: usize,
}

impl PointTrail {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            head: 0,
            len: 0,
        }
    }

    /// Records the outcome of one frame: the detected centroid, or `None`
    /// when nothing passed the gating radius. Once the ring is full the
    /// oldest entry is evicted.
    pub fn push(&mut self, point: Option<Point>) {
        let capacity = self.slots.len();
        if self.len > 0 {
            self.head = (self.head + 1) % capacity;
        }
        self.slots[self.head] = point;
        if self.len < capacity {
            self.len += 1;
        }
    }

    /// The entry `index` frames ago (0 = newest). `None` both for an empty
    /// entry and for an index beyond the recorded history.
    pub fn get(&self, index: usize) -> Option<Point> {
        if index >= self.len {
            return None;
        }
        let capacity = self.slots.len();
        let slot = (self.head + capacity - index) % capacity;
        self.slots[slot]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// All recorded entries, newest first, empty markers included.
    pub fn iter(&self) -> impl Iterator<Item = Option<Point>> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// The drawable segments of the trail, newest first.
    ///
    /// A segment connects two consecutive non-empty entries; any pair that
    /// touches an empty marker is skipped, so gaps in detection leave gaps
    /// in the tail. Thickness follows floor(sqrt(capacity / (i + 1)) *
    /// scale) where `i` is the older endpoint's index.
    pub fn segments(&self) -> impl Iterator<Item = TrailSegment> + '_ {
        let capacity = self.capacity();
        (1..self.len).filter_map(move |i| {
            let newer = self.get(i - 1)?;
            let older = self.get(i)?;
            let thickness =
                ((capacity as f64 / (i + 1) as f64).sqrt() * TRAIL_THICKNESS_SCALE) as i32;
            Some(TrailSegment {
                from: older,
                to: newer,
                thickness,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn starts_empty() {
        let trail = PointTrail::new(8);
        assert!(trail.is_empty());
        assert_eq!(trail.segments().count(), 0);
    }

    #[test]
    fn newest_entry_is_index_zero() {
        let mut trail = PointTrail::new(4);
        trail.push(Some(pt(1, 1)));
        trail.push(Some(pt(2, 2)));
        assert_eq!(trail.get(0), Some(pt(2, 2)));
        assert_eq!(trail.get(1), Some(pt(1, 1)));
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let mut trail = PointTrail::new(3);
        for i in 1..=5 {
            trail.push(Some(pt(i, i)));
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.get(0), Some(pt(5, 5)));
        assert_eq!(trail.get(1), Some(pt(4, 4)));
        assert_eq!(trail.get(2), Some(pt(3, 3)));
        assert_eq!(trail.get(3), None);
    }

    #[test]
    fn empty_marker_counts_toward_capacity() {
        let mut trail = PointTrail::new(2);
        trail.push(Some(pt(1, 1)));
        trail.push(None);
        trail.push(None);
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.iter().flatten().count(), 0);
    }

    #[test]
    fn no_segment_touches_an_empty_marker() {
        let mut trail = PointTrail::new(5);
        for entry in [
            None,
            Some(pt(10, 10)),
            Some(pt(12, 11)),
            None,
            Some(pt(20, 20)),
        ] {
            trail.push(entry);
        }
        let segments: Vec<_> = trail.segments().collect();
        // Only (12,11)-(10,10) are adjacent and both present; (20,20) has an
        // empty predecessor so it gets no segment.
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].from, pt(10, 10));
        assert_eq!(segments[0].to, pt(12, 11));
    }

    #[test]
    fn single_entry_has_no_segment() {
        let mut trail = PointTrail::new(5);
        trail.push(Some(pt(3, 3)));
        assert_eq!(trail.segments().count(), 0);
    }

    #[test]
    fn thickness_never_increases_with_age() {
        let mut trail = PointTrail::new(16);
        for i in 0..16 {
            trail.push(Some(pt(i, i)));
        }
        let thicknesses: Vec<i32> = trail.segments().map(|s| s.thickness).collect();
        assert_eq!(thicknesses.len(), 15);
        assert!(thicknesses.windows(2).all(|w| w[0] >= w[1]));
        // Newest segment is the fattest, oldest tapers off but stays visible.
        assert!(thicknesses[0] > *thicknesses.last().unwrap());
        assert!(*thicknesses.last().unwrap() >= 1);
    }

    #[test]
    fn segments_survive_ring_wraparound() {
        let mut trail = PointTrail::new(3);
        for i in 1..=7 {
            trail.push(Some(pt(i, i)));
        }
        let segments: Vec<_> = trail.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].to, pt(7, 7));
        assert_eq!(segments[0].from, pt(6, 6));
        assert_eq!(segments[1].to, pt(6, 6));
        assert_eq!(segments[1].from, pt(5, 5));
    }
}
