//! Non-overlapping region sampler.
//!
//! [`generate_crops`] places a requested number of equally sized, axis-aligned
//! boxes on a canvas so that no two boxes share any area. Placement is done by
//! rejection sampling: candidate positions are drawn uniformly at random and
//! discarded when they overlap a box that was already accepted. The search is
//! bounded by an attempt budget, so it may fail even when a packing exists;
//! callers should leave enough slack between `count * crop area` and the canvas
//! area and treat [`CropError::PlacementExhausted`] as a routine outcome.
//!
//! The random source is passed in explicitly. Seeding it makes the result
//! reproducible, and giving every worker its own generator keeps parallel
//! sampling free of shared state.

use rand::Rng;
use tracing::{debug, trace};

use super::geometry::{CanvasSize, CropBox, CropSize};
use crate::core::{CropError, CropResult};

/// An ordered set of mutually non-overlapping crop boxes for one image.
///
/// Boxes are kept in the order they were accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSet {
    boxes: Vec<CropBox>,
    attempts: usize,
}

impl RegionSet {
    fn new(boxes: Vec<CropBox>, attempts: usize) -> Self {
        Self { boxes, attempts }
    }

    /// The accepted boxes in acceptance order.
    pub fn boxes(&self) -> &[CropBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Number of sampling attempts consumed to build this set.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CropBox> {
        self.boxes.iter()
    }

}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a CropBox;
    type IntoIter = std::slice::Iter<'a, CropBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

/// Places `count` non-overlapping boxes of size `crop` on `canvas`.
///
/// # Arguments
///
/// * `canvas` - Extent of the image being sampled
/// * `crop` - Size shared by every box
/// * `count` - Number of boxes requested
/// * `max_attempts` - Ceiling on the number of candidate draws
/// * `rng` - Random source for candidate positions
///
/// # Returns
///
/// A [`RegionSet`] holding exactly `count` boxes.
///
/// # Errors
///
/// * [`CropError::InvalidInput`] if a dimension or `max_attempts` is zero.
/// * [`CropError::PlacementExhausted`] if the budget runs out before `count`
///   boxes are accepted, or immediately if `crop` does not fit on `canvas`.
///
/// # Example
///
/// ```rust
/// use crop_sampler::processors::{CanvasSize, CropSize, generate_crops};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let regions = generate_crops(
///     CanvasSize::new(640, 480),
///     CropSize::new(64, 64),
///     3,
///     1000,
///     &mut rng,
/// )?;
/// assert_eq!(regions.len(), 3);
/// # Ok::<(), crop_sampler::core::CropError>(())
/// ```
pub fn generate_crops<R>(
    canvas: CanvasSize,
    crop: CropSize,
    count: usize,
    max_attempts: usize,
    rng: &mut R,
) -> CropResult<RegionSet>
where
    R: Rng + ?Sized,
{
    validate_geometry(canvas, crop, max_attempts)?;

    if count == 0 {
        return Ok(RegionSet::new(Vec::new(), 0));
    }

    let exhausted = |placed: usize, attempts: usize| CropError::PlacementExhausted {
        placed,
        requested: count,
        attempts,
        max_attempts,
        canvas,
        crop,
    };

    // An empty placement range can never yield a candidate.
    if !canvas.contains(&crop) {
        debug!("Crop {} does not fit on canvas {}", crop, canvas);
        return Err(exhausted(0, 0));
    }
    let max_x = canvas.width - crop.width;
    let max_y = canvas.height - crop.height;

    if (count as u64).saturating_mul(crop.area()) > canvas.area() {
        debug!(
            "{} crops of {} cover more than the {} canvas; sampling will exhaust",
            count, crop, canvas
        );
    }

    // No more than one box is accepted per attempt.
    let mut accepted: Vec<CropBox> = Vec::with_capacity(count.min(max_attempts));
    let mut attempts = 0;

    while accepted.len() < count && attempts < max_attempts {
        attempts += 1;

        let x1 = rng.gen_range(0..=max_x);
        let y1 = rng.gen_range(0..=max_y);
        let candidate = CropBox::from_origin(x1, y1, crop);

        if accepted.iter().any(|existing| existing.overlaps(&candidate)) {
            trace!("Rejected candidate {} on attempt {}", candidate, attempts);
            continue;
        }

        accepted.push(candidate);
    }

    if accepted.len() < count {
        debug!(
            "Placed {}/{} crops on {} after {} attempts",
            accepted.len(),
            count,
            canvas,
            attempts
        );
        return Err(exhausted(accepted.len(), attempts));
    }

    debug!(
        "Placed {} crops of {} on {} in {} attempts",
        count, crop, canvas, attempts
    );
    Ok(RegionSet::new(accepted, attempts))
}

fn validate_geometry(canvas: CanvasSize, crop: CropSize, max_attempts: usize) -> CropResult<()> {
    if canvas.is_empty() {
        return Err(CropError::invalid_input(format!(
            "canvas dimensions must be positive, got {canvas}"
        )));
    }
    if crop.is_empty() {
        return Err(CropError::invalid_input(format!(
            "crop dimensions must be positive, got {crop}"
        )));
    }
    if max_attempts == 0 {
        return Err(CropError::invalid_input(
            "max_attempts must be greater than 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_disjoint_and_in_bounds(regions: &RegionSet, canvas: CanvasSize, crop: CropSize) {
        for (i, a) in regions.iter().enumerate() {
            assert_eq!(a.size(), crop);
            assert!(a.fits_within(canvas), "{a} escapes {canvas}");
            for b in &regions.boxes()[i + 1..] {
                assert!(!a.overlaps(b), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn test_regions_are_disjoint_and_in_bounds() {
        let canvas = CanvasSize::new(200, 120);
        let crop = CropSize::new(30, 20);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let regions = generate_crops(canvas, crop, 6, 1000, &mut rng).unwrap();
            assert_eq!(regions.len(), 6);
            assert!(regions.attempts() >= 6);
            assert!(regions.attempts() <= 1000);
            assert_disjoint_and_in_bounds(&regions, canvas, crop);
        }
    }

    #[test]
    fn test_same_seed_reproduces_regions() {
        let canvas = CanvasSize::new(512, 384);
        let crop = CropSize::new(48, 32);

        let first = generate_crops(canvas, crop, 5, 1000, &mut StdRng::seed_from_u64(42)).unwrap();
        let second =
            generate_crops(canvas, crop, 5, 1000, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_count_consumes_no_attempts() {
        let mut rng = StdRng::seed_from_u64(1);
        let regions = generate_crops(
            CanvasSize::new(10, 10),
            CropSize::new(4, 4),
            0,
            1000,
            &mut rng,
        )
        .unwrap();
        assert!(regions.is_empty());
        assert_eq!(regions.attempts(), 0);
    }

    #[test]
    fn test_full_canvas_crop_exhausts_budget() {
        let canvas = CanvasSize::new(32, 24);
        let mut rng = StdRng::seed_from_u64(9);

        let err = generate_crops(canvas, canvas, 2, 250, &mut rng).unwrap_err();
        match err {
            CropError::PlacementExhausted {
                placed,
                requested,
                attempts,
                max_attempts,
                ..
            } => {
                assert_eq!(placed, 1);
                assert_eq!(requested, 2);
                assert_eq!(attempts, 250);
                assert_eq!(max_attempts, 250);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_full_canvas_crop_single_count_succeeds() {
        let canvas = CanvasSize::new(32, 24);
        let regions =
            generate_crops(canvas, canvas, 1, 10, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(regions.boxes(), &[CropBox::new(0, 0, 32, 24)]);
        assert_eq!(regions.attempts(), 1);
    }

    #[test]
    fn test_oversized_crop_fails_without_drawing() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = generate_crops(
            CanvasSize::new(10, 10),
            CropSize::new(11, 5),
            1,
            1000,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CropError::PlacementExhausted {
                placed: 0,
                attempts: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let canvas = CanvasSize::new(10, 10);

        let err = generate_crops(canvas, CropSize::new(0, 5), 1, 10, &mut rng).unwrap_err();
        assert!(matches!(err, CropError::InvalidInput { .. }));

        let err = generate_crops(CanvasSize::new(10, 0), CropSize::new(2, 2), 1, 10, &mut rng)
            .unwrap_err();
        assert!(matches!(err, CropError::InvalidInput { .. }));

        let err = generate_crops(canvas, CropSize::new(2, 2), 1, 0, &mut rng).unwrap_err();
        assert!(matches!(err, CropError::InvalidInput { .. }));
    }

    #[test]
    fn test_tiling_grid_can_be_filled() {
        // A 2x1 canvas of 1x1 crops has exactly two slots.
        let canvas = CanvasSize::new(2, 1);
        let crop = CropSize::new(1, 1);
        let regions = generate_crops(canvas, crop, 2, 1000, &mut StdRng::seed_from_u64(5)).unwrap();

        let mut xs: Vec<u32> = regions.iter().map(|b| b.x1).collect();
        xs.sort_unstable();
        assert_eq!(xs, vec![0, 1]);
    }

    #[test]
    fn test_huge_count_exhausts_instead_of_allocating() {
        let mut rng = StdRng::seed_from_u64(17);
        let err = generate_crops(
            CanvasSize::new(100, 100),
            CropSize::new(10, 10),
            usize::MAX / 4,
            10,
            &mut rng,
        )
        .unwrap_err();

        match err {
            CropError::PlacementExhausted {
                placed,
                requested,
                attempts,
                ..
            } => {
                assert!((1..=10).contains(&placed));
                assert_eq!(requested, usize::MAX / 4);
                assert_eq!(attempts, 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
