//! Bucket silhouette and deformable floor
//!
//! A frustum cross-section (wider at the rim than at the floor) over a 1-D
//! height field that rises as coins settle. The field spans more than the
//! bucket itself: the centered in-bucket band covers the interior, the cells
//! outside it carry the spill pile.

use crate::config::BucketParams;
use crate::config::constants::{BUCKET_FIELD_SPAN, CONE_FRACTION};
use crate::math::{Real, lerp};

/// Two-cell floor sample under a coin's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorSample {
    /// First of the two neighboring cells (`cell + 1` is the second).
    pub cell: i32,
    /// Fractional position between the two cells.
    pub frac: Real,
    pub h0: Real,
    pub h1: Real,
}

impl FloorSample {
    /// Interpolated floor height at the sample point.
    #[inline(always)]
    pub fn floor_height(&self) -> Real {
        lerp(self.frac, self.h0, self.h1)
    }

    /// Local floor tilt; positive when the floor falls off to the right.
    #[inline(always)]
    pub fn slope(&self) -> Real {
        self.h0 - self.h1
    }

    #[inline(always)]
    pub fn lower(&self) -> Real {
        self.h0.min(self.h1)
    }
}

#[derive(Clone)]
pub struct Bucket {
    height: Real,
    top_half_width: Real,
    bottom_half_width: Real,
    // Reciprocal scales turning an x coordinate into field cells.
    recip_bottom: Real,
    recip_top: Real,
    // In-bucket share of the field and its half-extent in cells.
    band_fraction: Real,
    band_half_cells: Real,
    heights: Vec<Real>,
}

impl Bucket {
    pub fn new(params: &BucketParams) -> Self {
        let top_width = params.top_width;
        let bottom_width = top_width * CONE_FRACTION;
        let cells = params.field_cells.max(BUCKET_FIELD_SPAN);
        let band_fraction = BUCKET_FIELD_SPAN as Real / cells as Real;
        Self {
            height: params.bucket_height,
            top_half_width: top_width / 2.0,
            bottom_half_width: bottom_width / 2.0,
            recip_bottom: cells as Real / (bottom_width / band_fraction),
            recip_top: cells as Real / (top_width / band_fraction),
            band_fraction,
            band_half_cells: cells as Real * band_fraction / 2.0,
            heights: vec![0.0; cells],
        }
    }

    #[inline(always)]
    pub fn height(&self) -> Real {
        self.height
    }

    #[inline(always)]
    pub fn top_half_width(&self) -> Real {
        self.top_half_width
    }

    #[inline(always)]
    pub fn bottom_half_width(&self) -> Real {
        self.bottom_half_width
    }

    #[inline(always)]
    pub fn bottom_width(&self) -> Real {
        self.bottom_half_width * 2.0
    }

    #[inline(always)]
    pub fn band_fraction(&self) -> Real {
        self.band_fraction
    }

    pub fn cells(&self) -> usize {
        self.heights.len()
    }

    /// Read-only view of the floor heights, for rendering the pile.
    pub fn heights(&self) -> &[Real] {
        &self.heights
    }

    /// x coordinate under a cell, on the outside (bottom-width) scale.
    pub fn cell_center_x(&self, cell: usize) -> Real {
        (cell as Real + 0.5 - self.center()) / self.recip_bottom
    }

    /// y scaled into [0, 1] across the bucket's rise.
    #[inline(always)]
    pub fn normalized_height(&self, y: Real) -> Real {
        (y / self.height).clamp(0.0, 1.0)
    }

    /// Cross-section half-width of the taper at height y.
    pub fn half_width_at(&self, y: Real) -> Real {
        lerp(
            self.normalized_height(y),
            self.bottom_half_width,
            self.top_half_width,
        )
    }

    /// Whether (x, y) lies inside the silhouette at that height.
    pub fn contains(&self, x: Real, y: Real) -> bool {
        x.abs() < self.half_width_at(y)
    }

    /// Fractional field index under (x, y).
    pub fn field_index(&self, x: Real, y: Real) -> Real {
        self.index_for(x, y, self.contains(x, y))
    }

    fn index_for(&self, x: Real, y: Real, inside: bool) -> Real {
        let mut recip = self.recip_bottom;
        if inside {
            // The bucket stretches outwards at the top.
            recip = lerp(self.normalized_height(y), self.recip_bottom, self.recip_top);
        }
        x * recip + self.center()
    }

    #[inline(always)]
    fn center(&self) -> Real {
        self.heights.len() as Real / 2.0
    }

    fn cell_in_band(&self, cell: i32) -> bool {
        (cell as Real - self.center()).abs() <= self.band_half_cells
    }

    fn cell_height(&self, cell: i32) -> Real {
        if cell < 0 || cell >= self.heights.len() as i32 {
            0.0
        } else {
            self.heights[cell as usize]
        }
    }

    fn write_cell(&mut self, cell: i32, height: Real) {
        if cell >= 0 && cell < self.heights.len() as i32 {
            self.heights[cell as usize] = height;
        }
    }

    /// Sample the floor under (x, y).
    ///
    /// When exactly one of the two neighboring cells is in the in-bucket band
    /// the surface is read as flat across the wall: the sample on the coin's
    /// side of the wall overwrites the other.
    pub fn floor_sample(&self, x: Real, y: Real) -> FloorSample {
        let inside = self.contains(x, y);
        let index = self.index_for(x, y, inside);
        let cell = index.floor() as i32;
        let mut h0 = self.cell_height(cell);
        let mut h1 = self.cell_height(cell + 1);
        if self.cell_in_band(cell) != self.cell_in_band(cell + 1) {
            if inside != ((cell as Real) < self.center()) {
                h1 = h0;
            } else {
                h0 = h1;
            }
        }
        FloorSample {
            cell,
            frac: index - cell as Real,
            h0,
            h1,
        }
    }

    /// Permanently raise the floor under a settling coin, splitting one
    /// capacity unit between the two cells bounding the settle point.
    /// Returns the interpolated floor height there. Sole mutator of the field.
    pub fn settle(&mut self, x: Real, y: Real, full_capacity: u32) -> Real {
        let sample = self.floor_sample(x, y);
        let unit = self.height / full_capacity as Real;
        let h0 = sample.h0 + (1.0 - sample.frac) * unit;
        let h1 = sample.h1 + sample.frac * unit;
        self.write_cell(sample.cell, h0);
        self.write_cell(sample.cell + 1, h1);
        lerp(sample.frac, h0, h1)
    }

    /// Flatten the floor back to empty.
    pub fn reset(&mut self) {
        self.heights.iter_mut().for_each(|h| *h = 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket() -> Bucket {
        Bucket::new(&BucketParams::default())
    }

    #[test]
    fn taper_interpolates_between_floor_and_rim() {
        let bucket = bucket();
        assert_eq!(bucket.half_width_at(0.0), bucket.bottom_half_width());
        assert_eq!(bucket.half_width_at(bucket.height()), bucket.top_half_width());
        let mid = bucket.half_width_at(bucket.height() / 2.0);
        assert!(mid > bucket.bottom_half_width() && mid < bucket.top_half_width());
    }

    #[test]
    fn taper_clamps_outside_the_bucket_rise() {
        let bucket = bucket();
        assert_eq!(bucket.half_width_at(-50.0), bucket.bottom_half_width());
        assert_eq!(
            bucket.half_width_at(bucket.height() * 3.0),
            bucket.top_half_width()
        );
    }

    #[test]
    fn containment_follows_the_taper() {
        let bucket = bucket();
        let x = bucket.bottom_half_width() + 2.0;
        // Wider near the rim than near the floor.
        assert!(!bucket.contains(x, 0.0));
        assert!(bucket.contains(x, bucket.height()));
    }

    #[test]
    fn center_maps_to_field_midpoint_at_any_height() {
        let bucket = bucket();
        let mid = bucket.cells() as Real / 2.0;
        assert_eq!(bucket.field_index(0.0, 0.0), mid);
        assert_eq!(bucket.field_index(0.0, bucket.height()), mid);
    }

    #[test]
    fn inside_mapping_narrows_toward_the_rim() {
        let bucket = bucket();
        let x = bucket.bottom_half_width() * 0.5;
        let low = bucket.field_index(x, 0.0);
        let high = bucket.field_index(x, bucket.height());
        // The same x covers fewer cells where the bucket is wider.
        assert!(high < low, "rim index {high} should sit below floor index {low}");
    }

    #[test]
    fn floor_edges_map_to_the_band_edges() {
        let bucket = bucket();
        let index = bucket.field_index(bucket.bottom_half_width() - 1e-3, 0.0);
        let band_edge = bucket.cells() as Real / 2.0 + 10.0;
        assert!((index - band_edge).abs() < 0.1);
    }

    #[test]
    fn edge_sample_keeps_the_coins_side_of_the_wall() {
        let mut bucket = bucket();
        // The left band edge sits between cells 9 and 10 at 40 cells.
        bucket.heights[9] = 4.0;
        bucket.heights[10] = 9.0;
        // Inside coin straddling the edge: partway up, the taper admits an x
        // that maps below cell 10.
        let inside_sample = bucket.floor_sample(-85.4, 100.0);
        assert_eq!(inside_sample.cell, 9);
        assert_eq!((inside_sample.h0, inside_sample.h1), (9.0, 9.0));
        // Outside coin over the same pair keeps the outer cell instead.
        let outside_sample = bucket.floor_sample(-82.0, 0.0);
        assert_eq!(outside_sample.cell, 9);
        assert_eq!((outside_sample.h0, outside_sample.h1), (4.0, 4.0));
    }

    #[test]
    fn out_of_range_cells_read_as_zero() {
        let bucket = bucket();
        let sample = bucket.floor_sample(-10_000.0, 0.0);
        assert_eq!(sample.h0, 0.0);
        assert_eq!(sample.h1, 0.0);
    }

    #[test]
    fn settle_adds_one_capacity_unit() {
        let mut bucket = bucket();
        let unit = bucket.height() / 100.0;
        for i in 0..5 {
            let before: Real = bucket.heights().iter().sum();
            bucket.settle(i as Real * 3.0 - 6.0, 0.0, 100);
            let after: Real = bucket.heights().iter().sum();
            assert!(
                (after - before - unit).abs() < 1e-3,
                "settle {i} raised the floor by {} instead of {unit}",
                after - before
            );
        }
    }

    #[test]
    fn settle_returns_a_raised_floor_height() {
        let mut bucket = bucket();
        let rest = bucket.settle(0.0, 0.0, 100);
        assert!(rest > 0.0);
        assert!(rest <= bucket.height() / 100.0);
    }

    #[test]
    fn settle_far_outside_the_field_drops_the_write() {
        let mut bucket = bucket();
        bucket.settle(10_000.0, 0.0, 100);
        assert!(bucket.heights().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn reset_flattens_the_floor() {
        let mut bucket = bucket();
        for _ in 0..10 {
            bucket.settle(0.0, 0.0, 100);
        }
        bucket.reset();
        assert!(bucket.heights().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn resolution_keeps_the_band_span_fixed() {
        let coarse = Bucket::new(&BucketParams::default().with_field_cells(40));
        let fine = Bucket::new(&BucketParams::default().with_field_cells(60));
        assert!((coarse.band_fraction() * 40.0 - 20.0).abs() < 1e-4);
        assert!((fine.band_fraction() * 60.0 - 20.0).abs() < 1e-4);
        // The wall sits at the same x either way.
        let x = coarse.bottom_half_width() - 1e-3;
        let coarse_off = coarse.field_index(x, 0.0) - 20.0;
        let fine_off = fine.field_index(x, 0.0) - 30.0;
        assert!((coarse_off - fine_off).abs() < 1e-3);
    }
}
