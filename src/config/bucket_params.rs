use bevy::prelude::*;

use crate::config::constants::{BUCKET_FIELD_SPAN, CONE_FRACTION};
use crate::math::Real;

/// Bucket dimensions and height-field resolution.
#[derive(Resource, Clone)]
pub struct BucketParams {
    /// Width of the bucket opening, in world units.
    pub top_width: Real,

    /// Height of the bucket rim above its floor.
    pub bucket_height: Real,

    /// Height newly animated coins are dropped from.
    pub drop_height: Real,

    /// Number of height-field cells across the sampled span.
    pub field_cells: usize,
}

impl Default for BucketParams {
    fn default() -> Self {
        Self {
            top_width: 180.0,
            bucket_height: 200.0,
            drop_height: 400.0,
            field_cells: 40,
        }
    }
}

impl BucketParams {
    /// Width of the bucket floor, derived from the taper.
    pub fn bottom_width(&self) -> Real {
        self.top_width * CONE_FRACTION
    }

    pub fn with_dimensions(mut self, top_width: Real, bucket_height: Real) -> Self {
        self.top_width = top_width;
        self.bucket_height = bucket_height;
        self
    }

    pub fn with_drop_height(mut self, drop_height: Real) -> Self {
        self.drop_height = drop_height;
        self
    }

    /// Set the height-field resolution (at least the in-bucket span).
    pub fn with_field_cells(mut self, cells: usize) -> Self {
        self.field_cells = cells.max(BUCKET_FIELD_SPAN);
        self
    }
}
