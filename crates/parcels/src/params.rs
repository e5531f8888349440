//! Data-driven parcel parameters.
//!
//! Gathers the tunables of the parcel core into a single [`ParcelParams`]
//! resource. Defaults mirror the constants in [`crate::config`]; hosts can
//! override them from JSON at startup. The size ranges are read once by variant
//! generation; changing `unzoned` later reclassifies every lot on the next tick.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_WORLD_BOUND, MAX_LOT_DEPTH, MAX_LOT_WIDTH, MIN_LOT_DEPTH, MIN_LOT_WIDTH,
};
use crate::grid::ZoneValue;
use crate::lot::LotSize;

/// Errors raised while loading parameter overrides.
#[derive(Debug)]
pub enum ParamsError {
    /// The JSON document could not be parsed.
    Parse(String),
    /// The parsed values violate a range constraint.
    Invalid(String),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Parse(msg) => write!(f, "Parameter parse error: {msg}"),
            ParamsError::Invalid(msg) => write!(f, "Invalid parameters: {msg}"),
        }
    }
}

impl std::error::Error for ParamsError {}

impl From<serde_json::Error> for ParamsError {
    fn from(e: serde_json::Error) -> Self {
        ParamsError::Parse(e.to_string())
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParcelParams {
    /// Inclusive `(min, max)` lot width in cells.
    pub width_range: (u8, u8),
    /// Inclusive `(min, max)` lot depth in cells.
    pub depth_range: (u8, u8),
    /// Zone written to lots whose window carries no zone at all.
    pub unzoned: ZoneValue,
    /// Load-time bound on cached transform positions.
    pub world_bound: f32,
}

impl Default for ParcelParams {
    fn default() -> Self {
        Self {
            width_range: (MIN_LOT_WIDTH, MAX_LOT_WIDTH),
            depth_range: (MIN_LOT_DEPTH, MAX_LOT_DEPTH),
            unzoned: ZoneValue::UNZONED,
            world_bound: DEFAULT_WORLD_BOUND,
        }
    }
}

impl ParcelParams {
    /// Parameters limited to the given inclusive ranges, other fields default.
    pub fn with_ranges(width_range: (u8, u8), depth_range: (u8, u8)) -> Self {
        Self {
            width_range,
            depth_range,
            ..Default::default()
        }
    }

    /// Parse overrides from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: ParcelParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        let (w_min, w_max) = self.width_range;
        let (d_min, d_max) = self.depth_range;
        if w_min == 0 || d_min == 0 {
            return Err(ParamsError::Invalid(format!(
                "lot dimensions must be positive (width min {w_min}, depth min {d_min})"
            )));
        }
        if w_min > w_max {
            return Err(ParamsError::Invalid(format!(
                "width range is empty ({w_min} > {w_max})"
            )));
        }
        if d_min > d_max {
            return Err(ParamsError::Invalid(format!(
                "depth range is empty ({d_min} > {d_max})"
            )));
        }
        if !self.world_bound.is_finite() || self.world_bound <= 0.0 {
            return Err(ParamsError::Invalid(format!(
                "world bound must be finite and positive, got {}",
                self.world_bound
            )));
        }
        Ok(())
    }

    pub fn contains(&self, size: LotSize) -> bool {
        (self.width_range.0..=self.width_range.1).contains(&size.width)
            && (self.depth_range.0..=self.depth_range.1).contains(&size.depth)
    }

    /// Every size in range, width-major.
    pub fn sizes(&self) -> impl Iterator<Item = LotSize> {
        let (d_min, d_max) = self.depth_range;
        (self.width_range.0..=self.width_range.1)
            .flat_map(move |w| (d_min..=d_max).map(move |d| LotSize::new(w, d)))
    }

    pub fn size_count(&self) -> usize {
        self.sizes().count()
    }
}
