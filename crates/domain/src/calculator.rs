//! Load calculators
//!
//! Closed-form estimates derived from a weight lifted for a number of sets and repetitions. All
//! results are rounded to one decimal place.

use crate::{Reps, Sets, Weight};

/// Repetitions at which the Brzycki denominator reaches zero.
const BRZYCKI_REPS_LIMIT: u32 = 37;

/// Volume at which the presentation scale saturates (together with `MAX_VOLUME_SCALE`).
const VOLUME_SCALE_DIVISOR: f32 = 10_000.0;
const MAX_VOLUME_SCALE: f32 = 2.0;

/// Estimate the one-rep max using the Brzycki formula `weight * 36 / (37 - reps)`.
///
/// The formula is undefined for 37 repetitions and yields negative values beyond, so these inputs
/// are rejected.
pub fn estimate_one_rep_max(weight: f32, reps: u32) -> Result<f32, OneRepMaxError> {
    if reps >= BRZYCKI_REPS_LIMIT {
        return Err(OneRepMaxError::TooManyReps(reps));
    }

    #[allow(clippy::cast_precision_loss)]
    let factor = 36.0 / (BRZYCKI_REPS_LIMIT - reps) as f32;

    Ok(round_to_one_decimal(weight * factor))
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum OneRepMaxError {
    #[error("One-rep max is only defined for fewer than 37 reps ({0} >= 37)")]
    TooManyReps(u32),
}

#[must_use]
pub fn compute_volume(weight: f32, sets: u32, reps: u32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let volume = weight * sets as f32 * reps as f32;

    round_to_one_decimal(volume)
}

/// Scale factor in the range 1 to 2 that grows with the training volume.
#[must_use]
pub fn volume_scale(volume: f32) -> f32 {
    (1.0 + volume / VOLUME_SCALE_DIVISOR).min(MAX_VOLUME_SCALE)
}

#[must_use]
pub fn round_to_one_decimal(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// A single set prescription, as logged in a workout entry.
pub trait Load {
    fn weight(&self) -> Weight;
    fn sets(&self) -> Sets;
    fn reps(&self) -> Reps;

    #[must_use]
    fn volume(&self) -> f32 {
        compute_volume(
            self.weight().into(),
            self.sets().into(),
            self.reps().into(),
        )
    }

    fn one_rep_max(&self) -> Result<f32, OneRepMaxError> {
        estimate_one_rep_max(self.weight().into(), self.reps().into())
    }
}
