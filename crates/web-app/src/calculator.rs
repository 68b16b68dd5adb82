//! Inputs of the calculator widgets
//!
//! Input fields are coerced to numbers as they are typed. Values that cannot be parsed count as
//! zero, which hides the result of the affected widget.

use liftkit_domain::{
    OneRepMaxError, Plate, compute_volume, decompose_plates, estimate_one_rep_max, loaded_weight,
    volume_scale,
};

use crate::Settings;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct OneRepMaxInputs {
    pub weight: f32,
    pub reps: u32,
}

impl OneRepMaxInputs {
    pub fn set_weight(&mut self, value: &str) {
        self.weight = coerce_weight(value);
    }

    pub fn set_reps(&mut self, value: &str) {
        self.reps = coerce_count(value);
    }

    /// Estimated one-rep max, only available if weight and reps are given.
    #[must_use]
    pub fn result(&self) -> Option<Result<f32, OneRepMaxError>> {
        if self.weight > 0.0 && self.reps > 0 {
            Some(estimate_one_rep_max(self.weight, self.reps))
        } else {
            None
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct VolumeInputs {
    pub weight: f32,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    pub volume: f32,
    pub scale: f32,
}

impl VolumeInputs {
    pub fn set_weight(&mut self, value: &str) {
        self.weight = coerce_weight(value);
    }

    pub fn set_sets(&mut self, value: &str) {
        self.sets = coerce_count(value);
    }

    pub fn set_reps(&mut self, value: &str) {
        self.reps = coerce_count(value);
    }

    #[must_use]
    pub fn result(&self) -> Option<Volume> {
        if self.weight > 0.0 && self.sets > 0 && self.reps > 0 {
            let volume = compute_volume(self.weight, self.sets, self.reps);
            Some(Volume {
                volume,
                scale: volume_scale(volume),
            })
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlateLoading {
    /// Plates per side, largest first.
    pub plates: Vec<Plate>,
    /// Bar weight plus the plates on both sides, at most the target weight.
    pub loaded_weight: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateInputs {
    pub target_weight: f32,
    pub bar_weight: f32,
}

impl PlateInputs {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            target_weight: 0.0,
            bar_weight: settings.bar_weight,
        }
    }

    pub fn set_target_weight(&mut self, value: &str) {
        self.target_weight = coerce_weight(value);
    }

    pub fn set_bar_weight(&mut self, value: &str) {
        self.bar_weight = coerce_weight(value);
    }

    /// Plates per side, only available if the target exceeds the bar weight.
    #[must_use]
    pub fn result(&self) -> Option<PlateLoading> {
        if self.target_weight > self.bar_weight {
            let plates = decompose_plates(self.target_weight, self.bar_weight);
            Some(PlateLoading {
                loaded_weight: loaded_weight(self.bar_weight, &plates),
                plates,
            })
        } else {
            None
        }
    }
}

impl Default for PlateInputs {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

/// Format a calculated weight with one decimal place.
#[must_use]
pub fn format_weight(value: f32) -> String {
    format!("{value:.1} kg")
}

fn coerce_weight(value: &str) -> f32 {
    match value.replace(',', ".").trim().parse::<f32>() {
        Ok(parsed) if parsed.is_finite() => parsed,
        _ => 0.0,
    }
}

fn coerce_count(value: &str) -> u32 {
    value.trim().parse::<u32>().unwrap_or(0)
}
