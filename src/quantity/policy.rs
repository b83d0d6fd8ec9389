//! Estimation policy for quantities the drawing text does not state

use crate::error::{Result, TakeoffError};

/// Constants used where a callout leaves a quantity implicit.
///
/// The stirrup figures are an estimate, not a measurement: a stirrup callout
/// `Ø8/15` names no run length and no stirrup size, so an assumed run and an
/// assumed perimeter stand in for them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimationPolicy {
    /// Length assumed for a bar callout without `L=`
    pub fallback_bar_length_cm: u32,
    /// Run length a stirrup spacing is applied over
    pub stirrup_run_length_cm: u32,
    /// Bar length of one stirrup
    pub stirrup_perimeter_cm: u32,
    /// Commercial length bars are bought in
    pub stock_bar_length_m: f64,
}

impl Default for EstimationPolicy {
    fn default() -> Self {
        Self {
            fallback_bar_length_cm: 100,
            stirrup_run_length_cm: 300,
            stirrup_perimeter_cm: 150,
            stock_bar_length_m: 12.0,
        }
    }
}

impl EstimationPolicy {
    /// Reject values that would zero out or invert quantities
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("fallback bar length", self.fallback_bar_length_cm),
            ("stirrup run length", self.stirrup_run_length_cm),
            ("stirrup perimeter", self.stirrup_perimeter_cm),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(TakeoffError::InvalidConfiguration(format!("{} must be positive", name)));
        }
        if !(self.stock_bar_length_m.is_finite() && self.stock_bar_length_m > 0.0) {
            return Err(TakeoffError::InvalidConfiguration(format!(
                "stock bar length must be positive, got {}",
                self.stock_bar_length_m
            )));
        }
        Ok(())
    }

    /// Number of stirrups along the assumed run, at least one
    pub fn stirrup_count(&self, spacing_cm: u32) -> u32 {
        (self.stirrup_run_length_cm / spacing_cm.max(1)).max(1)
    }

    /// Stock bars needed to cover `total_length_m`; a partial bar is a whole bar
    pub fn stock_bars_needed(&self, total_length_m: f64) -> u32 {
        stock_bars_needed(total_length_m, self.stock_bar_length_m)
    }
}

/// `ceil(total_length_m / stock_bar_length_m)`
pub fn stock_bars_needed(total_length_m: f64, stock_bar_length_m: f64) -> u32 {
    (total_length_m / stock_bar_length_m).ceil() as u32
}
