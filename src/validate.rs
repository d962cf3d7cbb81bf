//! Argument checks shared by every drawing primitive. Each returns the
//! accepted value so callers can bind it with `?`.

use crate::error::ValidationError;
use crate::geometry;

/// A value must be present and inside `[min, max]`.
pub fn value(value: Option<f64>, min: f64, max: f64) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::MissingValue)?;
    if !(min..=max).contains(&value) {
        return Err(ValidationError::ValueOutOfRange { value, min, max });
    }
    Ok(value)
}

/// A percentage must be present and inside `[1, 100]`.
pub fn percent(percent: Option<f64>) -> Result<f64, ValidationError> {
    let percent = percent.ok_or(ValidationError::MissingPercent)?;
    if !(1.0..=100.0).contains(&percent) {
        return Err(ValidationError::PercentOutOfRange { percent });
    }
    Ok(percent)
}

/// Spacing between ticks. At least as many ticks as units of range is
/// rejected; past that point the floored spacing collapses to zero and would
/// never advance.
pub fn tick_spacing(range: f64, num_ticks: f64) -> Result<f64, ValidationError> {
    let spacing = geometry::tick_spacing(range, num_ticks);
    if num_ticks >= range || spacing.is_nan() || spacing <= 0.0 {
        return Err(ValidationError::DegenerateTickSpacing {
            ticks: num_ticks,
            range,
        });
    }
    Ok(spacing)
}

/// Spacing between scale labels. Unlike ticks, a label on every unit is
/// fine; only a spacing that floors to zero is rejected.
pub fn label_spacing(range: f64, num_ticks: f64) -> Result<f64, ValidationError> {
    let spacing = geometry::tick_spacing(range, num_ticks);
    if spacing.is_nan() || spacing <= 0.0 {
        return Err(ValidationError::DegenerateTickSpacing {
            ticks: num_ticks,
            range,
        });
    }
    Ok(spacing)
}

pub fn radius(radius: f64) -> Result<f64, ValidationError> {
    if radius < 0.0 {
        return Err(ValidationError::NegativeRadius { radius });
    }
    Ok(radius)
}
