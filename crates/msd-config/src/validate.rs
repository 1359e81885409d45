//! Config validation logic.

use msd_core::Range;

use crate::schema::SessionConfig;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid parameters: {0}")]
    Parameters(#[from] msd_sim::SimError),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive and finite"))
    }
}

fn range(field: &str, r: &Range) -> Result<(), ValidationError> {
    if r.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: format!("{}..={}", r.min, r.max),
            reason: "range must be finite with min <= max".to_string(),
        })
    }
}

pub fn validate_config(config: &SessionConfig) -> Result<(), ValidationError> {
    if config.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    positive("tick_interval_s", config.tick_interval_s)?;
    positive("max_step_s", config.max_step_s)?;
    if config.max_step_s < config.tick_interval_s {
        return Err(invalid(
            "max_step_s",
            config.max_step_s,
            "must not be smaller than tick_interval_s",
        ));
    }
    positive("history_max_duration_s", config.history_max_duration_s)?;

    if !(config.min_display_height.is_finite() && config.min_display_height >= 0.0) {
        return Err(invalid(
            "min_display_height",
            config.min_display_height,
            "must be non-negative and finite",
        ));
    }

    config.default_parameters.validate()?;

    let ic = &config.initial_conditions;
    if !ic.y0.is_finite() {
        return Err(invalid("initial_conditions.y0", ic.y0, "must be finite"));
    }
    if !ic.v0.is_finite() {
        return Err(invalid("initial_conditions.v0", ic.v0, "must be finite"));
    }

    if let Some(limits) = &config.limits {
        range("limits.mass", &limits.mass)?;
        range("limits.damping", &limits.damping)?;
        range("limits.stiffness", &limits.stiffness)?;
        if limits.mass.min <= 0.0 {
            return Err(invalid(
                "limits.mass.min",
                limits.mass.min,
                "mass must stay positive",
            ));
        }
    }

    Ok(())
}
