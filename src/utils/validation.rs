use crate::utils::error::{CollectionError, Result};

/// Constraint checking shared by the model types and the configuration.
///
/// Implementors report every violated constraint; `validate` folds them into
/// a single error.
pub trait Validate {
    fn violations(&self) -> Vec<String>;

    fn validate(&self) -> Result<()> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(CollectionError::validation(&violations))
        }
    }
}

/// Turns a list of individual checks into the messages of the failed ones.
pub fn collect_violations<I>(checks: I) -> Vec<String>
where
    I: IntoIterator<Item = Result<()>>,
{
    checks
        .into_iter()
        .filter_map(|check| check.err().map(|e| e.to_string()))
        .collect()
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CollectionError::InvalidValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CollectionError::InvalidValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_at_most<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    max: T,
) -> Result<()> {
    if value > max {
        return Err(CollectionError::InvalidValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must not be greater than {}", max),
        });
    }
    Ok(())
}

/// Strictly positive check; NaN fails as well.
pub fn validate_positive<T: PartialOrd + std::fmt::Display + Copy + Default>(
    field_name: &str,
    value: T,
) -> Result<()> {
    if !(value > T::default()) {
        return Err(CollectionError::InvalidValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be greater than 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(CollectionError::InvalidValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}
