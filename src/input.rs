//! Turns the raw text of the array and target fields into numbers.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("Please enter an array.")]
    EmptyArray,
    #[error("Invalid array input: '{0}' is not a number.")]
    InvalidArray(String),
    #[error("Please enter a target value.")]
    EmptyTarget,
    #[error("Invalid target input: '{0}' is not a number.")]
    InvalidTarget(String),
}

/// Accepts integer and floating-point literals. `inf` and `NaN` parse as
/// `f64` but are not numbers a user can search for.
fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_array(text: &str) -> Result<Vec<f64>, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::EmptyArray);
    }
    text.split_whitespace()
        .map(|token| {
            parse_number(token).ok_or_else(|| InputError::InvalidArray(token.to_string()))
        })
        .collect()
}

pub fn parse_target(text: &str) -> Result<f64, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::EmptyTarget);
    }
    parse_number(text).ok_or_else(|| InputError::InvalidTarget(text.to_string()))
}

/// Array errors are reported before target errors.
pub fn parse_inputs(array_text: &str, target_text: &str) -> Result<(Vec<f64>, f64), InputError> {
    let array = parse_array(array_text)?;
    let target = parse_target(target_text)?;
    Ok((array, target))
}
