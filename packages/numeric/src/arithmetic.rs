//! Computing and classifying results.
//!
//! Arithmetic is checked: a result that does not fit in `i64` is a
//! request-level overflow, not a domain error.

use serde_json::json;

use cafs_resource::ErrorPayload;

use crate::error::{OperationError, Result};
use crate::operation::Operation;

pub const DIVIDE_BY_ZERO: &str = "DivideByZero";
pub const SUBTRACT_INVALID_INPUT: &str = "SubtractInvalidInput";

/// The classified result of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// One value per declared success output, in schema order.
    Values(Vec<i64>),
    /// A domain failure, committed as the `ErrorOutput` resource.
    DomainError(ErrorPayload),
}

/// Apply `operation` to its operands and classify the result.
///
/// `operands` must hold one value per schema input, in operand order.
pub fn compute(operation: Operation, operands: &[i64]) -> Result<Outcome> {
    let overflow = || OperationError::ArithmeticOverflow { operation };

    match (operation, operands) {
        (Operation::Add, &[a, b]) => Ok(Outcome::Values(vec![
            a.checked_add(b).ok_or_else(overflow)?
        ])),
        (Operation::Subtract, &[minuend, subtrahend]) => {
            if subtrahend > minuend {
                return Ok(Outcome::DomainError(subtract_invalid_input(
                    minuend, subtrahend,
                )));
            }
            Ok(Outcome::Values(vec![minuend
                .checked_sub(subtrahend)
                .ok_or_else(overflow)?]))
        }
        (Operation::Multiply, &[a, b]) => Ok(Outcome::Values(vec![
            a.checked_mul(b).ok_or_else(overflow)?
        ])),
        (Operation::Divide, &[dividend, divisor]) => {
            if divisor == 0 {
                return Ok(Outcome::DomainError(divide_by_zero(dividend, divisor)));
            }
            let (quotient, remainder) = floor_div_rem(dividend, divisor).ok_or_else(overflow)?;
            Ok(Outcome::Values(vec![quotient, remainder]))
        }
        (Operation::Double, &[n]) => Ok(Outcome::Values(vec![
            n.checked_mul(2).ok_or_else(overflow)?
        ])),
        (operation, operands) => Err(OperationError::invalid_request(format!(
            "{} takes {} operand(s), got {}",
            operation,
            operation.schema().inputs.len(),
            operands.len()
        ))),
    }
}

/// Floor division with the matching remainder.
///
/// The remainder takes the sign of the divisor, so that
/// `dividend == divisor * quotient + remainder` always holds.
/// Returns `None` on overflow (`i64::MIN / -1`).
pub fn floor_div_rem(dividend: i64, divisor: i64) -> Option<(i64, i64)> {
    let mut quotient = dividend.checked_div(divisor)?;
    let mut remainder = dividend.checked_rem(divisor)?;
    if remainder != 0 && ((remainder < 0) != (divisor < 0)) {
        quotient -= 1;
        remainder += divisor;
    }
    Some((quotient, remainder))
}

pub fn divide_by_zero(dividend: i64, divisor: i64) -> ErrorPayload {
    ErrorPayload::new(DIVIDE_BY_ZERO, "Cannot divide by zero")
        .with_details(json!({ "dividend": dividend, "divisor": divisor }))
}

pub fn subtract_invalid_input(minuend: i64, subtrahend: i64) -> ErrorPayload {
    ErrorPayload::new(
        SUBTRACT_INVALID_INPUT,
        "Subtrahend cannot be greater than minuend",
    )
    .with_details(json!({ "minuend": minuend, "subtrahend": subtrahend }))
}
