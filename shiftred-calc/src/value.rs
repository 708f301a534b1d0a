//! The calculator's value domain: checked arithmetic over `i64`.
//!
//! Literals are single digits, but registers and intermediate results range
//! over the full fixed-width domain, so every operation that can leave it
//! is checked. Division or modulo by zero and overflow are defined
//! failures, never folded into a wrapped or garbage value.

use thiserror::Error;

/// A failed value-domain operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("arithmetic overflow")]
    Overflow,
}

pub fn add(a: i64, b: i64) -> Result<i64, EvalError> {
    a.checked_add(b).ok_or(EvalError::Overflow)
}

pub fn sub(a: i64, b: i64) -> Result<i64, EvalError> {
    a.checked_sub(b).ok_or(EvalError::Overflow)
}

pub fn mul(a: i64, b: i64) -> Result<i64, EvalError> {
    a.checked_mul(b).ok_or(EvalError::Overflow)
}

pub fn div(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::DivisionByZero);
    }
    a.checked_div(b).ok_or(EvalError::Overflow)
}

pub fn rem(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::ModuloByZero);
    }
    a.checked_rem(b).ok_or(EvalError::Overflow)
}

pub fn bitand(a: i64, b: i64) -> i64 {
    a & b
}

pub fn bitor(a: i64, b: i64) -> i64 {
    a | b
}

pub fn neg(a: i64) -> Result<i64, EvalError> {
    a.checked_neg().ok_or(EvalError::Overflow)
}
