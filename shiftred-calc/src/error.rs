//! The calculator's error type.

use crate::registers::RegisterError;
use crate::value::EvalError;
use thiserror::Error;

/// Everything a reduction action of the calculator can fail with.
///
/// Evaluation and register failures are normally converted to diagnostics
/// and a poisoned value at the driver, so the variant that actually
/// propagates out of a parse is `Io`, a failed write of a statement's
/// value to the output sink.
#[derive(Debug, Error)]
pub enum CalcError {
    /// A value-domain operation failed.
    #[error("evaluation failed: {0}")]
    Eval(#[from] EvalError),

    /// A register operation failed.
    #[error("evaluation failed: {0}")]
    Register(#[from] RegisterError),

    /// Writing a statement's value to the output sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
