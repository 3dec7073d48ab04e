//! Fatal, non-retryable errors raised while composing or generating code.
//!
//! Per the error taxonomy this crate follows, out-of-range operands,
//! misalignment and buffer exhaustion are programmer errors and are reported
//! by panicking (they cannot be recovered from at runtime and retrying
//! wouldn't help); only the two conditions below are surfaced as [`Result`]s,
//! since a caller that has already committed instructions to the deferred
//! list may reasonably want to report which label or instruction failed
//! before unwinding.

use core::fmt;
use std::{error::Error, fmt::Display};

/// Error raised by [`crate::emitter::Emitter`] encoders and by
/// [`crate::buffer::CodeBuffer::run_generation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// An encoder was invoked against a target ISA missing a required
    /// extension. Carries the dotted mnemonic (e.g. `"fmul.s"`).
    UnsupportedInstruction(String),
    /// A pass-2 label lookup found no entry for the given name.
    UnknownLabel(String),
}

impl EmitError {
    pub(crate) fn unsupported(mnemonic: &str) -> Self {
        Self::UnsupportedInstruction(crate::isa::demangle(mnemonic))
    }
}

impl Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedInstruction(mnemonic) => {
                write!(f, "unsupported instruction: `{mnemonic}` is not available on this target")
            }
            Self::UnknownLabel(name) => write!(f, "unknown label: `{name}`"),
        }
    }
}

impl Error for EmitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_demangles_the_encoder_name() {
        let err = EmitError::unsupported("fmul_s");
        assert_eq!(err.to_string(), "unsupported instruction: `fmul.s` is not available on this target");
    }

    #[test]
    fn unknown_label_names_the_label() {
        let err = EmitError::UnknownLabel("loop_top".into());
        assert_eq!(err.to_string(), "unknown label: `loop_top`");
    }
}
