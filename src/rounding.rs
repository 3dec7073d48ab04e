//! Floating-point rounding-mode field shared by every F/D arithmetic encoder.

use core::fmt;
use std::fmt::Display;

/// The 3-bit `rm` field carried by F/D instructions.
///
/// `Dyn` (dynamic rounding mode, taken from the `fcsr` register) is the
/// default for every encoder that accepts a rounding mode, matching the
/// assembler convention of omitting the suffix when it is not given
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Round to nearest, ties to even.
    Rne,
    /// Round towards zero.
    Rtz,
    /// Round down (towards negative infinity).
    Rdn,
    /// Round up (towards positive infinity).
    Rup,
    /// Round to nearest, ties to max magnitude.
    Rmm,
    /// In `fcsr`, dynamic rounding mode.
    #[default]
    Dyn,
}

impl RoundingMode {
    pub(crate) const fn encode(self) -> u32 {
        match self {
            Self::Rne => 0b000,
            Self::Rtz => 0b001,
            Self::Rdn => 0b010,
            Self::Rup => 0b011,
            Self::Rmm => 0b100,
            Self::Dyn => 0b111,
        }
    }

    /// The mnemonic symbol, or `None` for `Dyn` (the formatter's `r`
    /// directive suppresses the operand entirely in that case).
    #[must_use]
    pub(crate) const fn symbol(self) -> Option<&'static str> {
        match self {
            Self::Rne => Some("rne"),
            Self::Rtz => Some("rtz"),
            Self::Rdn => Some("rdn"),
            Self::Rup => Some("rup"),
            Self::Rmm => Some("rmm"),
            Self::Dyn => None,
        }
    }
}

impl Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol().unwrap_or("dyn"))
    }
}
