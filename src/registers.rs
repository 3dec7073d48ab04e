/*!
Integer and floating-point register roster.

Based on the following documents:
> ["RISC-V ABIs Specification, Document Version 1.0"](https://github.com/riscv-non-isa/riscv-elf-psabi-doc),
Editors Kito Cheng and Jessica Clarke, RISC-V International, November 2022.
> ["The RISC-V Instruction Set Manual, Volume I: User-Level ISA"](https://github.com/riscv/riscv-isa-manual),
Editors Andrew Waterman and Krste Asanović, RISC-V International.

Every register carries a 5-bit `index`; registers `x8`..`x15` (int) and
`f8`..`f15` (FP) additionally carry a 3-bit `compressed_index`, the encoding
used by every C-extension instruction whose register fields are only 3 bits
wide. Integer registers can further bind a signed displacement, producing the
`rs1(offset)`-style memory operand accepted by loads, stores and atomics.
*/

use core::fmt;
use std::fmt::Display;

/// Number of integer (and, separately, floating-point) registers.
pub const NUMBER_OF_REGISTERS: usize = 32;

/// An integer register (`x0`..`x31`), identified by its ABI name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntReg(pub(crate) u8);

macro_rules! int_registers {
    ($($name:ident = $idx:expr => $abi:literal $(, compressed = $c:expr)?;)*) => {
        impl IntReg {
            $(
                #[doc = concat!("`x", stringify!($idx), "` / `", $abi, "`")]
                pub const $name: IntReg = IntReg($idx);
            )*

            /// The canonical ABI name, e.g. `"zero"`, `"ra"`, `"a0"`.
            #[must_use]
            pub const fn abi_name(self) -> &'static str {
                match self.0 {
                    $($idx => $abi,)*
                    _ => unreachable!(),
                }
            }
        }
    };
}

int_registers! {
    ZERO = 0 => "zero";
    RA = 1 => "ra";
    SP = 2 => "sp";
    GP = 3 => "gp";
    TP = 4 => "tp";
    T0 = 5 => "t0";
    T1 = 6 => "t1";
    T2 = 7 => "t2";
    S0 = 8 => "s0", compressed = 0;
    S1 = 9 => "s1", compressed = 1;
    A0 = 10 => "a0", compressed = 2;
    A1 = 11 => "a1", compressed = 3;
    A2 = 12 => "a2", compressed = 4;
    A3 = 13 => "a3", compressed = 5;
    A4 = 14 => "a4", compressed = 6;
    A5 = 15 => "a5", compressed = 7;
    A6 = 16 => "a6";
    A7 = 17 => "a7";
    S2 = 18 => "s2";
    S3 = 19 => "s3";
    S4 = 20 => "s4";
    S5 = 21 => "s5";
    S6 = 22 => "s6";
    S7 = 23 => "s7";
    S8 = 24 => "s8";
    S9 = 25 => "s9";
    S10 = 26 => "s10";
    S11 = 27 => "s11";
    T3 = 28 => "t3";
    T4 = 29 => "t4";
    T5 = 30 => "t5";
    T6 = 31 => "t6";
}

/// `x8`, alias `fp` (frame pointer) alongside its usual `s0` name.
pub const FP: IntReg = IntReg::S0;

impl IntReg {
    /// The 5-bit register index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// The 3-bit compressed-register alias, defined only for `x8`..`x15`.
    #[must_use]
    pub const fn compressed_index(self) -> Option<u8> {
        if self.0 >= 8 && self.0 <= 15 {
            Some(self.0 - 8)
        } else {
            None
        }
    }

    /// Whether this register is addressable with a 3-bit compressed index.
    #[must_use]
    pub const fn is_compressible(self) -> bool {
        self.compressed_index().is_some()
    }

    pub(crate) const fn to_u32(self) -> u32 {
        self.0 as u32
    }

    /// Binds a signed displacement to this register, producing the
    /// `rs1(offset)` memory operand used by loads, stores and atomics.
    #[must_use]
    pub const fn offset(self, offset: i32) -> IntOffsetReg {
        IntOffsetReg { reg: self, offset }
    }
}

impl Display for IntReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abi_name())
    }
}

/// An integer register paired with a signed displacement: the
/// `offset(reg)`/`reg[offset]` memory-operand syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntOffsetReg {
    pub(crate) reg: IntReg,
    pub(crate) offset: i32,
}

impl IntOffsetReg {
    /// The bound register.
    #[must_use]
    pub const fn reg(self) -> IntReg {
        self.reg
    }

    /// The signed displacement.
    #[must_use]
    pub const fn offset(self) -> i32 {
        self.offset
    }
}

impl From<IntReg> for IntOffsetReg {
    fn from(reg: IntReg) -> Self {
        reg.offset(0)
    }
}

/// A floating-point register (`f0`..`f31`), identified by its ABI name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FpReg(pub(crate) u8);

macro_rules! fp_registers {
    ($($name:ident = $idx:expr => $abi:literal;)*) => {
        impl FpReg {
            $(
                #[doc = concat!("`f", stringify!($idx), "` / `", $abi, "`")]
                pub const $name: FpReg = FpReg($idx);
            )*

            /// The canonical ABI name, e.g. `"ft0"`, `"fa5"`, `"fs11"`.
            #[must_use]
            pub const fn abi_name(self) -> &'static str {
                match self.0 {
                    $($idx => $abi,)*
                    _ => unreachable!(),
                }
            }
        }
    };
}

fp_registers! {
    FT0 = 0 => "ft0";
    FT1 = 1 => "ft1";
    FT2 = 2 => "ft2";
    FT3 = 3 => "ft3";
    FT4 = 4 => "ft4";
    FT5 = 5 => "ft5";
    FT6 = 6 => "ft6";
    FT7 = 7 => "ft7";
    FS0 = 8 => "fs0";
    FS1 = 9 => "fs1";
    FA0 = 10 => "fa0";
    FA1 = 11 => "fa1";
    FA2 = 12 => "fa2";
    FA3 = 13 => "fa3";
    FA4 = 14 => "fa4";
    FA5 = 15 => "fa5";
    FA6 = 16 => "fa6";
    FA7 = 17 => "fa7";
    FS2 = 18 => "fs2";
    FS3 = 19 => "fs3";
    FS4 = 20 => "fs4";
    FS5 = 21 => "fs5";
    FS6 = 22 => "fs6";
    FS7 = 23 => "fs7";
    FS8 = 24 => "fs8";
    FS9 = 25 => "fs9";
    FS10 = 26 => "fs10";
    FS11 = 27 => "fs11";
    FT8 = 28 => "ft8";
    FT9 = 29 => "ft9";
    FT10 = 30 => "ft10";
    FT11 = 31 => "ft11";
}

impl FpReg {
    /// The 5-bit register index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// The 3-bit compressed-register alias, defined only for `f8`..`f15`.
    #[must_use]
    pub const fn compressed_index(self) -> Option<u8> {
        if self.0 >= 8 && self.0 <= 15 {
            Some(self.0 - 8)
        } else {
            None
        }
    }

    /// Whether this register is addressable with a 3-bit compressed index.
    #[must_use]
    pub const fn is_compressible(self) -> bool {
        self.compressed_index().is_some()
    }

    pub(crate) const fn to_u32(self) -> u32 {
        self.0 as u32
    }
}

impl Display for FpReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abi_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abi_names_match_the_calling_convention() {
        assert_eq!(IntReg::ZERO.abi_name(), "zero");
        assert_eq!(IntReg::RA.abi_name(), "ra");
        assert_eq!(IntReg::A0.abi_name(), "a0");
        assert_eq!(IntReg::S0.abi_name(), "s0");
        assert_eq!(FP, IntReg::S0);
        assert_eq!(FpReg::FA5.abi_name(), "fa5");
    }

    #[test]
    fn compressed_index_only_defined_for_x8_through_x15() {
        assert_eq!(IntReg::S0.compressed_index(), Some(0));
        assert_eq!(IntReg::A5.compressed_index(), Some(7));
        assert_eq!(IntReg::T0.compressed_index(), None);
        assert_eq!(IntReg::T6.compressed_index(), None);
        assert_eq!(FpReg::FS0.compressed_index(), Some(0));
        assert_eq!(FpReg::FA5.compressed_index(), Some(7));
        assert_eq!(FpReg::FT0.compressed_index(), None);
    }

    #[test]
    fn offset_binds_a_signed_displacement() {
        let operand = IntReg::SP.offset(-4);
        assert_eq!(operand.reg(), IntReg::SP);
        assert_eq!(operand.offset(), -4);
    }

    #[test]
    fn display_prints_abi_names() {
        assert_eq!(IntReg::ZERO.to_string(), "zero");
        assert_eq!(FpReg::FA0.to_string(), "fa0");
    }
}
