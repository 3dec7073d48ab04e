//! M standard extension: integer multiplication and division. Always
//! 32-bit forms; the C extension defines no compressed encoding for any of
//! these.

use super::{mnemonic, op, r_type, Emitter};
use crate::{error::EmitError, format::MnemonicBuilder, isa::Isa, registers::IntReg};

const FUNCT7_MULDIV: u32 = 0b0000001;

impl<const ISA: u16> Emitter<ISA> {
    fn muldiv(&mut self, mnem: &'static str, funct3: u32, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        Self::require(Isa::M, mnem)?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP, rd.to_u32(), funct3, rs1.to_u32(), rs2.to_u32(), FUNCT7_MULDIV));
            mnemonic(b, || MnemonicBuilder::opcode(mnem).int(rd).int(rs1).int(rs2).finish());
            Ok(())
        })
    }

    /// `mul rd, rs1, rs2`: `rd = (rs1 * rs2)[31:0]`.
    pub fn mul(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.muldiv("mul", 0b000, rd, rs1, rs2)
    }
    /// `mulh rd, rs1, rs2`: signed × signed, upper half of the 64-bit product.
    pub fn mulh(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.muldiv("mulh", 0b001, rd, rs1, rs2)
    }
    /// `mulhsu rd, rs1, rs2`: signed × unsigned, upper half.
    pub fn mulhsu(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.muldiv("mulhsu", 0b010, rd, rs1, rs2)
    }
    /// `mulhu rd, rs1, rs2`: unsigned × unsigned, upper half.
    pub fn mulhu(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.muldiv("mulhu", 0b011, rd, rs1, rs2)
    }
    /// `div rd, rs1, rs2`: signed division, truncated towards zero.
    pub fn div(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.muldiv("div", 0b100, rd, rs1, rs2)
    }
    /// `divu rd, rs1, rs2`: unsigned division.
    pub fn divu(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.muldiv("divu", 0b101, rd, rs1, rs2)
    }
    /// `rem rd, rs1, rs2`: signed remainder.
    pub fn rem(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.muldiv("rem", 0b110, rd, rs1, rs2)
    }
    /// `remu rd, rs1, rs2`: unsigned remainder.
    pub fn remu(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.muldiv("remu", 0b111, rd, rs1, rs2)
    }
}
