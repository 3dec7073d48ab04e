//! A standard extension: atomic memory operations. Always 32-bit forms; the
//! C extension defines no compressed encoding for any of these. Every
//! atomic's memory operand is a bare `(rs1)` — the address register's
//! displacement must be zero.

use super::{amo_type, mnemonic, op, Emitter};
use crate::{error::EmitError, format::MnemonicBuilder, isa::Isa, registers::IntOffsetReg};

fn require_zero_offset(mem: IntOffsetReg, mnem: &str) {
    assert!(mem.offset() == 0, "{mnem}: atomic memory operand must have a zero offset");
}

impl<const ISA: u16> Emitter<ISA> {
    /// `lr.w rd, (rs1)`: load-reserved word.
    pub fn lr_w(&mut self, rd: crate::registers::IntReg, mem: IntOffsetReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        Self::require(Isa::A, "lr.w")?;
        require_zero_offset(mem, "lr.w");
        let rs1 = mem.reg();
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(amo_type(op::AMO, rd.to_u32(), 0b010, rs1.to_u32(), 0, 0b00010, aq, rl));
            mnemonic(b, || MnemonicBuilder::opcode("lr.w").int(rd).mem_paren(rs1).finish());
            Ok(())
        })
    }

    fn amo(&mut self, mnem: &'static str, funct5: u32, rd: crate::registers::IntReg, mem: IntOffsetReg, rs2: crate::registers::IntReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        Self::require(Isa::A, mnem)?;
        require_zero_offset(mem, mnem);
        let rs1 = mem.reg();
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(amo_type(op::AMO, rd.to_u32(), 0b010, rs1.to_u32(), rs2.to_u32(), funct5, aq, rl));
            mnemonic(b, || MnemonicBuilder::opcode(mnem).int(rd).int(rs2).mem_paren(rs1).finish());
            Ok(())
        })
    }

    /// `sc.w rd, rs2, (rs1)`: store-conditional word; `rd` receives 0 on
    /// success, nonzero on failure.
    pub fn sc_w(&mut self, rd: crate::registers::IntReg, rs2: crate::registers::IntReg, mem: IntOffsetReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        self.amo("sc.w", 0b00011, rd, mem, rs2, aq, rl)
    }
    /// `amoswap.w rd, rs2, (rs1)`.
    pub fn amoswap_w(&mut self, rd: crate::registers::IntReg, rs2: crate::registers::IntReg, mem: IntOffsetReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        self.amo("amoswap.w", 0b00001, rd, mem, rs2, aq, rl)
    }
    /// `amoadd.w rd, rs2, (rs1)`.
    pub fn amoadd_w(&mut self, rd: crate::registers::IntReg, rs2: crate::registers::IntReg, mem: IntOffsetReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        self.amo("amoadd.w", 0b00000, rd, mem, rs2, aq, rl)
    }
    /// `amoxor.w rd, rs2, (rs1)`.
    pub fn amoxor_w(&mut self, rd: crate::registers::IntReg, rs2: crate::registers::IntReg, mem: IntOffsetReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        self.amo("amoxor.w", 0b00100, rd, mem, rs2, aq, rl)
    }
    /// `amoand.w rd, rs2, (rs1)`.
    pub fn amoand_w(&mut self, rd: crate::registers::IntReg, rs2: crate::registers::IntReg, mem: IntOffsetReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        self.amo("amoand.w", 0b01100, rd, mem, rs2, aq, rl)
    }
    /// `amoor.w rd, rs2, (rs1)`.
    pub fn amoor_w(&mut self, rd: crate::registers::IntReg, rs2: crate::registers::IntReg, mem: IntOffsetReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        self.amo("amoor.w", 0b01000, rd, mem, rs2, aq, rl)
    }
    /// `amomin.w rd, rs2, (rs1)`: signed minimum.
    pub fn amomin_w(&mut self, rd: crate::registers::IntReg, rs2: crate::registers::IntReg, mem: IntOffsetReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        self.amo("amomin.w", 0b10000, rd, mem, rs2, aq, rl)
    }
    /// `amomax.w rd, rs2, (rs1)`: signed maximum.
    pub fn amomax_w(&mut self, rd: crate::registers::IntReg, rs2: crate::registers::IntReg, mem: IntOffsetReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        self.amo("amomax.w", 0b10100, rd, mem, rs2, aq, rl)
    }
    /// `amominu.w rd, rs2, (rs1)`: unsigned minimum.
    pub fn amominu_w(&mut self, rd: crate::registers::IntReg, rs2: crate::registers::IntReg, mem: IntOffsetReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        self.amo("amominu.w", 0b11000, rd, mem, rs2, aq, rl)
    }
    /// `amomaxu.w rd, rs2, (rs1)`: unsigned maximum.
    pub fn amomaxu_w(&mut self, rd: crate::registers::IntReg, rs2: crate::registers::IntReg, mem: IntOffsetReg, aq: bool, rl: bool) -> Result<(), EmitError> {
        self.amo("amomaxu.w", 0b11100, rd, mem, rs2, aq, rl)
    }
}
