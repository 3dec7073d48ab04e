//! Pseudo-instructions: assembler sugar that expands to one or two real
//! encoder calls. None of these carry their own encoding; each delegates to
//! the instruction(s) it stands for; so a pseudo-instruction's compressed
//! form is just whatever compression its underlying real instruction already
//! picks.

use super::{i_type, mnemonic, op, u_type, Emitter};
use crate::{
    error::EmitError,
    format::MnemonicBuilder,
    isa::Isa,
    label::Label,
    registers::{FpReg, IntReg},
    util::split_hi20_lo12,
};

impl<const ISA: u16> Emitter<ISA> {
    /// `nop`: does nothing.
    pub fn nop(&mut self) -> Result<(), EmitError> {
        self.addi(IntReg::ZERO, IntReg::ZERO, 0)
    }

    /// `li rd, imm`: loads a 32-bit constant, as `lui`+`addi` or just `addi`
    /// when the high bits are all zero after rebalancing.
    pub fn li(&mut self, rd: IntReg, imm: i32) -> Result<(), EmitError> {
        Self::require(Isa::I, "li")?;
        let (hi, lo) = split_hi20_lo12(imm);
        if hi != 0 {
            self.lui(rd, (hi as u32) >> 12)?;
            if lo != 0 {
                self.addi(rd, rd, lo)?;
            }
            Ok(())
        } else {
            self.addi(rd, IntReg::ZERO, lo)
        }
    }

    /// `mv rd, rs`: `rd = rs`.
    pub fn mv(&mut self, rd: IntReg, rs: IntReg) -> Result<(), EmitError> {
        self.add(rd, IntReg::ZERO, rs)
    }

    /// `not rd, rs`: bitwise complement.
    pub fn not(&mut self, rd: IntReg, rs: IntReg) -> Result<(), EmitError> {
        self.xori(rd, rs, -1)
    }

    /// `neg rd, rs`: arithmetic negation.
    pub fn neg(&mut self, rd: IntReg, rs: IntReg) -> Result<(), EmitError> {
        self.sub(rd, IntReg::ZERO, rs)
    }

    /// `seqz rd, rs`: `rd = (rs == 0)`.
    pub fn seqz(&mut self, rd: IntReg, rs: IntReg) -> Result<(), EmitError> {
        self.sltiu(rd, rs, 1)
    }

    /// `snez rd, rs`: `rd = (rs != 0)`.
    pub fn snez(&mut self, rd: IntReg, rs: IntReg) -> Result<(), EmitError> {
        self.sltu(rd, IntReg::ZERO, rs)
    }

    /// `sltz rd, rs`: `rd = (rs < 0)`.
    pub fn sltz(&mut self, rd: IntReg, rs: IntReg) -> Result<(), EmitError> {
        self.slt(rd, rs, IntReg::ZERO)
    }

    /// `sgtz rd, rs`: `rd = (rs > 0)`.
    pub fn sgtz(&mut self, rd: IntReg, rs: IntReg) -> Result<(), EmitError> {
        self.slt(rd, IntReg::ZERO, rs)
    }

    /// `fmv.s rd, rs`: copies a single-precision register.
    pub fn fmv_s(&mut self, rd: FpReg, rs: FpReg) -> Result<(), EmitError> {
        self.fsgnj_s(rd, rs, rs)
    }
    /// `fmv.d rd, rs`: copies a double-precision register.
    pub fn fmv_d(&mut self, rd: FpReg, rs: FpReg) -> Result<(), EmitError> {
        self.fsgnj_d(rd, rs, rs)
    }
    /// `fabs.s rd, rs`: clears the sign bit.
    pub fn fabs_s(&mut self, rd: FpReg, rs: FpReg) -> Result<(), EmitError> {
        self.fsgnjx_s(rd, rs, rs)
    }
    /// `fabs.d rd, rs`: clears the sign bit.
    pub fn fabs_d(&mut self, rd: FpReg, rs: FpReg) -> Result<(), EmitError> {
        self.fsgnjx_d(rd, rs, rs)
    }
    /// `fneg.s rd, rs`: flips the sign bit.
    pub fn fneg_s(&mut self, rd: FpReg, rs: FpReg) -> Result<(), EmitError> {
        self.fsgnjn_s(rd, rs, rs)
    }
    /// `fneg.d rd, rs`: flips the sign bit.
    pub fn fneg_d(&mut self, rd: FpReg, rs: FpReg) -> Result<(), EmitError> {
        self.fsgnjn_d(rd, rs, rs)
    }

    /// `beqz rs, label`: branch if `rs == 0`.
    pub fn beqz(&mut self, rs: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.beq(rs, IntReg::ZERO, label)
    }
    /// `bnez rs, label`: branch if `rs != 0`.
    pub fn bnez(&mut self, rs: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.bne(rs, IntReg::ZERO, label)
    }
    /// `blez rs, label`: branch if `rs <= 0`.
    pub fn blez(&mut self, rs: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.bge(IntReg::ZERO, rs, label)
    }
    /// `bgez rs, label`: branch if `rs >= 0`.
    pub fn bgez(&mut self, rs: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.bge(rs, IntReg::ZERO, label)
    }
    /// `bltz rs, label`: branch if `rs < 0`.
    pub fn bltz(&mut self, rs: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.blt(rs, IntReg::ZERO, label)
    }
    /// `bgtz rs, label`: branch if `rs > 0`.
    pub fn bgtz(&mut self, rs: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.blt(IntReg::ZERO, rs, label)
    }
    /// `bgt rs1, rs2, label`: branch if `rs1 > rs2` (signed).
    pub fn bgt(&mut self, rs1: IntReg, rs2: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.blt(rs2, rs1, label)
    }
    /// `ble rs1, rs2, label`: branch if `rs1 <= rs2` (signed).
    pub fn ble(&mut self, rs1: IntReg, rs2: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.bge(rs2, rs1, label)
    }
    /// `bgtu rs1, rs2, label`: branch if `rs1 > rs2` (unsigned).
    pub fn bgtu(&mut self, rs1: IntReg, rs2: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.bltu(rs2, rs1, label)
    }
    /// `bleu rs1, rs2, label`: branch if `rs1 <= rs2` (unsigned).
    pub fn bleu(&mut self, rs1: IntReg, rs2: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.bgeu(rs2, rs1, label)
    }

    /// `j label`: unconditional jump, discarding the link address.
    pub fn j(&mut self, label: impl Into<Label>) -> Result<(), EmitError> {
        self.jal(IntReg::ZERO, label)
    }

    /// `jr rs`: indirect jump to `rs`, discarding the link address.
    pub fn jr(&mut self, rs: IntReg) -> Result<(), EmitError> {
        self.jalr(IntReg::ZERO, rs, 0)
    }

    /// `jalr rs` (one-register form): indirect call to `rs`, linking `ra`.
    ///
    /// Named `jalr_reg` rather than `jalr` since Rust has no overloading and
    /// [`Emitter::jalr`] already names the three-operand real instruction.
    pub fn jalr_reg(&mut self, rs: IntReg) -> Result<(), EmitError> {
        self.jalr(IntReg::RA, rs, 0)
    }

    /// `ret`: return to the caller, i.e. `jalr x0, ra, 0`.
    pub fn ret(&mut self) -> Result<(), EmitError> {
        self.jalr(IntReg::ZERO, IntReg::RA, 0)
    }

    /// `auipc`+`jalr` pair targeting `label`, linking `rd`. Shared by `call`
    /// (`rd = ra`) and `tail` (`rd = t1`, discarding the link).
    fn far_jump(&mut self, mnem2: &'static str, auipc_rd: IntReg, jalr_rd: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        Self::require(Isa::I, "auipc")?;
        let label = label.into();
        self.buffer_mut().push_deferred(move |b| {
            let off = b.label_offset(&label)?;
            let (hi, lo) = split_hi20_lo12(off);
            b.write_word(u_type(op::AUIPC, auipc_rd.to_u32(), (hi as u32) >> 12));
            mnemonic(b, || MnemonicBuilder::opcode("auipc").int(auipc_rd).unsigned_hex((hi as u32) >> 12).finish());
            b.force_pc_update();
            b.write_word(i_type(op::JALR, jalr_rd.to_u32(), 0b000, auipc_rd.to_u32(), lo));
            mnemonic(b, || MnemonicBuilder::opcode(mnem2).mem_or_reg(auipc_rd.offset(lo)).finish());
            Ok(())
        })
    }

    /// `call label`: a position-independent call to a target that may be
    /// anywhere in the 32-bit address space, linking `ra`.
    pub fn call(&mut self, label: impl Into<Label>) -> Result<(), EmitError> {
        self.far_jump("jalr", IntReg::RA, IntReg::RA, label)
    }

    /// `tail label`: a position-independent tail call; uses `t1` as the
    /// scratch link register and discards it, since the caller's `ra` must
    /// survive untouched.
    pub fn tail(&mut self, label: impl Into<Label>) -> Result<(), EmitError> {
        self.far_jump("jr", IntReg::T1, IntReg::ZERO, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::Rv32Gc;

    #[test]
    fn li_small_value_is_a_bare_addi() {
        let mut e = Rv32Gc::new(64);
        e.li(IntReg::A0, 5).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly().len(), 1);
    }

    #[test]
    fn li_large_value_splits_into_lui_and_addi() {
        let mut e = Rv32Gc::new(64);
        e.li(IntReg::A0, 0x1234_5000).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "lui a0,0x12345");
    }

    #[test]
    fn mv_compresses_like_a_plain_add() {
        let mut e = Rv32Gc::new(64);
        e.mv(IntReg::A0, IntReg::A1).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "add a0,zero,a1");
    }

    #[test]
    fn ret_is_jalr_zero_ra_zero() {
        let mut e = Rv32Gc::new(64);
        e.ret().unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "jalr zero,ra");
    }

    #[test]
    fn beqz_delegates_to_beq_against_zero() {
        let mut e = Rv32Gc::new(64);
        e.beqz(IntReg::A0, "end").unwrap();
        e.place_label("end");
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "beq a0,zero,<end>");
    }

    #[test]
    fn call_emits_an_auipc_jalr_pair() {
        let mut e = Rv32Gc::new(64);
        e.call("fn").unwrap();
        e.place_label("fn");
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly().len(), 2);
        assert_eq!(e.buffer().disassembly()[0], "auipc ra,0x0");
        assert_eq!(e.buffer().disassembly()[1], "jalr 8(ra)");
    }

    #[test]
    fn tail_links_through_t1_not_ra() {
        let mut e = Rv32Gc::new(64);
        e.tail("fn").unwrap();
        e.place_label("fn");
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "auipc t1,0x0");
        assert_eq!(e.buffer().disassembly()[1], "jr 8(t1)");
    }
}
