//! RV32I base instruction set, with opportunistic C-extension compression.
//!
//! Every encoder here owns both the standard 32-bit form and whichever
//! 16-bit forms the C extension defines for it (see the table in the crate
//! root docs); the compressed catalogue is entirely hidden behind the
//! mnemonic's single public method, matching the assembler's own mental
//! model ("emit an `addi`", not "emit a `c.addi`").

use super::{b_type, i_type, j_type, mnemonic, op, r_type, s_type, u_type};
use super::{ca, cb_branch, cb_shift, ci, ci_addi16sp, ci_lwsp, cj, cr, css, ciw, cl};
use crate::{
    bits::{bit, range},
    buffer::CodeBuffer,
    error::EmitError,
    format::MnemonicBuilder,
    isa::Isa,
    label::Label,
    registers::IntReg,
    util::{i32_fits_n_bits, is_aligned_n, u32_fits_n_bits},
};

use super::Emitter;

impl<const ISA: u16> Emitter<ISA> {
    /// `lui rd, imm20`: load the 20-bit immediate into `rd[31:12]`, zeroing
    /// the low 12 bits.
    pub fn lui(&mut self, rd: IntReg, imm20: u32) -> Result<(), EmitError> {
        Self::require(Isa::I, "lui")?;
        assert!(u32_fits_n_bits(imm20, 20), "lui: imm20 out of range");
        let sign6 = crate::util::i32_fits_n_bits(sign_extend20(imm20), 6);
        let compressed = Self::has(Isa::C) && rd != IntReg::ZERO && rd != IntReg::SP && imm20 != 0 && sign6;
        self.buffer_mut().push_deferred(move |b| {
            if compressed {
                let imm = imm20 & 0x3F;
                let word = ci(0b011, bit(5, imm.into()).value() as u32, rd.to_u32(), range(4, 0, imm.into()).value() as u32, 0b01);
                b.write_hword(word);
            } else {
                b.write_word(u_type(op::LUI, rd.to_u32(), imm20));
            }
            mnemonic(b, || MnemonicBuilder::opcode("lui").int(rd).unsigned_hex(imm20).finish());
            Ok(())
        })
    }

    /// `auipc rd, imm20`: `rd = pc + (imm20 << 12)`.
    pub fn auipc(&mut self, rd: IntReg, imm20: u32) -> Result<(), EmitError> {
        Self::require(Isa::I, "auipc")?;
        assert!(u32_fits_n_bits(imm20, 20), "auipc: imm20 out of range");
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(u_type(op::AUIPC, rd.to_u32(), imm20));
            mnemonic(b, || MnemonicBuilder::opcode("auipc").int(rd).unsigned_hex(imm20).finish());
            Ok(())
        })
    }

    /// `jal rd, label`: pc-relative jump, storing `pc+4` into `rd`.
    pub fn jal(&mut self, rd: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        Self::require(Isa::I, "jal")?;
        let label = label.into();
        self.buffer_mut().push_deferred(move |b| {
            let off = b.label_offset(&label)?;
            assert!(is_aligned_n(off, 2), "jal: target is not 2-aligned");
            let compressed = Self::has(Isa::C) && !label.is_far() && i32_fits_n_bits(off, 12) && (rd == IntReg::RA || rd == IntReg::ZERO);
            if compressed {
                // c.jal (rd=ra) is funct3 001, RV32-only; c.j (rd=x0) is funct3 101.
                let funct3 = if rd == IntReg::RA { 0b001 } else { 0b101 };
                b.write_hword(cj(funct3, off as u32));
            } else {
                assert!(i32_fits_n_bits(off, 21), "jal: offset out of range");
                b.write_word(j_type(op::JAL, rd.to_u32(), off));
            }
            let resolved = b.label_value(&label)?;
            mnemonic(b, || MnemonicBuilder::opcode("jal").int(rd).label(&label, resolved).finish());
            Ok(())
        })
    }

    /// `jalr rd, rs1, imm`: indirect jump to `(rs1 + imm) & !1`, storing
    /// `pc+4` into `rd`.
    pub fn jalr(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        Self::require(Isa::I, "jalr")?;
        assert!(i32_fits_n_bits(imm, 12), "jalr: imm out of range");
        let compressed = Self::has(Isa::C) && imm == 0 && rs1 != IntReg::ZERO && (rd == IntReg::RA || rd == IntReg::ZERO);
        self.buffer_mut().push_deferred(move |b| {
            if compressed {
                let funct4 = if rd == IntReg::RA { 0b1001 } else { 0b1000 };
                b.write_hword(cr(funct4, rs1.to_u32(), 0));
            } else {
                b.write_word(i_type(op::JALR, rd.to_u32(), 0b000, rs1.to_u32(), imm));
            }
            mnemonic(b, || MnemonicBuilder::opcode("jalr").int(rd).mem_or_reg(rs1.offset(imm)).finish());
            Ok(())
        })
    }

    fn branch(&mut self, mnem: &'static str, funct3: u32, rs1: IntReg, rs2: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        Self::require(Isa::I, "branch")?;
        let label = label.into();
        self.buffer_mut().push_deferred(move |b| {
            let off = b.label_offset(&label)?;
            assert!(is_aligned_n(off, 2), "branch: target is not 2-aligned");
            let is_eqz = (funct3 == 0b000 || funct3 == 0b001) && rs2 == IntReg::ZERO;
            let compressed = Self::has(Isa::C)
                && !label.is_far()
                && is_eqz
                && rs1.is_compressible()
                && i32_fits_n_bits(off, 9)
                && is_aligned_n(off, 2);
            if compressed {
                let c_funct3 = if funct3 == 0b000 { 0b110 } else { 0b111 };
                let rs1c = rs1.compressed_index().expect("checked is_compressible") as u32;
                b.write_hword(cb_branch(c_funct3, rs1c, off as u32));
            } else {
                assert!(i32_fits_n_bits(off, 13), "branch: offset out of range");
                b.write_word(b_type(op::BRANCH, funct3, rs1.to_u32(), rs2.to_u32(), off));
            }
            let resolved = b.label_value(&label)?;
            mnemonic(b, || MnemonicBuilder::opcode(mnem).int(rs1).int(rs2).label(&label, resolved).finish());
            Ok(())
        })
    }

    /// `beq rs1, rs2, label`.
    pub fn beq(&mut self, rs1: IntReg, rs2: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.branch("beq", 0b000, rs1, rs2, label)
    }
    /// `bne rs1, rs2, label`.
    pub fn bne(&mut self, rs1: IntReg, rs2: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.branch("bne", 0b001, rs1, rs2, label)
    }
    /// `blt rs1, rs2, label`.
    pub fn blt(&mut self, rs1: IntReg, rs2: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.branch("blt", 0b100, rs1, rs2, label)
    }
    /// `bge rs1, rs2, label`.
    pub fn bge(&mut self, rs1: IntReg, rs2: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.branch("bge", 0b101, rs1, rs2, label)
    }
    /// `bltu rs1, rs2, label`.
    pub fn bltu(&mut self, rs1: IntReg, rs2: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.branch("bltu", 0b110, rs1, rs2, label)
    }
    /// `bgeu rs1, rs2, label`.
    pub fn bgeu(&mut self, rs1: IntReg, rs2: IntReg, label: impl Into<Label>) -> Result<(), EmitError> {
        self.branch("bgeu", 0b111, rs1, rs2, label)
    }

    fn load(&mut self, mnem: &'static str, funct3: u32, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        Self::require(Isa::I, mnem)?;
        assert!(i32_fits_n_bits(imm, 12), "load: imm out of range");
        let compressed = funct3 == 0b010
            && Self::has(Isa::C)
            && (rs1 != IntReg::SP || rd != IntReg::ZERO)
            && Self::lw_compressed(rd, rs1, imm);
        self.buffer_mut().push_deferred(move |b| {
            if compressed {
                emit_lw_sw(b, rd, rs1, imm, true);
            } else {
                b.write_word(i_type(op::LOAD, rd.to_u32(), funct3, rs1.to_u32(), imm));
            }
            mnemonic(b, || MnemonicBuilder::opcode(mnem).int(rd).mem(rs1.offset(imm)).finish());
            Ok(())
        })
    }

    /// `lb rd, imm(rs1)`: load a sign-extended byte.
    pub fn lb(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        self.load("lb", 0b000, rd, rs1, imm)
    }
    /// `lh rd, imm(rs1)`: load a sign-extended halfword.
    pub fn lh(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        self.load("lh", 0b001, rd, rs1, imm)
    }
    /// `lw rd, imm(rs1)`: load a word.
    pub fn lw(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        self.load("lw", 0b010, rd, rs1, imm)
    }
    /// `lbu rd, imm(rs1)`: load a zero-extended byte.
    pub fn lbu(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        self.load("lbu", 0b100, rd, rs1, imm)
    }
    /// `lhu rd, imm(rs1)`: load a zero-extended halfword.
    pub fn lhu(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        self.load("lhu", 0b101, rd, rs1, imm)
    }

    fn store(&mut self, mnem: &'static str, funct3: u32, rs1: IntReg, rs2: IntReg, imm: i32) -> Result<(), EmitError> {
        Self::require(Isa::I, mnem)?;
        assert!(i32_fits_n_bits(imm, 12), "store: imm out of range");
        let compressed = funct3 == 0b010 && Self::has(Isa::C) && Self::lw_compressed(rs2, rs1, imm);
        self.buffer_mut().push_deferred(move |b| {
            if compressed {
                emit_lw_sw(b, rs2, rs1, imm, false);
            } else {
                b.write_word(s_type(op::STORE, funct3, rs1.to_u32(), rs2.to_u32(), imm));
            }
            mnemonic(b, || MnemonicBuilder::opcode(mnem).int(rs2).mem(rs1.offset(imm)).finish());
            Ok(())
        })
    }

    /// `sb rs2, imm(rs1)`: store the low byte of `rs2`.
    pub fn sb(&mut self, rs1: IntReg, rs2: IntReg, imm: i32) -> Result<(), EmitError> {
        self.store("sb", 0b000, rs1, rs2, imm)
    }
    /// `sh rs2, imm(rs1)`: store the low halfword of `rs2`.
    pub fn sh(&mut self, rs1: IntReg, rs2: IntReg, imm: i32) -> Result<(), EmitError> {
        self.store("sh", 0b001, rs1, rs2, imm)
    }
    /// `sw rs2, imm(rs1)`: store the word `rs2`.
    pub fn sw(&mut self, rs1: IntReg, rs2: IntReg, imm: i32) -> Result<(), EmitError> {
        self.store("sw", 0b010, rs1, rs2, imm)
    }

    /// Whether `(rd, rs1, imm)` qualifies for either the `sp`-relative or
    /// the two-compressible-register `c.lw`/`c.sw` family. Shared between
    /// `lw` and `sw` since the predicate is symmetric in the register roles.
    fn lw_compressed(rd_or_rs2: IntReg, rs1: IntReg, imm: i32) -> bool {
        if rs1 == IntReg::SP {
            u32_fits_n_bits(imm as u32, 8) && is_aligned_n(imm, 4)
        } else {
            rd_or_rs2.is_compressible() && rs1.is_compressible() && u32_fits_n_bits(imm as u32, 7) && is_aligned_n(imm, 4)
        }
    }

    /// `addi rd, rs1, imm`; chooses among `c.nop`, `c.li`, `c.addi`,
    /// `c.addi4spn` and `c.addi16sp` per spec, in that priority order.
    pub fn addi(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        Self::require(Isa::I, "addi")?;
        assert!(i32_fits_n_bits(imm, 12), "addi: imm out of range");
        let form = CAddiForm::select(rd, rs1, imm, Self::has(Isa::C));
        self.buffer_mut().push_deferred(move |b| {
            match form {
                CAddiForm::Nop => b.write_hword(ci(0b000, 0, 0, 0, 0b01)),
                CAddiForm::Li => {
                    let u = (imm as u32) & 0x3F;
                    b.write_hword(ci(0b010, bit(5, u.into()).value() as u32, rd.to_u32(), range(4, 0, u.into()).value() as u32, 0b01));
                }
                CAddiForm::Addi => {
                    let u = (imm as u32) & 0x3F;
                    b.write_hword(ci(0b000, bit(5, u.into()).value() as u32, rd.to_u32(), range(4, 0, u.into()).value() as u32, 0b01));
                }
                CAddiForm::Addi16Sp => {
                    b.write_hword(ci_addi16sp(imm as u32));
                }
                CAddiForm::Addi4Spn => {
                    let rdc = rd.compressed_index().expect("checked compressible") as u32;
                    b.write_hword(ciw(0b000, addi4spn_imm8(imm as u32), rdc));
                }
                CAddiForm::Standard => {
                    b.write_word(i_type(op::OP_IMM, rd.to_u32(), 0b000, rs1.to_u32(), imm));
                }
            }
            mnemonic(b, || MnemonicBuilder::opcode("addi").int(rd).int(rs1).signed(imm).finish());
            Ok(())
        })
    }

    /// `slti rd, rs1, imm`: set `rd` to 1 if `rs1 < imm` (signed).
    pub fn slti(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        self.op_imm_plain("slti", 0b010, rd, rs1, imm)
    }
    /// `sltiu rd, rs1, imm`: set `rd` to 1 if `rs1 < imm` (unsigned).
    pub fn sltiu(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        self.op_imm_plain("sltiu", 0b011, rd, rs1, imm)
    }
    /// `xori rd, rs1, imm`.
    pub fn xori(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        self.op_imm_plain("xori", 0b100, rd, rs1, imm)
    }
    /// `ori rd, rs1, imm`.
    pub fn ori(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        self.op_imm_plain("ori", 0b110, rd, rs1, imm)
    }

    fn op_imm_plain(&mut self, mnem: &'static str, funct3: u32, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        Self::require(Isa::I, mnem)?;
        assert!(i32_fits_n_bits(imm, 12), "op-imm: imm out of range");
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(i_type(op::OP_IMM, rd.to_u32(), funct3, rs1.to_u32(), imm));
            mnemonic(b, || MnemonicBuilder::opcode(mnem).int(rd).int(rs1).signed(imm).finish());
            Ok(())
        })
    }

    /// `andi rd, rs1, imm`.
    pub fn andi(&mut self, rd: IntReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        Self::require(Isa::I, "andi")?;
        assert!(i32_fits_n_bits(imm, 12), "andi: imm out of range");
        let compressed = Self::has(Isa::C) && rd == rs1 && rd.is_compressible() && i32_fits_n_bits(imm, 6);
        self.buffer_mut().push_deferred(move |b| {
            if compressed {
                let u = (imm as u32) & 0x3F;
                let rdc = rd.compressed_index().expect("checked compressible") as u32;
                let imm5 = bit(5, u.into()).value() as u32;
                let imm40 = range(4, 0, u.into()).value() as u32;
                b.write_hword(cb_shift(imm5, 0b10, rdc, imm40));
            } else {
                b.write_word(i_type(op::OP_IMM, rd.to_u32(), 0b111, rs1.to_u32(), imm));
            }
            mnemonic(b, || MnemonicBuilder::opcode("andi").int(rd).int(rs1).signed(imm).finish());
            Ok(())
        })
    }

    fn shift_imm(&mut self, mnem: &'static str, funct3: u32, funct7: u32, rd: IntReg, rs1: IntReg, shamt: u32, c_funct2: u32) -> Result<(), EmitError> {
        Self::require(Isa::I, mnem)?;
        assert!(shamt <= 31, "shift amount out of range");
        let needs_compressible = funct3 == 0b101; // srli/srai
        let compressed = Self::has(Isa::C) && rd == rs1 && shamt >= 1 && (!needs_compressible || rd.is_compressible());
        self.buffer_mut().push_deferred(move |b| {
            if compressed {
                let imm5 = bit(5, (shamt as u64) & 0x3F).value() as u32;
                let imm40 = range(4, 0, shamt.into()).value() as u32;
                if funct3 == 0b001 {
                    // c.slli: full 5-bit rd field, CI format
                    b.write_hword(ci(0b000, imm5, rd.to_u32(), imm40, 0b10));
                } else {
                    let rdc = rd.compressed_index().expect("checked compressible") as u32;
                    b.write_hword(cb_shift(imm5, c_funct2, rdc, imm40));
                }
            } else {
                b.write_word(r_type(op::OP_IMM, rd.to_u32(), funct3, rs1.to_u32(), shamt, funct7));
            }
            mnemonic(b, || MnemonicBuilder::opcode(mnem).int(rd).int(rs1).unsigned_hex(shamt).finish());
            Ok(())
        })
    }

    /// `slli rd, rs1, shamt`.
    pub fn slli(&mut self, rd: IntReg, rs1: IntReg, shamt: u32) -> Result<(), EmitError> {
        self.shift_imm("slli", 0b001, 0b0000000, rd, rs1, shamt, 0)
    }
    /// `srli rd, rs1, shamt`.
    pub fn srli(&mut self, rd: IntReg, rs1: IntReg, shamt: u32) -> Result<(), EmitError> {
        self.shift_imm("srli", 0b101, 0b0000000, rd, rs1, shamt, 0b00)
    }
    /// `srai rd, rs1, shamt`.
    pub fn srai(&mut self, rd: IntReg, rs1: IntReg, shamt: u32) -> Result<(), EmitError> {
        self.shift_imm("srai", 0b101, 0b0100000, rd, rs1, shamt, 0b01)
    }

    fn op_r(&mut self, mnem: &'static str, funct3: u32, funct7: u32, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        Self::require(Isa::I, mnem)?;
        let form = COpForm::select(mnem, rd, rs1, rs2, Self::has(Isa::C));
        self.buffer_mut().push_deferred(move |b| {
            match form {
                COpForm::Mv => b.write_hword(cr(0b1000, rd.to_u32(), rs2.to_u32())),
                COpForm::Add => b.write_hword(cr(0b1001, rd.to_u32(), rs2.to_u32())),
                COpForm::CaForm(funct2) => {
                    let rdc = rd.compressed_index().expect("checked compressible") as u32;
                    let rs2c = rs2.compressed_index().expect("checked compressible") as u32;
                    b.write_hword(ca(0b100011, rdc, funct2, rs2c));
                }
                COpForm::Standard => b.write_word(r_type(op::OP, rd.to_u32(), funct3, rs1.to_u32(), rs2.to_u32(), funct7)),
            }
            mnemonic(b, || MnemonicBuilder::opcode(mnem).int(rd).int(rs1).int(rs2).finish());
            Ok(())
        })
    }

    /// `add rd, rs1, rs2`.
    pub fn add(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.op_r("add", 0b000, 0b0000000, rd, rs1, rs2)
    }
    /// `sub rd, rs1, rs2`.
    pub fn sub(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.op_r("sub", 0b000, 0b0100000, rd, rs1, rs2)
    }
    /// `sll rd, rs1, rs2`.
    pub fn sll(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.op_r("sll", 0b001, 0b0000000, rd, rs1, rs2)
    }
    /// `slt rd, rs1, rs2`.
    pub fn slt(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.op_r("slt", 0b010, 0b0000000, rd, rs1, rs2)
    }
    /// `sltu rd, rs1, rs2`.
    pub fn sltu(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.op_r("sltu", 0b011, 0b0000000, rd, rs1, rs2)
    }
    /// `xor rd, rs1, rs2`.
    pub fn xor(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.op_r("xor", 0b100, 0b0000000, rd, rs1, rs2)
    }
    /// `srl rd, rs1, rs2`.
    pub fn srl(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.op_r("srl", 0b101, 0b0000000, rd, rs1, rs2)
    }
    /// `sra rd, rs1, rs2`.
    pub fn sra(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.op_r("sra", 0b101, 0b0100000, rd, rs1, rs2)
    }
    /// `or rd, rs1, rs2`.
    pub fn or(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.op_r("or", 0b110, 0b0000000, rd, rs1, rs2)
    }
    /// `and rd, rs1, rs2`.
    pub fn and(&mut self, rd: IntReg, rs1: IntReg, rs2: IntReg) -> Result<(), EmitError> {
        self.op_r("and", 0b111, 0b0000000, rd, rs1, rs2)
    }
}

enum CAddiForm {
    Nop,
    Li,
    Addi,
    Addi16Sp,
    Addi4Spn,
    Standard,
}

impl CAddiForm {
    fn select(rd: IntReg, rs1: IntReg, imm: i32, has_c: bool) -> Self {
        if !has_c {
            return Self::Standard;
        }
        if rd == IntReg::ZERO && rs1 == IntReg::ZERO && imm == 0 {
            Self::Nop
        } else if rs1 == IntReg::ZERO && rd != IntReg::ZERO && i32_fits_n_bits(imm, 6) {
            Self::Li
        } else if rd == rs1 && rd == IntReg::SP && imm != 0 && i32_fits_n_bits(imm, 10) && is_aligned_n(imm, 16) {
            Self::Addi16Sp
        } else if rd == rs1 && rd != IntReg::ZERO && imm != 0 && i32_fits_n_bits(imm, 6) {
            Self::Addi
        } else if rs1 == IntReg::SP && rd != rs1 && rd.is_compressible() && imm != 0 && u32_fits_n_bits(imm as u32, 10) && is_aligned_n(imm, 4)
        {
            Self::Addi4Spn
        } else {
            Self::Standard
        }
    }
}

enum COpForm {
    Mv,
    Add,
    CaForm(u32),
    Standard,
}

impl COpForm {
    fn select(mnem: &str, rd: IntReg, rs1: IntReg, rs2: IntReg, has_c: bool) -> Self {
        if !has_c {
            return Self::Standard;
        }
        match mnem {
            "add" if rd != IntReg::ZERO && rs1 == IntReg::ZERO && rs2 != IntReg::ZERO => Self::Mv,
            "add" if rd != IntReg::ZERO && rd == rs1 && rs2 != IntReg::ZERO => Self::Add,
            "sub" if rd == rs1 && rd.is_compressible() && rs2.is_compressible() => Self::CaForm(0b00),
            "xor" if rd == rs1 && rd.is_compressible() && rs2.is_compressible() => Self::CaForm(0b01),
            "or" if rd == rs1 && rd.is_compressible() && rs2.is_compressible() => Self::CaForm(0b10),
            "and" if rd == rs1 && rd.is_compressible() && rs2.is_compressible() => Self::CaForm(0b11),
            _ => Self::Standard,
        }
    }
}

/// Sign-extends a 20-bit `lui` immediate to a full `i32`, for the `c.lui`
/// range check (the predicate is stated over the *sign-extended* value).
const fn sign_extend20(imm20: u32) -> i32 {
    crate::util::sign_extend(imm20, 20)
}

/// Packs a `c.addi4spn` 10-bit unsigned, 4-aligned immediate into the 8-bit
/// `CIW` field order: `{imm[5:4], imm[9:6], imm[2], imm[3]}`.
fn addi4spn_imm8(imm: u32) -> u32 {
    let b = |i: u32| (imm >> i) & 1;
    (b(5) << 7) | (b(4) << 6) | (b(9) << 5) | (b(8) << 4) | (b(7) << 3) | (b(6) << 2) | (b(2) << 1) | b(3)
}

/// Emits the `c.lw`/`c.sw` or `c.lwsp`/`c.swsp` compressed form, assuming
/// the predicate has already been checked by the caller.
fn emit_lw_sw(b: &mut CodeBuffer, rd_or_rs2: IntReg, rs1: IntReg, imm: i32, is_load: bool) {
    let u = imm as u32;
    if rs1 == IntReg::SP {
        if is_load {
            b.write_hword(ci_lwsp(0b010, rd_or_rs2.to_u32(), u));
        } else {
            // CSS: funct3 | imm6 | rs2 | op. imm6 = {imm[5:2], imm[7:6]}.
            let imm6 = ((u >> 2) & 0xF) << 2 | ((u >> 6) & 0x3);
            b.write_hword(css(0b110, imm6, rd_or_rs2.to_u32()));
        }
    } else {
        let rs1c = rs1.compressed_index().expect("checked compressible") as u32;
        let imm_hi3 = (u >> 3) & 0x7;
        let imm_lo2 = ((u >> 2) & 1) << 1 | (u >> 6) & 1;
        if is_load {
            let rdc = rd_or_rs2.compressed_index().expect("checked compressible") as u32;
            b.write_hword(cl(0b010, imm_hi3, rs1c, imm_lo2, rdc));
        } else {
            let rs2c = rd_or_rs2.compressed_index().expect("checked compressible") as u32;
            b.write_hword(cl(0b110, imm_hi3, rs1c, imm_lo2, rs2c));
        }
    }
}
