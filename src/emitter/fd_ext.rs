//! F and D standard extensions: single- and double-precision floating point.
//!
//! Every arithmetic encoder shares the `OP-FP` opcode and distinguishes
//! itself by `funct5`/`fmt`; the `fmt` field (`00` for `.s`, `01` for `.d`)
//! is the only bit that differs between an instruction's single- and
//! double-precision forms. `fsgnj`/`fsgnjn`/`fsgnjx` additionally collapse
//! to the `fmv`/`fabs`/`fneg` pseudo-mnemonics in their own disassembly
//! whenever `rs1 == rs2`, since the encoding is identical either way.

use super::{ci_fldsp, ci_lwsp, cl, css, mnemonic, op, r4_type, r_type, Emitter};
use crate::{
    error::EmitError,
    format::MnemonicBuilder,
    isa::Isa,
    registers::{FpReg, IntReg},
    rounding::RoundingMode,
    util::{i32_fits_n_bits, is_aligned_n, u32_fits_n_bits},
};

const FUNCT3_FP: u32 = 0b010;
const FUNCT3_FPD: u32 = 0b011;

impl<const ISA: u16> Emitter<ISA> {
    /// `flw rd, imm(rs1)`: single-precision load.
    pub fn flw(&mut self, rd: FpReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        Self::require(Isa::F, "flw")?;
        assert!(i32_fits_n_bits(imm, 12), "flw: imm out of range");
        let compressed = Self::has(Isa::C) && Self::fw_compressed(rd, rs1, imm);
        self.buffer_mut().push_deferred(move |b| {
            if compressed {
                emit_flw_fsw(b, rd, rs1, imm, true);
            } else {
                b.write_word(super::i_type(op::LOAD_FP, rd.to_u32(), FUNCT3_FP, rs1.to_u32(), imm));
            }
            mnemonic(b, || MnemonicBuilder::opcode("flw").fp(rd).mem(rs1.offset(imm)).finish());
            Ok(())
        })
    }

    /// `fsw rs2, imm(rs1)`: single-precision store.
    pub fn fsw(&mut self, rs1: IntReg, rs2: FpReg, imm: i32) -> Result<(), EmitError> {
        Self::require(Isa::F, "fsw")?;
        assert!(i32_fits_n_bits(imm, 12), "fsw: imm out of range");
        let compressed = Self::has(Isa::C) && Self::fw_compressed(rs2, rs1, imm);
        self.buffer_mut().push_deferred(move |b| {
            if compressed {
                emit_flw_fsw(b, rs2, rs1, imm, false);
            } else {
                b.write_word(super::s_type(op::STORE_FP, FUNCT3_FP, rs1.to_u32(), rs2.to_u32(), imm));
            }
            mnemonic(b, || MnemonicBuilder::opcode("fsw").fp(rs2).mem(rs1.offset(imm)).finish());
            Ok(())
        })
    }

    fn fw_compressed(rd_or_rs2: FpReg, rs1: IntReg, imm: i32) -> bool {
        if rs1 == IntReg::SP {
            u32_fits_n_bits(imm as u32, 8) && is_aligned_n(imm, 4)
        } else {
            rd_or_rs2.is_compressible() && rs1.is_compressible() && u32_fits_n_bits(imm as u32, 7) && is_aligned_n(imm, 4)
        }
    }

    /// `fld rd, imm(rs1)`: double-precision load.
    pub fn fld(&mut self, rd: FpReg, rs1: IntReg, imm: i32) -> Result<(), EmitError> {
        Self::require(Isa::D, "fld")?;
        assert!(i32_fits_n_bits(imm, 12), "fld: imm out of range");
        let compressed = Self::has(Isa::C) && Self::fd_compressed(rd, rs1, imm);
        self.buffer_mut().push_deferred(move |b| {
            if compressed {
                emit_fld_fsd(b, rd, rs1, imm, true);
            } else {
                b.write_word(super::i_type(op::LOAD_FP, rd.to_u32(), FUNCT3_FPD, rs1.to_u32(), imm));
            }
            mnemonic(b, || MnemonicBuilder::opcode("fld").fp(rd).mem(rs1.offset(imm)).finish());
            Ok(())
        })
    }

    /// `fsd rs2, imm(rs1)`: double-precision store.
    pub fn fsd(&mut self, rs1: IntReg, rs2: FpReg, imm: i32) -> Result<(), EmitError> {
        Self::require(Isa::D, "fsd")?;
        assert!(i32_fits_n_bits(imm, 12), "fsd: imm out of range");
        let compressed = Self::has(Isa::C) && Self::fd_compressed(rs2, rs1, imm);
        self.buffer_mut().push_deferred(move |b| {
            if compressed {
                emit_fld_fsd(b, rs2, rs1, imm, false);
            } else {
                b.write_word(super::s_type(op::STORE_FP, FUNCT3_FPD, rs1.to_u32(), rs2.to_u32(), imm));
            }
            mnemonic(b, || MnemonicBuilder::opcode("fsd").fp(rs2).mem(rs1.offset(imm)).finish());
            Ok(())
        })
    }

    fn fd_compressed(rd_or_rs2: FpReg, rs1: IntReg, imm: i32) -> bool {
        if rs1 == IntReg::SP {
            u32_fits_n_bits(imm as u32, 9) && is_aligned_n(imm, 8)
        } else {
            rd_or_rs2.is_compressible() && rs1.is_compressible() && u32_fits_n_bits(imm as u32, 8) && is_aligned_n(imm, 8)
        }
    }

    fn fmadd_family(&mut self, mnem: &'static str, opcode: u32, fmt: u32, rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        let ext = if fmt == op::FMT_D { Isa::D } else { Isa::F };
        Self::require(ext, mnem)?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r4_type(opcode, rd.to_u32(), rm.encode(), rs1.to_u32(), rs2.to_u32(), fmt, rs3.to_u32()));
            mnemonic(b, || MnemonicBuilder::opcode(mnem).fp(rd).fp(rs1).fp(rs2).fp(rs3).rounding(rm).finish());
            Ok(())
        })
    }

    /// `fmadd.s rd, rs1, rs2, rs3, rm`: `rd = rs1*rs2 + rs3`.
    pub fn fmadd_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fmadd_family("fmadd.s", op::MADD, op::FMT_S, rd, rs1, rs2, rs3, rm)
    }
    /// `fmsub.s rd, rs1, rs2, rs3, rm`: `rd = rs1*rs2 - rs3`.
    pub fn fmsub_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fmadd_family("fmsub.s", op::MSUB, op::FMT_S, rd, rs1, rs2, rs3, rm)
    }
    /// `fnmsub.s rd, rs1, rs2, rs3, rm`: `rd = -(rs1*rs2) + rs3`.
    pub fn fnmsub_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fmadd_family("fnmsub.s", op::NMSUB, op::FMT_S, rd, rs1, rs2, rs3, rm)
    }
    /// `fnmadd.s rd, rs1, rs2, rs3, rm`: `rd = -(rs1*rs2) - rs3`.
    pub fn fnmadd_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fmadd_family("fnmadd.s", op::NMADD, op::FMT_S, rd, rs1, rs2, rs3, rm)
    }
    /// `fmadd.d rd, rs1, rs2, rs3, rm`.
    pub fn fmadd_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fmadd_family("fmadd.d", op::MADD, op::FMT_D, rd, rs1, rs2, rs3, rm)
    }
    /// `fmsub.d rd, rs1, rs2, rs3, rm`.
    pub fn fmsub_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fmadd_family("fmsub.d", op::MSUB, op::FMT_D, rd, rs1, rs2, rs3, rm)
    }
    /// `fnmsub.d rd, rs1, rs2, rs3, rm`.
    pub fn fnmsub_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fmadd_family("fnmsub.d", op::NMSUB, op::FMT_D, rd, rs1, rs2, rs3, rm)
    }
    /// `fnmadd.d rd, rs1, rs2, rs3, rm`.
    pub fn fnmadd_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fmadd_family("fnmadd.d", op::NMADD, op::FMT_D, rd, rs1, rs2, rs3, rm)
    }

    fn fp_binary_rm(&mut self, mnem: &'static str, funct5: u32, fmt: u32, rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        let ext = if fmt == op::FMT_D { Isa::D } else { Isa::F };
        Self::require(ext, mnem)?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), rm.encode(), rs1.to_u32(), rs2.to_u32(), (funct5 << 2) | fmt));
            mnemonic(b, || MnemonicBuilder::opcode(mnem).fp(rd).fp(rs1).fp(rs2).rounding(rm).finish());
            Ok(())
        })
    }

    /// `fadd.s rd, rs1, rs2, rm`.
    pub fn fadd_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fp_binary_rm("fadd.s", 0b00000, op::FMT_S, rd, rs1, rs2, rm)
    }
    /// `fsub.s rd, rs1, rs2, rm`.
    pub fn fsub_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fp_binary_rm("fsub.s", 0b00001, op::FMT_S, rd, rs1, rs2, rm)
    }
    /// `fmul.s rd, rs1, rs2, rm`.
    pub fn fmul_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fp_binary_rm("fmul.s", 0b00010, op::FMT_S, rd, rs1, rs2, rm)
    }
    /// `fdiv.s rd, rs1, rs2, rm`.
    pub fn fdiv_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fp_binary_rm("fdiv.s", 0b00011, op::FMT_S, rd, rs1, rs2, rm)
    }
    /// `fadd.d rd, rs1, rs2, rm`.
    pub fn fadd_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fp_binary_rm("fadd.d", 0b00000, op::FMT_D, rd, rs1, rs2, rm)
    }
    /// `fsub.d rd, rs1, rs2, rm`.
    pub fn fsub_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fp_binary_rm("fsub.d", 0b00001, op::FMT_D, rd, rs1, rs2, rm)
    }
    /// `fmul.d rd, rs1, rs2, rm`.
    pub fn fmul_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fp_binary_rm("fmul.d", 0b00010, op::FMT_D, rd, rs1, rs2, rm)
    }
    /// `fdiv.d rd, rs1, rs2, rm`.
    pub fn fdiv_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fp_binary_rm("fdiv.d", 0b00011, op::FMT_D, rd, rs1, rs2, rm)
    }

    fn fsqrt_family(&mut self, mnem: &'static str, fmt: u32, rd: FpReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        let ext = if fmt == op::FMT_D { Isa::D } else { Isa::F };
        Self::require(ext, mnem)?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), rm.encode(), rs1.to_u32(), 0, (0b01011 << 2) | fmt));
            mnemonic(b, || MnemonicBuilder::opcode(mnem).fp(rd).fp(rs1).rounding(rm).finish());
            Ok(())
        })
    }

    /// `fsqrt.s rd, rs1, rm`.
    pub fn fsqrt_s(&mut self, rd: FpReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fsqrt_family("fsqrt.s", op::FMT_S, rd, rs1, rm)
    }
    /// `fsqrt.d rd, rs1, rm`.
    pub fn fsqrt_d(&mut self, rd: FpReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fsqrt_family("fsqrt.d", op::FMT_D, rd, rs1, rm)
    }

    fn fsign_family(&mut self, mnem: &'static str, alt_mnem: &'static str, funct3: u32, fmt: u32, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        let ext = if fmt == op::FMT_D { Isa::D } else { Isa::F };
        Self::require(ext, mnem)?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), funct3, rs1.to_u32(), rs2.to_u32(), (0b00100 << 2) | fmt));
            if rs1 == rs2 {
                mnemonic(b, || MnemonicBuilder::opcode(alt_mnem).fp(rd).fp(rs1).finish());
            } else {
                mnemonic(b, || MnemonicBuilder::opcode(mnem).fp(rd).fp(rs1).fp(rs2).finish());
            }
            Ok(())
        })
    }

    /// `fsgnj.s rd, rs1, rs2`; disassembles as `fmv.s rd, rs1` when `rs1 == rs2`.
    pub fn fsgnj_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fsign_family("fsgnj.s", "fmv.s", 0b000, op::FMT_S, rd, rs1, rs2)
    }
    /// `fsgnjn.s rd, rs1, rs2`; disassembles as `fneg.s rd, rs1` when `rs1 == rs2`.
    pub fn fsgnjn_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fsign_family("fsgnjn.s", "fneg.s", 0b001, op::FMT_S, rd, rs1, rs2)
    }
    /// `fsgnjx.s rd, rs1, rs2`; disassembles as `fabs.s rd, rs1` when `rs1 == rs2`.
    pub fn fsgnjx_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fsign_family("fsgnjx.s", "fabs.s", 0b010, op::FMT_S, rd, rs1, rs2)
    }
    /// `fsgnj.d rd, rs1, rs2`; disassembles as `fmv.d rd, rs1` when `rs1 == rs2`.
    pub fn fsgnj_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fsign_family("fsgnj.d", "fmv.d", 0b000, op::FMT_D, rd, rs1, rs2)
    }
    /// `fsgnjn.d rd, rs1, rs2`; disassembles as `fneg.d rd, rs1` when `rs1 == rs2`.
    pub fn fsgnjn_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fsign_family("fsgnjn.d", "fneg.d", 0b001, op::FMT_D, rd, rs1, rs2)
    }
    /// `fsgnjx.d rd, rs1, rs2`; disassembles as `fabs.d rd, rs1` when `rs1 == rs2`.
    pub fn fsgnjx_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fsign_family("fsgnjx.d", "fabs.d", 0b010, op::FMT_D, rd, rs1, rs2)
    }

    fn fminmax(&mut self, mnem: &'static str, funct3: u32, fmt: u32, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        let ext = if fmt == op::FMT_D { Isa::D } else { Isa::F };
        Self::require(ext, mnem)?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), funct3, rs1.to_u32(), rs2.to_u32(), (0b00101 << 2) | fmt));
            mnemonic(b, || MnemonicBuilder::opcode(mnem).fp(rd).fp(rs1).fp(rs2).finish());
            Ok(())
        })
    }

    /// `fmin.s rd, rs1, rs2`.
    pub fn fmin_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fminmax("fmin.s", 0b000, op::FMT_S, rd, rs1, rs2)
    }
    /// `fmax.s rd, rs1, rs2`.
    pub fn fmax_s(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fminmax("fmax.s", 0b001, op::FMT_S, rd, rs1, rs2)
    }
    /// `fmin.d rd, rs1, rs2`.
    pub fn fmin_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fminmax("fmin.d", 0b000, op::FMT_D, rd, rs1, rs2)
    }
    /// `fmax.d rd, rs1, rs2`.
    pub fn fmax_d(&mut self, rd: FpReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fminmax("fmax.d", 0b001, op::FMT_D, rd, rs1, rs2)
    }

    fn fcompare(&mut self, mnem: &'static str, funct3: u32, fmt: u32, rd: IntReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        let ext = if fmt == op::FMT_D { Isa::D } else { Isa::F };
        Self::require(ext, mnem)?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), funct3, rs1.to_u32(), rs2.to_u32(), (0b10100 << 2) | fmt));
            mnemonic(b, || MnemonicBuilder::opcode(mnem).int(rd).fp(rs1).fp(rs2).finish());
            Ok(())
        })
    }

    /// `feq.s rd, rs1, rs2`.
    pub fn feq_s(&mut self, rd: IntReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fcompare("feq.s", 0b010, op::FMT_S, rd, rs1, rs2)
    }
    /// `flt.s rd, rs1, rs2`.
    pub fn flt_s(&mut self, rd: IntReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fcompare("flt.s", 0b001, op::FMT_S, rd, rs1, rs2)
    }
    /// `fle.s rd, rs1, rs2`.
    pub fn fle_s(&mut self, rd: IntReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fcompare("fle.s", 0b000, op::FMT_S, rd, rs1, rs2)
    }
    /// `feq.d rd, rs1, rs2`.
    pub fn feq_d(&mut self, rd: IntReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fcompare("feq.d", 0b010, op::FMT_D, rd, rs1, rs2)
    }
    /// `flt.d rd, rs1, rs2`.
    pub fn flt_d(&mut self, rd: IntReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fcompare("flt.d", 0b001, op::FMT_D, rd, rs1, rs2)
    }
    /// `fle.d rd, rs1, rs2`.
    pub fn fle_d(&mut self, rd: IntReg, rs1: FpReg, rs2: FpReg) -> Result<(), EmitError> {
        self.fcompare("fle.d", 0b000, op::FMT_D, rd, rs1, rs2)
    }

    fn fclass_family(&mut self, mnem: &'static str, fmt: u32, rd: IntReg, rs1: FpReg) -> Result<(), EmitError> {
        let ext = if fmt == op::FMT_D { Isa::D } else { Isa::F };
        Self::require(ext, mnem)?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), 0b001, rs1.to_u32(), 0, (0b11100 << 2) | fmt));
            mnemonic(b, || MnemonicBuilder::opcode(mnem).int(rd).fp(rs1).finish());
            Ok(())
        })
    }

    /// `fclass.s rd, rs1`.
    pub fn fclass_s(&mut self, rd: IntReg, rs1: FpReg) -> Result<(), EmitError> {
        self.fclass_family("fclass.s", op::FMT_S, rd, rs1)
    }
    /// `fclass.d rd, rs1`.
    pub fn fclass_d(&mut self, rd: IntReg, rs1: FpReg) -> Result<(), EmitError> {
        self.fclass_family("fclass.d", op::FMT_D, rd, rs1)
    }

    fn fcvt_to_int(&mut self, mnem: &'static str, rs2_sel: u32, fmt: u32, rd: IntReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        let ext = if fmt == op::FMT_D { Isa::D } else { Isa::F };
        Self::require(ext, mnem)?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), rm.encode(), rs1.to_u32(), rs2_sel, (0b11000 << 2) | fmt));
            mnemonic(b, || MnemonicBuilder::opcode(mnem).int(rd).fp(rs1).rounding(rm).finish());
            Ok(())
        })
    }

    /// `fcvt.w.s rd, rs1, rm`: convert to a signed 32-bit integer.
    pub fn fcvt_w_s(&mut self, rd: IntReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fcvt_to_int("fcvt.w.s", 0, op::FMT_S, rd, rs1, rm)
    }
    /// `fcvt.wu.s rd, rs1, rm`: convert to an unsigned 32-bit integer.
    pub fn fcvt_wu_s(&mut self, rd: IntReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fcvt_to_int("fcvt.wu.s", 1, op::FMT_S, rd, rs1, rm)
    }
    /// `fcvt.w.d rd, rs1, rm`.
    pub fn fcvt_w_d(&mut self, rd: IntReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fcvt_to_int("fcvt.w.d", 0, op::FMT_D, rd, rs1, rm)
    }
    /// `fcvt.wu.d rd, rs1, rm`.
    pub fn fcvt_wu_d(&mut self, rd: IntReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fcvt_to_int("fcvt.wu.d", 1, op::FMT_D, rd, rs1, rm)
    }

    fn fcvt_from_int(&mut self, mnem: &'static str, rs2_sel: u32, fmt: u32, rd: FpReg, rs1: IntReg, rm: RoundingMode) -> Result<(), EmitError> {
        let ext = if fmt == op::FMT_D { Isa::D } else { Isa::F };
        Self::require(ext, mnem)?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), rm.encode(), rs1.to_u32(), rs2_sel, (0b11010 << 2) | fmt));
            mnemonic(b, || MnemonicBuilder::opcode(mnem).fp(rd).int(rs1).rounding(rm).finish());
            Ok(())
        })
    }

    /// `fcvt.s.w rd, rs1, rm`: convert a signed 32-bit integer to single precision.
    pub fn fcvt_s_w(&mut self, rd: FpReg, rs1: IntReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fcvt_from_int("fcvt.s.w", 0, op::FMT_S, rd, rs1, rm)
    }
    /// `fcvt.s.wu rd, rs1, rm`: convert an unsigned 32-bit integer to single precision.
    pub fn fcvt_s_wu(&mut self, rd: FpReg, rs1: IntReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.fcvt_from_int("fcvt.s.wu", 1, op::FMT_S, rd, rs1, rm)
    }

    /// `fcvt.d.w rd, rs1`: exact, so no rounding mode.
    pub fn fcvt_d_w(&mut self, rd: FpReg, rs1: IntReg) -> Result<(), EmitError> {
        Self::require(Isa::D, "fcvt.d.w")?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), 0b000, rs1.to_u32(), 0, (0b11010 << 2) | op::FMT_D));
            mnemonic(b, || MnemonicBuilder::opcode("fcvt.d.w").fp(rd).int(rs1).finish());
            Ok(())
        })
    }
    /// `fcvt.d.wu rd, rs1`: exact, so no rounding mode.
    pub fn fcvt_d_wu(&mut self, rd: FpReg, rs1: IntReg) -> Result<(), EmitError> {
        Self::require(Isa::D, "fcvt.d.wu")?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), 0b000, rs1.to_u32(), 1, (0b11010 << 2) | op::FMT_D));
            mnemonic(b, || MnemonicBuilder::opcode("fcvt.d.wu").fp(rd).int(rs1).finish());
            Ok(())
        })
    }

    /// `fcvt.s.d rd, rs1, rm`: narrowing, so a rounding mode applies.
    pub fn fcvt_s_d(&mut self, rd: FpReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        Self::require(Isa::D, "fcvt.s.d")?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), rm.encode(), rs1.to_u32(), 1, (0b01000 << 2) | op::FMT_S));
            mnemonic(b, || MnemonicBuilder::opcode("fcvt.s.d").fp(rd).fp(rs1).rounding(rm).finish());
            Ok(())
        })
    }
    /// `fcvt.d.s rd, rs1`: widening, so it is exact and takes no rounding mode.
    pub fn fcvt_d_s(&mut self, rd: FpReg, rs1: FpReg) -> Result<(), EmitError> {
        Self::require(Isa::D, "fcvt.d.s")?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), 0b000, rs1.to_u32(), 0, (0b01000 << 2) | op::FMT_D));
            mnemonic(b, || MnemonicBuilder::opcode("fcvt.d.s").fp(rd).fp(rs1).finish());
            Ok(())
        })
    }

    /// `fmv.x.w rd, rs1`: reinterpret a single-precision bit pattern as an integer.
    pub fn fmv_x_w(&mut self, rd: IntReg, rs1: FpReg) -> Result<(), EmitError> {
        Self::require(Isa::F, "fmv.x.w")?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), 0b000, rs1.to_u32(), 0, (0b11100 << 2) | op::FMT_S));
            mnemonic(b, || MnemonicBuilder::opcode("fmv.x.w").int(rd).fp(rs1).finish());
            Ok(())
        })
    }
    /// `fmv.w.x rd, rs1`: reinterpret an integer bit pattern as single precision.
    pub fn fmv_w_x(&mut self, rd: FpReg, rs1: IntReg) -> Result<(), EmitError> {
        Self::require(Isa::F, "fmv.w.x")?;
        self.buffer_mut().push_deferred(move |b| {
            b.write_word(r_type(op::OP_FP, rd.to_u32(), 0b000, rs1.to_u32(), 0, (0b11110 << 2) | op::FMT_S));
            mnemonic(b, || MnemonicBuilder::opcode("fmv.w.x").fp(rd).int(rs1).finish());
            Ok(())
        })
    }
}

/// Emits `c.flw`/`c.flwsp` or `c.fsw`/`c.fswsp`, assuming the predicate has
/// already been checked. Shares its immediate packing with the integer
/// `c.lw`/`c.sw` family (word-sized, 4-byte aligned).
fn emit_flw_fsw(b: &mut crate::buffer::CodeBuffer, rd_or_rs2: FpReg, rs1: IntReg, imm: i32, is_load: bool) {
    let u = imm as u32;
    if rs1 == IntReg::SP {
        if is_load {
            b.write_hword(ci_lwsp(FUNCT3_FPD, rd_or_rs2.to_u32(), u));
        } else {
            let imm6 = ((u >> 2) & 0xF) << 2 | ((u >> 6) & 0x3);
            b.write_hword(css(0b111, imm6, rd_or_rs2.to_u32()));
        }
    } else {
        let rs1c = rs1.compressed_index().expect("checked compressible") as u32;
        let imm_hi3 = (u >> 3) & 0x7;
        let imm_lo2 = ((u >> 2) & 1) << 1 | (u >> 6) & 1;
        let rc = rd_or_rs2.compressed_index().expect("checked compressible") as u32;
        let funct3 = if is_load { 0b011 } else { 0b111 };
        b.write_hword(cl(funct3, imm_hi3, rs1c, imm_lo2, rc));
    }
}

/// Emits `c.fld`/`c.fldsp` or `c.fsd`/`c.fsdsp`. Double-width, 8-byte
/// aligned, with its own (non-interleaved) immediate packing distinct from
/// the word-sized family above.
fn emit_fld_fsd(b: &mut crate::buffer::CodeBuffer, rd_or_rs2: FpReg, rs1: IntReg, imm: i32, is_load: bool) {
    let u = imm as u32;
    if rs1 == IntReg::SP {
        if is_load {
            b.write_hword(ci_fldsp(0b001, rd_or_rs2.to_u32(), u));
        } else {
            let imm6 = ((u >> 3) & 0x7) << 3 | ((u >> 6) & 0x7);
            b.write_hword(css(0b101, imm6, rd_or_rs2.to_u32()));
        }
    } else {
        let rs1c = rs1.compressed_index().expect("checked compressible") as u32;
        let imm_hi3 = (u >> 3) & 0x7;
        let imm_lo2 = (u >> 6) & 0x3;
        let rc = rd_or_rs2.compressed_index().expect("checked compressible") as u32;
        let funct3 = if is_load { 0b001 } else { 0b101 };
        b.write_hword(cl(funct3, imm_hi3, rs1c, imm_lo2, rc));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::Rv32Gc;

    #[test]
    fn fadd_s_round_trips_through_the_mnemonic() {
        let mut e = Rv32Gc::new(64);
        e.fadd_s(FpReg::FA0, FpReg::FA1, FpReg::FA2, RoundingMode::Dyn).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "fadd.s fa0,fa1,fa2");
    }

    #[test]
    fn fmadd_s_prints_an_explicit_rounding_mode() {
        let mut e = Rv32Gc::new(64);
        e.fmadd_s(FpReg::FA0, FpReg::FA1, FpReg::FA2, FpReg::FA3, RoundingMode::Rtz).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "fmadd.s fa0,fa1,fa2,fa3,rtz");
    }

    #[test]
    fn fsgnj_s_collapses_to_fmv_when_operands_match() {
        let mut e = Rv32Gc::new(64);
        e.fsgnj_s(FpReg::FA0, FpReg::FA1, FpReg::FA1).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "fmv.s fa0,fa1");
    }

    #[test]
    fn fsgnj_s_keeps_its_own_name_when_operands_differ() {
        let mut e = Rv32Gc::new(64);
        e.fsgnj_s(FpReg::FA0, FpReg::FA1, FpReg::FA2).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "fsgnj.s fa0,fa1,fa2");
    }

    #[test]
    fn flw_requires_f_extension() {
        let mut e = crate::emitter::Emitter::<{ Isa::RV32.0 | Isa::I.0 }>::new(64);
        assert!(e.flw(FpReg::FA0, IntReg::SP, 0).is_err());
    }

    #[test]
    fn fld_requires_d_extension() {
        let mut e = crate::emitter::Emitter::<{ Isa::RV32.0 | Isa::I.0 | Isa::F.0 }>::new(64);
        assert!(e.fld(FpReg::FA0, IntReg::SP, 0).is_err());
    }

    #[test]
    fn fcvt_w_s_rounds_toward_zero() {
        let mut e = Rv32Gc::new(64);
        e.fcvt_w_s(IntReg::A0, FpReg::FA0, RoundingMode::Rtz).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "fcvt.w.s a0,fa0,rtz");
    }

    #[test]
    fn fcvt_d_w_has_no_rounding_mode_operand() {
        let mut e = Rv32Gc::new(64);
        e.fcvt_d_w(FpReg::FA0, IntReg::A0).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "fcvt.d.w fa0,a0");
    }

    #[test]
    fn fsw_compresses_the_sp_relative_form() {
        let mut e = Rv32Gc::new(64);
        e.fsw(IntReg::SP, FpReg::FA0, 4).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "fsw fa0,4(sp)");
        assert_eq!(e.buffer().last_insn_width(), 2);
    }
}
