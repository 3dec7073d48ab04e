//! Dotted-mnemonic accessors: `e.amoadd().w(...)`, `e.fmul().s(...)`,
//! `e.fcvt().w().s(...)`. RISC-V spells these mnemonics with embedded dots
//! (`amoadd.w`, `fcvt.w.s`), which Rust identifiers can't carry directly;
//! each group below is a zero-sized handle back to the [`Emitter`] that
//! turns a chain of method calls into the underlying `amoadd_w`/`fcvt_w_s`
//! encoder, so call sites can read exactly like the manual's own notation.

use super::Emitter;
use crate::{
    error::EmitError,
    registers::{FpReg, IntOffsetReg, IntReg},
    rounding::RoundingMode,
};

macro_rules! sd_group {
    ($group:ident, $accessor:ident, $s_method:ident, $d_method:ident, ($($arg:ident : $ty:ty),*)) => {
        #[doc = concat!("The `", stringify!($accessor), "` dotted group: `.s(...)` / `.d(...)`.")]
        pub struct $group<'e, const ISA: u16> {
            e: &'e mut Emitter<ISA>,
        }

        impl<const ISA: u16> Emitter<ISA> {
            #[doc = concat!("`", stringify!($accessor), ".s`/`", stringify!($accessor), ".d` dispatch: `.s(...)`/`.d(...)`.")]
            pub fn $accessor(&mut self) -> $group<'_, ISA> {
                $group { e: self }
            }
        }

        impl<const ISA: u16> $group<'_, ISA> {
            /// The single-precision (`.s`) form.
            pub fn s(&mut self, $($arg: $ty),*) -> Result<(), EmitError> {
                self.e.$s_method($($arg),*)
            }
            /// The double-precision (`.d`) form.
            pub fn d(&mut self, $($arg: $ty),*) -> Result<(), EmitError> {
                self.e.$d_method($($arg),*)
            }
        }
    };
}

macro_rules! w_group {
    ($group:ident, $accessor:ident, $w_method:ident, ($($arg:ident : $ty:ty),*)) => {
        #[doc = concat!("The `", stringify!($accessor), "` dotted group: `.w(...)`.")]
        pub struct $group<'e, const ISA: u16> {
            e: &'e mut Emitter<ISA>,
        }

        impl<const ISA: u16> Emitter<ISA> {
            #[doc = concat!("`", stringify!($accessor), ".w` dispatch: `.w(...)`.")]
            pub fn $accessor(&mut self) -> $group<'_, ISA> {
                $group { e: self }
            }
        }

        impl<const ISA: u16> $group<'_, ISA> {
            /// The only (word, `.w`) form this atomic defines.
            pub fn w(&mut self, $($arg: $ty),*) -> Result<(), EmitError> {
                self.e.$w_method($($arg),*)
            }
        }
    };
}

// --- A extension -------------------------------------------------------

w_group!(LrGroup, lr, lr_w, (rd: IntReg, mem: IntOffsetReg, aq: bool, rl: bool));
w_group!(ScGroup, sc, sc_w, (rd: IntReg, rs2: IntReg, mem: IntOffsetReg, aq: bool, rl: bool));
w_group!(AmoswapGroup, amoswap, amoswap_w, (rd: IntReg, rs2: IntReg, mem: IntOffsetReg, aq: bool, rl: bool));
w_group!(AmoaddGroup, amoadd, amoadd_w, (rd: IntReg, rs2: IntReg, mem: IntOffsetReg, aq: bool, rl: bool));
w_group!(AmoxorGroup, amoxor, amoxor_w, (rd: IntReg, rs2: IntReg, mem: IntOffsetReg, aq: bool, rl: bool));
w_group!(AmoandGroup, amoand, amoand_w, (rd: IntReg, rs2: IntReg, mem: IntOffsetReg, aq: bool, rl: bool));
w_group!(AmoorGroup, amoor, amoor_w, (rd: IntReg, rs2: IntReg, mem: IntOffsetReg, aq: bool, rl: bool));
w_group!(AmominGroup, amomin, amomin_w, (rd: IntReg, rs2: IntReg, mem: IntOffsetReg, aq: bool, rl: bool));
w_group!(AmomaxGroup, amomax, amomax_w, (rd: IntReg, rs2: IntReg, mem: IntOffsetReg, aq: bool, rl: bool));
w_group!(AmominuGroup, amominu, amominu_w, (rd: IntReg, rs2: IntReg, mem: IntOffsetReg, aq: bool, rl: bool));
w_group!(AmomaxuGroup, amomaxu, amomaxu_w, (rd: IntReg, rs2: IntReg, mem: IntOffsetReg, aq: bool, rl: bool));

// --- F/D extensions ------------------------------------------------------

sd_group!(FaddGroup, fadd, fadd_s, fadd_d, (rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode));
sd_group!(FsubGroup, fsub, fsub_s, fsub_d, (rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode));
sd_group!(FmulGroup, fmul, fmul_s, fmul_d, (rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode));
sd_group!(FdivGroup, fdiv, fdiv_s, fdiv_d, (rd: FpReg, rs1: FpReg, rs2: FpReg, rm: RoundingMode));

sd_group!(FmaddGroup, fmadd, fmadd_s, fmadd_d, (rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode));
sd_group!(FmsubGroup, fmsub, fmsub_s, fmsub_d, (rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode));
sd_group!(FnmsubGroup, fnmsub, fnmsub_s, fnmsub_d, (rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode));
sd_group!(FnmaddGroup, fnmadd, fnmadd_s, fnmadd_d, (rd: FpReg, rs1: FpReg, rs2: FpReg, rs3: FpReg, rm: RoundingMode));

sd_group!(FsqrtGroup, fsqrt, fsqrt_s, fsqrt_d, (rd: FpReg, rs1: FpReg, rm: RoundingMode));

sd_group!(FsgnjGroup, fsgnj, fsgnj_s, fsgnj_d, (rd: FpReg, rs1: FpReg, rs2: FpReg));
sd_group!(FsgnjnGroup, fsgnjn, fsgnjn_s, fsgnjn_d, (rd: FpReg, rs1: FpReg, rs2: FpReg));
sd_group!(FsgnjxGroup, fsgnjx, fsgnjx_s, fsgnjx_d, (rd: FpReg, rs1: FpReg, rs2: FpReg));

sd_group!(FminGroup, fmin, fmin_s, fmin_d, (rd: FpReg, rs1: FpReg, rs2: FpReg));
sd_group!(FmaxGroup, fmax, fmax_s, fmax_d, (rd: FpReg, rs1: FpReg, rs2: FpReg));

sd_group!(FeqGroup, feq, feq_s, feq_d, (rd: IntReg, rs1: FpReg, rs2: FpReg));
sd_group!(FltGroup, flt, flt_s, flt_d, (rd: IntReg, rs1: FpReg, rs2: FpReg));
sd_group!(FleGroup, fle, fle_s, fle_d, (rd: IntReg, rs1: FpReg, rs2: FpReg));

sd_group!(FclassGroup, fclass, fclass_s, fclass_d, (rd: IntReg, rs1: FpReg));

sd_group!(FabsGroup, fabs, fabs_s, fabs_d, (rd: FpReg, rs: FpReg));
sd_group!(FnegGroup, fneg, fneg_s, fneg_d, (rd: FpReg, rs: FpReg));

// --- fcvt: two dotted components, e.g. `fcvt.w.s` ------------------------

/// The `fcvt` dotted group: `.w()`, `.wu()`, `.s()`, `.d()`, each a further
/// sub-group naming the source format.
pub struct FcvtGroup<'e, const ISA: u16> {
    e: &'e mut Emitter<ISA>,
}

impl<const ISA: u16> Emitter<ISA> {
    /// `fcvt.{w,wu,s,d}.{w,wu,s,d}` dispatch.
    pub fn fcvt(&mut self) -> FcvtGroup<'_, ISA> {
        FcvtGroup { e: self }
    }
}

impl<const ISA: u16> FcvtGroup<'_, ISA> {
    /// `fcvt.w.*`: convert to a signed 32-bit integer.
    pub fn w(&mut self) -> FcvtWGroup<'_, ISA> {
        FcvtWGroup { e: self.e }
    }
    /// `fcvt.wu.*`: convert to an unsigned 32-bit integer.
    pub fn wu(&mut self) -> FcvtWuGroup<'_, ISA> {
        FcvtWuGroup { e: self.e }
    }
    /// `fcvt.s.*`: convert to single precision.
    pub fn s(&mut self) -> FcvtSGroup<'_, ISA> {
        FcvtSGroup { e: self.e }
    }
    /// `fcvt.d.*`: convert to double precision.
    pub fn d(&mut self) -> FcvtDGroup<'_, ISA> {
        FcvtDGroup { e: self.e }
    }
}

/// `fcvt.w.{s,d}`.
pub struct FcvtWGroup<'e, const ISA: u16> {
    e: &'e mut Emitter<ISA>,
}
impl<const ISA: u16> FcvtWGroup<'_, ISA> {
    /// `fcvt.w.s rd, rs1, rm`.
    pub fn s(&mut self, rd: IntReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.e.fcvt_w_s(rd, rs1, rm)
    }
    /// `fcvt.w.d rd, rs1, rm`.
    pub fn d(&mut self, rd: IntReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.e.fcvt_w_d(rd, rs1, rm)
    }
}

/// `fcvt.wu.{s,d}`.
pub struct FcvtWuGroup<'e, const ISA: u16> {
    e: &'e mut Emitter<ISA>,
}
impl<const ISA: u16> FcvtWuGroup<'_, ISA> {
    /// `fcvt.wu.s rd, rs1, rm`.
    pub fn s(&mut self, rd: IntReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.e.fcvt_wu_s(rd, rs1, rm)
    }
    /// `fcvt.wu.d rd, rs1, rm`.
    pub fn d(&mut self, rd: IntReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.e.fcvt_wu_d(rd, rs1, rm)
    }
}

/// `fcvt.s.{w,wu,d}`.
pub struct FcvtSGroup<'e, const ISA: u16> {
    e: &'e mut Emitter<ISA>,
}
impl<const ISA: u16> FcvtSGroup<'_, ISA> {
    /// `fcvt.s.w rd, rs1, rm`.
    pub fn w(&mut self, rd: FpReg, rs1: IntReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.e.fcvt_s_w(rd, rs1, rm)
    }
    /// `fcvt.s.wu rd, rs1, rm`.
    pub fn wu(&mut self, rd: FpReg, rs1: IntReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.e.fcvt_s_wu(rd, rs1, rm)
    }
    /// `fcvt.s.d rd, rs1, rm`: narrowing, takes a rounding mode.
    pub fn d(&mut self, rd: FpReg, rs1: FpReg, rm: RoundingMode) -> Result<(), EmitError> {
        self.e.fcvt_s_d(rd, rs1, rm)
    }
}

/// `fcvt.d.{w,wu,s}`.
pub struct FcvtDGroup<'e, const ISA: u16> {
    e: &'e mut Emitter<ISA>,
}
impl<const ISA: u16> FcvtDGroup<'_, ISA> {
    /// `fcvt.d.w rd, rs1`: exact, no rounding mode.
    pub fn w(&mut self, rd: FpReg, rs1: IntReg) -> Result<(), EmitError> {
        self.e.fcvt_d_w(rd, rs1)
    }
    /// `fcvt.d.wu rd, rs1`: exact, no rounding mode.
    pub fn wu(&mut self, rd: FpReg, rs1: IntReg) -> Result<(), EmitError> {
        self.e.fcvt_d_wu(rd, rs1)
    }
    /// `fcvt.d.s rd, rs1`: widening, exact, no rounding mode.
    pub fn s(&mut self, rd: FpReg, rs1: FpReg) -> Result<(), EmitError> {
        self.e.fcvt_d_s(rd, rs1)
    }
}

// --- fmv: `fmv.s`/`fmv.d` (pseudo copy) and `fmv.x.w`/`fmv.w.x` (bit cast) -

/// The `fmv` dotted group: `.s(...)`/`.d(...)` (copy) and `.x()`/`.w()`
/// (bit-cast to/from an integer register).
pub struct FmvGroup<'e, const ISA: u16> {
    e: &'e mut Emitter<ISA>,
}

impl<const ISA: u16> Emitter<ISA> {
    /// `fmv.{s,d}` / `fmv.x.w` / `fmv.w.x` dispatch.
    pub fn fmv(&mut self) -> FmvGroup<'_, ISA> {
        FmvGroup { e: self }
    }
}

impl<const ISA: u16> FmvGroup<'_, ISA> {
    /// `fmv.s rd, rs`: copies a single-precision register.
    pub fn s(&mut self, rd: FpReg, rs: FpReg) -> Result<(), EmitError> {
        self.e.fmv_s(rd, rs)
    }
    /// `fmv.d rd, rs`: copies a double-precision register.
    pub fn d(&mut self, rd: FpReg, rs: FpReg) -> Result<(), EmitError> {
        self.e.fmv_d(rd, rs)
    }
    /// `fmv.x.*`: bit-cast a floating-point register into an integer one.
    pub fn x(&mut self) -> FmvXGroup<'_, ISA> {
        FmvXGroup { e: self.e }
    }
    /// `fmv.w.*`: bit-cast an integer register into a single-precision one.
    pub fn w(&mut self) -> FmvWGroup<'_, ISA> {
        FmvWGroup { e: self.e }
    }
}

/// `fmv.x.w`.
pub struct FmvXGroup<'e, const ISA: u16> {
    e: &'e mut Emitter<ISA>,
}
impl<const ISA: u16> FmvXGroup<'_, ISA> {
    /// `fmv.x.w rd, rs1`.
    pub fn w(&mut self, rd: IntReg, rs1: FpReg) -> Result<(), EmitError> {
        self.e.fmv_x_w(rd, rs1)
    }
}

/// `fmv.w.x`.
pub struct FmvWGroup<'e, const ISA: u16> {
    e: &'e mut Emitter<ISA>,
}
impl<const ISA: u16> FmvWGroup<'_, ISA> {
    /// `fmv.w.x rd, rs1`.
    pub fn x(&mut self, rd: FpReg, rs1: IntReg) -> Result<(), EmitError> {
        self.e.fmv_w_x(rd, rs1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::Rv32Gc;

    #[test]
    fn amoadd_dotted_matches_the_inherent_method() {
        let mut a = Rv32Gc::new(64);
        a.amoadd().w(IntReg::A0, IntReg::A1, IntReg::A2.offset(0), false, false).unwrap();
        a.run_generation().unwrap();

        let mut b = Rv32Gc::new(64);
        b.amoadd_w(IntReg::A0, IntReg::A1, IntReg::A2.offset(0), false, false).unwrap();
        b.run_generation().unwrap();

        assert_eq!(a.buffer().disassembly(), b.buffer().disassembly());
    }

    #[test]
    fn fmul_dotted_s_matches_the_inherent_method() {
        let mut e = Rv32Gc::new(64);
        e.fmul().s(FpReg::FA0, FpReg::FA1, FpReg::FA2, RoundingMode::Dyn).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "fmul.s fa0,fa1,fa2");
    }

    #[test]
    fn fcvt_w_s_dotted_chains_two_components() {
        let mut e = Rv32Gc::new(64);
        e.fcvt().w().s(IntReg::A0, FpReg::FA0, RoundingMode::Rtz).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "fcvt.w.s a0,fa0,rtz");
    }

    #[test]
    fn fmv_dotted_x_w_reinterprets_bits() {
        let mut e = Rv32Gc::new(64);
        e.fmv().x().w(IntReg::A0, FpReg::FA0).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "fmv.x.w a0,fa0");
    }

    #[test]
    fn fmv_dotted_s_copies_a_register() {
        let mut e = Rv32Gc::new(64);
        e.fmv().s(FpReg::FA0, FpReg::FA1).unwrap();
        e.run_generation().unwrap();
        assert_eq!(e.buffer().disassembly()[0], "fmv.s fa0,fa1");
    }
}
