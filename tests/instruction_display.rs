//! Disassembly-text checks: every encoder call should leave behind exactly
//! the mnemonic a human assembler-reader would expect, accumulated lazily
//! into [`riscv_emit::buffer::CodeBuffer::disassembly`] only once pass 2 runs.

use riscv_emit::{
    emitter::{Emitter, Rv32Gc, Rv32Ic},
    isa::Isa,
    registers::{FpReg, IntReg},
    rounding::RoundingMode,
};

fn disasm<const ISA: u16>(build: impl FnOnce(&mut Emitter<ISA>)) -> Vec<String> {
    let mut e = Emitter::<ISA>::new(64);
    build(&mut e);
    e.run_generation().unwrap();
    e.buffer().disassembly().to_vec()
}

#[test]
fn standard_form_integer_ops_render_with_abi_names() {
    let lines = disasm::<{ Isa::RV32G.0 }>(|e| {
        e.add(IntReg::A0, IntReg::A1, IntReg::A2).unwrap();
        e.sub(IntReg::A0, IntReg::A1, IntReg::A2).unwrap();
        e.slli(IntReg::A0, IntReg::A1, 3).unwrap();
    });
    assert_eq!(lines, vec!["add a0,a1,a2", "sub a0,a1,a2", "slli a0,a1,3"]);
}

#[test]
fn loads_and_stores_print_offset_paren_reg() {
    let lines = disasm::<{ Isa::RV32G.0 }>(|e| {
        e.lw(IntReg::A0, IntReg::SP, 8).unwrap();
        e.sw(IntReg::SP, IntReg::A0, -4).unwrap();
    });
    assert_eq!(lines, vec!["lw a0,8(sp)", "sw a0,-4(sp)"]);
}

#[test]
fn disassembly_is_unaffected_by_whether_a_form_compressed() {
    // c.addi picks the same mnemonic text as the standard form; only the
    // wire bytes differ between the two targets.
    let standard = disasm::<{ Isa::RV32G.0 }>(|e| {
        e.addi(IntReg::A0, IntReg::SP, 16).unwrap();
    });
    let compressed = disasm::<{ Isa::RV32GC.0 }>(|e| {
        e.addi(IntReg::A0, IntReg::SP, 16).unwrap();
    });
    assert_eq!(standard, compressed);
    assert_eq!(standard, vec!["addi a0,sp,16"]);
}

#[test]
fn pseudo_instructions_disassemble_as_the_real_instruction_they_expand_to() {
    let lines = disasm::<{ Isa::RV32G.0 }>(|e| {
        e.nop().unwrap();
        e.mv(IntReg::A0, IntReg::A1).unwrap();
        e.not(IntReg::A0, IntReg::A1).unwrap();
        e.neg(IntReg::A0, IntReg::A1).unwrap();
        e.seqz(IntReg::A0, IntReg::A1).unwrap();
        e.ret().unwrap();
    });
    assert_eq!(
        lines,
        vec![
            "addi zero,zero,0",
            "add a0,zero,a1",
            "xori a0,a1,-1",
            "sub a0,zero,a1",
            "sltiu a0,a1,1",
            "jalr zero,ra",
        ]
    );
}

#[test]
fn branch_pseudo_instructions_disassemble_through_their_real_form() {
    let lines = disasm::<{ Isa::RV32G.0 }>(|e| {
        e.beqz(IntReg::A0, "l").unwrap();
        e.bgt(IntReg::A0, IntReg::A1, "l").unwrap();
        e.place_label("l");
    });
    assert_eq!(lines, vec!["beq a0,zero,<l>", "blt a1,a0,<l>"]);
}

#[test]
fn call_and_tail_disassemble_as_an_auipc_jalr_or_jr_pair() {
    let lines = disasm::<{ Isa::RV32G.0 }>(|e| {
        e.call("f").unwrap();
        e.tail("g").unwrap();
        e.place_label("f");
        e.place_label("g");
    });
    assert_eq!(lines[0], "auipc ra,0x0");
    assert!(lines[1].starts_with("jalr "));
    assert_eq!(lines[2], "auipc t1,0x0");
    assert!(lines[3].starts_with("jr "));
}

#[test]
fn li_splits_into_a_lui_addi_pair_with_the_rebalanced_low_immediate() {
    let lines = disasm::<{ Isa::RV32G.0 }>(|e| {
        e.li(IntReg::A0, 0x1234_5678).unwrap();
    });
    assert_eq!(lines, vec!["lui a0,0x12345", "addi a0,a0,1656"]);
}

#[test]
fn fp_arithmetic_suppresses_the_default_dynamic_rounding_mode() {
    let lines = disasm::<{ Isa::RV32GC.0 }>(|e| {
        e.fadd_s(FpReg::FA0, FpReg::FA1, FpReg::FA2, RoundingMode::Dyn).unwrap();
        e.fadd_s(FpReg::FA0, FpReg::FA1, FpReg::FA2, RoundingMode::Rtz).unwrap();
    });
    assert_eq!(lines, vec!["fadd.s fa0,fa1,fa2", "fadd.s fa0,fa1,fa2,rtz"]);
}

#[test]
fn fsgnj_with_matching_operands_collapses_to_fmv_like_fmv_s_itself() {
    // fmv.s is itself `fsgnj.s rd, rs, rs`; calling either one with the same
    // two operands must disassemble identically, since the encoded word is.
    let lines = disasm::<{ Isa::RV32GC.0 }>(|e| {
        e.fsgnj_s(FpReg::FA0, FpReg::FA1, FpReg::FA1).unwrap();
        e.fmv_s(FpReg::FA0, FpReg::FA1).unwrap();
    });
    assert_eq!(lines, vec!["fmv.s fa0,fa1", "fmv.s fa0,fa1"]);
}

#[test]
fn atomic_memory_operand_prints_as_bare_parens() {
    let lines = disasm::<{ Isa::RV32G.0 }>(|e| {
        e.lr_w(IntReg::A0, IntReg::A1.offset(0), false, false).unwrap();
        e.amoadd_w(IntReg::A0, IntReg::A2, IntReg::A1.offset(0), false, false).unwrap();
    });
    assert_eq!(lines, vec!["lr.w a0,(a1)", "amoadd.w a0,a2,(a1)"]);
}

#[test]
fn dotted_mnemonic_dispatchers_emit_the_expected_real_instruction() {
    let mut e = Rv32Gc::new(64);
    e.fmul().s(FpReg::FA0, FpReg::FA1, FpReg::FA2, RoundingMode::Dyn).unwrap();
    e.fcvt().w().s(IntReg::A0, FpReg::FA1, RoundingMode::Dyn).unwrap();
    e.run_generation().unwrap();
    assert_eq!(e.buffer().disassembly(), &["fmul.s fa0,fa1,fa2", "fcvt.w.s a0,fa1"]);
}

#[test]
fn unsupported_instruction_on_a_narrower_target_is_a_recoverable_error() {
    let mut e = Rv32Ic::new(64);
    let err = e.fadd_s(FpReg::FA0, FpReg::FA1, FpReg::FA2, RoundingMode::Dyn).unwrap_err();
    assert_eq!(err.to_string(), "unsupported instruction: `fadd.s` is not available on this target");
}
