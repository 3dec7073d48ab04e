//! Bit-exact encoding checks against the RISC-V manual's own tables.
//!
//! Each test builds a single instruction and compares the committed bytes
//! against a literal computed by hand from the manual's field layout, not
//! against a second implementation of the encoder. Standard-form tests
//! target [`Rv32G`] (no `C`) so a predicate bug in the compressed catalogue
//! can't accidentally make a 32-bit-form test pass; compressed-form tests
//! target [`Rv32Gc`] explicitly and check the half-word width.

mod support;

use riscv_emit::{
    emitter::{Rv32G, Rv32Gc},
    registers::{FpReg, IntReg},
    rounding::RoundingMode,
};
use support::{emit, w16, w32};

#[test]
fn addi_a0_zero_5_matches_the_manuals_i_type_layout() {
    // imm=5 << 20 | rs1=0 << 15 | funct3=000 << 12 | rd=a0(10) << 7 | opcode=0010011
    let bytes = emit::<Rv32G>(64, 4, |e| {
        e.addi(IntReg::A0, IntReg::ZERO, 5).unwrap();
    });
    assert_eq!(bytes, w32(0x0050_0513));
}

#[test]
fn addi_a0_zero_5_compresses_to_c_li() {
    let bytes = emit::<Rv32Gc>(64, 2, |e| {
        e.addi(IntReg::A0, IntReg::ZERO, 5).unwrap();
    });
    assert_eq!(bytes, w16(0x4515));
}

#[test]
fn lui_encodes_the_u_type_layout() {
    // imm20=0x12345 << 12 | rd=a0(10) << 7 | opcode=0110111, target without C
    let bytes = emit::<Rv32G>(64, 4, |e| {
        e.lui(IntReg::A0, 0x1_2345).unwrap();
    });
    assert_eq!(bytes, w32((0x1_2345 << 12) | (10 << 7) | 0b0110111));
}

#[test]
fn jal_ra_encodes_the_j_type_bit_shuffle() {
    let bytes = emit::<Rv32G>(256, 4, |e| {
        e.jal(IntReg::RA, "end").unwrap();
        e.place_label("end");
    });
    // off = 0 at the placement site relative to its own PC (forward, zero distance).
    assert_eq!(bytes, w32((1 << 7) | 0b1101111));
}

#[test]
fn beq_encodes_the_b_type_bit_shuffle() {
    let bytes = emit::<Rv32G>(256, 4, |e| {
        e.beq(IntReg::A0, IntReg::A1, "end").unwrap();
        e.place_label("end");
    });
    assert_eq!(bytes, w32((10 << 15) | (11 << 20) | 0b1100011));
}

#[test]
fn add_encodes_the_r_type_layout() {
    let bytes = emit::<Rv32G>(64, 4, |e| {
        e.add(IntReg::A0, IntReg::A1, IntReg::A2).unwrap();
    });
    assert_eq!(bytes, w32((12 << 20) | (11 << 15) | (10 << 7) | 0b0110011));
}

#[test]
fn sub_sets_funct7_bit30() {
    let bytes = emit::<Rv32G>(64, 4, |e| {
        e.sub(IntReg::A0, IntReg::A1, IntReg::A2).unwrap();
    });
    assert_eq!(bytes, w32((0b0100000 << 25) | (12 << 20) | (11 << 15) | (10 << 7) | 0b0110011));
}

#[test]
fn sw_encodes_the_s_type_split_immediate() {
    // imm=-4: low5=0b11100, hi7=0b1111111
    let bytes = emit::<Rv32G>(64, 4, |e| {
        e.sw(IntReg::SP, IntReg::A0, -4).unwrap();
    });
    let imm = (-4i32) as u32 & 0xFFF;
    let word = ((imm >> 5) << 25) | (10 << 20) | (2 << 15) | (0b010 << 12) | ((imm & 0x1F) << 7) | 0b0100011;
    assert_eq!(bytes, w32(word));
}

#[test]
fn mul_sets_the_muldiv_funct7() {
    let bytes = emit::<Rv32G>(64, 4, |e| {
        e.mul(IntReg::A0, IntReg::A1, IntReg::A2).unwrap();
    });
    assert_eq!(bytes, w32((0b0000001 << 25) | (12 << 20) | (11 << 15) | (10 << 7) | 0b0110011));
}

#[test]
fn amoadd_w_encodes_funct5_and_aq_rl_bits() {
    let bytes = emit::<Rv32G>(64, 4, |e| {
        e.amoadd_w(IntReg::A0, IntReg::A1, IntReg::A2.offset(0), true, true).unwrap();
    });
    let word = (0b00000 << 27) | (1 << 26) | (1 << 25) | (11 << 20) | (12 << 15) | (0b010 << 12) | (10 << 7) | 0b0101111;
    assert_eq!(bytes, w32(word));
}

#[test]
fn fmadd_s_with_default_rounding_matches_spec_scenario_6() {
    // opcode low 7 bits 1000011, funct3 (rm)=111 (dyn), rs3=fa3's index in bits 31:27.
    let bytes = emit::<Rv32Gc>(64, 4, |e| {
        e.fmadd_s(FpReg::FA0, FpReg::FA1, FpReg::FA2, FpReg::FA3, RoundingMode::Dyn).unwrap();
    });
    let word = (13u32 << 27) | (0b00 << 25) | (12 << 20) | (11 << 15) | (0b111 << 12) | (10 << 7) | 0b1000011;
    assert_eq!(bytes, w32(word));

    let mut e = Rv32Gc::new(64);
    e.fmadd_s(FpReg::FA0, FpReg::FA1, FpReg::FA2, FpReg::FA3, RoundingMode::Dyn).unwrap();
    e.run_generation().unwrap();
    assert_eq!(e.buffer().disassembly()[0], "fmadd.s fa0,fa1,fa2,fa3");
}

#[test]
fn feq_s_uses_the_op_fp_opcode_and_compare_funct5() {
    let bytes = emit::<Rv32Gc>(64, 4, |e| {
        e.feq_s(IntReg::A0, FpReg::FA1, FpReg::FA2).unwrap();
    });
    let word = (0b10100_00u32 << 25) | (12 << 20) | (11 << 15) | (0b010 << 12) | (10 << 7) | 0b1010011;
    assert_eq!(bytes, w32(word));
}

#[test]
fn lr_w_leaves_rs2_field_zero() {
    let bytes = emit::<Rv32G>(64, 4, |e| {
        e.lr_w(IntReg::A0, IntReg::A1.offset(0), false, false).unwrap();
    });
    let word = (0b00010 << 27) | (11 << 15) | (0b010 << 12) | (10 << 7) | 0b0101111;
    assert_eq!(bytes, w32(word));
}

#[test]
fn far_label_suppresses_c_beqz_across_an_800_byte_forward_distance() {
    // Spec scenario 4: a forward branch 800 bytes ahead exceeds c.beqz's
    // +-256-byte (signed 9-bit) range. Marking the label far forces the
    // standard 32-bit form in both passes instead of letting pass 1 guess.
    let mut e = Rv32Gc::new(2048);
    e.beq(IntReg::A0, IntReg::ZERO, riscv_emit::label::Label::named("l").far()).unwrap();
    // Each `nop` compresses to a 2-byte `c.nop`; 398 of them plus the 4-byte
    // branch puts the label exactly 800 bytes past the branch's own PC.
    for _ in 0..398 {
        e.nop().unwrap();
    }
    e.place_label("l");
    let ptr = e.run_generation().unwrap();
    let bytes = unsafe { std::slice::from_raw_parts(ptr, 4) };
    let off = 800i32;
    let word = (((off >> 12) & 1) << 31)
        | (((off >> 5) & 0x3F) << 25)
        | (0 << 20)
        | (10 << 15)
        | (0b000 << 12)
        | ((((off >> 1) & 0xF) as u32) << 8)
        | ((((off >> 11) & 1) as u32) << 7)
        | 0b1100011;
    assert_eq!(bytes, w32(word));
}

#[test]
fn brainfuck_style_inner_loop_selects_both_c_beqz_and_c_j() {
    // Spec scenario 5: a short loop body (10 bytes) keeps both the forward
    // branch-out and the backward jump-back within compressed range.
    let mut e = Rv32Gc::new(64);
    e.place_label("b");
    e.lbu(IntReg::A0, IntReg::S1, 0).unwrap();
    e.beqz(IntReg::A0, "e").unwrap();
    e.addi(IntReg::A0, IntReg::A0, 1).unwrap();
    e.sb(IntReg::S1, IntReg::A0, 0).unwrap();
    e.j("b").unwrap();
    e.place_label("e");
    e.run_generation().unwrap();
    // lbu never compresses (C has no c.lbu); beqz picks c.beqz; j picks c.j.
    assert_eq!(e.buffer().disassembly().len(), 5);
}
