//! Shared helper for the integration suites: runs generation and reads back
//! the raw bytes actually committed, without assuming anything about how
//! many the caller allocated.

use riscv_emit::emitter::Emitter;

/// Bridges a concrete `Emitter<ISA>` alias (e.g. [`riscv_emit::emitter::Rv32G`])
/// to a plain type parameter, so test helpers don't need to name the
/// `Isa` bitmap's private bit pattern themselves.
pub trait TestTarget {
    fn new_sized(size: usize) -> Self;
    fn run(&mut self) -> Result<*const u8, riscv_emit::error::EmitError>;
}

impl<const ISA: u16> TestTarget for Emitter<ISA> {
    fn new_sized(size: usize) -> Self {
        Self::new(size)
    }
    fn run(&mut self) -> Result<*const u8, riscv_emit::error::EmitError> {
        self.run_generation()
    }
}

/// Runs `build` against a fresh `size`-byte emitter of target `E`, then
/// returns the first `len` committed bytes.
pub fn emit<E: TestTarget>(size: usize, len: usize, build: impl FnOnce(&mut E)) -> Vec<u8> {
    let mut e = E::new_sized(size);
    build(&mut e);
    let ptr = e.run().unwrap();
    unsafe { std::slice::from_raw_parts(ptr, len) }.to_vec()
}

/// Little-endian helper: packs a 32-bit word as four bytes.
pub fn w32(word: u32) -> Vec<u8> {
    word.to_le_bytes().to_vec()
}

/// Little-endian helper: packs a 16-bit half-word as two bytes.
pub fn w16(hword: u16) -> Vec<u8> {
    hword.to_le_bytes().to_vec()
}
