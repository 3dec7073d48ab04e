//! Lazy mnemonic formatter: given a small format string describing operand
//! roles, accumulates the textual form of an instruction one directive at a
//! time, only while pass 2 is running.

use crate::{
    label::Label,
    registers::{FpReg, IntOffsetReg, IntReg},
    rounding::RoundingMode,
};

/// Accumulates an instruction's textual form directive by directive.
///
/// Built fresh for each instruction with the opcode name; operands are fed
/// in with [`MnemonicBuilder::int`], [`MnemonicBuilder::mem`], ... in the
/// order the encoding table lists them. A comma is inserted between
/// successive operands automatically, unless the accumulated text is empty
/// or already ends in a space (the state right after the opcode's trailing
/// space, or right after a `(`-prefixed memory operand).
#[derive(Debug, Clone, Default)]
pub(crate) struct MnemonicBuilder {
    text: String,
}

impl MnemonicBuilder {
    /// Starts a new mnemonic with the opcode name, followed by a space.
    pub(crate) fn opcode(name: &str) -> Self {
        let mut text = String::with_capacity(16);
        text.push_str(name);
        text.push(' ');
        Self { text }
    }

    fn sep(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with(' ') {
            self.text.push(',');
        }
    }

    /// `i`: an integer register name.
    pub(crate) fn int(mut self, reg: IntReg) -> Self {
        self.sep();
        self.text.push_str(reg.abi_name());
        self
    }

    /// `f`: a floating-point register name.
    pub(crate) fn fp(mut self, reg: FpReg) -> Self {
        self.sep();
        self.text.push_str(reg.abi_name());
        self
    }

    /// `I`: `offset(reg)`, always printing the offset.
    pub(crate) fn mem(mut self, operand: IntOffsetReg) -> Self {
        self.sep();
        self.text.push_str(&operand.offset().to_string());
        self.text.push('(');
        self.text.push_str(operand.reg().abi_name());
        self.text.push(')');
        self
    }

    /// `J`: `offset(reg)` if `offset != 0`, else just `reg` (the `jalr`
    /// operand-omission convention).
    pub(crate) fn mem_or_reg(mut self, operand: IntOffsetReg) -> Self {
        self.sep();
        if operand.offset() == 0 {
            self.text.push_str(operand.reg().abi_name());
        } else {
            self.text.push_str(&operand.offset().to_string());
            self.text.push('(');
            self.text.push_str(operand.reg().abi_name());
            self.text.push(')');
        }
        self
    }

    /// `M`: `(reg)`, the atomic-instruction memory operand; the caller has
    /// already asserted the offset is zero.
    pub(crate) fn mem_paren(mut self, reg: IntReg) -> Self {
        self.sep();
        self.text.push('(');
        self.text.push_str(reg.abi_name());
        self.text.push(')');
        self
    }

    /// `s`: a signed immediate, printed in decimal.
    pub(crate) fn signed(mut self, value: i32) -> Self {
        self.sep();
        self.text.push_str(&value.to_string());
        self
    }

    /// `u`: an unsigned immediate, printed in hex (`0x...`).
    pub(crate) fn unsigned_hex(mut self, value: u32) -> Self {
        self.sep();
        self.text.push_str(&format!("0x{value:x}"));
        self
    }

    /// `r`: a rounding-mode symbol; `dyn` suppresses the operand entirely.
    pub(crate) fn rounding(mut self, rm: RoundingMode) -> Self {
        if let Some(symbol) = rm.symbol() {
            self.sep();
            self.text.push_str(symbol);
        }
        self
    }

    /// `L`: a label, rendered as its name (or a raw hex address) together
    /// with the resolved target value.
    pub(crate) fn label(mut self, label: &Label, resolved: i64) -> Self {
        self.sep();
        match label.name() {
            Some(name) => self.text.push_str(&format!("<{name}>")),
            None => self.text.push_str(&format!("<0x{resolved:x}>")),
        }
        self
    }

    /// `#`: begins a trailing comment.
    pub(crate) fn comment(mut self, text: &str) -> Self {
        self.text.push_str("  # ");
        self.text.push_str(text);
        self
    }

    /// Finishes the mnemonic, producing its textual form.
    pub(crate) fn finish(self) -> String {
        self.text
    }
}
