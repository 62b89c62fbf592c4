use tracing::{debug, trace, warn};

use crate::assembler::{AsmConfig, Span};
use crate::error::{AsmError, ErrorKind};
use crate::instructions::{InstructionSet, Slot};
use crate::program::{Operand, Statement};
use crate::registers::RegisterFile;
use crate::resolver::LabelTable;

/// Operand encoders for one instruction. All of them append to `out`.
struct Emitter<'a> {
    labels: &'a LabelTable,
    regs: &'a RegisterFile,
    mnemonic: &'a str,
    out: &'a mut Vec<u8>,
}

impl Emitter<'_> {
    fn malformed(&self) -> ErrorKind {
        ErrorKind::MalformedInstruction(self.mnemonic.to_string())
    }

    fn value(&self, op: &Operand) -> Result<u64, ErrorKind> {
        match op {
            Operand::Symbol(name) => self.labels.resolve(name).map(u64::from),
            Operand::Literal(text) => parse_hex(text),
            Operand::Register(_) => Err(self.malformed()),
        }
    }

    fn lit_or_addr(&mut self, op: &Operand) -> Result<(), ErrorKind> {
        let v = self.value(op)?;
        if v > 0xFFFF {
            trace!(value = v, "16-bit operand truncated");
        }
        self.out.extend_from_slice(&[(v >> 8) as u8, v as u8]);
        Ok(())
    }

    fn lit8(&mut self, op: &Operand) -> Result<(), ErrorKind> {
        let v = self.value(op)?;
        self.out.push(v as u8);
        Ok(())
    }

    fn reg(&mut self, op: &Operand) -> Result<(), ErrorKind> {
        let Operand::Register(name) = op else {
            return Err(self.malformed());
        };
        let idx = self
            .regs
            .index_of(name)
            .ok_or_else(|| ErrorKind::UnknownRegister(name.clone()))?;
        self.out.push(idx);
        Ok(())
    }

    fn slot(&mut self, slot: Slot, op: &Operand) -> Result<(), ErrorKind> {
        trace!(?slot, ?op, "operand");
        match slot {
            Slot::Reg => self.reg(op),
            Slot::Lit8 => self.lit8(op),
            Slot::Lit16 => self.lit_or_addr(op),
        }
    }
}

/// Strict base-16: non-empty, hex digits only, no sign or prefix.
pub(crate) fn parse_hex(text: &str) -> Result<u64, ErrorKind> {
    let bad = || ErrorKind::NumericParseError(text.to_string());
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }
    u64::from_str_radix(text, 16).map_err(|_| bad())
}

/// Second pass: emit opcode and operand bytes for every instruction.
///
/// Returns the image together with one [`Span`] per instruction. Any error
/// aborts the run; no partial image is returned.
pub fn encode_program(
    program: &[Statement],
    labels: &LabelTable,
    isa: &InstructionSet,
    regs: &RegisterFile,
    cfg: &AsmConfig,
) -> Result<(Vec<u8>, Vec<Span>), AsmError> {
    let mut out = Vec::new();
    let mut spans = Vec::new();
    let mut last_label: Option<&str> = None;

    for (index, stmt) in program.iter().enumerate() {
        let (mnemonic, operands) = match stmt {
            Statement::Label(name) => {
                last_label = Some(name.as_str());
                continue;
            }
            Statement::Instruction { mnemonic, operands } => (mnemonic, operands),
        };
        let fail = |kind| AsmError::new(index, last_label, kind);

        let meta = isa
            .get(mnemonic)
            .ok_or_else(|| fail(ErrorKind::UnknownMnemonic(mnemonic.clone())))?;
        let slots = meta.mode.slots();
        if operands.len() != slots.len() {
            return Err(fail(ErrorKind::MalformedInstruction(mnemonic.clone())));
        }

        let start = out.len();
        out.push(meta.opcode);
        let mut em = Emitter {
            labels,
            regs,
            mnemonic,
            out: &mut out,
        };
        for (&slot, op) in slots.iter().zip(operands) {
            em.slot(slot, op).map_err(fail)?;
        }

        let emitted = out.len() - start;
        if emitted != meta.size {
            let kind = ErrorKind::SizeMismatch {
                mnemonic: mnemonic.clone(),
                declared: meta.size,
                emitted,
            };
            if cfg.strict_sizes {
                return Err(fail(kind));
            }
            warn!(index, "{kind}; label addresses after this point are off");
        }

        let address = u32::from(cfg.origin) + start as u32;
        debug!(index, %mnemonic, address, bytes = ?&out[start..], "encoded");
        spans.push(Span {
            index,
            address,
            len: emitted,
        });
    }

    Ok((out, spans))
}
