use serde::{Deserialize, Serialize};
use tracing::info;

use crate::encoder::encode_program;
use crate::error::AsmError;
use crate::instructions::InstructionSet;
use crate::program::Statement;
use crate::registers::RegisterFile;
use crate::resolver::{resolve_labels, LabelTable};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsmConfig {
    pub origin: u16, // load address; labels are absolute
    pub strict_sizes: bool, // declared size must equal emitted bytes
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            origin: 0,
            strict_sizes: true,
        }
    }
}

/// Where one instruction landed in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub index: usize,
    pub address: u32,
    pub len: usize,
}

#[derive(Debug, Clone)]
pub struct Assembly {
    pub origin: u16,
    pub bytes: Vec<u8>,
    pub labels: LabelTable,
    pub spans: Vec<Span>,
}

pub struct Assembler<'a> {
    isa: &'a InstructionSet,
    regs: &'a RegisterFile,
    cfg: AsmConfig,
}

impl<'a> Assembler<'a> {
    pub fn new(isa: &'a InstructionSet, regs: &'a RegisterFile, cfg: AsmConfig) -> Self {
        Self { isa, regs, cfg }
    }

    pub fn config(&self) -> &AsmConfig {
        &self.cfg
    }

    pub fn assemble(&self, program: &[Statement]) -> Result<Assembly, AsmError> {
        // Resolver must finish before any byte is encoded.
        let labels = resolve_labels(program, self.isa, self.cfg.origin)?;
        let (bytes, spans) = encode_program(program, &labels, self.isa, self.regs, &self.cfg)?;
        info!(
            statements = program.len(),
            labels = labels.len(),
            bytes = bytes.len(),
            "assembled"
        );
        Ok(Assembly {
            origin: self.cfg.origin,
            bytes,
            labels,
            spans,
        })
    }
}
