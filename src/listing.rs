use std::fmt::Write;

use crate::assembler::Assembly;
use crate::instructions::InstructionSet;
use crate::program::{Operand, Statement};

pub fn fmt_operand(op: &Operand) -> String {
    match op {
        Operand::Register(name) => name.clone(),
        Operand::Literal(hex) => format!("${hex}"),
        Operand::Symbol(name) => format!("!{name}"),
    }
}

/// One line per label and per instruction: address, bytes, source form.
pub fn fmt_listing(program: &[Statement], asm: &Assembly, isa: &InstructionSet) -> String {
    let mut buf = String::new();
    let mut spans = asm.spans.iter().peekable();

    for (index, stmt) in program.iter().enumerate() {
        match stmt {
            Statement::Label(name) => {
                let _ = writeln!(buf, "{name}:");
            }
            Statement::Instruction { mnemonic, operands } => {
                let Some(span) = spans.next_if(|s| s.index == index) else { continue; };
                let off = (span.address - u32::from(asm.origin)) as usize;
                let bytes = asm.bytes[off..off + span.len]
                    .iter()
                    .map(|b| format!("{b:02x}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                let mn = isa
                    .get(mnemonic)
                    .and_then(|m| m.mnemonic.as_deref())
                    .unwrap_or(mnemonic.as_str());
                let ops = operands.iter().map(fmt_operand).collect::<Vec<_>>().join(", ");
                let line = format!("{:04x}  {:<15} {} {}", span.address, bytes, mn, ops);
                let _ = writeln!(buf, "{}", line.trim_end());
            }
        }
    }
    buf
}
