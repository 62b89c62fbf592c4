use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use vm16_rs::{InstructionSet, LabelTable, RegisterFile, Statement};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelKV {
    pub addr: u16,
    pub name: String,
}

pub fn load_program(path: &Path) -> Result<Vec<Statement>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing program {}", path.display()))
}

pub fn load_isa(path: Option<&Path>) -> Result<InstructionSet> {
    let Some(path) = path else { return Ok(InstructionSet::default_set()); };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(InstructionSet::from_json(&text)
        .with_context(|| format!("loading instruction table {}", path.display()))?)
}

pub fn load_registers(path: Option<&Path>) -> Result<RegisterFile> {
    let Some(path) = path else { return Ok(RegisterFile::default()); };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(RegisterFile::from_json(&text)
        .with_context(|| format!("loading register table {}", path.display()))?)
}

pub fn parse_u16(s: &str) -> Result<u16> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u16::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u16>()?)
    }
}

pub fn render_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn labels_json(labels: &LabelTable) -> Result<String> {
    let kv: Vec<LabelKV> = labels
        .sorted()
        .into_iter()
        .map(|(name, addr)| LabelKV { addr, name: name.to_string() })
        .collect();
    Ok(serde_json::to_string_pretty(&kv)?)
}
