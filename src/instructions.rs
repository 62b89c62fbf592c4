use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Operand shape of an instruction. Each variant has one fixed encoding recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddrMode {
    /// reg, lit8
    #[serde(rename = "reg-literal")]
    RegLit8,
    /// lit16, reg
    #[serde(rename = "literal-reg")]
    LitReg,
    /// addr16, reg
    #[serde(rename = "mem-reg")]
    MemReg,
    /// reg, lit16
    #[serde(rename = "reg-literal16")]
    RegLit,
    /// reg, addr16
    #[serde(rename = "reg-mem")]
    RegMem,
    /// lit16, addr16
    #[serde(rename = "literal-mem")]
    LitMem,
    #[serde(rename = "reg-reg")]
    RegReg,
    /// reg, *reg
    #[serde(rename = "reg-ptr-reg")]
    RegPtrReg,
    /// lit16, base reg, dest reg
    #[serde(rename = "literal-offset-reg")]
    LitOffReg,
    #[serde(rename = "single-reg")]
    SingleReg,
    #[serde(rename = "single-literal")]
    SingleLit,
    #[serde(rename = "no-args")]
    NoArgs,
}

/// What one operand position encodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Register index, one byte.
    Reg,
    /// Low byte of a literal or label address.
    Lit8,
    /// Literal or label address, two bytes big-endian.
    Lit16,
}

impl Slot {
    pub fn width(self) -> usize {
        match self {
            Slot::Reg | Slot::Lit8 => 1,
            Slot::Lit16 => 2,
        }
    }
}

impl AddrMode {
    /// Encoding recipe, operand 0 first.
    pub fn slots(self) -> &'static [Slot] {
        use Slot::*;
        match self {
            AddrMode::RegLit8 => &[Reg, Lit8],
            AddrMode::LitReg | AddrMode::MemReg => &[Lit16, Reg],
            AddrMode::RegLit | AddrMode::RegMem => &[Reg, Lit16],
            AddrMode::LitMem => &[Lit16, Lit16],
            AddrMode::RegReg | AddrMode::RegPtrReg => &[Reg, Reg],
            AddrMode::LitOffReg => &[Lit16, Reg, Reg],
            AddrMode::SingleReg => &[Reg],
            AddrMode::SingleLit => &[Lit16],
            AddrMode::NoArgs => &[],
        }
    }

    pub fn arity(self) -> usize {
        self.slots().len()
    }

    /// Bytes the encoder emits for this mode, opcode included.
    pub fn encoded_size(self) -> usize {
        1 + self.slots().iter().map(|s| s.width()).sum::<usize>()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub name: &'static str,
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub mode: AddrMode,
}

macro_rules! desc {
    ($name:literal, $mn:literal, $op:literal, $mode:ident) => {
        InstrDesc {
            name: $name,
            mnemonic: $mn,
            opcode: $op,
            mode: AddrMode::$mode,
        }
    };
}

/// Built-in instruction set of the 16-bit VM.
pub const TABLE: &[InstrDesc] = &[
    desc!("MOV_LIT_REG", "mov", 0x10, LitReg),
    desc!("MOV_REG_REG", "mov", 0x11, RegReg),
    desc!("MOV_REG_MEM", "mov", 0x12, RegMem),
    desc!("MOV_MEM_REG", "mov", 0x13, MemReg),
    desc!("MOV_LIT_MEM", "mov", 0x1B, LitMem),
    desc!("MOV_REG_PTR_REG", "mov", 0x1C, RegPtrReg),
    desc!("MOV_LIT_OFF_REG", "mov", 0x1D, LitOffReg),
    desc!("ADD_REG_REG", "add", 0x14, RegReg),
    desc!("ADD_LIT_REG", "add", 0x3F, LitReg),
    desc!("SUB_LIT_REG", "sub", 0x16, LitReg),
    desc!("SUB_REG_LIT", "sub", 0x1E, RegLit),
    desc!("SUB_REG_REG", "sub", 0x1F, RegReg),
    desc!("INC_REG", "inc", 0x35, SingleReg),
    desc!("DEC_REG", "dec", 0x36, SingleReg),
    desc!("MUL_LIT_REG", "mul", 0x20, LitReg),
    desc!("MUL_REG_REG", "mul", 0x21, RegReg),
    desc!("LSF_REG_LIT", "lsf", 0x26, RegLit8),
    desc!("LSF_REG_REG", "lsf", 0x27, RegReg),
    desc!("RSF_REG_LIT", "rsf", 0x2A, RegLit8),
    desc!("RSF_REG_REG", "rsf", 0x2B, RegReg),
    desc!("AND_REG_LIT", "and", 0x2E, RegLit),
    desc!("AND_REG_REG", "and", 0x2F, RegReg),
    desc!("OR_REG_LIT", "or", 0x30, RegLit),
    desc!("OR_REG_REG", "or", 0x31, RegReg),
    desc!("XOR_REG_LIT", "xor", 0x32, RegLit),
    desc!("XOR_REG_REG", "xor", 0x33, RegReg),
    desc!("NOT", "not", 0x34, SingleReg),
    desc!("JNE_LIT", "jne", 0x15, LitMem),
    desc!("JNE_REG", "jne", 0x40, RegMem),
    desc!("JEQ_REG", "jeq", 0x3E, RegMem),
    desc!("JEQ_LIT", "jeq", 0x41, LitMem),
    desc!("JLT_REG", "jlt", 0x42, RegMem),
    desc!("JLT_LIT", "jlt", 0x43, LitMem),
    desc!("JGT_REG", "jgt", 0x44, RegMem),
    desc!("JGT_LIT", "jgt", 0x45, LitMem),
    desc!("JLE_REG", "jle", 0x46, RegMem),
    desc!("JLE_LIT", "jle", 0x47, LitMem),
    desc!("JGE_REG", "jge", 0x48, RegMem),
    desc!("JGE_LIT", "jge", 0x49, LitMem),
    desc!("PSH_LIT", "psh", 0x17, SingleLit),
    desc!("PSH_REG", "psh", 0x18, SingleReg),
    desc!("POP", "pop", 0x1A, SingleReg),
    desc!("CAL_LIT", "cal", 0x5E, SingleLit),
    desc!("CAL_REG", "cal", 0x5F, SingleReg),
    desc!("RET", "ret", 0x60, NoArgs),
    desc!("HLT", "hlt", 0xFF, NoArgs),
];

/// Metadata for one mnemonic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrMeta {
    pub opcode: u8,
    pub mode: AddrMode,
    /// Total encoded size, opcode included. The resolver advances by this.
    pub size: usize,
    /// Surface spelling for listings, when it differs from the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
}

impl InstrMeta {
    pub fn new(opcode: u8, mode: AddrMode, size: usize) -> Self {
        Self {
            opcode,
            mode,
            size,
            mnemonic: None,
        }
    }
}

impl From<&InstrDesc> for InstrMeta {
    fn from(d: &InstrDesc) -> Self {
        Self {
            opcode: d.opcode,
            mode: d.mode,
            size: d.mode.encoded_size(),
            mnemonic: Some(d.mnemonic.to_string()),
        }
    }
}

/// Mnemonic-keyed metadata table, read-only while assembling.
#[derive(Debug, Clone, Default)]
pub struct InstructionSet {
    entries: HashMap<String, InstrMeta>,
}

impl InstructionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_set() -> Self {
        let entries = TABLE
            .iter()
            .map(|d| (d.name.to_string(), InstrMeta::from(d)))
            .collect();
        Self { entries }
    }

    /// Parses a JSON object of `name -> {opcode, mode, size}`.
    pub fn from_json(text: &str) -> Result<Self, TableError> {
        let entries: HashMap<String, InstrMeta> = serde_json::from_str(text)?;
        Ok(Self { entries })
    }

    pub fn insert(&mut self, name: impl Into<String>, meta: InstrMeta) -> Option<InstrMeta> {
        self.entries.insert(name.into(), meta)
    }

    pub fn get(&self, name: &str) -> Option<&InstrMeta> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose declared size differs from what their mode encodes to, sorted by name.
    pub fn size_mismatches(&self) -> Vec<(&str, &InstrMeta)> {
        let mut out: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, m)| m.size != m.mode.encoded_size())
            .map(|(k, m)| (k.as_str(), m))
            .collect();
        out.sort_by_key(|(k, _)| *k);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_unique() {
        let set = InstructionSet::default_set();
        assert_eq!(set.len(), TABLE.len());
    }

    #[test]
    fn opcodes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for d in TABLE {
            assert!(seen.insert(d.opcode), "opcode {:#04x} reused by {}", d.opcode, d.name);
        }
    }

    #[test]
    fn default_sizes_agree_with_modes() {
        assert!(InstructionSet::default_set().size_mismatches().is_empty());
    }

    #[test]
    fn canonical_sizes() {
        assert_eq!(AddrMode::LitReg.encoded_size(), 4);
        assert_eq!(AddrMode::RegLit8.encoded_size(), 3);
        assert_eq!(AddrMode::LitMem.encoded_size(), 5);
        assert_eq!(AddrMode::LitOffReg.encoded_size(), 5);
        assert_eq!(AddrMode::SingleLit.encoded_size(), 3);
        assert_eq!(AddrMode::NoArgs.encoded_size(), 1);
        assert_eq!(AddrMode::LitOffReg.arity(), 3);
    }

    #[test]
    fn custom_table_from_json() {
        let set = InstructionSet::from_json(
            r#"{"mov": {"opcode": 16, "mode": "reg-literal16", "size": 3}}"#,
        )
        .unwrap();
        let m = set.get("mov").unwrap();
        assert_eq!(m.mode, AddrMode::RegLit);
        assert_eq!(m.size, 3);
        assert_eq!(set.size_mismatches().len(), 1);
    }

    #[test]
    fn unknown_mode_tag_is_rejected() {
        let err = InstructionSet::from_json(
            r#"{"mov": {"opcode": 16, "mode": "reg-reg-reg", "size": 4}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TableError::Json(_)));
    }
}
