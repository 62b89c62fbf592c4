use serde::{Deserialize, Serialize};

/// One item of a parsed program, consumed in order by both passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Statement {
    Label(String),
    Instruction {
        mnemonic: String,
        #[serde(default)]
        operands: Vec<Operand>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Operand {
    Register(String),
    /// Base-16 text without prefix, e.g. `"00ff"`.
    Literal(String),
    /// Reference to a label, resolved only while encoding.
    Symbol(String),
}

impl Statement {
    pub fn label(name: impl Into<String>) -> Self {
        Statement::Label(name.into())
    }

    pub fn instr(mnemonic: impl Into<String>, operands: impl IntoIterator<Item = Operand>) -> Self {
        Statement::Instruction {
            mnemonic: mnemonic.into(),
            operands: operands.into_iter().collect(),
        }
    }
}

impl Operand {
    pub fn reg(name: impl Into<String>) -> Self {
        Operand::Register(name.into())
    }

    pub fn lit(hex: impl Into<String>) -> Self {
        Operand::Literal(hex.into())
    }

    pub fn sym(name: impl Into<String>) -> Self {
        Operand::Symbol(name.into())
    }
}
