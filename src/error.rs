use std::fmt;

/// What went wrong. Every kind is fatal to the whole assembly run.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("label `{0}` defined more than once")]
    DuplicateLabel(String),
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("label `{0}` wasn't resolved")]
    UnresolvedLabel(String),
    #[error("unknown register `{0}`")]
    UnknownRegister(String),
    #[error("malformed `{0}` instruction: operands do not match its addressing mode")]
    MalformedInstruction(String),
    #[error("`{0}` is not a base-16 literal")]
    NumericParseError(String),
    #[error("label `{name}` lands at {address:#x}, outside the 16-bit address space")]
    AddressOverflow { name: String, address: u32 },
    #[error("`{mnemonic}` declares {declared} bytes but encodes to {emitted}")]
    SizeMismatch {
        mnemonic: String,
        declared: usize,
        emitted: usize,
    },
}

/// Which statement triggered a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Index into the statement sequence.
    pub index: usize,
    /// Most recent label defined before the statement, if any.
    pub label: Option<String>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "statement {}", self.index)?;
        if let Some(label) = &self.label {
            write!(f, " (after `{label}`)")?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {at}")]
pub struct AsmError {
    pub at: Location,
    pub kind: ErrorKind,
}

impl AsmError {
    pub fn new(index: usize, label: Option<&str>, kind: ErrorKind) -> Self {
        Self {
            at: Location {
                index,
                label: label.map(str::to_owned),
            },
            kind,
        }
    }
}

/// Problems building the externally supplied tables.
#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("register `{0}` listed more than once")]
    DuplicateRegister(String),
    #[error("{0} registers do not fit in a one-byte index")]
    TooManyRegisters(usize),
    #[error("invalid table: {0}")]
    Json(#[from] serde_json::Error),
}
