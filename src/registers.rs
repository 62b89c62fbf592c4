use std::collections::HashMap;

use crate::error::TableError;

/// Register file of the VM with memory banking; position is the encoded index.
pub const REGISTERS: &[&str] = &[
    "ip", "acc", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "sp", "fp", "mb",
];

#[derive(Debug, Clone)]
pub struct RegisterFile {
    names: Vec<String>,
    index: HashMap<String, u8>,
}

impl RegisterFile {
    pub fn new<I, S>(names: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() > 256 {
            return Err(TableError::TooManyRegisters(names.len()));
        }
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            // len <= 256 checked above
            if index.insert(name.clone(), i as u8).is_some() {
                return Err(TableError::DuplicateRegister(name.clone()));
            }
        }
        Ok(Self { names, index })
    }

    pub fn from_json(text: &str) -> Result<Self, TableError> {
        let names: Vec<String> = serde_json::from_str(text)?;
        Self::new(names)
    }

    pub fn index_of(&self, name: &str) -> Option<u8> {
        self.index.get(name).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        let names: Vec<String> = REGISTERS.iter().map(|s| s.to_string()).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i as u8))
            .collect();
        Self { names, index }
    }
}
