use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{AsmError, ErrorKind};
use crate::instructions::InstructionSet;
use crate::program::Statement;

/// Label name -> absolute address. Complete before encoding starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelTable {
    map: HashMap<String, u16>,
}

impl LabelTable {
    pub fn get(&self, name: &str) -> Option<u16> {
        self.map.get(name).copied()
    }

    /// The one lookup every symbolic operand goes through.
    pub fn resolve(&self, name: &str) -> Result<u16, ErrorKind> {
        self.get(name)
            .ok_or_else(|| ErrorKind::UnresolvedLabel(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entries ordered by address, then name.
    pub fn sorted(&self) -> Vec<(&str, u16)> {
        let mut v: Vec<_> = self.map.iter().map(|(k, a)| (k.as_str(), *a)).collect();
        v.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        v
    }
}

/// First pass: bind every label to the address of the instruction following it.
pub fn resolve_labels(
    program: &[Statement],
    isa: &InstructionSet,
    origin: u16,
) -> Result<LabelTable, AsmError> {
    let mut labels = LabelTable::default();
    let mut addr = u32::from(origin);
    let mut last_label: Option<&str> = None;

    for (index, stmt) in program.iter().enumerate() {
        match stmt {
            Statement::Label(name) => {
                let fail = |kind| AsmError::new(index, last_label, kind);
                if labels.map.contains_key(name) {
                    return Err(fail(ErrorKind::DuplicateLabel(name.clone())));
                }
                let at = u16::try_from(addr).map_err(|_| {
                    fail(ErrorKind::AddressOverflow {
                        name: name.clone(),
                        address: addr,
                    })
                })?;
                debug!(label = %name, addr = at, "label bound");
                labels.map.insert(name.clone(), at);
                last_label = Some(name.as_str());
            }
            Statement::Instruction { mnemonic, .. } => {
                let meta = isa.get(mnemonic).ok_or_else(|| {
                    AsmError::new(index, last_label, ErrorKind::UnknownMnemonic(mnemonic.clone()))
                })?;
                addr = addr.saturating_add(u32::try_from(meta.size).unwrap_or(u32::MAX));
            }
        }
    }

    Ok(labels)
}
