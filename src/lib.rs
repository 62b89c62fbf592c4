pub mod assembler;
pub mod encoder;
pub mod error;
pub mod instructions;
pub mod listing;
pub mod program;
pub mod registers;
pub mod resolver;

pub use assembler::{AsmConfig, Assembler, Assembly, Span};
pub use encoder::encode_program;
pub use error::{AsmError, ErrorKind, Location, TableError};
pub use instructions::{AddrMode, InstrMeta, InstructionSet};
pub use program::{Operand, Statement};
pub use registers::RegisterFile;
pub use resolver::{resolve_labels, LabelTable};
