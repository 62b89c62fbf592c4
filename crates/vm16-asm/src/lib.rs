pub mod model;

pub use model::{labels_json, load_isa, load_program, load_registers, parse_u16, render_hex, LabelKV};
