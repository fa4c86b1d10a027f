pub mod decoder;
pub mod loader;

pub use decoder::{decode_line, Decoder};
pub use loader::{parse_lines, parse_program, parse_tape};
