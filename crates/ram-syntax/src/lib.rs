//! Shared definitions for the RAM toolchain: the instruction set and the
//! error taxonomy used by every other crate.

pub mod error;
pub mod instruction;

pub use error::*;
pub use instruction::*;
