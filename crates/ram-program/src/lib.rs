//! Program store for the RAM interpreter.
//!
//! A [`Program`] is the decoded instruction sequence of one source file plus
//! the [`LabelTable`] built while it was loaded. Positions are plain indices,
//! stable for the lifetime of the program.

pub mod labels;
pub mod program;

pub use labels::LabelTable;
pub use program::{Position, Program};
