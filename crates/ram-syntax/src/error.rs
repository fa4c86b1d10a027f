//! Error handling types and utilities for the RAM toolchain.
//!
//! Every stage (decoding, loading, execution) reports failures through the
//! single [`Error`] type defined here. An error is an [`ErrorKind`] from the
//! fixed taxonomy plus optional source location information.
//!
//! # Propagation
//!
//! - Decode-time errors ([`ErrorKind::UnknownOpcode`],
//!   [`ErrorKind::MalformedInstruction`], [`ErrorKind::DuplicateLabel`]) abort
//!   loading of the whole program.
//! - Execution-time errors abort the run on the spot. Nothing is retried.
//!
//! # Examples
//!
//! ```rust
//! use ram_syntax::error::{Error, ErrorKind, Result, error};
//!
//! fn checked_div(a: i64, b: i64) -> Result<i64> {
//!     if b == 0 {
//!         return error(ErrorKind::DivisionByZero);
//!     }
//!     Ok(a / b)
//! }
//!
//! let err = checked_div(1, 0).unwrap_err();
//! assert_eq!(err.kind, ErrorKind::DivisionByZero);
//!
//! let located = Error::with_span(ErrorKind::UnknownOpcode("LOD".into()), 3, 1);
//! assert_eq!(located.to_string(), "unknown opcode 'LOD' at 3:1");
//! ```

use std::fmt;

use crate::instruction::{AddressingMode, Opcode};

/// The failure taxonomy of the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The text before `(` is not one of the twelve mnemonics.
    UnknownOpcode(String),
    /// Argument or label syntax could not be parsed; carries the reason.
    MalformedInstruction(String),
    /// A label was declared on two lines.
    DuplicateLabel(String),
    /// A jump was taken to a label that no line declares.
    LabelNotFound(String),
    IncompatibleAddressingMode { opcode: Opcode, mode: AddressingMode },
    /// An address (literal or read from a cell) was negative.
    NegativeAddress(i64),
    UninitializedCellAccess(u64),
    DivisionByZero,
    /// READ executed with an empty input tape.
    InputExhausted,
    /// An arithmetic result does not fit in a cell.
    ArithmeticOverflow,
    /// Input tape text is not a list of integers.
    MalformedInput(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnknownOpcode(op) => write!(f, "unknown opcode '{}'", op),
            ErrorKind::MalformedInstruction(why) => write!(f, "malformed instruction: {}", why),
            ErrorKind::DuplicateLabel(label) => write!(f, "label '{}' is already declared", label),
            ErrorKind::LabelNotFound(label) => write!(f, "label '{}' not found", label),
            ErrorKind::IncompatibleAddressingMode { opcode, mode } => {
                write!(f, "{} does not accept {} addressing", opcode, mode)
            }
            ErrorKind::NegativeAddress(addr) => write!(f, "negative address {}", addr),
            ErrorKind::UninitializedCellAccess(addr) => {
                write!(f, "read of uninitialized cell {}", addr)
            }
            ErrorKind::DivisionByZero => f.write_str("division by zero"),
            ErrorKind::InputExhausted => f.write_str("no more input"),
            ErrorKind::ArithmeticOverflow => f.write_str("arithmetic overflow"),
            ErrorKind::MalformedInput(why) => write!(f, "malformed input: {}", why),
        }
    }
}

/// An error that occurred while decoding, loading or running a RAM program.
///
/// # Fields
///
/// - `kind`: what went wrong
/// - `line`: optional 1-based line number in the program text
/// - `col`: optional 1-based column number in that line
///
/// Runtime errors raised by instructions that came from program text carry
/// the line of that instruction but no column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,

    /// Optional line number in source file (1-based)
    pub line: Option<usize>,

    /// Optional column number in source file (1-based)
    pub col: Option<usize>,
}

impl Error {
    /// Creates an error without location information.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, line: None, col: None }
    }

    /// Creates an error pointing at a line and column of the program text.
    ///
    /// ```rust
    /// use ram_syntax::{Error, ErrorKind};
    ///
    /// let error = Error::with_span(ErrorKind::MalformedInstruction("missing ')'".into()), 5, 12);
    /// assert_eq!(error.to_string(), "malformed instruction: missing ')' at 5:12");
    /// ```
    pub fn with_span(kind: ErrorKind, line: usize, col: usize) -> Self {
        Self { kind, line: Some(line), col: Some(col) }
    }

    /// Attaches a line number, keeping any column already present.
    ///
    /// Does nothing if the error is already located.
    pub fn at_line(mut self, line: usize) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.col) {
            (Some(l), Some(c)) => write!(f, "{} at {}:{}", self.kind, l, c),
            (Some(l), None) => write!(f, "{} at line {}", self.kind, l),
            _ => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

/// A specialized `Result` type for RAM operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to create an error result.
///
/// Shorthand for `Err(Error::new(kind))`.
pub fn error<T>(kind: ErrorKind) -> Result<T> {
    Err(Error::new(kind))
}

/// Convenience function to create an error result with source location.
pub fn error_at<T>(line: usize, col: usize, kind: ErrorKind) -> Result<T> {
    Err(Error::with_span(kind, line, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_and_without_location() {
        assert_eq!(Error::new(ErrorKind::InputExhausted).to_string(), "no more input");
        assert_eq!(
            Error::new(ErrorKind::LabelNotFound("FOO".into())).at_line(4).to_string(),
            "label 'FOO' not found at line 4"
        );
        assert_eq!(
            Error::with_span(ErrorKind::DuplicateLabel("A".into()), 2, 9).to_string(),
            "label 'A' is already declared at 2:9"
        );
    }

    #[test]
    fn test_at_line_keeps_existing_location() {
        let e = Error::with_span(ErrorKind::DivisionByZero, 7, 3).at_line(1);
        assert_eq!((e.line, e.col), (Some(7), Some(3)));
    }
}
