//! Whole-program loading and input tape parsing.

use ram_program::Program;
use ram_syntax::error::{error, error_at, ErrorKind, Result};

use crate::decoder::Decoder;

/// Decode every non-empty line of `src` into a [`Program`].
///
/// Any decode error, duplicate label, or opcode/addressing-mode mismatch
/// aborts the load; no partial program is returned.
pub fn parse_program(src: &str) -> Result<Program> {
    parse_lines(src.lines())
}

pub fn parse_lines<I, S>(lines: I) -> Result<Program>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut program = Program::new();
    for (idx, raw) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        let text = raw.as_ref().trim_end();
        if text.trim_start().is_empty() {
            continue;
        }
        let mut decoder = Decoder::new(text, line_no);
        let instruction = decoder.decode()?;
        // eager check; the engine re-checks before executing
        if !instruction.is_compatible() {
            return error_at(
                line_no,
                decoder.argument_col(),
                ErrorKind::IncompatibleAddressingMode {
                    opcode: instruction.opcode,
                    mode: instruction.mode,
                },
            );
        }
        program.append_from_line(instruction, line_no)?;
    }
    Ok(program)
}

/// Parse input tape text: integers separated by whitespace and/or commas.
pub fn parse_tape(text: &str) -> Result<Vec<i64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<i64>() {
            Ok(n) => Ok(n),
            Err(_) => error(ErrorKind::MalformedInput(format!("'{}' is not an integer", s))),
        })
        .collect()
}
