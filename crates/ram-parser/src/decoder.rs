//! Instruction decoder: turns one line of program text into an [`Instruction`].
//!
//! Line grammar: `OPCODE(MARKER?ARG)[DELIM LABEL]`. Decoding is pure; it never
//! looks at memory or at other lines.
use ram_syntax::error::{error_at, ErrorKind, Result};
use ram_syntax::{AddressingMode, Argument, Instruction, Opcode};

/// Character scanner over a single program line.
pub struct Decoder {
    src: Vec<char>,
    pos: usize,
    line: usize,
    arg_col: usize,
}

impl Decoder {
    /// Create a decoder for `text`, reporting errors against 1-based `line`.
    pub fn new(text: &str, line: usize) -> Self {
        Self {
            src: text.chars().collect(),
            pos: 0,
            line,
            arg_col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }
    fn col(&self) -> usize {
        self.pos + 1
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_until(&mut self, stop: char) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c == stop {
                break;
            }
            s.push(c);
            self.advance();
        }
        s
    }

    fn malformed<T>(&self, col: usize, why: impl Into<String>) -> Result<T> {
        error_at(self.line, col, ErrorKind::MalformedInstruction(why.into()))
    }

    /// Column where the argument text starts. Valid after [`Decoder::decode`].
    pub fn argument_col(&self) -> usize {
        self.arg_col
    }

    pub fn decode(&mut self) -> Result<Instruction> {
        self.skip_whitespace();
        let op_col = self.col();
        let mnemonic = self.read_until('(');
        let opcode = match Opcode::from_mnemonic(&mnemonic) {
            Some(op) => op,
            None if mnemonic.trim().is_empty() => return self.malformed(op_col, "missing opcode"),
            None => return error_at(self.line, op_col, ErrorKind::UnknownOpcode(mnemonic)),
        };

        let lparen_col = self.col();
        if self.advance() != Some('(') {
            return self.malformed(lparen_col, format!("expected '(' after {}", opcode));
        }
        self.arg_col = self.col();
        let raw_arg = self.read_until(')');
        if self.advance() != Some(')') {
            return self.malformed(lparen_col, "missing ')'");
        }
        let (mode, argument) = self.decode_argument(opcode, raw_arg)?;

        let label = self.decode_label()?;
        Ok(Instruction { opcode, mode, argument, label })
    }

    fn decode_argument(&self, opcode: Opcode, raw: String) -> Result<(AddressingMode, Argument)> {
        if opcode.takes_label() {
            if raw.is_empty() && opcode != Opcode::Halt {
                return self.malformed(self.arg_col, format!("{} expects a label", opcode));
            }
            return Ok((AddressingMode::Label, Argument::Label(raw)));
        }

        let mut digits = raw.as_str();
        let mut mode = AddressingMode::Address;
        if let Some(m) = digits.chars().next().and_then(AddressingMode::from_marker) {
            mode = m;
            digits = &digits[1..];
        }
        match digits.parse::<i64>() {
            Ok(n) => Ok((mode, Argument::Int(n))),
            Err(_) if digits.is_empty() => {
                self.malformed(self.arg_col, format!("{} expects an integer argument", opcode))
            }
            Err(_) => self.malformed(self.arg_col, format!("invalid integer argument '{}'", digits)),
        }
    }

    fn decode_label(&mut self) -> Result<Option<String>> {
        let delim_col = self.col();
        let delim = match self.advance() {
            None => return Ok(None),
            Some(c) => c,
        };
        if !(delim == ' ' || delim == '\t' || delim == ':') {
            return self.malformed(delim_col, format!("unexpected '{}' after ')'", delim));
        }
        let label: String = self.src[self.pos..].iter().collect();
        if label.is_empty() {
            return self.malformed(delim_col, "missing label after delimiter");
        }
        if label.chars().any(|c| c.is_whitespace() || c == '(' || c == ')') {
            return self.malformed(self.col(), format!("invalid label '{}'", label));
        }
        self.pos = self.src.len();
        Ok(Some(label))
    }
}

/// Decode a single line with no surrounding program context.
pub fn decode_line(text: &str) -> Result<Instruction> {
    Decoder::new(text, 1).decode()
}
