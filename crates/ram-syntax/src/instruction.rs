//! Instruction set of the Random-Access-Machine.
//!
//! Every instruction is an [`Opcode`] applied to a single [`Argument`] under an
//! [`AddressingMode`], optionally declaring a label for the line it sits on.

use std::fmt;

/// The twelve RAM opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Load,
    Store,
    Add,
    Sub,
    Mult,
    Div,
    Read,
    Write,
    Jump,
    Jgtz,
    Jzero,
    Halt,
}

/// How an opcode consumes its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Reads an operand value (LOAD, ADD, SUB, MULT, DIV, WRITE).
    Read,
    /// Writes to a destination address (STORE, READ).
    Write,
    /// Moves the cursor to a label (JUMP, JGTZ, JZERO, HALT).
    Jump,
}

impl Opcode {
    pub const ALL: [Opcode; 12] = [
        Opcode::Load,
        Opcode::Store,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mult,
        Opcode::Div,
        Opcode::Read,
        Opcode::Write,
        Opcode::Jump,
        Opcode::Jgtz,
        Opcode::Jzero,
        Opcode::Halt,
    ];

    /// Looks up an opcode by its exact (case-sensitive) mnemonic.
    pub fn from_mnemonic(s: &str) -> Option<Opcode> {
        Opcode::ALL.into_iter().find(|op| op.mnemonic() == s)
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mult => "MULT",
            Opcode::Div => "DIV",
            Opcode::Read => "READ",
            Opcode::Write => "WRITE",
            Opcode::Jump => "JUMP",
            Opcode::Jgtz => "JGTZ",
            Opcode::Jzero => "JZERO",
            Opcode::Halt => "HALT",
        }
    }

    pub fn family(self) -> Family {
        match self {
            Opcode::Load | Opcode::Add | Opcode::Sub | Opcode::Mult | Opcode::Div | Opcode::Write => {
                Family::Read
            }
            Opcode::Store | Opcode::Read => Family::Write,
            Opcode::Jump | Opcode::Jgtz | Opcode::Jzero | Opcode::Halt => Family::Jump,
        }
    }

    /// Jump-family opcodes take a label argument instead of an integer.
    pub fn takes_label(self) -> bool {
        self.family() == Family::Jump
    }

    /// The (opcode, mode) compatibility table.
    pub fn accepts(self, mode: AddressingMode) -> bool {
        use AddressingMode::*;
        match (self.family(), mode) {
            (Family::Read, Value | Address | AddressAtAddress) => true,
            (Family::Read, Label) => false,
            (Family::Write, Address | AddressAtAddress) => true,
            (Family::Write, Value | Label) => false,
            (Family::Jump, Label) => true,
            (Family::Jump, Value | Address | AddressAtAddress) => false,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// `=k`: the literal itself.
    Value,
    /// `k`: the cell at address `k`.
    Address,
    /// `*k`: the cell whose address is stored in cell `k`.
    AddressAtAddress,
    /// A jump target.
    Label,
}

impl AddressingMode {
    /// Source marker placed before the argument (`=`, `*` or nothing).
    pub fn marker(self) -> &'static str {
        match self {
            AddressingMode::Value => "=",
            AddressingMode::AddressAtAddress => "*",
            AddressingMode::Address | AddressingMode::Label => "",
        }
    }

    pub fn from_marker(c: char) -> Option<AddressingMode> {
        match c {
            '=' => Some(AddressingMode::Value),
            '*' => Some(AddressingMode::AddressAtAddress),
            _ => None,
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressingMode::Value => "value",
            AddressingMode::Address => "address",
            AddressingMode::AddressAtAddress => "address-at-address",
            AddressingMode::Label => "label",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Int(i64),
    Label(String),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Int(n) => write!(f, "{}", n),
            Argument::Label(s) => f.write_str(s),
        }
    }
}

/// A decoded instruction. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub mode: AddressingMode,
    pub argument: Argument,
    /// Label declared by this line (not the jump target).
    pub label: Option<String>,
}

impl Instruction {
    pub fn new(opcode: Opcode, mode: AddressingMode, argument: Argument) -> Self {
        Self { opcode, mode, argument, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// `HALT()`
    pub fn halt() -> Self {
        Self::new(Opcode::Halt, AddressingMode::Label, Argument::Label(String::new()))
    }

    pub fn is_compatible(&self) -> bool {
        self.opcode.accepts(self.mode)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}{})", self.opcode, self.mode.marker(), self.argument)?;
        if let Some(label) = &self.label {
            write!(f, " {}", label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonic_lookup_is_exact() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(op));
        }
        assert_eq!(Opcode::from_mnemonic("load"), None);
        assert_eq!(Opcode::from_mnemonic("LOADX"), None);
        assert_eq!(Opcode::from_mnemonic(""), None);
    }

    #[test]
    fn test_compatibility_table() {
        use AddressingMode::*;
        assert!(Opcode::Load.accepts(Value));
        assert!(Opcode::Write.accepts(AddressAtAddress));
        assert!(!Opcode::Store.accepts(Value));
        assert!(!Opcode::Read.accepts(Value));
        assert!(Opcode::Read.accepts(Address));
        assert!(Opcode::Jgtz.accepts(Label));
        assert!(!Opcode::Jump.accepts(Address));
        assert!(!Opcode::Add.accepts(Label));
    }

    #[test]
    fn test_display_renders_source_syntax() {
        let load = Instruction::new(Opcode::Load, AddressingMode::Value, Argument::Int(5)).with_label("START");
        assert_eq!(load.to_string(), "LOAD(=5) START");
        let store = Instruction::new(Opcode::Store, AddressingMode::AddressAtAddress, Argument::Int(-2));
        assert_eq!(store.to_string(), "STORE(*-2)");
        let jump = Instruction::new(Opcode::Jgtz, AddressingMode::Label, Argument::Label("LOOP".into()));
        assert_eq!(jump.to_string(), "JGTZ(LOOP)");
        assert_eq!(Instruction::halt().to_string(), "HALT()");
    }
}
