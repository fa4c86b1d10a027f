//! Addressing resolution: what an instruction's argument means given the
//! current memory.

use ram_syntax::error::{error, ErrorKind, Result};
use ram_syntax::{AddressingMode, Argument, Family, Instruction};

use crate::memory::{to_address, Address, Memory};

fn incompatible<T>(instr: &Instruction) -> Result<T> {
    error(ErrorKind::IncompatibleAddressingMode { opcode: instr.opcode, mode: instr.mode })
}

fn check(instr: &Instruction, family: Family) -> Result<()> {
    if instr.opcode.family() != family || !instr.opcode.accepts(instr.mode) {
        return incompatible(instr);
    }
    Ok(())
}

fn literal(instr: &Instruction) -> Result<i64> {
    match &instr.argument {
        Argument::Int(n) => Ok(*n),
        Argument::Label(l) => error(ErrorKind::MalformedInstruction(format!(
            "{} expects an integer argument, got label '{}'",
            instr.opcode, l
        ))),
    }
}

/// Operand value for the read family (LOAD, ADD, SUB, MULT, DIV, WRITE).
pub fn operand(instr: &Instruction, memory: &mut Memory) -> Result<i64> {
    check(instr, Family::Read)?;
    let k = literal(instr)?;
    match instr.mode {
        AddressingMode::Value => Ok(k),
        AddressingMode::Address => memory.read(to_address(k)?),
        AddressingMode::AddressAtAddress => {
            let inner = memory.read(to_address(k)?)?;
            memory.read(to_address(inner)?)
        }
        AddressingMode::Label => incompatible(instr),
    }
}

/// Destination address for the write family (STORE, READ).
pub fn destination(instr: &Instruction, memory: &mut Memory) -> Result<Address> {
    check(instr, Family::Write)?;
    let k = literal(instr)?;
    match instr.mode {
        AddressingMode::Address => to_address(k),
        AddressingMode::AddressAtAddress => {
            let inner = memory.read(to_address(k)?)?;
            to_address(inner)
        }
        AddressingMode::Value | AddressingMode::Label => incompatible(instr),
    }
}

/// Jump target label for the jump family, verbatim.
pub fn target(instr: &Instruction) -> Result<&str> {
    check(instr, Family::Jump)?;
    match &instr.argument {
        Argument::Label(l) => Ok(l.as_str()),
        Argument::Int(n) => error(ErrorKind::MalformedInstruction(format!(
            "{} expects a label, got {}",
            instr.opcode, n
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UninitPolicy;
    use ram_syntax::Opcode;

    fn instr(opcode: Opcode, mode: AddressingMode, n: i64) -> Instruction {
        Instruction::new(opcode, mode, Argument::Int(n))
    }

    fn memory() -> Memory {
        let mut mem = Memory::new(UninitPolicy::Fail);
        mem.write(1, 5);
        mem.write(5, 42);
        mem.write(6, -3);
        mem
    }

    #[test]
    fn test_read_family_dereference_depth() {
        let mut mem = memory();
        assert_eq!(operand(&instr(Opcode::Load, AddressingMode::Value, 1), &mut mem).unwrap(), 1);
        assert_eq!(operand(&instr(Opcode::Load, AddressingMode::Address, 1), &mut mem).unwrap(), 5);
        assert_eq!(operand(&instr(Opcode::Load, AddressingMode::AddressAtAddress, 1), &mut mem).unwrap(), 42);
    }

    #[test]
    fn test_write_family_dereferences_once_less() {
        let mut mem = memory();
        assert_eq!(destination(&instr(Opcode::Store, AddressingMode::Address, 1), &mut mem).unwrap(), 1);
        assert_eq!(destination(&instr(Opcode::Read, AddressingMode::AddressAtAddress, 1), &mut mem).unwrap(), 5);
        // destination of a plain address needs no initialized cell
        assert_eq!(destination(&instr(Opcode::Store, AddressingMode::Address, 99), &mut mem).unwrap(), 99);
    }

    #[test]
    fn test_incompatible_modes() {
        let mut mem = memory();
        let err = destination(&instr(Opcode::Store, AddressingMode::Value, 1), &mut mem).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::IncompatibleAddressingMode { opcode: Opcode::Store, mode: AddressingMode::Value }
        );
        assert!(operand(&instr(Opcode::Jump, AddressingMode::Address, 1), &mut mem).is_err());
        assert!(target(&instr(Opcode::Load, AddressingMode::Label, 1)).is_err());
    }

    #[test]
    fn test_label_mode_on_data_opcodes_is_an_error() {
        let mut mem = memory();
        let err = operand(&instr(Opcode::Add, AddressingMode::Label, 1), &mut mem).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IncompatibleAddressingMode { opcode: Opcode::Add, mode: AddressingMode::Label });
        let err = destination(&instr(Opcode::Read, AddressingMode::Label, 1), &mut mem).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IncompatibleAddressingMode { opcode: Opcode::Read, mode: AddressingMode::Label });
        let err = destination(&instr(Opcode::Read, AddressingMode::Value, 1), &mut mem).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IncompatibleAddressingMode { opcode: Opcode::Read, mode: AddressingMode::Value });
    }

    #[test]
    fn test_negative_addresses() {
        let mut mem = memory();
        let err = operand(&instr(Opcode::Add, AddressingMode::Address, -1), &mut mem).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NegativeAddress(-1));
        let err = operand(&instr(Opcode::Add, AddressingMode::AddressAtAddress, 6), &mut mem).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NegativeAddress(-3));
        let err = destination(&instr(Opcode::Store, AddressingMode::AddressAtAddress, 6), &mut mem).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NegativeAddress(-3));
        let err = destination(&instr(Opcode::Store, AddressingMode::Address, -4), &mut mem).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NegativeAddress(-4));
    }

    #[test]
    fn test_uninitialized_dereference() {
        let mut mem = memory();
        let err = operand(&instr(Opcode::Write, AddressingMode::AddressAtAddress, 7), &mut mem).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UninitializedCellAccess(7));
    }

    #[test]
    fn test_target_is_verbatim() {
        let jump = Instruction::new(Opcode::Jzero, AddressingMode::Label, Argument::Label("END".into()));
        assert_eq!(target(&jump).unwrap(), "END");
    }
}
