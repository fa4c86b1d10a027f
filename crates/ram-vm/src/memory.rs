//! Sparse machine memory.

use std::collections::BTreeMap;
use std::fmt;

use ram_syntax::error::{error, ErrorKind, Result};

use crate::config::UninitPolicy;

/// Index of a memory cell.
pub type Address = u64;

/// Cell 0, read and written implicitly by LOAD, STORE and arithmetic.
pub const ACCUMULATOR: Address = 0;

/// Converts a signed literal or cell value into an address.
pub fn to_address(raw: i64) -> Result<Address> {
    match Address::try_from(raw) {
        Ok(addr) => Ok(addr),
        Err(_) => error(ErrorKind::NegativeAddress(raw)),
    }
}

/// Unbounded memory, ordered by address. The accumulator reads as 0 until it
/// is first written; every other unset cell is governed by the
/// [`UninitPolicy`].
#[derive(Debug, Clone, Default)]
pub struct Memory {
    cells: BTreeMap<Address, i64>,
    policy: UninitPolicy,
    // cells materialized under UninitPolicy::Zero since last take_defaulted
    defaulted: Vec<Address>,
}

impl Memory {
    pub fn new(policy: UninitPolicy) -> Self {
        Self { cells: BTreeMap::new(), policy, defaulted: Vec::new() }
    }

    /// Raw lookup; never fails and never materializes.
    pub fn get(&self, addr: Address) -> Option<i64> {
        self.cells.get(&addr).copied()
    }

    /// Checked read of a cell.
    pub fn read(&mut self, addr: Address) -> Result<i64> {
        if let Some(v) = self.cells.get(&addr) {
            return Ok(*v);
        }
        if addr == ACCUMULATOR {
            return Ok(0);
        }
        match self.policy {
            UninitPolicy::Fail => error(ErrorKind::UninitializedCellAccess(addr)),
            UninitPolicy::Zero => {
                self.cells.insert(addr, 0);
                self.defaulted.push(addr);
                Ok(0)
            }
        }
    }

    pub fn write(&mut self, addr: Address, value: i64) {
        self.cells.insert(addr, value);
    }

    pub fn accumulator(&self) -> i64 {
        self.get(ACCUMULATOR).unwrap_or(0)
    }

    pub fn set_accumulator(&mut self, value: i64) {
        self.write(ACCUMULATOR, value);
    }

    /// Drains the list of cells that were defaulted to zero.
    pub fn take_defaulted(&mut self) -> Vec<Address> {
        std::mem::take(&mut self.defaulted)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Address, i64)> + '_ {
        self.cells.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.defaulted.clear();
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cells.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        for (i, (addr, value)) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({})->{}", addr, value)?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_reads_zero_until_written() {
        let mut mem = Memory::new(UninitPolicy::Fail);
        assert_eq!(mem.read(ACCUMULATOR).unwrap(), 0);
        assert!(mem.is_empty());
        mem.set_accumulator(9);
        assert_eq!(mem.accumulator(), 9);
    }

    #[test]
    fn test_fail_policy_rejects_unset_cells() {
        let mut mem = Memory::new(UninitPolicy::Fail);
        let err = mem.read(4).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UninitializedCellAccess(4));
    }

    #[test]
    fn test_zero_policy_materializes_and_reports() {
        let mut mem = Memory::new(UninitPolicy::Zero);
        assert_eq!(mem.read(4).unwrap(), 0);
        assert_eq!(mem.get(4), Some(0));
        assert_eq!(mem.take_defaulted(), vec![4]);
        assert!(mem.take_defaulted().is_empty());
    }

    #[test]
    fn test_negative_addresses_are_rejected() {
        assert_eq!(to_address(3).unwrap(), 3);
        assert_eq!(to_address(-1).unwrap_err().kind, ErrorKind::NegativeAddress(-1));
    }

    #[test]
    fn test_display_is_ordered_by_address() {
        let mut mem = Memory::default();
        assert_eq!(mem.to_string(), "{ }");
        mem.write(3, 1);
        mem.write(0, 5);
        assert_eq!(mem.to_string(), "{ (0)->5, (3)->1 }");
    }
}
