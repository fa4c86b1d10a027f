//! Input and output tapes.

use std::collections::VecDeque;
use std::fmt;

/// FIFO sequence of integers. The input tape is consumed from the front, the
/// output tape is only ever appended to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<i64>,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: i64) {
        self.cells.push_back(value);
    }

    pub fn pop(&mut self) -> Option<i64> {
        self.cells.pop_front()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &i64> {
        self.cells.iter()
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.cells.iter().copied().collect()
    }
}

impl From<Vec<i64>> for Tape {
    fn from(values: Vec<i64>) -> Self {
        Self { cells: values.into() }
    }
}

impl FromIterator<i64> for Tape {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cells.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        for (i, v) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut tape = Tape::from(vec![3, 1]);
        tape.push(4);
        assert_eq!(tape.pop(), Some(3));
        assert_eq!(tape.to_vec(), vec![1, 4]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Tape::new().to_string(), "{ }");
        assert_eq!(Tape::from_iter([1, -2, 3]).to_string(), "{ 1, -2, 3 }");
    }
}
