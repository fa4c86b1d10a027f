//! Label name -> program position index.

use std::collections::HashMap;

use ram_syntax::error::{error, ErrorKind, Result};

use crate::program::Position;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    table: HashMap<String, Position>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `label` to `pos`. A label may only be bound once.
    pub fn register(&mut self, label: &str, pos: Position) -> Result<()> {
        if self.table.contains_key(label) {
            return error(ErrorKind::DuplicateLabel(label.to_string()));
        }
        self.table.insert(label.to_string(), pos);
        Ok(())
    }

    pub fn resolve(&self, label: &str) -> Result<Position> {
        match self.table.get(label) {
            Some(pos) => Ok(*pos),
            None => error(ErrorKind::LabelNotFound(label.to_string())),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.table.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Labels sorted by the position they point to.
    pub fn entries(&self) -> Vec<(&str, Position)> {
        let mut entries: Vec<_> = self.table.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        entries
    }
}
