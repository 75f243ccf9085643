use crate::{Error, Phase, Result, Variable};
use std::ops::{Index, IndexMut};

/// Growable per-variable array of phases
///
/// Growing zero-fills the new tail with [Phase::Unset], shrinking keeps the prefix and returns
/// the surplus capacity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhaseVec(Vec<Phase>);

impl PhaseVec {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    pub fn as_slice(&self) -> &[Phase] {
        &self.0
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Phase> {
        self.0.iter_mut()
    }

    /// Make sure growing to `new_len` cannot fail afterwards
    pub fn reserve(&mut self, new_len: usize) -> Result<()> {
        let additional = new_len.saturating_sub(self.len());
        self.0
            .try_reserve_exact(additional)
            .map_err(|_| Error::Allocation { requested: new_len })
    }

    pub fn grow(&mut self, new_len: usize) -> Result<()> {
        assert!(new_len > self.len(), "Growing to a smaller size");
        self.reserve(new_len)?;
        self.0.resize(new_len, Phase::Unset);
        Ok(())
    }

    pub fn shrink(&mut self, new_len: usize) {
        assert!(new_len < self.len(), "Shrinking to a larger size");
        self.0.truncate(new_len);
        self.0.shrink_to(new_len);
    }
}

impl Index<Variable> for PhaseVec {
    type Output = Phase;

    fn index(&self, var: Variable) -> &Phase {
        &self.0[var.index()]
    }
}

impl IndexMut<Variable> for PhaseVec {
    fn index_mut(&mut self, var: Variable) -> &mut Phase {
        &mut self.0[var.index()]
    }
}
