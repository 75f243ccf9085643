//! Per-variable phase arrays of the solver

use crate::{Assignment, Phase, Result, Variable};

mod buffer;

pub use buffer::PhaseVec;

/// The `best`, `saved` and `target` phases of every variable
///
/// All three arrays always have the same length, the size of the variable universe.
///
/// ```rust
/// use initphase::{lit, Assignment, Phase, Phases, Variable};
///
/// let mut phases = Phases::default();
/// phases.grow(2).unwrap();
///
/// let mut assignment = Assignment::new(2);
/// assignment.assign(lit!(-1));
/// phases.save_best(&assignment);
/// assert_eq!(phases.best()[Variable(0)], Phase::Negative);
/// assert_eq!(phases.best()[Variable(1)], Phase::Unset);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Phases {
    pub(crate) best: PhaseVec,
    pub(crate) saved: PhaseVec,
    pub(crate) target: PhaseVec,
}

impl Phases {
    /// Number of variables covered
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.best.len(), self.saved.len());
        debug_assert_eq!(self.best.len(), self.target.len());
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn best(&self) -> &PhaseVec {
        &self.best
    }

    pub fn saved(&self) -> &PhaseVec {
        &self.saved
    }

    pub fn target(&self) -> &PhaseVec {
        &self.target
    }

    /// Grow all arrays to `new_size`, new variables start [Phase::Unset]
    ///
    /// Memory for all three arrays is reserved up front, so on failure nothing has changed.
    pub fn grow(&mut self, new_size: usize) -> Result<()> {
        let old_size = self.len();
        assert!(old_size < new_size, "Growing phases to a smaller size");
        log::debug!("increasing phases from {old_size} to {new_size}");
        self.best.reserve(new_size)?;
        self.saved.reserve(new_size)?;
        self.target.reserve(new_size)?;
        self.best.grow(new_size)?;
        self.saved.grow(new_size)?;
        self.target.grow(new_size)?;
        Ok(())
    }

    pub fn shrink(&mut self, new_size: usize) {
        let old_size = self.len();
        assert!(old_size > new_size, "Shrinking phases to a larger size");
        log::debug!("decreasing phases from {old_size} to {new_size}");
        self.best.shrink(new_size);
        self.saved.shrink(new_size);
        self.target.shrink(new_size);
    }

    pub fn release(self) {
        log::debug!("releasing phases of {} variables", self.len());
    }

    pub fn save_best(&mut self, assignment: &Assignment) {
        log::debug!("saving {} best values", self.len());
        save_phases(&mut self.best, assignment);
    }

    pub fn save_target(&mut self, assignment: &Assignment) {
        log::debug!("saving {} target values", self.len());
        save_phases(&mut self.target, assignment);
    }

    /// Remember the value `var` had before being unassigned
    pub fn save(&mut self, var: Variable, value: Phase) {
        if value.is_set() {
            self.saved[var] = value;
        }
    }

    /// Polarity to try when deciding on `var`
    ///
    /// The target phase wins if enabled and set, then the saved phase, then `initial`.
    pub fn decision_phase(&self, var: Variable, use_target: bool, initial: Phase) -> Phase {
        if use_target && self.target[var].is_set() {
            return self.target[var];
        }
        if self.saved[var].is_set() {
            return self.saved[var];
        }
        initial
    }
}

/// Copy the value of every assigned variable, unassigned ones keep their phase
fn save_phases(phases: &mut PhaseVec, assignment: &Assignment) {
    debug_assert_eq!(phases.len(), assignment.vars());
    for (phase, value) in phases.iter_mut().zip(assignment.var_values()) {
        if value.is_set() {
            *phase = value;
        }
    }
}
