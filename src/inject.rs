use crate::{PhaseHint, Phases, Variable};

impl Phases {
    /// Bias the search toward the polarities of `hint`
    ///
    /// Every set entry is written into the best and target phases, unset entries leave the
    /// variable to the usual heuristics. The assignment itself is never touched, so no variable
    /// is fixed before the search starts.
    ///
    /// ```rust
    /// use initphase::{hint, Phase, Phases, Variable};
    /// use std::path::Path;
    ///
    /// let mut phases = Phases::default();
    /// phases.grow(3).unwrap();
    /// phases.apply(hint::parse("1 d 0", Path::new("hint.txt"), 3).unwrap());
    ///
    /// assert_eq!(phases.target()[Variable(0)], Phase::Positive);
    /// assert_eq!(phases.best()[Variable(1)], Phase::Unset);
    /// assert_eq!(phases.best()[Variable(2)], Phase::Negative);
    /// assert_eq!(phases.saved()[Variable(0)], Phase::Unset);
    /// ```
    pub fn apply(&mut self, hint: PhaseHint) {
        assert_eq!(hint.len(), self.len(), "Initial phases of wrong length");
        let mut applied = 0;
        for (index, phase) in hint.into_iter().enumerate() {
            if !phase.is_set() {
                continue;
            }
            let var = Variable::from(index);
            self.best[var] = phase;
            self.target[var] = phase;
            applied += 1;
        }
        log::debug!(
            "init-phase: applied {applied} of {} phases to target/best",
            self.len()
        );
    }
}
