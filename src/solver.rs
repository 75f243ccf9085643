use crate::{
    hint, Assignment, EngineHandle, Error, HintSummary, Options, PhaseHint, Phases, Result,
    Statistics, TerminationFlag, Variable,
};
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Solver state shared by the phase subsystem and the search loop
///
/// The phase arrays and the assignment always cover exactly [Solver::vars] variables.
#[derive(Debug, Default)]
pub struct Solver {
    options: Options,
    assignment: Assignment,
    phases: Phases,
    stats: Arc<Statistics>,
    flag: Arc<TerminationFlag>,
    init_phase_file: Option<PathBuf>,
    phases_locked: bool,
}

impl Solver {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Size of the variable universe
    pub fn vars(&self) -> usize {
        self.assignment.vars()
    }

    /// Grow or shrink the variable universe to `vars`
    pub fn resize(&mut self, vars: usize) -> Result<()> {
        if vars > Variable::MAX_VARS {
            return Err(Error::TooManyVariables {
                requested: vars,
                max: Variable::MAX_VARS,
            });
        }
        let old = self.vars();
        if vars > old {
            self.phases.grow(vars)?;
        } else if vars < old {
            self.phases.shrink(vars);
        }
        self.assignment.resize(vars);
        Ok(())
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn phases(&self) -> &Phases {
        &self.phases
    }

    pub fn assignment_mut(&mut self) -> &mut Assignment {
        &mut self.assignment
    }

    /// Both halves at once, for saving phases from the assignment
    pub fn parts_mut(&mut self) -> (&mut Assignment, &mut Phases) {
        (&mut self.assignment, &mut self.phases)
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn handle(&self) -> EngineHandle {
        EngineHandle::new(Arc::clone(&self.flag), Arc::clone(&self.stats))
    }

    pub fn terminate(&self) -> bool {
        self.flag.terminate()
    }

    pub fn is_terminated(&self) -> bool {
        self.flag.is_set()
    }

    /// Print a diagnostic `c` line unless quiet
    pub fn message(&self, args: fmt::Arguments<'_>) {
        if !self.options.quiet {
            println!("c {args}");
        }
    }

    pub fn set_init_phase_file(&mut self, path: PathBuf) {
        self.init_phase_file = Some(path);
    }

    pub fn init_phase_file(&self) -> Option<&Path> {
        self.init_phase_file.as_deref()
    }

    /// Load and apply the requested init phase file, if any
    ///
    /// Either the whole file is applied or, on error, the phases are left untouched.
    pub fn load_initial_phases(&mut self) -> Result<Option<HintSummary>> {
        let Some(path) = self.init_phase_file.take() else {
            return Ok(None);
        };
        let hint = hint::load(&path, self.vars())?;
        let summary = hint.summary();
        self.init_phases(hint)?;
        Ok(Some(summary))
    }

    /// Apply `hint` to the best and target phases, once and before solving
    pub fn init_phases(&mut self, hint: PhaseHint) -> Result<()> {
        if self.phases_locked {
            return Err(Error::HintReapplied);
        }
        if hint.len() != self.vars() {
            return Err(Error::HintLength {
                hint: hint.len(),
                vars: self.vars(),
            });
        }
        self.phases.apply(hint);
        self.phases_locked = true;
        Ok(())
    }

    /// Called by the search loop before its first decision, closes the window for initial phases
    pub fn start_search(&mut self) {
        self.phases_locked = true;
    }

    pub fn release(self) {
        log::debug!("releasing solver with {} variables", self.vars());
        self.phases.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lit, Phase, Variable};
    use std::io::Write;

    fn hint(text: &str, n: usize) -> PhaseHint {
        hint::parse(text, Path::new("hint.txt"), n).unwrap()
    }

    #[test]
    fn test_resize() {
        let mut solver = Solver::default();
        solver.resize(4).unwrap();
        assert_eq!(solver.vars(), 4);
        assert_eq!(solver.phases().len(), 4);

        solver.resize(2).unwrap();
        assert_eq!(solver.vars(), 2);
        assert_eq!(solver.phases().len(), 2);

        solver.resize(2).unwrap();
        assert_eq!(solver.phases().len(), 2);
    }

    #[test]
    fn test_resize_over_assigned() {
        let mut solver = Solver::default();
        solver.resize(3).unwrap();
        solver.assignment_mut().assign(lit!(3));
        solver.resize(1).unwrap();
        assert_eq!(solver.assignment().assigned(), 0);
        assert_eq!(solver.assignment().first_unassigned(), Some(Variable(0)));
    }

    #[test]
    fn test_resize_too_many_variables() {
        let mut solver = Solver::default();
        solver.resize(2).unwrap();
        let err = solver.resize(Variable::MAX_VARS + 1).unwrap_err();
        insta::assert_snapshot!(err, @"2147483648 variables exceed the maximum of 2147483647");
        assert_eq!(solver.vars(), 2);
        assert_eq!(solver.phases().len(), 2);
    }

    #[test]
    fn test_save_through_parts() {
        let mut solver = Solver::default();
        solver.resize(2).unwrap();
        let (assignment, phases) = solver.parts_mut();
        assignment.assign(lit!(-2));
        phases.save_target(assignment);
        assert_eq!(solver.phases().target()[Variable(1)], Phase::Negative);
        assert_eq!(solver.phases().target()[Variable(0)], Phase::Unset);
    }

    #[test]
    fn test_init_phases_once() {
        let mut solver = Solver::default();
        solver.resize(2).unwrap();
        solver.init_phases(hint("1 0", 2)).unwrap();
        assert!(matches!(
            solver.init_phases(hint("0 0", 2)),
            Err(Error::HintReapplied)
        ));
        assert_eq!(solver.phases().best()[Variable(1)], Phase::Negative);
        assert_eq!(solver.phases().best()[Variable(0)], Phase::Positive);
    }

    #[test]
    fn test_init_phases_after_start() {
        let mut solver = Solver::default();
        solver.resize(1).unwrap();
        solver.start_search();
        assert!(matches!(
            solver.init_phases(hint("1", 1)),
            Err(Error::HintReapplied)
        ));
    }

    #[test]
    fn test_hint_length_rejected() {
        let mut solver = Solver::default();
        solver.resize(3).unwrap();
        let before = solver.phases().clone();
        let err = solver.init_phases(hint("1 0", 2)).unwrap_err();
        assert!(matches!(err, Error::HintLength { hint: 2, vars: 3 }));
        assert_eq!(solver.phases(), &before);
    }

    #[test]
    fn test_load_initial_phases() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "+1 0 d").unwrap();

        let mut solver = Solver::default();
        assert_eq!(solver.load_initial_phases().unwrap(), None);

        solver.resize(3).unwrap();
        solver.set_init_phase_file(file.path().to_path_buf());
        let summary = solver.load_initial_phases().unwrap().unwrap();
        assert_eq!((summary.positive, summary.negative, summary.unset), (1, 1, 1));
        assert_eq!(summary.total, 3);
        assert_eq!(
            solver.phases().target().as_slice(),
            &[Phase::Positive, Phase::Negative, Phase::Unset]
        );
    }

    #[test]
    fn test_failed_load_leaves_phases() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "+1 maybe d").unwrap();

        let mut solver = Solver::default();
        solver.resize(3).unwrap();
        solver.set_init_phase_file(file.path().to_path_buf());
        let before = solver.phases().clone();
        let err = solver.load_initial_phases().unwrap_err();
        assert!(matches!(err, Error::Token { index: 1, .. }), "{err:?}");
        assert_eq!(solver.phases(), &before);
    }

    #[test]
    fn test_terminate() {
        let solver = Solver::default();
        let handle = solver.handle();
        assert!(!solver.is_terminated());
        assert!(handle.terminate());
        assert!(solver.is_terminated());
        assert!(!solver.terminate());
    }
}
