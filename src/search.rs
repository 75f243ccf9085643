//! Reference search loop
//!
//! DPLL with chronological backtracking. Decisions take the smallest unassigned variable and
//! the polarity suggested by the phase store, which is where initial phases show their effect.

use crate::{Formula, Literal, Phase, Solver, Variable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Satisfying assignment, one literal per variable
    Sat(Vec<Literal>),
    UnSat,
    /// Stopped by the termination flag
    Unknown,
}

impl Outcome {
    /// Exit code following the SAT competition convention
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Sat(_) => 10,
            Outcome::UnSat => 20,
            Outcome::Unknown => 0,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Sat(_) => "SATISFIABLE",
            Outcome::UnSat => "UNSATISFIABLE",
            Outcome::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    lit: Literal,
    decision: bool,
    /// The other polarity of this decision has already failed
    flipped: bool,
}

#[derive(Debug)]
pub struct Search<'a> {
    formula: &'a Formula,
    trail: Vec<Entry>,
    best_assigned: usize,
    target_assigned: usize,
}

impl<'a> Search<'a> {
    pub fn new(formula: &'a Formula) -> Self {
        Self {
            formula,
            trail: Vec::new(),
            best_assigned: 0,
            target_assigned: 0,
        }
    }

    pub fn run(mut self, solver: &mut Solver) -> Outcome {
        assert_eq!(solver.vars(), self.formula.vars(), "Solver is not sized");
        solver.start_search();
        loop {
            if solver.is_terminated() {
                log::debug!("search terminated");
                return Outcome::Unknown;
            }
            if !self.propagate(solver) {
                solver.statistics().conflict();
                self.save_phases(solver);
                if !self.backtrack(solver) {
                    return Outcome::UnSat;
                }
                continue;
            }
            let Some(var) = solver.assignment().first_unassigned() else {
                return Outcome::Sat(model(solver));
            };
            let options = solver.options();
            let phase = solver
                .phases()
                .decision_phase(var, options.target, options.initial_phase);
            let lit = Literal::new(var, phase != Phase::Negative);
            log::trace!("Decision: {}", lit);
            solver.statistics().decision();
            self.assign(solver, lit, true);
        }
    }

    /// Number of decisions on the trail
    fn level(&self) -> usize {
        self.trail.iter().filter(|entry| entry.decision).count()
    }

    fn assign(&mut self, solver: &mut Solver, lit: Literal, decision: bool) {
        solver.assignment_mut().assign(lit);
        self.trail.push(Entry {
            lit,
            decision,
            flipped: false,
        });
    }

    /// Assign unit literals until fixpoint. Returns `false` on a conflict.
    fn propagate(&mut self, solver: &mut Solver) -> bool {
        let formula = self.formula;
        loop {
            let mut changed = false;
            for clause in formula.clauses() {
                let mut satisfied = false;
                let mut unassigned = None;
                let mut open = 0;
                for &lit in clause {
                    match solver.assignment().value(lit) {
                        Phase::Positive => {
                            satisfied = true;
                            break;
                        }
                        Phase::Negative => {}
                        Phase::Unset => {
                            open += 1;
                            unassigned = Some(lit);
                        }
                    }
                }
                if satisfied {
                    continue;
                }
                match (open, unassigned) {
                    (0, _) => return false,
                    (1, Some(lit)) => {
                        solver.statistics().propagation();
                        self.assign(solver, lit, false);
                        changed = true;
                    }
                    _ => {}
                }
            }
            if !changed {
                return true;
            }
        }
    }

    /// Record target and best phases whenever the conflicting trail is the longest so far
    fn save_phases(&mut self, solver: &mut Solver) {
        let (assignment, phases) = solver.parts_mut();
        let assigned = assignment.assigned();
        if assigned > self.target_assigned {
            phases.save_target(assignment);
            self.target_assigned = assigned;
        }
        if assigned > self.best_assigned {
            phases.save_best(assignment);
            self.best_assigned = assigned;
        }
    }

    /// Undo the trail up to the last unflipped decision and flip it
    fn backtrack(&mut self, solver: &mut Solver) -> bool {
        while let Some(entry) = self.trail.pop() {
            let (assignment, phases) = solver.parts_mut();
            let value = assignment.unassign(entry.lit.var);
            phases.save(entry.lit.var, value);
            if entry.decision && !entry.flipped {
                if self.level() == 0 {
                    // Back at the root, target phases track the new subtree
                    self.target_assigned = 0;
                }
                assignment.assign(!entry.lit);
                self.trail.push(Entry {
                    lit: !entry.lit,
                    decision: true,
                    flipped: true,
                });
                return true;
            }
        }
        false
    }
}

fn model(solver: &Solver) -> Vec<Literal> {
    solver
        .assignment()
        .var_values()
        .enumerate()
        .map(|(index, value)| Literal::new(Variable::from(index), value == Phase::Positive))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hint, lit, Options};
    use std::path::Path;

    fn solve(formula: &Formula) -> (Outcome, Solver) {
        let mut solver = Solver::default();
        solver.resize(formula.vars()).unwrap();
        let outcome = Search::new(formula).run(&mut solver);
        (outcome, solver)
    }

    fn satisfies(formula: &Formula, model: &[Literal]) -> bool {
        formula
            .clauses()
            .iter()
            .all(|clause| clause.iter().any(|lit| model.contains(lit)))
    }

    #[test]
    fn test_single_solution_cases() {
        for (formula, expected) in crate::testing::single_solution_cases() {
            let (outcome, _) = solve(&formula);
            assert_eq!(outcome, expected, "Failed on {formula}");
        }
    }

    #[test]
    fn test_unsat() {
        // From Knuth 4B (112)
        let formula = Formula::from_dimacs(
            "p cnf 4 6\n1 2 3 4 0\n1 -2 0\n-1 -2 -3 0\n-1 3 0\n2 -3 0\n3 -4 0\n",
        )
        .unwrap();
        let (outcome, solver) = solve(&formula);
        assert_eq!(outcome, Outcome::UnSat);
        assert_eq!(outcome.exit_code(), 20);
        assert!(solver.statistics().snapshot().conflicts > 0);
    }

    #[test]
    fn test_sat_model() {
        let formula =
            Formula::from_dimacs("p cnf 4 4\n1 2 0\n-1 3 0\n-3 -2 0\n2 4 -1 0\n").unwrap();
        let (outcome, _) = solve(&formula);
        let Outcome::Sat(model) = outcome else {
            panic!("Expected SAT, got {outcome:?}");
        };
        assert!(satisfies(&formula, &model));
    }

    #[test]
    fn test_conflict_saves_phases() {
        let formula = Formula::from_dimacs("p cnf 2 2\n-1 2 0\n-1 -2 0\n").unwrap();
        let (outcome, solver) = solve(&formula);
        assert_eq!(outcome, Outcome::Sat(vec![lit!(-1), lit!(2)]));

        // The conflict after x0 → x1 stored both polarities
        let phases = solver.phases();
        assert_eq!(phases.target().as_slice(), &[Phase::Positive; 2]);
        assert_eq!(phases.best().as_slice(), &[Phase::Positive; 2]);
        assert_eq!(phases.saved().as_slice(), &[Phase::Positive; 2]);
        let stats = solver.statistics().snapshot();
        assert_eq!((stats.decisions, stats.conflicts), (2, 1));
    }

    #[test]
    fn test_initial_phases_guide_decisions() {
        let formula = Formula::from_dimacs("p cnf 3 0\n").unwrap();
        let mut solver = Solver::default();
        solver.resize(3).unwrap();
        solver
            .init_phases(hint::parse("0 1 d", Path::new("hint.txt"), 3).unwrap())
            .unwrap();
        let outcome = Search::new(&formula).run(&mut solver);
        assert_eq!(outcome, Outcome::Sat(vec![lit!(-1), lit!(2), lit!(3)]));
        assert_eq!(solver.statistics().snapshot().decisions, 3);
    }

    #[test]
    fn test_initial_phase_option() {
        let formula = Formula::from_dimacs("p cnf 2 0\n").unwrap();
        let mut solver = Solver::new(Options {
            initial_phase: Phase::Negative,
            ..Default::default()
        });
        solver.resize(2).unwrap();
        let outcome = Search::new(&formula).run(&mut solver);
        assert_eq!(outcome, Outcome::Sat(vec![lit!(-1), lit!(-2)]));
    }

    #[test]
    fn test_terminated() {
        let formula = Formula::from_dimacs("p cnf 2 1\n1 2 0\n").unwrap();
        let mut solver = Solver::default();
        solver.resize(2).unwrap();
        solver.terminate();
        let outcome = Search::new(&formula).run(&mut solver);
        assert_eq!(outcome, Outcome::Unknown);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(solver.assignment().assigned(), 0);
    }
}
