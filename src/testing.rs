use crate::{lit, Formula, Outcome};

fn formula(dimacs: &str) -> Formula {
    Formula::from_dimacs(dimacs).expect("Invalid test formula")
}

/// Formulas with exactly one model, in DIMACS variable numbering
pub fn single_solution_cases() -> Vec<(Formula, Outcome)> {
    vec![
        // True
        (formula("p cnf 0 0\n"), Outcome::Sat(vec![])),
        // False
        (formula("p cnf 0 1\n0\n"), Outcome::UnSat),
        // x3
        (
            formula("p cnf 3 3\n3 0\n-1 0\n-2 0\n"),
            Outcome::Sat(vec![lit!(-1), lit!(-2), lit!(3)]),
        ),
        // ¬x1
        (formula("p cnf 1 1\n-1 0\n"), Outcome::Sat(vec![lit!(-1)])),
        // x1 ∧ x2
        (
            formula("p cnf 2 2\n1 0\n2 0\n"),
            Outcome::Sat(vec![lit!(1), lit!(2)]),
        ),
        // x1 ∧ ¬x2
        (
            formula("p cnf 2 2\n1 0\n-2 0\n"),
            Outcome::Sat(vec![lit!(1), lit!(-2)]),
        ),
        // ¬x1 ∧ x2
        (
            formula("p cnf 2 2\n-1 0\n2 0\n"),
            Outcome::Sat(vec![lit!(-1), lit!(2)]),
        ),
        // ¬x1 ∧ ¬x2, only reachable after a conflict
        (
            formula("p cnf 2 3\n-1 -2 0\n-1 2 0\n1 -2 0\n"),
            Outcome::Sat(vec![lit!(-1), lit!(-2)]),
        ),
        // x1 ∧ x2 ∧ x3 through a chain of implications
        (
            formula("p cnf 3 3\n1 0\n-1 2 0\n-2 3 0\n"),
            Outcome::Sat(vec![lit!(1), lit!(2), lit!(3)]),
        ),
    ]
}
