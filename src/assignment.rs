use crate::{Literal, Phase, Variable};

/// Current truth value of every literal, two slots per variable
///
/// The slots of `x` and `¬x` always hold inverse values; both are [Phase::Unset] while the
/// variable is free.
///
/// ```rust
/// use initphase::{lit, Assignment, Phase};
///
/// let mut assignment = Assignment::new(2);
/// assignment.assign(lit!(-2));
/// assert_eq!(assignment.value(lit!(2)), Phase::Negative);
/// assert_eq!(assignment.value(lit!(-2)), Phase::Positive);
/// assert_eq!(assignment.value(lit!(1)), Phase::Unset);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    values: Vec<Phase>,
    assigned: usize,
}

impl Assignment {
    pub fn new(vars: usize) -> Self {
        Self {
            values: vec![Phase::Unset; 2 * vars],
            assigned: 0,
        }
    }

    /// Number of variables
    pub fn vars(&self) -> usize {
        self.values.len() / 2
    }

    /// Number of currently assigned variables
    pub fn assigned(&self) -> usize {
        self.assigned
    }

    /// Resize to `vars` variables, removed variables are unassigned first
    pub fn resize(&mut self, vars: usize) {
        if vars < self.vars() {
            let removed = self.values[2 * vars..]
                .iter()
                .step_by(2)
                .filter(|value| value.is_set())
                .count();
            self.assigned -= removed;
        }
        self.values.resize(2 * vars, Phase::Unset);
    }

    pub fn value(&self, lit: Literal) -> Phase {
        self.values[lit.index()]
    }

    /// Value of the positive literal of `var`
    pub fn var_value(&self, var: Variable) -> Phase {
        self.values[2 * var.index()]
    }

    /// Values of all positive literals in variable order
    pub fn var_values(&self) -> impl Iterator<Item = Phase> + '_ {
        self.values.iter().step_by(2).copied()
    }

    /// Make `lit` true
    pub fn assign(&mut self, lit: Literal) {
        debug_assert!(!self.value(lit).is_set(), "{lit} is already assigned");
        self.values[lit.index()] = Phase::Positive;
        self.values[(!lit).index()] = Phase::Negative;
        self.assigned += 1;
    }

    /// Free `var` again, returning the value its positive literal had
    pub fn unassign(&mut self, var: Variable) -> Phase {
        let positive = Literal::new(var, true);
        let value = std::mem::take(&mut self.values[positive.index()]);
        self.values[(!positive).index()] = Phase::Unset;
        if value.is_set() {
            self.assigned -= 1;
        }
        value
    }

    /// Smallest unassigned variable
    pub fn first_unassigned(&self) -> Option<Variable> {
        self.var_values()
            .position(|value| !value.is_set())
            .map(Variable::from)
    }
}
