use proptest::prelude::*;
use std::{fmt, ops::Not};

/// Truth value of a literal, or the polarity stored for a variable
///
/// The same three-valued type is used for the assignment (per literal) and for the phase
/// arrays (per variable), so a saved phase is just a copy of an assigned value.
///
/// ```rust
/// use initphase::Phase;
///
/// assert_eq!(!Phase::Positive, Phase::Negative);
/// assert_eq!(!Phase::Unset, Phase::Unset);
/// assert_eq!(Phase::from(false), Phase::Negative);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i8)]
pub enum Phase {
    Negative = -1,
    #[default]
    Unset = 0,
    Positive = 1,
}

impl Phase {
    pub fn is_set(self) -> bool {
        self != Phase::Unset
    }

    /// `Some(true)` for [Phase::Positive], `Some(false)` for [Phase::Negative]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Phase::Positive => Some(true),
            Phase::Negative => Some(false),
            Phase::Unset => None,
        }
    }
}

impl From<bool> for Phase {
    fn from(positive: bool) -> Self {
        if positive {
            Phase::Positive
        } else {
            Phase::Negative
        }
    }
}

impl Not for Phase {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Phase::Positive => Phase::Negative,
            Phase::Negative => Phase::Positive,
            Phase::Unset => Phase::Unset,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Phase::Positive => write!(f, "+1"),
            Phase::Negative => write!(f, "-1"),
            Phase::Unset => write!(f, "d"),
        }
    }
}

impl Arbitrary for Phase {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(Phase::Positive),
            Just(Phase::Negative),
            Just(Phase::Unset),
        ]
        .boxed()
    }
}

/// Dense, 0-based variable index into the solver's variable universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(pub u32);

impl Variable {
    /// Largest variable whose literals still have a DIMACS encoding
    pub const MAX: Variable = Variable(i32::MAX as u32 - 1);

    /// Maximum size of a variable universe
    pub const MAX_VARS: usize = Variable::MAX.0 as usize + 1;

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for Variable {
    /// Panics if `index` does not fit into a DIMACS literal
    fn from(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(index) if index <= Variable::MAX.0 => Self(index),
            _ => panic!("Variable index {index} exceeds {}", Variable::MAX.0),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A variable together with its sign
///
/// # Order
///
/// - Literals are ordered by their variable
/// - If the variables are the same, positive literals are less than negative literals
///
/// ```rust
/// use initphase::lit;
///
/// let a = lit!(1);
/// let b = lit!(-1);
/// let c = lit!(2);
///
/// assert!(a < b); // x0 < ¬x0
/// assert!(b < c); // ¬x0 < x1
/// assert_eq!(a.to_string(), "x0");
/// assert_eq!(b.to_string(), "¬x0");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    pub var: Variable,
    pub positive: bool,
}

/// Literal from its DIMACS encoding, i.e. 1-based and negated for negative literals
#[macro_export]
macro_rules! lit {
    ($lit:expr) => {
        $crate::Literal::from_dimacs($lit)
    };
}

impl Literal {
    pub fn new(var: Variable, positive: bool) -> Self {
        Self { var, positive }
    }

    /// Similar to DIMACS format, literals are 1-indexed and negative literals are negated
    pub fn from_dimacs(lit: i32) -> Self {
        assert!(lit != 0, "0 is not allowed for a literal");
        Self {
            var: Variable(lit.unsigned_abs() - 1),
            positive: lit > 0,
        }
    }

    pub fn as_dimacs(&self) -> i32 {
        let id = self.var.0 as i32 + 1;
        if self.positive {
            id
        } else {
            -id
        }
    }

    /// Slot of this literal in a per-literal array, two slots per variable
    pub fn index(&self) -> usize {
        2 * self.var.index() + usize::from(!self.positive)
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            positive: !self.positive,
            ..self
        }
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.var.cmp(&other.var) {
            std::cmp::Ordering::Equal => self.positive.cmp(&other.positive).reverse(),
            ordering => ordering,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.var)
        } else {
            write!(f, "¬{}", self.var)
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Arbitrary for Literal {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..(i32::MAX as u32), any::<bool>())
            .prop_map(|(var, positive)| Self {
                var: Variable(var),
                positive,
            })
            .boxed()
    }
}
