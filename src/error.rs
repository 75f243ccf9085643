use std::{io, path::PathBuf};

/// Errors raised while sizing the phase arrays or reading initial phases
///
/// Everything except [Error::Allocation] happens at startup, before any phase is touched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to allocate phases for {requested} variables")]
    Allocation { requested: usize },

    #[error("{requested} variables exceed the maximum of {max}")]
    TooManyVariables { requested: usize, max: usize },

    #[error("could not open init phase file '{}'", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read init phase file '{}'", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "invalid token '{token}' at index {index} in '{}' (use 1/0/d, +1/-1, true/false, ...)",
        .path.display()
    )]
    Token {
        token: String,
        index: usize,
        path: PathBuf,
    },

    #[error(
        "init-phase file '{}' has {parsed} entries but solver has {expected} variables",
        .path.display()
    )]
    CountMismatch {
        path: PathBuf,
        parsed: usize,
        expected: usize,
    },

    #[error("initial phases cover {hint} variables but solver has {vars} variables")]
    HintLength { hint: usize, vars: usize },

    #[error("initial phases can only be applied once, before solving starts")]
    HintReapplied,
}

pub type Result<T> = std::result::Result<T, Error>;
