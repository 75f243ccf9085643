use crate::Phase;
use std::{ffi::OsString, path::PathBuf};

/// Runtime knobs of the solver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Suppress `c` diagnostic lines
    pub quiet: bool,
    /// Prefer target phases over saved phases when deciding
    pub target: bool,
    /// Phase of variables without any stored phase
    pub initial_phase: Phase,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            quiet: false,
            target: true,
            initial_phase: Phase::Positive,
        }
    }
}

pub const INIT_PHASE_FILE: &str = "--init-phase-file=";

/// Remove every `--init-phase-file=PATH` argument and return the last path
///
/// This runs before the remaining arguments are parsed, so the flag never reaches the
/// ordinary option parser.
///
/// ```rust
/// use initphase::options::extract_init_phase_file;
/// use std::{ffi::OsString, path::PathBuf};
///
/// let mut args: Vec<OsString> = ["initphase", "--init-phase-file=hint.txt", "a.cnf"]
///     .into_iter()
///     .map(OsString::from)
///     .collect();
/// assert_eq!(extract_init_phase_file(&mut args), Some(PathBuf::from("hint.txt")));
/// assert_eq!(args, vec![OsString::from("initphase"), OsString::from("a.cnf")]);
/// ```
pub fn extract_init_phase_file(args: &mut Vec<OsString>) -> Option<PathBuf> {
    let mut path = None;
    args.retain(|arg| {
        match arg.to_str().and_then(|arg| arg.strip_prefix(INIT_PHASE_FILE)) {
            Some(value) => {
                path = Some(PathBuf::from(value));
                false
            }
            None => true,
        }
    });
    path
}
