//! Reading initial phases from a hint file
//!
//! A hint file is a whitespace separated list with exactly one token per solver variable, in
//! internal variable order. Tokens are case-insensitive:
//!
//! | Tokens                          | Phase              |
//! |---------------------------------|--------------------|
//! | `+1`, `1`, `t`, `true`          | [Phase::Positive]  |
//! | `-1`, `0`, `f`, `false`         | [Phase::Negative]  |
//! | `d`, `x`, `none`, `skip`, `*`   | [Phase::Unset]     |

use crate::{Error, Phase, Result};
use serde::Serialize;
use std::{
    fmt,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

/// Validated initial phases, one per variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseHint {
    path: PathBuf,
    phases: Vec<Phase>,
}

impl PhaseHint {
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_slice(&self) -> &[Phase] {
        &self.phases
    }

    pub fn summary(&self) -> HintSummary {
        let count = |phase| self.phases.iter().filter(|&&p| p == phase).count();
        HintSummary {
            path: self.path.clone(),
            positive: count(Phase::Positive),
            negative: count(Phase::Negative),
            unset: count(Phase::Unset),
            total: self.phases.len(),
        }
    }
}

impl IntoIterator for PhaseHint {
    type Item = Phase;
    type IntoIter = std::vec::IntoIter<Phase>;

    fn into_iter(self) -> Self::IntoIter {
        self.phases.into_iter()
    }
}

/// Per-polarity token counts of a loaded hint file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintSummary {
    pub path: PathBuf,
    pub positive: usize,
    pub negative: usize,
    pub unset: usize,
    pub total: usize,
}

impl fmt::Display for HintSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "init-phase: parsed '{}': +1={}, -1={}, d={} (total {})",
            self.path.display(),
            self.positive,
            self.negative,
            self.unset,
            self.total
        )
    }
}

/// Phase of a single token, `None` if it is not part of the grammar
pub fn parse_token(token: &str) -> Option<Phase> {
    const POSITIVE: &[&str] = &["+1", "1", "t", "true"];
    const NEGATIVE: &[&str] = &["-1", "0", "f", "false"];
    const UNSET: &[&str] = &["d", "x", "none", "skip", "*"];

    let matches = |forms: &[&str]| forms.iter().any(|form| token.eq_ignore_ascii_case(form));
    if matches(POSITIVE) {
        Some(Phase::Positive)
    } else if matches(NEGATIVE) {
        Some(Phase::Negative)
    } else if matches(UNSET) {
        Some(Phase::Unset)
    } else {
        None
    }
}

/// Parse the contents of a hint file expected to hold `expected` tokens
///
/// ```rust
/// use initphase::{hint, Phase};
/// use std::path::Path;
///
/// let hint = hint::parse("+1 0 d", Path::new("hint.txt"), 3).unwrap();
/// assert_eq!(hint.as_slice(), &[Phase::Positive, Phase::Negative, Phase::Unset]);
/// ```
pub fn parse(text: &str, path: &Path, expected: usize) -> Result<PhaseHint> {
    let phases = text
        .split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            parse_token(token).ok_or_else(|| Error::Token {
                token: token.to_string(),
                index,
                path: path.to_path_buf(),
            })
        })
        .collect::<Result<Vec<Phase>>>()?;
    if phases.len() != expected {
        return Err(Error::CountMismatch {
            path: path.to_path_buf(),
            parsed: phases.len(),
            expected,
        });
    }
    Ok(PhaseHint {
        path: path.to_path_buf(),
        phases,
    })
}

/// Read and validate the hint file at `path`
pub fn load(path: &Path, expected: usize) -> Result<PhaseHint> {
    let mut file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    let hint = parse(&text, path, expected)?;
    log::debug!("read {} initial phases from '{}'", hint.len(), path.display());
    Ok(hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    fn token_of(phase: Phase) -> impl Strategy<Value = String> {
        let forms: &'static [&'static str] = match phase {
            Phase::Positive => &["+1", "1", "t", "true", "T", "TRUE", "True"],
            Phase::Negative => &["-1", "0", "f", "false", "F", "FALSE", "False"],
            Phase::Unset => &["d", "x", "none", "skip", "*", "D", "X", "NONE", "Skip"],
        };
        proptest::sample::select(forms).prop_map(str::to_string)
    }

    fn tokens_of(phases: Vec<Phase>) -> impl Strategy<Value = (Vec<Phase>, Vec<String>)> {
        let tokens: Vec<_> = phases.iter().map(|&p| token_of(p)).collect();
        (Just(phases), tokens)
    }

    proptest! {
        #[test]
        fn test_grammar(
            (phases, tokens) in proptest::collection::vec(any::<Phase>(), 0..32)
                .prop_flat_map(tokens_of),
            separator in proptest::sample::select(vec![" ", "\n", "\t", " \r\n  "]),
        ) {
            let text = tokens.join(separator);
            let hint = parse(&text, Path::new("hint.txt"), phases.len()).unwrap();
            prop_assert_eq!(hint.as_slice(), phases.as_slice());
        }

        #[test]
        fn test_invalid_token_position(
            (_, mut tokens) in proptest::collection::vec(any::<Phase>(), 1..32)
                .prop_flat_map(tokens_of),
            k in any::<prop::sample::Index>(),
        ) {
            let k = k.index(tokens.len());
            tokens[k] = "maybe".to_string();
            let n = tokens.len();
            match parse(&tokens.join(" "), Path::new("hint.txt"), n) {
                Err(Error::Token { token, index, .. }) => {
                    prop_assert_eq!(token, "maybe");
                    prop_assert_eq!(index, k);
                }
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }

        #[test]
        fn test_count_mismatch(
            (phases, tokens) in proptest::collection::vec(any::<Phase>(), 0..32)
                .prop_flat_map(tokens_of),
            expected in 0usize..40,
        ) {
            prop_assume!(expected != phases.len());
            match parse(&tokens.join(" "), Path::new("hint.txt"), expected) {
                Err(Error::CountMismatch { parsed, expected: e, .. }) => {
                    prop_assert_eq!(parsed, phases.len());
                    prop_assert_eq!(e, expected);
                }
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_rejects_near_misses() {
        for token in ["2", "+0", "yes", "tru", "--1", "0.0", "maybe", "**"] {
            assert_eq!(parse_token(token), None, "{token}");
        }
    }

    #[test]
    fn test_summary() {
        let hint = parse("+1 0 d", Path::new("hint.txt"), 3).unwrap();
        assert_eq!(
            hint.as_slice(),
            &[Phase::Positive, Phase::Negative, Phase::Unset]
        );
        insta::assert_snapshot!(
            hint.summary().to_string(),
            @"init-phase: parsed 'hint.txt': +1=1, -1=1, d=1 (total 3)"
        );
    }

    #[test]
    fn test_too_few_tokens() {
        let err = parse("+1 0", Path::new("hint.txt"), 3).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"init-phase file 'hint.txt' has 2 entries but solver has 3 variables"
        );
    }

    #[test]
    fn test_invalid_token() {
        let err = parse("1 maybe 0", Path::new("hint.txt"), 3).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"invalid token 'maybe' at index 1 in 'hint.txt' (use 1/0/d, +1/-1, true/false, ...)"
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "true false\n*  SKIP").unwrap();
        let hint = load(file.path(), 4).unwrap();
        assert_eq!(hint.path(), file.path());
        assert_eq!(
            hint.into_iter().collect::<Vec<_>>(),
            vec![Phase::Positive, Phase::Negative, Phase::Unset, Phase::Unset]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = load(&path, 1).unwrap_err();
        assert!(matches!(err, Error::FileOpen { .. }), "{err:?}");
        assert!(err.to_string().starts_with("could not open init phase file"));
    }

    #[test]
    fn test_load_non_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'1', b' ', 0xff, 0xfe]).unwrap();
        let err = load(file.path(), 2).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }), "{err:?}");
    }
}
