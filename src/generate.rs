//! Producing init phase files from ranked variable predictions
//!
//! The input is JSON lines, one `{"index": <0-based variable>, "assignment": 0 | 1}` object
//! per line, ordered from the most to the least confident prediction. The output is the
//! space separated `1`/`0`/`d` format read by [crate::hint::load], covering every variable up
//! to the largest index seen.

use crate::Phase;
use anyhow::{bail, ensure, Context, Result};
use serde_json::Value;
use std::{fmt, fs, path::Path};

/// One line of the ranked input, kept even when it does not describe a usable prediction
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    line: usize,
    value: Value,
}

impl Prediction {
    /// 0-based variable index, if present and non-negative
    pub fn index(&self) -> Option<usize> {
        self.value
            .get("index")?
            .as_u64()
            .and_then(|index| usize::try_from(index).ok())
    }

    /// Predicted phase, only `0` and `1` are accepted
    pub fn phase(&self) -> Option<Phase> {
        match self.value.get("assignment")?.as_u64()? {
            0 => Some(Phase::Negative),
            1 => Some(Phase::Positive),
            _ => None,
        }
    }
}

/// Read the ranked predictions, blank lines are ignored
pub fn parse(text: &str) -> Result<Vec<Prediction>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            let value = serde_json::from_str(line)
                .with_context(|| format!("Invalid JSON at line {}", n + 1))?;
            Ok(Prediction { line: n + 1, value })
        })
        .collect()
}

/// Number of predictions kept for `vars` variables when only the top fraction `topk` is used
///
/// A positive fraction always keeps at least one prediction.
pub fn top_count(vars: usize, topk: f64) -> usize {
    let k = (vars as f64 * topk).ceil() as usize;
    if k == 0 && topk > 0.0 {
        1
    } else {
        k
    }
}

/// Phases for every variable up to the largest predicted index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub phases: Vec<Phase>,
    /// Kept predictions without a valid index or assignment
    pub skipped: usize,
}

impl Generated {
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

/// Build the phases from `predictions`, using only the first `top_count` of them if `topk` is set
///
/// ```rust
/// use initphase::generate;
///
/// let predictions = generate::parse(r#"
/// {"index": 3, "assignment": 1}
/// {"index": 0, "assignment": 0}
/// "#).unwrap();
/// let generated = generate::generate(&predictions, None).unwrap();
/// assert_eq!(generated.to_string(), "0 d d 1");
/// ```
pub fn generate(predictions: &[Prediction], topk: Option<f64>) -> Result<Generated> {
    let Some(max_index) = predictions.iter().filter_map(Prediction::index).max() else {
        bail!("No prediction with a variable index");
    };
    let vars = max_index + 1;
    let mut phases = vec![Phase::Unset; vars];

    let kept = match topk {
        Some(topk) => {
            ensure!(
                topk.is_finite() && topk >= 0.0,
                "Invalid top-k fraction {topk}"
            );
            let k = top_count(vars, topk).min(predictions.len());
            log::debug!("keeping {k} of {} predictions", predictions.len());
            &predictions[..k]
        }
        None => predictions,
    };

    let mut skipped = 0;
    for prediction in kept {
        match (prediction.index(), prediction.phase()) {
            (Some(index), Some(phase)) => phases[index] = phase,
            _ => {
                log::warn!(
                    "skipping prediction at line {}: {}",
                    prediction.line,
                    prediction.value
                );
                skipped += 1;
            }
        }
    }
    Ok(Generated { phases, skipped })
}

/// Read ranked predictions from `input` and write the init phase file to `output`
pub fn generate_file(input: &Path, output: &Path, topk: Option<f64>) -> Result<Generated> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let predictions =
        parse(&text).with_context(|| format!("Failed to parse '{}'", input.display()))?;
    ensure!(!predictions.is_empty(), "No predictions in '{}'", input.display());
    let generated = generate(&predictions, topk)?;
    fs::write(output, generated.to_string())
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    Ok(generated)
}

impl fmt::Display for Generated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, phase) in self.phases.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            let token = match phase {
                Phase::Positive => "1",
                Phase::Negative => "0",
                Phase::Unset => "d",
            };
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
