use crate::{Literal, Variable};
use anyhow::{bail, ensure, Context, Result};
use std::{fmt, path::Path};

/// Clauses of a DIMACS CNF file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formula {
    vars: usize,
    clauses: Vec<Vec<Literal>>,
}

impl Formula {
    /// Parse a DIMACS CNF file
    ///
    /// ```rust
    /// use initphase::{lit, Formula};
    ///
    /// let formula = Formula::from_dimacs("c example\np cnf 2 2\n1 -2 0\n2 0\n").unwrap();
    /// assert_eq!(formula.vars(), 2);
    /// assert_eq!(formula.clauses()[0], vec![lit!(1), lit!(-2)]);
    /// assert_eq!(formula.to_string(), "p cnf 2 2\n1 -2 0\n2 0\n");
    /// ```
    pub fn from_dimacs(text: &str) -> Result<Self> {
        let mut header = None;
        let mut clauses = Vec::new();
        let mut clause = Vec::new();
        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('c') {
                continue;
            }
            // SATLIB end marker
            if line.starts_with('%') {
                break;
            }
            if line.starts_with('p') {
                ensure!(header.is_none(), "Duplicate header at line {}", n + 1);
                header = Some(parse_header(line).with_context(|| format!("line {}", n + 1))?);
                continue;
            }
            let Some((vars, _)) = header else {
                bail!("Clause before header at line {}", n + 1);
            };
            for token in line.split_whitespace() {
                let lit: i32 = token
                    .parse()
                    .with_context(|| format!("Invalid literal '{token}' at line {}", n + 1))?;
                if lit == 0 {
                    clauses.push(std::mem::take(&mut clause));
                    continue;
                }
                ensure!(
                    lit.unsigned_abs() as usize <= vars,
                    "Literal {lit} exceeds {vars} variables at line {}",
                    n + 1
                );
                clause.push(Literal::from_dimacs(lit));
            }
        }
        let Some((vars, num_clauses)) = header else {
            bail!("Missing 'p cnf' header");
        };
        ensure!(clause.is_empty(), "Last clause is not terminated by 0");
        ensure!(
            clauses.len() == num_clauses,
            "Header declares {num_clauses} clauses but found {}",
            clauses.len()
        );
        Ok(Self { vars, clauses })
    }

    pub fn from_dimacs_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        Self::from_dimacs(&text).with_context(|| format!("Failed to parse '{}'", path.display()))
    }

    pub fn vars(&self) -> usize {
        self.vars
    }

    pub fn clauses(&self) -> &[Vec<Literal>] {
        &self.clauses
    }
}

fn parse_header(line: &str) -> Result<(usize, usize)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let ["p", "cnf", vars, clauses] = fields.as_slice() else {
        bail!("Invalid header '{line}'");
    };
    let vars: usize = vars.parse().context("Invalid number of variables")?;
    ensure!(
        vars <= Variable::MAX_VARS,
        "{vars} variables exceed the maximum of {}",
        Variable::MAX_VARS
    );
    let clauses = clauses.parse().context("Invalid number of clauses")?;
    Ok((vars, clauses))
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.vars, self.clauses.len())?;
        for clause in &self.clauses {
            for lit in clause {
                write!(f, "{} ", lit.as_dimacs())?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit;

    #[test]
    fn test_multiline_clause() {
        let formula = Formula::from_dimacs("p cnf 3 2\n1 2\n-3 0 3\n0\n%\n0\n").unwrap();
        assert_eq!(
            formula.clauses(),
            &[vec![lit!(1), lit!(2), lit!(-3)], vec![lit!(3)]]
        );
    }

    #[test]
    fn test_errors() {
        let err = |text| Formula::from_dimacs(text).unwrap_err().to_string();
        insta::assert_snapshot!(err("1 2 0\n"), @"Clause before header at line 1");
        insta::assert_snapshot!(err("p cnf 1 1\n2 0\n"), @"Literal 2 exceeds 1 variables at line 2");
        insta::assert_snapshot!(err("p cnf 2 1\n1 2\n"), @"Last clause is not terminated by 0");
        insta::assert_snapshot!(err("p cnf 2 2\n1 2 0\n"), @"Header declares 2 clauses but found 1");
        insta::assert_snapshot!(err("c nothing\n"), @"Missing 'p cnf' header");
        insta::assert_snapshot!(err("p dnf 2 2\n"), @"line 1");
    }

    #[test]
    fn test_header_variable_limit() {
        let err = Formula::from_dimacs("p cnf 2147483648 0\n").unwrap_err();
        insta::assert_snapshot!(
            format!("{err:#}"),
            @"line 1: 2147483648 variables exceed the maximum of 2147483647"
        );
        let formula = Formula::from_dimacs("p cnf 2147483647 0\n").unwrap();
        assert_eq!(formula.vars(), Variable::MAX_VARS);
    }
}
