//! Duration probability distributions.
//!
//! A `DurationProba` is written either as a plain number of seconds or as a
//! table of `[low, high, percent]` rows:
//!
//! ```text
//! 30                         always 30 s
//! [[20, 40, 90], [40, 120, 10]]  90 % in 20–40 s, 10 % in 40–120 s
//! ```
//!
//! Sampling picks a row by cumulative percentage, then a uniform value in
//! `[low, high]`.  An empty table is "null": callers fall back to the
//! matching simulation option.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// One `[low, high, percent]` row.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ProbaRange(pub f64, pub f64, pub f64);

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationProba {
    Fixed(f64),
    Table(Vec<ProbaRange>),
}

impl Default for DurationProba {
    fn default() -> Self {
        DurationProba::Table(Vec::new())
    }
}

impl DurationProba {
    /// A distribution that always yields `secs`.
    pub fn fixed(secs: f64) -> Self {
        DurationProba::Fixed(secs)
    }

    /// Parse the JSON text form (a number or a list of triples).
    ///
    /// A blank string parses to the null distribution.
    pub fn parse(s: &str) -> CoreResult<Self> {
        if s.trim().is_empty() {
            return Ok(DurationProba::default());
        }
        let proba: DurationProba = serde_json::from_str(s)?;
        proba.validate()?;
        Ok(proba)
    }

    /// Reject rows with `low > high`, negative percentages, or non-finite values.
    pub fn validate(&self) -> CoreResult<()> {
        match self {
            DurationProba::Fixed(v) if !v.is_finite() => {
                Err(CoreError::Parse(format!("duration {v} is not finite")))
            }
            DurationProba::Fixed(_) => Ok(()),
            DurationProba::Table(rows) => {
                for &ProbaRange(low, high, pct) in rows {
                    if !(low.is_finite() && high.is_finite() && pct.is_finite()) || low > high || pct < 0.0 {
                        return Err(CoreError::Parse(format!(
                            "invalid duration row [{low}, {high}, {pct}]"
                        )));
                    }
                }
                Ok(())
            }
        }
    }

    /// `true` if this distribution carries no information.
    pub fn is_null(&self) -> bool {
        matches!(self, DurationProba::Table(rows) if rows.is_empty())
    }

    /// Draw one duration in seconds.  The null distribution yields 0.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        let rows = match self {
            DurationProba::Fixed(v) => return *v,
            DurationProba::Table(rows) => rows,
        };
        let Some(last) = rows.last() else {
            return 0.0;
        };
        let roll: f64 = rng.gen_range(0.0..100.0);
        let mut cumulative = 0.0;
        let row = rows
            .iter()
            .find(|r| {
                cumulative += r.2;
                roll < cumulative
            })
            .unwrap_or(last);
        if row.0 >= row.1 {
            row.0
        } else {
            rng.gen_range(row.0..=row.1)
        }
    }
}

impl fmt::Display for DurationProba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationProba::Fixed(v) => write!(f, "{v}"),
            DurationProba::Table(rows) => {
                write!(f, "[")?;
                for (i, ProbaRange(low, high, pct)) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "[{low},{high},{pct}]")?;
                }
                write!(f, "]")
            }
        }
    }
}
