//! Line format for the results cache.
//!
//! One record per line, fields separated by `;` in fixed order:
//!
//! ```text
//! year;day;part;solution;duration_secs;recorded_at;submitted
//! ```
//!
//! The key fields are read from the left and the trailing fields from the
//! right, so a solution may itself contain `;`. Line breaks in a solution are
//! not representable.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::core::types::ProblemIdentity;

pub const SEPARATOR: char = ';';

/// One durable cache entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub identity: ProblemIdentity,
    pub solution: String,
    pub duration_secs: f64,
    pub recorded_at: DateTime<Utc>,
    pub submitted: bool,
}

impl ResultRecord {
    pub fn encode(&self) -> Result<String> {
        if self.solution.contains(['\n', '\r']) {
            bail!(
                "solution for {} contains a line break and cannot be cached",
                self.identity
            );
        }
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            bail!("invalid duration {} for {}", self.duration_secs, self.identity);
        }
        Ok(format!(
            "{year}{sep}{day}{sep}{part}{sep}{solution}{sep}{duration}{sep}{recorded_at}{sep}{submitted}",
            sep = SEPARATOR,
            year = self.identity.year,
            day = self.identity.day,
            part = self.identity.part.number(),
            solution = self.solution,
            duration = self.duration_secs,
            recorded_at = self
                .recorded_at
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            submitted = self.submitted,
        ))
    }

    pub fn parse(line: &str) -> Result<Self> {
        let mut head = line.splitn(4, SEPARATOR);
        let year = head.next().ok_or_else(|| anyhow!("missing year"))?;
        let day = head.next().ok_or_else(|| anyhow!("missing day"))?;
        let part = head.next().ok_or_else(|| anyhow!("missing part"))?;
        let rest = head.next().ok_or_else(|| anyhow!("missing solution"))?;

        let mut tail = rest.rsplitn(4, SEPARATOR);
        let submitted = tail.next().ok_or_else(|| anyhow!("missing submitted flag"))?;
        let recorded_at = tail.next().ok_or_else(|| anyhow!("missing timestamp"))?;
        let duration = tail.next().ok_or_else(|| anyhow!("missing duration"))?;
        let solution = tail.next().ok_or_else(|| anyhow!("missing solution"))?;

        let identity = ProblemIdentity::new(
            year.parse().with_context(|| format!("parse year {year:?}"))?,
            day.parse().with_context(|| format!("parse day {day:?}"))?,
            part.parse().with_context(|| format!("parse part {part:?}"))?,
        )?;
        let duration_secs: f64 = duration
            .parse()
            .with_context(|| format!("parse duration {duration:?}"))?;
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            bail!("duration must be a non-negative number, got {duration:?}");
        }
        let recorded_at = DateTime::parse_from_rfc3339(recorded_at)
            .with_context(|| format!("parse timestamp {recorded_at:?}"))?
            .with_timezone(&Utc);
        let submitted = match submitted {
            "true" => true,
            "false" => false,
            other => bail!("submitted flag must be true or false, got {other:?}"),
        };

        Ok(Self {
            identity,
            solution: solution.to_string(),
            duration_secs,
            recorded_at,
            submitted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(solution: &str) -> ResultRecord {
        ResultRecord {
            identity: ProblemIdentity::new(2023, 1, 2).expect("identity"),
            solution: solution.to_string(),
            duration_secs: 0.001_234_567,
            recorded_at: Utc
                .with_ymd_and_hms(2023, 12, 1, 5, 0, 42)
                .single()
                .expect("timestamp"),
            submitted: true,
        }
    }

    #[test]
    fn encodes_fields_in_fixed_order() {
        let line = record("54265").encode().expect("encode");
        assert_eq!(line, "2023;1;2;54265;0.001234567;2023-12-01T05:00:42Z;true");
    }

    #[test]
    fn written_record_parses_back_field_for_field() {
        let original = ResultRecord {
            recorded_at: Utc::now(),
            duration_secs: 1.0 / 3.0,
            ..record("1234")
        };
        let parsed = ResultRecord::parse(&original.encode().expect("encode")).expect("parse");
        assert_eq!(parsed, original);
    }

    #[test]
    fn solution_may_contain_separator() {
        let original = record("a;b;c");
        let parsed = ResultRecord::parse(&original.encode().expect("encode")).expect("parse");
        assert_eq!(parsed.solution, "a;b;c");
        assert_eq!(parsed.identity, original.identity);
    }

    #[test]
    fn rejects_line_breaks_in_solution() {
        let err = record("##\n##").encode().expect_err("line break");
        assert!(err.to_string().contains("line break"));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(ResultRecord::parse("").is_err());
        assert!(ResultRecord::parse("2023;1;1;42").is_err());
        assert!(ResultRecord::parse("2023;1;1;42;fast;2023-12-01T05:00:42Z;true").is_err());
        assert!(ResultRecord::parse("2023;1;1;42;0.5;2023-12-01T05:00:42Z;True").is_err());
        assert!(ResultRecord::parse("2023;1;1;42;-0.5;2023-12-01T05:00:42Z;true").is_err());
        assert!(ResultRecord::parse("2023;1;1;42;NaN;2023-12-01T05:00:42Z;true").is_err());
        assert!(ResultRecord::parse("2023;30;1;42;0.5;2023-12-01T05:00:42Z;true").is_err());
    }
}
