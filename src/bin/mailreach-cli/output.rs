use anyhow::{Context, Result, bail};

use crate::args::Cli;
use mailreach_lib::{ValidationResult, Verdict};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
pub struct OutputRow {
    pub email: String,
    #[cfg_attr(feature = "with-serde", serde(flatten))]
    pub result: ValidationResult,
}

impl OutputRow {
    pub fn new(email: impl Into<String>, result: ValidationResult) -> Self {
        Self {
            email: email.into(),
            result,
        }
    }
}

pub fn write_reports(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(rows, cli),
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

/// Whether the batch should exit with code 2.
pub fn any_rejected(rows: &[OutputRow], strict: bool) -> bool {
    rows.iter().any(|row| match row.result.is_valid {
        Verdict::Valid => false,
        Verdict::Invalid => true,
        Verdict::Unknown => strict,
    })
}

fn write_human(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        write_all_atomically(path, human_report(rows).as_bytes())?;
    } else {
        for row in rows {
            println!("{}", human_line(row));
        }
    }
    Ok(())
}

fn human_report(rows: &[OutputRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&human_line(row));
        out.push('\n');
    }
    out
}

fn human_line(row: &OutputRow) -> String {
    let tag = match row.result.is_valid {
        Verdict::Valid => "[OK]     ",
        Verdict::Invalid => "[INVALID]",
        Verdict::Unknown => "[UNKNOWN]",
    };
    let mut line = format!("{tag} {} :: {}", row.email, row.result.status);
    if let Some(reason) = &row.result.reason {
        line.push_str(&format!(" ({reason})"));
    }
    if let Some(mx) = &row.result.mx_record {
        line.push_str(&format!("\n          mx: {mx}"));
    }
    line
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-csv")]
const CSV_HEADER: [&str; 5] = ["email", "is_valid", "status", "reason", "mx_record"];

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=csv nécessite la feature 'with-csv'")
}

#[cfg(feature = "with-csv")]
fn csv_record(row: &OutputRow) -> [String; 5] {
    [
        row.email.clone(),
        row.result.is_valid.to_string(),
        row.result.status.to_string(),
        row.result.reason.clone().unwrap_or_default(),
        row.result.mx_record.clone().unwrap_or_default(),
    ]
}

fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mailreach_lib::Status;

    #[test]
    fn human_line_shows_reason_and_mx() {
        let row = OutputRow::new(
            "user@example.com",
            ValidationResult::new(Status::UserUnknown)
                .with_reason("550 5.1.1 no such user")
                .with_mx_record("mx.example.com"),
        );
        insta::assert_snapshot!(human_line(&row), @r"
        [INVALID] user@example.com :: User Unknown (550 5.1.1 no such user)
                  mx: mx.example.com
        ");
    }

    #[test]
    fn human_report_goes_to_out_file() {
        let dir = std::env::temp_dir().join(format!("mailreach-out-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("tmp dir");
        let path = dir.join("report.txt");
        let path_str = path.to_str().expect("utf-8 path");
        let cli = Cli::try_parse_from([
            "mailreach-cli",
            "--out",
            path_str,
            "validate",
            "a@example.com",
        ])
        .expect("parse");
        let rows = vec![
            OutputRow::new("a@example.com", ValidationResult::new(Status::Deliverable)),
            OutputRow::new("b@example.com", ValidationResult::new(Status::Timeout)),
        ];

        write_reports(&rows, &cli).expect("write report");
        let written = std::fs::read_to_string(&path).expect("read report");
        std::fs::remove_dir_all(&dir).ok();
        assert_eq!(written, human_report(&rows));
        assert_eq!(written.lines().count(), 2);
        assert!(written.starts_with("[OK]"));
    }

    #[test]
    fn strict_mode_rejects_unknown() {
        let rows = vec![
            OutputRow::new("a@example.com", ValidationResult::new(Status::Deliverable)),
            OutputRow::new("b@example.com", ValidationResult::new(Status::Timeout)),
        ];
        assert!(!any_rejected(&rows, false));
        assert!(any_rejected(&rows, true));

        let rows = vec![OutputRow::new(
            "c@example.com",
            ValidationResult::new(Status::NoMxRecords),
        )];
        assert!(any_rejected(&rows, false));
    }
}
