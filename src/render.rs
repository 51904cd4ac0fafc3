//! Terminal rendering of run reports.
//!
//! Colors go through `termcolor`; expected/actual mismatches spanning several
//! lines get a line diff from `difference`.

use std::io::{self, Write};

use difference::{Changeset, Difference};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

use crate::config::RenderConfig;
use crate::report::{CaseResult, Outcome, RunReport, Summary};
use crate::verdict::Failure;

fn outcome_color(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Passed => Color::Green,
        Outcome::Failed | Outcome::Errored => Color::Red,
        Outcome::Skipped => Color::Yellow,
    }
}

fn colored<W: WriteColor>(out: &mut W, color: Color, bold: bool, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold))?;
    write!(out, "{text}")?;
    out.reset()
}

/// Writes one report to any color-capable writer.
pub fn write_report<W: WriteColor>(out: &mut W, report: &RunReport, config: &RenderConfig) -> io::Result<()> {
    let disambiguate = report.has_ambiguous_names();
    for result in report {
        if result.outcome == Outcome::Passed && !config.verbose {
            continue;
        }
        write_result(out, report, result, disambiguate)?;
    }
    write_summary(out, &report.suite, &report.summary())
}

fn write_result<W: WriteColor>(
    out: &mut W,
    report: &RunReport,
    result: &CaseResult,
    disambiguate: bool,
) -> io::Result<()> {
    colored(out, outcome_color(result.outcome), true, result.outcome.label())?;
    write!(out, ": {}", result.qualified_name(&report.suite, disambiguate))?;
    match result.outcome {
        Outcome::Skipped => {
            writeln!(out, " ({})", result.skip_reason.as_deref().unwrap_or("skipped"))?;
        }
        Outcome::Passed => {
            writeln!(out, " [{:.2?}]", result.elapsed)?;
        }
        Outcome::Failed | Outcome::Errored => {
            writeln!(out)?;
            writeln!(out, "  Case: {}", result.value)?;
            if let Some(error) = &result.error {
                write!(out, "  Error: ")?;
                colored(out, Color::Red, false, error)?;
                writeln!(out)?;
            }
            for failure in &result.failures {
                write_failure(out, failure)?;
            }
        }
    }
    Ok(())
}

fn write_failure<W: WriteColor>(out: &mut W, failure: &Failure) -> io::Result<()> {
    match &failure.location {
        Some(loc) => writeln!(out, "  {}: {}", loc, failure.message)?,
        None => writeln!(out, "  {}", failure.message)?,
    }
    let (Some(expected), Some(actual)) = (&failure.expected, &failure.actual) else {
        return Ok(());
    };
    if !expected.contains('\n') && !actual.contains('\n') {
        write!(out, "    Expected: ")?;
        colored(out, Color::Green, false, expected)?;
        write!(out, "\n      Actual: ")?;
        colored(out, Color::Red, false, actual)?;
        return writeln!(out);
    }
    writeln!(out, "    Diff:")?;
    let changeset = Changeset::new(expected, actual, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(text) => {
                for line in text.lines() {
                    writeln!(out, "      {line}")?;
                }
            }
            Difference::Rem(text) => {
                for line in text.lines() {
                    colored(out, Color::Green, false, &format!("    - {line}"))?;
                    writeln!(out)?;
                }
            }
            Difference::Add(text) => {
                for line in text.lines() {
                    colored(out, Color::Red, false, &format!("    + {line}"))?;
                    writeln!(out)?;
                }
            }
        }
    }
    Ok(())
}

/// Writes the one-line summary for a suite (or for several, merged).
pub fn write_summary<W: WriteColor>(out: &mut W, suite: &str, summary: &Summary) -> io::Result<()> {
    write!(out, "\n{suite}: total {}, ", summary.total())?;
    colored(out, Color::Green, false, "passed")?;
    write!(out, " {}, ", summary.passed)?;
    colored(out, Color::Red, false, "failed")?;
    write!(out, " {}, ", summary.failed)?;
    colored(out, Color::Red, false, "errored")?;
    write!(out, " {}, ", summary.errored)?;
    colored(out, Color::Yellow, false, "skipped")?;
    writeln!(out, " {}", summary.skipped)
}

fn writer(config: &RenderConfig) -> BufferWriter {
    let choice = if config.use_colors {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    BufferWriter::stdout(choice)
}

/// Prints a report to stdout.
pub fn print_report(report: &RunReport, config: &RenderConfig) -> io::Result<()> {
    let stdout = writer(config);
    let mut buffer = stdout.buffer();
    write_report(&mut buffer, report, config)?;
    stdout.print(&buffer)
}

/// Prints an aggregate summary line to stdout.
pub fn print_summary(label: &str, summary: &Summary, config: &RenderConfig) -> io::Result<()> {
    let stdout = writer(config);
    let mut buffer = stdout.buffer();
    write_summary(&mut buffer, label, summary)?;
    stdout.print(&buffer)
}

/// Renders a report to plain text, without color codes.
pub fn render_plain(report: &RunReport, config: &RenderConfig) -> String {
    let mut buffer = Buffer::no_color();
    // Writing into an in-memory buffer cannot fail.
    let _ = write_report(&mut buffer, report, config);
    String::from_utf8_lossy(buffer.as_slice()).into_owned()
}
