use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::autoplay::{AutoplayRecord, AutoplaySummary, aggregate};

fn fmt_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}"))
}

pub fn generate_console_report<W: Write + ?Sized>(
    writer: &mut W,
    records: &[AutoplayRecord],
    total_duration: Duration,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "📊 Autoplay Report".bright_cyan().bold())?;
    writeln!(writer, "{}", "==================".cyan())?;

    for record in records {
        let ending = if record.fuel_ran_out {
            "out of fuel".red()
        } else if record.stalled {
            "stalled".yellow()
        } else {
            "flying".green()
        };
        writeln!(
            writer,
            "seed {:<20} {:<8} hops {:>4}  km {:>6}  quests {:>3}  mean score {:>5}  [{}]",
            record.seed,
            record.strategy.label(),
            record.hops,
            record.km_total,
            record.quests_completed,
            fmt_optional(record.mean_score()),
            ending
        )?;
        if !record.grades.is_empty() {
            let grades: Vec<String> = record.grades.iter().map(ToString::to_string).collect();
            writeln!(writer, "   grades: {}", grades.join(" "))?;
        }
    }

    let agg = aggregate(records);
    writeln!(writer)?;
    writeln!(writer, "{}", "Totals".bright_yellow().bold())?;
    writeln!(writer, "Runs: {}", agg.runs)?;
    writeln!(writer, "Quests completed: {}", agg.quests_completed)?;
    writeln!(writer, "Mean score: {}", fmt_optional(agg.mean_score))?;
    writeln!(writer, "Mean hops: {}", fmt_optional(agg.mean_hops))?;
    let grades: Vec<String> = agg
        .grade_counts
        .iter()
        .map(|(grade, count)| format!("{grade}={count}"))
        .collect();
    let grades = if grades.is_empty() {
        "none".to_string()
    } else {
        grades.join(", ")
    };
    writeln!(writer, "Grades: {grades}")?;
    writeln!(writer, "Ran out of fuel: {}", agg.fuel_outs)?;
    writeln!(writer, "Total time: {total_duration:?}")?;
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(
    writer: &mut W,
    records: &[AutoplayRecord],
) -> Result<()> {
    let summary = AutoplaySummary {
        records: records.to_vec(),
        aggregate: aggregate(records),
    };
    let json_output = serde_json::to_string_pretty(&summary)?;
    writeln!(writer, "{json_output}")?;
    Ok(())
}
