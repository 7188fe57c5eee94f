use crate::config::OutputFormat;
use crate::error::PollError;
use crate::models::{PollDefinition, PollResult};
use crate::voting::PollCounter;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;

/// A poll definition plus the votes to cast against it, in order.
/// Votes are kept as raw JSON so scripts can include non-integer entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollScript {
    #[serde(flatten)]
    pub definition: PollDefinition,
    #[serde(default)]
    pub votes: Vec<Value>,
}

pub fn builtin_scripts() -> Vec<PollScript> {
    vec![
        PollScript {
            definition: PollDefinition::new(
                "What is your favorite programming language",
                [
                    "1. JavaScript",
                    "2. PHP",
                    "3. Java",
                    "4. Assembly",
                    "5. Rust",
                    "6. TypeScript",
                ],
            ),
            // 7 is out of range
            votes: [1, 5, 6, 7, 3, 1].into_iter().map(Value::from).collect(),
        },
        PollScript {
            definition: PollDefinition::new("Ce challenge est-il difficile?", ["Oui", "Non"]),
            // 0 is out of range
            votes: [1, 2, 0, 1].into_iter().map(Value::from).collect(),
        },
    ]
}

pub fn load_scripts(path: &Path) -> Result<Vec<PollScript>, PollError> {
    let raw = fs::read_to_string(path)?;
    let scripts: Vec<PollScript> = serde_json::from_str(&raw)?;
    info!("Loaded {} poll script(s) from {}", scripts.len(), path.display());
    Ok(scripts)
}

// Scripts follow the "is it an integer" rule of the numbers themselves:
// `1.0` counts as option 1, while `"1"`, `true` and `null` are not numbers at all.
fn whole_number(vote: &Value) -> Option<i64> {
    let Value::Number(n) = vote else {
        return None;
    };
    if let Some(number) = n.as_i64() {
        return Some(number);
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

fn cast(counter: &mut PollCounter, vote: &Value) -> PollResult {
    match whole_number(vote) {
        Some(number) => counter.vote(number),
        None => counter.reject(&vote.to_string()),
    }
}

fn render<W: Write>(
    out: &mut W,
    result: &PollResult,
    format: OutputFormat,
) -> Result<(), PollError> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", result)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(result)?)?,
    }
    Ok(())
}

/// Casts every scripted vote, printing the snapshot each call returns,
/// then prints the final results. Returns the final snapshot.
pub fn run_script<W: Write>(
    out: &mut W,
    script: &PollScript,
    format: OutputFormat,
) -> Result<PollResult, PollError> {
    let mut counter = PollCounter::new(script.definition.clone())?;

    writeln!(out, "=== Poll: {} ===", counter.question())?;
    writeln!(out, "Options: {}", counter.options().join(", "))?;

    // Every call hands back a snapshot, accepted or not
    for vote in &script.votes {
        let result = cast(&mut counter, vote);
        render(out, &result, format)?;
    }

    let results = counter.snapshot();
    writeln!(
        out,
        "--- Results ({} vote(s), {} rejected) ---",
        counter.total_votes(),
        counter.rejected_votes()
    )?;
    render(out, &results, format)?;
    writeln!(out)?;

    Ok(results)
}

pub fn run_all<W: Write>(
    out: &mut W,
    scripts: &[PollScript],
    format: OutputFormat,
) -> Result<Vec<PollResult>, PollError> {
    scripts
        .iter()
        .map(|script| run_script(out, script, format))
        .collect()
}
