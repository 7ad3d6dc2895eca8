//! Process command - extract nutrition facts from a single transcription.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use nutri_core::models::config::{NutriConfig, OutputConfig};
use nutri_core::models::nutrition::{NutrientKey, NutritionFacts, ParseReport, Resolution};
use nutri_core::ProximityParser;

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input transcription file (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show how each nutrient was resolved
    #[arg(long)]
    explain: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let text = read_input(args.input.as_deref())?;
    let report = process_text(&text, &config);

    let output = format_facts(&report.facts, args.format, &config.output)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.explain {
        eprintln!();
        eprint!("{}", explain_report(&report));
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        None => read_stdin(),
        Some(path) if path == Path::new("-") => read_stdin(),
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            info!("Processing file: {}", path.display());
            Ok(fs::read_to_string(path)?)
        }
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Parse a transcription; empty text short-circuits to the defaults.
pub fn process_text(text: &str, config: &NutriConfig) -> ParseReport {
    if text.trim().is_empty() {
        warn!("No text in transcription, returning default values");
        return ParseReport::unresolved(config.parser.unresolved_default);
    }

    ProximityParser::with_config(config.parser.clone()).parse_report(text)
}

pub fn format_facts(
    facts: &NutritionFacts,
    format: OutputFormat,
    output: &OutputConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if output.pretty_json => Ok(serde_json::to_string_pretty(facts)?),
        OutputFormat::Json => Ok(serde_json::to_string(facts)?),
        OutputFormat::Csv => format_csv(facts),
        OutputFormat::Text => Ok(format_text(facts, output.precision)),
    }
}

fn format_csv(facts: &NutritionFacts) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(NutrientKey::ALL.iter().map(|key| key.as_str()))?;
    wtr.write_record(facts.iter().map(|(_, value)| value.to_string()))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(facts: &NutritionFacts, precision: usize) -> String {
    let width = NutrientKey::ALL
        .iter()
        .map(|key| key.as_str().len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for (key, value) in facts.iter() {
        let unit = if key.is_gram_denominated() { " g" } else { "" };
        output.push_str(&format!(
            "{:<width$}  {:.precision$}{}\n",
            key.as_str(),
            value,
            unit,
            width = width,
            precision = precision
        ));
    }
    output
}

fn explain_report(report: &ParseReport) -> String {
    let mut output = String::new();

    for key in NutrientKey::ALL {
        let status = match report.resolution(key) {
            Resolution::Resolved(value) => format!("{}", style(format!("read {}", value)).green()),
            Resolution::ConfirmedZero => format!("{}", style("confirmed zero").cyan()),
            Resolution::Unknown => format!("{}", style("not found").yellow()),
        };
        output.push_str(&format!("  {}: {}\n", key, status));
    }

    for note in &report.notes {
        output.push_str(&format!("{} {}\n", style("ℹ").blue(), note));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_short_circuits() {
        let report = process_text("  \n ", &NutriConfig::default());
        assert_eq!(report.facts, NutritionFacts::default());
        assert!(report.notes.is_empty());
    }

    #[test]
    fn test_format_csv() {
        let facts = nutri_core::parse_nutrition_text("Protein 5g");
        let csv = format_csv(&facts).unwrap();
        assert_eq!(
            csv,
            "protein,total_fat,total_carbohydrate,dietary_fiber,total_sugars,servings\n5,1,1,1,1,1\n"
        );
    }

    #[test]
    fn test_format_text() {
        let facts = nutri_core::parse_nutrition_text("Total Fat 0g\n8 servings per container");
        let text = format_text(&facts, 1);
        assert!(text.contains("total_fat           0.0 g\n"));
        assert!(text.contains("servings            8.0\n"));
    }
}
