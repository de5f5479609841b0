mod display;
mod input;

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use prescricao_core::{Regime, classify, evaluate, export_rows, pre_law_consumed};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(
    name = "prescricao",
    version,
    about = "Limitation-period calculator for LC-RJ 220/2024 (art. 5º-A)"
)]
struct Cli {
    /// Evaluation date (YYYY-MM-DD); defaults to the local date.
    #[arg(long, global = true, env = "PRESCRICAO_TODAY")]
    today: Option<NaiveDate>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Card,
        env = "PRESCRICAO_FORMAT"
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the case and compute deadlines for every responsible party.
    Evaluate {
        /// JSON case file.
        #[arg(long)]
        case: PathBuf,
        /// Force a regime instead of the suggested one.
        #[arg(long, value_enum)]
        regime: Option<RegimeArg>,
        /// Extra general milestones, comma-separated YYYY-MM-DD.
        #[arg(long)]
        milestones: Option<String>,
    },
    /// Only suggest the intertemporal regime.
    Classify {
        #[arg(long)]
        case: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Card,
    Json,
    Rows,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum RegimeArg {
    New,
    Transition,
    PreLaw,
    OutOfScope,
}

impl From<RegimeArg> for Regime {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::New => Regime::NewRegime,
            RegimeArg::Transition => Regime::Transition,
            RegimeArg::PreLaw => Regime::PreLawConsummated,
            RegimeArg::OutOfScope => Regime::OutOfScope,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("prescricao v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    // Read once; every comparison in this pass uses the same date.
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command {
        Command::Evaluate {
            case,
            regime,
            milestones,
        } => {
            let bundle = input::load_case(&case, milestones.as_deref())
                .with_context(|| format!("loading case {}", case.display()))?;
            let evaluation = evaluate(
                &bundle.case,
                regime.map(Regime::from),
                &bundle.general,
                &bundle.parties,
                today,
            );
            match cli.format {
                OutputFormat::Card => {
                    print!(
                        "{}",
                        display::render_card(&bundle.case, &evaluation, &bundle.rejected)
                    );
                }
                OutputFormat::Rows => {
                    print!("{}", display::render_rows(&export_rows(&evaluation)));
                }
                OutputFormat::Json => {
                    let doc = json!({
                        "evaluation": evaluation,
                        "rows": export_rows(&evaluation),
                        "rejected": bundle.rejected,
                    });
                    println!("{}", serde_json::to_string_pretty(&doc)?);
                }
            }
        }
        Command::Classify { case } => {
            let bundle = input::load_case(&case, None)
                .with_context(|| format!("loading case {}", case.display()))?;
            let suggested = classify(&bundle.case, &bundle.general);
            let consumed = pre_law_consumed(Some(bundle.case.awareness()), &bundle.general);
            match cli.format {
                OutputFormat::Json => {
                    let doc = json!({
                        "suggested_regime": suggested,
                        "prior_regime_consumed": consumed,
                    });
                    println!("{}", serde_json::to_string_pretty(&doc)?);
                }
                OutputFormat::Card | OutputFormat::Rows => {
                    println!("{}", display::regime_label(suggested));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_evaluate_with_override() {
        let cli = Cli::try_parse_from([
            "prescricao",
            "--today",
            "2026-10-16",
            "evaluate",
            "--case",
            "case.json",
            "--regime",
            "pre-law",
            "--format",
            "rows",
        ])
        .unwrap();
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2026, 10, 16));
        assert_eq!(cli.format, OutputFormat::Rows);
        match cli.command {
            Command::Evaluate { regime, .. } => {
                assert_eq!(regime.map(Regime::from), Some(Regime::PreLawConsummated));
            }
            Command::Classify { .. } => panic!("expected evaluate"),
        }
    }

    #[test]
    fn rejects_malformed_today() {
        let err = Cli::try_parse_from([
            "prescricao",
            "--today",
            "16/10/2026",
            "classify",
            "--case",
            "case.json",
        ]);
        assert!(err.is_err());
    }
}
