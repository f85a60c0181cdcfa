use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;
use kuniate::{load_dataset, DatasetReport, JsonFileSource, QuizError};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "資料 (Shiryō)")]
#[command(version, about = "Fetch and check country lists for 国当て", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report how playable a country list is
    Check { json: PathBuf },
    /// Download the country list and save it as JSON
    Fetch {
        out: PathBuf,
        #[arg(short, long)]
        url: Option<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    let result = match args.command {
        Commands::Check { json } => check(json),
        Commands::Fetch { out, url } => fetch(out, url),
    };
    ExitCode::from(exit_status(&result))
}

/// 0 when playable, 2 when the data loads but cannot be played, 1 on errors.
fn exit_status(result: &Result<bool, QuizError>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 2,
        Err(err) => {
            error!("{}", err.to_string().red());
            1
        }
    }
}

fn check(json: PathBuf) -> Result<bool, QuizError> {
    info!("{}", format!("Checking {:?}", json).cyan());
    let countries = load_dataset(&JsonFileSource::new(json))?;
    let report = DatasetReport::of(&countries);
    print_report(&report);
    Ok(report.is_playable())
}

fn print_report(report: &DatasetReport) {
    println!("{}", format!("├ Records: {}", report.records).blue());
    println!("{}", format!("├ Distinct names: {}", report.distinct_names).blue());
    if !report.duplicate_names.is_empty() {
        println!(
            "{}",
            format!("│ ├ Duplicates: {}", report.duplicate_names.join(", ")).yellow()
        );
    }
    println!("{}", format!("├ Without flag image: {}", report.missing_flag_image).blue());
    println!(
        "{}",
        format!("├ Without flag description: {}", report.missing_flag_description).blue()
    );
    println!("{}", format!("├ Without capital: {}", report.missing_capital).blue());
    println!("{}", format!("├ Without borders: {}", report.missing_borders).blue());
    if report.is_playable() {
        println!("{}", "└ ✔ Playable".green());
    } else {
        println!(
            "{}",
            "└ ✘ Not playable: at least 4 distinct country names are needed"
                .red()
                .strikethrough()
        );
    }
}

#[cfg(feature = "fetch")]
fn fetch(out: PathBuf, url: Option<String>) -> Result<bool, QuizError> {
    use kuniate::{HttpSource, DEFAULT_URL};

    let source = HttpSource::new(url.unwrap_or_else(|| DEFAULT_URL.to_owned()));
    let countries = load_dataset(&source)?;
    let json = serde_json::to_string_pretty(&countries)
        .map_err(|err| QuizError::DataUnavailable(err.to_string()))?;
    std::fs::write(&out, json).map_err(|err| QuizError::DataUnavailable(err.to_string()))?;
    info!("{}", format!("Wrote {} countries to {:?}", countries.len(), out).green());

    let report = DatasetReport::of(&countries);
    print_report(&report);
    Ok(report.is_playable())
}

#[cfg(not(feature = "fetch"))]
fn fetch(_out: PathBuf, _url: Option<String>) -> Result<bool, QuizError> {
    Err(QuizError::DataUnavailable(
        "built without the `fetch` feature".to_owned(),
    ))
}
