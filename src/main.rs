use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use kuniate::{load_dataset, CountryRecord, JsonFileSource, QuestionType, Quiz, QuizConfig, QuizError, QuizRng};
use log::{debug, info};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

mod cli;

#[derive(Debug, PartialEq)]
enum Choice {
    Option(usize),
    Hint,
    Switch(QuestionType),
    Stats,
    Quit,
    DontKnow,
}

#[derive(Parser, Debug)]
#[command(name = "国当て (Kuniate!)")]
#[command(version, about, long_about = None)]
struct Args {
    /// Country list as JSON (REST Countries v3.1 layout)
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,
    /// Endpoint to fetch the country list from when no file is given
    #[arg(short, long)]
    url: Option<String>,
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short = 't', long, default_value = "flag")]
    question_type: QuestionType,
    /// Stop after this many answered questions
    #[arg(short = 'n', long)]
    questions: Option<u32>,
    #[arg(long, default_value = "2000")]
    delay_ms: u64,
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

impl Choice {
    fn from_str(choices_count: usize, input: &str) -> Choice {
        match input {
            "q" => Choice::Quit,
            "h" => Choice::Hint,
            "s" => Choice::Stats,
            "f" | "c" | "b" => input
                .parse()
                .map(Choice::Switch)
                .unwrap_or(Choice::DontKnow),
            input => match input.parse::<usize>() {
                Ok(num) => {
                    if num == 0 || num > choices_count {
                        println!(
                            "{}",
                            format!("There are only {} options available!", choices_count)
                                .bright_red()
                        );
                        Choice::DontKnow
                    } else {
                        Choice::Option(num - 1)
                    }
                }
                Err(_) => Choice::DontKnow,
            },
        }
    }
}

#[derive(Debug, Error)]
enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error("cannot talk to the terminal")]
    Terminal(#[from] io::Error),
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();
    debug!("[Setup] {:?}", args);

    let countries = match load_countries(&args) {
        Ok(countries) => countries,
        Err(err) => {
            println!(
                "{}",
                "Could not load the country list. Check your connection or pass --data FILE."
                    .yellow()
            );
            return Err(err.into());
        }
    };

    let rng = args.seed.map(QuizRng::new).unwrap_or_else(QuizRng::from_entropy);
    info!("[Setup] Seed {} (replay with --seed {})", rng.seed(), rng.seed());
    let config = QuizConfig {
        advance_delay: Duration::from_millis(args.delay_ms),
        ..QuizConfig::default()
    };

    let mut quiz = Quiz::new(countries, rng, config)?.with_question_type(args.question_type);
    cli::cli_loop(&mut quiz, args.questions)
}

fn load_countries(args: &Args) -> Result<Vec<CountryRecord>, QuizError> {
    if let Some(path) = &args.data {
        return load_dataset(&JsonFileSource::new(path));
    }

    #[cfg(feature = "fetch")]
    {
        let url = args.url.as_deref().unwrap_or(kuniate::DEFAULT_URL);
        load_dataset(&kuniate::HttpSource::new(url))
    }
    #[cfg(not(feature = "fetch"))]
    {
        if args.url.is_some() {
            log::warn!("[Setup] --url needs the `fetch` feature, ignoring it.");
        }
        Err(QuizError::DataUnavailable(
            "no --data file given and built without the `fetch` feature".to_owned(),
        ))
    }
}
