use crate::{Choice, Error};
use colored::Colorize;
use kuniate::{Hint, Outcome, Prompt, Quiz, QuizEvent, QuizSnapshot, OPTION_COUNT};
use log::{debug, warn};
use rand::Rng;
use std::io::{self, Write};
use text_io::try_read;

const BAR_WIDTH: usize = 20;

pub fn cli_loop<R: Rng>(quiz: &mut Quiz<R>, question_limit: Option<u32>) -> Result<(), Error> {
    quiz.generate_question();

    loop {
        if question_limit.is_some_and(|limit| quiz.answered() >= limit) {
            println!("{}", "That's all the questions!".cyan());
            break;
        }

        draw_question(&quiz.snapshot());
        print!(
            "{} ",
            "Answer (1-4), h for a hint, f/c/b to switch type, s for stats, q to quit:".cyan()
        );
        io::stdout().flush()?;

        let choice_string: Result<String, _> = try_read!("{}\n");
        let choice = match choice_string {
            Ok(choice_string) => Choice::from_str(OPTION_COUNT, choice_string.trim()),
            Err(err) => {
                debug!("[CLI] Input closed: {:?}", err);
                Choice::Quit
            }
        };
        debug!("choice: {:?}", choice);

        match choice {
            Choice::Option(idx) => {
                let option = quiz.options()[idx].clone();
                match quiz.submit_answer(&option) {
                    Ok(answer) => {
                        notify(quiz.take_events());
                        let snapshot = quiz.snapshot();
                        draw_options(&snapshot);
                        if answer.outcome == Outcome::Incorrect {
                            if let Some(subject) = quiz.subject() {
                                println!(
                                    "{}",
                                    format!("The correct choice was {:?}.", subject.name).green()
                                );
                            }
                        }
                        let token = answer.next.wait();
                        quiz.advance(token);
                    }
                    Err(err) => {
                        warn!("[CLI] Rejected answer: {}", err);
                        println!("{}", err.to_string().bright_red());
                    }
                }
            }
            Choice::Hint => match quiz.request_hint() {
                Ok(Hint::Revealed(_)) => notify(quiz.take_events()),
                Ok(Hint::Unavailable) => {
                    println!("{}", "No hint data for this country.".yellow())
                }
                Err(err) => println!("{}", err.to_string().bright_red()),
            },
            Choice::Switch(question_type) => {
                quiz.change_question_type(question_type);
            }
            Choice::Stats => draw_stats(&quiz.snapshot()),
            Choice::DontKnow => println!("{}", "Didn't catch that.".yellow()),
            Choice::Quit => {
                println!("{}", "Quitting!".cyan());
                break;
            }
        }
    }

    draw_stats(&quiz.snapshot());
    Ok(())
}

fn notify(events: Vec<QuizEvent>) {
    for event in events {
        match event {
            QuizEvent::AnswerCorrect => println!("{}", "✔ Correct!".bright_green().bold()),
            QuizEvent::AnswerIncorrect => println!("{}", "✘ Wrong answer!".bright_red().bold()),
            QuizEvent::HintRevealed(text) => println!("{}", format!("Hint: {}", text).yellow()),
        }
    }
}

fn progress_bar(ratio: f32) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn draw_question(snapshot: &QuizSnapshot) {
    println!();
    println!(
        "{} {}",
        progress_bar(snapshot.progress_ratio).blue(),
        format!("Score: {}", snapshot.score).bold()
    );
    println!(
        "{}",
        format!("==========> {} <==========", snapshot.question_type.title()).cyan()
    );

    match &snapshot.prompt {
        Some(Prompt::Flag { image, .. }) => match image {
            Some(image) => println!("{}", image.black().on_white()),
            None => println!("{}", "(no flag available)".dimmed()),
        },
        Some(Prompt::Capital { capital }) => match capital {
            Some(capital) => println!("{}", capital.black().bold().on_white()),
            None => println!("{}", "(no capital)".dimmed()),
        },
        Some(Prompt::Borders { borders }) => match borders {
            Some(borders) if !borders.is_empty() => {
                println!("{}", borders.join(", ").black().bold().on_white())
            }
            Some(_) => println!("{}", "No border data available".dimmed()),
            None => println!("{}", "(no data)".dimmed()),
        },
        None => {}
    }

    draw_options(snapshot);
    if snapshot.hint_available {
        println!("{}", "(h) Hint available".dimmed());
    }
}

fn draw_options(snapshot: &QuizSnapshot) {
    for (i, option) in snapshot.options.iter().enumerate() {
        let label = format!("  {}. {}", i + 1, option);
        if snapshot.selected.as_ref() == Some(option) {
            match snapshot.selected_correct {
                Some(true) => println!("{}", label.bright_green().bold()),
                _ => println!("{}", label.bright_red().bold()),
            }
        } else {
            println!("{}", label);
        }
    }
}

fn stat_bar(count: u32, total: u32) -> String {
    if total == 0 {
        return String::new();
    }
    "█".repeat((count as usize * BAR_WIDTH).div_ceil(total as usize))
}

fn draw_stats(snapshot: &QuizSnapshot) {
    let total = snapshot.correct_count + snapshot.incorrect_count;
    println!("{}", "==========> Statistics <==========".cyan());
    println!(
        "Correct   {} {}",
        stat_bar(snapshot.correct_count, total).green(),
        snapshot.correct_count
    );
    println!(
        "Incorrect {} {}",
        stat_bar(snapshot.incorrect_count, total).red(),
        snapshot.incorrect_count
    );
    println!("{}", format!("Score: {}", snapshot.score).bold());
}
