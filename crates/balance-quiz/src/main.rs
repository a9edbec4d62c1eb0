//! CLI entry point for the balance quiz.
//!
//! Usage:
//!   balance-quiz generate [--count <n>] [--max-attempts <n>] [--seed <s>]
//!   balance-quiz check --base <b> --target <t> --operator <op> --operand <n>
//!   balance-quiz play [--count <n>] [--max-attempts <n>] [--seed <s>]
//!
//! Logging is controlled through `RUST_LOG`.

use std::collections::BTreeMap;
use std::io::{self, BufRead};

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use balance_quiz::{
    apply, display_value, evaluate, generate, is_correct, tilt_angle, Operator, QuizError,
    RoundSet, SessionEvent, SessionState,
};

#[derive(Parser)]
#[command(name = "balance-quiz")]
#[command(about = "Balance the scale with one arithmetic operation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a set of unique rounds as JSON
    Generate {
        /// Number of rounds
        #[arg(long, default_value = "10")]
        count: usize,

        /// Maximum candidate trials before giving up
        #[arg(long, default_value = "20000")]
        max_attempts: usize,

        /// Seed for a reproducible set
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check one answer against a target
    Check {
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=100))]
        base: i32,

        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=100))]
        target: i32,

        /// One of + - * /
        #[arg(long, allow_hyphen_values = true)]
        operator: Operator,

        #[arg(long, value_parser = clap::value_parser!(i32).range(0..=100))]
        operand: i32,
    },
    /// Play a game on the terminal
    Play {
        #[arg(long, default_value = "10")]
        count: usize,

        #[arg(long, default_value = "20000")]
        max_attempts: usize,

        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationOutput<'a> {
    seed: u64,
    attempts: usize,
    operator_counts: BTreeMap<Operator, usize>,
    rounds: &'a RoundSet,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput {
    value: Option<f64>,
    display: String,
    correct: bool,
    tilt_angle: f64,
}

#[derive(Debug, Serialize)]
struct ErrorOutput {
    error: String,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            count,
            max_attempts,
            seed,
        } => match generate(count, max_attempts, seed) {
            Ok((rounds, seed)) => {
                let output = GenerationOutput {
                    seed,
                    attempts: rounds.attempts(),
                    operator_counts: rounds.operator_counts(),
                    rounds: &rounds,
                };
                print_json(&output);
            }
            Err(e) => {
                print_json(&ErrorOutput {
                    error: e.to_string(),
                });
                std::process::exit(1);
            }
        },
        Commands::Check {
            base,
            target,
            operator,
            operand,
        } => {
            let value = evaluate(base, operator, operand);
            let correct = is_correct(value, target);
            print_json(&CheckOutput {
                value,
                display: display_value(value),
                correct,
                tilt_angle: tilt_angle(target, value),
            });
            if !correct {
                std::process::exit(1);
            }
        }
        Commands::Play {
            count,
            max_attempts,
            seed,
        } => {
            if let Err(e) = play(count, max_attempts, seed) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            std::process::exit(1);
        }
    }
}

fn play(count: usize, max_attempts: usize, seed: Option<u64>) -> Result<(), QuizError> {
    let (rounds, seed) = generate(count, max_attempts, seed)?;
    info!("starting game with seed {}", seed);
    let mut state = SessionState::new(rounds);

    println!("Make the right side equal the left. Enter '<op> <n>', 'next', 'reset' or 'quit'.");
    print_round(&state);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        let event = match input {
            "" => continue,
            "quit" | "q" => break,
            "next" | "n" => SessionEvent::Next,
            "reset" | "r" => {
                let (rounds, seed) = generate(count, max_attempts, None)?;
                info!("reset with seed {}", seed);
                SessionEvent::Reset(rounds)
            }
            answer => match parse_answer(answer) {
                Some((operator, operand)) => SessionEvent::Submit { operator, operand },
                None => {
                    println!("Enter an operator and a number from 0 to 100, e.g. '* 2'.");
                    continue;
                }
            },
        };

        let before = state.cursor();
        let correct_before = state.correct_count();
        state = apply(state, event);
        if let Some(message) = state.message() {
            println!("{}", message);
        }
        if state.correct_count() != correct_before && state.is_complete() {
            println!("All {} rounds solved!", state.rounds().len());
        }
        if state.cursor() != before || state.message().is_none() {
            print_round(&state);
        }
    }

    Ok(())
}

fn print_round(state: &SessionState) {
    let (number, total) = state.progress();
    if let Some(round) = state.current_round() {
        println!(
            "Round {}/{} | correct {}/{} | {} = {} ? _",
            number,
            total,
            state.correct_count(),
            total,
            round.target(),
            round.base()
        );
    }
}

/// Parse `"<op> <n>"` or `"<op><n>"`
fn parse_answer(input: &str) -> Option<(Operator, i32)> {
    let mut chars = input.chars();
    let op: Operator = chars.next()?.to_string().parse().ok()?;
    let operand: i32 = chars.as_str().trim().parse().ok()?;
    if (0..=100).contains(&operand) {
        Some((op, operand))
    } else {
        None
    }
}
