use std::fmt;
use std::io::{self, BufRead, Write};

use practice_core::Clock;
use practice_core::model::PracticeMode;
use services::{AppServices, CodingSession, QuizSession, SubmitOutcome};
use store::QuestionBank;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMode { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMode { raw } => write!(f, "invalid mode: {raw} (expected coding or quiz)"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [coding|quiz] [--coding-csv <path>] [--quiz-csv <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  mode: quiz");
    eprintln!("  --coding-csv data/coding_questions.csv");
    eprintln!("  --quiz-csv   data/quiz_questions.csv");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PRACTICE_CODING_CSV, PRACTICE_QUIZ_CSV");
    eprintln!("  PRACTICE_AI_API_KEY, PRACTICE_AI_BASE_URL, PRACTICE_AI_MODEL (hints)");
    eprintln!();
    eprintln!("In a session: answer at the prompt, or use :skip / :quit.");
    eprintln!("Coding submissions end with a single '.' on its own line.");
}

struct Args {
    mode: PracticeMode,
    coding_csv: String,
    quiz_csv: String,
}

impl Args {
    fn parse(mut argv: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut mode = PracticeMode::Quiz;
        let mut coding_csv = std::env::var("PRACTICE_CODING_CSV")
            .unwrap_or_else(|_| "data/coding_questions.csv".into());
        let mut quiz_csv = std::env::var("PRACTICE_QUIZ_CSV")
            .unwrap_or_else(|_| "data/quiz_questions.csv".into());
        let mut mode_given = false;

        while let Some(arg) = argv.next() {
            match arg.as_str() {
                "--coding-csv" => coding_csv = require_value(&mut argv, "--coding-csv")?,
                "--quiz-csv" => quiz_csv = require_value(&mut argv, "--quiz-csv")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ if !mode_given => {
                    mode = arg
                        .parse()
                        .map_err(|_| ArgsError::InvalidMode { raw: arg.clone() })?;
                    mode_given = true;
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            mode,
            coding_csv,
            quiz_csv,
        })
    }
}

/// Reads one line from stdin; `None` on end of input.
fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn report(outcome: &SubmitOutcome) {
    if outcome.is_correct {
        println!("Correct! Score: {:+}", outcome.score);
        if outcome.advanced_tier {
            println!("Fast answer! Moving up a difficulty tier.");
        }
    } else {
        println!("Incorrect. Score: {:+}", outcome.score);
        println!("Your result: {}", outcome.output);
        if let Some(hint) = &outcome.hint {
            println!("Hint: {hint}");
        }
    }
}

async fn run_quiz(mut session: QuizSession) -> io::Result<()> {
    loop {
        let Some((prompt, options, difficulty)) = session
            .current_question()
            .map(|q| (q.prompt().to_string(), q.options().to_vec(), q.difficulty()))
        else {
            println!();
            println!("All questions completed. Final score: {:+}", session.score());
            return Ok(());
        };

        println!();
        println!("[score {:+}] ({difficulty}) {prompt}", session.score());
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
        print!("answer (number or text, :skip, :quit)> ");
        io::stdout().flush()?;

        let Some(line) = read_line()? else {
            return Ok(());
        };
        let line = line.trim();
        match line {
            ":quit" => return Ok(()),
            ":skip" => {
                if session.skip().is_err() {
                    return Ok(());
                }
                continue;
            }
            "" => continue,
            _ => {}
        }

        // A bare number picks the option at that position.
        let choice = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i).cloned())
            .unwrap_or_else(|| line.to_string());

        println!("working...");
        match session.submit(&choice).await {
            Ok(outcome) => report(&outcome),
            // Completed: the next iteration renders the final banner.
            Err(_) => continue,
        }
    }
}

async fn run_coding(mut session: CodingSession) -> io::Result<()> {
    'questions: loop {
        let Some((title, description, template, difficulty)) =
            session.current_question().map(|q| {
                (
                    q.title().to_string(),
                    q.description().to_string(),
                    q.template().to_string(),
                    q.difficulty(),
                )
            })
        else {
            println!();
            println!("All questions completed. Final score: {:+}", session.score());
            return Ok(());
        };

        println!();
        println!("[score {:+}] ({difficulty}) {title}", session.score());
        println!("{description}");
        println!();
        println!("Starter template:");
        println!("{template}");
        println!();
        println!("Enter your solution, ending with a single '.' line (:skip, :quit):");

        let mut lines: Vec<String> = Vec::new();
        let source = loop {
            let Some(line) = read_line()? else {
                return Ok(());
            };
            if lines.is_empty() {
                match line.trim() {
                    ":quit" => return Ok(()),
                    ":skip" => {
                        if session.skip().is_err() {
                            return Ok(());
                        }
                        continue 'questions;
                    }
                    _ => {}
                }
            }
            if line.trim() == "." {
                break lines.join("\n");
            }
            lines.push(line);
        };

        println!("working...");
        match session.submit(&source).await {
            Ok(outcome) => report(&outcome),
            // Completed: the next iteration renders the final banner.
            Err(_) => continue,
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // A bank that fails to load is fatal; everything past this point is
    // recovered into user-facing feedback.
    let bank = QuestionBank::load(&args.coding_csv, &args.quiz_csv)?;
    let app = AppServices::with_env_hints(bank, Clock::default_clock());

    match args.mode {
        PracticeMode::Coding => run_coding(app.coding_session()).await?,
        PracticeMode::Quiz => run_quiz(app.quiz_session()).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
