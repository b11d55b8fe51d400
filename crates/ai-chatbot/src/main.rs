//! Chat with the bot in the terminal.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use ai_chatbot::Settings;
use ai_chatbot::core::{Session, SessionBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};

const BAR_CHAR: &str = "▎";
const QUIT_WORDS: [&str; 3] = ["quit", "exit", "bye"];

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("❌ Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let model_provider = match settings.openai_provider() {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("❌ Error: {err}");
            eprintln!("Please set it in the environment or in a .env file.");
            return ExitCode::FAILURE;
        }
    };
    let knowledge = match settings.knowledge() {
        Ok(knowledge) => knowledge,
        Err(err) => {
            eprintln!("❌ Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    debug!("starting with {settings:?}");

    let mut session = SessionBuilder::with_model_provider(model_provider)
        .with_system_prompt(settings.system_prompt())
        .with_knowledge(knowledge)
        .with_model_options(settings.model_options().clone())
        .with_store(settings.store())
        .build();

    print_banner();

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let mut stdin = BufReader::new(io::stdin());
    chat(&mut session, &mut stdin, &progress_style).await;

    match finish(&session) {
        Some(_) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    }
}

/// What to do with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Skip,
    Quit,
    Ask(&'a str),
}

impl<'a> Input<'a> {
    /// `None` is end of input, which counts as quitting.
    fn parse(line: Option<&'a str>) -> Self {
        let Some(line) = line.map(str::trim) else {
            return Input::Quit;
        };
        if line.is_empty() {
            Input::Skip
        } else if QUIT_WORDS.iter().any(|word| line.eq_ignore_ascii_case(word)) {
            Input::Quit
        } else {
            Input::Ask(line)
        }
    }
}

/// Runs turns until the user quits or the input ends.
async fn chat<R>(session: &mut Session, input: &mut R, progress_style: &ProgressStyle)
where
    R: AsyncBufRead + Unpin,
{
    loop {
        print!("{} ", "You:".bright_green().bold());
        std::io::stdout().flush().ok();

        let line = read_line(input).await;
        let message = match Input::parse(line.as_deref()) {
            Input::Skip => continue,
            Input::Quit => {
                if line.is_none() {
                    println!();
                }
                return;
            }
            Input::Ask(message) => message,
        };

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message("🤔 Thinking...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        let reply = session.respond(message).await;

        // Finish the progress bar before printing anything else.
        progress_bar.finish_and_clear();
        println!("{}🤖 {}\n", BAR_CHAR.bright_cyan(), reply.bright_white());
    }
}

fn print_banner() {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("{}", "🤖 AI Chatbot".bold());
    println!("{rule}");
    println!("\nWelcome! I'm here to help answer your questions.");
    println!("Type your question and press Enter.");
    println!("Type 'quit' to exit and save the conversation.\n");
}

/// Saves the conversation and says goodbye. Returns the saved path.
fn finish(session: &Session) -> Option<PathBuf> {
    let saved = match session.persist() {
        Ok(path) => {
            println!("\n💾 Conversation saved to {}", path.display());
            Some(path)
        }
        Err(err) => {
            error!("failed to save conversation: {err}");
            eprintln!("❌ Could not save the conversation: {err}");
            None
        }
    };
    println!("👋 Goodbye! Have a great day!");
    saved
}

async fn read_line<R: AsyncBufRead + Unpin>(input: &mut R) -> Option<String> {
    let mut line = String::new();

    match input.read_line(&mut line).await {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
