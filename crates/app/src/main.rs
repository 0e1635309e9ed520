mod cli;
mod config;
mod logging;
mod terminal;

use std::io;

use clap::Parser;
use quiz_core::model::VocabDraft;
use services::{AppServices, Clock, RandomSource};
use tracing::debug;

use crate::cli::{AddArgs, Cli, Command, QuizArgs};
use crate::config::{AppConfig, QuizSettings, prepare_sqlite_file};
use crate::terminal::{RunOutcome, Terminal, run_quiz};

const SAMPLE_ENTRIES: [(&str, &str, &str); 5] = [
    ("cat", "a small domesticated feline", "The cat slept on the windowsill."),
    ("dog", "a domesticated canine", "The dog fetched the ball."),
    ("bird", "a feathered animal that can usually fly", "A bird sang outside."),
    ("fish", "a cold-blooded animal that lives in water", "The fish swam in circles."),
    ("frog", "a tailless amphibian that jumps", "A frog hopped into the pond."),
];

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli)?;
    logging::init_tracing(&config.log_filter);

    let command = cli.command.unwrap_or(Command::Quiz(QuizArgs::default()));
    match command {
        Command::Add(AddArgs {
            word,
            definition,
            example,
        }) => {
            let services = open_services(&config, RandomSource::default()).await?;
            let record = services
                .vocab()
                .add_entry(VocabDraft::new(word, definition, example))
                .await?;
            println!("Added \"{}\" (#{}).", record.word, record.id);
        }
        Command::List { json } => {
            let services = open_services(&config, RandomSource::default()).await?;
            let entries = services.vocab().list_entries().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No vocabulary yet. Add some with `vocab-quiz add`.");
            } else {
                for entry in &entries {
                    println!("{:>4}  {}: {}", entry.id.value(), entry.word, entry.definition);
                }
            }
        }
        Command::Quiz(args) => {
            let settings = QuizSettings::from_args(&args)?;
            let services = open_services(&config, settings.random).await?;
            quiz(&services, &settings).await?;
        }
        Command::Reset => {
            let services = open_services(&config, RandomSource::default()).await?;
            services.quiz().discard().await?;
            println!("Saved quiz discarded.");
        }
        Command::Seed => {
            let vocab = open_services(&config, RandomSource::default()).await?.vocab();
            for (word, definition, example) in SAMPLE_ENTRIES {
                vocab
                    .add_entry(VocabDraft::new(word, definition, example))
                    .await?;
            }
            println!("Added {} sample entries.", SAMPLE_ENTRIES.len());
        }
    }

    Ok(())
}

/// Open + migrate SQLite here so services only ever see a ready store.
async fn open_services(
    config: &AppConfig,
    random: RandomSource,
) -> Result<AppServices, Box<dyn std::error::Error>> {
    prepare_sqlite_file(&config.db_url)?;
    debug!(db = %config.db_url, "opening vocabulary store");
    Ok(AppServices::new_sqlite(&config.db_url, Clock::system(), random).await?)
}

async fn quiz(
    services: &AppServices,
    settings: &QuizSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let quiz = services.quiz();

    let resumed = if settings.fresh {
        None
    } else {
        quiz.resume().await?
    };
    let mut session = match resumed.filter(|s| !s.is_over()) {
        Some(session) => {
            println!(
                "Resuming your quiz at question {} of {}.",
                session.current_question_index() + 1,
                session.total_questions()
            );
            session
        }
        None => match quiz.start_quiz(settings.count).await {
            Ok(session) => session,
            Err(err) if err.is_insufficient_vocabulary() => {
                println!("{err}. Add more words with `vocab-quiz add` first.");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        },
    };

    let stdin = io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), io::stdout());
    match run_quiz(&quiz, &mut session, &mut terminal).await? {
        RunOutcome::Completed(_) => {}
        RunOutcome::Paused => {
            terminal.message("Progress saved. Run `vocab-quiz quiz` to continue.")?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
