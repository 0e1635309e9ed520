use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "vocab-quiz", version, about = "Vocabulary notebook with multiple-choice quizzes")]
pub struct Cli {
    /// SQLite database URL or file path
    #[arg(long, env = "VOCAB_DB_URL", default_value = "vocab.sqlite3", global = true)]
    pub db: String,

    /// Log filter, e.g. `info` or `services=debug`
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a vocabulary entry
    Add(AddArgs),
    /// List stored entries
    List {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resume the saved quiz or start a new one
    Quiz(QuizArgs),
    /// Discard the saved quiz
    Reset,
    /// Add a handful of sample entries
    Seed,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub word: String,
    #[arg(long)]
    pub definition: String,
    #[arg(long)]
    pub example: String,
}

#[derive(Debug, Args, Default)]
pub struct QuizArgs {
    /// Number of questions in a new quiz
    #[arg(long, env = "VOCAB_QUIZ_COUNT")]
    pub count: Option<usize>,

    /// Ignore any saved quiz and start over
    #[arg(long)]
    pub fresh: bool,

    /// Seed question generation for a reproducible quiz
    #[arg(long)]
    pub seed: Option<u64>,
}
