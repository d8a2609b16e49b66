use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ys", about = concat!("yellowstrip v", env!("CARGO_PKG_VERSION"), " - a sticky to-do strip for your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this database file instead of the one next to the executable
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a to-do
    Add(AddArgs),
    /// List active to-dos, newest first
    List(FilterArgs),
    /// List completed to-dos, most recently completed first
    History(FilterArgs),
    /// Complete a to-do (moves it to history)
    Done(IdArgs),
    /// Move a history entry back to the to-do list
    Restore(IdArgs),
    /// Replace a to-do's text
    Edit(EditArgs),
    /// Delete a to-do, or a history entry with --history
    Rm(RmArgs),
    /// Delete every history entry
    ClearHistory(ClearHistoryArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// To-do text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Only show entries containing this text
    #[arg(long, short)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    pub id: i64,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: i64,
    /// New text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct RmArgs {
    pub id: i64,
    /// Delete from history instead of the to-do list
    #[arg(long)]
    pub history: bool,
}

#[derive(Args)]
pub struct ClearHistoryArgs {
    /// Confirm; without it nothing is deleted
    #[arg(long, short)]
    pub yes: bool,
}
