//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Build, rewrite and re-serialize line-oriented HTML tag trees
#[derive(Parser, Debug)]
#[command(name = "tagtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "TAGTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Write the document to this file instead of stdout
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Rewrite the input file in place
    #[arg(short, long, global = true, conflicts_with = "output")]
    pub in_place: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-serialize a document (normalizes layout)
    Print {
        /// Input document ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Show the document tree
    Tree {
        /// Input document ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Show node counts
    Stats {
        /// Input document ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Replace every occurrence of a tag
    Rename {
        /// Input document ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Tag to replace
        old: String,
        /// Replacement tag
        new: String,
    },

    /// Bold every cell of a table row
    BoldRow {
        /// Input document ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Row number, first row is 1
        row: usize,
    },

    /// Remove a tag, keeping its content
    Remove {
        /// Input document ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Tag to remove (b, em, p, ol, ul by default)
        tag: String,
    },

    /// Wrap every occurrence of a word in a tag
    AddTag {
        /// Input document ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Word to match (whole word, case-insensitive)
        word: String,
        /// Tag to add around it
        tag: String,
    },

    /// Run the edits of a TOML edit script in order
    Apply {
        /// Input document ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Edit script
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file location
    Path,
    /// Print a commented config template
    Template,
}
