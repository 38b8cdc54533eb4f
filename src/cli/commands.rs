//! Command line argument definitions
//!
//! `spush -t <TOKEN> <TITLE> <BODY>` is the whole interface; the remaining
//! flags adjust logging, configuration and what gets sent.

use clap::Parser;
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "spush")]
#[command(about = "Spush - Push text via Pushbullet")]
#[command(version)]
pub struct Cli {
    /// Pushbullet API key
    #[arg(short = 't', long = "token", env = "PUSHBULLET_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Note title
    #[arg(required_unless_present = "account")]
    pub title: Option<String>,

    /// Note body
    #[arg(required_unless_present = "account")]
    pub body: Option<String>,

    /// Print the account the API key belongs to instead of pushing a note
    #[arg(long, conflicts_with_all = ["title", "body"])]
    pub account: bool,

    /// Print the request that would be sent, without sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "SPUSH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
