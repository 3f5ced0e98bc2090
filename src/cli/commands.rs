use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// codeloom - drives a chat model through a simple file-command protocol.
#[derive(Parser, Debug)]
#[command(name = "codeloom")]
#[command(version = "0.1.0")]
#[command(about = "Scaffold codebases by conversing with a chat model.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a code-generation session
    Run {
        /// What to create (asked interactively when omitted)
        #[arg(short = 'm', long)]
        prompt: Option<String>,

        /// Provider to use (openai, openrouter, groq, ollama)
        #[arg(short, long)]
        provider: Option<String>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,

        /// Sampling temperature (0.0..=2.0)
        #[arg(short, long)]
        temperature: Option<f64>,

        /// Working root for generated files (default: ./code)
        #[arg(short, long)]
        workspace: Option<PathBuf>,

        /// Point the provider at a custom OpenAI-compatible endpoint
        #[arg(long)]
        base_url: Option<String>,

        /// Clear a non-empty working root without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the resolved configuration and where it lives
    Config,
}
