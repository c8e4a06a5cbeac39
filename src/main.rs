use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use termbonsai::config::{GrowConfig, Style};
use termbonsai::{color_table, grow};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "termbonsai")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Procedural ASCII bonsai trees for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grow a bonsai tree
    Grow {
        /// Print the tree to stdout (no interactive display)
        #[arg(short, long)]
        print: bool,

        /// Plain text output without ANSI colours
        #[arg(long)]
        no_color: bool,

        /// Canvas width in columns (defaults to the terminal width)
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Canvas height in rows (defaults to the terminal height)
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Growth style (random when omitted)
        #[arg(long, value_enum)]
        style: Option<Style>,

        /// Save the tree as plain text (timestamped name when no path is given)
        #[arg(long, num_args = 0..=1)]
        save: Option<Option<PathBuf>>,
    },

    /// Show the glyph -> colour table
    Palette {
        /// Plain text output without colour swatches
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> termbonsai::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Grow {
            print,
            no_color,
            width,
            height,
            seed,
            style,
            save,
        } => {
            let config = GrowConfig {
                width,
                height,
                seed,
                style,
                // Piped output has no terminal to draw on
                print: print || !io::stdout().is_terminal(),
                color: !no_color,
                save,
            };
            grow::run(config)?;
        }
        Commands::Palette { no_color } => {
            let stdout = io::stdout();
            grow::print_palette(&mut stdout.lock(), color_table(), !no_color)?;
        }
    }

    Ok(())
}
