use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use domdiff::areas::session::Session;
use domdiff::areas::snapshot;
use domdiff::artifacts::core::logging::{self, Profile};
use domdiff::artifacts::diff::options::{Algorithm, DiffOptions, TieBreak, WhitespaceMode};
use domdiff::artifacts::highlight::stylesheet::ColorSettings;
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "domdiff",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Structural diff of DOM snapshots",
    long_about = "Compares two or three DOM snapshots by their visible text, \
    merges the pairwise diffs against a base when three are given, \
    and marks the differences back onto the snapshots.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Log debug output to stderr")]
    verbose: bool,
    #[arg(long, global = true, help = "Log JSON lines to stderr")]
    json_logs: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DiffArgs {
    #[arg(long, value_name = "FILE", help = "Load comparison options from a JSON file")]
    options: Option<PathBuf>,
    #[arg(short = 'i', long, help = "Compare case-insensitively")]
    ignore_case: bool,
    #[arg(short, long, value_name = "MODE", help = "Whitespace handling: none, collapse or ignore")]
    whitespace: Option<WhitespaceMode>,
    #[arg(short, long, value_name = "NAME", help = "Diff algorithm: myers, minimal or trimmed")]
    algorithm: Option<Algorithm>,
    #[arg(long, help = "Do not mark changed words inside changed nodes")]
    no_word_diff: bool,
    #[arg(long, help = "Let the base/left diff lead when both start at the same offset")]
    prefer_left: bool,
}

impl DiffArgs {
    async fn resolve(&self) -> Result<DiffOptions> {
        let mut options = match &self.options {
            Some(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read options {}", path.display()))?;
                DiffOptions::from_json(&text)?
            }
            None => DiffOptions::default(),
        };

        options.ignore_case |= self.ignore_case;
        if let Some(whitespace) = self.whitespace {
            options.whitespace = whitespace;
        }
        if let Some(algorithm) = self.algorithm {
            options.algorithm = algorithm;
        }
        if self.no_word_diff {
            options.word_level = false;
        }
        if self.prefer_left {
            options.tie_break = TieBreak::PreferLeft;
        }

        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "compare",
        about = "Print the differences between snapshots",
        long_about = "This command compares two snapshots, or three with the middle one as the base, \
        and prints the diff list as JSON."
    )]
    Compare {
        #[arg(required = true, num_args = 2..=3, help = "Snapshot files")]
        snapshots: Vec<PathBuf>,
        #[command(flatten)]
        diff: DiffArgs,
        #[arg(short, long, help = "Print a coloured listing instead of JSON")]
        summary: bool,
    },
    #[command(
        name = "highlight",
        about = "Mark the differences on the snapshots",
        long_about = "This command compares the snapshots and wraps every difference in marker nodes. \
        It prints the modified nodes of each pane, or writes the highlighted snapshots to a directory."
    )]
    Highlight {
        #[arg(required = true, num_args = 2..=3, help = "Snapshot files")]
        snapshots: Vec<PathBuf>,
        #[command(flatten)]
        diff: DiffArgs,
        #[arg(long, value_name = "N", help = "Select a diff by index")]
        select: Option<usize>,
        #[arg(short, long, value_name = "DIR", help = "Write each pane to this directory")]
        out_dir: Option<PathBuf>,
        #[arg(long, value_name = "FILE", help = "Load the palette from a JSON file")]
        colors: Option<PathBuf>,
    },
    #[command(
        name = "revert",
        about = "Remove diff markers from a highlighted snapshot"
    )]
    Revert {
        #[arg(index = 1, help = "Highlighted snapshot file")]
        snapshot: PathBuf,
        #[arg(short, long, value_name = "FILE", help = "Write the cleaned snapshot here")]
        out: Option<PathBuf>,
    },
    #[command(
        name = "stylesheet",
        about = "Print the marker stylesheet"
    )]
    Stylesheet {
        #[arg(long, value_name = "N", help = "Add rules for the selected diff")]
        select: Option<usize>,
        #[arg(long, value_name = "FILE", help = "Load the palette from a JSON file")]
        colors: Option<PathBuf>,
    },
    #[command(
        name = "segments",
        about = "List the comparable text of snapshots"
    )]
    Segments {
        #[arg(required = true, help = "Snapshot files")]
        snapshots: Vec<PathBuf>,
    },
}

async fn load_colors(path: Option<&Path>) -> Result<ColorSettings> {
    let Some(path) = path else {
        return Ok(ColorSettings::default());
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read palette {}", path.display()))?;

    serde_json::from_str(&text).with_context(|| format!("invalid palette {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(match (cli.verbose, cli.json_logs) {
        (_, true) => Profile::Production,
        (true, false) => Profile::Development,
        (false, false) => Profile::Quiet,
    });
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Compare {
            snapshots,
            diff,
            summary,
        } => {
            let documents = snapshot::load_all(snapshots).await?;
            let mut session = Session::new(
                documents,
                diff.resolve().await?,
                Box::new(std::io::stdout()),
            );
            session.compare(*summary)?;
        }
        Commands::Highlight {
            snapshots,
            diff,
            select,
            out_dir,
            colors,
        } => {
            let documents = snapshot::load_all(snapshots).await?;
            let mut session = Session::new(
                documents,
                diff.resolve().await?,
                Box::new(std::io::stdout()),
            )
            .with_colors(load_colors(colors.as_deref()).await?);
            session.highlight(*select, out_dir.as_deref()).await?;
        }
        Commands::Revert { snapshot: path, out } => {
            let document = snapshot::load(path).await?;
            let mut session = Session::new(
                vec![document],
                DiffOptions::default(),
                Box::new(std::io::stdout()),
            );
            session.revert(out.as_deref()).await?;
        }
        Commands::Stylesheet { select, colors } => {
            let session = Session::new(
                Vec::new(),
                DiffOptions::default(),
                Box::new(std::io::stdout()),
            )
            .with_colors(load_colors(colors.as_deref()).await?);
            session.print_stylesheet(*select)?;
        }
        Commands::Segments { snapshots } => {
            let documents = snapshot::load_all(snapshots).await?;
            let session = Session::new(
                documents,
                DiffOptions::default(),
                Box::new(std::io::stdout()),
            );
            session.segments()?;
        }
    }

    Ok(())
}
