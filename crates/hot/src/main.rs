mod config;

use anyhow::{Context as _, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use hot_errors::Renderer;
use hot_ide::{Analysis, File, TextRange};
use mimalloc::MiMalloc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Access-modifier and using-group refactorings for C# sources.
#[derive(Parser)]
#[command(version)]
struct Options {
    /// TOML file with assist settings.
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the language server protocol over stdio.
    Lsp,
    /// List the refactorings available at a byte offset.
    Actions {
        path: Utf8PathBuf,
        #[arg(long)]
        offset: u32,
        /// Print the actions as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Apply the refactoring with the given title.
    Apply {
        path: Utf8PathBuf,
        #[arg(long)]
        offset: u32,
        #[arg(long)]
        title: String,
        /// Overwrite the file instead of printing the result.
        #[arg(long)]
        write: bool,
    },
    /// Report parse errors.
    Check { path: Utf8PathBuf },
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("HOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::load(options.config.as_deref())?;
    debug!(?config, "configuration");

    match options.command {
        Command::Lsp => {
            if options.config.is_some() {
                warn!("`--config` is ignored by the server; use initializationOptions");
            }
            hot_lsp_server::Server::new()?.run()
        }
        Command::Actions { path, offset, json } => {
            let analysis = Analysis::new(config);
            let file = open(&analysis, &path)?;
            let range = cursor(&analysis, file, offset)?;

            let actions = runtime()?.block_on(analysis.code_actions(file, range, &never()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&actions)?);
            } else {
                for action in actions {
                    println!("{}", action.title);
                }
            }
            Ok(())
        }
        Command::Apply { path, offset, title, write } => {
            let mut analysis = Analysis::new(config);
            let file = open(&analysis, &path)?;
            let range = cursor(&analysis, file, offset)?;

            let runtime = runtime()?;
            let actions = runtime.block_on(analysis.code_actions(file, range, &never()))?;
            let Some(action) = actions.iter().find(|action| action.title == title) else {
                let available: Vec<_> =
                    actions.iter().map(|action| action.title.as_str()).collect();
                bail!("no action titled {title:?} at offset {offset}; available: {available:?}");
            };

            runtime.block_on(analysis.apply_action(file, range, action.edit, &never()))?;
            let text = analysis.text(file);
            if write {
                std::fs::write(&path, text).with_context(|| format!("failed to write `{path}`"))?;
            } else {
                print!("{text}");
            }
            Ok(())
        }
        Command::Check { path } => {
            let analysis = Analysis::new(config);
            let file = open(&analysis, &path)?;

            let renderer = Renderer::styled();
            let text = analysis.text(file);
            let diagnostics = analysis.diagnostics(file);
            for diagnostic in diagnostics {
                eprintln!("{}", diagnostic.render(&renderer, path.as_str(), text));
            }

            match hot_errors::summary(diagnostics) {
                Some(summary) => bail!("{summary}"),
                None => Ok(()),
            }
        }
    }
}

fn open(analysis: &Analysis, path: &Utf8Path) -> anyhow::Result<File> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    Ok(analysis.add_file(path, text))
}

fn cursor(analysis: &Analysis, file: File, offset: u32) -> anyhow::Result<TextRange> {
    let text = analysis.text(file);
    if !text.is_char_boundary(offset as usize) {
        bail!("offset {offset} is past the end or inside a character ({} bytes)", text.len());
    }
    Ok(TextRange::empty(offset.into()))
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to start the async runtime")
}

/// Command-line requests are never cancelled.
fn never() -> CancellationToken {
    CancellationToken::new()
}
