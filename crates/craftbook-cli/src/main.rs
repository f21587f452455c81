//! `craftbook` -- generate the crafting dataset and inspect it.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use craftbook_core::ItemDetails;
use craftbook_data::{OutputFormat, generate, load_config, load_dataset};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "craftbook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Crafting-table recipe dataset generator")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse recipe definitions and write the dataset
    Generate {
        /// Configuration file (defaults to ./craftbook.toml when present)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Directory of recipe definition files
        #[arg(long, value_name = "DIR")]
        recipes: Option<PathBuf>,

        /// Output directory for the dataset
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Output format: json, ron or bitcode
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Do not copy textures into the public directory
        #[arg(long)]
        no_textures: bool,
    },

    /// Print where a recipe's ingredients go on the crafting grid
    Grid {
        /// Output item of the recipe
        recipe: String,

        /// Directory of a generated dataset
        #[arg(short, long, value_name = "DIR", default_value = "src/data/generated")]
        dataset: PathBuf,
    },

    /// Print an item's details
    Show {
        item: String,

        /// Directory of a generated dataset
        #[arg(short, long, value_name = "DIR", default_value = "src/data/generated")]
        dataset: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "craftbook=debug" } else { "craftbook=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn print_details(details: &ItemDetails) {
    let kind = if details.is_block_icon() { "block" } else { "item" };
    println!("{} ({}, {kind} icon)", details.name, details.id);
    for icon in &details.icon {
        println!("  {icon}");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate {
            config,
            recipes,
            out,
            format,
            no_textures,
        } => {
            let mut config = load_config(config.as_deref()).context("loading configuration")?;
            if let Some(dir) = recipes {
                config.source.recipes_dir = dir;
            }
            if let Some(dir) = out {
                config.output.dir = dir;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if no_textures {
                config.output.copy_textures = false;
            }

            let output = generate(&config).context("generating dataset")?;
            let ingest = &output.report.ingest;
            info!(
                parsed = ingest.parsed,
                files = ingest.files,
                skipped = ingest.skipped(),
                "done"
            );
            for path in &output.report.written {
                println!("{}", path.display());
            }
        }

        Command::Grid { recipe, dataset } => {
            let dataset = load_dataset(&dataset)
                .with_context(|| format!("loading dataset from {}", dataset.display()))?;
            if dataset.recipe(&recipe).is_none() {
                bail!("no recipe for '{recipe}'");
            }
            let grid = dataset.crafting_table_state(&recipe);
            println!("{}", grid.render_ascii());
            if let Some(result) = dataset.result_item_details(&recipe) {
                let count = dataset.recipe(&recipe).map_or(1, |r| r.count);
                println!("=> {count} x {}", result.name);
            }
        }

        Command::Show { item, dataset } => {
            let dataset = load_dataset(&dataset)
                .with_context(|| format!("loading dataset from {}", dataset.display()))?;
            match dataset.details(&item) {
                Some(details) => print_details(details),
                None => bail!("unknown item '{item}'"),
            }
        }
    }

    Ok(())
}
