//! body-gen - procedural rigid-body dataset generator
//!
//! Writes one directory per generated body containing the part meshes (OBJ)
//! and the body description (URDF).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_pcg::Pcg64;

use body_gen::bodies::{Body, Hammer};
use body_gen::config::RunConfig;

#[derive(Parser)]
#[command(name = "body-gen")]
#[command(about = "Procedural rigid-body generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate hammers (handle + head in a T-shape)
    Hammer {
        /// Output directory, one sub-directory per body
        #[arg(short, long)]
        output: PathBuf,

        /// TOML run configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Body name (overrides config)
        #[arg(long)]
        name: Option<String>,

        /// Number of bodies to generate (overrides config)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// URDF template (overrides config; built-in hammer template by default)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// OBJ file or directory to sample parts from (repeatable, overrides config)
        #[arg(short, long = "mesh-source")]
        mesh_source: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hammer {
            output,
            config,
            name,
            count,
            seed,
            template,
            mesh_source,
        } => {
            let mut run = match config {
                Some(path) => RunConfig::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => RunConfig::default(),
            };
            if let Some(name) = name {
                run.name = name;
            }
            if let Some(count) = count {
                run.count = count;
            }
            if seed.is_some() {
                run.seed = seed;
            }
            if template.is_some() {
                run.template = template;
            }
            if !mesh_source.is_empty() {
                run.mesh_sources = Some(mesh_source);
            }

            generate_hammers(&run, &output)?;
        }
    }

    Ok(())
}

fn generate_hammers(run: &RunConfig, output: &Path) -> Result<()> {
    let hammer = Hammer::with_configs(
        run.name.clone(),
        run.template.as_deref(),
        run.mesh_sources.as_deref(),
        run.handle.clone(),
        run.head.clone(),
    )
    .context("Failed to set up hammer generator")?;

    let seed = run.seed.unwrap_or_else(rand::random);
    tracing::info!("Generating {} x {:?} (seed {})", run.count, run.name, seed);
    let mut rng = Pcg64::seed_from_u64(seed);

    for index in 0..run.count {
        let dir = output.join(format!("{}_{:04}", run.name, index));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        hammer
            .generate(&dir, &mut rng)
            .with_context(|| format!("Failed to generate body {}", index))?;
    }

    tracing::info!("Generated {} bodies in {}", run.count, output.display());
    Ok(())
}
