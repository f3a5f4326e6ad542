//! rdfsdoc - RDFS documentation site generator CLI
//!
//! Configuration comes from `--config FILE` (YAML) or, when no file is
//! given, from the `RDFSDOC_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use rdfsdoc_core::{
    Config, DiagramOptions, DiagramSynthesizer, GraphBuilder, Ontology, PlantUmlServer, RdfsReader,
    RenderOrchestrator, SiteGenerator, Stereotype,
};

#[derive(Parser)]
#[command(name = "rdfsdoc")]
#[command(version)]
#[command(about = "Generate documentation sites from RDFS schemas", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph, render every diagram and write the site
    Generate {
        /// YAML configuration file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
        /// Exit with an error if any diagram failed to render
        #[arg(long)]
        strict: bool,
    },
    /// Print the PlantUML text for one class
    Diagram {
        /// Class name (without namespace)
        class: String,
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
    /// Summarize the schema graph
    Stats {
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path).with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::from_env().context("Failed to read configuration from the environment"),
    }
}

fn build_graph(config: &Config) -> anyhow::Result<(Ontology, rdfsdoc_core::BuildStats)> {
    let declarations = RdfsReader::read_file(&config.rdfs_path)
        .with_context(|| format!("Failed to read schema {}", config.rdfs_path.display()))?;

    let mut builder = GraphBuilder::new(config.common_namespace.as_str());
    builder.extend(declarations);
    let stats = builder.stats();
    Ok((builder.finish(), stats))
}

async fn handle_generate(config_path: Option<&Path>, strict: bool) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let (mut graph, _) = build_graph(&config)?;

    let server = PlantUmlServer::new(&config.plantuml_url)?;
    let orchestrator = RenderOrchestrator::new(server)
        .with_concurrency(config.render_concurrency)
        .with_format(config.output_format)
        .with_diagram_options(DiagramOptions {
            namespaced_properties: config.use_namespace_for_properties,
        });

    let report = orchestrator.render_all(&mut graph).await;
    for failure in &report.failures {
        tracing::warn!("[Render] {}: {}", failure.class, failure.message);
    }
    if strict {
        report.clone().into_result().context("Diagram rendering failed")?;
    }

    let summary = SiteGenerator::new(&graph, &config)?.generate().context("Failed to write site")?;

    println!(
        "{} {} class pages, {} property pages, {}/{} diagrams -> {}",
        "✓".green(),
        summary.class_pages,
        summary.property_pages,
        report.rendered,
        report.total(),
        config.output_path.display()
    );
    Ok(())
}

fn handle_diagram(class: &str, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let (graph, _) = build_graph(&config)?;

    let id = graph.require(class)?;

    let options = DiagramOptions {
        namespaced_properties: config.use_namespace_for_properties,
    };
    let text = DiagramSynthesizer::new(&graph, options).synthesize(id)?;
    println!("{}", text);
    Ok(())
}

fn handle_stats(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let (graph, stats) = build_graph(&config)?;

    println!("{}", config.title.bold());
    println!("{}", "=".repeat(40));
    for stereotype in Stereotype::ALL {
        println!(
            "{:<12} {:>6}",
            stereotype.output_category(),
            graph.count_by_stereotype(stereotype).to_string().cyan()
        );
    }
    println!("{:<12} {:>6}", "properties", graph.class_properties().len().to_string().cyan());
    println!("{}", "-".repeat(40));
    println!(
        "{:<12} {:>6}",
        "duplicates",
        if stats.duplicates > 0 {
            stats.duplicates.to_string().yellow()
        } else {
            stats.duplicates.to_string().normal()
        }
    );
    println!(
        "{:<12} {:>6}",
        "dropped",
        if stats.dropped > 0 {
            stats.dropped.to_string().red()
        } else {
            stats.dropped.to_string().normal()
        }
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Generate { config, strict } => handle_generate(config.as_deref(), *strict).await,
        Commands::Diagram { class, config } => handle_diagram(class, config.as_deref()),
        Commands::Stats { config } => handle_stats(config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red(), e);
        std::process::exit(1);
    }
}
