use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use recommender_core::{RecommendError, Recommender, RecommenderConfig};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use tracing::debug;

/// Recommend graphs for a free-text request
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Request to analyse. Starts an interactive prompt when omitted
    prompt: Option<String>,

    /// JSON config file naming the catalogs (flags below override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vocabulary JSON
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// Knowledge base JSON
    #[arg(long)]
    knowledge: Option<PathBuf>,

    /// Binary snapshot of both catalogs, used before the JSON sources
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

impl Args {
    fn recommender_config(&self) -> Result<RecommenderConfig> {
        let mut config = match &self.config {
            Some(path) => RecommenderConfig::from_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => RecommenderConfig::default(),
        };
        if let Some(path) = &self.vocabulary {
            config.vocabulary = path.clone();
        }
        if let Some(path) = &self.knowledge {
            config.knowledge = path.clone();
        }
        if self.snapshot.is_some() {
            config.snapshot = self.snapshot.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.recommender_config()?;
    debug!(?config, "resolved configuration");

    let engine = Recommender::from_config(&config).context("loading catalogs")?;

    if let Some(prompt) = &args.prompt {
        return run_prompt(&engine, prompt);
    }

    println!("Graph recommender. Describe what you want to see, 'exit' to quit.");
    println!("---------------------------------------------------------------");
    loop {
        print!("\n> ");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        match input.trim() {
            "exit" => break,
            "" => continue,
            prompt => run_prompt(&engine, prompt)?,
        }
    }
    Ok(())
}

/// Every matched word is taken as chosen.
fn run_prompt(engine: &Recommender, prompt: &str) -> Result<()> {
    println!("{} {}", "Prompt:".bold(), prompt);

    let matches = engine.find_matches(prompt);
    println!("{} {:?}", "Matches:".bold(), matches);
    if matches.is_empty() {
        println!("{}", "No known words in this request.".yellow());
        return Ok(());
    }

    let concepts = engine.resolve_parents(&matches)?;
    println!("{} {:?}", "Concepts:".bold(), concepts);

    let recommendations = match engine.recommend(&matches) {
        Ok(recommendations) => recommendations,
        Err(RecommendError::LookupMiss(word)) => {
            println!("{} '{}'", "Nothing known about".red(), word);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if recommendations.is_empty() {
        println!("{}", "No recommended graphs.".yellow());
        return Ok(());
    }

    println!("\n{}", "Recommended Graphs:".bold().green());
    for (i, graphs) in recommendations.iter().enumerate() {
        println!("{}", format!("Graph Set {}", i + 1).bold());
        for (j, graph) in graphs.iter().enumerate() {
            println!("  {}: {}", j + 1, graph);
        }
    }
    Ok(())
}
