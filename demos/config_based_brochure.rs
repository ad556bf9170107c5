use clap::Parser;
use site_brochure::parsers::site_name;
use site_brochure::{BrochureConfig, Mode, Pipeline, Tone};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Company website
    #[arg(short, long)]
    url: String,

    /// Path to brochure configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Only print the grounding text, without writing a brochure
    #[arg(short, long)]
    details: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    let args = Args::parse();

    let mut config = BrochureConfig::from_file(&args.config)?;
    config.apply_env();

    println!("Brochure configuration:");
    println!("  Mode: {:?}", config.mode);
    println!("  Renderer: {:?}", config.fetch.renderer);
    println!("  Politeness delay: {} ms", config.fetch.delay_ms);
    println!(
        "  Links: at most {} scoring {} or more",
        config.selector.max_links, config.selector.min_score
    );
    println!("  Keyword rules: {}", config.selector.rules.len());
    println!("  Exclude patterns: {}", config.selector.exclude_patterns.len());
    println!("  Text budget: {} chars", config.budget.max_chars);
    if config.mode == Mode::Live {
        println!("  Model: {} at {}", config.backend.model, config.backend.url);
    }

    let pipeline = Pipeline::from_config(config)?;

    if args.details {
        println!("{}", pipeline.details(&args.url).await?);
        return Ok(());
    }

    // Drive the steps one by one
    let (html, links) = pipeline.scrape(&args.url).await?;
    println!("Found {} same-site links", links.len());

    let selection = pipeline.select(&args.url, &links).await?;
    for link in &selection.links {
        println!(
            "  [{}] {} (score {})",
            link.page_type,
            link.url,
            link.score.map(|s| s.to_string()).unwrap_or_else(|| "-".into())
        );
    }

    let pages = pipeline.compile(&selection, &html, &args.url).await;
    pipeline.shutdown().await;

    let company = site_name(&html).unwrap_or_else(|| args.url.clone());
    let markdown = pipeline.generate_brochure(&company, &pages, Tone::Formal).await?;
    println!("\n{}", markdown);

    Ok(())
}
