use clap::Parser;
use site_brochure::{Brochure, Mode, Tone};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Company website
    #[arg(short, long)]
    url: String,

    /// Company name
    #[arg(short, long)]
    company: Option<String>,

    /// JSON configuration string
    #[arg(long)]
    config: Option<String>,

    /// Path to JSON configuration file
    #[arg(long)]
    config_file: Option<String>,

    /// Run without a model
    #[arg(short, long)]
    mock: bool,

    /// Translate the result into this language
    #[arg(short, long)]
    translate_to: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    let args = Args::parse();
    println!("Building brochure for: {}", args.url);

    let mut builder = Brochure::new(&args.url).with_tone(Tone::Formal);

    // Apply configuration from file if specified
    if let Some(config_file) = args.config_file {
        println!("Loading configuration from file: {}", config_file);
        builder = builder.with_config_file(config_file)?;
    }

    // Configuration from a string replaces the file configuration
    if let Some(config_str) = args.config {
        println!("Applying configuration from string");
        builder = builder.with_config_str(&config_str)?;
    }

    if let Some(company) = args.company {
        builder = builder.with_company(company);
    }
    if args.mock {
        builder = builder.with_mode(Mode::Mock);
    }
    if let Some(language) = args.translate_to {
        builder = builder.with_translation(language);
    }

    let start_time = std::time::Instant::now();
    let output = builder.generate().await?;

    println!("{}", output.markdown);
    if let Some((language, translated)) = &output.translation {
        println!("\n--- {} ---\n\n{}", language, translated);
    }

    println!(
        "\nBuilt from {} pages in {:.2} seconds.",
        output.pages.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
