use clap::Parser;
use site_brochure::export::write_outputs;
use site_brochure::{Brochure, BrochureConfig, Mode};
use std::process::ExitCode;

mod args;
use args::{Args, mock_mode_enabled};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("Brochure generation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> site_brochure::Result<()> {
    let config = match &args.config {
        Some(path) => {
            ::log::info!("Loading configuration from {}", path.display());
            BrochureConfig::from_file(path)?
        }
        None => BrochureConfig::default(),
    };

    let mut brochure = Brochure::new(&args.url)
        .with_config(config)
        .with_company(&args.company)
        .with_tone(args.tone);

    if args.mock || mock_mode_enabled(std::env::var("MOCK_MODE").ok().as_deref()) {
        ::log::info!("Mock mode: no model will be called");
        brochure = brochure.with_mode(Mode::Mock);
    }
    if let Some(max_chars) = args.max_chars {
        brochure = brochure.with_max_chars(max_chars);
    }
    if let Some(language) = &args.translate_to {
        brochure = brochure.with_translation(language);
    }

    let started = std::time::Instant::now();
    let output = brochure.generate().await?;

    let written = write_outputs(&args.output_dir, &output, args.export_html)?;
    for path in &written {
        println!("{}", path.display());
    }

    ::log::info!(
        "Brochure for {} ready in {:.2} seconds ({} pages, {} files)",
        output.company_name,
        started.elapsed().as_secs_f64(),
        output.pages.len(),
        written.len()
    );
    Ok(())
}
