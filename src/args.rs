use clap::Parser;
use site_brochure::Tone;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-brochure")]
#[command(about = "Builds a corporate brochure from a company's public website")]
#[command(version)]
pub struct Args {
    /// Company website to read
    #[arg(long)]
    pub url: String,

    /// Company name (detected from the site when omitted)
    #[arg(long, default_value = "")]
    pub company: String,

    /// Writing style of the brochure
    #[arg(long, value_enum, default_value_t = Tone::Formal)]
    pub tone: Tone,

    /// Directory for the generated files
    #[arg(long, default_value = "outputs")]
    pub output_dir: PathBuf,

    /// Also write an HTML version of every Markdown file
    #[arg(long)]
    pub export_html: bool,

    /// Run offline: heuristic link selection and a template brochure
    #[arg(long)]
    pub mock: bool,

    /// Translate the brochure into this language (e.g. "es", "French")
    #[arg(long)]
    pub translate_to: Option<String>,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cap on the page text sent to the model
    #[arg(long)]
    pub max_chars: Option<usize>,
}

/// Whether a `MOCK_MODE` value asks for an offline run
pub fn mock_mode_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let args = Args::try_parse_from([
            "site-brochure",
            "--url",
            "https://acme.test",
            "--company",
            "Acme",
            "--tone",
            "humorous",
            "--export-html",
            "--mock",
            "--translate-to",
            "es",
            "--max-chars",
            "5000",
        ])
        .unwrap();

        assert_eq!(args.url, "https://acme.test");
        assert_eq!(args.company, "Acme");
        assert_eq!(args.tone, Tone::Humorous);
        assert!(args.export_html);
        assert!(args.mock);
        assert_eq!(args.translate_to.as_deref(), Some("es"));
        assert_eq!(args.max_chars, Some(5000));
        assert_eq!(args.output_dir, PathBuf::from("outputs"));
    }

    #[test]
    fn test_defaults_and_required_url() {
        let args = Args::try_parse_from(["site-brochure", "--url", "https://acme.test"]).unwrap();
        assert_eq!(args.tone, Tone::Formal);
        assert_eq!(args.company, "");
        assert!(!args.mock);
        assert!(args.config.is_none());

        assert!(Args::try_parse_from(["site-brochure"]).is_err());
        assert!(Args::try_parse_from(["site-brochure", "--url", "x", "--tone", "angry"]).is_err());
    }

    #[test]
    fn test_mock_mode_env_value() {
        assert!(mock_mode_enabled(Some("true")));
        assert!(mock_mode_enabled(Some(" TRUE ")));
        assert!(!mock_mode_enabled(Some("1")));
        assert!(!mock_mode_enabled(None));
    }
}
