// Re-export modules
pub mod brochure;
pub mod compiler;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod export;
pub mod filter;
pub mod llm;
pub mod parsers;
pub mod pipeline;
pub mod results;
pub mod selector;
pub mod utils;

// Re-export commonly used types for convenience
pub use brochure::Tone;
pub use config::{BrochureConfig, Mode};
pub use error::{Error, Result};
pub use pipeline::Pipeline;
pub use results::{BrochureOutput, LinkSelection, PageRecord, SelectedLink};

use crawlers::{PageFetcher, build_fetcher};
use llm::CompletionBackend;
use llm::ollama::OllamaBackend;
use std::sync::Arc;

/// Main builder for generating a brochure from a company website
pub struct Brochure {
    url: String,
    company: String,
    tone: Tone,
    mode: Option<Mode>,
    translate_to: Option<String>,
    config: BrochureConfig,
    fetcher: Option<Arc<dyn PageFetcher>>,
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl Brochure {
    /// Create a new builder for the site at `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            company: String::new(),
            tone: Tone::default(),
            mode: None,
            translate_to: None,
            config: BrochureConfig::default(),
            fetcher: None,
            backend: None,
        }
    }

    /// Company name; leave unset to detect it from the home page
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Override the configured mode
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Also translate the brochure into `language`
    pub fn with_translation(mut self, language: impl Into<String>) -> Self {
        self.translate_to = Some(language.into());
        self
    }

    /// Cap on the free text sent to the backend
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.config.budget.max_chars = max_chars;
        self
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: BrochureConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = BrochureConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self> {
        let config = BrochureConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Use a specific page fetcher instead of the configured one
    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Use a specific generation backend instead of Ollama
    pub fn with_backend(mut self, backend: Arc<dyn CompletionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Run the pipeline
    ///
    /// Environment overrides (`OLLAMA_*`, `WEBDRIVER_URL`) are applied on top
    /// of the configuration before anything is built.
    pub async fn generate(self) -> Result<BrochureOutput> {
        let mut config = self.config;
        config.apply_env();
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        config.validate()?;

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => build_fetcher(&config.fetch)?,
        };
        let backend = match (self.backend, config.mode) {
            (Some(backend), _) => Some(backend),
            (None, Mode::Live) => {
                Some(Arc::new(OllamaBackend::new(&config.backend)?) as Arc<dyn CompletionBackend>)
            }
            (None, Mode::Mock) => None,
        };

        let pipeline = Pipeline::new(config, fetcher, backend);
        pipeline
            .run(
                &self.url,
                &self.company,
                self.tone,
                self.translate_to.as_deref(),
            )
            .await
    }
}
