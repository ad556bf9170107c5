//! The five-step brochure pipeline
//!
//! scrape → select → compile → generate → translate, run strictly in order on
//! one task. The [`Pipeline`] owns its configuration and collaborators, so
//! separate pipelines never share state.

use crate::brochure::{
    BrochureWriter, GeneratedWriter, MockWriter, Tone, bounded_text, with_disclaimer,
};
use crate::compiler::{backfill_summaries, compile};
use crate::config::{BrochureConfig, Mode};
use crate::crawlers::{PageFetcher, build_fetcher, parse_base_url, scrape};
use crate::error::Result;
use crate::llm::CompletionBackend;
use crate::llm::ollama::OllamaBackend;
use crate::parsers::site_name;
use crate::results::{BrochureOutput, LinkSelection, PageRecord};
use crate::selector::{BackendSelector, HeuristicSelector, LinkSelector};
use crate::utils::is_placeholder_name;
use std::sync::Arc;

const STEPS: usize = 5;

pub struct Pipeline {
    config: BrochureConfig,
    fetcher: Arc<dyn PageFetcher>,
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl Pipeline {
    pub fn new(
        config: BrochureConfig,
        fetcher: Arc<dyn PageFetcher>,
        backend: Option<Arc<dyn CompletionBackend>>,
    ) -> Self {
        Self {
            config,
            fetcher,
            backend,
        }
    }

    /// Build the fetcher from `config.fetch` and, in live mode, an Ollama backend
    pub fn from_config(config: BrochureConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = build_fetcher(&config.fetch)?;
        let backend: Option<Arc<dyn CompletionBackend>> = match config.mode {
            Mode::Live => {
                let ollama = OllamaBackend::new(&config.backend)?;
                ::log::info!(
                    "Using Ollama at {} with model {}",
                    config.backend.url,
                    ollama.model()
                );
                Some(Arc::new(ollama))
            }
            Mode::Mock => None,
        };
        Ok(Self::new(config, fetcher, backend))
    }

    pub fn config(&self) -> &BrochureConfig {
        &self.config
    }

    /// The backend, if this run may use it
    fn live_backend(&self) -> Option<&Arc<dyn CompletionBackend>> {
        match self.config.mode {
            Mode::Live => self.backend.as_ref(),
            Mode::Mock => None,
        }
    }

    fn warn_if_backendless(&self) {
        if self.config.mode == Mode::Live && self.backend.is_none() {
            ::log::warn!("Live mode requested without a generation backend; using mock behaviour");
        }
    }

    /// Fetch the home page and list its same-site links
    pub async fn scrape(&self, url: &str) -> Result<(String, Vec<String>)> {
        scrape(self.fetcher.as_ref(), url).await
    }

    /// Pick the brochure-relevant links among `links`
    pub async fn select(&self, base_url: &str, links: &[String]) -> Result<LinkSelection> {
        let base = parse_base_url(base_url)?;
        let selector: Box<dyn LinkSelector> = match self.live_backend() {
            Some(backend) => Box::new(BackendSelector::new(
                backend.clone(),
                self.config.selector.max_links,
            )),
            None => {
                self.warn_if_backendless();
                Box::new(HeuristicSelector::new(&self.config.selector)?)
            }
        };
        Ok(selector.select(&base, links).await)
    }

    /// Fetch and compile the selected pages, home page first
    pub async fn compile(
        &self,
        selection: &LinkSelection,
        home_html: &str,
        base_url: &str,
    ) -> Vec<PageRecord> {
        let mut pages = compile(self.fetcher.as_ref(), selection, home_html, base_url).await;
        backfill_summaries(&mut pages);
        pages
    }

    /// Draft the brochure and append the disclaimer footer
    pub async fn generate_brochure(
        &self,
        company: &str,
        pages: &[PageRecord],
        tone: Tone,
    ) -> Result<String> {
        let writer: Box<dyn BrochureWriter> = match self.live_backend() {
            Some(backend) => Box::new(GeneratedWriter::new(
                backend.clone(),
                self.config.budget.clone(),
            )),
            None => {
                self.warn_if_backendless();
                Box::new(MockWriter::new())
            }
        };

        let markdown = writer.write(company, pages, tone).await?;
        let source = pages.first().map(|p| p.url.as_str()).unwrap_or_default();
        Ok(with_disclaimer(
            &markdown,
            source,
            chrono::Local::now().date_naive(),
        ))
    }

    /// Translate a brochure; the original comes back on any failure
    pub async fn translate(&self, markdown: &str, target_language: &str) -> String {
        let backend = self.live_backend().map(Arc::as_ref);
        crate::brochure::translate(backend, markdown, target_language).await
    }

    /// Grounding text for a site without generating anything
    pub async fn details(&self, url: &str) -> Result<String> {
        let (html, links) = self.scrape(url).await?;
        let selection = self.select(url, &links).await?;
        let pages = self.compile(&selection, &html, url).await;
        Ok(bounded_text(&pages, self.config.budget.max_chars))
    }

    /// Run every step and collect the result
    ///
    /// A placeholder `company` (empty, "example", ...) is replaced by the name
    /// found on the home page, or the host when the page has none.
    pub async fn run(
        &self,
        url: &str,
        company: &str,
        tone: Tone,
        translate_to: Option<&str>,
    ) -> Result<BrochureOutput> {
        let result = self.run_steps(url, company, tone, translate_to).await;
        self.shutdown().await;
        result
    }

    /// Release the fetcher's resources (e.g. close a WebDriver session)
    pub async fn shutdown(&self) {
        self.fetcher.shutdown().await;
    }

    async fn run_steps(
        &self,
        url: &str,
        company: &str,
        tone: Tone,
        translate_to: Option<&str>,
    ) -> Result<BrochureOutput> {
        let base = parse_base_url(url)?;
        let mode = if self.live_backend().is_some() {
            "live"
        } else {
            "mock"
        };
        ::log::info!("Building brochure for {} ({} mode, {} tone)", url, mode, tone);

        if self.config.fetch.check_robots_txt {
            if let Some(robots) = self.fetcher.robots_txt(&base).await {
                ::log::debug!("robots.txt for {}:\n{}", base, robots);
            }
        }

        ::log::info!("Step 1/{}: scraping {}", STEPS, url);
        let (html, links) = self.scrape(url).await?;

        let company = if is_placeholder_name(company) {
            let detected = site_name(&html)
                .or_else(|| base.host_str().map(str::to_string))
                .unwrap_or_else(|| url.to_string());
            ::log::info!("Company name not provided; using {:?}", detected);
            detected
        } else {
            company.trim().to_string()
        };

        ::log::info!("Step 2/{}: selecting links among {}", STEPS, links.len());
        let selection = self.select(url, &links).await?;
        if selection.is_empty() {
            ::log::warn!("No links selected; the brochure will rest on the home page alone");
        }

        ::log::info!("Step 3/{}: compiling {} selected pages", STEPS, selection.len());
        let pages = self.compile(&selection, &html, url).await;

        ::log::info!("Step 4/{}: writing brochure from {} pages", STEPS, pages.len());
        let markdown = self.generate_brochure(&company, &pages, tone).await?;

        let translation = match translate_to.map(str::trim).filter(|l| !l.is_empty()) {
            Some(language) => {
                ::log::info!("Step 5/{}: translating to {}", STEPS, language);
                let translated = self.translate(&markdown, language).await;
                Some((language.to_string(), translated))
            }
            None => {
                ::log::info!("Step 5/{}: no translation requested", STEPS);
                None
            }
        };

        Ok(BrochureOutput {
            company_name: company,
            base_url: url.to_string(),
            markdown,
            translation,
            pages,
        })
    }
}
