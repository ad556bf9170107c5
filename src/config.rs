use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Whether the pipeline may call the text-generation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Offline: heuristic link selection and a template brochure
    Mock,
    /// Backend-driven link selection, generation and translation
    #[default]
    Live,
}

/// How pages are downloaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    /// Plain HTTP GET
    #[default]
    Http,
    /// Render through a WebDriver session (for JavaScript-heavy sites)
    WebDriver,
}

/// Page fetching configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,

    /// Politeness delay before every page fetch
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    #[serde(default)]
    pub renderer: Renderer,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Fetch and log robots.txt before crawling (informational only)
    #[serde(default)]
    pub check_robots_txt: bool,
}

/// One keyword rule of the heuristic link selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Regex matched against the lowercase URL path
    pub pattern: String,
    pub score: u8,
    pub page_type: String,
}

impl KeywordRule {
    pub fn new(pattern: &str, score: u8, page_type: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            score,
            page_type: page_type.to_string(),
        }
    }
}

/// Link selection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Cap on selected links
    #[serde(default = "default_max_links")]
    pub max_links: usize,

    /// Heuristic threshold; links scoring below are dropped
    #[serde(default = "default_min_score")]
    pub min_score: u8,

    /// Score of a link no rule matches
    #[serde(default = "default_score")]
    pub default_score: u8,

    /// Keyword rules in priority order; the first match wins
    #[serde(default = "default_rules")]
    pub rules: Vec<KeywordRule>,

    /// Regex patterns for URLs the heuristic never selects
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

/// Bounds on the material sent to the generation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    #[serde(default = "default_max_facts")]
    pub max_facts: usize,
}

/// Ollama backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_backend_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrochureConfig {
    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub selector: SelectorConfig,

    #[serde(default)]
    pub budget: BudgetConfig,

    #[serde(default)]
    pub backend: BackendConfig,
}

impl BrochureConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|e| Error::Config(format!("cannot open {}: {}", path.display(), e)))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("OLLAMA_URL") {
            self.backend.url = url;
        }
        if let Some(model) = non_empty("OLLAMA_MODEL") {
            self.backend.model = model;
        }
        if let Some(timeout) = non_empty("OLLAMA_TIMEOUT") {
            match timeout.trim().parse() {
                Ok(secs) => self.backend.timeout_secs = secs,
                Err(_) => ::log::warn!("Ignoring invalid OLLAMA_TIMEOUT: {}", timeout),
            }
        }
        if let Some(temperature) = non_empty("OLLAMA_TEMPERATURE") {
            match temperature.trim().parse() {
                Ok(t) => self.backend.temperature = t,
                Err(_) => ::log::warn!("Ignoring invalid OLLAMA_TEMPERATURE: {}", temperature),
            }
        }
        if let Some(webdriver_url) = non_empty("WEBDRIVER_URL") {
            self.fetch.webdriver_url = webdriver_url;
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Reject values that would make the pipeline meaningless
    pub fn validate(&self) -> Result<()> {
        if self.selector.max_links == 0 {
            return Err(Error::Config("selector.max_links must be at least 1".into()));
        }
        if self.selector.min_score > 100 || self.selector.default_score > 100 {
            return Err(Error::Config("selector scores must be within 0..=100".into()));
        }
        if self.budget.max_chars == 0 {
            return Err(Error::Config("budget.max_chars must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout_secs(),
            delay_ms: default_delay_ms(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            renderer: Renderer::default(),
            webdriver_url: default_webdriver_url(),
            check_robots_txt: false,
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_links: default_max_links(),
            min_score: default_min_score(),
            default_score: default_score(),
            rules: default_rules(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            max_facts: default_max_facts(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            model: default_model(),
            timeout_secs: default_backend_timeout_secs(),
            temperature: default_temperature(),
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    15
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/123.0 Safari/537.36"
        .to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9,es;q=0.8".to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_max_links() -> usize {
    10
}

fn default_min_score() -> u8 {
    60
}

fn default_score() -> u8 {
    40
}

fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(r"(about|company|team|nosotros|quienes-somos)", 95, "about page"),
        KeywordRule::new(r"(careers|jobs|empleo|trabaja-con-nosotros)", 90, "careers"),
        KeywordRule::new(
            r"(customers|clients|casos|success-stories|references)",
            88,
            "customers",
        ),
        KeywordRule::new(r"(community|comunidad|ecosystem)", 85, "community"),
        KeywordRule::new(r"(partners|alliances)", 80, "partners"),
        KeywordRule::new(r"(press|news|noticias)", 75, "press"),
        KeywordRule::new(r"(blog|insights|articles)", 70, "blog"),
    ]
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        // Static assets
        r"(?i)\.(jpg|jpeg|png|gif|css|js|ico|svg|woff|woff2|ttf|eot|pdf|zip)$".to_string(),
        // Authentication
        r"(?i)/(login|log-in|signin|sign-in|signup|sign-up|register|account)(/|$)".to_string(),
        // Legal
        r"(?i)/(privacy|privacidad|terms|condiciones|legal|cookies?)(/|$)".to_string(),
        // Commerce
        r"(?i)/(cart|carrito|checkout|basket)(/|$)".to_string(),
    ]
}

fn default_max_chars() -> usize {
    12_000
}

fn default_max_facts() -> usize {
    10
}

fn default_backend_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2:latest".to_string()
}

fn default_backend_timeout_secs() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.2
}
