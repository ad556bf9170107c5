use crate::brochure::budget::{bounded_text, facts};
use crate::brochure::sanitize::sanitize;
use crate::brochure::{BrochureWriter, Tone};
use crate::config::BudgetConfig;
use crate::error::Result;
use crate::llm::CompletionBackend;
use crate::results::PageRecord;
use crate::utils::estimate_tokens;
use async_trait::async_trait;
use std::sync::Arc;

/// Offline writer filling a fixed template
///
/// Only the company name and the titles of the compiled pages come from the
/// site; everything else is canned text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockWriter;

impl MockWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BrochureWriter for MockWriter {
    async fn write(&self, company: &str, pages: &[PageRecord], tone: Tone) -> Result<String> {
        ::log::info!("Writing template brochure for {} ({} tone)", company, tone);

        let company = if company.trim().is_empty() {
            "Our company"
        } else {
            company.trim()
        };
        let tagline = match tone {
            Tone::Formal => "A technology partner to accelerate your digital roadmap.",
            Tone::Humorous => "We speak fluent spreadsheet so you don't have to.",
        };

        let mut md = format!("# {company} – Company Brochure\n\n> {tagline}\n\n");

        md.push_str("## Executive Summary\n\n");
        md.push_str(&format!(
            "{company} helps organisations that want to professionalise their digital layer, \
             automate key processes and make data-driven decisions.\n\n"
        ));

        md.push_str("## Service Lines\n\n");
        md.push_str("### Consulting and Strategy\n- Technology roadmap.\n- Quick wins.\n- Governance and prioritisation.\n\n");
        md.push_str("### Delivery and Data\n- Integrations.\n- Data orchestration.\n- Visualisation and reporting.\n\n");

        let evidence: Vec<String> = pages
            .iter()
            .filter(|page| !page.title.trim().is_empty())
            .map(|page| {
                let title = page.title.replace(['[', ']'], "");
                format!("- [{}]({})", title.trim(), page.url)
            })
            .collect();
        if !evidence.is_empty() {
            md.push_str("## Evidence\n\n");
            md.push_str(&evidence.join("\n"));
            md.push_str("\n\n");
        }

        md.push_str("## Next Steps\n\n");
        md.push_str(
            "If you want to explore how these capabilities apply to your organisation, \
             book a conversation with our team.\n",
        );

        Ok(sanitize(&md))
    }
}

/// Writer that asks the generation backend for a grounded brochure
pub struct GeneratedWriter {
    backend: Arc<dyn CompletionBackend>,
    budget: BudgetConfig,
}

impl GeneratedWriter {
    pub fn new(backend: Arc<dyn CompletionBackend>, budget: BudgetConfig) -> Self {
        Self { backend, budget }
    }

    fn system_prompt(tone: Tone) -> String {
        format!(
            "You are a B2B copywriter. Reply with Markdown only. \
             Inventing facts or using placeholders is FORBIDDEN. \
             Write a solid corporate brochure using only the FACTS and the content provided. \
             Tone: {}",
            tone.instruction()
        )
    }

    fn user_prompt(company: &str, facts_json: &str, text: &str) -> String {
        format!(
            "Company: {company}\n\n\
             FACTS (reliable JSON):\n{facts_json}\n\n\
             Additional content (free text):\n{text}\n\n\
             Write a brochure anchored in FACTS. EXACT structure (omit sections without evidence):\n\
             # {company} – Company Brochure\n\n\
             ## Executive Summary\n\
             • 1–2 paragraphs with the mission and the real focus found in FACTS.\n\n\
             ## Service Lines / Programs / Resources\n\
             • Bullets with capabilities, programs, publications or initiatives named in titles or headings.\n\n\
             ## Community / Ecosystem / Sectors\n\
             • Bullets with communities, events, audiences or sectors cited in FACTS.\n\n\
             ## Evidence / Cases / Resources\n\
             • 4–8 bullets with concrete page, section or resource names (use the titles and headings).\n\n\
             ## Next Steps\n\
             • A call to action consistent with what was observed (contribute, join, download, take part, get in touch).\n"
        )
    }
}

#[async_trait]
impl BrochureWriter for GeneratedWriter {
    async fn write(&self, company: &str, pages: &[PageRecord], tone: Tone) -> Result<String> {
        let text = bounded_text(pages, self.budget.max_chars);
        let facts_json = serde_json::to_string_pretty(&facts(pages, self.budget.max_facts))?;

        let system = Self::system_prompt(tone);
        let user = Self::user_prompt(company, &facts_json, &text);
        ::log::debug!(
            "Brochure prompt: {} facts chars, {} text chars (~{} tokens)",
            facts_json.len(),
            text.chars().count(),
            estimate_tokens(&system) + estimate_tokens(&user)
        );

        let draft = self.backend.complete(&system, &user).await?;
        Ok(sanitize(&draft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brochure::sanitize::EMPTY_BROCHURE;
    use crate::error::Error;
    use crate::llm::mock::StaticBackend;

    fn pages() -> Vec<PageRecord> {
        vec![
            PageRecord {
                page_type: "home".to_string(),
                url: "https://acme.test".to_string(),
                content: "Rockets for everyone.".to_string(),
                title: "Acme [Home]".to_string(),
                headings: vec!["Welcome".to_string()],
                description: "Acme builds rockets.".to_string(),
                summary: "Acme builds rockets.".to_string(),
            },
            PageRecord {
                page_type: "careers".to_string(),
                url: "https://acme.test/careers".to_string(),
                content: "Join us.".to_string(),
                title: String::new(),
                headings: Vec::new(),
                description: String::new(),
                summary: "Join us.".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_mock_writer_uses_company_and_titles() {
        let md = MockWriter::new()
            .write("Acme", &pages(), Tone::Formal)
            .await
            .unwrap();

        assert!(md.starts_with("# Acme – Company Brochure"));
        assert!(md.contains("- [Acme Home](https://acme.test)"));
        assert!(!md.contains("https://acme.test/careers"));
        assert!(md.contains("## Next Steps"));
        assert_eq!(sanitize(&md), md);
    }

    #[tokio::test]
    async fn test_mock_writer_without_pages_or_name() {
        let md = MockWriter::new().write(" ", &[], Tone::Humorous).await.unwrap();
        assert!(md.starts_with("# Our company – Company Brochure"));
        assert!(md.contains("spreadsheet"));
        assert!(!md.contains("## Evidence"));
    }

    #[tokio::test]
    async fn test_generated_writer_grounds_and_sanitizes() {
        let backend = Arc::new(StaticBackend::replying(
            "# Acme – Company Brochure\n\n## Executive Summary\nAcme builds rockets. Call [Phone].\n\n\n\n- \n",
        ));
        let writer = GeneratedWriter::new(backend.clone(), BudgetConfig::default());

        let md = writer.write("Acme", &pages(), Tone::Humorous).await.unwrap();
        assert_eq!(
            md,
            "# Acme – Company Brochure\n\n## Executive Summary\nAcme builds rockets. Call ."
        );

        let (system, user) = &backend.requests()[0];
        assert!(system.contains(Tone::Humorous.instruction()));
        assert!(user.starts_with("Company: Acme\n\nFACTS (reliable JSON):\n["));
        assert!(user.contains(r#""url": "https://acme.test/careers""#));
        assert!(user.contains("Acme builds rockets.\n\nJoin us."));
    }

    #[tokio::test]
    async fn test_generated_writer_respects_budget() {
        let backend = Arc::new(StaticBackend::replying("# Done"));
        let budget = BudgetConfig {
            max_chars: 5,
            max_facts: 1,
        };
        let writer = GeneratedWriter::new(backend.clone(), budget);
        writer.write("Acme", &pages(), Tone::Formal).await.unwrap();

        let (_, user) = &backend.requests()[0];
        assert!(user.contains("Additional content (free text):\nAcme \n\n"));
        assert!(!user.contains("https://acme.test/careers"));
    }

    #[tokio::test]
    async fn test_generated_writer_empty_reply_is_placeholder() {
        let writer = GeneratedWriter::new(Arc::new(StaticBackend::new()), BudgetConfig::default());
        let md = writer.write("Acme", &pages(), Tone::Formal).await.unwrap();
        assert_eq!(md, EMPTY_BROCHURE);
    }

    #[tokio::test]
    async fn test_generated_writer_propagates_backend_failure() {
        let writer = GeneratedWriter::new(
            Arc::new(StaticBackend::failing("model not loaded")),
            BudgetConfig::default(),
        );
        let err = writer.write("Acme", &pages(), Tone::Formal).await.unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
    }
}
