use crate::error::Result;
use crate::results::BrochureOutput;
use crate::utils::slugify;
use pulldown_cmark::{Options, Parser, html};
use std::fs;
use std::path::{Path, PathBuf};

const HTML_STYLE: &str = "body{font-family:system-ui,-apple-system,'Segoe UI',Roboto,sans-serif;\
max-width:860px;margin:2rem auto;padding:0 1rem;line-height:1.6;color:#1f2933}\
h1,h2,h3{line-height:1.25;color:#102a43}h1{border-bottom:2px solid #d9e2ec;padding-bottom:.3rem}\
a{color:#2f6fde}blockquote{margin:1rem 0;padding:.5rem 1rem;border-left:4px solid #9fb3c8;\
color:#486581;background:#f0f4f8}hr{border:0;border-top:1px solid #d9e2ec;margin:2rem 0}\
code{background:#f0f4f8;padding:.1rem .3rem;border-radius:3px}";

/// Render Markdown into a standalone, styled HTML5 page
pub fn render_html(markdown: &str, title: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut body = String::new();
    html::push_html(&mut body, parser);

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        HTML_STYLE,
        body
    )
}

/// Write Markdown to `path`, creating parent directories
pub fn save_markdown(path: &Path, markdown: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, markdown)?;
    ::log::info!("Saved {}", path.display());
    Ok(())
}

/// Write Markdown rendered as HTML to `path`
pub fn export_html(path: &Path, markdown: &str, title: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_html(markdown, title))?;
    ::log::info!("Exported {}", path.display());
    Ok(())
}

/// Write every file for a run into `out_dir`
///
/// `<slug>_brochure.md` always, `<slug>_brochure.html` with `html`, and the
/// same pair with a `_<language>` suffix for a translation.
pub fn write_outputs(out_dir: &Path, output: &BrochureOutput, html: bool) -> Result<Vec<PathBuf>> {
    let stem = format!("{}_brochure", slugify(&output.company_name));
    let title = format!("{} brochure", output.company_name);

    let mut documents = vec![(stem.clone(), output.markdown.as_str())];
    if let Some((language, translated)) = &output.translation {
        documents.push((format!("{}_{}", stem, slugify(language)), translated.as_str()));
    }

    let mut written = Vec::new();
    for (name, markdown) in documents {
        let md_path = out_dir.join(format!("{name}.md"));
        save_markdown(&md_path, markdown)?;
        written.push(md_path);

        if html {
            let html_path = out_dir.join(format!("{name}.html"));
            export_html(&html_path, markdown, &title)?;
            written.push(html_path);
        }
    }
    Ok(written)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
