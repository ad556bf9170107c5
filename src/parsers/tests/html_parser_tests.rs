use crate::parsers::html;

#[cfg(test)]
mod tests {
    use super::*;

    const ACME_HOME: &str = r##"<!DOCTYPE html>
<html>
<head>
  <title>Acme — Home</title>
  <meta name="description" content="  Acme builds anvils.  ">
  <style>body { color: red; }</style>
  <script>window.track = "secret";</script>
</head>
<body>
  <header><a href="/">Logo</a> Sign in</header>
  <nav><a href="/about">About</a><a href="/privacy">Privacy</a></nav>
  <main>
    <h1>Anvils   for
      everyone</h1>
    <p>We have made anvils   since 1949.</p>
    <h2>Our <em>team</em></h2>
    <p>Meet the people.</p>
    <a href="https://external.example/x">Partner</a>
    <a href="#top">Back to top</a>
    <a href="javascript:void(0)">Menu</a>
    <a href="mailto:hello@acme.test">Mail us</a>
    <a href="/about#history">History</a>
  </main>
  <aside>Related posts</aside>
  <footer>© Acme</footer>
</body>
</html>"##;

    #[test]
    fn test_extract_links_resolves_and_filters_pseudo_links() {
        let links = html::extract_links(ACME_HOME, "https://acme.test");
        assert_eq!(
            links,
            vec![
                "https://acme.test/",
                "https://acme.test/about",
                "https://acme.test/privacy",
                "https://external.example/x",
            ]
        );
    }

    #[test]
    fn test_extract_links_has_no_duplicates_and_only_absolute_urls() {
        let html = r##"<a href="a">1</a><a href="./a">2</a><a href="/a">3</a>
            <a href="  /b  ">4</a><a href="JavaScript:alert(1)">5</a><a href="">6</a>
            <a>no href</a><a href="#">7</a>"##;
        let links = html::extract_links(html, "https://acme.test/");
        assert_eq!(links, vec!["https://acme.test/a", "https://acme.test/b"]);
        for link in &links {
            assert!(url::Url::parse(link).unwrap().has_host());
        }
    }

    #[test]
    fn test_parse_links_keeps_raw_href_and_source() {
        let links = html::parse_links(r#"<a href="/about">About</a>"#, "https://acme.test/en");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "/about");
        assert_eq!(links[0].url, "https://acme.test/about");
        assert_eq!(links[0].source, "https://acme.test/en");
    }

    #[test]
    fn test_extract_links_with_invalid_base_keeps_absolute_hrefs() {
        let html = r#"<a href="/relative">r</a><a href="https://acme.test/abs#x">a</a>"#;
        let links = html::extract_links(html, "not a url");
        assert_eq!(links, vec!["https://acme.test/abs"]);
    }

    #[test]
    fn test_clean_text_drops_boilerplate() {
        let text = html::clean_text(ACME_HOME);

        assert!(!text.contains("secret"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Sign in"));
        assert!(!text.contains("Privacy"));
        assert!(!text.contains("Related posts"));
        assert!(!text.contains("© Acme"));

        assert!(text.contains("We have made anvils   since 1949."));
        assert!(text.contains("Meet the people."));
        assert!(text.lines().all(|line| line == line.trim() && !line.is_empty()));
    }

    #[test]
    fn test_clean_text_is_total() {
        assert_eq!(html::clean_text(""), "");
        assert_eq!(html::clean_text("   "), "");
        assert_eq!(html::clean_text("plain words"), "plain words");
        assert_eq!(html::clean_text("<p>unclosed <b>tags"), "unclosed\ntags");
        assert_eq!(html::clean_text("<script>only script"), "");
    }

    #[test]
    fn test_extract_metadata() {
        let meta = html::extract_metadata(ACME_HOME);
        assert_eq!(meta.title, "Acme — Home");
        assert_eq!(meta.headings, vec!["Anvils for everyone", "Our team"]);
        assert_eq!(meta.description, "Acme builds anvils.");
    }

    #[test]
    fn test_extract_metadata_falls_back_to_open_graph() {
        let html = r#"<head>
            <meta name="description" content="   ">
            <meta property="og:description" content="OG text">
            </head>"#;
        assert_eq!(html::extract_metadata(html).description, "OG text");
    }

    #[test]
    fn test_extract_metadata_caps_headings() {
        let html: String = (0..15).map(|i| format!("<h2>Heading {i}</h2><h3>x</h3>")).collect();
        let meta = html::extract_metadata(&html);
        assert_eq!(meta.headings.len(), html::MAX_HEADINGS);
        assert_eq!(meta.headings[0], "Heading 0");
        assert!(meta.title.is_empty());
    }

    #[test]
    fn test_site_name() {
        assert_eq!(html::site_name(ACME_HOME).as_deref(), Some("Acme"));
        assert_eq!(
            html::site_name(r#"<meta property="og:site_name" content="Acme Inc">"#).as_deref(),
            Some("Acme Inc")
        );
        assert_eq!(
            html::site_name("<title>Globex - Welcome</title>").as_deref(),
            Some("Globex")
        );
        assert_eq!(html::site_name("<p>no title</p>"), None);
    }
}
