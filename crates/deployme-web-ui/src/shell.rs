//! Page shell: document metadata, navigation bar and footer around every page.

use minijinja::context;
use serde::Serialize;

use crate::footer::Footer;
use crate::highlight::Highlighter;
use crate::links::{PREVIEW_IMAGE, PREVIEW_IMAGE_HEIGHT, PREVIEW_IMAGE_WIDTH};
use crate::navbar::NavBar;
use crate::templates::{RenderError, Ui};

/// Default document title.
pub const DEFAULT_TITLE: &str = "DeployMe";

/// Default document description.
pub const DEFAULT_DESCRIPTION: &str =
    "Minimalistic, open-source, self-hosted deployment platform for your ML projects.";

/// Default Open Graph locale.
pub const DEFAULT_LOCALE: &str = "en_IE";

/// Parameters handed from the caller to a page, untouched by the shell.
pub type PageProps = serde_json::Map<String, serde_json::Value>;

/// Document-wide metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteMeta {
    /// Document and social preview title
    pub title: String,
    /// Document and social preview description
    pub description: String,
    /// Social preview image
    pub image: String,
    /// Open Graph locale
    pub locale: String,
    /// Prefix for site-relative links
    pub base_url: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            image: PREVIEW_IMAGE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            base_url: "/".to_string(),
        }
    }
}

/// Content placed inside the shell.
pub trait Page: Send + Sync {
    /// URL path of the page.
    fn route(&self) -> &str;

    /// Output file relative to the site root.
    fn output_file(&self) -> &str;

    /// Title shown before the site title, if the page wants its own.
    fn title(&self) -> Option<&str> {
        None
    }

    /// Whether the page belongs in the sitemap.
    fn indexable(&self) -> bool {
        true
    }

    /// Render the page body.
    fn render(&self, ui: &Ui, meta: &SiteMeta, props: &PageProps) -> Result<String, RenderError>;

    /// Runs once on the composed document.
    fn mount(&self, document: String, _highlighter: &mut Highlighter) -> String {
        document
    }
}

/// Top-level composition shared by all pages.
#[derive(Debug, Clone, Default)]
pub struct PageShell {
    meta: SiteMeta,
    scripts: Vec<String>,
}

impl PageShell {
    pub fn new(meta: SiteMeta) -> Self {
        Self {
            meta,
            scripts: Vec::new(),
        }
    }

    /// Add a script reference after the runtime script.
    pub fn with_script(mut self, src: impl Into<String>) -> Self {
        self.scripts.push(src.into());
        self
    }

    pub fn meta(&self) -> &SiteMeta {
        &self.meta
    }

    /// Render a page with a freshly mounted navigation bar.
    pub fn render(
        &self,
        ui: &Ui,
        page: &dyn Page,
        props: &PageProps,
    ) -> Result<String, RenderError> {
        self.render_with_nav(ui, &NavBar::default(), page, props)
    }

    /// Render a page with the given navigation bar state.
    pub fn render_with_nav(
        &self,
        ui: &Ui,
        nav: &NavBar,
        page: &dyn Page,
        props: &PageProps,
    ) -> Result<String, RenderError> {
        let navbar = nav.render(ui, &self.meta)?;
        let content = page.render(ui, &self.meta, props)?;
        let footer = Footer.render(ui, &self.meta)?;

        let title = match page.title() {
            Some(title) => format!("{} | {}", title, self.meta.title),
            None => self.meta.title.clone(),
        };

        let document = ui.render(
            "shell.html",
            context! {
                title => title,
                meta => &self.meta,
                image_width => PREVIEW_IMAGE_WIDTH,
                image_height => PREVIEW_IMAGE_HEIGHT,
                navbar => navbar,
                content => content,
                footer => footer,
                scripts => &self.scripts,
            },
        )?;

        let mut highlighter = Highlighter::new();
        Ok(page.mount(document, &mut highlighter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Page for Echo {
        fn route(&self) -> &str {
            "/echo/"
        }

        fn output_file(&self) -> &str {
            "echo/index.html"
        }

        fn title(&self) -> Option<&str> {
            Some("Echo")
        }

        fn render(
            &self,
            _ui: &Ui,
            _meta: &SiteMeta,
            props: &PageProps,
        ) -> Result<String, RenderError> {
            Ok(format!(
                "<p id=\"echo\">{}</p>",
                serde_json::Value::Object(props.clone())
            ))
        }
    }

    struct Blank;

    impl Page for Blank {
        fn route(&self) -> &str {
            "/blank/"
        }

        fn output_file(&self) -> &str {
            "blank/index.html"
        }

        fn render(
            &self,
            _ui: &Ui,
            _meta: &SiteMeta,
            _props: &PageProps,
        ) -> Result<String, RenderError> {
            Ok(String::new())
        }
    }

    #[test]
    fn wraps_every_page_with_one_navbar_and_footer() {
        let ui = Ui::new();
        let shell = PageShell::default();
        let pages: [&dyn Page; 2] = [&Echo, &Blank];

        for page in pages {
            let html = shell.render(&ui, page, &PageProps::new()).unwrap();

            assert_eq!(html.matches("<header").count(), 1, "{}", page.route());
            assert_eq!(html.matches("<footer").count(), 1, "{}", page.route());
        }
    }

    #[test]
    fn passes_props_through_unmodified() {
        let mut props = PageProps::new();
        props.insert("path".to_string(), serde_json::json!("/missing"));
        props.insert("n".to_string(), serde_json::json!([1, 2]));

        let html = PageShell::default()
            .render(&Ui::new(), &Echo, &props)
            .unwrap();

        let expected = serde_json::Value::Object(props).to_string();
        assert!(html.contains(&format!("<p id=\"echo\">{expected}</p>")));
    }

    #[test]
    fn injects_document_metadata() {
        let html = PageShell::default()
            .render(&Ui::new(), &Blank, &PageProps::new())
            .unwrap();

        assert!(html.contains("<title>DeployMe</title>"));
        assert!(html.contains(r#"<meta property="og:title" content="DeployMe">"#));
        assert!(html.contains(
            r#"<meta property="og:image" content="/imgs/ray/raycast-untitled.svg">"#
        ));
        assert!(html.contains(
            r#"<meta name="description" content="Minimalistic, open-source, self-hosted deployment platform for your ML projects.">"#
        ));
    }

    #[test]
    fn injects_open_graph_site_and_image_details() {
        let html = PageShell::default()
            .render(&Ui::new(), &Blank, &PageProps::new())
            .unwrap();

        assert!(html.contains(r#"<meta property="og:site_name" content="DeployMe">"#));
        assert!(html.contains(r#"<meta property="og:locale" content="en_IE">"#));
        assert!(html.contains(r#"<meta property="og:image:alt" content="DeployMe">"#));
        assert!(html.contains(r#"<meta property="og:image:width" content="1920">"#));
        assert!(html.contains(r#"<meta property="og:image:height" content="1080">"#));
    }

    #[test]
    fn page_title_prefixes_site_title() {
        let html = PageShell::default()
            .render(&Ui::new(), &Echo, &PageProps::new())
            .unwrap();

        assert!(html.contains("<title>Echo | DeployMe</title>"));
    }

    #[test]
    fn appends_extra_scripts() {
        let html = PageShell::default()
            .with_script("/__reload.js")
            .render(&Ui::new(), &Blank, &PageProps::new())
            .unwrap();

        assert!(html.contains(r#"<script src="/assets/main.js"></script>"#));
        assert!(html.contains(r#"<script src="/__reload.js"></script>"#));
    }

    #[test]
    fn open_navbar_state_is_rendered_by_the_shell() {
        let html = PageShell::default()
            .render_with_nav(&Ui::new(), &NavBar::new(true), &Blank, &PageProps::new())
            .unwrap();

        assert!(html.contains(r#"id="mobile-menu""#));
    }
}
