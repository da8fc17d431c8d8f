//! Fallback page for unknown paths.

use minijinja::context;

use crate::layout::{Layout, Size};
use crate::shell::{Page, PageProps, SiteMeta};
use crate::templates::{RenderError, Ui};

/// The 404 page. Shows the requested path when the caller passes a `path` prop.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFoundPage;

impl Page for NotFoundPage {
    fn route(&self) -> &str {
        "/404"
    }

    fn output_file(&self) -> &str {
        "404.html"
    }

    fn title(&self) -> Option<&str> {
        Some("Not found")
    }

    fn indexable(&self) -> bool {
        false
    }

    fn render(&self, ui: &Ui, meta: &SiteMeta, props: &PageProps) -> Result<String, RenderError> {
        let path = props.get("path").and_then(|v| v.as_str());
        let body = ui.render(
            "not_found.html",
            context! {
                path => path,
                base_url => &meta.base_url,
                brand => &meta.title,
            },
        )?;

        Ok(format!(
            r#"<section id="not-found" class="py-24">{}</section>"#,
            Layout::new(Size::Medium).with_class("text-center").wrap(&body)
        ))
    }
}
