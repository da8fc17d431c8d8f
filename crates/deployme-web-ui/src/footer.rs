//! Attribution band at the bottom of every page.

use minijinja::context;

use crate::links::HACKATHON_URL;
use crate::shell::SiteMeta;
use crate::templates::{RenderError, Ui};

/// Stateless site footer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Footer;

impl Footer {
    pub fn render(&self, ui: &Ui, _meta: &SiteMeta) -> Result<String, RenderError> {
        ui.render(
            "footer.html",
            context! {
                hackathon_url => HACKATHON_URL,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_the_hackathon_with_one_external_link() {
        let html = Footer.render(&Ui::new(), &SiteMeta::default()).unwrap();

        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains(r#"href="https://ai.itmo.ru/dataproducthack""#));
        assert!(html.contains(">Data Product Hack</a>"));
        assert!(html.contains("Built for "));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains(r#"<footer class="w-full bg-prim"#));
        assert!(html.contains(r#"<p class="text-center">"#));
    }
}
