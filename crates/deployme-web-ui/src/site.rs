//! The set of pages making up the site.

use crate::home::HomePage;
use crate::navbar::NavBar;
use crate::not_found::NotFoundPage;
use crate::shell::{Page, PageProps, PageShell, SiteMeta};
use crate::templates::{RenderError, Ui};

/// Template engine, shell and pages.
pub struct Site {
    ui: Ui,
    shell: PageShell,
    pages: Vec<Box<dyn Page>>,
}

impl Site {
    /// The landing site: home page and the 404 page.
    pub fn new(shell: PageShell) -> Self {
        Self {
            ui: Ui::new(),
            shell,
            pages: vec![Box::new(HomePage::new()), Box::new(NotFoundPage)],
        }
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    pub fn meta(&self) -> &SiteMeta {
        self.shell.meta()
    }

    pub fn pages(&self) -> &[Box<dyn Page>] {
        &self.pages
    }

    /// Page serving a URL path, if any.
    pub fn page(&self, route: &str) -> Option<&dyn Page> {
        let route = route.trim_end_matches('/');
        self.pages
            .iter()
            .find(|p| p.route().trim_end_matches('/') == route)
            .map(|p| p.as_ref())
    }

    /// Render a page through the shell.
    pub fn render(
        &self,
        page: &dyn Page,
        nav: &NavBar,
        props: &PageProps,
    ) -> Result<String, RenderError> {
        self.shell.render_with_nav(&self.ui, nav, page, props)
    }

    /// Render the 404 page for a missing path.
    pub fn render_not_found(&self, path: &str) -> Result<String, RenderError> {
        let mut props = PageProps::new();
        props.insert("path".to_string(), path.into());
        self.shell.render(&self.ui, &NotFoundPage, &props)
    }

    /// The mobile menu panel, for the runtime script to mount.
    pub fn menu_panel(&self) -> Result<String, RenderError> {
        NavBar::render_menu_panel(&self.ui, self.meta())
    }
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("meta", self.meta())
            .field("pages", &self.pages.iter().map(|p| p.route()).collect::<Vec<_>>())
            .finish()
    }
}
