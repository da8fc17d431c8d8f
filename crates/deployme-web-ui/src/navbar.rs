//! Fixed site header with a togglable mobile menu.

use minijinja::context;

use crate::links::{DOCS_URL, REPO_URL};
use crate::shell::SiteMeta;
use crate::templates::{RenderError, Ui};

/// Navigation bar state.
///
/// Each instance owns its menu flag; a fresh instance starts closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavBar {
    menu_open: bool,
}

impl NavBar {
    pub fn new(menu_open: bool) -> Self {
        Self { menu_open }
    }

    /// State requested by a `?menu=` query value.
    pub fn from_query(menu: Option<&str>) -> Self {
        let mut nav = Self::default();
        if menu == Some("open") {
            nav.toggle();
        }
        nav
    }

    pub fn is_open(&self) -> bool {
        self.menu_open
    }

    /// Flip the mobile menu.
    pub fn toggle(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Copy of this state with the menu flipped.
    pub fn toggled(mut self) -> Self {
        self.toggle();
        self
    }

    /// Link target of the toggle control: the flipped state.
    pub fn toggle_href(&self) -> &'static str {
        if self.toggled().is_open() {
            "?menu=open"
        } else {
            "?"
        }
    }

    /// Render the header. The menu panel is only emitted while open.
    pub fn render(&self, ui: &Ui, meta: &SiteMeta) -> Result<String, RenderError> {
        ui.render(
            "navbar.html",
            context! {
                brand => &meta.title,
                base_url => &meta.base_url,
                repo_url => REPO_URL,
                docs_url => DOCS_URL,
                menu_open => self.menu_open,
                toggle_href => self.toggle_href(),
            },
        )
    }

    /// Render the expanded menu panel on its own, for mounting from script.
    pub fn render_menu_panel(ui: &Ui, meta: &SiteMeta) -> Result<String, RenderError> {
        ui.render(
            "mobile_menu.html",
            context! {
                base_url => &meta.base_url,
                docs_url => DOCS_URL,
            },
        )
    }
}
