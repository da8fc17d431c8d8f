//! Asset pipeline for CSS and JavaScript processing.

use std::collections::BTreeSet;
use std::fmt::Write;
use std::sync::LazyLock;

use deployme_web_ui::html;
use deployme_web_ui::Theme;
use regex::Regex;

static CLASS_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class="([^"]*)""#).expect("valid regex"));

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main stylesheet.
    ///
    /// With `used` set, only utilities whose class appears in it are emitted.
    pub fn generate_css(theme: &Theme, used: Option<&BTreeSet<String>>) -> String {
        let mut css = String::new();

        css.push_str(":root {\n");
        for (name, hex) in theme.colors() {
            let _ = writeln!(css, "  --color-{name}: {hex};");
        }
        css.push_str("}\n\n");
        css.push_str(PREFLIGHT_CSS);

        let utilities = theme.utilities();
        let total = utilities.len();
        let mut kept = 0;

        css.push_str("\n/* Utilities */\n");
        for utility in utilities {
            if used.is_some_and(|used| !used.contains(&utility.class)) {
                continue;
            }
            css.push_str(&utility.rule);
            css.push('\n');
            kept += 1;
        }

        tracing::debug!("Emitted {} of {} utility classes", kept, total);
        css
    }

    /// Collect every class name used in an HTML document.
    pub fn collect_classes(document: &str, classes: &mut BTreeSet<String>) {
        for caps in CLASS_ATTR.captures_iter(document) {
            let value = html::unescape(&caps[1]);
            classes.extend(value.split_whitespace().map(str::to_string));
        }
    }

    /// Generate the runtime script, embedding the mobile menu panel.
    pub fn generate_js(menu_panel: &str) -> String {
        let panel = serde_json::Value::from(menu_panel.trim()).to_string();
        RUNTIME_JS.replace("__MENU_PANEL__", &panel)
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const PREFLIGHT_CSS: &str = r#"/* Preflight */
*,
*::before,
*::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
  border: 0 solid #e5e7eb;
}

body {
  font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
  line-height: 1.6;
  color: #111827;
}

a {
  color: inherit;
  text-decoration: inherit;
}

img {
  display: inline-block;
  max-width: 100%;
}

ul {
  list-style: none;
}

pre,
code {
  font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
  font-size: 0.9rem;
}

/* Rendered Markdown */
.prose p {
  margin-bottom: 1rem;
}

.prose ul {
  list-style: disc;
  padding-left: 1.5rem;
  margin-bottom: 1rem;
}

.prose strong {
  font-weight: 700;
  color: var(--color-prim);
}

/* Code tokens */
.hl-keyword,
.hl-built_in {
  color: var(--color-chick);
}

.hl-string {
  color: var(--color-super);
}

.hl-literal,
.hl-number,
.hl-attr {
  color: var(--color-super-hover);
}

.hl-comment,
.hl-meta {
  color: #9ca3af;
  font-style: italic;
}

/* Mobile menu transition */
@keyframes menu-enter {
  from {
    opacity: 0;
    transform: translateY(-0.5rem);
  }
  to {
    opacity: 1;
    transform: translateY(0);
  }
}

.menu-enter {
  animation: menu-enter 150ms ease-out;
}
"#;

const RUNTIME_JS: &str = r#"// DeployMe landing - runtime JavaScript
(function() {
  'use strict';

  const MENU_PANEL = __MENU_PANEL__;

  const navbar = document.querySelector('[data-navbar]');
  const toggle = document.querySelector('[data-menu-toggle]');

  if (!navbar || !toggle) return;

  // The panel is only in the DOM while open.
  let menuOpen = document.getElementById('mobile-menu') !== null;

  toggle.addEventListener('click', (event) => {
    event.preventDefault();
    menuOpen = !menuOpen;

    const panel = document.getElementById('mobile-menu');
    if (menuOpen && !panel) {
      navbar.insertAdjacentHTML('beforeend', MENU_PANEL);
    } else if (!menuOpen && panel) {
      panel.remove();
    }

    toggle.setAttribute('aria-expanded', menuOpen ? 'true' : 'false');
  });
})();
"#;
