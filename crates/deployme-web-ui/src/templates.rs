//! Template engine for rendering page components.

use std::fmt::Write;

use minijinja::{escape_formatter, AutoEscape, Environment, ErrorKind, Output, State, Value};
use serde::Serialize;

use crate::html;
use crate::layout::layout_class;

/// Errors that can occur while rendering a component.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),
}

/// Template engine using minijinja.
#[derive(Debug)]
pub struct Ui {
    env: Environment<'static>,
}

impl Ui {
    /// Create a new engine with the component templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template_owned(name.to_string(), source.to_string())
                .expect("Failed to add component template");
        }

        env.add_function("layout_class", layout_class);
        env.set_formatter(html_formatter);

        Self { env }
    }

    /// Render a named template with the given context.
    pub fn render<S: Serialize>(&self, template: &str, ctx: S) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(template)?;
        Ok(tmpl.render(ctx)?)
    }

    /// Render an inline template string, for content defined next to its component.
    pub fn render_str<S: Serialize>(&self, source: &str, ctx: S) -> Result<String, RenderError> {
        Ok(self.env.render_str(source, ctx)?)
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

/// Escapes strings without touching `/`, so URLs stay byte-for-byte in the output.
fn html_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    if matches!(state.auto_escape(), AutoEscape::Html) && !value.is_safe() {
        if let Some(s) = value.as_str() {
            return out.write_str(&html::escape(s)).map_err(|e| {
                minijinja::Error::new(ErrorKind::WriteFailure, "failed to write output")
                    .with_source(e)
            });
        }
    }
    escape_formatter(out, state, value)
}

const TEMPLATES: [(&str, &str); 7] = [
    ("macros.html", MACROS_TEMPLATE),
    ("shell.html", SHELL_TEMPLATE),
    ("navbar.html", NAVBAR_TEMPLATE),
    ("mobile_menu.html", MOBILE_MENU_TEMPLATE),
    ("footer.html", FOOTER_TEMPLATE),
    ("home.html", HOME_TEMPLATE),
    ("not_found.html", NOT_FOUND_TEMPLATE),
];

const MACROS_TEMPLATE: &str = r##"{% macro layout(size="xl", extra="") -%}
<div class="{{ layout_class(size, extra) }}">{{ caller() }}</div>
{%- endmacro %}
{% macro external(href, label, class="") -%}
<a href="{{ href }}" target="_blank" rel="noopener noreferrer"{% if class %} class="{{ class }}"{% endif %}>{{ label }}</a>
{%- endmacro %}"##;

const SHELL_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <meta name="description" content="{{ meta.description }}">
  <meta property="og:type" content="website">
  <meta property="og:title" content="{{ meta.title }}">
  <meta property="og:description" content="{{ meta.description }}">
  <meta property="og:site_name" content="{{ meta.title }}">
  <meta property="og:locale" content="{{ meta.locale }}">
  <meta property="og:image" content="{{ meta.image }}">
  <meta property="og:image:alt" content="{{ meta.title }}">
  <meta property="og:image:width" content="{{ image_width }}">
  <meta property="og:image:height" content="{{ image_height }}">
  <meta name="twitter:card" content="summary_large_image">
  <link rel="stylesheet" href="{{ meta.base_url }}assets/main.css">
</head>
<body>
  <div class="min-h-screen bg-gray-50 flex flex-col">
    {{ navbar | safe }}
    <main class="flex-1 pt-20">
      {{ content | safe }}
    </main>
    {{ footer | safe }}
  </div>
  <script src="{{ meta.base_url }}assets/main.js"></script>
  {% for script in scripts %}<script src="{{ script }}"></script>
  {% endfor %}
</body>
</html>"##;

const NAVBAR_TEMPLATE: &str = r##"{% import "macros.html" as ui %}
<header class="fixed top-0 inset-x-0 z-50 bg-white shadow" data-navbar>
  {% call ui.layout() %}
  <nav class="flex items-center justify-between py-4">
    <a href="{{ base_url }}" class="text-2xl font-bold text-prim">{{ brand }}</a>
    <div class="flex items-center gap-4">
      {{ ui.external(repo_url, "GitHub", "font-semibold hover:text-chick") }}
      <a href="{{ toggle_href }}" class="md:hidden p-2 rounded text-prim" role="button" data-menu-toggle aria-controls="mobile-menu" aria-expanded="{{ "true" if menu_open else "false" }}" aria-label="Toggle menu">&#9776;</a>
    </div>
  </nav>
  {% endcall %}
  {% if menu_open %}{% include "mobile_menu.html" %}{% endif %}
</header>"##;

const MOBILE_MENU_TEMPLATE: &str = r##"{% import "macros.html" as ui %}
<div id="mobile-menu" class="md:hidden menu-enter bg-white border-t">
  {% call ui.layout() %}
  <ul class="py-4 flex flex-col gap-4">
    <li><a href="{{ base_url }}" class="block font-semibold">Home</a></li>
    <li>{{ ui.external(docs_url, "Docs", "block font-semibold hover:text-chick") }}</li>
  </ul>
  {% endcall %}
</div>"##;

const FOOTER_TEMPLATE: &str = r##"{% import "macros.html" as ui %}
<footer class="w-full bg-prim text-white py-6">
  <p class="text-center">Built for {{ ui.external(hackathon_url, "Data Product Hack", "underline hover:text-chick") }}</p>
</footer>"##;

const HOME_TEMPLATE: &str = r##"{% import "macros.html" as ui %}
<section id="hero" class="bg-prim text-white py-24">
  {% call ui.layout("lg", "text-center") %}
  <h1 class="text-6xl font-extrabold">{{ product }}</h1>
  <p class="mt-4 text-xl">{{ tagline }}</p>
  <div class="mt-8 flex justify-center gap-4">
    {{ ui.external(repo_url, "Star", "cta px-6 py-3 rounded-lg font-semibold bg-super text-prim hover:bg-super-hover") }}
    {{ ui.external(fork_url, "Fork", "cta px-6 py-3 rounded-lg font-semibold bg-chick text-white hover:bg-super-hover") }}
  </div>
  {% endcall %}
</section>
<section id="sponsor" class="bg-white py-12">
  {% call ui.layout("md", "flex flex-col items-center gap-4 text-center") %}
  <p class="text-lg font-semibold">Developed at {{ ui.external(hackathon_url, "ITMO AI Product Hack", "text-prim underline hover:text-chick") }}</p>
  <img src="{{ sponsor_image }}" alt="ITMO University" class="h-16">
  {% endcall %}
</section>
<section id="why" class="py-16">
  {% call ui.layout("md") %}
  <h2 class="text-3xl font-bold text-prim">Why {{ product }}?</h2>
  <div class="prose mt-4 text-gray-700">{{ rationale | safe }}</div>
  {% endcall %}
</section>
<section id="quick-start" class="bg-white py-16">
  {% call ui.layout("md") %}
  <h2 class="text-3xl font-bold text-prim">Quick start</h2>
  {% for sample in samples %}
  <div class="mt-8" data-sample="{{ loop.index }}">
    <h3 class="text-xl font-semibold">{{ loop.index }}. {{ sample.title }}</h3>
    <pre class="mt-2 p-4 rounded-lg bg-gray-900 text-white overflow-x-auto"><code class="language-{{ sample.language }}">{{ sample.code }}</code></pre>
  </div>
  {% endfor %}
  <h3 class="mt-8 text-xl font-semibold">{{ samples | length + 1 }}. {{ finale }}</h3>
  <div class="mt-12 text-center">
    {{ ui.external(docs_url, "Read the full docs", "block px-8 py-4 rounded-lg font-semibold bg-chick text-white hover:bg-super-hover") }}
  </div>
  {% endcall %}
</section>"##;

const NOT_FOUND_TEMPLATE: &str = r##"<h1 class="text-6xl font-extrabold text-prim">404</h1>
<p class="mt-4 text-xl">{% if path %}Nothing lives at <code>{{ path }}</code>.{% else %}This page could not be found.{% endif %}</p>
<p class="mt-8"><a href="{{ base_url }}" class="px-6 py-3 rounded-lg font-semibold bg-super text-prim hover:bg-super-hover">Back to {{ brand }}</a></p>"##;

#[cfg(test)]
mod tests {
    use minijinja::context;

    use super::*;

    #[test]
    fn layout_macro_wraps_children() {
        let ui = Ui::new();
        let html = ui
            .render_str(
                r#"{% import "macros.html" as ui %}{% call ui.layout("sm", "py-4") %}<p>x</p>{% endcall %}"#,
                context! {},
            )
            .unwrap();

        assert_eq!(html, r#"<div class="mx-auto w-4/12 py-4"><p>x</p></div>"#);
    }

    #[test]
    fn layout_macro_rejects_unknown_size() {
        let ui = Ui::new();
        let result = ui.render_str(
            r#"{% import "macros.html" as ui %}{% call ui.layout("giant") %}x{% endcall %}"#,
            context! {},
        );

        let err = result.unwrap_err().to_string();
        assert!(err.contains("giant"), "{err}");
    }

    #[test]
    fn external_links_do_not_leak_referrer() {
        let ui = Ui::new();
        let html = ui
            .render_str(
                r#"{% import "macros.html" as ui %}{{ ui.external("https://example.com", "Go") }}"#,
                context! {},
            )
            .unwrap();

        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn escapes_text_but_keeps_urls_intact() {
        let ui = Ui::new();
        let html = ui
            .render(
                "not_found.html",
                context! { path => "/a/<b>", base_url => "/", brand => "DeployMe" },
            )
            .unwrap();

        assert!(html.contains("<code>/a/&lt;b&gt;</code>"));
        assert!(html.contains(r#"<a href="/""#));
    }
}
