//! Landing page: hero, sponsor band, rationale and quick start.

use minijinja::context;
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;

use crate::highlight::{Grammar, Highlighter};
use crate::links::{DOCS_URL, FORK_URL, HACKATHON_URL, REPO_URL, SPONSOR_IMAGE};
use crate::shell::{Page, PageProps, SiteMeta};
use crate::templates::{RenderError, Ui};

/// Hero tagline.
pub const TAGLINE: &str = "Minimalistic ML auto-deployment tool.";

/// Last quick-start step, after the deployment call.
pub const FINALE: &str = "Open the browser :)";

const RATIONALE: &str = include_str!("content/rationale.md");

/// A literal code snippet shown in the quick start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeSample {
    /// Step heading
    pub title: &'static str,
    /// Highlighting language
    pub language: &'static str,
    /// Snippet text, displayed as is
    pub code: &'static str,
}

/// Quick start snippets, in display order.
pub const QUICK_START: [CodeSample; 3] = [
    CodeSample {
        title: "Install DeployMe",
        language: "bash",
        code: "pip install deployme",
    },
    CodeSample {
        title: "Make your ML model.",
        language: "python",
        code: r#"automl = TabularAutoML(
    task=task,
    timeout=TIMEOUT,
    cpu_limit=N_THREADS,
    reader_params={
        "n_jobs": N_THREADS,
        "cv": N_FOLDS,
        "random_state": RANDOM_STATE,
    },
)

oof_pred = automl.fit_predict(tr_data, roles=roles, verbose=1)"#,
    },
    CodeSample {
        title: "Deploy your model",
        language: "python",
        code: r#"deploy_to_docker(model=automl, image_name="my_lama_service")"#,
    },
];

/// The landing page.
#[derive(Debug, Clone)]
pub struct HomePage {
    rationale: String,
}

impl HomePage {
    pub fn new() -> Self {
        Self {
            rationale: render_markdown(RATIONALE),
        }
    }

    pub fn samples(&self) -> &'static [CodeSample] {
        &QUICK_START
    }

    /// Register grammars and highlight every code block in `document`.
    ///
    /// Safe to run again on its own output.
    pub fn init_highlighting(highlighter: &mut Highlighter, document: &str) -> String {
        highlighter.register(Grammar::python());
        highlighter.register(Grammar::shell());
        highlighter.highlight_all(document)
    }
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for HomePage {
    fn route(&self) -> &str {
        "/"
    }

    fn output_file(&self) -> &str {
        "index.html"
    }

    fn render(&self, ui: &Ui, meta: &SiteMeta, _props: &PageProps) -> Result<String, RenderError> {
        ui.render(
            "home.html",
            context! {
                product => &meta.title,
                tagline => TAGLINE,
                repo_url => REPO_URL,
                fork_url => FORK_URL,
                docs_url => DOCS_URL,
                hackathon_url => HACKATHON_URL,
                sponsor_image => SPONSOR_IMAGE,
                rationale => &self.rationale,
                samples => self.samples(),
                finale => FINALE,
            },
        )
    }

    fn mount(&self, document: String, highlighter: &mut Highlighter) -> String {
        Self::init_highlighting(highlighter, &document)
    }
}

fn render_markdown(content: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}
