//! Build-time syntax highlighting for code blocks.
//!
//! Grammars are registered by language name. [`Highlighter::highlight_all`] rewrites every
//! `<code class="language-X">` block whose language has a grammar, wrapping tokens in
//! `<span class="hl-SCOPE">` and marking the block with `data-highlighted="yes"` so a second
//! pass leaves it untouched.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::html;

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<code class="language-([A-Za-z0-9_+-]+)">(.*?)</code>"#)
        .expect("valid regex")
});

/// A single token rule. `scope: None` consumes text without styling it.
#[derive(Debug, Clone)]
struct Rule {
    scope: Option<&'static str>,
    pattern: Regex,
}

/// An ordered set of token rules for one language.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    aliases: Vec<String>,
    rules: Vec<Rule>,
}

impl Grammar {
    /// Create an empty grammar.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Register another language name for this grammar.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add a token rule. Rules are tried in insertion order at every position.
    pub fn rule(mut self, scope: Option<&'static str>, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("^(?:{pattern})"))?;
        self.rules.push(Rule { scope, pattern });
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Python, enough for the quick-start samples.
    pub fn python() -> Self {
        Self::new("python")
            .alias("py")
            .rule(Some("comment"), r"#[^\n]*")
            .and_then(|g| {
                g.rule(
                    Some("string"),
                    r#""(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'"#,
                )
            })
            .and_then(|g| {
                g.rule(
                    Some("keyword"),
                    r"(?:and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield)\b",
                )
            })
            .and_then(|g| g.rule(Some("literal"), r"(?:True|False|None)\b"))
            .and_then(|g| g.rule(Some("number"), r"[0-9]+(?:\.[0-9]+)?"))
            .and_then(|g| g.rule(None, r"[A-Za-z_][A-Za-z0-9_]*"))
            .expect("python grammar patterns are valid")
    }

    /// POSIX shell commands.
    pub fn shell() -> Self {
        Self::new("bash")
            .alias("sh")
            .alias("shell")
            .rule(Some("comment"), r"#[^\n]*")
            .and_then(|g| g.rule(Some("string"), r#""(?:[^"\\]|\\.)*"|'[^']*'"#))
            .and_then(|g| g.rule(Some("meta"), r"\$ "))
            .and_then(|g| {
                g.rule(
                    Some("built_in"),
                    r"(?:pip3?|python3?|docker|git|cd|export|echo)\b",
                )
            })
            .and_then(|g| g.rule(Some("attr"), r"--?[A-Za-z][A-Za-z0-9-]*"))
            .and_then(|g| g.rule(None, r"[A-Za-z_][A-Za-z0-9_.-]*"))
            .expect("shell grammar patterns are valid")
    }

    /// Tokenize plain text and return escaped HTML with scoped spans.
    pub fn highlight(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 2);
        let mut plain = String::new();
        let mut pos = 0;

        'outer: while pos < text.len() {
            let rest = &text[pos..];

            for rule in &self.rules {
                let Some(m) = rule.pattern.find(rest) else {
                    continue;
                };
                if m.is_empty() {
                    continue;
                }

                match rule.scope {
                    Some(scope) => {
                        out.push_str(&html::escape(&plain));
                        plain.clear();
                        out.push_str(&format!(
                            r#"<span class="hl-{}">{}</span>"#,
                            scope,
                            html::escape(m.as_str())
                        ));
                    }
                    None => plain.push_str(m.as_str()),
                }
                pos += m.end();
                continue 'outer;
            }

            let Some(c) = rest.chars().next() else {
                break;
            };
            plain.push(c);
            pos += c.len_utf8();
        }

        out.push_str(&html::escape(&plain));
        out
    }
}

/// Registry of grammars keyed by language name.
#[derive(Debug, Default)]
pub struct Highlighter {
    grammars: HashMap<String, usize>,
    registered: Vec<Grammar>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grammar under its name and aliases.
    ///
    /// Returns `false` when a grammar with the same name is already registered; the existing
    /// registration is kept.
    pub fn register(&mut self, grammar: Grammar) -> bool {
        if self.grammars.contains_key(grammar.name()) {
            tracing::debug!("Grammar '{}' already registered", grammar.name());
            return false;
        }

        let index = self.registered.len();
        self.grammars.insert(grammar.name.clone(), index);
        for alias in &grammar.aliases {
            self.grammars.entry(alias.clone()).or_insert(index);
        }
        self.registered.push(grammar);
        true
    }

    /// Number of distinct grammars.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Look up a grammar by name or alias.
    pub fn grammar(&self, language: &str) -> Option<&Grammar> {
        self.grammars
            .get(language)
            .and_then(|&index| self.registered.get(index))
    }

    /// Highlight every unhighlighted code block in a document.
    pub fn highlight_all(&self, document: &str) -> String {
        CODE_BLOCK
            .replace_all(document, |caps: &Captures<'_>| {
                let language = &caps[1];
                match self.grammar(language) {
                    Some(grammar) => format!(
                        r#"<code class="language-{}" data-highlighted="yes">{}</code>"#,
                        language,
                        grammar.highlight(&html::unescape(&caps[2]))
                    ),
                    None => {
                        tracing::debug!("No grammar for '{}', leaving block as is", language);
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}
