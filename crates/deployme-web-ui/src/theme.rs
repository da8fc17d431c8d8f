//! Theme tokens and the utility classes generated from them.

use std::collections::BTreeMap;

use crate::layout::Size;

/// Default color tokens: (name, hex).
pub const DEFAULT_COLORS: [(&str, &str); 4] = [
    ("super", "#1CF1CC"),
    ("prim", "#9733f5"),
    ("super-hover", "#C97BFF"),
    ("chick", "#DF38FA"),
];

/// Breakpoint for `md:` variants.
pub const MD_BREAKPOINT: &str = "768px";

/// Errors raised while building a theme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("Invalid color for token '{token}': {value} (expected #RGB or #RRGGBB)")]
    InvalidColor { token: String, value: String },

    #[error("Invalid token name: '{0}'")]
    InvalidToken(String),
}

/// Named color tokens consumed by utility classes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Theme {
    colors: BTreeMap<String, String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS
                .iter()
                .map(|(name, hex)| (name.to_string(), hex.to_string()))
                .collect(),
        }
    }
}

impl Theme {
    /// Default tokens with `overrides` merged on top.
    pub fn with_colors<I, K, V>(overrides: I) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut theme = Self::default();
        for (token, value) in overrides {
            theme.set_color(token, value)?;
        }
        Ok(theme)
    }

    /// Set or replace one color token.
    pub fn set_color(
        &mut self,
        token: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ThemeError> {
        let token = token.into();
        let value = value.into();

        if token.is_empty()
            || !token
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ThemeError::InvalidToken(token));
        }
        if !is_hex_color(&value) {
            return Err(ThemeError::InvalidColor { token, value });
        }

        self.colors.insert(token, value);
        Ok(())
    }

    /// Hex value of a token.
    pub fn color(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(String::as_str)
    }

    pub fn colors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Every utility class this theme can produce, in stylesheet order.
    pub fn utilities(&self) -> Vec<Utility> {
        let mut utilities: Vec<Utility> = BASE_UTILITIES
            .iter()
            .map(|(class, decls)| Utility::new(class, decls))
            .collect();

        utilities.extend(Size::ALL.into_iter().map(|size| {
            Utility::new(
                size.width_class(),
                &format!("width: {}%", trim_percent(size.width_percent())),
            )
        }));

        for (name, hex) in self.colors() {
            utilities.push(Utility::new(
                &format!("bg-{name}"),
                &format!("background-color: {hex}"),
            ));
            utilities.push(Utility::new(
                &format!("text-{name}"),
                &format!("color: {hex}"),
            ));
            utilities.push(Utility::new(
                &format!("border-{name}"),
                &format!("border-color: {hex}"),
            ));
            utilities.push(Utility::hover(
                &format!("bg-{name}"),
                &format!("background-color: {hex}"),
            ));
            utilities.push(Utility::hover(
                &format!("text-{name}"),
                &format!("color: {hex}"),
            ));
        }

        for (class, decls) in BASE_UTILITIES {
            utilities.push(Utility::responsive(class, decls));
        }

        utilities
    }
}

/// One utility class and the CSS rule that implements it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utility {
    /// Class name as written in markup
    pub class: String,
    /// Complete CSS rule
    pub rule: String,
}

impl Utility {
    fn new(class: &str, declarations: &str) -> Self {
        Self {
            class: class.to_string(),
            rule: format!(".{} {{ {}; }}", escape_class(class), declarations),
        }
    }

    fn hover(class: &str, declarations: &str) -> Self {
        let class = format!("hover:{class}");
        Self {
            rule: format!(".{}:hover {{ {}; }}", escape_class(&class), declarations),
            class,
        }
    }

    fn responsive(class: &str, declarations: &str) -> Self {
        let class = format!("md:{class}");
        Self {
            rule: format!(
                "@media (min-width: {}) {{ .{} {{ {}; }} }}",
                MD_BREAKPOINT,
                escape_class(&class),
                declarations
            ),
            class,
        }
    }
}

/// Escape a class name for use in a CSS selector.
pub fn escape_class(class: &str) -> String {
    let mut out = String::with_capacity(class.len() + 4);
    for c in class.chars() {
        if matches!(c, ':' | '/' | '.' | '%') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn trim_percent(value: f64) -> String {
    let formatted = format!("{value:.6}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

const BASE_UTILITIES: &[(&str, &str)] = &[
    ("block", "display: block"),
    ("hidden", "display: none"),
    ("flex", "display: flex"),
    ("flex-col", "flex-direction: column"),
    ("flex-1", "flex: 1 1 0%"),
    ("mx-auto", "margin-left: auto; margin-right: auto"),
    ("items-center", "align-items: center"),
    ("justify-center", "justify-content: center"),
    ("justify-between", "justify-content: space-between"),
    ("gap-4", "gap: 1rem"),
    ("gap-6", "gap: 1.5rem"),
    ("fixed", "position: fixed"),
    ("top-0", "top: 0"),
    ("inset-x-0", "left: 0; right: 0"),
    ("z-50", "z-index: 50"),
    ("min-h-screen", "min-height: 100vh"),
    ("h-16", "height: 4rem"),
    ("p-2", "padding: 0.5rem"),
    ("p-4", "padding: 1rem"),
    ("px-6", "padding-left: 1.5rem; padding-right: 1.5rem"),
    ("px-8", "padding-left: 2rem; padding-right: 2rem"),
    ("py-3", "padding-top: 0.75rem; padding-bottom: 0.75rem"),
    ("py-4", "padding-top: 1rem; padding-bottom: 1rem"),
    ("py-6", "padding-top: 1.5rem; padding-bottom: 1.5rem"),
    ("py-12", "padding-top: 3rem; padding-bottom: 3rem"),
    ("py-16", "padding-top: 4rem; padding-bottom: 4rem"),
    ("py-24", "padding-top: 6rem; padding-bottom: 6rem"),
    ("pt-20", "padding-top: 5rem"),
    ("mt-2", "margin-top: 0.5rem"),
    ("mt-4", "margin-top: 1rem"),
    ("mt-8", "margin-top: 2rem"),
    ("mt-12", "margin-top: 3rem"),
    ("text-center", "text-align: center"),
    ("text-lg", "font-size: 1.125rem; line-height: 1.75rem"),
    ("text-xl", "font-size: 1.25rem; line-height: 1.75rem"),
    ("text-2xl", "font-size: 1.5rem; line-height: 2rem"),
    ("text-3xl", "font-size: 1.875rem; line-height: 2.25rem"),
    ("text-6xl", "font-size: 3.75rem; line-height: 1"),
    ("font-semibold", "font-weight: 600"),
    ("font-bold", "font-weight: 700"),
    ("font-extrabold", "font-weight: 800"),
    ("underline", "text-decoration-line: underline"),
    ("text-white", "color: #ffffff"),
    ("text-gray-700", "color: #374151"),
    ("bg-white", "background-color: #ffffff"),
    ("bg-gray-50", "background-color: #f9fafb"),
    ("bg-gray-900", "background-color: #111827"),
    ("border-t", "border-top-width: 1px; border-top-style: solid"),
    ("rounded", "border-radius: 0.25rem"),
    ("rounded-lg", "border-radius: 0.5rem"),
    ("shadow", "box-shadow: 0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)"),
    ("overflow-x-auto", "overflow-x: auto"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tokens_keep_exact_values() {
        let theme = Theme::default();

        assert_eq!(theme.color("super"), Some("#1CF1CC"));
        assert_eq!(theme.color("prim"), Some("#9733f5"));
        assert_eq!(theme.color("super-hover"), Some("#C97BFF"));
        assert_eq!(theme.color("chick"), Some("#DF38FA"));
        assert_eq!(theme.colors().count(), 4);
    }

    #[test]
    fn merges_overrides_over_defaults() {
        let theme = Theme::with_colors([("prim", "#000"), ("ink", "#101010")]).unwrap();

        assert_eq!(theme.color("prim"), Some("#000"));
        assert_eq!(theme.color("ink"), Some("#101010"));
        assert_eq!(theme.color("chick"), Some("#DF38FA"));
    }

    #[test]
    fn rejects_invalid_colors() {
        let err = Theme::with_colors([("prim", "purple")]).unwrap_err();
        assert_eq!(
            err,
            ThemeError::InvalidColor {
                token: "prim".to_string(),
                value: "purple".to_string()
            }
        );

        assert!(Theme::with_colors([("prim", "#12345")]).is_err());
        assert!(Theme::with_colors([("prim", "#GGGGGG")]).is_err());
    }

    #[test]
    fn rejects_invalid_token_names() {
        assert_eq!(
            Theme::with_colors([("Bad Name", "#fff")]).unwrap_err(),
            ThemeError::InvalidToken("Bad Name".to_string())
        );
    }

    #[test]
    fn generates_color_utilities() {
        let utilities = Theme::default().utilities();
        let rule = |class: &str| {
            utilities
                .iter()
                .find(|u| u.class == class)
                .map(|u| u.rule.clone())
        };

        assert_eq!(
            rule("bg-super").as_deref(),
            Some(".bg-super { background-color: #1CF1CC; }")
        );
        assert_eq!(
            rule("hover:bg-super-hover").as_deref(),
            Some(r".hover\:bg-super-hover:hover { background-color: #C97BFF; }")
        );
        assert_eq!(
            rule("w-11/12").as_deref(),
            Some(r".w-11\/12 { width: 91.666667%; }")
        );
        assert_eq!(rule("w-full").as_deref(), Some(".w-full { width: 100%; }"));
        assert_eq!(
            rule("md:hidden").as_deref(),
            Some(r"@media (min-width: 768px) { .md\:hidden { display: none; } }")
        );
    }

    #[test]
    fn utility_classes_are_unique() {
        let utilities = Theme::default().utilities();
        let mut classes: Vec<_> = utilities.iter().map(|u| u.class.as_str()).collect();
        classes.sort_unstable();
        let before = classes.len();
        classes.dedup();

        assert_eq!(before, classes.len());
    }
}
