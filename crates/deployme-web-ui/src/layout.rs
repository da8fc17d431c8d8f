//! Width-constraining layout wrapper shared by every page section.

use std::fmt;
use std::str::FromStr;

use minijinja::Value;

/// Width selector for a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Size {
    Small,
    Medium,
    Large,
    #[default]
    ExtraLarge,
    Full,
}

impl Size {
    /// Every size token, narrowest first.
    pub const ALL: [Size; 5] = [
        Size::Small,
        Size::Medium,
        Size::Large,
        Size::ExtraLarge,
        Size::Full,
    ];

    /// Token used in templates and configuration.
    pub fn token(self) -> &'static str {
        match self {
            Self::Small => "sm",
            Self::Medium => "md",
            Self::Large => "lg",
            Self::ExtraLarge => "xl",
            Self::Full => "full",
        }
    }

    /// Utility class carrying the width.
    pub fn width_class(self) -> &'static str {
        match self {
            Self::Small => "w-4/12",
            Self::Medium => "w-6/12",
            Self::Large => "w-9/12",
            Self::ExtraLarge => "w-11/12",
            Self::Full => "w-full",
        }
    }

    /// Width as a percentage of the parent.
    pub fn width_percent(self) -> f64 {
        match self {
            Self::Small => 100.0 * 4.0 / 12.0,
            Self::Medium => 50.0,
            Self::Large => 75.0,
            Self::ExtraLarge => 100.0 * 11.0 / 12.0,
            Self::Full => 100.0,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error returned for a size token outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown layout size '{0}' (expected one of: sm, md, lg, xl, full)")]
pub struct SizeError(pub String);

impl FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.token() == s)
            .ok_or_else(|| SizeError(s.to_string()))
    }
}

/// A horizontally centered block of fixed relative width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    size: Size,
    class: Option<String>,
}

impl Layout {
    /// Create a layout of the given size.
    pub fn new(size: Size) -> Self {
        Self { size, class: None }
    }

    /// Append extra classes to the wrapper.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.class = (!class.trim().is_empty()).then(|| class.trim().to_string());
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The wrapper's full class attribute value.
    pub fn class_attr(&self) -> String {
        match &self.class {
            Some(extra) => format!("mx-auto {} {}", self.size.width_class(), extra),
            None => format!("mx-auto {}", self.size.width_class()),
        }
    }

    /// Wrap already rendered HTML.
    pub fn wrap(&self, children: &str) -> String {
        format!(r#"<div class="{}">{}</div>"#, self.class_attr(), children)
    }
}

/// Template function behind the `layout` macro.
///
/// Parses the size token and fails the render on anything outside the fixed set.
pub(crate) fn layout_class(
    size: Option<String>,
    class: Option<String>,
) -> Result<Value, minijinja::Error> {
    let size = match size.as_deref() {
        None => Size::default(),
        Some(token) => token.parse::<Size>().map_err(|e| {
            minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, e.to_string())
        })?,
    };

    let layout = Layout::new(size).with_class(class.unwrap_or_default());
    Ok(Value::from_safe_string(layout.class_attr()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_tokens_to_widths() {
        let expected = [
            ("full", 100.0),
            ("xl", 91.6),
            ("lg", 75.0),
            ("md", 50.0),
            ("sm", 33.3),
        ];

        for (token, width) in expected {
            let size: Size = token.parse().unwrap();
            assert!(
                (size.width_percent() - width).abs() < 0.1,
                "{token} -> {}",
                size.width_percent()
            );
        }
    }

    #[test]
    fn rejects_unknown_tokens() {
        for token in ["", "XL", "huge", "extra-large", " md"] {
            assert_eq!(token.parse::<Size>(), Err(SizeError(token.to_string())));
        }
    }

    #[test]
    fn tokens_round_trip_through_display() {
        for size in Size::ALL {
            assert_eq!(size.to_string().parse::<Size>().unwrap(), size);
        }
    }

    #[test]
    fn defaults_to_extra_large() {
        let layout = Layout::default();
        assert_eq!(layout.size(), Size::ExtraLarge);
        assert_eq!(layout.class_attr(), "mx-auto w-11/12");
    }

    #[test]
    fn wraps_children_with_extra_classes() {
        let html = Layout::new(Size::Medium)
            .with_class("text-center")
            .wrap("<p>hi</p>");

        assert_eq!(
            html,
            r#"<div class="mx-auto w-6/12 text-center"><p>hi</p></div>"#
        );
    }

    #[test]
    fn template_function_fails_fast() {
        assert!(layout_class(Some("giant".to_string()), None).is_err());

        let class = layout_class(None, Some("py-4".to_string())).unwrap();
        assert_eq!(class.as_str(), Some("mx-auto w-11/12 py-4"));
    }
}
