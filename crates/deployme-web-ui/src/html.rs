//! Small HTML text helpers.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Escape text for use in HTML element content or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode the entities produced by [`escape`] and by the template engine.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let Some(end) = rest.find(';') else {
            break;
        };

        let decoded = match &rest[1..end] {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" | "#39" | "#x27" | "#X27" => Some('\''),
            "#x2f" | "#x2F" | "#47" => Some('/'),
            _ => None,
        };

        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Visible text of an HTML fragment: tags stripped, entities decoded.
pub fn text_content(html: &str) -> String {
    unescape(&TAG.replace_all(html, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn unescape_reverses_escape() {
        let text = r#"deploy_to_docker(model=automl, image_name="my_lama_service") < 1 & 'x'"#;
        assert_eq!(unescape(&escape(text)), text);
    }

    #[test]
    fn unescapes_template_engine_entities() {
        assert_eq!(unescape("a&#x2f;b &#x27;c&#x27;"), "a/b 'c'");
    }

    #[test]
    fn leaves_unknown_entities_alone() {
        assert_eq!(unescape("&nbsp; & done"), "&nbsp; & done");
    }

    #[test]
    fn extracts_text_content() {
        assert_eq!(
            text_content(r#"<p>pip <span class="hl-keyword">install</span> &amp; go</p>"#),
            "pip install & go"
        );
    }
}
