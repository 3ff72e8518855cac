//! HTML pages built from the bundled templates.
//!
//! Templates use `{{ name }}` placeholders. Values are substituted verbatim,
//! so anything that came from the database goes through [`escape_html`]
//! first.

use anyhow::{bail, Result};
use std::collections::BTreeMap;

use chirp_types::TweetContent;

pub struct Template {
    name: &'static str,
    source: &'static str,
}

pub const INDEX: Template = Template {
    name: "index.html",
    source: include_str!("../templates/index.html"),
};

pub const ANOTHER: Template = Template {
    name: "another.html",
    source: include_str!("../templates/another.html"),
};

pub const TWEETS: Template = Template {
    name: "tweets.html",
    source: include_str!("../templates/tweets.html"),
};

impl Template {
    /// Substitute every placeholder. A placeholder without a binding is an error.
    pub fn render(&self, vars: &[(&str, &str)]) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            let Some(end) = after_open.find("}}") else {
                bail!("Unclosed placeholder in template {}", self.name);
            };

            let key = after_open[..end].trim();
            match vars.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => out.push_str(value),
                None => bail!("Template {} references unbound variable '{}'", self.name, key),
            }
            rest = &after_open[end + 2..];
        }
        out.push_str(rest);

        Ok(out)
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Landing page listing the legacy names
pub fn index_page(names: &[String]) -> Result<String> {
    let items: String = names
        .iter()
        .map(|name| format!("      <div>{}</div>\n", escape_html(name)))
        .collect();
    INDEX.render(&[("names", items.as_str())])
}

/// Confirmation page for the demo tweet
pub fn another_page(handle: &str) -> Result<String> {
    ANOTHER.render(&[("handle", escape_html(handle).as_str())])
}

/// Timeline table, one row per content id
pub fn tweets_page(handle: &str, tweets: &BTreeMap<i64, TweetContent>) -> Result<String> {
    let rows: String = tweets
        .iter()
        .map(|(cid, content)| {
            format!(
                "      <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                cid,
                escape_html(content.text.as_deref().unwrap_or_default()),
                escape_html(content.media.as_deref().unwrap_or_default()),
            )
        })
        .collect();
    let handle = escape_html(handle);
    TWEETS.render(&[("handle", handle.as_str()), ("tweets", rows.as_str())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_render_substitutes_placeholders() {
        let template = Template {
            name: "inline",
            source: "<p>{{ a }} and {{b}}</p>",
        };
        let html = template.render(&[("a", "one"), ("b", "two")]).unwrap();
        assert_eq!(html, "<p>one and two</p>");
    }

    #[test]
    fn test_render_rejects_unbound_variable() {
        let template = Template {
            name: "inline",
            source: "{{ missing }}",
        };
        assert!(template.render(&[]).is_err());
    }

    #[test]
    fn test_render_rejects_unclosed_placeholder() {
        let template = Template {
            name: "inline",
            source: "{{ oops",
        };
        assert!(template.render(&[("oops", "x")]).is_err());
    }

    #[test]
    fn test_index_page_lists_escaped_names() {
        let html = index_page(&["ada".to_string(), "<b>bold</b>".to_string()]).unwrap();
        assert!(html.contains("<div>ada</div>"));
        assert!(html.contains("<div>&lt;b&gt;bold&lt;/b&gt;</div>"));
        assert!(html.contains(r#"action="/add""#));
    }

    #[test]
    fn test_tweets_page_has_row_per_cid() {
        let mut tweets = BTreeMap::new();
        tweets.insert(
            10_000_000_001,
            TweetContent {
                text: Some("hello".to_string()),
                media: None,
            },
        );
        tweets.insert(
            10_000_000_002,
            TweetContent {
                text: Some("a & b".to_string()),
                media: Some("pic.png".to_string()),
            },
        );

        let html = tweets_page("alice", &tweets).unwrap();
        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("<td>10000000001</td><td>hello</td><td></td>"));
        assert!(html.contains("<td>a &amp; b</td><td>pic.png</td>"));
        assert!(html.contains("people alice follows"));
    }

    #[test]
    fn test_bundled_templates_render() {
        assert!(index_page(&[]).is_ok());
        assert!(another_page("vladverba").is_ok());
        assert!(tweets_page("nobody", &BTreeMap::new()).is_ok());
    }

    proptest! {
        /// Escaped text never contains markup characters
        #[test]
        fn prop_escape_removes_markup(raw in ".*") {
            let escaped = escape_html(&raw);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
        }
    }
}
