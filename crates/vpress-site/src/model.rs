//! Typed model of the VitePress configuration object.
//!
//! These types exist solely to serialize into the exact JSON shape the
//! VitePress build consumes: camelCase keys, head entries as heterogeneous
//! `[tag, attrs]` / `[tag, attrs, children]` tuples, and a path-keyed
//! sidebar map. Nothing here is read back.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

use crate::sidebar::SidebarGroup;

/// Root VitePress configuration object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitePressConfig {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Base path the site is served under.
    pub base: String,
    /// Source directory.
    pub src_dir: String,
    /// Head injection entries (analytics scripts).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head: Vec<HeadEntry>,
    /// Theme configuration.
    pub theme_config: ThemeConfig,
    /// Mermaid plugin configuration.
    pub mermaid: MermaidConfig,
    /// Markdown rendering options.
    pub markdown: MarkdownConfig,
}

/// Head injection entry.
///
/// Serializes as the VitePress tuple form: `["script", {attrs}]` for
/// external scripts, `["script", {}, "code"]` for inline ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadEntry {
    /// Tag name (always `script` for the entries this tool emits).
    pub tag: String,
    /// Tag attributes.
    pub attrs: BTreeMap<String, String>,
    /// Inline tag content, if any.
    pub children: Option<String>,
}

impl HeadEntry {
    /// External script entry: `["script", { async: "", src }]`.
    #[must_use]
    pub fn external_script(src: &str) -> Self {
        let mut attrs = BTreeMap::new();
        attrs.insert("async".to_owned(), String::new());
        attrs.insert("src".to_owned(), src.to_owned());
        Self {
            tag: "script".to_owned(),
            attrs,
            children: None,
        }
    }

    /// Inline script entry: `["script", {}, code]`.
    #[must_use]
    pub fn inline_script(code: &str) -> Self {
        Self {
            tag: "script".to_owned(),
            attrs: BTreeMap::new(),
            children: Some(code.to_owned()),
        }
    }
}

impl Serialize for HeadEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.children.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.tag)?;
        seq.serialize_element(&self.attrs)?;
        if let Some(children) = &self.children {
            seq.serialize_element(children)?;
        }
        seq.end()
    }
}

/// VitePress theme configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Logo path.
    pub logo: String,
    /// Top navigation entries.
    pub nav: Vec<NavItem>,
    /// Sidebar, keyed by route prefix (e.g. `/researching/`).
    pub sidebar: BTreeMap<String, Vec<SidebarGroup>>,
    /// Search options. Omitted entirely when search is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchOptions>,
    /// Social links.
    pub social_links: Vec<SocialLinkItem>,
    /// Footer lines.
    pub footer: Footer,
    /// Heading outline depth range.
    pub outline: Outline,
}

/// Top navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display text.
    pub text: String,
    /// Link target.
    pub link: String,
}

/// Search options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    /// Provider name (e.g. `local`).
    pub provider: String,
}

/// Social link entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLinkItem {
    /// Icon name.
    pub icon: String,
    /// Link URL.
    pub link: String,
}

/// Footer lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Footer message.
    pub message: String,
    /// Copyright line.
    pub copyright: String,
}

/// Heading outline depth range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outline {
    /// `[min, max]` heading levels.
    pub level: [u8; 2],
}

/// Mermaid plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MermaidConfig {
    /// Mermaid theme name.
    pub theme: String,
}

/// Markdown rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownConfig {
    /// Show line numbers in code blocks.
    pub line_numbers: bool,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_external_script_serializes_as_pair() {
        let entry =
            HeadEntry::external_script("https://www.googletagmanager.com/gtag/js?id=G-TEST");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                "script",
                {
                    "async": "",
                    "src": "https://www.googletagmanager.com/gtag/js?id=G-TEST"
                }
            ])
        );
    }

    #[test]
    fn test_inline_script_serializes_as_triple() {
        let entry = HeadEntry::inline_script("gtag('js', new Date());");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!(["script", {}, "gtag('js', new Date());"])
        );
    }

    #[test]
    fn test_theme_config_camel_case_keys() {
        let theme = ThemeConfig {
            logo: "/logo.svg".to_owned(),
            nav: vec![NavItem {
                text: "Home".to_owned(),
                link: "/".to_owned(),
            }],
            sidebar: BTreeMap::new(),
            search: Some(SearchOptions {
                provider: "local".to_owned(),
            }),
            social_links: Vec::new(),
            footer: Footer {
                message: "msg".to_owned(),
                copyright: "Copyright 2026".to_owned(),
            },
            outline: Outline { level: [2, 3] },
        };

        let json = serde_json::to_value(&theme).unwrap();
        assert!(json.get("socialLinks").is_some());
        assert_eq!(json["outline"]["level"], serde_json::json!([2, 3]));
        assert_eq!(json["search"]["provider"], "local");
    }

    #[test]
    fn test_search_omitted_when_none() {
        let theme = ThemeConfig {
            logo: String::new(),
            nav: Vec::new(),
            sidebar: BTreeMap::new(),
            search: None,
            social_links: Vec::new(),
            footer: Footer {
                message: String::new(),
                copyright: String::new(),
            },
            outline: Outline { level: [2, 3] },
        };

        let json = serde_json::to_value(&theme).unwrap();
        assert!(json.get("search").is_none());
    }
}
