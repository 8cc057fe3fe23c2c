//! Assembly of the final VitePress configuration.
//!
//! Merges a loaded [`Config`] with the generated sidebar: every field
//! except the sidebar map is a literal passed through unchanged.

use std::collections::BTreeMap;

use chrono::Datelike;
use vpress_config::Config;

use crate::model::{
    Footer, HeadEntry, MarkdownConfig, MermaidConfig, NavItem, Outline, SearchOptions,
    SocialLinkItem, ThemeConfig, VitePressConfig,
};
use crate::sidebar::{SidebarError, build_sidebar};

/// Error returned when configuration assembly fails.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Sidebar generation failed.
    #[error(transparent)]
    Sidebar(#[from] SidebarError),
}

/// Build the complete VitePress configuration from a loaded config.
///
/// Generates the sidebar from the resolved notes directory, injects the
/// Google Analytics head scripts when `[analytics]` is configured, and
/// fills the remaining fields from config literals. The footer copyright
/// year is taken from the local clock at generation time.
///
/// # Errors
///
/// Returns [`GenerateError::Sidebar`] if the notes directory cannot be read.
pub fn generate(config: &Config) -> Result<VitePressConfig, GenerateError> {
    let docs = &config.docs_resolved;
    let groups = build_sidebar(&docs.source_dir, &docs.route_prefix)?;

    tracing::debug!(
        groups = groups.len(),
        entries = groups.iter().map(|g| g.items.len()).sum::<usize>(),
        source_dir = %docs.source_dir.display(),
        "generated sidebar"
    );

    let mut sidebar = BTreeMap::new();
    sidebar.insert(format!("/{}/", docs.route_prefix), groups);

    let head = config
        .analytics
        .as_ref()
        .map(|analytics| analytics_head(&analytics.measurement_id))
        .unwrap_or_default();

    let search = match config.search.provider.as_str() {
        "none" => None,
        provider => Some(SearchOptions {
            provider: provider.to_owned(),
        }),
    };

    Ok(VitePressConfig {
        title: config.site.title.clone(),
        description: config.site.description.clone(),
        base: config.site.base.clone(),
        src_dir: config.site.src_dir.clone(),
        head,
        theme_config: ThemeConfig {
            logo: config.site.logo.clone(),
            nav: config
                .nav
                .iter()
                .map(|n| NavItem {
                    text: n.text.clone(),
                    link: n.link.clone(),
                })
                .collect(),
            sidebar,
            search,
            social_links: config
                .social
                .iter()
                .map(|s| SocialLinkItem {
                    icon: s.icon.clone(),
                    link: s.link.clone(),
                })
                .collect(),
            footer: Footer {
                message: config.footer.message.clone(),
                copyright: format!("Copyright {}", chrono::Local::now().year()),
            },
            outline: Outline {
                level: [config.outline.min_level, config.outline.max_level],
            },
        },
        mermaid: MermaidConfig {
            theme: config.diagrams.mermaid_theme.clone(),
        },
        markdown: MarkdownConfig { line_numbers: true },
    })
}

/// Google Analytics gtag.js head entries.
///
/// Mirrors the standard gtag snippet: an async loader tag plus the inline
/// dataLayer bootstrap.
fn analytics_head(measurement_id: &str) -> Vec<HeadEntry> {
    vec![
        HeadEntry::external_script(&format!(
            "https://www.googletagmanager.com/gtag/js?id={measurement_id}"
        )),
        HeadEntry::inline_script(&format!(
            "window.dataLayer = window.dataLayer || [];\n\
             function gtag(){{dataLayer.push(arguments);}}\n\
             gtag('js', new Date());\n\
             gtag('config', '{measurement_id}');"
        )),
    ]
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use vpress_config::{CliSettings, Config};

    use super::*;

    /// Load a config whose notes dir points at a prepared tempdir.
    fn load_config(dir: &Path, toml: &str) -> Config {
        let config_path = dir.join("vpress.toml");
        fs::write(&config_path, toml).unwrap();
        Config::load(Some(&config_path), None).unwrap()
    }

    fn write_notes(dir: &Path, names: &[&str]) {
        fs::create_dir_all(dir).unwrap();
        for name in names {
            fs::write(dir.join(name), "# Note\n").unwrap();
        }
    }

    #[test]
    fn test_generate_defaults() {
        let temp = tempfile::tempdir().unwrap();
        write_notes(&temp.path().join("researching"), &["bitcoin-overview.md"]);
        let config = load_config(temp.path(), "");

        let vp = generate(&config).unwrap();

        assert_eq!(vp.title, "Tech Research");
        assert_eq!(vp.base, "/tech-research/");
        assert_eq!(vp.src_dir, ".");
        assert!(vp.head.is_empty()); // No analytics section
        assert_eq!(vp.mermaid.theme, "neutral");
        assert!(vp.markdown.line_numbers);
        assert_eq!(vp.theme_config.outline.level, [2, 3]);
        assert_eq!(
            vp.theme_config.search.as_ref().unwrap().provider,
            "local"
        );

        let groups = &vp.theme_config.sidebar["/researching/"];
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].text, "Technical Overviews");
    }

    #[test]
    fn test_generate_analytics_head_entries() {
        let temp = tempfile::tempdir().unwrap();
        write_notes(&temp.path().join("researching"), &[]);
        let config = load_config(
            temp.path(),
            "[analytics]\nmeasurement_id = \"G-TESTID1234\"\n",
        );

        let vp = generate(&config).unwrap();

        assert_eq!(vp.head.len(), 2);
        assert_eq!(
            vp.head[0].attrs["src"],
            "https://www.googletagmanager.com/gtag/js?id=G-TESTID1234"
        );
        let inline = vp.head[1].children.as_ref().unwrap();
        assert!(inline.contains("gtag('config', 'G-TESTID1234')"));
        assert!(inline.contains("window.dataLayer"));
    }

    #[test]
    fn test_generate_search_none_omits_search() {
        let temp = tempfile::tempdir().unwrap();
        write_notes(&temp.path().join("researching"), &[]);
        let config = load_config(temp.path(), "[search]\nprovider = \"none\"\n");

        let vp = generate(&config).unwrap();

        assert!(vp.theme_config.search.is_none());
    }

    #[test]
    fn test_generate_sidebar_keyed_by_route_prefix() {
        let temp = tempfile::tempdir().unwrap();
        write_notes(&temp.path().join("notes"), &["foo-playbook.md"]);
        let config = load_config(temp.path(), "[docs]\nsource_dir = \"notes\"\n");

        let vp = generate(&config).unwrap();

        let groups = &vp.theme_config.sidebar["/notes/"];
        assert_eq!(groups[0].items[0].link, "/notes/foo-playbook");
    }

    #[test]
    fn test_generate_missing_notes_dir_fails() {
        let temp = tempfile::tempdir().unwrap();
        // No researching/ directory created
        let config = load_config(temp.path(), "");

        let result = generate(&config);

        assert!(matches!(result, Err(GenerateError::Sidebar(_))));
    }

    #[test]
    fn test_generate_copyright_current_year() {
        let temp = tempfile::tempdir().unwrap();
        write_notes(&temp.path().join("researching"), &[]);
        let config = load_config(temp.path(), "");

        let vp = generate(&config).unwrap();

        let year = chrono::Local::now().year();
        assert_eq!(
            vp.theme_config.footer.copyright,
            format!("Copyright {year}")
        );
    }

    #[test]
    fn test_generate_with_cli_source_dir_override() {
        let temp = tempfile::tempdir().unwrap();
        let notes_dir = temp.path().join("elsewhere");
        write_notes(&notes_dir, &["clawdbot-earning-ideas.md"]);
        let config_path = temp.path().join("vpress.toml");
        fs::write(&config_path, "").unwrap();

        let settings = CliSettings {
            source_dir: Some(notes_dir),
            ..Default::default()
        };
        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();

        let vp = generate(&config).unwrap();

        let groups = &vp.theme_config.sidebar["/elsewhere/"];
        assert_eq!(groups[0].text, "Earning Ideas");
        assert_eq!(groups[0].items[0].text, "Clawdbot");
    }

    #[test]
    fn test_generate_serializes_end_to_end() {
        let temp = tempfile::tempdir().unwrap();
        write_notes(
            &temp.path().join("researching"),
            &["bitcoin-overview.md", "x-promotion-analysis.md"],
        );
        let config = load_config(
            temp.path(),
            "[analytics]\nmeasurement_id = \"G-YXKJRQ2ZF3\"\n",
        );

        let vp = generate(&config).unwrap();
        let json = serde_json::to_value(&vp).unwrap();

        assert_eq!(json["srcDir"], ".");
        assert_eq!(json["head"][0][0], "script");
        assert_eq!(json["head"][0][1]["async"], "");
        assert_eq!(
            json["themeConfig"]["sidebar"]["/researching/"][0]["text"],
            "Technical Overviews"
        );
        assert_eq!(
            json["themeConfig"]["sidebar"]["/researching/"][1]["text"],
            "Analysis"
        );
        assert_eq!(json["markdown"]["lineNumbers"], true);
        assert_eq!(json["mermaid"]["theme"], "neutral");
    }
}
