//! Sidebar generation from the notes directory.
//!
//! Notes follow a filename convention: a hyphenated topic plus a category
//! suffix, e.g. `bitcoin-overview.md` or `clawdbot-earning-ideas.md`. The
//! builder lists the directory once, derives a display title per file and
//! buckets files into fixed categories, emitting one sidebar group per
//! non-empty category.
//!
//! Two independent priority orders are at work and must not be unified:
//! title derivation strips at most one suffix checked in [`TITLE_SUFFIXES`]
//! order, while category assignment tests substrings in [`Category::classify`]
//! order. A `foo-promotion-analysis.md` file therefore gets its
//! `-promotion-analysis` suffix stripped for the title but lands in the
//! generic Analysis category.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Title suffixes, checked in priority order. At most one is stripped.
const TITLE_SUFFIXES: &[&str] = &[
    "-overview",
    "-earning-ideas",
    "-promotion-analysis",
    "-analysis",
    "-playbook",
    "-model-report",
];

/// Note categories, in sidebar emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Overview,
    ModelReports,
    EarningIdeas,
    Analysis,
    Playbook,
    Other,
}

impl Category {
    /// All categories in sidebar emission order.
    pub const ALL: [Self; 6] = [
        Self::Overview,
        Self::ModelReports,
        Self::EarningIdeas,
        Self::Analysis,
        Self::Playbook,
        Self::Other,
    ];

    /// Classify a note stem by substring containment.
    ///
    /// Patterns are tested in a fixed priority order and the first match
    /// wins, so `foo-earning-ideas-analysis` is an Earning Ideas note.
    #[must_use]
    pub fn classify(stem: &str) -> Self {
        if stem.contains("-earning-ideas") {
            Self::EarningIdeas
        } else if stem.contains("-model-report") {
            Self::ModelReports
        } else if stem.contains("-analysis") {
            Self::Analysis
        } else if stem.contains("-playbook") {
            Self::Playbook
        } else if stem.contains("-overview") {
            Self::Overview
        } else {
            Self::Other
        }
    }

    /// Sidebar group label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Technical Overviews",
            Self::ModelReports => "Model Reports",
            Self::EarningIdeas => "Earning Ideas",
            Self::Analysis => "Analysis",
            Self::Playbook => "Playbooks",
            Self::Other => "Other",
        }
    }

    /// Whether the sidebar group starts collapsed.
    #[must_use]
    pub fn collapsed_by_default(self) -> bool {
        matches!(self, Self::Analysis | Self::Playbook | Self::Other)
    }
}

/// Single sidebar entry pointing at one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// Display title derived from the filename.
    pub text: String,
    /// Link target (absolute path without extension).
    pub link: String,
}

/// Sidebar group for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    /// Group label.
    pub text: String,
    /// Whether the group starts collapsed.
    pub collapsed: bool,
    /// Entries, in filename order.
    pub items: Vec<SidebarItem>,
}

/// Error returned when the notes directory cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// Directory enumeration failed.
    #[error("Failed to read notes directory {}: {source}", .path.display())]
    Io {
        /// Directory that failed to enumerate.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Build the sidebar from the notes directory.
///
/// Lists `source_dir` once, keeps regular files with an `.md` extension
/// sorted by filename, and produces one group per non-empty category in
/// [`Category::ALL`] order. Links are `/<route_prefix>/<stem>`.
///
/// Pure function of the directory contents; recomputed fully per call.
///
/// # Errors
///
/// Returns [`SidebarError::Io`] if the directory is missing or
/// unreadable. Generation runs once per build, so a failure aborts it.
pub fn build_sidebar(
    source_dir: &Path,
    route_prefix: &str,
) -> Result<Vec<SidebarGroup>, SidebarError> {
    let read_err = |source| SidebarError::Io {
        path: source_dir.to_path_buf(),
        source,
    };

    let mut filenames = Vec::new();
    for entry in fs::read_dir(source_dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if !entry.file_type().map_err(read_err)?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".md") {
            filenames.push(name);
        }
    }
    // Entries within each category preserve filename order
    filenames.sort_unstable();

    let mut buckets: [Vec<SidebarItem>; Category::ALL.len()] = Default::default();
    for name in &filenames {
        let stem = name.strip_suffix(".md").unwrap_or(name);
        buckets[Category::classify(stem) as usize].push(SidebarItem {
            text: derive_title(stem),
            link: format!("/{route_prefix}/{stem}"),
        });
    }

    Ok(Category::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, items)| !items.is_empty())
        .map(|(category, items)| SidebarGroup {
            text: category.label().to_owned(),
            collapsed: category.collapsed_by_default(),
            items,
        })
        .collect())
}

/// Derive a display title from a note stem.
///
/// Strips at most one suffix from [`TITLE_SUFFIXES`] (first match in
/// priority order), then title-cases the hyphen-separated remainder.
#[must_use]
pub fn derive_title(stem: &str) -> String {
    let base = TITLE_SUFFIXES
        .iter()
        .find_map(|suffix| stem.strip_suffix(suffix))
        .unwrap_or(stem);

    base.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of a word, leaving the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
