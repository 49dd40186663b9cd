//! File path classification for change breakdowns.
//!
//! Maps a filename to a language/category bucket and a chart color via a
//! static lowercased-extension table. Unknown extensions (and files without
//! one) fall back to `Other` with a neutral color, so classification never
//! fails.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category bucket for a file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileCategory {
    Rust,
    JavaScript,
    TypeScript,
    Python,
    Go,
    Java,
    CSystems,
    Web,
    Styles,
    Data,
    Docs,
    Shell,
    Image,
    Other,
}

impl FileCategory {
    /// Chart color for this category (linguist-style hex).
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Rust => "#dea584",
            Self::JavaScript => "#f1e05a",
            Self::TypeScript => "#3178c6",
            Self::Python => "#3572a5",
            Self::Go => "#00add8",
            Self::Java => "#b07219",
            Self::CSystems => "#555555",
            Self::Web => "#e34c26",
            Self::Styles => "#563d7c",
            Self::Data => "#89e051",
            Self::Docs => "#083fa1",
            Self::Shell => "#4eaa25",
            Self::Image => "#a074c4",
            Self::Other => "#9e9e9e",
        }
    }

    /// Display label for the category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rust => "Rust",
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
            Self::Go => "Go",
            Self::Java => "Java",
            Self::CSystems => "C/C++",
            Self::Web => "Web",
            Self::Styles => "Styles",
            Self::Data => "Data & Config",
            Self::Docs => "Docs",
            Self::Shell => "Shell",
            Self::Image => "Images",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification result for a file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileKind {
    /// Lowercased extension without the dot, empty when the name has none
    pub extension: String,
    /// Category bucket
    pub category: FileCategory,
    /// Chart color for the category
    pub color: &'static str,
}

/// Classify a file path by its extension. Total function.
#[must_use]
pub fn classify_path(path: &str) -> FileKind {
    let name = path.rsplit('/').next().unwrap_or(path);
    let extension = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    };

    let category = category_for(&extension);
    FileKind {
        extension,
        category,
        color: category.color(),
    }
}

fn category_for(extension: &str) -> FileCategory {
    match extension {
        "rs" => FileCategory::Rust,
        "js" | "jsx" | "mjs" | "cjs" => FileCategory::JavaScript,
        "ts" | "tsx" | "mts" => FileCategory::TypeScript,
        "py" | "pyi" => FileCategory::Python,
        "go" => FileCategory::Go,
        "java" | "kt" | "kts" | "scala" => FileCategory::Java,
        "c" | "h" | "cc" | "cpp" | "hpp" | "cxx" => FileCategory::CSystems,
        "html" | "htm" | "vue" | "svelte" => FileCategory::Web,
        "css" | "scss" | "sass" | "less" => FileCategory::Styles,
        "json" | "yaml" | "yml" | "toml" | "xml" | "csv" | "ini" | "lock" => FileCategory::Data,
        "md" | "markdown" | "txt" | "rst" | "adoc" => FileCategory::Docs,
        "sh" | "bash" | "zsh" | "fish" | "ps1" => FileCategory::Shell,
        "png" | "jpg" | "jpeg" | "gif" | "svg" | "ico" | "webp" => FileCategory::Image,
        _ => FileCategory::Other,
    }
}
