use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a registry item or file.
///
/// Serialized with the registry's `registry:` prefix (e.g. `registry:ui`).
/// Each category also has a short slug used in URLs and the JSON API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:component")]
    Component,
    #[serde(rename = "registry:block")]
    Block,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:page")]
    Page,
    #[serde(rename = "registry:file")]
    File,
    #[serde(rename = "registry:style")]
    Style,
    #[serde(rename = "registry:theme")]
    Theme,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Self::Ui,
        Self::Component,
        Self::Block,
        Self::Hook,
        Self::Lib,
        Self::Page,
        Self::File,
        Self::Style,
        Self::Theme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ui => "registry:ui",
            Self::Component => "registry:component",
            Self::Block => "registry:block",
            Self::Hook => "registry:hook",
            Self::Lib => "registry:lib",
            Self::Page => "registry:page",
            Self::File => "registry:file",
            Self::Style => "registry:style",
            Self::Theme => "registry:theme",
        }
    }

    /// Short name without the `registry:` prefix.
    pub fn slug(&self) -> &'static str {
        &self.as_str()["registry:".len()..]
    }

    /// Parse either the full form (`registry:hook`) or the slug (`hook`).
    pub fn parse(s: &str) -> Option<Self> {
        let slug = s.strip_prefix("registry:").unwrap_or(s);
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
