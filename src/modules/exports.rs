//! What a companion module exposes and how the displayed export is chosen.

use std::sync::Arc;

use pulldown_cmark::{html, Options, Parser};
use serde::{Serialize, Serializer};

use super::LoadError;

/// Conventional name of the primary export inside a named export list.
pub const DEFAULT_EXPORT: &str = "default";

/// A unit of HTML the page shell can embed as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable(Arc<str>);

impl Renderable {
    pub fn html(html: impl Into<Arc<str>>) -> Self {
        Self(html.into())
    }

    /// Render CommonMark to HTML.
    pub fn markdown(source: &str) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(source, options));
        Self(out.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for Renderable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A single named export.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportValue {
    Renderable(Renderable),
    /// Non-renderable value (metadata, examples...). Never displayed.
    Data(serde_json::Value),
}

/// Everything a loaded companion module exposes.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleExports {
    Primary(Renderable),
    /// Named exports in declaration order.
    Named(Vec<(String, ExportValue)>),
}

impl ModuleExports {
    /// Pick the export to display.
    ///
    /// A primary export always wins. In a named list, an export called
    /// `default` counts as primary; otherwise the first renderable export in
    /// declaration order is taken.
    pub fn preferred(&self) -> Option<(&str, &Renderable)> {
        match self {
            Self::Primary(renderable) => Some((DEFAULT_EXPORT, renderable)),
            Self::Named(exports) => {
                let renderables = exports.iter().filter_map(|(name, value)| match value {
                    ExportValue::Renderable(r) => Some((name.as_str(), r)),
                    ExportValue::Data(_) => None,
                });
                let mut first = None;
                for (name, renderable) in renderables {
                    if name == DEFAULT_EXPORT {
                        return Some((name, renderable));
                    }
                    first.get_or_insert((name, renderable));
                }
                first
            }
        }
    }
}

enum SectionKind {
    Export,
    Data,
}

/// Split a companion file into its exports.
///
/// Marker lines `<!-- export: NAME -->` and `<!-- data: NAME -->` open a new
/// section. Text before the first marker is ignored. Without any marker the
/// whole file is the primary export. Export sections are rendered as Markdown
/// when `markdown` is set and used verbatim otherwise; data sections must be
/// JSON.
pub fn parse_exports(text: &str, markdown: bool) -> Result<ModuleExports, LoadError> {
    let render = |body: &str| {
        if markdown {
            Renderable::markdown(body)
        } else {
            Renderable::html(body.trim())
        }
    };

    let mut sections: Vec<(SectionKind, String, String)> = Vec::new();
    for line in text.lines() {
        if let Some((kind, name)) = parse_marker(line) {
            sections.push((kind, name.to_string(), String::new()));
        } else if let Some((_, _, body)) = sections.last_mut() {
            body.push_str(line);
            body.push('\n');
        }
    }

    if sections.is_empty() {
        return Ok(ModuleExports::Primary(render(text)));
    }

    let mut exports = Vec::with_capacity(sections.len());
    for (kind, name, body) in sections {
        let value = match kind {
            SectionKind::Export => ExportValue::Renderable(render(&body)),
            SectionKind::Data => ExportValue::Data(
                serde_json::from_str(&body).map_err(|source| LoadError::Data {
                    name: name.clone(),
                    source,
                })?,
            ),
        };
        exports.push((name, value));
    }
    Ok(ModuleExports::Named(exports))
}

fn parse_marker(line: &str) -> Option<(SectionKind, &str)> {
    let inner = line
        .trim()
        .strip_prefix("<!--")?
        .strip_suffix("-->")?
        .trim();
    let (kind, name) = inner.split_once(':')?;
    let kind = match kind.trim() {
        "export" => SectionKind::Export,
        "data" => SectionKind::Data,
        _ => return None,
    };
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((kind, name))
}
