//! The read-only index of companion modules.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ignore::WalkBuilder;

use super::{parse_exports, CompanionSuffixes, LoadError, ModuleExports};

/// Materializes a companion module on demand.
pub type Loader = Arc<dyn Fn() -> Result<ModuleExports, LoadError> + Send + Sync>;

/// Companion path to loader, in registration order.
///
/// Built once at startup and never changed afterwards; the resolver only
/// reads it.
#[derive(Clone, Default)]
pub struct ModuleIndex {
    entries: Vec<(String, Loader)>,
    positions: HashMap<String, usize>,
}

impl ModuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader for `path`. A second registration for the same path
    /// replaces the loader but keeps the original position.
    pub fn register<F>(&mut self, path: impl Into<String>, loader: F) -> &mut Self
    where
        F: Fn() -> Result<ModuleExports, LoadError> + Send + Sync + 'static,
    {
        let path = path.into();
        let loader: Loader = Arc::new(loader);
        match self.positions.get(&path) {
            Some(&pos) => self.entries[pos].1 = loader,
            None => {
                self.positions.insert(path.clone(), self.entries.len());
                self.entries.push((path, loader));
            }
        }
        self
    }

    pub fn get(&self, path: &str) -> Option<&Loader> {
        self.positions
            .get(path)
            .map(|&pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Loader)> {
        self.entries.iter().map(|(p, l)| (p.as_str(), l))
    }

    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index every companion file under `root/registry_dir`.
    ///
    /// Keys are paths relative to `root` with `/` separators, matching how
    /// manifest items declare their files. Files are registered in sorted
    /// path order. `.gitignore` and `.ignore` files are honored whether or not
    /// the root is a git checkout.
    pub fn scan(
        root: &Path,
        registry_dir: &str,
        suffixes: &CompanionSuffixes,
    ) -> Result<Self, ignore::Error> {
        let mut found = Vec::new();
        let walk_root = root.join(registry_dir);
        if !walk_root.is_dir() {
            tracing::warn!("No registry directory at {}", walk_root.display());
            return Ok(Self::new());
        }

        for entry in WalkBuilder::new(&walk_root)
            .hidden(true)
            .require_git(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build()
        {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if suffixes.kind_of(&key).is_some() {
                found.push((key, entry.path().to_path_buf()));
            }
        }

        let mut index = Self::new();
        for (key, file) in found {
            let markdown = file.extension().is_some_and(|ext| ext == "md");
            index.register(key, move || {
                let text = std::fs::read_to_string(&file).map_err(|source| LoadError::Read {
                    path: file.display().to_string(),
                    source,
                })?;
                parse_exports(&text, markdown)
            });
        }

        tracing::info!(
            "Indexed {} companion modules under {}",
            index.len(),
            walk_root.display()
        );
        Ok(index)
    }
}

impl fmt::Debug for ModuleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(p, _)| p))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::Renderable;

    fn primary(html: &'static str) -> impl Fn() -> Result<ModuleExports, LoadError> {
        move || Ok(ModuleExports::Primary(Renderable::html(html)))
    }

    #[test]
    fn register_keeps_first_position_on_replace() {
        let mut index = ModuleIndex::new();
        index
            .register("a.docs.md", primary("a"))
            .register("b.docs.md", primary("b"))
            .register("a.docs.md", primary("a2"));

        assert_eq!(index.paths(), vec!["a.docs.md", "b.docs.md"]);
        let exports = (index.get("a.docs.md").unwrap())().unwrap();
        assert_eq!(
            exports,
            ModuleExports::Primary(Renderable::html("a2"))
        );
    }

    #[test]
    fn scan_indexes_only_companion_files() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("registry/ui/button");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("button.tsx"), "export {}").unwrap();
        std::fs::write(dir.join("button.docs.md"), "# Button").unwrap();
        std::fs::write(dir.join("button.preview.html"), "<button>Hi</button>").unwrap();

        let index = ModuleIndex::scan(root.path(), "registry", &CompanionSuffixes::default())
            .unwrap();

        assert_eq!(
            index.paths(),
            vec![
                "registry/ui/button/button.docs.md",
                "registry/ui/button/button.preview.html"
            ]
        );

        let docs = (index.get("registry/ui/button/button.docs.md").unwrap())().unwrap();
        let (_, renderable) = docs.preferred().unwrap();
        assert!(renderable.as_str().contains("<h1>Button</h1>"));

        let preview = (index.get("registry/ui/button/button.preview.html").unwrap())().unwrap();
        assert_eq!(
            preview,
            ModuleExports::Primary(Renderable::html("<button>Hi</button>"))
        );
    }

    #[test]
    fn scan_skips_gitignored_files_outside_a_repository() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("registry/ui");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(root.path().join("registry/.gitignore"), "draft.docs.md\n").unwrap();
        std::fs::write(dir.join("draft.docs.md"), "# Draft").unwrap();
        std::fs::write(dir.join("card.docs.md"), "# Card").unwrap();

        let index = ModuleIndex::scan(root.path(), "registry", &CompanionSuffixes::default())
            .unwrap();

        assert_eq!(index.paths(), vec!["registry/ui/card.docs.md"]);
    }

    #[test]
    fn lookup_finds_every_registered_path() {
        let mut index = ModuleIndex::new();
        for i in 0..200 {
            index.register(format!("registry/item-{}.docs.md", i), primary("x"));
        }

        assert_eq!(index.len(), 200);
        assert!(index.get("registry/item-0.docs.md").is_some());
        assert!(index.get("registry/item-199.docs.md").is_some());
        assert!(index.get("registry/item-200.docs.md").is_none());
        assert_eq!(index.paths()[150], "registry/item-150.docs.md");
    }

    #[test]
    fn scan_loader_reports_deleted_file() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("registry/hooks");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("use-toggle.docs.md"), "docs").unwrap();

        let index = ModuleIndex::scan(root.path(), "registry", &CompanionSuffixes::default())
            .unwrap();
        std::fs::remove_file(dir.join("use-toggle.docs.md")).unwrap();

        let result = (index.get("registry/hooks/use-toggle.docs.md").unwrap())();
        assert!(matches!(result, Err(LoadError::Read { .. })));
    }
}
