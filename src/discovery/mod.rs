//! Module discovery over Lmod module trees.
//!
//! Every module file below `<root>/<system tag>` is classified by its
//! leading path segment (see [`PATH_RULES`]) into a [`Category`] and a
//! module name. Names are kept per category in first-seen order.

pub mod category;
pub mod walker;

pub use category::{
    classify_segments, Category, ClassifiedPath, Compiler, CompilerSet, PathRule, PATH_RULES,
};
pub use walker::{segments_below, walk_module_files};

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::ModuleRoot;

/// A distinct module name within one category, with every compiler
/// sub-path it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredModule {
    pub name: String,
    pub compilers: CompilerSet,
}

/// Discovered module names grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleInventory {
    by_category: BTreeMap<Category, Vec<DiscoveredModule>>,
}

impl ModuleInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a classified path. A name already present in the category is
    /// not added again; its compiler sub-paths are merged instead.
    pub fn insert(&mut self, classified: ClassifiedPath) {
        let modules = self.by_category.entry(classified.category).or_default();
        match modules.iter_mut().find(|m| m.name == classified.module_name) {
            Some(existing) => existing.compilers.extend(classified.compilers),
            None => modules.push(DiscoveredModule {
                name: classified.module_name,
                compilers: classified.compilers,
            }),
        }
    }

    pub fn modules(&self, category: Category) -> &[DiscoveredModule] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Names in one category, in first-seen order.
    pub fn names(&self, category: Category) -> Vec<&str> {
        self.modules(category)
            .iter()
            .map(|m| m.name.as_str())
            .collect()
    }

    /// All `(category, module)` pairs in seeding order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &DiscoveredModule)> {
        self.by_category
            .iter()
            .flat_map(|(category, modules)| modules.iter().map(move |m| (*category, m)))
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scans every root and classifies its module files.
///
/// Missing roots and unreadable entries are logged and skipped; discovery
/// never fails a run.
pub fn discover_modules(
    roots: &[ModuleRoot],
    system_tag: &Path,
    extension: &str,
) -> ModuleInventory {
    let mut inventory = ModuleInventory::new();

    for root in roots {
        tracing::info!(
            "Retrieving module information from {} path: {}",
            root.label,
            root.path.display()
        );

        let files = match walk_module_files(&root.path, extension) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("Skipping {} module root: {e}", root.label);
                continue;
            }
        };

        let anchor = root.path.join(system_tag);
        for file in files {
            let Some(parts) = segments_below(&file, &anchor) else {
                tracing::trace!("Outside {}: {}", system_tag.display(), file.display());
                continue;
            };
            tracing::debug!("Path components: {parts:?}");

            let segments: Vec<&str> = parts.iter().map(String::as_str).collect();
            match classify_segments(&segments) {
                Some(classified) => {
                    flag_ambiguous_layout(&classified, &file);
                    inventory.insert(classified);
                }
                None => tracing::debug!("Unrecognized module path: {}", file.display()),
            }
        }
    }

    for category in Category::ALL {
        tracing::debug!("Modules in {category}: {:?}", inventory.names(category));
    }

    inventory
}

fn flag_ambiguous_layout(classified: &ClassifiedPath, file: &Path) {
    if !classified.category.is_compiler_split() {
        return;
    }
    match classified.compilers.len() {
        0 => tracing::warn!(
            "No gcc or intel sub-path in {} module path, review manually: {}",
            classified.category,
            file.display()
        ),
        1 => {}
        _ => tracing::warn!(
            "Both gcc and intel sub-paths in {} module path, review manually: {}",
            classified.category,
            file.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const TAG: &str = "lmod/linux-rhel9-x86_64";

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "-- module").unwrap();
    }

    fn classified(category: Category, name: &str, compilers: &[Compiler]) -> ClassifiedPath {
        ClassifiedPath {
            category,
            module_name: name.to_string(),
            compilers: compilers.iter().copied().collect(),
        }
    }

    #[test]
    fn test_insert_ignores_duplicate_names() {
        let mut inventory = ModuleInventory::new();
        inventory.insert(classified(Category::Gcc, "fftw", &[Compiler::Gcc]));
        inventory.insert(classified(Category::Gcc, "hdf5", &[Compiler::Gcc]));
        inventory.insert(classified(Category::Gcc, "fftw", &[Compiler::Gcc]));

        assert_eq!(inventory.names(Category::Gcc), vec!["fftw", "hdf5"]);
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_insert_merges_compilers() {
        let mut inventory = ModuleInventory::new();
        inventory.insert(classified(Category::Openmpi, "hdf5", &[Compiler::Gcc]));
        inventory.insert(classified(Category::Openmpi, "hdf5", &[Compiler::Intel]));

        let modules = inventory.modules(Category::Openmpi);
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].compilers.len(), 2);
    }

    #[test]
    fn test_iter_follows_category_order() {
        let mut inventory = ModuleInventory::new();
        inventory.insert(classified(Category::Hpcx, "nccl", &[]));
        inventory.insert(classified(Category::Core, "cmake", &[]));
        inventory.insert(classified(Category::Gcc, "fftw", &[Compiler::Gcc]));

        let order: Vec<_> = inventory.iter().map(|(c, m)| (c, m.name.as_str())).collect();
        assert_eq!(
            order,
            vec![
                (Category::Core, "cmake"),
                (Category::Gcc, "fftw"),
                (Category::Hpcx, "nccl"),
            ]
        );
    }

    #[test]
    fn test_discover_modules_across_roots() {
        let manual = TempDir::new().unwrap();
        let spack = TempDir::new().unwrap();
        touch(manual.path(), &format!("{TAG}/Core/matlab/r2023b.lua"));
        touch(spack.path(), &format!("{TAG}/Core/cmake/3.26.3.lua"));
        touch(spack.path(), &format!("{TAG}/gcc/12.3.0/fftw/3.3.10.lua"));
        touch(
            spack.path(),
            &format!("{TAG}/openmpi/4.1.5/gcc/12.3.0/hdf5/1.14.1.lua"),
        );

        let roots = vec![
            ModuleRoot::new("manual", manual.path()),
            ModuleRoot::new("spack", spack.path()),
        ];
        let inventory = discover_modules(&roots, Path::new(TAG), "lua");

        assert_eq!(inventory.names(Category::Core), vec!["matlab", "cmake"]);
        assert_eq!(inventory.names(Category::Gcc), vec!["fftw"]);
        assert_eq!(inventory.names(Category::Openmpi), vec!["hdf5"]);
    }

    #[test]
    fn test_discover_modules_skips_files_outside_anchor() {
        let root = TempDir::new().unwrap();
        touch(root.path(), "lmod/linux-rhel8-x86_64/Core/cmake/3.20.lua");
        touch(root.path(), &format!("{TAG}/cuda/12.1/cudnn/8.9.lua"));

        let roots = vec![ModuleRoot::new("spack", root.path())];
        let inventory = discover_modules(&roots, Path::new(TAG), "lua");

        assert!(inventory.is_empty());
    }

    #[test]
    fn test_discover_modules_tolerates_missing_root() {
        let root = TempDir::new().unwrap();
        touch(root.path(), &format!("{TAG}/Core/git/2.41.lua"));

        let roots = vec![
            ModuleRoot::new("manual", PathBuf::from("/nonexistent/pace-apps/manual")),
            ModuleRoot::new("spack", root.path()),
        ];
        let inventory = discover_modules(&roots, Path::new(TAG), "lua");

        assert_eq!(inventory.names(Category::Core), vec!["git"]);
    }
}
