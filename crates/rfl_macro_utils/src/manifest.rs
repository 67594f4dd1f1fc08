use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for a workspace crate as seen from the
/// caller's Cargo.toml.
///
/// Generated code must name `rfl_reflect` in a way that resolves inside the
/// invoking crate, which may depend on `rfl_reflect` directly or only on the
/// `reflector` facade.
///
/// # Example
///
/// ```rust
/// # use rfl_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("rfl_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `rfl_` and the target crate depends
///    on the facade `reflector`, return `::reflector::short_name`
///    (e.g. `rfl_reflect` -> `::reflector::reflect`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// A crate that needs to reference itself from doctests or its own unit tests
/// should add `extern crate self as rfl_reflect;` in its root.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "reflector";
const CRATE_PREFIX: &str = "rfl_";

impl Manifest {
    // Try get `Cargo.toml` path.
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    #[inline]
    fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
        syn::parse_str(path).unwrap()
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_str(&format!("::{name}")));
        }

        let module = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            let mut path = Self::parse_str::<syn::Path>(&format!("::{FACADE_NAME}"));
            path.segments.push(Self::parse_str(module));
            return Some(path);
        }
        None
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the top-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        Self::resolve(&self.manifest, name)
    }

    fn resolve(manifest: &Document<Box<str>>, name: &str) -> syn::Path {
        for section in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = manifest.get(section)
                && let Some(val) = Self::find_in_deps(deps, name)
            {
                return val;
            }
        }

        Self::parse_str(&format!("::{name}"))
    }

    /// Obtain the [Manifest] of the caller's Cargo.toml.
    ///
    /// The parsed manifest is cached per path and refreshed when the file's
    /// modification time changes, so callers should still resolve paths once
    /// per macro invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use toml_edit::Document;

    fn path_of(manifest: &str, name: &str) -> String {
        let doc = Document::parse(Box::<str>::from(manifest)).unwrap();
        let path = Manifest::resolve(&doc, name);
        path.segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    #[test]
    fn direct_dependency() {
        let toml = "[dependencies]\nrfl_reflect = { path = \"../rfl_reflect\" }\n";
        assert_eq!(path_of(toml, "rfl_reflect"), "rfl_reflect");
    }

    #[test]
    fn through_facade() {
        let toml = "[dependencies]\nreflector = \"0.0.1\"\n";
        assert_eq!(path_of(toml, "rfl_reflect"), "reflector::reflect");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let toml = "[dev-dependencies]\nreflector = \"0.0.1\"\n";
        assert_eq!(path_of(toml, "rfl_reflect"), "reflector::reflect");
        assert_eq!(path_of("[dependencies]\n", "rfl_reflect"), "rfl_reflect");
    }
}
