//! Global style entry points.
//!
//! Declared stylesheets are parsed into [`StyleEntry`] values and folded into an
//! [`EntryPointMap`]. Every parsed path also lands in the [`GlobalStylePathSet`],
//! which the rule compiler uses to partition global from component styles.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::app::StyleEntrySpec;
use crate::error::Result;
use crate::paths::resolve_path;

/// Entry name used for style declarations without an explicit output
pub const DEFAULT_STYLE_ENTRY: &str = "styles";

static OUTPUT_EXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(js|css)$").expect("valid output extension pattern"));
static LAZY_INPUT_EXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.(js|css|scss|sass|less|styl)$").expect("valid input extension pattern")
});

/// A parsed style declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub entry: String,
    pub path: PathBuf,
}

/// Parses raw style declarations into named, absolute entries
pub trait EntryParser {
    /// `kind` names the default entry for declarations that do not pick one.
    fn parse(&self, specs: &[StyleEntrySpec], root: &Path, kind: &str)
    -> Result<Vec<StyleEntry>>;
}

/// Default parser for `styles` declarations.
///
/// - `output` given: the entry is the output name without a `.css`/`.js` suffix
/// - `lazy`: the entry is named after the input file
/// - otherwise the entry is `kind`
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtraEntryParser;

impl EntryParser for ExtraEntryParser {
    fn parse(
        &self,
        specs: &[StyleEntrySpec],
        root: &Path,
        kind: &str,
    ) -> Result<Vec<StyleEntry>> {
        specs
            .iter()
            .map(|spec| {
                let path = resolve_path(root, spec.input())?;
                let entry = match spec {
                    StyleEntrySpec::Detailed(extra) => match (&extra.output, extra.lazy) {
                        (Some(output), _) => OUTPUT_EXT.replace(output, "").into_owned(),
                        (None, true) => {
                            let input = extra.input.to_string_lossy();
                            LAZY_INPUT_EXT.replace(&input, "").into_owned()
                        }
                        (None, false) => kind.to_string(),
                    },
                    StyleEntrySpec::Path(_) => kind.to_string(),
                };
                Ok(StyleEntry { entry, path })
            })
            .collect()
    }
}

/// Entry name to ordered stylesheet paths, in first-declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryPointMap(IndexMap<String, Vec<PathBuf>>);

impl EntryPointMap {
    /// Stylesheets bundled into `entry`, in declaration order
    pub fn get(&self, entry: &str) -> Option<&[PathBuf]> {
        self.0.get(entry).map(Vec::as_slice)
    }

    /// Entries with their stylesheets, in first-declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.0
            .iter()
            .map(|(name, paths)| (name.as_str(), paths.as_slice()))
    }

    /// Entry names in first-declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, entry: String, path: PathBuf) {
        self.0.entry(entry).or_default().push(path);
    }
}

/// Absolute paths of global stylesheets.
///
/// Membership is O(1); ordering is irrelevant to the compiler and the set
/// serializes sorted so compiled output stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalStylePathSet(FxHashSet<PathBuf>);

impl GlobalStylePathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `path`; returns `false` if it was already present
    pub fn insert(&mut self, path: PathBuf) -> bool {
        self.0.insert(path)
    }

    /// Whether `path` is a global stylesheet. Paths compare exactly, so
    /// callers pass the same absolute, cleaned form the set was built from.
    pub fn contains(&self, path: &Path) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Paths in arbitrary order; use [`sorted`](Self::sorted) for stable output
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.0.iter()
    }

    /// Paths in lexical order
    pub fn sorted(&self) -> Vec<&PathBuf> {
        let mut paths: Vec<_> = self.0.iter().collect();
        paths.sort();
        paths
    }
}

impl FromIterator<PathBuf> for GlobalStylePathSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for GlobalStylePathSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}

/// Fold parsed entries into the entry-point map and the global path set.
///
/// Paths listed twice under one entry stay duplicated.
pub fn aggregate_entries(
    entries: impl IntoIterator<Item = StyleEntry>,
) -> (EntryPointMap, GlobalStylePathSet) {
    let mut entry_points = EntryPointMap::default();
    let mut global_paths = GlobalStylePathSet::new();

    for StyleEntry { entry, path } in entries {
        trace!(entry = %entry, path = %path.display(), "global style");
        global_paths.insert(path.clone());
        entry_points.push(entry, path);
    }

    debug!(
        entries = entry_points.len(),
        global_paths = global_paths.len(),
        "aggregated style entries"
    );

    (entry_points, global_paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ExtraEntry;

    fn detailed(input: &str, output: Option<&str>, lazy: bool) -> StyleEntrySpec {
        StyleEntrySpec::Detailed(ExtraEntry {
            input: PathBuf::from(input),
            output: output.map(str::to_string),
            lazy,
        })
    }

    #[test]
    fn parser_names_entries() {
        let specs = vec![
            StyleEntrySpec::Path(PathBuf::from("styles.css")),
            detailed("theme.scss", Some("theme.css"), false),
            detailed("print/print.less", None, true),
            detailed("extra.styl", None, false),
        ];

        let parsed = ExtraEntryParser
            .parse(&specs, Path::new("/p/src"), DEFAULT_STYLE_ENTRY)
            .unwrap();

        let names: Vec<_> = parsed.iter().map(|e| e.entry.as_str()).collect();
        assert_eq!(names, vec!["styles", "theme", "print/print", "styles"]);
        assert_eq!(parsed[1].path, PathBuf::from("/p/src/theme.scss"));
    }

    #[test]
    fn aggregate_appends_to_existing_entries() {
        let entries = vec![
            StyleEntry {
                entry: "styles".into(),
                path: "/p/a.css".into(),
            },
            StyleEntry {
                entry: "theme".into(),
                path: "/p/t.scss".into(),
            },
            StyleEntry {
                entry: "styles".into(),
                path: "/p/b.css".into(),
            },
        ];

        let (map, set) = aggregate_entries(entries);
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["styles", "theme"]);
        assert_eq!(
            map.get("styles").unwrap(),
            &[PathBuf::from("/p/a.css"), PathBuf::from("/p/b.css")]
        );
        assert_eq!(set.len(), 3);
        assert!(set.contains(Path::new("/p/t.scss")));
    }

    #[test]
    fn duplicates_within_an_entry_are_preserved() {
        let entry = StyleEntry {
            entry: "styles".into(),
            path: "/p/a.css".into(),
        };
        let (map, set) = aggregate_entries(vec![entry.clone(), entry]);
        assert_eq!(map.get("styles").unwrap().len(), 2);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn no_entries_yields_empty_outputs() {
        let (map, set) = aggregate_entries(Vec::new());
        assert!(map.is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn set_serializes_sorted() {
        let set: GlobalStylePathSet = ["/z.css", "/a.css", "/m.css"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value, serde_json::json!(["/a.css", "/m.css", "/z.css"]));
    }
}
