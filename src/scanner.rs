//! Directory scanning – walks the input tree and groups every file by the
//! name of the directory that contains it.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use walkdir::{DirEntry, WalkDir};

/// One file found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub source_path: PathBuf,
    /// File stem, used to name the thumbnail (`{name}_thumbnail.jpg`).
    pub display_name: String,
    /// Name of the immediate parent directory.
    pub folder_key: String,
}

impl ImageRecord {
    /// Build a record from a file path. Returns `None` for paths without a
    /// file name (e.g. `..`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let display_name = path.file_stem()?.to_string_lossy().into_owned();
        let folder_key = path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Some(Self {
            source_path: path.to_path_buf(),
            display_name,
            folder_key,
        })
    }
}

/// Ordered multimap `folder key → items`.
///
/// Keys keep their first-insertion order, which is the page order of the
/// final document. Items keep their push order inside each folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderGroups<T> {
    groups: IndexMap<String, Vec<T>>,
}

impl<T> Default for FolderGroups<T> {
    fn default() -> Self {
        Self {
            groups: IndexMap::new(),
        }
    }
}

impl<T> FolderGroups<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` to the folder `key`, creating the folder at the end of
    /// the order if it is new.
    pub fn push(&mut self, key: impl Into<String>, item: T) {
        self.groups.entry(key.into()).or_default().push(item);
    }

    /// Register a folder without items. Existing folders are left untouched.
    pub fn insert_folder(&mut self, key: impl Into<String>) {
        self.groups.entry(key.into()).or_default();
    }

    /// Number of folders.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of items across all folders.
    pub fn item_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, key: &str) -> Option<&[T]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Folders in page order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// All items, folder by folder. This is the order the paginator numbers
    /// them in.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.groups.values().flatten()
    }

    /// Convert every item in order, stopping at the first error.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(&T) -> Result<U, E>,
    ) -> Result<FolderGroups<U>, E> {
        let mut out = FolderGroups::new();
        for (key, items) in &self.groups {
            out.insert_folder(key.clone());
            for item in items {
                out.push(key.clone(), f(item)?);
            }
        }
        Ok(out)
    }
}

/// Files before directories, then by name. Mirrors a top-down walk that
/// handles a directory's own files before descending.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir
        .cmp(&b_dir)
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Recursively collect every regular file under `root`, grouped by parent
/// directory name.
///
/// Unreadable entries are logged and skipped; a missing root yields an
/// empty result.
pub fn scan_directory(root: &Path) -> FolderGroups<ImageRecord> {
    let mut groups = FolderGroups::new();

    for entry in WalkDir::new(root).sort_by(files_first) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry under '{}': {e}", root.display());
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(record) = ImageRecord::from_path(path) {
            log::debug!(
                "Found '{}' in folder '{}'",
                record.source_path.display(),
                record.folder_key
            );
            groups.push(record.folder_key.clone(), record);
        }
    }

    log::info!(
        "Scanned '{}': {} file(s) in {} folder(s)",
        root.display(),
        groups.item_count(),
        groups.len()
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn record_from_path() {
        let rec = ImageRecord::from_path(Path::new("image/Trip/beach.jpeg")).unwrap();
        assert_eq!(rec.display_name, "beach");
        assert_eq!(rec.folder_key, "Trip");
    }

    #[test]
    fn groups_keep_first_insertion_order() {
        let mut groups = FolderGroups::new();
        groups.push("B", 1);
        groups.push("A", 2);
        groups.push("B", 3);
        groups.insert_folder("C");

        let keys: Vec<&str> = groups.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
        assert_eq!(groups.get("B"), Some(&[1, 3][..]));
        assert_eq!(groups.get("C"), Some(&[][..]));
        assert_eq!(groups.item_count(), 3);
        assert_eq!(groups.items().copied().collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[test]
    fn try_map_preserves_empty_folders() {
        let mut groups = FolderGroups::new();
        groups.insert_folder("empty");
        groups.push("full", 2);

        let mapped: FolderGroups<i32> = groups.try_map(|n| Ok::<_, ()>(n * 10)).unwrap();
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped.get("empty"), Some(&[][..]));
        assert_eq!(mapped.get("full"), Some(&[20][..]));
    }

    #[test]
    fn scan_groups_by_parent_folder() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("B")).unwrap();
        fs::create_dir_all(root.join("A/nested")).unwrap();
        fs::write(root.join("B/3.jpg"), b"x").unwrap();
        fs::write(root.join("A/2.jpg"), b"x").unwrap();
        fs::write(root.join("A/1.jpg"), b"x").unwrap();
        fs::write(root.join("A/nested/4.jpg"), b"x").unwrap();

        let groups = scan_directory(root);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "nested", "B"]);

        let names: Vec<&str> = groups
            .get("A")
            .unwrap()
            .iter()
            .map(|r| r.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["1", "2"]);
    }

    #[test]
    fn files_directly_under_root_use_the_root_name() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("image");
        fs::create_dir_all(root.join("Trip")).unwrap();
        fs::write(root.join("cover.jpg"), b"x").unwrap();
        fs::write(root.join("Trip/beach.jpg"), b"x").unwrap();

        let groups = scan_directory(&root);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["image", "Trip"]);
        assert_eq!(groups.get("image").unwrap()[0].display_name, "cover");

        // A trailing separator on the root does not change the key.
        let groups = scan_directory(&dir.path().join("image/"));
        assert!(groups.get("image").is_some());
    }

    #[test]
    fn scan_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let groups = scan_directory(&dir.path().join("does-not-exist"));
        assert!(groups.is_empty());
    }
}
