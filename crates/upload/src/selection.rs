//! File selection for one upload session.
//!
//! Files are appended in the order they are picked and get a fresh
//! [`FileId`] each. Directories are walked recursively.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::UploadError;
use crate::types::{FileFingerprint, FileId, SelectedFile};

/// Ordered list of selected files.
#[derive(Debug, Default)]
pub struct FileSelection {
    files: Vec<SelectedFile>,
    next_id: u64,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single regular file.
    pub fn add_path(&mut self, path: &Path) -> Result<FileId, UploadError> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(UploadError::Validation(format!(
                "not a regular file: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                UploadError::Validation(format!("path has no file name: {}", path.display()))
            })?;

        Ok(self.push(path.to_path_buf(), name, metadata.len()))
    }

    /// Adds several files, stopping at the first unreadable one.
    ///
    /// Files added before the failure stay selected.
    pub fn add_paths<P: AsRef<Path>>(
        &mut self,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<Vec<FileId>, UploadError> {
        paths
            .into_iter()
            .map(|p| self.add_path(p.as_ref()))
            .collect()
    }

    /// Adds every regular file under `root`, in sorted path order.
    pub fn add_dir(&mut self, root: &Path) -> Result<Vec<FileId>, UploadError> {
        let mut found = Vec::new();
        walk_dir(root, &mut found)?;
        found.sort();
        self.add_paths(found)
    }

    /// Removes the file at `index`. Returns `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<SelectedFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&SelectedFile> {
        self.files.get(index)
    }

    pub fn find(&self, id: FileId) -> Option<&SelectedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedFile> {
        self.files.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = FileId> + '_ {
        self.files.iter().map(|f| f.id)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Empties the selection. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Groups of files sharing a `(name, size)` fingerprint, in selection order.
    pub fn duplicates(&self) -> Vec<Vec<FileId>> {
        let mut groups: HashMap<FileFingerprint, Vec<FileId>> = HashMap::new();
        for file in &self.files {
            groups.entry(file.fingerprint()).or_default().push(file.id);
        }
        let mut dups: Vec<Vec<FileId>> = groups.into_values().filter(|g| g.len() > 1).collect();
        dups.sort();
        dups
    }

    fn push(&mut self, path: PathBuf, name: String, size: u64) -> FileId {
        let id = FileId(self.next_id);
        self.next_id += 1;
        self.files.push(SelectedFile {
            id,
            path,
            name,
            size,
        });
        id
    }
}

fn walk_dir(current: &Path, found: &mut Vec<PathBuf>) -> Result<(), UploadError> {
    for entry in std::fs::read_dir(current)? {
        let entry = entry?;
        let path = entry.path();
        let metadata = entry.metadata()?;

        if metadata.is_dir() {
            walk_dir(&path, found)?;
        } else if metadata.is_file() {
            found.push(path);
        }
    }
    Ok(())
}
