//! In-terminal file picker.
//!
//! A minimal directory browser: arrow keys move, Enter descends into a
//! directory or selects a file, Backspace goes to the parent. The terminal
//! analog of the original drag-and-drop / click-to-browse file selection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One row in the picker listing.
#[derive(Debug, Clone)]
pub struct PickEntry {
    /// Display name (file or directory name).
    pub name: String,
    /// Absolute path of the entry.
    pub path: PathBuf,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// Directory browser state.
#[derive(Debug)]
pub struct FilePicker {
    /// Directory currently being listed.
    pub cwd: PathBuf,
    /// Entries of `cwd`, directories first, each group sorted by name.
    pub entries: Vec<PickEntry>,
    /// Index of the highlighted entry.
    pub cursor: usize,
}

impl FilePicker {
    /// Open a picker rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let mut picker = Self {
            cwd: dir.into(),
            entries: Vec::new(),
            cursor: 0,
        };
        picker.refresh()?;
        Ok(picker)
    }

    /// Re-read the current directory.
    fn refresh(&mut self) -> io::Result<()> {
        self.entries = read_entries(&self.cwd)?;
        self.cursor = 0;
        Ok(())
    }

    /// Move the highlight up one row.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the highlight down one row.
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Act on the highlighted entry: descend into a directory (returning
    /// `None`) or select a file (returning its path).
    pub fn enter(&mut self) -> io::Result<Option<PathBuf>> {
        let Some(entry) = self.entries.get(self.cursor) else {
            return Ok(None);
        };
        if entry.is_dir {
            self.cwd = entry.path.clone();
            self.refresh()?;
            Ok(None)
        } else {
            Ok(Some(entry.path.clone()))
        }
    }

    /// Go to the parent directory, if there is one.
    pub fn ascend(&mut self) -> io::Result<()> {
        if let Some(parent) = self.cwd.parent().map(Path::to_path_buf) {
            self.cwd = parent;
            self.refresh()?;
        }
        Ok(())
    }
}

fn read_entries(dir: &Path) -> io::Result<Vec<PickEntry>> {
    let mut entries: Vec<PickEntry> = fs::read_dir(dir)?
        .filter_map(|res| res.ok())
        .filter_map(|item| {
            let path = item.path();
            let name = item.file_name().to_string_lossy().into_owned();
            // Hidden files are noise in a document picker.
            if name.starts_with('.') {
                return None;
            }
            let is_dir = item.file_type().ok()?.is_dir();
            Some(PickEntry { name, path, is_dir })
        })
        .collect();

    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then(a.name.cmp(&b.name)));
    Ok(entries)
}
