//! Directory entries and the filesystem helpers shared by the vault,
//! the shell and the logout sweep.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Whether a path is a regular file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    /// Capitalized tag used in listings ("File", "Folder").
    pub fn label(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Folder => "Folder",
        }
    }

    /// Lowercase noun used in messages ("file", "folder").
    pub fn noun(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl fmt::Display for VaultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.name)
    }
}

/// List the immediate children of `dir`, sorted by name.
///
/// Anything that resolves to a directory is a folder; everything else
/// (files, sockets, dangling links) is listed as a file.
pub fn list_directory(dir: &Path) -> io::Result<Vec<VaultEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let kind = if entry.path().is_dir() {
            EntryKind::Folder
        } else {
            EntryKind::File
        };
        entries.push(VaultEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Remove `path`: folders recursively, anything else (including
/// symlinks, which are never followed) as a single file.
pub fn remove_item(path: &Path) -> io::Result<EntryKind> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)?;
        Ok(EntryKind::Folder)
    } else {
        fs::remove_file(path)?;
        Ok(EntryKind::File)
    }
}
