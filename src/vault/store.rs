//! High-level vault operations used by the session menu.
//!
//! `VaultStore` is scoped to one root directory. Every mutating or
//! disclosing method takes an `Authorization` by value, so it cannot be
//! called without a fresh successful password check. On success each
//! one records an audit entry and, when it creates something, registers
//! the new path with the session tracker.

use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::Settings;
use crate::errors::{DarkRelmError, Result};
use crate::session::{Authorization, SessionContext};

use super::entry::{list_directory, remove_item, EntryKind, VaultEntry};

/// Outcome of a best-effort import: moved items and per-item failures.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub moved: Vec<String>,
    pub failed: Vec<(String, DarkRelmError)>,
}

/// Handle on the vault directory.
pub struct VaultStore {
    /// Absolute path to the vault root.
    root: PathBuf,

    /// Entry names that import never touches (vault root, history file
    /// and its temp sibling, config file).
    import_skip_names: Vec<OsString>,

    /// Extensions (no dot) that import never touches.
    import_skip_extensions: Vec<String>,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// A store rooted at `root`. Import skips only the root itself.
    pub fn new(root: PathBuf) -> Self {
        let import_skip_names = root.file_name().map(OsString::from).into_iter().collect();
        Self {
            root,
            import_skip_names,
            import_skip_extensions: Vec::new(),
        }
    }

    /// A store laid out by `settings` under the working directory `cwd`.
    ///
    /// Import leaves DarkRelm's own files in `cwd` alone: the history
    /// file, its rewrite temp file, the default config file, and the
    /// config file the settings were loaded from when it lives in `cwd`.
    pub fn from_settings(settings: &Settings, cwd: &Path) -> Self {
        let mut store = Self::new(settings.vault_root(cwd));
        store.import_skip_names.extend([
            OsString::from(&settings.history_file),
            OsString::from(format!(".{}.tmp", settings.history_file)),
            OsString::from(Settings::FILE_NAME),
        ]);
        if let Some(source) = &settings.source {
            if source.parent() == Some(cwd) {
                if let Some(name) = source.file_name() {
                    store.import_skip_names.push(name.to_os_string());
                }
            }
        }
        store.import_skip_extensions = settings.import_skip_extensions.clone();
        store
    }

    /// Create the vault root if it is missing.
    ///
    /// Not gated. Returns `true` and tracks the root only when this call
    /// created it.
    pub fn initialize(&self, ctx: &mut SessionContext) -> Result<bool> {
        if self.root.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.root)?;
        ctx.tracker_mut().register(self.root.clone());
        tracing::debug!(root = %self.root.display(), "vault created");
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Gated operations
    // ------------------------------------------------------------------

    /// Create `root/name` (and any missing parents). Existing folders are fine.
    pub fn create_folder(
        &self,
        _auth: Authorization,
        ctx: &mut SessionContext,
        name: &str,
    ) -> Result<PathBuf> {
        let path = self.item_path(name)?;
        fs::create_dir_all(&path)?;

        ctx.tracker_mut().register(path.clone());
        ctx.record(&format!("Created folder '{name}' in vault"));
        Ok(path)
    }

    /// Write `content` to `root/name`, replacing any existing file.
    pub fn create_file(
        &self,
        _auth: Authorization,
        ctx: &mut SessionContext,
        name: &str,
        content: &str,
    ) -> Result<PathBuf> {
        let path = self.item_path(name)?;
        fs::write(&path, content)?;

        ctx.tracker_mut().register(path.clone());
        ctx.record(&format!("Created file '{name}' in vault"));
        Ok(path)
    }

    /// Remove `root/name`, recursively if it is a folder, and stop
    /// tracking it.
    pub fn delete_item(
        &self,
        _auth: Authorization,
        ctx: &mut SessionContext,
        name: &str,
    ) -> Result<EntryKind> {
        let path = self.item_path(name)?;
        if fs::symlink_metadata(&path).is_err() {
            return Err(DarkRelmError::NotFound(format!("Item '{name}'")));
        }

        let kind = remove_item(&path)?;

        ctx.tracker_mut().unregister(&path);
        let verb = match kind {
            EntryKind::File => "Deleted file",
            EntryKind::Folder => "Deleted folder",
        };
        ctx.record(&format!("{verb} '{name}' from vault"));
        Ok(kind)
    }

    /// Return the full contents of the regular file `root/name`.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn view_file(
        &self,
        _auth: Authorization,
        ctx: &mut SessionContext,
        name: &str,
    ) -> Result<String> {
        let path = self.item_path(name)?;
        if !path.is_file() {
            return Err(DarkRelmError::NotFound(format!("File '{name}'")));
        }

        let bytes = fs::read(&path)?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        ctx.record(&format!("Viewed file '{name}'"));
        Ok(content)
    }

    /// Move every eligible entry of `source_dir` into the vault.
    ///
    /// Skips the vault root, the history file and configured script
    /// extensions. Best-effort: a failed move is reported and the scan
    /// continues; items already moved stay moved.
    pub fn import_external_items(
        &self,
        _auth: Authorization,
        ctx: &mut SessionContext,
        source_dir: &Path,
    ) -> Result<ImportReport> {
        let mut candidates: Vec<OsString> = fs::read_dir(source_dir)?
            .filter_map(|e| e.ok().map(|e| e.file_name()))
            .filter(|name| !self.is_import_excluded(name))
            .collect();
        candidates.sort();

        let mut report = ImportReport::default();
        for name in candidates {
            let item = name.to_string_lossy().into_owned();
            let src = source_dir.join(&name);
            let dst = self.root.join(&name);

            match fs::rename(&src, &dst) {
                Ok(()) => {
                    ctx.tracker_mut().register(dst);
                    ctx.record(&format!("Moved download '{item}' to vault"));
                    report.moved.push(item);
                }
                Err(e) => {
                    tracing::warn!(item = %item, error = %e, "import skipped item");
                    report.failed.push((item, DarkRelmError::Io(e)));
                }
            }
        }

        Ok(report)
    }

    // ------------------------------------------------------------------
    // Ungated
    // ------------------------------------------------------------------

    /// Immediate children of the vault root.
    pub fn list_contents(&self) -> Result<Vec<VaultEntry>> {
        Ok(list_directory(&self.root)?)
    }

    /// Returns the vault root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Resolve `name` to an item strictly below the root, refusing
    /// anything that could escape it (absolute paths, `..`) or that
    /// names the root itself (empty, `.`).
    fn item_path(&self, name: &str) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for component in Path::new(name.trim()).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                _ => return Err(DarkRelmError::InvalidName(name.to_string())),
            }
        }
        if path == self.root {
            return Err(DarkRelmError::InvalidName(name.to_string()));
        }

        Ok(path)
    }

    fn is_import_excluded(&self, name: &OsString) -> bool {
        if self.import_skip_names.iter().any(|n| n == name) {
            return true;
        }
        Path::new(name)
            .extension()
            .map(|ext| {
                self.import_skip_extensions
                    .iter()
                    .any(|skip| ext == skip.as_str())
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{open_storage, AuditLog};
    use crate::config::AuditBackend;
    use tempfile::TempDir;
    use zeroize::Zeroizing;

    fn setup(dir: &TempDir) -> (VaultStore, SessionContext) {
        let settings = Settings::default();
        let audit = AuditLog::new(open_storage(
            AuditBackend::JsonArray,
            settings.history_path(dir.path()),
        ));
        let mut ctx = SessionContext::new("neo", Zeroizing::new("pw".into()), audit);
        let store = VaultStore::from_settings(&settings, dir.path());
        store.initialize(&mut ctx).unwrap();
        (store, ctx)
    }

    #[test]
    fn initialize_tracks_root_only_when_created() {
        let dir = TempDir::new().unwrap();
        let (store, mut ctx) = setup(&dir);
        assert!(store.root().is_dir());
        assert!(ctx.tracker().contains(store.root()));

        ctx.tracker_mut().clear();
        assert!(!store.initialize(&mut ctx).unwrap());
        assert!(ctx.tracker().is_empty());
    }

    #[test]
    fn item_names_cannot_escape_root() {
        let dir = TempDir::new().unwrap();
        let (store, mut ctx) = setup(&dir);

        for bad in ["", "  ", ".", "./", "./.", "../x", "/etc/passwd", "a/../../b"] {
            let auth = ctx.authorize("pw").unwrap();
            let err = store.create_file(auth, &mut ctx, bad, "x").unwrap_err();
            assert!(matches!(err, DarkRelmError::InvalidName(_)), "{bad}");
        }
    }

    #[test]
    fn create_folder_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let (store, mut ctx) = setup(&dir);

        let auth = ctx.authorize("pw").unwrap();
        let first = store.create_folder(auth, &mut ctx, "notes").unwrap();
        let auth = ctx.authorize("pw").unwrap();
        let second = store.create_folder(auth, &mut ctx, "notes").unwrap();

        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn create_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let (store, mut ctx) = setup(&dir);

        let auth = ctx.authorize("pw").unwrap();
        store.create_file(auth, &mut ctx, "s.txt", "one").unwrap();
        let auth = ctx.authorize("pw").unwrap();
        let path = store.create_file(auth, &mut ctx, "s.txt", "two").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "two");
    }

    #[test]
    fn view_file_rejects_folders() {
        let dir = TempDir::new().unwrap();
        let (store, mut ctx) = setup(&dir);

        let auth = ctx.authorize("pw").unwrap();
        store.create_folder(auth, &mut ctx, "notes").unwrap();
        let before = ctx.history().unwrap().len();

        let auth = ctx.authorize("pw").unwrap();
        let err = store.view_file(auth, &mut ctx, "notes").unwrap_err();
        assert!(matches!(err, DarkRelmError::NotFound(_)));
        assert_eq!(ctx.history().unwrap().len(), before);
    }

    #[test]
    fn delete_folder_logs_folder_kind() {
        let dir = TempDir::new().unwrap();
        let (store, mut ctx) = setup(&dir);

        let auth = ctx.authorize("pw").unwrap();
        store.create_folder(auth, &mut ctx, "box").unwrap();
        let auth = ctx.authorize("pw").unwrap();
        let kind = store.delete_item(auth, &mut ctx, "box").unwrap();

        assert_eq!(kind, EntryKind::Folder);
        let last = ctx.history().unwrap().pop().unwrap();
        assert_eq!(last.description, "Deleted folder 'box' from vault");
    }

    #[test]
    fn import_skips_root_history_and_scripts() {
        let dir = TempDir::new().unwrap();
        let (store, mut ctx) = setup(&dir);
        fs::write(dir.path().join("loot.bin"), "l").unwrap();
        fs::write(dir.path().join("tool.py"), "print()").unwrap();
        fs::create_dir(dir.path().join("drop")).unwrap();

        let auth = ctx.authorize("pw").unwrap();
        store.create_file(auth, &mut ctx, "seed.txt", "s").unwrap();
        assert!(dir.path().join("darkrelm_history.json").exists());

        let auth = ctx.authorize("pw").unwrap();
        let report = store
            .import_external_items(auth, &mut ctx, dir.path())
            .unwrap();

        assert_eq!(report.moved, vec!["drop", "loot.bin"]);
        assert!(report.failed.is_empty());
        assert!(dir.path().join("tool.py").exists());
        assert!(dir.path().join("darkrelm_history.json").exists());
        assert!(store.root().join("loot.bin").exists());
        assert!(ctx.tracker().contains(&store.root().join("drop")));
    }

    #[test]
    fn dot_names_never_reach_the_root() {
        let dir = TempDir::new().unwrap();
        let (store, mut ctx) = setup(&dir);
        let auth = ctx.authorize("pw").unwrap();
        let keep = store.create_file(auth, &mut ctx, "keep.txt", "k").unwrap();
        let entries = ctx.history().unwrap().len();

        for name in [".", "./", "./."] {
            let auth = ctx.authorize("pw").unwrap();
            let err = store.delete_item(auth, &mut ctx, name).unwrap_err();
            assert!(matches!(err, DarkRelmError::InvalidName(_)), "{name}");
            let auth = ctx.authorize("pw").unwrap();
            assert!(store.view_file(auth, &mut ctx, name).is_err());
        }

        assert!(keep.exists());
        assert!(ctx.tracker().contains(&keep));
        assert_eq!(ctx.history().unwrap().len(), entries);
    }

    #[test]
    fn nested_relative_names_stay_allowed() {
        let dir = TempDir::new().unwrap();
        let (store, mut ctx) = setup(&dir);
        let auth = ctx.authorize("pw").unwrap();
        store.create_folder(auth, &mut ctx, "notes").unwrap();

        let auth = ctx.authorize("pw").unwrap();
        let path = store
            .create_file(auth, &mut ctx, "./notes/a.txt", "x")
            .unwrap();
        assert_eq!(path, store.root().join("notes/a.txt"));
    }

    #[test]
    fn import_leaves_darkrelm_files_in_place() {
        let dir = TempDir::new().unwrap();
        let alt = dir.path().join("alt.toml");
        fs::write(dir.path().join(".darkrelm.toml"), "").unwrap();
        fs::write(&alt, "vault_dir = \"dark-relm-vault\"\n").unwrap();
        fs::write(dir.path().join(".darkrelm_history.json.tmp"), "[]").unwrap();
        fs::write(dir.path().join("loot.bin"), "l").unwrap();

        let settings = Settings::load_file(&alt).unwrap();
        let audit = AuditLog::new(open_storage(
            AuditBackend::JsonArray,
            settings.history_path(dir.path()),
        ));
        let mut ctx = SessionContext::new("neo", Zeroizing::new("pw".into()), audit);
        let store = VaultStore::from_settings(&settings, dir.path());
        store.initialize(&mut ctx).unwrap();

        let auth = ctx.authorize("pw").unwrap();
        let report = store
            .import_external_items(auth, &mut ctx, dir.path())
            .unwrap();
        ctx.cleanup();

        assert_eq!(report.moved, vec!["loot.bin"]);
        assert!(dir.path().join(".darkrelm.toml").exists());
        assert!(alt.exists());
        assert!(dir.path().join(".darkrelm_history.json.tmp").exists());
    }

    #[test]
    fn import_reports_failed_items_and_continues() {
        let dir = TempDir::new().unwrap();
        let (store, mut ctx) = setup(&dir);
        fs::create_dir_all(store.root().join("clash/inner")).unwrap();
        fs::write(dir.path().join("clash"), "c").unwrap();
        fs::write(dir.path().join("zeta.bin"), "z").unwrap();

        let auth = ctx.authorize("pw").unwrap();
        let report = store
            .import_external_items(auth, &mut ctx, dir.path())
            .unwrap();

        assert_eq!(report.moved, vec!["zeta.bin"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "clash");
        assert!(matches!(report.failed[0].1, DarkRelmError::Io(_)));
        assert!(dir.path().join("clash").exists());
        assert_eq!(ctx.history().unwrap().len(), 1);
    }
}
