use crate::error::AppError;
use crate::models::Database;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Single JSON document on disk. Writers are serialized by `write_lock`;
/// readers go straight to the file, which is only ever replaced by rename.
pub struct Store {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl Store {
    /// Opens the store, seeding an empty document if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let store = Store {
            path,
            write_lock: Mutex::new(()),
        };
        if !store.path.exists() {
            store.save(&Database::default())?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current document for readers. Any failure reads as empty.
    pub fn read(&self) -> Database {
        self.load().unwrap_or_else(|e| {
            log::warn!("cannot read {}: {}; using empty document", self.path.display(), e);
            Database::default()
        })
    }

    /// Current document for writers. A missing or unparseable file is empty,
    /// but any other I/O failure is an error so a write never replaces data
    /// it could not see.
    pub fn load(&self) -> Result<Database, AppError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Database::default()),
            Err(e) => return Err(AppError::Storage(e)),
        };
        match serde_json::from_slice(&bytes) {
            Ok(db) => Ok(db),
            Err(e) => {
                log::warn!("corrupt document at {}: {}; using empty document", self.path.display(), e);
                Ok(Database::default())
            }
        }
    }

    /// Load, apply `f`, save; all under the process-wide write lock.
    pub fn mutate<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Database) -> T,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::Internal("store lock poisoned".into()))?;
        let mut db = self.load()?;
        let result = f(&mut db);
        self.save(&db)?;
        Ok(result)
    }

    fn save(&self, db: &Database) -> Result<(), AppError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, db)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
