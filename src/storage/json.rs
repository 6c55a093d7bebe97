use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::error::StorageError;

/// Read a JSON value from `path`.
///
/// A missing, unreadable or corrupt file yields `T::default()`; prior data in
/// a corrupt file is dropped.
pub fn load_json<T, P>(path: P) -> T
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "data file missing, starting empty");
            return T::default();
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read data file, starting empty");
            return T::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "corrupt data file, starting empty");
        T::default()
    })
}

/// Write `value` to `path` as pretty-printed UTF-8 JSON, creating parent
/// directories as needed.
pub fn save_json<T, P>(path: P, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A username-keyed map held in memory and flushed to one JSON file after
/// every change. Without a path it never touches the disk.
#[derive(Debug)]
pub(crate) struct JsonMap<V> {
    path: Option<PathBuf>,
    entries: BTreeMap<String, V>,
}

impl<V> JsonMap<V>
where
    V: Serialize + DeserializeOwned,
{
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_json(&path);
        Self {
            path: Some(path),
            entries,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: BTreeMap::new(),
        }
    }

    pub fn entries(&self) -> &BTreeMap<String, V> {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut BTreeMap<String, V> {
        &mut self.entries
    }

    pub fn flush(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        save_json(path, &self.entries).inspect_err(|err| {
            error!(path = %path.display(), error = %err, "failed to write data file");
        })
    }
}
