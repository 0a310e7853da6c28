//! Durable key-value storage for list controls.
//!
//! Each control lives under its own key as a JSON-serialized value, so a
//! store can be backed by anything that holds strings. Values that are
//! missing or fail to parse fall back to the control's default.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::filters::{DistanceFilter, FilterState, SortField, StatusFilter, UnknownOption};

pub const KEY_FILTER: &str = "filter";
pub const KEY_SORT: &str = "sort";
pub const KEY_DISTANCE_FILTER: &str = "distanceFilter";
pub const KEY_STATUS_FILTER: &str = "statusFilter";

pub const KEYS: [&str; 4] = [KEY_FILTER, KEY_SORT, KEY_DISTANCE_FILTER, KEY_STATUS_FILTER];

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown preference \"{0}\"; expected one of: filter, sort, distanceFilter, statusFilter")]
    UnknownKey(String),

    #[error(transparent)]
    InvalidValue(#[from] UnknownOption),

    #[error("could not encode preference {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage with immediate writes.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, durably before returning.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] when the backing storage cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), PreferenceError>;
}

/// In-process store, lost on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store persisted as one JSON object in a file, replaced atomically on
/// every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing, empty or unparsable file is an
    /// empty store; the next write replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Io`] if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring unreadable preference file"
                );
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PreferenceError::Io { path, source }),
        };
        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PreferenceError> {
        let io_err = |source: io::Error| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let body = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            PreferenceError::Encode {
                key: "*".to_string(),
                source,
            }
        })?;
        let staging = self.staging_path();
        fs::write(&staging, body).map_err(io_err)?;
        fs::rename(&staging, &self.path).map_err(io_err)
    }

    /// Sibling file written first, then renamed over the store.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

fn read_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: PreferenceStore,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::debug!(key, raw = %raw, error = %e, "ignoring unreadable preference");
        T::default()
    })
}

fn write<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), PreferenceError>
where
    T: Serialize,
    S: PreferenceStore,
{
    let encoded = serde_json::to_string(value).map_err(|source| PreferenceError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, encoded)
}

/// [`FilterState`] backed by a [`PreferenceStore`]: rehydrated on load,
/// written through on every change.
#[derive(Debug, Clone)]
pub struct Preferences<S> {
    store: S,
    state: FilterState,
}

impl<S: PreferenceStore> Preferences<S> {
    /// Rehydrates each control from `store`, defaulting where absent.
    pub fn load(store: S) -> Self {
        let state = FilterState {
            text: read_or_default::<String, _>(&store, KEY_FILTER),
            status: read_or_default::<StatusFilter, _>(&store, KEY_STATUS_FILTER),
            max_distance: read_or_default::<DistanceFilter, _>(&store, KEY_DISTANCE_FILTER),
            sort: read_or_default::<SortField, _>(&store, KEY_SORT),
        };
        Self { store, state }
    }

    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the new value cannot be persisted; the
    /// in-memory state is updated regardless.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), PreferenceError> {
        self.state.text = text.into();
        write(&mut self.store, KEY_FILTER, &self.state.text)
    }

    /// # Errors
    ///
    /// See [`Preferences::set_text`].
    pub fn set_sort(&mut self, sort: SortField) -> Result<(), PreferenceError> {
        self.state.sort = sort;
        write(&mut self.store, KEY_SORT, &sort)
    }

    /// # Errors
    ///
    /// See [`Preferences::set_text`].
    pub fn set_max_distance(
        &mut self,
        max_distance: DistanceFilter,
    ) -> Result<(), PreferenceError> {
        self.state.max_distance = max_distance;
        write(&mut self.store, KEY_DISTANCE_FILTER, &max_distance)
    }

    /// # Errors
    ///
    /// See [`Preferences::set_text`].
    pub fn set_status(&mut self, status: StatusFilter) -> Result<(), PreferenceError> {
        self.state.status = status;
        write(&mut self.store, KEY_STATUS_FILTER, &status)
    }

    /// Sets the control stored under `key` from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::UnknownKey`] or
    /// [`PreferenceError::InvalidValue`] without touching the state when
    /// `key` or `value` is outside its allowed set.
    pub fn set_raw(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        match key {
            KEY_FILTER => self.set_text(value),
            KEY_SORT => self.set_sort(value.parse()?),
            KEY_DISTANCE_FILTER => self.set_max_distance(value.parse()?),
            KEY_STATUS_FILTER => self.set_status(value.parse()?),
            other => Err(PreferenceError::UnknownKey(other.to_string())),
        }
    }

    /// Current value of each control in its textual form, in key order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, String); 4] {
        [
            (KEY_FILTER, self.state.text.clone()),
            (KEY_SORT, self.state.sort.to_string()),
            (KEY_DISTANCE_FILTER, self.state.max_distance.to_string()),
            (KEY_STATUS_FILTER, self.state.status.to_string()),
        ]
    }
}
