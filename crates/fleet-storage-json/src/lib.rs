use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use fleet_core::{storage::SnapshotStore, CoreError};

const SNAPSHOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed snapshot store: one `<key>.json` document per key.
///
/// Writes go to a sibling `.json.tmp` file which is then renamed over the
/// target, so a crash mid-write never leaves a half-written snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    root: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn snapshot_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), SNAPSHOT_EXTENSION))
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.snapshot_path(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(CoreError::Storage(format!(
                "failed to read `{}`: {err}",
                path.display()
            ))),
        }
    }

    fn write(&self, key: &str, data: &str) -> Result<(), CoreError> {
        let path = self.snapshot_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, data)
            .and_then(|_| fs::rename(&tmp, &path).map_err(CoreError::from))
            .map_err(|err| {
                let _ = fs::remove_file(&tmp);
                CoreError::Storage(format!("failed to write `{}`: {err}", path.display()))
            })?;
        tracing::debug!(path = %path.display(), "snapshot persisted");
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "snapshot".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
