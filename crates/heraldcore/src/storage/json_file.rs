//! Whole-file JSON persistence shared by every store.
//!
//! Files are read in full on each operation and rewritten through a sibling
//! temp file + rename, so a crash mid-write never leaves a truncated file.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::AppResult;

/// Reads and parses `path`, or returns `None` if it does not exist.
pub fn read_optional<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
    match fs_err::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Reads and parses `path`, falling back to `T::default()` if it does not exist.
pub fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> AppResult<T> {
    Ok(read_optional(path)?.unwrap_or_default())
}

/// Serializes `value` with four-space indentation and atomically replaces `path`.
pub fn write_atomic<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    buf.push(b'\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    {
        let mut file = fs_err::File::create(&tmp)?;
        file.write_all(&buf)?;
        file.sync_all()?;
    }
    fs_err::rename(&tmp, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
