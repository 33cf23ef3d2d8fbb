// File: src/persistence.rs
use crate::core::data::NameData;
use crate::error::{GenderError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes a compiled snapshot of `data` to `path`.
/// The file is replaced atomically, so readers never see a partial snapshot.
pub fn save_snapshot(data: &NameData, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| GenderError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| GenderError::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, data)?;
        writer.flush().map_err(|e| GenderError::io(path, e))?;
    }

    temp_file.persist(path).map_err(|e| GenderError::io(path, e.error))?;
    tracing::info!(path = %path.display(), "saved name snapshot");
    Ok(())
}

/// Restores a snapshot written by [`save_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<NameData> {
    let file = File::open(path).map_err(|e| GenderError::io(path, e))?;
    let data: NameData = bincode::deserialize_from(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        countries = data.tables.len(),
        dictionary_names = data.dictionary.len(),
        "loaded name snapshot"
    );
    Ok(data)
}
