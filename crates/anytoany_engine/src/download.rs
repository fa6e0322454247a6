use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anytoany_core::DEFAULT_DOWNLOAD_STEM;
use convert_logging::{convert_debug, convert_info};
use tempfile::NamedTempFile;

use crate::SaveError;

const MAX_NAME_ATTEMPTS: usize = 1000;

/// Ensure the download directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), SaveError> {
    let unusable = |reason: String| SaveError::OutputDir {
        dir: dir.to_path_buf(),
        reason,
    };
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| unusable(e.to_string()))?;
        if !meta.is_dir() {
            return Err(unusable("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| unusable(e.to_string()))?;
    }
    Ok(())
}

/// Reduces a server-suggested name to a single safe path component.
///
/// Directory parts are dropped, characters Windows forbids become `_`, and
/// reserved device names get a trailing `_`. An empty result falls back to
/// the default download stem.
pub fn sanitize_filename(suggested: &str) -> String {
    let last = suggested
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(suggested);
    let cleaned: String = last
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let mut name = cleaned.trim_matches(&[' ', '.'][..]).to_string();
    if name.is_empty() {
        name = DEFAULT_DOWNLOAD_STEM.to_string();
    }
    let stem = name.split('.').next().unwrap_or(&name);
    if is_reserved_windows_name(stem) {
        name.insert(stem.len(), '_');
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

/// `photo.png` -> `photo (2).png`; `archive` -> `archive (2)`.
fn numbered_name(name: &str, n: usize) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({n}){}", &name[..dot], &name[dot..]),
        _ => format!("{name} ({n})"),
    }
}

/// Materializes converted payloads in the download directory.
///
/// Bytes are staged in a temporary file next to the target and only then
/// given their final name, so a failed write never leaves a partial download.
/// Existing files are never overwritten.
pub struct ArtifactSaver {
    dir: PathBuf,
}

impl ArtifactSaver {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, suggested: &str, bytes: &[u8]) -> Result<PathBuf, SaveError> {
        ensure_output_dir(&self.dir)?;

        let name = sanitize_filename(suggested);
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(bytes)?;
        staged.flush()?;
        staged.as_file_mut().sync_all()?;
        convert_debug!("Staged {} bytes at {:?}", bytes.len(), staged.path());

        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let candidate = if attempt == 1 {
                name.clone()
            } else {
                numbered_name(&name, attempt)
            };
            let target = self.dir.join(&candidate);
            match staged.persist_noclobber(&target) {
                Ok(_) => {
                    convert_info!("Saved download {:?} ({} bytes)", target, bytes.len());
                    return Ok(target);
                }
                Err(err) if err.error.kind() == std::io::ErrorKind::AlreadyExists => {
                    staged = err.file;
                }
                Err(err) => return Err(SaveError::Io(err.error)),
            }
        }
        // `staged` drops here and removes the temporary file.
        Err(SaveError::NameExhausted(name))
    }
}
