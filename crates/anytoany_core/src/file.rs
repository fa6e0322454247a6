use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a selected file's bytes live.
///
/// Disk-backed files are read lazily when the upload is built, the way a
/// browser `File` handle is only read when the form is sent.
#[derive(Clone, PartialEq, Eq)]
pub enum FileData {
    Disk(PathBuf),
    Memory(Arc<[u8]>),
}

impl fmt::Debug for FileData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileData::Disk(path) => f.debug_tuple("Disk").field(path).finish(),
            FileData::Memory(bytes) => write!(f, "Memory({} bytes)", bytes.len()),
        }
    }
}

/// An opaque file-like entry staged for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub data: FileData,
}

impl SelectedFile {
    /// A file backed by a path; the display name is the final path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            data: FileData::Disk(path),
        }
    }

    pub fn in_memory(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            data: FileData::Memory(bytes.into()),
        }
    }
}
