//! Where dump lines come from
//!
//! A source is either a path, opened (and closed) by whoever builds the
//! index, or a reader the caller already opened. Paths ending in `.gz` are
//! decompressed on the fly.

use flate2::read::GzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use taxwalk_core::{TaxwalkError, TaxwalkResult};

pub enum DumpSource {
    Path(PathBuf),
    Reader {
        label: String,
        reader: Box<dyn BufRead>,
    },
}

impl DumpSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        DumpSource::Path(path.into())
    }

    /// Wrap an already open reader; `label` names it in error messages
    pub fn reader<R: Read + 'static>(label: impl Into<String>, reader: R) -> Self {
        DumpSource::Reader {
            label: label.into(),
            reader: Box::new(BufReader::new(reader)),
        }
    }

    /// In-memory dump contents
    pub fn from_text(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::reader(label, std::io::Cursor::new(text.into().into_bytes()))
    }

    pub fn label(&self) -> String {
        match self {
            DumpSource::Path(path) => path.display().to_string(),
            DumpSource::Reader { label, .. } => label.clone(),
        }
    }

    /// A path can be opened again; a reader cannot
    pub fn try_clone(&self) -> Option<DumpSource> {
        match self {
            DumpSource::Path(path) => Some(DumpSource::Path(path.clone())),
            DumpSource::Reader { .. } => None,
        }
    }

    pub fn is_compressed(&self) -> bool {
        match self {
            DumpSource::Path(path) => path.extension().is_some_and(|ext| ext == "gz"),
            DumpSource::Reader { .. } => false,
        }
    }

    /// Open the source for line reading
    ///
    /// The returned reader owns the file handle, so dropping it closes the file.
    pub fn open(self) -> TaxwalkResult<Box<dyn BufRead>> {
        let compressed = self.is_compressed();
        match self {
            DumpSource::Path(path) => {
                let file = File::open(&path).map_err(|e| {
                    TaxwalkError::Io(std::io::Error::new(
                        e.kind(),
                        format!("Failed to open {}: {}", path.display(), e),
                    ))
                })?;
                if compressed {
                    Ok(Box::new(BufReader::new(GzDecoder::new(file))))
                } else {
                    Ok(Box::new(BufReader::new(file)))
                }
            }
            DumpSource::Reader { reader, .. } => Ok(reader),
        }
    }
}

impl fmt::Debug for DumpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            DumpSource::Reader { label, .. } => {
                f.debug_struct("Reader").field("label", label).finish_non_exhaustive()
            }
        }
    }
}

impl From<PathBuf> for DumpSource {
    fn from(path: PathBuf) -> Self {
        DumpSource::Path(path)
    }
}

impl From<&Path> for DumpSource {
    fn from(path: &Path) -> Self {
        DumpSource::Path(path.to_path_buf())
    }
}
