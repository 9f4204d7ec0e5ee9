//! Index snapshot format.
//!
//! The offline corpus pipeline exports two parallel files: a raw vector file
//! (native-endian `f32`, row-major, one row per title) and a JSON metadata
//! file of title records. Ordinal positions in the two files must agree
//! exactly; that alignment is validated on load.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use serde::{Deserialize, Serialize};

use super::error::{IndexError, IndexResult};

/// Locations of the two snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotPaths {
    pub vectors: PathBuf,
    pub titles: PathBuf,
}

impl SnapshotPaths {
    pub fn new<V: Into<PathBuf>, T: Into<PathBuf>>(vectors: V, titles: T) -> Self {
        Self {
            vectors: vectors.into(),
            titles: titles.into(),
        }
    }
}

/// One metadata record; carries at minimum the canonical title text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub title: String,
}

/// A fully loaded, alignment-checked snapshot.
#[derive(Debug, Clone)]
pub struct TitleSnapshot {
    pub titles: Vec<String>,
    pub vectors: Vec<f32>,
    pub dim: usize,
}

impl TitleSnapshot {
    /// Loads and validates a snapshot.
    ///
    /// Either file being absent is [`IndexError::SnapshotMissing`]; a vector
    /// file whose row count disagrees with the metadata is
    /// [`IndexError::SnapshotMisaligned`].
    pub fn load(paths: &SnapshotPaths, dim: usize) -> IndexResult<Self> {
        for path in [&paths.vectors, &paths.titles] {
            if !path.exists() {
                return Err(IndexError::SnapshotMissing { path: path.clone() });
            }
        }

        let raw = std::fs::read_to_string(&paths.titles).map_err(|e| IndexError::SnapshotRead {
            reason: format!("{}: {}", paths.titles.display(), e),
        })?;
        let records: Vec<SnapshotRecord> =
            serde_json::from_str(&raw).map_err(|e| IndexError::SnapshotCorrupt {
                reason: format!("metadata is not a JSON record array: {}", e),
            })?;
        let titles: Vec<String> = records.into_iter().map(|r| r.title).collect();

        let vectors = read_vectors(&paths.vectors)?;

        let expected = titles.len() * dim;
        if vectors.len() != expected {
            return Err(IndexError::SnapshotMisaligned {
                expected,
                actual: vectors.len(),
            });
        }

        Ok(Self {
            titles,
            vectors,
            dim,
        })
    }

    /// Writes both snapshot files. Used by the export tooling and tests.
    pub fn write(&self, paths: &SnapshotPaths) -> IndexResult<()> {
        let records: Vec<SnapshotRecord> = self
            .titles
            .iter()
            .map(|t| SnapshotRecord { title: t.clone() })
            .collect();
        let meta =
            serde_json::to_string_pretty(&records).map_err(|e| IndexError::SnapshotCorrupt {
                reason: e.to_string(),
            })?;
        std::fs::write(&paths.titles, meta).map_err(|e| IndexError::SnapshotRead {
            reason: format!("{}: {}", paths.titles.display(), e),
        })?;

        let bytes: &[u8] = bytemuck::cast_slice(&self.vectors);
        std::fs::write(&paths.vectors, bytes).map_err(|e| IndexError::SnapshotRead {
            reason: format!("{}: {}", paths.vectors.display(), e),
        })?;

        Ok(())
    }
}

fn read_vectors(path: &Path) -> IndexResult<Vec<f32>> {
    let file = File::open(path).map_err(|e| IndexError::SnapshotRead {
        reason: format!("{}: {}", path.display(), e),
    })?;
    let len = file
        .metadata()
        .map_err(|e| IndexError::SnapshotRead {
            reason: e.to_string(),
        })?
        .len();

    // mmap of a zero-length file fails on some platforms.
    if len == 0 {
        return Ok(Vec::new());
    }

    // SAFETY: the mapping is read-only and dropped before this function
    // returns; the data is copied out into an owned Vec.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| IndexError::SnapshotRead {
        reason: format!("{}: {}", path.display(), e),
    })?;

    let floats: &[f32] =
        bytemuck::try_cast_slice(&mmap[..]).map_err(|_| IndexError::SnapshotCorrupt {
            reason: "vector file length is not a multiple of 4 bytes".to_string(),
        })?;

    Ok(floats.to_vec())
}
