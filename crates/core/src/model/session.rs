use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{LineSegment, WorkingArea};
use super::table::{LineTable, ProcessParameters};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid session JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Lab defaults: a 1300x1100 mm working area scaled down to 650x550 mm.
pub const DEFAULT_OLD_AREA: WorkingArea = WorkingArea {
    width: 1300.0,
    height: 1100.0,
};
pub const DEFAULT_NEW_AREA: WorkingArea = WorkingArea {
    width: 650.0,
    height: 550.0,
};

/// `(x1, y1, x2, y2, speed mm/s, cycle ms, pulse ms)`
const DEFAULT_LINES: [(f64, f64, f64, f64, f64, u32, u32); 8] = [
    (430.0, 120.0, 430.0, 1000.0, 58.1, 5, 2),
    (250.0, 1000.0, 250.0, 120.0, 282.7, 20, 2),
    (787.0, 120.0, 787.0, 1000.0, 66.9, 5, 2),
    (650.0, 1000.0, 650.0, 120.0, 138.9, 5, 2),
    (1100.0, 120.0, 1100.0, 1000.0, 53.5, 5, 2),
    (1250.0, 1010.0, 790.0, 1010.0, 229.7, 20, 2),
    (1250.0, 90.0, 790.0, 90.0, 229.7, 20, 2),
    (1250.0, 55.0, 1250.0, 1050.0, 111.5, 5, 2),
];

/// Operator input that lives across interactions: both working areas and
/// the line table.
///
/// The session is owned by the caller. Scaling reads it by reference and
/// returns new values; it never writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub old_area: WorkingArea,
    pub new_area: WorkingArea,
    pub table: LineTable,
}

impl Session {
    /// Parse a session from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let session = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            lines = session.table.len(),
            "loaded session"
        );
        Ok(session)
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        let text = self.to_json()?;
        std::fs::write(path, text).map_err(|source| SessionError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), lines = self.table.len(), "saved session");
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            old_area: DEFAULT_OLD_AREA,
            new_area: DEFAULT_NEW_AREA,
            table: default_table(),
        }
    }
}

fn default_table() -> LineTable {
    let mut table = LineTable::new();
    for (x1, y1, x2, y2, speed, cycle, pulse) in DEFAULT_LINES {
        table.push(
            LineSegment::from_coords(x1, y1, x2, y2),
            ProcessParameters::new(speed, cycle, pulse),
        );
    }
    table
}
