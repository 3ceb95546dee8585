use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{LineSegment, LineSet};

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("row {index} out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },
}

/// Per-line machine settings. Opaque to the transform: they ride along
/// with their line by index and are never modified by scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessParameters {
    pub speed_mm_s: f64,
    pub cycle_time_ms: u32,
    pub pulse_time_ms: u32,
}

impl ProcessParameters {
    pub fn new(speed_mm_s: f64, cycle_time_ms: u32, pulse_time_ms: u32) -> Self {
        Self {
            speed_mm_s,
            cycle_time_ms,
            pulse_time_ms,
        }
    }
}

impl Default for ProcessParameters {
    fn default() -> Self {
        Self::new(100.0, 5, 2)
    }
}

/// One editable row: a segment and its process parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineRow {
    pub segment: LineSegment,
    pub params: ProcessParameters,
}

/// The operator-edited table of lines.
///
/// Rows keep insertion order; a row's position is its line number (1-based
/// in labels) and picks its palette colour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineTable {
    rows: Vec<LineRow>,
}

impl LineTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<LineRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LineRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row at the end of the table.
    pub fn push(&mut self, segment: LineSegment, params: ProcessParameters) {
        self.rows.push(LineRow { segment, params });
    }

    /// Insert a row before `index`. `index == len` appends.
    pub fn insert(
        &mut self,
        index: usize,
        segment: LineSegment,
        params: ProcessParameters,
    ) -> Result<(), TableError> {
        if index > self.rows.len() {
            return Err(self.out_of_range(index));
        }
        self.rows.insert(index, LineRow { segment, params });
        Ok(())
    }

    /// Remove and return the row at `index`; later rows shift up by one.
    pub fn remove(&mut self, index: usize) -> Result<LineRow, TableError> {
        if index >= self.rows.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.rows.remove(index))
    }

    pub fn set_segment(&mut self, index: usize, segment: LineSegment) -> Result<(), TableError> {
        let err = self.out_of_range(index);
        let row = self.rows.get_mut(index).ok_or(err)?;
        row.segment = segment;
        Ok(())
    }

    pub fn set_params(&mut self, index: usize, params: ProcessParameters) -> Result<(), TableError> {
        let err = self.out_of_range(index);
        let row = self.rows.get_mut(index).ok_or(err)?;
        row.params = params;
        Ok(())
    }

    /// The segments alone, in table order.
    pub fn segments(&self) -> LineSet {
        self.rows.iter().map(|r| r.segment).collect()
    }

    pub fn params(&self) -> Vec<ProcessParameters> {
        self.rows.iter().map(|r| r.params).collect()
    }

    fn out_of_range(&self, index: usize) -> TableError {
        TableError::RowOutOfRange {
            index,
            len: self.rows.len(),
        }
    }
}
