//! Output sinks
//!
//! Each export target writes the same records into two files: a JSON array
//! and a CSV table. Sinks are explicitly finalized; an unfinished file means
//! the export did not complete.

use crate::error::{Error, Result};
use crate::types::{FormattedRecord, JsonValue};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Streaming writer for a growing JSON array
pub struct JsonSink {
    writer: BufWriter<File>,
    records_written: usize,
}

impl JsonSink {
    /// Create the sink, truncating any existing file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|e| {
            Error::output(format!(
                "Failed to create {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            records_written: 0,
        })
    }

    /// Append one record to the array
    pub fn write(&mut self, record: &FormattedRecord) -> Result<()> {
        if self.records_written == 0 {
            self.writer.write_all(b"[\n")?;
        } else {
            self.writer.write_all(b",\n")?;
        }
        serde_json::to_writer(&mut self.writer, record)?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Close the array and flush
    pub fn finish(mut self) -> Result<usize> {
        if self.records_written == 0 {
            self.writer.write_all(b"[]\n")?;
        } else {
            self.writer.write_all(b"\n]\n")?;
        }
        self.writer.flush()?;
        Ok(self.records_written)
    }
}

/// CSV writer with a header synthesized from the first row
///
/// Later rows are projected onto that header: missing keys become empty
/// fields and keys the first row did not have are ignored. Rows from one
/// target share a stable base key set, so in practice only per-question
/// columns vary.
pub struct CsvSink {
    writer: csv::Writer<File>,
    header: Option<Vec<String>>,
    rows_written: usize,
}

impl CsvSink {
    /// Create the sink, truncating any existing file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path.as_ref())?;
        Ok(Self {
            writer,
            header: None,
            rows_written: 0,
        })
    }

    /// Append one row, writing the header first if this is the first row
    pub fn push(&mut self, row: &FormattedRecord) -> Result<()> {
        if self.header.is_none() {
            let header: Vec<String> = row.keys().cloned().collect();
            self.writer.write_record(&header)?;
            self.header = Some(header);
        }
        let fields: Vec<String> = self
            .header
            .iter()
            .flatten()
            .map(|key| row.get(key).map_or_else(String::new, field_text))
            .collect();
        self.writer.write_record(&fields)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and close
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}

/// Render one JSON value as a CSV field
fn field_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The JSON/CSV sink pair of one export target
pub struct SinkPair {
    pub json: JsonSink,
    pub csv: CsvSink,
}

impl SinkPair {
    /// Create `<key>.json` and `<key>.csv` under the run directory
    pub fn create(dir: impl AsRef<Path>, key: &str) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            json: JsonSink::create(dir.join(format!("{key}.json")))?,
            csv: CsvSink::create(dir.join(format!("{key}.csv")))?,
        })
    }

    /// Finalize both sinks, returning the JSON record count
    pub fn finish(self) -> Result<usize> {
        let records = self.json.finish()?;
        self.csv.finish()?;
        Ok(records)
    }
}
