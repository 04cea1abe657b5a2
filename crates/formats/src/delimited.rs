use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::LoadError;

/// A fully buffered delimited-text table with its header row.
#[derive(Debug)]
pub struct DelimitedTable {
    pub delimiter: u8,
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl DelimitedTable {
    pub fn read<R: Read>(mut reader: R, origin: &Path) -> Result<Self, LoadError> {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|source| LoadError::Io {
                path: origin.to_path_buf(),
                source,
            })?;

        let delimiter = sniff_delimiter(&buf);
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(delimiter)
            .has_headers(true)
            .trim(Trim::All);
        // Tab-separated occurrence exports carry unbalanced quotes in free-text fields.
        if delimiter == b'\t' {
            builder.quoting(false);
        }
        let mut rdr = builder.from_reader(buf.as_slice());

        let csv_err = |source| LoadError::Csv {
            path: origin.to_path_buf(),
            source,
        };
        let headers = rdr.headers().map_err(csv_err)?.clone();
        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record.map_err(csv_err)?);
        }

        Ok(Self {
            delimiter,
            headers,
            rows,
        })
    }

    pub fn column(&self, name: &'static str, origin: &Path) -> Result<usize, LoadError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                path: origin.to_path_buf(),
                column: name,
            })
    }
}

/// Tab when the header line contains one, comma otherwise.
pub fn sniff_delimiter(payload: &[u8]) -> u8 {
    let header = payload.split(|b| *b == b'\n').next().unwrap_or(&[]);
    if header.contains(&b'\t') { b'\t' } else { b',' }
}

/// Cell text, with empty cells reported as absent.
pub fn cell(record: &StringRecord, index: usize) -> Option<&str> {
    record.get(index).filter(|s| !s.is_empty())
}
