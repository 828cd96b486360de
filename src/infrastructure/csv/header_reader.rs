// ============================================================
// CSV HEADER READER
// ============================================================
// Read the header row of a CSV file along with its raw bytes

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use encoding_rs::WINDOWS_1252;

use crate::domain::error::{AppError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// First logical row of a CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    /// Header tokens; a blank first line yields a single `None`
    pub columns: Vec<Option<String>>,

    /// Bytes consumed to read the row, including its terminator
    pub raw: Vec<u8>,
}

/// Reads only the header row of a CSV file
pub struct CsvHeaderReader {
    /// Maximum allowed header length in bytes
    max_header_bytes: usize,
}

impl Default for CsvHeaderReader {
    fn default() -> Self {
        Self {
            max_header_bytes: 1024 * 1024, // 1MB
        }
    }
}

impl CsvHeaderReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_header_bytes(mut self, max_header_bytes: usize) -> Self {
        self.max_header_bytes = max_header_bytes;
        self
    }

    /// Read the header row of the file at `path`.
    pub fn read_file(&self, path: &Path) -> Result<HeaderRow> {
        let file = File::open(path).map_err(|e| {
            AppError::FileAccessError(format!(
                "Failed to open resource file \"{}\": {}",
                path.display(),
                e
            ))
        })?;

        self.read_from(file).map_err(|e| match e {
            AppError::FileAccessError(msg) => AppError::FileAccessError(format!(
                "Failed to read columns from resource file \"{}\": {}",
                path.display(),
                msg
            )),
            other => other,
        })
    }

    /// Read the header row from a seekable source positioned at its start.
    ///
    /// The row is parsed with the CSV reader, then the same number of bytes
    /// is read again raw so callers see the exact terminator.
    pub fn read_from<R: Read + Seek>(&self, mut source: R) -> Result<HeaderRow> {
        let head = read_prefix(&mut source, UTF8_BOM.len() + 2)?;
        if head.is_empty() {
            return Err(AppError::FileAccessError("file is empty".to_string()));
        }

        let bom = if head.starts_with(UTF8_BOM) {
            UTF8_BOM.len()
        } else {
            0
        };

        // The CSV reader skips blank lines, so a blank header is handled here.
        if let Some(terminator) = leading_terminator(&head[bom..]) {
            return Ok(HeaderRow {
                columns: vec![None],
                raw: head[..bom + terminator].to_vec(),
            });
        }

        seek(&mut source, bom as u64)?;
        let (record, parsed) = self.first_record(&mut source)?;
        let consumed = bom + parsed;

        // A CR terminator ends the record before its LF is consumed.
        seek(&mut source, 0)?;
        let mut raw = read_prefix(&mut source, consumed + 1)?;
        let completes_crlf =
            raw.len() > consumed && raw[consumed - 1] == b'\r' && raw[consumed] == b'\n';
        if !completes_crlf {
            raw.truncate(consumed);
        }

        let columns = record
            .iter()
            .map(|field| Some(decode_field(field)))
            .collect();

        Ok(HeaderRow { columns, raw })
    }

    /// Parse the first record, returning it with the number of bytes it spans.
    fn first_record<R: Read>(&self, source: &mut R) -> Result<(ByteRecord, usize)> {
        let limited = source.by_ref().take(self.max_header_bytes as u64 + 1);
        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .flexible(true)
            .from_reader(limited);

        let mut record = ByteRecord::new();
        let found = reader
            .read_byte_record(&mut record)
            .map_err(|e| AppError::FileAccessError(format!("malformed header row: {}", e)))?;
        if !found {
            return Err(AppError::FileAccessError("file is empty".to_string()));
        }

        let consumed = reader.position().byte() as usize;
        if consumed > self.max_header_bytes {
            return Err(AppError::FileAccessError(format!(
                "header row exceeds {} bytes",
                self.max_header_bytes
            )));
        }

        Ok((record, consumed))
    }
}

fn read_prefix<R: Read>(source: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len);
    source
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut buf)
        .map_err(|e| AppError::FileAccessError(e.to_string()))?;
    Ok(buf)
}

fn seek<R: Seek>(source: &mut R, offset: u64) -> Result<()> {
    source
        .seek(SeekFrom::Start(offset))
        .map(|_| ())
        .map_err(|e| AppError::FileAccessError(e.to_string()))
}

/// Length of the line terminator at the start of `bytes`, if any
fn leading_terminator(bytes: &[u8]) -> Option<usize> {
    if bytes.starts_with(b"\r\n") {
        Some(2)
    } else if bytes.starts_with(b"\r") || bytes.starts_with(b"\n") {
        Some(1)
    } else {
        None
    }
}

/// Decode a header field, falling back to Windows-1252 for non-UTF-8 bytes.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => WINDOWS_1252.decode(bytes).0.into_owned(),
    }
}
