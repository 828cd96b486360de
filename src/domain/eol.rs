// ============================================================
// END OF LINE DETECTION
// ============================================================
// Classify the terminator a CSV line ends with

use serde::{Deserialize, Serialize};

/// Line terminator of a delimited text file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eol {
    /// Carriage return + line feed (Windows)
    CrLf,

    /// Lone carriage return (classic Mac)
    Cr,

    /// Lone line feed (Unix)
    #[default]
    Lf,
}

impl Eol {
    /// Detect the terminator `line` ends with.
    ///
    /// CRLF is checked first; a lone LF or CR check would otherwise match
    /// one half of it.
    pub fn detect(line: &[u8]) -> Option<Eol> {
        if line.ends_with(b"\r\n") {
            Some(Eol::CrLf)
        } else if line.ends_with(b"\r") {
            Some(Eol::Cr)
        } else if line.ends_with(b"\n") {
            Some(Eol::Lf)
        } else {
            None
        }
    }

    /// Detect the terminator, falling back to LF when none is present.
    pub fn detect_or_default(line: &[u8]) -> Eol {
        Self::detect(line).unwrap_or_default()
    }

    /// Raw byte sequence of the terminator
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Eol::CrLf => b"\r\n",
            Eol::Cr => b"\r",
            Eol::Lf => b"\n",
        }
    }

    /// Terminator spelled as a MySQL string-literal escape sequence
    pub fn sql_escape(&self) -> &'static str {
        match self {
            Eol::CrLf => "\\r\\n",
            Eol::Cr => "\\r",
            Eol::Lf => "\\n",
        }
    }

    /// Number of physical lines occupied by a header row.
    ///
    /// Surrounding whitespace (including the trailing terminator) is
    /// ignored; every terminator left inside the header belongs to a quoted
    /// multi-line value.
    pub fn header_line_count(&self, raw_header: &[u8]) -> usize {
        count_occurrences(trim_ascii_whitespace(raw_header), self.as_bytes()) + 1
    }
}

impl std::fmt::Display for Eol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_escape())
    }
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let is_ws = |b: &u8| matches!(*b, b' ' | b'\t' | b'\n' | b'\r' | b'\0' | 0x0b);
    let start = bytes.iter().position(|b| !is_ws(b)).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !is_ws(b)).map_or(start, |i| i + 1);
    &bytes[start..end]
}

fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() || haystack.len() < needle.len() {
        return 0;
    }

    let mut count = 0;
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if &haystack[i..i + needle.len()] == needle {
            count += 1;
            i += needle.len();
        } else {
            i += 1;
        }
    }
    count
}
