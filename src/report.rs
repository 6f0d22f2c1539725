//! The JSON objects the tools print.
//!
//! Output uses `", "` and `": "` separators and escapes everything outside
//! printable ASCII as `\uXXXX`, the same rendering the tools always had.

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

use crate::search::SearchOutcome;
use crate::site::TorrentRecord;
use crate::torrent::MagnetLink;
use crate::Result;

/// Report of the search tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub torrents: Vec<TorrentRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl From<Result<SearchOutcome>> for SearchReport {
    fn from(result: Result<SearchOutcome>) -> Self {
        match result {
            Ok(outcome) => Self {
                success: true,
                error: None,
                torrents: outcome.torrents,
                count: Some(outcome.total),
            },
            Err(err) => Self {
                success: false,
                error: Some(err.to_string()),
                torrents: Vec::new(),
                count: None,
            },
        }
    }
}

/// Printed by either tool when its arguments are unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageReport {
    pub success: bool,
    pub error: String,
}

impl UsageReport {
    pub fn new(usage: impl Into<String>) -> Self {
        Self {
            success: false,
            error: usage.into(),
        }
    }
}

/// Report of the magnet tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagnetReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MagnetReport {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            magnet: None,
            error: Some(error.into()),
        }
    }
}

impl From<Result<MagnetLink>> for MagnetReport {
    fn from(result: Result<MagnetLink>) -> Self {
        match result {
            Ok(magnet) => Self {
                success: true,
                magnet: Some(magnet.to_uri()),
                error: None,
            },
            Err(err) => Self::failure(err.to_string()),
        }
    }
}

struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\u{7f}' {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Renders a report as one JSON line.
pub fn to_json_line<T: Serialize>(report: &T) -> serde_json::Result<Vec<u8>> {
    let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), AsciiFormatter);
    report.serialize(&mut serializer)?;
    let mut line = serializer.into_inner();
    line.push(b'\n');
    Ok(line)
}

/// Writes a report to stdout.
pub fn print_report<T: Serialize>(report: &T) -> io::Result<()> {
    let line = to_json_line(report)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&line)?;
    stdout.flush()
}
