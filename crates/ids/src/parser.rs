//! Line-oriented reader for the `pci.ids` text format.
//!
//! Depth is the number of leading tabs: 0 starts a vendor, 1 a device under the
//! last vendor, 2 a subdevice under the last device. New records are appended
//! to their owning container, so "current vendor" and "current device" are
//! simply the last entries of the hierarchy and a line without a parent has
//! nowhere to go.

use crate::error::{IdsError, IdsErrorExt, Violation};
use crate::model::{DeviceRecord, Hierarchy, SubdeviceRecord, VendorRecord};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

const COMMENT_MARKER: char = '#';
const CLASS_MARKER: char = 'C';
const MAX_DEPTH: usize = 2;

impl Hierarchy {
    /// Parses an in-memory database.
    ///
    /// # Errors
    /// Returns [`IdsError::Structural`] when a line breaks the vendor/device/subdevice nesting.
    pub fn parse(source: &str) -> Result<Self, IdsError> {
        let mut parser = Parser::default();
        for line in source.lines() {
            if parser.feed(line)? == Flow::Stop {
                break;
            }
        }
        Ok(parser.finish())
    }

    /// Parses a database from any buffered reader, one line at a time.
    ///
    /// # Errors
    /// Returns [`IdsError::Io`] on read failures or invalid UTF-8, with the
    /// failing line number as context, and [`IdsError::Structural`] on nesting violations.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, IdsError> {
        let mut parser = Parser::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line.context(format!("line {}", index + 1))?;
            if parser.feed(&line)? == Flow::Stop {
                break;
            }
        }
        Ok(parser.finish())
    }

    /// Opens and parses the database at `path`. The file is closed before returning.
    ///
    /// Errors raised while reading carry the path ahead of any line context.
    ///
    /// # Errors
    /// Same as [`Hierarchy::from_reader`], plus open failures.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IdsError> {
        let path = path.as_ref();
        let file =
            File::open(path).context(format!("Failed to open database {}", path.display()))?;
        Self::from_reader(BufReader::new(file)).context(path.display().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Skip,
    Stop,
    Vendor { id: &'a str, name: &'a str },
    Device { id: &'a str, name: &'a str },
    Subdevice { subvendor: &'a str, subdevice: &'a str, name: &'a str },
}

#[derive(Debug, Default)]
struct Parser {
    hierarchy: Hierarchy,
    line: usize,
    devices: usize,
    subdevices: usize,
    stopped_at: Option<usize>,
}

impl Parser {
    fn feed(&mut self, raw: &str) -> Result<Flow, IdsError> {
        self.line += 1;
        let line = classify(raw).map_err(|v| IdsError::structural(self.line, v))?;

        match line {
            Line::Skip => {},
            Line::Stop => {
                self.stopped_at = Some(self.line);
                return Ok(Flow::Stop);
            },
            Line::Vendor { id, name } => {
                self.hierarchy.insert(VendorRecord::new(id, name)).map_err(|v| {
                    IdsError::structural(self.line, Violation::DuplicateVendor { id: v.id().to_owned() })
                })?;
            },
            Line::Device { id, name } => {
                let vendor = self
                    .hierarchy
                    .last_vendor_mut()
                    .ok_or_else(|| IdsError::structural(self.line, Violation::OrphanDevice))?;
                vendor.insert(DeviceRecord::new(id, name)).map_err(|d| {
                    IdsError::structural(
                        self.line,
                        Violation::DuplicateDevice {
                            vendor: vendor.id().to_owned(),
                            id: d.id().to_owned(),
                        },
                    )
                })?;
                self.devices += 1;
            },
            Line::Subdevice { subvendor, subdevice, name } => {
                let device = self
                    .hierarchy
                    .last_vendor_mut()
                    .and_then(VendorRecord::last_device_mut)
                    .ok_or_else(|| IdsError::structural(self.line, Violation::OrphanSubdevice))?;
                device.push(SubdeviceRecord::new(subvendor, subdevice, name));
                self.subdevices += 1;
            },
        }

        Ok(Flow::Continue)
    }

    fn finish(self) -> Hierarchy {
        debug!(
            vendors = self.hierarchy.len(),
            devices = self.devices,
            subdevices = self.subdevices,
            lines = self.line,
            stopped_at = ?self.stopped_at,
            "Parsed PCI id database"
        );
        self.hierarchy
    }
}

fn classify(raw: &str) -> Result<Line<'_>, Violation> {
    if raw.trim().is_empty() || raw.starts_with(COMMENT_MARKER) {
        return Ok(Line::Skip);
    }
    if raw.starts_with(CLASS_MARKER) {
        return Ok(Line::Stop);
    }

    let depth = raw.bytes().take_while(|&b| b == b'\t').count();
    let body = &raw[depth..];

    match depth {
        0 => {
            let (id, name) = split_field(body).ok_or(Violation::MissingField { field: "vendor name" })?;
            Ok(Line::Vendor { id, name })
        },
        1 => {
            let (id, name) = split_field(body).ok_or(Violation::MissingField { field: "device name" })?;
            Ok(Line::Device { id, name })
        },
        MAX_DEPTH => {
            let (subvendor, rest) =
                split_field(body).ok_or(Violation::MissingField { field: "subdevice id" })?;
            let (subdevice, name) =
                split_field(rest).ok_or(Violation::MissingField { field: "subdevice name" })?;
            Ok(Line::Subdevice { subvendor, subdevice, name })
        },
        depth => Err(Violation::TooDeep { depth }),
    }
}

/// Splits off the leading token at the first run of whitespace; the remainder is trimmed
/// but otherwise kept whole. Returns `None` if either side would be empty.
fn split_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim();
    let at = s.find(char::is_whitespace)?;
    let (token, rest) = s.split_at(at);
    let rest = rest.trim_start();
    if rest.is_empty() { None } else { Some((token, rest)) }
}
