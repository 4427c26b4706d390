//! Host spreadsheet reader
//!
//! Reads the first sheet of the host workbook. Row 0 is the header; every
//! following row carries host, ip and location in columns 0, 1 and 2.

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::error::{HostSourceError, Result};
use crate::host::HostRecord;
use crate::paths::DataDir;

const HOST_COL: u32 = 0;
const IP_COL: u32 = 1;
const LOCATION_COL: u32 = 2;

/// Outcome of reading the host spreadsheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostLoad {
    /// Records in sheet row order
    pub hosts: Vec<HostRecord>,
    /// The spreadsheet file did not exist
    pub missing: bool,
    /// Cells whose formula source text was used instead of a value
    pub formula_cells: usize,
    /// Rows skipped because every cell was blank
    pub blank_rows: usize,
}

/// Host list plus a user-facing notice, after applying the recoverable
/// error policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecoverableLoad {
    pub hosts: Vec<HostRecord>,
    pub notice: Option<String>,
}

/// Spreadsheet-backed host source
#[derive(Debug, Clone)]
pub struct HostSource {
    path: PathBuf,
}

impl HostSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default spreadsheet location under the data directory.
    pub fn from_data_dir(data_dir: &DataDir) -> Self {
        Self::new(data_dir.hosts_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all host rows.
    ///
    /// A missing file is not an error: the result is empty with `missing`
    /// set. Read and parse failures are returned to the caller.
    pub fn load_hosts(&self) -> Result<HostLoad> {
        let exists = self.path.try_exists().map_err(|source| HostSourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        if !exists {
            warn!(path = %self.path.display(), "Host spreadsheet not found");
            return Ok(HostLoad {
                missing: true,
                ..HostLoad::default()
            });
        }

        let mut workbook = open_workbook_auto(&self.path).map_err(|source| {
            HostSourceError::Spreadsheet {
                path: self.path.clone(),
                source,
            }
        })?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| HostSourceError::NoSheets(self.path.clone()))?;

        let values = workbook
            .worksheet_range(&sheet_name)
            .map_err(|source| HostSourceError::Spreadsheet {
                path: self.path.clone(),
                source,
            })?;

        let formulas = match workbook.worksheet_formula(&sheet_name) {
            Ok(range) => Some(range),
            Err(err) => {
                debug!(sheet = %sheet_name, "Formula range unavailable: {}", err);
                None
            }
        };

        let load = hosts_from_ranges(&values, formulas.as_ref());
        info!(
            path = %self.path.display(),
            sheet = %sheet_name,
            hosts = load.hosts.len(),
            blank_rows = load.blank_rows,
            "Loaded host spreadsheet"
        );
        if load.formula_cells > 0 {
            warn!(
                formula_cells = load.formula_cells,
                "Formula cells read as formula text, not evaluated values"
            );
        }
        Ok(load)
    }

    /// Read hosts, turning every failure into an empty list plus a notice.
    pub fn load_recoverable(&self) -> RecoverableLoad {
        match self.load_hosts() {
            Ok(load) if load.missing => RecoverableLoad {
                hosts: Vec::new(),
                notice: Some(format!("Host list not found: {}", self.path.display())),
            },
            Ok(load) => {
                let notice = (load.formula_cells > 0).then(|| {
                    format!(
                        "{} cell(s) contain formulas; showing formula text",
                        load.formula_cells
                    )
                });
                RecoverableLoad {
                    hosts: load.hosts,
                    notice,
                }
            }
            Err(err) => {
                error!("Failed to read host spreadsheet: {}", err);
                RecoverableLoad {
                    hosts: Vec::new(),
                    notice: Some(format!("Could not read host list: {}", err)),
                }
            }
        }
    }
}

/// Convert a sheet's value and formula ranges into host records.
///
/// Positions are absolute sheet coordinates, so row 0 is always the header
/// even when the used range starts further down.
pub fn hosts_from_ranges(values: &Range<Data>, formulas: Option<&Range<String>>) -> HostLoad {
    let mut load = HostLoad::default();
    let Some((first_row, last_row, last_col)) = used_bounds(values, formulas) else {
        return load;
    };

    for row in first_row.max(1)..=last_row {
        let blank = (0..=last_col).all(|col| {
            formula_at(formulas, row, col).is_none()
                && matches!(values.get_value((row, col)), None | Some(Data::Empty))
        });
        if blank {
            load.blank_rows += 1;
            continue;
        }

        let mut read = |col: u32| -> String {
            match formula_at(formulas, row, col) {
                Some(formula) => {
                    load.formula_cells += 1;
                    formula.to_string()
                }
                None => cell_text(values.get_value((row, col))),
            }
        };
        let host = read(HOST_COL);
        let ip = read(IP_COL);
        let location = read(LOCATION_COL);
        load.hosts.push(HostRecord::new(host, ip, location));
    }

    load
}

fn formula_at(formulas: Option<&Range<String>>, row: u32, col: u32) -> Option<&str> {
    formulas
        .and_then(|range| range.get_value((row, col)))
        .map(String::as_str)
        .filter(|text| !text.is_empty())
}

fn used_bounds(values: &Range<Data>, formulas: Option<&Range<String>>) -> Option<(u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32)> = None;
    let ranges = [
        values.start().zip(values.end()),
        formulas.and_then(|f| f.start().zip(f.end())),
    ];
    for ((start_row, _), (end_row, end_col)) in ranges.into_iter().flatten() {
        bounds = Some(match bounds {
            None => (start_row, end_row, end_col),
            Some((s, e, c)) => (s.min(start_row), e.max(end_row), c.max(end_col)),
        });
    }
    bounds
}

/// Text of a single cell value.
pub fn cell_text(value: Option<&Data>) -> String {
    match value {
        Some(Data::String(text)) => text.trim().to_string(),
        Some(Data::Float(number)) => format_number(*number),
        Some(Data::Int(number)) => format_number(*number as f64),
        Some(Data::Bool(flag)) => flag.to_string(),
        Some(Data::DateTime(date)) => date
            .as_datetime()
            .map(format_date_time)
            .unwrap_or_else(|| format_number(date.as_f64())),
        Some(Data::DateTimeIso(text)) | Some(Data::DurationIso(text)) => text.trim().to_string(),
        _ => String::new(),
    }
}

/// Decimal form of a numeric cell: `10.0` for integral values.
pub fn format_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{:.1}", number)
    } else {
        number.to_string()
    }
}

pub fn format_date_time(date: NaiveDateTime) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}
