//! Host record type

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A (hostname, IP, location) row from the host spreadsheet.
///
/// Immutable once built. Equality is by value; duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HostRecord {
    host: String,
    ip: String,
    location: String,
}

impl HostRecord {
    pub fn new(host: impl Into<String>, ip: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ip: ip.into(),
            location: location.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Value of the given column.
    pub fn field(&self, column: HostColumn) -> &str {
        match column {
            HostColumn::Host => &self.host,
            HostColumn::Ip => &self.ip,
            HostColumn::Location => &self.location,
        }
    }

    /// Case-insensitive substring match against host, ip or location.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        HostColumn::ALL
            .iter()
            .any(|column| self.field(*column).to_lowercase().contains(needle_lower))
    }
}

/// Table column of a host record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostColumn {
    Host,
    Ip,
    Location,
}

impl HostColumn {
    pub const ALL: [HostColumn; 3] = [HostColumn::Host, HostColumn::Ip, HostColumn::Location];

    pub fn as_str(&self) -> &'static str {
        match self {
            HostColumn::Host => "host",
            HostColumn::Ip => "ip",
            HostColumn::Location => "location",
        }
    }

    /// Header label shown in tables
    pub fn label(&self) -> &'static str {
        match self {
            HostColumn::Host => "Host",
            HostColumn::Ip => "IP",
            HostColumn::Location => "Location",
        }
    }
}

impl fmt::Display for HostColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "host" | "hostname" => Ok(HostColumn::Host),
            "ip" | "address" => Ok(HostColumn::Ip),
            "location" | "loc" => Ok(HostColumn::Location),
            other => Err(format!(
                "Unknown column '{}'. Expected one of: host, ip, location",
                other
            )),
        }
    }
}

/// Find a host by name or IP.
///
/// Priority: exact hostname, case-insensitive hostname, exact IP.
pub fn find_host<'a>(hosts: &'a [HostRecord], query: &str) -> Option<&'a HostRecord> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    hosts
        .iter()
        .find(|h| h.host == query)
        .or_else(|| hosts.iter().find(|h| h.host.eq_ignore_ascii_case(query)))
        .or_else(|| hosts.iter().find(|h| h.ip == query))
}
