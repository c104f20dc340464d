use serde::{Deserialize, Serialize};

/// The reporting scope used to filter which assets count toward displayed
/// totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportingContext {
    /// Home-jurisdiction holdings only
    National,
    /// International holdings only
    Global,
    /// Everything, unfiltered
    Consolidated,
}

impl std::fmt::Display for ReportingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportingContext::National => write!(f, "National"),
            ReportingContext::Global => write!(f, "Global"),
            ReportingContext::Consolidated => write!(f, "Consolidated"),
        }
    }
}

impl std::str::FromStr for ReportingContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "National" => Ok(ReportingContext::National),
            "Global" => Ok(ReportingContext::Global),
            "Consolidated" => Ok(ReportingContext::Consolidated),
            other => Err(format!("Unknown reporting context: {other}")),
        }
    }
}

impl Default for ReportingContext {
    fn default() -> Self {
        ReportingContext::Consolidated
    }
}

/// Capability mode for the whole dashboard.
///
/// `ReadOnly` (viewer mode) disables every mutating action. The check lives
/// in the mutation entry points themselves — hiding controls in the UI is
/// not the enforcement mechanism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessMode {
    #[default]
    Full,
    ReadOnly,
}

impl AccessMode {
    /// Derive the access mode from a URL query string.
    ///
    /// A `view` parameter with value `1`, `true`, or `yes` (case-insensitive)
    /// selects viewer mode; anything else leaves full access.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&') {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = parts.next().unwrap_or("");
            if key == "view" {
                let v = value.to_ascii_lowercase();
                if v == "1" || v == "true" || v == "yes" {
                    return AccessMode::ReadOnly;
                }
            }
        }
        AccessMode::Full
    }

    /// `true` in viewer mode.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self, AccessMode::ReadOnly)
    }
}
