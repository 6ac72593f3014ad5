use serde::{Deserialize, Serialize};

use crate::constants::ALL_KINDS;

/// How the line filter is compared against `line_nm`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMatch {
    #[default]
    Exact,
    Contains,
}

/// Station/line/kind filter for one lookup.
///
/// Values are normalized on the way in: blank strings become "no filter" and
/// the all-kinds sentinel drops the kind filter. Two criteria built from the
/// same effective filter are therefore equal and hash the same, whatever order
/// the setters were called in, which is what makes this usable as a cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterCriteria {
    station_name: Option<String>,
    line_name: Option<String>,
    line_match: LineMatch,
    facility_kind: Option<String>,
}

impl FilterCriteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds criteria from raw user input, where an empty string means
    /// "any" and `kind` may be the all-kinds sentinel.
    #[must_use]
    pub fn from_raw(station: &str, line: &str, line_match: LineMatch, kind: &str) -> Self {
        Self::new()
            .with_station(station)
            .with_line(line, line_match)
            .with_kind(kind)
    }

    #[must_use]
    pub fn with_station(mut self, station: impl AsRef<str>) -> Self {
        self.station_name = non_blank(station.as_ref());
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: impl AsRef<str>, line_match: LineMatch) -> Self {
        self.line_name = non_blank(line.as_ref());
        self.line_match = if self.line_name.is_some() {
            line_match
        } else {
            LineMatch::default()
        };
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl AsRef<str>) -> Self {
        self.facility_kind = non_blank(kind.as_ref()).filter(|k| !is_all_kinds(k));
        self
    }

    #[must_use]
    pub fn station_name(&self) -> Option<&str> {
        self.station_name.as_deref()
    }

    #[must_use]
    pub fn line_name(&self) -> Option<&str> {
        self.line_name.as_deref()
    }

    #[must_use]
    pub const fn line_match(&self) -> LineMatch {
        self.line_match
    }

    #[must_use]
    pub fn facility_kind(&self) -> Option<&str> {
        self.facility_kind.as_deref()
    }

    #[must_use]
    pub const fn is_unfiltered(&self) -> bool {
        self.station_name.is_none() && self.line_name.is_none() && self.facility_kind.is_none()
    }

    /// Which filters are set, as a fixed label like `line+station`.
    ///
    /// The label never contains user input, so it is safe as a metrics label.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        let line = match (&self.line_name, self.line_match) {
            (None, _) => 0,
            (Some(_), LineMatch::Exact) => 1,
            (Some(_), LineMatch::Contains) => 2,
        };
        match (
            line,
            self.station_name.is_some(),
            self.facility_kind.is_some(),
        ) {
            (0, false, false) => "none",
            (0, true, false) => "station",
            (0, false, true) => "kind",
            (0, true, true) => "station+kind",
            (1, false, false) => "line",
            (1, true, false) => "line+station",
            (1, false, true) => "line+kind",
            (1, true, true) => "line+station+kind",
            (_, false, false) => "line~",
            (_, true, false) => "line~+station",
            (_, false, true) => "line~+kind",
            (_, true, true) => "line~+station+kind",
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// True for the Korean sentinel and for `all` in any case.
#[must_use]
pub fn is_all_kinds(kind: &str) -> bool {
    let kind = kind.trim();
    kind == ALL_KINDS || kind.eq_ignore_ascii_case("all")
}
