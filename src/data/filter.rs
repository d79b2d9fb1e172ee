use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::model::{LaunchRecord, PayloadRange};

// ---------------------------------------------------------------------------
// Site selection: one launch site or the "ALL" sentinel
// ---------------------------------------------------------------------------

/// Sentinel value of the site selector meaning "no site filter".
pub const ALL_SITES: &str = "ALL";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }

    /// Human readable name used in chart titles.
    pub fn display_name(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(site) => site,
        }
    }
}

impl FromStr for SiteSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(s.to_string())
        })
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------
//
// Both filters borrow from the dataset and keep input order, so they chain:
// `filter_by_site(filter_by_payload(&ds.records, range), &site)`.

/// Records launched from the selected site; everything for [`SiteSelection::All`].
///
/// Matching is exact and case-sensitive. An unknown site yields an empty subset.
pub fn filter_by_site<'a>(
    records: impl IntoIterator<Item = &'a LaunchRecord>,
    selected_site: &SiteSelection,
) -> Vec<&'a LaunchRecord> {
    records
        .into_iter()
        .filter(|r| selected_site.matches(r))
        .collect()
}

/// Records with `range.low <= payload_mass_kg <= range.high`.
///
/// An inverted range (`low > high`) yields an empty subset.
pub fn filter_by_payload<'a>(
    records: impl IntoIterator<Item = &'a LaunchRecord>,
    range: PayloadRange,
) -> Vec<&'a LaunchRecord> {
    records
        .into_iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .collect()
}
