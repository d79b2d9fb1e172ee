use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Column names of the tabular input
// ---------------------------------------------------------------------------

pub mod columns {
    pub const LAUNCH_SITE: &str = "Launch Site";
    pub const PAYLOAD_MASS_KG: &str = "Payload Mass (kg)";
    pub const CLASS: &str = "class";
    pub const BOOSTER_VERSION_CATEGORY: &str = "Booster Version Category";

    pub const ALL: [&str; 4] = [LAUNCH_SITE, PAYLOAD_MASS_KG, CLASS, BOOSTER_VERSION_CATEGORY];
}

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome. Serialised as `1` / `0` like the source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn as_class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    /// Float-typed `class` columns, as pandas writes them once a NaN appeared.
    pub fn from_class_f64(class: f64) -> Result<Self, RecordError> {
        if class.fract() != 0.0 || !class.is_finite() {
            return Err(RecordError::NonIntegralClass(class));
        }
        Outcome::try_from(class as i64)
    }
}

impl TryFrom<i64> for Outcome {
    type Error = RecordError;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(RecordError::InvalidClass(other)),
        }
    }
}

impl From<bool> for Outcome {
    fn from(success: bool) -> Self {
        if success {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

/// Text form of `class`: `0`, `1`, `0.0`, `1.0`, `true` or `false`.
impl FromStr for Outcome {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(class) = s.parse::<i64>() {
            return Outcome::try_from(class);
        }
        if let Ok(class) = s.parse::<f64>() {
            return Outcome::from_class_f64(class);
        }
        match s {
            "true" => Ok(Outcome::Success),
            "false" => Ok(Outcome::Failure),
            _ => Err(RecordError::UnreadableClass(s.to_string())),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_class())
    }
}

struct ClassVisitor;

impl serde::de::Visitor<'_> for ClassVisitor {
    type Value = Outcome;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a class of 0 or 1 (integer, integral float, bool or text)")
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Outcome, E> {
        Outcome::try_from(v).map_err(E::custom)
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Outcome, E> {
        let class = i64::try_from(v).unwrap_or(i64::MAX);
        Outcome::try_from(class).map_err(E::custom)
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Outcome, E> {
        Outcome::from_class_f64(v).map_err(E::custom)
    }

    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Outcome, E> {
        Ok(Outcome::from(v))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Outcome, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ClassVisitor)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// Reasons a row cannot become a [`LaunchRecord`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("launch site is empty")]
    EmptySite,
    #[error("payload mass {0} is not a finite non-negative number")]
    InvalidPayload(f64),
    #[error("class must be 0 or 1, got {0}")]
    InvalidClass(i64),
    #[error("class {0} is not an integer")]
    NonIntegralClass(f64),
    #[error("class '{0}' is not a number or boolean")]
    UnreadableClass(String),
}

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub outcome: Outcome,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
}

impl LaunchRecord {
    /// Build a record, checking the row invariants.
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_version_category: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let record = LaunchRecord {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            booster_version_category: booster_version_category.into(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the invariants of an already constructed row (e.g. deserialised).
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.launch_site.is_empty() {
            return Err(RecordError::EmptySite);
        }
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(RecordError::InvalidPayload(self.payload_mass_kg));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – inclusive numeric interval
// ---------------------------------------------------------------------------

/// Inclusive `[low, high]` payload interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// An inverted range contains nothing.
    pub fn contains(&self, mass_kg: f64) -> bool {
        self.low <= mass_kg && mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices. Never mutated after load.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches (rows), in file order.
    pub records: Vec<LaunchRecord>,
    /// Sorted set of distinct launch sites.
    pub sites: BTreeSet<String>,
    /// Sorted set of distinct booster version categories.
    pub booster_categories: BTreeSet<String>,
    /// Smallest and largest payload mass; `0..0` when empty.
    pub payload_bounds: PayloadRange,
}

impl LaunchDataset {
    /// Build the indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites = records.iter().map(|r| r.launch_site.clone()).collect();
        let booster_categories = records
            .iter()
            .map(|r| r.booster_version_category.clone())
            .collect();

        let payload_bounds = if records.is_empty() {
            PayloadRange::new(0.0, 0.0)
        } else {
            let min = records
                .iter()
                .map(|r| r.payload_mass_kg)
                .fold(f64::INFINITY, f64::min);
            let max = records
                .iter()
                .map(|r| r.payload_mass_kg)
                .fold(f64::NEG_INFINITY, f64::max);
            PayloadRange::new(min, max)
        };

        LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, mass: f64, outcome: Outcome) -> LaunchRecord {
        LaunchRecord::new(site, mass, outcome, "FT").unwrap()
    }

    #[test]
    fn test_record_invariants() {
        assert_eq!(
            LaunchRecord::new("", 10.0, Outcome::Success, "v1.0"),
            Err(RecordError::EmptySite)
        );
        assert!(matches!(
            LaunchRecord::new("KSC LC-39A", -1.0, Outcome::Success, "v1.0"),
            Err(RecordError::InvalidPayload(_))
        ));
        assert!(matches!(
            LaunchRecord::new("KSC LC-39A", f64::NAN, Outcome::Success, "v1.0"),
            Err(RecordError::InvalidPayload(_))
        ));
        assert!(LaunchRecord::new("KSC LC-39A", 0.0, Outcome::Failure, "v1.0").is_ok());
    }

    #[test]
    fn test_outcome_from_class() {
        assert_eq!(Outcome::try_from(1), Ok(Outcome::Success));
        assert_eq!(Outcome::try_from(0), Ok(Outcome::Failure));
        assert_eq!(Outcome::try_from(2), Err(RecordError::InvalidClass(2)));
        assert_eq!(Outcome::Success.as_class(), 1);
        assert_eq!(Outcome::from(false), Outcome::Failure);
    }

    #[test]
    fn test_outcome_from_float_and_text() {
        assert_eq!(Outcome::from_class_f64(1.0), Ok(Outcome::Success));
        assert_eq!(Outcome::from_class_f64(0.0), Ok(Outcome::Failure));
        assert_eq!(Outcome::from_class_f64(0.5), Err(RecordError::NonIntegralClass(0.5)));
        assert!(Outcome::from_class_f64(f64::NAN).is_err());

        assert_eq!("1".parse::<Outcome>(), Ok(Outcome::Success));
        assert_eq!("1.0".parse::<Outcome>(), Ok(Outcome::Success));
        assert_eq!(" 0.0 ".parse::<Outcome>(), Ok(Outcome::Failure));
        assert_eq!("true".parse::<Outcome>(), Ok(Outcome::Success));
        assert_eq!("false".parse::<Outcome>(), Ok(Outcome::Failure));
        assert_eq!("2".parse::<Outcome>(), Err(RecordError::InvalidClass(2)));
        assert_eq!(
            "yes".parse::<Outcome>(),
            Err(RecordError::UnreadableClass("yes".into()))
        );
    }

    #[test]
    fn test_outcome_deserialize_forms() {
        for (json, expected) in [
            ("1", Outcome::Success),
            ("0", Outcome::Failure),
            ("1.0", Outcome::Success),
            ("0.0", Outcome::Failure),
            ("true", Outcome::Success),
            ("false", Outcome::Failure),
            ("\"1\"", Outcome::Success),
        ] {
            assert_eq!(serde_json::from_str::<Outcome>(json).unwrap(), expected, "{json}");
        }
        assert!(serde_json::from_str::<Outcome>("1.5").is_err());
        assert!(serde_json::from_str::<Outcome>("-1").is_err());
        assert!(serde_json::from_str::<Outcome>("null").is_err());
    }

    #[test]
    fn test_dataset_indices() {
        let ds = LaunchDataset::from_records(vec![
            record("VAFB SLC-4E", 9600.0, Outcome::Success),
            record("CCAFS LC-40", 0.0, Outcome::Failure),
            record("VAFB SLC-4E", 500.0, Outcome::Success),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.sites.iter().collect::<Vec<_>>(),
            vec!["CCAFS LC-40", "VAFB SLC-4E"]
        );
        assert_eq!(ds.booster_categories.len(), 1);
        assert_eq!(ds.payload_bounds, PayloadRange::new(0.0, 9600.0));
    }

    #[test]
    fn test_empty_dataset_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds, PayloadRange::new(0.0, 0.0));
    }

    #[test]
    fn test_inverted_range_contains_nothing() {
        let range = PayloadRange::new(1000.0, 500.0);
        assert!(!range.contains(750.0));
        assert!(!range.contains(500.0));
        assert!(PayloadRange::new(500.0, 500.0).contains(500.0));
    }
}
