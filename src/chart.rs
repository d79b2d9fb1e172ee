use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::aggregate::OutcomeCounts;
use crate::data::filter::SiteSelection;
use crate::data::model::{LaunchRecord, columns};

// ---------------------------------------------------------------------------
// Pie series: success share for the selected site
// ---------------------------------------------------------------------------

pub const SUCCESS_LABEL: &str = "Success";
pub const FAILURE_LABEL: &str = "Failure";

/// Chart-ready proportion data: two slices, success first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSeries {
    pub labels: [String; 2],
    pub values: [usize; 2],
    pub title: String,
}

impl PieSeries {
    pub fn total(&self) -> usize {
        self.values.iter().sum()
    }

    pub fn counts(&self) -> OutcomeCounts {
        OutcomeCounts {
            success: self.values[0],
            failure: self.values[1],
        }
    }

    /// `(label, value)` pairs in slice order.
    pub fn slices(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

pub fn pie_series(counts: OutcomeCounts, selected_site: &SiteSelection) -> PieSeries {
    PieSeries {
        labels: [SUCCESS_LABEL.to_string(), FAILURE_LABEL.to_string()],
        values: [counts.success, counts.failure],
        title: format!("Success Count for {}", selected_site.display_name()),
    }
}

// ---------------------------------------------------------------------------
// Scatter series: payload mass vs. outcome
// ---------------------------------------------------------------------------

pub const SCATTER_TITLE: &str = "Payload Mass vs. Launch Success";

/// One launch on the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: u8,
    pub color_group: String,
    pub hover_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterSeries {
    /// Points split by colour group, groups in sorted order, points in series order.
    pub fn groups(&self) -> BTreeMap<&str, Vec<&ScatterPoint>> {
        let mut groups: BTreeMap<&str, Vec<&ScatterPoint>> = BTreeMap::new();
        for p in &self.points {
            groups.entry(p.color_group.as_str()).or_default().push(p);
        }
        groups
    }

    /// Point of `group` closest to `(x, y)`, used for hover labels.
    /// Distances are measured in axis fractions so kg and class weigh alike.
    pub fn nearest(&self, group: &str, x: f64, y: f64) -> Option<&ScatterPoint> {
        let (min_x, max_x) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            });
        let x_span = (max_x - min_x).max(1.0);

        self.points
            .iter()
            .filter(|p| p.color_group == group)
            .min_by(|a, b| {
                let da = ((a.x - x) / x_span).powi(2) + (f64::from(a.y) - y).powi(2);
                let db = ((b.x - x) / x_span).powi(2) + (f64::from(b.y) - y).powi(2);
                da.total_cmp(&db)
            })
    }
}

/// One point per record, in subset order.
///
/// The y axis keeps the raw `class` column name; no display label is applied.
pub fn scatter_series<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> ScatterSeries {
    let points = records
        .into_iter()
        .map(|r| ScatterPoint {
            x: r.payload_mass_kg,
            y: r.outcome.as_class(),
            color_group: r.booster_version_category.clone(),
            hover_label: r.launch_site.clone(),
        })
        .collect();

    ScatterSeries {
        title: SCATTER_TITLE.to_string(),
        x_label: columns::PAYLOAD_MASS_KG.to_string(),
        y_label: columns::CLASS.to_string(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;

    #[test]
    fn test_pie_series_titles() {
        let counts = OutcomeCounts { success: 10, failure: 16 };

        let pie = pie_series(counts, &SiteSelection::All);
        assert_eq!(pie.title, "Success Count for All Sites");
        assert_eq!(pie.labels, ["Success".to_string(), "Failure".to_string()]);
        assert_eq!(pie.values, [10, 16]);
        assert_eq!(pie.total(), 26);
        assert_eq!(pie.counts(), counts);

        let pie = pie_series(counts, &SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(pie.title, "Success Count for KSC LC-39A");
        assert_eq!(
            pie.slices().collect::<Vec<_>>(),
            vec![("Success", 10), ("Failure", 16)]
        );
    }

    #[test]
    fn test_scatter_points_follow_records() {
        let records = vec![
            LaunchRecord::new("CCAFS LC-40", 525.0, Outcome::Failure, "v1.0").unwrap(),
            LaunchRecord::new("KSC LC-39A", 9600.0, Outcome::Success, "FT").unwrap(),
            LaunchRecord::new("VAFB SLC-4E", 500.0, Outcome::Success, "v1.0").unwrap(),
        ];
        let series = scatter_series(&records);

        assert_eq!(series.title, "Payload Mass vs. Launch Success");
        assert_eq!(series.x_label, "Payload Mass (kg)");
        assert_eq!(series.y_label, "class");
        assert_eq!(series.points.len(), 3);
        assert_eq!(
            series.points[0],
            ScatterPoint {
                x: 525.0,
                y: 0,
                color_group: "v1.0".into(),
                hover_label: "CCAFS LC-40".into(),
            }
        );

        let groups = series.groups();
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["FT", "v1.0"]);
        assert_eq!(groups["v1.0"].len(), 2);
        assert_eq!(groups["v1.0"][1].hover_label, "VAFB SLC-4E");

        let hit = series.nearest("v1.0", 510.0, 0.9).unwrap();
        assert_eq!(hit.hover_label, "VAFB SLC-4E");
        let hit = series.nearest("v1.0", 510.0, 0.1).unwrap();
        assert_eq!(hit.hover_label, "CCAFS LC-40");
        assert!(series.nearest("B5", 510.0, 0.0).is_none());
    }

    #[test]
    fn test_series_serialize_for_renderers() {
        let series = scatter_series(std::iter::empty::<&LaunchRecord>());
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["points"], serde_json::json!([]));

        let pie = pie_series(OutcomeCounts::default(), &SiteSelection::All);
        let json = serde_json::to_value(&pie).unwrap();
        assert_eq!(json["values"], serde_json::json!([0, 0]));
        assert_eq!(json["labels"][0], "Success");
    }
}
