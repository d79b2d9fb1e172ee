use serde::Serialize;

use crate::chart::{PieSeries, ScatterSeries, pie_series, scatter_series};
use crate::data::aggregate::aggregate_outcomes;
use crate::data::filter::{ALL_SITES, SiteSelection, filter_by_payload, filter_by_site};
use crate::data::model::{LaunchDataset, PayloadRange};

/// Step of the payload range selector, in kilograms.
pub const PAYLOAD_STEP_KG: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Selection → filtered subset → chart series
// ---------------------------------------------------------------------------

/// What the user picked in the site selector and payload range selector.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            site: SiteSelection::All,
            payload_range: PayloadRange::new(0.0, 0.0),
        }
    }
}

impl Selection {
    /// All sites, full payload range.
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        Selection {
            site: SiteSelection::All,
            payload_range: dataset.payload_bounds,
        }
    }
}

/// Both charts for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub pie: PieSeries,
    pub scatter: ScatterSeries,
}

/// Success share for the selected site. The payload range does not apply.
pub fn success_pie(dataset: &LaunchDataset, selection: &Selection) -> PieSeries {
    let subset = filter_by_site(&dataset.records, &selection.site);
    pie_series(aggregate_outcomes(subset), &selection.site)
}

/// Payload vs. outcome for launches inside both the payload range and the site.
pub fn payload_scatter(dataset: &LaunchDataset, selection: &Selection) -> ScatterSeries {
    let in_range = filter_by_payload(&dataset.records, selection.payload_range);
    scatter_series(filter_by_site(in_range, &selection.site))
}

pub fn snapshot(dataset: &LaunchDataset, selection: &Selection) -> DashboardSnapshot {
    DashboardSnapshot {
        pie: success_pie(dataset, selection),
        scatter: payload_scatter(dataset, selection),
    }
}

// ---------------------------------------------------------------------------
// Selector contents
// ---------------------------------------------------------------------------

/// One entry of the site dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

impl SiteOption {
    pub fn selection(&self) -> SiteSelection {
        match self.value.parse() {
            Ok(selection) => selection,
            Err(never) => match never {},
        }
    }
}

/// "All Sites" first, then every distinct site in sorted order.
pub fn site_options(dataset: &LaunchDataset) -> Vec<SiteOption> {
    std::iter::once(SiteOption {
        label: SiteSelection::All.display_name().to_string(),
        value: ALL_SITES.to_string(),
    })
    .chain(dataset.sites.iter().map(|site| SiteOption {
        label: site.clone(),
        value: site.clone(),
    }))
    .collect()
}

/// Tick positions for the payload selector: `min, min + step, ...` up to `max`.
pub fn slider_marks(bounds: PayloadRange, step: f64) -> Vec<f64> {
    if step <= 0.0 || bounds.high <= bounds.low {
        return vec![bounds.low];
    }
    let n = ((bounds.high - bounds.low) / step).floor() as usize;
    (0..=n).map(|i| bounds.low + i as f64 * step).collect()
}

/// Snap a dragged selector value onto the `min + k * step` grid, clamped to
/// the bounds so `max` stays reachable when it is off the grid.
pub fn snap_to_step(value: f64, bounds: PayloadRange, step: f64) -> f64 {
    if bounds.high <= bounds.low {
        return bounds.low;
    }
    let value = value.clamp(bounds.low, bounds.high);
    if step <= 0.0 || value == bounds.high {
        return value;
    }
    let snapped = bounds.low + ((value - bounds.low) / step).round() * step;
    snapped.clamp(bounds.low, bounds.high)
}
