use std::path::Path;

use crate::chart::{PieSeries, ScatterSeries};
use crate::color::ColorMap;
use crate::dashboard::{self, Selection, SiteOption, site_options};
use crate::data::filter::SiteSelection;
use crate::data::loader;
use crate::data::model::{LaunchDataset, PayloadRange};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    /// Site selector and payload range selector values.
    pub selection: Selection,

    /// Entries of the site dropdown, "All Sites" first.
    pub site_options: Vec<SiteOption>,

    /// Success pie for the current selection (cached).
    pub pie: Option<PieSeries>,

    /// Payload scatter for the current selection (cached).
    pub scatter: Option<ScatterSeries>,

    /// Booster category colours.
    pub color_map: Option<ColorMap>,

    /// Whether the table of filtered launches is shown.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset, reset the selectors and colours.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.selection = Selection::for_dataset(&dataset);
        self.site_options = site_options(&dataset);
        self.color_map = Some(ColorMap::new(&dataset.booster_categories));

        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Load a file and make it the current dataset. On failure the previous
    /// dataset stays and the error goes to the status line.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} sites ({})",
                    dataset.len(),
                    dataset.sites.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute both charts from the current selection.
    pub fn refresh(&mut self) {
        if let Some(ds) = &self.dataset {
            self.pie = Some(dashboard::success_pie(ds, &self.selection));
            self.scatter = Some(dashboard::payload_scatter(ds, &self.selection));
        }
    }

    /// Change the site selector.
    pub fn set_site(&mut self, site: SiteSelection) {
        if self.selection.site != site {
            log::debug!("Site selection changed to {site}");
            self.selection.site = site;
            self.refresh();
        }
    }

    /// Change the payload range selector. An inverted range is kept as-is.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.selection.payload_range != range {
            log::debug!("Payload range changed to [{}, {}]", range.low, range.high);
            self.selection.payload_range = range;
            self.refresh();
        }
    }

    /// Back to all sites and the full payload range.
    pub fn reset_selection(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection = Selection::for_dataset(ds);
            self.refresh();
        }
    }

    /// Full payload bounds of the loaded dataset.
    pub fn payload_bounds(&self) -> Option<PayloadRange> {
        self.dataset.as_ref().map(|ds| ds.payload_bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn loaded_state() -> AppState {
        let records = vec![
            LaunchRecord::new("A", 200.0, Outcome::Success, "FT").unwrap(),
            LaunchRecord::new("A", 600.0, Outcome::Failure, "FT").unwrap(),
            LaunchRecord::new("B", 900.0, Outcome::Success, "B4").unwrap(),
        ];
        let mut state = AppState::default();
        state.set_dataset(LaunchDataset::from_records(records));
        state
    }

    #[test]
    fn test_empty_state_has_no_charts() {
        let mut state = AppState::default();
        state.refresh();
        assert!(state.pie.is_none());
        assert!(state.scatter.is_none());
        assert_eq!(state.payload_bounds(), None);
    }

    #[test]
    fn test_set_dataset_computes_charts() {
        let state = loaded_state();
        assert_eq!(state.selection.site, SiteSelection::All);
        assert_eq!(state.payload_bounds(), Some(PayloadRange::new(200.0, 900.0)));
        assert_eq!(state.site_options.len(), 3);
        assert_eq!(state.pie.as_ref().unwrap().values, [2, 1]);
        assert_eq!(state.scatter.as_ref().unwrap().points.len(), 3);
    }

    #[test]
    fn test_selection_changes_recompute() {
        let mut state = loaded_state();

        state.set_site(SiteSelection::Site("A".into()));
        assert_eq!(state.pie.as_ref().unwrap().values, [1, 1]);
        assert_eq!(state.scatter.as_ref().unwrap().points.len(), 2);

        state.set_payload_range(PayloadRange::new(500.0, 1000.0));
        assert_eq!(state.pie.as_ref().unwrap().values, [1, 1]);
        assert_eq!(state.scatter.as_ref().unwrap().points.len(), 1);

        state.set_payload_range(PayloadRange::new(1000.0, 500.0));
        assert!(state.scatter.as_ref().unwrap().points.is_empty());

        state.reset_selection();
        assert_eq!(state.selection.site, SiteSelection::All);
        assert_eq!(state.scatter.as_ref().unwrap().points.len(), 3);
    }

    #[test]
    fn test_failed_load_keeps_dataset() {
        let mut state = loaded_state();
        state.load_path(Path::new("does-not-exist.csv"));

        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
        assert_eq!(state.dataset.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_load_path_replaces_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.csv");
        std::fs::write(
            &path,
            "Launch Site,Payload Mass (kg),class,Booster Version Category\nKSC LC-39A,2490,1,FT\n",
        )
        .unwrap();

        let mut state = loaded_state();
        state.status_message = Some("Error: stale".into());
        state.load_path(&path);

        assert_eq!(state.status_message, None);
        assert_eq!(state.dataset.as_ref().unwrap().len(), 1);
        assert_eq!(state.selection.payload_range, PayloadRange::new(2490.0, 2490.0));
        assert_eq!(state.pie.as_ref().unwrap().values, [1, 0]);
    }
}
