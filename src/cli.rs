use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::dashboard::{self, Selection};
use crate::data::filter::{ALL_SITES, SiteSelection};
use crate::data::loader;
use crate::data::model::{LaunchDataset, PayloadRange};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "launch-dash")]
#[command(about = "Launch records dashboard: success share per site and payload vs. outcome")]
pub struct Cli {
    /// Launch records file (.csv, .json, .parquet). Without it, use File → Open…
    pub data: Option<PathBuf>,

    /// Initial launch site, or ALL
    #[arg(long, default_value = ALL_SITES)]
    pub site: SiteSelection,

    /// Lower payload bound in kg (defaults to the dataset minimum)
    #[arg(long)]
    pub low: Option<f64>,

    /// Upper payload bound in kg (defaults to the dataset maximum)
    #[arg(long)]
    pub high: Option<f64>,

    /// Print both chart series as JSON and exit instead of opening a window
    #[arg(long, requires = "data")]
    pub json: bool,
}

impl Cli {
    /// Selection requested on the command line, missing bounds taken from the dataset.
    pub fn selection(&self, dataset: &LaunchDataset) -> Selection {
        let bounds = dataset.payload_bounds;
        Selection {
            site: self.site.clone(),
            payload_range: PayloadRange::new(
                self.low.unwrap_or(bounds.low),
                self.high.unwrap_or(bounds.high),
            ),
        }
    }
}

/// Both chart series for `selection` as pretty JSON.
pub fn snapshot_json(dataset: &LaunchDataset, selection: &Selection) -> Result<String> {
    let snapshot = dashboard::snapshot(dataset, selection);
    serde_json::to_string_pretty(&snapshot).context("serializing chart series")
}

/// Headless mode: load, compute and print to stdout.
pub fn export_json(cli: &Cli) -> Result<()> {
    let path = cli.data.as_deref().context("no data file given")?;
    let dataset = loader::load_file(path)
        .with_context(|| format!("loading {}", path.display()))?;
    log::info!("Loaded {} launches from {}", dataset.len(), path.display());

    let selection = cli.selection(&dataset);
    println!("{}", snapshot_json(&dataset, &selection)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0").unwrap(),
            LaunchRecord::new("KSC LC-39A", 5300.0, Outcome::Success, "FT").unwrap(),
            LaunchRecord::new("KSC LC-39A", 9600.0, Outcome::Failure, "B4").unwrap(),
        ])
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["launch-dash"]).unwrap();
        assert_eq!(cli.data, None);
        assert_eq!(cli.site, SiteSelection::All);
        assert!(!cli.json);

        let selection = cli.selection(&dataset());
        assert_eq!(selection.payload_range, PayloadRange::new(0.0, 9600.0));
    }

    #[test]
    fn test_selection_flags() {
        let cli = Cli::try_parse_from([
            "launch-dash",
            "spacex_launch_dash.csv",
            "--site",
            "KSC LC-39A",
            "--low",
            "1000",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let selection = cli.selection(&dataset());
        assert_eq!(selection.site, SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(selection.payload_range, PayloadRange::new(1000.0, 9600.0));
    }

    #[test]
    fn test_json_requires_data() {
        assert!(Cli::try_parse_from(["launch-dash", "--json"]).is_err());
    }

    #[test]
    fn test_snapshot_json() {
        let ds = dataset();
        let selection = Selection {
            site: SiteSelection::Site("KSC LC-39A".into()),
            payload_range: PayloadRange::new(5000.0, 6000.0),
        };
        let json: serde_json::Value =
            serde_json::from_str(&snapshot_json(&ds, &selection).unwrap()).unwrap();

        assert_eq!(json["pie"]["title"], "Success Count for KSC LC-39A");
        assert_eq!(json["pie"]["values"], serde_json::json!([1, 1]));
        assert_eq!(
            json["scatter"]["points"],
            serde_json::json!([{
                "x": 5300.0,
                "y": 1,
                "color_group": "FT",
                "hover_label": "KSC LC-39A"
            }])
        );
    }
}
