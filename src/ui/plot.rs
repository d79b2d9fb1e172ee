use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{PieSeries, ScatterSeries};
use crate::color::{ColorMap, outcome_color};
use crate::data::model::columns;
use crate::state::AppState;

/// Vertices per full circle when drawing pie slices.
const PIE_RESOLUTION: usize = 128;

// ---------------------------------------------------------------------------
// Central panel: pie on top, scatter below
// ---------------------------------------------------------------------------

/// Render both charts in the central panel.
pub fn dashboard_plots(ui: &mut Ui, state: &AppState) {
    let (Some(pie), Some(scatter)) = (&state.pie, &state.scatter) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view launches  (File → Open…)");
        });
        return;
    };

    let half = (ui.available_height() / 2.0 - 40.0).max(150.0);

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(pie.title.as_str());
    });
    success_pie(ui, pie, half);

    ui.separator();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(scatter.title.as_str());
    });
    payload_scatter(ui, scatter, state.color_map.as_ref());
}

// ---------------------------------------------------------------------------
// Success pie
// ---------------------------------------------------------------------------

/// Outline of one pie slice from `start` to `end` (radians, clockwise from 12 o'clock).
fn sector(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) / TAU) * PIE_RESOLUTION as f64).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start + (end - start) * i as f64 / steps as f64;
        points.push([angle.sin(), angle.cos()]);
    }
    points
}

fn success_pie(ui: &mut Ui, pie: &PieSeries, height: f32) {
    let total = pie.total();

    Plot::new("success_pie")
        .legend(Legend::default())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            if total == 0 {
                plot_ui.text(Text::new(
                    PlotPoint::new(0.0, 0.0),
                    RichText::new("No launches").heading(),
                ));
                return;
            }

            let mut start = 0.0;
            for (label, value) in pie.slices() {
                let share = value as f64 / total as f64;
                if share == 0.0 {
                    continue;
                }
                let end = start + share * TAU;
                let color = outcome_color(label);

                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(sector(start, end)))
                        .name(label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = (start + end) / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.6 * mid.sin(), 0.6 * mid.cos()),
                    RichText::new(format!("{:.1}%", share * 100.0))
                        .strong()
                        .color(Color32::WHITE),
                ));
                start = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Payload scatter
// ---------------------------------------------------------------------------

fn payload_scatter(ui: &mut Ui, scatter: &ScatterSeries, color_map: Option<&ColorMap>) {
    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label(scatter.x_label.as_str())
        .y_axis_label(scatter.y_label.as_str())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name, value| {
            match scatter.nearest(name, value.x, value.y) {
                Some(p) => format!(
                    "{}={}\n{}={}\n{}={}\n{}={}",
                    columns::PAYLOAD_MASS_KG,
                    p.x,
                    columns::CLASS,
                    p.y,
                    columns::BOOSTER_VERSION_CATEGORY,
                    p.color_group,
                    columns::LAUNCH_SITE,
                    p.hover_label
                ),
                None => String::new(),
            }
        })
        .show(ui, |plot_ui| {
            for (group, points) in scatter.groups() {
                let color = color_map
                    .map(|cm| cm.color_for(group))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let series: PlotPoints = points
                    .iter()
                    .map(|p| [p.x, f64::from(p.y)])
                    .collect();

                plot_ui.points(
                    Points::new(series)
                        .name(group)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_outline() {
        let half = sector(0.0, TAU / 2.0);
        assert_eq!(half[0], [0.0, 0.0]);
        assert_eq!(half.len(), PIE_RESOLUTION / 2 + 2);

        let first = half[1];
        assert!((first[0] - 0.0).abs() < 1e-12 && (first[1] - 1.0).abs() < 1e-12);
        let last = half[half.len() - 1];
        assert!(last[0].abs() < 1e-9 && (last[1] + 1.0).abs() < 1e-12);

        assert_eq!(sector(1.0, 1.0 + 1e-6).len(), 3);
    }
}
