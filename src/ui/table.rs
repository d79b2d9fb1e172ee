use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::data::model::{Outcome, columns};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Table of the launches currently on the scatter chart.
pub fn launch_table(ui: &mut Ui, state: &AppState) {
    let Some(scatter) = &state.scatter else {
        return;
    };
    let points = &scatter.points;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for name in [
                columns::LAUNCH_SITE,
                columns::PAYLOAD_MASS_KG,
                columns::CLASS,
                columns::BOOSTER_VERSION_CATEGORY,
            ] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, points.len(), |mut row| {
                let p = &points[row.index()];
                let outcome = Outcome::from(p.y == 1);
                row.col(|ui| {
                    ui.label(p.hover_label.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", p.x));
                });
                row.col(|ui| {
                    let color = outcome_color(&outcome.to_string());
                    ui.label(RichText::new(format!("{} ({outcome})", p.y)).color(color));
                });
                row.col(|ui| {
                    ui.label(p.color_group.as_str());
                });
            });
        });
}
