use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::dashboard::{PAYLOAD_STEP_KG, slider_marks, snap_to_step};
use crate::data::model::PayloadRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selectors
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    let Some(bounds) = state.payload_bounds() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            site_selector(ui, state);
            ui.separator();

            payload_selector(ui, state, bounds);
            ui.separator();

            if ui.button("Reset").clicked() {
                state.reset_selection();
            }
            ui.separator();

            booster_legend(ui, state);
        });
}

/// Launch-site dropdown.
fn site_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch Site");

    let current = state.selection.site.display_name().to_string();
    let mut picked = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.site_options {
                let selection = option.selection();
                if ui
                    .selectable_label(selection == state.selection.site, &option.label)
                    .clicked()
                {
                    picked = Some(selection);
                }
            }
        });

    if let Some(site) = picked {
        state.set_site(site);
    }
}

/// Two stepped sliders for the inclusive payload range.
fn payload_selector(ui: &mut Ui, state: &mut AppState, bounds: PayloadRange) {
    ui.strong("Payload range (Kg):");

    let mut range = state.selection.payload_range;
    let slider_range = bounds.low..=bounds.high;

    let low_changed = ui
        .add(egui::Slider::new(&mut range.low, slider_range.clone()).text("min"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut range.high, slider_range).text("max"))
        .changed();

    if low_changed || high_changed {
        range.low = snap_to_step(range.low, bounds, PAYLOAD_STEP_KG);
        range.high = snap_to_step(range.high, bounds, PAYLOAD_STEP_KG);
        state.set_payload_range(range);
    }

    if range.low > range.high {
        ui.label(RichText::new("min is above max: nothing selected").color(Color32::YELLOW));
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for mark in slider_marks(bounds, PAYLOAD_STEP_KG) {
            ui.label(RichText::new(format!("{mark:.0}")).small().weak());
        }
    });
}

/// Colour swatches of the booster categories.
fn booster_legend(ui: &mut Ui, state: &AppState) {
    let Some(cm) = &state.color_map else {
        return;
    };
    egui::CollapsingHeader::new(RichText::new("Booster Version Category").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for (group, color) in cm.legend_entries() {
                ui.label(RichText::new(format!("● {group}")).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(scatter)) = (&state.dataset, &state.scatter) {
            ui.label(format!(
                "{} launches loaded, {} in selection",
                ds.len(),
                scatter.points.len()
            ));
        }

        if let Some(rate) = state.pie.as_ref().and_then(|pie| pie.counts().success_rate()) {
            ui.separator();
            ui.label(format!("{} success rate: {:.1}%", state.selection.site.display_name(), rate * 100.0));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Launch Table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
