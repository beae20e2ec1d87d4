use matchview_core::controller::SummaryView;
use matchview_core::error::MatchViewError;
use matchview_core::model::{ImageId, MatchClass, Panel};

use crate::app::MatchViewApp;

use super::section_header;

const LEFT_PANEL_WIDTH: f32 = 280.0;
const COMBO_WIDTH: f32 = 200.0;

pub fn show(ctx: &egui::Context, app: &mut MatchViewApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                let mut focused = source_section(ui, app);
                ui.separator();
                focused |= image_section(ui, app);
                ui.separator();
                display_section(ui, app);
                ui.separator();
                summary_section(ui, app);

                app.ui_state.selector_focused =
                    focused || ctx.memory(|mem| mem.any_popup_open());
            });
        });
}

fn image_name(app: &MatchViewApp, id: Option<ImageId>) -> String {
    match id {
        None => "None".to_string(),
        Some(id) => app
            .controller
            .image_entry(id)
            .map_or_else(|| format!("#{id}"), |e| e.name.clone()),
    }
}

/// Returns whether the selector holds keyboard focus.
fn source_section(ui: &mut egui::Ui, app: &mut MatchViewApp) -> bool {
    section_header(ui, "Data Source", None);
    ui.add_space(4.0);

    let sources = app.controller.sources().to_vec();
    let active = app.controller.active_source().map(str::to_string);
    if sources.len() <= 1 {
        ui.label(active.unwrap_or_else(|| "Connecting...".to_string()));
        return false;
    }

    let mut chosen = None;
    let response = egui::ComboBox::from_id_salt("source")
        .width(COMBO_WIDTH)
        .selected_text(active.clone().unwrap_or_default())
        .show_ui(ui, |ui| {
            for name in &sources {
                let is_active = active.as_deref() == Some(name.as_str());
                if ui.selectable_label(is_active, name).clicked() && !is_active {
                    chosen = Some(name.clone());
                }
            }
        });

    if let Some(name) = chosen {
        match app.controller.select_source(&name) {
            Ok(()) => app.ui_state.add_log(format!("Switching to source {name}")),
            Err(e) => app.ui_state.add_log(format!("ERROR: {e}")),
        }
    }
    response.response.has_focus()
}

fn image_section(ui: &mut egui::Ui, app: &mut MatchViewApp) -> bool {
    section_header(ui, "Images", Some(&format!("{}", app.controller.images().len())));
    ui.add_space(4.0);

    let images: Vec<(ImageId, String)> = app
        .controller
        .images()
        .iter()
        .map(|e| (e.id, e.name.clone()))
        .collect();
    let selected_a = app.controller.selected(Panel::A);
    let mut choice_a = selected_a;
    let response_a = egui::ComboBox::from_label("Image A")
        .width(COMBO_WIDTH)
        .selected_text(image_name(app, selected_a))
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut choice_a, None, "None");
            for (id, name) in &images {
                ui.selectable_value(&mut choice_a, Some(*id), name);
            }
        });
    if choice_a != selected_a {
        app.controller.select_a(choice_a);
    }

    let candidates: Vec<(ImageId, String)> = app
        .controller
        .candidates()
        .iter()
        .map(|&id| (id, image_name(app, Some(id))))
        .collect();
    let selected_b = app.controller.selected(Panel::B);
    let mut choice_b = selected_b;
    let response_b = ui.add_enabled_ui(selected_a.is_some(), |ui| {
        egui::ComboBox::from_label("Image B")
            .width(COMBO_WIDTH)
            .selected_text(image_name(app, selected_b))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut choice_b, None, "None");
                for (id, name) in &candidates {
                    ui.selectable_value(&mut choice_b, Some(*id), name);
                }
            })
            .response
    });
    if choice_b != selected_b {
        app.controller.select_b(choice_b);
    }

    if selected_a.is_some() {
        ui.small(format!("{} images share matches with A", candidates.len()));
        if !candidates.is_empty() {
            ui.small("\u{2190} \u{2192} step through image B");
        }
    }

    response_a.response.has_focus() || response_b.inner.has_focus()
}

fn display_section(ui: &mut egui::Ui, app: &mut MatchViewApp) {
    section_header(ui, "Display", None);
    ui.add_space(4.0);

    let flags = *app.controller.flags();

    let mut show_markers = flags.show_markers;
    if ui.checkbox(&mut show_markers, "Show feature points").changed() {
        app.controller.set_show_markers(show_markers);
    }

    let mut show_lines = flags.show_lines;
    if ui.checkbox(&mut show_lines, "Draw matches").changed() {
        match app.controller.set_show_lines(show_lines) {
            Ok(()) => {}
            Err(e @ MatchViewError::MissingPair) => app.ui_state.alert(e.to_string()),
            Err(e) => app.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    let mut only_matched = flags.only_matched;
    if ui
        .checkbox(&mut only_matched, "Only matched points")
        .changed()
    {
        app.controller.set_only_matched(only_matched);
    }

    ui.add_space(4.0);
    ui.label("Match types");
    let filter = app.controller.class_filter();
    for class in MatchClass::ALL {
        let mut enabled = filter.contains(class);
        let label = match class {
            MatchClass::Inlier => "Inliers",
            MatchClass::Outlier => "Outliers",
        };
        if ui.checkbox(&mut enabled, label).changed() {
            app.controller.set_class_filter(class, enabled);
        }
    }

    ui.add_space(4.0);
    let mut size = flags.marker_size;
    if ui
        .add(
            egui::Slider::new(&mut size, 0.5..=30.0)
                .logarithmic(true)
                .clamping(egui::SliderClamping::Never)
                .text("Marker size"),
        )
        .changed()
    {
        app.controller.set_marker_size(size);
    }
    ui.small("Ctrl + wheel over a panel also resizes markers");
}

fn summary_section(ui: &mut egui::Ui, app: &mut MatchViewApp) {
    section_header(ui, "Match Statistics", None);
    ui.add_space(4.0);

    let summary = app.controller.summary();
    match summary {
        SummaryView::Ready(_) => {
            egui::Grid::new("match_summary")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for (label, value) in summary.rows() {
                        ui.label(label);
                        ui.strong(value);
                        ui.end_row();
                    }
                });
        }
        SummaryView::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading statistics...");
            });
        }
        SummaryView::Prompt | SummaryView::Unavailable(_) => {
            for (message, _) in summary.rows() {
                ui.weak(message);
            }
        }
    }
}
