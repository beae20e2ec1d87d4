use matchview_core::model::Panel;

use crate::app::MatchViewApp;

pub fn show(ctx: &egui::Context, app: &mut MatchViewApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            if let Some(source) = app.controller.active_source() {
                ui.label(format!("Source: {source}"));
                ui.separator();
            }
            for panel in Panel::BOTH {
                if let Some(image) = app.controller.image(panel) {
                    ui.label(format!(
                        "{panel}: {} ({} points, {} triangulated)",
                        image.name,
                        image.points.len(),
                        image.triangulated_count()
                    ));
                    ui.label(format!(
                        "Zoom: {:.0}%",
                        app.controller.viewport(panel).scale() * 100.0
                    ));
                    ui.separator();
                }
            }
            let matches = app.controller.matches();
            if matches.any_loaded() {
                ui.label(format!("Matches: {}", matches.len()));
            }
        });

        ui.add_space(2.0);
    });
}
