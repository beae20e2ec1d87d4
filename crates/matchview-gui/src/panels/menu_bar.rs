use std::sync::Arc;

use matchview_core::interaction::{dispatch, InputEvent};
use matchview_core::model::Panel;

use crate::app::MatchViewApp;
use crate::messages::WorkerCommand;

pub fn show(ctx: &egui::Context, app: &mut MatchViewApp) {
    let export_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::E);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(
                        egui::Button::new("Export View as PNG...")
                            .shortcut_text(ctx.format_shortcut(&export_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    export_view(app);
                }

                if ui.button("Reload Image List").clicked() {
                    ui.close();
                    app.controller.refresh_images();
                    app.ui_state.add_log("Reloading image list".into());
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Reset Views").clicked() {
                    ui.close();
                    for panel in Panel::BOTH {
                        dispatch(&mut app.controller, InputEvent::ResetView { panel });
                    }
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&export_shortcut)) {
            export_view(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn export_view(app: &mut MatchViewApp) {
    if app.controller.selected(Panel::A).is_none() {
        app.ui_state.alert("Select an image first");
        return;
    }
    let scene = app.controller.scene();
    let pixels = Panel::BOTH.map(|panel| {
        app.controller
            .pixels(panel)
            .map(|p| Arc::clone(&p.image))
    });
    let cmd_tx = app.cmd_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("matches.png")
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::ExportPng {
                path,
                scene,
                pixels,
            });
        }
    });
}
