use std::sync::mpsc;

use matchview_core::api::HttpApi;
use matchview_core::config::ViewerConfig;
use matchview_core::controller::MatchViewController;

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{PanelTextures, UIState};
use crate::workers;

pub struct MatchViewApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub controller: MatchViewController,
    pub ui_state: UIState,
    pub textures: PanelTextures,
    pub config: ViewerConfig,
}

impl MatchViewApp {
    pub fn new(ctx: &egui::Context, config: ViewerConfig) -> Self {
        let api = HttpApi::new(&config.server_url, config.request_timeout());
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(api, result_tx, ctx.clone());

        let mut controller = MatchViewController::new(&config);
        controller.start();

        let mut ui_state = UIState::default();
        ui_state.add_log(format!("Backend: {}", config.server_url));

        let mut app = Self {
            cmd_tx,
            result_rx,
            controller,
            ui_state,
            textures: PanelTextures::default(),
            config,
        };
        app.flush_requests();
        app
    }

    /// Hand every queued controller request to the worker.
    pub fn flush_requests(&mut self) {
        for ticket in self.controller.take_requests() {
            self.send_command(WorkerCommand::Fetch(ticket));
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Reply(reply) => {
                    if let Err(ref e) = reply.result {
                        if self.controller.is_current(&reply.ticket) {
                            self.ui_state
                                .add_log(format!("ERROR: {} ({e})", reply.ticket.request));
                        }
                    }
                    self.controller.apply(reply);
                }
                WorkerResult::Exported { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for MatchViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.textures.sync(ctx, &self.controller);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        self.flush_requests();

        if let Some(message) = self.ui_state.alert.clone() {
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(message);
                        ui.add_space(8.0);
                        if ui.button("OK").clicked() {
                            self.ui_state.alert = None;
                        }
                    });
                });
        }

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About MatchView")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("MatchView");
                        ui.label("Feature correspondence viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.label(format!("Backend {}", self.config.server_url));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
