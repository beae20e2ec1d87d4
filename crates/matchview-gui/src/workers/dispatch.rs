use std::sync::mpsc;

use matchview_core::api::HttpApi;

use crate::messages::{WorkerCommand, WorkerResult};

use super::{export, fetch};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    api: HttpApi,
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("matchview-worker".into())
        .spawn(move || {
            worker_loop(api, cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

fn worker_loop(
    api: HttpApi,
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Fetch(ticket) => {
                fetch::handle_fetch(&api, ticket, &tx, &ctx);
            }
            WorkerCommand::ExportPng {
                path,
                scene,
                pixels,
            } => {
                export::handle_export(&path, &scene, &pixels, &tx, &ctx);
            }
        }
    }
}
