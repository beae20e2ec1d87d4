use std::sync::mpsc;

use matchview_core::api::{HttpApi, ReconstructionApi};
use matchview_core::controller::{Reply, Ticket};

use crate::messages::WorkerResult;

use super::send;

pub(super) fn handle_fetch(
    api: &HttpApi,
    ticket: Ticket,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    tracing::debug!(token = %ticket.token, request = %ticket.request, "fetching");
    let result = api.execute(&ticket.request);
    send(tx, ctx, WorkerResult::Reply(Reply::new(ticket, result)));
}
