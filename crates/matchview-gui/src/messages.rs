use std::path::PathBuf;
use std::sync::Arc;

use matchview_core::controller::{Reply, Ticket};
use matchview_core::pixels::DecodedImage;
use matchview_core::render::Scene;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Execute one controller request against the backend.
    Fetch(Ticket),

    /// Rasterise the current view and write it as PNG.
    ExportPng {
        path: PathBuf,
        scene: Scene,
        pixels: [Option<Arc<DecodedImage>>; 2],
    },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    Reply(Reply),
    Exported { path: PathBuf },
    Error { message: String },
}
