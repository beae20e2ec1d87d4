use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;

use matchview_core::pixels::DecodedImage;
use matchview_core::raster::rasterize;
use matchview_core::render::Scene;

use crate::messages::WorkerResult;

use super::{send, send_error};

pub(super) fn handle_export(
    path: &Path,
    scene: &Scene,
    pixels: &[Option<Arc<DecodedImage>>; 2],
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let image = match rasterize(scene, [pixels[0].as_deref(), pixels[1].as_deref()]) {
        Ok(image) => image,
        Err(e) => {
            send_error(tx, ctx, format!("Export failed: {e}"));
            return;
        }
    };
    if let Err(e) = image.save(path) {
        send_error(tx, ctx, format!("Failed to write {}: {e}", path.display()));
        return;
    }
    send(
        tx,
        ctx,
        WorkerResult::Exported {
            path: path.to_path_buf(),
        },
    );
}
