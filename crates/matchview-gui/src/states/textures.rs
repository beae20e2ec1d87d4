use matchview_core::controller::{MatchViewController, RequestToken};
use matchview_core::model::Panel;

use crate::convert::decoded_to_color_image;

struct PanelTexture {
    revision: RequestToken,
    handle: egui::TextureHandle,
}

/// GPU copies of the two panel images, re-uploaded only when the
/// controller's pixels change.
#[derive(Default)]
pub struct PanelTextures {
    slots: [Option<PanelTexture>; 2],
}

impl PanelTextures {
    pub fn sync(&mut self, ctx: &egui::Context, controller: &MatchViewController) {
        for (slot, panel) in self.slots.iter_mut().zip(Panel::BOTH) {
            match controller.pixels(panel) {
                None => *slot = None,
                Some(p) if slot.as_ref().is_some_and(|t| t.revision == p.revision) => {}
                Some(p) => {
                    let handle = ctx.load_texture(
                        format!("panel-{panel}"),
                        decoded_to_color_image(&p.image),
                        egui::TextureOptions::LINEAR,
                    );
                    *slot = Some(PanelTexture {
                        revision: p.revision,
                        handle,
                    });
                }
            }
        }
    }

    pub fn get(&self, panel: Panel) -> Option<egui::TextureId> {
        let index = match panel {
            Panel::A => 0,
            Panel::B => 1,
        };
        self.slots[index].as_ref().map(|t| t.handle.id())
    }
}
