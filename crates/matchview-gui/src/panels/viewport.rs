use matchview_core::consts::LINE_WIDTH;
use matchview_core::geometry::Size2;
use matchview_core::interaction::{dispatch, InputEvent, Modifiers, NavKey};
use matchview_core::model::Panel;
use matchview_core::render::PanelFrame;

use crate::app::MatchViewApp;
use crate::convert::{color32, to_canvas, to_screen};

const PANEL_GAP: f32 = 6.0;

pub fn show(ctx: &egui::Context, app: &mut MatchViewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let area = ui.available_rect_before_wrap();
        let half = ((area.width() - PANEL_GAP) / 2.0).max(1.0);
        let rects = [
            egui::Rect::from_min_size(area.min, egui::vec2(half, area.height())),
            egui::Rect::from_min_size(
                area.min + egui::vec2(half + PANEL_GAP, 0.0),
                egui::vec2(half, area.height()),
            ),
        ];

        for (panel, rect) in Panel::BOTH.into_iter().zip(rects) {
            dispatch(
                &mut app.controller,
                InputEvent::Resize {
                    panel,
                    origin: to_canvas(area.min, rect.min),
                    size: Size2::new(rect.width() as f64, rect.height() as f64),
                },
            );
            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
            handle_pointer(ui, &response, app, panel, rect);
        }
        handle_keys(ctx, app);

        let scene = app.controller.scene();
        for (panel, rect) in Panel::BOTH.into_iter().zip(rects) {
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, egui::Color32::from_gray(30));
            draw_panel(&painter, rect, scene.panel(panel), app.textures.get(panel));
        }

        let overlay = ui.painter_at(area);
        for line in &scene.lines {
            overlay.line_segment(
                [to_screen(area.min, line.from), to_screen(area.min, line.to)],
                egui::Stroke::new(LINE_WIDTH as f32, color32(line.color)),
            );
        }
    });
}

fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut MatchViewApp,
    panel: Panel,
    rect: egui::Rect,
) {
    let controller = &mut app.controller;

    if response.hovered() {
        // Ctrl/Cmd + wheel arrives as a zoom gesture rather than a scroll.
        let (delta, command) = ui.input(|i| {
            if i.modifiers.command {
                ((i.zoom_delta() - 1.0) + i.raw_scroll_delta.y, true)
            } else {
                (i.raw_scroll_delta.y, false)
            }
        });
        if delta != 0.0 {
            if let Some(pos) = response.hover_pos() {
                dispatch(
                    controller,
                    InputEvent::Wheel {
                        panel,
                        pos: to_canvas(rect.min, pos),
                        delta: delta as f64,
                        modifiers: Modifiers { command },
                    },
                );
            }
        }
    }

    if response.drag_started_by(egui::PointerButton::Primary) {
        // Anchor at the press position so motion inside the drag threshold is kept.
        let origin = ui.input(|i| i.pointer.press_origin());
        if let Some(pos) = origin.or_else(|| response.interact_pointer_pos()) {
            dispatch(
                controller,
                InputEvent::PointerDown {
                    panel,
                    pos: to_canvas(rect.min, pos),
                },
            );
        }
    }

    if controller.viewport(panel).is_dragging() {
        let pointer = ui.input(|i| i.pointer.latest_pos());
        match pointer {
            Some(pos) if rect.contains(pos) => {
                if response.dragged() {
                    dispatch(
                        controller,
                        InputEvent::PointerMove {
                            panel,
                            pos: to_canvas(rect.min, pos),
                        },
                    );
                }
            }
            _ => {
                dispatch(controller, InputEvent::PointerLeave { panel });
            }
        }
    }

    if response.drag_stopped() {
        dispatch(controller, InputEvent::PointerUp { panel });
    }

    if response.double_clicked() {
        dispatch(controller, InputEvent::ResetView { panel });
    }
}

fn handle_keys(ctx: &egui::Context, app: &mut MatchViewApp) {
    let focus_in_selector = app.ui_state.selector_focused;
    let pressed: Vec<NavKey> = ctx.input(|i| {
        [
            (egui::Key::ArrowLeft, NavKey::Left),
            (egui::Key::ArrowRight, NavKey::Right),
            (egui::Key::ArrowUp, NavKey::Up),
            (egui::Key::ArrowDown, NavKey::Down),
        ]
        .into_iter()
        .filter(|(key, _)| i.key_pressed(*key))
        .map(|(_, nav)| nav)
        .collect()
    });
    for key in pressed {
        dispatch(
            &mut app.controller,
            InputEvent::Key {
                key,
                focus_in_selector,
            },
        );
    }
}

fn draw_panel(
    painter: &egui::Painter,
    rect: egui::Rect,
    frame: &PanelFrame,
    texture: Option<egui::TextureId>,
) {
    let Some(ref quad) = frame.image else {
        let hint = match frame.panel {
            Panel::A => "Select image A to begin",
            Panel::B => "Select image B to compare",
        };
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            hint,
            egui::FontId::proportional(18.0),
            egui::Color32::from_gray(100),
        );
        return;
    };

    if let Some(texture_id) = texture {
        let min = to_screen(rect.min, quad.rect.min);
        let max = to_screen(rect.min, quad.rect.max());
        painter.image(
            texture_id,
            egui::Rect::from_min_max(min, max),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    for marker in &frame.markers {
        painter.circle_filled(
            to_screen(rect.min, marker.center),
            marker.radius as f32,
            color32(marker.color),
        );
    }

    painter.text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        &quad.name,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}
