//! Typed input events and their routing to viewports, marker size and
//! panel B navigation. Hosts translate their native events into
//! [`InputEvent`]s; nothing here depends on a windowing toolkit.

use crate::controller::MatchViewController;
use crate::geometry::{Point2, Size2};
use crate::model::Panel;
use crate::viewport::ZoomDirection;

/// Which parts of the view need repainting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Redraw {
    pub a: bool,
    pub b: bool,
    pub overlay: bool,
}

impl Redraw {
    pub const NONE: Redraw = Redraw {
        a: false,
        b: false,
        overlay: false,
    };

    pub const ALL: Redraw = Redraw {
        a: true,
        b: true,
        overlay: true,
    };

    /// One panel plus the overlay, which depends on both panels.
    pub fn panel(panel: Panel) -> Redraw {
        match panel {
            Panel::A => Redraw {
                a: true,
                b: false,
                overlay: true,
            },
            Panel::B => Redraw {
                a: false,
                b: true,
                overlay: true,
            },
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Redraw::NONE
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub command: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
}

impl NavKey {
    /// Right/Down advance, Left/Up go back.
    pub fn is_forward(self) -> bool {
        matches!(self, NavKey::Right | NavKey::Down)
    }
}

/// Positions are in the panel's own canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Positive `delta` scrolls up (zoom in / grow markers).
    Wheel {
        panel: Panel,
        pos: Point2,
        delta: f64,
        modifiers: Modifiers,
    },
    PointerDown {
        panel: Panel,
        pos: Point2,
    },
    PointerMove {
        panel: Panel,
        pos: Point2,
    },
    PointerUp {
        panel: Panel,
    },
    PointerLeave {
        panel: Panel,
    },
    Key {
        key: NavKey,
        /// Keyboard focus is inside a selection control (combo box, list).
        focus_in_selector: bool,
    },
    Resize {
        panel: Panel,
        origin: Point2,
        size: Size2,
    },
    ResetView {
        panel: Panel,
    },
}

/// Route one event and report what must be repainted.
pub fn dispatch(controller: &mut MatchViewController, event: InputEvent) -> Redraw {
    match event {
        InputEvent::Wheel {
            panel,
            pos,
            delta,
            modifiers,
        } => {
            let Some(direction) = ZoomDirection::from_wheel_delta(delta) else {
                return Redraw::NONE;
            };
            if modifiers.command {
                controller.adjust_marker_size(direction == ZoomDirection::In);
                Redraw::ALL
            } else if controller.viewport_mut(panel).zoom_at(pos, direction) {
                Redraw::panel(panel)
            } else {
                Redraw::NONE
            }
        }
        InputEvent::PointerDown { panel, pos } => {
            controller.viewport_mut(panel).begin_drag(pos);
            Redraw::NONE
        }
        InputEvent::PointerMove { panel, pos } => {
            if controller.viewport_mut(panel).drag_to(pos) {
                Redraw::panel(panel)
            } else {
                Redraw::NONE
            }
        }
        InputEvent::PointerUp { panel } | InputEvent::PointerLeave { panel } => {
            controller.viewport_mut(panel).end_drag();
            Redraw::NONE
        }
        InputEvent::Key {
            key,
            focus_in_selector,
        } => {
            if focus_in_selector {
                return Redraw::NONE;
            }
            if controller.step_b(key.is_forward()) {
                Redraw::ALL
            } else {
                Redraw::NONE
            }
        }
        InputEvent::Resize {
            panel,
            origin,
            size,
        } => controller.layout_panel(panel, origin, size),
        InputEvent::ResetView { panel } => controller.reset_view(panel),
    }
}
