/// Viewport scale multiplier for one wheel notch.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.1;

/// Marker-size multiplier for one Ctrl/Cmd + wheel notch towards larger markers.
pub const MARKER_GROW_FACTOR: f64 = 1.25;

/// Marker-size multiplier for one Ctrl/Cmd + wheel notch towards smaller markers.
pub const MARKER_SHRINK_FACTOR: f64 = 0.8;

/// Default on-screen marker radius in canvas pixels.
pub const DEFAULT_MARKER_SIZE: f64 = 3.0;

/// Number of distinct colours in the index palette.
pub const PALETTE_SIZE: usize = 36;

/// Index stride through the palette. Coprime with `PALETTE_SIZE`, so
/// consecutive indices land far apart on the hue wheel.
pub const PALETTE_STRIDE: usize = 11;

/// HSL saturation of marker colours, in [0, 1].
pub const MARKER_SATURATION: f64 = 1.0;

/// HSL lightness of marker colours, in [0, 1].
pub const MARKER_LIGHTNESS: f64 = 0.5;

/// Alpha of marker and correspondence line colours, in [0, 1].
pub const OVERLAY_ALPHA: f64 = 0.5;

/// Stroke width of correspondence lines in overlay pixels.
pub const LINE_WIDTH: f64 = 1.0;

/// Default backend address.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Default per-request timeout for backend calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Message shown in the summary panel before a pair is selected.
pub const SUMMARY_PROMPT: &str = "Select two images to see match statistics";

/// Message shown in the summary panel when match statistics could not be fetched.
pub const SUMMARY_UNAVAILABLE: &str = "Statistics unavailable";
