/// Tuning parameters for the gallery bubbles
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Viewport (fallback when the host has not reported its size yet)
    pub const VIEWPORT_WIDTH: f32 = 1280.0;
    pub const VIEWPORT_HEIGHT: f32 = 720.0;

    // Bubble size (radius, pixels)
    pub const RADIUS_MIN: f32 = 80.0;
    pub const RADIUS_MAX: f32 = 120.0;

    // Drift (pixels per tick)
    pub const SPEED_MIN: f32 = 0.3;
    pub const SPEED_MAX: f32 = 0.8;
    pub const LOW_SPEED_THRESHOLD: f32 = 0.1; // Below this a slowing bubble turns around
    pub const ACCELERATION: f32 = 0.005;

    // Host timing
    pub const NEW_HIGHLIGHT_MS: f64 = 3000.0;
    pub const REFRESH_INTERVAL_MS: f64 = 3000.0; // Gift list polling cadence
}
