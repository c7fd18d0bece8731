// Pure helpers for what the page shows. Kept free of web-sys so host tests
// can include this file directly.

use viewer_core::LoadStatus;

/// Backing-store size for a canvas laid out at `width`x`height` CSS pixels.
pub fn backing_size(width: u32, height: u32, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let scale = |v: u32| ((v as f64 * dpr) as u32).max(1);
    (scale(width), scale(height))
}

/// Status string exposed to the page; `None` once the viewer is unmounted.
pub fn status_label(status: Option<&LoadStatus>) -> String {
    match status {
        None => "unmounted".to_string(),
        Some(LoadStatus::Loading) => "loading".to_string(),
        Some(LoadStatus::Loaded) => "loaded".to_string(),
        Some(LoadStatus::Degraded(reason)) => format!("degraded: {}", reason),
        Some(LoadStatus::Failed(reason)) => format!("failed: {}", reason),
    }
}

pub const LOADING_MESSAGE: &str = "Loading model…";

pub fn load_failed_message(url: &str, reason: &dyn std::fmt::Display) -> String {
    format!("Could not load {}: {}", url, reason)
}

pub const INPUT_UNAVAILABLE_MESSAGE: &str = "Rotation is unavailable in this browser";

pub fn gpu_unavailable_message(reason: &dyn std::fmt::Display) -> String {
    format!("3D viewer unavailable: {}", reason)
}
