// DOM hooks and event names used by the web front-end.

pub const CANVAS_ID: &str = "model-viewer-canvas";
pub const STATUS_ID: &str = "model-viewer-status";

// Style for the status line shown over the canvas on errors.
pub const STATUS_STYLE: &str = "position:fixed;left:16px;bottom:16px;padding:8px 12px;\
border-radius:4px;background:rgba(0,0,0,0.7);color:#f4f4f4;\
font:14px/1.4 system-ui,sans-serif;pointer-events:none";

pub const EVENT_POINTER_DOWN: &str = "pointerdown";
pub const EVENT_POINTER_UP: &str = "pointerup";
pub const EVENT_POINTER_MOVE: &str = "pointermove";
pub const EVENT_RESIZE: &str = "resize";
