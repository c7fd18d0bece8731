// Viewer tuning constants shared by the controller, the config layer and the
// web front-end.

// Interaction
pub const DRAG_SENSITIVITY: f32 = 0.005; // radians per pixel of pointer travel

// Camera
pub const CAMERA_FOV_Y_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START_Z: f32 = 5.0; // before the model arrives
pub const CAMERA_VIEW_Z: f32 = 10.0; // once the model is attached

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const DIRECTIONAL_INTENSITY: f32 = 1.0;
pub const DIRECTIONAL_POSITION: [f32; 3] = [1.0, 1.0, 1.0];
pub const LIGHT_COLOR: u32 = 0xffffff;

// Background
pub const CLEAR_COLOR: u32 = 0x1e074e;

// Asset
pub const DEFAULT_MODEL_URL: &str = "gltf/AntiqueCamera.gltf";

// Renderer limits
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;
