// DOM wiring constants for the web frontend.
// The page (`index.html`) provides these element ids; the frontend only
// looks them up and never creates its own layout.

// Host containers
pub const SCENE_CONTAINER_ID: &str = "scene-container";
pub const DIAGRAM_CONTAINER_ID: &str = "diagram-container";

// Controls
pub const DISTORTION_INPUT_ID: &str = "distortion-input";
pub const DISTORTION_LABEL_ID: &str = "distortion-label";
pub const COUPLING_INPUT_ID: &str = "coupling-input";
pub const COUPLING_LABEL_ID: &str = "coupling-label";
pub const AUTOPLAY_BUTTON_ID: &str = "autoplay-toggle";
pub const STABILIZATION_LABEL_ID: &str = "stabilization-readout";

// Overlays
pub const HELP_OVERLAY_ID: &str = "help-overlay";
pub const HIDDEN_CLASS: &str = "hidden";

// Render surface created inside the scene container
pub const SCENE_CANVAS_CLASS: &str = "jt-scene-canvas";

// Range input granularity
pub const SLIDER_STEP: f32 = 0.01;

// Scene background (linear RGB, drawn behind the molecule)
pub const SCENE_CLEAR_RGB: [f64; 3] = [0.0, 0.0, 0.0];
