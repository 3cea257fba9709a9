use std::time::Duration;

// Shared timing and motion tuning constants used by the core and the web frontend.

// Quiz
pub const STEP_EXIT: Duration = Duration::from_millis(600); // outbound panel animation
pub const COMPUTE_DELAY: Duration = Duration::from_millis(2500); // "computing" pause before reveal
pub const SLIDER_STEP: f32 = 0.01; // continuous slider granularity while dragging
pub const BALANCED_LABEL: &str = "Balanced";

// Page entry
pub const CURTAIN_ID: &str = "static-curtain";
pub const CURTAIN_FADE: Duration = Duration::from_millis(800); // fade before detach
pub const CURTAIN_RETRIES: [Duration; 2] = [Duration::from_millis(100), Duration::from_millis(500)];
pub const DECELERATE_AFTER: Duration = Duration::from_millis(200);

// Navigation handoff
pub const FORWARD_EXIT: Duration = Duration::from_millis(2500); // matches the acceleration
pub const RETURN_EXIT: Duration = Duration::from_millis(2000);
pub const RETURN_SETTLE: Duration = Duration::from_millis(500); // self-clean after return navigation
pub const ENTRY_PARAM: &str = "entry";

// Warp motion
pub const IDLE_SPEED_INITIAL: f32 = 0.1; // speed before the first tween
pub const IDLE_SPEED: f32 = 0.2;
pub const WARP_SPEED: f32 = 6.0;
pub const IDLE_FOV_DEG: f32 = 75.0;
pub const WARP_FOV_DEG: f32 = 110.0;
pub const ACCELERATE_SECS: f32 = 2.0; // power2 in-out
pub const DECELERATE_SECS: f32 = 3.0; // power2 out, softer landing

// Particle field
pub const PARTICLE_COUNT: usize = 3000;
pub const FIELD_RADIUS_MIN: f32 = 1.5;
pub const FIELD_RADIUS_SPAN: f32 = 8.0;
pub const FIELD_DEPTH: f32 = 20.0; // particles wrap over [-DEPTH/2, DEPTH/2)
pub const DUST_FRACTION: f64 = 0.7; // the rest is large, soft mist
pub const SPIN_FACTOR: f32 = 0.1;
pub const CAMERA_Z: f32 = 4.0;
pub const POINT_SIZE_BASE: f32 = 50.0;

// Particle colours (linear rgb)
pub const DUST_COLOR: [f32; 3] = [1.0, 0.8, 0.4];
pub const MIST_COLOR: [f32; 3] = [0.95, 0.90, 0.85];
pub const DUST_ALPHA: f32 = 0.9;
pub const MIST_ALPHA: f32 = 0.2;
pub const MIST_SCALE_THRESHOLD: f32 = 0.3;
