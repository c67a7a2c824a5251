// Shared tuning constants for scroll-driven animation, used by both web and headless frontends.

// Progress
pub const MIN_SCROLL_EXTENT: f32 = 1e-6; // divisor floor for offset / extent

// Camera smoothing
pub const DEFAULT_SMOOTHING: f32 = 0.1; // per-frame lerp factor at the reference rate
pub const REFERENCE_FRAME_RATE: f32 = 60.0; // rate `DEFAULT_SMOOTHING` was tuned at
pub const MAX_FRAME_DT_SEC: f32 = 0.25; // clamp for tab-switch stalls

// Projection handed to the renderer
pub const CAMERA_FOVY_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Lighting fallbacks when the very first chapter leaves a field unset
pub const DEFAULT_AMBIENT_INTENSITY: f32 = 0.4;

// Stops
pub const DEFAULT_STOP_RADIUS: f32 = 0.02; // ε around a stop position
pub const DEFAULT_EFFECT_WINDOW_MS: u64 = 500; // how long a fired effect stays live
pub const REARM_RADIUS_FACTOR: f32 = 2.0; // leave 2ε before a stop can fire again

// Timeline
pub const DEFAULT_DEPTH_PER_ITEM: f32 = 150.0; // px of z per item
pub const DEFAULT_ROTATION_INTENSITY: f32 = 2.0; // deg of Y rotation per item
pub const DEFAULT_TILT_DEGREES: f32 = 1.5; // deg of X tilt per item
pub const DEFAULT_SCALE_DECAY_PER_ITEM: f32 = 0.03;
pub const MIN_ITEM_SCALE: f32 = 0.05; // scale never reaches zero

// Particles
pub const DEFAULT_PARTICLE_COUNT: u32 = 48;
pub const DEFAULT_PARTICLE_LIFE_SEC: f32 = 1.2;
