// Shared tuning constants used by the generator, the motion field and both frontends.

// Particle generation
pub const PARTICLE_DENSITY: f32 = 25.0; // particles per pixel of arc length
pub const MAX_PARTICLES_PER_STROKE: usize = 5000;
pub const CORE_WIDTH: f32 = 5.0; // spread radius of the core layer
pub const NEBULA_WIDTH: f32 = 45.0; // spread radius of dust; nebula uses 1.5x
pub const NEBULA_SPREAD_SCALE: f32 = 1.5;
pub const BRIGHT_PARTICLE_CHANCE: f32 = 0.2;
pub const BRIGHT_PARTICLE_MULTIPLIER: f32 = 2.0;

// Layer selection thresholds on a uniform draw in [0, 1)
pub const CORE_THRESHOLD: f32 = 0.7; // r > 0.7 -> core
pub const NEBULA_THRESHOLD: f32 = 0.2; // r < 0.2 -> nebula

// Input capture
pub const MIN_POINT_DISTANCE: f32 = 2.0;
pub const MIN_STROKE_POINTS: usize = 4;

// Motion field
pub const FLOW_SPEED: f32 = 0.08;
pub const FLOW_SPEED_Y_RATIO: f32 = 0.7;
pub const FLOW_SPATIAL_FREQ: f32 = 0.005;
pub const FLOW_AMP_X: f32 = 5.0;
pub const FLOW_AMP_Y: f32 = 8.0;
pub const RIPPLE_FREQ: f32 = 0.015;
pub const RIPPLE_SPEED: f32 = 5.0;
pub const MAX_RIPPLE_AMP: f32 = 40.0;
pub const TURBULENCE_BASE: f32 = 2.0; // jitter amplitude with no sound
pub const TURBULENCE_SOUND: f32 = 10.0; // extra amplitude at full volume

// Alpha / size response
pub const BREATHE_BASE: f32 = 0.8;
pub const BREATHE_SPAN: f32 = 0.2;
pub const BREATHE_SPEED: f32 = 3.0;
pub const ALPHA_SOUND_BOOST: f32 = 0.6;
pub const SIZE_SOUND_BOOST: f32 = 1.5;

// Audio smoothing (per tick, not per second)
pub const VOLUME_SMOOTHING: f32 = 0.15;

// Live stroke brush
pub const BRUSH_MAX_WIDTH: f32 = 10.0;
pub const BRUSH_MIN_WIDTH: f32 = 1.0;
pub const BRUSH_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.8];

// Glow layer beneath bright particles
pub const GLOW_MIN_RADIUS: f32 = 0.8;
pub const GLOW_RADIUS_SCALE: f32 = 5.0;
pub const GLOW_ALPHA_SCALE: f32 = 0.2;
pub const GLOW_COLOR: [f32; 3] = [1.0, 0.92, 0.7]; // warm white
pub const CORE_ALPHA_SCALE: f32 = 0.95;
pub const MIN_VISIBLE_ALPHA: f32 = 0.01;

// Background
pub const BACKGROUND_COLOR: [f32; 3] = [0.0196, 0.0196, 0.0196]; // #050505

// Session budget: oldest strokes are evicted past this many live particles
pub const DEFAULT_MAX_LIVE_PARTICLES: usize = 150_000;
