// Web front-end tuning constants

// Book accordion container
pub const ACCORDION_PERSPECTIVE_PX: f32 = 1200.0;
pub const DEFAULT_ITEM_SELECTOR: &str = ".book-page";

// CSS number formatting
pub const CSS_LENGTH_DECIMALS: usize = 2; // px and deg
pub const CSS_SCALE_DECIMALS: usize = 4;

// Fallback viewport when the window reports nothing usable
pub const FALLBACK_VIEWPORT_W: f32 = 1280.0;
pub const FALLBACK_VIEWPORT_H: f32 = 800.0;
