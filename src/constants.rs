//! Global constants for the color editor

use std::time::Duration;

// =============================================================================
// Color defaults
// =============================================================================

/// Initial value of each of the three color components (neutral gray in RGB)
pub const DEFAULT_COMPONENT: f32 = 0.5;

/// Initial opacity of a freshly created color
pub const DEFAULT_ALPHA: f32 = 1.0;

// =============================================================================
// History
// =============================================================================

/// Maximum number of undo steps kept per session
pub const UNDO_HISTORY_LIMIT: usize = 100;

// =============================================================================
// Swatches
// =============================================================================

/// Number of stops used for non-linear gradients (HSB hue).
/// Seven stops land exactly on each 60 degree sector boundary.
pub const DEFAULT_GRADIENT_STEPS: usize = 7;

/// Lower bound on gradient stops; a gradient needs both endpoints
pub const MIN_GRADIENT_STEPS: usize = 2;

// =============================================================================
// Persistence
// =============================================================================

/// Wait this long after the last edit before auto-saving
pub const AUTO_SAVE_DEBOUNCE: Duration = Duration::from_secs(2);

/// Minimum time between two auto-saves
pub const AUTO_SAVE_MIN_INTERVAL: Duration = Duration::from_secs(10);

/// Directory name used under the platform config directory
pub const APP_DIR_NAME: &str = "reactive-color";
