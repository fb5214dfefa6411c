//! Presentation
//!
//! Pure renderers from dashboard state to styled terminal text. Nothing in
//! here touches the network or holds state.

mod card;
mod dashboard;
mod filters;
mod format;
mod stats;

pub use card::render_grid;
pub use dashboard::render_dashboard;
pub use stats::render_stats;

/// Number of placeholder tiles/cards drawn while loading
const SKELETON_COUNT: usize = 6;
