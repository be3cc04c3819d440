mod app;
pub use app::*;

pub mod floating_score;
pub mod input;

mod window_resizing;
