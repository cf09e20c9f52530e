//! Terminal UI: a ratatui game view with a column selector, the winning run
//! highlighted, and new-game / quit controls.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
