//! Terminal UI: a menu, the instructions page, and the game view with a
//! cursor-driven board.

mod app;
pub mod board_widget;
mod game_view;
mod menu_view;

pub use app::{App, Screen};
