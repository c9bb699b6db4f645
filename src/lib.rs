//! # Checkers
//!
//! A two-player checkers (draughts) engine with a terminal UI. The engine
//! validates moves against the rules of checkers, including mandatory capture
//! and multi-jump chains, applies them, and detects the end of the game.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, pieces, move rules, turn state
//! - [`ui`] — Terminal UI: menu, instructions, game view
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
