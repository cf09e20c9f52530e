//! # Connect N
//!
//! A gravity grid game for any number of players: drop markers into columns
//! and be the first to line up a configurable number of them horizontally,
//! vertically, or on either diagonal. Grid size, run length and the player
//! list are all configurable; a terminal UI built with Ratatui sits on top.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: grid, players, win detection, session state machine
//! - [`ui`] — Terminal UI: game view and board widget
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
