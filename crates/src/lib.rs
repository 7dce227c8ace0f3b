//! shopdesk - terminal admin shell for a small product catalog
//!
//! Library crate exposing the pieces used by the binary: the catalog and its
//! accessor, list selection/sort/pagination, navigation, localization, theme,
//! settings, and the terminal UI.
//!
//! Tests live close to the modules they exercise as unit tests.

pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod listing;
pub mod nav;
pub mod theme;

pub mod ui;
