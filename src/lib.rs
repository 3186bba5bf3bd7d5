//! One-year activity graph rendered as SVG markup.
//!
//! Features:
//! - Date-to-grid layout for any start weekday, leap spans included
//! - Two-band week-column grid with an overflow column when needed
//! - Month labels that never crowd the left edge
//! - Scene construction over any node surface, with an in-memory DOM

pub mod args;
pub mod calendar;
pub mod error;
pub mod formatter;
pub mod scene;
pub mod types;
