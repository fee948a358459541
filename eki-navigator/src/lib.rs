//! Railway timetable exporter.
//!
//! Turns the per-station and per-train pages scraped from a timetable site
//! into a normalized timetable model, then writes that model both as JSON
//! and as an OuDiaSecond diagram file.
//!
//! The pipeline runs once per line and date:
//! [`collect::collect_line`] → [`model::build_model`] →
//! [`oudia::serialize`] / [`export::to_json`].

pub mod collect;
pub mod config;
pub mod domain;
pub mod export;
pub mod model;
pub mod oudia;
pub mod train_url;
