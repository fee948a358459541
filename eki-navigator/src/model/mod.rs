//! Normalized railway timetable model.
//!
//! [`build_model`] turns a collected line into the model that both the
//! JSON export and the diagram serializer read. The model is built once and
//! not modified afterwards.

mod builder;
mod railway;
mod registry;

pub use builder::build_model;
pub use railway::{NOTICE, RailwayData, RailwayModel, SOURCE_NAME, StationTime, TrainUrl};
pub use registry::{DEFAULT_COLOR_CODE, TrainType, TypeRegistry};
