//! Train type registry.

use indexmap::IndexMap;
use serde::Serialize;

/// Color assigned to every registered type.
pub const DEFAULT_COLOR_CODE: &str = "#000000";

/// Metadata for one train type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainType {
    pub short: String,
    pub class: Vec<String>,
    pub color_code: String,
}

/// Distinct train types in first-seen order.
///
/// A type's position in this order is its index in diagram files, so the
/// order is part of the output contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeRegistry(IndexMap<String, TrainType>);

impl TypeRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type if unseen and return its index.
    pub fn register(&mut self, short: &str) -> usize {
        if let Some(index) = self.0.get_index_of(short) {
            return index;
        }
        let (index, _) = self.0.insert_full(
            short.to_string(),
            TrainType {
                short: short.to_string(),
                class: Vec::new(),
                color_code: DEFAULT_COLOR_CODE.to_string(),
            },
        );
        index
    }

    /// Index of a registered type.
    pub fn index_of(&self, short: &str) -> Option<usize> {
        self.0.get_index_of(short)
    }

    /// Registered types in index order.
    pub fn iter(&self) -> impl Iterator<Item = &TrainType> {
        self.0.values()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no type has been registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
