//! Name → id lookup for configured categories.

use std::collections::HashMap;

use log::warn;

use super::ids::CategoryId;
use super::model::Category;

/// Fixed mapping from category name to category id.
///
/// Built once from the configured category list and read-only afterwards.
/// When a name repeats, the later entry wins.
#[derive(Clone, Debug, Default)]
pub struct CategoryTable {
    by_name: HashMap<String, CategoryId>,
}

impl CategoryTable {
    /// Builds the table from an ordered category list.
    pub fn from_categories(categories: &[Category]) -> Self {
        let mut by_name = HashMap::with_capacity(categories.len());
        for category in categories {
            if let Some(previous) = by_name.insert(category.name.clone(), category.id) {
                warn!(
                    "Category '{}' listed more than once; id {} replaces id {}",
                    category.name, category.id, previous
                );
            }
        }
        Self { by_name }
    }

    /// Looks up a category id by exact name.
    pub fn lookup(&self, name: &str) -> Option<CategoryId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
