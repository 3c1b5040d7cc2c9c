use std::collections::HashMap;

use async_trait::async_trait;

use crate::catalog::{table_for, Catalog};
use crate::errors::AppError;
use crate::models::{Field, Item};

/// Catalog held in memory, keyed by backing table so that fields sharing a
/// table (profession and services) see the same items.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    tables: HashMap<&'static str, Vec<Item>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(mut self, field: Field, items: impl IntoIterator<Item = Item>) -> Self {
        self.tables
            .entry(table_for(field).table)
            .or_default()
            .extend(items);
        self
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn search(&self, field: Field, query: &str, limit: u32) -> Result<Vec<Item>, AppError> {
        let needle = query.to_lowercase();
        let mut hits: Vec<Item> = self
            .tables
            .get(table_for(field).table)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        hits.sort_by(|a, b| a.name.cmp(&b.name));
        hits.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(hits)
    }
}
