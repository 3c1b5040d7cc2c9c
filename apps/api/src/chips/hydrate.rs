// Hydration: rebuilds selections from the attributes the server renders on
// each chip container of an edit form.

use std::collections::HashMap;

use tracing::debug;

use crate::chips::selection::Selection;
use crate::models::{Field, Item};

pub const ATTR_INITIAL_ID: &str = "data-initial-id";
pub const ATTR_INITIAL_NAME: &str = "data-initial-name";
pub const ATTR_IDS: &str = "data-ids";
pub const ATTR_NAMES: &str = "data-names";

/// Attributes of a single element.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ElementAttrs(HashMap<String, String>);

impl ElementAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Snapshot of the page's chip containers, keyed by element id.
#[derive(Debug, Default, Clone)]
pub struct PageAttrs(HashMap<String, ElementAttrs>);

impl PageAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, id: impl Into<String>, attrs: ElementAttrs) -> Self {
        self.0.insert(id.into(), attrs);
        self
    }

    pub fn element(&self, id: &str) -> Option<&ElementAttrs> {
        self.0.get(id)
    }
}

/// Reads the initial selection for `field` out of its container's attributes.
/// Entries with a non-integer id are dropped; the result honours the field's
/// dedup and limit rules.
pub fn hydrate_selection(field: Field, page: &PageAttrs) -> Selection {
    let mut selection = Selection::new(field);
    let Some(attrs) = page.element(field.handles().chips_id) else {
        return selection;
    };

    let items: Vec<Item> = if field.is_single_select() {
        parse_single(attrs).into_iter().collect()
    } else {
        parse_multi(attrs)
    };

    for item in items {
        selection.add(item);
    }
    debug!(field = %field, count = selection.len(), "hydrated selection");
    selection
}

fn parse_single(attrs: &ElementAttrs) -> Option<Item> {
    let id = attrs.get(ATTR_INITIAL_ID)?.trim();
    let name = attrs.get(ATTR_INITIAL_NAME)?;
    // Unset columns are rendered by the template engine as "None".
    if id.is_empty() || id == "None" || name.is_empty() {
        return None;
    }
    let id = id.parse::<i64>().ok()?;
    Some(Item::new(id, name.trim()))
}

fn parse_multi(attrs: &ElementAttrs) -> Vec<Item> {
    let (Some(ids), Some(names)) = (attrs.get(ATTR_IDS), attrs.get(ATTR_NAMES)) else {
        return Vec::new();
    };
    if ids.is_empty() || names.is_empty() {
        return Vec::new();
    }

    ids.split(',')
        .zip(names.split(','))
        .filter_map(|(id, name)| {
            let id = id.trim().parse::<i64>().ok()?;
            Some(Item::new(id, name.trim()))
        })
        .collect()
}

/// Attributes the server writes on a chip container so the page can hydrate
/// the selection back. Inverse of [`hydrate_selection`] for names without commas.
pub fn hydration_attrs(selection: &Selection) -> Vec<(&'static str, String)> {
    let items = selection.items();
    if selection.field().is_single_select() {
        match items.first() {
            Some(item) => vec![
                (ATTR_INITIAL_ID, item.id.to_string()),
                (ATTR_INITIAL_NAME, item.name.clone()),
            ],
            None => Vec::new(),
        }
    } else {
        vec![
            (ATTR_IDS, selection.ids_csv()),
            (
                ATTR_NAMES,
                items
                    .iter()
                    .map(|item| item.name.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        ]
    }
}
