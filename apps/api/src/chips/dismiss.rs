// Outside-click dismissal. A page installs one document-level click listener
// and forwards every click here; the router closes each registered field's
// suggestion box whose search container is not on the click path.

use std::collections::HashMap;

use crate::chips::widget::{ChipWidget, WidgetId};
use crate::models::Field;

/// Element ids from the click target up to the document root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClickPath(Vec<String>);

impl ClickPath {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    pub fn passes_through(&self, id: &str) -> bool {
        self.0.iter().any(|entry| entry == id)
    }
}

#[derive(Debug, Default)]
pub struct DismissRouter {
    registrations: HashMap<WidgetId, Vec<Field>>,
}

impl DismissRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the widget's fields. Registering the same widget again
    /// replaces its entry rather than adding a second listener.
    pub fn register(&mut self, widget: &ChipWidget) {
        self.registrations
            .insert(widget.id(), widget.fields().collect());
    }

    pub fn unregister(&mut self, id: WidgetId) {
        self.registrations.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Fields whose search container the click landed outside of.
    pub fn outside(&self, path: &ClickPath) -> Vec<(WidgetId, Field)> {
        self.registrations
            .iter()
            .flat_map(|(&id, fields)| fields.iter().map(move |&field| (id, field)))
            .filter(|(_, field)| !path.passes_through(field.handles().search_container_id))
            .collect()
    }

    /// Closes every open suggestion box outside the click. Returns how many
    /// boxes were closed.
    pub fn dispatch<'a>(
        &self,
        path: &ClickPath,
        widgets: impl IntoIterator<Item = &'a mut ChipWidget>,
    ) -> usize {
        let targets = self.outside(path);
        let mut closed = 0;
        for widget in widgets {
            for &(id, field) in &targets {
                if id == widget.id() && widget.suggestions_open(field) {
                    widget.close_suggestions(field);
                    closed += 1;
                }
            }
        }
        closed
    }
}
