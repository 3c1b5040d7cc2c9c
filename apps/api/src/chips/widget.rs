use std::collections::BTreeMap;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::chips::hydrate::{hydrate_selection, PageAttrs};
use crate::chips::render::{render_field, render_suggestions, FieldView};
use crate::chips::search::{searchable_query, SearchError, SuggestionSource};
use crate::chips::selection::{AddOutcome, Selection};
use crate::chips::view::{Binding, Node};
use crate::models::{Field, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(Uuid);

/// One in-flight suggestion request. Only the most recently issued ticket for
/// a field may update its suggestion box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub field: Field,
    pub token: u64,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The box is open with this many rows.
    Shown(usize),
    Hidden,
    /// A newer request superseded this one; nothing changed.
    Stale,
}

#[derive(Debug)]
struct FieldSlot {
    selection: Selection,
    input_text: String,
    suggestions: Vec<Item>,
    suggestions_open: bool,
    issued: u64,
}

impl FieldSlot {
    fn new(field: Field) -> Self {
        Self {
            selection: Selection::new(field),
            input_text: String::new(),
            suggestions: Vec::new(),
            suggestions_open: false,
            issued: 0,
        }
    }

    fn close(&mut self) {
        self.suggestions_open = false;
        self.suggestions.clear();
    }

    fn render(&mut self) -> FieldView {
        self.close();
        let view = render_field(&self.selection, &self.input_text);
        self.input_text.clone_from(&view.input_value);
        view
    }

    /// Current state as a view, leaving the dropdown and input text untouched.
    fn snapshot(&self) -> FieldView {
        FieldView {
            input_value: self.input_text.clone(),
            suggestions_open: self.suggestions_open,
            suggestions: if self.suggestions_open {
                render_suggestions(self.selection.field(), &self.suggestions)
            } else {
                Vec::new()
            },
            ..render_field(&self.selection, &self.input_text)
        }
    }
}

/// Chip selectors for the fields present on one page.
///
/// Owns every field's selection; callers apply the returned `FieldView`s to
/// the document. Fields not passed to `new` are ignored by all operations.
#[derive(Debug)]
pub struct ChipWidget {
    id: WidgetId,
    slots: BTreeMap<Field, FieldSlot>,
    hydrated: bool,
}

impl ChipWidget {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            id: WidgetId(Uuid::new_v4()),
            slots: fields.into_iter().map(|f| (f, FieldSlot::new(f))).collect(),
            hydrated: false,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.slots.keys().copied()
    }

    /// Loads initial selections from the server-rendered attributes and
    /// renders every field. Runs once; later calls return no views.
    pub fn hydrate(&mut self, page: &PageAttrs) -> Vec<FieldView> {
        if self.hydrated {
            warn!("chip widget already hydrated; ignoring");
            return Vec::new();
        }
        self.hydrated = true;

        self.slots
            .iter_mut()
            .map(|(&field, slot)| {
                slot.selection = hydrate_selection(field, page);
                slot.render()
            })
            .collect()
    }

    pub fn selection(&self, field: Field) -> Option<&Selection> {
        self.slots.get(&field).map(|slot| &slot.selection)
    }

    pub fn add(&mut self, field: Field, item: Item) -> Option<FieldView> {
        let slot = self.slots.get_mut(&field)?;
        let outcome = slot.selection.add(item);
        debug!(field = %field, ?outcome, "add");
        if outcome == AddOutcome::Duplicate {
            return Some(slot.snapshot());
        }
        Some(slot.render())
    }

    pub fn remove(&mut self, field: Field, id: i64) -> Option<FieldView> {
        let slot = self.slots.get_mut(&field)?;
        let removed = slot.selection.remove(id);
        debug!(field = %field, id, removed = removed.is_some(), "remove");
        Some(slot.render())
    }

    pub fn render(&mut self, field: Field) -> Option<FieldView> {
        self.slots.get_mut(&field).map(FieldSlot::render)
    }

    /// Runs the action attached to a clicked chip or suggestion row.
    pub fn dispatch(&mut self, binding: &Binding) -> Option<FieldView> {
        match binding {
            Binding::AddItem { field, item } => self.add(*field, item.clone()),
            Binding::RemoveItem { field, id } => self.remove(*field, *id),
        }
    }

    /// Handles an input event. Returns a ticket when a request should be
    /// issued; otherwise the suggestion box is closed.
    pub fn begin_search(&mut self, field: Field, raw: &str) -> Option<SearchTicket> {
        let slot = self.slots.get_mut(&field)?;
        slot.input_text = raw.to_string();
        // Every keystroke invalidates whatever is still in flight.
        slot.issued += 1;

        match searchable_query(raw) {
            Some(query) => Some(SearchTicket {
                field,
                token: slot.issued,
                query: query.to_string(),
            }),
            None => {
                slot.close();
                None
            }
        }
    }

    /// Applies the response for `ticket`. Failures are logged and close the box.
    pub fn finish_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<Item>, SearchError>,
    ) -> SearchOutcome {
        let Some(slot) = self.slots.get_mut(&ticket.field) else {
            return SearchOutcome::Hidden;
        };
        if ticket.token != slot.issued {
            debug!(
                field = %ticket.field,
                token = ticket.token,
                latest = slot.issued,
                "dropping stale suggestions"
            );
            return SearchOutcome::Stale;
        }

        match result {
            Ok(items) if !items.is_empty() => {
                let count = items.len();
                slot.suggestions = items;
                slot.suggestions_open = true;
                SearchOutcome::Shown(count)
            }
            Ok(_) => {
                slot.close();
                SearchOutcome::Hidden
            }
            Err(e) => {
                warn!(field = %ticket.field, error = %e, "search error");
                slot.close();
                SearchOutcome::Hidden
            }
        }
    }

    /// Input event plus request in one step.
    pub async fn search(
        &mut self,
        field: Field,
        raw: &str,
        source: &dyn SuggestionSource,
    ) -> SearchOutcome {
        let Some(ticket) = self.begin_search(field, raw) else {
            return SearchOutcome::Hidden;
        };
        let result = source.suggest(ticket.field, &ticket.query).await;
        self.finish_search(&ticket, result)
    }

    pub fn suggestions_open(&self, field: Field) -> bool {
        self.slots.get(&field).is_some_and(|s| s.suggestions_open)
    }

    pub fn suggestions(&self, field: Field) -> &[Item] {
        self.slots
            .get(&field)
            .map(|s| s.suggestions.as_slice())
            .unwrap_or_default()
    }

    /// Rows for the suggestion box, or `None` while it is closed.
    pub fn suggestion_rows(&self, field: Field) -> Option<Vec<Node>> {
        let slot = self.slots.get(&field)?;
        slot.suggestions_open
            .then(|| render_suggestions(field, &slot.suggestions))
    }

    pub fn close_suggestions(&mut self, field: Field) {
        if let Some(slot) = self.slots.get_mut(&field) {
            slot.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::chips::hydrate::{ElementAttrs, ATTR_IDS, ATTR_NAMES};
    use crate::chips::selection::Phase;

    struct FakeSource {
        items: Vec<Item>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn returning(items: Vec<Item>) -> Self {
            Self {
                items,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                items: Vec::new(),
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SuggestionSource for FakeSource {
        async fn suggest(&self, _field: Field, _query: &str) -> Result<Vec<Item>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SearchError::Status { status: 503 })
            } else {
                Ok(self.items.clone())
            }
        }
    }

    fn item(id: i64, name: &str) -> Item {
        Item::new(id, name)
    }

    #[test]
    fn test_full_scenario_add_then_remove() {
        let mut w = ChipWidget::new([Field::Skills]);
        for (id, name) in [(1, "A"), (2, "B"), (3, "C"), (4, "D")] {
            w.add(Field::Skills, item(id, name));
        }

        let view = w.add(Field::Skills, item(5, "E")).unwrap();
        assert_eq!(view.hidden_value, "1,2,3,4");
        assert!(!view.input_visible);
        assert_eq!(view.phase, Phase::Full);

        let view = w.remove(Field::Skills, 1).unwrap();
        assert_eq!(view.hidden_value, "2,3,4");
        assert!(view.input_visible);
        assert_eq!(view.phase, Phase::Partial);
    }

    #[test]
    fn test_duplicate_add_leaves_chips_unchanged() {
        let mut w = ChipWidget::new([Field::Services]);
        let first = w.add(Field::Services, item(1, "Plumbing")).unwrap();
        let second = w.add(Field::Services, item(1, "Plumbing")).unwrap();
        assert_eq!(first.chips, second.chips);
        assert_eq!(first.hidden_value, second.hidden_value);
    }

    #[test]
    fn test_duplicate_add_keeps_dropdown_and_text() {
        let mut w = ChipWidget::new([Field::Skills]);
        w.add(Field::Skills, item(1, "Rust"));
        let ticket = w.begin_search(Field::Skills, "ru").unwrap();
        w.finish_search(&ticket, Ok(vec![item(1, "Rust"), item(2, "Ruby")]));

        let view = w.add(Field::Skills, item(1, "Rust")).unwrap();
        assert!(view.suggestions_open);
        assert_eq!(view.suggestions.len(), 2);
        assert_eq!(view.input_value, "ru");
        assert_eq!(view.hidden_value, "1");
        assert!(w.suggestions_open(Field::Skills));
        assert_eq!(w.suggestions(Field::Skills).len(), 2);
    }

    #[test]
    fn test_single_select_replaces() {
        let mut w = ChipWidget::new([Field::Profession]);
        w.add(Field::Profession, item(1, "Baker"));
        let view = w.add(Field::Profession, item(2, "Chef")).unwrap();
        assert_eq!(view.hidden_value, "2");
        assert_eq!(
            w.selection(Field::Profession).unwrap().items(),
            &[item(2, "Chef")]
        );
    }

    #[test]
    fn test_unconfigured_field_is_ignored() {
        let mut w = ChipWidget::new([Field::Skills]);
        assert!(w.add(Field::Services, item(1, "x")).is_none());
        assert!(w.selection(Field::Services).is_none());
    }

    #[test]
    fn test_hydrate_runs_once() {
        let page = PageAttrs::new().with_element(
            Field::Skills.handles().chips_id,
            ElementAttrs::new()
                .with(ATTR_IDS, "1,2")
                .with(ATTR_NAMES, "Go,Rust"),
        );
        let mut w = ChipWidget::new([Field::Skills, Field::Profession]);
        let views = w.hydrate(&page);
        assert_eq!(views.len(), 2);
        let skills = views.iter().find(|v| v.field == Field::Skills).unwrap();
        assert_eq!(skills.hidden_value, "1,2");

        w.remove(Field::Skills, 1);
        assert!(w.hydrate(&page).is_empty());
        assert_eq!(w.selection(Field::Skills).unwrap().ids_csv(), "2");
    }

    #[tokio::test]
    async fn test_short_query_never_requests() {
        let source = FakeSource::returning(vec![item(1, "Rust")]);
        let mut w = ChipWidget::new([Field::Skills]);
        w.search(Field::Skills, "rust", &source).await;
        assert!(w.suggestions_open(Field::Skills));

        let outcome = w.search(Field::Skills, " r ", &source).await;
        assert_eq!(outcome, SearchOutcome::Hidden);
        assert!(!w.suggestions_open(Field::Skills));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_hides_box() {
        let source = FakeSource::failing();
        let mut w = ChipWidget::new([Field::Skills]);
        assert_eq!(
            w.search(Field::Skills, "rust", &source).await,
            SearchOutcome::Hidden
        );
        assert!(w.suggestion_rows(Field::Skills).is_none());
    }

    #[tokio::test]
    async fn test_empty_results_hide_box() {
        let source = FakeSource::returning(Vec::new());
        let mut w = ChipWidget::new([Field::Skills]);
        assert_eq!(
            w.search(Field::Skills, "zzz", &source).await,
            SearchOutcome::Hidden
        );
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut w = ChipWidget::new([Field::Skills]);
        let slow = w.begin_search(Field::Skills, "ru").unwrap();
        let fast = w.begin_search(Field::Skills, "rus").unwrap();

        assert_eq!(
            w.finish_search(&fast, Ok(vec![item(1, "Rust")])),
            SearchOutcome::Shown(1)
        );
        assert_eq!(
            w.finish_search(&slow, Ok(vec![item(2, "Ruby"), item(1, "Rust")])),
            SearchOutcome::Stale
        );
        assert_eq!(w.suggestions(Field::Skills), &[item(1, "Rust")]);
    }

    #[test]
    fn test_short_input_invalidates_in_flight() {
        let mut w = ChipWidget::new([Field::Skills]);
        let pending = w.begin_search(Field::Skills, "ru").unwrap();
        assert!(w.begin_search(Field::Skills, "r").is_none());
        assert_eq!(
            w.finish_search(&pending, Ok(vec![item(1, "Rust")])),
            SearchOutcome::Stale
        );
        assert!(!w.suggestions_open(Field::Skills));
    }

    #[tokio::test]
    async fn test_clicking_suggestion_adds_and_closes() {
        let source = FakeSource::returning(vec![item(8, "Rust")]);
        let mut w = ChipWidget::new([Field::Skills]);
        w.search(Field::Skills, "ru", &source).await;

        let rows = w.suggestion_rows(Field::Skills).unwrap();
        let binding = rows[0].bindings()[0].clone();
        let view = w.dispatch(&binding).unwrap();

        assert_eq!(view.hidden_value, "8");
        assert_eq!(view.input_value, "");
        assert!(!w.suggestions_open(Field::Skills));

        let remove = view.chips[0].bindings()[0].clone();
        let view = w.dispatch(&remove).unwrap();
        assert_eq!(view.hidden_value, "");
        assert_eq!(view.phase, Phase::Empty);
    }
}
