use crate::chips::hydrate::hydration_attrs;
use crate::chips::selection::{Phase, Selection};
use crate::chips::view::{Binding, Element, Node};
use crate::models::{Field, Item};

/// Everything the page needs to apply after a field changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub phase: Phase,
    /// Children of the chip container.
    pub chips: Vec<Node>,
    /// Value of the hidden form field: comma-joined ids.
    pub hidden_value: String,
    pub input_visible: bool,
    /// Text left in the search input. Cleared whenever the input is shown.
    pub input_value: String,
    pub suggestions_open: bool,
    /// Children of the suggestion box.
    pub suggestions: Vec<Node>,
}

impl FieldView {
    pub fn chips_html(&self) -> String {
        self.chips.iter().map(Node::to_html).collect()
    }

    pub fn suggestions_html(&self) -> String {
        self.suggestions.iter().map(Node::to_html).collect()
    }
}

/// Builds the full view of a field after a mutation. The suggestion dropdown
/// is always closed by a render.
pub fn render_field(selection: &Selection, input_text: &str) -> FieldView {
    let input_visible = !selection.is_full();
    FieldView {
        field: selection.field(),
        phase: selection.phase(),
        chips: render_chips(selection),
        hidden_value: selection.ids_csv(),
        input_visible,
        input_value: if input_visible {
            String::new()
        } else {
            input_text.to_string()
        },
        suggestions_open: false,
        suggestions: Vec::new(),
    }
}

pub fn render_chips(selection: &Selection) -> Vec<Node> {
    let field = selection.field();
    selection
        .items()
        .iter()
        .map(|item| {
            Element::new("div")
                .attr("class", "chip")
                .child(Node::text(item.name.clone()))
                .child(
                    Element::new("i")
                        .attr("class", "fas fa-times remove-icon")
                        .on_click(Binding::RemoveItem { field, id: item.id }),
                )
                .into()
        })
        .collect()
}

pub fn render_suggestions(field: Field, items: &[Item]) -> Vec<Node> {
    items
        .iter()
        .map(|item| {
            Element::new("div")
                .attr("class", "suggestion-item")
                .child(Node::text(item.name.clone()))
                .on_click(Binding::AddItem {
                    field,
                    item: item.clone(),
                })
                .into()
        })
        .collect()
}

/// Server-side markup for one field's search block, carrying the hydration
/// attributes for the current selection.
pub fn render_field_markup(selection: &Selection) -> Node {
    let field = selection.field();
    let handles = field.handles();

    let chips = hydration_attrs(selection).into_iter().fold(
        Element::new("div")
            .attr("id", handles.chips_id)
            .attr("class", "chips"),
        |el, (name, value)| el.attr(name, value),
    );

    let mut input = Element::new("input")
        .attr("type", "text")
        .attr("id", handles.input_id)
        .attr("autocomplete", "off");
    if selection.is_full() {
        input = input.attr("style", "display: none");
    }

    Element::new("div")
        .attr("id", handles.search_container_id)
        .attr("class", "search-container")
        .child(chips.children(render_chips(selection)))
        .child(input)
        .child(
            Element::new("div")
                .attr("id", handles.suggestions_id)
                .attr("class", "suggestions")
                .attr("style", "display: none"),
        )
        .child(
            Element::new("input")
                .attr("type", "hidden")
                .attr("id", handles.hidden_id)
                .attr("value", selection.ids_csv()),
        )
        .into()
}
