// Multi-select chip widget for the profession, skills and services fields.
// Headless: state, hydration and rendering run without a browser; the page
// applies the returned views and forwards events.

pub mod dismiss;
pub mod hydrate;
pub mod render;
pub mod search;
pub mod selection;
pub mod view;
pub mod widget;

pub use dismiss::{ClickPath, DismissRouter};
pub use hydrate::{hydrate_selection, ElementAttrs, PageAttrs};
pub use render::{render_field, render_field_markup, FieldView};
pub use search::{HttpSuggestionClient, SearchError, SuggestionSource, MIN_QUERY_CHARS};
pub use selection::{AddOutcome, Phase, Selection};
pub use view::{escape_html, Binding, Element, Node};
pub use widget::{ChipWidget, SearchOutcome, SearchTicket, WidgetId};
