pub mod field;
pub mod item;

pub use field::{Field, FieldHandles};
pub use item::Item;
