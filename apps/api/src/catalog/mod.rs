// Catalog: the searchable lists of professions and skills behind the
// suggestion dropdowns.
//
// `AppState` holds an `Arc<dyn Catalog>`: `PgCatalog` at runtime,
// `InMemoryCatalog` in tests.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{Field, Item};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCatalog;
pub use postgres::PgCatalog;

/// Storage location for one field's items. Only these fixed pairs are ever
/// interpolated into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogTable {
    pub table: &'static str,
    pub id_col: &'static str,
    pub name_col: &'static str,
}

const PROFESSION_TABLE: CatalogTable = CatalogTable {
    table: "profession",
    id_col: "pro_id",
    name_col: "pro_name",
};

const SKILLS_TABLE: CatalogTable = CatalogTable {
    table: "skills_list",
    id_col: "skill_id",
    name_col: "skill_name",
};

/// Companies offer services drawn from the profession list.
pub fn table_for(field: Field) -> CatalogTable {
    match field {
        Field::Profession | Field::Services => PROFESSION_TABLE,
        Field::Skills => SKILLS_TABLE,
    }
}

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Case-insensitive substring search on item names, ordered by name.
    async fn search(&self, field: Field, query: &str, limit: u32) -> Result<Vec<Item>, AppError>;
}
