use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::catalog::{table_for, Catalog};
use crate::errors::AppError;
use crate::models::{Field, Item};

/// Catalog backed by the `profession` and `skills_list` tables.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn search(&self, field: Field, query: &str, limit: u32) -> Result<Vec<Item>, AppError> {
        let t = table_for(field);
        let sql = format!(
            "SELECT CAST({id} AS BIGINT) AS id, {name} AS name FROM {table} \
             WHERE {name} ILIKE $1 ORDER BY {name} LIMIT $2",
            id = t.id_col,
            name = t.name_col,
            table = t.table,
        );

        let items: Vec<Item> = sqlx::query_as(&sql)
            .bind(like_pattern(query))
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        debug!(field = %field, hits = items.len(), "catalog search");
        Ok(items)
    }
}

/// Wraps the query in `%…%`, escaping LIKE metacharacters so user input
/// only ever matches literally.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
