//! PostgreSQL-backed item store.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::{Aggregates, ItemStore, Predicate, SortSpec, StoreResult};
use crate::error::StoreError;
use crate::models::{now, Item};

/// PostgreSQL schema (embedded).
const POSTGRES_SCHEMA: &str = include_str!("schema.sql");

const ITEM_COLUMNS: &str = "id, name, stock, price, created_at, updated_at, deleted_at";

/// Item store on a Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects to `url` and applies the embedded schema.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = Self { pool };
        store.migrate().await?;
        tracing::info!(max_connections, "Connected to PostgreSQL");
        Ok(store)
    }

    /// Wraps an existing pool without touching the schema.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::raw_sql(POSTGRES_SCHEMA).execute(&self.pool).await?;
        tracing::debug!("Applied items schema");
        Ok(())
    }
}

/// Escapes LIKE wildcards so user input only ever matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Appends the WHERE clause for `predicate`.
fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    qb.push(" WHERE deleted_at IS NULL");

    let filter = &predicate.filter;
    if let Some(name) = &filter.name {
        qb.push(" AND name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)));
    }
    if let Some(min_stock) = filter.min_stock {
        qb.push(" AND stock >= ").push_bind(min_stock);
    }
    if let Some(min_price) = filter.min_price {
        qb.push(" AND price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        qb.push(" AND price <= ").push_bind(max_price);
    }
    if let Some(threshold) = predicate.stock_below {
        qb.push(" AND stock < ").push_bind(threshold);
    }
    if let Some(pos) = predicate.after {
        qb.push(" AND (created_at < ")
            .push_bind(pos.created_at)
            .push(" OR (created_at = ")
            .push_bind(pos.created_at)
            .push(" AND id < ")
            .push_bind(pos.id)
            .push("))");
    }
}

fn push_order(qb: &mut QueryBuilder<'_, Postgres>, sort: &SortSpec) {
    let direction = sort.direction.keyword();
    qb.push(format_args!(" ORDER BY {} {}", sort.field.column(), direction));
    if sort.breaks_ties_by_id() {
        qb.push(format_args!(", id {}", direction));
    }
}

#[async_trait]
impl ItemStore for PgStore {
    async fn insert(&self, item: &Item) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO items (id, name, stock, price, created_at, updated_at, deleted_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(item.id)
        .bind(item.name.as_str())
        .bind(item.stock)
        .bind(item.price)
        .bind(item.created_at)
        .bind(item.updated_at)
        .bind(item.deleted_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Item>> {
        let mut qb = QueryBuilder::new(format!("SELECT {ITEM_COLUMNS} FROM items"));
        qb.push(" WHERE deleted_at IS NULL AND id = ").push_bind(id);
        let item = qb
            .build_query_as::<Item>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn save(&self, item: &Item) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE items SET name = $2, stock = $3, price = $4, updated_at = $5 \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(item.id)
        .bind(item.name.as_str())
        .bind(item.stock)
        .bind(item.price)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<u64> {
        let result =
            sqlx::query("UPDATE items SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .bind(now())
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn count(&self, predicate: &Predicate) -> StoreResult<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM items");
        push_predicate(&mut qb, predicate);
        let count = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn query(
        &self,
        predicate: &Predicate,
        sort: &SortSpec,
        limit: usize,
    ) -> StoreResult<Vec<Item>> {
        let limit = i64::try_from(limit)
            .map_err(|_| StoreError::Corrupt(format!("row limit {limit} out of range")))?;

        let mut qb = QueryBuilder::new(format!("SELECT {ITEM_COLUMNS} FROM items"));
        push_predicate(&mut qb, predicate);
        push_order(&mut qb, sort);
        qb.push(" LIMIT ").push_bind(limit);

        let items = qb.build_query_as::<Item>().fetch_all(&self.pool).await?;
        Ok(items)
    }

    async fn aggregate(&self, predicate: &Predicate) -> StoreResult<Aggregates> {
        let mut qb = QueryBuilder::new(
            "SELECT COALESCE(SUM(price * stock), 0)::float8, COALESCE(AVG(price), 0)::float8 \
             FROM items",
        );
        push_predicate(&mut qb, predicate);
        let (total_value, average_price) = qb
            .build_query_as::<(f64, f64)>()
            .fetch_one(&self.pool)
            .await?;
        Ok(Aggregates {
            total_value,
            average_price,
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
