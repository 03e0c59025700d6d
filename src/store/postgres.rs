use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;

use crate::query::{Constraint, QueryExpr};
use crate::store::models::{Record, RecordInsert};
use crate::store::{RecordStore, StoreError, StoreResult};

/// record 表中允許作為約束欄位的欄位集合
const CONSTRAINT_FIELDS: &[&str] = &["updated_at", "created_at"];

/// PostgreSQL 記錄儲存
///
/// 查詢文字只包含白名單欄位名與枚舉運算子，參數值一律以
/// `.bind()` 綁定，絕不格式化進 SQL 文字。
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 由結構化約束組出 WHERE 述詞，參數值以佔位符表示
    fn render_predicate(constraint: &Constraint) -> StoreResult<String> {
        if !CONSTRAINT_FIELDS.contains(&constraint.field.as_str()) {
            return Err(StoreError::InvalidConstraint(format!(
                "unknown constraint field: {}",
                constraint.field
            )));
        }

        Ok(format!("{} {} $1", constraint.field, constraint.op.as_sql()))
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, record: RecordInsert) -> StoreResult<Record> {
        let now = Utc::now();
        let updated_at = record.updated_at.unwrap_or(now);

        let stored = sqlx::query_as::<_, Record>(
            r#"
            INSERT INTO record (name, created_at, updated_at)
            VALUES ($1, $2, $3)
            RETURNING
                record_id, name, created_at, updated_at
            "#,
        )
        .bind(&record.name)
        .bind(now)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn query(&self, expr: &QueryExpr) -> StoreResult<Vec<Record>> {
        let constraint = match expr {
            QueryExpr::Structured(constraint) => constraint,
            QueryExpr::Raw(text) => {
                return Err(StoreError::InvalidConstraint(format!(
                    "raw query text is not executable: {text}"
                )));
            }
        };

        let bound = constraint.value.as_instant().ok_or_else(|| {
            StoreError::QueryExecution(format!(
                "text value cannot be compared against timestamp column {}",
                constraint.field
            ))
        })?;

        let predicate = Self::render_predicate(constraint)?;
        let sql = format!(
            "SELECT record_id, name, created_at, updated_at \
             FROM record WHERE {predicate} ORDER BY record_id"
        );

        debug!(field = %constraint.field, op = %constraint.op, "執行結構化約束查詢");

        let records = sqlx::query_as::<_, Record>(&sql)
            .bind(bound)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM record")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
