use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicI32, Ordering};
use tracing::debug;

use crate::query::{ComparisonOp, Constraint, QueryExpr};
use crate::store::models::{Record, RecordInsert};
use crate::store::{RecordStore, StoreError, StoreResult};

/// 記憶體記錄儲存
///
/// 以插入順序保存記錄，約束比較使用型別化的時間點，
/// 不經過任何字串表示。約束在迭代前驗證一次，錯誤語意
/// 只取決於約束本身的形狀，與記錄筆數無關。
/// 主要供測試與示例使用。
pub struct MemoryRecordStore {
    records: RwLock<Vec<Record>>,
    next_id: AtomicI32,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }

    /// 解析約束欄位對應的時間戳存取器
    fn field_accessor(field: &str) -> StoreResult<fn(&Record) -> DateTime<Utc>> {
        match field {
            "updated_at" => Ok(|record| record.updated_at),
            "created_at" => Ok(|record| record.created_at),
            other => Err(StoreError::InvalidConstraint(format!(
                "unknown constraint field: {other}"
            ))),
        }
    }

    /// 將參數值解析為時間點，供時間戳欄位比較使用
    fn resolve_bound(constraint: &Constraint) -> StoreResult<DateTime<Utc>> {
        constraint.value.as_instant().ok_or_else(|| {
            StoreError::QueryExecution(format!(
                "text value cannot be compared against timestamp field {}",
                constraint.field
            ))
        })
    }

    /// 以型別化比較評估欄位值與參數值
    fn compare(op: ComparisonOp, field_value: DateTime<Utc>, bound: DateTime<Utc>) -> bool {
        match op {
            ComparisonOp::GreaterOrEqual => field_value >= bound,
            ComparisonOp::Greater => field_value > bound,
            ComparisonOp::LessOrEqual => field_value <= bound,
            ComparisonOp::Less => field_value < bound,
            ComparisonOp::Equal => field_value == bound,
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: RecordInsert) -> StoreResult<Record> {
        let now = Utc::now();
        let mut records = self.records.write();

        let stored = Record {
            record_id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: record.name,
            created_at: now,
            updated_at: record.updated_at.unwrap_or(now),
        };
        records.push(stored.clone());

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

        // 先驗證約束再掃描記錄
        let field_value = Self::field_accessor(&constraint.field)?;
        let bound = Self::resolve_bound(constraint)?;

        let records = self.records.read();
        let matched: Vec<Record> = records
            .iter()
            .filter(|record| Self::compare(constraint.op, field_value(record), bound))
            .cloned()
            .collect();

        debug!(
            field = %constraint.field,
            op = %constraint.op,
            matched = matched.len(),
            "記憶體儲存完成約束查詢"
        );

        Ok(matched)
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let mut records = self.records.write();
        let removed = records.len() as u64;
        records.clear();

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::BoundValue;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    async fn seeded_store() -> MemoryRecordStore {
        let store = MemoryRecordStore::new();
        store
            .insert(RecordInsert::with_updated_at(
                "Luke",
                instant(2017, 7, 11, 0, 0, 0),
            ))
            .await
            .unwrap();
        store
            .insert(RecordInsert::with_updated_at(
                "Jonh",
                instant(2017, 7, 12, 0, 0, 0),
            ))
            .await
            .unwrap();
        store
            .insert(RecordInsert::with_updated_at(
                "Paul",
                instant(2017, 7, 12, 0, 0, 1),
            ))
            .await
            .unwrap();
        store
            .insert(RecordInsert::with_updated_at(
                "Mary",
                instant(2017, 7, 13, 0, 0, 0),
            ))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_date_bound_matches_from_beginning_of_day() {
        let store = seeded_store().await;
        // 日期參數隱含當日午夜，會比完整時間點多涵蓋一筆記錄
        let expr = QueryExpr::Structured(Constraint::new(
            "updated_at",
            ComparisonOp::GreaterOrEqual,
            BoundValue::Date(chrono::NaiveDate::from_ymd_opt(2017, 7, 12).unwrap()),
        ));

        let found = store.query(&expr).await.unwrap();
        let names: Vec<&str> = found.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Jonh", "Paul", "Mary"]);
    }

    #[tokio::test]
    async fn test_instant_bound_matches_from_that_instant() {
        let store = seeded_store().await;
        let expr = QueryExpr::Structured(Constraint::new(
            "updated_at",
            ComparisonOp::GreaterOrEqual,
            BoundValue::Instant(instant(2017, 7, 12, 0, 0, 1)),
        ));

        let found = store.query(&expr).await.unwrap();
        let names: Vec<&str> = found.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Paul", "Mary"]);
    }

    #[tokio::test]
    async fn test_raw_query_text_is_rejected() {
        let store = seeded_store().await;
        let expr = QueryExpr::Raw("updated_at >= 'July 12, 2017'".to_string());

        let result = store.query(&expr).await;

        assert_matches!(result, Err(StoreError::InvalidConstraint(_)));
    }

    #[tokio::test]
    async fn test_text_bound_fails_at_execution() {
        let store = seeded_store().await;
        let expr = QueryExpr::Structured(Constraint::new(
            "updated_at",
            ComparisonOp::Greater,
            BoundValue::Text("July 12, 2017".to_string()),
        ));

        let result = store.query(&expr).await;

        assert_matches!(result, Err(StoreError::QueryExecution(_)));
    }

    #[tokio::test]
    async fn test_text_bound_fails_on_empty_store() {
        // 錯誤語意取決於約束形狀，空儲存也必須拒絕
        let store = MemoryRecordStore::new();
        let expr = QueryExpr::Structured(Constraint::new(
            "updated_at",
            ComparisonOp::Greater,
            BoundValue::Text("July 12, 2017".to_string()),
        ));

        let result = store.query(&expr).await;

        assert_matches!(result, Err(StoreError::QueryExecution(_)));
    }

    #[tokio::test]
    async fn test_unknown_field_is_invalid_constraint() {
        let store = seeded_store().await;
        let expr = QueryExpr::Structured(Constraint::new(
            "deleted_at",
            ComparisonOp::Equal,
            BoundValue::Instant(instant(2017, 7, 12, 0, 0, 0)),
        ));

        let result = store.query(&expr).await;

        assert_matches!(result, Err(StoreError::InvalidConstraint(_)));
    }

    #[tokio::test]
    async fn test_unknown_field_is_invalid_constraint_on_empty_store() {
        let store = MemoryRecordStore::new();
        let expr = QueryExpr::Structured(Constraint::new(
            "deleted_at",
            ComparisonOp::Equal,
            BoundValue::Instant(instant(2017, 7, 12, 0, 0, 0)),
        ));

        let result = store.query(&expr).await;

        assert_matches!(result, Err(StoreError::InvalidConstraint(_)));
    }

    #[tokio::test]
    async fn test_results_keep_insertion_order() {
        let store = seeded_store().await;
        let expr = QueryExpr::Structured(Constraint::new(
            "updated_at",
            ComparisonOp::GreaterOrEqual,
            BoundValue::Instant(instant(2017, 7, 11, 0, 0, 0)),
        ));

        let found = store.query(&expr).await.unwrap();
        let ids: Vec<i32> = found.iter().map(|r| r.record_id).collect();

        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_delete_all_reports_removed_count() {
        let store = seeded_store().await;

        assert_eq!(store.delete_all().await.unwrap(), 4);
        assert_eq!(store.delete_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ids_keep_counting_after_delete_all() {
        // 與 PostgreSQL 的 SERIAL 欄位一致，刪除後不重用 ID
        let store = seeded_store().await;
        store.delete_all().await.unwrap();

        let record = store.insert(RecordInsert::new("Mark")).await.unwrap();

        assert_eq!(record.record_id, 5);
    }

    #[tokio::test]
    async fn test_insert_defaults_updated_at_to_now() {
        let store = MemoryRecordStore::new();
        let before = Utc::now();
        let record = store.insert(RecordInsert::new("Jonh")).await.unwrap();
        let after = Utc::now();

        assert!(record.updated_at >= before && record.updated_at <= after);
        assert_eq!(record.created_at, record.updated_at);
    }
}
