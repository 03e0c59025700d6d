// 儲存層模組
//
// 定義記錄儲存的抽象接口、錯誤類型與兩種實現：記憶體儲存與
// PostgreSQL 儲存。查詢只接受結構化約束，參數值以型別化方式
// 綁定，拒絕任何拼接的查詢文字。

pub mod database;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod postgres;

// 重新導出常用類型
pub use memory::MemoryRecordStore;
pub use models::{Record, RecordInsert};
pub use postgres::PgRecordStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::query::QueryExpr;

/// 儲存層錯誤類型
#[derive(Error, Debug)]
pub enum StoreError {
    /// 非結構化或欄位不合法的查詢表達式
    #[error("invalid query constraint: {0}")]
    InvalidConstraint(String),

    /// 參數值型別與欄位型別不相容
    #[error("query execution error: {0}")]
    QueryExecution(String),

    /// 資料庫錯誤
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// 儲存層結果類型別名
pub type StoreResult<T> = Result<T, StoreError>;

/// 記錄儲存接口
///
/// 查詢結果依插入順序回傳。錯誤原樣向上傳遞，儲存層不做重試。
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 新增記錄
    async fn insert(&self, record: RecordInsert) -> StoreResult<Record>;

    /// 依查詢表達式取得符合的記錄
    async fn query(&self, expr: &QueryExpr) -> StoreResult<Vec<Record>>;

    /// 刪除所有記錄，回傳刪除筆數
    async fn delete_all(&self) -> StoreResult<u64>;
}
