use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 記錄模型
///
/// `created_at` 與 `updated_at` 一律以 UTC 儲存，儲存層不依賴
/// 任何時間值的隱式字串轉換。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub record_id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 記錄插入模型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordInsert {
    pub name: String,
    /// 明確指定的 `updated_at`；None 時由儲存層以當前時間填入
    pub updated_at: Option<DateTime<Utc>>,
}

impl RecordInsert {
    /// 建立插入模型，`updated_at` 由儲存層填入
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            updated_at: None,
        }
    }

    /// 建立帶明確 `updated_at` 的插入模型
    pub fn with_updated_at(name: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            updated_at: Some(updated_at),
        }
    }
}
