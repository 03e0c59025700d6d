use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 比較運算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    GreaterOrEqual,
    Greater,
    LessOrEqual,
    Less,
    Equal,
}

impl ComparisonOp {
    /// 轉換為 SQL 運算子
    pub fn as_sql(&self) -> &'static str {
        match self {
            ComparisonOp::GreaterOrEqual => ">=",
            ComparisonOp::Greater => ">",
            ComparisonOp::LessOrEqual => "<=",
            ComparisonOp::Less => "<",
            ComparisonOp::Equal => "=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// 型別化的查詢參數值
///
/// 參數值一律以型別化方式綁定給儲存層，絕不格式化進查詢文字。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundValue {
    /// 完整精度的時間點（UTC）
    Instant(DateTime<Utc>),
    /// 日曆日期，儲存層以當日 UTC 午夜解讀
    Date(NaiveDate),
    /// 預先格式化的字串，無法與時間戳欄位比較
    Text(String),
}

impl BoundValue {
    /// 將參數值強制轉換為時間點，供時間戳欄位比較使用
    ///
    /// `Date` 轉為當日 UTC 午夜，即日期參數隱含的 00:00:00 邊界；
    /// `Text` 無法安全轉換，回傳 None，由儲存層回報執行錯誤。
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            BoundValue::Instant(dt) => Some(*dt),
            BoundValue::Date(date) => date
                .and_hms_opt(0, 0, 0)
                .map(|ndt| Utc.from_utc_datetime(&ndt)),
            BoundValue::Text(_) => None,
        }
    }
}

/// 結構化查詢約束
///
/// 形如 `(欄位, 運算子, 參數值)` 的單一比較條件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub field: String,
    pub op: ComparisonOp,
    pub value: BoundValue,
}

impl Constraint {
    pub fn new(field: impl Into<String>, op: ComparisonOp, value: BoundValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }
}

/// 查詢表達式
///
/// 儲存層只執行 `Structured`；`Raw` 代表拼接而成的查詢文字，
/// 一律以 `InvalidConstraint` 拒絕。
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpr {
    Structured(Constraint),
    Raw(String),
}
