// filter.rs - 最近更新過濾器
//
// 以「當前時間點減去固定時間窗」作為包含下界，產生可交給儲存層
// 執行的結構化約束。截止點一律由牆上時鐘時間點推導，不使用日曆
// 日期，避免截斷到午夜之後跨時區的日界歧義。

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::query::{BoundValue, ComparisonOp, Constraint, QueryExpr};
use crate::store::models::Record;
use crate::store::{RecordStore, StoreResult};

/// 約束作用的欄位名
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// 時間窗長度：兩天
pub const RECENCY_WINDOW_DAYS: i64 = 2;

/// 最近更新過濾器
#[derive(Debug, Clone, Copy, Default)]
pub struct RecencyFilter;

impl RecencyFilter {
    /// 計算截止時間點：`now - 2 days`
    ///
    /// 純函數，對任何合法時間點皆無錯誤情況。
    pub fn cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(RECENCY_WINDOW_DAYS)
    }

    /// 判斷 `updated_at` 是否落在時間窗內（包含下界）
    pub fn matches(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        updated_at >= Self::cutoff(now)
    }

    /// 建立 `updated_at >= cutoff(now)` 的結構化約束
    ///
    /// 參數值為完整精度的時間點，交由儲存層以型別化方式綁定。
    /// 相同的 `now` 產生相等的約束。
    pub fn build_constraint(now: DateTime<Utc>) -> Constraint {
        Constraint::new(
            UPDATED_AT_FIELD,
            ComparisonOp::GreaterOrEqual,
            BoundValue::Instant(Self::cutoff(now)),
        )
    }

    /// 以時鐘當前時間建立約束並委託儲存層執行
    pub async fn apply<S, C>(store: &S, clock: &C) -> StoreResult<Vec<Record>>
    where
        S: RecordStore + ?Sized,
        C: Clock + ?Sized,
    {
        let expr = QueryExpr::Structured(Self::build_constraint(clock.now()));
        store.query(&expr).await
    }
}
