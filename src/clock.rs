// clock.rs - 時鐘抽象
//
// 提供「當前時間點」的來源。所有時間一律正規化為 UTC，
// 確保比較結果與呼叫端所在時區無關。

use chrono::{DateTime, Utc};

/// 時鐘接口
///
/// 回傳的時間點必須正規化為 UTC，這是固定的契約要求。
pub trait Clock: Send + Sync {
    /// 取得當前時間點（UTC）
    fn now(&self) -> DateTime<Utc>;
}

/// 系統時鐘
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定時鐘
///
/// 回傳建構時指定的時間點，供測試提供確定性的時間來源。
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
