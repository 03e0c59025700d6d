use sqlx::{migrate::Migrator, PgPool};
use tracing::info;

use crate::store::StoreResult;

// 靜態嵌入遷移目錄（此目錄應放在專案根目錄）
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// 執行數據庫遷移
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    info!("開始執行數據庫遷移...");

    MIGRATOR.run(pool).await.map_err(sqlx::Error::from)?;

    info!("遷移完成");
    Ok(())
}
