// 模組定義
pub mod clock;
pub mod config;
pub mod filter;
pub mod logging;
pub mod query;
pub mod store;
