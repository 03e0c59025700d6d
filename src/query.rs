// 查詢約束模組
//
// 將查詢條件建模為結構化資料：欄位名、比較運算子與型別化的參數值。
// 儲存層只接受結構化約束，任何拼接而成的查詢文字一律被拒絕。

pub mod constraint;

// 重新導出常用類型
pub use constraint::{BoundValue, ComparisonOp, Constraint, QueryExpr};
