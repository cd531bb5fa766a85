pub mod debt_projection;
pub mod netting_engine;
pub mod split_calculator;

pub use debt_projection::{debts_by_creditor, debts_by_debtor, has_actionable_debts};
pub use netting_engine::NettingEngine;
pub use split_calculator::{split_item, Contribution, ItemExclusion};
