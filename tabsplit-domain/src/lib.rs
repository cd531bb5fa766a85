#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{Debt, DebtMatrix, Item, ItemId, Money, Person, PersonId};
pub use services::{
    debts_by_creditor, debts_by_debtor, has_actionable_debts, split_item, Contribution,
    ItemExclusion, NettingEngine,
};
