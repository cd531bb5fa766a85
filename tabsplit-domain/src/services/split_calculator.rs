use crate::model::{Item, Money, PersonId};
use rust_decimal::Decimal;
use smallvec::SmallVec;

/// One attributed share: `debtor` owes `creditor` part of an item's price.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contribution {
    pub debtor: PersonId,
    pub creditor: PersonId,
    pub amount: Money,
}

/// Why an item takes no part in settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemExclusion {
    #[error("no payer assigned")]
    MissingPayer,
    #[error("no consumers")]
    EmptyConsumers,
}

/// Splits one item's price evenly across its consumers.
///
/// Every consumer other than the payer owes the payer `price / |consumers|`;
/// the payer's own share is not recorded. The division stays in full decimal
/// precision — rounding happens once, in the netting pass.
pub fn split_item(item: &Item) -> Result<SmallVec<[Contribution; 8]>, ItemExclusion> {
    let payer = item.payer.ok_or(ItemExclusion::MissingPayer)?;
    if item.consumers.is_empty() {
        return Err(ItemExclusion::EmptyConsumers);
    }

    let share =
        Money::from_decimal(item.price.as_decimal() / Decimal::from(item.consumers.len() as u64));

    Ok(item
        .consumers
        .iter()
        .copied()
        .filter(|consumer| *consumer != payer)
        .map(|consumer| Contribution {
            debtor: consumer,
            creditor: payer,
            amount: share,
        })
        .collect())
}
