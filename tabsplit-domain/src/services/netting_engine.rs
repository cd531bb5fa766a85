use crate::{
    model::{DebtMatrix, Item, Person, PersonId},
    services::split_calculator::split_item,
};
use fxhash::FxHashMap;

/// Builds and settles the pairwise debt matrix.
///
/// The two steps are public on their own: [`NettingEngine::accumulate`]
/// produces the raw per-item attribution, [`NettingEngine::net`] cancels
/// opposing debts. [`NettingEngine::calculate`] composes them.
pub struct NettingEngine;

impl NettingEngine {
    pub fn calculate(persons: &[Person], items: &[Item]) -> DebtMatrix {
        let mut matrix = Self::accumulate(persons, items);
        Self::net(&mut matrix);
        matrix
    }

    /// Accumulates every item's contributions into a zeroed matrix in
    /// participant list order. Items without a payer or without consumers
    /// are skipped.
    pub fn accumulate(persons: &[Person], items: &[Item]) -> DebtMatrix {
        let ids: Vec<PersonId> = persons.iter().map(Person::id).collect();
        let positions: FxHashMap<PersonId, usize> = ids
            .iter()
            .copied()
            .enumerate()
            .map(|(position, id)| (id, position))
            .collect();
        let mut matrix = DebtMatrix::zeroed(ids);

        for item in items {
            let contributions = match split_item(item) {
                Ok(contributions) => contributions,
                Err(exclusion) => {
                    tracing::debug!(
                        item = %item.id(),
                        reason = %exclusion,
                        "Item excluded from settlement"
                    );
                    continue;
                }
            };

            for contribution in contributions {
                // The deletion cascade keeps registry items free of unknown
                // ids; a stale bulk-replaced item is skipped, not a panic.
                let (Some(&debtor), Some(&creditor)) = (
                    positions.get(&contribution.debtor),
                    positions.get(&contribution.creditor),
                ) else {
                    continue;
                };
                *matrix.amount_mut(debtor, creditor) += contribution.amount;
            }
        }

        tracing::debug!(
            participants = persons.len(),
            items = items.len(),
            "Debt matrix accumulated"
        );
        matrix
    }

    /// Cancels opposing debts pairwise: for each unordered pair the lower
    /// direction is subtracted from both sides, then both cells are rounded
    /// to 2 fractional digits. Rounding after the subtraction keeps per-item
    /// truncation from compounding across items.
    pub fn net(matrix: &mut DebtMatrix) {
        let n = matrix.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let lowest = matrix.amount(i, j).min(matrix.amount(j, i));
                let forward = matrix.amount(i, j) - lowest;
                let backward = matrix.amount(j, i) - lowest;
                *matrix.amount_mut(i, j) = forward.to_cents();
                *matrix.amount_mut(j, i) = backward.to_cents();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Money;

    fn persons(count: usize) -> Vec<Person> {
        (0..count).map(|_| Person::new()).collect()
    }

    fn item_with(price: Money, payer: Option<PersonId>, consumers: &[PersonId]) -> Item {
        let mut item = Item::new();
        item.price = price;
        item.payer = payer;
        item.consumers = consumers.iter().copied().collect();
        item
    }

    #[test]
    fn dinner_split_three_ways() {
        let group = persons(3);
        let (a, b, c) = (group[0].id(), group[1].id(), group[2].id());
        let dinner = item_with(Money::from_i64(30), Some(a), &[a, b, c]);

        let matrix = NettingEngine::calculate(&group, &[dinner]);

        assert_eq!(matrix.amount(1, 0), Money::from_i64(10));
        assert_eq!(matrix.amount(2, 0), Money::from_i64(10));
        for i in 0..3 {
            for j in 0..3 {
                if (i, j) != (1, 0) && (i, j) != (2, 0) {
                    assert!(matrix.amount(i, j).is_zero(), "({i}, {j}) should be zero");
                }
            }
        }
        assert_eq!(matrix.position_of(b), Some(1));
        assert_eq!(matrix.position_of(c), Some(2));
    }

    #[test]
    fn opposing_debts_net_to_single_direction() {
        let group = persons(2);
        let (a, b) = (group[0].id(), group[1].id());
        let items = [
            item_with(Money::from_i64(10), Some(a), &[a, b]),
            item_with(Money::from_i64(8), Some(b), &[a, b]),
        ];

        let accumulated = NettingEngine::accumulate(&group, &items);
        assert_eq!(accumulated.amount(1, 0), Money::from_i64(5));
        assert_eq!(accumulated.amount(0, 1), Money::from_i64(4));

        let matrix = NettingEngine::calculate(&group, &items);
        assert_eq!(matrix.amount(1, 0), Money::from_i64(1));
        assert!(matrix.amount(0, 1).is_zero());
    }

    #[test]
    fn rounding_applies_after_subtraction() {
        // Two thirds of 10, twice: per-item rounding would yield 6.66, the
        // deferred rounding yields 6.67.
        let group = persons(3);
        let (a, b, c) = (group[0].id(), group[1].id(), group[2].id());
        let items = [
            item_with(Money::from_i64(10), Some(a), &[a, b, c]),
            item_with(Money::from_i64(10), Some(a), &[a, b, c]),
        ];

        let matrix = NettingEngine::calculate(&group, &items);

        assert_eq!(matrix.amount(1, 0), Money::new(667, 2));
        assert_eq!(matrix.amount(2, 0), Money::new(667, 2));
    }

    #[test]
    fn invalid_items_leave_matrix_untouched() {
        let group = persons(2);
        let (a, b) = (group[0].id(), group[1].id());
        let no_consumers = item_with(Money::from_i64(12), Some(a), &[]);
        let no_payer = item_with(Money::from_i64(12), None, &[a, b]);

        let matrix = NettingEngine::calculate(&group, &[no_consumers, no_payer]);

        assert_eq!(matrix.len(), 2);
        assert!(!matrix.has_positive_entries());
    }

    #[test]
    fn unknown_consumer_ids_are_skipped() {
        let group = persons(2);
        let (a, b) = (group[0].id(), group[1].id());
        let stranger = Person::new().id();
        let item = item_with(Money::from_i64(30), Some(a), &[a, b, stranger]);

        let matrix = NettingEngine::calculate(&group, &[item]);

        // Only the registered consumer contributes; the share stays a third.
        assert_eq!(matrix.amount(1, 0), Money::from_i64(10));
        assert!(matrix.amount(0, 1).is_zero());
    }

    #[test]
    fn empty_registry_yields_empty_matrix() {
        let matrix = NettingEngine::calculate(&[], &[]);

        assert!(matrix.is_empty());
        assert!(!matrix.has_positive_entries());
    }
}
