use crate::model::{Debt, DebtMatrix};

/// Positive entries grouped by debtor: one row per participant who owes
/// anything, in matrix order. Rows without positive entries are omitted.
pub fn debts_by_debtor(matrix: &DebtMatrix) -> Vec<Vec<Debt>> {
    let ids = matrix.participant_ids();
    let mut grouped = Vec::new();
    for (row, &from) in ids.iter().enumerate() {
        let debts: Vec<Debt> = ids
            .iter()
            .enumerate()
            .filter(|(column, _)| matrix.amount(row, *column).is_positive())
            .map(|(column, &to)| Debt {
                from,
                to,
                amount: matrix.amount(row, column),
            })
            .collect();
        if !debts.is_empty() {
            grouped.push(debts);
        }
    }
    grouped
}

/// The same positive entries reshaped by creditor: one row per participant
/// who is owed anything. Columns without positive entries are omitted.
pub fn debts_by_creditor(matrix: &DebtMatrix) -> Vec<Vec<Debt>> {
    let ids = matrix.participant_ids();
    let mut grouped = Vec::new();
    for (column, &to) in ids.iter().enumerate() {
        let debts: Vec<Debt> = ids
            .iter()
            .enumerate()
            .filter(|(row, _)| matrix.amount(*row, column).is_positive())
            .map(|(row, &from)| Debt {
                from,
                to,
                amount: matrix.amount(row, column),
            })
            .collect();
        if !debts.is_empty() {
            grouped.push(debts);
        }
    }
    grouped
}

/// True when the settlement has anything left to pay. Both projections are
/// derived from the same positive-entry set, so one check covers them.
pub fn has_actionable_debts(matrix: &DebtMatrix) -> bool {
    matrix.has_positive_entries()
}
