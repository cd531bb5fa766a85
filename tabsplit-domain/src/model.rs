use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    sync::atomic::{AtomicU64, Ordering},
};

use fxhash::FxHashSet;
use rust_decimal::{Decimal, RoundingStrategy};

// One counter feeds both id spaces, so a person id and an item id can never
// hold the same raw value either.
static NEXT_RAW_ID: AtomicU64 = AtomicU64::new(1);

fn next_raw_id() -> u64 {
    NEXT_RAW_ID.fetch_add(1, Ordering::Relaxed)
}

/// Opaque identity of a participant. Fresh values never repeat within a
/// process lifetime; equality is identity, never content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(u64);

impl PersonId {
    fn fresh() -> Self {
        Self(next_raw_id())
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    fn fresh() -> Self {
        Self(next_raw_id())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A monetary amount backed by decimal arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Rounds to 2 fractional digits, half away from zero.
    pub fn to_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// A participant in the expense-sharing group. Identity is the id; the name
/// is mutable free text and never used for equality.
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    id: PersonId,
    pub name: String,
}

impl Person {
    /// Creates a participant with a fresh id and an empty name.
    pub fn new() -> Self {
        Self {
            id: PersonId::fresh(),
            name: String::new(),
        }
    }

    pub fn id(&self) -> PersonId {
        self.id
    }
}

impl Default for Person {
    fn default() -> Self {
        Self::new()
    }
}

/// A single recorded expense. `payer` may be unset while the user is still
/// filling the item in; such an item takes no part in settlement.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    id: ItemId,
    pub name: String,
    pub price: Money,
    pub payer: Option<PersonId>,
    pub consumers: FxHashSet<PersonId>,
}

impl Item {
    /// Creates an item with a fresh id, empty name, zero price, no payer and
    /// no consumers.
    pub fn new() -> Self {
        Self {
            id: ItemId::fresh(),
            name: String::new(),
            price: Money::ZERO,
            payer: None,
            consumers: FxHashSet::default(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

/// "`from` owes `to` this amount."
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Debt {
    pub from: PersonId,
    pub to: PersonId,
    pub amount: Money,
}

/// Pairwise debt table. Row and column order follow the participant list at
/// the moment of computation, and that id order is carried alongside the
/// cells, so reading an old matrix is stale but never misindexed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DebtMatrix {
    ids: Vec<PersonId>,
    cells: Vec<Money>,
}

impl DebtMatrix {
    pub fn zeroed(ids: Vec<PersonId>) -> Self {
        let n = ids.len();
        Self {
            ids,
            cells: vec![Money::ZERO; n * n],
        }
    }

    /// Participant ids in row/column order.
    pub fn participant_ids(&self) -> &[PersonId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn position_of(&self, id: PersonId) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    /// Amount the participant at row `debtor` owes the one at column
    /// `creditor`.
    pub fn amount(&self, debtor: usize, creditor: usize) -> Money {
        self.cells[debtor * self.ids.len() + creditor]
    }

    pub(crate) fn amount_mut(&mut self, debtor: usize, creditor: usize) -> &mut Money {
        let n = self.ids.len();
        &mut self.cells[debtor * n + creditor]
    }

    pub fn has_positive_entries(&self) -> bool {
        self.cells.iter().any(|amount| amount.is_positive())
    }
}
