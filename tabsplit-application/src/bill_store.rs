use tabsplit_domain::{
    debts_by_creditor, debts_by_debtor, has_actionable_debts, Debt, DebtMatrix, Item, ItemId,
    NettingEngine, Person, PersonId,
};

/// Owning store for one settlement session: the participant and item
/// registries plus the last computed debt matrix.
///
/// The matrix is derived state. Registry mutations never recompute it;
/// callers invoke [`BillStore::calculate_results`] explicitly and must treat
/// the previous matrix as stale until they do. Before the first computation
/// the matrix is simply empty — reading it is not an error.
#[derive(Debug, Default)]
pub struct BillStore {
    persons: Vec<Person>,
    items: Vec<Item>,
    results: DebtMatrix,
}

impl BillStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a participant with a fresh id and an empty name at the front
    /// of the list, returning the id.
    pub fn add_person(&mut self) -> PersonId {
        let person = Person::new();
        let id = person.id();
        self.persons.insert(0, person);
        id
    }

    /// Removes a participant; an unknown id is a silent no-op. Every item is
    /// repaired in the same call: a matching payer is unset and the id leaves
    /// every consumer set, so no item can keep referencing a deleted person.
    pub fn delete_person(&mut self, id: PersonId) {
        self.persons.retain(|person| person.id() != id);
        for item in &mut self.items {
            if item.payer == Some(id) {
                item.payer = None;
            }
            item.consumers.remove(&id);
        }
    }

    /// Inserts an item with a fresh id, empty name, zero price, no payer and
    /// no consumers at the front of the list, returning the id.
    pub fn add_item(&mut self) -> ItemId {
        let item = Item::new();
        let id = item.id();
        self.items.insert(0, item);
        id
    }

    /// Removes an item; an unknown id is a silent no-op.
    pub fn delete_item(&mut self, id: ItemId) {
        self.items.retain(|item| item.id() != id);
    }

    /// Clears participants, items, and the computed matrix.
    pub fn reset_data(&mut self) {
        tracing::debug!(
            persons = self.persons.len(),
            items = self.items.len(),
            "Resetting bill data"
        );
        self.persons.clear();
        self.items.clear();
        self.results = DebtMatrix::default();
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.persons.iter_mut().find(|person| person.id() == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Deep copy of the participant list for handoff across an ownership
    /// boundary. Mutating the snapshot never touches the store.
    pub fn persons_snapshot(&self) -> Vec<Person> {
        self.persons.clone()
    }

    /// Deep copy of the item list, consumer sets included.
    pub fn items_snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Replaces the participant list wholesale. Items and results referenced
    /// the list being replaced, so both are cleared.
    pub fn set_persons(&mut self, persons: Vec<Person>) {
        self.persons = persons;
        self.items.clear();
        self.results = DebtMatrix::default();
    }

    /// Replaces the item list wholesale and recomputes the matrix.
    pub fn set_items_and_calculate(&mut self, items: Vec<Item>) {
        self.items = items;
        self.calculate_results();
    }

    /// Recomputes the debt matrix from the current participants and items.
    pub fn calculate_results(&mut self) {
        self.results = NettingEngine::calculate(&self.persons, &self.items);
    }

    pub fn results(&self) -> &DebtMatrix {
        &self.results
    }

    pub fn has_persons(&self) -> bool {
        !self.persons.is_empty()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Debts grouped by debtor, derived on demand from the current matrix.
    pub fn debts_from_persons(&self) -> Vec<Vec<Debt>> {
        debts_by_debtor(&self.results)
    }

    /// Debts grouped by creditor, derived on demand from the current matrix.
    pub fn debts_to_persons(&self) -> Vec<Vec<Debt>> {
        debts_by_creditor(&self.results)
    }

    /// True when the settled matrix contains anything left to pay.
    pub fn has_actionable_debts(&self) -> bool {
        has_actionable_debts(&self.results)
    }
}
