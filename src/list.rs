//! The checklist state container.
//!
//! [`TodoList`] owns the ordered items and the id counter. Every mutation
//! returns a [`ListChange`] so the render layer can react (start a row
//! animation, schedule a removal) without reaching into the list.

use crate::item::{EmptyTitleError, ItemId, Title, TodoItem};

/// Change notification emitted by [`TodoList`] mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    Added(ItemId),
    Completed(ItemId),
    Removed(ItemId),
}

/// Insertion-ordered checklist: items plus the monotonic id counter.
#[derive(Debug)]
pub struct TodoList {
    items: Vec<TodoItem>,
    next_id: ItemId,
}

impl Default for TodoList {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoList {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: ItemId::new(1),
        }
    }

    /// Seed the list with initial titles. Blank entries are skipped; the id
    /// counter ends one past the last seeded item.
    #[must_use]
    pub fn seeded<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for title in titles {
            let _ = list.add(title.as_ref());
        }
        list
    }

    /// Append a new item with the next id.
    ///
    /// Blank or whitespace-only text is rejected and leaves both the list
    /// and the id counter untouched.
    pub fn add(&mut self, text: &str) -> Result<ListChange, EmptyTitleError> {
        let title = Title::new(text)?;
        let id = self.next_id;
        self.items.push(TodoItem::new(id, title));
        self.next_id = self.next_id.next();
        Ok(ListChange::Added(id))
    }

    /// Mark an item completed.
    ///
    /// Returns the change only on the first transition; an absent or
    /// already-completed id produces nothing, so a repeated toggle can never
    /// schedule a second removal.
    pub fn complete(&mut self, id: ItemId) -> Option<ListChange> {
        let item = self.items.iter_mut().find(|item| item.id() == id)?;
        item.complete().then_some(ListChange::Completed(id))
    }

    /// Remove an item by id. A missing id is a silent no-op.
    pub fn remove(&mut self, id: ItemId) -> Option<ListChange> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        self.items.remove(index);
        Some(ListChange::Removed(id))
    }

    /// Drop every item. The id counter is not reset.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The id the next added item will receive.
    #[must_use]
    pub fn next_id(&self) -> ItemId {
        self.next_id
    }

    #[must_use]
    pub fn open_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_completed()).count()
    }

    #[must_use]
    pub fn done_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_completed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assigns_sequential_ids() {
        let mut list = TodoList::new();

        let first = list.add("one").expect("non-blank");
        let second = list.add("two").expect("non-blank");

        assert_eq!(first, ListChange::Added(ItemId::new(1)));
        assert_eq!(second, ListChange::Added(ItemId::new(2)));
        assert_eq!(list.len(), 2);
        assert_eq!(list.next_id(), ItemId::new(3));
    }

    #[test]
    fn blank_add_leaves_list_and_counter_unchanged() {
        let mut list = TodoList::seeded(["one", "two"]);
        let before = list.next_id();

        assert!(list.add("   ").is_err());
        assert!(list.add("\t").is_err());

        assert_eq!(list.len(), 2);
        assert_eq!(list.next_id(), before);
    }

    #[test]
    fn add_trims_title() {
        let mut list = TodoList::new();
        list.add("  Buy milk ").expect("non-blank");
        assert_eq!(list.items()[0].title(), "Buy milk");
    }

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut list = TodoList::seeded(["one", "two", "three"]);

        assert!(list.remove(ItemId::new(2)).is_some());
        let change = list.add("four").expect("non-blank");

        assert_eq!(change, ListChange::Added(ItemId::new(4)));
        let ids: Vec<u64> = list.items().iter().map(|item| item.id().value()).collect();
        assert_eq!(ids, [1, 3, 4]);
    }

    #[test]
    fn complete_transitions_exactly_once() {
        let mut list = TodoList::seeded(["one"]);
        let id = ItemId::new(1);

        assert_eq!(list.complete(id), Some(ListChange::Completed(id)));
        assert!(list.get(id).expect("present").is_completed());

        // Toggling again is a no-op, not a second transition.
        assert_eq!(list.complete(id), None);
        assert_eq!(list.complete(ItemId::new(99)), None);
    }

    #[test]
    fn remove_missing_id_is_silent() {
        let mut list = TodoList::seeded(["one"]);
        assert_eq!(list.remove(ItemId::new(7)), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn clear_keeps_counter() {
        let mut list = TodoList::seeded(["one", "two"]);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.next_id(), ItemId::new(3));
    }

    #[test]
    fn seeded_skips_blank_entries() {
        let list = TodoList::seeded(["one", "  ", "two"]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.next_id(), ItemId::new(3));
    }

    #[test]
    fn counts_split_open_and_done() {
        let mut list = TodoList::seeded(["one", "two", "three"]);
        list.complete(ItemId::new(2));
        assert_eq!(list.open_count(), 2);
        assert_eq!(list.done_count(), 1);
    }
}
