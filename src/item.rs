use std::fmt;

use thiserror::Error;

/// Identifier for a checklist item.
///
/// Ids are assigned monotonically by [`TodoList`](crate::list::TodoList) and
/// are never reused, even after the item is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
#[error("item title must not be blank")]
pub struct EmptyTitleError;

/// A non-blank item title. Construction trims surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn new(value: impl AsRef<str>) -> Result<Self, EmptyTitleError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            Err(EmptyTitleError)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Title {
    type Error = EmptyTitleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Title {
    type Error = EmptyTitleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single checklist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    id: ItemId,
    title: Title,
    completed: bool,
}

impl TodoItem {
    pub(crate) fn new(id: ItemId, title: Title) -> Self {
        Self {
            id,
            title,
            completed: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the item completed. The transition is one-way: the first call
    /// returns `true`, every later call is a no-op returning `false`.
    pub(crate) fn complete(&mut self) -> bool {
        if self.completed {
            false
        } else {
            self.completed = true;
            true
        }
    }
}
