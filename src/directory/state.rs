//! Directory state and its transitions.
//!
//! Every transition borrows the current state and returns the next one, so the
//! service can apply it only once it is known to be valid.

use super::DirectoryError;
use crate::domain::{User, UserField, UserId};

/// The user in edit mode together with its draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editing {
    id: UserId,
    draft: User,
}

impl Editing {
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn draft(&self) -> &User {
        &self.draft
    }
}

/// Loaded users plus at most one selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryState {
    users: Vec<User>,
    editing: Option<Editing>,
}

impl DirectoryState {
    #[cfg(test)]
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            editing: None,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn editing(&self) -> Option<&Editing> {
        self.editing.as_ref()
    }

    pub fn selection(&self) -> Option<UserId> {
        self.editing.as_ref().map(Editing::id)
    }

    pub fn draft(&self) -> Option<&User> {
        self.editing.as_ref().map(Editing::draft)
    }

    /// Replaces the whole list with a fresh fetch.
    #[must_use]
    pub fn loaded(&self, users: Vec<User>) -> Self {
        Self {
            users,
            editing: self.editing.clone(),
        }
    }

    /// Selects `id` and seeds the draft with a copy of that user.
    ///
    /// Selecting while already editing discards the previous draft.
    pub fn begin_edit(&self, id: UserId) -> Result<Self, DirectoryError> {
        let user = self.user(id).ok_or(DirectoryError::UnknownUser(id))?;
        Ok(Self {
            users: self.users.clone(),
            editing: Some(Editing {
                id,
                draft: user.clone(),
            }),
        })
    }

    /// Writes `value` into one draft field. Nothing is validated.
    pub fn set_field(&self, field: UserField, value: impl Into<String>) -> Result<Self, DirectoryError> {
        let mut editing = self.editing.clone().ok_or(DirectoryError::NotEditing)?;
        editing.draft.set_field(field, value);
        Ok(Self {
            users: self.users.clone(),
            editing: Some(editing),
        })
    }

    /// Applies the server's copy of a saved user.
    ///
    /// Only the entry with `id` changes. The selection is cleared when it
    /// still points at `id`; a newer selection is kept.
    #[must_use]
    pub fn saved(&self, id: UserId, user: User) -> Self {
        let users = self
            .users
            .iter()
            .map(|existing| if existing.id == id { user.clone() } else { existing.clone() })
            .collect();
        let editing = self.editing.clone().filter(|editing| editing.id != id);
        Self { users, editing }
    }

    #[must_use]
    pub fn cancel(&self) -> Self {
        Self {
            users: self.users.clone(),
            editing: None,
        }
    }

    /// Drops the entry with `id`, and its selection if it was being edited.
    #[must_use]
    pub fn removed(&self, id: UserId) -> Self {
        let users = self.users.iter().filter(|user| user.id != id).cloned().collect();
        let editing = self.editing.clone().filter(|editing| editing.id != id);
        Self { users, editing }
    }
}
