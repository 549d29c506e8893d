use std::fmt;

use serde::{Deserialize, Serialize};

use super::field::{AddressField, UserField};

/// Server-assigned identifier of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Postal address owned by a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
}

impl Address {
    pub fn field(&self, field: AddressField) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::Suite => &self.suite,
            AddressField::City => &self.city,
            AddressField::Zipcode => &self.zipcode,
        }
    }

    fn field_mut(&mut self, field: AddressField) -> &mut String {
        match field {
            AddressField::Street => &mut self.street,
            AddressField::Suite => &mut self.suite,
            AddressField::City => &mut self.city,
            AddressField::Zipcode => &mut self.zipcode,
        }
    }
}

/// A directory entry as served by the users endpoint.
///
/// Fields the server sends beyond these are dropped on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub address: Address,
}

impl User {
    /// Creates a user with an empty address.
    #[cfg(test)]
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: username.into(),
            email: email.into(),
            address: Address::default(),
        }
    }

    #[cfg(test)]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Returns the current text of one editable field.
    pub fn field(&self, field: UserField) -> &str {
        match field {
            UserField::Name => &self.name,
            UserField::Username => &self.username,
            UserField::Email => &self.email,
            UserField::Address(field) => self.address.field(field),
        }
    }

    /// Overwrites one editable field. The value is stored verbatim.
    pub fn set_field(&mut self, field: UserField, value: impl Into<String>) {
        let slot = match field {
            UserField::Name => &mut self.name,
            UserField::Username => &mut self.username,
            UserField::Email => &mut self.email,
            UserField::Address(field) => self.address.field_mut(field),
        };
        *slot = value.into();
    }
}
