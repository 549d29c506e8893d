//! Typed names for the editable parts of a [`User`](super::User).
//!
//! The console and logs refer to fields by their dotted names
//! (`name`, `address.city`, ...); everything inside the crate uses the enums.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Street,
    Suite,
    City,
    Zipcode,
}

impl AddressField {
    pub const ALL: [AddressField; 4] = [
        AddressField::Street,
        AddressField::Suite,
        AddressField::City,
        AddressField::Zipcode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AddressField::Street => "street",
            AddressField::Suite => "suite",
            AddressField::City => "city",
            AddressField::Zipcode => "zipcode",
        }
    }
}

/// An editable field of a user, including the nested address fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Name,
    Username,
    Email,
    Address(AddressField),
}

impl UserField {
    /// Every editable field, in form order.
    pub const ALL: [UserField; 7] = [
        UserField::Name,
        UserField::Username,
        UserField::Email,
        UserField::Address(AddressField::Street),
        UserField::Address(AddressField::Suite),
        UserField::Address(AddressField::City),
        UserField::Address(AddressField::Zipcode),
    ];
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserField::Name => f.write_str("name"),
            UserField::Username => f.write_str("username"),
            UserField::Email => f.write_str("email"),
            UserField::Address(field) => write!(f, "address.{}", field.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field `{0}` (expected one of: name, username, email, address.street, address.suite, address.city, address.zipcode)")]
pub struct FieldParseError(pub String);

impl FromStr for UserField {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "name" => UserField::Name,
            "username" => UserField::Username,
            "email" => UserField::Email,
            _ => {
                let nested = s
                    .strip_prefix("address.")
                    .and_then(|rest| AddressField::ALL.into_iter().find(|f| f.as_str() == rest));
                match nested {
                    Some(field) => UserField::Address(field),
                    None => return Err(FieldParseError(s.to_string())),
                }
            }
        };
        Ok(field)
    }
}
