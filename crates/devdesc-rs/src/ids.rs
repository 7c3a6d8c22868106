// crates/devdesc-rs/src/ids.rs

//! Typed identifiers for cross-references inside a single profile.
//!
//! Standard variables are keyed by their `VariableId` rather than by a
//! synthetic numeric index, so they can never collide with explicit indices.

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(String::from(id))
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Key into the multi-language text table (`textId`).
    TextId
);
string_id!(
    /// Id of a custom datatype (`datatypeId`).
    DatatypeId
);
string_id!(
    /// Id of a variable, standard variable or direct parameter overlay (`variableId`).
    VariableId
);
string_id!(
    /// Id of a user-interface menu (`menuId`).
    MenuId
);

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_ids_compare_by_value() {
        let a = VariableId::from("V_Mode");
        let b = VariableId::new(String::from("V_Mode"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "V_Mode");
        assert_eq!(a.to_string(), "V_Mode");
    }
}
