//! Strongly typed identifier wrappers.
//!
//! Both ids wrap a `Uuid` so they are `Copy + Ord + Hash` and can be used as
//! map keys without ceremony.  An order reuses the id of the basket it was
//! created from, so `OrderId` is usually built with `From<Uuid>` rather than
//! `new()`.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Generate a typed ID wrapper around a `Uuid`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub Uuid);

        impl $name {
            /// The all-zero id.  Never produced by `new()`.
            pub const NIL: $name = $name(Uuid::nil());

            /// A fresh random (v4) id.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub fn is_nil(self) -> bool {
                self.0.is_nil()
            }

            #[inline]
            pub fn as_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of a courier aggregate.
    pub struct CourierId;
}

typed_id! {
    /// Identity of an order aggregate (equal to the originating basket id).
    pub struct OrderId;
}
