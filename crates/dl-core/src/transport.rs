//! Courier transport enum and its speed table.
//!
//! The set is closed: every courier travels by one of these three modes and
//! nothing registers new ones at runtime.  Storage adapters persist the
//! numeric [`Transport::id`]; logs and CSV output use [`Transport::as_str`].

use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// How a courier gets around the grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Transport {
    /// On foot, 1 cell per tick.
    Pedestrian,
    /// 2 cells per tick.
    Bicycle,
    /// 3 cells per tick.
    Car,
}

impl Transport {
    /// Every transport, in id order.
    pub const ALL: [Transport; 3] = [Transport::Pedestrian, Transport::Bicycle, Transport::Car];

    /// Grid cells covered per tick.
    #[inline]
    pub fn speed(self) -> u32 {
        match self {
            Transport::Pedestrian => 1,
            Transport::Bicycle    => 2,
            Transport::Car        => 3,
        }
    }

    /// Stable numeric id used by storage adapters.
    #[inline]
    pub fn id(self) -> u8 {
        match self {
            Transport::Pedestrian => 1,
            Transport::Bicycle    => 2,
            Transport::Car        => 3,
        }
    }

    /// Lowercase label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Pedestrian => "pedestrian",
            Transport::Bicycle    => "bicycle",
            Transport::Car        => "car",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> CoreResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValueInvalid("name"));
        }
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::UnknownTransport(name.to_owned()))
    }

    /// Lookup by storage id.
    pub fn from_id(id: u8) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| CoreError::UnknownTransport(format!("id {id}")))
    }
}

impl FromStr for Transport {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::from_name(s)
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
