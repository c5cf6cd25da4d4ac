//! Courier availability status.

/// Whether a courier can take a new order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CourierStatus {
    /// Waiting for an order (initial state).
    #[default]
    Free,
    /// Carrying exactly one assigned order.
    Busy,
}

impl CourierStatus {
    /// Stable numeric id used by storage adapters.
    #[inline]
    pub fn id(self) -> u8 {
        match self {
            CourierStatus::Free => 1,
            CourierStatus::Busy => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(CourierStatus::Free),
            2 => Some(CourierStatus::Busy),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CourierStatus::Free => "free",
            CourierStatus::Busy => "busy",
        }
    }
}

impl std::fmt::Display for CourierStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
