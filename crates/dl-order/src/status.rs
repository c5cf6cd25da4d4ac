//! Order lifecycle status.

/// Where an order is in its lifecycle.  `Completed` is terminal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OrderStatus {
    /// Waiting for a courier (initial state).
    #[default]
    Created,
    /// Bound to exactly one courier.
    Assigned,
    /// Delivered.
    Completed,
}

impl OrderStatus {
    /// Stable numeric id used by storage adapters.
    #[inline]
    pub fn id(self) -> u8 {
        match self {
            OrderStatus::Created   => 1,
            OrderStatus::Assigned  => 2,
            OrderStatus::Completed => 3,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(OrderStatus::Created),
            2 => Some(OrderStatus::Assigned),
            3 => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Created   => "created",
            OrderStatus::Assigned  => "assigned",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
