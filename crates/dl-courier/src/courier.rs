//! The `Courier` aggregate.

use dl_core::{CourierId, Location, Transport};

use crate::movement::{step_towards, steps_estimate};
use crate::{CourierError, CourierResult, CourierStatus};

/// A courier: identity, transport, current grid cell and availability.
///
/// Fields are private so every status change goes through
/// [`make_busy`](Self::make_busy) / [`make_free`](Self::make_free) and every
/// position change through [`move_towards`](Self::move_towards).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Courier {
    id:        CourierId,
    name:      String,
    transport: Transport,
    location:  Location,
    status:    CourierStatus,
}

impl Courier {
    /// Hire a new courier.  Starts [`CourierStatus::Free`] at `location`.
    pub fn new(name: impl Into<String>, transport: Transport, location: Location) -> CourierResult<Self> {
        Self::restore(CourierId::new(), name, transport, location, CourierStatus::Free)
    }

    /// Rebuild a courier from stored state (used by repository adapters).
    pub fn restore(
        id:        CourierId,
        name:      impl Into<String>,
        transport: Transport,
        location:  Location,
        status:    CourierStatus,
    ) -> CourierResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CourierError::EmptyName);
        }
        Ok(Self { id, name, transport, location, status })
    }

    #[inline]
    pub fn id(&self) -> CourierId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn transport(&self) -> Transport {
        self.transport
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn status(&self) -> CourierStatus {
        self.status
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.status == CourierStatus::Free
    }

    // ── State machine ─────────────────────────────────────────────────────

    /// `Free → Busy`.
    pub fn make_busy(&mut self) -> CourierResult<()> {
        if self.status != CourierStatus::Free {
            return Err(CourierError::AlreadyBusy(self.id));
        }
        self.status = CourierStatus::Busy;
        Ok(())
    }

    /// `Busy → Free`.
    pub fn make_free(&mut self) -> CourierResult<()> {
        if self.status == CourierStatus::Free {
            return Err(CourierError::AlreadyFree(self.id));
        }
        self.status = CourierStatus::Free;
        Ok(())
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Advance one tick toward `target` and return the new location.
    ///
    /// See [`crate::movement`] for the X-before-Y stepping rule.
    pub fn move_towards(&mut self, target: Location) -> CourierResult<Location> {
        self.location = step_towards(self.location, target, self.transport.speed())?;
        Ok(self.location)
    }

    /// Ranking score: Manhattan distance to `target` divided by speed.
    #[inline]
    pub fn steps_to(&self, target: Location) -> f64 {
        steps_estimate(self.location, target, self.transport.speed())
    }
}
