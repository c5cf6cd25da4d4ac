//! Grid location value type.
//!
//! The delivery area is an open square grid of `[MIN, MAX] × [MIN, MAX]`
//! cells.  Couriers move between cells in whole steps, so distances are
//! Manhattan (sum of the absolute axis deltas) rather than Euclidean.

use std::fmt;

use crate::{CoreError, CoreResult, SimRng};

/// An immutable cell on the delivery grid.
///
/// Both components are always within [`Location::MIN`]`..=`[`Location::MAX`];
/// the only way to build one is through a validating constructor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(i32, i32)", into = "(i32, i32)"))]
pub struct Location {
    x: i32,
    y: i32,
}

impl Location {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 10;

    /// Build a location, failing with [`CoreError::InvalidCoordinate`] if
    /// either component is out of range.
    pub fn new(x: i32, y: i32) -> CoreResult<Self> {
        check_axis('x', x)?;
        check_axis('y', y)?;
        Ok(Self { x, y })
    }

    /// Uniformly sampled location.  Stand-in for a real geocoder.
    pub fn random(rng: &mut SimRng) -> Self {
        Self {
            x: rng.gen_range(Self::MIN..=Self::MAX),
            y: rng.gen_range(Self::MIN..=Self::MAX),
        }
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.y
    }

    /// Manhattan distance in grid steps.
    #[inline]
    pub fn distance_to(self, other: Location) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

fn check_axis(axis: char, value: i32) -> CoreResult<()> {
    if (Location::MIN..=Location::MAX).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidCoordinate {
            axis,
            value,
            min: Location::MIN,
            max: Location::MAX,
        })
    }
}

impl TryFrom<(i32, i32)> for Location {
    type Error = CoreError;

    fn try_from((x, y): (i32, i32)) -> CoreResult<Self> {
        Location::new(x, y)
    }
}

impl From<Location> for (i32, i32) {
    fn from(loc: Location) -> (i32, i32) {
        (loc.x, loc.y)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
