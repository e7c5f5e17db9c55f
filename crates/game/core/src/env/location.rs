//! Location collaborator: shelter quality and warmth sources.

use bitflags::bitflags;

bitflags! {
    /// Shelter qualities of the current location.
    ///
    /// Tiers are independent bits so a location can advertise exactly what
    /// it provides, but the accessors treat them hierarchically: an
    /// excellent shelter also counts as good and some.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ShelterFlags: u8 {
        const SOME = 1;
        const GOOD = 1 << 1;
        const EXCELLENT = 1 << 2;
    }
}

impl ShelterFlags {
    pub fn provides_some(self) -> bool {
        self.intersects(Self::SOME | Self::GOOD | Self::EXCELLENT)
    }

    pub fn provides_good(self) -> bool {
        self.intersects(Self::GOOD | Self::EXCELLENT)
    }

    pub fn provides_excellent(self) -> bool {
        self.contains(Self::EXCELLENT)
    }

    /// Multiplier on the body-temperature relaxation rate: better shelter
    /// stabilizes harder, down to 15% of the exposed rate.
    pub fn stabilization_factor(self) -> f32 {
        if self.provides_excellent() {
            0.15
        } else if self.provides_good() {
            0.35
        } else if self.provides_some() {
            0.6
        } else {
            1.0
        }
    }

    /// Fraction of precipitation the shelter keeps off.
    pub fn rain_block(self) -> f32 {
        if self.provides_excellent() {
            0.9
        } else if self.provides_good() {
            0.6
        } else if self.provides_some() {
            0.3
        } else {
            0.0
        }
    }

    /// Fraction of ambient wind the shelter keeps off.
    pub fn wind_block(self) -> f32 {
        if self.provides_excellent() {
            0.85
        } else if self.provides_good() {
            0.6
        } else if self.provides_some() {
            0.35
        } else {
            0.0
        }
    }
}

/// Read-only view of the character's current location.
///
/// Implemented by the location/shelter system; the engine only queries,
/// never mutates.
pub trait LocationOracle: Send + Sync {
    /// Shelter qualities of the current location.
    fn shelter(&self) -> ShelterFlags;

    /// Whether a warmth source (campfire, hearth) is lit here.
    fn has_warmth_source(&self) -> bool;
}
