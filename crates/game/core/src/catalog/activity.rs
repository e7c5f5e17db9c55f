//! Activity definitions: the named player actions that consume time.

/// Rough duration bucket, used by the presentation layer for grouping.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DurationClass {
    Instant,
    Quick,
    Short,
    Medium,
    Long,
    Extended,
}

/// How hard an activity works the body; scales metabolic burn and decides
/// whether fatigue recovers or drains.
///
/// `Unconscious` is reserved for the forced fainting advance and is never
/// catalog-authored.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ExertionLevel {
    Resting,
    Normal,
    Active,
    Strenuous,
    Unconscious,
}

impl ExertionLevel {
    /// Multiplier on the hunger/thirst burn rates.
    pub fn metabolic_factor(self) -> f32 {
        match self {
            ExertionLevel::Resting => 0.6,
            ExertionLevel::Normal => 1.0,
            ExertionLevel::Active => 1.5,
            ExertionLevel::Strenuous => 2.2,
            ExertionLevel::Unconscious => 0.4,
        }
    }

    /// Fatigue change per hour. Positive is recovery (toward 1000 = fully
    /// rested), negative is drain.
    pub fn fatigue_delta_per_hour(self) -> f32 {
        match self {
            ExertionLevel::Resting => 70.0,
            ExertionLevel::Unconscious => 90.0,
            ExertionLevel::Normal => -12.0,
            ExertionLevel::Active => -28.0,
            ExertionLevel::Strenuous => -55.0,
        }
    }
}

/// A named activity the player can spend time on.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityDefinition {
    pub name: String,
    pub duration_class: DurationClass,
    pub base_duration_hours: f32,
    pub exertion: ExertionLevel,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weather_affected: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_can_reduce: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment_can_reduce: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub uses_travel_speed: bool,
}

impl ActivityDefinition {
    /// The synthetic activity the scheduler runs when a character faints.
    /// No modifier flag is set: unconsciousness takes exactly as long as
    /// it takes.
    pub fn unconscious(duration_hours: f32) -> Self {
        Self {
            name: "unconscious".to_string(),
            duration_class: DurationClass::Short,
            base_duration_hours: duration_hours,
            exertion: ExertionLevel::Unconscious,
            weather_affected: false,
            skill_can_reduce: false,
            equipment_can_reduce: false,
            uses_travel_speed: false,
        }
    }
}
