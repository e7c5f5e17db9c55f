/// Engine constants and tunable rates.
///
/// Classification thresholds live next to the enums they feed
/// (see [`crate::state::levels`]); this type holds the per-hour rates and
/// caps the scheduler integrates with. All values are compile-time
/// constants so every tick is reproducible from state + catalog alone.
pub struct EngineConfig;

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously active conditions.
    pub const MAX_ACTIVE_CONDITIONS: usize = 32;

    // ===== meter ranges =====
    /// Upper bound for hunger/thirst/fatigue/body_temperature/warmth.
    pub const STAT_MAX: i32 = 1000;
    /// Neutral value for the [0, 1000] meters.
    pub const STAT_NEUTRAL: i32 = 500;
    /// Upper bound for wetness.
    pub const WETNESS_MAX: i32 = 400;
    /// Upper bound for wind chill.
    pub const WIND_CHILL_MAX: i32 = 200;

    // ===== aggregation caps =====
    /// Aggregated movement penalty never exceeds this, no matter how many
    /// conditions contribute.
    pub const MOVEMENT_PENALTY_CAP: f32 = 0.95;
    /// Summed faint chance across active conditions is capped here.
    pub const FAINT_CHANCE_CAP: f32 = 0.8;

    // ===== fainting recovery window (minutes) =====
    pub const FAINT_MIN_MINUTES: u32 = 30;
    pub const FAINT_MAX_MINUTES: u32 = 180;

    // ===== metabolic rates (per hour at Normal exertion) =====
    pub const HUNGER_BURN_PER_HOUR: f32 = 12.0;
    pub const THIRST_BURN_PER_HOUR: f32 = 18.0;

    // ===== temperature regulation =====
    /// Fraction of the gap toward the target temperature closed per hour
    /// when fully exposed.
    pub const TEMP_RELAX_RATE_PER_HOUR: f32 = 0.45;
    /// Degrees-per-hour of evaporative cooling at maximum wetness.
    pub const EVAPORATIVE_COOLING_PER_HOUR: f32 = 60.0;
    /// Degrees-per-hour of cooling at maximum wind chill.
    pub const WIND_CHILL_COOLING_PER_HOUR: f32 = 40.0;
    /// Degrees-per-hour of warming next to a warmth source.
    pub const FIRE_WARMING_PER_HOUR: f32 = 80.0;
    /// Target-temperature bonus while a warmth source is present.
    pub const FIRE_TARGET_BONUS: f32 = 150.0;
    /// How strongly insulation (warmth vs neutral) shifts the target.
    pub const INSULATION_TARGET_WEIGHT: f32 = 0.4;

    // ===== wetness =====
    /// Wetness gained per hour under maximum precipitation, unsheltered.
    pub const WETNESS_GAIN_PER_HOUR: f32 = 120.0;
    /// Wetness lost per hour in dry conditions.
    pub const WETNESS_DECAY_PER_HOUR: f32 = 40.0;
    /// Drying speed multiplier next to a warmth source.
    pub const FIRE_DRYING_MULTIPLIER: f32 = 3.0;

    // ===== wind chill =====
    /// Fraction of the gap toward ambient wind exposure closed per hour.
    pub const WIND_CHILL_TRACK_RATE_PER_HOUR: f32 = 0.8;
}
