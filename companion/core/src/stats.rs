//! Pet Stats
//!
//! The six bounded counters that everything else is derived from. Values are
//! stored as `u8` and every mutation saturates into `0..=STAT_MAX`, so no
//! caller can ever observe an out-of-range stat.

use serde::{Deserialize, Serialize};

/// Upper bound for every stat
pub const STAT_MAX: u8 = 100;

/// One of the six pet stats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    /// Grows through prayer and reading; drives the growth stage
    Faith,
    /// Grows through singing and reading
    Joy,
    /// Grows through singing and helping others
    Love,
    /// Grows through prayer and helping others
    Peace,
    /// Hunger meter, decays over time
    Food,
    /// Thirst meter, decays over time
    Water,
}

impl Stat {
    /// All stats in display order
    pub const ALL: [Stat; 6] = [
        Stat::Food,
        Stat::Water,
        Stat::Faith,
        Stat::Joy,
        Stat::Love,
        Stat::Peace,
    ];

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Faith => "Faith",
            Self::Joy => "Joy",
            Self::Love => "Love",
            Self::Peace => "Peace",
            Self::Food => "Food",
            Self::Water => "Water",
        }
    }

    /// Whether this stat is a physical need (decays over time)
    #[must_use]
    pub fn is_need(self) -> bool {
        matches!(self, Self::Food | Self::Water)
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The pet's six stats, each in `0..=100`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetStats {
    faith: u8,
    joy: u8,
    love: u8,
    peace: u8,
    food: u8,
    water: u8,
}

impl Default for PetStats {
    fn default() -> Self {
        Self {
            faith: 75,
            joy: 80,
            love: 85,
            peace: 70,
            food: 60,
            water: 50,
        }
    }
}

impl PetStats {
    /// Create stats from raw values, clamping each to `STAT_MAX`
    #[must_use]
    pub fn new(faith: u8, joy: u8, love: u8, peace: u8, food: u8, water: u8) -> Self {
        Self {
            faith: faith.min(STAT_MAX),
            joy: joy.min(STAT_MAX),
            love: love.min(STAT_MAX),
            peace: peace.min(STAT_MAX),
            food: food.min(STAT_MAX),
            water: water.min(STAT_MAX),
        }
    }

    /// Read one stat
    #[must_use]
    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Faith => self.faith,
            Stat::Joy => self.joy,
            Stat::Love => self.love,
            Stat::Peace => self.peace,
            Stat::Food => self.food,
            Stat::Water => self.water,
        }
    }

    fn slot_mut(&mut self, stat: Stat) -> &mut u8 {
        match stat {
            Stat::Faith => &mut self.faith,
            Stat::Joy => &mut self.joy,
            Stat::Love => &mut self.love,
            Stat::Peace => &mut self.peace,
            Stat::Food => &mut self.food,
            Stat::Water => &mut self.water,
        }
    }

    /// Add to a stat, saturating at `STAT_MAX`. Returns the new value.
    pub fn add(&mut self, stat: Stat, amount: u8) -> u8 {
        let slot = self.slot_mut(stat);
        *slot = slot.saturating_add(amount).min(STAT_MAX);
        *slot
    }

    /// Subtract from a stat, saturating at 0. Returns the new value.
    pub fn sub(&mut self, stat: Stat, amount: u8) -> u8 {
        let slot = self.slot_mut(stat);
        *slot = slot.saturating_sub(amount);
        *slot
    }

    /// Faith level
    #[must_use]
    pub fn faith(&self) -> u8 {
        self.faith
    }

    /// Joy level
    #[must_use]
    pub fn joy(&self) -> u8 {
        self.joy
    }

    /// Love level
    #[must_use]
    pub fn love(&self) -> u8 {
        self.love
    }

    /// Peace level
    #[must_use]
    pub fn peace(&self) -> u8 {
        self.peace
    }

    /// Food level
    #[must_use]
    pub fn food(&self) -> u8 {
        self.food
    }

    /// Water level
    #[must_use]
    pub fn water(&self) -> u8 {
        self.water
    }

    /// Average of the four spiritual stats
    #[must_use]
    pub fn spirit_average(&self) -> f64 {
        let sum = u32::from(self.faith)
            + u32::from(self.joy)
            + u32::from(self.love)
            + u32::from(self.peace);
        f64::from(sum) / 4.0
    }

    /// Average of the two physical needs
    #[must_use]
    pub fn needs_average(&self) -> f64 {
        f64::from(u32::from(self.food) + u32::from(self.water)) / 2.0
    }

    /// Overall health: mean of the spirit average and the needs average
    #[must_use]
    pub fn overall_health(&self) -> f64 {
        (self.spirit_average() + self.needs_average()) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let stats = PetStats::default();
        assert_eq!(stats.faith(), 75);
        assert_eq!(stats.joy(), 80);
        assert_eq!(stats.love(), 85);
        assert_eq!(stats.peace(), 70);
        assert_eq!(stats.food(), 60);
        assert_eq!(stats.water(), 50);
    }

    #[test]
    fn test_add_saturates_at_max() {
        let mut stats = PetStats::new(95, 0, 0, 0, 0, 0);
        assert_eq!(stats.add(Stat::Faith, 10), 100);
        assert_eq!(stats.add(Stat::Faith, 255), 100);
    }

    #[test]
    fn test_sub_floors_at_zero() {
        let mut stats = PetStats::new(0, 0, 0, 0, 1, 0);
        assert_eq!(stats.sub(Stat::Food, 1), 0);
        assert_eq!(stats.sub(Stat::Food, 1), 0);
        assert_eq!(stats.sub(Stat::Water, 5), 0);
    }

    #[test]
    fn test_new_clamps() {
        let stats = PetStats::new(200, 101, 100, 0, 150, 99);
        assert_eq!(stats.faith(), 100);
        assert_eq!(stats.joy(), 100);
        assert_eq!(stats.food(), 100);
        assert_eq!(stats.water(), 99);
    }

    #[test]
    fn test_overall_health_defaults() {
        // spirit avg = 77.5, needs avg = 55.0
        let stats = PetStats::default();
        assert!((stats.overall_health() - 66.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_need_classification() {
        assert!(Stat::Food.is_need());
        assert!(Stat::Water.is_need());
        assert!(!Stat::Faith.is_need());
        assert_eq!(Stat::ALL.len(), 6);
    }
}
