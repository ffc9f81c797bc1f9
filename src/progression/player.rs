//! Player record
//!
//! Level and stats as seen by the transfer engine. Base stats come from
//! progression; bonuses are whatever equipped items currently contribute.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stats an item can contribute to or require
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Strength - physical damage, carry weight
    Strength,
    /// Dexterity - speed, dodge, crit
    Dexterity,
    /// Intelligence - magic damage, mana
    Intelligence,
    /// Vitality - HP, resistances
    Vitality,
    Attack,
    Defense,
    MaxHealth,
    MaxMana,
    MiningPower,
    MoveSpeed,
}

impl Stat {
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Strength => "STR",
            Stat::Dexterity => "DEX",
            Stat::Intelligence => "INT",
            Stat::Vitality => "VIT",
            Stat::Attack => "ATK",
            Stat::Defense => "DEF",
            Stat::MaxHealth => "HP",
            Stat::MaxMana => "MP",
            Stat::MiningPower => "MINE",
            Stat::MoveSpeed => "SPD",
        }
    }

    /// Core attributes every player starts with
    pub fn attributes() -> &'static [Stat] {
        &[Stat::Strength, Stat::Dexterity, Stat::Intelligence, Stat::Vitality]
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Player stats and level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub level: u32,
    base: BTreeMap<Stat, i32>,
    bonus: BTreeMap<Stat, i32>,
}

impl Player {
    /// New player with every attribute at 10
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        let base = Stat::attributes().iter().map(|&s| (s, 10)).collect();
        Self {
            name: name.into(),
            level,
            base,
            bonus: BTreeMap::new(),
        }
    }

    pub fn with_base(mut self, stat: Stat, value: i32) -> Self {
        self.base.insert(stat, value);
        self
    }

    /// Effective value: base plus equipment bonus
    pub fn stat(&self, stat: Stat) -> i32 {
        self.base_stat(stat) + self.bonus(stat)
    }

    pub fn base_stat(&self, stat: Stat) -> i32 {
        self.base.get(&stat).copied().unwrap_or(0)
    }

    pub fn bonus(&self, stat: Stat) -> i32 {
        self.bonus.get(&stat).copied().unwrap_or(0)
    }

    /// All non-zero equipment bonuses
    pub fn bonuses(&self) -> &BTreeMap<Stat, i32> {
        &self.bonus
    }

    /// Shift a bonus by `delta`, dropping entries that return to zero
    pub fn adjust_bonus(&mut self, stat: Stat, delta: i32) {
        let value = self.bonus.entry(stat).or_insert(0);
        *value += delta;
        if *value == 0 {
            self.bonus.remove(&stat);
        }
    }

    /// This player as they would be without the given contributions
    pub fn without(&self, contributions: &BTreeMap<Stat, i32>) -> Player {
        let mut view = self.clone();
        for (&stat, &delta) in contributions {
            view.adjust_bonus(stat, -delta);
        }
        view
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new("Hero", 1)
    }
}
