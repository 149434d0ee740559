use schema::BaseStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

/// Stats in the order IVs, EVs and `BaseStats::to_array` use.
pub const STAT_ORDER: [Stat; 6] = [
    Stat::Hp,
    Stat::Attack,
    Stat::Defense,
    Stat::SpecialAttack,
    Stat::SpecialDefense,
    Stat::Speed,
];

/// Final usable value of a single stat.
///
/// HP = floor((2·base + iv + floor(ev/4)) · level / 100) + level + 10
/// Other = floor((2·base + iv + floor(ev/4)) · level / 100) + 5
pub fn derived_stat(base: u8, iv: u8, ev: u8, level: u8, is_hp: bool) -> u16 {
    let core = 2 * base as u32 + iv as u32 + ev as u32 / 4;
    let scaled = core * level as u32 / 100;
    let value = if is_hp {
        scaled + level as u32 + 10
    } else {
        scaled + 5
    };
    value.min(u16::MAX as u32) as u16
}

/// The six derived stats of a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl Stats {
    pub fn derive(base: &BaseStats, ivs: &[u8; 6], evs: &[u8; 6], level: u8) -> Self {
        let base = base.to_array();
        let mut values = [0u16; 6];
        for (i, stat) in STAT_ORDER.iter().enumerate() {
            values[i] = derived_stat(base[i], ivs[i], evs[i], level, *stat == Stat::Hp);
        }

        Self {
            hp: values[0],
            attack: values[1],
            defense: values[2],
            sp_attack: values[3],
            sp_defense: values[4],
            speed: values[5],
        }
    }

    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.sp_attack,
            Stat::SpecialDefense => self.sp_defense,
            Stat::Speed => self.speed,
        }
    }
}
