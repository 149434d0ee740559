use crate::battle::stats::{Stat, Stats};
use crate::catalog::Catalog;
use crate::errors::CatalogResult;
use crate::pool::BoundedPool;
use crate::progression::{xp_to_reach_level, MAX_LEVEL};
use crate::roster::{Gender, KnownMove, RosterMember};
use schema::{BaseStats, GrowthRate, MoveData, PokemonType, SpeciesData, SpeciesId};
use serde::{Deserialize, Serialize};

/// A move a combatant knows and the uses it has left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSlot {
    pub data: MoveData,
    pub pp: BoundedPool,
}

impl MoveSlot {
    pub fn new(data: MoveData) -> Self {
        let pp = BoundedPool::new(data.max_pp as u16);
        Self { data, pp }
    }

    pub fn is_exhausted(&self) -> bool {
        self.pp.is_empty()
    }
}

/// Battle-bound copy of a roster member.
///
/// Types, base stats, IVs and EVs are fixed for the whole battle. Health and
/// move uses only change through their pools; a combatant has fainted exactly
/// when its health pool is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    species: SpeciesId,
    nickname: String,
    level: u8,
    gender: Gender,
    types: Vec<PokemonType>,
    base_stats: BaseStats,
    ivs: [u8; 6],
    evs: [u8; 6],
    growth_rate: GrowthRate,
    base_exp: u16,
    experience: u32,
    stats: Stats,
    health: BoundedPool,
    moves: Vec<MoveSlot>,
    run_attempts: u8,
}

impl Combatant {
    /// Create a full-health combatant. Only the first four moves are kept.
    pub fn new(
        species: &SpeciesData,
        level: u8,
        ivs: [u8; 6],
        evs: [u8; 6],
        gender: Gender,
        moves: Vec<MoveData>,
    ) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        let stats = Stats::derive(&species.base_stats, &ivs, &evs, level);

        Self {
            species: species.id.clone(),
            nickname: species.name.clone(),
            level,
            gender,
            types: species.types.clone(),
            base_stats: species.base_stats,
            ivs,
            evs,
            growth_rate: species.growth_rate,
            base_exp: species.base_exp,
            experience: xp_to_reach_level(species.growth_rate, level),
            stats,
            health: BoundedPool::new(stats.hp),
            moves: moves.into_iter().take(4).map(MoveSlot::new).collect(),
            run_attempts: 0,
        }
    }

    /// Build the battle copy of a saved party member.
    pub fn from_roster(member: &RosterMember, catalog: &Catalog) -> CatalogResult<Self> {
        member.validate(catalog)?;
        let species = catalog.species(&member.species)?;

        let moves = member
            .moves
            .iter()
            .map(|known| catalog.move_data(&known.id).cloned())
            .collect::<CatalogResult<Vec<_>>>()?;

        let mut combatant = Self::new(
            species,
            member.level,
            member.ivs,
            member.evs,
            member.gender,
            moves,
        );

        if let Some(nickname) = &member.nickname {
            combatant.nickname = nickname.clone();
        }
        combatant.experience = member.experience.max(combatant.experience);
        if let Some(hp) = member.current_hp {
            combatant.health.set_current(hp);
        }
        for (slot, known) in combatant.moves.iter_mut().zip(&member.moves) {
            if let Some(pp) = known.pp {
                slot.pp.set_current(pp as u16);
            }
        }

        Ok(combatant)
    }

    /// Copy battle results (health, move uses, level, experience) into the saved member.
    pub fn write_back(&self, member: &mut RosterMember) {
        member.level = self.level;
        member.experience = self.experience;
        member.current_hp = if self.health.is_full() {
            None
        } else {
            Some(self.health.current())
        };
        member.moves = self
            .moves
            .iter()
            .map(|slot| KnownMove {
                id: slot.data.id.clone(),
                pp: if slot.pp.is_full() {
                    None
                } else {
                    Some(slot.pp.current() as u8)
                },
            })
            .collect();
    }

    pub fn species(&self) -> &SpeciesId {
        &self.species
    }

    pub fn name(&self) -> &str {
        &self.nickname
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn types(&self) -> &[PokemonType] {
        &self.types
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base_stats
    }

    pub fn ivs(&self) -> &[u8; 6] {
        &self.ivs
    }

    pub fn evs(&self) -> &[u8; 6] {
        &self.evs
    }

    pub fn growth_rate(&self) -> GrowthRate {
        self.growth_rate
    }

    pub fn base_exp(&self) -> u16 {
        self.base_exp
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn stat(&self, stat: Stat) -> u16 {
        self.stats.get(stat)
    }

    pub fn speed(&self) -> u16 {
        self.stats.speed
    }

    pub fn health(&self) -> &BoundedPool {
        &self.health
    }

    pub fn current_hp(&self) -> u16 {
        self.health.current()
    }

    pub fn max_hp(&self) -> u16 {
        self.health.maximum()
    }

    pub fn is_fainted(&self) -> bool {
        self.health.is_empty()
    }

    pub fn moves(&self) -> &[MoveSlot] {
        &self.moves
    }

    pub fn move_slot(&self, index: usize) -> Option<&MoveSlot> {
        self.moves.get(index)
    }

    pub fn run_attempts(&self) -> u8 {
        self.run_attempts
    }

    /// Apply damage. Returns true if this hit made the combatant faint.
    pub fn take_damage(&mut self, amount: u16) -> bool {
        let was_fainted = self.is_fainted();
        self.health.subtract(amount);
        !was_fainted && self.is_fainted()
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.health.set_current(hp);
    }

    /// Spend one use of a move. Returns the move's data, or None if the slot is
    /// missing or exhausted.
    pub fn spend_pp(&mut self, index: usize) -> Option<MoveData> {
        let slot = self.moves.get_mut(index)?;
        if slot.is_exhausted() {
            return None;
        }
        slot.pp.subtract(1);
        Some(slot.data.clone())
    }

    pub fn set_pp(&mut self, index: usize, pp: u16) {
        if let Some(slot) = self.moves.get_mut(index) {
            slot.pp.set_current(pp);
        }
    }

    /// Replace the derived stats and refill health to the new maximum.
    #[cfg(test)]
    pub(crate) fn override_stats(&mut self, stats: Stats) {
        self.stats = stats;
        self.health = BoundedPool::new(stats.hp);
    }

    pub fn record_failed_escape(&mut self) {
        self.run_attempts = self.run_attempts.saturating_add(1);
    }

    /// Add experience and apply any level-ups. Returns each level reached, in order.
    ///
    /// Each level re-derives the stats; the health maximum grows by the HP
    /// difference and current health rises with it.
    pub fn gain_experience(&mut self, amount: u32) -> Vec<u8> {
        if self.level >= MAX_LEVEL || self.is_fainted() {
            return Vec::new();
        }
        self.experience = self.experience.saturating_add(amount);

        let mut levels = Vec::new();
        while self.level < MAX_LEVEL
            && self.experience >= xp_to_reach_level(self.growth_rate, self.level + 1)
        {
            self.level += 1;
            levels.push(self.level);
        }

        if !levels.is_empty() {
            let old_max = self.stats.hp;
            self.stats = Stats::derive(&self.base_stats, &self.ivs, &self.evs, self.level);
            self.health.set_maximum(self.stats.hp);
            self.health.add(self.stats.hp.saturating_sub(old_max));
        }
        levels
    }
}
