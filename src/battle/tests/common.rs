use crate::battle::action::{Action, Side};
use crate::battle::combatant::Combatant;
use crate::battle::state::BattleState;
use crate::battle::stats::Stats;
use crate::config::{BattleConfig, SpeedTiePolicy};
use crate::errors::PreconditionResult;
use crate::rng::TurnRng;
use crate::roster::Gender;
use schema::{
    BaseStats, GenderRatio, GrowthRate, MoveCategory, MoveData, MoveId, PokemonType, SpeciesData,
    SpeciesId,
};

/// Move data for the handful of moves the tests use.
pub fn move_fixture(id: &str) -> MoveData {
    use MoveCategory::{Physical, Special, Status};
    use PokemonType::{Fire, Normal, Water};

    let (name, move_type, category, power, accuracy, max_pp) = match id {
        "tackle" => ("Tackle", Normal, Physical, Some(40), Some(100), 35),
        "quick-attack" => ("Quick Attack", Normal, Physical, Some(40), Some(100), 30),
        "mega-punch" => ("Mega Punch", Normal, Physical, Some(80), Some(85), 20),
        "water-gun" => ("Water Gun", Water, Special, Some(40), Some(100), 25),
        "ember" => ("Ember", Fire, Special, Some(40), Some(100), 25),
        "swift" => ("Swift", Normal, Special, Some(60), None, 20),
        "growl" => ("Growl", Normal, Status, None, Some(100), 40),
        other => panic!("no move fixture named '{}'", other),
    };

    MoveData {
        id: MoveId::new(id),
        name: name.to_string(),
        move_type,
        category,
        power,
        accuracy,
        max_pp,
        priority: if id == "quick-attack" { 1 } else { 0 },
    }
}

pub fn species_fixture(name: &str, types: Vec<PokemonType>, base_stats: BaseStats) -> SpeciesData {
    SpeciesData {
        id: SpeciesId::new(name.to_lowercase()),
        name: name.to_string(),
        types,
        base_stats,
        growth_rate: GrowthRate::MediumFast,
        gender_ratio: GenderRatio::MaleFraction(0.5),
        base_exp: 64,
        learnset: vec![(1, MoveId::new("tackle"))],
    }
}

const UNIFORM_BASE: BaseStats = BaseStats {
    hp: 50,
    attack: 50,
    defense: 50,
    sp_attack: 50,
    sp_defense: 50,
    speed: 50,
};

/// A builder for test combatants with common defaults: Normal type, base 50
/// in every stat, zero IVs and EVs, and Tackle.
///
/// # Example
/// ```ignore
/// let combatant = TestCombatantBuilder::new("Pikachu", 25)
///     .types(vec![PokemonType::Electric])
///     .with_moves(vec!["quick-attack"])
///     .with_hp(10)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    level: u8,
    types: Vec<PokemonType>,
    moves: Vec<&'static str>,
    stats: Option<Stats>,
    speed: Option<u16>,
    current_hp: Option<u16>,
}

impl TestCombatantBuilder {
    pub fn new(name: &str, level: u8) -> Self {
        Self {
            name: name.to_string(),
            level,
            types: vec![PokemonType::Normal],
            moves: vec!["tackle"],
            stats: None,
            speed: None,
            current_hp: None,
        }
    }

    pub fn types(mut self, types: Vec<PokemonType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_moves(mut self, moves: Vec<&'static str>) -> Self {
        self.moves = moves;
        self
    }

    /// Bypass stat derivation. Health starts full at `hp`.
    pub fn fixed_stats(
        mut self,
        hp: u16,
        attack: u16,
        defense: u16,
        sp_attack: u16,
        sp_defense: u16,
        speed: u16,
    ) -> Self {
        self.stats = Some(Stats {
            hp,
            attack,
            defense,
            sp_attack,
            sp_defense,
            speed,
        });
        self
    }

    /// Override only the derived Speed.
    pub fn with_speed(mut self, speed: u16) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> Combatant {
        let species = species_fixture(&self.name, self.types, UNIFORM_BASE);
        let moves = self.moves.iter().map(|id| move_fixture(id)).collect();
        let mut combatant = Combatant::new(
            &species,
            self.level,
            [0; 6],
            [0; 6],
            Gender::Genderless,
            moves,
        );

        let mut stats = self.stats.unwrap_or(*combatant.stats());
        if let Some(speed) = self.speed {
            stats.speed = speed;
        }
        if self.stats.is_some() || self.speed.is_some() {
            combatant.override_stats(stats);
        }
        if let Some(hp) = self.current_hp {
            combatant.set_hp(hp);
        }
        combatant
    }
}

/// Wild battle settings with exact, roll-free damage and stable tie order.
pub fn test_config() -> BattleConfig {
    BattleConfig {
        damage_variance: false,
        speed_tie: SpeedTiePolicy::PlayerFirst,
        ..BattleConfig::wild()
    }
}

/// A battle using `test_config` and a scripted RNG.
pub fn create_test_battle(
    player: Vec<Combatant>,
    opponent: Vec<Combatant>,
    outcomes: Vec<u8>,
) -> BattleState {
    create_battle_with_config(player, opponent, test_config(), outcomes)
}

pub fn create_battle_with_config(
    player: Vec<Combatant>,
    opponent: Vec<Combatant>,
    config: BattleConfig,
    outcomes: Vec<u8>,
) -> BattleState {
    let rng = TurnRng::new_for_test(outcomes);
    match BattleState::with_rng(player, opponent, config, rng) {
        Ok(state) => state,
        Err(err) => panic!("failed to create test battle: {}", err),
    }
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: PreconditionResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

/// Submit both actions and order the round.
pub fn start_round(state: &mut BattleState, player: Action, opponent: Action) {
    assert_ok(state.submit_action(Side::Player, player));
    assert_ok(state.submit_action(Side::Opponent, opponent));
    assert_ok(state.order_actions().map(|_| ()));
}
