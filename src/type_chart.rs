//! Elemental type effectiveness.
//!
//! Only non-neutral matchups are stored; any pair missing from the table is ×1.

use schema::PokemonType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effectiveness {
    Immune,
    NotVeryEffective,
    Neutral,
    SuperEffective,
}

impl Effectiveness {
    pub fn multiplier(self) -> f64 {
        match self {
            Effectiveness::Immune => 0.0,
            Effectiveness::NotVeryEffective => 0.5,
            Effectiveness::Neutral => 1.0,
            Effectiveness::SuperEffective => 2.0,
        }
    }
}

static TYPE_CHART: LazyLock<HashMap<(PokemonType, PokemonType), Effectiveness>> =
    LazyLock::new(build_chart);

/// Multiplier for a move of `attacking` type hitting a single `defending` type.
pub fn effectiveness(attacking: PokemonType, defending: PokemonType) -> Effectiveness {
    TYPE_CHART
        .get(&(attacking, defending))
        .copied()
        .unwrap_or(Effectiveness::Neutral)
}

pub fn multiplier(attacking: PokemonType, defending: PokemonType) -> f64 {
    effectiveness(attacking, defending).multiplier()
}

/// Product of the single-type multipliers over every defending type.
pub fn multiplier_against(attacking: PokemonType, defending: &[PokemonType]) -> f64 {
    defending
        .iter()
        .map(|&defending| multiplier(attacking, defending))
        .product()
}

/// Number of stored (non-neutral) matchups.
pub fn stored_entries() -> usize {
    TYPE_CHART.len()
}

fn build_chart() -> HashMap<(PokemonType, PokemonType), Effectiveness> {
    use Effectiveness::{Immune as X, NotVeryEffective as H, SuperEffective as S};
    use PokemonType::*;

    let rows: &[(PokemonType, &[(PokemonType, Effectiveness)])] = &[
        (Normal, &[(Rock, H), (Ghost, X), (Steel, H)]),
        (
            Fire,
            &[
                (Fire, H),
                (Water, H),
                (Grass, S),
                (Ice, S),
                (Bug, S),
                (Rock, H),
                (Dragon, H),
                (Steel, S),
            ],
        ),
        (
            Water,
            &[
                (Fire, S),
                (Water, H),
                (Grass, H),
                (Ground, S),
                (Rock, S),
                (Dragon, H),
            ],
        ),
        (
            Electric,
            &[
                (Water, S),
                (Electric, H),
                (Grass, H),
                (Ground, X),
                (Flying, S),
                (Dragon, H),
            ],
        ),
        (
            Grass,
            &[
                (Fire, H),
                (Water, S),
                (Grass, H),
                (Poison, H),
                (Ground, S),
                (Flying, H),
                (Bug, H),
                (Rock, S),
                (Dragon, H),
                (Steel, H),
            ],
        ),
        (
            Ice,
            &[
                (Fire, H),
                (Water, H),
                (Grass, S),
                (Ice, H),
                (Ground, S),
                (Flying, S),
                (Dragon, S),
                (Steel, H),
            ],
        ),
        (
            Fighting,
            &[
                (Normal, S),
                (Ice, S),
                (Poison, H),
                (Flying, H),
                (Psychic, H),
                (Bug, H),
                (Rock, S),
                (Ghost, X),
                (Dark, S),
                (Steel, S),
                (Fairy, H),
            ],
        ),
        (
            Poison,
            &[
                (Grass, S),
                (Poison, H),
                (Ground, H),
                (Rock, H),
                (Ghost, H),
                (Steel, X),
                (Fairy, S),
            ],
        ),
        (
            Ground,
            &[
                (Fire, S),
                (Electric, S),
                (Grass, H),
                (Poison, S),
                (Flying, X),
                (Bug, H),
                (Rock, S),
                (Steel, S),
            ],
        ),
        (
            Flying,
            &[
                (Electric, H),
                (Grass, S),
                (Fighting, S),
                (Bug, S),
                (Rock, H),
                (Steel, H),
            ],
        ),
        (
            Psychic,
            &[
                (Fighting, S),
                (Poison, S),
                (Psychic, H),
                (Dark, X),
                (Steel, H),
            ],
        ),
        (
            Bug,
            &[
                (Fire, H),
                (Grass, S),
                (Fighting, H),
                (Poison, H),
                (Flying, H),
                (Psychic, S),
                (Ghost, H),
                (Dark, S),
                (Steel, H),
                (Fairy, H),
            ],
        ),
        (
            Rock,
            &[
                (Fire, S),
                (Ice, S),
                (Fighting, H),
                (Ground, H),
                (Flying, S),
                (Bug, S),
                (Steel, H),
            ],
        ),
        (Ghost, &[(Normal, X), (Psychic, S), (Ghost, S), (Dark, H)]),
        (Dragon, &[(Dragon, S), (Steel, H), (Fairy, X)]),
        (
            Dark,
            &[
                (Fighting, H),
                (Psychic, S),
                (Ghost, S),
                (Dark, H),
                (Fairy, H),
            ],
        ),
        (
            Steel,
            &[
                (Fire, H),
                (Water, H),
                (Electric, H),
                (Ice, S),
                (Rock, S),
                (Steel, H),
                (Fairy, S),
            ],
        ),
        (
            Fairy,
            &[
                (Fire, H),
                (Fighting, S),
                (Poison, H),
                (Dragon, S),
                (Dark, S),
                (Steel, H),
            ],
        ),
    ];

    let mut chart = HashMap::new();
    for (attacking, matchups) in rows {
        for (defending, effectiveness) in *matchups {
            chart.insert((*attacking, *defending), *effectiveness);
        }
    }
    chart
}
