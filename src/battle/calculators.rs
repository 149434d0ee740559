use crate::battle::combatant::Combatant;
use crate::rng::TurnRng;
use crate::type_chart::multiplier_against;
use schema::{MoveCategory, MoveData};

/// Outcome of one damage calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageResult {
    pub damage: u16,
    pub multiplier: f64,
    pub same_type_bonus: bool,
}

/// Accuracy check. Moves without an accuracy value never miss.
pub fn move_hits(move_data: &MoveData, rng: &mut TurnRng) -> bool {
    match move_data.accuracy {
        None => true,
        Some(accuracy) => rng.next_outcome("accuracy check") <= accuracy,
    }
}

/// Attack and defense stats the move's category reads.
fn attack_and_defense(
    attacker: &Combatant,
    defender: &Combatant,
    category: MoveCategory,
) -> (u32, u32) {
    match category {
        MoveCategory::Special => (
            attacker.stats().sp_attack as u32,
            defender.stats().sp_defense as u32,
        ),
        _ => (
            attacker.stats().attack as u32,
            defender.stats().defense as u32,
        ),
    }
}

/// Damage for a damaging move, before it is applied.
///
/// `((2L/5 + 2) * power * A / D) / 50 + 2`, then the same-type bonus, then the
/// type multiplier, then the 85-100% roll when `variance` is set. Every step
/// floors. A non-immune hit deals at least 1; an immune defender takes 0 and
/// no roll is drawn.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    variance: bool,
    rng: &mut TurnRng,
) -> DamageResult {
    let multiplier = multiplier_against(move_data.move_type, defender.types());
    let same_type_bonus = attacker.has_type(move_data.move_type);

    let power = match (move_data.category, move_data.power) {
        (MoveCategory::Status, _) | (_, None) => 0,
        (_, Some(power)) => power as u32,
    };
    if power == 0 || multiplier == 0.0 {
        return DamageResult {
            damage: 0,
            multiplier,
            same_type_bonus,
        };
    }

    let (attack, defense) = attack_and_defense(attacker, defender, move_data.category);
    let level = attacker.level() as u32;

    let mut damage = (2 * level / 5 + 2) * power * attack / defense.max(1) / 50 + 2;
    if same_type_bonus {
        damage = damage * 3 / 2;
    }
    damage = (damage as f64 * multiplier).floor() as u32;

    if variance {
        let roll = rng.next_outcome("damage roll") as u32;
        let percent = 85 + (roll - 1) * 16 / 100;
        damage = damage * percent / 100;
    }

    DamageResult {
        damage: damage.clamp(1, u16::MAX as u32) as u16,
        multiplier,
        same_type_bonus,
    }
}

/// Escape odds on the 0-255 scale. Anything above 255 always escapes.
pub fn escape_odds(own_speed: u16, opposing_speed: u16, failed_attempts: u8) -> u32 {
    if opposing_speed == 0 {
        return u32::MAX;
    }
    own_speed as u32 * 128 / opposing_speed as u32 + 30 * failed_attempts as u32
}

/// Whether a flee attempt succeeds. A faster or equally fast combatant always
/// escapes without drawing.
pub fn escape_succeeds(
    own_speed: u16,
    opposing_speed: u16,
    failed_attempts: u8,
    rng: &mut TurnRng,
) -> bool {
    if own_speed >= opposing_speed {
        return true;
    }
    let odds = escape_odds(own_speed, opposing_speed, failed_attempts);
    if odds > 255 {
        return true;
    }
    rng.next_outcome("flee attempt") as u32 <= odds * 100 / 256
}
