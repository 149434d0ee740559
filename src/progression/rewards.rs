use crate::config::BattleKind;

/// Experience granted for defeating a combatant.
///
/// Formula: `base_exp × level / 7`, boosted ×1.5 for trainer-owned opponents.
/// Never less than 1.
pub fn experience_yield(base_exp: u16, defeated_level: u8, kind: BattleKind) -> u32 {
    let raw = base_exp as u32 * defeated_level as u32;
    let scaled = match kind {
        BattleKind::Wild => raw / 7,
        BattleKind::Trainer => raw * 3 / 14,
    };
    scaled.max(1)
}
