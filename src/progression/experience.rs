//! Experience curves: how much total experience each level requires.

use schema::GrowthRate;

pub const MAX_LEVEL: u8 = 100;

/// Total experience needed to reach `level` from nothing.
///
/// Level 1 (and below) is always 0. Levels above 100 read as level 100.
pub fn xp_to_reach_level(rate: GrowthRate, level: u8) -> u32 {
    if level <= 1 {
        return 0;
    }
    let n = level.min(MAX_LEVEL) as i64;
    let cube = n * n * n;

    let total = match rate {
        GrowthRate::Fast => 4 * cube / 5,
        GrowthRate::MediumFast => cube,
        GrowthRate::MediumSlow => 6 * cube / 5 - 15 * n * n + 100 * n - 140,
        GrowthRate::Slow => 5 * cube / 4,
        GrowthRate::Erratic => {
            if n < 50 {
                cube * (100 - n) / 50
            } else if n < 68 {
                cube * (150 - n) / 100
            } else if n < 98 {
                cube * ((1911 - 10 * n) / 3) / 500
            } else {
                cube * (160 - n) / 100
            }
        }
        GrowthRate::Fluctuating => {
            if n < 15 {
                cube * ((n + 1) / 3 + 24) / 50
            } else if n < 36 {
                cube * (n + 14) / 50
            } else {
                cube * (n / 2 + 32) / 50
            }
        }
    };

    total.max(0) as u32
}

/// Experience between `level` and `level + 1`. Zero at the level cap.
pub fn xp_for_next_level(rate: GrowthRate, level: u8) -> u32 {
    if level >= MAX_LEVEL {
        return 0;
    }
    xp_to_reach_level(rate, level + 1).saturating_sub(xp_to_reach_level(rate, level))
}

/// Highest level whose threshold `experience` has met.
pub fn level_for_experience(rate: GrowthRate, experience: u32) -> u8 {
    (1..=MAX_LEVEL)
        .take_while(|&level| xp_to_reach_level(rate, level) <= experience)
        .last()
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn test_level_one_needs_nothing() {
        for rate in GrowthRate::iter() {
            assert_eq!(xp_to_reach_level(rate, 1), 0, "{:?}", rate);
        }
    }

    #[test]
    fn test_next_level_cost_never_negative_and_total_never_drops() {
        for rate in GrowthRate::iter() {
            for level in 1..MAX_LEVEL {
                assert!(
                    xp_to_reach_level(rate, level + 1) >= xp_to_reach_level(rate, level),
                    "{:?} drops between {} and {}",
                    rate,
                    level,
                    level + 1
                );
                let _ = xp_for_next_level(rate, level);
            }
        }
    }

    #[rstest]
    #[case(GrowthRate::Fast, 800_000)]
    #[case(GrowthRate::MediumFast, 1_000_000)]
    #[case(GrowthRate::MediumSlow, 1_059_860)]
    #[case(GrowthRate::Slow, 1_250_000)]
    #[case(GrowthRate::Erratic, 600_000)]
    #[case(GrowthRate::Fluctuating, 1_640_000)]
    fn test_level_hundred_totals(#[case] rate: GrowthRate, #[case] expected: u32) {
        assert_eq!(xp_to_reach_level(rate, 100), expected);
    }

    #[rstest]
    #[case(GrowthRate::MediumFast, 10, 1_000)]
    #[case(GrowthRate::MediumSlow, 2, 9)]
    #[case(GrowthRate::Erratic, 50, 125_000)]
    #[case(GrowthRate::Fluctuating, 36, 46_656)]
    fn test_piecewise_samples(#[case] rate: GrowthRate, #[case] level: u8, #[case] expected: u32) {
        assert_eq!(xp_to_reach_level(rate, level), expected);
    }

    #[test]
    fn test_next_level_is_the_difference() {
        assert_eq!(xp_for_next_level(GrowthRate::MediumFast, 9), 1_000 - 729);
        assert_eq!(xp_for_next_level(GrowthRate::Slow, MAX_LEVEL), 0);
    }

    #[test]
    fn test_level_for_experience() {
        assert_eq!(level_for_experience(GrowthRate::MediumFast, 0), 1);
        assert_eq!(level_for_experience(GrowthRate::MediumFast, 999), 9);
        assert_eq!(level_for_experience(GrowthRate::MediumFast, 1_000), 10);
        assert_eq!(level_for_experience(GrowthRate::MediumFast, u32::MAX), 100);
    }
}
