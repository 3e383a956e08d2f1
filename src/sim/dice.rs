//! Distance dice.

use std::collections::BTreeMap;

use rand::Rng;

use crate::board::EngineTier;

/// Rolls the number of waypoints a player may move this turn.
pub fn roll_distance(engine: EngineTier, rng: &mut impl Rng) -> usize {
    let d1: u8 = rng.gen_range(1..=6);
    let d2: u8 = rng.gen_range(1..=6);
    let mut distance = d1 + d2;
    if engine.earns_bonus(d1, d2) {
        distance += rng.gen_range(1..=6u8);
    }
    usize::from(distance)
}

/// Exact probability of each distance for `engine`.
pub fn distance_odds(engine: EngineTier) -> BTreeMap<usize, f64> {
    let mut odds = BTreeMap::new();
    for d1 in 1..=6u8 {
        for d2 in 1..=6u8 {
            let base = usize::from(d1 + d2);
            if engine.earns_bonus(d1, d2) {
                for bonus in 1..=6 {
                    *odds.entry(base + bonus).or_insert(0.0) += 1.0 / 216.0;
                }
            } else {
                *odds.entry(base).or_insert(0.0) += 1.0 / 36.0;
            }
        }
    }
    odds
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rolls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!((2..=12).contains(&roll_distance(EngineTier::Basic, &mut rng)));
            assert!((3..=18).contains(&roll_distance(EngineTier::Superchief, &mut rng)));
            assert!((2..=18).contains(&roll_distance(EngineTier::Express, &mut rng)));
        }
    }

    #[test]
    fn odds_sum_to_one() {
        for engine in [EngineTier::Basic, EngineTier::Express, EngineTier::Superchief] {
            let total: f64 = distance_odds(engine).values().sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
        let basic = distance_odds(EngineTier::Basic);
        assert!((basic[&7] - 6.0 / 36.0).abs() < 1e-12);
        assert!(!distance_odds(EngineTier::Superchief).contains_key(&2));
    }
}
