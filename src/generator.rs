use rand::Rng;
use tracing::{info, instrument, trace};

use crate::difficulty::DifficultyConfig;
use crate::error::EngineError;
use crate::model::{Board, CONTAINER_CAPACITY, Color, Container};

fn validate(config: &DifficultyConfig) -> Result<(), EngineError> {
    if config.color_count > Color::ALL.len() {
        return Err(EngineError::InvalidConfig {
            reason: format!(
                "{} colors requested, only {} available",
                config.color_count,
                Color::ALL.len()
            ),
        });
    }
    if config.empty_bottles > config.bottle_count {
        return Err(EngineError::InvalidConfig {
            reason: format!(
                "{} empty bottles exceed {} bottles",
                config.empty_bottles, config.bottle_count
            ),
        });
    }
    let filled = config.bottle_count - config.empty_bottles;
    if filled != config.color_count {
        return Err(EngineError::InvalidConfig {
            reason: format!(
                "{} filled bottles cannot hold {} colors",
                filled, config.color_count
            ),
        });
    }
    Ok(())
}

/// In-place Fisher-Yates: walks from the last index down, swapping each slot
/// with a uniformly chosen one at or below it.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Deals a board: four units of each active color shuffled into the filled
/// containers, followed by the empty ones. Solvability is not checked.
#[instrument(skip(rng))]
pub fn generate<R: Rng + ?Sized>(config: &DifficultyConfig, rng: &mut R) -> Result<Board, EngineError> {
    validate(config)?;

    let mut units: Vec<Color> = Color::ALL[..config.color_count]
        .iter()
        .flat_map(|&color| std::iter::repeat_n(color, CONTAINER_CAPACITY))
        .collect();
    shuffle(&mut units, rng);

    let mut containers = units
        .chunks(CONTAINER_CAPACITY)
        .map(|chunk| Container::from_units(chunk.to_vec()))
        .collect::<Result<Vec<_>, _>>()?;
    containers.extend((0..config.empty_bottles).map(|_| Container::new()));

    let board = Board::new(containers);
    info!(containers = board.len(), colors = config.color_count, "dealt new board");
    trace!(board = %board, "deal");
    Ok(board)
}

pub fn generate_random(config: &DifficultyConfig) -> Result<Board, EngineError> {
    generate(config, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn every_tier_deals_a_valid_board() {
        let mut rng = StdRng::seed_from_u64(7);
        for tier in Difficulty::ALL {
            let config = tier.get_config();
            for _ in 0..50 {
                let board = generate(&config, &mut rng).unwrap();
                assert_eq!(board.len(), config.bottle_count);
                assert_eq!(board.get_unit_count(), 4 * config.color_count);

                let counts = board.get_color_counts();
                for (i, &count) in counts.iter().enumerate() {
                    let expected = if i < config.color_count { 4 } else { 0 };
                    assert_eq!(count, expected, "color {i} in {tier}");
                }

                let empties = board.get_containers().iter().filter(|c| c.is_empty()).count();
                assert_eq!(empties, config.empty_bottles);
                assert!(board.get_containers()[..config.color_count].iter().all(Container::is_full));
            }
        }
    }

    #[test]
    fn same_seed_same_board() {
        let config = Difficulty::Hard.get_config();
        let a = generate(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_reaches_every_permutation_of_three() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            let mut items = [0, 1, 2];
            shuffle(&mut items, &mut rng);
            seen.insert(items);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn rejects_impossible_configs() {
        let mut rng = StdRng::seed_from_u64(1);
        let too_many_colors = DifficultyConfig { color_count: 9, bottle_count: 11, empty_bottles: 2 };
        let too_many_empty = DifficultyConfig { color_count: 0, bottle_count: 1, empty_bottles: 2 };
        let mismatch = DifficultyConfig { color_count: 4, bottle_count: 8, empty_bottles: 2 };
        for config in [too_many_colors, too_many_empty, mismatch] {
            assert!(matches!(
                generate(&config, &mut rng),
                Err(EngineError::InvalidConfig { .. })
            ));
        }
    }

    #[test]
    fn unseeded_generation_works() {
        let board = generate_random(&Difficulty::Easy.get_config()).unwrap();
        assert_eq!(board.len(), 6);
    }
}
