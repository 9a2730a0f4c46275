//! Tests for the generator lifecycle: setup, generation, release and reuse

#[cfg(test)]
mod tests {
    use floorgen::algorithm::executor::LevelGenerator;
    use floorgen::io::configuration::{Catalog, EnemyRemoval, LevelConfig, PoolSettings};
    use floorgen::io::error::LevelError;
    use floorgen::io::recording::RecordingFactory;
    use floorgen::lifecycle::Category;
    use floorgen::pool::ReleaseOutcome;
    use rand::{SeedableRng, rngs::StdRng};

    fn grid(x_length: usize, z_length: usize) -> LevelConfig {
        LevelConfig {
            x_length,
            z_length,
            tiles: Catalog::uniform(["floor"]),
            ..LevelConfig::default()
        }
    }

    fn ready(config: LevelConfig) -> LevelGenerator<RecordingFactory> {
        let generator = LevelGenerator::new(config, RecordingFactory::new());
        assert!(generator.is_ok(), "configuration rejected");
        let Ok(mut generator) = generator else {
            unreachable!()
        };
        generator.setup_pools();
        generator
    }

    // Tests generating before setup is reported instead of panicking
    #[test]
    fn test_generate_requires_pools() {
        let generator = LevelGenerator::new(grid(3, 3), RecordingFactory::new());
        let Ok(mut generator) = generator else {
            unreachable!("valid configuration rejected");
        };

        assert!(matches!(generator.generate(), Err(LevelError::PoolsNotReady)));
        assert!(matches!(generator.release_tiles(), Err(LevelError::PoolsNotReady)));
        assert!(matches!(generator.clear_pools(), Err(LevelError::PoolsNotReady)));
        assert!(generator.pools().is_none());
    }

    // Tests invalid configurations are rejected at construction
    #[test]
    fn test_invalid_configuration_rejected() {
        let result = LevelGenerator::new(grid(0, 3), RecordingFactory::new());
        assert!(matches!(
            result,
            Err(LevelError::InvalidParameter {
                parameter: "x_length",
                ..
            })
        ));
    }

    // Tests construction normalizes mismatched weight vectors
    #[test]
    fn test_construction_normalizes_catalogs() {
        let mut config = grid(2, 2);
        config.enemies = Catalog {
            archetypes: Catalog::uniform(["grunt", "archer"]).archetypes,
            weights: vec![1.0],
        };

        let generator = ready(config);
        assert_eq!(generator.config().enemies.weights, vec![1.0, 0.0]);
        assert_eq!(generator.config().obstacles.len(), 1);
    }

    // Tests a second setup call keeps the existing pools and their instances
    #[test]
    fn test_setup_pools_is_idempotent() {
        let mut generator = ready(grid(3, 3));
        assert!(generator.generate().is_ok());

        generator.setup_pools();
        let active = generator.pools().map(|pools| pools.tiles.count_active());
        assert_eq!(active, Some(9));
    }

    // Tests released tiles are reused by the next generation
    // Verified by creating fresh instances on every get
    #[test]
    fn test_release_then_regenerate_reuses_instances() {
        let mut generator = ready(grid(3, 3));

        let first = generator.generate();
        assert_eq!(first.map(|report| report.tiles).ok(), Some(9));

        let released = generator.release_tiles();
        let Ok(summary) = released else {
            unreachable!("release failed: {released:?}");
        };
        assert_eq!(summary.released, 9);
        assert_eq!(summary.retained, 9);
        assert!(summary.errors.is_empty());
        assert_eq!(generator.registry().count(Category::Tile), 0);

        assert!(generator.generate().is_ok());

        let stats = generator.pools().map(|pools| pools.tiles.stats());
        assert_eq!(stats.map(|s| s.created), Some(9));
        assert_eq!(stats.map(|s| s.reused), Some(9));
        assert_eq!(generator.factory().counters.created, 9);
        assert_eq!(generator.factory().live_count(), 9);
    }

    // Tests tile ids restart on every generation pass
    #[test]
    fn test_ids_restart_per_generation() {
        let mut generator = ready(grid(2, 2));
        assert!(generator.generate().is_ok());
        assert!(generator.release_tiles().is_ok());
        assert!(generator.generate().is_ok());

        let ids: Vec<i64> = generator
            .registry()
            .records(Category::Tile)
            .iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    // Tests the free list cap destroys excess releases
    // Verified by comparing the cap against the active count
    #[test]
    fn test_pool_cap_destroys_excess() {
        let config = LevelConfig {
            pool: PoolSettings {
                max_size: 2,
                ..PoolSettings::default()
            },
            ..grid(3, 3)
        };
        let mut generator = ready(config);
        assert!(generator.generate().is_ok());

        let released = generator.release_tiles();
        let Ok(summary) = released else {
            unreachable!("release failed: {released:?}");
        };
        assert_eq!(summary.retained, 2);
        assert_eq!(summary.destroyed, 7);
        assert_eq!(generator.factory().live_count(), 2);
    }

    // Tests primitive slabs are built once and survive regeneration
    #[test]
    fn test_slabs_built_once() {
        let config = LevelConfig {
            spawn_walls: true,
            ..grid(3, 2)
        };
        let mut generator = ready(config);

        let first = generator.generate();
        assert_eq!(first.map(|report| report.slabs).ok(), Some(4));
        assert!(generator.release_tiles().is_ok());
        let second = generator.generate();
        assert_eq!(second.map(|report| report.slabs).ok(), Some(0));

        assert_eq!(generator.slabs().len(), 4);
        assert_eq!(generator.factory().slabs().len(), 4);
        assert_eq!(generator.registry().count(Category::Wall), 0);
    }

    // Tests pooled walls are released like any other category
    #[test]
    fn test_pooled_walls_release() {
        let config = LevelConfig {
            spawn_walls: true,
            walls: Catalog::uniform(["wall", "pillar"]),
            ..grid(3, 2)
        };
        let mut generator = ready(config);
        assert_eq!(generator.generate().map(|report| report.walls).ok(), Some(14));

        let released = generator.release_walls();
        assert_eq!(released.map(|summary| summary.released).ok(), Some(14));
        assert_eq!(generator.registry().count(Category::Wall), 0);
        assert!(generator.slabs().is_empty());
    }

    fn with_enemies(removal: EnemyRemoval) -> LevelGenerator<RecordingFactory> {
        // A budget well above the cell count spawns on every cell
        let config = LevelConfig {
            enemies: Catalog::uniform(["grunt"]),
            enemy_budget: 20,
            enemy_removal: removal,
            ..grid(2, 2)
        };
        let mut generator = ready(config);
        assert!(generator.generate().is_ok());
        assert_eq!(generator.registry().count(Category::Enemy), 4);
        generator
    }

    // Tests a single enemy release by handle and that repeating it is stale
    #[test]
    fn test_release_enemy_by_handle() {
        let mut generator = with_enemies(EnemyRemoval::ByHandle);
        let Some(record) = generator.registry().records(Category::Enemy).get(1).cloned() else {
            unreachable!("missing enemy record");
        };

        let outcome = generator.release_enemy(&record);
        assert_eq!(outcome.ok(), Some(ReleaseOutcome::Retained));
        assert_eq!(generator.registry().count(Category::Enemy), 3);
        assert!(
            generator
                .registry()
                .records(Category::Enemy)
                .iter()
                .all(|survivor| survivor.handle != record.handle)
        );

        assert!(matches!(
            generator.release_enemy(&record),
            Err(LevelError::StaleRecord { .. })
        ));
    }

    // Tests positional removal breaks once identifiers drift from positions
    // Verified by falling back to a handle search when positions disagree
    #[test]
    fn test_positional_removal_goes_stale() {
        let mut generator = with_enemies(EnemyRemoval::Positional);
        let records = generator.registry().records(Category::Enemy).to_vec();
        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            unreachable!("missing enemy records");
        };

        assert!(generator.release_enemy(first).is_ok());

        // The last record still stores id 3 but now sits at position 2
        let stale = generator.release_enemy(last);
        assert!(matches!(
            stale,
            Err(LevelError::StaleRecord {
                id: 3,
                registered: 3
            })
        ));
        assert_eq!(generator.registry().count(Category::Enemy), 3);
    }

    // Tests clearing the pools destroys every inactive instance
    #[test]
    fn test_clear_pools_destroys_inactive() {
        let mut generator = ready(grid(3, 3));
        assert!(generator.generate().is_ok());
        assert!(generator.release_tiles().is_ok());
        assert!(generator.clear_pools().is_ok());

        let factory = generator.into_factory();
        assert_eq!(factory.live_count(), 0);
        assert_eq!(factory.counters.destroyed, 9);
    }

    // Tests an injected random source reproduces the seeded default
    #[test]
    fn test_injected_rng_matches_seed() {
        let config = LevelConfig {
            tiles: Catalog::uniform(["a", "b", "c"]),
            seed: 5,
            ..grid(4, 4)
        };

        let mut seeded = ready(config.clone());
        let injected =
            LevelGenerator::with_rng(config, RecordingFactory::new(), StdRng::seed_from_u64(5));
        let Ok(mut injected) = injected else {
            unreachable!("valid configuration rejected");
        };
        injected.setup_pools();

        assert!(seeded.generate().is_ok());
        assert!(injected.generate().is_ok());
        assert_eq!(
            seeded.registry().records(Category::Tile),
            injected.registry().records(Category::Tile)
        );
    }
}
