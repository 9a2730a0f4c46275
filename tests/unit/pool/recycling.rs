//! Tests for the single-archetype recycling pool

#[cfg(test)]
mod tests {
    use floorgen::io::configuration::{Archetype, PoolSettings};
    use floorgen::io::error::LevelError;
    use floorgen::io::recording::{InstanceId, RecordingFactory};
    use floorgen::lifecycle::Category;
    use floorgen::pool::{PoolStats, RecyclingPool, ReleaseOutcome};

    fn pool(max_size: usize, collection_checks: bool) -> RecyclingPool<InstanceId> {
        RecyclingPool::new(
            Archetype::new("crate"),
            Category::Tile,
            0,
            &PoolSettings {
                collection_checks,
                default_capacity: 4,
                max_size,
            },
        )
    }

    // Tests get creates on an empty pool and reuses after a release
    // Verified by pushing released handles to the front of the free list
    #[test]
    fn test_get_prefers_released_instances() {
        let mut factory = RecordingFactory::new();
        let mut pool = pool(10, true);

        let first = pool.get(&mut factory);
        assert_eq!(pool.count_active(), 1);
        assert_eq!(factory.counters.created, 1);

        assert_eq!(pool.release(first, &mut factory).ok(), Some(ReleaseOutcome::Retained));
        assert_eq!(pool.count_inactive(), 1);

        let again = pool.get(&mut factory);
        assert_eq!(again, first);
        assert_eq!(factory.counters.created, 1);
        assert_eq!(factory.counters.activated, 2);
        assert_eq!(
            pool.stats,
            PoolStats {
                created: 1,
                reused: 1,
                destroyed: 0,
                rejected: 0,
            }
        );
    }

    // Tests get never fails even far beyond the retention cap
    #[test]
    fn test_get_beyond_capacity() {
        let mut factory = RecordingFactory::new();
        let mut pool = pool(2, true);

        let handles: Vec<InstanceId> = (0..20).map(|_| pool.get(&mut factory)).collect();
        assert_eq!(handles.len(), 20);
        assert_eq!(pool.count_active(), 20);
        assert_eq!(pool.count_all(), 20);
    }

    // Tests releases beyond the cap destroy instead of retaining
    // Verified by comparing the cap against the active count
    #[test]
    fn test_cap_destroys_excess_releases() {
        let mut factory = RecordingFactory::new();
        let mut pool = pool(2, true);
        let handles: Vec<InstanceId> = (0..5).map(|_| pool.get(&mut factory)).collect();

        let outcomes: Vec<Option<ReleaseOutcome>> = handles
            .into_iter()
            .map(|handle| pool.release(handle, &mut factory).ok())
            .collect();

        assert_eq!(
            outcomes,
            vec![
                Some(ReleaseOutcome::Retained),
                Some(ReleaseOutcome::Retained),
                Some(ReleaseOutcome::Destroyed),
                Some(ReleaseOutcome::Destroyed),
                Some(ReleaseOutcome::Destroyed),
            ]
        );
        assert_eq!(pool.count_inactive(), pool.max_size());
        assert_eq!(pool.stats.destroyed, 3);
        assert_eq!(factory.live_count(), 2);
    }

    // Tests a double release is rejected before any side effect
    // Verified by deactivating before checking the free list
    #[test]
    fn test_double_release_rejected() {
        let mut factory = RecordingFactory::new();
        let mut pool = pool(10, true);
        let handle = pool.get(&mut factory);
        assert!(pool.release(handle, &mut factory).is_ok());
        let deactivated = factory.counters.deactivated;

        let second = pool.release(handle, &mut factory);
        assert!(matches!(
            second,
            Err(LevelError::DoubleRelease {
                category: Category::Tile,
                pool_index: 0
            })
        ));
        assert_eq!(factory.counters.deactivated, deactivated);
        assert_eq!(pool.count_inactive(), 1);
        assert_eq!(pool.stats.rejected, 1);
    }

    // Tests disabling checks lets a double release through
    #[test]
    fn test_double_release_unchecked() {
        let mut factory = RecordingFactory::new();
        let mut pool = pool(10, false);
        let handle = pool.get(&mut factory);
        assert!(pool.release(handle, &mut factory).is_ok());

        assert!(pool.release(handle, &mut factory).is_ok());
        assert_eq!(pool.count_inactive(), 2);
        assert_eq!(pool.count_active(), 0);
    }

    // Tests clearing destroys the free list and leaves active instances alone
    #[test]
    fn test_clear() {
        let mut factory = RecordingFactory::new();
        let mut pool = pool(10, true);
        let kept = pool.get(&mut factory);
        let released = pool.get(&mut factory);
        assert!(pool.release(released, &mut factory).is_ok());

        pool.clear(&mut factory);

        assert_eq!(pool.count_inactive(), 0);
        assert_eq!(pool.count_active(), 1);
        assert!(factory.instance(kept).is_some());
        assert!(factory.instance(released).is_none());
        assert_eq!(pool.archetype().name, "crate");
    }
}
