//! Tests for the in-memory recording factory

#[cfg(test)]
mod tests {
    use floorgen::algorithm::walls::WallSlab;
    use floorgen::io::configuration::Archetype;
    use floorgen::io::factory::InstanceFactory;
    use floorgen::io::recording::{InstanceId, RecordingFactory};
    use floorgen::lifecycle::record::Cell;
    use floorgen::lifecycle::{Role, RoleTag, WallSide};
    use floorgen::spatial::Transform;
    use glam::Vec3;

    // Tests handles are sequential and state follows every callback
    #[test]
    fn test_callbacks_update_state() {
        let mut factory = RecordingFactory::new();
        let floor = Archetype::new("floor");

        let first = factory.create(&floor);
        let second = factory.create(&floor);
        assert_eq!((first, second), (InstanceId(0), InstanceId(1)));
        assert_eq!(second.to_string(), "#1");

        factory.activate(&first);
        let transform = Transform::new(Vec3::new(1.0, 2.0, 3.0), 90.0);
        factory.set_transform(&first, transform);
        let tag = RoleTag {
            role: Role::Tile(Cell { floor: 0, x: 1, z: 2 }),
            pool_index: 0,
            id: 5,
        };
        factory.tag(&first, &tag);

        let state = factory.instance(first);
        assert_eq!(state.map(|s| s.active), Some(true));
        assert_eq!(state.and_then(|s| s.transform), Some(transform));
        assert_eq!(state.and_then(|s| s.tag), Some(tag));
        assert_eq!(factory.active_count(), 1);

        factory.deactivate(&first);
        assert_eq!(factory.active_count(), 0);
        assert_eq!(factory.live_count(), 2);
    }

    // Tests destroyed instances disappear while counters keep history
    #[test]
    fn test_destroy_removes_instance() {
        let mut factory = RecordingFactory::new();
        let handle = factory.create(&Archetype::new("wall"));
        factory.destroy(handle);

        assert!(factory.instance(handle).is_none());
        assert_eq!(factory.live_count(), 0);
        assert_eq!(factory.counters.created, 1);
        assert_eq!(factory.counters.destroyed, 1);

        // Handles are never reissued
        assert_eq!(factory.create(&Archetype::new("wall")), InstanceId(1));
    }

    // Tests callbacks on unknown handles only bump counters
    #[test]
    fn test_unknown_handles_are_ignored() {
        let mut factory = RecordingFactory::new();
        factory.activate(&InstanceId(9));
        factory.set_transform(&InstanceId(9), Transform::default());

        assert_eq!(factory.live_count(), 0);
        assert_eq!(factory.counters.activated, 1);
        assert_eq!(factory.counters.transforms, 1);
    }

    // Tests slabs and instances are listed in insertion order
    #[test]
    fn test_listing() {
        let mut factory = RecordingFactory::new();
        let slab = WallSlab {
            side: WallSide::Back,
            center: Vec3::ZERO,
            size: Vec3::ONE,
        };
        factory.place_slab(&slab);
        for name in ["a", "b", "c"] {
            factory.create(&Archetype::new(name));
        }

        assert_eq!(factory.slabs(), &[slab]);
        let names: Vec<&str> = factory
            .instances()
            .map(|(_, state)| state.archetype.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
