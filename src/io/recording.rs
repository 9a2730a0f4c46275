//! Headless factory that records every call
//!
//! Useful wherever no engine is attached: the command-line tool, tests and
//! benchmarks all drive generation through it.

use std::collections::BTreeMap;
use std::fmt;

use crate::algorithm::walls::WallSlab;
use crate::io::configuration::Archetype;
use crate::io::factory::InstanceFactory;
use crate::lifecycle::record::RoleTag;
use crate::spatial::transform::Transform;

/// Sequential handle issued by [`RecordingFactory`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Last known state of a live instance
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceState {
    /// Archetype the instance was created from
    pub archetype: Archetype,
    /// Whether the instance is currently handed out
    pub active: bool,
    /// Most recent transform
    pub transform: Option<Transform>,
    /// Most recent placement metadata
    pub tag: Option<RoleTag>,
}

/// Number of calls per factory operation
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct FactoryCounters {
    /// `create` calls
    pub created: usize,
    /// `activate` calls
    pub activated: usize,
    /// `deactivate` calls
    pub deactivated: usize,
    /// `destroy` calls
    pub destroyed: usize,
    /// `set_transform` calls
    pub transforms: usize,
}

/// In-memory [`InstanceFactory`]
#[derive(Debug, Default)]
pub struct RecordingFactory {
    next_id: u32,
    instances: BTreeMap<InstanceId, InstanceState>,
    slabs: Vec<WallSlab>,

    /// Call counts
    pub counters: FactoryCounters,
}

impl RecordingFactory {
    /// Create a factory with no instances
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a live instance
    pub fn instance(&self, id: InstanceId) -> Option<&InstanceState> {
        self.instances.get(&id)
    }

    /// Live instances in creation order
    pub fn instances(&self) -> impl Iterator<Item = (InstanceId, &InstanceState)> {
        self.instances.iter().map(|(&id, state)| (id, state))
    }

    /// Instances created and not yet destroyed
    pub fn live_count(&self) -> usize {
        self.instances.len()
    }

    /// Live instances currently active
    pub fn active_count(&self) -> usize {
        self.instances.values().filter(|state| state.active).count()
    }

    /// Primitive wall slabs received
    pub fn slabs(&self) -> &[WallSlab] {
        &self.slabs
    }
}

impl InstanceFactory for RecordingFactory {
    type Handle = InstanceId;

    fn create(&mut self, archetype: &Archetype) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.counters.created += 1;
        self.instances.insert(
            id,
            InstanceState {
                archetype: archetype.clone(),
                active: false,
                transform: None,
                tag: None,
            },
        );
        id
    }

    fn activate(&mut self, handle: &InstanceId) {
        self.counters.activated += 1;
        if let Some(state) = self.instances.get_mut(handle) {
            state.active = true;
        }
    }

    fn deactivate(&mut self, handle: &InstanceId) {
        self.counters.deactivated += 1;
        if let Some(state) = self.instances.get_mut(handle) {
            state.active = false;
        }
    }

    fn destroy(&mut self, handle: InstanceId) {
        self.counters.destroyed += 1;
        self.instances.remove(&handle);
    }

    fn set_transform(&mut self, handle: &InstanceId, transform: Transform) {
        self.counters.transforms += 1;
        if let Some(state) = self.instances.get_mut(handle) {
            state.transform = Some(transform);
        }
    }

    fn tag(&mut self, handle: &InstanceId, tag: &RoleTag) {
        if let Some(state) = self.instances.get_mut(handle) {
            state.tag = Some(*tag);
        }
    }

    fn place_slab(&mut self, slab: &WallSlab) {
        self.slabs.push(*slab);
    }
}
