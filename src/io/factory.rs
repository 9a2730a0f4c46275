//! Host capability for creating and driving placed instances

use std::fmt;

use crate::algorithm::walls::WallSlab;
use crate::io::configuration::Archetype;
use crate::lifecycle::record::RoleTag;
use crate::spatial::transform::Transform;

/// Injected capability that owns the host-side representation of instances
///
/// The generator never sees engine objects. It asks the factory to create
/// instances for an archetype, toggles them as they move in and out of pools,
/// and positions them once placed. `create`, `activate`, `deactivate` and
/// `destroy` are the four pool callbacks.
pub trait InstanceFactory {
    /// Opaque handle to a host instance
    type Handle: Clone + PartialEq + fmt::Debug;

    /// Build a new instance of an archetype
    fn create(&mut self, archetype: &Archetype) -> Self::Handle;

    /// Called whenever an instance is handed out by a pool
    fn activate(&mut self, handle: &Self::Handle);

    /// Called whenever an instance is returned to a pool
    fn deactivate(&mut self, handle: &Self::Handle);

    /// Dispose of an instance the pool will not retain
    fn destroy(&mut self, handle: Self::Handle);

    /// Position an active instance
    fn set_transform(&mut self, handle: &Self::Handle, transform: Transform);

    /// Attach placement metadata to a freshly placed instance
    fn tag(&mut self, _handle: &Self::Handle, _tag: &RoleTag) {}

    /// Materialize a permanent, non-pooled wall slab
    fn place_slab(&mut self, _slab: &WallSlab) {}
}
