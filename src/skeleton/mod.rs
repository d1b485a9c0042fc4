//! Skeleton: flattened bone hierarchies and bind-pose data.
//!
//! A [`Skeleton`] owns its bones in a generational arena and keeps them in a
//! flattened evaluation order where every parent precedes its children. The
//! immutable rest pose lives in a [`BindPose`] computed once at build time.

pub mod bind_pose;
pub mod bone;
pub mod skeleton;
pub mod transform;

pub use bind_pose::BindPose;
pub use bone::Bone;
pub use skeleton::Skeleton;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a [`Bone`] inside its owning [`Skeleton`].
    pub struct BoneHandle;
}
