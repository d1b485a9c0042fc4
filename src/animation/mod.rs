pub mod values;
pub mod curve;
pub mod clip;
pub mod binding;
pub mod binder;
pub mod sampler;
pub mod player;

pub use clip::AnimationClip;
pub use player::{AnimationPlayer, LoopMode};
pub use binder::Binder;
pub use binding::{Component, PropertyKind, TargetPath};
pub use sampler::PropertySampler;
pub use curve::{Curve, CurveCursor, InterpolationMode, KeyframeCurve};
pub use values::Interpolatable;
