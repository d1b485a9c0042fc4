#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod model;
pub mod skeleton;
pub mod animation;
pub mod skinning;
pub mod errors;

pub use model::ModelBone;
pub use skeleton::{BindPose, Bone, BoneHandle, Skeleton, Transform};
pub use animation::{AnimationClip, AnimationPlayer, Binder, Curve, CurveCursor, InterpolationMode, KeyframeCurve, LoopMode, PropertyKind, PropertySampler};
pub use skinning::SkinnedAnimation;
pub use errors::SinewError;
