//! Per-frame skinning evaluation.
//!
//! [`SkinnedAnimation`] is the top-level object for one skinned model: it
//! owns the flattened skeleton, the immutable bind pose, the clip player and
//! the per-frame matrix arrays. Renderers read
//! [`SkinnedAnimation::skin_transforms`] after each update and upload it as
//! the bone palette.

use glam::{Affine3A, Mat4};

use crate::animation::binder::Binder;
use crate::animation::clip::AnimationClip;
use crate::animation::player::AnimationPlayer;
use crate::errors::Result;
use crate::model::ModelBone;
use crate::skeleton::{BindPose, BoneHandle, Skeleton};

/// Skeletal animation state for one skinned model instance.
pub struct SkinnedAnimation {
    skeleton: Skeleton,
    bind_pose: BindPose,
    player: AnimationPlayer,

    // === Per-frame output, in flattened bone order ===
    worlds: Vec<Affine3A>,
    skin_transforms: Vec<Mat4>,

    /// When set, every bone holds its rest pose and no sampling runs.
    pub bind_posed: bool,
}

impl SkinnedAnimation {
    /// Builds the skeleton and its bind pose from a model's bone records.
    pub fn new(model_bones: &[ModelBone]) -> Result<Self> {
        let skeleton = Skeleton::from_model(model_bones)?;
        let bind_pose = BindPose::compute(&skeleton)?;
        let count = skeleton.len();

        Ok(Self {
            skeleton,
            bind_pose,
            player: AnimationPlayer::new(),
            worlds: vec![Affine3A::IDENTITY; count],
            skin_transforms: vec![Mat4::IDENTITY; count],
            bind_posed: false,
        })
    }

    /// Resolves `clip` against the skeleton and registers it under its
    /// name. Fails on corrupt curve paths; curves that merely do not match
    /// this skeleton are dropped by the binder.
    pub fn add_clip(&mut self, clip: AnimationClip) -> Result<()> {
        let samplers = Binder::resolve(&self.skeleton, &clip)?;
        self.player.add_clip(clip, samplers);
        Ok(())
    }

    /// Makes the named clip active. Returns whether the clip exists.
    pub fn play(&mut self, name: &str) -> bool {
        self.player.play(name)
    }

    /// Advances playback and refreshes the skin matrix array.
    ///
    /// In bind-posed mode the world transforms are simply the cached bind
    /// pose, which makes every skin matrix collapse to identity. Otherwise
    /// the active clip is advanced by `elapsed_seconds` and sampled into
    /// bone-local properties before the world pass runs.
    pub fn update(&mut self, elapsed_seconds: f32) {
        if self.bind_posed {
            self.worlds.copy_from_slice(self.bind_pose.matrices());
        } else {
            self.player.advance(elapsed_seconds);
            self.player.sample(&mut self.skeleton);
            self.skeleton.compose_world(&mut self.worlds);
        }

        // Final skinning product: model space -> bone local -> posed world.
        for i in 0..self.worlds.len() {
            self.skin_transforms[i] =
                Mat4::from(self.worlds[i] * self.bind_pose.inverse_matrices()[i]);
        }
    }

    /// Skin matrices in flattened bone order, refreshed by
    /// [`SkinnedAnimation::update`].
    #[inline]
    pub fn skin_transforms(&self) -> &[Mat4] {
        &self.skin_transforms
    }

    /// Handle of the skeleton root bone.
    #[inline]
    pub fn root(&self) -> Option<BoneHandle> {
        self.skeleton.root()
    }

    #[inline]
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    #[inline]
    pub fn skeleton_mut(&mut self) -> &mut Skeleton {
        &mut self.skeleton
    }

    #[inline]
    pub fn bind_pose(&self) -> &BindPose {
        &self.bind_pose
    }

    #[inline]
    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    #[inline]
    pub fn player_mut(&mut self) -> &mut AnimationPlayer {
        &mut self.player
    }
}
