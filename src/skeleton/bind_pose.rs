use glam::Affine3A;

use crate::errors::{Result, SinewError};
use crate::skeleton::skeleton::Skeleton;

/// Immutable rest-pose matrices of a skeleton, one entry per flattened bone.
///
/// # Core Data
///
/// - `matrices[i]`: bone `i`'s rest transform in model space (the local
///   rest transforms composed root-to-bone)
/// - `inverse[i]`: the inverse of `matrices[i]`, the factor that carries
///   skinned vertices from model space into bone-local space
///
/// Both arrays are computed once from the skeleton as built and never
/// updated afterwards; posing bones at runtime does not touch them.
#[derive(Debug, Clone)]
pub struct BindPose {
    matrices: Vec<Affine3A>,
    inverse: Vec<Affine3A>,
}

impl BindPose {
    /// Accumulates rest matrices over the skeleton's flattened order.
    ///
    /// Parents always precede children, so each bone's model-space matrix is
    /// its parent's entry times its own local rest transform, in one pass.
    /// The locals are the same recomposed caches the world pass uses, so a
    /// rest-pose [`Skeleton::compose_world`] reproduces `matrices` exactly.
    /// A bone whose accumulated matrix cannot be inverted aborts the build
    /// with [`SinewError::DegenerateBindPose`].
    pub fn compute(skeleton: &Skeleton) -> Result<Self> {
        let count = skeleton.len();
        let parents = skeleton.parent_indices();

        let mut matrices = vec![Affine3A::IDENTITY; count];
        let mut inverse = vec![Affine3A::IDENTITY; count];

        for (i, &handle) in skeleton.handles().iter().enumerate() {
            let Some(bone) = skeleton.get(handle) else {
                continue;
            };

            // 1. Compose this bone's rest matrix in model space.
            let local = *bone.transform.local_matrix();
            let parent = parents[i];
            matrices[i] = if parent < 0 {
                local
            } else {
                matrices[parent as usize] * local
            };

            // 2. Invert it for the skinning product, rejecting collapsed
            // poses (zero scale rows invert to non-finite garbage).
            let det = matrices[i].matrix3.determinant();
            if !det.is_finite() || det.abs() < 1e-12 {
                return Err(SinewError::DegenerateBindPose {
                    bone: bone.name().to_string(),
                });
            }
            inverse[i] = matrices[i].inverse();
        }

        Ok(Self { matrices, inverse })
    }

    /// Rest matrices in model space, in flattened bone order.
    #[inline]
    pub fn matrices(&self) -> &[Affine3A] {
        &self.matrices
    }

    /// Inverse rest matrices, parallel to [`BindPose::matrices`].
    #[inline]
    pub fn inverse_matrices(&self) -> &[Affine3A] {
        &self.inverse
    }

    /// Number of bone entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}
