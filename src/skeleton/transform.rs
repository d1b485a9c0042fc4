use glam::{Affine3A, Mat4, Quat, Vec3};

/// Local TRS state of a bone plus matrix caches and dirty tracking.
///
/// The public `position` / `rotation` / `scale` fields are the authoritative
/// pose data. The cached matrices are refreshed lazily: the local matrix by
/// [`Transform::update_local_matrix`] (shadow-state comparison), the world
/// matrix by the owning skeleton's forward pass.
#[derive(Debug, Clone)]
pub struct Transform {
    // === Public pose data ===
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    // === Matrix caches (internal) ===
    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    // === Shadow state for dirty checking (private) ===
    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
    force_update: bool,
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,

            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,

            last_position: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            last_scale: Vec3::ONE,
            force_update: true,
        }
    }

    // ========================================================================
    // Shadow state check
    // ========================================================================

    /// Recomposes the local matrix if any TRS component changed since the
    /// last call. Returns whether a recompute happened.
    pub fn update_local_matrix(&mut self) -> bool {
        let changed = self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.force_update;

        if changed {
            self.local_matrix = Affine3A::from_scale_rotation_translation(
                self.scale,
                self.rotation,
                self.position,
            );

            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }

        changed
    }

    // ========================================================================
    // Getters & Helpers
    // ========================================================================

    /// Cached local matrix.
    #[inline]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    /// Cached world matrix, valid after the owning skeleton's forward pass.
    #[inline]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    /// World matrix widened to `Mat4` for GPU upload.
    #[inline]
    pub fn world_matrix_as_mat4(&self) -> Mat4 {
        Mat4::from(self.world_matrix)
    }

    /// Written by the skeleton once the forward pass has composed it.
    pub fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }

    /// Sets the local matrix wholesale and decomposes it back into TRS.
    ///
    /// Note: shear in the source matrix is lost by the decomposition.
    pub fn apply_local_matrix(&mut self, mat: Affine3A) {
        self.local_matrix = mat;

        let (scale, rotation, translation) = mat.to_scale_rotation_translation();

        self.scale = scale;
        self.rotation = rotation;
        self.position = translation;

        self.last_scale = scale;
        self.last_rotation = rotation;
        self.last_position = translation;

        self.mark_dirty();
    }

    /// `Mat4` variant of [`Transform::apply_local_matrix`].
    pub fn apply_local_matrix_from_mat4(&mut self, mat: Mat4) {
        let affine = Affine3A::from_mat4(mat);
        self.apply_local_matrix(affine);
    }

    /// Manually marks the transform dirty to force a matrix refresh.
    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
