//! Model-side bone records.
//!
//! A [`Skeleton`](crate::skeleton::Skeleton) is built from the ordered bone
//! list of an imported model. Importers conventionally emit a synthetic root
//! as record 0 which carries no geometry influence; the skeleton build skips
//! it and flattens the remaining records in order.

use glam::Mat4;

/// One bone record of an imported model, in importer order.
#[derive(Debug, Clone)]
pub struct ModelBone {
    /// Bone name, unique within the model.
    pub name: String,
    /// Authored parent-relative rest transform.
    pub local_transform: Mat4,
    /// Index of the parent record, or `None` for a root record.
    pub parent: Option<usize>,
}

impl ModelBone {
    pub fn new(name: &str, local_transform: Mat4, parent: Option<usize>) -> Self {
        Self {
            name: name.to_string(),
            local_transform,
            parent,
        }
    }

    /// The synthetic root record importers place at index 0.
    pub fn synthetic_root(name: &str) -> Self {
        Self::new(name, Mat4::IDENTITY, None)
    }
}
