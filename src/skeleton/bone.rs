use glam::Affine3A;

use crate::skeleton::BoneHandle;
use crate::skeleton::transform::Transform;

/// A single joint of a skeletal hierarchy.
///
/// # Design Principles
///
/// - Only keeps the data touched every frame (hierarchy links and transform)
/// - Flattened evaluation order and bind-pose data live on the owning
///   [`Skeleton`](crate::skeleton::Skeleton), keeping bones small
///
/// # Hierarchy
///
/// Bones form a tree through parent-child links:
/// - `parent`: handle of the parent bone (`None` for the root)
/// - `children`: handles of the child bones
#[derive(Debug, Clone)]
pub struct Bone {
    // === Core Hierarchy ===
    /// Parent bone handle (None for the root)
    pub(crate) parent: Option<BoneHandle>,
    /// Child bone handles
    pub(crate) children: Vec<BoneHandle>,

    // === Core Spatial Data ===
    /// Bone name as authored in the model
    pub(crate) name: String,
    /// Transform component (hot data accessed every frame)
    pub transform: Transform,
}

impl Bone {
    /// Creates an unparented bone with an identity transform.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            name: name.to_string(),
            transform: Transform::new(),
        }
    }

    /// Returns the bone name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent bone handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<BoneHandle> {
        self.parent
    }

    /// Returns a read-only slice of child bone handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[BoneHandle] {
        &self.children
    }

    /// Returns a reference to the world transformation matrix.
    ///
    /// Valid after the owning skeleton's forward pass has run.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}
