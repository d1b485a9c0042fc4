use glam::Affine3A;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::errors::{Result, SinewError};
use crate::model::ModelBone;
use crate::skeleton::BoneHandle;
use crate::skeleton::bone::Bone;

/// A flattened bone hierarchy.
///
/// Bones live in a generational arena and are addressed by [`BoneHandle`].
/// Alongside the arena the skeleton keeps a flattened evaluation order and a
/// parallel parent-index table: `parent_indices[i]` is the flattened index of
/// bone `i`'s parent (`-1` for the root) and always references an earlier
/// entry, so world matrices compose in a single forward pass.
///
/// Both tables are fixed at build time. [`Skeleton::attach`] only rewires the
/// parent/child links used for name lookups; the evaluation order never
/// changes after [`Skeleton::from_model`].
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub(crate) bones: SlotMap<BoneHandle, Bone>,

    // === Flattened evaluation data ===
    // order[i] is bone i in evaluation order; parents precede children
    order: Vec<BoneHandle>,
    parent_indices: Vec<i32>,
}

impl Skeleton {
    /// Flattens an imported model's bone records into a skeleton.
    ///
    /// Record 0 is the importer's synthetic root and is skipped; the first
    /// real record becomes the skeleton root regardless of what parent it
    /// claims. Every later record must name an already-flattened parent,
    /// otherwise construction aborts with
    /// [`SinewError::UnknownParentBone`].
    pub fn from_model(records: &[ModelBone]) -> Result<Self> {
        let count = records.len().saturating_sub(1);
        let mut bones: SlotMap<BoneHandle, Bone> = SlotMap::with_key();
        let mut order = Vec::with_capacity(count);
        let mut parent_indices = Vec::with_capacity(count);

        // Record index -> (handle, flattened index) for parent lookups
        let mut flattened: FxHashMap<usize, (BoneHandle, usize)> = FxHashMap::default();

        for (record_index, record) in records.iter().enumerate().skip(1) {
            let flat_index = order.len();

            // 1. Resolve the parent among already-flattened records.
            // The first real bone is forced to be the root.
            let parent_link = if flat_index == 0 {
                None
            } else {
                let link = record.parent.and_then(|p| flattened.get(&p).copied());
                let Some(found) = link else {
                    return Err(SinewError::UnknownParentBone {
                        bone: record.name.clone(),
                    });
                };
                Some(found)
            };

            // 2. Create the bone with its authored rest transform. The
            // local cache is recomposed from the decomposed TRS right away
            // so the bind pose and the world pass read the same matrix.
            let mut bone = Bone::new(&record.name);
            bone.transform
                .apply_local_matrix_from_mat4(record.local_transform);
            bone.transform.update_local_matrix();
            bone.parent = parent_link.map(|(handle, _)| handle);

            let handle = bones.insert(bone);

            // 3. Record hierarchy links and the parent-index table entry.
            if let Some((parent_handle, parent_flat)) = parent_link {
                if let Some(parent) = bones.get_mut(parent_handle) {
                    parent.children.push(handle);
                }
                parent_indices.push(parent_flat as i32);
            } else {
                parent_indices.push(-1);
            }

            order.push(handle);
            flattened.insert(record_index, (handle, flat_index));
        }

        Ok(Self {
            bones,
            order,
            parent_indices,
        })
    }

    /// Number of bones in the skeleton.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Handle of the root bone, if the skeleton has any bones.
    #[inline]
    pub fn root(&self) -> Option<BoneHandle> {
        self.order.first().copied()
    }

    /// Bone handles in flattened evaluation order.
    #[inline]
    pub fn handles(&self) -> &[BoneHandle] {
        &self.order
    }

    /// Flattened parent indices, parallel to [`Skeleton::handles`].
    /// `-1` marks the root; every other entry is smaller than its position.
    #[inline]
    pub fn parent_indices(&self) -> &[i32] {
        &self.parent_indices
    }

    /// Gets a read-only reference to a bone.
    pub fn get(&self, handle: BoneHandle) -> Option<&Bone> {
        self.bones.get(handle)
    }

    /// Gets a mutable reference to a bone (used to modify TRS).
    pub fn get_mut(&mut self, handle: BoneHandle) -> Option<&mut Bone> {
        self.bones.get_mut(handle)
    }

    /// Finds a direct child of `bone` by name.
    pub fn child_by_name(&self, bone: BoneHandle, name: &str) -> Option<BoneHandle> {
        let parent = self.bones.get(bone)?;
        parent
            .children
            .iter()
            .copied()
            .find(|&child| self.bones.get(child).is_some_and(|b| b.name == name))
    }

    /// Finds a bone anywhere in the skeleton by name.
    pub fn bone_by_name(&self, name: &str) -> Option<BoneHandle> {
        self.order
            .iter()
            .copied()
            .find(|&handle| self.bones.get(handle).is_some_and(|b| b.name == name))
    }

    /// Re-links `child` under `new_parent`, splicing it out of its old
    /// parent's child list first. A bone is never left in two lists.
    ///
    /// This only rewires the hierarchy links; the flattened evaluation
    /// order and parent-index table stay as built.
    pub fn attach(&mut self, child: BoneHandle, new_parent: BoneHandle) {
        if child == new_parent {
            log::warn!("Cannot attach bone to itself!");
            return;
        }
        if !self.bones.contains_key(new_parent) {
            log::error!("Parent bone not found during attach!");
            return;
        }

        let old_parent = self.bones.get(child).and_then(|b| b.parent);
        if old_parent == Some(new_parent) {
            return;
        }

        // 1. Detach from old
        if let Some(p) = old_parent
            && let Some(n) = self.bones.get_mut(p)
            && let Some(i) = n.children.iter().position(|&x| x == child)
        {
            n.children.remove(i);
        }

        // 2. Attach to new
        if let Some(p) = self.bones.get_mut(new_parent) {
            p.children.push(child);
        }

        // 3. Update child
        if let Some(c) = self.bones.get_mut(child) {
            c.parent = Some(new_parent);
            c.transform.mark_dirty();
        }
    }

    /// Recomputes every bone's world matrix in one forward pass and mirrors
    /// the results into `worlds`.
    ///
    /// Parents always precede children in the flattened order, so each
    /// bone's parent world is already final when the bone is visited.
    /// `worlds` must hold exactly [`Skeleton::len`] entries.
    pub fn compose_world(&mut self, worlds: &mut [Affine3A]) {
        debug_assert_eq!(worlds.len(), self.order.len());

        for i in 0..self.order.len() {
            let parent = self.parent_indices[i];
            let handle = self.order[i];

            let Some(bone) = self.bones.get_mut(handle) else {
                continue;
            };
            bone.transform.update_local_matrix();

            let world = if parent < 0 {
                bone.transform.local_matrix
            } else {
                worlds[parent as usize] * bone.transform.local_matrix
            };

            bone.transform.set_world_matrix(world);
            worlds[i] = world;
        }
    }
}
