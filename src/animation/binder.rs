use rustc_hash::FxHashMap;

use crate::animation::binding::{Component, PropertyKind, TargetPath};
use crate::animation::clip::AnimationClip;
use crate::animation::sampler::{PropertySampler, curve_compatible};
use crate::errors::{Result, SinewError};
use crate::skeleton::{BoneHandle, Skeleton};

pub struct Binder;

impl Binder {
    /// Resolves a clip's curves against a skeleton into property samplers.
    ///
    /// Curves addressing the same (bone, property) pair share one sampler;
    /// samplers come out in the order their first curve appears in the clip.
    ///
    /// Failure policy is split by what failed:
    /// - corrupt assets fail hard: a malformed property suffix or a path
    ///   that does not start at the skeleton root aborts with an error
    /// - skeleton mismatches fail soft: a curve naming a missing bone, an
    ///   unknown property, an unknown component or a curve shape that does
    ///   not fit its property is dropped with a `log::debug!` note, and
    ///   the remaining curves still bind
    pub fn resolve(skeleton: &Skeleton, clip: &AnimationClip) -> Result<Vec<PropertySampler>> {
        let mut samplers: Vec<PropertySampler> = Vec::new();
        let mut by_target: FxHashMap<(BoneHandle, PropertyKind), usize> = FxHashMap::default();

        let Some(root) = skeleton.root() else {
            return Ok(samplers);
        };

        for (curve_index, (path, curve)) in clip.curves().iter().enumerate() {
            let target = TargetPath::parse(path)?;

            // 1. Walk the path to a bone.
            let Some(bone) = Self::locate_bone(skeleton, root, &target, path)? else {
                log::debug!("curve '{path}' dropped: no matching bone");
                continue;
            };

            // 2. Map the property name onto the closed kind set.
            let Some(kind) = PropertyKind::parse(target.property) else {
                log::debug!(
                    "curve '{path}' dropped: unsupported property '{}'",
                    target.property
                );
                continue;
            };

            // 3. Validate the optional component suffix.
            let component = match target.component {
                Some(raw) => match Component::parse(raw) {
                    Some(component) => Some(component),
                    None => {
                        log::debug!("curve '{path}' dropped: unknown component '{raw}'");
                        continue;
                    }
                },
                None => None,
            };

            // 4. Reject curve shapes the target cannot absorb, so sampling
            // never has to re-check.
            if !curve_compatible(kind, component, curve) {
                log::debug!("curve '{path}' dropped: curve type does not fit the property");
                continue;
            }

            // 5. Register on the target's sampler, creating it on first use.
            let slot = *by_target.entry((bone, kind)).or_insert_with(|| {
                samplers.push(PropertySampler::for_kind(kind, bone));
                samplers.len() - 1
            });
            samplers[slot].set_curve(path, component, curve_index);
        }

        Ok(samplers)
    }

    /// Walks a parsed path's intermediate segments down from the root.
    ///
    /// Short paths (one or two slash segments) address the root bone and
    /// their raw first segment must equal the root's name; anything else is
    /// a hard mismatch. Deeper paths walk child names and soft-fail to
    /// `None` when a segment matches no child.
    fn locate_bone(
        skeleton: &Skeleton,
        root: BoneHandle,
        target: &TargetPath<'_>,
        path: &str,
    ) -> Result<Option<BoneHandle>> {
        let root_name = skeleton.get(root).map_or("", |bone| bone.name());

        if target.segments.len() <= 2 {
            if target.segments.first().copied() != Some(root_name) {
                return Err(SinewError::TargetPathMismatch {
                    path: path.to_string(),
                    root: root_name.to_string(),
                });
            }
            return Ok(Some(root));
        }

        let mut bone = root;
        for segment in target.intermediates() {
            match skeleton.child_by_name(bone, segment) {
                Some(next) => bone = next,
                None => return Ok(None),
            }
        }
        Ok(Some(bone))
    }
}
