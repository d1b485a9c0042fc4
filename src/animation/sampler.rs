use glam::{Quat, Vec4};
use smallvec::SmallVec;

use crate::animation::binding::{Component, PropertyKind};
use crate::animation::clip::AnimationClip;
use crate::animation::curve::{Curve, CurveCursor};
use crate::skeleton::{BoneHandle, Skeleton};

/// One curve feeding a sampler: where the curve lives in the clip, which
/// lane it drives (`None` = the whole value) and its private cursor.
#[derive(Debug, Clone)]
struct CurveEntry {
    /// Full target path, used as the replace-on-rebind key
    name: String,
    component: Option<Component>,
    curve_index: usize,
    cursor: CurveCursor,
}

/// Whether a curve of this shape can drive `kind` through `component`.
///
/// Whole-value entries need a curve of the property's own type; lane
/// entries need a scalar curve. Position has no `w` lane.
pub(crate) fn curve_compatible(
    kind: PropertyKind,
    component: Option<Component>,
    curve: &Curve,
) -> bool {
    match (kind, component, curve) {
        (PropertyKind::Position, None, Curve::Vector3(_)) => true,
        (PropertyKind::Position, Some(c), Curve::Scalar(_)) => c != Component::W,
        (PropertyKind::Rotation, None, Curve::Quaternion(_)) => true,
        (PropertyKind::Rotation, Some(_), Curve::Scalar(_)) => true,
        _ => false,
    }
}

/// Writes sampled curves into one bone's local position.
#[derive(Debug, Clone)]
pub struct Vector3Sampler {
    bone: BoneHandle,
    entries: SmallVec<[CurveEntry; 4]>,
}

/// Writes sampled curves into one bone's local rotation.
#[derive(Debug, Clone)]
pub struct QuaternionSampler {
    bone: BoneHandle,
    entries: SmallVec<[CurveEntry; 4]>,
}

/// A sampler bound to exactly one (bone, property) target.
///
/// The variant is picked once at resolve time from the closed
/// [`PropertyKind`] set, so per-frame sampling is a plain match with no
/// name lookups. All curves addressing the same target share the one
/// sampler and are folded into a single property write.
#[derive(Debug, Clone)]
pub enum PropertySampler {
    Position(Vector3Sampler),
    Rotation(QuaternionSampler),
}

impl PropertySampler {
    pub(crate) fn for_kind(kind: PropertyKind, bone: BoneHandle) -> Self {
        match kind {
            PropertyKind::Position => Self::Position(Vector3Sampler {
                bone,
                entries: SmallVec::new(),
            }),
            PropertyKind::Rotation => Self::Rotation(QuaternionSampler {
                bone,
                entries: SmallVec::new(),
            }),
        }
    }

    /// Registers the clip curve at `curve_index` under its full path,
    /// replacing an entry already registered under the same path.
    pub(crate) fn set_curve(&mut self, name: &str, component: Option<Component>, curve_index: usize) {
        let entries = match self {
            Self::Position(sampler) => &mut sampler.entries,
            Self::Rotation(sampler) => &mut sampler.entries,
        };

        if let Some(existing) = entries.iter_mut().find(|entry| entry.name == name) {
            existing.component = component;
            existing.curve_index = curve_index;
            existing.cursor = CurveCursor::default();
        } else {
            entries.push(CurveEntry {
                name: name.to_string(),
                component,
                curve_index,
                cursor: CurveCursor::default(),
            });
        }
    }

    /// The bone this sampler writes to.
    #[inline]
    pub fn bone(&self) -> BoneHandle {
        match self {
            Self::Position(sampler) => sampler.bone,
            Self::Rotation(sampler) => sampler.bone,
        }
    }

    /// The property this sampler writes.
    #[inline]
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Position(_) => PropertyKind::Position,
            Self::Rotation(_) => PropertyKind::Rotation,
        }
    }

    /// Number of curves registered on this sampler.
    #[inline]
    pub fn curve_count(&self) -> usize {
        match self {
            Self::Position(sampler) => sampler.entries.len(),
            Self::Rotation(sampler) => sampler.entries.len(),
        }
    }

    /// Samples every registered curve at `time` and writes the composed
    /// value into the bound bone property.
    pub fn sample(&mut self, clip: &AnimationClip, time: f32, skeleton: &mut Skeleton) {
        match self {
            Self::Position(sampler) => sampler.sample(clip, time, skeleton),
            Self::Rotation(sampler) => sampler.sample(clip, time, skeleton),
        }
    }
}

impl Vector3Sampler {
    fn sample(&mut self, clip: &AnimationClip, time: f32, skeleton: &mut Skeleton) {
        // 1. Start from the bone's current value so per-component curves
        // leave the untouched lanes alone.
        let Some(bone) = skeleton.get(self.bone) else {
            return;
        };
        let mut value = bone.transform.position;

        // 2. Fold every entry into it, in registration order.
        for entry in &mut self.entries {
            match (clip.curve_at(entry.curve_index), entry.component) {
                (Some(Curve::Vector3(curve)), None) => {
                    value = curve.sample_with_cursor(time, &mut entry.cursor);
                }
                (Some(Curve::Scalar(curve)), Some(component)) => {
                    let lane = curve.sample_with_cursor(time, &mut entry.cursor);
                    match component {
                        Component::X => value.x = lane,
                        Component::Y => value.y = lane,
                        Component::Z => value.z = lane,
                        Component::W => {}
                    }
                }
                _ => {}
            }
        }

        // 3. One property write per sampler per frame.
        if let Some(bone) = skeleton.get_mut(self.bone) {
            bone.transform.position = value;
            bone.transform.mark_dirty();
        }
    }
}

impl QuaternionSampler {
    fn sample(&mut self, clip: &AnimationClip, time: f32, skeleton: &mut Skeleton) {
        let Some(bone) = skeleton.get(self.bone) else {
            return;
        };
        let previous = bone.transform.rotation;
        let mut lanes = Vec4::from(previous);

        for entry in &mut self.entries {
            match (clip.curve_at(entry.curve_index), entry.component) {
                (Some(Curve::Quaternion(curve)), None) => {
                    lanes = Vec4::from(curve.sample_with_cursor(time, &mut entry.cursor));
                }
                (Some(Curve::Scalar(curve)), Some(component)) => {
                    let lane = curve.sample_with_cursor(time, &mut entry.cursor);
                    match component {
                        Component::X => lanes.x = lane,
                        Component::Y => lanes.y = lane,
                        Component::Z => lanes.z = lane,
                        Component::W => lanes.w = lane,
                    }
                }
                _ => {}
            }
        }

        // Per-component writes de-normalize the quaternion; renormalize
        // before it reaches the transform. A collapsed quaternion keeps
        // the previous rotation instead of producing NaNs.
        let length_squared = lanes.length_squared();
        let rotation = if length_squared > 1e-12 {
            Quat::from_vec4(lanes / length_squared.sqrt())
        } else {
            previous
        };

        if let Some(bone) = skeleton.get_mut(self.bone) {
            bone.transform.rotation = rotation;
            bone.transform.mark_dirty();
        }
    }
}
