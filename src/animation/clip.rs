use crate::animation::curve::Curve;

/// A named animation sequence: an ordered list of curves, each addressed to
/// a bone property by its target path.
///
/// Clips are pure data and carry no skeleton references; the same clip can
/// be resolved against any number of skeletons by the binder. Curve order is
/// preserved so binding is deterministic.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    curves: Vec<(String, Curve)>,
    duration: f32,
}

impl AnimationClip {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            curves: Vec::new(),
            duration: 0.0,
        }
    }

    /// Adds `curve` under the target path `path`. A curve already
    /// registered under the same path is replaced in place.
    pub fn add_curve(&mut self, path: &str, curve: Curve) {
        if let Some(slot) = self.curves.iter_mut().find(|(p, _)| p == path) {
            slot.1 = curve;
        } else {
            self.curves.push((path.to_string(), curve));
        }

        self.duration = self
            .curves
            .iter()
            .map(|(_, c)| c.end_time())
            .fold(0.0_f32, f32::max);
    }

    /// Curves with their target paths, in insertion order.
    #[inline]
    pub fn curves(&self) -> &[(String, Curve)] {
        &self.curves
    }

    /// Curve at `index` in insertion order.
    #[inline]
    pub fn curve_at(&self, index: usize) -> Option<&Curve> {
        self.curves.get(index).map(|(_, curve)| curve)
    }

    /// Clip length in seconds: the largest end time over all curves.
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
