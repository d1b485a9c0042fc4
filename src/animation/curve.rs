use glam::{Quat, Vec3};

use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterpolationMode {
    Linear,
    Step,
    CubicSpline,
}

const MAX_SCAN_OFFSET: usize = 3;

/// Per-consumer sampling memory: the keyframe interval used last time.
///
/// Cursors belong to whoever samples, not to the curve, so one curve can be
/// sampled from any number of places without contention.
#[derive(Debug, Clone, Default)]
pub struct CurveCursor {
    pub last_index: usize,
}

/// A sorted run of keyframe times with one value per key.
///
/// For `CubicSpline`, `values` holds `[in_tangent, value, out_tangent]`
/// triplets per key and is therefore three times as long as `times`.
#[derive(Debug, Clone)]
pub struct KeyframeCurve<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
    interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeCurve<T> {
    /// Builds a curve from parallel key times and values.
    ///
    /// # Panics
    ///
    /// Panics when `times` is empty or `values` does not match the length
    /// contract of the interpolation mode.
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        assert!(!times.is_empty(), "curve requires at least one keyframe");
        let expected = match interpolation {
            InterpolationMode::CubicSpline => times.len() * 3,
            _ => times.len(),
        };
        assert_eq!(
            values.len(),
            expected,
            "curve value count does not match key count"
        );

        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Key times, sorted ascending.
    #[inline]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    /// Number of keyframes.
    #[inline]
    pub fn key_count(&self) -> usize {
        self.times.len()
    }

    /// Time of the last keyframe.
    #[inline]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Stateless sampling: a fresh binary search on every call.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        // partition_point finds the first index where t > time, i.e. next_index
        let next_idx = self.times.partition_point(|&t| t <= time);
        self.sample_at_frame(next_idx.saturating_sub(1), time)
    }

    /// Sampling with cursor: playback usually moves by a frame or less, so
    /// the interval containing `time` is found by a short linear scan from
    /// the cursor before falling back to a global binary search.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut CurveCursor) -> T {
        let len = self.times.len();
        // Fast path: static data (single keyframe)
        if len == 1 {
            return self.value_at(0);
        }

        let i = cursor.last_index;

        // If the cursor is out of bounds (e.g. it came from another curve),
        // fall back to the first key's time and let the scan sort it out.
        let t_curr = self.times.get(i).copied().unwrap_or(self.times[0]);

        let found_index = if time >= t_curr {
            // === Case A: normal playback (time increasing) ===
            // Scan forward up to MAX_SCAN_OFFSET intervals from the cursor.
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                if idx >= len - 1 {
                    // Past the last interval: clamp to the final key if time
                    // has run off the end of the curve.
                    if time >= self.times[len - 1] {
                        res = Some(len - 1);
                    }
                    break;
                }

                // time >= times[i] already holds, so only the right boundary
                // of interval [times[idx], times[idx+1]) needs checking.
                if time < self.times[idx + 1] {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // === Case B: reverse playback or a small jump back ===
            // Scan backward; the right boundary is implied by the failed
            // check one step earlier, so only the left boundary matters.
            // The start is clamped so a stale out-of-range cursor cannot
            // index past the end.
            let start = i.min(len - 1);
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                if start < offset {
                    break;
                }
                let idx = start - offset;

                if time >= self.times[idx] {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let final_index = if let Some(idx) = found_index {
            cursor.last_index = idx;
            idx
        } else {
            // === Case C: large jump (scrubbing / loop reset) ===
            // Local scan failed, fall back to a global binary search.
            let next_idx = self.times.partition_point(|&t| t <= time);
            let idx = next_idx.saturating_sub(1);

            cursor.last_index = idx;
            idx
        };

        self.sample_at_frame(final_index, time)
    }

    /// Unified value accessor: for `CubicSpline` the value of key `index`
    /// sits in the middle of its tangent triplet.
    fn value_at(&self, index: usize) -> T {
        match self.interpolation {
            InterpolationMode::CubicSpline => self.values[index * 3 + 1],
            _ => self.values[index],
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();

        // Boundary case: no next frame available
        if index >= len - 1 {
            return self.value_at(len - 1);
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        // Guard against zero-length intervals, then clamp for the
        // before-first-key case where time < t0.
        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => self.value_at(index),
            InterpolationMode::Linear => {
                let v0 = self.value_at(index);
                let v1 = self.value_at(next_idx);
                T::interpolate_linear(v0, v1, t)
            }
            InterpolationMode::CubicSpline => {
                let i_prev = index * 3;
                let i_next = next_idx * 3;

                let v0 = self.values[i_prev + 1];
                let out_tangent0 = self.values[i_prev + 2];
                let in_tangent1 = self.values[i_next];
                let v1 = self.values[i_next + 1];

                T::interpolate_cubic(v0, out_tangent0, in_tangent1, v1, t, dt)
            }
        }
    }
}

/// Keyframe data of one clip curve, closed over the supported value types.
///
/// Which transform property a curve drives is not encoded here; that is
/// carried by the curve's target path inside the owning clip and resolved
/// by the binder.
#[derive(Debug, Clone)]
pub enum Curve {
    Scalar(KeyframeCurve<f32>),
    Vector3(KeyframeCurve<Vec3>),
    Quaternion(KeyframeCurve<Quat>),
}

impl Curve {
    /// Time of the curve's last keyframe.
    pub fn end_time(&self) -> f32 {
        match self {
            Curve::Scalar(curve) => curve.end_time(),
            Curve::Vector3(curve) => curve.end_time(),
            Curve::Quaternion(curve) => curve.end_time(),
        }
    }
}
