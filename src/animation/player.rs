use rustc_hash::FxHashMap;

use crate::animation::clip::AnimationClip;
use crate::animation::sampler::PropertySampler;
use crate::skeleton::Skeleton;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// A clip stored together with its resolved samplers.
#[derive(Debug, Clone)]
struct BoundClip {
    clip: AnimationClip,
    samplers: Vec<PropertySampler>,
}

/// Clip registry and playback driver for one skeleton.
///
/// Exactly one clip is active at a time; switching clips rewinds the time
/// cursor. Blending between clips is not supported.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clips: Vec<BoundClip>,
    by_name: FxHashMap<String, usize>,
    active: Option<usize>,

    /// Current sample time in seconds, maintained by [`AnimationPlayer::advance`].
    pub time: f32,
    /// Playback speed multiplier (negative plays in reverse).
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
}

impl AnimationPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clips: Vec::new(),
            by_name: FxHashMap::default(),
            active: None,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
        }
    }

    /// Registers a clip together with the samplers it resolved to. A clip
    /// already registered under the same name is replaced.
    pub fn add_clip(&mut self, clip: AnimationClip, samplers: Vec<PropertySampler>) {
        let name = clip.name.clone();
        if let Some(&slot) = self.by_name.get(&name) {
            log::warn!("Animation clip '{name}' replaced");
            self.clips[slot] = BoundClip { clip, samplers };
        } else {
            self.by_name.insert(name, self.clips.len());
            self.clips.push(BoundClip { clip, samplers });
        }
    }

    /// Makes the named clip active and rewinds to its start. Unknown names
    /// leave the current playback untouched and return `false`.
    pub fn play(&mut self, name: &str) -> bool {
        match self.by_name.get(name) {
            Some(&slot) => {
                self.active = Some(slot);
                self.time = 0.0;
                self.paused = false;
                true
            }
            None => {
                log::warn!("Unknown animation clip '{name}'");
                false
            }
        }
    }

    /// The clip currently driving playback, if any.
    #[must_use]
    pub fn active_clip(&self) -> Option<&AnimationClip> {
        let slot = self.active?;
        self.clips.get(slot).map(|bound| &bound.clip)
    }

    /// Number of registered clips.
    #[inline]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Core logic: advance time.
    pub fn advance(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        let Some(slot) = self.active else {
            return;
        };
        let Some(bound) = self.clips.get(slot) else {
            return;
        };

        let duration = bound.clip.duration();
        if duration <= 0.0 {
            return;
        }

        // 1. Accumulate time
        self.time += dt * self.time_scale;

        // 2. Handle loop mode
        match self.loop_mode {
            LoopMode::Once => {
                // Play once, stop at end or start
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true; // Auto-pause
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                // Standard loop: modulo
                if self.time >= duration {
                    self.time %= duration;
                } else if self.time < 0.0 {
                    // Handle reverse playback loop
                    self.time = duration + (self.time % duration);
                }
            }
            LoopMode::PingPong => {
                let double_duration = duration * 2.0;
                // Normalize time into [0, 2*duration) cycle
                let mut t = self.time % double_duration;
                if t < 0.0 {
                    t += double_duration;
                }
                // In the second half of the cycle, reverse direction
                if t > duration {
                    t = double_duration - t;
                }
                self.time = t;
            }
        }
    }

    /// Samples the active clip at the current time, writing bone-local
    /// properties through its samplers.
    pub fn sample(&mut self, skeleton: &mut Skeleton) {
        let Some(slot) = self.active else {
            return;
        };
        let Some(BoundClip { clip, samplers }) = self.clips.get_mut(slot) else {
            return;
        };

        for sampler in samplers.iter_mut() {
            sampler.sample(clip, self.time, skeleton);
        }
    }
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}
