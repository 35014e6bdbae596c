//! Tween driver for [`FigureParams`].
//!
//! A [`TweenTimeline`] holds any number of [`Tween`]s that run concurrently
//! from the moment they are added. Each tick advances all of them by the same
//! `dt` and writes the interpolated values into the parameter record. The
//! timeline is the only writer of that record.

use serde::{Deserialize, Serialize};

use crate::figure::FigureParams;

/// Animatable field of [`FigureParams`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamField {
    X,
    Y,
    Z,
    Ry,
    ArmRotation,
}

impl ParamField {
    pub fn get(self, params: &FigureParams) -> f32 {
        match self {
            ParamField::X => params.x,
            ParamField::Y => params.y,
            ParamField::Z => params.z,
            ParamField::Ry => params.ry,
            ParamField::ArmRotation => params.arm_rotation,
        }
    }

    pub fn set(self, params: &mut FigureParams, value: f32) {
        let slot = match self {
            ParamField::X => &mut params.x,
            ParamField::Y => &mut params.y,
            ParamField::Z => &mut params.z,
            ParamField::Ry => &mut params.ry,
            ParamField::ArmRotation => &mut params.arm_rotation,
        };
        *slot = value;
    }
}

/// Easing applied to the linear progress of every cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EasingFunction {
    Linear,
    /// Quadratic, slow start.
    EaseIn,
    /// Quadratic, slow end.
    #[default]
    EaseOut,
    /// Quadratic, slow start and end.
    EaseInOut,
}

impl EasingFunction {
    /// Map a linear progress value (0.0..=1.0) to an eased value.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn => t * t,
            EasingFunction::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// How often a tween plays after its first run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    #[default]
    Never,
    /// Play once plus `n` repeats.
    Count(u32),
    Infinite,
}

impl Repeat {
    fn extra_cycles(self) -> Option<u32> {
        match self {
            Repeat::Never => Some(0),
            Repeat::Count(n) => Some(n),
            Repeat::Infinite => None,
        }
    }
}

/// Describes one animation: which fields go where, how fast, how often.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub targets: Vec<(ParamField, f32)>,
    /// Seconds per cycle.
    pub duration: f32,
    #[serde(default)]
    pub repeat: Repeat,
    /// Every other cycle plays backwards.
    #[serde(default)]
    pub yoyo: bool,
    #[serde(default)]
    pub ease: EasingFunction,
}

impl Tween {
    pub fn to(targets: Vec<(ParamField, f32)>, duration: f32) -> Self {
        Self {
            targets,
            duration,
            repeat: Repeat::Never,
            yoyo: false,
            ease: EasingFunction::default(),
        }
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn ease(mut self, ease: EasingFunction) -> Self {
        self.ease = ease;
        self
    }

    /// Total play time, `None` when repeating forever.
    pub fn total_duration(&self) -> Option<f32> {
        self.repeat
            .extra_cycles()
            .map(|extra| self.duration.max(0.0) * (extra as f32 + 1.0))
    }

    /// Length after which an infinite tween repeats exactly, `None` for finite tweens.
    fn period(&self) -> Option<f32> {
        let duration = self.duration.max(0.0);
        match self.repeat {
            Repeat::Infinite if duration > 0.0 => {
                Some(if self.yoyo { duration * 2.0 } else { duration })
            }
            _ => None,
        }
    }

    /// Eased progress `0..=1` towards the targets after `elapsed` seconds.
    pub fn progress_at(&self, elapsed: f32) -> f32 {
        let elapsed = elapsed.max(0.0);
        let duration = self.duration.max(0.0);
        if duration == 0.0 {
            let forward = !self.yoyo || self.repeat.extra_cycles().is_some_and(|n| n % 2 == 0);
            return if forward { 1.0 } else { 0.0 };
        }
        let (cycle, local) = match self.repeat.extra_cycles() {
            Some(extra) if elapsed >= duration * (extra as f32 + 1.0) => (extra, 1.0),
            _ => {
                let cycle = (elapsed / duration).floor();
                (cycle as u32, (elapsed - cycle * duration) / duration)
            }
        };
        let local = if self.yoyo && cycle % 2 == 1 {
            1.0 - local
        } else {
            local
        };
        self.ease.apply(local)
    }
}

struct ActiveTween {
    tween: Tween,
    elapsed: f32,
    /// Captured on the first tick the tween runs.
    starts: Option<Vec<f32>>,
}

impl ActiveTween {
    fn is_finished(&self) -> bool {
        self.tween
            .total_duration()
            .is_some_and(|total| self.elapsed >= total)
    }
}

#[derive(Default)]
pub struct TweenTimeline {
    active: Vec<ActiveTween>,
}

impl TweenTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `values` immediately.
    pub fn set(&self, params: &mut FigureParams, values: &[(ParamField, f32)]) {
        for &(field, value) in values {
            field.set(params, value);
        }
    }

    /// Starts `tween` on the next tick, from whatever values the fields hold then.
    pub fn to(&mut self, tween: Tween) {
        log::debug!(
            "tween added: {:?} over {}s, repeat {:?}, yoyo {}",
            tween.targets,
            tween.duration,
            tween.repeat,
            tween.yoyo
        );
        self.active.push(ActiveTween {
            tween,
            elapsed: 0.0,
            starts: None,
        });
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Advances every tween by `dt` seconds and writes the result into `params`.
    ///
    /// Finished tweens settle on their final value and are dropped.
    pub fn tick(&mut self, dt: f32, params: &mut FigureParams) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        for active in self.active.iter_mut() {
            let starts = active.starts.get_or_insert_with(|| {
                active
                    .tween
                    .targets
                    .iter()
                    .map(|(field, _)| field.get(params))
                    .collect()
            });
            active.elapsed += dt;
            // keeps f32 precision for tweens that never end
            if let Some(period) = active.tween.period() {
                active.elapsed = active.elapsed.rem_euclid(period);
            }
            let progress = active.tween.progress_at(active.elapsed);
            for ((field, end), start) in active.tween.targets.iter().zip(starts.iter()) {
                field.set(params, start + (end - start) * progress);
            }
        }
        self.active.retain(|active| {
            let finished = active.is_finished();
            if finished {
                log::debug!("tween on {:?} finished", active.tween.targets);
            }
            !finished
        });
    }
}
