//! Warp motion: eased speed and field-of-view curves driven by `is_zooming`.
//!
//! Travel is integrated as `offset += speed * dt`, so a change of speed never
//! makes the field jump or run backwards.

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Power2InOut,
    Power2Out,
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Power2Out => 1.0 - (1.0 - t) * (1.0 - t) * (1.0 - t),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// Single-value tween that can be retargeted mid-flight from its current value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl Tween {
    pub fn at(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            duration: 0.0,
            elapsed: 0.0,
            ease: Ease::Power2Out,
        }
    }

    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let k = self.ease.apply(self.elapsed / self.duration);
        self.from + (self.to - self.from) * k
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn retarget(&mut self, to: f32, duration: f32, ease: Ease) {
        self.from = self.value();
        self.to = to;
        self.duration = duration.max(0.0);
        self.elapsed = 0.0;
        self.ease = ease;
    }

    pub fn step(&mut self, dt_sec: f32) -> f32 {
        self.elapsed = (self.elapsed + dt_sec.max(0.0)).min(self.duration);
        self.value()
    }
}

/// Per-frame output handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionFrame {
    pub offset: f32,
    pub speed: f32,
    pub fov_deg: f32,
}

#[derive(Clone, Debug)]
pub struct WarpMotion {
    speed: Tween,
    fov: Tween,
    offset: f32,
    zooming: bool,
}

impl Default for WarpMotion {
    fn default() -> Self {
        Self::new(false)
    }
}

impl WarpMotion {
    /// `at_warp` starts the field already at full speed, skipping acceleration.
    pub fn new(at_warp: bool) -> Self {
        let (speed, fov) = if at_warp {
            (WARP_SPEED, WARP_FOV_DEG)
        } else {
            (IDLE_SPEED_INITIAL, IDLE_FOV_DEG)
        };
        Self {
            speed: Tween::at(speed),
            fov: Tween::at(fov),
            offset: 0.0,
            zooming: at_warp,
        }
    }

    pub fn is_zooming(&self) -> bool {
        self.zooming
    }

    pub fn set_zooming(&mut self, zooming: bool) {
        self.zooming = zooming;
        if zooming {
            self.speed
                .retarget(WARP_SPEED, ACCELERATE_SECS, Ease::Power2InOut);
            self.fov
                .retarget(WARP_FOV_DEG, ACCELERATE_SECS, Ease::Power2InOut);
        } else {
            self.speed
                .retarget(IDLE_SPEED, DECELERATE_SECS, Ease::Power2Out);
            self.fov
                .retarget(IDLE_FOV_DEG, DECELERATE_SECS, Ease::Power2Out);
        }
    }

    pub fn tick(&mut self, dt_sec: f32) -> MotionFrame {
        let speed = self.speed.step(dt_sec);
        let fov_deg = self.fov.step(dt_sec);
        self.offset += speed * dt_sec.max(0.0);
        MotionFrame {
            offset: self.offset,
            speed,
            fov_deg,
        }
    }
}
