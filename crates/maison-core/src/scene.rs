//! Particle field behind the pages.
//!
//! These types avoid platform APIs; the web frontend only rasterises the
//! [`ScreenPoint`]s produced here.

use crate::constants::*;
use glam::{Mat4, Vec3, Vec4};
use rand::prelude::*;

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn looking_down_field(aspect: f32, fov_deg: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: fov_deg.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub scale: f32,
    pub randomness: Vec3,
}

impl Particle {
    /// Position after travelling `offset` along the tunnel, wrapped to the
    /// field depth and spun around the axis (closer to the axis spins faster).
    pub fn placed(&self, offset: f32) -> Vec3 {
        let half = FIELD_DEPTH * 0.5;
        let z = (self.position.z + offset + self.randomness.z * 10.0).rem_euclid(FIELD_DEPTH) - half;
        let r = (self.position.x * self.position.x + self.position.y * self.position.y)
            .sqrt()
            .max(1e-3);
        let angle = self.position.x.atan2(self.position.y) + offset * SPIN_FACTOR / r;
        Vec3::new(angle.cos() * r, angle.sin() * r, z)
    }

    pub fn is_mist(&self) -> bool {
        self.scale >= MIST_SCALE_THRESHOLD
    }
}

/// Pixel-space point ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
    pub color: [f32; 3],
    pub mist: bool,
}

#[inline]
fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fade in from the far end, fade out as particles pass the viewer.
#[inline]
pub fn depth_alpha(z: f32) -> f32 {
    smoothstep(-10.0, -6.0, z) * (1.0 - smoothstep(-1.0, 1.0, z))
}

pub struct ParticleField {
    pub particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..count)
            .map(|_| {
                let radius = rng.gen::<f32>() * FIELD_RADIUS_SPAN + FIELD_RADIUS_MIN;
                let spin: f32 = rng.gen::<f32>() * std::f32::consts::TAU;
                let z = (rng.gen::<f32>() - 0.5) * FIELD_DEPTH;
                let scale = if rng.gen_bool(DUST_FRACTION) {
                    rng.gen::<f32>() * 0.15 + 0.05
                } else {
                    rng.gen::<f32>() * 0.5 + 0.5
                };
                Particle {
                    position: Vec3::new(spin.cos() * radius, spin.sin() * radius, z),
                    scale,
                    randomness: Vec3::new(rng.gen(), rng.gen(), rng.gen()),
                }
            })
            .collect();
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Project the field for a `width` x `height` pixel viewport, appending
    /// visible points to `out` (cleared first).
    pub fn project(
        &self,
        camera: &Camera,
        offset: f32,
        width: f32,
        height: f32,
        pixel_ratio: f32,
        out: &mut Vec<ScreenPoint>,
    ) {
        out.clear();
        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        for p in &self.particles {
            let world = p.placed(offset);
            let alpha = depth_alpha(world.z);
            if alpha <= 0.01 {
                continue;
            }
            let view_pos = view * Vec4::new(world.x, world.y, world.z, 1.0);
            if view_pos.z >= -camera.znear {
                continue;
            }
            let clip = proj * view_pos;
            if clip.w <= 0.0 {
                continue;
            }
            let ndc = clip.truncate() / clip.w;
            if ndc.x.abs() > 1.1 || ndc.y.abs() > 1.1 {
                continue;
            }
            let mist = p.is_mist();
            let size = p.scale * pixel_ratio * POINT_SIZE_BASE / (-view_pos.z).max(0.1);
            let alpha = alpha * if mist { MIST_ALPHA } else { DUST_ALPHA };
            out.push(ScreenPoint {
                x: (ndc.x * 0.5 + 0.5) * width,
                y: (1.0 - (ndc.y * 0.5 + 0.5)) * height,
                size,
                alpha,
                color: mix(DUST_COLOR, MIST_COLOR, p.scale),
                mist,
            });
        }
    }
}

#[inline]
fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}
