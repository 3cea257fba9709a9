use maison_core::constants::*;
use maison_core::scene::{depth_alpha, Camera, ParticleField};
use maison_core::*;

#[test]
fn ease_curves_hit_endpoints_and_are_monotonic() {
    for ease in [Ease::Power2InOut, Ease::Power2Out] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease.apply(i as f32 / 100.0);
            assert!(v >= prev, "{ease:?} not monotonic at {i}");
            prev = v;
        }
    }
    assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn resting_motion_starts_slow() {
    let mut motion = WarpMotion::new(false);
    let f = motion.tick(0.016);
    assert!((f.speed - IDLE_SPEED_INITIAL).abs() < 1e-6);
    assert!((f.fov_deg - IDLE_FOV_DEG).abs() < 1e-6);
}

#[test]
fn entering_at_warp_skips_acceleration() {
    let mut motion = WarpMotion::new(true);
    let f = motion.tick(0.016);
    assert!((f.speed - WARP_SPEED).abs() < 1e-6);
    assert!((f.fov_deg - WARP_FOV_DEG).abs() < 1e-6);
    assert!(motion.is_zooming());
}

#[test]
fn zooming_accelerates_over_two_seconds() {
    let mut motion = WarpMotion::new(false);
    motion.set_zooming(true);
    let mid = motion.tick(1.0);
    assert!(mid.speed > IDLE_SPEED_INITIAL && mid.speed < WARP_SPEED);
    let end = motion.tick(1.0);
    assert!((end.speed - WARP_SPEED).abs() < 1e-4);
    assert!((end.fov_deg - WARP_FOV_DEG).abs() < 1e-4);
}

#[test]
fn deceleration_lands_softly_without_jumps() {
    let mut motion = WarpMotion::new(true);
    motion.set_zooming(false);
    let mut prev = motion.tick(0.0);
    assert!((prev.speed - WARP_SPEED).abs() < 1e-6);
    for _ in 0..180 {
        let f = motion.tick(1.0 / 60.0);
        assert!(f.speed <= prev.speed + 1e-6);
        assert!(f.offset >= prev.offset);
        prev = f;
    }
    assert!((prev.speed - IDLE_SPEED).abs() < 1e-3);
}

#[test]
fn retarget_mid_flight_continues_from_current_value() {
    let mut motion = WarpMotion::new(false);
    motion.set_zooming(true);
    let before = motion.tick(1.0).speed;
    motion.set_zooming(false);
    let after = motion.tick(0.0).speed;
    assert!((before - after).abs() < 1e-5);
}

#[test]
fn tween_reports_target_and_completion() {
    let mut t = Tween::at(1.0);
    assert!(t.is_done());
    t.retarget(3.0, 2.0, Ease::Power2Out);
    assert_eq!(t.target(), 3.0);
    assert!(!t.is_done());
    t.step(5.0);
    assert!(t.is_done());
    assert!((t.value() - 3.0).abs() < 1e-6);
}

#[test]
fn particle_field_is_seeded_and_shaped() {
    let a = ParticleField::new(PARTICLE_COUNT, 7);
    let b = ParticleField::new(PARTICLE_COUNT, 7);
    assert_eq!(a.len(), PARTICLE_COUNT);
    assert_eq!(a.particles, b.particles);
    let half = FIELD_DEPTH * 0.5;
    let mut mist = 0;
    for p in &a.particles {
        let r = p.position.truncate().length();
        assert!(r >= FIELD_RADIUS_MIN - 1e-3 && r <= FIELD_RADIUS_MIN + FIELD_RADIUS_SPAN + 1e-3);
        assert!(p.position.z >= -half && p.position.z <= half);
        if p.is_mist() {
            mist += 1;
        }
    }
    // roughly 30% mist
    let share = mist as f32 / PARTICLE_COUNT as f32;
    assert!(share > 0.2 && share < 0.4, "mist share {share}");
}

#[test]
fn placed_particles_wrap_and_keep_radius() {
    let field = ParticleField::new(64, 1);
    let half = FIELD_DEPTH * 0.5;
    for offset in [0.0, 3.7, 55.0, 1234.5] {
        for p in &field.particles {
            let placed = p.placed(offset);
            assert!(placed.z >= -half - 1e-3 && placed.z < half + 1e-3);
            let r0 = p.position.truncate().length();
            let r1 = placed.truncate().length();
            assert!((r0 - r1).abs() < 1e-3);
        }
    }
}

#[test]
fn depth_alpha_fades_at_both_ends() {
    assert_eq!(depth_alpha(-10.0), 0.0);
    assert_eq!(depth_alpha(2.0), 0.0);
    assert!((depth_alpha(-4.0) - 1.0).abs() < 1e-6);
}

#[test]
fn projection_lands_inside_viewport() {
    let field = ParticleField::new(PARTICLE_COUNT, 3);
    let camera = Camera::looking_down_field(16.0 / 9.0, IDLE_FOV_DEG);
    let mut out = Vec::new();
    field.project(&camera, 0.0, 1600.0, 900.0, 1.0, &mut out);
    assert!(!out.is_empty());
    for p in &out {
        assert!(p.x > -200.0 && p.x < 1800.0);
        assert!(p.y > -200.0 && p.y < 1100.0);
        assert!(p.alpha > 0.0 && p.alpha <= 1.0);
        assert!(p.size > 0.0);
    }
    let wide = Camera::looking_down_field(16.0 / 9.0, WARP_FOV_DEG);
    let mut wide_out = Vec::new();
    field.project(&wide, 0.0, 1600.0, 900.0, 1.0, &mut wide_out);
    assert!(wide_out.len() >= out.len());
}
