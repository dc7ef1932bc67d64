use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tilehop::effects::*;

fn frames_until(limit: usize, mut step: impl FnMut() -> bool) -> usize {
    for frame in 1..=limit {
        if step() {
            return frame;
        }
    }
    panic!("not done after {limit} frames");
}

#[test]
fn hit_effect_expands_fades_and_disappears() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut effect = HitEffect::new(Vec3::new(1.0, 2.0, 0.0), &mut rng);
    assert_eq!(effect.state(), HitEffectState::Expansion);
    assert_eq!(effect.transforms().count(), 3);

    let expanded = frames_until(20, || {
        effect.update();
        effect.state() != HitEffectState::Expansion
    });
    assert!((6..=7).contains(&expanded), "expanded for {expanded}");
    let circle_scale = effect.transforms().next().unwrap().scale.x;
    assert!(circle_scale > 1.15);

    let mut last_alpha = effect.alpha();
    let faded = frames_until(60, || {
        effect.update();
        assert!(effect.alpha() <= last_alpha + 1e-6);
        last_alpha = effect.alpha();
        effect.is_dead()
    });
    assert!((30..=31).contains(&faded), "faded for {faded}");
    assert!(effect.alpha() < 0.01);
}

#[test]
fn hit_effect_streaks_are_thin_and_tilted() {
    let mut rng = StdRng::seed_from_u64(42);
    let effect = HitEffect::new(Vec3::ZERO, &mut rng);
    for streak in effect.transforms().skip(1) {
        assert_eq!(streak.scale, Vec3::new(0.2, 3.0, 1.0));
        assert!(streak.rotation.z.abs() <= std::f32::consts::PI);
    }
}

#[test]
fn death_particles_fly_outward_and_finish() {
    let origin = Vec3::new(3.0, 3.0, 0.0);
    let mut particles = DeathParticles::new(origin);
    assert_eq!(particles.transforms().len(), 8);

    particles.update();
    let t = particles.transforms();
    assert!(t[0].translation.x > origin.x);
    assert!((t[2].translation.y - (origin.y + 0.08)).abs() < 1e-5);
    assert!(t[4].translation.x < origin.x);

    let done = frames_until(80, || {
        particles.update();
        particles.is_finished()
    });
    assert!((58..=60).contains(&done), "finished after {done}");
    assert_eq!(particles.alpha(), 0.0);
}

#[test]
fn fireworks_burst_then_burn_out() {
    let mut fw = Fireworks::new(3);
    fw.burst(Vec3::new(0.0, 10.0, 0.0), 50, 3.0, 7.0, 0.7, 1.4);
    assert_eq!(fw.len(), 50);
    for s in fw.sparks() {
        assert!((0.12..=0.22).contains(&s.start_scale));
        let speed = s.velocity.length();
        assert!((3.0 - 1e-3..=7.0 + 1e-3).contains(&speed));
    }

    fw.update(0.5);
    assert_eq!(fw.len(), 50);
    fw.update(0.5);
    assert!(fw.len() < 50);
    fw.update(0.5);
    assert!(fw.is_empty());
}

#[test]
fn fireworks_are_reproducible_per_seed() {
    let mut a = Fireworks::new(11);
    let mut b = Fireworks::new(11);
    a.burst(Vec3::ZERO, 10, 1.0, 2.0, 1.0, 2.0);
    b.burst(Vec3::ZERO, 10, 1.0, 2.0, 1.0, 2.0);
    a.update(1.0 / 60.0);
    b.update(1.0 / 60.0);
    for (x, y) in a.sparks().iter().zip(b.sparks()) {
        assert_eq!(x.transform.translation, y.transform.translation);
    }
}

#[test]
fn fireworks_clear_drops_everything() {
    let mut fw = Fireworks::new(0);
    fw.burst(Vec3::ZERO, 5, 1.0, 2.0, 1.0, 2.0);
    fw.clear();
    assert!(fw.is_empty());
}
