use super::*;
use crate::collab::{Region, RegionKind};
use crate::geometry::ApproxEq;
use crate::radical::PairKey;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(20);

fn session() -> Session {
    Session::new(EngineConfig::default()).unwrap()
}

#[test]
fn test_mutation_is_not_visible_until_tick() {
    let mut s = session();
    let t0 = Instant::now();
    s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();
    s.create_circle(Point2::new(150.0, 0.0), t0).unwrap();

    assert_eq!(s.snapshot().generation, 0);
    assert!(s.snapshot().registry.is_empty());
    assert!(!s.tick(t0 + DELAY / 2));

    assert!(s.tick(t0 + DELAY));
    assert_eq!(s.snapshot().generation, 1);
    assert_eq!(s.snapshot().registry.len(), 1);
}

#[test]
fn test_indices_start_at_zero_and_increase() {
    let mut s = session();
    let t0 = Instant::now();
    let a = s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();
    let b = s.create_circle(Point2::new(10.0, 0.0), t0).unwrap();
    assert_eq!(a, CircleIndex(0));
    assert_eq!(b, CircleIndex(1));
    assert_eq!(s.circle(b).unwrap().radius, 100.0);
}

#[test]
fn test_reset_does_not_reuse_indices() {
    let mut s = session();
    let t0 = Instant::now();
    s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();
    s.create_circle(Point2::new(150.0, 0.0), t0).unwrap();
    s.tick(t0 + DELAY);

    s.reset();
    assert!(s.circles().is_empty());
    assert!(s.snapshot().registry.is_empty());
    assert!(s.next_deadline().is_none());

    let c = s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();
    assert_eq!(c, CircleIndex(2));
}

#[test]
fn test_burst_coalesces_into_one_pass_with_latest_state() {
    let mut s = session();
    let t0 = Instant::now();
    let a = s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();
    let b = s.create_circle(Point2::new(1000.0, 0.0), t0).unwrap();

    // Drag b toward a in 5ms steps; the window keeps restarting.
    for step in 1..=10u32 {
        let now = t0 + Duration::from_millis(5) * step;
        assert!(!s.tick(now));
        s.move_circle(b, Point2::new(1000.0 - 85.0 * step as f64, 0.0), now).unwrap();
    }
    let now = t0 + Duration::from_millis(50);

    assert!(!s.tick(now + DELAY - Duration::from_millis(1)));
    assert!(s.tick(now + DELAY));
    assert!(!s.tick(now + DELAY * 5));

    assert_eq!(s.snapshot().generation, 1);
    assert_eq!(s.scheduler().stats().runs, 1);
    // Final position is x = 150: the pair intersects.
    let chord = s.snapshot().cache.get(a, b).expect("latest state used");
    assert!(chord.point1.x.approx_eq(&75.0));
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let mut s = session();
    let t0 = Instant::now();
    assert_eq!(
        s.create_circle_with_radius(Point2::new(0.0, 0.0), -1.0, t0),
        Err(EngineError::InvalidRadius(-1.0))
    );
    assert!(matches!(
        s.create_circle(Point2::new(f64::NAN, 0.0), t0),
        Err(EngineError::InvalidCenter(_, _))
    ));
    assert_eq!(
        s.resize(CircleIndex(42), 10.0, t0),
        Err(EngineError::UnknownCircle(CircleIndex(42)))
    );
    // Rejected inputs neither allocate indices nor schedule work.
    assert!(s.circles().is_empty());
    assert!(s.next_deadline().is_none());
}

#[test]
fn test_translate_is_all_or_nothing() {
    let mut s = session();
    let t0 = Instant::now();
    let a = s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();

    let err = s
        .translate(&[a, CircleIndex(9)], Vector2::new(5.0, 5.0), t0)
        .unwrap_err();
    assert_eq!(err, EngineError::UnknownCircle(CircleIndex(9)));
    assert!(s.circle(a).unwrap().center.approx_eq(&Point2::new(0.0, 0.0)));

    s.translate(&[a], Vector2::new(5.0, -5.0), t0).unwrap();
    assert!(s.circle(a).unwrap().center.approx_eq(&Point2::new(5.0, -5.0)));
}

#[test]
fn test_adjust_radius_clamps_to_minimum() {
    let mut s = session();
    let t0 = Instant::now();
    let a = s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();
    let b = s.create_circle_with_radius(Point2::new(0.0, 0.0), 30.0, t0).unwrap();

    s.adjust_radius(&[a, b], -50.0, t0).unwrap();
    assert_eq!(s.circle(a).unwrap().radius, 50.0);
    assert_eq!(s.circle(b).unwrap().radius, s.config().min_radius);
}

#[test]
fn test_radius_below_minimum_is_rejected() {
    let mut s = session();
    let t0 = Instant::now();
    assert_eq!(
        s.create_circle_with_radius(Point2::new(0.0, 0.0), 0.5, t0),
        Err(EngineError::InvalidRadius(0.5))
    );
    assert!(s.circles().is_empty());

    let a = s.create_circle_with_radius(Point2::new(0.0, 0.0), 1.0, t0).unwrap();
    assert_eq!(s.resize(a, 0.25, t0), Err(EngineError::InvalidRadius(0.25)));
    assert_eq!(s.circle(a).unwrap().radius, 1.0);

    // At the floor, shrinking leaves the radius where it is.
    s.adjust_radius(&[a], -0.1, t0).unwrap();
    assert_eq!(s.circle(a).unwrap().radius, 1.0);
}

#[test]
fn test_circles_at() {
    let mut s = session();
    let t0 = Instant::now();
    let a = s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();
    let b = s.create_circle(Point2::new(150.0, 0.0), t0).unwrap();
    s.create_circle(Point2::new(1000.0, 0.0), t0).unwrap();

    assert_eq!(s.circles_at(Point2::new(75.0, 0.0)), vec![a, b]);
    assert_eq!(s.circles_at(Point2::new(-50.0, 0.0)), vec![a]);
    assert!(s.circles_at(Point2::new(500.0, 500.0)).is_empty());
}

#[test]
fn test_recompute_now_is_idempotent() {
    let mut s = session();
    let t0 = Instant::now();
    s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();
    s.create_circle(Point2::new(120.0, 0.0), t0).unwrap();
    s.create_circle(Point2::new(60.0, 100.0), t0).unwrap();

    let first = Arc::clone(s.recompute_now());
    let second = Arc::clone(s.recompute_now());
    assert_eq!(first.cache, second.cache);
    assert_eq!(first.registry, second.registry);
    assert_eq!(first.radical_intersections, second.radical_intersections);
    assert_eq!(second.generation, first.generation + 1);
    assert!(s.next_deadline().is_none());
}

#[test]
fn test_held_snapshot_is_unaffected_by_later_passes() {
    let mut s = session();
    let t0 = Instant::now();
    let a = s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();
    let b = s.create_circle(Point2::new(150.0, 0.0), t0).unwrap();
    let held = Arc::clone(s.recompute_now());

    s.move_circle(b, Point2::new(400.0, 0.0), t0).unwrap();
    s.recompute_now();

    assert!(held.registry.get(&PairKey::new(a, b)).is_some());
    assert!(s.snapshot().registry.get(&PairKey::new(a, b)).is_none());
}

#[test]
fn test_immediate_config() {
    let config = EngineConfig {
        recompute_delay_ms: 0,
        ..EngineConfig::default()
    };
    let mut s = Session::new(config).unwrap();
    let t0 = Instant::now();
    s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();
    assert!(s.tick(t0));
}

struct CountingBuilder {
    calls: Arc<AtomicUsize>,
}

impl RegionArrangementBuilder for CountingBuilder {
    fn build_regions(&self, circles: &[Circle]) -> Vec<Region> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        circles
            .iter()
            .map(|c| Region {
                kind: RegionKind::Circle,
                boundary: vec![c.index()],
            })
            .collect()
    }
}

#[test]
fn test_region_builder_runs_once_per_pass() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut s = session().with_region_builder(Box::new(CountingBuilder {
        calls: Arc::clone(&calls),
    }));
    let t0 = Instant::now();
    for i in 0..4 {
        s.create_circle(Point2::new(i as f64 * 500.0, 0.0), t0).unwrap();
    }
    s.tick(t0 + DELAY);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(s.snapshot().regions.len(), 4);
    assert_eq!(s.snapshot().regions[3].boundary, vec![CircleIndex(3)]);
}

#[test]
fn test_without_line_finder_reports_no_radical_points() {
    let mut s = session().without_line_finder();
    let t0 = Instant::now();
    s.create_circle(Point2::new(0.0, 0.0), t0).unwrap();
    s.create_circle(Point2::new(120.0, 0.0), t0).unwrap();
    s.create_circle(Point2::new(60.0, 100.0), t0).unwrap();
    let snapshot = s.recompute_now();
    assert_eq!(snapshot.registry.len(), 3);
    assert!(snapshot.radical_intersections.is_empty());
}
