//! End-to-end construction and playback over a synthetic two-circle track.

use approx::assert_relative_eq;
use skidpad_core::{
    build_track, ConeRole, GeometryError, Landmarks, PipelineOptions, Playback, PlaybackConfig,
    PlaybackState, Point2D, Smoother, SmootherConfig,
};
use std::f64::consts::PI;

const RADIUS: f64 = 9.125;

fn landmarks() -> Landmarks {
    Landmarks::new([
        Point2D::new(0.0, -1.5),
        Point2D::new(0.0, 1.5),
        Point2D::new(3.0, -1.5),
        Point2D::new(3.0, 1.5),
    ])
}

/// Straight entry, one lap of each circle, straight exit.
fn base_path() -> Vec<Point2D> {
    let mut path: Vec<Point2D> = (0..=30).map(|i| Point2D::new(-15.0 + i as f64 * 0.5, 0.0)).collect();
    for i in 1..=200 {
        let a = PI / 2.0 - 2.0 * PI * i as f64 / 200.0;
        path.push(Point2D::new(RADIUS * a.cos(), -RADIUS + RADIUS * a.sin()));
    }
    for i in 1..=200 {
        let a = -PI / 2.0 + 2.0 * PI * i as f64 / 200.0;
        path.push(Point2D::new(RADIUS * a.cos(), RADIUS + RADIUS * a.sin()));
    }
    path.extend((1..=30).map(|i| Point2D::new(i as f64 * 0.5, 0.0)));
    path
}

#[test]
fn test_reference_layout() {
    let base = base_path();
    let layout = build_track(&landmarks(), &base, &PipelineOptions::default()).unwrap();

    assert_relative_eq!(layout.pose.x, 1.5);
    assert_relative_eq!(layout.pose.heading, 0.0);
    assert_eq!(layout.path.len(), (base.len() - 1) / 10 + 1);
    assert_relative_eq!(layout.path[0].x, base[0].x + 1.5);
    assert_eq!(layout.cones.positions(ConeRole::Landmark).len(), 4);
}

#[test]
fn test_external_start_joins_path() {
    let options = PipelineOptions {
        external_start: Some(Point2D::new(-20.0, -20.0)),
        ..Default::default()
    };
    let layout = build_track(&landmarks(), &base_path(), &options).unwrap();

    assert_eq!(layout.path[0], Point2D::new(-20.0, -20.0));
    // Consecutive connector samples are evenly spaced.
    let first = (layout.path[1] - layout.path[0]).norm();
    let second = (layout.path[2] - layout.path[1]).norm();
    assert_relative_eq!(first, second, epsilon = 1e-9);
}

#[test]
fn test_smoothed_path_resampled() {
    let options = PipelineOptions {
        use_smoothing: true,
        output_sample_count: 500,
        ..Default::default()
    };
    let layout = build_track(&landmarks(), &base_path(), &options).unwrap();

    assert_eq!(layout.path.len(), 500);
    assert!(layout.path.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn test_rotated_layout_turns_gates() {
    let options = PipelineOptions {
        rotation_deg: 90.0,
        ..Default::default()
    };
    let layout = build_track(&landmarks(), &base_path(), &options).unwrap();

    assert_relative_eq!(layout.pose.heading, -PI / 2.0, epsilon = 1e-12);
    // Entry straight now runs along -y, ending at the rotated gate.
    let first = layout.path[0];
    assert_relative_eq!(first.x, 1.5, epsilon = 1e-9);
    assert_relative_eq!(first.y, 15.0, epsilon = 1e-9);
}

#[test]
fn test_playback_over_built_path() {
    let layout = build_track(&landmarks(), &base_path(), &PipelineOptions::default()).unwrap();
    let frames = layout.path.len();
    let mut playback = Playback::new(layout.path, PlaybackConfig::default()).unwrap();

    let mut longest = 0.0f64;
    while playback.advance() != PlaybackState::Finished {
        let frame = playback.render_state();
        let window = frame.window;
        let span = (window[window.len() - 1] - window[0]).norm();
        longest = longest.max(span);
        assert_relative_eq!(frame.heading_vector.unwrap().norm(), 5.0, epsilon = 1e-9);
    }

    assert_eq!(playback.cursor(), frames - 1);
    assert!(longest <= 20.0 + 1e-9);
}

#[test]
fn test_dedup_scenario() {
    let smoother = Smoother::new(SmootherConfig {
        sample_count: 11,
        ..Default::default()
    });
    let deduped = Smoother::dedup(&[Point2D::new(0.0, 0.0), Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)]);

    assert_eq!(deduped.len(), 2);
    assert_eq!(smoother.effective_degree(deduped.len()).unwrap(), 1);
    assert!(matches!(
        smoother.effective_degree(1),
        Err(GeometryError::InsufficientPoints { .. })
    ));
}
