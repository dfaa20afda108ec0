//! Property tests for the geometric invariants of the pipeline stages.

use approx::assert_relative_eq;
use proptest::prelude::*;
use skidpad_core::frame::derive_pose;
use skidpad_core::{
    ArcLengthIndex, FrameBuilder, Landmarks, PathSplicer, PathTransformer, Playback, PlaybackConfig,
    PlaybackState, Point2D, Pose,
};
use std::f64::consts::PI;

fn coord() -> impl Strategy<Value = f64> {
    -100.0..100.0f64
}

fn point() -> impl Strategy<Value = Point2D> {
    (coord(), coord()).prop_map(|(x, y)| Point2D::new(x, y))
}

fn wrap_angle(a: f64) -> f64 {
    let mut a = a % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}

proptest! {
    #[test]
    fn transform_preserves_distances(
        x in coord(),
        y in coord(),
        heading in -PI..PI,
        a in point(),
        b in point(),
    ) {
        let transformer = PathTransformer::new(Pose::new(x, y, heading)).unwrap();
        let world = transformer.transform(&[a, b]).unwrap();

        let before = (b - a).norm();
        let after = (world[1] - world[0]).norm();
        prop_assert!((before - after).abs() < 1e-9);
    }

    #[test]
    fn rotation_shifts_heading(
        cx in -50.0..50.0f64,
        cy in -50.0..50.0f64,
        base_heading in -PI..PI,
        degrees in -170.0..170.0f64,
    ) {
        // Gate layout 3 m deep and 3 m wide, centred on (cx, cy).
        let local = [(-1.5, -1.5), (-1.5, 1.5), (1.5, -1.5), (1.5, 1.5)];
        let (s, c) = base_heading.sin_cos();
        let points = local.map(|(u, v)| Point2D::new(cx + c * u - s * v, cy + s * u + c * v));
        let landmarks = Landmarks::new(points);

        let unrotated = derive_pose(&landmarks).unwrap();
        let rotated = FrameBuilder::new().with_rotation(degrees).build(&landmarks).unwrap().pose;

        // Positive degrees turn the layout clockwise.
        let shift = wrap_angle(rotated.heading - unrotated.heading);
        prop_assert!((shift - wrap_angle(-degrees.to_radians())).abs() < 1e-9);
        prop_assert!((rotated.x - unrotated.x).abs() < 1e-9);
        prop_assert!((rotated.y - unrotated.y).abs() < 1e-9);
    }

    #[test]
    fn splice_targets_nearest_sample(
        path in prop::collection::vec(point(), 2..40),
        start in point(),
        connector in 2usize..30,
    ) {
        let spliced = PathSplicer::new(connector).splice(&path, Some(start)).unwrap();

        let best = path
            .iter()
            .map(|p| (*p - start).norm_squared())
            .fold(f64::INFINITY, f64::min);
        let idx = path
            .iter()
            .position(|p| (*p - start).norm_squared() == best)
            .unwrap();

        prop_assert_eq!(spliced[0], start);
        prop_assert_eq!(spliced[connector - 1], path[idx]);
        prop_assert_eq!(&spliced[connector..], &path[idx + 1..]);
    }

    #[test]
    fn arc_length_round_trip(steps in prop::collection::vec(0.01..5.0f64, 1..60)) {
        let mut path = vec![Point2D::new(0.0, 0.0)];
        for (i, step) in steps.iter().enumerate() {
            let last = path[path.len() - 1];
            let next = if i % 2 == 0 {
                Point2D::new(last.x + step, last.y)
            } else {
                Point2D::new(last.x, last.y + step)
            };
            path.push(next);
        }

        let index = ArcLengthIndex::new(&path).unwrap();
        prop_assert_eq!(index.distance_at(0), 0.0);
        for window in index.as_slice().windows(2) {
            prop_assert!(window[1] >= window[0]);
        }
        for i in 0..path.len() {
            prop_assert_eq!(index.index_at_distance(index.distance_at(i)), i);
        }
    }

    #[test]
    fn playback_finishes_after_len_minus_one(path in prop::collection::vec(point(), 2..80)) {
        let len = path.len();
        let mut playback = Playback::new(path, PlaybackConfig::default()).unwrap();

        for _ in 0..len - 1 {
            playback.advance();
        }
        prop_assert_eq!(playback.state(), PlaybackState::Finished);
        prop_assert_eq!(playback.cursor(), len - 1);

        playback.advance();
        prop_assert_eq!(playback.cursor(), len - 1);
    }
}

#[test]
fn test_reference_frame() {
    let landmarks = Landmarks::new([
        Point2D::new(0.0, -1.5),
        Point2D::new(0.0, 1.5),
        Point2D::new(3.0, -1.5),
        Point2D::new(3.0, 1.5),
    ]);
    let pose = derive_pose(&landmarks).unwrap();

    assert_relative_eq!(pose.x, 1.5);
    assert_relative_eq!(pose.y, 0.0);
    assert_relative_eq!(pose.heading, 0.0);
}
