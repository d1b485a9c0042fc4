//! Curve and Playback Tests
//!
//! Tests for:
//! - KeyframeCurve linear/step/cubic interpolation
//! - Interpolatable trait implementations (f32, Vec3, Quat)
//! - CurveCursor O(1) optimization and binary search fallback
//! - AnimationPlayer loop modes (Once, Loop, PingPong)
//! - AnimationClip duration auto-computation and replace-by-path

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec3};

use sinew::animation::clip::AnimationClip;
use sinew::animation::curve::{Curve, CurveCursor, InterpolationMode, KeyframeCurve};
use sinew::animation::player::{AnimationPlayer, LoopMode};
use sinew::animation::values::Interpolatable;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// KeyframeCurve: Linear Interpolation (f32)
// ============================================================================

#[test]
fn curve_linear_f32_midpoint() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    );

    let mut cursor = CurveCursor::default();
    let val = curve.sample_with_cursor(0.5, &mut cursor);
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn curve_linear_f32_exact_keyframe() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 10.0, 20.0],
        InterpolationMode::Linear,
    );

    let mut cursor = CurveCursor::default();
    assert!(approx(curve.sample_with_cursor(0.0, &mut cursor), 0.0));
    assert!(approx(curve.sample_with_cursor(1.0, &mut cursor), 10.0));
    assert!(approx(curve.sample_with_cursor(2.0, &mut cursor), 20.0));
}

#[test]
fn curve_linear_f32_clamp_beyond_range() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    );

    // Sampling beyond the last keyframe should clamp to last value
    let mut cursor = CurveCursor::default();
    let val = curve.sample_with_cursor(5.0, &mut cursor);
    assert!(approx(val, 10.0), "Expected 10.0, got {val}");
}

#[test]
fn curve_linear_f32_before_first() {
    let curve = KeyframeCurve::new(
        vec![1.0, 2.0],
        vec![10.0_f32, 20.0],
        InterpolationMode::Linear,
    );

    // Before first keyframe: should clamp to first value
    let mut cursor = CurveCursor::default();
    let val = curve.sample_with_cursor(0.5, &mut cursor);
    assert!(approx(val, 10.0), "Expected 10.0, got {val}");
}

// ============================================================================
// KeyframeCurve: Step Interpolation
// ============================================================================

#[test]
fn curve_step_holds_value() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        InterpolationMode::Step,
    );

    // Step should hold the current keyframe value
    let mut cursor = CurveCursor::default();
    assert!(approx(curve.sample_with_cursor(0.0, &mut cursor), 0.0));
    assert!(approx(curve.sample_with_cursor(0.5, &mut cursor), 0.0));
    assert!(approx(curve.sample_with_cursor(0.99, &mut cursor), 0.0));
    assert!(approx(curve.sample_with_cursor(1.0, &mut cursor), 100.0));
    assert!(approx(curve.sample_with_cursor(1.5, &mut cursor), 100.0));
}

// ============================================================================
// KeyframeCurve: Linear Interpolation (Vec3)
// ============================================================================

#[test]
fn curve_linear_vec3() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
        InterpolationMode::Linear,
    );

    let mut cursor = CurveCursor::default();
    let val = curve.sample_with_cursor(0.5, &mut cursor);
    assert!(approx(val.x, 5.0));
    assert!(approx(val.y, 10.0));
    assert!(approx(val.z, 15.0));
}

// ============================================================================
// KeyframeCurve: Linear Interpolation (Quat - slerp)
// ============================================================================

#[test]
fn curve_linear_quat_slerp() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(PI);

    let curve = KeyframeCurve::new(vec![0.0, 1.0], vec![q0, q1], InterpolationMode::Linear);

    // At t=0.5, should be halfway rotation
    let mut cursor = CurveCursor::default();
    let val = curve.sample_with_cursor(0.5, &mut cursor);
    let expected = q0.slerp(q1, 0.5);
    let angle = val.angle_between(expected);
    assert!(angle < 0.01, "Quaternion slerp mismatch: angle={angle}");
}

// ============================================================================
// KeyframeCurve: Cubic Spline Interpolation
// ============================================================================

#[test]
fn curve_cubic_f32_endpoints() {
    // CubicSpline: values = [in_tangent0, value0, out_tangent0, in_tangent1, value1, out_tangent1]
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![
            0.0_f32, 0.0, 1.0, // frame 0: in_tangent=0, value=0, out_tangent=1
            1.0, 10.0, 0.0, // frame 1: in_tangent=1, value=10, out_tangent=0
        ],
        InterpolationMode::CubicSpline,
    );

    // At exact keyframes, should return exact value
    let mut cursor = CurveCursor::default();
    let v0 = curve.sample_with_cursor(0.0, &mut cursor);
    assert!(approx(v0, 0.0), "got {}", v0);
    let v1 = curve.sample_with_cursor(1.0, &mut cursor);
    assert!(approx(v1, 10.0), "got {}", v1);
}

#[test]
fn curve_cubic_f32_smooth_midpoint() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![
            0.0_f32, 0.0, 0.0, // frame 0: zero tangents, value=0
            0.0, 10.0, 0.0, // frame 1: zero tangents, value=10
        ],
        InterpolationMode::CubicSpline,
    );

    // With zero tangents, Hermite interpolation midpoint should be approximately 5.0
    let mut cursor = CurveCursor::default();
    let val = curve.sample_with_cursor(0.5, &mut cursor);
    assert!(
        (val - 5.0).abs() < 1.0,
        "Cubic midpoint expected ~5.0, got {val}"
    );
}

// ============================================================================
// KeyframeCurve::sample() (stateless, no cursor)
// ============================================================================

#[test]
fn sample_linear_f32_midpoint() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    );
    assert!(approx(curve.sample(0.5), 5.0), "got {}", curve.sample(0.5));
}

#[test]
fn sample_linear_f32_before_first() {
    let curve = KeyframeCurve::new(
        vec![1.0, 2.0],
        vec![10.0_f32, 20.0],
        InterpolationMode::Linear,
    );
    // Before first keyframe, t is clamped to 0 inside sample_at_frame
    assert!(approx(curve.sample(0.0), 10.0), "got {}", curve.sample(0.0));
}

#[test]
fn sample_matches_cursor_across_all_times() {
    // Verify sample() and sample_with_cursor() produce identical results
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 5.0, 20.0, 15.0],
        InterpolationMode::Linear,
    );
    for i in 0..=40 {
        let t = i as f32 * 0.1;
        let mut cursor = CurveCursor::default();
        let val_cursor = curve.sample_with_cursor(t, &mut cursor);
        let val_sample = curve.sample(t);
        assert!(
            approx(val_sample, val_cursor),
            "t={t}: sample()={val_sample} != sample_with_cursor()={val_cursor}"
        );
    }
}

// ============================================================================
// CurveCursor: O(1) Sequential Access
// ============================================================================

#[test]
fn cursor_sequential_forward() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 20.0, 30.0, 40.0],
        InterpolationMode::Linear,
    );

    let mut cursor = CurveCursor::default();

    // Sequential forward sampling should use O(1) cursor optimization
    for i in 0..=20 {
        let t = i as f32 * 0.2;
        let val = curve.sample_with_cursor(t, &mut cursor);
        let expected = t * 10.0;
        assert!(
            approx(val, expected),
            "t={t}: expected {expected}, got {val}"
        );
    }
}

#[test]
fn cursor_forward_then_jump_back() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0, 2.0, 3.0],
        vec![0.0_f32, 10.0, 20.0, 30.0],
        InterpolationMode::Linear,
    );

    let mut cursor = CurveCursor::default();

    // Move forward to t=2.5
    let val = curve.sample_with_cursor(2.5, &mut cursor);
    assert!(approx(val, 25.0));

    // Jump back to t=0.5 (large jump → binary search fallback)
    let val = curve.sample_with_cursor(0.5, &mut cursor);
    assert!(approx(val, 5.0));
}

#[test]
fn cursor_reverse_playback_small_steps() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0, 2.0, 3.0],
        vec![0.0_f32, 10.0, 20.0, 30.0],
        InterpolationMode::Linear,
    );

    let mut cursor = CurveCursor::default();
    curve.sample_with_cursor(2.5, &mut cursor);

    // Step backwards in small increments; the backward scan should keep up
    for i in (0..=25).rev() {
        let t = i as f32 * 0.1;
        let val = curve.sample_with_cursor(t, &mut cursor);
        assert!(approx(val, t * 10.0), "t={t}: got {val}");
    }
}

#[test]
fn cursor_single_keyframe() {
    let curve = KeyframeCurve::new(vec![0.0], vec![42.0_f32], InterpolationMode::Linear);

    let mut cursor = CurveCursor::default();
    let val = curve.sample_with_cursor(5.0, &mut cursor);
    assert!(approx(val, 42.0));
}

#[test]
fn cursor_stale_index_from_other_curve() {
    let curve = KeyframeCurve::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    );

    // A cursor that advanced far on a longer curve must still sample
    // correctly here
    let mut cursor = CurveCursor { last_index: 17 };
    let val = curve.sample_with_cursor(0.5, &mut cursor);
    assert!(approx(val, 5.0), "got {val}");
}

#[test]
fn cursor_stale_index_before_first_key() {
    // Same stale cursor, but the sample time sits before the first key,
    // sending the scan backward. Must clamp like the stateless path.
    let curve = KeyframeCurve::new(
        vec![1.0, 2.0],
        vec![5.0_f32, 9.0],
        InterpolationMode::Linear,
    );

    let mut cursor = CurveCursor { last_index: 17 };
    let val = curve.sample_with_cursor(0.5, &mut cursor);
    assert!(approx(val, 5.0), "Expected clamped first value, got {val}");
    assert!(
        approx(curve.sample(0.5), val),
        "cursor and stateless sampling must agree"
    );
}

#[test]
#[should_panic(expected = "at least one keyframe")]
fn curve_rejects_empty_keys() {
    let _ = KeyframeCurve::<f32>::new(vec![], vec![], InterpolationMode::Linear);
}

// ============================================================================
// Interpolatable Implementations
// ============================================================================

#[test]
fn interpolatable_f32_linear() {
    let result = f32::interpolate_linear(0.0, 10.0, 0.25);
    assert!(approx(result, 2.5));
}

#[test]
fn interpolatable_vec3_linear() {
    let a = Vec3::new(0.0, 0.0, 0.0);
    let b = Vec3::new(10.0, 20.0, 30.0);
    let result = Vec3::interpolate_linear(a, b, 0.5);
    assert!(approx(result.x, 5.0));
    assert!(approx(result.y, 10.0));
    assert!(approx(result.z, 15.0));
}

#[test]
fn interpolatable_quat_linear_is_slerp() {
    let a = Quat::IDENTITY;
    let b = Quat::from_rotation_y(FRAC_PI_2);
    let result = Quat::interpolate_linear(a, b, 0.5);

    let expected = a.slerp(b, 0.5);
    let angle = result.angle_between(expected);
    assert!(angle < 1e-4, "Slerp mismatch: angle={angle}");
}

#[test]
fn interpolatable_quat_cubic_stays_normalized() {
    let a = Quat::IDENTITY;
    let b = Quat::from_rotation_y(FRAC_PI_2);
    let result = Quat::interpolate_cubic(a, Quat::IDENTITY, Quat::IDENTITY, b, 0.3, 1.0);
    assert!(
        (result.length() - 1.0).abs() < 1e-4,
        "Cubic quat should come out normalized, length={}",
        result.length()
    );
}

// ============================================================================
// AnimationClip Auto-Duration
// ============================================================================

fn make_simple_clip(name: &str, duration: f32) -> AnimationClip {
    let mut clip = AnimationClip::new(name);
    clip.add_curve(
        "Root/Root:LocalPosition",
        Curve::Vector3(KeyframeCurve::new(
            vec![0.0, duration],
            vec![Vec3::ZERO, Vec3::X],
            InterpolationMode::Linear,
        )),
    );
    clip
}

#[test]
fn clip_auto_duration() {
    let mut clip = make_simple_clip("test", 1.5);
    clip.add_curve(
        "Root/Spine/Spine:LocalRotation",
        Curve::Quaternion(KeyframeCurve::new(
            vec![0.0, 3.0],
            vec![Quat::IDENTITY, Quat::from_rotation_y(1.0)],
            InterpolationMode::Linear,
        )),
    );

    assert!(
        approx(clip.duration(), 3.0),
        "Duration should be max over all curves (3.0), got {}",
        clip.duration()
    );
}

#[test]
fn clip_empty_zero_duration() {
    let clip = AnimationClip::new("empty");
    assert!(approx(clip.duration(), 0.0));
    assert!(clip.is_empty());
}

#[test]
fn clip_replace_by_path_recomputes_duration() {
    let mut clip = make_simple_clip("test", 4.0);
    assert!(approx(clip.duration(), 4.0));

    // Re-registering the same path must replace, not append, and the
    // duration must shrink with it
    clip.add_curve(
        "Root/Root:LocalPosition",
        Curve::Vector3(KeyframeCurve::new(
            vec![0.0, 1.0],
            vec![Vec3::ZERO, Vec3::Y],
            InterpolationMode::Linear,
        )),
    );
    assert_eq!(clip.len(), 1, "same path should replace the curve");
    assert!(
        approx(clip.duration(), 1.0),
        "duration should follow the replacement, got {}",
        clip.duration()
    );
}

// ============================================================================
// AnimationPlayer Loop Modes
// ============================================================================

#[test]
fn player_loop_mode_once() {
    let mut player = AnimationPlayer::new();
    player.add_clip(make_simple_clip("test", 2.0), Vec::new());
    player.play("test");
    player.loop_mode = LoopMode::Once;

    // Advance past end
    player.advance(3.0);
    assert!(
        approx(player.time, 2.0),
        "Once: should clamp to duration, got {}",
        player.time
    );
    assert!(player.paused, "Once: should auto-pause at end");
}

#[test]
fn player_loop_mode_loop() {
    let mut player = AnimationPlayer::new();
    player.add_clip(make_simple_clip("test", 2.0), Vec::new());
    player.play("test");
    player.loop_mode = LoopMode::Loop;

    // Advance past end by 0.5
    player.advance(2.5);
    assert!(
        approx(player.time, 0.5),
        "Loop: should wrap to 0.5, got {}",
        player.time
    );
    assert!(!player.paused, "Loop: should NOT auto-pause");
}

#[test]
fn player_loop_reverse_playback() {
    let mut player = AnimationPlayer::new();
    player.add_clip(make_simple_clip("test", 2.0), Vec::new());
    player.play("test");
    player.loop_mode = LoopMode::Loop;
    player.time_scale = -1.0;
    player.time = 0.5;

    // time = 0.5 + (-1.0) = -0.5 → Loop wrap: 2.0 + (-0.5 % 2.0) = 1.5
    player.advance(1.0);
    assert!(
        approx(player.time, 1.5),
        "Loop reverse: expected 1.5, got {}",
        player.time
    );
}

#[test]
fn player_loop_mode_ping_pong() {
    let mut player = AnimationPlayer::new();
    player.add_clip(make_simple_clip("test", 2.0), Vec::new());
    player.play("test");
    player.loop_mode = LoopMode::PingPong;

    // time = 3.0 → cycle position 3.0 of [0, 4) → folded back to 1.0
    player.advance(3.0);
    assert!(
        approx(player.time, 1.0),
        "PingPong: expected fold to 1.0, got {}",
        player.time
    );
}

#[test]
fn player_ping_pong_reverse_across_zero() {
    let mut player = AnimationPlayer::new();
    player.add_clip(make_simple_clip("test", 2.0), Vec::new());
    player.play("test");
    player.loop_mode = LoopMode::PingPong;
    player.time_scale = -1.0;
    player.time = 0.5;

    // time = 0.5 - 1.0 = -0.5 → normalized into [0, 4) as 3.5 → folded
    // back to 0.5: a second back through zero bounces forward again
    player.advance(1.0);
    assert!(
        approx(player.time, 0.5),
        "PingPong reverse: expected bounce to 0.5, got {}",
        player.time
    );
}

#[test]
fn player_paused_no_advance() {
    let mut player = AnimationPlayer::new();
    player.add_clip(make_simple_clip("test", 2.0), Vec::new());
    player.play("test");
    player.time = 0.5;
    player.paused = true;

    player.advance(1.0);
    assert!(approx(player.time, 0.5), "Paused player should not advance");
}

#[test]
fn player_time_scale() {
    let mut player = AnimationPlayer::new();
    player.add_clip(make_simple_clip("test", 4.0), Vec::new());
    player.play("test");
    player.loop_mode = LoopMode::Once;
    player.time_scale = 2.0;

    player.advance(1.0); // dt=1.0, time_scale=2.0, so effective dt=2.0
    assert!(approx(player.time, 2.0), "Expected 2.0, got {}", player.time);
}

#[test]
fn player_unknown_clip_keeps_playback() {
    let mut player = AnimationPlayer::new();
    player.add_clip(make_simple_clip("walk", 2.0), Vec::new());
    assert!(player.play("walk"));
    player.time = 1.0;

    assert!(!player.play("fly"), "unknown clip must report failure");
    assert!(
        approx(player.time, 1.0),
        "failed play should not disturb the active clip"
    );
    assert_eq!(player.active_clip().map(|c| c.name.as_str()), Some("walk"));
}

#[test]
fn player_play_rewinds_time() {
    let mut player = AnimationPlayer::new();
    player.add_clip(make_simple_clip("walk", 2.0), Vec::new());
    player.add_clip(make_simple_clip("run", 3.0), Vec::new());

    player.play("walk");
    player.advance(1.5);
    assert!(approx(player.time, 1.5));

    player.play("run");
    assert!(approx(player.time, 0.0), "switching clips must rewind");
    assert_eq!(player.active_clip().map(|c| c.name.as_str()), Some("run"));
}

#[test]
fn player_no_active_clip_no_advance() {
    let mut player = AnimationPlayer::new();
    player.add_clip(make_simple_clip("walk", 2.0), Vec::new());

    player.advance(1.0);
    assert!(approx(player.time, 0.0), "no active clip, time must stay 0");
}

#[test]
fn player_replacing_clip_keeps_slot() {
    let mut player = AnimationPlayer::new();
    player.add_clip(make_simple_clip("walk", 2.0), Vec::new());
    player.add_clip(make_simple_clip("walk", 5.0), Vec::new());

    assert_eq!(player.len(), 1, "same name should replace, not append");
    player.play("walk");
    player.loop_mode = LoopMode::Once;
    player.advance(4.0);
    assert!(
        approx(player.time, 4.0),
        "replacement clip's duration (5.0) should be in effect, got {}",
        player.time
    );
}
