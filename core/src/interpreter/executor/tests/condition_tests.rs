//! Tests for condition evaluation

use super::super::*;
use super::helpers::{condition, ScriptedContext};

#[test]
fn test_constants() {
    let ctx = ScriptedContext::default();

    assert!(evaluate(&condition("(true)"), &ctx));
    assert!(!evaluate(&condition("(false)"), &ctx));
}

#[test]
fn test_sensors_read_the_context() {
    let mut ctx = ScriptedContext::default();
    assert!(!evaluate(&condition("(wall)"), &ctx));
    assert!(!evaluate(&condition("(at-item)"), &ctx));
    assert!(!evaluate(&condition("(can-hit-robot)"), &ctx));

    ctx.wall = true;
    ctx.at_item = true;
    ctx.can_hit = true;
    assert!(evaluate(&condition("(wall)"), &ctx));
    assert!(evaluate(&condition("(at-item)"), &ctx));
    assert!(evaluate(&condition("(can-hit-robot)"), &ctx));
}

#[test]
fn test_energy_threshold_is_inclusive() {
    let ctx = ScriptedContext::with_energy(500.0, 0.0);

    assert!(evaluate(&condition("(energy-at-least 499.5)"), &ctx));
    assert!(evaluate(&condition("(energy-at-least 500)"), &ctx));
    assert!(!evaluate(&condition("(energy-at-least 500.01)"), &ctx));
}

#[test]
fn test_empty_and_is_true_empty_or_is_false() {
    let ctx = ScriptedContext::default();

    assert!(evaluate(&condition("(and)"), &ctx));
    assert!(!evaluate(&condition("(or)"), &ctx));
    assert!(!evaluate(&condition("(not (and))"), &ctx));
}

#[test]
fn test_and_or_truth_tables() {
    let ctx = ScriptedContext::default();

    assert!(evaluate(&condition("(and (true) (true) (true))"), &ctx));
    assert!(!evaluate(&condition("(and (true) (false) (true))"), &ctx));
    assert!(evaluate(&condition("(or (false) (false) (true))"), &ctx));
    assert!(!evaluate(&condition("(or (false) (false))"), &ctx));
}

#[test]
fn test_and_short_circuits_left_to_right() {
    let ctx = ScriptedContext::default();

    assert!(!evaluate(&condition("(and (false) (wall) (at-item))"), &ctx));
    assert_eq!(ctx.sensor_reads.get(), 0);

    assert!(!evaluate(&condition("(and (wall) (at-item))"), &ctx));
    assert_eq!(ctx.sensor_reads.get(), 1);
}

#[test]
fn test_or_short_circuits_left_to_right() {
    let ctx = ScriptedContext {
        wall: true,
        ..ScriptedContext::default()
    };

    assert!(evaluate(&condition("(or (wall) (at-item) (can-hit-robot))"), &ctx));
    assert_eq!(ctx.sensor_reads.get(), 1);
}

#[test]
fn test_double_negation() {
    let ctx = ScriptedContext {
        at_item: true,
        ..ScriptedContext::default()
    };

    assert!(!evaluate(&condition("(not (at-item))"), &ctx));
    assert!(evaluate(&condition("(not (not (at-item)))"), &ctx));
}

#[test]
fn test_evaluation_does_not_touch_the_context() {
    let ctx = ScriptedContext::with_energy(1000.0, 100.0);

    evaluate(
        &condition("(or (and (wall) (energy-at-least 1)) (not (can-hit-robot)))"),
        &ctx,
    );

    assert!(ctx.actions.is_empty());
    assert_eq!(ctx.energy, 1000.0);
}
