use super::*;

fn drag(interpreter: &mut GestureInterpreter, dx: f64, dy: f64) -> GestureAction {
    assert!(interpreter.pointer_down(Point::new(200.0, 300.0)));
    interpreter.pointer_move(Point::new(200.0 + dx / 2.0, 300.0 + dy / 2.0));
    interpreter.pointer_move(Point::new(200.0 + dx, 300.0 + dy));
    interpreter.pointer_up()
}

#[test]
fn small_offsets_have_no_hint() {
    for (dx, dy) in [
        (0.0, 0.0),
        (50.0, 50.0),
        (-50.0, 50.0),
        (50.0, -50.0),
        (-50.0, -50.0),
        (12.5, -49.9),
    ] {
        assert_eq!(classify(Offset::new(dx, dy)), None, "offset ({dx}, {dy})");
    }
}

#[test]
fn cardinal_hints_follow_the_dominant_axis() {
    assert_eq!(classify(Offset::new(80.0, 10.0)), Some(SwipeDirection::Right));
    assert_eq!(classify(Offset::new(-80.0, 10.0)), Some(SwipeDirection::Left));
    assert_eq!(classify(Offset::new(10.0, 80.0)), Some(SwipeDirection::Down));
    assert_eq!(classify(Offset::new(10.0, -80.0)), Some(SwipeDirection::Up));
}

#[test]
fn only_the_up_right_diagonal_is_named() {
    assert_eq!(classify(Offset::new(60.0, -60.0)), Some(SwipeDirection::UpRight));
    assert_eq!(classify(Offset::new(-60.0, -60.0)), None);
}

#[test]
fn downward_diagonals_fall_back_to_the_dominant_axis() {
    assert_eq!(classify(Offset::new(90.0, 60.0)), Some(SwipeDirection::Right));
    assert_eq!(classify(Offset::new(-60.0, 90.0)), Some(SwipeDirection::Down));
    assert_eq!(classify(Offset::new(-90.0, 60.0)), Some(SwipeDirection::Left));
}

#[test]
fn cardinal_swipes_commit_past_the_threshold() {
    for dy in [-50.0, -40.0, 0.0, 40.0, 99.0] {
        assert_eq!(resolve_commit(Offset::new(101.0, dy)), GestureAction::Next);
        assert_eq!(resolve_commit(Offset::new(-101.0, dy)), GestureAction::Someday);
    }
    for dx in [-99.0, -40.0, 0.0, 40.0] {
        assert_eq!(resolve_commit(Offset::new(dx, 101.0)), GestureAction::Waiting);
        assert_eq!(resolve_commit(Offset::new(dx, -101.0)), GestureAction::Trash);
    }
}

#[test]
fn up_right_diagonal_wins_over_cardinals() {
    assert_eq!(resolve_commit(Offset::new(60.0, -60.0)), GestureAction::Reference);
    assert_eq!(resolve_commit(Offset::new(150.0, -60.0)), GestureAction::Reference);
    assert_eq!(resolve_commit(Offset::new(60.0, -150.0)), GestureAction::Reference);
    assert_eq!(resolve_commit(Offset::new(99.0, -101.0)), GestureAction::Reference);
}

#[test]
fn thresholds_are_exclusive() {
    assert_eq!(resolve_commit(Offset::new(100.0, 0.0)), GestureAction::None);
    assert_eq!(resolve_commit(Offset::new(0.0, -100.0)), GestureAction::None);
    assert_eq!(resolve_commit(Offset::new(50.0, -50.0)), GestureAction::None);
}

#[test]
fn short_or_unnamed_diagonal_drags_are_discarded() {
    assert_eq!(resolve_commit(Offset::new(30.0, 30.0)), GestureAction::None);
    assert_eq!(resolve_commit(Offset::new(-60.0, -60.0)), GestureAction::None);
    assert_eq!(resolve_commit(Offset::new(60.0, 60.0)), GestureAction::None);
    assert_eq!(resolve_commit(Offset::new(150.0, 150.0)), GestureAction::None);
}

#[test]
fn drag_commits_from_last_move_sample() {
    let mut interpreter = GestureInterpreter::new();
    assert_eq!(drag(&mut interpreter, 150.0, 0.0), GestureAction::Next);
    assert!(!interpreter.is_dragging());
    assert!(interpreter.is_settling());
}

#[test]
fn move_before_down_is_ignored() {
    let mut interpreter = GestureInterpreter::new();
    assert_eq!(interpreter.pointer_move(Point::new(500.0, 0.0)), None);
    assert_eq!(interpreter.pointer_up(), GestureAction::None);
    assert_eq!(interpreter.feedback().offset, Offset::ZERO);
    assert_eq!(
        interpreter.handle(PointerEvent::Move(Point::new(1.0, 1.0))),
        GestureSignal::Ignored
    );
    assert_eq!(interpreter.handle(PointerEvent::Up), GestureSignal::Ignored);
}

#[test]
fn second_pointer_down_keeps_original_start() {
    let mut interpreter = GestureInterpreter::new();
    assert!(interpreter.pointer_down(Point::new(0.0, 0.0)));
    assert!(!interpreter.pointer_down(Point::new(400.0, 400.0)));
    interpreter.pointer_move(Point::new(-120.0, 0.0));
    assert_eq!(interpreter.pointer_up(), GestureAction::Someday);
}

#[test]
fn cancel_evaluates_like_release() {
    let mut interpreter = GestureInterpreter::new();
    interpreter.handle(PointerEvent::Down(Point::new(0.0, 0.0)));
    interpreter.handle(PointerEvent::Move(Point::new(0.0, -130.0)));
    assert_eq!(
        interpreter.handle(PointerEvent::Cancel),
        GestureSignal::Released(GestureAction::Trash)
    );
}

#[test]
fn hint_tracks_each_move() {
    let mut interpreter = GestureInterpreter::new();
    interpreter.pointer_down(Point::new(0.0, 0.0));
    assert_eq!(interpreter.pointer_move(Point::new(20.0, 0.0)), None);
    assert_eq!(
        interpreter.pointer_move(Point::new(70.0, 10.0)),
        Some(SwipeDirection::Right)
    );
    assert_eq!(
        interpreter.pointer_move(Point::new(70.0, -70.0)),
        Some(SwipeDirection::UpRight)
    );
    let feedback = interpreter.feedback();
    assert_eq!(feedback.hint_label(), Some("Reference"));
    assert_eq!(feedback.transition, CardTransition::None);
}

#[test]
fn feedback_rotates_and_fades_in_with_horizontal_travel() {
    let mut interpreter = GestureInterpreter::new();
    interpreter.pointer_down(Point::new(0.0, 0.0));
    interpreter.pointer_move(Point::new(60.0, 0.0));
    let feedback = interpreter.feedback();
    assert!((feedback.rotation_deg - 4.8).abs() < 1e-9);
    assert!((feedback.hint_opacity - 0.5).abs() < 1e-9);

    interpreter.pointer_move(Point::new(-300.0, 0.0));
    assert_eq!(interpreter.feedback().hint_opacity, 1.0);
}

#[test]
fn settle_window_freezes_then_resets_the_card() {
    let mut interpreter = GestureInterpreter::new();
    assert_eq!(drag(&mut interpreter, 0.0, 140.0), GestureAction::Waiting);

    let released = interpreter.feedback();
    assert_eq!(released.offset, Offset::new(0.0, 140.0));
    assert_eq!(released.direction, None);
    assert_eq!(released.transition, CardTransition::Spring);

    assert!(interpreter.pointer_down(Point::new(0.0, 0.0)));
    interpreter.pointer_move(Point::new(300.0, 0.0));
    assert_eq!(interpreter.feedback().offset, Offset::new(0.0, 140.0));

    interpreter.settle();
    assert!(!interpreter.is_settling());
    assert_eq!(interpreter.feedback().offset, Offset::ZERO);
    interpreter.pointer_move(Point::new(120.0, 0.0));
    assert_eq!(interpreter.pointer_up(), GestureAction::Next);
}

#[test]
fn settle_window_closes_on_its_own_after_the_delay() {
    let mut interpreter = GestureInterpreter::new();
    assert_eq!(drag(&mut interpreter, 0.0, -150.0), GestureAction::Trash);
    assert!(interpreter.is_settling());

    std::thread::sleep(SETTLE_DELAY + Duration::from_millis(20));

    assert!(!interpreter.is_settling());
    assert_eq!(interpreter.feedback().offset, Offset::ZERO);
    assert!(interpreter.pointer_down(Point::new(0.0, 0.0)));
    assert_eq!(
        interpreter.pointer_move(Point::new(0.0, -150.0)),
        Some(SwipeDirection::Up)
    );
    assert_eq!(interpreter.feedback().offset, Offset::new(0.0, -150.0));
    assert_eq!(interpreter.pointer_up(), GestureAction::Trash);
}

#[test]
fn discarded_release_does_not_settle() {
    let mut interpreter = GestureInterpreter::new();
    assert_eq!(drag(&mut interpreter, 30.0, 30.0), GestureAction::None);
    assert!(!interpreter.is_settling());
}

#[test]
fn directions_map_to_actions_and_buckets() {
    assert_eq!(SwipeDirection::Up.action(), GestureAction::Trash);
    assert_eq!(SwipeDirection::UpRight.action(), GestureAction::Reference);
    assert_eq!(SwipeDirection::Left.tint(), HintTint::Purple);
    assert_eq!(GestureAction::Trash.target_status(), None);
    assert_eq!(GestureAction::Someday.target_status(), Some(ItemStatus::Someday));
    assert!(!GestureAction::None.is_commit());
}
