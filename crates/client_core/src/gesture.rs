//! Swipe gesture recognition: turns a pointer drag into a triage intent.
//!
//! Two independent readings are taken from the same drag offset. [`classify`]
//! runs on every move and only drives the hint overlay; [`resolve_commit`] runs
//! once on release and decides what actually happens to the card.

use std::time::{Duration, Instant};

use serde::Serialize;
use shared::domain::ItemStatus;

/// Distance past which the hint overlay names a direction.
pub const HINT_THRESHOLD: f64 = 50.0;
/// Distance a cardinal swipe must travel to commit.
pub const COMMIT_THRESHOLD: f64 = 100.0;
/// Per-axis distance a diagonal swipe must travel to commit.
pub const DIAGONAL_THRESHOLD: f64 = COMMIT_THRESHOLD / 2.0;
/// How long a released card keeps its offset before snapping back.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

const ROTATION_DEG_PER_PX: f64 = 0.08;
const HINT_OPACITY_DISTANCE: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Drag displacement in screen coordinates; positive `dy` points down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn between(start: Point, current: Point) -> Self {
        Self {
            dx: current.x - start.x,
            dy: current.y - start.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureAction {
    Trash,
    Next,
    Waiting,
    Someday,
    Reference,
    None,
}

impl GestureAction {
    /// Bucket this action files the item into. `Trash` and `None` have none.
    pub fn target_status(self) -> Option<ItemStatus> {
        match self {
            GestureAction::Next => Some(ItemStatus::Next),
            GestureAction::Waiting => Some(ItemStatus::Waiting),
            GestureAction::Someday => Some(ItemStatus::Someday),
            GestureAction::Reference => Some(ItemStatus::Reference),
            GestureAction::Trash | GestureAction::None => None,
        }
    }

    pub fn is_commit(self) -> bool {
        self != GestureAction::None
    }
}

/// Direction named by the live hint overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Up,
    Right,
    Down,
    Left,
    UpRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HintTint {
    Red,
    Green,
    Amber,
    Purple,
    Blue,
}

impl SwipeDirection {
    pub fn action(self) -> GestureAction {
        match self {
            SwipeDirection::Up => GestureAction::Trash,
            SwipeDirection::Right => GestureAction::Next,
            SwipeDirection::Down => GestureAction::Waiting,
            SwipeDirection::Left => GestureAction::Someday,
            SwipeDirection::UpRight => GestureAction::Reference,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SwipeDirection::Up => "Trash",
            SwipeDirection::Right => "Next Action",
            SwipeDirection::Down => "Waiting",
            SwipeDirection::Left => "Someday",
            SwipeDirection::UpRight => "Reference",
        }
    }

    pub fn tint(self) -> HintTint {
        match self {
            SwipeDirection::Up => HintTint::Red,
            SwipeDirection::Right => HintTint::Green,
            SwipeDirection::Down => HintTint::Amber,
            SwipeDirection::Left => HintTint::Purple,
            SwipeDirection::UpRight => HintTint::Blue,
        }
    }
}

/// Live hint for an in-progress drag.
///
/// Only the up-right diagonal has a name. An up-left drag past the hint
/// threshold on both axes shows no hint at all; a downward diagonal is read by
/// its dominant axis.
pub fn classify(offset: Offset) -> Option<SwipeDirection> {
    let ax = offset.dx.abs();
    let ay = offset.dy.abs();

    if ax <= HINT_THRESHOLD && ay <= HINT_THRESHOLD {
        return None;
    }

    if ax > HINT_THRESHOLD && ay > HINT_THRESHOLD && offset.dy < 0.0 {
        return (offset.dx > 0.0).then_some(SwipeDirection::UpRight);
    }

    if ax > ay {
        Some(if offset.dx > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        })
    } else {
        Some(if offset.dy > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        })
    }
}

/// Final decision for a released drag.
///
/// The diagonal check runs first: its per-axis bound is looser than the
/// cardinal ones, so any later position in the chain would shadow it.
pub fn resolve_commit(offset: Offset) -> GestureAction {
    let Offset { dx, dy } = offset;
    let ax = dx.abs();
    let ay = dy.abs();

    let significant = (ax > COMMIT_THRESHOLD && ay < COMMIT_THRESHOLD)
        || (ay > COMMIT_THRESHOLD && ax < COMMIT_THRESHOLD)
        || (ay > DIAGONAL_THRESHOLD && ax > DIAGONAL_THRESHOLD);
    if !significant {
        return GestureAction::None;
    }

    if dy < -DIAGONAL_THRESHOLD && dx > DIAGONAL_THRESHOLD {
        GestureAction::Reference
    } else if dy > COMMIT_THRESHOLD && ax < COMMIT_THRESHOLD {
        GestureAction::Waiting
    } else if dy < -COMMIT_THRESHOLD && ax < COMMIT_THRESHOLD {
        GestureAction::Trash
    } else if dx > COMMIT_THRESHOLD && ay < COMMIT_THRESHOLD {
        GestureAction::Next
    } else if dx < -COMMIT_THRESHOLD && ay < COMMIT_THRESHOLD {
        GestureAction::Someday
    } else {
        GestureAction::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSignal {
    Ignored,
    Started,
    Hint(Option<SwipeDirection>),
    Released(GestureAction),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSample {
    start: Point,
    current: Point,
}

impl DragSample {
    fn offset(&self) -> Offset {
        Offset::between(self.start, self.current)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSample),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTransition {
    /// Card follows the pointer exactly.
    None,
    /// Card springs back toward its resting position.
    Spring,
}

/// Everything a renderer needs to draw the card for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwipeFeedback {
    pub offset: Offset,
    pub rotation_deg: f64,
    pub direction: Option<SwipeDirection>,
    pub hint_opacity: f64,
    pub transition: CardTransition,
}

impl SwipeFeedback {
    pub fn hint_label(&self) -> Option<&'static str> {
        self.direction.map(SwipeDirection::label)
    }
}

/// Pointer-driven state machine for a single card.
///
/// Owns nothing but the in-flight drag; interpreting the result is left to
/// the caller.
#[derive(Debug, Default)]
pub struct GestureInterpreter {
    state: DragState,
    direction: Option<SwipeDirection>,
    displayed: Offset,
    /// Release time of the last committing swipe while its card is still settling.
    released_at: Option<Instant>,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: PointerEvent) -> GestureSignal {
        match event {
            PointerEvent::Down(at) => {
                if self.pointer_down(at) {
                    GestureSignal::Started
                } else {
                    GestureSignal::Ignored
                }
            }
            PointerEvent::Move(at) => {
                self.expire_settle();
                if !self.is_dragging() || self.is_settling() {
                    return GestureSignal::Ignored;
                }
                GestureSignal::Hint(self.pointer_move(at))
            }
            PointerEvent::Up | PointerEvent::Cancel => {
                if !self.is_dragging() {
                    return GestureSignal::Ignored;
                }
                GestureSignal::Released(self.release())
            }
        }
    }

    /// Starts a drag. Returns `false` if one is already in progress.
    pub fn pointer_down(&mut self, at: Point) -> bool {
        self.expire_settle();
        if self.is_dragging() {
            return false;
        }
        self.state = DragState::Dragging(DragSample {
            start: at,
            current: at,
        });
        true
    }

    /// Tracks the pointer and returns the hint for the new position.
    pub fn pointer_move(&mut self, at: Point) -> Option<SwipeDirection> {
        self.expire_settle();
        if self.is_settling() {
            return self.direction;
        }
        let DragState::Dragging(sample) = &mut self.state else {
            return None;
        };
        sample.current = at;
        self.displayed = sample.offset();
        self.direction = classify(self.displayed);
        self.direction
    }

    pub fn pointer_up(&mut self) -> GestureAction {
        self.release()
    }

    pub fn pointer_cancel(&mut self) -> GestureAction {
        self.release()
    }

    fn release(&mut self) -> GestureAction {
        let DragState::Dragging(sample) = std::mem::take(&mut self.state) else {
            return GestureAction::None;
        };
        let offset = sample.offset();
        let action = resolve_commit(offset);
        self.direction = None;
        if action.is_commit() {
            self.released_at = Some(Instant::now());
        }
        tracing::debug!(dx = offset.dx, dy = offset.dy, ?action, "swipe released");
        action
    }

    /// Ends the post-release window early: the card snaps back and moves are
    /// tracked again. The window also closes on its own after [`SETTLE_DELAY`].
    pub fn settle(&mut self) {
        self.displayed = Offset::ZERO;
        self.released_at = None;
    }

    fn settle_elapsed(&self) -> bool {
        self.released_at
            .is_some_and(|at| at.elapsed() >= SETTLE_DELAY)
    }

    fn expire_settle(&mut self) {
        if self.settle_elapsed() {
            self.settle();
        }
    }

    /// Drops any drag in progress without evaluating it.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn is_settling(&self) -> bool {
        self.released_at
            .is_some_and(|at| at.elapsed() < SETTLE_DELAY)
    }

    pub fn feedback(&self) -> SwipeFeedback {
        let offset = if self.settle_elapsed() {
            Offset::ZERO
        } else {
            self.displayed
        };
        SwipeFeedback {
            offset,
            rotation_deg: offset.dx * ROTATION_DEG_PER_PX,
            direction: self.direction,
            hint_opacity: (offset.dx.abs() / HINT_OPACITY_DISTANCE).min(1.0),
            transition: if self.is_dragging() {
                CardTransition::None
            } else {
                CardTransition::Spring
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
