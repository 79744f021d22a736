//! Per-frame interaction state machine
//!
//! One modal gesture at a time: either the view is being panned or a
//! single vertex is being dragged. The gesture is explicit state
//! carried across frames, polled once per frame with a fresh input
//! sample; releasing the originating button ends it. Destructive edits
//! (insert/remove) commit a history snapshot first; drags mutate the
//! already-committed current entry in place and never commit.

use std::path::PathBuf;

use glam::Vec2;

use crate::document::Document;
use crate::history::HistoryLog;
use crate::shape::Shape;
use crate::view::ViewTransform;

/// Hover/pick radius around a vertex, in screen units. Also the draw
/// radius of the vertex handles.
pub const VERTEX_RADIUS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    /// Held this frame.
    pub down: bool,
    /// Went down this frame.
    pub pressed: bool,
}

/// One frame's worth of sampled input, supplied by the gui layer in
/// raw screen coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub cursor: Vec2,
    /// Screen position of the viewport center (the world origin).
    pub view_center: Vec2,
    pub left: ButtonState,
    pub middle: ButtonState,
    pub right: ButtonState,
    pub wheel: f32,
    /// The UI layer wants the pointer (menu, dialog, widget). All
    /// gesture input is ignored while set; an active drag stays
    /// suspended and resumes drift-free thanks to absolute anchoring.
    pub ui_wants_input: bool,
}

impl FrameInput {
    pub fn button(&self, button: MouseButton) -> ButtonState {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }
}

/// What a drag writes to. Vertex targets carry a slot/vertex address
/// into the history log instead of a reference and are re-resolved
/// every frame; the state machine never commits while a drag is live,
/// so the slot stays current for the gesture's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    ViewOffset,
    Vertex { slot: usize, index: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    pub target: DragTarget,
    pub button: MouseButton,
    /// Cursor deltas are divided by this before they reach the target
    /// (the zoom scale for vertex drags, 1.0 for panning).
    pub scale: f32,
    /// Target value captured at drag start.
    pub original_value: Vec2,
    /// Cursor position captured at drag start. Deltas are computed
    /// against this anchor, never frame-to-frame, so wobble cannot
    /// accumulate.
    pub original_cursor: Vec2,
}

#[derive(Debug, Clone, Copy, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Per-frame result for the caller: which vertex to highlight.
#[derive(Debug, Clone, Copy)]
pub struct FrameStatus {
    pub hovered_vertex: Option<usize>,
}

/// The whole editing session: history, document binding, view and the
/// current gesture. Single-owner, single-threaded, stepped once per
/// rendered frame.
#[derive(Debug, Default)]
pub struct Session {
    pub history: HistoryLog,
    pub document: Document,
    pub view: ViewTransform,
    pub interaction: Interaction,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Dragging(_))
    }

    /// Drop any active gesture. Called before anything that rebuilds
    /// the history log, so no drag can outlive the slot it points at.
    pub fn end_interaction(&mut self) {
        self.interaction = Interaction::Idle;
    }

    /// Reset to an untitled empty document.
    pub fn new_document(&mut self) {
        self.end_interaction();
        self.history.reset();
        self.document = Document::new();
    }

    /// Replace the session contents with a shape loaded from `path`.
    pub fn open_shape(&mut self, shape: Shape, path: PathBuf) {
        self.end_interaction();
        self.history.reset_with(shape);
        self.document = Document::with_path(path);
    }

    /// Advance the state machine by one frame.
    pub fn step(&mut self, input: &FrameInput) -> FrameStatus {
        let hovered = self.history.current_shape().hit_test(
            &self.view,
            input.view_center,
            input.cursor,
            VERTEX_RADIUS,
        );
        let status = FrameStatus {
            hovered_vertex: hovered,
        };

        if input.ui_wants_input {
            return status;
        }

        // Wheel zoom is stateless and independent of the gesture
        if input.wheel != 0.0 {
            self.view.zoom_by(input.wheel);
        }

        match self.interaction {
            Interaction::Dragging(drag) => self.continue_drag(drag, input),
            Interaction::Idle => self.idle_input(hovered, input),
        }

        status
    }

    fn continue_drag(&mut self, drag: DragSession, input: &FrameInput) {
        if !input.button(drag.button).down {
            self.interaction = Interaction::Idle;
            return;
        }

        let mut delta = input.cursor - drag.original_cursor;
        delta.y = -delta.y;
        let value = drag.original_value + delta / drag.scale;
        match drag.target {
            DragTarget::ViewOffset => self.view.offset = value,
            DragTarget::Vertex { slot, index } => *self.history.vertex_mut(slot, index) = value,
        }
    }

    fn idle_input(&mut self, hovered: Option<usize>, input: &FrameInput) {
        if input.middle.pressed {
            self.begin_drag(DragTarget::ViewOffset, MouseButton::Middle, 1.0, self.view.offset, input);
        } else if input.left.pressed {
            if let Some(index) = hovered {
                let slot = self.history.current_slot();
                let value = self.history.current_shape().vertex(index);
                self.begin_drag(
                    DragTarget::Vertex { slot, index },
                    MouseButton::Left,
                    self.view.scale,
                    value,
                    input,
                );
            } else if !self.history.current_shape().is_full() {
                let point = self.view.screen_to_world(input.view_center, input.cursor);
                let inserted = self.history.commit().insert_near_edge(point);
                if let Ok(index) = inserted {
                    tracing::debug!(index, "inserted vertex");
                    let slot = self.history.current_slot();
                    self.begin_drag(
                        DragTarget::Vertex { slot, index },
                        MouseButton::Left,
                        self.view.scale,
                        point,
                        input,
                    );
                }
            }
            // At capacity with nothing hovered the click does nothing
        } else if input.right.pressed {
            if let Some(index) = hovered {
                self.history.commit().remove_vertex(index);
                tracing::debug!(index, "removed vertex");
            }
        }
    }

    fn begin_drag(
        &mut self,
        target: DragTarget,
        button: MouseButton,
        scale: f32,
        original_value: Vec2,
        input: &FrameInput,
    ) {
        self.interaction = Interaction::Dragging(DragSession {
            target,
            button,
            scale,
            original_value,
            original_cursor: input.cursor,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn left_press(cursor: Vec2) -> FrameInput {
        FrameInput {
            cursor,
            left: ButtonState {
                down: true,
                pressed: true,
            },
            ..FrameInput::default()
        }
    }

    fn left_hold(cursor: Vec2) -> FrameInput {
        FrameInput {
            cursor,
            left: ButtonState {
                down: true,
                pressed: false,
            },
            ..FrameInput::default()
        }
    }

    fn release() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn test_left_click_commits_and_inserts() {
        let mut session = Session::new();
        session.step(&left_press(vec2(10.0, 20.0)));

        assert_eq!(session.history.current_version(), 1);
        assert_eq!(session.history.current_shape().len(), 1);
        // Cursor below/right of center maps to +x, -y in world space
        assert_eq!(session.history.current_shape().vertex(0), vec2(10.0, -20.0));
        assert!(session.is_dragging());
    }

    #[test]
    fn test_drag_is_anchored_not_incremental() {
        let mut session = Session::new();
        session.step(&left_press(vec2(0.0, 0.0)));
        let original = session.history.current_shape().vertex(0);

        // Wander, then come back to the anchor
        session.step(&left_hold(vec2(35.0, -12.0)));
        session.step(&left_hold(vec2(-7.0, 80.0)));
        session.step(&left_hold(vec2(0.0, 0.0)));

        assert_eq!(session.history.current_shape().vertex(0), original);
    }

    #[test]
    fn test_drag_does_not_commit_per_frame() {
        let mut session = Session::new();
        session.step(&left_press(vec2(0.0, 0.0)));
        for i in 0..20 {
            session.step(&left_hold(vec2(i as f32, 0.0)));
        }
        assert_eq!(session.history.current_version(), 1);
    }

    #[test]
    fn test_release_returns_to_idle() {
        let mut session = Session::new();
        session.step(&left_press(vec2(0.0, 0.0)));
        assert!(session.is_dragging());
        session.step(&release());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_vertex_drag_divides_by_zoom() {
        let mut session = Session::new();
        session.step(&left_press(vec2(0.0, 0.0)));
        session.step(&release());

        session.view.scale = 2.0;
        // Grab the vertex where it now appears on screen (origin-centered
        // view, vertex at world (0,0) still maps to screen (0,0))
        session.step(&left_press(vec2(0.0, 0.0)));
        session.step(&left_hold(vec2(10.0, 0.0)));

        assert_eq!(session.history.current_shape().vertex(0), vec2(5.0, 0.0));
    }

    #[test]
    fn test_middle_drag_pans_with_inverted_y() {
        let mut session = Session::new();
        let input = FrameInput {
            cursor: vec2(0.0, 0.0),
            middle: ButtonState {
                down: true,
                pressed: true,
            },
            ..FrameInput::default()
        };
        session.step(&input);

        let held = FrameInput {
            cursor: vec2(30.0, 40.0),
            middle: ButtonState {
                down: true,
                pressed: false,
            },
            ..FrameInput::default()
        };
        session.step(&held);

        assert_eq!(session.view.offset, vec2(30.0, -40.0));
    }

    #[test]
    fn test_pan_ignores_zoom_scale() {
        let mut session = Session::new();
        session.view.scale = 4.0;
        session.step(&FrameInput {
            middle: ButtonState {
                down: true,
                pressed: true,
            },
            ..FrameInput::default()
        });
        session.step(&FrameInput {
            cursor: vec2(8.0, 0.0),
            middle: ButtonState {
                down: true,
                pressed: false,
            },
            ..FrameInput::default()
        });
        assert_eq!(session.view.offset, vec2(8.0, 0.0));
    }

    #[test]
    fn test_right_click_removes_hovered_vertex() {
        let mut session = Session::new();
        session.step(&left_press(vec2(0.0, 0.0)));
        session.step(&release());
        assert_eq!(session.history.current_shape().len(), 1);

        let input = FrameInput {
            cursor: vec2(0.0, 0.0),
            right: ButtonState {
                down: true,
                pressed: true,
            },
            ..FrameInput::default()
        };
        session.step(&input);

        assert_eq!(session.history.current_shape().len(), 0);
        assert_eq!(session.history.current_version(), 2);
        assert!(!session.is_dragging());

        // The removal committed first, so it can be undone
        assert!(session.history.undo());
        assert_eq!(session.history.current_shape().len(), 1);
    }

    #[test]
    fn test_right_click_on_empty_space_is_noop() {
        let mut session = Session::new();
        let input = FrameInput {
            cursor: vec2(50.0, 50.0),
            right: ButtonState {
                down: true,
                pressed: true,
            },
            ..FrameInput::default()
        };
        session.step(&input);
        assert_eq!(session.history.current_version(), 0);
    }

    #[test]
    fn test_click_at_capacity_is_silent_noop() {
        let mut session = Session::new();
        let full = Shape::from_points(
            (0..crate::shape::MAX_VERTICES)
                .map(|i| vec2(1000.0 + i as f32, 1000.0))
                .collect(),
        )
        .unwrap();
        session.history.reset_with(full);

        session.step(&left_press(vec2(0.0, 0.0)));
        assert_eq!(session.history.current_version(), 0);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_ui_focus_swallows_input() {
        let mut session = Session::new();
        let mut input = left_press(vec2(0.0, 0.0));
        input.ui_wants_input = true;
        input.wheel = 3.0;
        session.step(&input);

        assert_eq!(session.history.current_version(), 0);
        assert!(!session.is_dragging());
        assert_eq!(session.view.scale, 1.0);
    }

    #[test]
    fn test_wheel_adjusts_zoom_in_any_state() {
        let mut session = Session::new();
        session.step(&FrameInput {
            wheel: 0.5,
            ..FrameInput::default()
        });
        assert_eq!(session.view.scale, 1.5);

        // Also while dragging
        session.step(&left_press(vec2(0.0, 0.0)));
        session.step(&FrameInput {
            wheel: 0.5,
            ..left_hold(vec2(0.0, 0.0))
        });
        assert_eq!(session.view.scale, 2.0);
    }

    #[test]
    fn test_new_gestures_ignored_while_dragging() {
        let mut session = Session::new();
        session.step(&left_press(vec2(0.0, 0.0)));
        let version = session.history.current_version();

        // A middle press while the left drag is held must not start a
        // second gesture or commit anything
        let mut input = left_hold(vec2(5.0, 5.0));
        input.middle = ButtonState {
            down: true,
            pressed: true,
        };
        session.step(&input);

        assert_eq!(session.history.current_version(), version);
        match session.interaction {
            Interaction::Dragging(drag) => assert_eq!(drag.button, MouseButton::Left),
            Interaction::Idle => panic!("drag was dropped"),
        }
    }

    #[test]
    fn test_drag_suspends_under_ui_focus_without_drift() {
        let mut session = Session::new();
        session.step(&left_press(vec2(0.0, 0.0)));
        let original = session.history.current_shape().vertex(0);

        let mut captured = left_hold(vec2(500.0, 500.0));
        captured.ui_wants_input = true;
        session.step(&captured);
        // Suspended: nothing moved
        assert_eq!(session.history.current_shape().vertex(0), original);
        assert!(session.is_dragging());

        // Resume back at the anchor
        session.step(&left_hold(vec2(0.0, 0.0)));
        assert_eq!(session.history.current_shape().vertex(0), original);
    }

    #[test]
    fn test_left_press_on_vertex_drags_without_committing() {
        let mut session = Session::new();
        session.step(&left_press(vec2(0.0, 0.0)));
        session.step(&release());
        let version = session.history.current_version();

        session.step(&left_press(vec2(0.0, 0.0)));
        assert!(session.is_dragging());
        assert_eq!(session.history.current_version(), version);
        assert_eq!(session.history.current_shape().len(), 1);
    }
}
