//! Pointer-driven repositioning for floating panels.
//!
//! Two states: idle and dragging. A press over the drag handle records the
//! offset between pointer and panel origin; every motion report while the
//! drag is live re-derives the origin from that fixed offset. Release ends
//! the drag wherever the pointer is, including outside the panel. Positions
//! are signed on purpose: panels may be dragged fully off-screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    Dragging { offset: Point },
}

#[derive(Debug)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Begin a drag: the offset between pointer and panel origin stays
    /// constant for the drag's duration.
    pub fn press(&mut self, pointer: Point, position: Point) {
        self.state = DragState::Dragging {
            offset: Point {
                x: pointer.x - position.x,
                y: pointer.y - position.y,
            },
        };
    }

    /// Report pointer motion. Returns the new panel origin while dragging,
    /// `None` when idle (motion after release must not move anything).
    pub fn motion(&self, pointer: Point) -> Option<Point> {
        match self.state {
            DragState::Dragging { offset } => Some(Point {
                x: pointer.x - offset.x,
                y: pointer.y - offset.y,
            }),
            DragState::Idle => None,
        }
    }

    /// End the drag. Safe to call when idle.
    pub fn release(&mut self) {
        self.state = DragState::Idle;
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_records_pointer_to_origin_offset() {
        let mut drag = DragController::new();
        drag.press(Point { x: 12, y: 30 }, Point { x: 200, y: 150 });
        assert!(drag.is_dragging());
        // offset is (-188, -120); a move to (50, 60) lands at (238, 180)
        assert_eq!(
            drag.motion(Point { x: 50, y: 60 }),
            Some(Point { x: 238, y: 180 })
        );
    }

    #[test]
    fn release_freezes_position() {
        let mut drag = DragController::new();
        drag.press(Point { x: 5, y: 5 }, Point { x: 0, y: 0 });
        assert_eq!(
            drag.motion(Point { x: 9, y: 7 }),
            Some(Point { x: 4, y: 2 })
        );
        drag.release();
        assert!(!drag.is_dragging());
        assert_eq!(drag.motion(Point { x: 90, y: 70 }), None);
    }

    #[test]
    fn negative_positions_are_representable() {
        let mut drag = DragController::new();
        drag.press(Point { x: 2, y: 1 }, Point { x: 0, y: 0 });
        assert_eq!(
            drag.motion(Point { x: 0, y: 0 }),
            Some(Point { x: -2, y: -1 })
        );
    }

    #[test]
    fn release_when_idle_is_a_no_op() {
        let mut drag = DragController::new();
        drag.release();
        assert!(!drag.is_dragging());
    }
}
