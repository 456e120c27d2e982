//! Swipe recognition.
//!
//! A swipe is a press, some movement and a release. Only the press point and
//! the last movement point matter: the axis with the larger displacement wins,
//! and the swipe only counts once that displacement exceeds the minimum
//! distance. A press and release with no movement in between is a tap and
//! produces nothing.
//!
//! Terminals report mouse positions in character cells, so
//! [`SwipeTracker::handle_mouse_event`] scales cells into swipe units first
//! (a row is about twice as tall as a column is wide).

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{Direction, DEFAULT_SWIPE_MIN_DISTANCE};

/// Swipe units per terminal column.
pub const SWIPE_UNITS_PER_COLUMN: f32 = 10.0;

/// Swipe units per terminal row.
pub const SWIPE_UNITS_PER_ROW: f32 = 20.0;

/// A position in swipe units (device-independent pixels for touch input).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position of a terminal cell, in swipe units
    pub fn from_cell(column: u16, row: u16) -> Self {
        Self {
            x: column as f32 * SWIPE_UNITS_PER_COLUMN,
            y: row as f32 * SWIPE_UNITS_PER_ROW,
        }
    }
}

/// Direction of a finished swipe, if it was long enough.
///
/// # Examples
///
/// ```
/// use space_2048_input::gesture::{swipe_direction, Point};
/// use space_2048_input::types::Direction;
///
/// let start = Point::new(200.0, 100.0);
/// assert_eq!(swipe_direction(start, Point::new(120.0, 110.0), 50.0), Some(Direction::Left));
/// assert_eq!(swipe_direction(start, Point::new(230.0, 110.0), 50.0), None);
/// ```
pub fn swipe_direction(start: Point, end: Point, min_distance: f32) -> Option<Direction> {
    let dx = start.x - end.x;
    let dy = start.y - end.y;

    if dx.abs() > dy.abs() {
        if dx > min_distance {
            Some(Direction::Left)
        } else if dx < -min_distance {
            Some(Direction::Right)
        } else {
            None
        }
    } else if dy > min_distance {
        Some(Direction::Up)
    } else if dy < -min_distance {
        Some(Direction::Down)
    } else {
        None
    }
}

/// Press / move / release state machine producing one direction per swipe.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start: Option<Point>,
    last: Option<Point>,
    min_distance: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_MIN_DISTANCE)
    }
}

impl SwipeTracker {
    pub fn new(min_distance: f32) -> Self {
        Self {
            start: None,
            last: None,
            min_distance,
        }
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    /// True between a press and its release
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    pub fn touch_start(&mut self, at: Point) {
        self.start = Some(at);
        self.last = None;
    }

    pub fn touch_move(&mut self, at: Point) {
        self.last = Some(at);
    }

    /// Finish the gesture. Returns a direction only for a long enough swipe.
    pub fn touch_end(&mut self) -> Option<Direction> {
        let start = self.start.take();
        let last = self.last.take();
        match (start, last) {
            (Some(start), Some(last)) => swipe_direction(start, last, self.min_distance),
            _ => None,
        }
    }

    /// Feed a terminal mouse event (left button drags act as swipes).
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Direction> {
        let at = Point::from_cell(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.touch_start(at);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.is_tracking() {
                    self.touch_move(at);
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                // The release point is only a movement if the pointer was dragged.
                if self.last.is_some() {
                    self.touch_move(at);
                }
                self.touch_end()
            }
            _ => None,
        }
    }
}
