//! Gesture executor: swipes, taps and long presses.
//!
//! Swipe coordinates are a pure function of viewport and direction
//! ([`swipe_plan`]); only [`MobileGestures`] touches the driver.

use crate::driver::{MobileDriver, Viewport};
use crate::logging::LogSink;
use crate::result::{BankProbeError, ProbeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const COMPONENT: &str = "MobileGestures";

/// Fraction of the axis where a swipe starts
pub const SWIPE_START_FRACTION: f64 = 0.8;

/// Fraction of the axis where a swipe ends
pub const SWIPE_END_FRACTION: f64 = 0.2;

/// Default swipe duration
pub const DEFAULT_SWIPE_DURATION: Duration = Duration::from_millis(800);

/// Default long-press duration
pub const DEFAULT_LONG_PRESS_DURATION: Duration = Duration::from_millis(2000);

/// Direction the finger travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Bottom to top (scrolls content down)
    Up,
    /// Top to bottom
    Down,
    /// Right to left
    Left,
    /// Left to right
    Right,
}

impl Direction {
    /// All directions
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = BankProbeError;

    fn from_str(s: &str) -> ProbeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(BankProbeError::configuration(format!(
                "unknown swipe direction '{other}'"
            ))),
        }
    }
}

/// A screen coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Start and end coordinates of a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipePlan {
    /// Swipe direction
    pub direction: Direction,
    /// Press point
    pub start: Point,
    /// Release point
    pub end: Point,
}

fn scale(extent: u32, fraction: f64) -> i32 {
    (f64::from(extent) * fraction).round() as i32
}

/// Compute swipe coordinates for `direction` on `viewport`.
///
/// Vertical swipes run between 80% and 20% of the height at the horizontal
/// centre; horizontal swipes do the same on the width at the vertical centre.
#[must_use]
pub fn swipe_plan(direction: Direction, viewport: Viewport) -> SwipePlan {
    let center_x = scale(viewport.width, 0.5);
    let center_y = scale(viewport.height, 0.5);
    let near_y = scale(viewport.height, SWIPE_START_FRACTION);
    let far_y = scale(viewport.height, SWIPE_END_FRACTION);
    let near_x = scale(viewport.width, SWIPE_START_FRACTION);
    let far_x = scale(viewport.width, SWIPE_END_FRACTION);

    let (start, end) = match direction {
        Direction::Up => (Point::new(center_x, near_y), Point::new(center_x, far_y)),
        Direction::Down => (Point::new(center_x, far_y), Point::new(center_x, near_y)),
        Direction::Left => (Point::new(near_x, center_y), Point::new(far_x, center_y)),
        Direction::Right => (Point::new(far_x, center_y), Point::new(near_x, center_y)),
    };

    SwipePlan {
        direction,
        start,
        end,
    }
}

/// One step of a single-finger pointer sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerAction {
    /// Move the pointer
    PointerMove {
        /// Target x
        x: i32,
        /// Target y
        y: i32,
        /// Move duration in milliseconds
        duration: u64,
    },
    /// Press
    PointerDown {
        /// Mouse button (0 for touch)
        button: u8,
    },
    /// Release
    PointerUp {
        /// Mouse button (0 for touch)
        button: u8,
    },
    /// Hold still
    Pause {
        /// Pause duration in milliseconds
        duration: u64,
    },
}

/// A press/move/release sequence for one touch pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureSequence {
    /// Short name for logs
    pub name: &'static str,
    /// Steps in order
    pub actions: Vec<PointerAction>,
}

impl GestureSequence {
    /// Press at the start, hold for `duration`, move to the end, release
    #[must_use]
    pub fn swipe(plan: &SwipePlan, duration: Duration) -> Self {
        Self {
            name: "swipe",
            actions: vec![
                PointerAction::PointerMove {
                    x: plan.start.x,
                    y: plan.start.y,
                    duration: 0,
                },
                PointerAction::PointerDown { button: 0 },
                PointerAction::Pause {
                    duration: duration.as_millis() as u64,
                },
                PointerAction::PointerMove {
                    x: plan.end.x,
                    y: plan.end.y,
                    duration: 0,
                },
                PointerAction::PointerUp { button: 0 },
            ],
        }
    }

    /// Press and release at a point
    #[must_use]
    pub fn tap(point: Point) -> Self {
        Self {
            name: "tap",
            actions: vec![
                PointerAction::PointerMove {
                    x: point.x,
                    y: point.y,
                    duration: 0,
                },
                PointerAction::PointerDown { button: 0 },
                PointerAction::PointerUp { button: 0 },
            ],
        }
    }

    /// Press, hold for `duration`, release
    #[must_use]
    pub fn long_press(point: Point, duration: Duration) -> Self {
        Self {
            name: "long_press",
            actions: vec![
                PointerAction::PointerMove {
                    x: point.x,
                    y: point.y,
                    duration: 0,
                },
                PointerAction::PointerDown { button: 0 },
                PointerAction::Pause {
                    duration: duration.as_millis() as u64,
                },
                PointerAction::PointerUp { button: 0 },
            ],
        }
    }
}

/// Issues gestures through the driver, logging each one.
#[derive(Debug, Clone, Copy)]
pub struct MobileGestures<'a> {
    driver: &'a dyn MobileDriver,
    log: &'a dyn LogSink,
}

impl<'a> MobileGestures<'a> {
    /// Bind to a driver and sink
    #[must_use]
    pub const fn new(driver: &'a dyn MobileDriver, log: &'a dyn LogSink) -> Self {
        Self { driver, log }
    }

    /// Swipe on a known viewport
    pub fn swipe(&self, direction: Direction, viewport: Viewport, duration: Duration) -> ProbeResult<()> {
        let plan = swipe_plan(direction, viewport);
        self.log.info(
            COMPONENT,
            &format!(
                "Performing swipe {direction} gesture {} -> {} over {}ms",
                plan.start,
                plan.end,
                duration.as_millis()
            ),
        );
        self.perform(&GestureSequence::swipe(&plan, duration))
    }

    /// Swipe using the current window size
    pub fn swipe_current(&self, direction: Direction, duration: Duration) -> ProbeResult<()> {
        let viewport = self.driver.window_size().map_err(|e| {
            self.log
                .error(COMPONENT, &format!("Failed to read window size: {e}"));
            BankProbeError::transport("window size query", e)
        })?;
        self.swipe(direction, viewport, duration)
    }

    /// Swipe up with the default duration
    pub fn swipe_up(&self) -> ProbeResult<()> {
        self.swipe_current(Direction::Up, DEFAULT_SWIPE_DURATION)
    }

    /// Swipe down with the default duration
    pub fn swipe_down(&self) -> ProbeResult<()> {
        self.swipe_current(Direction::Down, DEFAULT_SWIPE_DURATION)
    }

    /// Tap at coordinates
    pub fn tap(&self, x: i32, y: i32) -> ProbeResult<()> {
        self.log
            .info(COMPONENT, &format!("Tapping at coordinates ({x}, {y})"));
        self.perform(&GestureSequence::tap(Point::new(x, y)))
    }

    /// Long press at coordinates
    pub fn long_press(&self, x: i32, y: i32, duration: Duration) -> ProbeResult<()> {
        self.log.info(
            COMPONENT,
            &format!(
                "Long pressing at ({x}, {y}) for {}ms",
                duration.as_millis()
            ),
        );
        self.perform(&GestureSequence::long_press(Point::new(x, y), duration))
    }

    fn perform(&self, gesture: &GestureSequence) -> ProbeResult<()> {
        self.driver.perform_gesture(gesture).map_err(|e| {
            self.log
                .error(COMPONENT, &format!("Gesture {} failed: {e}", gesture.name));
            BankProbeError::transport(format!("{} gesture", gesture.name), e)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::DriverError;
    use crate::logging::MemorySink;
    use crate::mock::{DriverCall, MockDriver};
    use proptest::prelude::*;

    mod plan_tests {
        use super::*;

        #[test]
        fn test_swipe_up_reference_viewport() {
            let plan = swipe_plan(Direction::Up, Viewport::new(1000, 2000));
            assert_eq!(plan.start, Point::new(500, 1600));
            assert_eq!(plan.end, Point::new(500, 400));
        }

        #[test]
        fn test_swipe_down_is_reverse_of_up() {
            let vp = Viewport::new(1000, 2000);
            let up = swipe_plan(Direction::Up, vp);
            let down = swipe_plan(Direction::Down, vp);
            assert_eq!(down.start, up.end);
            assert_eq!(down.end, up.start);
        }

        #[test]
        fn test_horizontal_swipes() {
            let vp = Viewport::new(1000, 2000);
            let left = swipe_plan(Direction::Left, vp);
            assert_eq!(left.start, Point::new(800, 1000));
            assert_eq!(left.end, Point::new(200, 1000));
            let right = swipe_plan(Direction::Right, vp);
            assert_eq!(right.start, Point::new(200, 1000));
            assert_eq!(right.end, Point::new(800, 1000));
        }

        #[test]
        fn test_odd_viewport_rounds() {
            let plan = swipe_plan(Direction::Up, Viewport::new(375, 667));
            assert_eq!(plan.start, Point::new(188, 534));
            assert_eq!(plan.end, Point::new(188, 133));
        }

        #[test]
        fn test_direction_parse() {
            assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
            assert!("sideways".parse::<Direction>().is_err());
        }
    }

    mod sequence_tests {
        use super::*;

        #[test]
        fn test_swipe_sequence_shape() {
            let plan = swipe_plan(Direction::Up, Viewport::new(1000, 2000));
            let seq = GestureSequence::swipe(&plan, Duration::from_millis(800));
            assert_eq!(seq.actions.len(), 5);
            assert_eq!(
                seq.actions[0],
                PointerAction::PointerMove {
                    x: 500,
                    y: 1600,
                    duration: 0
                }
            );
            assert_eq!(seq.actions[2], PointerAction::Pause { duration: 800 });
            assert_eq!(seq.actions[4], PointerAction::PointerUp { button: 0 });
        }

        #[test]
        fn test_pointer_action_serializes_w3c_shape() {
            let json = serde_json::to_value(PointerAction::PointerMove {
                x: 1,
                y: 2,
                duration: 0,
            })
            .unwrap();
            assert_eq!(json["type"], "pointerMove");
            assert_eq!(json["x"], 1);
            let pause = serde_json::to_value(PointerAction::Pause { duration: 5 }).unwrap();
            assert_eq!(pause["type"], "pause");
        }

        #[test]
        fn test_long_press_holds() {
            let seq = GestureSequence::long_press(Point::new(10, 20), DEFAULT_LONG_PRESS_DURATION);
            assert!(seq
                .actions
                .contains(&PointerAction::Pause { duration: 2000 }));
        }
    }

    mod executor_tests {
        use super::*;

        #[test]
        fn test_swipe_up_reads_viewport_and_performs() {
            let driver = MockDriver::new().with_window_size(Viewport::new(1000, 2000));
            let sink = MemorySink::new();
            let gestures = MobileGestures::new(&driver, &sink);

            gestures.swipe_up().unwrap();

            let gestures_sent = driver.gestures();
            assert_eq!(gestures_sent.len(), 1);
            assert_eq!(
                gestures_sent[0].actions[0],
                PointerAction::PointerMove {
                    x: 500,
                    y: 1600,
                    duration: 0
                }
            );
            assert!(driver.calls().contains(&DriverCall::WindowSize));
            assert_eq!(sink.matching("Performing swipe up").len(), 1);
        }

        #[test]
        fn test_tap_and_long_press_logged() {
            let driver = MockDriver::new();
            let sink = MemorySink::new();
            let gestures = MobileGestures::new(&driver, &sink);

            gestures.tap(5, 6).unwrap();
            gestures
                .long_press(7, 8, Duration::from_millis(1500))
                .unwrap();

            assert_eq!(driver.gestures().len(), 2);
            assert_eq!(sink.matching("Tapping at coordinates (5, 6)").len(), 1);
            assert_eq!(sink.matching("for 1500ms").len(), 1);
        }

        #[test]
        fn test_gesture_failure_is_transport_error() {
            let driver = MockDriver::new();
            driver.fail_gestures(DriverError::Transport("socket closed".to_string()));
            let sink = MemorySink::new();
            let gestures = MobileGestures::new(&driver, &sink);

            let err = gestures.tap(1, 1).unwrap_err();
            assert!(matches!(err, BankProbeError::Transport { .. }));
            assert_eq!(sink.at_level(tracing::Level::ERROR).len(), 1);
        }
    }

    proptest! {
        #[test]
        fn prop_swipe_plan_is_pure(
            w in 1u32..5000,
            h in 1u32..5000,
            dir_idx in 0usize..4,
        ) {
            let dir = Direction::ALL[dir_idx];
            let vp = Viewport::new(w, h);
            prop_assert_eq!(swipe_plan(dir, vp), swipe_plan(dir, vp));
        }

        #[test]
        fn prop_swipe_stays_on_screen(
            w in 1u32..5000,
            h in 1u32..5000,
            dir_idx in 0usize..4,
        ) {
            let plan = swipe_plan(Direction::ALL[dir_idx], Viewport::new(w, h));
            for p in [plan.start, plan.end] {
                prop_assert!(p.x >= 0 && p.x <= w as i32);
                prop_assert!(p.y >= 0 && p.y <= h as i32);
            }
        }
    }
}
