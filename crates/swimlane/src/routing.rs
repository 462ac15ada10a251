//! Connector routing.
//!
//! Every flow is drawn as either a straight two-point connector or a single
//! elbow with three points. The choice depends only on the relative direction
//! of the two shapes' connection midpoints, and the points themselves come
//! from the side anchor table of each shape's [`Category`]. There is no
//! obstacle avoidance.
//!
//! | heading | exit side | entry side | turn |
//! |---|---|---|---|
//! | up / down | top / bottom | bottom / top | - |
//! | right / left | right / left | left / right | - |
//! | up-right, up-left | top | left, right | `(exit.x, entry.y)` |
//! | down-right, down-left | bottom | left, right | `(exit.x, entry.y)` |
//!
//! A task feeding a gateway to its right leaves from the task's right side
//! and enters the gateway from below (up-right) or above (down-right),
//! turning at `(entry.x, exit.y)`.

use std::cmp::Ordering;

use swimlane_core::{
    category::{Category, Side},
    geometry::Point,
    model::Component,
};

/// Direction from a start midpoint to a target midpoint.
///
/// Screen coordinates: up is a smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Heading {
    pub const ALL: [Heading; 8] = [
        Heading::Up,
        Heading::Down,
        Heading::Left,
        Heading::Right,
        Heading::UpLeft,
        Heading::UpRight,
        Heading::DownLeft,
        Heading::DownRight,
    ];

    /// Classifies a midpoint delta. Returns `None` for a zero delta.
    pub fn classify(delta: Point) -> Option<Self> {
        let heading = match (delta.x().cmp(&0), delta.y().cmp(&0)) {
            (Ordering::Equal, Ordering::Equal) => return None,
            (Ordering::Equal, Ordering::Less) => Self::Up,
            (Ordering::Equal, Ordering::Greater) => Self::Down,
            (Ordering::Greater, Ordering::Equal) => Self::Right,
            (Ordering::Less, Ordering::Equal) => Self::Left,
            (Ordering::Greater, Ordering::Less) => Self::UpRight,
            (Ordering::Less, Ordering::Less) => Self::UpLeft,
            (Ordering::Greater, Ordering::Greater) => Self::DownRight,
            (Ordering::Less, Ordering::Greater) => Self::DownLeft,
        };
        Some(heading)
    }

    /// Returns true if both axes change.
    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::UpLeft | Self::UpRight | Self::DownLeft | Self::DownRight
        )
    }

    /// Exit side of the start shape and entry side of the target shape.
    fn sides(self) -> (Side, Side) {
        match self {
            Self::Up => (Side::Top, Side::Bottom),
            Self::Down => (Side::Bottom, Side::Top),
            Self::Right => (Side::Right, Side::Left),
            Self::Left => (Side::Left, Side::Right),
            Self::UpRight => (Side::Top, Side::Left),
            Self::UpLeft => (Side::Top, Side::Right),
            Self::DownRight => (Side::Bottom, Side::Left),
            Self::DownLeft => (Side::Bottom, Side::Right),
        }
    }
}

/// A shape a connector attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    category: Category,
    position: Point,
}

impl Endpoint {
    pub fn new(category: Category, position: Point) -> Self {
        Self { category, position }
    }

    /// Connection midpoint in diagram coordinates.
    pub fn midpoint(self) -> Point {
        self.position.add_point(self.category.center())
    }

    /// Midpoint of one edge in diagram coordinates.
    pub fn anchor(self, side: Side) -> Point {
        self.position.add_point(self.category.side_anchor(side))
    }
}

impl From<&Component> for Endpoint {
    fn from(component: &Component) -> Self {
        Self::new(component.category(), component.position())
    }
}

/// Waypoints of a routed connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Straight { exit: Point, entry: Point },
    Elbow { exit: Point, turn: Point, entry: Point },
}

impl Route {
    /// The waypoints from start to target.
    pub fn waypoints(&self) -> Vec<Point> {
        match *self {
            Self::Straight { exit, entry } => vec![exit, entry],
            Self::Elbow { exit, turn, entry } => vec![exit, turn, entry],
        }
    }
}

/// Routes a connector from `start` to `target`.
///
/// Returns `None` when both midpoints coincide, as there is no direction to
/// route along.
///
/// # Examples
///
/// ```
/// # use swimlane_core::{category::Category, geometry::Point};
/// # use swimlane::routing::{Endpoint, Route, route};
/// let start = Endpoint::new(Category::Event, Point::new(0, 0));
/// let end = Endpoint::new(Category::Event, Point::new(300, 0));
///
/// assert_eq!(
///     route(start, end),
///     Some(Route::Straight { exit: Point::new(40, 40), entry: Point::new(300, 40) })
/// );
/// ```
pub fn route(start: Endpoint, target: Endpoint) -> Option<Route> {
    let heading = Heading::classify(target.midpoint().sub_point(start.midpoint()))?;

    if start.category == Category::Task
        && target.category == Category::Gateway
        && matches!(heading, Heading::UpRight | Heading::DownRight)
    {
        let exit = start.anchor(Side::Right);
        let entry_side = if heading == Heading::UpRight {
            Side::Bottom
        } else {
            Side::Top
        };
        let entry = target.anchor(entry_side);
        return Some(Route::Elbow {
            exit,
            turn: Point::new(entry.x(), exit.y()),
            entry,
        });
    }

    let (exit_side, entry_side) = heading.sides();
    let exit = start.anchor(exit_side);
    let entry = target.anchor(entry_side);

    let route = if heading.is_diagonal() {
        Route::Elbow {
            exit,
            turn: exit.with_y(entry.y()),
            entry,
        }
    } else {
        Route::Straight { exit, entry }
    };
    Some(route)
}
