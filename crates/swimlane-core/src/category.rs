//! Shape categories and their fixed geometry tables.
//!
//! Every component in a structural model is tagged with a [`Category`] when it
//! is deserialized. All geometry downstream is a table lookup on that tag:
//!
//! - [`Category::box_size`] and [`Category::icon_offset`] give the shape's
//!   bounding box relative to its grid position.
//! - [`Category::center`] gives the connection midpoint used to classify the
//!   direction between two shapes.
//! - [`Category::side_anchor`] gives the point on each edge where a connector
//!   leaves or enters the shape.
//!
//! All offsets are relative to the component's stored grid position, not to
//! its bounding box. Every category is laid out on an 80 unit row, so the
//! vertical center of every category sits at `y + 40`.

use std::fmt;

use crate::geometry::{Point, Size};

/// Shape family of a process component.
///
/// # Examples
///
/// ```
/// # use swimlane_core::category::Category;
/// assert_eq!(Category::from_element_type("userTask"), Category::Task);
/// assert_eq!(Category::from_element_type("messageStartEvent"), Category::Event);
/// assert_eq!(Category::from_element_type("exclusiveGateway"), Category::Gateway);
/// assert_eq!(Category::from_element_type("dataObjectReference"), Category::Other);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    Event,
    Task,
    Gateway,
    #[default]
    Other,
}

impl Category {
    /// Every category, in table order.
    pub const ALL: [Category; 4] = [
        Category::Event,
        Category::Task,
        Category::Gateway,
        Category::Other,
    ];

    /// Classifies a BPMN element type name.
    ///
    /// Matching is case-insensitive on the keywords `event`, `task` and
    /// `gateway`, checked in that order. Anything else is [`Category::Other`].
    pub fn from_element_type(element_type: &str) -> Self {
        let lowered = element_type.to_ascii_lowercase();
        if lowered.contains("event") {
            Self::Event
        } else if lowered.contains("task") {
            Self::Task
        } else if lowered.contains("gateway") {
            Self::Gateway
        } else {
            Self::Other
        }
    }

    /// Size of the shape's bounding box.
    pub fn box_size(self) -> Size {
        match self {
            Self::Event => Size::new(40, 40),
            Self::Task => Size::new(100, 80),
            Self::Gateway => Size::new(50, 50),
            Self::Other => Size::new(80, 80),
        }
    }

    /// Vertical offset of the bounding box from the grid position.
    ///
    /// Centers the shape against the 80 unit task row.
    pub fn icon_offset(self) -> i32 {
        match self {
            Self::Event => 20,
            Self::Task => 0,
            Self::Gateway => 15,
            Self::Other => 0,
        }
    }

    /// Connection midpoint relative to the grid position.
    pub fn center(self) -> Point {
        match self {
            Self::Event => Point::new(20, 40),
            Self::Task => Point::new(50, 40),
            Self::Gateway => Point::new(25, 40),
            Self::Other => Point::new(40, 40),
        }
    }

    /// Midpoint of the given edge relative to the grid position.
    pub fn side_anchor(self, side: Side) -> Point {
        match (self, side) {
            (Self::Event, Side::Top) => Point::new(20, 20),
            (Self::Event, Side::Bottom) => Point::new(20, 60),
            (Self::Event, Side::Left) => Point::new(0, 40),
            (Self::Event, Side::Right) => Point::new(40, 40),

            (Self::Task, Side::Top) => Point::new(50, 0),
            (Self::Task, Side::Bottom) => Point::new(50, 80),
            (Self::Task, Side::Left) => Point::new(0, 40),
            (Self::Task, Side::Right) => Point::new(100, 40),

            (Self::Gateway, Side::Top) => Point::new(25, 15),
            (Self::Gateway, Side::Bottom) => Point::new(25, 65),
            (Self::Gateway, Side::Left) => Point::new(0, 40),
            (Self::Gateway, Side::Right) => Point::new(50, 40),

            (Self::Other, Side::Top) => Point::new(40, 0),
            (Self::Other, Side::Bottom) => Point::new(40, 80),
            (Self::Other, Side::Left) => Point::new(0, 40),
            (Self::Other, Side::Right) => Point::new(80, 40),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Event => "event",
            Self::Task => "task",
            Self::Gateway => "gateway",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// An edge of a shape's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Every side.
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// The side facing this one on a shape across the connector.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_element_type_is_case_insensitive() {
        assert_eq!(Category::from_element_type("StartEvent"), Category::Event);
        assert_eq!(Category::from_element_type("SERVICETASK"), Category::Task);
        assert_eq!(
            Category::from_element_type("parallelGateway"),
            Category::Gateway
        );
    }

    #[test]
    fn test_from_element_type_prefers_event() {
        // Event-based gateways carry both keywords.
        assert_eq!(
            Category::from_element_type("eventBasedGateway"),
            Category::Event
        );
    }

    #[test]
    fn test_from_element_type_falls_back_to_other() {
        assert_eq!(Category::from_element_type(""), Category::Other);
        assert_eq!(Category::from_element_type("subProcess"), Category::Other);
    }

    #[test]
    fn test_box_table() {
        assert_eq!(Category::Event.box_size(), Size::new(40, 40));
        assert_eq!(Category::Task.box_size(), Size::new(100, 80));
        assert_eq!(Category::Gateway.box_size(), Size::new(50, 50));
        assert_eq!(Category::Other.box_size(), Size::new(80, 80));
        assert_eq!(Category::Event.icon_offset(), 20);
        assert_eq!(Category::Gateway.icon_offset(), 15);
    }

    #[test]
    fn test_center_sits_on_row_midline() {
        for category in Category::ALL {
            let size = category.box_size();
            let center = category.center();
            assert_eq!(center.x(), size.width() / 2, "{category}");
            assert_eq!(center.y(), category.icon_offset() + size.height() / 2);
        }
    }

    #[test]
    fn test_side_anchors_lie_on_box_edges() {
        for category in Category::ALL {
            let size = category.box_size();
            let top = category.icon_offset();
            let bottom = top + size.height();
            let center = category.center();

            assert_eq!(category.side_anchor(Side::Top), center.with_y(top));
            assert_eq!(category.side_anchor(Side::Bottom), center.with_y(bottom));
            assert_eq!(category.side_anchor(Side::Left), center.with_x(0));
            assert_eq!(
                category.side_anchor(Side::Right),
                center.with_x(size.width())
            );
        }
    }

    #[test]
    fn test_opposite_side_roundtrip() {
        for side in Side::ALL {
            assert_ne!(side.opposite(), side);
            assert_eq!(side.opposite().opposite(), side);
        }
    }
}
