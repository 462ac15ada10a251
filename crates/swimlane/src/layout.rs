//! Shape geometry resolution.
//!
//! Computes the diagram bounds of every component, pool and lane. Component
//! boxes come straight from the category tables; pool and lane boxes are
//! derived from the configured layout settings and any origin or height the
//! model declares.
//!
//! Lane heights are taken from the model or split evenly from the pool
//! height. They are never recomputed from the components a lane contains.

use log::trace;

use swimlane_core::{
    geometry::{Bounds, Point, Size},
    model::Component,
};

use crate::{
    config::LayoutConfig,
    structure::{PoolView, Structure},
};

/// Bounding box of a component shape.
///
/// # Examples
///
/// ```
/// # use swimlane_core::{geometry::Point, model::Component};
/// # use swimlane::layout::component_bounds;
/// let event = Component::new("Start_1", "startEvent", Point::new(0, 0));
/// let bounds = component_bounds(&event);
/// assert_eq!((bounds.x(), bounds.y()), (0, 20));
/// assert_eq!((bounds.width(), bounds.height()), (40, 40));
/// ```
pub fn component_bounds(component: &Component) -> Bounds {
    let category = component.category();
    let top_left = component
        .position()
        .add_point(Point::new(0, category.icon_offset()));
    top_left.to_bounds(category.box_size())
}

/// Resolved bounds of a lane in a multi-lane pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneLayout<'a> {
    pub id: &'a str,
    pub bounds: Bounds,
}

/// Resolved bounds of a pool and, for multi-lane pools, its lanes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolLayout<'a> {
    pub id: &'a str,
    pub bounds: Bounds,
    pub lanes: Vec<LaneLayout<'a>>,
}

/// Resolves pool and lane boxes.
#[derive(Debug, Clone, Copy)]
pub struct ShapeResolver<'c> {
    config: &'c LayoutConfig,
}

impl<'c> ShapeResolver<'c> {
    pub fn new(config: &'c LayoutConfig) -> Self {
        Self { config }
    }

    /// Lays out every pool of `structure`, stacking pools without an
    /// explicit origin below the previous one.
    pub fn resolve<'a>(&self, structure: &Structure<'a>) -> Vec<PoolLayout<'a>> {
        let mut next_top = 0;
        structure
            .pools()
            .iter()
            .map(|view| {
                let layout = self.resolve_pool(view, next_top);
                next_top = layout.bounds.bottom();
                layout
            })
            .collect()
    }

    /// Width of a pool: its rightmost component position plus the margin.
    pub fn pool_width(&self, view: &PoolView<'_>) -> i32 {
        let max_x = view
            .components()
            .map(|component| component.position().x())
            .fold(0, i32::max);
        max_x.saturating_add(self.config.pool_margin())
    }

    fn resolve_pool<'a>(&self, view: &PoolView<'a>, default_top: i32) -> PoolLayout<'a> {
        let pool = view.pool;
        let origin = pool.origin().unwrap_or(Point::new(0, default_top));
        let width = self.pool_width(view);
        let height = pool.height().unwrap_or(self.config.pool_height());
        let bounds = origin.to_bounds(Size::new(width, height));

        let lanes = if pool.has_lane_set() {
            let inset = self.config.lane_header_inset();
            let default_height = height / pool.lanes().len() as i32;
            let mut next_top = origin.y();

            pool.lanes()
                .iter()
                .map(|lane| {
                    let lane_origin = lane.origin().unwrap_or(origin.with_y(next_top));
                    let lane_height = lane.height().unwrap_or(default_height);
                    next_top = lane_origin.y().saturating_add(lane_height);

                    LaneLayout {
                        id: lane.id(),
                        bounds: lane_origin
                            .add_point(Point::new(inset, 0))
                            .to_bounds(Size::new(width.saturating_sub(inset), lane_height)),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        trace!(pool = pool.id(), bounds:?; "Resolved pool geometry");

        PoolLayout {
            id: pool.id(),
            bounds,
            lanes,
        }
    }
}
