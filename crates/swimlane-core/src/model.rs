//! Structural process model.
//!
//! This is the in-memory form of the JSON document a generative assistant
//! produces: pools containing lanes, lanes containing components and flows,
//! components placed on a raw integer grid. The model carries no behavior
//! beyond lookups; compilation never mutates it.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "Pools": [{
//!     "ID": "Pool_1", "Name": "Customer",
//!     "Lanes": [{
//!       "ID": "Lane_1", "Name": "Front desk",
//!       "Components": [
//!         { "Type": "startEvent", "ID": "Start_1", "Name": "Start",
//!           "Incoming": [], "Outgoing": ["Flow_1"], "x": 0, "y": 0 }
//!       ],
//!       "Flows": [
//!         { "ID": "Flow_1", "Type": "sequenceFlow", "Descriptor": "",
//!           "Start": "Start_1", "Target": "End_1" }
//!       ]
//!     }]
//!   }]
//! }
//! ```
//!
//! Pools and lanes may additionally carry an `XY` origin and a `height`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{category::Category, geometry::Point};

/// Errors raised while reading a structural model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no JSON object found in assistant reply")]
    MissingObject,
}

/// A complete structural model: an ordered list of pools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralModel {
    #[serde(rename = "Pools")]
    pub(crate) pools: Vec<Pool>,
}

impl StructuralModel {
    /// Creates a model from its pools.
    pub fn new(pools: Vec<Pool>) -> Self {
        Self { pools }
    }

    /// Parses a model from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Json`] when the document is not valid JSON or a
    /// required field (`ID`, `Type`, `Lanes`, `Components`, `Flows`, `x`,
    /// `y`, `Start`, `Target`) is missing or mistyped.
    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parses a model out of a free-text assistant reply.
    ///
    /// Any prose around the JSON object is ignored; see [`extract_json`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingObject`] if the reply holds no braces,
    /// or [`ModelError::Json`] if the braced span is not a valid model.
    pub fn from_reply(reply: &str) -> Result<Self, ModelError> {
        let json = extract_json(reply).ok_or(ModelError::MissingObject)?;
        Self::from_json(json)
    }

    /// Serializes the model back into pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the pools in declaration order.
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// Returns true if the model declares no pools.
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// Returns the span of `reply` from its first `{` to its last `}`.
///
/// Assistants tend to wrap their JSON in prose or code fences; this recovers
/// the outermost object without interpreting it.
///
/// # Examples
///
/// ```
/// # use swimlane_core::model::extract_json;
/// let reply = "Here is your diagram:\n```json\n{\"Pools\": []}\n```";
/// assert_eq!(extract_json(reply), Some("{\"Pools\": []}"));
/// assert_eq!(extract_json("no diagram today"), None);
/// ```
pub fn extract_json(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}

/// A participant pool: one process in the generated collaboration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    #[serde(rename = "ID")]
    pub(crate) id: String,

    #[serde(rename = "Name", default)]
    pub(crate) name: String,

    #[serde(rename = "XY", default, skip_serializing_if = "Option::is_none")]
    pub(crate) origin: Option<[i32; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) height: Option<i32>,

    #[serde(rename = "Lanes")]
    pub(crate) lanes: Vec<Lane>,
}

impl Pool {
    /// Creates a pool with no explicit origin or height.
    pub fn new(id: impl Into<String>, name: impl Into<String>, lanes: Vec<Lane>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            origin: None,
            height: None,
            lanes,
        }
    }

    /// Sets an explicit top-left origin.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = Some([origin.x(), origin.y()]);
        self
    }

    /// Sets an explicit height.
    pub fn with_height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The explicit origin, if one was given.
    pub fn origin(&self) -> Option<Point> {
        self.origin.map(|[x, y]| Point::new(x, y))
    }

    /// The explicit height, if one was given.
    pub fn height(&self) -> Option<i32> {
        self.height
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Returns true if the pool is subdivided into a lane set.
    pub fn has_lane_set(&self) -> bool {
        self.lanes.len() > 1
    }
}

/// A lane: a subdivision of a pool grouping components and flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    #[serde(rename = "ID")]
    pub(crate) id: String,

    #[serde(rename = "Name", default)]
    pub(crate) name: String,

    #[serde(rename = "XY", default, skip_serializing_if = "Option::is_none")]
    pub(crate) origin: Option<[i32; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) height: Option<i32>,

    #[serde(rename = "Components")]
    pub(crate) components: Vec<Component>,

    #[serde(rename = "Flows")]
    pub(crate) flows: Vec<Flow>,
}

impl Lane {
    /// Creates a lane with no explicit origin or height.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        components: Vec<Component>,
        flows: Vec<Flow>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            origin: None,
            height: None,
            components,
            flows,
        }
    }

    /// Sets an explicit top-left origin.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = Some([origin.x(), origin.y()]);
        self
    }

    /// Sets an explicit height.
    pub fn with_height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Option<Point> {
        self.origin.map(|[x, y]| Point::new(x, y))
    }

    pub fn height(&self) -> Option<i32> {
        self.height
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }
}

/// A process node placed on the grid.
///
/// The [`Category`] is derived from the element type once, when the
/// component is constructed or deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ComponentRecord", into = "ComponentRecord")]
pub struct Component {
    id: String,
    name: String,
    element_type: String,
    category: Category,
    incoming: Vec<String>,
    outgoing: Vec<String>,
    position: Point,
}

impl Component {
    /// Creates a component of the given BPMN element type at a grid position.
    pub fn new(id: impl Into<String>, element_type: impl Into<String>, position: Point) -> Self {
        let element_type = element_type.into();
        Self {
            id: id.into(),
            name: String::new(),
            category: Category::from_element_type(&element_type),
            element_type,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            position,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an incoming flow reference.
    pub fn with_incoming(mut self, flow_id: impl Into<String>) -> Self {
        self.incoming.push(flow_id.into());
        self
    }

    /// Adds an outgoing flow reference.
    pub fn with_outgoing(mut self, flow_id: impl Into<String>) -> Self {
        self.outgoing.push(flow_id.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The BPMN element name this component is emitted as.
    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn incoming(&self) -> &[String] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[String] {
        &self.outgoing
    }

    /// Raw grid position, before any icon offset.
    pub fn position(&self) -> Point {
        self.position
    }
}

/// Wire form of a [`Component`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ComponentRecord {
    #[serde(rename = "Type")]
    element_type: String,
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Incoming", default)]
    incoming: Vec<String>,
    #[serde(rename = "Outgoing", default)]
    outgoing: Vec<String>,
    x: i32,
    y: i32,
}

impl From<ComponentRecord> for Component {
    fn from(record: ComponentRecord) -> Self {
        Self {
            category: Category::from_element_type(&record.element_type),
            id: record.id,
            name: record.name,
            element_type: record.element_type,
            incoming: record.incoming,
            outgoing: record.outgoing,
            position: Point::new(record.x, record.y),
        }
    }
}

impl From<Component> for ComponentRecord {
    fn from(component: Component) -> Self {
        Self {
            element_type: component.element_type,
            id: component.id,
            name: component.name,
            incoming: component.incoming,
            outgoing: component.outgoing,
            x: component.position.x(),
            y: component.position.y(),
        }
    }
}

/// Element name of flows that must live at collaboration scope.
pub const MESSAGE_FLOW: &str = "messageFlow";

/// A directed connector between two components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    #[serde(rename = "ID")]
    pub(crate) id: String,

    #[serde(rename = "Type")]
    pub(crate) element_type: String,

    #[serde(rename = "Descriptor", default, skip_serializing_if = "Option::is_none")]
    pub(crate) label: Option<String>,

    #[serde(rename = "Start")]
    pub(crate) start: String,

    #[serde(rename = "Target")]
    pub(crate) target: String,
}

impl Flow {
    /// Creates an unlabeled flow of the given BPMN element type.
    pub fn new(
        id: impl Into<String>,
        element_type: impl Into<String>,
        start: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            element_type: element_type.into(),
            label: None,
            start: start.into(),
            target: target.into(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    /// The connector label, empty when none was given.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }

    /// Id of the source component.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Id of the target component.
    pub fn target(&self) -> &str {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_LANE: &str = r#"{
        "Pools": [{
            "ID": "Pool_1",
            "Name": "Customer",
            "Lanes": [{
                "ID": "Lane_1",
                "Name": "Front desk",
                "Components": [
                    { "Type": "startEvent", "ID": "Start_1", "Name": "Start",
                      "Incoming": [], "Outgoing": ["Flow_1"], "x": 0, "y": 0 },
                    { "Type": "userTask", "ID": "Task_1", "Name": "Check in",
                      "Incoming": ["Flow_1"], "Outgoing": [], "x": 150, "y": 0 }
                ],
                "Flows": [
                    { "ID": "Flow_1", "Type": "sequenceFlow", "Descriptor": "go",
                      "Start": "Start_1", "Target": "Task_1" }
                ]
            }]
        }]
    }"#;

    #[test]
    fn test_from_json_reads_nested_structure() {
        let model = StructuralModel::from_json(SINGLE_LANE).unwrap();

        assert_eq!(model.pools().len(), 1);
        let pool = &model.pools()[0];
        assert_eq!(pool.id(), "Pool_1");
        assert_eq!(pool.name(), "Customer");
        assert!(!pool.has_lane_set());
        assert_eq!(pool.origin(), None);

        let lane = &pool.lanes()[0];
        assert_eq!(lane.components().len(), 2);
        assert_eq!(lane.flows().len(), 1);
        assert_eq!(lane.flows()[0].label(), "go");
    }

    #[test]
    fn test_category_attached_at_ingestion() {
        let model = StructuralModel::from_json(SINGLE_LANE).unwrap();
        let categories: Vec<_> = model.pools()[0].lanes()[0]
            .components()
            .iter()
            .map(|c| c.category())
            .collect();

        assert_eq!(categories, vec![Category::Event, Category::Task]);
    }

    #[test]
    fn test_optional_geometry_fields() {
        let source = r#"{"Pools": [{"ID": "P", "XY": [10, 20], "height": 300, "Lanes": [
            {"ID": "L", "XY": [10, 20], "height": 150, "Components": [], "Flows": []}
        ]}]}"#;
        let model = StructuralModel::from_json(source).unwrap();
        let pool = &model.pools()[0];

        assert_eq!(pool.origin(), Some(Point::new(10, 20)));
        assert_eq!(pool.height(), Some(300));
        assert_eq!(pool.lanes()[0].height(), Some(150));
        assert_eq!(pool.name(), "");
    }

    #[test]
    fn test_missing_components_is_malformed() {
        let source = r#"{"Pools": [{"ID": "P", "Lanes": [{"ID": "L", "Flows": []}]}]}"#;
        let err = StructuralModel::from_json(source).unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
        assert!(err.to_string().contains("Components"));
    }

    #[test]
    fn test_from_reply_strips_prose() {
        let reply = format!("Sure! Here is the model:\n```json\n{SINGLE_LANE}\n```\nAnything else?");
        let model = StructuralModel::from_reply(&reply).unwrap();
        assert_eq!(model.pools()[0].id(), "Pool_1");
    }

    #[test]
    fn test_from_reply_without_object() {
        let err = StructuralModel::from_reply("Error").unwrap_err();
        assert!(matches!(err, ModelError::MissingObject));
    }

    #[test]
    fn test_json_roundtrip_preserves_model() {
        let model = StructuralModel::from_json(SINGLE_LANE).unwrap();
        let json = model.to_json_pretty().unwrap();
        assert_eq!(StructuralModel::from_json(&json).unwrap(), model);
    }

    #[test]
    fn test_lane_set_needs_two_lanes() {
        let lane = |id: &str| Lane::new(id, "", vec![], vec![]);
        assert!(!Pool::new("P1", "", vec![lane("L1")]).has_lane_set());
        assert!(Pool::new("P2", "", vec![lane("L1"), lane("L2")]).has_lane_set());
        assert!(!Pool::new("P3", "", vec![]).has_lane_set());
    }
}
