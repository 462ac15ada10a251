//! Edit instructions for structural models.
//!
//! When a user refines an existing diagram, the assistant answers with a list
//! of edit instructions rather than a whole new model. This module applies
//! such a script to a model, producing a new model; the input is never
//! modified.
//!
//! # Script shape
//!
//! ```json
//! { "Content": [
//!   { "type": "CREATE", "item": "Component", "parentPool": "Pool_1",
//!     "parentLane": "Lane_1", "content": { "Type": "task", "ID": "T", "x": 0, "y": 0 } },
//!   { "type": "ALTER", "item": "Component", "id": "T", "changes": { "Name": "Review" } },
//!   { "type": "DELETE", "item": "Flow", "id": "Flow_9" },
//!   { "type": "UPDATEPARENT", "item": "Lane", "id": "Lane_2", "to": "Pool_2" }
//! ] }
//! ```

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{Component, Flow, Lane, Pool, StructuralModel};

/// Errors raised while applying an edit script.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("invalid edit script: {0}")]
    Script(#[source] serde_json::Error),

    #[error("unknown pool `{0}`")]
    UnknownPool(String),

    #[error("unknown lane `{0}`")]
    UnknownLane(String),

    #[error("unknown {kind} `{id}`")]
    UnknownItem { kind: ItemKind, id: String },

    #[error("invalid {kind} content: {source}")]
    InvalidContent {
        kind: ItemKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("a {0} cannot be moved to another parent")]
    UnsupportedMove(ItemKind),
}

/// The kind of model item an instruction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ItemKind {
    Pool,
    Lane,
    Component,
    Flow,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pool => "pool",
            Self::Lane => "lane",
            Self::Component => "component",
            Self::Flow => "flow",
        };
        f.write_str(name)
    }
}

/// A single model edit.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum EditInstruction {
    /// Append a new item. Pools ignore both parents; lanes need
    /// `parent_pool`; components and flows need `parent_lane`.
    Create {
        item: ItemKind,
        #[serde(rename = "parentPool", default)]
        parent_pool: String,
        #[serde(rename = "parentLane", default)]
        parent_lane: String,
        content: Value,
    },

    /// Shallow-merge `changes` into the item's JSON form.
    Alter {
        item: ItemKind,
        id: String,
        changes: Map<String, Value>,
    },

    /// Remove an item together with everything it contains.
    Delete { item: ItemKind, id: String },

    /// Move a lane to pool `to`, or a component or flow to lane `to`.
    UpdateParent { item: ItemKind, id: String, to: String },
}

/// An ordered list of edit instructions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditScript {
    #[serde(rename = "Content")]
    instructions: Vec<EditInstruction>,
}

impl EditScript {
    pub fn new(instructions: Vec<EditInstruction>) -> Self {
        Self { instructions }
    }

    /// Parses a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Script`] for malformed JSON or unknown
    /// instruction types.
    pub fn from_json(source: &str) -> Result<Self, EditError> {
        serde_json::from_str(source).map_err(EditError::Script)
    }

    pub fn instructions(&self) -> &[EditInstruction] {
        &self.instructions
    }

    /// Applies every instruction in order and returns the edited model.
    ///
    /// # Errors
    ///
    /// Stops at the first instruction that references an unknown item or
    /// parent, or whose content does not describe a valid item.
    pub fn apply(&self, model: &StructuralModel) -> Result<StructuralModel, EditError> {
        let mut edited = model.clone();
        for instruction in &self.instructions {
            debug!(instruction:?; "Applying edit");
            apply_instruction(&mut edited, instruction)?;
        }
        Ok(edited)
    }
}

fn apply_instruction(
    model: &mut StructuralModel,
    instruction: &EditInstruction,
) -> Result<(), EditError> {
    match instruction {
        EditInstruction::Create {
            item,
            parent_pool,
            parent_lane,
            content,
        } => create(model, *item, parent_pool, parent_lane, content),
        EditInstruction::Alter { item, id, changes } => alter(model, *item, id, changes),
        EditInstruction::Delete { item, id } => delete(model, *item, id),
        EditInstruction::UpdateParent { item, id, to } => move_item(model, *item, id, to),
    }
}

fn create(
    model: &mut StructuralModel,
    kind: ItemKind,
    parent_pool: &str,
    parent_lane: &str,
    content: &Value,
) -> Result<(), EditError> {
    match kind {
        ItemKind::Pool => model.pools.push(from_content(kind, content)?),
        ItemKind::Lane => {
            let lane = from_content(kind, content)?;
            pool_mut(model, parent_pool)?.lanes.push(lane);
        }
        ItemKind::Component => {
            let component = from_content(kind, content)?;
            lane_mut(model, parent_pool, parent_lane)?
                .components
                .push(component);
        }
        ItemKind::Flow => {
            let flow = from_content(kind, content)?;
            lane_mut(model, parent_pool, parent_lane)?.flows.push(flow);
        }
    }
    Ok(())
}

fn alter(
    model: &mut StructuralModel,
    kind: ItemKind,
    id: &str,
    changes: &Map<String, Value>,
) -> Result<(), EditError> {
    let unknown = || EditError::UnknownItem {
        kind,
        id: id.to_string(),
    };
    match kind {
        ItemKind::Pool => {
            let pool = pool_mut(model, id)?;
            *pool = merge(kind, &*pool, changes)?;
        }
        ItemKind::Lane => {
            let lane = lanes_mut(model)
                .find(|lane| lane.id == id)
                .ok_or_else(|| EditError::UnknownLane(id.to_string()))?;
            *lane = merge(kind, &*lane, changes)?;
        }
        ItemKind::Component => {
            let component = lanes_mut(model)
                .flat_map(|lane| lane.components.iter_mut())
                .find(|component| component.id() == id)
                .ok_or_else(unknown)?;
            *component = merge(kind, &*component, changes)?;
        }
        ItemKind::Flow => {
            let flow = lanes_mut(model)
                .flat_map(|lane| lane.flows.iter_mut())
                .find(|flow| flow.id == id)
                .ok_or_else(unknown)?;
            *flow = merge(kind, &*flow, changes)?;
        }
    }
    Ok(())
}

fn delete(model: &mut StructuralModel, kind: ItemKind, id: &str) -> Result<(), EditError> {
    let removed = match kind {
        ItemKind::Pool => remove_where(&mut model.pools, |pool| pool.id == id).is_some(),
        ItemKind::Lane => model
            .pools
            .iter_mut()
            .any(|pool| remove_where(&mut pool.lanes, |lane| lane.id == id).is_some()),
        ItemKind::Component => take_component(model, id).is_some(),
        ItemKind::Flow => take_flow(model, id).is_some(),
    };
    if removed {
        Ok(())
    } else {
        Err(EditError::UnknownItem {
            kind,
            id: id.to_string(),
        })
    }
}

fn move_item(
    model: &mut StructuralModel,
    kind: ItemKind,
    id: &str,
    to: &str,
) -> Result<(), EditError> {
    let unknown = || EditError::UnknownItem {
        kind,
        id: id.to_string(),
    };
    match kind {
        ItemKind::Pool => return Err(EditError::UnsupportedMove(kind)),
        ItemKind::Lane => {
            pool_mut(model, to)?;
            let lane = model
                .pools
                .iter_mut()
                .find_map(|pool| remove_where(&mut pool.lanes, |lane| lane.id == id))
                .ok_or_else(unknown)?;
            pool_mut(model, to)?.lanes.push(lane);
        }
        ItemKind::Component => {
            lane_mut(model, "", to)?;
            let component = take_component(model, id).ok_or_else(unknown)?;
            lane_mut(model, "", to)?.components.push(component);
        }
        ItemKind::Flow => {
            lane_mut(model, "", to)?;
            let flow = take_flow(model, id).ok_or_else(unknown)?;
            lane_mut(model, "", to)?.flows.push(flow);
        }
    }
    Ok(())
}

fn from_content<T: DeserializeOwned>(kind: ItemKind, content: &Value) -> Result<T, EditError> {
    T::deserialize(content).map_err(|source| EditError::InvalidContent { kind, source })
}

fn merge<T>(kind: ItemKind, item: &T, changes: &Map<String, Value>) -> Result<T, EditError>
where
    T: Serialize + DeserializeOwned,
{
    let invalid = |source| EditError::InvalidContent { kind, source };
    let mut value = serde_json::to_value(item).map_err(invalid)?;
    if let Value::Object(fields) = &mut value {
        for (key, change) in changes {
            fields.insert(key.clone(), change.clone());
        }
    }
    serde_json::from_value(value).map_err(invalid)
}

fn pool_mut<'a>(model: &'a mut StructuralModel, id: &str) -> Result<&'a mut Pool, EditError> {
    model
        .pools
        .iter_mut()
        .find(|pool| pool.id == id)
        .ok_or_else(|| EditError::UnknownPool(id.to_string()))
}

fn lanes_mut(model: &mut StructuralModel) -> impl Iterator<Item = &mut Lane> {
    model.pools.iter_mut().flat_map(|pool| pool.lanes.iter_mut())
}

/// Finds a lane by id, restricted to `pool_id` unless it is empty.
fn lane_mut<'a>(
    model: &'a mut StructuralModel,
    pool_id: &str,
    lane_id: &str,
) -> Result<&'a mut Lane, EditError> {
    if !pool_id.is_empty() {
        pool_mut(model, pool_id)?;
    }
    model
        .pools
        .iter_mut()
        .filter(|pool| pool_id.is_empty() || pool.id == pool_id)
        .flat_map(|pool| pool.lanes.iter_mut())
        .find(|lane| lane.id == lane_id)
        .ok_or_else(|| EditError::UnknownLane(lane_id.to_string()))
}

fn take_component(model: &mut StructuralModel, id: &str) -> Option<Component> {
    lanes_mut(model).find_map(|lane| remove_where(&mut lane.components, |c| c.id() == id))
}

fn take_flow(model: &mut StructuralModel, id: &str) -> Option<Flow> {
    lanes_mut(model).find_map(|lane| remove_where(&mut lane.flows, |flow| flow.id == id))
}

fn remove_where<T>(items: &mut Vec<T>, predicate: impl Fn(&T) -> bool) -> Option<T> {
    let index = items.iter().position(predicate)?;
    Some(items.remove(index))
}
