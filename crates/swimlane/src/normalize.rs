//! Normalization of shorthand BPMN.
//!
//! Structural models use two conveniences that viewers do not accept:
//!
//! 1. Message flows declared inside a pool. BPMN only allows them at
//!    collaboration scope, so [`relocate_message_flows`] moves them there.
//! 2. Shorthand event types such as `messageStartEvent`. BPMN spells these
//!    as a generic event with an event definition child, which
//!    [`canonicalize_events`] rewrites them into.
//!
//! Both passes take a tree and return a new one, and both are idempotent.
//! [`normalize`] composes them in order.

use std::mem;

use log::debug;

use swimlane_core::model::MESSAGE_FLOW;

use crate::xml::Element;

const MESSAGE_DEFINITION: &str = "messageEventDefinition";
const TIMER_DEFINITION: &str = "timerEventDefinition";

/// Canonical element name and event definition marker for a shorthand event.
fn canonical_event(name: &str) -> Option<(&'static str, &'static str)> {
    let canonical = match name {
        "messageStartEvent" => ("startEvent", MESSAGE_DEFINITION),
        "messageEndEvent" => ("endEvent", MESSAGE_DEFINITION),
        "messageCatchEvent" => ("intermediateCatchEvent", MESSAGE_DEFINITION),
        "messageThrowEvent" => ("intermediateThrowEvent", MESSAGE_DEFINITION),
        "timerStartEvent" => ("startEvent", TIMER_DEFINITION),
        "timerIntermediateEvent" => ("intermediateCatchEvent", TIMER_DEFINITION),
        _ => return None,
    };
    Some(canonical)
}

/// Runs [`relocate_message_flows`] and then [`canonicalize_events`].
pub fn normalize(root: Element) -> Element {
    canonicalize_events(relocate_message_flows(root))
}

/// Moves every message flow found under a `process` into the collaboration.
///
/// Flows are appended to the root's `collaboration` child in document order.
/// If the root has no collaboration and there is something to move, one is
/// inserted as its first child.
pub fn relocate_message_flows(mut root: Element) -> Element {
    let mut moved = Vec::new();
    for process in root
        .children_mut()
        .iter_mut()
        .filter(|child| child.name() == "process")
    {
        take_message_flows(process, &mut moved);
    }

    if moved.is_empty() {
        return root;
    }
    debug!(count = moved.len(); "Relocating message flows to collaboration");

    let children = root.children_mut();
    let index = match children.iter().position(|c| c.name() == "collaboration") {
        Some(index) => index,
        None => {
            children.insert(0, Element::new("collaboration"));
            0
        }
    };
    children[index].children_mut().extend(moved);
    root
}

fn take_message_flows(element: &mut Element, moved: &mut Vec<Element>) {
    for mut child in mem::take(element.children_mut()) {
        if child.name() == MESSAGE_FLOW {
            moved.push(child);
        } else {
            take_message_flows(&mut child, moved);
            element.push_child(child);
        }
    }
}

/// Rewrites shorthand event elements into their canonical form.
///
/// The element keeps its attributes and children; the event definition
/// marker is appended last unless the element already has one.
///
/// | shorthand | canonical | marker |
/// |---|---|---|
/// | `messageStartEvent` | `startEvent` | `messageEventDefinition` |
/// | `messageEndEvent` | `endEvent` | `messageEventDefinition` |
/// | `messageCatchEvent` | `intermediateCatchEvent` | `messageEventDefinition` |
/// | `messageThrowEvent` | `intermediateThrowEvent` | `messageEventDefinition` |
/// | `timerStartEvent` | `startEvent` | `timerEventDefinition` |
/// | `timerIntermediateEvent` | `intermediateCatchEvent` | `timerEventDefinition` |
pub fn canonicalize_events(mut root: Element) -> Element {
    canonicalize(&mut root);
    root
}

fn canonicalize(element: &mut Element) {
    if let Some((canonical, marker)) = canonical_event(element.name()) {
        element.set_name(canonical);
        if element.child(marker).is_none() {
            element.push_child(Element::new(marker));
        }
    }
    for child in element.children_mut() {
        canonicalize(child);
    }
}
