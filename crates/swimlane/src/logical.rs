//! Logical tree construction.
//!
//! Builds the `definitions` root with its `collaboration` and one `process`
//! per pool. Each pool becomes a `participant` of the collaboration, every
//! kept component becomes an element named after its BPMN type, and every
//! resolved flow becomes a connector element after all components of its
//! pool. Multi-lane pools additionally get a `laneSet` listing which
//! components each lane owns.

use std::collections::HashSet;

use log::debug;

use swimlane_core::{identifier::IdGenerator, model::Component};

use crate::{
    structure::{PoolView, ResolvedFlow, Structure},
    xml::Element,
};

pub const MODEL_NS: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
pub const BPMNDI_NS: &str = "http://www.omg.org/spec/BPMN/20100524/DI";
pub const OMGDI_NS: &str = "http://www.omg.org/spec/DD/20100524/DI";
pub const OMGDC_NS: &str = "http://www.omg.org/spec/DD/20100524/DC";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const TARGET_NS: &str = "http://bpmn.io/schema/bpmn";

/// The logical half of a document, before any diagram is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalTree {
    /// The `definitions` root holding the collaboration and processes.
    pub root: Element,
    /// Id of the collaboration, referenced by the diagram plane.
    pub collaboration_id: String,
}

/// Builds the logical tree for `structure`, drawing synthesized ids from `ids`.
pub fn build_logical(structure: &Structure<'_>, ids: &mut dyn IdGenerator) -> LogicalTree {
    let definitions_id = ids.next_id("Definitions");
    let collaboration_id = ids.next_id("Collaboration");

    let resolved: HashSet<&str> = structure.flows().map(|f| f.flow.id()).collect();

    let mut collaboration = Element::new("collaboration").with_attr("id", &collaboration_id);
    let mut processes = Vec::with_capacity(structure.pools().len());

    for view in structure.pools() {
        let process_id = ids.next_id("Process");
        collaboration.push_child(
            Element::new("participant")
                .with_attr("id", view.pool.id())
                .with_attr("name", view.pool.name())
                .with_attr("processRef", &process_id),
        );
        processes.push(build_process(view, process_id, &resolved, ids));
    }

    debug!(
        processes = processes.len(),
        collaboration_id = collaboration_id.as_str();
        "Built logical tree"
    );

    let root = Element::new("definitions")
        .with_attr("xmlns", MODEL_NS)
        .with_attr("xmlns:bpmndi", BPMNDI_NS)
        .with_attr("xmlns:omgdi", OMGDI_NS)
        .with_attr("xmlns:omgdc", OMGDC_NS)
        .with_attr("xmlns:xsi", XSI_NS)
        .with_attr("id", definitions_id)
        .with_attr("targetNamespace", TARGET_NS)
        .with_attr("exporter", env!("CARGO_PKG_NAME"))
        .with_attr("exporterVersion", env!("CARGO_PKG_VERSION"))
        .with_child(collaboration)
        .with_children(processes);

    LogicalTree {
        root,
        collaboration_id,
    }
}

fn build_process(
    view: &PoolView<'_>,
    process_id: String,
    resolved: &HashSet<&str>,
    ids: &mut dyn IdGenerator,
) -> Element {
    let mut process = Element::new("process")
        .with_attr("id", process_id)
        .with_attr("isExecutable", "false");

    if view.pool.has_lane_set() {
        let lanes = view.lanes.iter().map(|lane_view| {
            Element::new("lane")
                .with_attr("id", lane_view.lane.id())
                .with_attr("name", lane_view.lane.name())
                .with_children(
                    lane_view
                        .components
                        .iter()
                        .map(|component| Element::new("flowNodeRef").with_text(component.id())),
                )
        });
        process.push_child(
            Element::new("laneSet")
                .with_attr("id", ids.next_id("LaneSet"))
                .with_children(lanes),
        );
    }

    for component in view.components() {
        process.push_child(component_element(component, resolved));
    }
    for flow in &view.flows {
        process.push_child(flow_element(flow));
    }
    process
}

/// Emits a component, keeping only flow references that survived resolution.
fn component_element(component: &Component, resolved: &HashSet<&str>) -> Element {
    let refs = |tag: &'static str, flow_ids: &[String]| {
        flow_ids
            .iter()
            .filter(|id| resolved.contains(id.as_str()))
            .map(move |id| Element::new(tag).with_text(id.as_str()))
            .collect::<Vec<_>>()
    };

    Element::new(component.element_type())
        .with_attr("id", component.id())
        .with_attr("name", component.name())
        .with_children(refs("incoming", component.incoming()))
        .with_children(refs("outgoing", component.outgoing()))
}

fn flow_element(resolved: &ResolvedFlow<'_>) -> Element {
    Element::new(resolved.flow.element_type())
        .with_attr("id", resolved.flow.id())
        .with_attr("name", resolved.flow.label())
        .with_attr("sourceRef", resolved.start.id())
        .with_attr("targetRef", resolved.target.id())
}

#[cfg(test)]
mod tests {
    use swimlane_core::{
        geometry::Point,
        identifier::SequentialIds,
        model::{Flow, Lane, Pool, StructuralModel},
    };

    use super::*;
    use crate::diagnostic::DiagnosticCollector;

    fn build(model: &StructuralModel) -> LogicalTree {
        let mut diagnostics = DiagnosticCollector::new();
        let structure = Structure::build(model, &mut diagnostics);
        build_logical(&structure, &mut SequentialIds::new())
    }

    fn names(element: &Element) -> Vec<&str> {
        element.children().iter().map(|c| c.name()).collect()
    }

    fn two_lane_model() -> StructuralModel {
        StructuralModel::new(vec![Pool::new(
            "Pool_1",
            "Shop",
            vec![
                Lane::new(
                    "Lane_1",
                    "Sales",
                    vec![
                        Component::new("Start_1", "startEvent", Point::new(0, 0))
                            .with_outgoing("Flow_1"),
                        Component::new("Task_1", "userTask", Point::new(150, 0))
                            .with_name("Take order")
                            .with_incoming("Flow_1")
                            .with_outgoing("Flow_2"),
                    ],
                    vec![Flow::new("Flow_1", "sequenceFlow", "Start_1", "Task_1")],
                ),
                Lane::new(
                    "Lane_2",
                    "Stock",
                    vec![
                        Component::new("End_1", "endEvent", Point::new(300, 150))
                            .with_incoming("Flow_2"),
                    ],
                    vec![
                        Flow::new("Flow_2", "sequenceFlow", "Task_1", "End_1").with_label("ship"),
                    ],
                ),
            ],
        )])
    }

    #[test]
    fn test_root_shape() {
        let tree = build(&two_lane_model());
        let root = &tree.root;

        assert_eq!(root.name(), "definitions");
        assert_eq!(root.attr("xmlns"), Some(MODEL_NS));
        assert_eq!(root.attr("id"), Some("Definitions_1"));
        assert_eq!(tree.collaboration_id, "Collaboration_2");
        assert_eq!(names(root), vec!["collaboration", "process"]);

        let participant = &root.children()[0].children()[0];
        assert_eq!(participant.attr("id"), Some("Pool_1"));
        assert_eq!(participant.attr("name"), Some("Shop"));
        assert_eq!(participant.attr("processRef"), Some("Process_3"));
    }

    #[test]
    fn test_components_before_flows() {
        let tree = build(&two_lane_model());
        let process = &tree.root.children()[1];

        assert_eq!(process.attr("isExecutable"), Some("false"));
        assert_eq!(
            names(process),
            vec!["laneSet", "startEvent", "userTask", "endEvent", "sequenceFlow", "sequenceFlow"]
        );

        let task = &process.children()[2];
        assert_eq!(names(task), vec!["incoming", "outgoing"]);
        assert_eq!(task.children()[0].text(), Some("Flow_1"));

        let flow = &process.children()[5];
        assert_eq!(flow.attr("name"), Some("ship"));
        assert_eq!(flow.attr("sourceRef"), Some("Task_1"));
        assert_eq!(flow.attr("targetRef"), Some("End_1"));
    }

    #[test]
    fn test_lane_set_lists_flow_nodes() {
        let tree = build(&two_lane_model());
        let lane_set = &tree.root.children()[1].children()[0];

        assert_eq!(lane_set.attr("id"), Some("LaneSet_4"));
        let refs: Vec<Vec<_>> = lane_set
            .children()
            .iter()
            .map(|lane| lane.children().iter().filter_map(|r| r.text()).collect())
            .collect();
        assert_eq!(refs, vec![vec!["Start_1", "Task_1"], vec!["End_1"]]);
    }

    #[test]
    fn test_single_lane_pool_has_no_lane_set() {
        let model = StructuralModel::new(vec![Pool::new(
            "P",
            "",
            vec![Lane::new(
                "L",
                "",
                vec![Component::new("A", "task", Point::new(0, 0))],
                vec![],
            )],
        )]);
        let tree = build(&model);
        assert_eq!(names(&tree.root.children()[1]), vec!["task"]);
    }

    #[test]
    fn test_empty_pool_yields_empty_process() {
        let model = StructuralModel::new(vec![Pool::new("P", "", vec![])]);
        let tree = build(&model);
        assert!(tree.root.children()[1].children().is_empty());
    }

    #[test]
    fn test_unresolved_flow_references_are_dropped() {
        let model = StructuralModel::new(vec![Pool::new(
            "P",
            "",
            vec![Lane::new(
                "L",
                "",
                vec![
                    Component::new("A", "task", Point::new(0, 0))
                        .with_outgoing("Good")
                        .with_outgoing("Bad"),
                    Component::new("B", "task", Point::new(200, 0)).with_incoming("Good"),
                ],
                vec![
                    Flow::new("Good", "sequenceFlow", "A", "B"),
                    Flow::new("Bad", "sequenceFlow", "A", "Ghost"),
                ],
            )],
        )]);
        let tree = build(&model);
        let process = &tree.root.children()[1];

        assert_eq!(names(process), vec!["task", "task", "sequenceFlow"]);
        assert_eq!(process.children()[0].children().len(), 1);
        assert!(
            tree.root
                .descendants()
                .all(|e| e.attr("id") != Some("Bad") && e.text() != Some("Bad"))
        );
    }
}
