//! Diagram interchange assembly.
//!
//! Produces the `bpmndi:BPMNDiagram` subtree: one shape per pool, lane and
//! component and one edge per routable flow, each keyed to its logical
//! element through `bpmnElement`. Output order per pool is the pool shape,
//! its lane shapes, its component shapes and finally its edges.

use log::debug;

use swimlane_core::{geometry::Bounds, identifier::IdGenerator};

use crate::{
    diagnostic::{Diagnostic, DiagnosticCode, DiagnosticCollector},
    layout::{PoolLayout, component_bounds},
    routing::{Endpoint, route},
    structure::{ResolvedFlow, Structure},
    xml::Element,
};

/// Builds the diagram subtree for `structure`.
///
/// `pools` must be the layouts resolved for `structure`, in the same order.
/// Flows that cannot be routed are left out and reported as
/// [`DiagnosticCode::W102`].
pub fn build_diagram(
    structure: &Structure<'_>,
    pools: &[PoolLayout<'_>],
    collaboration_id: &str,
    ids: &mut dyn IdGenerator,
    diagnostics: &mut DiagnosticCollector,
) -> Element {
    let diagram_id = ids.next_id("BPMNDiagram");
    let mut plane = Element::new("bpmndi:BPMNPlane")
        .with_attr("id", ids.next_id("BPMNPlane"))
        .with_attr("bpmnElement", collaboration_id);

    let mut edges = 0;
    for (view, layout) in structure.pools().iter().zip(pools) {
        plane.push_child(shape(layout.id, layout.bounds).with_attr("isHorizontal", true));
        for lane in &layout.lanes {
            plane.push_child(shape(lane.id, lane.bounds).with_attr("isHorizontal", true));
        }
        for component in view.components() {
            plane.push_child(shape(component.id(), component_bounds(component)));
        }
        for flow in &view.flows {
            if let Some(edge) = edge(flow, diagnostics) {
                plane.push_child(edge);
                edges += 1;
            }
        }
    }

    debug!(
        shapes = plane.children().len() - edges,
        edges;
        "Assembled diagram"
    );

    Element::new("bpmndi:BPMNDiagram")
        .with_attr("id", diagram_id)
        .with_child(plane)
}

fn shape(element_id: &str, bounds: Bounds) -> Element {
    Element::new("bpmndi:BPMNShape")
        .with_attr("id", format!("{element_id}_di"))
        .with_attr("bpmnElement", element_id)
        .with_child(
            Element::new("omgdc:Bounds")
                .with_attr("x", bounds.x())
                .with_attr("y", bounds.y())
                .with_attr("width", bounds.width())
                .with_attr("height", bounds.height()),
        )
}

fn edge(resolved: &ResolvedFlow<'_>, diagnostics: &mut DiagnosticCollector) -> Option<Element> {
    let flow_id = resolved.flow.id();
    let Some(route) = route(
        Endpoint::from(resolved.start),
        Endpoint::from(resolved.target),
    ) else {
        diagnostics.emit(
            Diagnostic::new(
                DiagnosticCode::W102,
                flow_id,
                format!(
                    "flow `{flow_id}` connects `{}` and `{}`, whose anchors coincide",
                    resolved.start.id(),
                    resolved.target.id()
                ),
            )
            .with_help("move one of the components; the flow is kept without an edge"),
        );
        return None;
    };

    let waypoints = route.waypoints().into_iter().map(|point| {
        Element::new("omgdi:waypoint")
            .with_attr("x", point.x())
            .with_attr("y", point.y())
    });

    Some(
        Element::new("bpmndi:BPMNEdge")
            .with_attr("id", format!("{flow_id}_di"))
            .with_attr("bpmnElement", flow_id)
            .with_children(waypoints),
    )
}
