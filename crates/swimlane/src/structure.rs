//! Resolved view of a structural model.
//!
//! [`Structure`] indexes every component by id, drops repeated declarations
//! and resolves flow endpoints once, so later stages never look up ids by
//! string again. Everything here borrows from the model; nothing is copied.

use std::ptr;

use indexmap::{IndexMap, IndexSet, map::Entry};
use log::debug;

use swimlane_core::model::{Component, Flow, Lane, Pool, StructuralModel};

use crate::diagnostic::{Diagnostic, DiagnosticCode, DiagnosticCollector};

/// Where a component was first declared.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub pool: &'a Pool,
    pub lane: &'a Lane,
    pub component: &'a Component,
    /// Set when the same id was also declared in another lane.
    ambiguous: bool,
}

impl Placement<'_> {
    /// Returns true if the owning lane is known.
    pub fn has_unique_lane(&self) -> bool {
        !self.ambiguous
    }
}

/// A flow whose endpoints both resolved to a single component.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedFlow<'a> {
    pub flow: &'a Flow,
    pub start: &'a Component,
    pub target: &'a Component,
}

/// A lane and the components it keeps after de-duplication.
#[derive(Debug)]
pub struct LaneView<'a> {
    pub lane: &'a Lane,
    pub components: Vec<&'a Component>,
}

/// A pool with its kept lanes and the resolved flows it declares.
#[derive(Debug)]
pub struct PoolView<'a> {
    pub pool: &'a Pool,
    pub lanes: Vec<LaneView<'a>>,
    pub flows: Vec<ResolvedFlow<'a>>,
}

impl<'a> PoolView<'a> {
    /// Iterates the kept components of every lane, lane by lane.
    pub fn components(&self) -> impl Iterator<Item = &'a Component> + '_ {
        self.lanes.iter().flat_map(|lane| lane.components.iter().copied())
    }
}

/// The de-duplicated, resolved form of a [`StructuralModel`].
#[derive(Debug)]
pub struct Structure<'a> {
    pools: Vec<PoolView<'a>>,
    placements: IndexMap<&'a str, Placement<'a>>,
}

impl<'a> Structure<'a> {
    /// Indexes `model`, reporting dropped components and flows to `diagnostics`.
    pub fn build(model: &'a StructuralModel, diagnostics: &mut DiagnosticCollector) -> Self {
        let mut placements: IndexMap<&'a str, Placement<'a>> = IndexMap::new();
        let mut pools = Vec::with_capacity(model.pools().len());

        for pool in model.pools() {
            let mut lanes = Vec::with_capacity(pool.lanes().len());
            for lane in pool.lanes() {
                let mut components = Vec::with_capacity(lane.components().len());
                for component in lane.components() {
                    match placements.entry(component.id()) {
                        Entry::Vacant(slot) => {
                            slot.insert(Placement {
                                pool,
                                lane,
                                component,
                                ambiguous: false,
                            });
                            components.push(component);
                        }
                        Entry::Occupied(mut slot) => {
                            let first = slot.get_mut();
                            if !ptr::eq(first.lane, lane) {
                                first.ambiguous = true;
                            }
                            diagnostics.emit(
                                Diagnostic::new(
                                    DiagnosticCode::W200,
                                    component.id(),
                                    format!(
                                        "component `{}` is declared more than once; keeping the declaration in lane `{}`",
                                        component.id(),
                                        first.lane.id()
                                    ),
                                )
                                .with_help("give every component a unique ID"),
                            );
                        }
                    }
                }
                lanes.push(LaneView { lane, components });
            }
            pools.push(PoolView {
                pool,
                lanes,
                flows: Vec::new(),
            });
        }

        let mut seen_flows = IndexSet::new();
        for view in &mut pools {
            for flow in view.pool.lanes().iter().flat_map(|lane| lane.flows()) {
                if placements.contains_key(flow.id()) {
                    diagnostics.emit(
                        Diagnostic::new(
                            DiagnosticCode::W201,
                            flow.id(),
                            format!(
                                "flow `{}` reuses the ID of a component; keeping the component",
                                flow.id()
                            ),
                        )
                        .with_help("flows and components share one ID space"),
                    );
                    continue;
                }
                if !seen_flows.insert(flow.id()) {
                    diagnostics.emit(Diagnostic::new(
                        DiagnosticCode::W201,
                        flow.id(),
                        format!(
                            "flow `{}` is declared more than once; keeping the first declaration",
                            flow.id()
                        ),
                    ));
                    continue;
                }
                if let Some(resolved) = resolve_flow(flow, &placements, diagnostics) {
                    view.flows.push(resolved);
                }
            }
        }

        debug!(
            components = placements.len(),
            flows = pools.iter().map(|p| p.flows.len()).sum::<usize>();
            "Indexed structural model"
        );

        Self { pools, placements }
    }

    pub fn pools(&self) -> &[PoolView<'a>] {
        &self.pools
    }

    /// Looks up the first declaration of a component.
    pub fn placement(&self, id: &str) -> Option<&Placement<'a>> {
        self.placements.get(id)
    }

    /// Iterates every resolved flow, pool by pool.
    pub fn flows(&self) -> impl Iterator<Item = &ResolvedFlow<'a>> + '_ {
        self.pools.iter().flat_map(|pool| pool.flows.iter())
    }
}

fn resolve_flow<'a>(
    flow: &'a Flow,
    placements: &IndexMap<&'a str, Placement<'a>>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<ResolvedFlow<'a>> {
    let endpoints = [flow.start(), flow.target()].map(|id| (id, placements.get(id)));

    if let Some((missing, _)) = endpoints.iter().find(|(_, placement)| placement.is_none()) {
        diagnostics.emit(
            Diagnostic::new(
                DiagnosticCode::W100,
                flow.id(),
                format!(
                    "flow `{}` references unknown component `{missing}`",
                    flow.id()
                ),
            )
            .with_help("the flow is left out of the diagram"),
        );
        return None;
    }

    if let Some((ambiguous, _)) = endpoints
        .iter()
        .find(|(_, placement)| placement.is_some_and(|p| !p.has_unique_lane()))
    {
        diagnostics.emit(Diagnostic::new(
            DiagnosticCode::W101,
            flow.id(),
            format!(
                "flow `{}` connects component `{ambiguous}`, which is declared in more than one lane",
                flow.id()
            ),
        ));
        return None;
    }

    let [(_, Some(start)), (_, Some(target))] = endpoints else {
        return None;
    };
    Some(ResolvedFlow {
        flow,
        start: start.component,
        target: target.component,
    })
}
