//! Clickable element queries.
//!
//! Every call takes fresh snapshots: registry first, then topology (only when
//! something survived filtering). Nothing is cached between calls.

use std::cmp::Reverse;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use scenelens_protocols::error::IntrospectionError;
use scenelens_protocols::host::{RegistrySource, TopologySource};
use scenelens_protocols::types::{
    Diagnostic, DiagnosticKind, GraphKey, ResolvedElement, SemanticElement,
};

use crate::registry_reader::RegistryReader;
use crate::resolver::VersionResolver;
use crate::topology::Topology;
use crate::transform::{Accumulation, AncestorStep, DEFAULT_DEPTH_LIMIT, TransformAccumulator};

/// Engine tuning shared by all queries.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub root: GraphKey,
    pub depth_limit: usize,
    pub host_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            root: GraphKey::default(),
            depth_limit: DEFAULT_DEPTH_LIMIT,
            host_timeout: Duration::from_millis(2000),
        }
    }
}

/// Result of `find_clickable`.
#[derive(Debug, Clone, Default)]
pub struct QueryOutcome {
    /// Top-most first (descending z-index, then id).
    pub elements: Vec<ResolvedElement>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of inspecting a single element.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub element: ResolvedElement,
    pub ancestors: Vec<AncestorStep>,
    /// `None` when no topology was available.
    pub owner_rendered: Option<bool>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct QueryEngine {
    registry: Arc<dyn RegistrySource>,
    topology: Arc<dyn TopologySource>,
    settings: EngineSettings,
}

impl QueryEngine {
    pub fn new(
        registry: Arc<dyn RegistrySource>,
        topology: Arc<dyn TopologySource>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            registry,
            topology,
            settings,
        }
    }

    /// Clickable elements, optionally narrowed to one id.
    ///
    /// An empty registry yields an empty outcome, never an error.
    pub async fn find_clickable(
        &self,
        filter: Option<&str>,
    ) -> Result<QueryOutcome, IntrospectionError> {
        let filter = filter.filter(|f| !f.is_empty());
        let mut diagnostics = Vec::new();

        let survivors: Vec<SemanticElement> = self
            .resolved_registry(&mut diagnostics)
            .await?
            .into_iter()
            .filter(|el| el.clickable)
            .filter(|el| filter.is_none_or(|f| el.id.matches(f)))
            .collect();

        if survivors.is_empty() {
            debug!(filter = ?filter, "No clickable elements matched");
            return Ok(QueryOutcome {
                elements: Vec::new(),
                diagnostics,
            });
        }

        let topology = self.read_topology(&mut diagnostics).await?;
        let mut elements: Vec<ResolvedElement> = survivors
            .into_iter()
            .map(|el| self.place(el, topology.as_ref(), &mut diagnostics).0)
            .collect();

        elements.sort_by(|a, b| {
            Reverse(a.element.z_index.unwrap_or(0))
                .cmp(&Reverse(b.element.z_index.unwrap_or(0)))
                .then_with(|| a.element.id.cmp(&b.element.id))
        });

        debug!(count = elements.len(), filter = ?filter, "Resolved clickable elements");
        Ok(QueryOutcome {
            elements,
            diagnostics,
        })
    }

    /// Resolve one element by id, clickable or not, with its ancestor chain.
    pub async fn inspect(&self, id: &str) -> Result<Inspection, IntrospectionError> {
        let mut diagnostics = Vec::new();
        let element = self
            .resolved_registry(&mut diagnostics)
            .await?
            .into_iter()
            .filter(|el| !id.is_empty() && el.id.matches(id))
            .max_by_key(|el| el.z_index.unwrap_or(0))
            .ok_or_else(|| IntrospectionError::ElementNotFound(id.to_string()))?;

        let topology = self.read_topology(&mut diagnostics).await?;
        let owner_rendered = topology
            .as_ref()
            .map(|t| t.is_rendered(&element.owning_graph));
        let (element, accumulation) = self.place(element, topology.as_ref(), &mut diagnostics);

        Ok(Inspection {
            element,
            ancestors: accumulation.ancestors,
            owner_rendered,
            diagnostics,
        })
    }

    async fn resolved_registry(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<SemanticElement>, IntrospectionError> {
        let read =
            RegistryReader::snapshot(self.registry.clone(), self.settings.host_timeout).await?;

        if !read.present {
            debug!("Host has no semantic registry");
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::NoRegistry,
                IntrospectionError::NoRegistry.to_string(),
            ));
            return Ok(Vec::new());
        }
        if read.skipped > 0 {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::SkippedRegistryEntries,
                format!("{} registry entries had an unknown shape", read.skipped),
            ));
        }

        Ok(VersionResolver::new(self.settings.root.clone()).resolve(read.elements))
    }

    /// Topology snapshot. Timeouts propagate; an unavailable store degrades.
    async fn read_topology(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Option<Topology>, IntrospectionError> {
        let topology = match Topology::snapshot(self.topology.clone(), self.settings.host_timeout)
            .await
        {
            Ok(topology) => topology,
            Err(IntrospectionError::HostUnavailable(reason)) => {
                warn!(reason = %reason, "Topology read failed, using zero offsets");
                None
            }
            Err(e) => return Err(e),
        };

        if topology.is_none() {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::NoTopology,
                format!(
                    "{}; positions are local bounds only",
                    IntrospectionError::NoTopology
                ),
            ));
        }
        Ok(topology)
    }

    fn place(
        &self,
        element: SemanticElement,
        topology: Option<&Topology>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (ResolvedElement, Accumulation) {
        let accumulation = match topology {
            Some(topology) => {
                TransformAccumulator::new(topology, &self.settings.root, self.settings.depth_limit)
                    .accumulate(&element.owning_graph)
            }
            None => Accumulation::without_topology(),
        };

        if accumulation.depth_limited {
            let err = IntrospectionError::DepthLimitExceeded {
                graph_key: element.owning_graph.to_string(),
                limit: self.settings.depth_limit,
            };
            push_unique(
                diagnostics,
                Diagnostic::new(DiagnosticKind::DepthLimitExceeded, err.to_string())
                    .for_graph(element.owning_graph.clone()),
            );
        }
        if accumulation.distorted {
            push_unique(
                diagnostics,
                Diagnostic::new(
                    DiagnosticKind::ApproximatePosition,
                    format!(
                        "An ancestor of '{}' scales or rotates; only translation is applied",
                        element.owning_graph
                    ),
                )
                .for_graph(element.owning_graph.clone()),
            );
        }

        let absolute_bounds = element.local_bounds.translate(accumulation.offset);
        let resolved = ResolvedElement {
            absolute_center: absolute_bounds.center(),
            absolute_bounds,
            position_approximate: accumulation.is_approximate(),
            element,
        };
        (resolved, accumulation)
    }
}

fn push_unique(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    let seen = diagnostics
        .iter()
        .any(|d| d.kind == diagnostic.kind && d.graph_key == diagnostic.graph_key);
    if !seen {
        diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
