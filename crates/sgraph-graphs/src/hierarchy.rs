//! Construction of the CNF → Super → Distributor → RSM → ASM → Employee graph.

use crate::aggregator::{group_by_level, Aggregator, PerformanceSummary};
use indexmap::{IndexMap, IndexSet};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use sgraph_common::{EmployeeRecord, HierarchyLevel, SGraphError, Scope};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Identity of a node: the same name at two levels is two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    /// Level of the entity.
    pub level: HierarchyLevel,
    /// Entity name.
    pub name: String,
}

impl NodeKey {
    /// Creates a node key.
    pub fn new(level: HierarchyLevel, name: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.level, self.name)
    }
}

/// A node of the hierarchy graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node identity.
    pub key: NodeKey,
    /// Eligible records passing through this node.
    pub record_count: usize,
    /// Aggregate sales of those records.
    pub sales: f64,
    /// Full performance summary; present on employee nodes only.
    pub summary: Option<PerformanceSummary>,
}

impl GraphNode {
    /// Level of the node.
    pub fn level(&self) -> HierarchyLevel {
        self.key.level
    }

    /// Name of the node.
    pub fn name(&self) -> &str {
        &self.key.name
    }
}

/// A directed parent → child edge between adjacent levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Parent node.
    pub from: NodeKey,
    /// Child node.
    pub to: NodeKey,
}

/// A record left out of the graph because its reporting path is incomplete.
///
/// Carries the fields of the [`SGraphError::MissingHierarchyField`] the
/// record's path raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Data row of the record.
    pub row: usize,
    /// Employee name, possibly empty.
    pub employee_name: String,
    /// Topmost level with no value.
    pub level: HierarchyLevel,
}

/// An immutable hierarchy graph built for one scope.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyGraph {
    scope: Scope,
    nodes: IndexMap<NodeKey, GraphNode>,
    edges: IndexSet<GraphEdge>,
    skipped: Vec<SkippedRecord>,
}

impl SkippedRecord {
    /// The error that excluded this record.
    pub fn error(&self) -> SGraphError {
        SGraphError::MissingHierarchyField {
            row: self.row,
            level: self.level,
        }
    }
}

impl HierarchyGraph {
    /// Scope the graph was built for.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Nodes in insertion order, top level first.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    /// Records left out of the graph.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    /// Looks up a node.
    pub fn node(&self, level: HierarchyLevel, name: &str) -> Option<&GraphNode> {
        self.nodes.get(&NodeKey::new(level, name))
    }

    /// Nodes at one level.
    pub fn nodes_at(&self, level: HierarchyLevel) -> impl Iterator<Item = &GraphNode> {
        self.nodes().filter(move |n| n.level() == level)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `key` in edge order.
    pub fn children<'a>(&'a self, key: &'a NodeKey) -> impl Iterator<Item = &'a NodeKey> + 'a {
        self.edges
            .iter()
            .filter(move |e| &e.from == key)
            .map(|e| &e.to)
    }
}

impl Serialize for HierarchyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes: Vec<&GraphNode> = self.nodes.values().collect();
        let edges: Vec<&GraphEdge> = self.edges.iter().collect();
        let mut state = serializer.serialize_struct("HierarchyGraph", 4)?;
        state.serialize_field("scope", &self.scope)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("edges", &edges)?;
        state.serialize_field("skipped", &self.skipped)?;
        state.end()
    }
}

/// Builds [`HierarchyGraph`]s with a given [`Aggregator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyGraphBuilder {
    aggregator: Aggregator,
}

impl HierarchyGraphBuilder {
    /// Creates a builder.
    pub fn new(aggregator: Aggregator) -> Self {
        Self { aggregator }
    }

    /// Builds the graph of `scope` over `records`.
    ///
    /// Records with a blank hierarchy value are listed in
    /// [`HierarchyGraph::skipped`] and contribute neither nodes nor edges.
    #[instrument(skip(self, records, scope), fields(scope = %scope))]
    pub fn build(&self, records: &[EmployeeRecord], scope: &Scope) -> HierarchyGraph {
        let selected = scope.select(records);
        let mut eligible = Vec::with_capacity(selected.len());
        let mut skipped = Vec::new();

        for record in selected {
            match record.path() {
                Ok(_) => eligible.push(record),
                Err(err) => {
                    warn!(
                        employee = %record.employee_name,
                        error = %err,
                        "skipping record with incomplete hierarchy"
                    );
                    if let SGraphError::MissingHierarchyField { row, level } = err {
                        skipped.push(SkippedRecord {
                            row,
                            employee_name: record.employee_name.clone(),
                            level,
                        });
                    }
                }
            }
        }

        let mut nodes = IndexMap::new();
        for level in HierarchyLevel::MANAGERS {
            for (name, aggregate) in group_by_level(eligible.iter().copied(), level) {
                let key = NodeKey::new(level, name);
                nodes.insert(
                    key.clone(),
                    GraphNode {
                        key,
                        record_count: aggregate.record_count,
                        sales: aggregate.sales,
                        summary: None,
                    },
                );
            }
        }

        let mut employees: IndexMap<&str, Vec<&EmployeeRecord>> = IndexMap::new();
        for record in eligible.iter().copied() {
            employees
                .entry(record.employee_name.as_str())
                .or_default()
                .push(record);
        }
        for (name, rows) in employees {
            let summary = self
                .aggregator
                .summarize_selected(&rows, &Scope::employee(name));
            let key = NodeKey::new(HierarchyLevel::Employee, name);
            nodes.insert(
                key.clone(),
                GraphNode {
                    key,
                    record_count: summary.record_count,
                    sales: summary.total_sales,
                    summary: Some(summary),
                },
            );
        }

        let mut edges = IndexSet::new();
        for record in &eligible {
            let keys: Vec<NodeKey> = HierarchyLevel::ALL
                .into_iter()
                .filter_map(|level| record.entity(level).map(|name| NodeKey::new(level, name)))
                .collect();
            for pair in keys.windows(2) {
                edges.insert(GraphEdge {
                    from: pair[0].clone(),
                    to: pair[1].clone(),
                });
            }
        }

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            skipped = skipped.len(),
            "hierarchy graph built"
        );
        if !skipped.is_empty() {
            info!(count = skipped.len(), "records left out of the hierarchy graph");
        }

        HierarchyGraph {
            scope: scope.clone(),
            nodes,
            edges,
            skipped,
        }
    }
}

/// Builds the graph of `scope` with the default aggregator.
pub fn build_hierarchy_graph(records: &[EmployeeRecord], scope: &Scope) -> HierarchyGraph {
    HierarchyGraphBuilder::default().build(records, scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgraph_common::test_utils::assert_approx_eq;
    use sgraph_common::test_utils::record_fixtures::{record, sample_table, single_record};
    use sgraph_common::ProfitStatus;

    #[test]
    fn test_single_record_graph() {
        let graph = build_hierarchy_graph(&[single_record()], &Scope::All);
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.skipped().is_empty());

        let employee = graph.node(HierarchyLevel::Employee, "A").unwrap();
        let summary = employee.summary.as_ref().unwrap();
        assert_eq!(summary.profit_status, ProfitStatus::Profit);
        assert_approx_eq(summary.target_achievement_pct, 125.0, 1e-9);
    }

    #[test]
    fn test_shared_managers_are_deduplicated() {
        let graph = build_hierarchy_graph(&sample_table(), &Scope::All);

        // C1, C2 / S1, S2 / D1, D2, D3 / R1, R2, R3 / M1..M4 / 4 employees
        assert_eq!(graph.nodes_at(HierarchyLevel::Cnf).count(), 2);
        assert_eq!(graph.nodes_at(HierarchyLevel::Super).count(), 2);
        assert_eq!(graph.nodes_at(HierarchyLevel::Asm).count(), 4);
        assert_eq!(graph.nodes_at(HierarchyLevel::Employee).count(), 4);
        assert_eq!(graph.node_count(), 18);

        let s1 = NodeKey::new(HierarchyLevel::Super, "S1");
        let children: Vec<_> = graph.children(&s1).map(|k| k.name.as_str()).collect();
        assert_eq!(children, vec!["D1", "D2"]);

        let c1 = graph.node(HierarchyLevel::Cnf, "C1").unwrap();
        assert_approx_eq(c1.sales, 1800.0, 1e-9);
        assert_eq!(c1.record_count, 3);
    }

    #[test]
    fn test_same_name_at_two_levels_is_two_nodes() {
        let records = vec![record(1, "X", ["X", "S", "D", "R", "M"], 10.0, 1.0, 1.0, 5.0)];
        let graph = build_hierarchy_graph(&records, &Scope::All);
        assert!(graph.node(HierarchyLevel::Cnf, "X").is_some());
        assert!(graph.node(HierarchyLevel::Employee, "X").is_some());
        assert_eq!(graph.node_count(), 6);
    }

    #[test]
    fn test_incomplete_records_are_skipped() {
        let records = vec![
            record(1, "A", ["C1", "S1", "D1", "R1", "M1"], 10.0, 1.0, 1.0, 5.0),
            record(2, "B", ["C1", "S1", "", "R1", "M1"], 99.0, 1.0, 1.0, 5.0),
        ];
        let graph = build_hierarchy_graph(&records, &Scope::All);
        assert_eq!(
            graph.skipped(),
            &[SkippedRecord {
                row: 2,
                employee_name: "B".to_string(),
                level: HierarchyLevel::Distributor,
            }]
        );
        assert!(graph.node(HierarchyLevel::Employee, "B").is_none());
        assert_approx_eq(graph.node(HierarchyLevel::Cnf, "C1").unwrap().sales, 10.0, 1e-9);

        let path_err = records[1].path().unwrap_err();
        assert_eq!(graph.skipped()[0].error().to_string(), path_err.to_string());
        assert_eq!(
            path_err.to_string(),
            "row 2 has no value for hierarchy level Distributor"
        );
    }

    #[test]
    fn test_scoped_graph_only_contains_scope() {
        let graph = build_hierarchy_graph(
            &sample_table(),
            &Scope::entity(HierarchyLevel::Cnf, "C2"),
        );
        assert!(graph.node(HierarchyLevel::Cnf, "C1").is_none());
        assert!(graph.node(HierarchyLevel::Super, "S1").is_some());
        assert!(graph.node(HierarchyLevel::Employee, "Dara").is_some());
        assert!(graph.node(HierarchyLevel::Employee, "Asha").is_none());
    }

    #[test]
    fn test_empty_scope_gives_empty_graph() {
        let graph = build_hierarchy_graph(&sample_table(), &Scope::employee("Nobody"));
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_serializes_nodes_and_edges_as_lists() {
        let graph = build_hierarchy_graph(&[single_record()], &Scope::All);
        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(value["nodes"].as_array().unwrap().len(), 6);
        assert_eq!(value["edges"][0]["from"]["level"], "cnf");
        assert_eq!(value["edges"][0]["to"]["name"], "S1");
        assert_eq!(value["scope"]["kind"], "all");
    }
}
