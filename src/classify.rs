use log::debug;
use std::collections::{HashMap, HashSet};

use crate::element::{Element, NodePair};

/// Result of one classification sweep over the resistor set.
///
/// Every input resistor lands in exactly one of the three groups: a parallel
/// group (its node pair carries two or more resistors), a foldable series
/// chain, or the floating set (isolated edges and components the chain
/// ordering refused).
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Node pairs with multiplicity >= 2, in discovery order, each with its
    /// resistors in input order.
    pub parallel_groups: Vec<(NodePair, Vec<Element>)>,
    /// Maximal simple paths of series-candidate resistors, ordered
    /// endpoint-to-endpoint.
    pub series_chains: Vec<Vec<Element>>,
    /// Resistors that cannot be folded this pass.
    pub floating: Vec<Element>,
}

/// Partition resistors into parallel groups, series chains, and floating
/// resistors for one reduction pass.
pub fn classify(resistors: &[Element]) -> Classification {
    let mut classification = Classification::default();

    // Node-pair multiplicity map, discovery order kept for reproducible output
    let mut counts: HashMap<NodePair, usize> = HashMap::new();
    let mut discovery_order: Vec<NodePair> = Vec::new();
    for resistor in resistors {
        let count = counts.entry(resistor.nodes).or_insert(0);
        if *count == 0 {
            discovery_order.push(resistor.nodes);
        }
        *count += 1;
    }

    for pair in &discovery_order {
        if counts[pair] >= 2 {
            let group: Vec<Element> = resistors
                .iter()
                .filter(|r| r.nodes == *pair)
                .cloned()
                .collect();
            classification.parallel_groups.push((*pair, group));
        }
    }

    // The count == 1 resistors are the edges of the series-candidate graph
    let candidates: Vec<usize> = (0..resistors.len())
        .filter(|&i| counts[&resistors[i].nodes] == 1)
        .collect();

    let mut incidence: HashMap<u32, Vec<usize>> = HashMap::new();
    for &i in &candidates {
        incidence.entry(resistors[i].nodes.start).or_default().push(i);
        incidence.entry(resistors[i].nodes.end).or_default().push(i);
    }

    // Connected components over the candidate edges, by DFS
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut visited: HashSet<usize> = HashSet::new();
    for &seed in &candidates {
        if visited.contains(&seed) {
            continue;
        }
        let mut component = Vec::new();
        let mut stack = vec![seed];
        visited.insert(seed);
        while let Some(edge) = stack.pop() {
            component.push(edge);
            for node in [resistors[edge].nodes.start, resistors[edge].nodes.end] {
                for &neighbor in &incidence[&node] {
                    if visited.insert(neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }

    for component in components {
        match order_as_path(resistors, &component) {
            Some(chain) => classification.series_chains.push(chain),
            None => {
                for &i in &component {
                    classification.floating.push(resistors[i].clone());
                }
            }
        }
    }

    debug!(
        "classified {} resistors: {} parallel groups, {} series chains, {} floating",
        resistors.len(),
        classification.parallel_groups.len(),
        classification.series_chains.len(),
        classification.floating.len()
    );

    classification
}

/// Order a connected component of series-candidate resistors into a simple
/// path, endpoint to endpoint.
///
/// Returns `None` when the component is not a foldable chain: a single edge
/// (only two distinct nodes), a branch (some node of degree > 2), or a cycle
/// (no degree-1 endpoint to start from). Such components are downgraded to
/// floating rather than mis-ordered.
fn order_as_path(resistors: &[Element], component: &[usize]) -> Option<Vec<Element>> {
    let mut degrees: HashMap<u32, usize> = HashMap::new();
    for &i in component {
        *degrees.entry(resistors[i].nodes.start).or_insert(0) += 1;
        *degrees.entry(resistors[i].nodes.end).or_insert(0) += 1;
    }

    if degrees.len() <= 2 {
        return None;
    }
    if degrees.values().any(|&d| d > 2) {
        return None;
    }

    let mut endpoints: Vec<u32> = degrees
        .iter()
        .filter(|(_, &d)| d == 1)
        .map(|(&node, _)| node)
        .collect();
    if endpoints.len() != 2 {
        // Max degree 2 with no endpoints means the component is a cycle
        return None;
    }
    endpoints.sort_unstable();

    // Walk from the lower-numbered endpoint, consuming one edge per hop
    let mut chain = Vec::with_capacity(component.len());
    let mut used: HashSet<usize> = HashSet::new();
    let mut node = endpoints[0];
    while used.len() < component.len() {
        let next = component
            .iter()
            .copied()
            .find(|i| !used.contains(i) && resistors[*i].nodes.contains(node))?;
        used.insert(next);
        node = resistors[next].nodes.other_end(node);
        chain.push(resistors[next].clone());
    }

    Some(chain)
}
