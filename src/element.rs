use serde::Serialize;

use crate::error::NetlistError;

/// A canonical unordered node pair: endpoints are stored sorted so that
/// (3, 1) and (1, 3) compare and group identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodePair {
    pub start: u32,
    pub end: u32,
}

impl NodePair {
    pub fn new(a: u32, b: u32) -> Result<Self, NetlistError> {
        if a == b {
            return Err(NetlistError::SameNode { node: a });
        }
        Ok(NodePair {
            start: a.min(b),
            end: a.max(b),
        })
    }

    pub fn contains(&self, node: u32) -> bool {
        self.start == node || self.end == node
    }

    /// The endpoint shared with `other`, if the pairs share exactly one.
    pub fn shared_node(&self, other: &NodePair) -> Option<u32> {
        if *self == *other {
            return None;
        }
        if other.contains(self.start) {
            Some(self.start)
        } else if other.contains(self.end) {
            Some(self.end)
        } else {
            None
        }
    }

    /// The endpoint opposite `node`.
    pub fn other_end(&self, node: u32) -> u32 {
        if self.start == node {
            self.end
        } else {
            self.start
        }
    }
}

/// Types of netlist elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Resistor,
    Inductor,
    Capacitor,
    VoltageSource,
    CurrentSource,
}

impl ElementKind {
    /// Select a kind from the first letter of a netlist tag (case-insensitive).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'r' => Some(ElementKind::Resistor),
            'l' => Some(ElementKind::Inductor),
            'c' => Some(ElementKind::Capacitor),
            'v' => Some(ElementKind::VoltageSource),
            'i' => Some(ElementKind::CurrentSource),
            _ => None,
        }
    }

    /// Lowercase kind letter used to bucket elements (`r`, `l`, `c`, `v`, `i`).
    pub fn letter(&self) -> char {
        match self {
            ElementKind::Resistor => 'r',
            ElementKind::Inductor => 'l',
            ElementKind::Capacitor => 'c',
            ElementKind::VoltageSource => 'v',
            ElementKind::CurrentSource => 'i',
        }
    }

    /// Uppercase letter used in element tags.
    pub fn tag_letter(&self) -> char {
        match self {
            ElementKind::Resistor => 'R',
            ElementKind::Inductor => 'L',
            ElementKind::Capacitor => 'C',
            ElementKind::VoltageSource => 'V',
            ElementKind::CurrentSource => 'I',
        }
    }

    /// Display unit for the element's value.
    pub fn symbol(&self) -> &'static str {
        match self {
            ElementKind::Resistor => "Ω",
            ElementKind::Inductor => "H",
            ElementKind::Capacitor => "F",
            ElementKind::VoltageSource => "v",
            ElementKind::CurrentSource => "A",
        }
    }

    pub fn is_source(&self) -> bool {
        matches!(self, ElementKind::VoltageSource | ElementKind::CurrentSource)
    }
}

/// A two-terminal netlist element. Immutable after construction: reduction
/// passes build new elements rather than rewriting existing ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub kind: ElementKind,
    pub nodes: NodePair,
    pub value: f64,
    pub symbol: &'static str,
    pub tag: String,
    /// Solved quantities, unset until an external solver fills them in.
    pub voltage: Option<f64>,
    pub current: Option<f64>,
}

impl Element {
    pub fn new(kind: ElementKind, start: u32, end: u32, value: f64) -> Result<Self, NetlistError> {
        let nodes = NodePair::new(start, end)?;
        Ok(Element {
            kind,
            nodes,
            value,
            symbol: kind.symbol(),
            tag: format!("{}_{}{}", kind.tag_letter(), nodes.start, nodes.end),
            voltage: None,
            current: None,
        })
    }

    pub fn resistor(start: u32, end: u32, resistance: f64) -> Result<Self, NetlistError> {
        Element::new(ElementKind::Resistor, start, end, resistance)
    }

    pub fn inductor(start: u32, end: u32, inductance: f64) -> Result<Self, NetlistError> {
        Element::new(ElementKind::Inductor, start, end, inductance)
    }

    pub fn capacitor(start: u32, end: u32, capacitance: f64) -> Result<Self, NetlistError> {
        Element::new(ElementKind::Capacitor, start, end, capacitance)
    }

    pub fn voltage_source(start: u32, end: u32, voltage: f64) -> Result<Self, NetlistError> {
        Element::new(ElementKind::VoltageSource, start, end, voltage)
    }

    pub fn current_source(start: u32, end: u32, current: f64) -> Result<Self, NetlistError> {
        Element::new(ElementKind::CurrentSource, start, end, current)
    }

    pub fn is_resistor(&self) -> bool {
        self.kind == ElementKind::Resistor
    }

    /// Conductance of a resistive element with a nonzero value.
    pub fn conductance(&self) -> Option<f64> {
        if self.is_resistor() && self.value != 0.0 {
            Some(1.0 / self.value)
        } else {
            None
        }
    }

    /// Combine two resistors in series.
    ///
    /// The operands must share exactly one endpoint; the result spans the two
    /// non-shared endpoints with value `a + b`.
    pub fn combine_series(&self, other: &Element) -> Result<Element, NetlistError> {
        let shared = self
            .nodes
            .shared_node(&other.nodes)
            .ok_or_else(|| NetlistError::NotInSeries {
                a: self.tag.clone(),
                b: other.tag.clone(),
            })?;

        Element::resistor(
            self.nodes.other_end(shared),
            other.nodes.other_end(shared),
            self.value + other.value,
        )
    }

    /// Combine two resistors in parallel.
    ///
    /// The operands must share both endpoints; the result keeps the node pair
    /// with value `1 / (1/a + 1/b)`. A zero-ohm operand short-circuits the
    /// pair, so the equivalent is zero rather than a division by zero.
    pub fn combine_parallel(&self, other: &Element) -> Result<Element, NetlistError> {
        if self.nodes != other.nodes {
            return Err(NetlistError::NotInParallel {
                a: self.tag.clone(),
                b: other.tag.clone(),
            });
        }

        let value = if self.value == 0.0 || other.value == 0.0 {
            0.0
        } else {
            1.0 / (1.0 / self.value + 1.0 / other.value)
        };

        Element::resistor(self.nodes.start, self.nodes.end, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_pair_canonical_order() {
        let forward = NodePair::new(1, 3).unwrap();
        let backward = NodePair::new(3, 1).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.start, 1);
        assert_eq!(forward.end, 3);
    }

    #[test]
    fn test_same_node_rejected() {
        for node in [0, 1, 42] {
            let err = NodePair::new(node, node).unwrap_err();
            assert_eq!(err, NetlistError::SameNode { node });
        }
        assert!(Element::resistor(7, 7, 10.0).is_err());
    }

    #[test]
    fn test_tag_uses_canonical_nodes() {
        let resistor = Element::resistor(5, 4, 10.5).unwrap();
        assert_eq!(resistor.tag, "R_45");
        assert_eq!(resistor.symbol, "Ω");
    }

    #[test]
    fn test_conductance() {
        let resistor = Element::resistor(5, 4, 2.0).unwrap();
        assert_eq!(resistor.conductance(), Some(0.5));

        let source = Element::voltage_source(1, 0, 5.0).unwrap();
        assert_eq!(source.conductance(), None);
    }

    #[test]
    fn test_series_combination() {
        let a = Element::resistor(1, 2, 1.0).unwrap();
        let b = Element::resistor(2, 3, 2.0).unwrap();

        let eq = a.combine_series(&b).unwrap();
        assert_eq!(eq.value, 3.0);
        assert_eq!(eq.nodes, NodePair::new(1, 3).unwrap());
    }

    #[test]
    fn test_series_requires_shared_endpoint() {
        let a = Element::resistor(1, 2, 1.0).unwrap();
        let b = Element::resistor(3, 4, 2.0).unwrap();
        let err = a.combine_series(&b).unwrap_err();
        assert!(matches!(err, NetlistError::NotInSeries { .. }));

        // Sharing both endpoints is parallel, not series
        let c = Element::resistor(1, 2, 2.0).unwrap();
        assert!(a.combine_series(&c).is_err());
    }

    #[test]
    fn test_parallel_combination() {
        let a = Element::resistor(1, 2, 2.0).unwrap();
        let b = Element::resistor(1, 2, 2.0).unwrap();

        let eq = a.combine_parallel(&b).unwrap();
        assert_eq!(eq.value, 1.0);
        assert_eq!(eq.nodes, a.nodes);
    }

    #[test]
    fn test_parallel_is_commutative() {
        let a = Element::resistor(1, 2, 3.0).unwrap();
        let b = Element::resistor(1, 2, 6.0).unwrap();

        let ab = a.combine_parallel(&b).unwrap();
        let ba = b.combine_parallel(&a).unwrap();
        assert_eq!(ab.value, ba.value);
        assert_eq!(ab.value, 2.0);
    }

    #[test]
    fn test_parallel_requires_matching_pair() {
        let a = Element::resistor(1, 2, 1.0).unwrap();
        let b = Element::resistor(2, 3, 2.0).unwrap();
        let err = a.combine_parallel(&b).unwrap_err();
        assert!(matches!(err, NetlistError::NotInParallel { .. }));
    }

    #[test]
    fn test_parallel_zero_ohm_short() {
        let a = Element::resistor(1, 2, 0.0).unwrap();
        let b = Element::resistor(1, 2, 5.0).unwrap();
        assert_eq!(a.combine_parallel(&b).unwrap().value, 0.0);
    }
}
