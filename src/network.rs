use serde::Serialize;
use std::collections::HashMap;

use crate::element::{Element, ElementKind};

/// Complete network representation: elements bucketed by kind, insertion
/// order preserved within each bucket.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Network {
    pub title: String,
    resistors: Vec<Element>,
    inductors: Vec<Element>,
    capacitors: Vec<Element>,
    voltage_sources: Vec<Element>,
    current_sources: Vec<Element>,
}

impl Network {
    pub fn new(title: String) -> Self {
        Network {
            title,
            ..Default::default()
        }
    }

    pub fn from_elements(title: String, elements: Vec<Element>) -> Self {
        let mut network = Network::new(title);
        for element in elements {
            network.add_element(element);
        }
        network
    }

    /// Add an element to the bucket selected by its kind
    pub fn add_element(&mut self, element: Element) {
        match element.kind {
            ElementKind::Resistor => self.resistors.push(element),
            ElementKind::Inductor => self.inductors.push(element),
            ElementKind::Capacitor => self.capacitors.push(element),
            ElementKind::VoltageSource => self.voltage_sources.push(element),
            ElementKind::CurrentSource => self.current_sources.push(element),
        }
    }

    pub fn resistors(&self) -> &[Element] {
        &self.resistors
    }

    pub fn inductors(&self) -> &[Element] {
        &self.inductors
    }

    pub fn capacitors(&self) -> &[Element] {
        &self.capacitors
    }

    pub fn voltage_sources(&self) -> &[Element] {
        &self.voltage_sources
    }

    pub fn current_sources(&self) -> &[Element] {
        &self.current_sources
    }

    /// All voltage and current sources
    pub fn sources(&self) -> Vec<&Element> {
        self.voltage_sources
            .iter()
            .chain(self.current_sources.iter())
            .collect()
    }

    pub fn elements_of_kind(&self, kind: ElementKind) -> &[Element] {
        match kind {
            ElementKind::Resistor => &self.resistors,
            ElementKind::Inductor => &self.inductors,
            ElementKind::Capacitor => &self.capacitors,
            ElementKind::VoltageSource => &self.voltage_sources,
            ElementKind::CurrentSource => &self.current_sources,
        }
    }

    /// All elements in kind order (r, l, c, v, i)
    pub fn elements(&self) -> Vec<&Element> {
        self.resistors
            .iter()
            .chain(self.inductors.iter())
            .chain(self.capacitors.iter())
            .chain(self.voltage_sources.iter())
            .chain(self.current_sources.iter())
            .collect()
    }

    pub fn element_count(&self) -> usize {
        self.resistors.len()
            + self.inductors.len()
            + self.capacitors.len()
            + self.voltage_sources.len()
            + self.current_sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Distinct node identifiers across all elements
    pub fn node_count(&self) -> usize {
        let mut nodes = std::collections::HashSet::new();
        for element in self.elements() {
            nodes.insert(element.nodes.start);
            nodes.insert(element.nodes.end);
        }
        nodes.len()
    }

    /// Print network summary
    pub fn print_summary(&self) {
        println!("Network: {}", self.title);
        println!("Nodes: {}", self.node_count());
        println!("Elements: {}", self.element_count());

        let mut type_counts = HashMap::new();
        for element in self.elements() {
            let type_name = match element.kind {
                ElementKind::Resistor => "Resistors",
                ElementKind::Inductor => "Inductors",
                ElementKind::Capacitor => "Capacitors",
                ElementKind::VoltageSource => "Voltage Sources",
                ElementKind::CurrentSource => "Current Sources",
            };
            *type_counts.entry(type_name).or_insert(0) += 1;
        }

        for (type_name, count) in type_counts {
            println!("  {}: {}", type_name, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_bucketed_by_kind() {
        let mut network = Network::new("Test Network".to_string());
        network.add_element(Element::resistor(1, 2, 100.0).unwrap());
        network.add_element(Element::resistor(2, 3, 200.0).unwrap());
        network.add_element(Element::voltage_source(1, 0, 5.0).unwrap());
        network.add_element(Element::capacitor(3, 0, 1e-6).unwrap());

        assert_eq!(network.resistors().len(), 2);
        assert_eq!(network.voltage_sources().len(), 1);
        assert_eq!(network.capacitors().len(), 1);
        assert_eq!(network.inductors().len(), 0);
        assert_eq!(network.sources().len(), 1);
        assert_eq!(network.element_count(), 4);
        assert_eq!(network.node_count(), 4);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let elements = vec![
            Element::resistor(2, 3, 200.0).unwrap(),
            Element::resistor(1, 2, 100.0).unwrap(),
        ];
        let network = Network::from_elements("ordered".to_string(), elements);

        assert_eq!(network.resistors()[0].tag, "R_23");
        assert_eq!(network.resistors()[1].tag, "R_12");
    }
}
