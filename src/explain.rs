use serde::Serialize;
use std::fmt::Write;

use crate::element::{Element, NodePair};

/// One series chain folded into its equivalent resistor.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesFold {
    pub inputs: Vec<Element>,
    pub result: Element,
}

/// One parallel group folded into its equivalent resistor.
#[derive(Debug, Clone, Serialize)]
pub struct ParallelFold {
    pub nodes: NodePair,
    pub inputs: Vec<Element>,
    pub result: Element,
}

/// Everything folded during a single reduction pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PassRecord {
    pub series: Vec<SeriesFold>,
    pub parallel: Vec<ParallelFold>,
}

impl PassRecord {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.parallel.is_empty()
    }
}

/// Rendering direction for the derivation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Chronological: the first fold performed appears first.
    FirstToLast,
    /// The final fold appears first, unwinding back to the original network.
    LastToFirst,
}

/// Append-only log of reduction passes, rendered on demand.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Explanation {
    passes: Vec<PassRecord>,
}

impl Explanation {
    pub fn new() -> Self {
        Explanation::default()
    }

    pub fn push(&mut self, record: PassRecord) {
        self.passes.push(record);
    }

    pub fn passes(&self) -> &[PassRecord] {
        &self.passes
    }

    pub fn is_empty(&self) -> bool {
        self.passes.iter().all(PassRecord::is_empty)
    }

    /// Render the full derivation as text, one block per fold.
    pub fn render(&self, order: Order) -> String {
        let mut text = String::new();

        let passes: Vec<&PassRecord> = match order {
            Order::FirstToLast => self.passes.iter().collect(),
            Order::LastToFirst => self.passes.iter().rev().collect(),
        };

        for record in passes {
            for fold in &record.series {
                render_series_fold(&mut text, fold);
            }
            for fold in &record.parallel {
                render_parallel_fold(&mut text, fold);
            }
        }

        text
    }
}

fn render_series_fold(text: &mut String, fold: &SeriesFold) {
    let names: Vec<String> = fold
        .inputs
        .iter()
        .map(|r| format!("{} ({}{})", r.tag, r.value, r.symbol))
        .collect();
    let terms: Vec<String> = fold
        .inputs
        .iter()
        .map(|r| format!("{}{}", r.value, r.symbol))
        .collect();

    writeln!(
        text,
        "The following resistors are in series: {}",
        names.join(" ")
    )
    .ok();
    writeln!(
        text,
        "( {} ) = {}{}  [{}]",
        terms.join(" + "),
        fold.result.value,
        fold.result.symbol,
        fold.result.tag
    )
    .ok();
}

fn render_parallel_fold(text: &mut String, fold: &ParallelFold) {
    let names: Vec<String> = fold
        .inputs
        .iter()
        .map(|r| format!("{} ({}{})", r.tag, r.value, r.symbol))
        .collect();
    let terms: Vec<String> = fold
        .inputs
        .iter()
        .map(|r| format!("1/({}{})", r.value, r.symbol))
        .collect();

    writeln!(
        text,
        "The following resistors are in parallel: {}",
        names.join(" ")
    )
    .ok();
    writeln!(
        text,
        "1 / ( {} ) = {}{}  [{}]",
        terms.join(" + "),
        fold.result.value,
        fold.result.symbol,
        fold.result.tag
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resistor(start: u32, end: u32, value: f64) -> Element {
        Element::resistor(start, end, value).unwrap()
    }

    fn sample_explanation() -> Explanation {
        let mut explanation = Explanation::new();

        let mut first = PassRecord::default();
        first.series.push(SeriesFold {
            inputs: vec![resistor(1, 2, 1.0), resistor(2, 3, 2.0)],
            result: resistor(1, 3, 3.0),
        });
        explanation.push(first);

        let mut second = PassRecord::default();
        second.parallel.push(ParallelFold {
            nodes: NodePair::new(1, 3).unwrap(),
            inputs: vec![resistor(1, 3, 3.0), resistor(1, 3, 6.0)],
            result: resistor(1, 3, 2.0),
        });
        explanation.push(second);

        explanation
    }

    #[test]
    fn test_render_chronological() {
        let text = sample_explanation().render(Order::FirstToLast);

        let series_at = text.find("in series").unwrap();
        let parallel_at = text.find("in parallel").unwrap();
        assert!(series_at < parallel_at);
        assert!(text.contains("( 1Ω + 2Ω ) = 3Ω"));
        assert!(text.contains("1 / ( 1/(3Ω) + 1/(6Ω) ) = 2Ω"));
    }

    #[test]
    fn test_render_reversed() {
        let text = sample_explanation().render(Order::LastToFirst);

        let series_at = text.find("in series").unwrap();
        let parallel_at = text.find("in parallel").unwrap();
        assert!(parallel_at < series_at);
    }

    #[test]
    fn test_render_does_not_mutate() {
        let explanation = sample_explanation();
        let first = explanation.render(Order::FirstToLast);
        let second = explanation.render(Order::FirstToLast);
        assert_eq!(first, second);
        assert_eq!(explanation.passes().len(), 2);
    }
}
