use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::Serialize;

use crate::classify::classify;
use crate::cli::OutputFormat;
use crate::element::Element;
use crate::explain::{Explanation, Order, ParallelFold, PassRecord, SeriesFold};
use crate::network::Network;

/// Terminal state of the reduction fixed point.
#[derive(Debug, Clone, Serialize)]
pub enum Outcome {
    /// Exactly one resistor remains; its value is the equivalent resistance.
    Complete { equivalent: Element },
    /// A pass made no progress with more than one resistor left: the network
    /// is not fully series-parallel reducible.
    Partial { residual: Vec<Element> },
}

/// Result of reducing a network to a fixed point.
#[derive(Debug, Clone, Serialize)]
pub struct Reduction {
    pub title: String,
    pub outcome: Outcome,
    pub explanation: Explanation,
    pub passes: usize,
}

impl Reduction {
    /// The equivalent resistance on complete reduction.
    pub fn equivalent_resistance(&self) -> Option<f64> {
        match &self.outcome {
            Outcome::Complete { equivalent } => Some(equivalent.value),
            Outcome::Partial { .. } => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, Outcome::Complete { .. })
    }

    /// Export the reduction report to a file
    pub fn export_results(&self, filename: &str, format: OutputFormat, order: Order) -> Result<()> {
        match format {
            OutputFormat::Text => self.export_text(filename, order),
            OutputFormat::Json => self.export_json(filename),
            OutputFormat::Csv => self.export_csv(filename),
        }
    }

    fn export_text(&self, filename: &str, order: Order) -> Result<()> {
        std::fs::write(filename, self.summary_text(order))?;
        info!("Results exported to text: {}", filename);
        Ok(())
    }

    fn export_json(&self, filename: &str) -> Result<()> {
        let file = std::fs::File::create(filename)?;
        serde_json::to_writer_pretty(file, self)?;

        info!("Results exported to JSON: {}", filename);
        Ok(())
    }

    /// Export one CSV row per fold step
    fn export_csv(&self, filename: &str) -> Result<()> {
        let file = std::fs::File::create(filename)?;
        let mut writer = csv::Writer::from_writer(file);

        writer.write_record(["pass", "law", "folded", "result_tag", "result_value"])?;
        for (pass, record) in self.explanation.passes().iter().enumerate() {
            for fold in &record.parallel {
                let folded: Vec<&str> = fold.inputs.iter().map(|r| r.tag.as_str()).collect();
                writer.write_record([
                    (pass + 1).to_string(),
                    "parallel".to_string(),
                    folded.join("|"),
                    fold.result.tag.clone(),
                    fold.result.value.to_string(),
                ])?;
            }
            for fold in &record.series {
                let folded: Vec<&str> = fold.inputs.iter().map(|r| r.tag.as_str()).collect();
                writer.write_record([
                    (pass + 1).to_string(),
                    "series".to_string(),
                    folded.join("+"),
                    fold.result.tag.clone(),
                    fold.result.value.to_string(),
                ])?;
            }
        }

        writer.flush()?;
        info!("Results exported to CSV: {}", filename);
        Ok(())
    }

    /// Full report text: outcome plus the rendered derivation.
    pub fn summary_text(&self, order: Order) -> String {
        let mut text = String::new();
        text.push_str(&format!("Network: {}\n", self.title));
        text.push_str(&format!("Reduction passes: {}\n", self.passes));

        match &self.outcome {
            Outcome::Complete { equivalent } => {
                text.push_str(&format!(
                    "Equivalent resistance: {}{} between nodes {} and {}\n",
                    equivalent.value,
                    equivalent.symbol,
                    equivalent.nodes.start,
                    equivalent.nodes.end
                ));
            }
            Outcome::Partial { residual } => {
                text.push_str(&format!(
                    "Partial reduction: {} resistors remain (network is not series-parallel reducible)\n",
                    residual.len()
                ));
                for resistor in residual {
                    text.push_str(&format!(
                        "  {} = {}{} between nodes {} and {}\n",
                        resistor.tag,
                        resistor.value,
                        resistor.symbol,
                        resistor.nodes.start,
                        resistor.nodes.end
                    ));
                }
            }
        }

        if !self.explanation.is_empty() {
            text.push('\n');
            text.push_str(&self.explanation.render(order));
        }

        text
    }

    /// Print the reduction summary
    pub fn print_summary(&self, order: Order) {
        print!("{}", self.summary_text(order));
    }
}

/// Fold every currently-foldable group once.
///
/// Parallel groups and foldable series chains each collapse to one resistor;
/// floating resistors and non-resistor elements carry through untouched. The
/// input network is never mutated: a new network is assembled from scratch.
pub fn reduce_pass(network: &Network) -> Result<(Network, PassRecord)> {
    let classification = classify(network.resistors());
    let mut record = PassRecord::default();
    let mut folded: Vec<Element> = Vec::new();

    for (nodes, group) in &classification.parallel_groups {
        let mut iter = group.iter();
        let first = iter
            .next()
            .ok_or_else(|| anyhow!("empty parallel group at {:?}", nodes))?;
        let mut equivalent = first.clone();
        for resistor in iter {
            equivalent = equivalent.combine_parallel(resistor)?;
        }
        debug!(
            "folded parallel group at ({}, {}) -> {} = {}{}",
            nodes.start, nodes.end, equivalent.tag, equivalent.value, equivalent.symbol
        );
        record.parallel.push(ParallelFold {
            nodes: *nodes,
            inputs: group.clone(),
            result: equivalent.clone(),
        });
        folded.push(equivalent);
    }

    for chain in &classification.series_chains {
        let mut iter = chain.iter();
        let first = iter
            .next()
            .ok_or_else(|| anyhow!("empty series chain"))?;
        let mut equivalent = first.clone();
        for resistor in iter {
            equivalent = equivalent.combine_series(resistor)?;
        }
        debug!(
            "folded series chain of {} -> {} = {}{}",
            chain.len(),
            equivalent.tag,
            equivalent.value,
            equivalent.symbol
        );
        record.series.push(SeriesFold {
            inputs: chain.clone(),
            result: equivalent.clone(),
        });
        folded.push(equivalent);
    }

    folded.extend(classification.floating.iter().cloned());

    let mut next = Network::new(network.title.clone());
    for resistor in folded {
        next.add_element(resistor);
    }
    for element in network.elements() {
        if !element.is_resistor() {
            next.add_element(element.clone());
        }
    }

    Ok((next, record))
}

/// Iterate reduction passes to a fixed point.
///
/// Passes repeat while more than one resistor remains and the previous pass
/// strictly decreased the resistor count. A zero-progress pass terminates
/// with a partial outcome carrying the residual resistors; a single-resistor
/// network completes in zero passes.
pub fn reduce(network: Network) -> Result<Reduction> {
    if network.resistors().is_empty() {
        return Err(anyhow!("network '{}' contains no resistors", network.title));
    }

    info!(
        "reducing network '{}' with {} resistors",
        network.title,
        network.resistors().len()
    );

    let mut current = network;
    let mut explanation = Explanation::new();
    let mut passes = 0;

    loop {
        let count = current.resistors().len();
        if count == 1 {
            let equivalent = current.resistors()[0].clone();
            info!(
                "reduction complete after {} passes: {} = {}{}",
                passes, equivalent.tag, equivalent.value, equivalent.symbol
            );
            return Ok(Reduction {
                title: current.title.clone(),
                outcome: Outcome::Complete { equivalent },
                explanation,
                passes,
            });
        }

        let (next, record) = reduce_pass(&current)?;
        passes += 1;

        let remaining = next.resistors().len();
        info!(
            "pass {}: {} resistors -> {} resistors",
            passes, count, remaining
        );

        if remaining >= count {
            info!(
                "no progress with {} resistors remaining; network is not series-parallel reducible",
                remaining
            );
            return Ok(Reduction {
                title: next.title.clone(),
                outcome: Outcome::Partial {
                    residual: next.resistors().to_vec(),
                },
                explanation,
                passes,
            });
        }

        explanation.push(record);
        current = next;
    }
}
