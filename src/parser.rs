use nom::{
    bytes::complete::take_while1,
    character::complete::{alpha1, alphanumeric0, digit1, space0, space1},
    combinator::{map_res, recognize},
    sequence::pair,
    IResult,
};
use std::fs;

use anyhow::{anyhow, Result};
use log::warn;

use crate::element::{Element, ElementKind};
use crate::network::Network;
use crate::units::resolve_value;

/// Reader for the legacy netlist format: a title line, one element per line
/// (`<tag> <start> <end> <value>`), and a terminating `.end` directive. The
/// tag's first letter selects the element kind, case-insensitively.
pub struct NetlistParser;

impl Default for NetlistParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NetlistParser {
    pub fn new() -> Self {
        NetlistParser
    }

    pub fn parse_file(&self, filename: &str) -> Result<Network> {
        let content = fs::read_to_string(filename)
            .map_err(|e| anyhow!("Failed to read file '{}': {}", filename, e))?;

        self.parse_netlist(&content)
    }

    pub fn parse_netlist(&self, content: &str) -> Result<Network> {
        let lines = self.preprocess_lines(content);
        if lines.is_empty() {
            return Err(anyhow!("Netlist is empty"));
        }

        // First line is always the title
        let mut network = Network::new(lines[0].clone());

        for line in &lines[1..] {
            if line.starts_with('.') {
                if line.to_lowercase().starts_with(".end") {
                    break;
                }
                // Other directives are not supported; ignore them
                continue;
            }

            let (letter, start, end, token) = match parse_element_line(line) {
                Ok((_, parsed)) => parsed,
                Err(_) => {
                    warn!("Skipping malformed netlist line: '{}'", line);
                    continue;
                }
            };

            let kind = match ElementKind::from_letter(letter) {
                Some(kind) => kind,
                None => {
                    warn!("Skipping unknown element type '{}': '{}'", letter, line);
                    continue;
                }
            };

            // A bad value token only loses this element, not the netlist
            let value = match resolve_value(token) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Skipping element with unresolvable value ({}): '{}'", e, line);
                    continue;
                }
            };

            // Construction failures (identical endpoints) abort the parse
            let element = Element::new(kind, start, end, value)?;
            network.add_element(element);
        }

        Ok(network)
    }

    /// Trim lines, dropping blanks and comments.
    fn preprocess_lines(&self, content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('*') && !line.starts_with(';'))
            .map(str::to_string)
            .collect()
    }
}

fn parse_element_line(input: &str) -> IResult<&str, (char, u32, u32, &str)> {
    let (input, _) = space0(input)?;
    let (input, name) = recognize(pair(alpha1, alphanumeric0))(input)?;
    let (input, _) = space1(input)?;
    let (input, start) = map_res(digit1, str::parse::<u32>)(input)?;
    let (input, _) = space1(input)?;
    let (input, end) = map_res(digit1, str::parse::<u32>)(input)?;
    let (input, _) = space1(input)?;
    let (input, value) = take_while1(|c: char| !c.is_whitespace())(input)?;
    let (input, _) = space0(input)?;

    // alpha1 guarantees at least one letter
    let letter = name.chars().next().unwrap();
    Ok((input, (letter, start, end, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "Voltage divider\nv1 1 0 5\nr1 1 2 1.50k\nr2 2 0 1.50k\n.end\n";

    #[test]
    fn test_parse_netlist() {
        let parser = NetlistParser::new();
        let network = parser.parse_netlist(SAMPLE).unwrap();

        assert_eq!(network.title, "Voltage divider");
        assert_eq!(network.resistors().len(), 2);
        assert_eq!(network.voltage_sources().len(), 1);
        assert_eq!(network.resistors()[0].value, 1500.0);
        assert_eq!(network.resistors()[0].tag, "R_12");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let parser = NetlistParser::new();
        let network = parser
            .parse_netlist("title\nR1 1 2 100\nV1 1 0 5\n.end\n")
            .unwrap();
        assert_eq!(network.resistors().len(), 1);
        assert_eq!(network.voltage_sources().len(), 1);
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let content = "title\n* a comment\n\nr1 1 2 100\n; another comment\n.end\n";
        let network = NetlistParser::new().parse_netlist(content).unwrap();
        assert_eq!(network.element_count(), 1);
    }

    #[test]
    fn test_bad_value_skips_element_only() {
        let content = "title\nr1 1 2 oops\nr2 2 3 100\n.end\n";
        let network = NetlistParser::new().parse_netlist(content).unwrap();
        assert_eq!(network.resistors().len(), 1);
        assert_eq!(network.resistors()[0].tag, "R_23");
    }

    #[test]
    fn test_same_node_aborts_parse() {
        let content = "title\nr1 2 2 100\n.end\n";
        assert!(NetlistParser::new().parse_netlist(content).is_err());
    }

    #[test]
    fn test_lines_after_end_ignored() {
        let content = "title\nr1 1 2 100\n.end\nr2 2 3 100\n";
        let network = NetlistParser::new().parse_netlist(content).unwrap();
        assert_eq!(network.resistors().len(), 1);
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let network = NetlistParser::new()
            .parse_file(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(network.element_count(), 3);
    }

    #[test]
    fn test_element_line_grammar() {
        let (_, (letter, start, end, value)) = parse_element_line("r12 4 7 10.5µ").unwrap();
        assert_eq!(letter, 'r');
        assert_eq!(start, 4);
        assert_eq!(end, 7);
        assert_eq!(value, "10.5µ");
    }
}
