use anyhow::{anyhow, Result};
use clap::ArgMatches;

use crate::explain::Order;

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub input_file: String,
    pub output_file: Option<String>,
    pub output_format: OutputFormat,
    pub explain_order: Order,
    pub verbose_level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl CliArgs {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let input_file = matches
            .get_one::<String>("input")
            .ok_or_else(|| anyhow!("Input file is required"))?
            .clone();

        let output_file = matches.get_one::<String>("output").cloned();

        let verbose_level = matches.get_count("verbose");

        let output_format = match matches.get_one::<String>("format").unwrap().as_str() {
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            _ => return Err(anyhow!("Invalid output format")),
        };

        let explain_order = match matches.get_one::<String>("explain").unwrap().as_str() {
            "first" => Order::FirstToLast,
            "last" => Order::LastToFirst,
            _ => return Err(anyhow!("Invalid explanation order")),
        };

        Ok(CliArgs {
            input_file,
            output_file,
            output_format,
            explain_order,
            verbose_level,
        })
    }
}
