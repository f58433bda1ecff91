use clap::{Arg, ArgMatches, Command};
use colored::*;
use log::{error, info};
use std::path::Path;

use netreduce::cli::CliArgs;
use netreduce::parser::NetlistParser;
use netreduce::reduce::reduce;

fn main() {
    env_logger::init();

    let matches = create_cli().get_matches();

    if let Err(e) = run_application(&matches) {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn create_cli() -> Command {
    Command::new("netreduce")
        .version(netreduce::VERSION)
        .about("Computes the equivalent resistance of a netlist by series/parallel reduction")
        .arg(
            Arg::new("input")
                .help("Input netlist file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file for the reduction report"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json", "csv"])
                .help("Output format"),
        )
        .arg(
            Arg::new("explain")
                .long("explain")
                .value_name("ORDER")
                .default_value("last")
                .value_parser(["first", "last"])
                .help("Derivation order: first fold first, or final fold first"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::Count)
                .help("Increase verbosity level"),
        )
}

fn run_application(matches: &ArgMatches) -> anyhow::Result<()> {
    let args = CliArgs::from_matches(matches)?;

    info!("{}", "Starting netreduce".green().bold());
    info!("Input file: {}", args.input_file.bright_blue());

    if !Path::new(&args.input_file).exists() {
        return Err(anyhow::anyhow!("Input file '{}' not found", args.input_file));
    }

    let parser = NetlistParser::new();
    let network = parser.parse_file(&args.input_file)?;

    info!("Loaded netlist: {}", network.title);
    network.print_summary();

    let reduction = reduce(network)?;

    if reduction.is_complete() {
        info!("{}", "Network fully reduced".green().bold());
    } else {
        info!("{}", "Network only partially reducible".yellow().bold());
    }

    if let Some(output_file) = args.output_file {
        reduction.export_results(&output_file, args.output_format, args.explain_order)?;
        info!("Results exported to: {}", output_file.bright_green());
    } else {
        reduction.print_summary(args.explain_order);
    }

    Ok(())
}
