use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ipconv_cidr::{assemble, cidr_table, AddressBlock, AddressForms, ConversionResult};
use ipconv_validator::{parse_validated, split_combined, validate, ValidationReport, ValidatorError};

mod batch;
mod settings;

use batch::{BatchProcessor, BatchResult};
use settings::{Notation, OutputFormat, Settings};

/// IPv4 subnet calculator: masks, network ranges and address classes
#[derive(Parser)]
#[command(name = "ipconv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format [env: IPCONV_OUTPUT] [default: human]
    #[arg(short, long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// Address notation [env: IPCONV_NOTATION] [default: both]
    #[arg(short, long, value_enum, global = true)]
    notation: Option<Notation>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an address and prefix length into subnet details
    Convert(ConvertArgs),
    /// Check address and CIDR input without converting
    Validate(ValidateArgs),
    /// Print masks and host counts for every prefix length
    Table,
    /// List the known address blocks
    Blocks,
    /// Convert many inputs from a file or stdin
    Batch(BatchArgs),
}

#[derive(Parser)]
struct ConvertArgs {
    /// IPv4 address, optionally with prefix (e.g., 192.168.10.1/24)
    #[arg(value_name = "ADDRESS[/CIDR]")]
    target: String,

    /// Prefix length (overrides any /CIDR in the target)
    #[arg(short, long)]
    cidr: Option<String>,
}

#[derive(Parser)]
struct ValidateArgs {
    /// IPv4 address, optionally with prefix
    #[arg(value_name = "ADDRESS[/CIDR]")]
    target: String,

    /// Prefix length (overrides any /CIDR in the target)
    #[arg(short, long)]
    cidr: Option<String>,
}

#[derive(Parser)]
struct BatchArgs {
    /// Input file (use '-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Number of worker threads
    #[arg(short, long)]
    workers: Option<usize>,
}

/// Catalog entry as printed by `blocks`
#[derive(Serialize)]
struct BlockRow {
    name: &'static str,
    address_class: String,
    scope: String,
    first_address: AddressForms,
    last_address: AddressForms,
    default_cidr: Option<u8>,
}

impl From<&AddressBlock> for BlockRow {
    fn from(block: &AddressBlock) -> Self {
        Self {
            name: block.name(),
            address_class: block.address_class().to_string(),
            scope: block.scope().to_string(),
            first_address: AddressForms::from(block.first_address()),
            last_address: AddressForms::from(block.last_address()),
            default_cidr: block.default_cidr(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::resolve(cli.output, cli.notation)?;
    debug!(?settings, "resolved settings");

    match cli.command {
        Commands::Convert(args) => handle_convert(args, settings)?,
        Commands::Validate(args) => handle_validate(args, settings)?,
        Commands::Table => handle_table(settings)?,
        Commands::Blocks => handle_blocks(settings)?,
        Commands::Batch(args) => handle_batch(args, settings)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// IP and CIDR text from a target plus optional `--cidr`
fn split_target<'a>(target: &'a str, cidr: Option<&'a str>) -> (&'a str, &'a str) {
    match cidr {
        Some(cidr) => (split_combined(target).0, cidr),
        None => split_combined(target),
    }
}

fn handle_convert(args: ConvertArgs, settings: Settings) -> Result<()> {
    let (ip, cidr) = split_target(&args.target, args.cidr.as_deref());
    debug!(ip, cidr, "converting");

    let input = match parse_validated(ip, cidr) {
        Ok(input) => input,
        Err(ValidatorError::Rejected(report)) => {
            print_report(&report, settings.output)?;
            bail!("input rejected");
        }
        Err(e) => return Err(e.into()),
    };

    let result = assemble(input.address, input.cidr);
    print_result(&result, settings)?;
    Ok(())
}

fn handle_validate(args: ValidateArgs, settings: Settings) -> Result<()> {
    let (ip, cidr) = split_target(&args.target, args.cidr.as_deref());
    let report = validate(ip, cidr);
    print_report(&report, settings.output)?;

    if !report.is_valid() {
        bail!("input rejected");
    }
    Ok(())
}

fn handle_table(settings: Settings) -> Result<()> {
    let rows = cidr_table();

    match settings.output {
        OutputFormat::Human => {
            println!();
            println!("{}", "CIDR Table".bold().cyan());
            println!("{}", "─".repeat(50).dimmed());
            for row in &rows {
                println!(
                    "{:>5}  {}  {:>12}  {:>12}",
                    format!("/{}", row.cidr).bold(),
                    render_forms(&row.subnet_mask, settings.notation),
                    row.address_count,
                    render_host_count(row.usable_hosts),
                );
            }
            println!();
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::JsonCompact => println!("{}", serde_json::to_string(&rows)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            let mut header = vec!["cidr"];
            header.extend(address_columns("subnet_mask", settings.notation));
            header.extend(["address_count", "usable_hosts"]);
            wtr.write_record(&header)?;

            for row in &rows {
                let mut record = vec![row.cidr.to_string()];
                record.extend(address_values(&row.subnet_mask, settings.notation));
                record.push(row.address_count.to_string());
                record.push(row.usable_hosts.to_string());
                wtr.write_record(&record)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

fn handle_blocks(settings: Settings) -> Result<()> {
    let rows: Vec<BlockRow> = AddressBlock::all().iter().map(BlockRow::from).collect();

    match settings.output {
        OutputFormat::Human => {
            println!();
            println!("{}", "Address Blocks".bold().cyan());
            println!("{}", "─".repeat(50).dimmed());
            for row in &rows {
                println!("{}", row.name.bold());
                println!("{:>15}: {}", "Class", row.address_class);
                println!("{:>15}: {}", "Scope", row.scope);
                println!("{:>15}: {}", "First", render_forms(&row.first_address, settings.notation));
                println!("{:>15}: {}", "Last", render_forms(&row.last_address, settings.notation));
                let default_cidr = row
                    .default_cidr
                    .map_or_else(|| "-".to_string(), |c| format!("/{}", c));
                println!("{:>15}: {}", "Default CIDR", default_cidr);
            }
            println!();
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::JsonCompact => println!("{}", serde_json::to_string(&rows)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            let mut header = vec!["name", "address_class", "scope"];
            header.extend(address_columns("first_address", settings.notation));
            header.extend(address_columns("last_address", settings.notation));
            header.push("default_cidr");
            wtr.write_record(&header)?;

            for row in &rows {
                let mut record = vec![
                    row.name.to_string(),
                    row.address_class.clone(),
                    row.scope.clone(),
                ];
                record.extend(address_values(&row.first_address, settings.notation));
                record.extend(address_values(&row.last_address, settings.notation));
                record.push(row.default_cidr.map_or(String::new(), |c| c.to_string()));
                wtr.write_record(&record)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

fn handle_batch(args: BatchArgs, settings: Settings) -> Result<()> {
    let lines = batch::read_lines(args.file.as_deref())?;
    let processor = BatchProcessor::new(args.workers)?;
    debug!(
        lines = lines.len(),
        workers = processor.thread_count(),
        "starting batch"
    );

    let results = processor.process_lines(lines);
    print_batch(&results, settings)?;
    Ok(())
}

fn print_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            println!();
            println!("{}", "Validation Result".bold().cyan());
            println!("{}", "─".repeat(50).dimmed());
            for (label, outcome) in [("IP Address", &report.ip), ("CIDR", &report.cidr)] {
                match outcome.message() {
                    None => println!("{:>15}: {}", label.bold(), "valid".green()),
                    Some(message) => println!("{:>15}: {}", label.bold(), message.red()),
                }
            }
            println!();
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::JsonCompact => println!("{}", serde_json::to_string(report)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["field", "valid", "message"])?;
            for (field, outcome) in [("ip_address", &report.ip), ("cidr", &report.cidr)] {
                wtr.write_record([
                    field,
                    if outcome.is_valid() { "true" } else { "false" },
                    outcome.message().unwrap_or(""),
                ])?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

fn print_result(result: &ConversionResult, settings: Settings) -> Result<()> {
    match settings.output {
        OutputFormat::Human => print_human(result, settings.notation),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::JsonCompact => println!("{}", serde_json::to_string(result)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(result_header(settings.notation))?;
            wtr.write_record(result_values(result, settings.notation))?;
            wtr.flush()?;
        }
    }
    Ok(())
}

fn print_batch(results: &[BatchResult], settings: Settings) -> Result<()> {
    match settings.output {
        OutputFormat::Human => {
            for item in results {
                match &item.result {
                    Ok(result) => {
                        println!("{} {}", "›".blue(), item.input.bold());
                        print_human(result, settings.notation);
                    }
                    Err(e) => println!("{} {}: {}", "✗".red(), item.input.bold(), e.red()),
                }
            }
        }
        OutputFormat::Json => {
            let records: Vec<_> = results.iter().map(BatchResult::record).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::JsonCompact => {
            for item in results {
                println!("{}", serde_json::to_string(&item.record())?);
            }
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            let mut header = vec!["input".to_string(), "error".to_string()];
            header.extend(result_header(settings.notation));
            wtr.write_record(&header)?;

            let width = header.len() - 2;
            for item in results {
                let mut record = vec![item.input.clone()];
                match &item.result {
                    Ok(result) => {
                        record.push(String::new());
                        record.extend(result_values(result, settings.notation));
                    }
                    Err(e) => {
                        record.push(e.clone());
                        record.extend(std::iter::repeat(String::new()).take(width));
                    }
                }
                wtr.write_record(&record)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

fn print_human(result: &ConversionResult, notation: Notation) {
    let usable = result.has_usable_hosts();
    let block = result.address_block();

    println!();
    println!("{}", "Conversion Result".bold().cyan());
    println!("{}", "─".repeat(50).dimmed());
    println!("{:>15}: {}", "Address".bold(), render_forms(result.address(), notation));
    println!("{:>15}: /{}", "CIDR".bold(), result.cidr());
    println!("{:>15}: {}", "Subnet Mask".bold(), render_forms(result.subnet_mask(), notation));
    println!("{:>15}: {}", "Network".bold(), render_forms(result.network(), notation).green());
    println!("{:>15}: {}", "Broadcast".bold(), render_forms(result.broadcast(), notation));

    if usable {
        println!("{:>15}: {}", "First Usable".bold(), render_forms(result.first_usable(), notation));
        println!("{:>15}: {}", "Last Usable".bold(), render_forms(result.last_usable(), notation));
    } else {
        println!("{:>15}: {}", "Usable Range".bold(), "none".dimmed());
    }

    println!("{:>15}: {}", "Address Class".bold(), result.address_class());
    println!("{:>15}: {} ({})", "Address Block".bold(), block.name(), block.scope());
    println!(
        "{:>15}: {}",
        "Usable Hosts".bold(),
        render_host_count(result.number_of_available_ips())
    );
    println!();
}

fn render_forms(forms: &AddressForms, notation: Notation) -> String {
    match notation {
        Notation::Decimal => forms.decimal.to_string(),
        Notation::Binary => forms.binary.to_string(),
        Notation::Both => format!("{:<15}  {}", forms.decimal.to_string(), forms.binary),
    }
}

fn render_host_count(count: i64) -> String {
    if count > 0 {
        count.to_string()
    } else {
        "none".to_string()
    }
}

const RESULT_ADDRESSES: [&str; 6] = [
    "address",
    "subnet_mask",
    "network",
    "broadcast",
    "first_usable",
    "last_usable",
];

fn address_columns(name: &'static str, notation: Notation) -> Vec<&'static str> {
    let binary_name = match name {
        "address" => "address_binary",
        "subnet_mask" => "subnet_mask_binary",
        "network" => "network_binary",
        "broadcast" => "broadcast_binary",
        "first_usable" => "first_usable_binary",
        "last_usable" => "last_usable_binary",
        "first_address" => "first_address_binary",
        "last_address" => "last_address_binary",
        other => other,
    };

    let mut columns = Vec::with_capacity(2);
    if notation.shows_decimal() {
        columns.push(name);
    }
    if notation.shows_binary() {
        columns.push(binary_name);
    }
    columns
}

fn address_values(forms: &AddressForms, notation: Notation) -> Vec<String> {
    let mut values = Vec::with_capacity(2);
    if notation.shows_decimal() {
        values.push(forms.decimal.to_string());
    }
    if notation.shows_binary() {
        values.push(forms.binary.to_string());
    }
    values
}

fn result_header(notation: Notation) -> Vec<String> {
    let mut header = vec!["cidr".to_string()];
    for name in RESULT_ADDRESSES {
        header.extend(address_columns(name, notation).into_iter().map(String::from));
    }
    header.extend(
        ["address_class", "address_block", "usable_hosts"]
            .into_iter()
            .map(String::from),
    );
    header
}

fn result_values(result: &ConversionResult, notation: Notation) -> Vec<String> {
    let mut values = vec![result.cidr().to_string()];
    for forms in [
        result.address(),
        result.subnet_mask(),
        result.network(),
        result.broadcast(),
        result.first_usable(),
        result.last_usable(),
    ] {
        values.extend(address_values(forms, notation));
    }
    values.push(result.address_class().to_string());
    values.push(result.address_block().name().to_string());
    values.push(result.number_of_available_ips().to_string());
    values
}
