use clap::{Parser, ValueEnum};
use inventory_collect::parser::config::{CollectorConfig, DEFAULT_GENERATORS_DIR, DEFAULT_PREFIX};
use inventory_collect::{InventoryCollector, InventoryReport, OutputFormat};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "inventory-collect")]
#[command(about = "Run inventory generator scripts and print the merged key=value data")]
#[command(version = "0.1.0")]
struct Cli {
    /// Directory containing the inventory generators
    #[arg(value_name = "GENERATORS_DIR", default_value = DEFAULT_GENERATORS_DIR)]
    generators_dir: PathBuf,

    /// Required file name prefix for generators
    #[arg(short, long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Kill a generator that runs longer than this many seconds
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    output: OutputFormatCli,

    /// Print the full report with per-generator outcomes
    #[arg(long)]
    report: bool,

    /// Print only the inventory checksum
    #[arg(long, conflicts_with = "report")]
    checksum: bool,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormatCli {
    Json,
    Yaml,
    Attributes,
    Text,
}

impl From<OutputFormatCli> for OutputFormat {
    fn from(cli_format: OutputFormatCli) -> Self {
        match cli_format {
            OutputFormatCli::Json => OutputFormat::Json,
            OutputFormatCli::Yaml => OutputFormat::Yaml,
            OutputFormatCli::Attributes => OutputFormat::Attributes,
            OutputFormatCli::Text => OutputFormat::Text,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = CollectorConfig {
        prefix: cli.prefix.clone(),
        timeout: cli.timeout.map(Duration::from_secs),
        ..CollectorConfig::default()
    };
    let collector = InventoryCollector::with_config(config);

    let report = match collector.collect_report(&cli.generators_dir).await {
        Ok(report) => report,
        Err(e) => {
            error!("Inventory collection failed: {}", e);
            std::process::exit(1);
        }
    };

    if cli.checksum {
        println!("{}", report.metadata.checksum);
    } else if cli.report {
        output_report(&report, cli.output.into())?;
    } else {
        print!("{}", with_newline(OutputFormat::from(cli.output).render(&report.data)?));
    }

    info!("Inventory collection completed successfully");
    Ok(())
}

fn output_report(
    report: &InventoryReport,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(report)?;
            print!("{}", with_newline(yaml));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)?;
            println!("{json}");
        }
        OutputFormat::Attributes | OutputFormat::Text => {
            return Err("Reports can only be printed as json or yaml".into());
        }
    }

    Ok(())
}

fn with_newline(mut rendered: String) -> String {
    if !rendered.is_empty() && !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    rendered
}
