/// Dump an HWP 5.0 document as JSON or plain text.
///
/// Run with `RUST_LOG=debug` to see decode tracing and recovered anomalies.
///
/// ```text
/// cargo run --example dump_hwp -- report.hwp --pretty
/// cargo run --example dump_hwp -- report.hwp --text
/// ```
use clap::Parser;
use hwp_core::{Package, ParseOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Dump the content model of an HWP 5.0 document")]
struct Args {
    /// Path to the .hwp file
    path: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print only the plain text of every section
    #[arg(long)]
    text: bool,

    /// Skip base64 copies of embedded assets
    #[arg(long)]
    no_base64: bool,

    /// Skip embedded assets entirely
    #[arg(long)]
    no_bin_data: bool,

    /// Cap on sector-chain hops in the container
    #[arg(long)]
    max_chain_hops: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut options = ParseOptions::new()
        .with_bin_data(!args.no_bin_data)
        .with_base64(!args.no_base64);
    if let Some(hops) = args.max_chain_hops {
        options = options.with_max_chain_hops(hops);
    }

    let package = Package::open(&args.path, options)?;
    let header = package.header();
    eprintln!(
        "HWP {} compressed={} sections={}",
        header.version,
        header.is_compressed(),
        package.section_names().len()
    );

    let document = package.document()?;
    if args.text {
        println!("{}", document.text());
        return Ok(());
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    println!("{}", json);
    Ok(())
}
