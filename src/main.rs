mod cli;

use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use cli::{Cli, Command};
use sword_commentary::sword::convert::{self, ConversionOutcome};
use sword_commentary::sword::versification;
use sword_commentary::{Catalog, DecodeOptions, ModuleDriver, ModuleReader, SwordError};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SwordError> {
    match cli.command {
        Command::Decode {
            dir,
            driver,
            conf,
            output,
            pretty,
            decode,
        } => {
            let driver = match (driver, conf) {
                (Some(driver), _) => driver,
                (None, Some(conf)) => ModuleDriver::from_conf_file(conf)?,
                (None, None) => return Err(SwordError::UnknownDriver(String::new())),
            };
            decode_single(dir, driver, decode.options(), output, pretty)
        }
        Command::Convert {
            catalog,
            source,
            out,
            jobs,
            decode,
        } => {
            let mut catalog = match catalog {
                Some(path) => Catalog::from_file(path)?,
                None => Catalog::default(),
            };
            if let Some(source) = source {
                catalog.source_dir = source;
            }
            if let Some(out) = out {
                catalog.output_dir = out;
            }
            convert_all(&catalog, decode.options(), jobs)
        }
        Command::Lookup { testament, index } => {
            let verse = versification::lookup(testament, index)?;
            println!("{}", verse.key());
            Ok(())
        }
    }
}

fn decode_single(
    dir: PathBuf,
    driver: ModuleDriver,
    options: DecodeOptions,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), SwordError> {
    let decoded = ModuleReader::new(&dir, driver).with_options(options).decode()?;

    match output {
        Some(path) if !pretty => decoded.write_json(&path)?,
        Some(path) => std::fs::write(&path, decoded.to_json(true)?)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(decoded.to_json(pretty)?.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    let report = &decoded.report;
    eprintln!(
        "{}: {} verses ({} skipped, {} absent)",
        dir.display(),
        decoded.len(),
        report.skipped(),
        report.empty
    );
    Ok(())
}

fn convert_all(
    catalog: &Catalog,
    options: DecodeOptions,
    jobs: Option<usize>,
) -> Result<(), SwordError> {
    let results = convert::convert_catalog(catalog, options, jobs)?;

    println!("=== SUMMARY ===");
    for result in &results {
        match &result.outcome {
            ConversionOutcome::Converted(module) => println!(
                "  {}: {} verses, {:.1} MB, {} skipped",
                result.name,
                module.verses,
                module.bytes as f64 / 1024.0 / 1024.0,
                module.skipped
            ),
            ConversionOutcome::NotFound(_) => println!("  {}: not found", result.name),
            ConversionOutcome::Failed(e) => println!("  {}: failed ({})", result.name, e),
        }
    }

    convert::ensure_any_converted(results)
}
