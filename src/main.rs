mod color;
mod data;
mod views;

use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};

use data::filter::Selection;
use views::snapshot::{render_snapshot, render_snapshot_for_years};

const USAGE: &str = "\
Usage: industry-insight --data <FILE> [OPTIONS]

Load an employment outlook table and print the dashboard snapshot for a
selection of occupations as JSON on stdout.

Options:
  --data <FILE>         dataset file (.csv, .json or .parquet)
  --occupation <NAME>   add an occupation to the selection (repeatable;
                        none selected means all occupations)
  --years <A..B>        keep only rows with Year in the inclusive range
  --pretty              pretty-print the JSON
  -h, --help            show this help";

struct Args {
    data: PathBuf,
    selection: Selection,
    years: Option<RangeInclusive<i32>>,
    pretty: bool,
}

fn parse_args() -> Result<Args> {
    let mut data: Option<PathBuf> = None;
    let mut selection = Selection::new();
    let mut years = None;
    let mut pretty = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                let path = args.next().context("--data needs a file path")?;
                data = Some(PathBuf::from(path));
            }
            "--occupation" => {
                let name = args.next().context("--occupation needs a name")?;
                selection.insert(name);
            }
            "--years" => {
                let range = args.next().context("--years needs a range like 2021..2026")?;
                years = Some(parse_year_range(&range)?);
            }
            "--pretty" => pretty = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("Unknown argument '{other}'\n\n{USAGE}"),
        }
    }

    let data = data.with_context(|| format!("--data is required\n\n{USAGE}"))?;
    Ok(Args {
        data,
        selection,
        years,
        pretty,
    })
}

fn parse_year_range(s: &str) -> Result<RangeInclusive<i32>> {
    let (from, to) = s
        .split_once("..")
        .with_context(|| format!("'{s}' is not a range like 2021..2026"))?;
    let from: i32 = from
        .trim()
        .parse()
        .with_context(|| format!("'{from}' is not a year"))?;
    let to: i32 = to
        .trim()
        .parse()
        .with_context(|| format!("'{to}' is not a year"))?;
    Ok(from..=to)
}

fn run() -> Result<()> {
    let args = parse_args()?;

    let dataset = data::loader::load_file(&args.data)
        .with_context(|| format!("loading {}", args.data.display()))?;
    log::info!(
        "Loaded {} observations across {} occupations",
        dataset.len(),
        dataset.occupations.len()
    );

    let snapshot = match args.years {
        Some(years) => render_snapshot_for_years(&dataset, &args.selection, years),
        None => render_snapshot(&dataset, &args.selection),
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
