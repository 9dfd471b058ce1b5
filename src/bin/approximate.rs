use std::path::PathBuf;

use approxfit::{calculate_with, io, value::CoordExt, Error, ModelKind, Report, Result};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

const USAGE: &str = "Usage: approximate <path> [min_points=8] [max_points=12] [format=text|json] \
                     [models=linear,quadratic,...] [report=<path>] [verbose]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(Debug)]
struct Options {
    path: PathBuf,
    min_points: usize,
    max_points: usize,
    format: Format,
    models: Vec<ModelKind>,
    report: Option<PathBuf>,
    verbose: bool,
}

fn main() {
    //
    // First argument is the path to a text or JSON file with (x, y) data points.
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Please provide a path to a text or JSON file with (x, y) data points.");
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    if path == "help" || path == "--help" || path == "-h" {
        eprintln!("{USAGE}");
        std::process::exit(0);
    }

    let mut options = Options {
        path: PathBuf::from(path),
        min_points: 8,
        max_points: 12,
        format: Format::Text,
        models: ModelKind::ALL.to_vec(),
        report: None,
        verbose: false,
    };

    for arg in std::env::args().skip(2) {
        if let Err(message) = apply_argument(&mut options, &arg) {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }

    let level = if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .is_err()
    {
        eprintln!("Logging is unavailable; continuing without it");
    }

    if let Err(e) = run(&options) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn apply_argument(options: &mut Options, arg: &str) -> std::result::Result<(), String> {
    let parse_count = |value: &str| {
        value
            .parse::<usize>()
            .map_err(|_| format!("Invalid point count: {value}"))
    };

    if let Some(value) = arg.strip_prefix("min_points=") {
        options.min_points = parse_count(value)?;
    } else if let Some(value) = arg.strip_prefix("max_points=") {
        options.max_points = parse_count(value)?;
    } else if let Some(value) = arg.strip_prefix("format=") {
        options.format = match value {
            "text" => Format::Text,
            "json" => Format::Json,
            _ => return Err(format!("Unsupported format: {value}")),
        };
    } else if let Some(value) = arg.strip_prefix("models=") {
        options.models = value
            .split(',')
            .map(str::parse::<ModelKind>)
            .collect::<Result<_>>()
            .map_err(|e| e.to_string())?;
    } else if let Some(value) = arg.strip_prefix("report=") {
        options.report = Some(PathBuf::from(value));
    } else if arg == "verbose" || arg == "--verbose" || arg == "-v" {
        options.verbose = true;
    } else {
        return Err(format!("Unknown argument: {arg}"));
    }

    Ok(())
}

fn run(options: &Options) -> Result<()> {
    let parsed = io::load_points::<f64>(&options.path)?;
    if !parsed.skipped.is_empty() {
        log::info!("{} malformed lines were skipped", parsed.skipped.len());
    }

    let points = parsed.points;
    let count = points.len();
    if count < options.min_points || count > options.max_points {
        return Err(Error::PointCount {
            got: count,
            min: options.min_points,
            max: options.max_points,
        });
    }

    if let (Some(x), Some(y)) = (points.x_range(), points.y_range()) {
        log::debug!(
            "Fitting {} candidate models to {count} points, x in [{}, {}], y in [{}, {}]",
            options.models.len(),
            x.start(),
            x.end(),
            y.start(),
            y.end()
        );
    }
    let outcome = calculate_with(&points, &options.models)?;
    let report = Report::new(&points, &outcome);

    match options.format {
        Format::Text => print!("{report}"),
        Format::Json => {
            let json = serde_json::json!({
                "points": points,
                "best": outcome.best().kind(),
                "quality": outcome.quality(),
                "outcome": outcome,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    if let Some(path) = &options.report {
        io::save_report(path, &report)?;
        log::info!("Report saved to {}", path.display());
    }

    Ok(())
}
