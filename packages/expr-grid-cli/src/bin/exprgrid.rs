/**
 * expr-grid CLI - exprgrid
 *
 * Evaluates expressions given on the command line, from a file, or the
 * built-in samples when neither is given
 */
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;
use std::process;

use expr_grid_cli::config::{DriverConfig, OutputFormat, Overrides};
use expr_grid_cli::driver::{perform_run, read_expressions, sample_jobs, Job};
use expr_grid_cli::logging::{self, LogLevel};

fn main() {
    let matches = Command::new("exprgrid")
        .version(expr_grid_cli::version())
        .about("Evaluate integer, rational and string expressions")
        .arg(
            Arg::new("expressions")
                .value_name("EXPR")
                .num_args(0..)
                .help("Expressions to evaluate, e.g. \"3 + -(2)\""),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("PATH")
                .help("Read one expression per line from a file"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to a JSON driver config"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FORMAT")
                .value_parser(OutputFormat::NAMES)
                .help("Report format"),
        )
        .arg(
            Arg::new("normalize")
                .long("normalize")
                .action(ArgAction::SetTrue)
                .help("Rewrite negative literals as negations first"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(LogLevel::NAMES)
                .help("Log level written to stderr"),
        )
        .arg(
            Arg::new("sequential")
                .long("sequential")
                .action(ArgAction::SetTrue)
                .help("Evaluate on the current thread only"),
        )
        .get_matches();

    match run(&matches) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<i32> {
    let overrides = Overrides {
        log_level: matches
            .get_one::<String>("log-level")
            .map(|s| s.parse::<LogLevel>())
            .transpose()?,
        output: matches
            .get_one::<String>("output")
            .map(|s| s.parse::<OutputFormat>())
            .transpose()?,
        normalize: matches.get_flag("normalize"),
        sequential: matches.get_flag("sequential"),
    };
    let config_path = matches.get_one::<String>("config").map(Path::new);
    let config = DriverConfig::resolve(config_path, &overrides)?;
    logging::init(config.log_level)?;

    let mut texts: Vec<String> = matches
        .get_many::<String>("expressions")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if let Some(file) = matches.get_one::<String>("file") {
        texts.extend(read_expressions(Path::new(file))?);
    }

    let jobs = if texts.is_empty() {
        sample_jobs()?
    } else {
        texts.into_iter().map(Job::from_text).collect()
    };

    let result = perform_run(&jobs, &config);
    println!("{}", result.render(config.output)?);
    Ok(result.exit_code())
}
