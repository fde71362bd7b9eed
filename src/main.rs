/*!
 * Fizzz CLI - Command Line Interface
 *
 * Splits the files of a directory into N subdirectories of roughly equal
 * total size, copying or moving them into `{prefix}{index}`.
 */

use clap::{Parser, ValueEnum};
use fizzz::{
    cli_style::{
        self, dry_run_summary_table, materialize_summary_table, partition_summary_table,
        partition_table, print_error, print_info, print_success, print_warning, section_header,
    },
    config::{BalanceConfig, LogLevel, TransferMode},
    error::{FizzzError, Result, EXIT_SUCCESS},
    logging, materialize, plan, MaterializeOutcome,
};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "fizzz")]
#[command(version, about = "Split a directory's files into N subdirectories of roughly equal total size", long_about = None)]
struct Cli {
    /// Number of directories to split into (default: number of CPUs)
    #[arg(short = 'n', long = "numdirs", value_name = "N")]
    numdirs: Option<usize>,

    /// Directory with the files to sort (default: current directory)
    #[arg(short = 'd', long = "srcdir", value_name = "DIR")]
    srcdir: Option<PathBuf>,

    /// Base directory the subdirectories are created in (default: current directory)
    #[arg(short = 'o', long = "destdir", value_name = "DIR")]
    destdir: Option<PathBuf>,

    /// Prefix for the directory names (default: processor)
    #[arg(short = 'p', long = "prefix", value_name = "PREFIX")]
    prefix: Option<String>,

    /// Move the files instead of copying them
    #[arg(short = 'm', long = "move", visible_alias = "mv")]
    move_files: bool,

    /// Test mode: print the plan without touching the filesystem
    #[arg(short = 't', long = "test", visible_alias = "dry-run")]
    test: bool,

    /// Allow writing into destination directories that already exist
    #[arg(short = 'f', long)]
    force: bool,

    /// Verbose output for debugging
    #[arg(short = 'v', long = "debug", visible_alias = "verbose")]
    debug: bool,

    /// File name patterns to skip - glob, or regex with a "regex:" prefix (replaces the default ".*")
    #[arg(long = "exclude", value_name = "PATTERN")]
    exclude_patterns: Vec<String>,

    /// Log level
    #[arg(long, value_enum)]
    log_level: Option<LogLevelArg>,

    /// Write JSON logs to this file instead of the console
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Load defaults from a TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the effective configuration to a TOML file and exit
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,

    /// Print the partition plan as JSON
    #[arg(long)]
    json: bool,

    /// Hide progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

impl Cli {
    /// Override configuration values with whatever was given on the command line
    fn apply(self, config: &mut BalanceConfig) {
        if let Some(n) = self.numdirs {
            config.bins = n;
        }
        if let Some(dir) = self.srcdir {
            config.source_dir = dir;
        }
        if let Some(dir) = self.destdir {
            config.dest_dir = dir;
        }
        if let Some(prefix) = self.prefix {
            config.prefix = prefix;
        }
        if self.move_files {
            config.transfer_mode = TransferMode::Move;
        }
        if !self.exclude_patterns.is_empty() {
            config.exclude_patterns = self.exclude_patterns;
        }
        if self.log.is_some() {
            config.log_file = self.log;
        }

        config.dry_run |= self.test;
        config.force |= self.force;
        config.verbose |= self.debug;
        config.json_output |= self.json;
        config.show_progress &= !(self.no_progress || config.json_output);

        if let Some(level) = self.log_level {
            config.log_level = level.into();
        }
    }
}

fn main() {
    let code = match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_error(&e.to_string(), e.suggestion());
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let mut cli = Cli::parse();

    let mut config = match cli.config.take() {
        Some(path) => BalanceConfig::from_file(&path)?,
        None => BalanceConfig::default(),
    };
    let save_to = cli.save_config.take();
    cli.apply(&mut config);

    if let Some(path) = save_to {
        config.validate()?;
        config.to_file(&path)?;
        print_success(&format!("Configuration written to {}", path.display()));
        return Ok(());
    }

    if let Err(e) = logging::init_logging(&config) {
        print_warning(&format!("Failed to initialize logging: {}", e));
    }
    debug!("Effective configuration: {:?}", config);

    let human = !config.json_output;
    if human {
        cli_style::print_banner();
    }

    let partition = plan(&config)?;

    if human {
        section_header("Partition Plan");
        println!("{}", partition_table(&partition));
        println!("{}", partition_summary_table(&partition));
    } else {
        let json = serde_json::to_string_pretty(&partition)
            .map_err(|e| FizzzError::Config(format!("Failed to serialize plan: {}", e)))?;
        println!("{}", json);
    }

    match materialize(&partition, &config)? {
        MaterializeOutcome::Simulated(sim) => {
            if human {
                section_header("Test Mode");
                println!("{}", dry_run_summary_table(&sim.summary()));
                print_info("No changes were made. Run without --test to perform the transfer.");
            }
        }
        MaterializeOutcome::Realized { stats, existing } => {
            for dir in &existing {
                print_warning(&format!(
                    "{} already existed and was reused (--force)",
                    dir.display()
                ));
            }
            if human {
                section_header("Summary");
                println!("{}", materialize_summary_table(&stats));
                print_success(&format!(
                    "{} file(s) {} into {} directories",
                    partition.file_count(),
                    match config.transfer_mode {
                        TransferMode::Copy => "copied",
                        TransferMode::Move => "moved",
                    },
                    partition.bins().len()
                ));
            }
        }
    }

    Ok(())
}
