use std::process::ExitCode;

use clap::Parser;

use vampire_hunt::cli::{Cli, BUILDCONF};
use vampire_hunt::driver;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.buildconf {
        print!("{BUILDCONF}");
        return ExitCode::SUCCESS;
    }

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    if config.dry_run {
        eprintln!(
            "dry run: would scan [{}, {}] with {} thread(s)",
            config.min, config.max, config.threads
        );
    }

    let emit_checksum = config.emit_checksum;
    match driver::run(&config) {
        Ok(summary) => {
            eprintln!("total vampires: {}", summary.total_vampires);
            for (j, count) in summary.common_count.iter().enumerate() {
                eprintln!("  with >= {} fang pairs: {count}", j + 1);
            }
            if emit_checksum {
                eprintln!("digest: {}", summary.digest_hex);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
