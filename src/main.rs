use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rocacheck_rs::{keyring, read_input, scan, Error};

#[derive(Parser, Debug)]
#[command(
    name = "rocacheck",
    version,
    about = "Check RSA public keys for the ROCA weakness"
)]
struct Cli {
    /// X.509 certificate (in PEM encoding) to check for ROCA weakness
    #[arg(long, value_name = "PATH")]
    cert: Option<PathBuf>,

    /// Check a GPG armored keyring file
    #[arg(long, value_name = "PATH")]
    armored_keyring: Option<PathBuf>,
}

fn check_armored_keyring(path: &Path) -> Result<(), Error> {
    let keys = keyring::rsa_keys(&read_input(path)?)?;
    scan(
        keys.into_iter()
            .inspect(|key| println!("Checking {}", key.label)),
    )
    .ensure_pass(path)
}

fn check_cert(path: &Path) -> Result<(), Error> {
    rocacheck_rs::check_certificate_file(path)?.ensure_pass(path)
}

/// Print the outcome of one check; `false` means the process should stop.
fn report(result: Result<(), Error>) -> bool {
    match result {
        Ok(()) => {
            println!("Not vulnerable to ROCA!");
            true
        }
        Err(err) => {
            log::debug!("check failed: {err:?}");
            println!("{err}");
            false
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Some(path) = &cli.armored_keyring {
        if !report(check_armored_keyring(path)) {
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = &cli.cert {
        if !report(check_cert(path)) {
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
