mod args;
mod mx;
mod output;

use anyhow::{Context, Result, bail};
use mailreach_lib::{SystemResolver, ValidateOptions, Validator};

use std::io::{self, BufRead};
use std::thread;

use args::{Cli, Commands};
use output::OutputRow;

#[cfg(feature = "with-tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

#[cfg(not(feature = "with-tracing"))]
fn init_tracing() {}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let emails: Vec<String> = match &cli.cmd {
        Some(Commands::Mx { domain }) => {
            if cli.out.is_some() {
                bail!("--out n'est pas pris en charge par la sous-commande mx");
            }
            let summary = mx::resolve(domain);
            mx::print(&summary, &cli.format)?;
            if summary.is_dead() {
                std::process::exit(2);
            }
            return Ok(());
        }
        Some(Commands::Validate { emails }) => emails.clone(),
        None if cli.stdin => read_stdin()?,
        None => {
            Cli::clap_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let validator = Validator::new(
        cli.deny_list(),
        SystemResolver::from_system_conf().context("init DNS resolver")?,
    )
    .with_policy(cli.provider_policy());
    let options = cli.validate_options();

    let rows = run_batch(&validator, &emails, &options, cli.jobs);
    output::write_reports(&rows, &cli)?;

    // codes de sortie : 0 OK, 2 invalides (ou inconnus avec --strict), 1 fatal
    if output::any_rejected(&rows, cli.strict) {
        std::process::exit(2);
    }
    Ok(())
}

fn read_stdin() -> Result<Vec<String>> {
    let mut emails = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("read stdin")?;
        let email = line.trim();
        if !email.is_empty() {
            emails.push(email.to_string());
        }
    }
    Ok(emails)
}

/// Validates `emails` on up to `jobs` threads; rows keep the input order.
fn run_batch(
    validator: &Validator,
    emails: &[String],
    options: &ValidateOptions,
    jobs: usize,
) -> Vec<OutputRow> {
    if emails.is_empty() {
        return Vec::new();
    }
    let chunk = emails.len().div_ceil(jobs.max(1));

    thread::scope(|scope| {
        let handles: Vec<_> = emails
            .chunks(chunk)
            .map(|batch| {
                scope.spawn(move || {
                    batch
                        .iter()
                        .map(|email| OutputRow::new(email, validator.validate(email, options)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(rows) => rows,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
