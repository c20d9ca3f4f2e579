//! Plumbing shared by `encrypt` and `decrypt`: turning arguments into a
//! request, prompting for the password, driving the progress bar and
//! reporting the outcome.

use std::io::IsTerminal;
use std::path::PathBuf;

use tracing::debug;

use crate::cli::OperationArgs;
use crate::cli::context::RunContext;
use crate::cli::output;
use crate::core::errors::{EncryptzError, Result};
use crate::core::models::algorithm::Algorithm;
use crate::core::models::outcome::{EncryptionOutcome, Payload};
use crate::core::models::request::EncryptionRequest;
use crate::core::services::batch;
use crate::core::services::progress::ProgressFn;

/// What the user asked to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Text(String),
    File(PathBuf),
    Files(Vec<PathBuf>),
    Directory(PathBuf),
}

impl Target {
    /// A single `--file` naming a directory is treated like `--directory`.
    pub fn from_args(args: &OperationArgs) -> Result<Self> {
        if let Some(text) = &args.text {
            return Ok(Self::Text(text.clone()));
        }
        if let Some(dir) = &args.directory {
            return Ok(Self::Directory(dir.clone()));
        }
        match args.file.as_slice() {
            [] => Err(EncryptzError::InvalidInput {
                detail: "nothing to process; pass --text, --file or --directory".into(),
            }),
            [single] if single.is_dir() => Ok(Self::Directory(single.clone())),
            [single] => Ok(Self::File(single.clone())),
            many => Ok(Self::Files(many.to_vec())),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Text(_) => "text".into(),
            Self::File(path) | Self::Directory(path) => path.display().to_string(),
            Self::Files(paths) => format!("{} files", paths.len()),
        }
    }
}

/// Resolve algorithm and password into a request.
///
/// When a password-based algorithm has no password and stdin is a terminal,
/// the password is prompted for (twice when `confirm` is set). Otherwise the
/// request goes out without one and the engine reports it as missing.
pub fn build_request(
    args: &OperationArgs,
    ctx: &RunContext,
    confirm: bool,
) -> Result<EncryptionRequest> {
    let flag = args
        .algorithm
        .as_deref()
        .map(str::parse::<Algorithm>)
        .transpose()?;
    let algorithm = ctx.algorithm(flag);
    let mut request = EncryptionRequest::new(algorithm);

    let password = match args.password.as_deref().filter(|p| !p.is_empty()) {
        Some(p) => Some(p.to_string()),
        None if algorithm.needs_password() && std::io::stdin().is_terminal() => {
            Some(prompt_password(confirm)?)
        }
        None => None,
    };
    if let Some(password) = password {
        request = request.with_password(password);
    }
    if let Some(out) = &args.output {
        request = request.with_output(out.clone());
    }

    debug!(?request, "built request");
    Ok(request)
}

fn prompt_password(confirm: bool) -> Result<String> {
    let password = rpassword::prompt_password("Enter password: ")?;
    if confirm {
        let again = rpassword::prompt_password("Confirm password: ")?;
        if password != again {
            return Err(EncryptzError::InvalidInput {
                detail: "passwords do not match".into(),
            });
        }
    }
    Ok(password)
}

/// Run `op` with a progress bar attached when the context allows one.
pub fn with_progress<T>(
    ctx: &RunContext,
    prefix: &str,
    op: impl FnOnce(Option<&ProgressFn<'_>>) -> T,
) -> T {
    let bar = ctx.show_progress().then(|| output::progress_bar(prefix));
    let update = |current: u64, total: u64, label: Option<&str>| {
        if let Some(pb) = &bar {
            pb.set_length(total);
            pb.set_position(current);
            if let Some(label) = label {
                pb.set_message(label.to_string());
            }
        }
    };

    let progress: Option<&ProgressFn<'_>> = bar.as_ref().map(|_| &update as &ProgressFn<'_>);
    let result = op(progress);
    if let Some(pb) = &bar {
        pb.finish_and_clear();
    }
    result
}

/// Fold multi-file results into one outcome for reporting.
pub fn combine_files(
    algorithm: Algorithm,
    paths: &[PathBuf],
    output_dir: Option<&PathBuf>,
    outcomes: Vec<EncryptionOutcome>,
) -> EncryptionOutcome {
    let payload = match output_dir {
        Some(dir) => Payload::Path(dir.clone()),
        None => Payload::Text(format!("{} files", paths.len())),
    };
    batch::aggregate(algorithm, payload, batch::pair_with_sources(paths, outcomes))
}

/// Print the outcome and report whether it succeeded.
///
/// `action` is the past-tense verb shown in headers ("Encryption").
pub fn report(
    ctx: &RunContext,
    action: &str,
    target: &Target,
    outcome: &EncryptionOutcome,
) -> Result<bool> {
    if ctx.json {
        let json = serde_json::to_string_pretty(outcome).map_err(std::io::Error::from)?;
        println!("{json}");
        return Ok(outcome.success);
    }

    match target {
        Target::Text(_) => report_text(ctx, action, outcome),
        Target::File(path) => {
            if outcome.success {
                if ctx.styled() {
                    output::file_result(action, path, outcome);
                }
            } else {
                print_failure(outcome);
            }
        }
        Target::Files(_) | Target::Directory(_) => {
            if ctx.styled() || !outcome.success {
                output::batch_result(action, &target.describe(), outcome);
            }
        }
    }
    Ok(outcome.success)
}

fn report_text(ctx: &RunContext, action: &str, outcome: &EncryptionOutcome) {
    let Some(Payload::Text(text)) = outcome.payload.as_ref().filter(|_| outcome.success) else {
        print_failure(outcome);
        return;
    };

    if ctx.styled() {
        output::header(&format!("{action} completed"));
        if let Some(meta) = &outcome.metadata {
            output::detail(&format!(
                "{} → {} ({})",
                output::format_file_size(meta.original_size),
                output::format_file_size(meta.encrypted_size),
                meta.algorithm
            ));
        }
        println!();
    }
    println!("{text}");
}

fn print_failure(outcome: &EncryptionOutcome) {
    output::error(&format!(
        "Error: {}",
        outcome
            .error_message
            .as_deref()
            .unwrap_or("operation failed")
    ));
}
