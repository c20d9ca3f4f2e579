use crate::adapters::fs::directory_scanner::DirectoryScanner;
use crate::adapters::fs::local_fs::LocalFileSystem;
use crate::cli::OperationArgs;
use crate::cli::context::RunContext;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::algorithm::Algorithm;
use crate::core::services::encryptor::Encryptor;

use super::operation::{self, Target};

/// Execute the `encryptz encrypt` command.
///
/// Returns whether the operation succeeded; the outcome itself has already
/// been printed.
pub fn execute(args: &OperationArgs, ctx: &RunContext) -> Result<bool> {
    let target = Target::from_args(args)?;
    let request = operation::build_request(args, ctx, true)?;
    if request.algorithm == Algorithm::Rsa && !ctx.quiet {
        output::rsa_warning();
    }

    let encryptor = Encryptor::new(LocalFileSystem, DirectoryScanner);
    let outcome = match &target {
        Target::Text(text) => encryptor.encrypt_text(text, &request),
        Target::File(path) => operation::with_progress(ctx, "Encrypting", |progress| {
            encryptor.encrypt_file(path, &request, progress)
        }),
        Target::Directory(dir) => operation::with_progress(ctx, "Encrypting", |progress| {
            encryptor.encrypt_directory(dir, &request, progress)
        }),
        Target::Files(paths) => {
            let outcomes = operation::with_progress(ctx, "Encrypting", |progress| {
                encryptor.encrypt_files(paths, &request, progress)
            });
            operation::combine_files(
                request.algorithm,
                paths,
                request.output_path.as_ref(),
                outcomes,
            )
        }
    };

    operation::report(ctx, "Encryption", &target, &outcome)
}
