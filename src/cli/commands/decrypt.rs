use crate::adapters::fs::directory_scanner::DirectoryScanner;
use crate::adapters::fs::local_fs::LocalFileSystem;
use crate::cli::OperationArgs;
use crate::cli::context::RunContext;
use crate::core::errors::Result;
use crate::core::services::decryptor::Decryptor;

use super::operation::{self, Target};

/// Execute the `encryptz decrypt` command.
///
/// The algorithm must match the one used to encrypt; envelopes do not
/// record it.
pub fn execute(args: &OperationArgs, ctx: &RunContext) -> Result<bool> {
    let target = Target::from_args(args)?;
    let request = operation::build_request(args, ctx, false)?;

    let decryptor = Decryptor::new(LocalFileSystem, DirectoryScanner);
    let outcome = match &target {
        Target::Text(encoded) => decryptor.decrypt_text(encoded, &request),
        Target::File(path) => operation::with_progress(ctx, "Decrypting", |progress| {
            decryptor.decrypt_file(path, &request, progress)
        }),
        Target::Directory(dir) => operation::with_progress(ctx, "Decrypting", |progress| {
            decryptor.decrypt_directory(dir, &request, progress)
        }),
        Target::Files(paths) => {
            let outcomes = operation::with_progress(ctx, "Decrypting", |progress| {
                decryptor.decrypt_files(paths, &request, progress)
            });
            operation::combine_files(
                request.algorithm,
                paths,
                request.output_path.as_ref(),
                outcomes,
            )
        }
    };

    operation::report(ctx, "Decryption", &target, &outcome)
}
