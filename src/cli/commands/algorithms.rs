use serde::Serialize;

use crate::cli::context::RunContext;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::algorithm::Algorithm;

#[derive(Debug, Serialize)]
struct AlgorithmInfo {
    algorithm: Algorithm,
    cipher: &'static str,
    key: &'static str,
    envelope: &'static str,
    weakness: Option<&'static str>,
}

fn describe(algorithm: Algorithm) -> AlgorithmInfo {
    match algorithm {
        Algorithm::Aes => AlgorithmInfo {
            algorithm,
            cipher: "AES-256-GCM",
            key: "PBKDF2-HMAC-SHA512, 100000 iterations, from the password",
            envelope: "iv(16) || tag(16) || ciphertext",
            weakness: Some("fixed PBKDF2 salt: equal passwords give equal keys"),
        },
        Algorithm::ChaCha20 => AlgorithmInfo {
            algorithm,
            cipher: "ChaCha20-Poly1305",
            key: "PBKDF2-HMAC-SHA512, 100000 iterations, from the password",
            envelope: "nonce(12) || tag(16) || ciphertext",
            weakness: Some("fixed PBKDF2 salt: equal passwords give equal keys"),
        },
        Algorithm::Rsa => AlgorithmInfo {
            algorithm,
            cipher: "AES-256-CBC with the key wrapped by RSA-2048 OAEP",
            key: "fresh RSA keypair and AES key per operation, no password",
            envelope: "JSON header || \":::SEPARATOR:::\" || ciphertext",
            weakness: Some(
                "the private key is stored in the header; this is obfuscation, not encryption",
            ),
        },
    }
}

/// Execute the `encryptz algorithms` command.
pub fn execute(ctx: &RunContext) -> Result<bool> {
    let infos: Vec<AlgorithmInfo> = Algorithm::ALL.into_iter().map(describe).collect();

    if ctx.json {
        let json = serde_json::to_string_pretty(&infos).map_err(std::io::Error::from)?;
        println!("{json}");
        return Ok(true);
    }

    output::header("Supported algorithms");
    for info in &infos {
        let default = if info.algorithm == ctx.config.encryptz.default_algorithm {
            " (default)"
        } else {
            ""
        };
        output::algorithm_line(info.algorithm, &format!("{}{default}", info.cipher));
        output::detail(&format!("key:      {}", info.key));
        output::detail(&format!("envelope: {}", info.envelope));
        if let Some(weakness) = info.weakness {
            output::warning(weakness);
        }
    }
    Ok(true)
}
