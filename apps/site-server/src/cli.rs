//! Command-line interface of the site server.

use std::io::BufRead;

use clap::{Parser, Subcommand};
use press_core::ports::PasswordService;
use press_infra::Argon2PasswordService;

#[derive(Parser, Debug)]
#[command(name = "site-server")]
#[command(about = "Press site server: public pages and admin API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Print an Argon2 hash to use as ADMIN_PASSWORD_HASH
    HashPassword {
        /// Password to hash, read from stdin when omitted
        password: Option<String>,
    },
}

/// Hash the given password, or the first line of `input` when none is given.
pub fn hash_password(password: Option<String>, input: impl BufRead) -> anyhow::Result<String> {
    let password = match password {
        Some(password) => password,
        None => first_line(input)?,
    };
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }

    Ok(Argon2PasswordService::new().hash(&password)?)
}

fn first_line(mut input: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_serve_is_the_default() {
        let cli = Cli::try_parse_from(["site-server"]).unwrap();
        assert_eq!(cli.command, None);

        let cli = Cli::try_parse_from(["site-server", "serve"]).unwrap();
        assert_eq!(cli.command, Some(Command::Serve));
    }

    #[test]
    fn test_parse_hash_password() {
        let cli = Cli::try_parse_from(["site-server", "hash-password", "s3cret"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::HashPassword {
                password: Some("s3cret".to_owned())
            })
        );
    }

    #[test]
    fn test_hash_from_argument_verifies() {
        let hash = hash_password(Some("s3cret".to_owned()), Cursor::new("")).unwrap();

        let service = Argon2PasswordService::new();
        assert!(hash.starts_with("$argon2"));
        assert!(service.verify("s3cret", &hash).unwrap());
    }

    #[test]
    fn test_hash_reads_first_stdin_line() {
        let hash = hash_password(None, Cursor::new("from-stdin\r\nignored\n")).unwrap();

        let service = Argon2PasswordService::new();
        assert!(service.verify("from-stdin", &hash).unwrap());
        assert!(!service.verify("from-stdin\r", &hash).unwrap());
    }

    #[test]
    fn test_empty_password_is_rejected() {
        assert!(hash_password(None, Cursor::new("\n")).is_err());
        assert!(hash_password(Some(String::new()), Cursor::new("")).is_err());
    }
}
