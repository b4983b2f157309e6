use std::io::{self, Write};

use namespaxe_core::{CredentialProvider, StoredCredentials};

/// Reads a username from stdin and a password with echo disabled.
pub struct TerminalPrompt;

impl TerminalPrompt {
    fn prompt_username() -> io::Result<String> {
        print!("Username: ");
        io::stdout().flush()?;

        let mut username = String::new();
        io::stdin().read_line(&mut username)?;
        Ok(username.trim().to_string())
    }

    fn prompt_password() -> io::Result<String> {
        rpassword::prompt_password("Password: ")
    }
}

impl CredentialProvider for TerminalPrompt {
    fn credentials(&self) -> io::Result<StoredCredentials> {
        let username = Self::prompt_username()?;
        let password = Self::prompt_password()?;
        Ok(StoredCredentials::new(username, password))
    }
}
