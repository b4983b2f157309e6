//! Command dispatch.
//!
//! Every message goes to the supplied writer; the return value is the
//! process exit code.

use std::io::{self, Write};

use namespaxe_core::{CredentialProvider, CredentialSource, NamespaxeError, SessionClient};
use tracing::{debug, info};

use super::args::{Args, Invocation};
use super::output::{render_namespace_detail, render_namespace_list, HELP_TEXT, NO_NAMESPACES};

// ===== Exit codes =====

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 2;

/// Run one invocation against `client`, writing output to `out`.
pub async fn run<P, W>(args: &Args, client: &SessionClient<P>, out: &mut W) -> io::Result<i32>
where
    P: CredentialProvider,
    W: Write,
{
    let invocation = match args.invocation() {
        Ok(invocation) => invocation,
        Err(e) => {
            writeln!(out, "{}", e)?;
            return Ok(EXIT_USAGE);
        }
    };
    debug!(?invocation, wide = args.wide, "Dispatching command");

    let result = match invocation {
        Invocation::Help => Ok(HELP_TEXT.to_string()),
        Invocation::Login => login(client, out).await?,
        Invocation::List { resource } => client.list(&resource).await.map(|records| {
            if records.is_empty() {
                NO_NAMESPACES.to_string()
            } else {
                render_namespace_list(&records, args.wide)
            }
        }),
        Invocation::Describe { resource, name } => client
            .describe(&resource, &name)
            .await
            .map(|ns| render_namespace_detail(&ns, args.wide)),
        Invocation::InstallK8sConfig { resource, name } => {
            client.install_k8s_config(&resource, &name).await.map(|path| {
                format!(
                    "Kubernetes configuration for namespace '{}' has been installed at {}",
                    name,
                    path.display()
                )
            })
        }
    };

    match result {
        Ok(message) => {
            writeln!(out, "{}", message)?;
            Ok(EXIT_OK)
        }
        Err(e) => {
            info!(error = %e, exit_code = e.exit_code(), "Command failed");
            writeln!(out, "{}", e)?;
            Ok(e.exit_code())
        }
    }
}

/// Log in, noting first when stored credentials are being reused.
async fn login<P, W>(client: &SessionClient<P>, out: &mut W) -> io::Result<Result<String, NamespaxeError>>
where
    P: CredentialProvider,
    W: Write,
{
    let (credentials, source) = match client.login_credentials() {
        Ok(found) => found,
        Err(e) => return Ok(Err(e)),
    };
    if source == CredentialSource::Stored {
        writeln!(out, "Authenticating with existing credentials...")?;
        out.flush()?;
    }

    Ok(client.login_with(&credentials).await.map(|()| {
        format!(
            "WARNING! Your password will be stored unencrypted in {}\n\nLogin successful!",
            client.credential_store().path().display()
        )
    }))
}
