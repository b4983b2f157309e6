use clap::Parser;
use thiserror::Error;

/// Command line arguments for namespaxe
#[derive(Parser, Debug)]
#[command(
    name = "namespaxe",
    version = env!("CARGO_PKG_VERSION"),
    about = "A CLI tool for interacting with pyincorporation servers.",
    long_about = "Log in to the pyincorporation platform, list and describe namespaces, and install their Kubernetes access configuration."
)]
pub struct Args {
    /// Command to run: login, list, describe, install-k8s-config or help
    pub command: String,

    /// Resource type, e.g. `ns`
    pub resource: Option<String>,

    /// Resource name, e.g. a namespace name
    pub resource_name: Option<String>,

    /// Show extra details
    #[arg(long)]
    pub wide: bool,
}

/// A validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Login,
    List { resource: String },
    Describe { resource: String, name: String },
    InstallK8sConfig { resource: String, name: String },
    Help,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("Usage of list command: namespaxe list <argument>")]
    List,

    #[error("Usage of describe command: namespaxe describe <argument> <argument>")]
    Describe,

    #[error("Usage of install-k8s-config command: namespaxe install-k8s-config <resource> <resource-name>")]
    InstallK8sConfig,

    #[error("Unknown command: {0}. Use 'namespaxe help' for a list of commands.")]
    UnknownCommand(String),
}

impl Args {
    pub fn invocation(&self) -> Result<Invocation, UsageError> {
        let resource = self.resource.clone().filter(|r| !r.is_empty());
        let name = self.resource_name.clone().filter(|n| !n.is_empty());

        match self.command.as_str() {
            "login" => Ok(Invocation::Login),
            "help" => Ok(Invocation::Help),
            "list" => resource
                .map(|resource| Invocation::List { resource })
                .ok_or(UsageError::List),
            "describe" => match (resource, name) {
                (Some(resource), Some(name)) => Ok(Invocation::Describe { resource, name }),
                _ => Err(UsageError::Describe),
            },
            "install-k8s-config" => match (resource, name) {
                (Some(resource), Some(name)) => Ok(Invocation::InstallK8sConfig { resource, name }),
                _ => Err(UsageError::InstallK8sConfig),
            },
            other => Err(UsageError::UnknownCommand(other.to_string())),
        }
    }
}
