//! remove command - Remove an object
//!
//! Deletes one object, named verbatim by the caller, from the configured
//! bucket.

use clap::Args;
use s3t_core::{Error, ObjectName, ObjectStore, Result};

use crate::exit_code::ExitCode;
use crate::logging;

/// Remove an object
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Name of the object to remove
    #[arg(value_name = "OBJECT")]
    pub names: Vec<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum RemoveError {
    #[error(transparent)]
    Setup(#[from] Error),

    #[error("Failed to remove object '{name}': {source}")]
    Delete {
        name: ObjectName,
        #[source]
        source: Error,
    },
}

impl RemoveError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Setup(e) | Self::Delete { source: e, .. } => ExitCode::from(e),
        }
    }
}

/// Execute the remove command
pub async fn execute<S, F>(args: RemoveArgs, connect: F) -> ExitCode
where
    S: ObjectStore,
    F: FnOnce() -> Result<S>,
{
    match run(&args.names, connect).await {
        Ok(_) => ExitCode::Success,
        Err(e) => {
            logging::fatal(&e);
            e.exit_code()
        }
    }
}

/// Delete the single object named in `names`
pub async fn run<S, F>(names: &[String], connect: F) -> std::result::Result<ObjectName, RemoveError>
where
    S: ObjectStore,
    F: FnOnce() -> Result<S>,
{
    let usage = || Error::Usage("Please specify an object to remove".into());

    let [name] = names else {
        return Err(usage().into());
    };
    let name = ObjectName::parse(name.as_str()).map_err(|_| usage())?;

    let store = connect()?;
    tracing::debug!(bucket = store.bucket(), key = %name, "Deleting object");

    store
        .delete_object(&name)
        .await
        .map_err(|source| RemoveError::Delete {
            name: name.clone(),
            source,
        })?;

    tracing::info!("Removed object '{name}'");
    Ok(name)
}
