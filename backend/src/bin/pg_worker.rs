//! Helper binary that `pg_embedded_setup_unpriv` runs when the order store
//! integration tests execute as root.
//!
//! Usage: `pg_worker <setup|start|stop> <payload.json>`. The payload is a
//! serialised [`pg_embedded_setup_unpriv::worker::WorkerPayload`].

use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Report, Result, eyre};
use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
use postgresql_embedded::PostgreSQL;
use tokio::runtime::Builder;

fn main() -> Result<()> {
    color_eyre::install()?;
    run(env::args_os())
}

fn run(mut args: impl Iterator<Item = OsString>) -> Result<()> {
    let _program = args.next();
    let action = args
        .next()
        .ok_or_else(|| eyre!("missing action argument"))
        .and_then(|raw| Action::parse(&raw))?;
    let payload_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| eyre!("missing payload path argument"))?;
    if let Some(extra) = args.next() {
        return Err(eyre!(
            "unexpected extra argument: {}",
            extra.to_string_lossy()
        ));
    }

    let payload = read_payload(&payload_path)?;
    perform(action, payload)
}

fn read_payload(path: &Path) -> Result<WorkerPayload> {
    let bytes = fs::read(path).with_context(|| format!("failed to read payload {path:?}"))?;
    serde_json::from_slice(&bytes).with_context(|| format!("failed to parse payload {path:?}"))
}

fn perform(action: Action, payload: WorkerPayload) -> Result<()> {
    let settings = payload
        .settings
        .into_settings()
        .map_err(|err| Report::new(err).wrap_err("failed to rebuild postgres settings"))?;
    export_environment(payload.environment);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build worker runtime")?;

    let mut postgres = PostgreSQL::new(settings);
    runtime
        .block_on(async move {
            match action {
                Action::Setup => postgres.setup().await,
                Action::Start => postgres.start().await,
                Action::Stop => postgres.stop().await,
            }
        })
        .with_context(|| format!("postgres {action} failed"))
}

fn export_environment(vars: Vec<(String, Option<PlainSecret>)>) {
    for (key, value) in vars {
        // SAFETY: runs before the tokio runtime or any other thread starts.
        match value {
            Some(value) => unsafe { env::set_var(&key, value.expose()) },
            None => unsafe { env::remove_var(&key) },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Setup,
    Start,
    Stop,
}

impl Action {
    fn parse(raw: &OsStr) -> Result<Self> {
        match raw.to_string_lossy().as_ref() {
            "setup" => Ok(Self::Setup),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            other => Err(eyre!(
                "unknown action '{other}'; expected setup, start, or stop"
            )),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
        })
    }
}
