use std::cell::LazyCell;
use std::path::PathBuf;
use std::sync::Arc;

use pomodoro_timer::client::app::connector::{Connector, UnixConnector};
use pomodoro_timer::client::config;
use pomodoro_timer::client::outbound::{
    ConfigureService, DoneService, InitService, PauseService, QueryService, ResumeService,
    StartService, StopService,
};
use pomodoro_timer::client::Client;
use pomodoro_timer::domain::client::ApplicationCore;
use pomodoro_timer::utils::xdg::{Xdg, XdgBaseKind};
use snafu::{prelude::*, Whatever};
use tracing::Level;

use crate::cli::{Arguments, Command};

const APP_NAME: &str = "pomodoro-timer";
const DAEMON_NAME: &str = "pomodoro-timer-daemon";

struct EnvironmentPath {
    socket: PathBuf,
    pid: PathBuf,
}

pub fn bootstrap(args: &Arguments) -> Result<Client, Whatever> {
    let env_path = environment(args)?;
    let core = core(args, env_path);
    Ok(Client::new(core))
}

fn environment(args: &Arguments) -> Result<EnvironmentPath, Whatever> {
    let res = match &args.config {
        Some(path) => config::load_with_path(path.clone()),
        None => config::load_with_xdg(APP_NAME.to_owned()),
    };

    let configuration = res.whatever_context("Could not load configuration")?;

    let xdg = LazyCell::new(|| Xdg::new(APP_NAME));

    let socket = match &configuration.runtime.socket {
        Some(socket) => socket.clone(),
        None => xdg
            .as_ref()
            .map_err(Clone::clone)
            .and_then(|xdg| xdg.resolve(XdgBaseKind::Runtime, "daemon.socket"))
            .whatever_context("Could not use XDG base directories")?,
    };

    let pid = match &configuration.runtime.pid {
        Some(pid) => pid.clone(),
        None => xdg
            .as_ref()
            .map_err(Clone::clone)
            .and_then(|xdg| xdg.resolve(XdgBaseKind::Runtime, "daemon.pid"))
            .whatever_context("Could not use XDG base directories")?,
    };

    Ok(EnvironmentPath { socket, pid })
}

fn core(args: &Arguments, env_path: EnvironmentPath) -> Arc<ApplicationCore> {
    let executable = match &args.command {
        Command::Init { executable, .. } => executable.clone(),
        _ => None,
    };

    let verbosity = match &args.command {
        Command::Init { verbosity, .. } => *verbosity,
        _ => Level::INFO,
    };

    let connector: Arc<dyn Connector> = Arc::new(UnixConnector::new(env_path.socket));

    let init = Arc::new(InitService::new(
        executable,
        env_path.pid,
        DAEMON_NAME.to_owned(),
        args.config.clone(),
        verbosity,
    ));

    let core = ApplicationCore::setup(
        init,
        Arc::new(StartService::new(Arc::clone(&connector))),
        Arc::new(StopService::new(Arc::clone(&connector))),
        Arc::new(PauseService::new(Arc::clone(&connector))),
        Arc::new(ResumeService::new(Arc::clone(&connector))),
        Arc::new(DoneService::new(Arc::clone(&connector))),
        Arc::new(ConfigureService::new(Arc::clone(&connector))),
        Arc::new(QueryService::new(connector)),
    );
    Arc::new(core)
}
