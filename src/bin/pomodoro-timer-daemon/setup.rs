use std::path::{Path, PathBuf};
use std::sync::Arc;

use pomodoro_timer::daemon::config::{self, Configuration};
use pomodoro_timer::daemon::outbound::NotifyService;
use pomodoro_timer::daemon::repository::{DurationPreferences, NotificationConfiguration};
use pomodoro_timer::daemon::runtime::{Environment, ProcessController};
use pomodoro_timer::daemon::{Listener, Server, UnixListener};
use pomodoro_timer::domain::daemon::ApplicationCore;
use pomodoro_timer::utils::xdg::{Xdg, XdgBaseKind};
use snafu::{prelude::*, Whatever};

use crate::cli::Arguments;

const APP_NAME: &str = "pomodoro-timer";

struct EnvironmentPath {
    socket: PathBuf,
    pid: PathBuf,
    durations: PathBuf,
}

pub async fn bootstrap(args: Arguments) -> Result<Server, Whatever> {
    let configuration = configuration(&args)?;
    let env = environment(&args, &configuration)?;
    process(&args, &env.pid)?;

    let listener = listener(&env.socket)?;
    let core = core(configuration, &env.durations).await?;

    Ok(Server::new(listener, core))
}

/// Resolve the runtime and data paths, creating their directories with
/// private permissions where needed.
fn environment(args: &Arguments, config: &Configuration) -> Result<EnvironmentPath, Whatever> {
    let xdg = Xdg::new(APP_NAME).whatever_context("Could not use XDG base directories")?;
    let mut env = Environment::new();

    let socket = match (&args.socket, &config.runtime.socket) {
        (Some(path), _) => path.clone(),
        (None, Some(path)) => path.clone(),
        (None, None) => xdg
            .resolve(XdgBaseKind::Runtime, "daemon.socket")
            .whatever_context("Could not resolve the socket path")?,
    };

    let pid = match &config.runtime.pid {
        Some(path) => path.clone(),
        None => xdg
            .resolve(XdgBaseKind::Runtime, "daemon.pid")
            .whatever_context("Could not resolve the PID path")?,
    };

    for path in [&socket, &pid] {
        let parent = path
            .parent()
            .whatever_context(format!("Invalid runtime path: {}", path.display()))?;
        env.register_directory(parent);
        env.register_permission(parent, 0o700);
    }

    let durations = xdg
        .resolve_create(XdgBaseKind::Data, "durations.toml")
        .whatever_context("Could not resolve the duration store path")?;

    env.setup()
        .whatever_context("Could not setup environment")?;

    Ok(EnvironmentPath {
        socket,
        pid,
        durations,
    })
}

fn process<P: AsRef<Path>>(args: &Arguments, pid_path: P) -> Result<(), Whatever> {
    ProcessController::new(
        APP_NAME.to_owned(),
        pid_path.as_ref().to_path_buf(),
        args.daemonize,
    )
    .start()
    .whatever_context("Could not prepare process")?;
    Ok(())
}

fn configuration(args: &Arguments) -> Result<Arc<Configuration>, Whatever> {
    let res = match &args.config {
        Some(path) => config::load_with_path(path.clone()),
        None => config::load_with_xdg(APP_NAME.to_owned()),
    };

    let configuration = res.whatever_context("Could not load configuration")?;
    Ok(Arc::new(configuration))
}

fn listener<P: AsRef<Path>>(path: P) -> Result<Box<dyn Listener>, Whatever> {
    // A socket left behind by an unclean shutdown would block the bind; the
    // PID check above already ruled out a live instance.
    if path.as_ref().exists() {
        std::fs::remove_file(path.as_ref())
            .whatever_context(format!("Could not remove {}", path.as_ref().display()))?;
    }

    let listener = UnixListener::new(path.as_ref())
        .whatever_context(format!("Could not bind to {}", path.as_ref().display()))?;

    Ok(Box::new(listener))
}

async fn core<P: AsRef<Path>>(
    config: Arc<Configuration>,
    durations: P,
) -> Result<ApplicationCore, Whatever> {
    let notify_port = Arc::new(NotifyService::new(APP_NAME.to_owned()));
    let duration_repository = Arc::new(DurationPreferences::new(durations));
    let notification_repository = Arc::new(NotificationConfiguration::new(config));

    let core = ApplicationCore::setup(notify_port, duration_repository, notification_repository)
        .await
        .whatever_context("Could not setup application core")?;

    Ok(core)
}
