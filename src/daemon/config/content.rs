use std::path::PathBuf;

use serde::Deserialize;

/// Static daemon settings parsed from `config.toml`.
///
/// The configurable interval lengths are deliberately not here: they change
/// at runtime and live in the separate duration store.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    pub notification: NotificationContent,
    pub runtime: RuntimeContent,
}

/// The `notification.<event>` sections: texts shown when an interval ends.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationContent {
    #[serde(rename = "pomodoro-finished")]
    pub pomodoro_finished: MessageContent,
    #[serde(rename = "break-finished")]
    pub break_finished: MessageContent,
}

impl Default for NotificationContent {
    fn default() -> Self {
        Self {
            pomodoro_finished: MessageContent {
                summary: "Pomodoro finished".to_owned(),
                body: Some("Well done! Your break is starting.".to_owned()),
            },
            break_finished: MessageContent {
                summary: "Break is over".to_owned(),
                body: Some("Mark the pomodoro as done to continue.".to_owned()),
            },
        }
    }
}

/// One notification text. `body` is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MessageContent {
    pub summary: String,
    pub body: Option<String>,
}

/// The `runtime` section: overrides for runtime file locations.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuntimeContent {
    pub socket: Option<PathBuf>,
    pub pid: Option<PathBuf>,
}
