mod duration;
mod notification;

pub use duration::DurationPreferences;
pub use notification::NotificationConfiguration;
