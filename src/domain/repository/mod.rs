pub mod duration;
pub mod notification;

pub use duration::DurationRepository;
pub use notification::NotificationRepository;
