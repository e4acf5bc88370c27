pub mod counter;
pub mod countdown;
pub mod duration;
pub mod notification;
pub mod phase;

pub use counter::CycleCounter;
pub use countdown::{Countdown, CountdownStep};
pub use duration::{DurationKind, SessionDuration};
pub use notification::NotificationMessage;
pub use phase::Phase;
