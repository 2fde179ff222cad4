pub mod history;
pub mod navigation;

pub use history::{Clock, HistoryEvent, HistoryStore, SubscriptionId, SystemClock};
pub use navigation::Navigator;
