mod loader;
pub mod worker;

pub use loader::{ContentLoader, FsContentLoader};
pub use worker::{spawn_worker, IoCommand, IoResult, LoadTicket};
