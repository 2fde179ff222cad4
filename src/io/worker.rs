use super::loader::ContentLoader;
use crate::model::{Content, NavigationTarget};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use tracing::{debug, warn};

/// Sequence number tying a completion to the dispatch that caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(pub u64);

#[derive(Debug)]
pub enum IoCommand {
    Load {
        ticket: LoadTicket,
        target: NavigationTarget,
    },
}

#[derive(Debug)]
pub enum IoResult {
    Loaded {
        ticket: LoadTicket,
        content: Content,
    },
    Failed {
        ticket: LoadTicket,
        target: NavigationTarget,
        message: String,
    },
}

impl IoResult {
    pub fn ticket(&self) -> LoadTicket {
        match self {
            Self::Loaded { ticket, .. } | Self::Failed { ticket, .. } => *ticket,
        }
    }
}

/// Runs `loader` on a background thread. `on_complete` fires after each
/// result is sent so the UI can repaint.
pub fn spawn_worker<L, F>(loader: L, on_complete: F) -> (Sender<IoCommand>, Receiver<IoResult>)
where
    L: ContentLoader + 'static,
    F: Fn() + Send + 'static,
{
    let (cmd_tx, cmd_rx) = channel();
    let (res_tx, res_rx) = channel();

    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let result = match cmd {
                IoCommand::Load { ticket, target } => match loader.load(&target) {
                    Ok(content) => {
                        debug!(ticket = ticket.0, %target, "Content loaded");
                        IoResult::Loaded { ticket, content }
                    }
                    Err(e) => {
                        warn!(ticket = ticket.0, %target, error = %e, "Content load failed");
                        IoResult::Failed {
                            ticket,
                            target,
                            message: e.to_string(),
                        }
                    }
                },
            };
            if res_tx.send(result).is_err() {
                break;
            }
            on_complete();
        }
        debug!("Content worker stopped");
    });

    (cmd_tx, res_rx)
}
