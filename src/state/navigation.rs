// Navigation state - history, current context and destination loading
use super::history::{HistoryEvent, HistoryStore, SubscriptionId};
use crate::error::NavigationError;
use crate::io::{IoCommand, IoResult, LoadTicket};
use crate::model::{Content, Coordinates, NavigationContext, NavigationEntry, NavigationTarget};
use std::sync::mpsc::Sender;
use tracing::{debug, info, warn};

/// Turns navigation intents into history operations and tracks the load of
/// the current destination.
///
/// Entries are recorded before their content loads. A failed load leaves the
/// entry in history and surfaces the failure through [`Navigator::last_error`].
pub struct Navigator {
    history: HistoryStore,
    context: NavigationContext,
    content: Option<Content>,
    pending: Option<LoadTicket>,
    next_ticket: u64,
    last_error: Option<String>,
    commands: Sender<IoCommand>,
}

impl Navigator {
    pub fn new(commands: Sender<IoCommand>) -> Self {
        Self::with_history(HistoryStore::new(), commands)
    }

    pub fn with_history(history: HistoryStore, commands: Sender<IoCommand>) -> Self {
        let context = history
            .current()
            .map(NavigationContext::from_entry)
            .unwrap_or_default();
        Self {
            history,
            context,
            content: None,
            pending: None,
            next_ticket: 0,
            last_error: None,
            commands,
        }
    }

    pub fn navigate_to(
        &mut self,
        target: NavigationTarget,
        coordinates: Option<Coordinates>,
    ) -> Result<NavigationEntry, NavigationError> {
        let entry = self.history.record(target, coordinates);
        info!(id = entry.id(), target = %entry.target(), "Navigating");
        self.enter(&entry)?;
        Ok(entry)
    }

    /// Validates an untyped target before navigating. History is untouched
    /// when the kind is unknown.
    pub fn navigate_to_raw(
        &mut self,
        kind: &str,
        id: i64,
        slug: Option<String>,
        coordinates: Option<Coordinates>,
    ) -> Result<NavigationEntry, NavigationError> {
        let target = NavigationTarget::from_parts(kind, id, slug)?;
        self.navigate_to(target, coordinates)
    }

    /// Navigates to `<kind>:<id>[:<slug>]`.
    pub fn navigate_to_str(&mut self, input: &str) -> Result<NavigationEntry, NavigationError> {
        let target = input.parse::<NavigationTarget>()?;
        self.navigate_to(target, None)
    }

    /// Does nothing when there is nothing to go back to.
    pub fn navigate_back(&mut self) -> Result<Option<NavigationEntry>, NavigationError> {
        match self.history.back() {
            Some(entry) => {
                self.enter(&entry)?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    /// Does nothing when there is nothing to go forward to.
    pub fn navigate_forward(&mut self) -> Result<Option<NavigationEntry>, NavigationError> {
        match self.history.forward() {
            Some(entry) => {
                self.enter(&entry)?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    /// Reloads the current destination without touching history.
    pub fn reload(&mut self) -> Result<bool, NavigationError> {
        let Some(target) = self.history.current().map(|e| e.target().clone()) else {
            return Ok(false);
        };
        debug!(%target, "Reloading current destination");
        self.dispatch(target)?;
        Ok(true)
    }

    /// Reloads after the content root changed on disk. A load still in flight
    /// may have read the old files, so it is superseded rather than awaited.
    pub fn content_changed(&mut self) -> Result<bool, NavigationError> {
        if self.is_loading() {
            debug!("Content changed during a pending load");
        }
        self.reload()
    }

    /// Ends the session's history and returns to Home.
    pub fn reset(&mut self) {
        info!(entries = self.history.len(), "Resetting navigation");
        self.history.clear();
        self.context = NavigationContext::default();
        self.content = None;
        self.pending = None;
        self.last_error = None;
    }

    /// Moves within the current destination without a new history entry.
    pub fn set_coordinates(&mut self, coordinates: Option<Coordinates>) {
        self.context.coordinates = coordinates;
    }

    /// Selects a slide within the current destination without a new history entry.
    pub fn set_slide(&mut self, slide_id: Option<String>) {
        self.context.slide_id = slide_id;
    }

    /// Folds a loader completion into the navigator. Returns `false` for
    /// completions superseded by a later dispatch.
    pub fn apply(&mut self, result: IoResult) -> bool {
        if self.pending != Some(result.ticket()) {
            debug!(ticket = result.ticket().0, "Ignoring stale load result");
            return false;
        }
        self.pending = None;

        match result {
            IoResult::Loaded { content, .. } => {
                self.last_error = None;
                self.content = Some(content);
            }
            IoResult::Failed {
                target, message, ..
            } => {
                warn!(%target, %message, "Destination failed to load");
                self.content = None;
                self.last_error = Some(message);
            }
        }
        true
    }

    pub fn context(&self) -> &NavigationContext {
        &self.context
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&HistoryEvent) + 'static) -> SubscriptionId {
        self.history.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.history.unsubscribe(id)
    }

    fn enter(&mut self, entry: &NavigationEntry) -> Result<(), NavigationError> {
        self.context = NavigationContext::from_entry(entry);
        self.content = None;
        self.dispatch(entry.target().clone())
    }

    fn dispatch(&mut self, target: NavigationTarget) -> Result<(), NavigationError> {
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);

        if self.commands.send(IoCommand::Load { ticket, target }).is_err() {
            warn!("Content worker is gone; destination will not load");
            self.pending = None;
            self.last_error = Some(NavigationError::WorkerDisconnected.to_string());
            return Err(NavigationError::WorkerDisconnected);
        }
        self.pending = Some(ticket);
        Ok(())
    }
}
