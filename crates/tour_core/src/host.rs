//! Event-queue host: serialises UI input and fetch completions so the
//! controller only ever sees one event at a time.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use page::{ElementId, Page};
use shared::{Flow, Key, TourAction, TourError};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::{controller::TourController, loader::FlowLoader};

pub enum TourEvent {
    Action(TourAction),
    Click(ElementId),
    Key(Key),
    Resize,
    FlowFetched {
        generation: u64,
        result: Result<Flow, TourError>,
    },
}

/// Runs after a load finishes, successfully or not.
pub type LoadContinuation<P> =
    Box<dyn FnOnce(&mut TourController, &mut P, Result<usize, TourError>)>;

pub struct TourHost<P: Page> {
    controller: TourController,
    page: P,
    loader: Arc<dyn FlowLoader>,
    runtime: Handle,
    events_tx: Sender<TourEvent>,
    events_rx: Receiver<TourEvent>,
    generation: u64,
    pending: Option<(u64, LoadContinuation<P>)>,
}

impl<P: Page + 'static> TourHost<P> {
    pub fn new(
        mut controller: TourController,
        mut page: P,
        loader: Arc<dyn FlowLoader>,
        runtime: Handle,
    ) -> Self {
        controller.attach(&mut page);
        let (events_tx, events_rx) = unbounded();
        Self {
            controller,
            page,
            loader,
            runtime,
            events_tx,
            events_rx,
            generation: 0,
            pending: None,
        }
    }

    pub fn controller(&self) -> &TourController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TourController {
        &mut self.controller
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Sender for UI event sources.
    pub fn sender(&self) -> Sender<TourEvent> {
        self.events_tx.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts fetching the configured flow in the background. `continuation`
    /// runs from `pump` once the fetch completes.
    pub fn load<F>(&mut self, continuation: F)
    where
        F: FnOnce(&mut TourController, &mut P, Result<usize, TourError>) + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        if self.pending.take().is_some() {
            debug!(generation, "tour: previous load superseded");
        }
        self.pending = Some((generation, Box::new(continuation)));

        let loader = self.loader.clone();
        let url = self.controller.flow_url().to_string();
        let events_tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = loader.fetch(&url).await;
            let _ = events_tx.send(TourEvent::FlowFetched { generation, result });
        });
    }

    /// Switches flow file; any fetch still in flight is ignored when it lands.
    pub fn set_flow_url(&mut self, url: impl Into<String>) {
        self.generation += 1;
        self.pending = None;
        self.controller.set_flow_url(&mut self.page, url);
    }

    /// Processes every queued event, returning how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    /// Processes events until no load is pending or `timeout` elapses.
    /// Returns whether the load completed.
    pub fn pump_until_loaded(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pending.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.events_rx.recv_timeout(remaining) {
                Ok(event) => self.dispatch(event),
                Err(RecvTimeoutError::Timeout) => {
                    warn!("tour: timed out waiting for flow");
                    return false;
                }
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    pub fn dispatch(&mut self, event: TourEvent) {
        match event {
            TourEvent::Action(action) => self.controller.handle_action(&mut self.page, action),
            TourEvent::Click(element) => {
                if let Some(action) = self.page.click_action(element) {
                    self.controller.handle_action(&mut self.page, action);
                }
            }
            TourEvent::Key(key) => self.controller.handle_key(&mut self.page, &key),
            TourEvent::Resize => self.controller.reposition(&mut self.page),
            TourEvent::FlowFetched { generation, result } => {
                self.finish_load(generation, result)
            }
        }
    }

    /// Detaches the controller from the page and hands the page back.
    pub fn shutdown(mut self) -> P {
        self.controller.detach(&mut self.page);
        self.page
    }

    fn finish_load(&mut self, generation: u64, result: Result<Flow, TourError>) {
        if generation != self.generation {
            warn!(
                generation,
                current = self.generation,
                "tour: discarding stale flow response"
            );
            return;
        }
        let outcome = self.controller.apply_load_result(&mut self.page, result);
        if let Some((_, continuation)) = self.pending.take() {
            continuation(&mut self.controller, &mut self.page, outcome);
        }
    }
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
