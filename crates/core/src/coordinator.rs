// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asynchronous reservation intake
//!
//! A single dispatcher loop receives [`ReservationRequest`]s over a bounded
//! channel and fans each one out to its own task, which calls
//! [`Registry::reserve`] and answers on the request's oneshot channel. The
//! dispatcher holds no registry lock and never waits on a registry call; it
//! only waits for the next request or for an in-flight slot.
//!
//! Shutdown: once every [`ReservationClient`] is dropped the channel closes,
//! the loop drains queued requests, and [`Coordinator::shutdown`] resolves
//! after all dispatched requests have delivered their responses.

use crate::config::CoordinatorConfig;
use crate::error::{RegistryError, SubmitError};
use crate::id::{ItemId, MemberId};
use crate::registry::{Registry, ReservationTicket};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Semaphore};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

/// Outcome delivered on a request's response channel
pub type ReservationResult = Result<ReservationTicket, RegistryError>;

/// A request to reserve an item for a member
#[derive(Debug)]
pub struct ReservationRequest {
    pub item: ItemId,
    pub member: MemberId,
    pub respond_to: oneshot::Sender<ReservationResult>,
}

impl ReservationRequest {
    /// Build a request together with the receiver for its response
    pub fn new(item: ItemId, member: MemberId) -> (Self, oneshot::Receiver<ReservationResult>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                item,
                member,
                respond_to: tx,
            },
            rx,
        )
    }
}

/// Cloneable handle for submitting reservation requests
#[derive(Clone, Debug)]
pub struct ReservationClient {
    tx: mpsc::Sender<ReservationRequest>,
}

impl ReservationClient {
    /// Queue a prepared request
    ///
    /// Waits for queue capacity. Fails with [`SubmitError::Closed`] once the
    /// coordinator has stopped.
    pub async fn send(&self, request: ReservationRequest) -> Result<(), SubmitError> {
        self.tx
            .send(request)
            .await
            .map_err(|_| SubmitError::Closed)
    }

    /// Queue a request and return the receiver for its response
    ///
    /// Dropping the receiver abandons only the response: the registry still
    /// acts on the request.
    pub async fn submit(
        &self,
        item: ItemId,
        member: MemberId,
    ) -> Result<oneshot::Receiver<ReservationResult>, SubmitError> {
        let (request, rx) = ReservationRequest::new(item, member);
        self.send(request).await?;
        Ok(rx)
    }

    /// Submit a request and wait for its outcome
    pub async fn reserve(
        &self,
        item: ItemId,
        member: MemberId,
    ) -> Result<ReservationTicket, SubmitError> {
        let rx = self.submit(item, member).await?;
        let result = rx.await.map_err(|_| SubmitError::Dropped)?;
        Ok(result?)
    }
}

/// Owner of the running dispatcher loop
pub struct Coordinator {
    task: JoinHandle<usize>,
}

impl Coordinator {
    /// Spawn the dispatcher loop
    pub fn start(registry: Registry, config: &CoordinatorConfig) -> (Self, ReservationClient) {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let limit = Arc::new(Semaphore::new(config.max_in_flight.max(1)));
        info!(
            queue_capacity = config.queue_capacity,
            max_in_flight = config.max_in_flight,
            "reservation coordinator started"
        );
        let task = tokio::spawn(dispatch(registry, rx, limit));
        (Self { task }, ReservationClient { tx })
    }

    /// Whether the dispatcher loop has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the loop to stop and all in-flight requests to answer
    ///
    /// Resolves only after every [`ReservationClient`] has been dropped.
    /// Returns the number of requests dispatched.
    pub async fn shutdown(self) -> usize {
        match self.task.await {
            Ok(dispatched) => dispatched,
            Err(e) => {
                warn!(error = %e, "reservation coordinator task failed");
                0
            }
        }
    }
}

async fn dispatch(
    registry: Registry,
    mut rx: mpsc::Receiver<ReservationRequest>,
    limit: Arc<Semaphore>,
) -> usize {
    let mut in_flight = JoinSet::new();
    let mut dispatched = 0;

    while let Some(request) = rx.recv().await {
        // Reap finished units so the set does not grow with total traffic
        while in_flight.try_join_next().is_some() {}

        let Ok(permit) = Arc::clone(&limit).acquire_owned().await else {
            // Never closed while the loop owns it
            break;
        };
        dispatched += 1;
        let registry = registry.clone();
        in_flight.spawn(async move {
            handle(&registry, request);
            drop(permit);
        });
    }

    debug!(in_flight = in_flight.len(), "reservation intake closed, draining");
    while let Some(result) = in_flight.join_next().await {
        if let Err(e) = result {
            warn!(error = %e, "reservation unit failed");
        }
    }

    info!(dispatched, "reservation coordinator stopped");
    dispatched
}

fn handle(registry: &Registry, request: ReservationRequest) {
    let ReservationRequest {
        item,
        member,
        respond_to,
    } = request;

    let result = registry.reserve(item, member);
    if let Err(error) = &result {
        debug!(item = %item, member = %member, %error, "reservation rejected");
    }
    if respond_to.send(result).is_err() {
        debug!(item = %item, member = %member, "requester went away before the response");
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
