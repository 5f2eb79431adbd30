use std::fmt::{Display, Formatter};

use crate::error::SignalMapError;

/// Kind of a one-shot asynchronous request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Position lookup.
    Geolocation,
    /// Place search.
    PlaceSearch,
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKind::Geolocation => f.write_str("geolocation"),
            RequestKind::PlaceSearch => f.write_str("place search"),
        }
    }
}

/// Proof that a request was started. Must be handed back on completion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    kind: RequestKind,
    id: u64,
}

impl RequestTicket {
    /// Kind of the request.
    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

/// Allows at most one in-flight request of every kind.
///
/// External services do not cancel an earlier request when a new one is made, so two lookups
/// started in quick succession could complete in any order. The guard refuses to start the second
/// one instead.
#[derive(Debug, Default)]
pub struct RequestGuard {
    next_id: u64,
    geolocation: Option<u64>,
    place_search: Option<u64>,
}

impl RequestGuard {
    fn slot(&mut self, kind: RequestKind) -> &mut Option<u64> {
        match kind {
            RequestKind::Geolocation => &mut self.geolocation,
            RequestKind::PlaceSearch => &mut self.place_search,
        }
    }

    /// Returns true if a request of the kind is running.
    pub fn is_pending(&self, kind: RequestKind) -> bool {
        match kind {
            RequestKind::Geolocation => self.geolocation.is_some(),
            RequestKind::PlaceSearch => self.place_search.is_some(),
        }
    }

    /// Starts a request.
    pub fn begin(&mut self, kind: RequestKind) -> Result<RequestTicket, SignalMapError> {
        let id = self.next_id;
        let slot = self.slot(kind);
        if slot.is_some() {
            log::warn!("Refusing to start a {kind} request while another one is running");
            return Err(SignalMapError::RequestInFlight(kind));
        }

        *slot = Some(id);
        self.next_id += 1;

        Ok(RequestTicket { kind, id })
    }

    /// Completes the request the ticket was issued for.
    pub fn finish(&mut self, ticket: RequestTicket) -> Result<(), SignalMapError> {
        let slot = self.slot(ticket.kind);
        if *slot != Some(ticket.id) {
            return Err(SignalMapError::StaleRequest(ticket.kind));
        }

        *slot = None;
        Ok(())
    }

    /// Gives up on the request the ticket was issued for, so a new one can be started. A result
    /// arriving for the ticket later is rejected as stale. Returns false if the ticket is not the
    /// pending one.
    pub fn abandon(&mut self, ticket: RequestTicket) -> bool {
        let abandoned = self.finish(ticket).is_ok();
        if abandoned {
            log::debug!("Abandoned {} request", ticket.kind);
        }

        abandoned
    }
}

/// Abandons the request when dropped, unless the ticket is taken back with
/// [`PendingRequest::into_ticket`].
pub(crate) struct PendingRequest<'a> {
    guard: &'a mut RequestGuard,
    ticket: RequestTicket,
    armed: bool,
}

impl<'a> PendingRequest<'a> {
    pub(crate) fn new(guard: &'a mut RequestGuard, ticket: RequestTicket) -> Self {
        Self {
            guard,
            ticket,
            armed: true,
        }
    }

    pub(crate) fn into_ticket(mut self) -> RequestTicket {
        self.armed = false;
        self.ticket
    }
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.guard.abandon(self.ticket);
        }
    }
}
