use std::sync::{Mutex, PoisonError};

use super::request::PaginatedRequest;

/// A request issued by the grid, stamped with its sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub request: PaginatedRequest,
}

#[derive(Debug, Default)]
struct TrackerState {
    latest: u64,
    in_flight: Option<RequestTicket>,
    last_issued: Option<PaginatedRequest>,
}

/// Decides which response is current: only the most recently issued sequence number is.
#[derive(Debug, Default)]
pub struct RequestTracker {
    state: Mutex<TrackerState>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a sequence number, or `None` when an identical request is already in flight
    pub fn begin(&self, request: PaginatedRequest) -> Option<RequestTicket> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.in_flight.as_ref().map(|ticket| &ticket.request) == Some(&request) {
            return None;
        }
        Some(Self::issue(&mut state, request))
    }

    /// Issue a sequence number even if an identical request is in flight; that
    /// older request becomes stale
    pub fn begin_fresh(&self, request: PaginatedRequest) -> RequestTicket {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Self::issue(&mut state, request)
    }

    fn issue(state: &mut TrackerState, request: PaginatedRequest) -> RequestTicket {
        state.latest += 1;
        let ticket = RequestTicket {
            seq: state.latest,
            request,
        };
        state.in_flight = Some(ticket.clone());
        state.last_issued = Some(ticket.request.clone());
        ticket
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).latest == seq
    }

    /// Mark a ticket complete, current or not, releasing its in-flight slot.
    /// Returns whether it was still current.
    pub fn finish(&self, ticket: &RequestTicket) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.in_flight.as_ref().map(|t| t.seq) == Some(ticket.seq) {
            state.in_flight = None;
        }
        state.latest == ticket.seq
    }

    /// No issued request is still awaiting its response
    pub fn is_idle(&self) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).in_flight.is_none()
    }

    pub fn latest(&self) -> u64 {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).latest
    }

    pub fn last_issued(&self) -> Option<PaginatedRequest> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).last_issued.clone()
    }
}
