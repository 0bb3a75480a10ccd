//! Load state of a gateway-backed view resource.
//!
//! A [`Resource`] holds the last successful snapshot, a pending flag and a
//! fixed user-facing error. Every read is issued with a [`Ticket`] taken
//! from [`Resource::begin`]; a response is only applied if its ticket is
//! still the newest one, so an older request resolving late can never
//! overwrite a newer one.

use tracing::{debug, warn};

use crate::GemshopError;

/// Identifies one read request against a [`Resource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Client-side mirror of one remote read.
#[derive(Debug)]
pub struct Resource<T> {
    data: Option<T>,
    loading: bool,
    error: Option<&'static str>,
    generation: u64,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> Resource<T> {
    /// Creates an empty, idle resource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a new read as pending and returns its ticket.
    ///
    /// Any ticket handed out earlier becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.loading = true;
        Ticket(self.generation)
    }

    /// Drops all tickets without starting a new read.
    ///
    /// Used when a view is left; responses still in flight are discarded.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    /// Applies the outcome of the read identified by `ticket`.
    ///
    /// On success the snapshot is replaced and the error cleared. On failure
    /// the technical error is logged, `message` becomes the visible error and
    /// the previous snapshot is kept. Returns `false` if the ticket was stale
    /// and the outcome was discarded.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: crate::Result<T>,
        message: &'static str,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "discarding stale response"
            );
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "{message}");
                self.error = Some(message);
            }
        }
        true
    }

    /// Records a failed mutation against this resource.
    ///
    /// The snapshot is left untouched; the error stays until the next
    /// successful read clears it.
    pub fn fail(&mut self, error: &GemshopError, message: &'static str) {
        warn!(error = %error, "{message}");
        self.error = Some(message);
    }

    /// Clears the visible error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Returns the last successful snapshot.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Mutable access to the snapshot for view-local selection state.
    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    /// Returns whether a read is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the fixed error message, if the last operation failed.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Forgets the snapshot, error and any pending read.
    pub fn reset(&mut self) {
        self.invalidate();
        self.data = None;
        self.error = None;
    }
}
