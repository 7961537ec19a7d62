//! Sequence tickets that discard stale catalog responses.
//!
//! Requests that replace data wholesale (list refreshes, searches, detail
//! fetches) are numbered when issued. Staleness is tracked per slice of the
//! state: a completion writes a slice only if no newer request targeting
//! that slice has been issued since. A `fetch_all` overtaken by a search
//! therefore still fills `view`, which the search does not touch.

use super::Operation;

/// A part of the catalog state that requests replace wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    /// Products in server order.
    All,
    /// Products as displayed.
    View,
    /// The opened product and its reviews.
    Detail,
}

/// What happened to a completion fed back into the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Every slice the request targets was written.
    Applied,
    /// Newer requests own some of the targeted slices; only the rest were written.
    Partial,
    /// Newer requests own every targeted slice. Nothing changed.
    Discarded,
}

impl Completion {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub const fn is_discarded(self) -> bool {
        matches!(self, Self::Discarded)
    }
}

/// Handle for an in-flight catalog request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    operation: Operation,
    seq: u64,
}

impl Ticket {
    /// The operation this ticket was issued for.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Position of this ticket in issue order.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }
}

/// Issues tickets and tracks the newest one per slice.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    next: u64,
    latest_all: u64,
    latest_view: u64,
    latest_detail: u64,
}

impl Sequencer {
    /// Issue a ticket for `operation`, superseding older tickets on the
    /// slices it writes.
    pub fn issue(&mut self, operation: Operation) -> Ticket {
        self.next += 1;
        let seq = self.next;
        for slice in operation.writes() {
            *self.latest_mut(*slice) = seq;
        }
        Ticket { operation, seq }
    }

    /// Whether `ticket` is the newest request targeting `slice`.
    #[must_use]
    pub const fn is_current(&self, ticket: &Ticket, slice: Slice) -> bool {
        let latest = match slice {
            Slice::All => self.latest_all,
            Slice::View => self.latest_view,
            Slice::Detail => self.latest_detail,
        };
        ticket.seq == latest
    }

    /// How much of a completion for `ticket` may still be applied.
    ///
    /// Operations that write no slice (appends and in-place edits) never go
    /// stale.
    #[must_use]
    pub fn completion(&self, ticket: &Ticket) -> Completion {
        let writes = ticket.operation.writes();
        let current = writes
            .iter()
            .filter(|slice| self.is_current(ticket, **slice))
            .count();

        if current == writes.len() {
            Completion::Applied
        } else if current == 0 {
            Completion::Discarded
        } else {
            Completion::Partial
        }
    }

    const fn latest_mut(&mut self, slice: Slice) -> &mut u64 {
        match slice {
            Slice::All => &mut self.latest_all,
            Slice::View => &mut self.latest_view,
            Slice::Detail => &mut self.latest_detail,
        }
    }
}
