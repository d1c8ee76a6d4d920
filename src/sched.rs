//! The cooperative multi-connection scheduler.
//!
//! Owns the ordered registry of full-mode connections and advances each
//! one exactly once per [`Scheduler::tick`]. Connections never hold a
//! reference back to the scheduler; a connection that leaves full mode
//! has its slot cleared after its own step, never mid-iteration.

use std::fmt;

use tracing::debug;

use crate::conn::{Connection, Status, Step};
use crate::error::{ClientError, Result};

/// Stable handle to a registered connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId(usize);

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}

/// A failed [`Scheduler::connect`], handing the still-restricted
/// connection back so the caller can retry.
pub struct ConnectFailed {
    /// The connection, unchanged.
    pub conn: Connection,
    /// What went wrong.
    pub error: ClientError,
}

impl fmt::Debug for ConnectFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectFailed")
            .field("conn", &self.conn)
            .field("error", &self.error)
            .finish()
    }
}

impl fmt::Display for ConnectFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ConnectFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Result of one tick.
#[derive(Debug)]
pub struct TickReport {
    remaining: usize,
    faults: Vec<(ConnId, ClientError)>,
}

impl TickReport {
    /// True while at least one connection remains registered. This is
    /// the aggregate across the whole tick: a single connection
    /// terminating never stops the loop on its own.
    pub fn keep_going(&self) -> bool {
        self.remaining > 0
    }

    /// Connections still registered after the tick.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Fatal per-connection errors collected this tick.
    pub fn faults(&self) -> &[(ConnId, ClientError)] {
        &self.faults
    }

    /// Consume the report, yielding the faults.
    pub fn into_faults(self) -> Vec<(ConnId, ClientError)> {
        self.faults
    }
}

/// Registry of active connections, driven by the host's loop.
#[derive(Debug, Default)]
pub struct Scheduler {
    slots: Vec<Option<Connection>>,
}

impl Scheduler {
    /// An empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered connections.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when no connections are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a full-mode connection to the registry.
    ///
    /// Fails with `AccessDenied` when the connection has not been
    /// connected (or has already shut down).
    pub fn register(&mut self, conn: Connection) -> Result<ConnId> {
        if !conn.is_full() {
            return Err(ClientError::AccessDenied {
                op: "register",
                status: conn.status(),
            });
        }
        Ok(self.insert_slot(conn))
    }

    /// Connect and register in one step. On connect failure the
    /// still-restricted connection is handed back for retry.
    pub fn connect(
        &mut self,
        mut conn: Connection,
        host: &str,
        port: u16,
    ) -> std::result::Result<ConnId, ConnectFailed> {
        match conn.connect(host, port) {
            Ok(()) => Ok(self.insert_slot(conn)),
            Err(error) => Err(ConnectFailed { conn, error }),
        }
    }

    fn insert_slot(&mut self, conn: Connection) -> ConnId {
        let idx = match self.slots.iter().position(Option::is_none) {
            Some(idx) => {
                self.slots[idx] = Some(conn);
                idx
            }
            None => {
                self.slots.push(Some(conn));
                self.slots.len() - 1
            }
        };
        debug!(id = %ConnId(idx), "connection registered");
        ConnId(idx)
    }

    /// The connection at `id`, if still registered.
    pub fn get(&self, id: ConnId) -> Option<&Connection> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable access to the connection at `id`.
    pub fn get_mut(&mut self, id: ConnId) -> Option<&mut Connection> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Voluntarily close the connection at `id` and clear its slot.
    /// A no-op for ids that are already gone.
    pub fn disconnect(&mut self, id: ConnId, message: Option<&str>) -> Result<()> {
        match self.slots.get_mut(id.0).and_then(Option::as_mut) {
            Some(conn) => {
                let result = conn.disconnect(message);
                self.slots[id.0] = None;
                result
            }
            None => Ok(()),
        }
    }

    /// Resume every registered connection exactly once, in registry
    /// order.
    ///
    /// A connection that terminates (server `ERROR`, transport fault,
    /// or a hook-triggered shutdown) has its fatal error collected and
    /// its slot cleared; the remaining connections are still advanced
    /// this same tick.
    pub fn tick(&mut self) -> TickReport {
        let mut faults = Vec::new();
        let mut remaining = 0;

        for (idx, slot) in self.slots.iter_mut().enumerate() {
            let Some(conn) = slot.as_mut() else { continue };
            if !conn.is_full() {
                // Shut down outside the tick (e.g. by the host between
                // ticks); sweep the slot now.
                *slot = None;
                continue;
            }

            match conn.step() {
                Step::Idle | Step::Processed => {}
                Step::Fault(error) => {
                    debug!(id = %ConnId(idx), %error, "connection terminated");
                    faults.push((ConnId(idx), error));
                }
            }

            if conn.status() == Status::Full {
                remaining += 1;
            } else {
                *slot = None;
            }
        }

        TickReport { remaining, faults }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conn::Config;

    #[test]
    fn test_register_requires_full() {
        let mut sched = Scheduler::new();
        let conn = Connection::new(Config::new("tester")).unwrap();
        let err = sched.register(conn).unwrap_err();
        assert!(matches!(
            err,
            ClientError::AccessDenied {
                op: "register",
                status: Status::Restricted,
            }
        ));
        assert!(sched.is_empty());
    }

    #[test]
    fn test_empty_scheduler_stops() {
        let mut sched = Scheduler::new();
        let report = sched.tick();
        assert!(!report.keep_going());
        assert_eq!(report.remaining(), 0);
        assert!(report.faults().is_empty());
    }

    #[test]
    fn test_disconnect_unknown_id_is_noop() {
        let mut sched = Scheduler::new();
        assert!(sched.disconnect(ConnId(7), None).is_ok());
    }
}
