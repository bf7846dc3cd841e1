//! Server allocation for a multi-teller queue
//!
//! [`ServerPool`] hands each arriving customer to the teller that frees up
//! first. Tellers are kept in a min-heap keyed by `(next_available, index)`,
//! so ties go to the lowest index and with a single teller the pool reduces to
//! first-come first-served.

use queuesim_core::validation::validate_range;
use queuesim_core::{ServerId, SimError, Tick};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Bookkeeping for one teller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Server {
    pub id: ServerId,
    /// Earliest tick at which the teller can start another customer
    pub next_available: Tick,
    pub busy_time: Tick,
    pub customers_served: usize,
}

impl Server {
    fn new(id: ServerId) -> Self {
        Self {
            id,
            next_available: 0,
            busy_time: 0,
            customers_served: 0,
        }
    }
}

/// Where and when a customer was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub server: ServerId,
    pub start: Tick,
    pub end: Tick,
}

/// Greedy earliest-available allocator over `n` tellers
#[derive(Debug, Clone)]
pub struct ServerPool {
    servers: Vec<Server>,
    /// Min-heap of (next_available, server index)
    available: BinaryHeap<Reverse<(Tick, usize)>>,
}

impl ServerPool {
    /// Upper bound on the number of tellers in one pool
    pub const MAX_SERVERS: usize = 10_000;

    pub fn new(servers: usize) -> Result<Self, SimError> {
        validate_range("servers", servers, 1, Self::MAX_SERVERS)?;

        Ok(Self {
            servers: (0..servers).map(|i| Server::new(ServerId(i))).collect(),
            available: (0..servers).map(|i| Reverse((0, i))).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// The teller the next customer would get, without assigning anyone
    pub fn peek_next(&self) -> Option<(ServerId, Tick)> {
        self.available
            .peek()
            .map(|Reverse((next_available, index))| (ServerId(*index), *next_available))
    }

    /// Assign a customer arriving at `arrival` needing `service` ticks.
    ///
    /// Customers must be assigned in arrival order. A completion time past
    /// `Tick::MAX` is rejected and leaves the pool unchanged.
    pub fn assign(&mut self, arrival: Tick, service: Tick) -> Result<Assignment, SimError> {
        let (_, next_available) = self
            .peek_next()
            .ok_or_else(|| SimError::Internal("server pool has no servers".to_string()))?;

        let start = arrival.max(next_available);
        let end = start.checked_add(service).ok_or_else(|| {
            SimError::invalid("service", format!("small enough to finish by tick {} (starts at {start})", Tick::MAX))
        })?;

        let Reverse((_, index)) = self
            .available
            .pop()
            .ok_or_else(|| SimError::Internal("server pool has no servers".to_string()))?;

        let server = self
            .servers
            .get_mut(index)
            .ok_or_else(|| SimError::Internal(format!("server index {index} out of range")))?;
        server.next_available = end;
        server.busy_time += service;
        server.customers_served += 1;

        self.available.push(Reverse((end, index)));

        Ok(Assignment {
            server: ServerId(index),
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_server_is_fcfs() {
        let mut pool = ServerPool::new(1).unwrap();
        let arrivals = [0, 1, 2, 4, 5];
        let services = [2, 1, 3, 1, 2];

        let starts: Vec<Tick> = arrivals
            .iter()
            .zip(services.iter())
            .map(|(&a, &s)| pool.assign(a, s).unwrap().start)
            .collect();

        assert_eq!(starts, vec![0, 2, 3, 6, 7]);
        assert_eq!(pool.servers()[0].busy_time, 9);
        assert_eq!(pool.servers()[0].next_available, 9);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let mut pool = ServerPool::new(3).unwrap();
        assert_eq!(pool.peek_next(), Some((ServerId(0), 0)));

        let a = pool.assign(0, 5).unwrap();
        let b = pool.assign(0, 5).unwrap();
        let c = pool.assign(0, 2).unwrap();
        assert_eq!((a.server, b.server, c.server), (ServerId(0), ServerId(1), ServerId(2)));

        // Server 2 frees first
        let d = pool.assign(1, 1).unwrap();
        assert_eq!(d.server, ServerId(2));
        assert_eq!(d.start, 2);

        // Server 2 again at 3, then all three free at 5
        let e = pool.assign(1, 2).unwrap();
        assert_eq!(e.server, ServerId(2));
        assert_eq!(e.end, 5);
        let f = pool.assign(10, 1).unwrap();
        assert_eq!(f.server, ServerId(0));
        assert_eq!(f.start, 10);
    }

    #[test]
    fn test_idle_server_starts_at_arrival() {
        let mut pool = ServerPool::new(2).unwrap();
        pool.assign(0, 3).unwrap();
        let second = pool.assign(7, 2).unwrap();
        assert_eq!(second.server, ServerId(1));
        assert_eq!(second.start, 7);
        assert_eq!(second.end, 9);
    }

    #[test]
    fn test_completion_past_tick_max_is_rejected() {
        let mut pool = ServerPool::new(1).unwrap();
        pool.assign(0, Tick::MAX - 1).unwrap();

        let err = pool.assign(1, 2).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert_eq!(pool.peek_next(), Some((ServerId(0), Tick::MAX - 1)));
        assert_eq!(pool.servers()[0].customers_served, 1);
        assert!(pool.assign(Tick::MAX - 1, 1).is_ok());
    }

    #[test]
    fn test_invalid_server_counts() {
        assert!(ServerPool::new(0).unwrap_err().is_invalid_parameter());
        assert!(ServerPool::new(ServerPool::MAX_SERVERS + 1)
            .unwrap_err()
            .is_invalid_parameter());
        assert_eq!(ServerPool::new(ServerPool::MAX_SERVERS).unwrap().len(), ServerPool::MAX_SERVERS);
    }
}
