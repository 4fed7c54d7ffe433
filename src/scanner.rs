//! Concurrent probe dispatch
//!
//! Fans out one probe task per address and joins them all before producing
//! any output. Awaiting the join handles in launch order is what guarantees
//! that the merged outcomes match enumeration order no matter which probe
//! finishes first; the range compressor downstream depends on that.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::probe::{ProbeOutcome, ProbeStatus, Prober};

/// Runs one prober per address concurrently, bounded by a semaphore
pub struct ScanDispatcher<P> {
    prober: Arc<P>,
    permits: Arc<Semaphore>,
}

impl<P: Prober + 'static> ScanDispatcher<P> {
    pub fn new(prober: P, max_concurrent: usize) -> Self {
        Self {
            prober: Arc::new(prober),
            permits: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Probe every address and return outcomes in input order.
    ///
    /// A panicked probe task resolves to its own [`ProbeStatus::Failed`]
    /// outcome and never affects the other tasks. There is no partial or
    /// streaming result; this returns only once every task has completed.
    pub async fn sweep(&self, addresses: &[Ipv4Addr]) -> Vec<ProbeOutcome> {
        let start = Instant::now();
        info!("dispatching {} probes", addresses.len());

        let mut handles = Vec::with_capacity(addresses.len());
        for &address in addresses {
            let prober = Arc::clone(&self.prober);
            let permits = Arc::clone(&self.permits);

            handles.push(tokio::spawn(async move {
                // The semaphore is never closed, so acquire cannot fail
                let _permit = permits.acquire_owned().await.unwrap();
                let status = prober.probe(address).await;
                ProbeOutcome { address, status }
            }));
        }

        // Full barrier: join_all resolves in launch order regardless of
        // completion order
        let joined = futures::future::join_all(handles).await;

        let mut outcomes = Vec::with_capacity(addresses.len());
        for (result, &address) in joined.into_iter().zip(addresses) {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    warn!(address = %address, error = %e, "probe task aborted");
                    outcomes.push(ProbeOutcome {
                        address,
                        status: ProbeStatus::Failed,
                    });
                }
            }
        }

        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "sweep barrier released"
        );
        outcomes
    }
}
