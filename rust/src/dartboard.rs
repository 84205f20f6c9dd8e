use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::debug;
use rand_chacha::ChaCha8Rng;

use crate::dispatcher::DispatchError;
use crate::monte_carlo::{throw_darts, worker_rng};

/// Dispatcher side of a running dart board: where batches go, where hit counts
/// come back, and the thread to join once both are dropped.
pub struct BoardHandle {
    pub id: usize,
    pub batches: Sender<u64>,
    pub hits: Receiver<u64>,
    pub thread: JoinHandle<u64>,
}

/// A worker that throws batches of darts with its own generator.
struct DartBoard {
    id: usize,
    rng: ChaCha8Rng,
    batches: Receiver<u64>,
    hits: Sender<u64>,
}

impl DartBoard {
    /// Sends the zero kickoff, then serves batches until either channel
    /// disconnects. Returns the number of batches whose result was delivered.
    fn run(mut self) -> u64 {
        debug!("dart board {} ready", self.id);
        if self.hits.send(0).is_err() {
            debug!("dart board {} stopped before its first batch", self.id);
            return 0;
        }

        let mut served = 0;
        while let Ok(count) = self.batches.recv() {
            let hits = throw_darts(&mut self.rng, count);
            if self.hits.send(hits).is_err() {
                break;
            }
            served += 1;
        }

        debug!("dart board {} stopped after {} batches", self.id, served);
        served
    }
}

/// Starts dart board `id` on its own thread. Both channels are rendezvous
/// channels, so every send waits for the matching receive.
pub fn spawn(id: usize, seed: u64) -> Result<BoardHandle, DispatchError> {
    let (batch_tx, batch_rx) = bounded(0);
    let (hit_tx, hit_rx) = bounded(0);

    let board = DartBoard {
        id,
        rng: worker_rng(seed, id),
        batches: batch_rx,
        hits: hit_tx,
    };

    let thread = thread::Builder::new()
        .name(format!("dartboard-{id}"))
        .spawn(move || board.run())
        .map_err(|source| DispatchError::Spawn { id, source })?;

    Ok(BoardHandle {
        id,
        batches: batch_tx,
        hits: hit_rx,
        thread,
    })
}
