use std::io;
use std::thread;

use crossbeam_channel::TryRecvError;
use log::{debug, info, trace};
use thiserror::Error;

use crate::config::RunConfig;
use crate::dartboard::{self, BoardHandle};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to spawn dart board {id}: {source}")]
    Spawn {
        id: usize,
        #[source]
        source: io::Error,
    },
    #[error("dart board {id} panicked")]
    WorkerPanicked { id: usize },
}

/// Running totals kept by the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Samples credited from batches whose hit count came back.
    pub samples: u64,
    pub hits: u64,
    /// Samples sent out, including batches still in flight when the run ended.
    pub dispatched: u64,
}

impl Tally {
    /// Credits one result. The kickoff carries no samples.
    pub fn credit(&mut self, credited_samples: u64, hits: u64) {
        self.samples += credited_samples;
        self.hits += hits;
    }
}

/// Farms batches out to `config.workers` dart boards until at least
/// `config.total_samples` samples have been credited, then stops and joins
/// every board.
pub fn run(config: &RunConfig) -> Result<Tally, DispatchError> {
    info!(
        "dispatching {} samples to {} dart boards in batches of {}",
        config.total_samples, config.workers, config.batch_size
    );

    let mut boards = Vec::with_capacity(config.workers);
    for id in 0..config.workers {
        boards.push(dartboard::spawn(id, config.seed)?);
    }

    let tally = drive(&boards, config);
    shutdown(boards)?;

    info!(
        "credited {} samples with {} hits ({} dispatched)",
        tally.samples, tally.hits, tally.dispatched
    );
    Ok(tally)
}

/// Round-robin polling loop. Never blocks on a single board; yields only after a
/// full pass finds nothing ready.
fn drive(boards: &[BoardHandle], config: &RunConfig) -> Tally {
    let mut tally = Tally::default();
    // Whether each board's next result answers a real batch or the kickoff.
    let mut in_flight = vec![false; boards.len()];

    loop {
        let mut idle = true;
        for (slot, board) in in_flight.iter_mut().zip(boards) {
            let hits = match board.hits.try_recv() {
                Ok(hits) => hits,
                // A board only disconnects by dying; shutdown reports it.
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => continue,
            };
            idle = false;

            if board.batches.send(config.batch_size).is_ok() {
                tally.dispatched += config.batch_size;
            }

            let credited = if *slot { config.batch_size } else { 0 };
            *slot = true;
            tally.credit(credited, hits);
            trace!(
                "board {} returned {} hits, {} samples credited",
                board.id,
                hits,
                tally.samples
            );

            if tally.samples >= config.total_samples {
                return tally;
            }
        }
        if idle {
            if boards.iter().all(|b| b.thread.is_finished()) {
                return tally;
            }
            thread::yield_now();
        }
    }
}

/// Drops every channel so boards fall out of their loops, then joins them.
fn shutdown(boards: Vec<BoardHandle>) -> Result<(), DispatchError> {
    let mut panicked = None;
    for BoardHandle {
        id,
        batches,
        hits,
        thread,
    } in boards
    {
        drop(batches);
        drop(hits);
        match thread.join() {
            Ok(served) => debug!("dart board {id} joined after {served} batches"),
            Err(_) => {
                panicked.get_or_insert(id);
            }
        }
    }
    match panicked {
        Some(id) => Err(DispatchError::WorkerPanicked { id }),
        None => Ok(()),
    }
}
