use dartboard::dispatcher::DispatchError;
use dartboard::monte_carlo::{throw_darts, worker_rng};
use dartboard::{RunConfig, Tally};
use log::{debug, info, trace};
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};

/// Serves batches for one dart board. Sampling runs on the blocking pool so the
/// runtime threads stay free to shuttle messages.
async fn dart_board(
    id: usize,
    mut rng: ChaCha8Rng,
    mut batches: mpsc::Receiver<u64>,
    results: mpsc::Sender<(usize, u64)>,
) -> u64 {
    if results.send((id, 0)).await.is_err() {
        return 0;
    }

    let mut served = 0;
    while let Some(count) = batches.recv().await {
        let thrown = task::spawn_blocking(move || {
            let hits = throw_darts(&mut rng, count);
            (rng, hits)
        })
        .await;
        let hits = match thrown {
            Ok((returned, hits)) => {
                rng = returned;
                hits
            }
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => break,
        };
        if results.send((id, hits)).await.is_err() {
            break;
        }
        served += 1;
    }
    debug!("dart board {} stopped after {} batches", id, served);
    served
}

/// Same crediting rules as the threaded dispatcher, but every board reports into
/// one merged channel, so the dispatcher awaits instead of polling.
pub async fn run_async(config: &RunConfig) -> Result<Tally, DispatchError> {
    info!(
        "dispatching {} samples to {} async dart boards in batches of {}",
        config.total_samples, config.workers, config.batch_size
    );

    let (result_tx, mut result_rx) = mpsc::channel(1);
    let mut batch_txs = Vec::with_capacity(config.workers);
    let mut tasks: Vec<JoinHandle<u64>> = Vec::with_capacity(config.workers);

    for id in 0..config.workers {
        let (batch_tx, batch_rx) = mpsc::channel(1);
        let rng = worker_rng(config.seed, id);
        tasks.push(task::spawn(dart_board(id, rng, batch_rx, result_tx.clone())));
        batch_txs.push(batch_tx);
    }
    drop(result_tx);

    let mut tally = Tally::default();
    let mut started = vec![false; config.workers];

    while let Some((id, hits)) = result_rx.recv().await {
        if batch_txs[id].send(config.batch_size).await.is_ok() {
            tally.dispatched += config.batch_size;
        }

        let credited = if started[id] { config.batch_size } else { 0 };
        started[id] = true;
        tally.credit(credited, hits);
        trace!("board {} returned {} hits, {} samples credited", id, hits, tally.samples);

        if tally.samples >= config.total_samples {
            break;
        }
    }

    drop(batch_txs);
    drop(result_rx);
    for (id, handle) in tasks.into_iter().enumerate() {
        match handle.await {
            Ok(served) => debug!("dart board {} joined after {} batches", id, served),
            Err(_) => return Err(DispatchError::WorkerPanicked { id }),
        }
    }

    info!(
        "credited {} samples with {} hits ({} dispatched)",
        tally.samples, tally.hits, tally.dispatched
    );
    Ok(tally)
}
