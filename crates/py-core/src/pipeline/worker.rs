use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::debug;

use crate::transliterate::Transliterator;

use super::{LineReader, PipelineError, PipelineOptions, PipelineStats};

// ---------------------------------------------------------------------------
// Work / Result types
// ---------------------------------------------------------------------------

struct Batch {
    index: usize,
    lines: Vec<String>,
}

struct Converted {
    index: usize,
    text: String,
    stats: PipelineStats,
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Reads and dispatches on the calling thread, converts on `options.jobs`
/// workers, and writes on a dedicated writer thread that restores input order.
pub(super) fn run_parallel<R: BufRead, W: Write + Send>(
    mut lines: LineReader<R>,
    writer: W,
    transliterator: Transliterator<'_>,
    options: &PipelineOptions,
) -> Result<PipelineStats, PipelineError> {
    let jobs = options.jobs.max(1);
    let batch_lines = options.batch_lines.max(1);

    thread::scope(|scope| -> Result<PipelineStats, PipelineError> {
        // Bounded so a fast reader cannot queue the whole input in memory.
        let (work_tx, work_rx) = mpsc::sync_channel::<Batch>(jobs * 2);
        let work_rx = Arc::new(Mutex::new(work_rx));
        let (result_tx, result_rx) = mpsc::channel::<Converted>();

        let mut workers = Vec::with_capacity(jobs);
        for i in 0..jobs {
            let work_rx = Arc::clone(&work_rx);
            let result_tx = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("py-worker-{i}"))
                .spawn_scoped(scope, move || convert_worker(work_rx, result_tx, transliterator))
                .map_err(PipelineError::Spawn)?;
            workers.push(handle);
        }
        // Workers own the only receivers now; once they all exit, sends fail.
        drop(work_rx);
        drop(result_tx);

        let writer_handle = thread::Builder::new()
            .name("py-writer".into())
            .spawn_scoped(scope, move || write_in_order(result_rx, writer))
            .map_err(PipelineError::Spawn)?;

        let read_result = dispatch(&mut lines, &work_tx, batch_lines);
        drop(work_tx);

        let mut panicked = false;
        for handle in workers {
            panicked |= handle.join().is_err();
        }
        let written = writer_handle
            .join()
            .map_err(|_| PipelineError::WorkerPanicked)?;
        if panicked {
            return Err(PipelineError::WorkerPanicked);
        }
        read_result?;
        written
    })
}

/// Send batches until input ends, fails, or the workers go away.
fn dispatch<R: BufRead>(
    lines: &mut LineReader<R>,
    tx: &SyncSender<Batch>,
    batch_lines: usize,
) -> Result<(), PipelineError> {
    let mut index = 0;
    let mut batch = Vec::with_capacity(batch_lines);
    loop {
        let finished = match lines.read_line() {
            Ok(Some(line)) => {
                batch.push(line);
                if batch.len() < batch_lines {
                    continue;
                }
                None
            }
            Ok(None) => Some(Ok(())),
            Err(e) => Some(Err(e)),
        };
        if !batch.is_empty() {
            let full = std::mem::replace(&mut batch, Vec::with_capacity(batch_lines));
            if tx.send(Batch { index, lines: full }).is_err() {
                debug!(index, "workers gone, stopping dispatch");
                return Ok(());
            }
            index += 1;
        }
        if let Some(result) = finished {
            return result;
        }
    }
}

// ---------------------------------------------------------------------------
// Worker threads
// ---------------------------------------------------------------------------

fn convert_worker(
    rx: Arc<Mutex<Receiver<Batch>>>,
    tx: Sender<Converted>,
    transliterator: Transliterator<'_>,
) {
    loop {
        let batch = {
            let Ok(guard) = rx.lock() else {
                return;
            };
            match guard.recv() {
                Ok(batch) => batch,
                Err(_) => return,
            }
        };

        let mut text = String::new();
        let mut bytes_in = 0;
        for line in &batch.lines {
            text.extend(transliterator.initials(line));
            text.push('\n');
            bytes_in += line.len();
        }
        let stats = PipelineStats {
            lines: batch.lines.len(),
            bytes_in,
            bytes_out: text.len(),
        };

        // The writer stopped (write error); nothing left to do.
        if tx
            .send(Converted {
                index: batch.index,
                text,
                stats,
            })
            .is_err()
        {
            return;
        }
    }
}

fn write_in_order<W: Write>(
    rx: Receiver<Converted>,
    mut writer: W,
) -> Result<PipelineStats, PipelineError> {
    let mut pending: BTreeMap<usize, Converted> = BTreeMap::new();
    let mut next = 0;
    let mut stats = PipelineStats::default();
    for converted in rx {
        pending.insert(converted.index, converted);
        while let Some(ready) = pending.remove(&next) {
            writer
                .write_all(ready.text.as_bytes())
                .map_err(PipelineError::Write)?;
            stats.add(ready.stats);
            next += 1;
        }
    }
    writer.flush().map_err(PipelineError::Write)?;
    if !pending.is_empty() {
        debug!(missing = next, held = pending.len(), "batches left unwritten");
    }
    Ok(stats)
}
