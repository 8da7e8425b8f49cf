//! Frame worker - sequential frame processing on a dedicated thread
//!
//! Architecture:
//! - Bounded frame queue; late frames are dropped, never buffered
//! - One thread evaluates frames strictly in arrival order
//! - The recognizer lock is held for a whole frame evaluation
//!   (admit → classify → accept), never for part of one
//! - `stop()` is fire-and-forget: no new frame starts after it returns,
//!   a frame already being evaluated finishes

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, select, Receiver, Sender, TrySendError};
use parking_lot::Mutex;

use super::recognizer::{FrameOutcome, Recognizer};
use crate::classifier::Classifier;
use crate::landmarks::Frame;

const FRAME_QUEUE_CAPACITY: usize = 4;

pub type SharedRecognizer = Arc<Mutex<Recognizer>>;

/// Worker counters
#[derive(Debug, Default)]
pub struct WorkerStats {
    pub processed: AtomicU64,
    pub evaluated: AtomicU64,
    pub dropped: AtomicU64,
}

impl WorkerStats {
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    pub fn evaluated(&self) -> u64 {
        self.evaluated.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

pub struct FrameWorker {
    frames: Sender<Frame>,
    stop_tx: Sender<()>,
    running: Arc<AtomicBool>,
    stats: Arc<WorkerStats>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FrameWorker {
    /// Start a worker evaluating frames against `recognizer` with `classifier`
    pub fn spawn<C>(recognizer: SharedRecognizer, classifier: C) -> Self
    where
        C: Classifier + Send + 'static,
    {
        let (frames, frame_rx) = bounded(FRAME_QUEUE_CAPACITY);
        let (stop_tx, stop_rx) = bounded(1);
        let running = Arc::new(AtomicBool::new(true));
        let stats = Arc::new(WorkerStats::default());

        let handle = {
            let running = Arc::clone(&running);
            let stats = Arc::clone(&stats);
            thread::spawn(move || {
                Self::run(recognizer, classifier, frame_rx, stop_rx, running, stats);
            })
        };

        Self {
            frames,
            stop_tx,
            running,
            stats,
            handle: Some(handle),
        }
    }

    /// Queue a frame without blocking. Returns false if it was dropped.
    pub fn submit(&self, frame: Frame) -> bool {
        if !self.is_running() {
            return false;
        }
        match self.frames.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                log::trace!("frame queue full, dropping late frame");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Stop processing. Safe to call any number of times, from any thread.
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            let _ = self.stop_tx.try_send(());
            log::info!("frame worker stopping");
        }
    }

    /// Stop and wait for the worker thread to exit
    pub fn join(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("frame worker thread panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> &WorkerStats {
        &self.stats
    }

    fn run<C: Classifier>(
        recognizer: SharedRecognizer,
        mut classifier: C,
        frames: Receiver<Frame>,
        stop: Receiver<()>,
        running: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) {
        loop {
            let frame = select! {
                recv(stop) -> _ => break,
                recv(frames) -> msg => match msg {
                    Ok(frame) => frame,
                    Err(_) => break,
                },
            };

            let mut guard = recognizer.lock();
            // Checked under the lock: once stop() has returned, nothing new starts
            if !running.load(Ordering::Acquire) {
                break;
            }
            let outcome = guard.process_frame(&frame, &mut classifier);
            drop(guard);

            stats.processed.fetch_add(1, Ordering::Relaxed);
            if matches!(outcome, FrameOutcome::Evaluated { .. }) {
                stats.evaluated.fetch_add(1, Ordering::Relaxed);
            }
        }
        log::debug!("frame worker exited after {} frames", stats.processed());
    }
}

impl Drop for FrameWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
