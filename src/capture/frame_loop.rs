// SPDX-License-Identifier: GPL-3.0-only

//! Processing-loop lifecycle
//!
//! Runs the per-frame pipeline on its own thread with a clean shutdown
//! path: the loop body decides whether to continue, and the owner (or a
//! signal handler) can request a stop between frames. Nothing is ever
//! cancelled mid-frame; a frame either completes or was never started.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Verdict returned by the loop body after each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Process the next frame
    Continue,
    /// Stop the loop gracefully
    Stop,
}

/// Handle to a frame-processing loop running on its own thread
///
/// The body closure is invoked once per frame until it returns
/// [`LoopAction::Stop`], the stop signal is raised, or the handle is
/// dropped.
pub struct ProcessingLoop {
    thread_handle: Option<JoinHandle<()>>,
    stop_signal: Arc<AtomicBool>,
    name: String,
}

impl ProcessingLoop {
    /// Spawn the loop thread and start processing
    pub fn spawn<F>(name: &str, mut body: F) -> Self
    where
        F: FnMut() -> LoopAction + Send + 'static,
    {
        let stop_signal = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop_signal);
        let thread_name = name.to_string();

        info!(name = %name, "Starting processing loop");

        let thread_handle = thread::spawn(move || {
            debug!(name = %thread_name, "Processing loop thread started");

            while !thread_stop.load(Ordering::SeqCst) {
                if body() == LoopAction::Stop {
                    debug!(name = %thread_name, "Loop body requested stop");
                    break;
                }
            }

            info!(name = %thread_name, "Processing loop thread exiting");
        });

        Self {
            thread_handle: Some(thread_handle),
            stop_signal,
            name: name.to_string(),
        }
    }

    /// Whether the loop thread is still alive
    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Shareable stop flag, e.g. for a ctrl-c handler
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_signal)
    }

    /// Raise the stop flag without waiting for the thread
    pub fn request_stop(&self) {
        debug!(name = %self.name, "Requesting processing loop stop");
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    /// Raise the stop flag and wait for the thread to finish
    pub fn stop(&mut self) {
        self.request_stop();
        self.join();
    }

    /// Wait for the thread to finish without raising the stop flag
    ///
    /// Useful when the loop ends itself, e.g. on source exhaustion.
    pub fn join(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            if let Err(e) = handle.join() {
                warn!(name = %self.name, "Processing loop thread panicked: {:?}", e);
            } else {
                debug!(name = %self.name, "Processing loop thread finished");
            }
        }
    }
}

impl Drop for ProcessingLoop {
    fn drop(&mut self) {
        if self.thread_handle.is_some() {
            debug!(name = %self.name, "ProcessingLoop dropped, stopping");
            self.stop();
        }
    }
}
