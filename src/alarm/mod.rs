//! Audible alarm control surface.
//!
//! rodio's output objects are not `Send`, so they live on one dedicated
//! thread driven by a command channel; the handle only ever talks to that
//! thread. Playback trouble (no output device, dead sink) degrades to
//! "no sound": logged, never surfaced as a failure to the caller, and never
//! allowed to affect the classifier.

pub mod siren;

use siren::SirenTone;

use anyhow::{anyhow, Result};
use rodio::{OutputStream, Sink};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

enum AlarmCommand {
    Start,
    Stop,
}

/// Host control surface for the alarm loop. Both commands are idempotent:
/// `stop` with nothing playing is a no-op, and a second `start` restarts
/// the siren instead of layering another one.
pub struct AlarmHandle {
    tx: Arc<Mutex<Option<Sender<AlarmCommand>>>>,
    is_active: Arc<AtomicBool>,
}

impl AlarmHandle {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
            is_active: Arc::new(AtomicBool::new(false)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AlarmCommand>> {
        if let Some(tx) = self.tx.lock().map_err(|e| anyhow!(e.to_string()))?.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AlarmCommand>();

        // Spawn dedicated audio thread holding non-Send audio objects
        thread::Builder::new()
            .name("alarm-engine".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("failed to open audio output: {}", e))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| format!("failed to create audio sink: {}", e))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AlarmCommand::Start => {
                            // At most one alarm: tear down any existing sink first
                            if let Some(s_old) = sink.take() {
                                s_old.stop();
                            }
                            _stream = None;
                            match ensure_sink(&mut _stream, &mut sink) {
                                Ok(()) => {
                                    if let Some(ref s) = sink {
                                        s.append(SirenTone::new());
                                        s.play();
                                    }
                                }
                                // No output device: alarm degrades to silence
                                Err(err) => log_error!("alarm playback unavailable: {err}"),
                            }
                        }
                        AlarmCommand::Stop => {
                            if let Some(s_old) = sink.take() {
                                s_old.stop();
                            }
                            _stream = None;
                        }
                    }
                }
            })
            .map_err(|e| anyhow!("failed to spawn alarm thread: {e}"))?;

        let tx_clone = tx.clone();
        *self.tx.lock().map_err(|e| anyhow!(e.to_string()))? = Some(tx);
        Ok(tx_clone)
    }

    /// Begin the looping siren. Safe to call while already sounding.
    pub fn start(&self) -> Result<()> {
        let tx = self.ensure_thread()?;
        tx.send(AlarmCommand::Start)
            .map_err(|e| anyhow!("alarm thread gone: {e}"))?;
        self.is_active.store(true, Ordering::SeqCst);
        log_info!("alarm started");
        Ok(())
    }

    /// Halt the siren. Safe to call when nothing is playing.
    pub fn stop(&self) -> Result<()> {
        if let Ok(Some(tx)) = self.tx.lock().map(|g| g.clone()) {
            let _ = tx.send(AlarmCommand::Stop);
            log_info!("alarm stopped");
        }
        self.is_active.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Whether an alarm has been started and not yet stopped. Reflects the
    /// requested state; actual audio may be silent on devices without an
    /// output route.
    pub fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }
}

impl Default for AlarmHandle {
    fn default() -> Self {
        Self::new()
    }
}
