//! `rodio`-backed [`MediaEngine`].
//!
//! A dedicated audio thread owns the output stream (it must stay alive for as
//! long as anything plays) and the current `Sink`. The control side sends
//! commands over a channel and drains tagged events from a second one.
//! Files are opened and decoded on the caller's thread so a bad file is
//! reported straight from `load_source`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};
use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::engine::{EngineError, EngineEvent, MediaEngine};

type FileSource = Decoder<BufReader<File>>;

enum EngineCmd {
    Load {
        generation: u64,
        source: FileSource,
        duration: Option<Duration>,
    },
    Play,
    Pause,
    Stop,
    Seek(Duration),
    SetVolume(f32),
    Quit,
}

pub struct RodioEngine {
    tx: Sender<EngineCmd>,
    events: Receiver<(u64, EngineEvent)>,
    generation: u64,
    join: Option<JoinHandle<()>>,
}

impl RodioEngine {
    /// Open the default output device on a new audio thread.
    ///
    /// `tick` is how often position updates and end-of-media checks run.
    pub fn new(tick: Duration, volume: f32) -> Result<Self, EngineError> {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (event_tx, event_rx) = mpsc::channel::<(u64, EngineEvent)>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        let join = thread::Builder::new()
            .name("cadence-audio".to_string())
            .spawn(move || {
                let mut stream = match OutputStreamBuilder::open_default_stream() {
                    Ok(s) => s,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                // rodio logs to stderr when the stream is dropped, which would
                // scribble over the TUI.
                stream.log_on_drop(false);
                let _ = ready_tx.send(Ok(()));

                AudioThread::new(stream, event_tx, volume).run(rx, tick);
            })
            .map_err(|e| EngineError::Output(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(msg)) => {
                let _ = join.join();
                return Err(EngineError::Output(msg));
            }
            Err(_) => return Err(EngineError::Disconnected),
        }

        Ok(Self {
            tx,
            events: event_rx,
            generation: 0,
            join: Some(join),
        })
    }

    fn send(&self, cmd: EngineCmd) {
        if self.tx.send(cmd).is_err() {
            warn!("audio thread is gone; command dropped");
        }
    }
}

impl MediaEngine for RodioEngine {
    fn load_source(&mut self, path: &Path) -> Result<(), EngineError> {
        // The previous source is retired even when `path` turns out unreadable.
        self.generation += 1;
        let source = open_source(path)?;
        let duration = source.total_duration().or_else(|| probe_duration(path));

        self.tx
            .send(EngineCmd::Load {
                generation: self.generation,
                source,
                duration,
            })
            .map_err(|_| EngineError::Disconnected)
    }

    fn play(&mut self) {
        self.send(EngineCmd::Play);
    }

    fn pause(&mut self) {
        self.send(EngineCmd::Pause);
    }

    fn stop(&mut self) {
        self.send(EngineCmd::Stop);
    }

    fn seek(&mut self, position_ms: u64) {
        self.send(EngineCmd::Seek(Duration::from_millis(position_ms)));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(EngineCmd::SetVolume(volume));
    }

    fn try_recv_event(&mut self) -> Option<EngineEvent> {
        // Drop anything still queued for a source that has since been replaced.
        while let Ok((generation, event)) = self.events.try_recv() {
            if generation == self.generation {
                return Some(event);
            }
        }
        None
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        let _ = self.tx.send(EngineCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

fn open_source(path: &Path) -> Result<FileSource, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Container-level duration for decoders that cannot tell up front
/// (e.g. MP3 without a Xing header).
fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            debug!("{}: no duration from container: {e}", path.display());
            None
        }
    }
}

struct AudioThread {
    // Keep this alive for the lifetime of the thread.
    stream: OutputStream,
    sink: Option<Sink>,
    generation: u64,
    volume: f32,
    events: Sender<(u64, EngineEvent)>,
}

impl AudioThread {
    fn new(stream: OutputStream, events: Sender<(u64, EngineEvent)>, volume: f32) -> Self {
        Self {
            stream,
            sink: None,
            generation: 0,
            volume: volume.clamp(0.0, 1.0),
            events,
        }
    }

    fn run(mut self, rx: Receiver<EngineCmd>, tick: Duration) {
        'commands: loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle(cmd) {
                        break;
                    }
                    while let Ok(cmd) = rx.try_recv() {
                        if self.handle(cmd) {
                            break 'commands;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.stop_sink();
    }

    fn emit(&self, event: EngineEvent) {
        let _ = self.events.send((self.generation, event));
    }

    /// Returns `true` when the thread should exit.
    fn handle(&mut self, cmd: EngineCmd) -> bool {
        match cmd {
            EngineCmd::Load {
                generation,
                source,
                duration,
            } => {
                self.stop_sink();
                self.generation = generation;

                let sink = Sink::connect_new(self.stream.mixer());
                sink.set_volume(self.volume);
                sink.append(source);
                sink.pause();
                self.sink = Some(sink);

                if let Some(d) = duration {
                    self.emit(EngineEvent::DurationChanged(d.as_millis() as u64));
                }
                self.emit(EngineEvent::PositionChanged(0));
            }
            EngineCmd::Play => {
                if let Some(sink) = &self.sink {
                    sink.play();
                }
            }
            EngineCmd::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                }
            }
            EngineCmd::Stop => self.stop_sink(),
            EngineCmd::Seek(to) => {
                if let Some(sink) = &self.sink {
                    match sink.try_seek(to) {
                        Ok(()) => self.emit(EngineEvent::PositionChanged(to.as_millis() as u64)),
                        Err(e) => warn!("seek to {to:?} failed: {e}"),
                    }
                }
            }
            EngineCmd::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
            }
            EngineCmd::Quit => return true,
        }

        false
    }

    fn tick(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };

        if sink.empty() {
            self.emit(EngineEvent::EndOfMedia);
            self.stop_sink();
        } else if !sink.is_paused() {
            self.emit(EngineEvent::PositionChanged(sink.get_pos().as_millis() as u64));
        }
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
