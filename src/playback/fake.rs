//! Scriptable in-memory [`MediaEngine`] for session and controller tests.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::engine::{EngineError, EngineEvent, MediaEngine};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EngineCall {
    Load(PathBuf),
    Play,
    Pause,
    Stop,
    Seek(u64),
    SetVolume(f32),
}

#[derive(Default)]
struct FakeState {
    calls: Vec<EngineCall>,
    pending: VecDeque<EngineEvent>,
    failing: HashSet<PathBuf>,
    duration_on_load: Option<u64>,
}

pub(crate) struct FakeEngine {
    state: Rc<RefCell<FakeState>>,
}

/// Test-side view of a [`FakeEngine`] that has been moved into a session.
#[derive(Clone)]
pub(crate) struct FakeHandle {
    state: Rc<RefCell<FakeState>>,
}

pub(crate) fn fake_engine() -> (FakeEngine, FakeHandle) {
    let state = Rc::new(RefCell::new(FakeState::default()));
    (
        FakeEngine {
            state: state.clone(),
        },
        FakeHandle { state },
    )
}

impl FakeHandle {
    pub(crate) fn push_event(&self, event: EngineEvent) {
        self.state.borrow_mut().pending.push_back(event);
    }

    /// Reject loads of `path` with a decode error.
    pub(crate) fn fail_on(&self, path: impl Into<PathBuf>) {
        self.state.borrow_mut().failing.insert(path.into());
    }

    /// Queue a `DurationChanged(ms)` after every successful load.
    pub(crate) fn report_duration_on_load(&self, ms: u64) {
        self.state.borrow_mut().duration_on_load = Some(ms);
    }

    pub(crate) fn calls(&self) -> Vec<EngineCall> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub(crate) fn seeks(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                EngineCall::Seek(ms) => Some(ms),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn loads(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                EngineCall::Load(p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

impl MediaEngine for FakeEngine {
    fn load_source(&mut self, path: &Path) -> Result<(), EngineError> {
        let mut s = self.state.borrow_mut();
        s.calls.push(EngineCall::Load(path.to_path_buf()));
        // Any load, good or bad, invalidates what the old source still had queued.
        s.pending.clear();
        if s.failing.contains(path) {
            return Err(EngineError::Decode {
                path: path.to_path_buf(),
                reason: "scripted failure".to_string(),
            });
        }
        if let Some(ms) = s.duration_on_load {
            s.pending.push_back(EngineEvent::DurationChanged(ms));
        }
        Ok(())
    }

    fn play(&mut self) {
        self.state.borrow_mut().calls.push(EngineCall::Play);
    }

    fn pause(&mut self) {
        self.state.borrow_mut().calls.push(EngineCall::Pause);
    }

    fn stop(&mut self) {
        self.state.borrow_mut().calls.push(EngineCall::Stop);
    }

    fn seek(&mut self, position_ms: u64) {
        self.state.borrow_mut().calls.push(EngineCall::Seek(position_ms));
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().calls.push(EngineCall::SetVolume(volume));
    }

    fn try_recv_event(&mut self) -> Option<EngineEvent> {
        self.state.borrow_mut().pending.pop_front()
    }
}
