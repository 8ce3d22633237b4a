//! Audio output seam
//!
//! The synthesizer builds graphs; a backend owns the actual output context
//! and plays whatever it is handed.

use std::cell::RefCell;
use std::rc::Rc;

use super::tone::ToneGraph;
use crate::engine::Millis;

/// Destination for synthesized tones
pub trait AudioBackend {
    /// Start `graph` at virtual time `at`
    fn play(&mut self, at: Millis, graph: ToneGraph);
}

/// A graph handed to a backend, with the time it was started
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedTone {
    pub at: Millis,
    pub graph: ToneGraph,
}

/// Backend that keeps every graph it receives
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the synthesizer.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    played: Rc<RefCell<Vec<PlayedTone>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of graphs played so far
    pub fn len(&self) -> usize {
        self.played.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.played.borrow().is_empty()
    }

    /// Snapshot of everything played so far
    pub fn played(&self) -> Vec<PlayedTone> {
        self.played.borrow().clone()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.played.borrow_mut().clear();
    }
}

impl AudioBackend for RecordingBackend {
    fn play(&mut self, at: Millis, graph: ToneGraph) {
        self.played.borrow_mut().push(PlayedTone { at, graph });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::tone::ToneRequest;

    #[test]
    fn test_clones_share_log() {
        let observer = RecordingBackend::new();
        let mut backend = observer.clone();
        let request = ToneRequest::new(400.0, 300.0, 0.01, 0.1).unwrap();

        backend.play(250, ToneGraph::from_request(&request));

        assert_eq!(observer.len(), 1);
        assert_eq!(observer.played()[0].at, 250);
        observer.clear();
        assert!(backend.is_empty());
    }
}
