use std::sync::{Arc, RwLock};

use branchbound_core::PlanningSolution;
use branchbound_scoring::ScoreDirector;

use super::EntitySelector;

/// Shared cell recording which entity the search layer is currently
/// expanding.
///
/// The decider writes the entity at the start of an expansion step and
/// clears it at the end; every replaying selector wired to the same
/// recorder reads that one entity for the lifetime of the step. Cheap to
/// clone, all clones share the cell.
#[derive(Debug, Clone)]
pub struct EntityMimicRecorder {
    recorded: Arc<RwLock<Option<usize>>>,
    entity_name: &'static str,
}

impl EntityMimicRecorder {
    pub fn new(entity_name: &'static str) -> Self {
        Self {
            recorded: Arc::new(RwLock::new(None)),
            entity_name,
        }
    }

    pub fn entity_name(&self) -> &'static str {
        self.entity_name
    }

    pub fn record(&self, entity_index: usize) {
        // A poisoned lock means a selector panicked mid-read; the value is
        // a plain usize, so the recorded state is still coherent.
        *self.recorded.write().unwrap_or_else(|e| e.into_inner()) = Some(entity_index);
    }

    pub fn clear(&self) {
        *self.recorded.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn replaying(&self) -> Option<usize> {
        *self.recorded.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// Entity selector that replays the entity the recorder currently holds.
///
/// Yields exactly one entity per expansion step, or nothing when no step
/// is live.
#[derive(Debug, Clone)]
pub struct MimicReplayingEntitySelector {
    recorder: EntityMimicRecorder,
    descriptor_index: usize,
}

impl MimicReplayingEntitySelector {
    pub fn new(recorder: EntityMimicRecorder, descriptor_index: usize) -> Self {
        Self {
            recorder,
            descriptor_index,
        }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> EntitySelector<S, D> for MimicReplayingEntitySelector {
    fn descriptor_index(&self) -> usize {
        self.descriptor_index
    }

    fn iter<'a>(&'a self, _score_director: &'a D) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(self.recorder.replaying().into_iter())
    }

    fn size(&self, _score_director: &D) -> usize {
        usize::from(self.recorder.replaying().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_clear_round_trip() {
        let recorder = EntityMimicRecorder::new("Shift");
        assert_eq!(recorder.replaying(), None);
        recorder.record(7);
        assert_eq!(recorder.replaying(), Some(7));
        recorder.record(2);
        assert_eq!(recorder.replaying(), Some(2));
        recorder.clear();
        assert_eq!(recorder.replaying(), None);
    }

    #[test]
    fn clones_share_the_recorded_entity() {
        let recorder = EntityMimicRecorder::new("Shift");
        let observer = recorder.clone();
        recorder.record(4);
        assert_eq!(observer.replaying(), Some(4));
    }
}
