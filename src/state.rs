//! Shared simulation state.
//!
//! Owns every cloud plus the bits of interaction state that outlive a
//! single event: the active selection, the pause flag and the last
//! click used for double-click detection.

use crate::emitter::{Emitter, EmitterId};
use glam::Vec2;

/// Where and when the last pointer-down happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub position: Vec2,
    /// Seconds, on the same timeline as input event timestamps.
    pub time: f64,
}

/// All mutable simulation state.
#[derive(Debug, Default)]
pub struct SimulationState {
    emitters: Vec<Emitter>,
    active: Option<EmitterId>,
    next_id: u64,
    pub paused: bool,
    pub last_click: Option<Click>,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cloud built by `build` with a freshly assigned id.
    pub fn add_emitter(&mut self, build: impl FnOnce(EmitterId) -> Emitter) -> EmitterId {
        let id = EmitterId(self.next_id);
        self.next_id += 1;
        self.emitters.push(build(id));
        id
    }

    /// Add a cloud with default tuning at `position`.
    pub fn spawn_emitter(&mut self, position: Vec2, size: Vec2) -> EmitterId {
        self.add_emitter(|id| Emitter::new(id, position, size))
    }

    /// Remove a cloud and clear the selection if it pointed at it.
    pub fn remove_emitter(&mut self, id: EmitterId) -> Option<Emitter> {
        let index = self.emitters.iter().position(|e| e.id() == id)?;
        if self.active == Some(id) {
            self.active = None;
        }
        Some(self.emitters.remove(index))
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn emitters_mut(&mut self) -> &mut [Emitter] {
        &mut self.emitters
    }

    pub fn emitter(&self, id: EmitterId) -> Option<&Emitter> {
        self.emitters.iter().find(|e| e.id() == id)
    }

    pub fn emitter_mut(&mut self, id: EmitterId) -> Option<&mut Emitter> {
        self.emitters.iter_mut().find(|e| e.id() == id)
    }

    /// First cloud, in insertion order, whose bounding box holds `point`.
    pub fn emitter_at(&self, point: Vec2) -> Option<EmitterId> {
        self.emitters
            .iter()
            .find(|e| e.contains_point(point))
            .map(Emitter::id)
    }

    #[inline]
    pub fn active_id(&self) -> Option<EmitterId> {
        self.active
    }

    pub fn active(&self) -> Option<&Emitter> {
        self.active.and_then(|id| self.emitter(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Emitter> {
        let id = self.active?;
        self.emitter_mut(id)
    }

    /// Select a cloud. Ids that are not present clear the selection.
    pub fn set_active(&mut self, id: Option<EmitterId>) {
        self.active = id.filter(|id| self.emitter(*id).is_some());
    }

    /// Remove the selected cloud, if any.
    pub fn remove_active(&mut self) -> Option<Emitter> {
        let id = self.active?;
        self.remove_emitter(id)
    }

    /// Total raindrops across all clouds.
    pub fn particle_count(&self) -> usize {
        self.emitters.iter().map(|e| e.particles().len()).sum()
    }
}
