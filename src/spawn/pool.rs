//! Pool - Fixed-capacity prop recycling
//!
//! Props are created once, then toggled active/inactive and moved
//! instead of being destroyed. Reuse order is FIFO over dispatch order:
//! the least-recently-dispatched prop is handed out next, whether or
//! not it is still active.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::spawn::Vec3;

/// Stable handle into a [`SpawnPool`].
pub type PropId = usize;

/// One pooled world-object instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prop {
    /// Index into the configured prefab list this prop was built from.
    pub prefab: usize,
    pub active: bool,
    pub position: Vec3,
    /// Forward speed for NPC movers; zero for static props.
    pub speed: f32,
}

impl Prop {
    fn new(prefab: usize) -> Self {
        Self { prefab, active: false, position: Vec3::default(), speed: 0.0 }
    }
}

/// Recycling pool over a fixed prefab set.
#[derive(Debug)]
pub struct SpawnPool {
    props: Vec<Prop>,
    recycle_order: VecDeque<PropId>,
    prefab_count: usize,
    configured_size: usize,
    fallback_count: usize,
}

impl SpawnPool {
    /// Creates `size` inactive props, each from a prefab chosen
    /// uniformly at random, enqueued in circular dispatch order.
    ///
    /// Callers validate `prefab_count > 0` and `size > 0` before
    /// construction; see `ConfigError`.
    pub fn new(prefab_count: usize, size: usize) -> Self {
        let mut rng = rand::thread_rng();
        let mut props = Vec::with_capacity(size);
        let mut recycle_order = VecDeque::with_capacity(size);
        for id in 0..size {
            props.push(Prop::new(rng.gen_range(0..prefab_count)));
            recycle_order.push_back(id);
        }
        Self {
            props,
            recycle_order,
            prefab_count,
            configured_size: size,
            fallback_count: 0,
        }
    }

    /// Hands out the least-recently-dispatched prop and re-enqueues it
    /// at the back. If the queue is somehow empty, instantiates a new
    /// prop on demand; the pool self-heals rather than erroring.
    pub fn acquire(&mut self) -> PropId {
        match self.recycle_order.pop_front() {
            Some(id) => {
                self.recycle_order.push_back(id);
                id
            }
            None => {
                let id = self.props.len();
                let prefab = rand::thread_rng().gen_range(0..self.prefab_count);
                self.props.push(Prop::new(prefab));
                self.recycle_order.push_back(id);
                self.fallback_count += 1;
                id
            }
        }
    }

    /// Places and activates a prop in one step.
    pub fn place(&mut self, id: PropId, position: Vec3) {
        let prop = &mut self.props[id];
        prop.position = position;
        prop.active = true;
    }

    /// Deactivates every active prop behind `z_limit`.
    pub fn deactivate_behind(&mut self, z_limit: f32) {
        for prop in &mut self.props {
            if prop.active && prop.position.z < z_limit {
                prop.active = false;
            }
        }
    }

    pub fn get(&self, id: PropId) -> &Prop {
        &self.props[id]
    }

    pub fn get_mut(&mut self, id: PropId) -> &mut Prop {
        &mut self.props[id]
    }

    /// All props, active or not.
    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Prop> {
        self.props.iter_mut().filter(|p| p.active)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.props.iter().filter(|p| p.active).count()
    }

    /// How many props were created on demand after exhaustion.
    pub fn fallback_count(&self) -> usize {
        self.fallback_count
    }

    pub fn configured_size(&self) -> usize {
        self.configured_size
    }
}
