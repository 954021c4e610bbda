// Per-tick collision pass: broad phase, narrow phase and resolution.

use std::collections::HashSet;

use super::collider::Collider;
use super::manifold::{ColliderRef, ContactRecord};
use super::resolution::{self, body_pair_mut, Resolution};
use super::spatial_grid::SpatialGrid;
use crate::common::{BodyKind, MaterialTable, PhysicsConfig};
use crate::error::PhysicsResult;
use crate::math::vec2::Vec2;
use crate::objects::Body;

/// Owns the broad-phase grid and the resolution settings.
///
/// Every call to [`CollisionManager::detect_and_resolve`] rebuilds the grid
/// from scratch, walks the neighborhood of each moving collider, tests each
/// unordered pair once and resolves the ones that overlap. Resolution
/// happens in place, so a pair resolved early in the pass can change what
/// later pairs see.
#[derive(Debug)]
pub struct CollisionManager {
    grid: SpatialGrid,
    config: PhysicsConfig,
    materials: MaterialTable,
    field_center: Vec2,

    // Per-tick scratch, kept to avoid reallocating
    entries: Vec<ColliderRef>,
    visited: HashSet<(usize, usize)>,
    neighbors: Vec<usize>,
    contacts: Vec<ContactRecord>,
}

impl CollisionManager {
    /// # Arguments
    /// * `config` - Grid cell size, contact coefficients and solver limits.
    /// * `field_center` - Point that structure MTVs are oriented toward.
    pub fn new(config: PhysicsConfig, field_center: Vec2) -> PhysicsResult<Self> {
        config.validate()?;
        let grid = SpatialGrid::new(config.cell_size)?;
        Ok(Self {
            grid,
            materials: config.materials.table(),
            config,
            field_center,
            entries: Vec::new(),
            visited: HashSet::new(),
            neighbors: Vec::new(),
            contacts: Vec::new(),
        })
    }

    /// Replaces the configuration. On error the previous one is kept.
    pub fn reconfigure(&mut self, config: &PhysicsConfig) -> PhysicsResult<()> {
        config.validate()?;
        if config.cell_size != self.grid.cell_size() {
            self.grid = SpatialGrid::new(config.cell_size)?;
        }
        self.config = *config;
        self.materials = config.materials.table();
        log::debug!("collision manager reconfigured: {:?}", config);
        Ok(())
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn field_center(&self) -> Vec2 {
        self.field_center
    }

    pub fn set_field_center(&mut self, center: Vec2) {
        self.field_center = center;
    }

    /// Broad-phase grid as built by the last pass.
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Collider behind a grid entry of the last pass.
    pub fn entry(&self, index: usize) -> Option<ColliderRef> {
        self.entries.get(index).copied()
    }

    /// Collisions found during the last pass, in resolution order.
    pub fn last_contacts(&self) -> &[ContactRecord] {
        &self.contacts
    }

    /// Runs one full collision pass and returns the number of contacts.
    ///
    /// `bodies[i]` must carry the handle `BodyHandle(i)`; bodies with no
    /// handle or a mismatched one take no part in the pass. Zone colliders
    /// in `structures` are ignored.
    pub fn detect_and_resolve(&mut self, bodies: &mut [Body], structures: &[Collider]) -> usize {
        self.rebuild_grid(bodies, structures);
        self.visited.clear();
        self.contacts.clear();

        let mut neighbors = std::mem::take(&mut self.neighbors);
        for entry_index in 0..self.entries.len() {
            let ColliderRef::Body(handle) = self.entries[entry_index] else {
                continue;
            };
            self.grid.query_neighbors_into(&bodies[handle.index()].collider().shape, &mut neighbors);

            for &other_index in &neighbors {
                if other_index == entry_index {
                    continue;
                }
                let key = (entry_index.min(other_index), entry_index.max(other_index));
                if !self.visited.insert(key) {
                    continue;
                }
                let other = self.entries[other_index];
                if let Some(contact) = self.check_pair(bodies, structures, handle.index(), other) {
                    self.contacts.push(contact);
                }
            }
        }
        self.neighbors = neighbors;

        log::debug!(
            "collision pass: {} colliders, {} pairs tested, {} contacts",
            self.entries.len(),
            self.visited.len(),
            self.contacts.len()
        );
        self.contacts.len()
    }

    fn rebuild_grid(&mut self, bodies: &[Body], structures: &[Collider]) {
        self.grid.clear();
        self.entries.clear();

        for (index, body) in bodies.iter().enumerate() {
            match body.handle() {
                Some(handle) if handle.index() == index => {
                    self.grid.insert(self.entries.len(), &body.collider().shape);
                    self.entries.push(ColliderRef::Body(handle));
                }
                other => log::debug!("skipping body {} with handle {:?}", index, other),
            }
        }
        for (index, structure) in structures.iter().enumerate() {
            if structure.is_zone() {
                continue;
            }
            self.grid.insert(self.entries.len(), &structure.shape);
            self.entries.push(ColliderRef::Structure(index));
        }
    }

    /// Narrow phase and resolution for one candidate pair. The test result
    /// is computed before any body is borrowed mutably.
    fn check_pair(
        &self,
        bodies: &mut [Body],
        structures: &[Collider],
        body_index: usize,
        other: ColliderRef,
    ) -> Option<ContactRecord> {
        let first = ColliderRef::Body(crate::objects::BodyHandle(body_index));
        match other {
            ColliderRef::Body(other_handle) => {
                let other_index = other_handle.index();
                let result = bodies[body_index].collider().test(bodies[other_index].collider());
                if !result.is_resolvable(self.config.min_mtv) {
                    return None;
                }
                let material = self.materials.lookup(bodies[body_index].kind(), bodies[other_index].kind());
                let (a, b) = body_pair_mut(bodies, body_index, other_index)?;
                let outcome = resolution::resolve_bodies(a, b, result.mtv, material, &self.config);
                log_outcome(body_index, other, outcome);
                Some(ContactRecord { first, second: other, mtv: result.mtv })
            }
            ColliderRef::Structure(structure_index) => {
                let structure = &structures[structure_index];
                let body = &mut bodies[body_index];
                let result = body.collider().test(structure);
                if !result.is_resolvable(self.config.min_mtv) {
                    return None;
                }
                let material = self.materials.lookup(body.kind(), BodyKind::Structure);
                let outcome =
                    resolution::resolve_structure(body, structure, result.mtv, self.field_center, material, &self.config);
                log_outcome(body_index, other, outcome);
                Some(ContactRecord { first, second: other, mtv: result.mtv })
            }
        }
    }
}

fn log_outcome(body_index: usize, other: ColliderRef, outcome: Resolution) {
    log::trace!("body {} vs {:?}: {:?}", body_index, other, outcome);
}
