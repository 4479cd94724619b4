//! Arena of NPC instances and who holds them
//!
//! Every spawned NPC has exactly one holder: the town pool, one player, or
//! retirement. Moving an NPC is a single `transfer`, so it can never sit in
//! two places at once. Names drawn once are never drawn again.

use crate::core::{EntityStore, Npc, NpcDefinition, NpcId, PlayerId};
use crate::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

/// Where an NPC currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcHolder {
    Town,
    Owned(PlayerId),
    Retired,
}

#[derive(Debug, Clone, Default)]
pub struct NpcRegistry {
    npcs: EntityStore<Npc>,
    holders: FxHashMap<NpcId, NpcHolder>,
    /// Town pool in arrival order
    town: Vec<NpcId>,
    /// Acquisition stamp per owned NPC, for stable roster order
    acquired: FxHashMap<NpcId, u32>,
    acquisitions: u32,
    used_names: FxHashSet<String>,
}

impl NpcRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate a definition directly into `holder`
    ///
    /// The definition's name is marked used.
    pub fn spawn(&mut self, def: &NpcDefinition, holder: NpcHolder) -> NpcId {
        let id = self.npcs.next_id();
        self.npcs.insert(id, def.instantiate(id));
        self.used_names.insert(def.name.clone());
        self.place(id, holder);
        id
    }

    /// Move an NPC to a new holder
    pub fn transfer(&mut self, id: NpcId, to: NpcHolder) -> Result<()> {
        // validates the id before any bookkeeping changes
        self.npcs.get(id)?;
        match self.holders.get(&id) {
            Some(NpcHolder::Town) => self.town.retain(|&n| n != id),
            Some(NpcHolder::Owned(_)) => {
                self.acquired.remove(&id);
            }
            _ => {}
        }
        self.place(id, to);
        Ok(())
    }

    fn place(&mut self, id: NpcId, holder: NpcHolder) {
        match holder {
            NpcHolder::Town => self.town.push(id),
            NpcHolder::Owned(_) => {
                self.acquired.insert(id, self.acquisitions);
                self.acquisitions += 1;
            }
            NpcHolder::Retired => {}
        }
        self.holders.insert(id, holder);
    }

    pub fn get(&self, id: NpcId) -> Result<&Npc> {
        self.npcs.get(id)
    }

    pub fn name(&self, id: NpcId) -> String {
        self.npcs
            .get(id)
            .map(|npc| npc.name.clone())
            .unwrap_or_else(|_| format!("NPC {}", id))
    }

    pub fn holder(&self, id: NpcId) -> Option<NpcHolder> {
        self.holders.get(&id).copied()
    }

    pub fn town(&self) -> &[NpcId] {
        &self.town
    }

    /// NPCs owned by `player`, oldest first
    pub fn roster(&self, player: PlayerId) -> Vec<NpcId> {
        let mut ids: Vec<NpcId> = self
            .holders
            .iter()
            .filter(|(_, holder)| **holder == NpcHolder::Owned(player))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_by_key(|id| self.acquired.get(id).copied().unwrap_or(u32::MAX));
        ids
    }

    /// Owned NPC instances, oldest first
    pub fn owned_by(&self, player: PlayerId) -> Vec<&Npc> {
        self.roster(player)
            .into_iter()
            .filter_map(|id| self.npcs.get(id).ok())
            .collect()
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    /// Definitions whose name has never been drawn
    pub fn unused<'d>(&self, defs: &'d [NpcDefinition]) -> Vec<&'d NpcDefinition> {
        defs.iter().filter(|def| !self.is_used(&def.name)).collect()
    }

    /// Spawn a random unused definition into `holder`
    pub fn spawn_random(
        &mut self,
        defs: &[NpcDefinition],
        holder: NpcHolder,
        rng: &mut impl Rng,
    ) -> Option<NpcId> {
        let def = self.unused(defs).choose(rng).map(|def| (*def).clone())?;
        Some(self.spawn(&def, holder))
    }

    /// Top the town pool up to `size` from the unused definitions
    ///
    /// Returns the newcomers; fewer than needed when the pool runs dry.
    pub fn refill_town(
        &mut self,
        defs: &[NpcDefinition],
        size: usize,
        rng: &mut impl Rng,
    ) -> Vec<NpcId> {
        let mut added = Vec::new();
        while self.town.len() < size {
            match self.spawn_random(defs, NpcHolder::Town, rng) {
                Some(id) => added.push(id),
                None => break,
            }
        }
        added
    }
}
