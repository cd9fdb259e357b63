// Copyright (C) 2019-2026 The Verus Bridge Team.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at:
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::{BTreeMap, HashMap};

use primitive_types::U256;

use bridge_types::{CurrencyId, MergeMineCandidate};

/// The merge-mine registry: the set of child-chain block candidates
/// currently being mined, indexed both by chain ID and by the candidate's
/// current difficulty target.
///
/// `targets` stores the primary key (`chain_id`) as its handle rather than
/// a raw pointer into `chains` — the idiomatic, rehash-safe replacement for
/// the source's back-reference-into-a-map pointer.
/// Every entry in `targets` resolves inside `chains`, and every entry in
/// `chains` is indexed in `targets` by the decoded `nBits` target of its
/// current block template — that pairing is the registry's one invariant,
/// and `add`/`remove` are the only ways to mutate either side, always
/// together.
#[derive(Debug, Default)]
pub struct MergeMineRegistry {
    chains: HashMap<CurrencyId, MergeMineCandidate>,
    targets: BTreeMap<U256, Vec<CurrencyId>>,
    dirty: bool,
}

impl MergeMineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a candidate. Never fails.
    pub fn add(&mut self, candidate: MergeMineCandidate) {
        let chain_id = candidate.chain_id();
        self.remove(chain_id);

        let target = candidate.block_template.bits.decode();
        self.targets.entry(target).or_default().push(chain_id);
        self.chains.insert(chain_id, candidate);
        self.dirty = true;
    }

    /// Removes a chain's candidate from both containers. A no-op,
    /// returning `None`, if the chain is not registered.
    pub fn remove(&mut self, chain_id: CurrencyId) -> Option<MergeMineCandidate> {
        let candidate = self.chains.remove(&chain_id)?;
        let target = candidate.block_template.bits.decode();
        if let Some(ids) = self.targets.get_mut(&target) {
            // There may be multiple candidates sharing the same compact
            // target; match by id, not target alone.
            ids.retain(|id| *id != chain_id);
            if ids.is_empty() {
                self.targets.remove(&target);
            }
        }
        self.dirty = true;
        Some(candidate)
    }

    /// Removes every candidate whose template's `nTime` predates `cutoff`.
    pub fn prune(&mut self, cutoff_time: u64) {
        let stale: Vec<CurrencyId> =
            self.chains.iter().filter(|(_, c)| c.block_template.time < cutoff_time).map(|(id, _)| *id).collect();
        for chain_id in stale {
            self.remove(chain_id);
        }
    }

    pub fn get(&self, chain_id: CurrencyId) -> Option<&MergeMineCandidate> {
        self.chains.get(&chain_id)
    }

    pub fn contains(&self, chain_id: CurrencyId) -> bool {
        self.chains.contains_key(&chain_id)
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MergeMineCandidate> {
        self.chains.values()
    }

    /// Candidates whose current target is at least `min_target` — the
    /// range the block submitter searches for a match.
    pub fn candidates_with_target_at_least(&self, min_target: U256) -> impl Iterator<Item = &MergeMineCandidate> {
        self.targets.range(min_target..).flat_map(move |(_, ids)| ids.iter().filter_map(|id| self.chains.get(id)))
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_types::{BlockTemplate, CompactTarget, CurrencyDefinition, ProofProtocol, RpcEndpoint};

    fn candidate(id_byte: u8, bits: u32, time: u64) -> MergeMineCandidate {
        MergeMineCandidate {
            chain_definition: CurrencyDefinition {
                id: CurrencyId([id_byte; 20]),
                name: format!("chain-{id_byte}"),
                parent_id: CurrencyId::ZERO,
                system_id: CurrencyId([id_byte; 20]),
                reserve_currency_ids: vec![],
                start_block: 0,
                min_preconvert: Default::default(),
                proof_protocol: ProofProtocol::ChainOwned,
            },
            block_template: BlockTemplate {
                native_sub_header: vec![id_byte],
                bits: CompactTarget(bits),
                time,
                raw_block: vec![],
            },
            rpc_endpoint: RpcEndpoint { host: "127.0.0.1".into(), port: 0, user: "".into(), pass: "".into() },
        }
    }

    #[test]
    fn add_then_remove_restores_prior_state() {
        let mut registry = MergeMineRegistry::new();
        assert!(registry.is_empty());

        registry.add(candidate(1, 0x1d00_ffff, 100));
        assert!(!registry.is_empty());
        assert!(registry.contains(CurrencyId([1u8; 20])));

        registry.remove(CurrencyId([1u8; 20]));
        assert!(registry.is_empty());
        assert_eq!(registry.targets.len(), 0);
    }

    #[test]
    fn multiple_candidates_at_the_same_target_are_independently_removable() {
        let mut registry = MergeMineRegistry::new();
        registry.add(candidate(1, 0x1d00_ffff, 100));
        registry.add(candidate(2, 0x1d00_ffff, 100));

        registry.remove(CurrencyId([1u8; 20]));
        assert!(!registry.contains(CurrencyId([1u8; 20])));
        assert!(registry.contains(CurrencyId([2u8; 20])));

        let target = CompactTarget(0x1d00_ffff).decode();
        let remaining: Vec<_> = registry.candidates_with_target_at_least(target).collect();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].chain_id(), CurrencyId([2u8; 20]));
    }

    #[test]
    fn prune_removes_only_stale_candidates() {
        let mut registry = MergeMineRegistry::new();
        registry.add(candidate(1, 0x1d00_ffff, 50));
        registry.add(candidate(2, 0x1d00_ffff, 500));

        registry.prune(300);
        assert!(!registry.contains(CurrencyId([1u8; 20])));
        assert!(registry.contains(CurrencyId([2u8; 20])));
    }

    #[test]
    fn re_adding_the_same_chain_replaces_rather_than_duplicates() {
        let mut registry = MergeMineRegistry::new();
        registry.add(candidate(1, 0x1d00_ffff, 100));
        registry.add(candidate(1, 0x1c00_ffff, 200));

        assert_eq!(registry.iter().count(), 1);
        assert_eq!(registry.get(CurrencyId([1u8; 20])).unwrap().block_template.time, 200);
    }
}
