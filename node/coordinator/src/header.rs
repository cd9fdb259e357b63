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

use primitive_types::U256;

use bridge_types::{CompactTarget, CurrencyId, ProposedNotaryHeader};

use crate::registry::MergeMineRegistry;

/// Merges every registered child candidate's commitment sub-header into a
/// proposed notary block header and returns the easiest target any
/// registered child will accept.
///
/// A solved notary header simultaneously satisfies any child whose target
/// is at least the solved hash — that's the entire merge-mining
/// commitment.
pub fn combine(registry: &mut MergeMineRegistry, this_chain_id: CurrencyId, header: &mut ProposedNotaryHeader) -> CompactTarget {
    // Step 2: drop sub-headers for chains that are neither us nor
    // currently registered.
    let stale: Vec<CurrencyId> = header
        .sub_headers
        .keys()
        .copied()
        .filter(|id| *id != this_chain_id && !registry.contains(*id))
        .collect();
    for id in stale {
        header.sub_headers.remove(&id);
    }

    // Step 3: add-or-update every registered chain's native sub-header,
    // tracking the maximum (easiest) target seen.
    let mut max_target = U256::zero();
    for candidate in registry.iter() {
        header.sub_headers.insert(candidate.chain_id(), candidate.block_template.native_sub_header.clone());
        let target = candidate.block_template.bits.decode();
        if target > max_target {
            max_target = target;
        }
    }

    registry.clear_dirty();

    CompactTarget::encode(max_target)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use bridge_types::{BlockTemplate, CurrencyDefinition, ProofProtocol, RpcEndpoint};

    fn candidate(id_byte: u8, bits: u32) -> bridge_types::MergeMineCandidate {
        bridge_types::MergeMineCandidate {
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
            block_template: BlockTemplate { native_sub_header: vec![id_byte], bits: CompactTarget(bits), time: 0, raw_block: vec![] },
            rpc_endpoint: RpcEndpoint { host: "h".into(), port: 0, user: "".into(), pass: "".into() },
        }
    }

    #[test]
    fn drops_unregistered_sub_headers_and_adds_registered_ones() {
        let mut registry = MergeMineRegistry::new();
        registry.add(candidate(2, 0x1d00_ffff));

        let mut header = ProposedNotaryHeader {
            sub_headers: BTreeMap::from([(CurrencyId([3u8; 20]), vec![9])]),
            raw_fields: vec![],
        };

        let easiest = combine(&mut registry, CurrencyId([1u8; 20]), &mut header);

        assert!(!header.sub_headers.contains_key(&CurrencyId([3u8; 20])));
        assert_eq!(header.sub_headers.get(&CurrencyId([2u8; 20])), Some(&vec![2]));
        assert_eq!(easiest, CompactTarget(0x1d00_ffff));
        assert!(!registry.is_dirty());
    }

    #[test]
    fn returns_the_easiest_of_several_targets() {
        let mut registry = MergeMineRegistry::new();
        registry.add(candidate(1, 0x1c00_ffff)); // harder
        registry.add(candidate(2, 0x1e00_ffff)); // easier

        let mut header = ProposedNotaryHeader { sub_headers: BTreeMap::new(), raw_fields: vec![] };
        let easiest = combine(&mut registry, CurrencyId([9u8; 20]), &mut header);
        assert_eq!(easiest, CompactTarget(0x1e00_ffff));
    }
}
