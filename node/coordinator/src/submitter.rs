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

use std::collections::HashSet;

use bridge_errors::RpcError;
use bridge_node_rpc::{submit_block, JsonRpcClient};
use bridge_types::{CurrencyId, MergeMineCandidate, ProposedNotaryHeader};
use parking_lot::Mutex;

use crate::state::MergeMiningState;

/// One dispatch outcome: the child chain's name and the `submitblock`
/// result (or the RPC error it failed with).
pub type SubmissionOutcome = (String, Result<String, bridge_errors::RpcError>);

/// Splices a solved notary header into a child candidate's template to
/// produce the finished block to submit.
///
/// The template's `raw_block` carries everything except the final header,
/// so reconstruction is just that header prepended to the body — the
/// concrete on-chain block layout is host-chain-specific, and this only
/// needs to produce bytes the child daemon's `submitblock` can parse, not
/// to understand them.
fn reconstruct_child_block(candidate: &MergeMineCandidate, header: &ProposedNotaryHeader) -> Vec<u8> {
    let mut block = header.raw_fields.clone();
    block.extend_from_slice(&candidate.block_template.raw_block);
    block
}

/// Non-PoW coherence check: the candidate's committed
/// sub-header must match what the solved header actually embeds for that
/// chain, i.e. nothing was swapped between `combine` and the solve.
fn passes_non_canonical_data_check(candidate: &MergeMineCandidate, header: &ProposedNotaryHeader) -> bool {
    header.sub_headers.get(&candidate.chain_id()) == Some(&candidate.block_template.native_sub_header)
}

/// Drains the qualified-header queue, dispatching each solved header to the
/// one registered child it satisfies.
///
/// Runs until the queue is empty. The lock is held only long enough to
/// claim one `(header, candidate)` pair and remove both the header and the
/// candidate; it is released before the RPC call — no RPC call is made
/// while the coordinator's lock is held.
pub fn submit_qualified_blocks(
    state: &Mutex<MergeMiningState>,
    rpc_client_for: impl Fn(&MergeMineCandidate) -> Result<JsonRpcClient, RpcError>,
) -> Vec<SubmissionOutcome> {
    let mut outcomes = Vec::new();

    loop {
        let claimed = {
            let mut guard = state.lock();
            let Some((hash, header)) = guard.queue.pop_best() else {
                break;
            };

            let committed: HashSet<CurrencyId> = header.committed_chain_ids().copied().collect();
            let target = hash;
            let matched_chain_id = guard
                .registry
                .candidates_with_target_at_least(target)
                .find(|candidate| {
                    committed.contains(&candidate.chain_id()) && passes_non_canonical_data_check(candidate, &header)
                })
                .map(|candidate| candidate.chain_id());

            match matched_chain_id {
                Some(chain_id) => {
                    let candidate = guard.registry.remove(chain_id).expect("just matched inside the registry");
                    Some((candidate, header))
                }
                None => {
                    // Step 7: no candidate matches this header — discard it
                    // and keep draining.
                    tracing::debug!("qualified header matches no registered child candidate, discarding");
                    None
                }
            }
        };

        let Some((candidate, header)) = claimed else {
            continue;
        };

        let name = candidate.chain_definition.name.clone();
        let block_bytes = reconstruct_child_block(&candidate, &header);
        let result = match rpc_client_for(&candidate) {
            Ok(client) => submit_block(&client, &hex::encode(block_bytes)),
            Err(err) => Err(err),
        };
        outcomes.push((name, result));
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use bridge_types::{BlockTemplate, CompactTarget, CurrencyDefinition, ProofProtocol, RpcEndpoint};

    fn candidate(id_byte: u8, bits: u32, sub_header: Vec<u8>) -> MergeMineCandidate {
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
            block_template: BlockTemplate { native_sub_header: sub_header, bits: CompactTarget(bits), time: 0, raw_block: vec![0xAB] },
            rpc_endpoint: RpcEndpoint { host: "127.0.0.1".into(), port: 1, user: "u".into(), pass: "p".into() },
        }
    }

    #[test]
    fn non_canonical_data_check_requires_matching_sub_header_bytes() {
        let candidate = candidate(1, 0x1d00_ffff, vec![1, 2, 3]);
        let mut header = ProposedNotaryHeader { sub_headers: BTreeMap::new(), raw_fields: vec![] };
        header.sub_headers.insert(candidate.chain_id(), vec![1, 2, 3]);
        assert!(passes_non_canonical_data_check(&candidate, &header));

        header.sub_headers.insert(candidate.chain_id(), vec![9, 9, 9]);
        assert!(!passes_non_canonical_data_check(&candidate, &header));
    }

    #[test]
    fn reconstruct_prepends_header_to_template_body() {
        let candidate = candidate(1, 0x1d00_ffff, vec![1]);
        let header = ProposedNotaryHeader { sub_headers: BTreeMap::new(), raw_fields: vec![0xFF, 0xEE] };
        let block = reconstruct_child_block(&candidate, &header);
        assert_eq!(block, vec![0xFF, 0xEE, 0xAB]);
    }

    /// Two registered candidates at different targets, one combined header
    /// that only the easier candidate's sub-header satisfies: exactly one
    /// submission is dispatched, and the harder candidate survives in the
    /// registry untouched.
    #[test]
    fn submit_qualified_blocks_dispatches_to_the_one_matching_candidate() {
        let easy = candidate(1, 0x1d00_ffff, vec![1, 2, 3]);
        let hard = candidate(2, 0x1b00_ffff, vec![4, 5, 6]);
        let easy_id = easy.chain_id();
        let hard_id = hard.chain_id();

        let state = Mutex::new(MergeMiningState::default());
        {
            let mut guard = state.lock();
            guard.registry.add(easy.clone());
            guard.registry.add(hard);

            let mut header = ProposedNotaryHeader { sub_headers: BTreeMap::new(), raw_fields: vec![0xAA] };
            header.sub_headers.insert(easy_id, easy.block_template.native_sub_header.clone());
            let hash = CompactTarget(0x1d00_ffff).decode();
            guard.queue.push(hash, header);
        }

        let outcomes = submit_qualified_blocks(&state, |candidate| {
            Ok(JsonRpcClient::new(candidate.rpc_endpoint.clone(), std::time::Duration::from_millis(50))
                .expect("a plain reqwest client builder never fails without custom TLS config"))
        });

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].0, "chain-1");

        let guard = state.lock();
        assert!(!guard.registry.contains(easy_id));
        assert!(guard.registry.contains(hard_id));
    }
}
