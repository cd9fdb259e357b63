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

use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use primitive_types::U256;

use bridge_errors::RpcError;
use bridge_node_rpc::{JsonRpcClient, NotaryLiveness};
use bridge_types::{CurrencyDefinition, CurrencyId, MergeMineCandidate, ProposedNotaryHeader};

use crate::state::{EarnedNotarization, MergeMiningState, MiningOutput};
use crate::submitter::{self, SubmissionOutcome};

/// The merge-mining coordinator singleton: the `cs_mergemining`-guarded
/// state plus the condition variable the submission thread waits on for new
/// work, mirroring a `Mutex` + `Condvar` pair rather than the source's raw
/// semaphore.
#[derive(Default)]
pub struct Coordinator {
    state: Mutex<MergeMiningState>,
    work_available: Condvar,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a child candidate, then wakes the
    /// submission thread in case a queued header now has a match.
    pub fn add_merged_block(&self, candidate: MergeMineCandidate) {
        self.state.lock().registry.add(candidate);
        self.work_available.notify_all();
    }

    pub fn remove_merged_block(&self, chain_id: CurrencyId) -> bool {
        self.state.lock().registry.remove(chain_id).is_some()
    }

    pub fn prune_old_chains(&self, max_age: Duration) {
        let cutoff = now_unix().saturating_sub(max_age.as_secs());
        self.state.lock().registry.prune(cutoff);
    }

    pub fn lookup(&self, chain_id: CurrencyId) -> Option<MergeMineCandidate> {
        self.state.lock().registry.get(chain_id).cloned()
    }

    pub fn registry_is_empty(&self) -> bool {
        self.state.lock().registry.is_empty()
    }

    /// Folds every registered candidate's sub-header into `header`,
    /// returning the easiest target any of them will accept.
    pub fn combine_blocks(&self, this_chain_id: CurrencyId, header: &mut ProposedNotaryHeader) -> bridge_types::CompactTarget {
        crate::header::combine(&mut self.state.lock().registry, this_chain_id, header)
    }

    /// Enqueues a solved header, then wakes the submission thread.
    pub fn queue_new_block_header(&self, hash: U256, header: ProposedNotaryHeader) {
        self.state.lock().queue.push(hash, header);
        self.work_available.notify_all();
    }

    pub fn queue_is_empty(&self) -> bool {
        self.state.lock().queue.is_empty()
    }

    pub fn clear_queue(&self) {
        self.state.lock().queue.clear();
    }

    /// Drains the queue, dispatching each header to its one
    /// matching candidate. See [`submitter::submit_qualified_blocks`] for
    /// the lock-release-before-RPC discipline.
    pub fn submit_qualified_blocks(
        &self,
        rpc_client_for: impl Fn(&MergeMineCandidate) -> Result<JsonRpcClient, RpcError>,
    ) -> Vec<SubmissionOutcome> {
        submitter::submit_qualified_blocks(&self.state, rpc_client_for)
    }

    pub fn set_earned_notarization(&self, earned: EarnedNotarization) {
        self.state.lock().earned_notarization = Some(earned);
    }

    pub fn take_earned_notarization(&self) -> Option<EarnedNotarization> {
        self.state.lock().earned_notarization.take()
    }

    pub fn set_latest_mining_outputs(&self, destination_chain: Option<CurrencyId>, outputs: Vec<MiningOutput>) {
        let mut guard = self.state.lock();
        guard.mining_destination_chain = destination_chain;
        guard.mining_outputs = outputs;
    }

    pub fn notary_liveness(&self) -> Option<NotaryLiveness> {
        self.state.lock().notary_liveness.clone()
    }

    pub fn set_notary_liveness(&self, liveness: NotaryLiveness) {
        self.state.lock().notary_liveness = Some(liveness);
    }

    pub fn refresh_own_currency_definition(&self, definition: CurrencyDefinition) {
        self.state.lock().own_currency_definition = Some(definition);
    }

    /// Blocks the calling (submission) thread until either new work is
    /// signalled or `timeout` elapses — a bounded wait so the thread can
    /// still notice a cancellation request between signals.
    pub fn wait_for_work(&self, timeout: Duration) {
        let mut guard = self.state.lock();
        self.work_available.wait_for(&mut guard, timeout);
    }
}

fn now_unix() -> u64 {
    std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
