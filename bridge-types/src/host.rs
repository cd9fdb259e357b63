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

use std::collections::HashMap;

use anyhow::Result;

use crate::currency::CurrencyDefinition;
use crate::export::CrossChainExport;
use crate::id::CurrencyId;
use crate::transfer::{Outpoint, ReserveTransfer, UnspentTransfer};

/// The tip of a per-destination export thread: the last unspent export
/// output on-chain, which the next export's input 0 spends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportThreadTip {
    pub outpoint: Outpoint,
    pub native_value: u64,
    pub height: u64,
}

/// One currency's reserve-deposit output, backing tokens minted on the
/// destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveDepositOutput {
    pub currency_id: CurrencyId,
    pub amount: u64,
    pub native: bool,
}

/// Everything needed to build one export transaction,
/// independent of how the host chain actually assembles and signs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDraft {
    pub thread_input: Outpoint,
    pub thread_input_native_value: u64,
    pub included_transfers: Vec<ReserveTransfer>,
    pub fee_outputs: Vec<ReserveTransfer>,
    pub summary: CrossChainExport,
    pub reserve_deposits: Vec<ReserveDepositOutput>,
    pub commitment_blob: Vec<u8>,
}

/// A transaction the host chain's builder produced from an [`ExportDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltTransaction {
    pub txid: [u8; 32],
    pub serialized: Vec<u8>,
    pub thread_output: Outpoint,
    pub thread_output_native_value: u64,
    pub total_native_export_fee: u64,
}

/// The host-chain collaborator interface consumed by the aggregator and
/// submitter. The underlying UTXO chain, mempool, script evaluation,
/// and currency-pricing math are explicitly out of scope — this trait
/// is the seam, generic over the collaborator rather than tied to a
/// concrete storage engine.
pub trait HostChain: Send + Sync {
    fn this_chain_id(&self) -> CurrencyId;

    fn current_height(&self) -> u64;

    /// All currently-unspent reserve-transfer outputs pending aggregation.
    fn unspent_chain_transfers(&self) -> Result<Vec<UnspentTransfer>>;

    /// The last unspent export on the given destination system's thread,
    /// or `None` if no export has ever been sent to it.
    fn unspent_chain_export(&self, destination_system_id: CurrencyId) -> Result<Option<ExportThreadTip>>;

    fn currency_definition(&self, currency_id: CurrencyId) -> Result<Option<CurrencyDefinition>>;

    /// Reserve-in totals accumulated as of the currency's `start_block`,
    /// used by the launch-failure check below.
    fn reserve_in_at_launch(&self, currency_id: CurrencyId) -> Result<HashMap<CurrencyId, u64>>;

    /// Builds (but does not submit) a transaction from a draft.
    fn build_export_transaction(&self, draft: &ExportDraft) -> Result<BuiltTransaction>;

    /// Pre-import determinism check: simulates
    /// `AddReserveTransferImportOutputs` against the destination's rules
    /// without submitting anything.
    fn simulate_import(&self, draft: &ExportDraft) -> Result<bool>;

    fn submit_to_mempool(&self, tx: &BuiltTransaction) -> Result<()>;

    fn prioritize_and_relay(&self, tx: &BuiltTransaction, fee_multiplier: u64) -> Result<()>;
}
