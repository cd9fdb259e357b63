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

use bridge_errors::AggregationError;
use bridge_node_env::{MAX_EXPORT_INPUTS, MIN_BLOCKS, MIN_INPUTS};
use bridge_types::{
    BuiltTransaction, CrossChainExport, CurrencyId, ExportDraft, ExportThreadTip, HostChain, Outpoint,
    ReserveDepositOutput, ReserveTransfer, TransferFlags,
};
use chain_codec::ChainObject;

use crate::currency::CurrencyCache;
use crate::fees::split_export_import_fee;
use crate::slicing::rebalance_slices;

/// Loads pending reserve transfers, resolves their destination currencies,
/// buckets them per destination system, and builds + submits one or more
/// export transactions for every bucket whose flush trigger has fired.
///
/// Returns the transactions that were actually submitted to the mempool.
/// A bucket whose pre-import simulation fails stops chaining further slices
/// for that destination this pass (its remaining transfers stay unspent and
/// are picked up again on the next call) without aborting the other
/// buckets.
pub fn aggregate_chain_transfers(host: &dyn HostChain) -> Result<Vec<BuiltTransaction>> {
    let this_chain_id = host.this_chain_id();
    let current_height = host.current_height();
    let mut cache = CurrencyCache::new();

    // Keyed by (destination system, secondary key). Cross-chain transfers
    // share one bucket per destination system (secondary key is the
    // sentinel); same-chain-destination transfers settle locally but still
    // get exported, split per reserve currency so each thread only ever
    // carries one currency's deposits.
    let mut buckets: HashMap<(CurrencyId, CurrencyId), Vec<ReserveTransfer>> = HashMap::new();

    for unspent in host.unspent_chain_transfers()? {
        let mut transfer = unspent.transfer;

        if unspent.utxo_value < transfer.amount {
            tracing::warn!(
                currency = %transfer.dest_currency_id,
                "unspent transfer claims more value than its UTXO carries, dropping"
            );
            continue;
        }

        let Some(source_definition) = cache.resolve(host, transfer.source_currency_id)? else {
            tracing::warn!(currency = %transfer.source_currency_id, "reserve transfer sources an unknown currency, dropping");
            continue;
        };
        let Some(definition) = cache.resolve(host, transfer.dest_currency_id)? else {
            tracing::warn!(currency = %transfer.dest_currency_id, "reserve transfer targets an unknown currency, dropping");
            continue;
        };

        if definition.is_prelaunch(this_chain_id, current_height) {
            continue;
        }

        if definition.is_local(this_chain_id) && current_height >= definition.start_block {
            let reserve_in = host.reserve_in_at_launch(definition.id)?;
            if definition.launch_failed(&reserve_in) {
                transfer.strip_conversion_flags();
            }
        }

        let destination_system_id = definition.resolve_system(transfer.is_preconvert());
        let secondary_key =
            if destination_system_id == this_chain_id { source_definition.id } else { CurrencyId::SENTINEL };

        buckets.entry((destination_system_id, secondary_key)).or_default().push(transfer);
    }

    let mut submitted = Vec::new();

    for ((destination_system_id, _), pending) in buckets {
        let tip = host.unspent_chain_export(destination_system_id)?;
        let blocks_since_last_export = tip.map(|t| current_height.saturating_sub(t.height)).unwrap_or(u64::MAX);
        let triggered = tip.is_none() || blocks_since_last_export >= MIN_BLOCKS || pending.len() >= MIN_INPUTS;
        if !triggered {
            continue;
        }

        let slices = rebalance_slices(pending.len(), MAX_EXPORT_INPUTS, MIN_INPUTS);
        let mut remaining = pending.into_iter();
        let mut thread_tip = tip;

        for slice_len in slices {
            let slice: Vec<ReserveTransfer> = (&mut remaining).take(slice_len).collect();
            let draft = build_export_draft(host, &mut cache, this_chain_id, destination_system_id, &slice, thread_tip)?;

            if !host.simulate_import(&draft)? {
                tracing::warn!(
                    error = %AggregationError::PreImportRejected(
                        destination_system_id.to_string(),
                        "simulated import rejected the batch".into(),
                    ),
                    "leaving its transfers unspent for the next pass"
                );
                break;
            }

            let tx = host.build_export_transaction(&draft)?;
            host.submit_to_mempool(&tx)?;
            host.prioritize_and_relay(&tx, 1)?;

            thread_tip = Some(ExportThreadTip {
                outpoint: tx.thread_output,
                native_value: tx.thread_output_native_value,
                height: current_height,
            });
            submitted.push(tx);
        }
    }

    Ok(submitted)
}

fn build_export_draft(
    host: &dyn HostChain,
    cache: &mut CurrencyCache,
    this_chain_id: CurrencyId,
    destination_system_id: CurrencyId,
    slice: &[ReserveTransfer],
    tip: Option<ExportThreadTip>,
) -> Result<ExportDraft> {
    let mut summary = CrossChainExport::new(destination_system_id);
    for transfer in slice {
        summary.accumulate(transfer);
    }

    let mut fee_outputs = Vec::new();
    for (&currency_id, &total_fee) in &summary.total_fees {
        let (export_fee, _import_fee) = split_export_import_fee(total_fee, summary.num_inputs)?;
        fee_outputs.push(ReserveTransfer {
            source_currency_id: currency_id,
            amount: export_fee,
            fee: 0,
            dest_currency_id: currency_id,
            dest_address: String::new(),
            flags: TransferFlags::VALID | TransferFlags::FEE_OUTPUT,
        });
    }

    // Only locally-controlled currencies actually need a reserve deposit
    // backing the tokens minted on the destination; deposits for a
    // currency this chain doesn't control would have no reserve to draw
    // from.
    let mut reserve_deposits = Vec::new();
    for (&currency_id, &amount) in &summary.total_amounts {
        let Some(definition) = cache.resolve(host, currency_id)? else {
            tracing::warn!(currency = %currency_id, "export total references an unknown currency, skipping its deposit");
            continue;
        };
        if !definition.is_local(this_chain_id) {
            continue;
        }
        reserve_deposits.push(ReserveDepositOutput { currency_id, amount, native: currency_id == this_chain_id });
    }

    let objects: Vec<ChainObject> =
        slice.iter().map(|t| serde_json::to_vec(t).map(ChainObject::ReserveTransfer)).collect::<serde_json::Result<_>>()?;
    let commitment_blob = chain_codec::encode(&objects);

    Ok(ExportDraft {
        thread_input: tip.map(|t| t.outpoint).unwrap_or(Outpoint { txid: [0u8; 32], vout: 0 }),
        thread_input_native_value: tip.map(|t| t.native_value).unwrap_or(0),
        included_transfers: slice.to_vec(),
        fee_outputs,
        summary,
        reserve_deposits,
        commitment_blob,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_types::{CurrencyDefinition, ProofProtocol, UnspentTransfer};
    use std::cell::RefCell;
    use std::collections::HashMap as Map;

    struct MockHost {
        this_chain_id: CurrencyId,
        current_height: u64,
        transfers: Vec<UnspentTransfer>,
        definitions: Map<CurrencyId, CurrencyDefinition>,
        reserve_in: Map<CurrencyId, Map<CurrencyId, u64>>,
        tips: RefCell<Map<CurrencyId, ExportThreadTip>>,
        simulate_import_result: bool,
        built: RefCell<Vec<ExportDraft>>,
    }

    impl HostChain for MockHost {
        fn this_chain_id(&self) -> CurrencyId {
            self.this_chain_id
        }
        fn current_height(&self) -> u64 {
            self.current_height
        }
        fn unspent_chain_transfers(&self) -> Result<Vec<UnspentTransfer>> {
            Ok(self.transfers.clone())
        }
        fn unspent_chain_export(&self, destination_system_id: CurrencyId) -> Result<Option<ExportThreadTip>> {
            Ok(self.tips.borrow().get(&destination_system_id).copied())
        }
        fn currency_definition(&self, currency_id: CurrencyId) -> Result<Option<CurrencyDefinition>> {
            Ok(self.definitions.get(&currency_id).cloned())
        }
        fn reserve_in_at_launch(&self, currency_id: CurrencyId) -> Result<Map<CurrencyId, u64>> {
            Ok(self.reserve_in.get(&currency_id).cloned().unwrap_or_default())
        }
        fn build_export_transaction(&self, draft: &ExportDraft) -> Result<BuiltTransaction> {
            let index = self.built.borrow().len() as u8;
            self.built.borrow_mut().push(draft.clone());
            Ok(BuiltTransaction {
                txid: [index; 32],
                serialized: vec![index],
                thread_output: Outpoint { txid: [index; 32], vout: 0 },
                thread_output_native_value: 1_000,
                total_native_export_fee: 0,
            })
        }
        fn simulate_import(&self, _: &ExportDraft) -> Result<bool> {
            Ok(self.simulate_import_result)
        }
        fn submit_to_mempool(&self, _: &BuiltTransaction) -> Result<()> {
            Ok(())
        }
        fn prioritize_and_relay(&self, _: &BuiltTransaction, _: u64) -> Result<()> {
            Ok(())
        }
    }

    fn simple_definition(id: CurrencyId) -> CurrencyDefinition {
        CurrencyDefinition {
            id,
            name: "dest".into(),
            parent_id: CurrencyId::ZERO,
            system_id: id,
            reserve_currency_ids: vec![],
            start_block: 0,
            min_preconvert: Map::new(),
            proof_protocol: ProofProtocol::ChainOwned,
        }
    }

    fn transfer(dest: CurrencyId, amount: u64, fee: u64) -> UnspentTransfer {
        UnspentTransfer {
            outpoint: Outpoint { txid: [0u8; 32], vout: 0 },
            utxo_value: amount,
            input_height: 0,
            transfer: ReserveTransfer {
                source_currency_id: dest,
                amount,
                fee,
                dest_currency_id: dest,
                dest_address: "addr".into(),
                flags: TransferFlags::VALID,
            },
        }
    }

    #[test]
    fn a_fresh_destination_with_no_prior_export_flushes_immediately() {
        let dest = CurrencyId([2u8; 20]);
        let host = MockHost {
            this_chain_id: CurrencyId([1u8; 20]),
            current_height: 100,
            transfers: vec![transfer(dest, 1_000, 10)],
            definitions: Map::from([(dest, simple_definition(dest))]),
            reserve_in: Map::new(),
            tips: RefCell::new(Map::new()),
            simulate_import_result: true,
            built: RefCell::new(vec![]),
        };

        let submitted = aggregate_chain_transfers(&host).unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(host.built.borrow()[0].included_transfers.len(), 1);
    }

    #[test]
    fn a_bucket_below_both_triggers_is_left_for_the_next_pass() {
        let dest = CurrencyId([2u8; 20]);
        let mut tips = Map::new();
        tips.insert(dest, ExportThreadTip { outpoint: Outpoint { txid: [9u8; 32], vout: 0 }, native_value: 1, height: 95 });
        let host = MockHost {
            this_chain_id: CurrencyId([1u8; 20]),
            current_height: 100, // only 5 blocks since last export, below MIN_BLOCKS
            transfers: vec![transfer(dest, 1_000, 10)], // below MIN_INPUTS
            definitions: Map::from([(dest, simple_definition(dest))]),
            reserve_in: Map::new(),
            tips: RefCell::new(tips),
            simulate_import_result: true,
            built: RefCell::new(vec![]),
        };

        let submitted = aggregate_chain_transfers(&host).unwrap();
        assert!(submitted.is_empty());
    }

    #[test]
    fn a_rejected_simulation_stops_the_batch_without_erroring() {
        let dest = CurrencyId([2u8; 20]);
        let host = MockHost {
            this_chain_id: CurrencyId([1u8; 20]),
            current_height: 100,
            transfers: vec![transfer(dest, 1_000, 10)],
            definitions: Map::from([(dest, simple_definition(dest))]),
            reserve_in: Map::new(),
            tips: RefCell::new(Map::new()),
            simulate_import_result: false,
            built: RefCell::new(vec![]),
        };

        let submitted = aggregate_chain_transfers(&host).unwrap();
        assert!(submitted.is_empty());
    }

    #[test]
    fn a_large_pending_set_chains_its_two_slices_through_the_thread_tip() {
        let dest = CurrencyId([2u8; 20]);
        let transfers: Vec<UnspentTransfer> = (0..130).map(|_| transfer(dest, 1, 0)).collect();
        let host = MockHost {
            this_chain_id: CurrencyId([1u8; 20]),
            current_height: 100,
            transfers,
            definitions: Map::from([(dest, simple_definition(dest))]),
            reserve_in: Map::new(),
            tips: RefCell::new(Map::new()),
            simulate_import_result: true,
            built: RefCell::new(vec![]),
        };

        let submitted = aggregate_chain_transfers(&host).unwrap();
        assert_eq!(submitted.len(), 2);

        let built = host.built.borrow();
        assert_eq!(built[0].included_transfers.len(), 64);
        assert_eq!(built[1].included_transfers.len(), 66);
        assert_eq!(built[1].thread_input, submitted[0].thread_output);
    }

    #[test]
    fn a_prelaunch_destination_is_dropped_before_bucketing() {
        let this_chain = CurrencyId([1u8; 20]);
        let dest = CurrencyId([2u8; 20]);
        let mut definition = simple_definition(dest);
        definition.system_id = this_chain;
        definition.start_block = 200;

        let host = MockHost {
            this_chain_id: this_chain,
            current_height: 100, // below the currency's start_block
            transfers: vec![transfer(dest, 1_000, 10)],
            definitions: Map::from([(dest, definition)]),
            reserve_in: Map::new(),
            tips: RefCell::new(Map::new()),
            simulate_import_result: true,
            built: RefCell::new(vec![]),
        };

        let submitted = aggregate_chain_transfers(&host).unwrap();
        assert!(submitted.is_empty());
        assert!(host.built.borrow().is_empty());
    }

    #[test]
    fn a_launch_failed_currency_strips_conversion_flags_but_still_exports() {
        let this_chain = CurrencyId([1u8; 20]);
        let dest = CurrencyId([2u8; 20]);
        let reserve = CurrencyId([3u8; 20]);
        let mut definition = simple_definition(dest);
        definition.system_id = this_chain;
        definition.start_block = 50;
        definition.min_preconvert = Map::from([(reserve, 1_000)]);

        let mut unspent = transfer(dest, 1_000, 10);
        unspent.transfer.flags = TransferFlags::VALID | TransferFlags::PRECONVERT;

        let host = MockHost {
            this_chain_id: this_chain,
            current_height: 100,
            transfers: vec![unspent],
            definitions: Map::from([(dest, definition)]),
            reserve_in: Map::new(), // nothing recorded at launch, below the 1_000 minimum
            tips: RefCell::new(Map::new()),
            simulate_import_result: true,
            built: RefCell::new(vec![]),
        };

        let submitted = aggregate_chain_transfers(&host).unwrap();
        assert_eq!(submitted.len(), 1);

        let built = host.built.borrow();
        assert_eq!(built[0].included_transfers.len(), 1);
        let flags = built[0].included_transfers[0].flags;
        assert!(flags.contains(TransferFlags::VALID));
        assert!(!flags.contains(TransferFlags::PRECONVERT));
    }
}
