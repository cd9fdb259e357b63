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

use crate::id::CurrencyId;
use crate::transfer::ReserveTransfer;

/// Summary output advancing a per-destination export thread.
///
/// Invariants enforced by the aggregator that builds one:
/// `num_inputs <= MAX_EXPORT_INPUTS`; `total_amounts` equals
/// the sum of included transfer values per currency; `total_fees` equals
/// the sum of included transfer fees per currency.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CrossChainExport {
    pub destination_system_id: CurrencyId,
    pub num_inputs: usize,
    pub total_amounts: HashMap<CurrencyId, u64>,
    pub total_fees: HashMap<CurrencyId, u64>,
}

impl CrossChainExport {
    pub fn new(destination_system_id: CurrencyId) -> Self {
        Self {
            destination_system_id,
            num_inputs: 0,
            total_amounts: HashMap::new(),
            total_fees: HashMap::new(),
        }
    }

    /// Accumulates one included transfer's amount and fee.
    pub fn accumulate(&mut self, transfer: &ReserveTransfer) {
        self.num_inputs += 1;
        *self.total_amounts.entry(transfer.source_currency_id).or_insert(0) += transfer.amount;
        *self.total_fees.entry(transfer.source_currency_id).or_insert(0) += transfer.fee;
    }
}
