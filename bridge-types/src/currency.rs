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

/// Distinguishes chain-owned currencies (the system ID is whoever controls
/// the chain) from ID-owned currencies (the system ID is the currency's own
/// ID, once it is live, via `resolve_system` below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ProofProtocol {
    ChainOwned,
    ChainId,
}

/// Immutable once confirmed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CurrencyDefinition {
    pub id: CurrencyId,
    pub name: String,
    pub parent_id: CurrencyId,
    /// Which chain controls this currency.
    pub system_id: CurrencyId,
    pub reserve_currency_ids: Vec<CurrencyId>,
    /// Height below which the currency is pre-launch.
    pub start_block: u64,
    /// Minimum pre-conversion per reserve currency required for a
    /// successful launch.
    pub min_preconvert: HashMap<CurrencyId, u64>,
    pub proof_protocol: ProofProtocol,
}

impl CurrencyDefinition {
    /// Whether this chain itself controls the currency.
    pub fn is_local(&self, this_chain_id: CurrencyId) -> bool {
        self.system_id == this_chain_id
    }

    /// Whether the currency is still pre-launch on its own chain.
    pub fn is_prelaunch(&self, this_chain_id: CurrencyId, height: u64) -> bool {
        self.is_local(this_chain_id) && height < self.start_block
    }

    /// Reserve-in totals at the launch block are
    /// strictly less than `min_preconvert`, componentwise.
    pub fn launch_failed(&self, reserve_in_at_launch: &HashMap<CurrencyId, u64>) -> bool {
        self.min_preconvert.iter().any(|(reserve_id, minimum)| {
            let actual = reserve_in_at_launch.get(reserve_id).copied().unwrap_or(0);
            actual < *minimum
        })
    }

    /// If the currency is ID-owned and the transfer
    /// is not a pre-convert, the currency's own ID is its system.
    pub fn resolve_system(&self, transfer_is_preconvert: bool) -> CurrencyId {
        if self.proof_protocol == ProofProtocol::ChainId && !transfer_is_preconvert {
            self.id
        } else {
            self.system_id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(system_id: CurrencyId, start_block: u64, min: &[(CurrencyId, u64)]) -> CurrencyDefinition {
        CurrencyDefinition {
            id: CurrencyId([9u8; 20]),
            name: "X".into(),
            parent_id: CurrencyId::ZERO,
            system_id,
            reserve_currency_ids: vec![],
            start_block,
            min_preconvert: min.iter().cloned().collect(),
            proof_protocol: ProofProtocol::ChainOwned,
        }
    }

    #[test]
    fn prelaunch_before_start_block() {
        let this_chain = CurrencyId([1u8; 20]);
        let def = def(this_chain, 1000, &[]);
        assert!(def.is_prelaunch(this_chain, 999));
        assert!(!def.is_prelaunch(this_chain, 1000));
    }

    #[test]
    fn launch_fails_below_minimum() {
        let vrsc = CurrencyId([2u8; 20]);
        let this_chain = CurrencyId([1u8; 20]);
        let def = def(this_chain, 1000, &[(vrsc, 1_000_000_000)]);
        let mut reserve_in = HashMap::new();
        reserve_in.insert(vrsc, 500_000_000);
        assert!(def.launch_failed(&reserve_in));

        reserve_in.insert(vrsc, 1_000_000_000);
        assert!(!def.launch_failed(&reserve_in));
    }

    #[test]
    fn resolve_system_for_id_owned_non_preconvert() {
        let this_chain = CurrencyId([1u8; 20]);
        let mut d = def(this_chain, 0, &[]);
        d.proof_protocol = ProofProtocol::ChainId;
        assert_eq!(d.resolve_system(false), d.id);
        assert_eq!(d.resolve_system(true), d.system_id);
    }
}
