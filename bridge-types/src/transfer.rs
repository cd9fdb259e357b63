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

use crate::id::CurrencyId;

bitflags::bitflags! {
    /// Orthogonal flags on a reserve transfer, the idiomatic Rust
    /// replacement for the original's bitmask-of-magic-numbers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
    pub struct TransferFlags: u32 {
        const VALID = 0b0000_0001;
        const PRECONVERT = 0b0000_0010;
        const CONVERT = 0b0000_0100;
        const SEND_BACK = 0b0000_1000;
        const FEE_OUTPUT = 0b0001_0000;
    }
}

/// A single user intent to move value to another currency/chain.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReserveTransfer {
    pub source_currency_id: CurrencyId,
    pub amount: u64,
    pub fee: u64,
    pub dest_currency_id: CurrencyId,
    pub dest_address: String,
    pub flags: TransferFlags,
}

impl ReserveTransfer {
    /// Degrades a failed-launch transfer to a plain transfer,
    /// never retried once applied.
    pub fn strip_conversion_flags(&mut self) {
        self.flags.remove(TransferFlags::SEND_BACK | TransferFlags::PRECONVERT | TransferFlags::CONVERT);
    }

    pub fn is_preconvert(&self) -> bool {
        self.flags.contains(TransferFlags::PRECONVERT)
    }
}

/// A single unspent reserve-transfer output as seen by the host chain: the
/// transfer intent plus enough of the spending UTXO to validate claimed
/// value and to build the next transaction's input list. The UTXO
/// reference and native value are opaque to everything above the
/// aggregator — see `HostChain` in `host.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnspentTransfer {
    pub outpoint: Outpoint,
    /// What the UTXO actually carries. The claimed value in `transfer` may
    /// exceed this; when it does, the input is dropped.
    pub utxo_value: u64,
    pub input_height: u64,
    pub transfer: ReserveTransfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Outpoint {
    pub txid: [u8; 32],
    pub vout: u32,
}
