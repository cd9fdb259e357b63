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

//! Currency-definition cache, fee-split calculator, and cross-chain
//! transfer aggregator.

mod currency;
mod fees;
mod slicing;
mod transfers;

pub use currency::CurrencyCache;
pub use fees::split_export_import_fee;
pub use slicing::rebalance_slices;
pub use transfers::aggregate_chain_transfers;
