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

//! Shared data model and host-chain collaborator traits for the PBaaS
//! cross-chain bridge and merge-mining coordinator.

pub mod candidate;
pub mod currency;
pub mod export;
pub mod header;
pub mod host;
pub mod id;
pub mod target;
pub mod transfer;

pub use candidate::{BlockTemplate, MergeMineCandidate, RpcEndpoint};
pub use currency::{CurrencyDefinition, ProofProtocol};
pub use export::CrossChainExport;
pub use header::ProposedNotaryHeader;
pub use host::{BuiltTransaction, ExportDraft, ExportThreadTip, HostChain, ReserveDepositOutput};
pub use id::CurrencyId;
pub use target::CompactTarget;
pub use transfer::{Outpoint, ReserveTransfer, TransferFlags, UnspentTransfer};
