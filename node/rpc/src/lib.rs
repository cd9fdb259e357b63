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

//! JSON-RPC client to child/notary daemons and the notary-liveness
//! probe.

mod client;
mod notary;

pub use client::{
    file_earned_notarization, get_currency_definition, get_info, get_last_import_in, send_raw_transaction,
    sign_raw_transaction, submit_block, GetInfoResult, JsonRpcClient, LastImportIn,
};
pub use notary::{probe_notary, NotaryLiveness};
