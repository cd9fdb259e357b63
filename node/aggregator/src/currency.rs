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
use bridge_types::{CurrencyDefinition, CurrencyId, HostChain};

/// Read-through currency-definition cache scoped to one aggregation pass.
///
/// Negative lookups (a currency ID that does not resolve) are cached too, so
/// a batch containing many transfers to the same unknown currency costs one
/// host-chain round trip instead of one per transfer. The cache is dropped
/// at the end of the pass rather than kept across runs, since currency
/// definitions can still change (prelaunch -> launched -> failed) between
/// aggregator invocations.
#[derive(Default)]
pub struct CurrencyCache {
    entries: HashMap<CurrencyId, Option<CurrencyDefinition>>,
}

impl CurrencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, host: &dyn HostChain, currency_id: CurrencyId) -> Result<Option<CurrencyDefinition>> {
        if let Some(cached) = self.entries.get(&currency_id) {
            return Ok(cached.clone());
        }
        let definition = host.currency_definition(currency_id)?;
        self.entries.insert(currency_id, definition.clone());
        Ok(definition)
    }
}
