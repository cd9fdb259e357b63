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

use bridge_errors::RpcError;
use bridge_types::RpcEndpoint;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// A JSON-RPC-over-HTTP-with-basic-auth client to one child/notary daemon.
/// Built on `reqwest::blocking` since the submission thread is a plain
/// OS thread, not a Tokio task — RPC calls are always issued with no
/// coordinator lock held.
pub struct JsonRpcClient {
    http: reqwest::blocking::Client,
    endpoint: RpcEndpoint,
}

impl JsonRpcClient {
    pub fn new(endpoint: RpcEndpoint, timeout: Duration) -> Result<Self, RpcError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| RpcError::ClientInit { endpoint: endpoint.base_url(), source })?;
        Ok(Self { http, endpoint })
    }

    /// Calls `method` with `params`. `result` and `error` are read from the
    /// same top-level JSON-RPC response object, not from a doubly-unwrapped
    /// one.
    pub fn call<T: DeserializeOwned>(&self, method: &'static str, params: Value) -> Result<T, RpcError> {
        let body = json!({
            "jsonrpc": "1.0",
            "id": "bridge",
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(self.endpoint.base_url())
            .basic_auth(&self.endpoint.user, Some(&self.endpoint.pass))
            .json(&body)
            .send()
            .map_err(|source| {
                if source.is_timeout() {
                    RpcError::Timeout { endpoint: self.endpoint.base_url(), timeout_secs: 15 }
                } else {
                    RpcError::Transport { endpoint: self.endpoint.base_url(), source }
                }
            })?;

        let envelope: Value = response.json().map_err(|source| RpcError::Transport {
            endpoint: self.endpoint.base_url(),
            source,
        })?;

        if let Some(error) = envelope.get("error") {
            if !error.is_null() {
                return Err(RpcError::RemoteError {
                    endpoint: self.endpoint.base_url(),
                    method,
                    message: error.to_string(),
                });
            }
        }

        let result = envelope.get("result").cloned().unwrap_or(Value::Null);
        serde_json::from_value(result).map_err(|source| RpcError::MalformedResponse {
            endpoint: self.endpoint.base_url(),
            method,
            source,
        })
    }

    pub fn endpoint(&self) -> &RpcEndpoint {
        &self.endpoint
    }
}

/// `submitblock(hex_block)` → string outcome or error.
pub fn submit_block(client: &JsonRpcClient, hex_block: &str) -> Result<String, RpcError> {
    client.call("submitblock", json!([hex_block]))
}

/// Files a locally-won earned notarization with the notary, identified by
/// the block that mined it and the notarization's transaction index within
/// that block.
pub fn file_earned_notarization(client: &JsonRpcClient, block_hash_hex: &str, tx_index: u32) -> Result<String, RpcError> {
    client.call("submitacceptednotarization", json!([block_hash_hex, tx_index]))
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct GetInfoResult {
    #[serde(rename = "VRSCversion")]
    pub version: String,
    pub blocks: u64,
}

pub fn get_info(client: &JsonRpcClient) -> Result<GetInfoResult, RpcError> {
    client.call("getinfo", json!([]))
}

pub fn get_currency_definition(client: &JsonRpcClient, name_or_id: &str) -> Result<serde_json::Value, RpcError> {
    client.call("getcurrencydefinition", json!([name_or_id]))
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LastImportIn {
    #[serde(rename = "lastimporttransaction")]
    pub last_import_transaction: Option<String>,
    #[serde(rename = "lastconfirmednotarization")]
    pub last_confirmed_notarization: Option<String>,
    #[serde(rename = "importtxtemplate")]
    pub import_tx_template: Option<String>,
    #[serde(rename = "nativeimportavailable")]
    pub native_import_available: bool,
    #[serde(rename = "tokenimportavailable")]
    pub token_import_available: bool,
}

pub fn get_last_import_in(client: &JsonRpcClient, chain_name: &str) -> Result<LastImportIn, RpcError> {
    client.call("getlastimportin", json!([chain_name]))
}

pub fn sign_raw_transaction(client: &JsonRpcClient, hex_tx: &str) -> Result<serde_json::Value, RpcError> {
    client.call("signrawtransaction", json!([hex_tx]))
}

pub fn send_raw_transaction(client: &JsonRpcClient, hex_tx: &str) -> Result<String, RpcError> {
    client.call("sendrawtransaction", json!([hex_tx]))
}
