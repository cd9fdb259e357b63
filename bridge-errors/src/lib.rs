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

//! Typed errors for the PBaaS bridge and merge-mining coordinator.
//!
//! Per-input and per-batch failures inside the aggregator are handled
//! inline (logged and skipped); the errors below are for the few paths
//! that must propagate a typed failure to a caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("object stream is missing the OPRETTYPE_OBJECTARR marker")]
    MissingMarker,

    #[error("unrecognized chain-object kind tag: {0}")]
    UnknownKind(u8),

    #[error("object stream has {0} trailing byte(s) after the last well-formed object")]
    TrailingBytes(usize),

    #[error("object body is truncated")]
    Truncated,
}

#[derive(Debug, Error)]
pub enum FeeError {
    #[error("export has {0} inputs, exceeding MAX_EXPORT_INPUTS ({1})")]
    TooManyInputs(usize, usize),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("chain '{0}' is not registered as a merge-mine candidate")]
    UnknownChain(String),
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("failed to initialize the HTTP client for '{endpoint}': {source}")]
    ClientInit {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to '{endpoint}' timed out after {timeout_secs}s")]
    Timeout { endpoint: String, timeout_secs: u64 },

    #[error("transport error calling '{endpoint}': {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("'{method}' on '{endpoint}' returned an RPC error: {message}")]
    RemoteError { endpoint: String, method: &'static str, message: String },

    #[error("'{method}' on '{endpoint}' returned a malformed response: {source}")]
    MalformedResponse { endpoint: String, method: &'static str, source: serde_json::Error },
}

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("pre-import simulation rejected the export batch for system '{0}': {1}")]
    PreImportRejected(String, String),

    #[error("transaction builder failed while assembling an export: {0}")]
    BuilderFailed(String),
}
