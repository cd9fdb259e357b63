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

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use tokio::runtime::Runtime;

use bridge_node_coordinator::{run_child_mode, run_notary_mode, Coordinator, ShutdownSignal};
use bridge_node_env::{BridgeConfig, ChainRole, NOTARY_RPC_TIMEOUT};
use bridge_node_rpc::JsonRpcClient;
use bridge_types::{CurrencyId, RpcEndpoint};

/// Starts the bridge process as either the notary chain's coordinator or a
/// child chain's submission thread, and then waits for a shutdown signal.
#[derive(Debug, Clone, Parser)]
pub struct Start {
    /// Runs as the notary root chain rather than a PBaaS child chain.
    #[clap(long)]
    pub notary: bool,

    /// The notary's RPC host, required when not running as the notary.
    #[clap(long = "notary-host")]
    pub notary_host: Option<String>,
    #[clap(long = "notary-port", default_value = "0")]
    pub notary_port: u16,
    #[clap(long = "notary-user", default_value = "")]
    pub notary_user: String,
    #[clap(long = "notary-pass", default_value = "")]
    pub notary_pass: String,

    /// This chain's 160-bit currency ID, hex-encoded.
    #[clap(long = "this-chain-id", default_value = "")]
    pub this_chain_id_hex: String,
    #[clap(long = "this-chain-name", default_value = "")]
    pub this_chain_name: String,
    #[clap(long = "this-chain-start-block", default_value = "0")]
    pub this_chain_start_block: u64,

    /// Verbosity of the node's logs \[options: 0, 1, 2, 3\].
    #[clap(default_value = "2", long = "verbosity")]
    pub verbosity: u8,
}

impl Start {
    pub fn parse(self) -> Result<String> {
        crate::logger::initialize_logger(self.verbosity);
        Self::runtime().block_on(self.run())?;
        Ok(String::new())
    }

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to initialize the Tokio runtime")
    }

    async fn run(self) -> Result<()> {
        let role = if self.notary {
            ChainRole::Notary
        } else {
            let Some(host) = self.notary_host.clone() else {
                bail!("--notary-host is required when not running with --notary");
            };
            ChainRole::Child {
                notary: RpcEndpoint { host, port: self.notary_port, user: self.notary_user.clone(), pass: self.notary_pass.clone() },
            }
        };
        let config = BridgeConfig { this_chain_id_hex: self.this_chain_id_hex.clone(), role };

        let coordinator = Arc::new(Coordinator::new());
        let shutdown = ShutdownSignal::new();

        match config.role {
            ChainRole::Notary => {
                let coordinator = coordinator.clone();
                let shutdown = shutdown.clone();
                std::thread::spawn(move || {
                    run_notary_mode(
                        coordinator.as_ref(),
                        |candidate| JsonRpcClient::new(candidate.rpc_endpoint.clone(), NOTARY_RPC_TIMEOUT),
                        &shutdown,
                    );
                });
            }
            ChainRole::Child { notary } => {
                // Validated up front even though this crate never constructs
                // a HostChain itself; the host daemon embedding this
                // coordinator reads --this-chain-id separately.
                let _this_chain_id = parse_currency_id(&config.this_chain_id_hex)?;
                let this_chain_name = self.this_chain_name.clone();
                let this_chain_start_block = self.this_chain_start_block;
                let shutdown = shutdown.clone();
                std::thread::spawn(move || {
                    run_child_mode(
                        coordinator.as_ref(),
                        &this_chain_name,
                        this_chain_start_block,
                        &notary,
                        &shutdown,
                        || tracing::info!("new imports available, triggering a transfer-aggregation pass"),
                    );
                });
            }
        }

        tokio::signal::ctrl_c().await?;
        tracing::info!("shutdown requested, stopping the submission thread");
        shutdown.request();
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(())
    }
}

fn parse_currency_id(hex_str: &str) -> Result<CurrencyId> {
    let bytes = hex::decode(hex_str)?;
    CurrencyId::from_slice(&bytes).ok_or_else(|| anyhow::anyhow!("--this-chain-id must be a 20-byte hex string"))
}
