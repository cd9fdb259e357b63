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

//! The merge-mining coordinator core: registry, header combiner, qualified-
//! header queue, block submitter, and submission-thread loops.

mod coordinator;
mod header;
mod queue;
mod registry;
mod state;
mod submitter;
mod thread;

pub use coordinator::Coordinator;
pub use header::combine;
pub use queue::QualifiedHeaderQueue;
pub use registry::MergeMineRegistry;
pub use state::{EarnedNotarization, MergeMiningState, MiningOutput};
pub use submitter::{submit_qualified_blocks, SubmissionOutcome};
pub use thread::{run_child_mode, run_notary_mode, ShutdownSignal};
