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

use bridge_errors::FeeError;
use bridge_node_env::MAX_EXPORT_INPUTS;
use primitive_types::U256;

const BASE_RATIO: u64 = 50_000_000;
const SCALE: u64 = 25_000_000;
const RATIO_DENOMINATOR: u64 = 100_000_000;

/// Splits one currency's accumulated export fee between the export
/// transaction's own fee and the fee left for the destination's import
/// transaction, as a function of how many inputs the export bundles.
///
/// The split ratio rewards larger batches (up to `MAX_EXPORT_INPUTS`) with a
/// larger export-side share, linearly between `BASE_RATIO` at `n == 1` and
/// `BASE_RATIO + SCALE` at `n == MAX_EXPORT_INPUTS`. All arithmetic runs
/// through 256-bit intermediates so `total_fee * ratio` cannot overflow
/// before the final truncating divide back to `u64`.
pub fn split_export_import_fee(total_fee: u64, num_inputs: usize) -> Result<(u64, u64), FeeError> {
    if num_inputs > MAX_EXPORT_INPUTS {
        return Err(FeeError::TooManyInputs(num_inputs, MAX_EXPORT_INPUTS));
    }

    let ratio = BASE_RATIO + (SCALE / MAX_EXPORT_INPUTS as u64) * (num_inputs.saturating_sub(1) as u64);

    let export_fee = (U256::from(total_fee) * U256::from(ratio) / U256::from(RATIO_DENOMINATOR)).as_u64();
    let import_fee = total_fee - export_fee;

    Ok((export_fee, import_fee))
}
