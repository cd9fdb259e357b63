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

/// Splits `n` pending transfers for one destination into per-export batch
/// sizes, each normally capped at `max_export_inputs`.
///
/// A plain `chunks(max_export_inputs)` leaves a trailing batch as small as
/// 1 whenever `n` isn't a multiple of the cap — for example 130 transfers
/// at a cap of 64 would naively split 64/64/2. A batch that small wastes a
/// whole export transaction's overhead on almost nothing, so when the
/// remainder would fall below `min_inputs`, it is folded into the
/// second-to-last batch instead: 130 becomes 64/66, not 64/64/2. The
/// merged final batch is the only one allowed to exceed
/// `max_export_inputs`.
pub fn rebalance_slices(n: usize, max_export_inputs: usize, min_inputs: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    if n <= max_export_inputs {
        return vec![n];
    }

    let full_batches = n / max_export_inputs;
    let remainder = n % max_export_inputs;

    if remainder == 0 {
        return vec![max_export_inputs; full_batches];
    }

    if remainder >= min_inputs {
        let mut slices = vec![max_export_inputs; full_batches];
        slices.push(remainder);
        return slices;
    }

    let mut slices = vec![max_export_inputs; full_batches - 1];
    slices.push(max_export_inputs + remainder);
    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_produces_no_slices() {
        assert_eq!(rebalance_slices(0, 64, 10), Vec::<usize>::new());
    }

    #[test]
    fn below_the_cap_is_a_single_slice() {
        assert_eq!(rebalance_slices(40, 64, 10), vec![40]);
    }

    #[test]
    fn exact_multiple_of_the_cap_splits_evenly() {
        assert_eq!(rebalance_slices(128, 64, 10), vec![64, 64]);
    }

    #[test]
    fn large_remainder_gets_its_own_slice() {
        // 150 = 64 + 64 + 22, and 22 >= min_inputs, so it stands alone.
        assert_eq!(rebalance_slices(150, 64, 10), vec![64, 64, 22]);
    }

    #[test]
    fn small_remainder_is_merged_into_the_last_full_batch() {
        assert_eq!(rebalance_slices(130, 64, 10), vec![64, 66]);
    }

    #[test]
    fn small_remainder_with_only_one_full_batch_merges_into_it() {
        // 70 = 64 + 6; 6 < min_inputs(10) and there's only one full batch,
        // so everything collapses into one oversized slice.
        assert_eq!(rebalance_slices(70, 64, 10), vec![70]);
    }
}
