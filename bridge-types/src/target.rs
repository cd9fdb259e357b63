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

use primitive_types::U256;

/// A proof-of-work target in Bitcoin-style compact ("nBits") form: an
/// 8-bit exponent and a 24-bit mantissa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct CompactTarget(pub u32);

impl CompactTarget {
    /// Decodes the compact representation into a 256-bit integer.
    ///
    /// The sign bit (`0x0080_0000` of the mantissa) marks a negative target
    /// in Bitcoin's original format; merge-mining targets are never
    /// negative, so it decodes to zero here rather than panicking.
    pub fn decode(self) -> U256 {
        let bits = self.0;
        let exponent = (bits >> 24) as u32;
        let mut mantissa = bits & 0x007f_ffff;
        if bits & 0x0080_0000 != 0 {
            mantissa = 0;
        }
        if mantissa == 0 {
            return U256::zero();
        }
        let mantissa = U256::from(mantissa);
        if exponent <= 3 {
            mantissa >> (8 * (3 - exponent))
        } else {
            mantissa << (8 * (exponent - 3))
        }
    }

    /// Encodes a 256-bit integer back into its compact representation,
    /// used to report "the easiest target any registered chain will
    /// accept".
    pub fn encode(value: U256) -> CompactTarget {
        if value.is_zero() {
            return CompactTarget(0);
        }
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap();
        let mut size = (32 - first_nonzero) as u32;
        let mantissa_bytes = &bytes[first_nonzero..];

        let mut mantissa = if mantissa_bytes.len() >= 3 {
            ((mantissa_bytes[0] as u32) << 16) | ((mantissa_bytes[1] as u32) << 8) | (mantissa_bytes[2] as u32)
        } else {
            let mut padded = [0u8; 3];
            padded[3 - mantissa_bytes.len()..].copy_from_slice(mantissa_bytes);
            ((padded[0] as u32) << 16) | ((padded[1] as u32) << 8) | (padded[2] as u32)
        };

        // If the high bit of the mantissa is set it would be read back as a
        // sign bit, so shift down one byte and bump the size.
        if mantissa & 0x0080_0000 != 0 {
            mantissa >>= 8;
            size += 1;
        }

        CompactTarget((size << 24) | mantissa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_zero_mantissa_is_zero() {
        assert_eq!(CompactTarget(0x0300_0000).decode(), U256::zero());
    }

    #[test]
    fn round_trips_through_encode() {
        let original = U256::from(0x1234_5600u64) << 8;
        let compact = CompactTarget::encode(original);
        let decoded = compact.decode();
        // Compact encoding loses precision below the mantissa; re-encoding
        // the decoded value must be a fixed point.
        assert_eq!(CompactTarget::encode(decoded), compact);
    }

    #[test]
    fn larger_compact_value_decodes_to_larger_target() {
        let easy = CompactTarget(0x1d00_ffff).decode();
        let hard = CompactTarget(0x1b00_ffff).decode();
        assert!(easy > hard);
    }
}
