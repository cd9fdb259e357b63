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

//! Tagged-union codec over the eight cross-chain proof object kinds that can
//! appear in a commitment blob.
//!
//! The codec is purely structural: it never validates signatures or proof
//! validity against the host chain's state. That is the caller's job —
//! `chain-codec` only guarantees a well-formed stream round-trips and a
//! malformed one is rejected in its entirety, leaking nothing.

use bridge_errors::CodecError;

/// 32-bit marker written at the start of every encoded object sequence.
pub const OPRETTYPE_OBJECTARR: u32 = 0x0001_0000;

/// One tagged cross-chain proof object.
///
/// Every kind except [`ChainObject::ProofRoot`] carries its canonical wire
/// bytes opaquely: `chain-codec` does not know (and does not need to know)
/// the internal shape of a block-header-and-proof or a reserve transfer, it
/// only needs to be able to frame and re-extract it. Typed access to a
/// reserve transfer's fields lives in `bridge-types`, which encodes into and
/// decodes out of the `ReserveTransfer` variant's byte payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainObject {
    BlockHeaderAndProof(Vec<u8>),
    PartialTransactionProof(Vec<u8>),
    BlockHeaderReference(Vec<u8>),
    PriorBlocksCommitment(Vec<u8>),
    /// A 32-byte digest, stored (not computed) as the object's hash.
    ProofRoot([u8; 32]),
    ReserveTransfer(Vec<u8>),
    CrossChainProof(Vec<u8>),
    CompositeChainObject(Vec<u8>),
}

impl ChainObject {
    fn kind_tag(&self) -> u8 {
        match self {
            ChainObject::BlockHeaderAndProof(_) => 0,
            ChainObject::PartialTransactionProof(_) => 1,
            ChainObject::BlockHeaderReference(_) => 2,
            ChainObject::PriorBlocksCommitment(_) => 3,
            ChainObject::ProofRoot(_) => 4,
            ChainObject::ReserveTransfer(_) => 5,
            ChainObject::CrossChainProof(_) => 6,
            ChainObject::CompositeChainObject(_) => 7,
        }
    }

    fn body(&self) -> &[u8] {
        match self {
            ChainObject::BlockHeaderAndProof(b)
            | ChainObject::PartialTransactionProof(b)
            | ChainObject::BlockHeaderReference(b)
            | ChainObject::PriorBlocksCommitment(b)
            | ChainObject::ReserveTransfer(b)
            | ChainObject::CrossChainProof(b)
            | ChainObject::CompositeChainObject(b) => b,
            ChainObject::ProofRoot(digest) => digest,
        }
    }

    fn from_tag(tag: u8, body: Vec<u8>) -> Result<Self, CodecError> {
        Ok(match tag {
            0 => ChainObject::BlockHeaderAndProof(body),
            1 => ChainObject::PartialTransactionProof(body),
            2 => ChainObject::BlockHeaderReference(body),
            3 => ChainObject::PriorBlocksCommitment(body),
            4 => {
                let digest: [u8; 32] = body.try_into().map_err(|_| CodecError::Truncated)?;
                ChainObject::ProofRoot(digest)
            }
            5 => ChainObject::ReserveTransfer(body),
            6 => ChainObject::CrossChainProof(body),
            7 => ChainObject::CompositeChainObject(body),
            other => return Err(CodecError::UnknownKind(other)),
        })
    }

    /// Hashes the object's canonical body. A `ProofRoot` returns its stored
    /// digest directly rather than re-hashing it.
    pub fn hash(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};
        if let ChainObject::ProofRoot(digest) = self {
            return *digest;
        }
        let mut hasher = Sha256::new();
        hasher.update([self.kind_tag()]);
        hasher.update(self.body());
        hasher.finalize().into()
    }
}

/// Encodes a sequence of chain objects into an opaque commitment blob.
///
/// Returns an empty blob if any single object's body would not fit in a
/// 32-bit length prefix — partial output is never published.
pub fn encode(objects: &[ChainObject]) -> Vec<u8> {
    for object in objects {
        if object.body().len() > u32::MAX as usize {
            return Vec::new();
        }
    }

    let mut blob = Vec::with_capacity(4 + objects.len() * 16);
    blob.extend_from_slice(&OPRETTYPE_OBJECTARR.to_le_bytes());
    for object in objects {
        blob.push(object.kind_tag());
        blob.extend_from_slice(&(object.body().len() as u32).to_le_bytes());
        blob.extend_from_slice(object.body());
    }
    blob
}

/// Decodes a commitment blob back into its sequence of chain objects.
///
/// Rejects the entire sequence — returning an error rather than any
/// partially-decoded objects — if the marker is missing, an object is
/// truncated, an unknown kind tag appears, or bytes remain once the stream
/// is exhausted.
pub fn decode(blob: &[u8]) -> Result<Vec<ChainObject>, CodecError> {
    if blob.len() < 4 {
        return Err(CodecError::MissingMarker);
    }
    let marker = u32::from_le_bytes(blob[0..4].try_into().unwrap());
    if marker != OPRETTYPE_OBJECTARR {
        return Err(CodecError::MissingMarker);
    }

    let mut objects = Vec::new();
    let mut cursor = 4usize;
    while cursor < blob.len() {
        if cursor + 1 + 4 > blob.len() {
            return Err(CodecError::Truncated);
        }
        let tag = blob[cursor];
        cursor += 1;
        let len = u32::from_le_bytes(blob[cursor..cursor + 4].try_into().unwrap()) as usize;
        cursor += 4;
        if cursor + len > blob.len() {
            return Err(CodecError::Truncated);
        }
        let body = blob[cursor..cursor + len].to_vec();
        cursor += len;
        objects.push(ChainObject::from_tag(tag, body)?);
    }

    if cursor != blob.len() {
        return Err(CodecError::TrailingBytes(blob.len() - cursor));
    }

    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_mixed_sequence() {
        let objects = vec![
            ChainObject::ReserveTransfer(vec![1, 2, 3, 4]),
            ChainObject::ProofRoot([7u8; 32]),
            ChainObject::CompositeChainObject(vec![]),
        ];
        let blob = encode(&objects);
        assert_eq!(decode(&blob).unwrap(), objects);
    }

    #[test]
    fn rejects_trailing_junk_and_leaks_nothing() {
        let objects = vec![ChainObject::ReserveTransfer(vec![9, 9])];
        let mut blob = encode(&objects);
        blob.push(0xff);
        assert!(matches!(decode(&blob), Err(CodecError::Truncated)));
    }

    #[test]
    fn rejects_missing_marker() {
        assert!(matches!(decode(&[1, 2, 3]), Err(CodecError::MissingMarker)));
    }

    #[test]
    fn rejects_unknown_kind_tag() {
        let mut blob = OPRETTYPE_OBJECTARR.to_le_bytes().to_vec();
        blob.push(200); // unknown tag
        blob.extend_from_slice(&0u32.to_le_bytes());
        assert!(matches!(decode(&blob), Err(CodecError::UnknownKind(200))));
    }

    #[test]
    fn proof_root_hash_is_the_stored_digest() {
        let digest = [42u8; 32];
        let object = ChainObject::ProofRoot(digest);
        assert_eq!(object.hash(), digest);
    }

    #[test]
    fn empty_sequence_round_trips() {
        let blob = encode(&[]);
        assert_eq!(decode(&blob).unwrap(), Vec::new());
    }
}
