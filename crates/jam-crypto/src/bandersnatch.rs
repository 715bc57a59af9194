// Path: crates/jam-crypto/src/bandersnatch.rs
//! Bandersnatch ring-VRF: anonymous ticket proofs, the epoch root ring
//! commitment, and the non-anonymous fallback seal (spec §3, §4.2).
//!
//! Verification uses the `ark-vrf` IETF and ring VRF suites over the
//! Bandersnatch curve (`ark-ed-on-bls12-381-bandersnatch`), the same stack
//! the JAM test-vector tooling uses for this curve.

use crate::error::CryptoError;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_vrf::ietf;
use ark_vrf::ring;
use ark_vrf::suites::bandersnatch::{BandersnatchSha512Ell2, Input, Public, Secret};

/// A ring commitment over the active validator set's Bandersnatch keys,
/// used as the epoch root published in an `EpochMark` (spec §3).
pub type RingCommitment = [u8; 144];

fn decode_public(key: &[u8; 32]) -> Result<Public, CryptoError> {
    Public::deserialize_compressed(&key[..]).map_err(|e| CryptoError::InvalidKey(format!("{e:?}")))
}

fn decode_publics(keys: &[[u8; 32]]) -> Result<Vec<Public>, CryptoError> {
    keys.iter().map(decode_public).collect()
}

fn ring_params(ring_size: usize) -> ring::RingProofParams<BandersnatchSha512Ell2> {
    ring::RingProofParams::from_ring_size(ring_size)
}

/// Builds the `EpochMark`'s ring commitment over the active set's
/// Bandersnatch keys, in validator-index order.
pub fn build_epoch_root(validator_keys: &[[u8; 32]]) -> Result<RingCommitment, CryptoError> {
    let publics = decode_publics(validator_keys)?;
    let params = ring_params(publics.len());
    let commitment = params
        .verifier_key(&publics)
        .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
    let mut out = [0u8; 144];
    commitment
        .serialize_compressed(&mut out[..])
        .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
    Ok(out)
}

/// Produces a ring-VRF ticket proof: the prover signs `entry_index` without
/// revealing which ring member produced the proof. Returns the ticket id
/// (the VRF output hash) alongside the proof bytes.
pub fn prove_ticket(
    seed: &[u8; 32],
    validator_keys: &[[u8; 32]],
    prover_index: usize,
    entry_index: u8,
) -> Result<([u8; 32], Vec<u8>), CryptoError> {
    let secret = Secret::from_seed(seed);
    let publics = decode_publics(validator_keys)?;
    let params = ring_params(publics.len());
    let input = Input::new(&[entry_index]).ok_or(CryptoError::InvalidInput("entry index".into()))?;
    let output = secret.output(input);
    let prover_key = params
        .prover_key(&publics, prover_index)
        .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
    let proof = ring::Prover::prove(&secret, input, &[], &prover_key)
        .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
    let mut proof_bytes = Vec::new();
    proof
        .serialize_compressed(&mut proof_bytes)
        .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
    let mut ticket_id = [0u8; 32];
    output
        .hash()
        .serialize_compressed(&mut ticket_id[..])
        .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
    Ok((ticket_id, proof_bytes))
}

/// Verifies a ticket proof against a committed ring, returning the ticket id
/// (the VRF output hash) on success.
pub fn verify_ticket(
    ring_commitment: &RingCommitment,
    entry_index: u8,
    proof_bytes: &[u8],
) -> Result<[u8; 32], CryptoError> {
    let commitment =
        ring::VerifierKey::<BandersnatchSha512Ell2>::deserialize_compressed(&ring_commitment[..])
            .map_err(|_| CryptoError::InvalidRingProof)?;
    let input = Input::new(&[entry_index]).ok_or(CryptoError::InvalidInput("entry index".into()))?;
    let proof = ring::Proof::<BandersnatchSha512Ell2>::deserialize_compressed(proof_bytes)
        .map_err(|_| CryptoError::InvalidRingProof)?;
    let output = ring::Verifier::verify(&commitment, input, &[], &proof)
        .map_err(|_| CryptoError::InvalidRingProof)?;
    let mut ticket_id = [0u8; 32];
    output
        .hash()
        .serialize_compressed(&mut ticket_id[..])
        .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
    Ok(ticket_id)
}

/// Signs the fallback seal: a plain (non-anonymous) IETF VRF proof over the
/// slot's seal context, used when the ticket lottery produced no winner.
pub fn sign_fallback_seal(seed: &[u8; 32], context: &[u8]) -> Result<([u8; 32], Vec<u8>), CryptoError> {
    let secret = Secret::from_seed(seed);
    let input = Input::new(context).ok_or(CryptoError::InvalidInput("seal context".into()))?;
    let output = secret.output(input);
    let proof = ietf::Prover::prove(&secret, input, output);
    let mut proof_bytes = Vec::new();
    proof
        .serialize_compressed(&mut proof_bytes)
        .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
    let mut out = [0u8; 32];
    output
        .hash()
        .serialize_compressed(&mut out[..])
        .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
    Ok((out, proof_bytes))
}

/// Verifies a fallback seal's IETF VRF proof, returning the VRF output on success.
pub fn verify_fallback_seal(
    public_key: &[u8; 32],
    context: &[u8],
    proof_bytes: &[u8],
) -> Result<[u8; 32], CryptoError> {
    let public = decode_public(public_key)?;
    let input = Input::new(context).ok_or(CryptoError::InvalidInput("seal context".into()))?;
    let proof = ietf::Proof::<BandersnatchSha512Ell2>::deserialize_compressed(proof_bytes)
        .map_err(|_| CryptoError::InvalidSignature("malformed VRF proof".into()))?;
    let output =
        ietf::Verifier::verify(&public, input, &proof).map_err(|_| CryptoError::VerificationFailed)?;
    let mut out = [0u8; 32];
    output
        .hash()
        .serialize_compressed(&mut out[..])
        .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
    Ok(out)
}
