#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented
    )
)]
//! Dispute batch validation (C3): verdict / culprit / fault checking and
//! offender-set accounting (spec §4.3).

mod context;

pub use context::DisputesContext;

use jam_types::dispute::{CONTEXT_GUARANTEE, CONTEXT_INVALID, CONTEXT_VALID};
use jam_types::{Culprit, Dispute, ErrorCode, Fault, Verdict};
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub use jam_types::error::DisputesError;

/// Validates one `Dispute` extrinsic batch against the supplied validator
/// context, returning the set of offender keys (culprits + faults) to
/// union into the Safrole offender set on success.
///
/// Processing is atomic (spec §4.3 "Failure policy: first-error-wins;
/// processing is rejected as a whole"): the first invalid verdict,
/// culprit, or fault aborts the whole batch and no partial offender delta
/// is returned.
pub fn validate_dispute(
    ctx: &DisputesContext<'_>,
    dispute: &Dispute,
) -> Result<BTreeSet<[u8; 32]>, DisputesError> {
    let span = tracing::span!(tracing::Level::DEBUG, "disputes");
    let _enter = span.enter();

    for verdict in &dispute.verdicts {
        validate_verdict(ctx, verdict)?;
    }

    let mut offenders = BTreeSet::new();
    for culprit in &dispute.culprits {
        validate_culprit(ctx, culprit)?;
        offenders.insert(culprit.key);
    }
    for fault in &dispute.faults {
        validate_fault(ctx, fault)?;
        offenders.insert(fault.key);
    }

    debug!(
        verdicts = dispute.verdicts.len(),
        culprits = dispute.culprits.len(),
        faults = dispute.faults.len(),
        offenders = offenders.len(),
        "dispute batch validated"
    );

    Ok(offenders)
}

fn validate_verdict(ctx: &DisputesContext<'_>, verdict: &Verdict) -> Result<(), DisputesError> {
    let selected = ctx.select_set(verdict.age)?;

    let required = ctx.supermajority_threshold(selected.len());
    if verdict.votes.len() < required {
        warn!(
            code = DisputesError::InsufficientVotes { found: 0, required: 0 }.code(),
            found = verdict.votes.len(),
            required,
            "verdict below supermajority threshold"
        );
        return Err(DisputesError::InsufficientVotes {
            found: verdict.votes.len(),
            required,
        });
    }

    for judgment in &verdict.votes {
        let key = selected
            .get(judgment.index)
            .ok_or(DisputesError::BadJudgementKey { index: judgment.index })?;
        let context = if judgment.vote { CONTEXT_VALID } else { CONTEXT_INVALID };
        let mut message = Vec::with_capacity(context.len() + 32);
        message.extend_from_slice(context);
        message.extend_from_slice(verdict.target.as_bytes());
        jam_crypto::ed25519::verify(&key.ed25519, &message, &judgment.signature)
            .map_err(|_| DisputesError::BadSignature)?;
    }

    Ok(())
}

fn validate_culprit(ctx: &DisputesContext<'_>, culprit: &Culprit) -> Result<(), DisputesError> {
    if !ctx.is_eligible_guarantor(&culprit.key) {
        return Err(DisputesError::BadGuarantorKey);
    }
    let mut message = Vec::with_capacity(CONTEXT_GUARANTEE.len() + 32);
    message.extend_from_slice(CONTEXT_GUARANTEE);
    message.extend_from_slice(culprit.target.as_bytes());
    jam_crypto::ed25519::verify(&culprit.key, &message, &culprit.signature)
        .map_err(|_| DisputesError::BadSignature)
}

fn validate_fault(ctx: &DisputesContext<'_>, fault: &Fault) -> Result<(), DisputesError> {
    if !ctx.is_eligible_guarantor(&fault.key) {
        return Err(DisputesError::BadAuditorKey);
    }
    let context = if fault.vote { CONTEXT_VALID } else { CONTEXT_INVALID };
    let mut message = Vec::with_capacity(context.len() + 32);
    message.extend_from_slice(context);
    message.extend_from_slice(fault.target.as_bytes());
    jam_crypto::ed25519::verify(&fault.key, &message, &fault.signature)
        .map_err(|_| DisputesError::BadSignature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jam_crypto::ed25519::Ed25519KeyPair;
    use jam_types::{Judgment, ValidatorKey, ValidatorSet, H32};
    use std::collections::BTreeSet as Set;

    fn validator_set_from_seeds(seeds: &[[u8; 32]]) -> (ValidatorSet, Vec<Ed25519KeyPair>) {
        let pairs: Vec<Ed25519KeyPair> = seeds
            .iter()
            .map(|s| Ed25519KeyPair::from_seed(s).expect("key pair"))
            .collect();
        let validators = pairs
            .iter()
            .map(|p| ValidatorKey {
                bandersnatch: [0u8; 32],
                ed25519: p.public_key_bytes(),
                bls: [0u8; 144],
                metadata: [0u8; 128],
            })
            .collect();
        (ValidatorSet::padded(validators, seeds.len()), pairs)
    }

    #[test]
    fn verdict_with_supermajority_and_valid_signatures_passes() {
        let seeds: Vec<[u8; 32]> = (0..5u8).map(|i| [i; 32]).collect();
        let (active, pairs) = validator_set_from_seeds(&seeds);
        let previous = active.clone();
        let offenders: Set<[u8; 32]> = Set::new();
        let ctx = DisputesContext {
            active: &active,
            previous: &previous,
            offenders: &offenders,
            current_epoch: 3,
        };

        let target = H32([0xdd; 32]);
        let mut votes = Vec::new();
        for (index, pair) in pairs.iter().enumerate() {
            let mut message = CONTEXT_VALID.to_vec();
            message.extend_from_slice(target.as_bytes());
            let signature = pair.sign(&message).expect("sign");
            votes.push(Judgment { vote: true, index: index as u32, signature });
        }
        let verdict = Verdict { target, age: 3, votes };
        assert!(validate_verdict(&ctx, &verdict).is_ok());
    }

    #[test]
    fn verdict_below_supermajority_is_rejected() {
        let seeds: Vec<[u8; 32]> = (0..5u8).map(|i| [i; 32]).collect();
        let (active, pairs) = validator_set_from_seeds(&seeds);
        let previous = active.clone();
        let offenders: Set<[u8; 32]> = Set::new();
        let ctx = DisputesContext {
            active: &active,
            previous: &previous,
            offenders: &offenders,
            current_epoch: 3,
        };

        let target = H32([0xdd; 32]);
        let mut message = CONTEXT_VALID.to_vec();
        message.extend_from_slice(target.as_bytes());
        let signature = pairs[0].sign(&message).expect("sign");
        let verdict = Verdict {
            target,
            age: 3,
            votes: vec![Judgment { vote: true, index: 0, signature }],
        };
        assert_eq!(
            validate_verdict(&ctx, &verdict),
            Err(DisputesError::InsufficientVotes { found: 1, required: 4 })
        );
    }

    #[test]
    fn verdict_with_bad_age_is_rejected() {
        let seeds: Vec<[u8; 32]> = (0..5u8).map(|i| [i; 32]).collect();
        let (active, _pairs) = validator_set_from_seeds(&seeds);
        let previous = active.clone();
        let offenders: Set<[u8; 32]> = Set::new();
        let ctx = DisputesContext {
            active: &active,
            previous: &previous,
            offenders: &offenders,
            current_epoch: 3,
        };
        let verdict = Verdict { target: H32::zero(), age: 1, votes: vec![] };
        assert_eq!(validate_verdict(&ctx, &verdict), Err(DisputesError::BadJudgementAge { age: 1 }));
    }

    #[test]
    fn culprit_from_non_member_key_is_rejected() {
        let seeds: Vec<[u8; 32]> = (0..5u8).map(|i| [i; 32]).collect();
        let (active, _pairs) = validator_set_from_seeds(&seeds);
        let previous = active.clone();
        let offenders: Set<[u8; 32]> = Set::new();
        let ctx = DisputesContext {
            active: &active,
            previous: &previous,
            offenders: &offenders,
            current_epoch: 3,
        };
        let stranger = Ed25519KeyPair::from_seed(&[99u8; 32]).expect("key pair");
        let target = H32([0x11; 32]);
        let mut message = CONTEXT_GUARANTEE.to_vec();
        message.extend_from_slice(target.as_bytes());
        let signature = stranger.sign(&message).expect("sign");
        let culprit = Culprit { target, key: stranger.public_key_bytes(), signature };
        assert_eq!(validate_culprit(&ctx, &culprit), Err(DisputesError::BadGuarantorKey));
    }

    #[test]
    fn offender_excluded_key_is_rejected_as_culprit() {
        let seeds: Vec<[u8; 32]> = (0..5u8).map(|i| [i; 32]).collect();
        let (active, pairs) = validator_set_from_seeds(&seeds);
        let previous = active.clone();
        let mut offenders: Set<[u8; 32]> = Set::new();
        offenders.insert(pairs[0].public_key_bytes());
        let ctx = DisputesContext {
            active: &active,
            previous: &previous,
            offenders: &offenders,
            current_epoch: 3,
        };
        let target = H32([0x22; 32]);
        let mut message = CONTEXT_GUARANTEE.to_vec();
        message.extend_from_slice(target.as_bytes());
        let signature = pairs[0].sign(&message).expect("sign");
        let culprit = Culprit { target, key: pairs[0].public_key_bytes(), signature };
        assert_eq!(validate_culprit(&ctx, &culprit), Err(DisputesError::BadGuarantorKey));
    }

    #[test]
    fn full_dispute_batch_unions_culprit_and_fault_offenders() {
        let seeds: Vec<[u8; 32]> = (0..5u8).map(|i| [i; 32]).collect();
        let (active, pairs) = validator_set_from_seeds(&seeds);
        let previous = active.clone();
        let offenders: Set<[u8; 32]> = Set::new();
        let ctx = DisputesContext {
            active: &active,
            previous: &previous,
            offenders: &offenders,
            current_epoch: 3,
        };

        let target = H32([0x33; 32]);
        let mut guarantee_msg = CONTEXT_GUARANTEE.to_vec();
        guarantee_msg.extend_from_slice(target.as_bytes());
        let culprit = Culprit {
            target,
            key: pairs[1].public_key_bytes(),
            signature: pairs[1].sign(&guarantee_msg).expect("sign"),
        };

        let mut invalid_msg = CONTEXT_INVALID.to_vec();
        invalid_msg.extend_from_slice(target.as_bytes());
        let fault = Fault {
            target,
            vote: false,
            key: pairs[2].public_key_bytes(),
            signature: pairs[2].sign(&invalid_msg).expect("sign"),
        };

        let dispute = Dispute { verdicts: vec![], culprits: vec![culprit], faults: vec![fault] };
        let result = validate_dispute(&ctx, &dispute).expect("dispute validates");
        assert_eq!(result.len(), 2);
        assert!(result.contains(&pairs[1].public_key_bytes()));
        assert!(result.contains(&pairs[2].public_key_bytes()));
    }
}
