// Path: crates/jam-types/src/codec_impl.rs
//! Canonical `Encode`/`Decode` implementations for the schema types, built
//! from the C1 codec's primitives (spec §4.1's schema summary table).

use crate::block::{Assurance, Block, Body, EpochMark, Guarantee, Header, Preimage, WinnersMark};
use crate::dispute::{Culprit, Dispute, Fault, Judgment, Verdict};
use crate::primitives::H32;
use crate::ticket::{Ticket, TicketProof};
use crate::validator::ValidatorKey;
use jam_codec::{
    decode_fixed, decode_option, decode_seq, decode_var_blob, encode_fixed, encode_option,
    encode_seq, encode_var_blob, Decode, Encode, Error,
};

impl Encode for H32 {
    fn encode(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl Decode for H32 {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (bytes, rest) = <[u8; 32]>::decode(input)?;
        Ok((H32(bytes), rest))
    }
}

impl Encode for Ticket {
    fn encode(&self) -> Vec<u8> {
        let mut out = self.id.encode();
        out.push(self.entry_index);
        out
    }
}

impl Decode for Ticket {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (id, rest) = H32::decode(input)?;
        let (entry_index, rest) = u8::decode(rest)?;
        Ok((Ticket { id, entry_index }, rest))
    }
}

impl Encode for TicketProof {
    fn encode(&self) -> Vec<u8> {
        let mut out = vec![self.entry_index];
        out.extend_from_slice(&encode_var_blob(&self.proof));
        out
    }
}

impl Decode for TicketProof {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (entry_index, rest) = u8::decode(input)?;
        let (proof, rest) = decode_var_blob(rest)?;
        Ok((TicketProof { entry_index, proof }, rest))
    }
}

impl Encode for Judgment {
    fn encode(&self) -> Vec<u8> {
        let mut out = self.vote.encode();
        out.extend_from_slice(&encode_fixed(u64::from(self.index), 4));
        out.extend_from_slice(&self.signature);
        out
    }
}

impl Decode for Judgment {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (vote, rest) = bool::decode(input)?;
        let (index, rest) = decode_fixed(rest, 4)?;
        let (signature, rest) = <[u8; 64]>::decode(rest)?;
        Ok((
            Judgment { vote, index: index as u32, signature },
            rest,
        ))
    }
}

impl Encode for Verdict {
    fn encode(&self) -> Vec<u8> {
        let mut out = self.target.encode();
        out.extend_from_slice(&encode_fixed(u64::from(self.age), 4));
        out.extend_from_slice(&encode_seq(&self.votes, Encode::encode));
        out
    }
}

impl Decode for Verdict {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (target, rest) = H32::decode(input)?;
        let (age, rest) = decode_fixed(rest, 4)?;
        let (votes, rest) = decode_seq(rest, Judgment::decode)?;
        Ok((
            Verdict { target, age: age as u32, votes },
            rest,
        ))
    }
}

impl Encode for Culprit {
    fn encode(&self) -> Vec<u8> {
        let mut out = self.target.encode();
        out.extend_from_slice(&self.key);
        out.extend_from_slice(&self.signature);
        out
    }
}

impl Decode for Culprit {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (target, rest) = H32::decode(input)?;
        let (key, rest) = <[u8; 32]>::decode(rest)?;
        let (signature, rest) = <[u8; 64]>::decode(rest)?;
        Ok((Culprit { target, key, signature }, rest))
    }
}

impl Encode for Fault {
    fn encode(&self) -> Vec<u8> {
        let mut out = self.target.encode();
        out.extend_from_slice(&self.vote.encode());
        out.extend_from_slice(&self.key);
        out.extend_from_slice(&self.signature);
        out
    }
}

impl Decode for Fault {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (target, rest) = H32::decode(input)?;
        let (vote, rest) = bool::decode(rest)?;
        let (key, rest) = <[u8; 32]>::decode(rest)?;
        let (signature, rest) = <[u8; 64]>::decode(rest)?;
        Ok((
            Fault { target, vote, key, signature },
            rest,
        ))
    }
}

impl Encode for Dispute {
    fn encode(&self) -> Vec<u8> {
        let mut out = encode_seq(&self.verdicts, Encode::encode);
        out.extend_from_slice(&encode_seq(&self.culprits, Encode::encode));
        out.extend_from_slice(&encode_seq(&self.faults, Encode::encode));
        out
    }
}

impl Decode for Dispute {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (verdicts, rest) = decode_seq(input, Verdict::decode)?;
        let (culprits, rest) = decode_seq(rest, Culprit::decode)?;
        let (faults, rest) = decode_seq(rest, Fault::decode)?;
        Ok((
            Dispute { verdicts, culprits, faults },
            rest,
        ))
    }
}

impl Encode for ValidatorKey {
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(32 + 32 + 144 + 128);
        out.extend_from_slice(&self.bandersnatch);
        out.extend_from_slice(&self.ed25519);
        out.extend_from_slice(&self.bls);
        out.extend_from_slice(&self.metadata);
        out
    }
}

impl Decode for ValidatorKey {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (bandersnatch, rest) = <[u8; 32]>::decode(input)?;
        let (ed25519, rest) = <[u8; 32]>::decode(rest)?;
        let (bls, rest) = <[u8; 144]>::decode(rest)?;
        let (metadata, rest) = <[u8; 128]>::decode(rest)?;
        Ok((
            ValidatorKey { bandersnatch, ed25519, bls, metadata },
            rest,
        ))
    }
}

impl Encode for EpochMark {
    fn encode(&self) -> Vec<u8> {
        let mut out = self.entropy.encode();
        out.extend_from_slice(&self.tickets_entropy.encode());
        out.extend_from_slice(&encode_seq(&self.validators, Encode::encode));
        out
    }
}

impl Decode for EpochMark {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (entropy, rest) = H32::decode(input)?;
        let (tickets_entropy, rest) = H32::decode(rest)?;
        let (validators, rest) = decode_seq(rest, ValidatorKey::decode)?;
        Ok((
            EpochMark { entropy, tickets_entropy, validators },
            rest,
        ))
    }
}

impl Encode for WinnersMark {
    fn encode(&self) -> Vec<u8> {
        encode_seq(&self.tickets, Encode::encode)
    }
}

impl Decode for WinnersMark {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (tickets, rest) = decode_seq(input, Ticket::decode)?;
        Ok((WinnersMark { tickets }, rest))
    }
}

impl Encode for Preimage {
    fn encode(&self) -> Vec<u8> {
        let mut out = encode_fixed(u64::from(self.service), 4);
        out.extend_from_slice(&encode_var_blob(&self.data));
        out
    }
}

impl Decode for Preimage {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (service, rest) = decode_fixed(input, 4)?;
        let (data, rest) = decode_var_blob(rest)?;
        Ok((
            Preimage { service: service as u32, data },
            rest,
        ))
    }
}

impl Encode for Guarantee {
    fn encode(&self) -> Vec<u8> {
        let mut out = encode_fixed(u64::from(self.core), 2);
        out.extend_from_slice(&encode_var_blob(&self.report));
        out.extend_from_slice(&encode_seq(&self.signatures, |(index, sig)| {
            let mut entry = encode_fixed(u64::from(*index), 4);
            entry.extend_from_slice(sig);
            entry
        }));
        out
    }
}

impl Decode for Guarantee {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (core, rest) = decode_fixed(input, 2)?;
        let (report, rest) = decode_var_blob(rest)?;
        let (signatures, rest) = decode_seq(rest, |i| {
            let (index, rest) = decode_fixed(i, 4)?;
            let (sig, rest) = <[u8; 64]>::decode(rest)?;
            Ok(((index as u32, sig), rest))
        })?;
        Ok((
            Guarantee { core: core as u16, report, signatures },
            rest,
        ))
    }
}

impl Encode for Assurance {
    fn encode(&self) -> Vec<u8> {
        let mut out = self.anchor.encode();
        out.extend_from_slice(&encode_var_blob(&self.bitfield));
        out.extend_from_slice(&encode_fixed(u64::from(self.validator_index), 4));
        out.extend_from_slice(&self.signature);
        out
    }
}

impl Decode for Assurance {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (anchor, rest) = H32::decode(input)?;
        let (bitfield, rest) = decode_var_blob(rest)?;
        let (validator_index, rest) = decode_fixed(rest, 4)?;
        let (signature, rest) = <[u8; 64]>::decode(rest)?;
        Ok((
            Assurance {
                anchor,
                bitfield,
                validator_index: validator_index as u32,
                signature,
            },
            rest,
        ))
    }
}

impl Encode for Header {
    fn encode(&self) -> Vec<u8> {
        let mut out = self.parent.encode();
        out.extend_from_slice(&self.prior_state_root.encode());
        out.extend_from_slice(&self.extrinsic_hash.encode());
        out.extend_from_slice(&encode_fixed(u64::from(self.timeslot), 4));
        out.extend_from_slice(&encode_option(&self.epoch_mark, Encode::encode));
        out.extend_from_slice(&encode_option(&self.winners_mark, Encode::encode));
        out.extend_from_slice(&encode_seq(&self.offenders_mark, Encode::encode));
        out.extend_from_slice(&encode_fixed(u64::from(self.author_index), 2));
        out.extend_from_slice(&self.vrf_sig);
        out.extend_from_slice(&self.seal_sig);
        out
    }
}

impl Decode for Header {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (parent, rest) = H32::decode(input)?;
        let (prior_state_root, rest) = H32::decode(rest)?;
        let (extrinsic_hash, rest) = H32::decode(rest)?;
        let (timeslot, rest) = decode_fixed(rest, 4)?;
        let (epoch_mark, rest) = decode_option(rest, EpochMark::decode)?;
        let (winners_mark, rest) = decode_option(rest, WinnersMark::decode)?;
        let (offenders_mark, rest) = decode_seq(rest, H32::decode)?;
        let (author_index, rest) = decode_fixed(rest, 2)?;
        let (vrf_sig, rest) = <[u8; 96]>::decode(rest)?;
        let (seal_sig, rest) = <[u8; 96]>::decode(rest)?;
        Ok((
            Header {
                parent,
                prior_state_root,
                extrinsic_hash,
                timeslot: timeslot as u32,
                epoch_mark,
                winners_mark,
                offenders_mark,
                author_index: author_index as u16,
                vrf_sig,
                seal_sig,
            },
            rest,
        ))
    }
}

impl Encode for Body {
    fn encode(&self) -> Vec<u8> {
        let mut out = encode_seq(&self.tickets, Encode::encode);
        out.extend_from_slice(&encode_seq(&self.preimages, Encode::encode));
        out.extend_from_slice(&encode_seq(&self.guarantees, Encode::encode));
        out.extend_from_slice(&encode_seq(&self.assurances, Encode::encode));
        out.extend_from_slice(&encode_seq(&self.disputes, Encode::encode));
        out
    }
}

impl Decode for Body {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (tickets, rest) = decode_seq(input, TicketProof::decode)?;
        let (preimages, rest) = decode_seq(rest, Preimage::decode)?;
        let (guarantees, rest) = decode_seq(rest, Guarantee::decode)?;
        let (assurances, rest) = decode_seq(rest, Assurance::decode)?;
        let (disputes, rest) = decode_seq(rest, Dispute::decode)?;
        Ok((
            Body { tickets, preimages, guarantees, assurances, disputes },
            rest,
        ))
    }
}

impl Body {
    /// The five extrinsic lanes, each independently Blake2b-hashed, then the
    /// resulting 5-element digest *sequence* is itself `encode`d (prepending
    /// `encode_nat(5)` per the `Seq<T>` rule) and hashed again, matching
    /// `header.extrinsicHash = Blake2b(encode(blakeMany(lanes)))` (spec §3,
    /// §4.1, §8 scenario S2). Omitting the length prefix here would silently
    /// diverge from every other JAM implementation's header hash.
    pub fn extrinsic_hash(&self) -> H32 {
        let tickets = encode_seq(&self.tickets, Encode::encode);
        let preimages = encode_seq(&self.preimages, Encode::encode);
        let guarantees = encode_seq(&self.guarantees, Encode::encode);
        let assurances = encode_seq(&self.assurances, Encode::encode);
        let disputes = encode_seq(&self.disputes, Encode::encode);
        let lanes: [&[u8]; 5] = [&tickets, &preimages, &guarantees, &assurances, &disputes];
        let digests = jam_crypto::blake_many(&lanes);
        let encoded_digests = encode_seq(&digests, |d| d.to_vec());
        H32(jam_crypto::blake2b_256(&encoded_digests))
    }
}

impl Encode for Block {
    fn encode(&self) -> Vec<u8> {
        let mut out = self.header.encode();
        out.extend_from_slice(&self.body.encode());
        out
    }
}

impl Decode for Block {
    fn decode(input: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (header, rest) = Header::decode(input)?;
        let (body, rest) = Body::decode(rest)?;
        Ok((Block { header, body }, rest))
    }
}
