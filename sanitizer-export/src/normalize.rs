use crate::{CollectionType, Era};
use sanitizer_codec::utils::{MaybeIndefArray, Set};
use sanitizer_primitives::{Certificate, Redeemer, Redeemers, TransactionBody, Tx, WitnessSet};
use std::fmt;
use tracing::debug;

/// Something the sanitizer changed or flagged while fitting a transaction to
/// the target era. Notes are informational; they never abort an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    DroppedBodyField {
        key: u64,
        name: &'static str,
        era: Era,
    },
    RedeemersListified,
    RedeemersNotSetFramed,
    ForeignCertificate {
        index: usize,
        era: Era,
    },
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::DroppedBodyField { key, name, era } => {
                write!(f, "dropped body field {name} (key {key}): not defined in {era}")
            }
            Note::RedeemersListified => {
                f.write_str("rewrote map-form redeemers as a list for Babbage")
            }
            Note::RedeemersNotSetFramed => {
                f.write_str("left redeemers unwrapped: the era CDDL does not frame them as a set")
            }
            Note::ForeignCertificate { index, era } => {
                write!(f, "certificate at index {index} is not defined in {era}; kept as-is")
            }
        }
    }
}

/// Rewrites a transaction for the target era.
///
/// Body fields foreign to the era are dropped, map-form redeemers become a
/// list when targeting Babbage, and every set-like collection is re-framed
/// according to the era CDDL or the caller's override. The input transaction
/// is left untouched; changes are reported alongside the result.
pub fn sanitize(tx: &Tx, era: Era, collections: CollectionType) -> (Tx, Vec<Note>) {
    let mut tx = tx.clone();
    let mut notes = Vec::new();

    strip_foreign_fields(&mut tx, era, &mut notes);
    apply_framing(&mut tx, era, collections, &mut notes);

    debug!(%era, ?collections, notes = notes.len(), "normalized transaction");

    (tx, notes)
}

fn strip_foreign_fields(tx: &mut Tx, era: Era, notes: &mut Vec<Note>) {
    let body = &mut tx.transaction_body;

    match era {
        Era::Babbage => {
            if body.voting_procedures.take().is_some() {
                notes.push(Note::DroppedBodyField {
                    key: 19,
                    name: "voting_procedures",
                    era,
                });
            }
            if body.proposal_procedures.take().is_some() {
                notes.push(Note::DroppedBodyField {
                    key: 20,
                    name: "proposal_procedures",
                    era,
                });
            }
            if body.treasury_value.take().is_some() {
                notes.push(Note::DroppedBodyField {
                    key: 21,
                    name: "treasury_value",
                    era,
                });
            }
            if body.donation.take().is_some() {
                notes.push(Note::DroppedBodyField {
                    key: 22,
                    name: "donation",
                    era,
                });
            }

            if let Some(redeemer) = tx.transaction_witness_set.redeemer.take() {
                tx.transaction_witness_set.redeemer =
                    Some(listify_redeemers(redeemer, notes));
            }
        }
        Era::Conway => {
            if body.update.take().is_some() {
                notes.push(Note::DroppedBodyField {
                    key: 6,
                    name: "update",
                    era,
                });
            }
        }
    }

    if let Some(certificates) = &tx.transaction_body.certificates {
        for (index, certificate) in certificates.iter().enumerate() {
            if certificate_foreign_to(certificate, era) {
                notes.push(Note::ForeignCertificate { index, era });
            }
        }
    }
}

fn listify_redeemers(redeemer: Redeemers, notes: &mut Vec<Note>) -> Redeemers {
    match redeemer {
        Redeemers::Map(entries) => {
            notes.push(Note::RedeemersListified);

            let items = entries
                .to_vec()
                .into_iter()
                .map(|(key, value)| Redeemer {
                    tag: key.tag,
                    index: key.index,
                    data: value.data,
                    ex_units: value.ex_units,
                })
                .collect::<Vec<_>>();

            Redeemers::List(MaybeIndefArray::Def(items))
        }
        list => list,
    }
}

fn certificate_foreign_to(certificate: &Certificate, era: Era) -> bool {
    match era {
        // variants 7 and above only exist from Conway on
        Era::Babbage => matches!(
            certificate,
            Certificate::Reg(..)
                | Certificate::UnReg(..)
                | Certificate::VoteDeleg(..)
                | Certificate::StakeVoteDeleg(..)
                | Certificate::StakeRegDeleg(..)
                | Certificate::VoteRegDeleg(..)
                | Certificate::StakeVoteRegDeleg(..)
                | Certificate::AuthCommitteeHot(..)
                | Certificate::ResignCommitteeCold(..)
                | Certificate::RegDRepCert(..)
                | Certificate::UnRegDRepCert(..)
                | Certificate::UpdateDRepCert(..)
        ),
        // variants 5 and 6 were retired by Conway
        Era::Conway => matches!(
            certificate,
            Certificate::GenesisKeyDelegation(..) | Certificate::MoveInstantaneousRewardsCert(..)
        ),
    }
}

fn apply_framing(tx: &mut Tx, era: Era, collections: CollectionType, notes: &mut Vec<Note>) {
    // Input-like fields and pool owners default to tag-258 sets in both eras;
    // certificates and witness collections only do so from Conway on.
    let set_like = !matches!(collections, CollectionType::List);
    let era_gated = match collections {
        CollectionType::Default => era == Era::Conway,
        CollectionType::List => false,
        CollectionType::Set => true,
    };

    frame_body(&mut tx.transaction_body, set_like, era_gated);
    frame_witness_set(&mut tx.transaction_witness_set, era_gated);

    // redeemers are a list or a map in every era, so the set framing that
    // covers the other witness collections never touches them
    if era_gated && tx.transaction_witness_set.redeemer.is_some() {
        notes.push(Note::RedeemersNotSetFramed);
    }
}

fn frame_body(body: &mut TransactionBody, set_like: bool, era_gated: bool) {
    body.inputs = body.inputs.clone().with_tag(set_like);
    body.collateral = body.collateral.take().map(|x| x.with_tag(set_like));
    body.required_signers = body.required_signers.take().map(|x| x.with_tag(set_like));
    body.reference_inputs = body.reference_inputs.take().map(|x| x.with_tag(set_like));
    body.proposal_procedures = body.proposal_procedures.take().map(|x| x.with_tag(set_like));

    if let Some(certificates) = body.certificates.take() {
        let items = certificates
            .to_vec()
            .into_iter()
            .map(|c| frame_pool_owners(c, set_like))
            .collect::<Vec<_>>();

        body.certificates = Some(Set::from(items).with_tag(era_gated));
    }
}

fn frame_pool_owners(certificate: Certificate, set_like: bool) -> Certificate {
    match certificate {
        Certificate::PoolRegistration {
            operator,
            vrf_keyhash,
            pledge,
            cost,
            margin,
            reward_account,
            pool_owners,
            relays,
            pool_metadata,
        } => Certificate::PoolRegistration {
            operator,
            vrf_keyhash,
            pledge,
            cost,
            margin,
            reward_account,
            pool_owners: pool_owners.with_tag(set_like),
            relays,
            pool_metadata,
        },
        other => other,
    }
}

fn frame_witness_set(witness_set: &mut WitnessSet, era_gated: bool) {
    witness_set.vkeywitness = witness_set.vkeywitness.take().map(|x| x.with_tag(era_gated));
    witness_set.native_script = witness_set
        .native_script
        .take()
        .map(|x| x.with_tag(era_gated));
    witness_set.bootstrap_witness = witness_set
        .bootstrap_witness
        .take()
        .map(|x| x.with_tag(era_gated));
    witness_set.plutus_v1_script = witness_set
        .plutus_v1_script
        .take()
        .map(|x| x.with_tag(era_gated));
    witness_set.plutus_data = witness_set.plutus_data.take().map(|x| x.with_tag(era_gated));
    witness_set.plutus_v2_script = witness_set
        .plutus_v2_script
        .take()
        .map(|x| x.with_tag(era_gated));
    witness_set.plutus_v3_script = witness_set
        .plutus_v3_script
        .take()
        .map(|x| x.with_tag(era_gated));
}
