//! Era-superset transaction model and cbor codec.
//!
//! Handcrafted, idiomatic rust artifacts based on the Babbage and Conway CDDL
//! files in the IntersectMBO cardano-ledger repo. A single model covers both
//! eras: the body keeps every field either era defines, and collections decode
//! through [`Set`] so the original wire framing (plain array vs tag-258 set)
//! survives a round trip.

use serde::{Deserialize, Serialize};

use sanitizer_codec::codec_by_datatype;
use sanitizer_codec::minicbor::{self, data::Tag, Decode, Encode};
use sanitizer_codec::utils::{Bytes, CborWrap, KeyValuePairs, MaybeIndefArray, NonEmptySet, Nullable, Set};

use std::collections::HashSet;

use crate::{
    AddrKeyhash, AssetName, Coin, CostModel, DatumHash, Epoch, ExUnitPrices, ExUnits,
    GenesisDelegateHash, Genesishash, Hash, Metadata, NetworkId, Nonce, PlutusData, PlutusScript,
    PolicyId, PoolKeyhash, PoolMetadata, ProtocolVersion, RationalNumber, Relay, RewardAccount,
    ScriptHash, StakeCredential, TransactionInput, UnitInterval, VrfKeyhash,
};

pub type Multiasset<A> = KeyValuePairs<PolicyId, KeyValuePairs<AssetName, A>>;

pub type Mint = Multiasset<i64>;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum Value {
    Coin(Coin),
    Multiasset(Coin, Multiasset<Coin>),
}

codec_by_datatype! {
    Value,
    U8 | U16 | U32 | U64 => Coin,
    (coin, multiasset => Multiasset)
}

pub type Withdrawals = KeyValuePairs<RewardAccount, Coin>;

pub type RequiredSigners = NonEmptySet<AddrKeyhash>;

/* move_instantaneous_reward = [ 0 / 1, { * stake_credential => delta_coin } / coin ]
; The first field determines where the funds are drawn from.
; 0 denotes the reserves, 1 denotes the treasury.
; If the second field is a map, funds are moved to stake credentials,
; otherwise the funds are given to the other accounting pot.
 */

#[derive(Encode, Decode, Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[cbor(index_only)]
pub enum InstantaneousRewardSource {
    #[n(0)]
    Reserves,
    #[n(1)]
    Treasury,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum InstantaneousRewardTarget {
    StakeCredentials(KeyValuePairs<StakeCredential, i64>),
    OtherAccountingPot(Coin),
}

codec_by_datatype! {
    InstantaneousRewardTarget,
    Map | MapIndef => StakeCredentials,
    U8 | U16 | U32 | U64 => OtherAccountingPot,
    ()
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct MoveInstantaneousReward {
    #[n(0)]
    pub source: InstantaneousRewardSource,

    #[n(1)]
    pub target: InstantaneousRewardTarget,
}

pub type DRepCredential = StakeCredential;

pub type CommitteeColdCredential = StakeCredential;

pub type CommitteeHotCredential = StakeCredential;

#[derive(Serialize, Deserialize, Debug, PartialEq, PartialOrd, Eq, Ord, Clone)]
pub enum DRep {
    Key(AddrKeyhash),
    Script(ScriptHash),
    Abstain,
    NoConfidence,
}

impl<'b, C> Decode<'b, C> for DRep {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        d.array()?;

        match d.u16()? {
            0 => Ok(DRep::Key(d.decode_with(ctx)?)),
            1 => Ok(DRep::Script(d.decode_with(ctx)?)),
            2 => Ok(DRep::Abstain),
            3 => Ok(DRep::NoConfidence),
            _ => Err(minicbor::decode::Error::message(
                "invalid variant id for DRep",
            )),
        }
    }
}

impl<C> Encode<C> for DRep {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            DRep::Key(x) => {
                e.array(2)?;
                e.u16(0)?;
                e.encode_with(x, ctx)?;
            }
            DRep::Script(x) => {
                e.array(2)?;
                e.u16(1)?;
                e.encode_with(x, ctx)?;
            }
            DRep::Abstain => {
                e.array(1)?;
                e.u16(2)?;
            }
            DRep::NoConfidence => {
                e.array(1)?;
                e.u16(3)?;
            }
        }

        Ok(())
    }
}

/// The union of Babbage and Conway certificates.
///
/// Variants 5 and 6 only exist up to Babbage, variants 7 and above only exist
/// from Conway on. Era-specific filtering happens at re-encode time, not here.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum Certificate {
    StakeRegistration(StakeCredential),
    StakeDeregistration(StakeCredential),
    StakeDelegation(StakeCredential, PoolKeyhash),
    PoolRegistration {
        operator: PoolKeyhash,
        vrf_keyhash: VrfKeyhash,
        pledge: Coin,
        cost: Coin,
        margin: UnitInterval,
        reward_account: RewardAccount,
        pool_owners: Set<AddrKeyhash>,
        relays: Vec<Relay>,
        pool_metadata: Option<PoolMetadata>,
    },
    PoolRetirement(PoolKeyhash, Epoch),
    GenesisKeyDelegation(Genesishash, GenesisDelegateHash, VrfKeyhash),
    MoveInstantaneousRewardsCert(MoveInstantaneousReward),
    Reg(StakeCredential, Coin),
    UnReg(StakeCredential, Coin),
    VoteDeleg(StakeCredential, DRep),
    StakeVoteDeleg(StakeCredential, PoolKeyhash, DRep),
    StakeRegDeleg(StakeCredential, PoolKeyhash, Coin),
    VoteRegDeleg(StakeCredential, DRep, Coin),
    StakeVoteRegDeleg(StakeCredential, PoolKeyhash, DRep, Coin),
    AuthCommitteeHot(CommitteeColdCredential, CommitteeHotCredential),
    ResignCommitteeCold(CommitteeColdCredential, Option<Anchor>),
    RegDRepCert(DRepCredential, Coin, Option<Anchor>),
    UnRegDRepCert(DRepCredential, Coin),
    UpdateDRepCert(DRepCredential, Option<Anchor>),
}

impl<'b, C> Decode<'b, C> for Certificate {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        d.array()?;

        match d.u16()? {
            0 => Ok(Certificate::StakeRegistration(d.decode_with(ctx)?)),
            1 => Ok(Certificate::StakeDeregistration(d.decode_with(ctx)?)),
            2 => Ok(Certificate::StakeDelegation(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            3 => Ok(Certificate::PoolRegistration {
                operator: d.decode_with(ctx)?,
                vrf_keyhash: d.decode_with(ctx)?,
                pledge: d.decode_with(ctx)?,
                cost: d.decode_with(ctx)?,
                margin: d.decode_with(ctx)?,
                reward_account: d.decode_with(ctx)?,
                pool_owners: d.decode_with(ctx)?,
                relays: d.decode_with(ctx)?,
                pool_metadata: d.decode_with(ctx)?,
            }),
            4 => Ok(Certificate::PoolRetirement(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            5 => Ok(Certificate::GenesisKeyDelegation(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            6 => Ok(Certificate::MoveInstantaneousRewardsCert(
                d.decode_with(ctx)?,
            )),
            7 => Ok(Certificate::Reg(d.decode_with(ctx)?, d.decode_with(ctx)?)),
            8 => Ok(Certificate::UnReg(d.decode_with(ctx)?, d.decode_with(ctx)?)),
            9 => Ok(Certificate::VoteDeleg(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            10 => Ok(Certificate::StakeVoteDeleg(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            11 => Ok(Certificate::StakeRegDeleg(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            12 => Ok(Certificate::VoteRegDeleg(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            13 => Ok(Certificate::StakeVoteRegDeleg(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            14 => Ok(Certificate::AuthCommitteeHot(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            15 => Ok(Certificate::ResignCommitteeCold(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            16 => Ok(Certificate::RegDRepCert(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            17 => Ok(Certificate::UnRegDRepCert(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            18 => Ok(Certificate::UpdateDRepCert(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            _ => Err(minicbor::decode::Error::message(
                "invalid variant id for Certificate",
            )),
        }
    }
}

impl<C> Encode<C> for Certificate {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            Certificate::StakeRegistration(a) => {
                e.array(2)?;
                e.u16(0)?;
                e.encode_with(a, ctx)?;
            }
            Certificate::StakeDeregistration(a) => {
                e.array(2)?;
                e.u16(1)?;
                e.encode_with(a, ctx)?;
            }
            Certificate::StakeDelegation(a, b) => {
                e.array(3)?;
                e.u16(2)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
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
            } => {
                e.array(10)?;
                e.u16(3)?;
                e.encode_with(operator, ctx)?;
                e.encode_with(vrf_keyhash, ctx)?;
                e.encode_with(pledge, ctx)?;
                e.encode_with(cost, ctx)?;
                e.encode_with(margin, ctx)?;
                e.encode_with(reward_account, ctx)?;
                e.encode_with(pool_owners, ctx)?;
                e.encode_with(relays, ctx)?;
                e.encode_with(pool_metadata, ctx)?;
            }
            Certificate::PoolRetirement(a, b) => {
                e.array(3)?;
                e.u16(4)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
            Certificate::GenesisKeyDelegation(a, b, c) => {
                e.array(4)?;
                e.u16(5)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
                e.encode_with(c, ctx)?;
            }
            Certificate::MoveInstantaneousRewardsCert(a) => {
                e.array(2)?;
                e.u16(6)?;
                e.encode_with(a, ctx)?;
            }
            Certificate::Reg(a, b) => {
                e.array(3)?;
                e.u16(7)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
            Certificate::UnReg(a, b) => {
                e.array(3)?;
                e.u16(8)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
            Certificate::VoteDeleg(a, b) => {
                e.array(3)?;
                e.u16(9)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
            Certificate::StakeVoteDeleg(a, b, c) => {
                e.array(4)?;
                e.u16(10)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
                e.encode_with(c, ctx)?;
            }
            Certificate::StakeRegDeleg(a, b, c) => {
                e.array(4)?;
                e.u16(11)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
                e.encode_with(c, ctx)?;
            }
            Certificate::VoteRegDeleg(a, b, c) => {
                e.array(4)?;
                e.u16(12)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
                e.encode_with(c, ctx)?;
            }
            Certificate::StakeVoteRegDeleg(a, b, c, x) => {
                e.array(5)?;
                e.u16(13)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
                e.encode_with(c, ctx)?;
                e.encode_with(x, ctx)?;
            }
            Certificate::AuthCommitteeHot(a, b) => {
                e.array(3)?;
                e.u16(14)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
            Certificate::ResignCommitteeCold(a, b) => {
                e.array(3)?;
                e.u16(15)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
            Certificate::RegDRepCert(a, b, c) => {
                e.array(4)?;
                e.u16(16)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
                e.encode_with(c, ctx)?;
            }
            Certificate::UnRegDRepCert(a, b) => {
                e.array(3)?;
                e.u16(17)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
            Certificate::UpdateDRepCert(a, b) => {
                e.array(3)?;
                e.u16(18)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
        }

        Ok(())
    }
}

pub type CostModels = KeyValuePairs<u64, CostModel>;

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct PoolVotingThresholds {
    #[n(0)]
    pub motion_no_confidence: UnitInterval,
    #[n(1)]
    pub committee_normal: UnitInterval,
    #[n(2)]
    pub committee_no_confidence: UnitInterval,
    #[n(3)]
    pub hard_fork_initiation: UnitInterval,
    #[n(4)]
    pub security_voting_threshold: UnitInterval,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct DRepVotingThresholds {
    #[n(0)]
    pub motion_no_confidence: UnitInterval,
    #[n(1)]
    pub committee_normal: UnitInterval,
    #[n(2)]
    pub committee_no_confidence: UnitInterval,
    #[n(3)]
    pub update_constitution: UnitInterval,
    #[n(4)]
    pub hard_fork_initiation: UnitInterval,
    #[n(5)]
    pub pp_network_group: UnitInterval,
    #[n(6)]
    pub pp_economic_group: UnitInterval,
    #[n(7)]
    pub pp_technical_group: UnitInterval,
    #[n(8)]
    pub pp_governance_group: UnitInterval,
    #[n(9)]
    pub treasury_withdrawal: UnitInterval,
}

/// Protocol parameter update as proposed through Conway governance actions.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
#[cbor(map)]
pub struct ProtocolParamUpdate {
    #[n(0)]
    pub minfee_a: Option<u64>,
    #[n(1)]
    pub minfee_b: Option<u64>,
    #[n(2)]
    pub max_block_body_size: Option<u64>,
    #[n(3)]
    pub max_transaction_size: Option<u64>,
    #[n(4)]
    pub max_block_header_size: Option<u64>,
    #[n(5)]
    pub key_deposit: Option<Coin>,
    #[n(6)]
    pub pool_deposit: Option<Coin>,
    #[n(7)]
    pub maximum_epoch: Option<Epoch>,
    #[n(8)]
    pub desired_number_of_stake_pools: Option<u64>,
    #[n(9)]
    pub pool_pledge_influence: Option<RationalNumber>,
    #[n(10)]
    pub expansion_rate: Option<UnitInterval>,
    #[n(11)]
    pub treasury_growth_rate: Option<UnitInterval>,

    #[n(16)]
    pub min_pool_cost: Option<Coin>,
    #[n(17)]
    pub ada_per_utxo_byte: Option<Coin>,
    #[n(18)]
    pub cost_models_for_script_languages: Option<CostModels>,
    #[n(19)]
    pub execution_costs: Option<ExUnitPrices>,
    #[n(20)]
    pub max_tx_ex_units: Option<ExUnits>,
    #[n(21)]
    pub max_block_ex_units: Option<ExUnits>,
    #[n(22)]
    pub max_value_size: Option<u64>,
    #[n(23)]
    pub collateral_percentage: Option<u64>,
    #[n(24)]
    pub max_collateral_inputs: Option<u64>,

    #[n(25)]
    pub pool_voting_thresholds: Option<PoolVotingThresholds>,
    #[n(26)]
    pub drep_voting_thresholds: Option<DRepVotingThresholds>,
    #[n(27)]
    pub min_committee_size: Option<u64>,
    #[n(28)]
    pub committee_term_limit: Option<Epoch>,
    #[n(29)]
    pub governance_action_validity_period: Option<Epoch>,
    #[n(30)]
    pub governance_action_deposit: Option<Coin>,
    #[n(31)]
    pub drep_deposit: Option<Coin>,
    #[n(32)]
    pub drep_inactivity_period: Option<Epoch>,
    #[n(33)]
    pub minfee_refscript_cost_per_byte: Option<UnitInterval>,
}

/// Protocol parameter update as carried by the pre-Conway `update` body field.
///
/// Keys 12 to 14 were dropped over the course of the Shelley to Babbage eras
/// but are kept optional here so older update payloads still decode.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
#[cbor(map)]
pub struct LegacyProtocolParamUpdate {
    #[n(0)]
    pub minfee_a: Option<u64>,
    #[n(1)]
    pub minfee_b: Option<u64>,
    #[n(2)]
    pub max_block_body_size: Option<u64>,
    #[n(3)]
    pub max_transaction_size: Option<u64>,
    #[n(4)]
    pub max_block_header_size: Option<u64>,
    #[n(5)]
    pub key_deposit: Option<Coin>,
    #[n(6)]
    pub pool_deposit: Option<Coin>,
    #[n(7)]
    pub maximum_epoch: Option<Epoch>,
    #[n(8)]
    pub desired_number_of_stake_pools: Option<u64>,
    #[n(9)]
    pub pool_pledge_influence: Option<RationalNumber>,
    #[n(10)]
    pub expansion_rate: Option<UnitInterval>,
    #[n(11)]
    pub treasury_growth_rate: Option<UnitInterval>,
    #[n(12)]
    pub decentralization_constant: Option<UnitInterval>,
    #[n(13)]
    pub extra_entropy: Option<Nonce>,
    #[n(14)]
    pub protocol_version: Option<ProtocolVersion>,
    #[n(16)]
    pub min_pool_cost: Option<Coin>,
    #[n(17)]
    pub ada_per_utxo_byte: Option<Coin>,
    #[n(18)]
    pub cost_models_for_script_languages: Option<CostModels>,
    #[n(19)]
    pub execution_costs: Option<ExUnitPrices>,
    #[n(20)]
    pub max_tx_ex_units: Option<ExUnits>,
    #[n(21)]
    pub max_block_ex_units: Option<ExUnits>,
    #[n(22)]
    pub max_value_size: Option<u64>,
    #[n(23)]
    pub collateral_percentage: Option<u64>,
    #[n(24)]
    pub max_collateral_inputs: Option<u64>,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct Update {
    #[n(0)]
    pub proposed_protocol_parameter_updates: KeyValuePairs<Genesishash, LegacyProtocolParamUpdate>,

    #[n(1)]
    pub epoch: Epoch,
}

#[derive(Encode, Decode, Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[cbor(index_only)]
pub enum Vote {
    #[n(0)]
    No,
    #[n(1)]
    Yes,
    #[n(2)]
    Abstain,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, PartialOrd, Eq, Ord, Clone)]
pub enum Voter {
    ConstitutionalCommitteeKey(AddrKeyhash),
    ConstitutionalCommitteeScript(ScriptHash),
    DRepKey(AddrKeyhash),
    DRepScript(ScriptHash),
    StakePoolKey(PoolKeyhash),
}

impl<'b, C> Decode<'b, C> for Voter {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        d.array()?;

        match d.u16()? {
            0 => Ok(Voter::ConstitutionalCommitteeKey(d.decode_with(ctx)?)),
            1 => Ok(Voter::ConstitutionalCommitteeScript(d.decode_with(ctx)?)),
            2 => Ok(Voter::DRepKey(d.decode_with(ctx)?)),
            3 => Ok(Voter::DRepScript(d.decode_with(ctx)?)),
            4 => Ok(Voter::StakePoolKey(d.decode_with(ctx)?)),
            _ => Err(minicbor::decode::Error::message(
                "invalid variant id for Voter",
            )),
        }
    }
}

impl<C> Encode<C> for Voter {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.array(2)?;

        match self {
            Voter::ConstitutionalCommitteeKey(x) => {
                e.u16(0)?;
                e.encode_with(x, ctx)?;
            }
            Voter::ConstitutionalCommitteeScript(x) => {
                e.u16(1)?;
                e.encode_with(x, ctx)?;
            }
            Voter::DRepKey(x) => {
                e.u16(2)?;
                e.encode_with(x, ctx)?;
            }
            Voter::DRepScript(x) => {
                e.u16(3)?;
                e.encode_with(x, ctx)?;
            }
            Voter::StakePoolKey(x) => {
                e.u16(4)?;
                e.encode_with(x, ctx)?;
            }
        }

        Ok(())
    }
}

#[derive(Encode, Decode, Serialize, Deserialize, Debug, PartialEq, PartialOrd, Eq, Ord, Clone)]
pub struct Anchor {
    #[n(0)]
    pub url: String,
    #[n(1)]
    pub content_hash: Hash<32>,
}

#[derive(Encode, Decode, Serialize, Deserialize, Debug, PartialEq, Eq, Clone, PartialOrd, Ord)]
pub struct GovActionId {
    #[n(0)]
    pub transaction_id: Hash<32>,
    #[n(1)]
    pub action_index: u32,
}

#[derive(Encode, Decode, Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct VotingProcedure {
    #[n(0)]
    pub vote: Vote,
    #[n(1)]
    pub anchor: Option<Anchor>,
}

pub type VotingProcedures = KeyValuePairs<Voter, KeyValuePairs<GovActionId, VotingProcedure>>;

#[derive(Encode, Decode, Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Constitution {
    #[n(0)]
    pub anchor: Anchor,
    #[n(1)]
    pub guardrail_script: Option<ScriptHash>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum GovAction {
    ParameterChange(
        Option<GovActionId>,
        Box<ProtocolParamUpdate>,
        Option<ScriptHash>,
    ),
    HardForkInitiation(Option<GovActionId>, ProtocolVersion),
    TreasuryWithdrawals(KeyValuePairs<RewardAccount, Coin>, Option<ScriptHash>),
    NoConfidence(Option<GovActionId>),
    UpdateCommittee(
        Option<GovActionId>,
        Set<CommitteeColdCredential>,
        KeyValuePairs<CommitteeColdCredential, Epoch>,
        UnitInterval,
    ),
    NewConstitution(Option<GovActionId>, Constitution),
    Information,
}

impl<'b, C> Decode<'b, C> for GovAction {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        d.array()?;

        match d.u16()? {
            0 => Ok(GovAction::ParameterChange(
                d.decode_with(ctx)?,
                Box::new(d.decode_with(ctx)?),
                d.decode_with(ctx)?,
            )),
            1 => Ok(GovAction::HardForkInitiation(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            2 => Ok(GovAction::TreasuryWithdrawals(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            3 => Ok(GovAction::NoConfidence(d.decode_with(ctx)?)),
            4 => Ok(GovAction::UpdateCommittee(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            5 => Ok(GovAction::NewConstitution(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            6 => Ok(GovAction::Information),
            _ => Err(minicbor::decode::Error::message(
                "invalid variant id for GovAction",
            )),
        }
    }
}

impl<C> Encode<C> for GovAction {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            GovAction::ParameterChange(a, b, c) => {
                e.array(4)?;
                e.u16(0)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b.as_ref(), ctx)?;
                e.encode_with(c, ctx)?;
            }
            GovAction::HardForkInitiation(a, b) => {
                e.array(3)?;
                e.u16(1)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
            GovAction::TreasuryWithdrawals(a, b) => {
                e.array(3)?;
                e.u16(2)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
            GovAction::NoConfidence(a) => {
                e.array(2)?;
                e.u16(3)?;
                e.encode_with(a, ctx)?;
            }
            GovAction::UpdateCommittee(a, b, c, x) => {
                e.array(5)?;
                e.u16(4)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
                e.encode_with(c, ctx)?;
                e.encode_with(x, ctx)?;
            }
            GovAction::NewConstitution(a, b) => {
                e.array(3)?;
                e.u16(5)?;
                e.encode_with(a, ctx)?;
                e.encode_with(b, ctx)?;
            }
            GovAction::Information => {
                e.array(1)?;
                e.u16(6)?;
            }
        }

        Ok(())
    }
}

#[derive(Encode, Decode, Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct ProposalProcedure {
    #[n(0)]
    pub deposit: Coin,
    #[n(1)]
    pub reward_account: RewardAccount,
    #[n(2)]
    pub gov_action: GovAction,
    #[n(3)]
    pub anchor: Anchor,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct LegacyTransactionOutput {
    #[n(0)]
    pub address: Bytes,

    #[n(1)]
    pub amount: Value,

    #[n(2)]
    pub datum_hash: Option<DatumHash>,
}

pub type Data = CborWrap<PlutusData>;

// datum_option = [ 0, $hash32 // 1, data ]
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub enum DatumOption {
    Hash(Hash<32>),
    Data(Data),
}

impl<'b, C> Decode<'b, C> for DatumOption {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        d.array()?;

        match d.u8()? {
            0 => Ok(Self::Hash(d.decode_with(ctx)?)),
            1 => Ok(Self::Data(d.decode_with(ctx)?)),
            _ => Err(minicbor::decode::Error::message(
                "invalid variant for datum option enum",
            )),
        }
    }
}

impl<C> Encode<C> for DatumOption {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            Self::Hash(x) => e.encode_with((0, x), ctx)?,
            Self::Data(x) => e.encode_with((1, x), ctx)?,
        };

        Ok(())
    }
}

// script_ref = #6.24(bytes .cbor script)
pub type ScriptRef = CborWrap<Script>;

// script = [ 0, native_script // 1, plutus_v1_script // 2, plutus_v2_script //
// 3, plutus_v3_script ]
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum Script {
    NativeScript(NativeScript),
    PlutusV1Script(PlutusScript<1>),
    PlutusV2Script(PlutusScript<2>),
    PlutusV3Script(PlutusScript<3>),
}

impl<'b, C> Decode<'b, C> for Script {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        d.array()?;

        match d.u8()? {
            0 => Ok(Self::NativeScript(d.decode_with(ctx)?)),
            1 => Ok(Self::PlutusV1Script(d.decode_with(ctx)?)),
            2 => Ok(Self::PlutusV2Script(d.decode_with(ctx)?)),
            3 => Ok(Self::PlutusV3Script(d.decode_with(ctx)?)),
            _ => Err(minicbor::decode::Error::message(
                "invalid variant for script enum",
            )),
        }
    }
}

impl<C> Encode<C> for Script {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            Self::NativeScript(x) => e.encode_with((0, x), ctx)?,
            Self::PlutusV1Script(x) => e.encode_with((1, x), ctx)?,
            Self::PlutusV2Script(x) => e.encode_with((2, x), ctx)?,
            Self::PlutusV3Script(x) => e.encode_with((3, x), ctx)?,
        };

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Clone)]
#[cbor(map)]
pub struct PostAlonzoTransactionOutput {
    #[n(0)]
    pub address: Bytes,

    #[n(1)]
    pub value: Value,

    #[n(2)]
    pub datum_option: Option<DatumOption>,

    #[n(3)]
    pub script_ref: Option<ScriptRef>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub enum TransactionOutput {
    Legacy(LegacyTransactionOutput),
    PostAlonzo(PostAlonzoTransactionOutput),
}

codec_by_datatype! {
    TransactionOutput,
    Array | ArrayIndef => Legacy,
    Map | MapIndef => PostAlonzo,
    ()
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct VKeyWitness {
    #[n(0)]
    pub vkey: Bytes,

    #[n(1)]
    pub signature: Bytes,
}

/* bootstrap_witness =
[ public_key : $vkey
, signature  : $signature
, chain_code : bytes .size 32
, attributes : bytes
] */

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct BootstrapWitness {
    #[n(0)]
    pub public_key: Bytes,

    #[n(1)]
    pub signature: Bytes,

    #[n(2)]
    pub chain_code: Bytes,

    #[n(3)]
    pub attributes: Bytes,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum NativeScript {
    ScriptPubkey(AddrKeyhash),
    ScriptAll(Vec<NativeScript>),
    ScriptAny(Vec<NativeScript>),
    ScriptNOfK(u32, Vec<NativeScript>),
    InvalidBefore(u64),
    InvalidHereafter(u64),
}

impl<'b, C> Decode<'b, C> for NativeScript {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        d.array()?;

        match d.u16()? {
            0 => Ok(NativeScript::ScriptPubkey(d.decode_with(ctx)?)),
            1 => Ok(NativeScript::ScriptAll(d.decode_with(ctx)?)),
            2 => Ok(NativeScript::ScriptAny(d.decode_with(ctx)?)),
            3 => Ok(NativeScript::ScriptNOfK(
                d.decode_with(ctx)?,
                d.decode_with(ctx)?,
            )),
            4 => Ok(NativeScript::InvalidBefore(d.decode_with(ctx)?)),
            5 => Ok(NativeScript::InvalidHereafter(d.decode_with(ctx)?)),
            _ => Err(minicbor::decode::Error::message(
                "invalid variant id for NativeScript",
            )),
        }
    }
}

impl<C> Encode<C> for NativeScript {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            NativeScript::ScriptPubkey(x) => {
                e.array(2)?;
                e.u16(0)?;
                e.encode_with(x, ctx)?;
            }
            NativeScript::ScriptAll(x) => {
                e.array(2)?;
                e.u16(1)?;
                e.encode_with(x, ctx)?;
            }
            NativeScript::ScriptAny(x) => {
                e.array(2)?;
                e.u16(2)?;
                e.encode_with(x, ctx)?;
            }
            NativeScript::ScriptNOfK(n, x) => {
                e.array(3)?;
                e.u16(3)?;
                e.encode_with(n, ctx)?;
                e.encode_with(x, ctx)?;
            }
            NativeScript::InvalidBefore(x) => {
                e.array(2)?;
                e.u16(4)?;
                e.encode_with(x, ctx)?;
            }
            NativeScript::InvalidHereafter(x) => {
                e.array(2)?;
                e.u16(5)?;
                e.encode_with(x, ctx)?;
            }
        }

        Ok(())
    }
}

#[derive(
    Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord,
)]
#[cbor(index_only)]
pub enum RedeemerTag {
    #[n(0)]
    Spend,
    #[n(1)]
    Mint,
    #[n(2)]
    Cert,
    #[n(3)]
    Reward,
    #[n(4)]
    Vote,
    #[n(5)]
    Propose,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct Redeemer {
    #[n(0)]
    pub tag: RedeemerTag,

    #[n(1)]
    pub index: u32,

    #[n(2)]
    pub data: PlutusData,

    #[n(3)]
    pub ex_units: ExUnits,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone, PartialOrd, Ord)]
pub struct RedeemersKey {
    #[n(0)]
    pub tag: RedeemerTag,
    #[n(1)]
    pub index: u32,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Eq, Clone)]
pub struct RedeemersValue {
    #[n(0)]
    pub data: PlutusData,
    #[n(1)]
    pub ex_units: ExUnits,
}

/// Redeemers are a plain list up to Babbage and a map from Conway on. Both
/// shapes decode here; era conversion happens at re-encode time.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Redeemers {
    List(MaybeIndefArray<Redeemer>),
    Map(KeyValuePairs<RedeemersKey, RedeemersValue>),
}

codec_by_datatype! {
    Redeemers,
    Array | ArrayIndef => List,
    Map | MapIndef => Map,
    ()
}

impl Redeemers {
    pub fn is_empty(&self) -> bool {
        match self {
            Redeemers::List(x) => x.is_empty(),
            Redeemers::Map(x) => x.is_empty(),
        }
    }
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Clone)]
#[cbor(map)]
pub struct WitnessSet {
    #[n(0)]
    pub vkeywitness: Option<Set<VKeyWitness>>,

    #[n(1)]
    pub native_script: Option<Set<NativeScript>>,

    #[n(2)]
    pub bootstrap_witness: Option<Set<BootstrapWitness>>,

    #[n(3)]
    pub plutus_v1_script: Option<Set<PlutusScript<1>>>,

    #[n(4)]
    pub plutus_data: Option<Set<PlutusData>>,

    #[n(5)]
    pub redeemer: Option<Redeemers>,

    #[n(6)]
    pub plutus_v2_script: Option<Set<PlutusScript<2>>>,

    #[n(7)]
    pub plutus_v3_script: Option<Set<PlutusScript<3>>>,
}

impl WitnessSet {
    /// True when no field carries any witness, counting present-but-empty
    /// collections as absent.
    pub fn is_empty(&self) -> bool {
        fn blank<T: Clone>(x: &Option<Set<T>>) -> bool {
            x.as_ref().map_or(true, |s| s.is_empty())
        }

        blank(&self.vkeywitness)
            && blank(&self.native_script)
            && blank(&self.bootstrap_witness)
            && blank(&self.plutus_v1_script)
            && blank(&self.plutus_data)
            && blank(&self.plutus_v2_script)
            && blank(&self.plutus_v3_script)
            && self.redeemer.as_ref().map_or(true, |r| r.is_empty())
    }
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Clone)]
pub struct ShelleyMaAuxiliaryData {
    #[n(0)]
    pub transaction_metadata: Metadata,

    #[n(1)]
    pub auxiliary_scripts: Option<Vec<NativeScript>>,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Clone)]
#[cbor(map)]
pub struct PostAlonzoAuxiliaryData {
    #[n(0)]
    pub metadata: Option<Metadata>,

    #[n(1)]
    pub native_scripts: Option<Vec<NativeScript>>,

    #[n(2)]
    pub plutus_v1_scripts: Option<Vec<PlutusScript<1>>>,

    #[n(3)]
    pub plutus_v2_scripts: Option<Vec<PlutusScript<2>>>,

    #[n(4)]
    pub plutus_v3_scripts: Option<Vec<PlutusScript<3>>>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub enum AuxiliaryData {
    Shelley(Metadata),
    ShelleyMa(ShelleyMaAuxiliaryData),
    PostAlonzo(PostAlonzoAuxiliaryData),
}

impl<'b, C> Decode<'b, C> for AuxiliaryData {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        match d.datatype()? {
            minicbor::data::Type::Map | minicbor::data::Type::MapIndef => {
                Ok(AuxiliaryData::Shelley(d.decode_with(ctx)?))
            }
            minicbor::data::Type::Array | minicbor::data::Type::ArrayIndef => {
                Ok(AuxiliaryData::ShelleyMa(d.decode_with(ctx)?))
            }
            minicbor::data::Type::Tag => match d.tag()? {
                Tag::Unassigned(259) => Ok(AuxiliaryData::PostAlonzo(d.decode_with(ctx)?)),
                _ => Err(minicbor::decode::Error::message(
                    "invalid tag for auxiliary data",
                )),
            },
            _ => Err(minicbor::decode::Error::message(
                "invalid cbor data type for auxiliary data",
            )),
        }
    }
}

impl<C> Encode<C> for AuxiliaryData {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        match self {
            AuxiliaryData::Shelley(x) => {
                e.encode_with(x, ctx)?;
            }
            AuxiliaryData::ShelleyMa(x) => {
                e.encode_with(x, ctx)?;
            }
            AuxiliaryData::PostAlonzo(x) => {
                e.tag(Tag::Unassigned(259))?;
                e.encode_with(x, ctx)?;
            }
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Encode, Debug, PartialEq, Clone)]
#[cbor(map)]
pub struct TransactionBody {
    #[n(0)]
    pub inputs: Set<TransactionInput>,

    #[n(1)]
    pub outputs: Vec<TransactionOutput>,

    #[n(2)]
    pub fee: Coin,

    #[n(3)]
    pub ttl: Option<u64>,

    #[n(4)]
    pub certificates: Option<Set<Certificate>>,

    #[n(5)]
    pub withdrawals: Option<Withdrawals>,

    // -- DROPPED IN CONWAY
    #[n(6)]
    pub update: Option<Update>,

    #[n(7)]
    pub auxiliary_data_hash: Option<Bytes>,

    #[n(8)]
    pub validity_interval_start: Option<u64>,

    #[n(9)]
    pub mint: Option<Mint>,

    #[n(11)]
    pub script_data_hash: Option<Hash<32>>,

    #[n(13)]
    pub collateral: Option<NonEmptySet<TransactionInput>>,

    #[n(14)]
    pub required_signers: Option<RequiredSigners>,

    #[n(15)]
    pub network_id: Option<NetworkId>,

    #[n(16)]
    pub collateral_return: Option<TransactionOutput>,

    #[n(17)]
    pub total_collateral: Option<Coin>,

    #[n(18)]
    pub reference_inputs: Option<NonEmptySet<TransactionInput>>,

    // -- NEW IN CONWAY
    #[n(19)]
    pub voting_procedures: Option<VotingProcedures>,

    #[n(20)]
    pub proposal_procedures: Option<NonEmptySet<ProposalProcedure>>,

    #[n(21)]
    pub treasury_value: Option<Coin>,

    #[n(22)]
    pub donation: Option<Coin>,
}

// Decoded by hand so we can validate inside the decoder: duplicate keys are
// rejected, required fields enforced, and present-but-empty maps refused the
// way the ledger decoders do.
impl<'b, C> minicbor::Decode<'b, C> for TransactionBody {
    fn decode(d: &mut minicbor::Decoder<'b>, ctx: &mut C) -> Result<Self, minicbor::decode::Error> {
        let mut must_inputs = None;
        let mut must_outputs = None;
        let mut must_fee = None;
        let mut ttl = None;
        let mut certificates = None;
        let mut withdrawals = None;
        let mut update = None;
        let mut auxiliary_data_hash = None;
        let mut validity_interval_start = None;
        let mut mint: Option<Mint> = None;
        let mut script_data_hash = None;
        let mut collateral = None;
        let mut required_signers = None;
        let mut network_id = None;
        let mut collateral_return = None;
        let mut total_collateral = None;
        let mut reference_inputs = None;
        let mut voting_procedures = None;
        let mut proposal_procedures = None;
        let mut treasury_value = None;
        let mut donation = None;

        let map_init = d.map()?;
        let mut items_seen = 0;

        let mut seen_key = HashSet::new();

        loop {
            let n = d.i64();
            let Ok(index) = n else { break };
            if seen_key.contains(&index) {
                return Err(minicbor::decode::Error::message(
                    "transaction body must not contain duplicate keys",
                ));
            }
            match index {
                0 => {
                    must_inputs = Some(d.decode_with(ctx)?);
                }
                1 => {
                    must_outputs = Some(d.decode_with(ctx)?);
                }
                2 => {
                    must_fee = Some(d.decode_with(ctx)?);
                }
                3 => {
                    ttl = d.decode_with(ctx)?;
                }
                4 => {
                    certificates = d.decode_with(ctx)?;
                }
                5 => {
                    let real_withdrawals: Withdrawals = d.decode_with(ctx)?;
                    if real_withdrawals.is_empty() {
                        return Err(minicbor::decode::Error::message(
                            "withdrawals must be non-empty if present",
                        ));
                    }
                    withdrawals = Some(real_withdrawals);
                }
                6 => {
                    update = d.decode_with(ctx)?;
                }
                7 => {
                    auxiliary_data_hash = d.decode_with(ctx)?;
                }
                8 => {
                    validity_interval_start = d.decode_with(ctx)?;
                }
                9 => {
                    let real_mint: Mint = d.decode_with(ctx)?;
                    if real_mint.is_empty() {
                        return Err(minicbor::decode::Error::message(
                            "mint must be non-empty if present",
                        ));
                    }
                    mint = Some(real_mint);
                }
                11 => {
                    script_data_hash = d.decode_with(ctx)?;
                }
                13 => {
                    collateral = d.decode_with(ctx)?;
                }
                14 => {
                    required_signers = d.decode_with(ctx)?;
                }
                15 => {
                    network_id = d.decode_with(ctx)?;
                }
                16 => {
                    collateral_return = d.decode_with(ctx)?;
                }
                17 => {
                    total_collateral = d.decode_with(ctx)?;
                }
                18 => {
                    reference_inputs = d.decode_with(ctx)?;
                }
                19 => {
                    let real_voting_procedures: VotingProcedures = d.decode_with(ctx)?;
                    if real_voting_procedures.is_empty() {
                        return Err(minicbor::decode::Error::message(
                            "voting procedures must be non-empty if present",
                        ));
                    }
                    voting_procedures = Some(real_voting_procedures);
                }
                20 => {
                    proposal_procedures = d.decode_with(ctx)?;
                }
                21 => {
                    treasury_value = d.decode_with(ctx)?;
                }
                22 => {
                    donation = d.decode_with(ctx)?;
                }
                _ => {
                    return Err(minicbor::decode::Error::message(
                        "unexpected key in transaction body",
                    ));
                }
            }
            seen_key.insert(index);
            items_seen += 1;
            if let Some(map_count) = map_init {
                if items_seen == map_count {
                    break;
                }
            }
        }

        if let Some(map_count) = map_init {
            if map_count != items_seen {
                return Err(minicbor::decode::Error::message(
                    "map is not valid cbor: declared count did not match actual count",
                ));
            }
        } else {
            let ty = d.datatype()?;
            if ty == minicbor::data::Type::Break {
                d.skip()?;
            } else {
                return Err(minicbor::decode::Error::message(
                    "unexpected garbage at end of map",
                ));
            }
        }

        let Some(inputs) = must_inputs else {
            return Err(minicbor::decode::Error::message("field inputs is required"));
        };
        let Some(outputs) = must_outputs else {
            return Err(minicbor::decode::Error::message(
                "field outputs is required",
            ));
        };
        let Some(fee) = must_fee else {
            return Err(minicbor::decode::Error::message("field fee is required"));
        };

        Ok(Self {
            inputs,
            outputs,
            fee,
            ttl,
            certificates,
            withdrawals,
            update,
            auxiliary_data_hash,
            validity_interval_start,
            mint,
            script_data_hash,
            collateral,
            required_signers,
            network_id,
            collateral_return,
            total_collateral,
            reference_inputs,
            voting_procedures,
            proposal_procedures,
            treasury_value,
            donation,
        })
    }
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, PartialEq, Clone)]
pub struct Tx {
    #[n(0)]
    pub transaction_body: TransactionBody,

    #[n(1)]
    pub transaction_witness_set: WitnessSet,

    #[n(2)]
    pub success: bool,

    #[n(3)]
    pub auxiliary_data: Nullable<AuxiliaryData>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanitizer_codec::minicbor;

    mod tests_transaction {
        use super::super::TransactionBody;
        use sanitizer_codec::minicbor;

        // A simple tx with just inputs, outputs, and fee. Address is not well-formed, since the
        // 00 header implies both a payment part and a staking part are present.
        #[test]
        fn decode_simple_tx() {
            let tx_bytes = hex::decode("a300828258206767676767676767676767676767676767676767676767676767676767676767008258206767676767676767676767676767676767676767676767676767676767676767000200018182581c000000000000000000000000000000000000000000000000000000001a04000000").unwrap();
            let tx: TransactionBody = minicbor::decode(&tx_bytes).unwrap();
            assert_eq!(tx.fee, 0);
            assert_eq!(tx.inputs.len(), 2);
            assert!(!tx.inputs.is_tagged());
        }

        // Same tx with tagged inputs and body keys in ascending order, so the
        // round trip is byte-exact.
        #[test]
        fn decode_simple_tx_with_tagged_inputs() {
            let tx_bytes = hex::decode("a300d9010282825820676767676767676767676767676767676767676767676767676767676767676700825820676767676767676767676767676767676767676767676767676767676767676700018182581c000000000000000000000000000000000000000000000000000000001a040000000200").unwrap();
            let tx: TransactionBody = minicbor::decode(&tx_bytes).unwrap();
            assert!(tx.inputs.is_tagged());

            let encoded = minicbor::to_vec(&tx).unwrap();
            assert_eq!(encoded, tx_bytes);
        }

        // Out-of-order body keys are accepted but re-encode in key order.
        #[test]
        fn body_keys_reordered_on_reencode() {
            let tx_bytes = hex::decode("a300828258206767676767676767676767676767676767676767676767676767676767676767008258206767676767676767676767676767676767676767676767676767676767676767000200018182581c000000000000000000000000000000000000000000000000000000001a04000000").unwrap();
            let tx: TransactionBody = minicbor::decode(&tx_bytes).unwrap();

            let encoded = minicbor::to_vec(&tx).unwrap();
            assert_ne!(encoded, tx_bytes);

            // fee (key 2) moves to the end, after the outputs
            assert!(hex::encode(&encoded).ends_with("0200"));

            let reparsed: TransactionBody = minicbor::decode(&encoded).unwrap();
            assert_eq!(reparsed, tx);
        }

        #[test]
        fn reject_empty_tx() {
            let tx_bytes = hex::decode("a0").unwrap();
            let tx: Result<TransactionBody, _> = minicbor::decode(&tx_bytes);
            assert!(tx
                .map_err(|e| e.to_string())
                .unwrap_err()
                .contains("field inputs is required"));
        }

        // Single input, no outputs, fee present but zero
        #[test]
        fn reject_tx_missing_outputs() {
            let tx_bytes = hex::decode("a200818258200000000000000000000000000000000000000000000000000000000000000008090200").unwrap();
            let tx: Result<TransactionBody, _> = minicbor::decode(&tx_bytes);
            assert!(tx
                .map_err(|e| e.to_string())
                .unwrap_err()
                .contains("field outputs is required"));
        }

        // Single input, single output, no fee
        #[test]
        fn reject_tx_missing_fee() {
            let tx_bytes = hex::decode("a20081825820000000000000000000000000000000000000000000000000000000000000000809018182581c000000000000000000000000000000000000000000000000000000001affffffff").unwrap();
            let tx: Result<TransactionBody, _> = minicbor::decode(&tx_bytes);
            assert!(tx
                .map_err(|e| e.to_string())
                .unwrap_err()
                .contains("field fee is required"));
        }

        // The mint may not be present if it is empty
        #[test]
        fn reject_empty_present_mint() {
            let tx_bytes = hex::decode("a400828258206767676767676767676767676767676767676767676767676767676767676767008258206767676767676767676767676767676767676767676767676767676767676767000200018182581c000000000000000000000000000000000000000000000000000000001a0400000009a0").unwrap();
            let tx: Result<TransactionBody, _> = minicbor::decode(&tx_bytes);
            assert!(tx
                .map_err(|e| e.to_string())
                .unwrap_err()
                .contains("mint must be non-empty if present"));
        }

        #[test]
        fn reject_empty_present_withdrawals() {
            let tx_bytes = hex::decode("a400828258206767676767676767676767676767676767676767676767676767676767676767008258206767676767676767676767676767676767676767676767676767676767676767000200018182581c000000000000000000000000000000000000000000000000000000001a0400000005a0").unwrap();
            let tx: Result<TransactionBody, _> = minicbor::decode(&tx_bytes);
            assert!(tx
                .map_err(|e| e.to_string())
                .unwrap_err()
                .contains("withdrawals must be non-empty if present"));
        }

        #[test]
        fn reject_empty_present_collateral_inputs() {
            let tx_bytes = hex::decode("a400828258206767676767676767676767676767676767676767676767676767676767676767008258206767676767676767676767676767676767676767676767676767676767676767000200018182581c000000000000000000000000000000000000000000000000000000001a040000000d80").unwrap();
            let tx: Result<TransactionBody, _> = minicbor::decode(&tx_bytes);
            assert!(tx
                .map_err(|e| e.to_string())
                .unwrap_err()
                .contains("decoding empty set as NonEmptySet"));
        }

        #[test]
        fn reject_empty_present_required_signers() {
            let tx_bytes = hex::decode("a400828258206767676767676767676767676767676767676767676767676767676767676767008258206767676767676767676767676767676767676767676767676767676767676767000200018182581c000000000000000000000000000000000000000000000000000000001a040000000e80").unwrap();
            let tx: Result<TransactionBody, _> = minicbor::decode(&tx_bytes);
            assert!(tx
                .map_err(|e| e.to_string())
                .unwrap_err()
                .contains("decoding empty set as NonEmptySet"));
        }

        #[test]
        fn reject_empty_present_proposal_procedures() {
            let tx_bytes = hex::decode("a400828258206767676767676767676767676767676767676767676767676767676767676767008258206767676767676767676767676767676767676767676767676767676767676767000200018182581c000000000000000000000000000000000000000000000000000000001a040000001480").unwrap();
            let tx: Result<TransactionBody, _> = minicbor::decode(&tx_bytes);
            assert!(tx
                .map_err(|e| e.to_string())
                .unwrap_err()
                .contains("decoding empty set as NonEmptySet"));
        }

        #[test]
        fn reject_duplicate_keys() {
            let tx_bytes = hex::decode("a300828258206767676767676767676767676767676767676767676767676767676767676767008258206767676767676767676767676767676767676767676767676767676767676767000200020a").unwrap();
            let tx: Result<TransactionBody, _> = minicbor::decode(&tx_bytes);
            assert!(tx
                .map_err(|e| e.to_string())
                .unwrap_err()
                .contains("transaction body must not contain duplicate keys"));
        }

        // Babbage-only update field (key 6) on an otherwise minimal body
        #[test]
        fn decode_body_with_update_field() {
            let tx_bytes = hex::decode("a400828258206767676767676767676767676767676767676767676767676767676767676767008258206767676767676767676767676767676767676767676767676767676767676767000200018182581c000000000000000000000000000000000000000000000000000000001a040000000682a1581c00000000000000000000000000000000000000000000000000000000a1021903e805").unwrap();
            let tx: TransactionBody = minicbor::decode(&tx_bytes).unwrap();

            let update = tx.update.unwrap();
            assert_eq!(update.epoch, 5);
            assert_eq!(update.proposed_protocol_parameter_updates.len(), 1);
        }
    }

    mod tests_witness_set {
        use super::super::WitnessSet;
        use sanitizer_codec::minicbor;
        use test_case::test_case;

        #[test_case("a0", true ; "no fields")]
        #[test_case("a10080", true ; "present but empty vkey list")]
        #[test_case("a100d9010280", true ; "present but empty tagged vkey set")]
        #[test_case("a100d9010281824040", false ; "tagged vkey witness")]
        #[test_case("a10081824040", false ; "plain vkey witness")]
        fn witness_set_emptiness(witness_hex: &str, empty: bool) {
            let bytes = hex::decode(witness_hex).unwrap();
            let witness_set: WitnessSet = minicbor::decode(&bytes).unwrap();

            assert_eq!(witness_set.is_empty(), empty);
        }

        #[test_case("a100d9010281824040", true ; "tagged vkey witnesses")]
        #[test_case("a10081824040", false ; "untagged vkey witnesses")]
        fn vkey_witness_framing_survives_roundtrip(witness_hex: &str, tagged: bool) {
            let bytes = hex::decode(witness_hex).unwrap();
            let witness_set: WitnessSet = minicbor::decode(&bytes).unwrap();

            let vkeys = witness_set.vkeywitness.as_ref().unwrap();
            assert_eq!(vkeys.is_tagged(), tagged);
            assert_eq!(vkeys.len(), 1);

            let encoded = minicbor::to_vec(&witness_set).unwrap();
            assert_eq!(encoded, bytes);
        }
    }

    #[test]
    fn value_roundtrip() {
        // plain coin
        let bytes = hex::decode("1a000f4240").unwrap();
        let value: Value = minicbor::decode(&bytes).unwrap();
        assert_eq!(value, Value::Coin(1_000_000));
        assert_eq!(minicbor::to_vec(&value).unwrap(), bytes);

        // [coin, {policy: {asset: amount}}]
        let bytes = hex::decode(
            "821a000f4240a1581c00000000000000000000000000000000000000000000000000000000a14001",
        )
        .unwrap();
        let value: Value = minicbor::decode(&bytes).unwrap();
        assert!(matches!(value, Value::Multiasset(1_000_000, _)));
        assert_eq!(minicbor::to_vec(&value).unwrap(), bytes);
    }

    #[test]
    fn certificate_roundtrip() {
        // [2, [0, keyhash], poolkeyhash]
        let bytes = hex::decode(
            "83028200581c276fd18711931e2c0e21430192dbeac0e458093cd9d1fcd7210f64b3581c276fd18711931e2c0e21430192dbeac0e458093cd9d1fcd7210f64b3",
        )
        .unwrap();

        let cert: Certificate = minicbor::decode(&bytes).unwrap();
        assert!(matches!(cert, Certificate::StakeDelegation(..)));
        assert_eq!(minicbor::to_vec(&cert).unwrap(), bytes);
    }

    #[test]
    fn drep_roundtrip() {
        let bytes = hex::decode("8102").unwrap();
        let drep: DRep = minicbor::decode(&bytes).unwrap();
        assert_eq!(drep, DRep::Abstain);
        assert_eq!(minicbor::to_vec(&drep).unwrap(), bytes);
    }

    #[test]
    fn datum_option_roundtrip() {
        // [1, 24(<<121([])>>)]
        let bytes = hex::decode("8201d81843d87980").unwrap();
        let datum: DatumOption = minicbor::decode(&bytes).unwrap();
        assert!(matches!(datum, DatumOption::Data(_)));
        assert_eq!(minicbor::to_vec(&datum).unwrap(), bytes);
    }

    #[test]
    fn auxiliary_data_post_alonzo_roundtrip() {
        // 259({0: {674: {"msg": ["hello"]}}})
        let bytes = hex::decode("d90103a100a11902a2a1636d7367816568656c6c6f").unwrap();
        let aux: AuxiliaryData = minicbor::decode(&bytes).unwrap();
        assert!(matches!(aux, AuxiliaryData::PostAlonzo(_)));
        assert_eq!(minicbor::to_vec(&aux).unwrap(), bytes);
    }
}
