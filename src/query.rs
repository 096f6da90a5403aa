//! Every query the client knows, and the endpoint each one resolves to.

use crate::endpoint::Endpoint;
use crate::proposal_status::ProposalStatus;

/// A logical query against the node.
///
/// Identifiers are placed into paths and query strings verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Query<'a> {
    // ── Bank ─────────────────────────────────────────────────────
    Balances { address: &'a str },
    BalanceByDenom { address: &'a str, denom: &'a str },
    Supply,
    /// Falls back to the client's default denomination when `denom` is `None`.
    SupplyByDenom { denom: Option<&'a str> },

    // ── Distribution ─────────────────────────────────────────────
    CommunityPool,
    Rewards { delegator: &'a str },
    RewardsByValidator { delegator: &'a str, validator: &'a str },
    DelegatorValidators { delegator: &'a str },
    WithdrawAddress { delegator: &'a str },
    DistributionParams,
    Commission { validator: &'a str },
    OutstandingRewards { validator: &'a str },

    // ── Gov ──────────────────────────────────────────────────────
    /// All proposals, or only those with `status`.
    Proposals { status: Option<ProposalStatus> },
    Proposal { proposal_id: u64 },
    Tally { proposal_id: u64 },
    Votes { proposal_id: u64 },
    Vote { proposal_id: u64, voter: &'a str },

    // ── Slashing ─────────────────────────────────────────────────
    SlashingParams,

    // ── Staking ──────────────────────────────────────────────────
    Delegations { delegator: &'a str },
    Redelegations { delegator: &'a str },
    UnbondingDelegations { delegator: &'a str },
    DelegatorBondedValidators { delegator: &'a str },
    DelegatorBondedValidator { delegator: &'a str, validator: &'a str },
    StakingParams,
    StakingPool,
    Validators,
    Validator { validator: &'a str },
    ValidatorDelegations { validator: &'a str },
    ValidatorDelegation { validator: &'a str, delegator: &'a str },
    ValidatorUnbondingDelegation { validator: &'a str, delegator: &'a str },
    ValidatorUnbondingDelegations { validator: &'a str },

    // ── Mint ─────────────────────────────────────────────────────
    MintParams,
    Inflation,
    AnnualProvisions,

    // ── Tx ───────────────────────────────────────────────────────
    Tx { hash: &'a str },

    // ── Node RPC ─────────────────────────────────────────────────
    AbciInfo,
    Block { height: u64 },
    BlockResults { height: u64 },
    Commit { height: u64 },
    ConsensusState,
    DumpConsensusState,
    Genesis,
    NetInfo,
    NumUnconfirmedTxs,
    Status,
}

const BANK: &str = "/cosmos/bank/v1beta1";
const DISTRIBUTION: &str = "/cosmos/distribution/v1beta1";
const GOV: &str = "/cosmos/gov/v1beta1";
const SLASHING: &str = "/cosmos/slashing/v1beta1";
const STAKING: &str = "/cosmos/staking/v1beta1";
const MINT: &str = "/cosmos/mint/v1beta1";
const TX: &str = "/cosmos/tx/v1beta1";

impl Query<'_> {
    /// Resolve the query to its request target.
    pub fn endpoint(&self, default_denom: &str) -> Endpoint {
        use Query::*;
        match *self {
            Balances { address } => {
                Endpoint::rest(format!("{BANK}/balances/{address}")).paged("balances")
            }
            BalanceByDenom { address, denom } => {
                Endpoint::rest(format!("{BANK}/balances/{address}/by_denom")).param("denom", denom)
            }
            Supply => Endpoint::rest(format!("{BANK}/supply")),
            SupplyByDenom { denom } => {
                let denom = denom.unwrap_or(default_denom);
                Endpoint::rest(format!("{BANK}/supply/{denom}"))
            }

            CommunityPool => Endpoint::rest(format!("{DISTRIBUTION}/community_pool")),
            Rewards { delegator } => {
                Endpoint::rest(format!("{DISTRIBUTION}/delegators/{delegator}/rewards"))
            }
            RewardsByValidator {
                delegator,
                validator,
            } => Endpoint::rest(format!(
                "{DISTRIBUTION}/delegators/{delegator}/rewards/{validator}"
            )),
            DelegatorValidators { delegator } => {
                Endpoint::rest(format!("{DISTRIBUTION}/delegators/{delegator}/validators"))
            }
            WithdrawAddress { delegator } => Endpoint::rest(format!(
                "{DISTRIBUTION}/delegators/{delegator}/withdraw_address"
            )),
            DistributionParams => Endpoint::rest(format!("{DISTRIBUTION}/params")),
            Commission { validator } => {
                Endpoint::rest(format!("{DISTRIBUTION}/validators/{validator}/commission"))
            }
            OutstandingRewards { validator } => Endpoint::rest(format!(
                "{DISTRIBUTION}/validators/{validator}/outstanding_rewards"
            )),

            Proposals { status } => {
                let endpoint = Endpoint::rest(format!("{GOV}/proposals")).paged("proposals");
                match status {
                    Some(status) => endpoint.param("proposalStatus", status.code()),
                    None => endpoint,
                }
            }
            Proposal { proposal_id } => Endpoint::rest(format!("{GOV}/proposals/{proposal_id}")),
            Tally { proposal_id } => {
                Endpoint::rest(format!("{GOV}/proposals/{proposal_id}/tally"))
            }
            Votes { proposal_id } => {
                Endpoint::rest(format!("{GOV}/proposals/{proposal_id}/votes")).paged("votes")
            }
            Vote { proposal_id, voter } => {
                Endpoint::rest(format!("{GOV}/proposals/{proposal_id}/votes/{voter}"))
            }

            SlashingParams => Endpoint::rest(format!("{SLASHING}/params")),

            Delegations { delegator } => Endpoint::rest(format!("{STAKING}/delegations/{delegator}"))
                .paged("delegation_responses"),
            Redelegations { delegator } => {
                Endpoint::rest(format!("{STAKING}/delegators/{delegator}/redelegations"))
                    .paged("redelegation_responses")
            }
            UnbondingDelegations { delegator } => Endpoint::rest(format!(
                "{STAKING}/delegators/{delegator}/unbonding_delegations"
            ))
            .paged("unbonding_responses"),
            DelegatorBondedValidators { delegator } => {
                Endpoint::rest(format!("{STAKING}/delegators/{delegator}/validators"))
                    .paged("validators")
            }
            DelegatorBondedValidator {
                delegator,
                validator,
            } => Endpoint::rest(format!(
                "{STAKING}/delegators/{delegator}/validators/{validator}"
            )),
            StakingParams => Endpoint::rest(format!("{STAKING}/params")),
            StakingPool => Endpoint::rest(format!("{STAKING}/pool")),
            Validators => Endpoint::rest(format!("{STAKING}/validators")).paged("validators"),
            Validator { validator } => Endpoint::rest(format!("{STAKING}/validators/{validator}")),
            ValidatorDelegations { validator } => {
                Endpoint::rest(format!("{STAKING}/validators/{validator}/delegations"))
                    .paged("delegation_responses")
            }
            ValidatorDelegation {
                validator,
                delegator,
            } => Endpoint::rest(format!(
                "{STAKING}/validators/{validator}/delegations/{delegator}"
            )),
            ValidatorUnbondingDelegation {
                validator,
                delegator,
            } => Endpoint::rest(format!(
                "{STAKING}/validators/{validator}/delegations/{delegator}/unbonding_delegation"
            )),
            ValidatorUnbondingDelegations { validator } => Endpoint::rest(format!(
                "{STAKING}/validators/{validator}/unbonding_delegations"
            ))
            .paged("unbonding_responses"),

            MintParams => Endpoint::rest(format!("{MINT}/params")),
            Inflation => Endpoint::rest(format!("{MINT}/inflation")),
            AnnualProvisions => Endpoint::rest(format!("{MINT}/annual_provisions")),

            Tx { hash } => Endpoint::rest(format!("{TX}/txs/{hash}")),

            AbciInfo => Endpoint::rpc("/abci_info"),
            Block { height } => Endpoint::rpc("/block").param("height", height),
            BlockResults { height } => Endpoint::rpc("/block_results").param("height", height),
            Commit { height } => Endpoint::rpc("/commit").param("height", height),
            ConsensusState => Endpoint::rpc("/consensus_state"),
            DumpConsensusState => Endpoint::rpc("/dump_consensus_state"),
            Genesis => Endpoint::rpc("/genesis"),
            NetInfo => Endpoint::rpc("/net_info"),
            NumUnconfirmedTxs => Endpoint::rpc("/num_unconfirmed_txs"),
            Status => Endpoint::rpc("/status"),
        }
    }

    /// Whether the query follows pagination and returns a list.
    pub fn is_paged(&self) -> bool {
        self.endpoint("").list_field().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Base;

    fn url(query: Query<'_>) -> String {
        let endpoint = query.endpoint("uhuahua");
        let base = match endpoint.base() {
            Base::Rest => "http://lcd",
            Base::Rpc => "http://rpc",
        };
        endpoint.url(base)
    }

    #[test]
    fn bank_paths() {
        assert_eq!(
            url(Query::Balances { address: "chihuahua1abc" }),
            "http://lcd/cosmos/bank/v1beta1/balances/chihuahua1abc"
        );
        assert_eq!(
            url(Query::BalanceByDenom {
                address: "chihuahua1abc",
                denom: "uhuahua"
            }),
            "http://lcd/cosmos/bank/v1beta1/balances/chihuahua1abc/by_denom?denom=uhuahua"
        );
        assert_eq!(url(Query::Supply), "http://lcd/cosmos/bank/v1beta1/supply");
    }

    #[test]
    fn supply_by_denom_falls_back_to_default() {
        assert_eq!(
            url(Query::SupplyByDenom { denom: None }),
            "http://lcd/cosmos/bank/v1beta1/supply/uhuahua"
        );
        assert_eq!(
            url(Query::SupplyByDenom { denom: Some("uatom") }),
            "http://lcd/cosmos/bank/v1beta1/supply/uatom"
        );
    }

    #[test]
    fn proposal_status_filter() {
        assert_eq!(
            url(Query::Proposals {
                status: Some(ProposalStatus::VotingPeriod)
            }),
            "http://lcd/cosmos/gov/v1beta1/proposals?proposalStatus=2"
        );
        assert_eq!(
            url(Query::Proposals {
                status: "NOT_A_STATUS".parse().ok()
            }),
            "http://lcd/cosmos/gov/v1beta1/proposals"
        );
    }

    #[test]
    fn staking_paths() {
        assert_eq!(
            url(Query::ValidatorUnbondingDelegation {
                validator: "valoper1",
                delegator: "del1"
            }),
            "http://lcd/cosmos/staking/v1beta1/validators/valoper1/delegations/del1/unbonding_delegation"
        );
        assert_eq!(
            url(Query::DelegatorBondedValidator {
                delegator: "del1",
                validator: "valoper1"
            }),
            "http://lcd/cosmos/staking/v1beta1/delegators/del1/validators/valoper1"
        );
    }

    #[test]
    fn rpc_paths() {
        assert_eq!(url(Query::Status), "http://rpc/status");
        assert_eq!(url(Query::Block { height: 42 }), "http://rpc/block?height=42");
        assert_eq!(url(Query::Commit { height: 7 }), "http://rpc/commit?height=7");
        assert_eq!(Query::NetInfo.endpoint("").base(), Base::Rpc);
    }

    #[test]
    fn list_fields() {
        let field = |q: Query<'_>| q.endpoint("").list_field();
        assert_eq!(field(Query::Validators), Some("validators"));
        assert_eq!(field(Query::Votes { proposal_id: 1 }), Some("votes"));
        assert_eq!(
            field(Query::Redelegations { delegator: "d" }),
            Some("redelegation_responses")
        );
        assert_eq!(
            field(Query::ValidatorUnbondingDelegations { validator: "v" }),
            Some("unbonding_responses")
        );
        assert_eq!(field(Query::Supply), None);
        assert!(!Query::Tx { hash: "AB" }.is_paged());
        assert!(Query::Balances { address: "a" }.is_paged());
    }
}
