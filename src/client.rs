//! Async query client for a Cosmos SDK node.

use serde_json::Value;
use tokio::time::Instant;

use crate::config::ClientConfig;
use crate::endpoint::{Base, Endpoint};
use crate::error::{FailureCause, QueryFailed, Result};
use crate::pagination::Page;
use crate::proposal_status::ProposalStatus;
use crate::query::Query;
use crate::transport::{HttpTransport, Transport};
use crate::CLIENT;

/// What a query produced: the body of a single-fetch query, or the items
/// aggregated across every page of a paginated one.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    Single(Value),
    Paged(Vec<Value>),
}

impl QueryResponse {
    /// The response as one JSON value; aggregated items become an array.
    pub fn into_value(self) -> Value {
        match self {
            Self::Single(value) => value,
            Self::Paged(items) => Value::Array(items),
        }
    }

    /// The response as a list; a single body becomes a one-element list.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Self::Single(value) => vec![value],
            Self::Paged(items) => items,
        }
    }
}

/// Async client for a node's REST state-query and RPC endpoints.
///
/// List queries transparently follow `pagination.next_key` until the node
/// reports the last page, and return every item in page order.
///
/// # Example
///
/// ```no_run
/// use cosmos_query_client::CosmosQueryClient;
///
/// #[tokio::main]
/// async fn main() -> cosmos_query_client::Result<()> {
///     let client = CosmosQueryClient::new(
///         "https://api.chihuahua.wtf",
///         "https://rpc.chihuahua.wtf",
///         "uhuahua",
///     );
///     let validators = client.validators().await?;
///     println!("{} validators", validators.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CosmosQueryClient<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
}

impl CosmosQueryClient {
    /// Create a client with default settings.
    pub fn new(
        rest_url: impl Into<String>,
        rpc_url: impl Into<String>,
        default_denom: impl Into<String>,
    ) -> Self {
        Self::with_config(ClientConfig::new(rest_url, rpc_url, default_denom))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> CosmosQueryClient<T> {
    /// Create a client that issues its requests through `transport`.
    pub fn with_transport(mut config: ClientConfig, transport: T) -> Self {
        trim_trailing_slash(&mut config.rest_url);
        trim_trailing_slash(&mut config.rpc_url);
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self, base: Base) -> &str {
        match base {
            Base::Rest => &self.config.rest_url,
            Base::Rpc => &self.config.rpc_url,
        }
    }

    /// Run any query from the table.
    pub async fn fetch(&self, query: &Query<'_>) -> Result<QueryResponse> {
        self.fetch_endpoint(&query.endpoint(&self.config.default_denom))
            .await
    }

    /// Request an endpoint, following pagination if it names a list field.
    pub async fn fetch_endpoint(&self, endpoint: &Endpoint) -> Result<QueryResponse> {
        match endpoint.list_field() {
            Some(list_field) => self
                .aggregate(endpoint, list_field)
                .await
                .map(QueryResponse::Paged),
            None => self.single(endpoint).await.map(QueryResponse::Single),
        }
    }

    /// One GET against `base + path`, returning the parsed body unchanged.
    pub async fn fetch_one(&self, base: Base, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.single(&endpoint_with_params(base, path, params)).await
    }

    /// Follow pagination on `base + path`, concatenating the array at
    /// `list_field` from every page.
    pub async fn fetch_all_pages(
        &self,
        base: Base,
        path: &str,
        list_field: &'static str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Value>> {
        let endpoint = endpoint_with_params(base, path, params).paged(list_field);
        self.aggregate(&endpoint, list_field).await
    }

    async fn single(&self, endpoint: &Endpoint) -> Result<Value> {
        let url = endpoint.url(self.base_url(endpoint.base()));
        tracing::debug!(target: CLIENT, %url, "GET");
        self.get_json(&url).await
    }

    async fn aggregate(&self, endpoint: &Endpoint, list_field: &'static str) -> Result<Vec<Value>> {
        let base_url = self.base_url(endpoint.base());
        let deadline = self
            .config
            .deadline()
            .map(|limit| (Instant::now() + limit, limit));

        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;
        loop {
            let url = match &cursor {
                None => endpoint.url(base_url),
                Some(key) => endpoint.continuation_url(base_url, key, self.config.continuation),
            };
            if let Some(max_pages) = self.config.max_pages {
                if pages >= max_pages {
                    return Err(failed(&url, FailureCause::PageLimit(max_pages)));
                }
            }
            tracing::debug!(target: CLIENT, %url, page = pages + 1, "GET page");

            let body = match deadline {
                Some((at, limit)) => {
                    let remaining = at.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return Err(failed(&url, FailureCause::DeadlineExceeded(limit)));
                    }
                    match tokio::time::timeout(remaining, self.get_json(&url)).await {
                        Ok(body) => body?,
                        Err(_) => return Err(failed(&url, FailureCause::DeadlineExceeded(limit))),
                    }
                }
                None => self.get_json(&url).await?,
            };
            let page = Page::extract(body, list_field).map_err(|cause| failed(&url, cause))?;
            pages += 1;
            items.extend(page.items);

            match page.next_key {
                Some(next_key) => cursor = Some(next_key),
                None => {
                    tracing::debug!(
                        target: CLIENT,
                        path = endpoint.path(),
                        pages,
                        items = items.len(),
                        "pagination complete"
                    );
                    return Ok(items);
                }
            }
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .transport
            .get(url, self.config.timeout())
            .await
            .map_err(|err| failed(url, err))?;
        if !response.is_success() {
            return Err(failed(url, FailureCause::Status(response.status)));
        }
        serde_json::from_slice(&response.body).map_err(|err| failed(url, err))
    }

    async fn one(&self, query: Query<'_>) -> Result<Value> {
        self.fetch(&query).await.map(QueryResponse::into_value)
    }

    async fn all(&self, query: Query<'_>) -> Result<Vec<Value>> {
        self.fetch(&query).await.map(QueryResponse::into_items)
    }

    // ── Bank ─────────────────────────────────────────────────────

    /// Balances of every coin held by an account.
    pub async fn balances(&self, address: &str) -> Result<Vec<Value>> {
        self.all(Query::Balances { address }).await
    }

    /// Balance of one denomination held by an account.
    pub async fn balance_by_denom(&self, address: &str, denom: &str) -> Result<Value> {
        self.one(Query::BalanceByDenom { address, denom }).await
    }

    /// Total supply of every coin.
    pub async fn supply(&self) -> Result<Value> {
        self.one(Query::Supply).await
    }

    /// Total supply of `denom`, or of the configured default denomination.
    pub async fn supply_by_denom(&self, denom: Option<&str>) -> Result<Value> {
        self.one(Query::SupplyByDenom { denom }).await
    }

    // ── Distribution ─────────────────────────────────────────────

    /// Coins held by the community pool.
    pub async fn community_pool(&self) -> Result<Value> {
        self.one(Query::CommunityPool).await
    }

    /// Rewards a delegator has accrued across all validators.
    pub async fn rewards(&self, delegator: &str) -> Result<Value> {
        self.one(Query::Rewards { delegator }).await
    }

    /// Rewards a delegator has accrued from one validator.
    pub async fn rewards_by_validator(&self, delegator: &str, validator: &str) -> Result<Value> {
        self.one(Query::RewardsByValidator {
            delegator,
            validator,
        })
        .await
    }

    /// Validators a delegator has delegated to.
    pub async fn delegator_validators(&self, delegator: &str) -> Result<Value> {
        self.one(Query::DelegatorValidators { delegator }).await
    }

    pub async fn withdraw_address(&self, delegator: &str) -> Result<Value> {
        self.one(Query::WithdrawAddress { delegator }).await
    }

    pub async fn distribution_params(&self) -> Result<Value> {
        self.one(Query::DistributionParams).await
    }

    /// Accumulated commission of a validator.
    pub async fn commission(&self, validator: &str) -> Result<Value> {
        self.one(Query::Commission { validator }).await
    }

    /// Outstanding (not yet withdrawn) rewards of a validator.
    pub async fn outstanding_rewards(&self, validator: &str) -> Result<Value> {
        self.one(Query::OutstandingRewards { validator }).await
    }

    // ── Gov ──────────────────────────────────────────────────────

    /// Governance proposals, optionally filtered by status.
    ///
    /// The filter only applies to the first page unless the client is
    /// configured with [`ContinuationParams::ResendFilters`](crate::ContinuationParams).
    pub async fn proposals(&self, status: Option<ProposalStatus>) -> Result<Vec<Value>> {
        self.all(Query::Proposals { status }).await
    }

    pub async fn proposal(&self, proposal_id: u64) -> Result<Value> {
        self.one(Query::Proposal { proposal_id }).await
    }

    /// Current tally of a proposal.
    pub async fn tally(&self, proposal_id: u64) -> Result<Value> {
        self.one(Query::Tally { proposal_id }).await
    }

    /// Every vote cast on a proposal.
    pub async fn votes(&self, proposal_id: u64) -> Result<Vec<Value>> {
        self.all(Query::Votes { proposal_id }).await
    }

    /// The vote of one voter on a proposal.
    pub async fn vote(&self, proposal_id: u64, voter: &str) -> Result<Value> {
        self.one(Query::Vote { proposal_id, voter }).await
    }

    // ── Slashing ─────────────────────────────────────────────────

    pub async fn slashing_params(&self) -> Result<Value> {
        self.one(Query::SlashingParams).await
    }

    // ── Staking ──────────────────────────────────────────────────

    /// Delegations made by a delegator.
    pub async fn delegations(&self, delegator: &str) -> Result<Vec<Value>> {
        self.all(Query::Delegations { delegator }).await
    }

    /// Redelegations made by a delegator.
    pub async fn redelegations(&self, delegator: &str) -> Result<Vec<Value>> {
        self.all(Query::Redelegations { delegator }).await
    }

    /// Unbonding delegations of a delegator.
    pub async fn unbonding_delegations(&self, delegator: &str) -> Result<Vec<Value>> {
        self.all(Query::UnbondingDelegations { delegator }).await
    }

    /// Validators a delegator is bonded to, with full validator info.
    pub async fn delegator_bonded_validators(&self, delegator: &str) -> Result<Vec<Value>> {
        self.all(Query::DelegatorBondedValidators { delegator }).await
    }

    /// Validator info for one validator a delegator is bonded to.
    pub async fn delegator_bonded_validator(
        &self,
        delegator: &str,
        validator: &str,
    ) -> Result<Value> {
        self.one(Query::DelegatorBondedValidator {
            delegator,
            validator,
        })
        .await
    }

    pub async fn staking_params(&self) -> Result<Value> {
        self.one(Query::StakingParams).await
    }

    /// Bonded and unbonded token totals.
    pub async fn staking_pool(&self) -> Result<Value> {
        self.one(Query::StakingPool).await
    }

    /// Every validator, regardless of status.
    pub async fn validators(&self) -> Result<Vec<Value>> {
        self.all(Query::Validators).await
    }

    pub async fn validator(&self, validator: &str) -> Result<Value> {
        self.one(Query::Validator { validator }).await
    }

    /// Delegations received by a validator.
    pub async fn validator_delegations(&self, validator: &str) -> Result<Vec<Value>> {
        self.all(Query::ValidatorDelegations { validator }).await
    }

    /// Delegation of one delegator to a validator.
    pub async fn validator_delegation(&self, validator: &str, delegator: &str) -> Result<Value> {
        self.one(Query::ValidatorDelegation {
            validator,
            delegator,
        })
        .await
    }

    /// Unbonding delegation of one delegator from a validator.
    pub async fn validator_unbonding_delegation(
        &self,
        validator: &str,
        delegator: &str,
    ) -> Result<Value> {
        self.one(Query::ValidatorUnbondingDelegation {
            validator,
            delegator,
        })
        .await
    }

    /// Every unbonding delegation from a validator.
    pub async fn validator_unbonding_delegations(&self, validator: &str) -> Result<Vec<Value>> {
        self.all(Query::ValidatorUnbondingDelegations { validator })
            .await
    }

    // ── Mint ─────────────────────────────────────────────────────

    pub async fn mint_params(&self) -> Result<Value> {
        self.one(Query::MintParams).await
    }

    pub async fn inflation(&self) -> Result<Value> {
        self.one(Query::Inflation).await
    }

    pub async fn annual_provisions(&self) -> Result<Value> {
        self.one(Query::AnnualProvisions).await
    }

    // ── Tx ───────────────────────────────────────────────────────

    /// A transaction by hash.
    pub async fn tx(&self, hash: &str) -> Result<Value> {
        self.one(Query::Tx { hash }).await
    }

    // ── Node RPC ─────────────────────────────────────────────────

    pub async fn abci_info(&self) -> Result<Value> {
        self.one(Query::AbciInfo).await
    }

    /// Block at a given height.
    pub async fn block(&self, height: u64) -> Result<Value> {
        self.one(Query::Block { height }).await
    }

    /// Execution results of the block at a given height.
    pub async fn block_results(&self, height: u64) -> Result<Value> {
        self.one(Query::BlockResults { height }).await
    }

    /// Commit (signed header) for a given height.
    pub async fn commit(&self, height: u64) -> Result<Value> {
        self.one(Query::Commit { height }).await
    }

    pub async fn consensus_state(&self) -> Result<Value> {
        self.one(Query::ConsensusState).await
    }

    pub async fn dump_consensus_state(&self) -> Result<Value> {
        self.one(Query::DumpConsensusState).await
    }

    pub async fn genesis(&self) -> Result<Value> {
        self.one(Query::Genesis).await
    }

    /// Network state of the node: listeners and peers.
    pub async fn net_info(&self) -> Result<Value> {
        self.one(Query::NetInfo).await
    }

    pub async fn num_unconfirmed_txs(&self) -> Result<Value> {
        self.one(Query::NumUnconfirmedTxs).await
    }

    /// Node status: node info, sync info and validator info.
    pub async fn status(&self) -> Result<Value> {
        self.one(Query::Status).await
    }
}

fn endpoint_with_params(base: Base, path: &str, params: &[(&str, &str)]) -> Endpoint {
    params
        .iter()
        .fold(Endpoint::new(base, path), |endpoint, (key, value)| {
            endpoint.param(*key, value)
        })
}

fn trim_trailing_slash(url: &mut String) {
    if url.ends_with('/') {
        url.pop();
    }
}

fn failed(url: &str, cause: impl Into<FailureCause>) -> QueryFailed {
    let err = QueryFailed::new(url, cause);
    tracing::warn!(target: CLIENT, url, cause = %err.cause(), "query failed");
    err
}
