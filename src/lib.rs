//! Async client for the query endpoints of a Cosmos SDK node.
//!
//! A node exposes two independent HTTP surfaces: the REST state-query endpoint
//! (`/cosmos/...` paths) and the node RPC endpoint (`/status`, `/block`, ...).
//! This crate wraps both behind one client with a method per query. List
//! queries follow the `pagination.next_key` cursor until the last page and
//! return every item in order.
//!
//! # Features
//!
//! - **`client`** (enabled by default) — [`CosmosQueryClient`] and the
//!   `reqwest`-backed [`HttpTransport`]. Without it only the query table,
//!   URL construction and configuration types are available.
//!
//! # Quick start
//!
//! ```no_run
//! use cosmos_query_client::{CosmosQueryClient, ProposalStatus};
//!
//! #[tokio::main]
//! async fn main() -> cosmos_query_client::Result<()> {
//!     let client = CosmosQueryClient::new(
//!         "https://api.chihuahua.wtf",
//!         "https://rpc.chihuahua.wtf",
//!         "uhuahua",
//!     );
//!     let status = client.status().await?;
//!     println!("Latest block: {}", status["result"]["sync_info"]["latest_block_height"]);
//!
//!     let voting = client.proposals(Some(ProposalStatus::VotingPeriod)).await?;
//!     println!("Proposals in voting period: {}", voting.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod endpoint;
pub mod error;
pub mod pagination;
pub mod proposal_status;
pub mod query;
pub mod transport;

#[cfg(feature = "client")]
pub mod client;

/// `tracing` target for every event emitted by this crate.
pub const CLIENT: &str = "cosmos_query_client";

pub use config::{ClientConfig, ConfigError};
pub use endpoint::{Base, Endpoint};
pub use error::{FailureCause, QueryFailed, Result};
pub use pagination::ContinuationParams;
pub use proposal_status::ProposalStatus;
pub use query::Query;
pub use transport::{HttpResponse, Transport, TransportError};

#[cfg(feature = "client")]
pub use client::{CosmosQueryClient, QueryResponse};

#[cfg(feature = "client")]
pub use transport::HttpTransport;
