//! Client bridge between a spreadsheet widget UI and its message-based
//! backend.
//!
//! The backend is a stateful step engine reachable only through an opaque,
//! asynchronous comm channel. This crate owns everything between a typed
//! façade call and the UI state the host renders from:
//!
//! # Core Concepts
//!
//! - **Correlator** ([`ApiClient::send`]): mints a correlation id per
//!   request, obtains the transport lazily (memoized on first success),
//!   delivers exactly one message, and awaits exactly one response.
//! - **Loading tracker**: a request that outlives the grace window
//!   (500 ms by default) is surfaced in the UI loading list; fast calls
//!   never flicker a spinner because the grace timer is cancelled before
//!   it fires.
//! - **Reconciler**: classifies each response, replaces whichever shared
//!   state slices the response carries (wholesale, never merged), routes
//!   modal-worthy errors into the UI modal slot, and hands the
//!   operation result back to the caller — all before the call returns.
//! - **Typed façade** ([`ApiClient`] methods): one method per backend
//!   operation, generated over the operation table in
//!   [`sheetlink_protocol::ops`]. Edit methods thread a [`StepHandle`]
//!   to choose overwrite-vs-append explicitly.
//! - **Transport seam** ([`Transport`] / [`TransportProvider`]): the comm
//!   channel is supplied by the host. [`ChannelTransport`] adapts any
//!   duplex message channel and correlates responses by id.
//!
//! # Concurrency
//!
//! Any number of requests may be outstanding; responses are matched by id,
//! never by order. Two responses touching the same state slice race by
//! design: each replaces the whole slice, so the last reconciliation wins.
//! In-flight requests cannot be cancelled; only the grace timer is scoped
//! to the call.
//!
//! # Example
//!
//! ```ignore
//! use sheetlink_client::{ApiClient, StateStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(StateStore::new());
//! let client = ApiClient::new(provider, store.clone());
//!
//! // Queries return typed results; edits return a step handle that can
//! // be threaded back to overwrite the same step.
//! let step = client.sort_column(0, "col_a".into(), SortDirection::Ascending, None).await?;
//! let step = client.sort_column(0, "col_a".into(), SortDirection::Descending, Some(&step)).await?;
//! ```

mod api;
mod client;
mod config;
mod store;
mod transport;

pub use api::StepHandle;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use store::{StateSink, StateStore};
pub use transport::{ChannelTransport, Transport, TransportProvider};

pub use sheetlink_contract as contract;
pub use sheetlink_protocol as protocol;
