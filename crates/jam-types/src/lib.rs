// Path: crates/jam-types/src/lib.rs
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
//! The data model of the JAM consensus/execution core: blocks, validator
//! keys, tickets, disputes, service accounts, recent history, and the
//! shared protocol configuration.

pub mod block;
pub mod codec_impl;
pub mod config;
pub mod dispute;
pub mod error;
pub mod history;
pub mod primitives;
pub mod service;
pub mod ticket;
pub mod validator;

pub use block::{Block, Body, EpochMark, Header, WinnersMark};
pub use config::ProtocolConfig;
pub use dispute::{Culprit, Dispute, Fault, Judgment, Verdict};
pub use error::ErrorCode;
pub use history::RecentHistoryEntry;
pub use primitives::{H32, H64};
pub use service::{RequestStatus, ServiceAccount};
pub use ticket::{Ticket, TicketProof};
pub use validator::{ValidatorKey, ValidatorSet};
