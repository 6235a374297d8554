//! `agent` is the domain used to control a running identity agent (issuer, holder,
//! verifier, mediator or endorser) from the outside.
//!
//! The sub-domains:
//!
//! - `admin`, the request/response capability against the agent admin API
//! - `relationship`, per-peer records owning the [`relationship::ReadinessSignal`]
//! - `connection`, the initiator that creates or receives invitations
//! - `webhook`, the topic dispatcher that resolves readiness signals
//! - `mediation`, the bounded mediation grant poller and the wallet-to-mediator flow
//! - `endorser`, the multi-use endorser invitation flow
//! - `schema`, schema and credential definition publishing
//!
//! ---
//!
//! The rendezvous works like this:
//!
//! ```text
//! Initiator                       Agent                      Dispatcher
//! ├── arm(relationship)
//! ├── POST create-invitation ───► │
//! │◄── invitation ────────────────┤
//! ├── await_ready() ...           ├── webhook: connections ─►│
//! │                               │                          ├── match relationship
//! │◄─────────────────────────────────────────── resolve(true)┤
//! └── resumes
//! ```
pub mod admin;
pub mod connection;
pub mod endorser;
pub mod mediation;
pub mod relationship;
pub mod schema;
pub mod webhook;
