//! # visitlog
//!
//! HTTP visit recorder: persists the IP address of every visitor into
//! a PostgreSQL `visits` table and renders a short acknowledgment page.
//!
//! Per request the flow is strictly linear:
//! lease connection → ensure schema → extract address → insert →
//! render → release.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── Recorder + read handlers (api/)
//!     │
//!     ├── VisitService (service/)
//!     │
//!     └── PostgreSQL Persistence (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod persistence;
pub mod service;
