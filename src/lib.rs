//! Floodgate - Fixed-Window Request Admission Control
//!
//! This crate implements a per-identifier request rate limiter using
//! fixed-window counting. A host request-handling layer (HTTP middleware,
//! RPC interceptor) supplies an opaque client identifier per request and
//! receives an allow/deny [`Decision`](ratelimit::Decision) with
//! remaining-quota and reset-time metadata; the crate itself serves
//! nothing.

pub mod config;
pub mod error;
pub mod ratelimit;
