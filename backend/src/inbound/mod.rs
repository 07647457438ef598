//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! Both services expose HTTP/JSON; their handlers live under [`http`].

pub mod http;
