//! The DNS-fallback transport: build a query, send it over UDP, parse
//! the wire response (spec §4.5).

mod client;
mod message_builder;
mod response_parser;
mod transport;

pub use client::UdpDnsClient;
