//! Lock-free generation of 64-bit Snowflake IDs.
//!
//! A [`SnowflakeId`] packs a 41-bit millisecond timestamp, a 10-bit node ID
//! and a 12-bit per-millisecond sequence into a non-negative `i64`. A
//! [`SnowflakeGenerator`] issues unique, non-decreasing IDs for one node from
//! any number of threads, coordinating through a single atomic word.
//!
//! ```
//! use snowgen::{SnowflakeGenerator, SnowflakeId, TWITTER_EPOCH};
//!
//! let generator = SnowflakeGenerator::new(1, TWITTER_EPOCH)?;
//! let id = generator.generate()?;
//!
//! assert_eq!(id.node_id(), 1);
//! assert_eq!(id.to_string().parse::<SnowflakeId>()?, id);
//! # Ok::<(), snowgen::Error>(())
//! ```
//!
//! ## Features
//! - `serde`: decimal-string `Serialize`/`Deserialize` for [`SnowflakeId`],
//!   `serde::as_native` for integer formats, and serde support for
//!   [`GeneratorConfig`]
//! - `async-tokio`: [`SnowflakeGenerator::generate_async`]
//! - `tracing`: trace-level spans on the generation path
//! - `cache-padded`: pads the generator state to a cache line
//! - `postgres`: `ToSql`/`FromSql` for [`SnowflakeId`] (`INT8` columns, or
//!   decimal text in `TEXT`, `VARCHAR` and `BYTEA`)

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
#[cfg(feature = "async-tokio")]
mod futures;
mod generator;
mod id;
#[cfg_attr(docsrs, doc(cfg(feature = "postgres")))]
#[cfg(feature = "postgres")]
mod postgres;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
