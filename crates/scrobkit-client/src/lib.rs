// SPDX-License-Identifier: GPL-3.0-or-later

//! Last.fm web service client.
//!
//! This crate provides a client for the Last.fm API: catalogue reads
//! for artists, albums, tracks, tags and charts, authenticated user
//! reads, and signed listening-history writes (scrobbling, now-playing
//! announcements, loving tracks). Responses decode through the
//! [`scrobkit_model`] types, which absorb the service's loosely typed
//! wire format.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod scrobble;
pub mod signature;

pub use auth::Session;
pub use client::{LastfmClient, LastfmClientBuilder};
pub use error::{LastfmError, Result};

pub use scrobkit_model as model;
