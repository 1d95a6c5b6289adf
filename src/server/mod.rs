// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! Rocket server assembly and HTTP handlers
//!
//! This module provides the server builder ([`build_rocket`],
//! [`server_figment`]), the five route handlers, and the HTML page
//! rendering helpers.

mod builder;
pub mod handlers;
mod pages;

pub use builder::{build_rocket, server_figment};
