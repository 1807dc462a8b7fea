// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Tether crates.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "anchored_adapter")]
pub mod anchored;
