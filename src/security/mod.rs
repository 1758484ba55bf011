// ABOUTME: Web security helpers shared by route handlers
// ABOUTME: Currently the session cookie codec used by the HTML pages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session cookie parsing and `Set-Cookie` construction
pub mod cookies;
