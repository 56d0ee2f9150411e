// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable examples for the Sapling workspace. See `examples/`.
