// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Pathcraft demo: replay path data on a recording canvas

fn main() -> anyhow::Result<()> {
    pathcraft::run()
}
