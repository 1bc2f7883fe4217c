// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run identifier.

crate::define_id! {
    /// Unique identifier for one launch of a monitored pipeline.
    ///
    /// Only used for correlating tracing output; the child process never
    /// sees it.
    pub struct RunId;
}

impl RunId {
    /// Generate a fresh random run id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
