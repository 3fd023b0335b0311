// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Reuse pool for frequently produced errors.
//!
//! Each pooled status code owns a bounded stack of released instances. The
//! factory pops from it when asked for a bare error of that status; callers
//! push back with [`ErrorPool::release`]. Released instances are stripped to
//! the canonical shape for their status before they are stored, and their
//! stack is cleared so the next owner captures a fresh one on demand.
//!
//! Release takes the error by value, so an instance can neither be released
//! twice nor used after it was handed back.

use crate::config::PoolConfig;
use crate::http_error::HttpError;
use crate::registry::TypeRegistry;
use fnv::FnvHashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Bounded per-status pools of reusable errors.
#[derive(Debug)]
pub struct ErrorPool {
    slots: FnvHashMap<u16, Mutex<Vec<HttpError>>>,
    capacity: usize,
    registry: Arc<TypeRegistry>,
}

impl ErrorPool {
    /// Creates empty pools for the configured codes.
    ///
    /// # Arguments
    ///
    /// * `config` - Which codes to pool and how many instances each keeps
    /// * `registry` - Registry used to restore released errors to their canonical shape
    pub fn new(config: &PoolConfig, registry: Arc<TypeRegistry>) -> Self {
        let slots = if config.enabled {
            config
                .codes
                .iter()
                .map(|code| (*code, Mutex::new(Vec::new())))
                .collect()
        } else {
            FnvHashMap::default()
        };

        Self {
            slots,
            capacity: config.size,
            registry,
        }
    }

    /// Whether `status` has a pool.
    pub fn is_pooled(&self, status: u16) -> bool {
        self.slots.contains_key(&status)
    }

    /// Maximum number of instances kept per status.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of instances currently pooled for `status`.
    pub fn len(&self, status: u16) -> usize {
        self.slots.get(&status).map_or(0, |slot| slot.lock().len())
    }

    /// Takes a pooled instance for `status`, if one is available.
    ///
    /// The returned error has no cached stack.
    pub fn acquire(&self, status: u16) -> Option<HttpError> {
        let mut err = self.slots.get(&status)?.lock().pop()?;
        err.clear_stack();
        tracing::trace!(status, "served error from pool");
        Some(err)
    }

    /// Hands an error back for reuse.
    ///
    /// Returns `true` if the error was pooled. Errors for unpooled statuses,
    /// or for pools already at capacity, are dropped.
    pub fn release(&self, mut err: HttpError) -> bool {
        let status = err.status();
        let Some(slot) = self.slots.get(&status) else {
            tracing::trace!(status, "status is not pooled, dropping error");
            return false;
        };

        let mut pooled = slot.lock();
        if pooled.len() >= self.capacity {
            tracing::trace!(status, "pool at capacity, dropping error");
            return false;
        }

        let variant = self.registry.class_for(status).cloned();
        let message = match &variant {
            Some(variant) => variant.default_message().to_string(),
            None => self.registry.phrase(status).unwrap_or_default().to_string(),
        };
        err.reset(variant, &message);
        pooled.push(err);
        true
    }

    /// Drops every pooled instance.
    pub fn clear(&self) {
        for slot in self.slots.values() {
            slot.lock().clear();
        }
    }
}
