//! Compression-method registry and selection engine
//!
//! The registry is a process-wide table mapping `(priority, extension)` to
//! a compression method. It is populated once by an explicit registration
//! list at first use and never mutated afterwards; selection re-checks each
//! method's availability on every call, so a tool installed or removed
//! mid-process is picked up on the next resolution.

use crate::codec::{Codec, GZIP, PIGZ, ZIP};
use crate::naming::normalize_extension;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// One registered `(priority, extension)` entry.
pub struct Registration {
    /// Ranking among simultaneously-available methods; higher wins.
    pub priority: i32,
    /// Extension this entry claims, normalized, without a leading dot.
    pub extension: String,
    /// The method registered under this key.
    pub codec: &'static dyn Codec,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("priority", &self.priority)
            .field("extension", &self.extension)
            .field("codec", &self.codec.name())
            .finish()
    }
}

/// Table of registered compression methods keyed by `(priority, extension)`.
#[derive(Default)]
pub struct Registry {
    entries: BTreeMap<(i32, String), &'static dyn Codec>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, codec)| (key, codec.name())))
            .finish()
    }
}

impl Registry {
    /// An empty registry. Mostly useful in tests; production code goes
    /// through [`global`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed startup registration list: zip as the always-available
    /// fallback, the gzip pipeline above it, pigz preferred over both.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(0, ZIP.extensions(), &ZIP);
        registry.register(1, GZIP.extensions(), &GZIP);
        registry.register(2, PIGZ.extensions(), &PIGZ);
        registry
    }

    /// Register `codec` under every extension in `extensions` at the given
    /// priority.
    ///
    /// Registering without any usable extension adds nothing (the method
    /// becomes unreachable through selection) and is logged as a warning.
    /// Re-registering an existing `(priority, extension)` key replaces the
    /// previous method: last registration wins, also logged.
    pub fn register(&mut self, priority: i32, extensions: &[&str], codec: &'static dyn Codec) {
        let mut registered = false;
        for extension in extensions {
            let extension = normalize_extension(extension);
            if extension.is_empty() {
                continue;
            }
            if let Some(previous) = self.entries.insert((priority, extension.clone()), codec) {
                log::warn!(
                    "duplicate registration for (priority {priority}, extension '{extension}'): \
                     '{}' replaces '{}'",
                    codec.name(),
                    previous.name(),
                );
            }
            registered = true;
        }
        if !registered {
            log::warn!(
                "compression method '{}' registered without an extension; it will never be selected",
                codec.name(),
            );
        }
    }

    /// Every registered entry, highest priority first.
    pub fn registrations(&self) -> Vec<Registration> {
        self.entries
            .iter()
            .rev()
            .map(|((priority, extension), codec)| Registration {
                priority: *priority,
                extension: extension.clone(),
                codec: *codec,
            })
            .collect()
    }

    /// Every registered entry whose method is available right now,
    /// optionally restricted to one extension, highest priority first.
    ///
    /// Availability is probed per call, never cached.
    pub fn available(&self, extension: Option<&str>) -> Vec<Registration> {
        let wanted = extension.map(normalize_extension);
        self.registrations()
            .into_iter()
            .filter(|entry| match &wanted {
                Some(ext) => entry.extension == *ext,
                None => true,
            })
            .filter(|entry| entry.codec.is_available())
            .collect()
    }

    /// The available method with the globally highest priority, if any.
    pub fn best(&self) -> Option<&'static dyn Codec> {
        self.available(None).first().map(|entry| entry.codec)
    }

    /// The highest-priority available method claiming `extension`
    /// (case-insensitive, leading dot ignored), if any.
    pub fn for_extension(&self, extension: &str) -> Option<&'static dyn Codec> {
        self.available(Some(extension))
            .first()
            .map(|entry| entry.codec)
    }
}

/// The process-wide registry, built once from the default registration
/// list. The table itself is immutable afterwards; only availability is
/// re-evaluated per call.
pub fn global() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::with_defaults)
}

/// The best available compression method on this host, if any.
///
/// Shorthand for [`Registry::best`] on the [`global`] registry.
pub fn best() -> Option<&'static dyn Codec> {
    global().best()
}

/// The best available compression method for `extension`, if any.
///
/// Shorthand for [`Registry::for_extension`] on the [`global`] registry.
pub fn for_extension(extension: &str) -> Option<&'static dyn Codec> {
    global().for_extension(extension)
}
