//! Runtime registration of custom tag kinds.
//!
//! A [`KindRegistry`] maps wire ids outside the built-in range to
//! [`CustomKind`] strategies. Built-in ids resolve without a registration;
//! decoders consult the table whenever they meet an id above
//! [`Kind::MAX_BUILTIN_ID`]. Registries are plain values, so tests
//! and embedders can keep isolated ones; [`KindRegistry::global`] is the
//! shared default used by the convenience entry points.
//!
//! ```
//! use std::sync::Arc;
//! use nbt_select::{CustomKind, CustomPayload, KindRegistry, PrimitiveRead, PrimitiveWrite, Result};
//!
//! struct Uuid;
//!
//! impl CustomKind for Uuid {
//!     fn name(&self) -> &str { "Uuid" }
//!     fn empty(&self) -> Box<dyn CustomPayload> { Box::new(0u128) }
//!     fn decode(&self, input: &mut dyn PrimitiveRead) -> Result<Box<dyn CustomPayload>> {
//!         let hi = input.read_i64()? as u64 as u128;
//!         let lo = input.read_i64()? as u64 as u128;
//!         Ok(Box::new(hi << 64 | lo))
//!     }
//!     fn encode(&self, payload: &dyn CustomPayload, output: &mut dyn PrimitiveWrite) -> Result<()> {
//!         let value = payload.as_any().downcast_ref::<u128>().copied().unwrap_or_default();
//!         output.write_i64((value >> 64) as i64)?;
//!         output.write_i64(value as i64)
//!     }
//! }
//!
//! let registry = KindRegistry::new();
//! registry.register(100, Arc::new(Uuid)).unwrap();
//! assert!(registry.register(100, Arc::new(Uuid)).is_err());
//! assert!(registry.register(3, Arc::new(Uuid)).is_err());
//!
//! assert_eq!(registry.construct(3).unwrap(), nbt_select::Value::Int(0));
//! assert_eq!(registry.resolve(100).unwrap().kind(), nbt_select::Kind::Custom(100));
//! assert!(registry.resolve(101).is_err());
//! ```

use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{CustomKind, CustomValue, Error, Kind, Result, Value};

static GLOBAL: LazyLock<KindRegistry> = LazyLock::new(KindRegistry::new);

/// A resolved kind id, able to build an empty value of that kind.
#[derive(Clone)]
pub enum Constructor {
    /// One of the closed set of kinds the codec handles itself.
    Builtin(Kind),
    /// A registered custom kind and its strategy.
    Custom(u8, Arc<dyn CustomKind>),
}

impl Constructor {
    pub fn kind(&self) -> Kind {
        match self {
            Constructor::Builtin(kind) => *kind,
            Constructor::Custom(id, _) => Kind::Custom(*id),
        }
    }

    /// A fresh value of this kind. Built-in kinds start at their default,
    /// End included; custom kinds at their strategy's empty payload.
    pub fn construct(&self) -> Value {
        match self {
            Constructor::Builtin(kind) => Value::default_for(*kind).unwrap_or(Value::End),
            Constructor::Custom(id, strategy) => {
                Value::Custom(CustomValue::new(*id, Arc::clone(strategy), strategy.empty()))
            }
        }
    }
}

impl std::fmt::Debug for Constructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constructor::Builtin(kind) => f.debug_tuple("Builtin").field(kind).finish(),
            Constructor::Custom(id, strategy) => f
                .debug_tuple("Custom")
                .field(id)
                .field(&strategy.name())
                .finish(),
        }
    }
}

/// Table of custom kind strategies keyed by wire id.
///
/// Lookups take a shared lock and may run from any number of threads;
/// `register`, `unregister` and `clear_all` take the exclusive lock.
#[derive(Default)]
pub struct KindRegistry {
    kinds: RwLock<FxHashMap<u8, Arc<dyn CustomKind>>>,
}

impl KindRegistry {
    /// An empty registry that knows only the built-in kinds.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`read`](crate::read()),
    /// [`select`](crate::select()) and the other entry points without an
    /// explicit registry.
    pub fn global() -> &'static KindRegistry {
        &GLOBAL
    }

    /// Registers `strategy` under `id`.
    ///
    /// Fails with [`Error::AlreadyRegistered`] if `id` belongs to a built-in
    /// kind or is already registered; the registry is left unchanged.
    pub fn register(&self, id: u8, strategy: Arc<dyn CustomKind>) -> Result<()> {
        if Kind::is_builtin_id(id) {
            return Err(Error::AlreadyRegistered(id));
        }
        let mut kinds = self.kinds.write();
        if kinds.contains_key(&id) {
            return Err(Error::AlreadyRegistered(id));
        }
        debug!(id, kind = strategy.name(), "registered custom tag kind");
        kinds.insert(id, strategy);
        Ok(())
    }

    /// Removes the registration of `id`, returning its strategy.
    ///
    /// Fails with [`Error::UnknownKind`] for built-in ids and ids that are not
    /// registered.
    pub fn unregister(&self, id: u8) -> Result<Arc<dyn CustomKind>> {
        if Kind::is_builtin_id(id) {
            return Err(Error::UnknownKind { id, offset: None });
        }
        let removed = self.kinds.write().remove(&id);
        match removed {
            Some(strategy) => {
                debug!(id, kind = strategy.name(), "unregistered custom tag kind");
                Ok(strategy)
            }
            None => Err(Error::UnknownKind { id, offset: None }),
        }
    }

    /// Looks up how to build a value of kind `id`.
    ///
    /// Built-in ids always resolve; custom ids resolve while registered.
    /// Anything else fails with [`Error::UnknownKind`].
    pub fn resolve(&self, id: u8) -> Result<Constructor> {
        match Kind::from_id(id) {
            Kind::Custom(id) => self.strategy(id).map(|strategy| Constructor::Custom(id, strategy)),
            kind => Ok(Constructor::Builtin(kind)),
        }
    }

    /// The strategy registered for custom `id`.
    ///
    /// Built-in ids are decoded by the codec itself and have no strategy;
    /// they, like unregistered ids, fail with [`Error::UnknownKind`].
    pub fn strategy(&self, id: u8) -> Result<Arc<dyn CustomKind>> {
        match self.kinds.read().get(&id) {
            Some(strategy) => Ok(Arc::clone(strategy)),
            None => {
                debug!(id, "unresolved tag kind");
                Err(Error::UnknownKind { id, offset: None })
            }
        }
    }

    /// Builds the empty value of kind `id`: the default of a built-in kind,
    /// or the registered constructor's output for a custom one.
    pub fn construct(&self, id: u8) -> Result<Value> {
        Ok(self.resolve(id)?.construct())
    }

    /// Like [`construct`](Self::construct), but only for custom ids, keeping
    /// the payload reachable through [`CustomValue::downcast_mut`].
    pub fn construct_custom(&self, id: u8) -> Result<CustomValue> {
        let strategy = self.strategy(id)?;
        let payload = strategy.empty();
        Ok(CustomValue::new(id, strategy, payload))
    }

    /// Returns `true` if `id` is built-in or registered.
    pub fn is_known(&self, id: u8) -> bool {
        Kind::is_builtin_id(id) || self.kinds.read().contains_key(&id)
    }

    /// Returns `true` if `id` is a registered custom kind.
    pub fn is_registered(&self, id: u8) -> bool {
        self.kinds.read().contains_key(&id)
    }

    /// Removes every custom registration. Built-in kinds are unaffected.
    pub fn clear_all(&self) {
        let mut kinds = self.kinds.write();
        debug!(count = kinds.len(), "cleared custom tag kinds");
        kinds.clear();
    }

    /// Number of registered custom kinds.
    pub fn len(&self) -> usize {
        self.kinds.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.read().is_empty()
    }

    /// Registered custom ids, ascending.
    pub fn ids(&self) -> Vec<u8> {
        let mut ids: Vec<u8> = self.kinds.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
