use std::{any::Any, fmt, sync::Arc};

use crate::{PrimitiveRead, PrimitiveWrite, Result};

/// The payload of a custom kind.
///
/// Blanket-implemented for every `Clone + PartialEq + Debug` type that is
/// `Send + Sync + 'static`, so registrants normally just pick a plain struct.
pub trait CustomPayload: Any + fmt::Debug + Send + Sync {
    fn clone_box(&self) -> Box<dyn CustomPayload>;

    fn eq_dyn(&self, other: &dyn CustomPayload) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any + Clone + PartialEq + fmt::Debug + Send + Sync> CustomPayload for T {
    fn clone_box(&self) -> Box<dyn CustomPayload> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn CustomPayload) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Decode and encode strategy for one custom kind, registered with a
/// [`KindRegistry`](crate::KindRegistry) under a wire id.
///
/// The wire format gives custom payloads no length prefix: `decode` must
/// consume exactly the bytes `encode` produces.
pub trait CustomKind: Send + Sync + 'static {
    /// Human-readable name, used in logs and `Debug` output.
    fn name(&self) -> &str;

    /// A fresh empty payload.
    fn empty(&self) -> Box<dyn CustomPayload>;

    fn decode(&self, input: &mut dyn PrimitiveRead) -> Result<Box<dyn CustomPayload>>;

    /// Writes `payload`, which was produced by this strategy's `empty` or
    /// `decode`, or handed to [`CustomValue::new`].
    fn encode(&self, payload: &dyn CustomPayload, output: &mut dyn PrimitiveWrite) -> Result<()>;
}

impl fmt::Debug for dyn CustomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomKind").field(&self.name()).finish()
    }
}

/// A value of a registered custom kind: its wire id, the strategy that
/// encodes it, and an opaque payload.
pub struct CustomValue {
    id: u8,
    strategy: Arc<dyn CustomKind>,
    payload: Box<dyn CustomPayload>,
}

impl CustomValue {
    /// Pairs `payload` with the strategy registered for `id`. Prefer
    /// [`KindRegistry::construct_custom`](crate::KindRegistry::construct_custom), which
    /// looks the strategy up.
    pub fn new(id: u8, strategy: Arc<dyn CustomKind>, payload: Box<dyn CustomPayload>) -> Self {
        Self {
            id,
            strategy,
            payload,
        }
    }

    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    #[inline]
    pub fn strategy(&self) -> &Arc<dyn CustomKind> {
        &self.strategy
    }

    #[inline]
    pub fn payload(&self) -> &dyn CustomPayload {
        self.payload.as_ref()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.as_any().downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.payload.as_any_mut().downcast_mut()
    }

    pub(crate) fn encode(&self, output: &mut dyn PrimitiveWrite) -> Result<()> {
        self.strategy.encode(self.payload.as_ref(), output)
    }
}

impl Clone for CustomValue {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            strategy: Arc::clone(&self.strategy),
            payload: self.payload.clone_box(),
        }
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.payload.eq_dyn(other.payload.as_ref())
    }
}

impl Eq for CustomValue {}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValue")
            .field("id", &self.id)
            .field("kind", &self.strategy.name())
            .field("payload", &self.payload)
            .finish()
    }
}
