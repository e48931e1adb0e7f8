use chrono::Utc;
use std::sync::Arc;

use crate::common::{Value, DOC_CREATED_AT, DOC_UPDATED_AT};
use crate::document::Document;
use crate::errors::DataResult;

/// Contract for implementing entity processors.
///
/// # Purpose
/// Defines the interface for processors that transform documents before they
/// are written through an [EntityFacade](crate::entity::EntityFacade).
/// Processors are the hook point for per-collection default fields: rules
/// like "stamp creation time" or "new orders start as pending" live in a
/// processor chain on the facade instead of being hardcoded into the generic
/// adapter.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; a facade and its processors are
/// shared across threads.
pub trait EntityProcessor: Send + Sync {
    /// Returns the unique name of this processor.
    fn name(&self) -> String;

    /// Processes a payload before it is inserted.
    ///
    /// Called by `create` with the caller's payload; the returned document
    /// is what gets stored. If this method returns an error, the insert does
    /// not happen.
    fn process_before_create(&self, payload: Document) -> DataResult<Document>;

    /// Processes a patch before it is merged into an existing document.
    ///
    /// The default implementation passes the patch through unchanged.
    fn process_before_update(&self, patch: Document) -> DataResult<Document> {
        Ok(patch)
    }
}

/// Wraps an entity processor implementation.
///
/// Type-erased, cheap-clone handle around any [EntityProcessor], shared via
/// `Arc` so a chain can be cloned together with its facade.
#[derive(Clone)]
pub struct Processor {
    inner: Arc<dyn EntityProcessor>,
}

impl Processor {
    /// Creates a new processor from an implementation.
    pub fn new<T: EntityProcessor + 'static>(inner: T) -> Self {
        Processor {
            inner: Arc::new(inner),
        }
    }

    /// Returns the name of the wrapped processor.
    pub fn name(&self) -> String {
        self.inner.name()
    }

    /// See [EntityProcessor::process_before_create].
    pub fn process_before_create(&self, payload: Document) -> DataResult<Document> {
        self.inner.process_before_create(payload)
    }

    /// See [EntityProcessor::process_before_update].
    pub fn process_before_update(&self, patch: Document) -> DataResult<Document> {
        self.inner.process_before_update(patch)
    }
}

/// Stamps `created_at` and `updated_at` timestamps.
///
/// On create, `created_at` is set when the payload does not already carry
/// one, and `updated_at` is always set. On update, `updated_at` is set on
/// the patch.
#[derive(Clone, Default)]
pub struct TimestampProcessor;

impl TimestampProcessor {
    pub fn new() -> Self {
        TimestampProcessor
    }
}

impl EntityProcessor for TimestampProcessor {
    fn name(&self) -> String {
        "timestamp".to_string()
    }

    fn process_before_create(&self, mut payload: Document) -> DataResult<Document> {
        let now = Utc::now();
        if !payload.contains_key(DOC_CREATED_AT) {
            payload.put(DOC_CREATED_AT, now)?;
        }
        payload.put(DOC_UPDATED_AT, now)?;
        Ok(payload)
    }

    fn process_before_update(&self, mut patch: Document) -> DataResult<Document> {
        patch.put(DOC_UPDATED_AT, Utc::now())?;
        Ok(patch)
    }
}

/// Injects a default field on create when the payload does not carry it.
///
/// Typical use is a default status: new registrations start as `"pending"`
/// unless the caller says otherwise. Updates pass through untouched.
#[derive(Clone)]
pub struct DefaultFieldProcessor {
    field: String,
    value: Value,
}

impl DefaultFieldProcessor {
    /// Creates a processor injecting `value` under `field` on create.
    pub fn new<T: Into<Value>>(field: &str, value: T) -> Self {
        DefaultFieldProcessor {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

impl EntityProcessor for DefaultFieldProcessor {
    fn name(&self) -> String {
        format!("default-field:{}", self.field)
    }

    fn process_before_create(&self, mut payload: Document) -> DataResult<Document> {
        if !payload.contains_key(&self.field) {
            payload.put(&self.field, self.value.clone())?;
        }
        Ok(payload)
    }
}
