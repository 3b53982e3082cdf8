//! Caller-supplied operation shapes and per-invocation options.
//!
//! An operation is either `Plain` (one function for the whole batch) or
//! `Grouped` (named groups, each with a discriminating predicate and its own
//! function). The split is resolved at the call site instead of by runtime
//! shape inspection.

use std::future::Future;
use std::pin::Pin;

use crate::recorder::ItemRecorder;
use crate::status::BulkStatus;

/// Boxed future alias used for all caller-supplied async work.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Result type of caller-supplied operations; failures are opaque causes.
pub type OpResult<T> = anyhow::Result<T>;

pub type StatusFn<I> = Box<dyn FnOnce(Vec<I>) -> BoxFuture<OpResult<BulkStatus>> + Send>;
pub type CountedFn<I> = Box<dyn FnOnce(Vec<I>) -> BoxFuture<OpResult<usize>> + Send>;
pub type ItemizedFn<I> =
    Box<dyn FnOnce(Vec<I>, ItemRecorder<I>) -> BoxFuture<OpResult<()>> + Send>;
pub type PreprocessFn<I> = Box<dyn FnOnce(Vec<I>) -> BoxFuture<OpResult<Vec<I>>> + Send>;

/// Predicate deciding whether an item belongs to a group. Fallible: a
/// discriminator failure is handled per the invoking mode's isolation rules.
pub type Discriminator<I> = Box<dyn Fn(&I) -> OpResult<bool> + Send>;

/// Whole-batch operation returning a single status, or a set of named
/// groups each returning their own.
pub enum StatusOperation<I> {
    Plain(StatusFn<I>),
    Grouped(Vec<StatusGroup<I>>),
}

impl<I> StatusOperation<I> {
    pub fn plain<F, Fut>(operation: F) -> Self
    where
        F: FnOnce(Vec<I>) -> Fut + Send + 'static,
        Fut: Future<Output = OpResult<BulkStatus>> + Send + 'static,
    {
        Self::Plain(Box::new(move |items| Box::pin(operation(items))))
    }

    pub fn grouped(groups: Vec<StatusGroup<I>>) -> Self {
        Self::Grouped(groups)
    }
}

/// One named group of a grouped status operation.
pub struct StatusGroup<I> {
    pub(crate) name: String,
    pub(crate) discriminator: Discriminator<I>,
    pub(crate) operation: StatusFn<I>,
}

impl<I> StatusGroup<I> {
    pub fn new<D, F, Fut>(name: impl Into<String>, discriminator: D, operation: F) -> Self
    where
        D: Fn(&I) -> OpResult<bool> + Send + 'static,
        F: FnOnce(Vec<I>) -> Fut + Send + 'static,
        Fut: Future<Output = OpResult<BulkStatus>> + Send + 'static,
    {
        Self {
            name: name.into(),
            discriminator: Box::new(discriminator),
            operation: Box::new(move |items| Box::pin(operation(items))),
        }
    }
}

/// Whole-batch operation returning how many items succeeded, or a set of
/// named groups each counting their own subset.
pub enum CountedOperation<I> {
    Plain(CountedFn<I>),
    Grouped(Vec<CountedGroup<I>>),
}

impl<I> CountedOperation<I> {
    pub fn plain<F, Fut>(operation: F) -> Self
    where
        F: FnOnce(Vec<I>) -> Fut + Send + 'static,
        Fut: Future<Output = OpResult<usize>> + Send + 'static,
    {
        Self::Plain(Box::new(move |items| Box::pin(operation(items))))
    }

    pub fn grouped(groups: Vec<CountedGroup<I>>) -> Self {
        Self::Grouped(groups)
    }
}

/// One named group of a grouped counted operation.
pub struct CountedGroup<I> {
    pub(crate) name: String,
    pub(crate) discriminator: Discriminator<I>,
    pub(crate) operation: CountedFn<I>,
}

impl<I> CountedGroup<I> {
    pub fn new<D, F, Fut>(name: impl Into<String>, discriminator: D, operation: F) -> Self
    where
        D: Fn(&I) -> OpResult<bool> + Send + 'static,
        F: FnOnce(Vec<I>) -> Fut + Send + 'static,
        Fut: Future<Output = OpResult<usize>> + Send + 'static,
    {
        Self {
            name: name.into(),
            discriminator: Box::new(discriminator),
            operation: Box::new(move |items| Box::pin(operation(items))),
        }
    }
}

/// Whole-batch operation reporting per-item outcomes through an
/// `ItemRecorder`, or a set of named groups doing the same for their
/// subsets.
pub enum ItemizedOperation<I> {
    Plain(ItemizedFn<I>),
    Grouped(Vec<ItemizedGroup<I>>),
}

impl<I> ItemizedOperation<I> {
    pub fn plain<F, Fut>(operation: F) -> Self
    where
        F: FnOnce(Vec<I>, ItemRecorder<I>) -> Fut + Send + 'static,
        Fut: Future<Output = OpResult<()>> + Send + 'static,
    {
        Self::Plain(Box::new(move |items, recorder| {
            Box::pin(operation(items, recorder))
        }))
    }

    pub fn grouped(groups: Vec<ItemizedGroup<I>>) -> Self {
        Self::Grouped(groups)
    }
}

/// One named group of a grouped itemized operation.
pub struct ItemizedGroup<I> {
    pub(crate) name: String,
    pub(crate) discriminator: Discriminator<I>,
    pub(crate) operation: ItemizedFn<I>,
}

impl<I> ItemizedGroup<I> {
    pub fn new<D, F, Fut>(name: impl Into<String>, discriminator: D, operation: F) -> Self
    where
        D: Fn(&I) -> OpResult<bool> + Send + 'static,
        F: FnOnce(Vec<I>, ItemRecorder<I>) -> Fut + Send + 'static,
        Fut: Future<Output = OpResult<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            discriminator: Box::new(discriminator),
            operation: Box::new(move |items, recorder| {
                Box::pin(operation(items, recorder))
            }),
        }
    }
}

/// Per-invocation options shared by all entry points.
pub struct BulkOptions<I> {
    pub(crate) preprocess: Option<PreprocessFn<I>>,
    pub(crate) include_success_items: bool,
}

impl<I> BulkOptions<I> {
    pub fn new() -> Self {
        Self {
            preprocess: None,
            include_success_items: true,
        }
    }

    /// Transform or filter the input once before dispatch.
    pub fn preprocess<F, Fut>(mut self, preprocess: F) -> Self
    where
        F: FnOnce(Vec<I>) -> Fut + Send + 'static,
        Fut: Future<Output = OpResult<Vec<I>>> + Send + 'static,
    {
        self.preprocess = Some(Box::new(move |items| Box::pin(preprocess(items))));
        self
    }

    /// Keep success counts but drop success records (itemized mode only).
    pub fn without_success_items(mut self) -> Self {
        self.include_success_items = false;
        self
    }
}

impl<I> Default for BulkOptions<I> {
    fn default() -> Self {
        Self::new()
    }
}
