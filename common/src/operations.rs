//! Operations a [`Handler`] may be executed with.
//!
//! Each operation wraps its argument, so the same [`Handler`] can implement
//! e.g. both `Select<T>` and `Update<T>` of the same `T`.

use std::marker::PhantomData;

use crate::Handler;

/// Reading of a stored value.
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Storing of a new value.
#[derive(Clone, Copy, Debug)]
pub struct Insert<T>(pub T);

/// Overwriting of an already stored value.
#[derive(Clone, Copy, Debug)]
pub struct Update<T>(pub T);

/// Exclusive locking of a stored value until the surrounding transaction ends.
#[derive(Clone, Copy, Debug)]
pub struct Lock<T>(pub T);

/// Launching of a long-running process.
#[derive(Clone, Copy, Debug)]
pub struct Start<T>(pub T);

/// Single run of a process.
#[derive(Clone, Copy, Debug)]
pub struct Perform<T>(pub T);

/// Beginning of a transaction.
#[derive(Clone, Copy, Debug)]
pub struct Transact;

/// [`Handler`] a [`Transact`] operation results in.
pub type Transacted<T> = <T as Handler<Transact>>::Ok;

/// Committing of a [`Transact`]ed [`Handler`].
#[derive(Clone, Copy, Debug)]
pub struct Commit;

/// Selector of a `W` value by a `B` key.
///
/// `W` only tags the operation, so selecting different values by the same key
/// type stays distinguishable.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    /// Tag of the selected value.
    _what: PhantomData<W>,

    /// Key to select by.
    by: B,
}

impl<W, B> By<W, B> {
    /// Creates a new [`By`] selector out of the provided key.
    #[must_use]
    pub fn new(by: B) -> Self {
        Self {
            _what: PhantomData,
            by,
        }
    }

    /// Returns the key of this [`By`] selector.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
