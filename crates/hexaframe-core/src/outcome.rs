//! Two-variant success/failure container.
//!
//! [`Outcome`] is what the execution engine hands back to its callers. It
//! mirrors [`std::result::Result`] closely and converts to and from it, so
//! hook code can keep using `?` while the boundary keeps a dedicated type.
//!
//! ```rust
//! use hexaframe_core::outcome::Outcome;
//!
//! let res: Outcome<i32, String> = Outcome::Ok(2);
//! let doubled = res.map(|v| v * 2).and_then(|v| {
//!     if v > 10 { Outcome::Err("too big".to_string()) } else { Outcome::Ok(v) }
//! });
//! assert_eq!(doubled, Outcome::Ok(4));
//! ```

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

/// Either a success value (`Ok`) or a failure value (`Err`).
///
/// Every combinator consumes `self` and returns a new value; closures run at
/// most once and a panic inside one propagates to the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[must_use = "this `Outcome` may be an `Err` variant, which should be handled"]
pub enum Outcome<T, E> {
    /// Success.
    Ok(T),
    /// Failure.
    Err(E),
}

impl<T, E> Outcome<T, E> {
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// The success value, if any.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    /// The failure value, if any.
    pub fn err(self) -> Option<E> {
        match self {
            Self::Ok(_) => None,
            Self::Err(error) => Some(error),
        }
    }

    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    // -------------------------------------------------------------------------
    // Transformations
    // -------------------------------------------------------------------------

    /// Apply `f` to the success value; failures pass through.
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Apply `f` to the failure value; successes pass through.
    pub fn map_err<G, F>(self, f: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => Outcome::Err(f(error)),
        }
    }

    /// Monadic bind. `f` is never called for `Err`.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Self::Ok(value) => f(value),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Dual of [`and_then`](Self::and_then): recover from a failure.
    pub fn or_else<G, F>(self, f: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> Outcome<T, G>,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => f(error),
        }
    }

    /// Collapse to a single value by applying exactly one branch.
    pub fn fold<U, FO, FE>(self, on_ok: FO, on_err: FE) -> U
    where
        FO: FnOnce(T) -> U,
        FE: FnOnce(E) -> U,
    {
        match self {
            Self::Ok(value) => on_ok(value),
            Self::Err(error) => on_err(error),
        }
    }

    // -------------------------------------------------------------------------
    // Async transformations
    // -------------------------------------------------------------------------

    /// Like [`map`](Self::map), but `f` returns a future which is awaited.
    pub async fn async_map<U, F, Fut>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value).await),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Like [`and_then`](Self::and_then), but `f` returns a future of an outcome.
    pub async fn async_and_then<U, F, Fut>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U, E>>,
    {
        match self {
            Self::Ok(value) => f(value).await,
            Self::Err(error) => Outcome::Err(error),
        }
    }

    // -------------------------------------------------------------------------
    // Unwraps
    // -------------------------------------------------------------------------

    /// The success value, or `default` on failure.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => default,
        }
    }

    /// The success value, or the result of `producer` on failure.
    pub fn unwrap_or_else<F>(self, producer: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => producer(),
        }
    }

    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(T::default)
    }

    /// Convert into a standard library `Result`.
    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }
}

impl<T, E: fmt::Debug> Outcome<T, E> {
    /// The success value.
    ///
    /// # Panics
    ///
    /// Panics on `Err`, embedding the failure value in the message.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(error) => panic!("called unwrap() on Err: {error:?}"),
        }
    }

    /// The success value.
    ///
    /// # Panics
    ///
    /// Panics on `Err` with `"{message}: {error:?}"`.
    #[track_caller]
    pub fn expect(self, message: &str) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(error) => panic!("{message}: {error:?}"),
        }
    }
}

impl<T: fmt::Debug, E> Outcome<T, E> {
    /// The failure value.
    ///
    /// # Panics
    ///
    /// Panics on `Ok`, embedding the success value in the message.
    #[track_caller]
    pub fn unwrap_err(self) -> E {
        match self {
            Self::Ok(value) => panic!("called unwrap_err() on Ok: {value:?}"),
            Self::Err(error) => error,
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Err(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Ok(value) => Ok(value),
            Outcome::Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use proptest::prelude::*;

    use super::*;

    type O = Outcome<i32, String>;

    fn halve(v: i32) -> O {
        if v % 2 == 0 {
            Outcome::Ok(v / 2)
        } else {
            Outcome::Err(format!("{v} is odd"))
        }
    }

    #[test]
    fn map_touches_only_success() {
        assert_eq!(O::Ok(2).map(|v| v + 1), Outcome::Ok(3));
        assert_eq!(
            O::Err("e".into()).map(|v| v + 1),
            Outcome::Err("e".to_string())
        );
    }

    #[test]
    fn map_err_touches_only_failure() {
        assert_eq!(O::Ok(2).map_err(|e| e.len()), Outcome::Ok(2));
        assert_eq!(O::Err("abc".into()).map_err(|e| e.len()), Outcome::Err(3));
    }

    #[test]
    fn and_then_never_calls_f_on_err() {
        let called = Cell::new(false);
        let res = O::Err("nope".into()).and_then(|v| {
            called.set(true);
            halve(v)
        });
        assert!(!called.get());
        assert_eq!(res, Outcome::Err("nope".to_string()));
    }

    #[test]
    fn or_else_recovers_failures() {
        let res: Outcome<i32, ()> = O::Err("x".into()).or_else(|_| Outcome::Ok(0));
        assert_eq!(res, Outcome::Ok(0));
        let untouched: Outcome<i32, ()> = O::Ok(5).or_else(|_| Outcome::Ok(0));
        assert_eq!(untouched, Outcome::Ok(5));
    }

    #[test]
    fn fold_applies_exactly_one_branch() {
        assert_eq!(O::Ok(4).fold(|v| v.to_string(), |e| e), "4");
        assert_eq!(O::Err("bad".into()).fold(|v| v.to_string(), |e| e), "bad");
    }

    #[test]
    fn unwrap_or_on_err_returns_default() {
        assert_eq!(O::Err("e".into()).unwrap_or(9), 9);
    }

    #[test]
    fn unwrap_or_else_is_lazy() {
        let called = Cell::new(0);
        let value = O::Ok(1).unwrap_or_else(|| {
            called.set(called.get() + 1);
            0
        });
        assert_eq!(value, 1);
        assert_eq!(called.get(), 0);

        let value = O::Err("e".into()).unwrap_or_else(|| {
            called.set(called.get() + 1);
            42
        });
        assert_eq!(value, 42);
        assert_eq!(called.get(), 1);
    }

    #[test]
    #[should_panic(expected = "called unwrap() on Err: \"kaput\"")]
    fn unwrap_on_err_panics_with_error() {
        let _ = O::Err("kaput".into()).unwrap();
    }

    #[test]
    #[should_panic(expected = "needed a value: \"kaput\"")]
    fn expect_on_err_embeds_message() {
        let _ = O::Err("kaput".into()).expect("needed a value");
    }

    #[test]
    #[should_panic(expected = "called unwrap_err() on Ok: 3")]
    fn unwrap_err_on_ok_panics() {
        let _ = O::Ok(3).unwrap_err();
    }

    #[test]
    #[should_panic(expected = "inside map")]
    fn panics_in_closures_propagate() {
        let _ = O::Ok(1).map(|_| -> i32 { panic!("inside map") });
    }

    #[test]
    fn converts_to_and_from_result() {
        let res: Result<i32, String> = O::Ok(1).into();
        assert_eq!(res, Ok(1));
        let back: O = Err::<i32, String>("x".into()).into();
        assert_eq!(back, Outcome::Err("x".to_string()));
        assert_eq!(O::Ok(1).ok(), Some(1));
        assert_eq!(O::Ok(1).err(), None);
    }

    #[tokio::test]
    async fn async_map_awaits_the_closure() {
        let res = O::Ok(20).async_map(|v| async move { v + 1 }).await;
        assert_eq!(res, Outcome::Ok(21));
    }

    #[tokio::test]
    async fn async_and_then_short_circuits() {
        let res = O::Err("stop".into())
            .async_and_then(|v| async move { halve(v) })
            .await;
        assert_eq!(res, Outcome::Err("stop".to_string()));

        let res = O::Ok(8).async_and_then(|v| async move { halve(v) }).await;
        assert_eq!(res, Outcome::Ok(4));
    }

    fn any_outcome() -> impl Strategy<Value = O> {
        prop_oneof![
            any::<i32>().prop_map(Outcome::Ok),
            any::<String>().prop_map(Outcome::Err),
        ]
    }

    proptest! {
        #[test]
        fn and_then_chain_matches_manual_fold(start in any_outcome(), step in any::<i32>()) {
            let add = |v: i32| {
                if v % 3 == 0 {
                    O::Err(format!("{v} divisible by 3"))
                } else {
                    O::Ok(v.wrapping_add(step))
                }
            };
            let chained = start.clone().and_then(add).and_then(halve);
            let manual = match start {
                Outcome::Ok(v) => add(v).and_then(halve),
                Outcome::Err(e) => Outcome::Err(e),
            };
            prop_assert_eq!(chained, manual);
        }

        #[test]
        fn unwrap_or_ignores_default_on_ok(value in any::<i32>(), default in any::<i32>()) {
            prop_assert_eq!(O::Ok(value).unwrap_or(default), value);
        }

        #[test]
        fn map_identity_is_a_no_op(start in any_outcome()) {
            prop_assert_eq!(start.clone().map(|v| v), start);
        }
    }
}
