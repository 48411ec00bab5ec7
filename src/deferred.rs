//! At-most-once deferred work.
//!
//! The stored closure receives the target it operates on when it runs, so the
//! owner keeps exclusive ownership of that target in the meantime.

use std::fmt;

use crate::Result;

type Work<T> = Box<dyn FnOnce(&mut T) -> Result<()>>;

/// A unit of work executed later, at most once
pub struct DeferredCallback<T: ?Sized> {
    label: &'static str,
    work: Option<Work<T>>,
}

impl<T: ?Sized> DeferredCallback<T> {
    pub fn new<F>(label: &'static str, work: F) -> Self
    where
        F: FnOnce(&mut T) -> Result<()> + 'static,
    {
        Self {
            label,
            work: Some(Box::new(work)),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Whether the work can still run
    pub fn is_pending(&self) -> bool {
        self.work.is_some()
    }

    /// Run the work against `target`. Returns `Ok(false)` when it already ran
    /// or was cancelled. The closure is consumed before it runs, so a failing
    /// run is not repeated either.
    pub fn invoke(&mut self, target: &mut T) -> Result<bool> {
        match self.work.take() {
            Some(work) => work(target).map(|()| true),
            None => Ok(false),
        }
    }

    /// Drop the work without running it. Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        self.work.take().is_some()
    }
}

impl<T: ?Sized> fmt::Debug for DeferredCallback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredCallback")
            .field("label", &self.label)
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn runs_exactly_once() {
        let mut cb = DeferredCallback::new("bump", |n: &mut u32| {
            *n += 1;
            Ok(())
        });
        let mut n = 0;
        assert!(cb.invoke(&mut n).unwrap());
        assert!(!cb.invoke(&mut n).unwrap());
        assert_eq!(n, 1);
        assert!(!cb.is_pending());
    }

    #[test]
    fn cancelled_work_never_runs() {
        let mut cb = DeferredCallback::new("bump", |n: &mut u32| {
            *n += 1;
            Ok(())
        });
        assert!(cb.cancel());
        assert!(!cb.cancel());
        let mut n = 0;
        assert!(!cb.invoke(&mut n).unwrap());
        assert_eq!(n, 0);
    }

    #[test]
    fn failure_consumes_the_work() {
        let mut cb = DeferredCallback::new("fail", |_: &mut u32| Err(Error::Surface("down".into())));
        let mut n = 0;
        assert!(cb.invoke(&mut n).is_err());
        assert!(!cb.is_pending());
        assert!(!cb.invoke(&mut n).unwrap());
    }
}
