use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Cooperative cancellation flag shared between a caller and a running enumeration.
///
/// Cloning the token yields a handle to the same flag. Workers poll
/// [`CancelToken::is_cancelled`] between roots and between growth plies; once set, the flag
/// stays set.
///
/// # Examples
/// ```
/// use ringstats::utils::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
///
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a fresh token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every computation holding this token
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns *true* once [`CancelToken::cancel`] was called on any clone
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_between_threads() {
        let token = CancelToken::new();
        let remote = token.clone();

        std::thread::spawn(move || remote.cancel())
            .join()
            .expect("thread panicked");

        assert!(token.is_cancelled());
    }
}
