//! Lock helpers that never panic on poisoning.
//!
//! A panic inside a user accessor must not make a live value unreadable for
//! every later request, so the guard of a poisoned lock is simply recovered.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Acquires a shared guard, recovering it if the lock is poisoned.
///
/// # Examples
///
/// ```
/// use std::sync::RwLock;
/// use probe_utils::sync::read;
///
/// let lock = RwLock::new(3);
/// assert_eq!(*read(&lock), 3);
/// ```
#[inline]
pub fn read<T: ?Sized>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquires an exclusive guard, recovering it if the lock is poisoned.
///
/// # Examples
///
/// ```
/// use std::sync::RwLock;
/// use probe_utils::sync::write;
///
/// let lock = RwLock::new(3);
/// *write(&lock) += 1;
/// assert_eq!(*lock.read().unwrap(), 4);
/// ```
#[inline]
pub fn write<T: ?Sized>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use super::{read, write};

    #[test]
    fn poisoned_lock_is_recovered() {
        let lock = Arc::new(RwLock::new(1));
        let cloned = Arc::clone(&lock);
        let _ = std::thread::spawn(move || {
            let _guard = cloned.write().unwrap();
            panic!("poison");
        })
        .join();

        assert!(lock.is_poisoned());
        *write(&lock) = 2;
        assert_eq!(*read(&lock), 2);
    }
}
