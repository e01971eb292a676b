//! A value owned in one place and used from several tasks through cloneable handles.
//!
//! Every access goes through the mutex. Keep guards short lived: take the
//! lock for a read or a mutation and drop it before any timed wait or I/O.
use core::ops::{Deref, DerefMut};
use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    mutex::{Mutex, MutexGuard, TryLockError},
};

pub struct Shared<M, T>
where
    M: RawMutex,
{
    t: Mutex<M, T>,
}

impl<M, T> Shared<M, T>
where
    M: RawMutex,
{
    pub const fn new(t: T) -> Self {
        Self { t: Mutex::new(t) }
    }

    pub fn handle(&self) -> Handle<'_, M, T> {
        Handle { handle: &self.t }
    }
}

pub struct Handle<'a, M, T>
where
    M: RawMutex,
{
    handle: &'a Mutex<M, T>,
}

impl<'a, M, T> Clone for Handle<'a, M, T>
where
    M: RawMutex,
{
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
        }
    }
}

impl<'a, M, T> Copy for Handle<'a, M, T> where M: RawMutex {}

pub struct HandleGuard<'a, M, T>
where
    M: RawMutex,
{
    guard: MutexGuard<'a, M, T>,
}

impl<'a, M, T> Handle<'a, M, T>
where
    M: RawMutex,
{
    /// Wait for the lock. There is no timeout.
    pub async fn lock(&self) -> HandleGuard<'a, M, T> {
        HandleGuard {
            guard: self.handle.lock().await,
        }
    }

    pub fn try_lock(&self) -> Result<HandleGuard<'a, M, T>, TryLockError> {
        let guard = self.handle.try_lock()?;
        Ok(HandleGuard { guard })
    }

    /// Run `f` under the lock. The lock is released before this returns.
    pub async fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.lock().await;
        f(&mut *guard)
    }

    /// Whether some other holder currently has the lock.
    pub fn is_locked(&self) -> bool {
        self.handle.try_lock().is_err()
    }
}

impl<'a, M, T> Deref for HandleGuard<'a, M, T>
where
    M: RawMutex,
{
    type Target = T;
    fn deref(&self) -> &Self::Target {
        self.guard.deref()
    }
}

impl<'a, M, T> DerefMut for HandleGuard<'a, M, T>
where
    M: RawMutex,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.guard.deref_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use futures::executor::block_on;

    #[test]
    fn test_with_releases_lock() {
        let shared: Shared<NoopRawMutex, u32> = Shared::new(1);
        let handle = shared.handle();
        let seen = block_on(handle.with(|v| {
            *v += 1;
            *v
        }));
        assert_eq!(2, seen);
        assert!(!handle.is_locked());
    }

    #[test]
    fn test_guard_blocks_other_handles() {
        let shared: Shared<NoopRawMutex, u32> = Shared::new(7);
        let a = shared.handle();
        let b = a;
        let guard = block_on(a.lock());
        assert_eq!(7, *guard);
        assert!(b.is_locked());
        assert!(b.try_lock().is_err());
        drop(guard);
        assert!(!b.is_locked());
        assert_eq!(7, *b.try_lock().unwrap());
    }
}
