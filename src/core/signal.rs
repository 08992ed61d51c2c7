//! Interrupt handling.
//!
//! While an [`InterruptGuard`] is alive, SIGINT, SIGTERM and SIGHUP do not
//! kill the process. They set a flag instead and interrupt blocking reads
//! (`EINTR`), so the code holding the guard can unwind normally and every
//! `Drop` cleanup (terminal restoration, scratch deletion) runs. Dropping the
//! guard reinstates the previous dispositions.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Whether an interrupt arrived while a guard was installed.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

#[cfg(unix)]
const SIGNALS: [libc::c_int; 3] = [libc::SIGINT, libc::SIGTERM, libc::SIGHUP];

#[cfg(unix)]
extern "C" fn on_signal(_signal: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Scoped interrupt hook.
#[must_use = "the hook is removed when the guard is dropped"]
pub struct InterruptGuard {
    #[cfg(unix)]
    previous: Vec<(libc::c_int, libc::sigaction)>,
}

impl InterruptGuard {
    /// Install the hook and clear any stale interrupt flag.
    ///
    /// # Errors
    ///
    /// Returns the OS error if a handler cannot be installed; handlers
    /// installed before the failure are restored.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        INTERRUPTED.store(false, Ordering::SeqCst);

        let mut guard = Self {
            previous: Vec::with_capacity(SIGNALS.len()),
        };

        for signal in SIGNALS {
            // SAFETY: a zeroed sigaction is a valid "no flags, empty mask"
            // value, and the handler only touches an atomic.
            unsafe {
                let mut action: libc::sigaction = std::mem::zeroed();
                action.sa_sigaction = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
                // No SA_RESTART: blocking reads must return EINTR
                action.sa_flags = 0;
                libc::sigemptyset(&mut action.sa_mask);

                let mut old: libc::sigaction = std::mem::zeroed();
                if libc::sigaction(signal, &action, &mut old) != 0 {
                    return Err(io::Error::last_os_error());
                }
                guard.previous.push((signal, old));
            }
        }

        Ok(guard)
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        INTERRUPTED.store(false, Ordering::SeqCst);
        Ok(Self {})
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            for (signal, old) in self.previous.drain(..).rev() {
                // SAFETY: restoring a disposition previously returned by sigaction
                unsafe {
                    libc::sigaction(signal, &old, std::ptr::null_mut());
                }
            }
        }
    }
}

/// Serializes tests that install the hook; dispositions are process-wide.
#[cfg(test)]
pub(crate) fn serial() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
