//! Cookie stores backing the cart identity.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cookie::time::OffsetDateTime;
use cookie::{Cookie, CookieJar};
use thiserror::Error;
use tracing::warn;

/// Errors from persisting cookies.
#[derive(Debug, Error)]
pub enum CookieStoreError {
    /// Reading or writing the backing file failed.
    #[error("Cookie file error: {0}")]
    Io(#[from] io::Error),
}

/// Cookie read/write surface for the cart identity.
///
/// A web integration implements this over the request/response cookie
/// headers; [`MemoryCookieStore`] and [`FileCookieStore`] cover tests and
/// command-line use.
pub trait CookieStore: Send + Sync + 'static {
    /// Value of a live cookie.
    fn get(&self, name: &str) -> Option<String>;

    /// Write a cookie with its attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie could not be persisted.
    fn set(&self, cookie: Cookie<'static>) -> Result<(), CookieStoreError>;

    /// Delete a cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion could not be persisted.
    fn remove(&self, name: &str) -> Result<(), CookieStoreError>;
}

impl<T: CookieStore + ?Sized> CookieStore for Arc<T> {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn set(&self, cookie: Cookie<'static>) -> Result<(), CookieStoreError> {
        (**self).set(cookie)
    }

    fn remove(&self, name: &str) -> Result<(), CookieStoreError> {
        (**self).remove(name)
    }
}

fn is_expired(cookie: &Cookie<'_>) -> bool {
    cookie
        .expires_datetime()
        .is_some_and(|expires| expires <= OffsetDateTime::now_utc())
}

fn live_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .filter(|cookie| !is_expired(cookie))
        .map(|cookie| cookie.value().to_string())
}

// =============================================================================
// MemoryCookieStore
// =============================================================================

/// An in-process cookie jar.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    jar: Mutex<CookieJar>,
}

impl MemoryCookieStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full cookie, attributes included.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<Cookie<'static>> {
        self.lock().get(name).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, CookieJar> {
        self.jar.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        live_value(&self.lock(), name)
    }

    fn set(&self, cookie: Cookie<'static>) -> Result<(), CookieStoreError> {
        self.lock().add(cookie);
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), CookieStoreError> {
        self.lock().remove(Cookie::from(name.to_string()));
        Ok(())
    }
}

// =============================================================================
// FileCookieStore
// =============================================================================

/// Cookies persisted as `Set-Cookie` lines in a file.
///
/// The file is re-read on every access, so separate processes sharing the
/// path see each other's writes. A missing file is an empty jar.
#[derive(Debug)]
pub struct FileCookieStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCookieStore {
    /// Store cookies at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<CookieJar, CookieStoreError> {
        let mut jar = CookieJar::new();

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(jar),
            Err(e) => return Err(e.into()),
        };

        for line in contents.lines().filter(|line| !line.trim().is_empty()) {
            match Cookie::parse(line.to_string()) {
                Ok(cookie) if !is_expired(&cookie) => jar.add_original(cookie),
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, path = %self.path.display(), "Skipping malformed cookie line");
                }
            }
        }

        Ok(jar)
    }

    fn save(&self, jar: &CookieJar) -> Result<(), CookieStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut contents = String::new();
        for cookie in jar.iter() {
            contents.push_str(&cookie.to_string());
            contents.push('\n');
        }

        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut CookieJar)) -> Result<(), CookieStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut jar = self.load()?;
        apply(&mut jar);
        self.save(&jar)
    }
}

impl CookieStore for FileCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        match self.load() {
            Ok(jar) => live_value(&jar, name),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Failed to read cookie file");
                None
            }
        }
    }

    fn set(&self, cookie: Cookie<'static>) -> Result<(), CookieStoreError> {
        self.update(|jar| jar.add(cookie))
    }

    fn remove(&self, name: &str) -> Result<(), CookieStoreError> {
        let name = name.to_string();
        self.update(|jar| jar.remove(Cookie::from(name)))
    }
}
