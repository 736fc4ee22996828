//! Culture resolution
//!
//! Produces the one culture that applies to a request. Sources, in order:
//!
//! 1. the culture prefix of the request URL
//! 2. the culture already stored for the request
//! 3. the configured default culture, only when the default is excluded from
//!    URLs (a URL without a prefix then means "the default culture")
//!
//! Configuration is passed in on every call and the stored value is reached
//! through a caller-owned [`CultureStore`]. In [`ResolutionMode::Strict`] a
//! missing store or missing required culture is an error; in lenient mode it
//! just means "no culture".

use serde::{Deserialize, Serialize};

use crate::models::Culture;
use crate::services::culture_store::CultureStore;
use crate::services::url_parser;
use crate::utils::{CultureError, CultureResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    #[default]
    Lenient,
    Strict,
}

/// Inputs for a single resolution call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionConfig {
    pub default_culture: Option<Culture>,
    pub exclude_default_from_url: bool,
    pub mode: ResolutionMode,
}

impl ResolutionConfig {
    pub fn new(default_culture: Option<Culture>, exclude_default_from_url: bool) -> Self {
        Self { default_culture, exclude_default_from_url, mode: ResolutionMode::Lenient }
    }

    pub fn strict(mut self) -> Self {
        self.mode = ResolutionMode::Strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.mode == ResolutionMode::Strict
    }

    /// Default culture to fall back to, if the exclusion policy is active
    fn fallback(&self) -> CultureResult<Option<Culture>> {
        if !self.exclude_default_from_url {
            return Ok(None);
        }
        match &self.default_culture {
            Some(culture) => Ok(Some(culture.clone())),
            None if self.is_strict() => Err(CultureError::missing_argument("default culture")),
            None => Ok(None),
        }
    }

    /// True if `culture` is the default and should be left out of URLs
    pub fn is_excluded_from_url(&self, culture: &Culture) -> bool {
        self.exclude_default_from_url && self.default_culture.as_ref() == Some(culture)
    }

    fn require_store<'a, S: ?Sized>(
        &self,
        store: Option<&'a mut S>,
    ) -> CultureResult<Option<&'a mut S>> {
        match store {
            None if self.is_strict() => Err(CultureError::missing_dependency("culture store")),
            store => Ok(store),
        }
    }
}

/// Resolve the culture for a request and store it for later reads.
///
/// A culture taken from the URL or the default is written to the store; a
/// culture read from the store is left as is. `Ok(None)` means no source
/// produced a culture.
pub fn resolve<S>(
    url: &str,
    config: &ResolutionConfig,
    store: Option<&mut S>,
) -> CultureResult<Option<Culture>>
where
    S: CultureStore + ?Sized,
{
    let store = config.require_store(store)?;

    if let Some(culture) = url_parser::extract_culture(url) {
        tracing::debug!("Resolved culture {} from url {}", culture, url);
        if let Some(store) = store {
            store.set(Some(culture.clone()));
        }
        return Ok(Some(culture));
    }

    if let Some(culture) = store.as_deref().and_then(|store| store.get()) {
        tracing::debug!("Resolved culture {} from request store", culture);
        return Ok(Some(culture));
    }

    let fallback = config.fallback()?;
    match &fallback {
        Some(culture) => {
            tracing::debug!("Resolved default culture {} for {}", culture, url);
            if let Some(store) = store {
                store.set(Some(culture.clone()));
            }
        },
        None => tracing::debug!("No culture resolved for {}", url),
    }
    Ok(fallback)
}

/// Read the stored culture without looking at any URL.
///
/// Falls back to the default culture under the exclusion policy. Never writes.
pub fn stored<S>(config: &ResolutionConfig, store: Option<&S>) -> CultureResult<Option<Culture>>
where
    S: CultureStore + ?Sized,
{
    if store.is_none() && config.is_strict() {
        return Err(CultureError::missing_dependency("culture store"));
    }

    match store.and_then(|store| store.get()) {
        Some(culture) => Ok(Some(culture)),
        None => config.fallback(),
    }
}

/// Store a culture for the request.
///
/// Under the exclusion policy `None` is replaced by the default culture. In
/// strict mode there must be something to store.
pub fn set_stored<S>(
    culture: Option<Culture>,
    config: &ResolutionConfig,
    store: Option<&mut S>,
) -> CultureResult<()>
where
    S: CultureStore + ?Sized,
{
    let store = config.require_store(store)?;

    let culture = match culture {
        Some(culture) => Some(culture),
        None => config.fallback()?,
    };
    if culture.is_none() && config.is_strict() {
        return Err(CultureError::missing_argument("culture"));
    }

    match store {
        Some(store) => {
            tracing::debug!(
                "Storing culture {:?} for request",
                culture.as_ref().map(Culture::as_str)
            );
            store.set(culture);
        },
        None => tracing::debug!("No culture store available, culture not stored"),
    }
    Ok(())
}

/// Language of the resolved culture (`en` for `en-us`)
pub fn resolve_language<S>(
    url: &str,
    config: &ResolutionConfig,
    store: Option<&mut S>,
) -> CultureResult<Option<String>>
where
    S: CultureStore + ?Sized,
{
    Ok(resolve(url, config, store)?.map(|culture| culture.language().to_string()))
}

/// Region of the resolved culture (`us` for `en-us`)
pub fn resolve_region<S>(
    url: &str,
    config: &ResolutionConfig,
    store: Option<&mut S>,
) -> CultureResult<Option<String>>
where
    S: CultureStore + ?Sized,
{
    Ok(resolve(url, config, store)?.map(|culture| culture.region().to_string()))
}

/// Build a link to `url` for `culture`.
///
/// Any culture prefix already on `url` is replaced. The default culture is
/// left out when the exclusion policy is active, as is a missing culture.
pub fn localize_url(url: &str, culture: Option<&Culture>, config: &ResolutionConfig) -> String {
    let path = url_parser::strip_culture(url, true);
    match culture {
        Some(culture) if !config.is_excluded_from_url(culture) => {
            url_parser::prefix_culture(&path, culture)
        },
        _ => path,
    }
}
