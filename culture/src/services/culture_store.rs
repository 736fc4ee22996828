//! Per-request culture storage
//!
//! The resolver never owns the stored culture. It reads and writes it through
//! a [`CultureStore`] that belongs to the caller's request. Values written are
//! visible to later reads on the same store and to nothing else.
//!
//! Two kinds of store are provided: a plain [`CultureSlot`] and the HTTP
//! request extensions bag (`Extensions`, `Parts` and `Request<B>`), where the
//! value lives under the [`RequestCulture`] type key.

use axum::http::{Extensions, Request, request::Parts};

use crate::models::Culture;

/// Read/write access to the culture stored for one request
pub trait CultureStore {
    fn get(&self) -> Option<Culture>;

    /// Store a culture, or clear the stored value with `None`
    fn set(&mut self, culture: Option<Culture>);
}

/// An owned slot holding at most one culture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CultureSlot(Option<Culture>);

impl CultureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_culture(culture: Culture) -> Self {
        Self(Some(culture))
    }
}

impl CultureStore for CultureSlot {
    fn get(&self) -> Option<Culture> {
        self.0.clone()
    }

    fn set(&mut self, culture: Option<Culture>) {
        self.0 = culture;
    }
}

/// Extension key for the culture resolved for a request.
///
/// Handlers can read it with `Extension<RequestCulture>` once a resolver has
/// stored it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCulture(pub Culture);

impl CultureStore for Extensions {
    fn get(&self) -> Option<Culture> {
        Extensions::get::<RequestCulture>(self).map(|stored| stored.0.clone())
    }

    fn set(&mut self, culture: Option<Culture>) {
        match culture {
            Some(culture) => {
                self.insert(RequestCulture(culture));
            },
            None => {
                self.remove::<RequestCulture>();
            },
        }
    }
}

impl CultureStore for Parts {
    fn get(&self) -> Option<Culture> {
        CultureStore::get(&self.extensions)
    }

    fn set(&mut self, culture: Option<Culture>) {
        CultureStore::set(&mut self.extensions, culture)
    }
}

impl<B> CultureStore for Request<B> {
    fn get(&self) -> Option<Culture> {
        CultureStore::get(self.extensions())
    }

    fn set(&mut self, culture: Option<Culture>) {
        CultureStore::set(self.extensions_mut(), culture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn culture(code: &str) -> Culture {
        Culture::parse(code).unwrap()
    }

    #[test]
    fn test_slot_set_get_clear() {
        let mut slot = CultureSlot::new();
        assert_eq!(slot.get(), None);

        slot.set(Some(culture("en-us")));
        assert_eq!(slot.get(), Some(culture("en-us")));
        // Reads do not consume the value.
        assert_eq!(slot.get(), Some(culture("en-us")));

        slot.set(None);
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn test_extensions_store() {
        let mut extensions = Extensions::new();
        assert_eq!(CultureStore::get(&extensions), None);

        CultureStore::set(&mut extensions, Some(culture("es-mx")));
        assert_eq!(CultureStore::get(&extensions), Some(culture("es-mx")));
        assert_eq!(
            extensions.get::<RequestCulture>(),
            Some(&RequestCulture(culture("es-mx")))
        );

        CultureStore::set(&mut extensions, None);
        assert_eq!(CultureStore::get(&extensions), None);
    }

    #[test]
    fn test_request_store_is_per_request() {
        let mut first = Request::builder().uri("/en-us/about").body(Body::empty()).unwrap();
        let second = Request::builder().uri("/about").body(Body::empty()).unwrap();

        CultureStore::set(&mut first, Some(culture("en-us")));

        assert_eq!(CultureStore::get(&first), Some(culture("en-us")));
        assert_eq!(CultureStore::get(&second), None);
    }

    #[test]
    fn test_parts_share_request_extensions() {
        let mut request = Request::builder().uri("/").body(Body::empty()).unwrap();
        CultureStore::set(&mut request, Some(culture("fr-ca")));

        let (mut parts, _body) = request.into_parts();
        assert_eq!(CultureStore::get(&parts), Some(culture("fr-ca")));

        CultureStore::set(&mut parts, Some(culture("fr-fr")));
        let request = Request::from_parts(parts, Body::empty());
        assert_eq!(CultureStore::get(&request), Some(culture("fr-fr")));
    }
}
