/// Registry of identifier scheme handlers
use crate::schemes::{
    arxiv::ArxivScheme, doi::DoiScheme, handle::HandleScheme, isbn::IsbnScheme,
    isni::IsniScheme, issn::IssnScheme, orcid::OrcidScheme, ror::RorScheme, url::UrlScheme,
    SchemeHandler,
};

/// Ordered collection of scheme handlers.
///
/// Registration order is detection precedence: more specific schemes come
/// before the generic ones they overlap with (orcid before isni, doi
/// before handle, everything before url).
pub struct SchemeRegistry {
    handlers: Vec<Box<dyn SchemeHandler>>,
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::with_default_schemes()
    }
}

impl SchemeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    /// A registry with every built-in scheme handler.
    pub fn with_default_schemes() -> Self {
        Self::with_handlers(vec![
            Box::new(DoiScheme::new()),
            Box::new(ArxivScheme::new()),
            Box::new(OrcidScheme::new()),
            Box::new(IsniScheme::new()),
            Box::new(RorScheme::new()),
            Box::new(IsbnScheme::new()),
            Box::new(IssnScheme::new()),
            Box::new(HandleScheme::new()),
            Box::new(UrlScheme::new()),
        ])
    }

    /// A registry with a specific handler set.
    pub fn with_handlers(handlers: Vec<Box<dyn SchemeHandler>>) -> Self {
        Self { handlers }
    }

    /// Appends a handler at the end of the precedence order.
    pub fn register(&mut self, handler: Box<dyn SchemeHandler>) {
        self.handlers.push(handler);
    }

    pub fn get(&self, scheme: &str) -> Option<&dyn SchemeHandler> {
        self.handlers
            .iter()
            .find(|handler| handler.scheme_id() == scheme)
            .map(Box::as_ref)
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.get(scheme).is_some()
    }

    /// All registered scheme ids, in precedence order.
    pub fn scheme_ids(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|handler| handler.scheme_id()).collect()
    }

    /// All registered handlers, in precedence order.
    pub fn handlers(&self) -> impl Iterator<Item = &dyn SchemeHandler> {
        self.handlers.iter().map(Box::as_ref)
    }

    /// Detects every scheme whose format the identifier satisfies, in
    /// precedence order. The first entry is the most specific match.
    pub fn detect(&self, identifier: &str) -> Vec<&'static str> {
        self.handlers
            .iter()
            .filter(|handler| handler.validate(identifier))
            .map(|handler| handler.scheme_id())
            .collect()
    }
}
