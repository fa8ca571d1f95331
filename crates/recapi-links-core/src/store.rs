/// Link store: deferred and eager resolution of link-parameter bundles
use serde_json::Value;
use std::fmt;

use crate::config::{LinksConfig, MissingKeyPolicy};
use crate::error::LinksError;
use crate::template::assemble_url;
use crate::value::VariableSet;

/// A hostname that is either a fixed value or produced on demand.
pub enum HostSource {
    Value(String),
    Supplier(Box<dyn Fn() -> String + Send + Sync>),
}

impl HostSource {
    /// Creates a supplier-backed host, evaluated at resolution time.
    pub fn supplier(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Supplier(Box::new(f))
    }

    pub fn get(&self) -> String {
        match self {
            Self::Value(host) => host.clone(),
            Self::Supplier(f) => f(),
        }
    }
}

impl fmt::Debug for HostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(host) => f.debug_tuple("Value").field(host).finish(),
            Self::Supplier(_) => f.debug_tuple("Supplier").field(&"<fn>").finish(),
        }
    }
}

impl From<&str> for HostSource {
    fn from(host: &str) -> Self {
        Self::Value(host.to_string())
    }
}

impl From<String> for HostSource {
    fn from(host: String) -> Self {
        Self::Value(host)
    }
}

/// Opaque handle to a bundle registered in a [`LinkStore`].
///
/// Producers keep the handle and read the current bundle state back through
/// the store, instead of holding an aliased reference into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BundleHandle(usize);

#[derive(Debug)]
struct Bundle {
    namespace: String,
    entries: VariableSet,
    resolved: bool,
}

/// Accumulates link-parameter bundles under namespaces and resolves them
/// against a configuration.
///
/// Each registered entry maps a link key to a parameter mapping; resolution
/// replaces the mapping in place with the rendered URL string. This is a
/// single-shot transformation: the store tracks a per-bundle resolved flag
/// and later passes skip bundles that were already rendered, so mixing
/// eager registration with an explicit `resolve` call cannot double-expand
/// a link.
///
/// With a configuration supplied up front the store resolves each bundle
/// inside `register` (eager mode); otherwise resolution is deferred to an
/// explicit [`LinkStore::resolve`] call.
#[derive(Debug)]
pub struct LinkStore {
    url_scheme: String,
    host: Option<HostSource>,
    config: Option<LinksConfig>,
    context: VariableSet,
    policy: MissingKeyPolicy,
    bundles: Vec<Bundle>,
}

impl Default for LinkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkStore {
    pub fn new() -> Self {
        Self {
            url_scheme: "https".to_string(),
            host: None,
            config: None,
            context: VariableSet::new(),
            policy: MissingKeyPolicy::default(),
            bundles: Vec::new(),
        }
    }

    pub fn with_host(mut self, host: impl Into<HostSource>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_url_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.url_scheme = scheme.into();
        self
    }

    /// Supplies a configuration at construction time, enabling eager mode.
    pub fn with_config(mut self, config: LinksConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Ambient variables merged under every bundle's local variables.
    pub fn with_context(mut self, context: VariableSet) -> Self {
        self.context = context;
        self
    }

    pub fn with_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The effective hostname, if configured.
    pub fn host(&self) -> Option<String> {
        self.host.as_ref().map(HostSource::get)
    }

    /// Registers a bundle of link parameters under a namespace.
    ///
    /// In eager mode (configuration supplied at construction) the bundle is
    /// resolved immediately; otherwise it stays pending until
    /// [`LinkStore::resolve`].
    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        entries: VariableSet,
    ) -> Result<BundleHandle, LinksError> {
        let handle = BundleHandle(self.bundles.len());
        self.bundles.push(Bundle {
            namespace: namespace.into(),
            entries,
            resolved: false,
        });

        let Self {
            url_scheme,
            host,
            config,
            context,
            policy,
            bundles,
        } = self;
        if let (Some(config), Some(bundle)) = (config.as_ref(), bundles.last_mut()) {
            resolve_bundle(bundle, config, context, url_scheme, host.as_ref(), *policy)?;
        }

        Ok(handle)
    }

    /// Resolves all pending bundles against the stored configuration.
    pub fn resolve(&mut self) -> Result<(), LinksError> {
        self.resolve_with(None, None)
    }

    /// Resolves all pending bundles, optionally overriding the
    /// configuration and ambient context for this pass.
    ///
    /// Fails with [`LinksError::MissingConfig`] when no configuration is
    /// available at all. Already-resolved bundles are skipped.
    pub fn resolve_with(
        &mut self,
        config: Option<&LinksConfig>,
        context: Option<&VariableSet>,
    ) -> Result<(), LinksError> {
        let Self {
            url_scheme,
            host,
            config: own_config,
            context: own_context,
            policy,
            bundles,
        } = self;
        let config = config
            .or(own_config.as_ref())
            .ok_or(LinksError::MissingConfig)?;
        let context = context.unwrap_or(own_context);

        for bundle in bundles.iter_mut().filter(|b| !b.resolved) {
            resolve_bundle(bundle, config, context, url_scheme, host.as_ref(), *policy)?;
        }
        Ok(())
    }

    /// Current state of a registered bundle.
    pub fn get(&self, handle: BundleHandle) -> Option<&VariableSet> {
        self.bundles.get(handle.0).map(|b| &b.entries)
    }

    pub fn is_resolved(&self, handle: BundleHandle) -> bool {
        self.bundles.get(handle.0).is_some_and(|b| b.resolved)
    }

    /// Consumes the store, yielding every bundle with its namespace.
    pub fn into_bundles(self) -> Vec<(String, VariableSet)> {
        self.bundles
            .into_iter()
            .map(|b| (b.namespace, b.entries))
            .collect()
    }
}

/// Renders every entry of one bundle in place.
fn resolve_bundle(
    bundle: &mut Bundle,
    config: &LinksConfig,
    context: &VariableSet,
    url_scheme: &str,
    host: Option<&HostSource>,
    policy: MissingKeyPolicy,
) -> Result<(), LinksError> {
    let Some(section) = config.namespace(&bundle.namespace) else {
        return match policy {
            MissingKeyPolicy::Strict => {
                Err(LinksError::UnknownNamespace(bundle.namespace.clone()))
            }
            MissingKeyPolicy::Ignore => {
                bundle.entries.clear();
                bundle.resolved = true;
                Ok(())
            }
        };
    };

    let host = host.map(HostSource::get);
    let keys: Vec<String> = bundle.entries.keys().cloned().collect();
    for key in keys {
        let Some(template) = section.get(&key) else {
            match policy {
                MissingKeyPolicy::Strict => {
                    return Err(LinksError::UnknownLinkKey {
                        namespace: bundle.namespace.clone(),
                        key,
                    });
                }
                MissingKeyPolicy::Ignore => {
                    bundle.entries.remove(&key);
                    continue;
                }
            }
        };

        // Bundle-local variables win over ambient context on collision.
        let mut vars = context.clone();
        if let Some(Value::Object(local)) = bundle.entries.get(&key) {
            for (k, v) in local {
                vars.insert(k.clone(), v.clone());
            }
        }

        let path = template.expand(&vars)?;
        let url = assemble_url(url_scheme, host.as_deref(), &path);
        bundle.entries.insert(key, Value::String(url));
    }

    bundle.resolved = true;
    Ok(())
}
