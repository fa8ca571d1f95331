/// Stateless link rendering for serialization output
use crate::error::TemplateError;
use crate::store::HostSource;
use crate::template::{assemble_url, LinkTemplate};
use crate::value::VariableSet;

/// Renders single links immediately, without batch bookkeeping.
///
/// Used when links must be computed directly during serialization output
/// rather than deferred through a [`crate::store::LinkStore`].
#[derive(Debug)]
pub struct LinkFactory {
    url_scheme: String,
    host: Option<HostSource>,
}

impl Default for LinkFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkFactory {
    pub fn new() -> Self {
        Self {
            url_scheme: "https".to_string(),
            host: None,
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

    /// Expands the template and assembles the final URL.
    pub fn create_link(
        &self,
        template: &LinkTemplate,
        vars: &VariableSet,
    ) -> Result<String, TemplateError> {
        let path = template.expand(vars)?;
        let host = self.host.as_ref().map(HostSource::get);
        Ok(assemble_url(&self.url_scheme, host.as_deref(), &path))
    }
}

/// A single link specification tied to an object type.
///
/// Carries the template, a variable extractor, an optional permission
/// action and a `when` predicate. Gated-off links render as `Ok(None)` -
/// an explicit no-value, never an empty string.
pub struct Link<T> {
    template: LinkTemplate,
    params: Box<dyn Fn(&T) -> VariableSet + Send + Sync>,
    permission: Option<String>,
    when: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Link<T> {
    pub fn new(
        template: LinkTemplate,
        params: impl Fn(&T) -> VariableSet + Send + Sync + 'static,
    ) -> Self {
        Self {
            template,
            params: Box::new(params),
            permission: None,
            when: Box::new(|_| true),
        }
    }

    /// Names the permission action a caller-supplied check must grant
    /// before this link is rendered.
    pub fn with_permission(mut self, action: impl Into<String>) -> Self {
        self.permission = Some(action.into());
        self
    }

    /// Gates emission on the object itself, independent of permissions.
    pub fn with_when(mut self, when: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.when = Box::new(when);
        self
    }

    /// Renders the link for an object.
    ///
    /// The permission gate only applies when both a check and a permission
    /// action are present. Template failures propagate: they are
    /// configuration errors, not a reason to silently omit the link.
    pub fn render(
        &self,
        obj: &T,
        factory: &LinkFactory,
        permission_check: Option<&dyn Fn(&str) -> bool>,
    ) -> Result<Option<String>, TemplateError> {
        if let (Some(check), Some(action)) = (permission_check, self.permission.as_deref()) {
            if !check(action) {
                return Ok(None);
            }
        }
        if !(self.when)(obj) {
            return Ok(None);
        }
        factory.create_link(&self.template, &(self.params)(obj)).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    struct Record {
        pid: String,
        published: bool,
    }

    fn record_vars(record: &Record) -> VariableSet {
        match json!({"pid_value": record.pid}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn self_link() -> Link<Record> {
        Link::new(
            LinkTemplate::new("/api/records/{pid_value}").unwrap(),
            record_vars,
        )
    }

    #[test]
    fn test_create_link() {
        let factory = LinkFactory::new().with_host("localhost");
        let template = LinkTemplate::new("/api/records/{pid_value}").unwrap();
        let vars = match json!({"pid_value": "12345"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let url = factory.create_link(&template, &vars).unwrap();
        assert_eq!(url, "https://localhost/api/records/12345");
    }

    #[test]
    fn test_create_link_relative_without_host() {
        let factory = LinkFactory::new();
        let template = LinkTemplate::new("/api/records/{pid_value}").unwrap();
        let vars = match json!({"pid_value": "1"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(factory.create_link(&template, &vars).unwrap(), "/api/records/1");
    }

    #[test]
    fn test_render_with_permission_granted_and_denied() {
        let factory = LinkFactory::new().with_host("localhost");
        let record = Record { pid: "1".to_string(), published: true };
        let link = self_link().with_permission("read");

        let allow: &dyn Fn(&str) -> bool = &|action| action == "read";
        let deny: &dyn Fn(&str) -> bool = &|_| false;

        let url = link.render(&record, &factory, Some(allow)).unwrap();
        assert_eq!(url.as_deref(), Some("https://localhost/api/records/1"));
        assert_eq!(link.render(&record, &factory, Some(deny)).unwrap(), None);
    }

    #[test]
    fn test_render_without_check_skips_permission_gate() {
        let factory = LinkFactory::new();
        let record = Record { pid: "1".to_string(), published: true };
        let link = self_link().with_permission("read");
        assert!(link.render(&record, &factory, None).unwrap().is_some());
    }

    #[test]
    fn test_when_predicate_gates_emission() {
        let factory = LinkFactory::new();
        let link = self_link().with_when(|record: &Record| record.published);

        let published = Record { pid: "1".to_string(), published: true };
        let draft = Record { pid: "2".to_string(), published: false };

        assert!(link.render(&published, &factory, None).unwrap().is_some());
        assert_eq!(link.render(&draft, &factory, None).unwrap(), None);
    }
}
