use crate::cell::{Cell, CellState};
use hotparam_core::{DynamicType, ParamError};
use url::Url;

/// Custom acceptance rule for [`DynUrl`]
pub type UrlValidator = Box<dyn Fn(&Url) -> Result<(), ParamError> + Send + Sync>;

const PASSWORD_PLACEHOLDER: &str = "xxxxx";

/// Dynamic URL parameter.
///
/// By default a URL needs a host. Passwords embedded in the URL are masked
/// whenever the value is displayed.
pub struct DynUrl {
    validator: Option<UrlValidator>,
    cell: Cell<Option<Url>>,
}

impl DynUrl {
    #[must_use]
    pub fn new(default: Url) -> Self {
        Self::with_default(Some(default))
    }

    /// A URL parameter without a default
    #[must_use]
    pub fn empty() -> Self {
        Self::with_default(None)
    }

    fn with_default(default: Option<Url>) -> Self {
        Self {
            validator: None,
            cell: Cell::new(default),
        }
    }

    /// Replace the default acceptance rule
    #[must_use]
    pub fn validate_with(
        mut self,
        f: impl Fn(&Url) -> Result<(), ParamError> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_update(mut self, f: impl Fn(Option<&Url>) + Send + Sync + 'static) -> Self {
        self.cell = self
            .cell
            .on_update(move |value: &Option<Url>| f(value.as_ref()));
        self
    }

    pub fn state(&self) -> CellState {
        self.cell.state()
    }

    fn parse(&self, raw: &str) -> Result<Url, ParamError> {
        let url = parse_url(raw)?;
        match &self.validator {
            Some(validator) => validator(&url)?,
            None => require_host(&url)?,
        }
        Ok(url)
    }
}

/// Parse an absolute URL into a parameter error on failure
pub fn parse_url(raw: &str) -> Result<Url, ParamError> {
    Url::parse(raw).map_err(|err| ParamError::invalid(format!("invalid URL: {err}")))
}

fn require_host(url: &Url) -> Result<(), ParamError> {
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ParamError::invalid("host of the URL is required"));
    }
    Ok(())
}

fn redacted(url: &Url) -> String {
    if url.password().is_none() {
        return url.to_string();
    }
    let mut masked = url.clone();
    match masked.set_password(Some(PASSWORD_PLACEHOLDER)) {
        Ok(()) => masked.to_string(),
        Err(()) => url.to_string(),
    }
}

impl DynamicType for DynUrl {
    type Value = Option<Url>;

    fn value(&self) -> Option<Url> {
        self.cell.get()
    }

    fn unmarshal_param(&self, raw: Option<&str>) -> Result<(), ParamError> {
        let next = raw.map(|raw| self.parse(raw)).transpose()?;
        // a retracted value falls back to the default, which may itself be absent
        self.cell.store(next.map(Some));
        Ok(())
    }

    fn value_valid(&self, raw: &str) -> Result<(), ParamError> {
        self.parse(raw).map(drop)
    }

    fn default_value(&self) -> Result<String, ParamError> {
        Ok(self
            .cell
            .default_ref()
            .as_ref()
            .map(redacted)
            .unwrap_or_default())
    }

    fn redact_value(&self, raw: &str) -> String {
        match self.parse(raw) {
            Ok(url) => redacted(&url),
            Err(_) => raw.to_string(),
        }
    }

    fn describe_type(&self) -> String {
        "url".to_string()
    }
}

impl std::fmt::Debug for DynUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynUrl")
            .field("value", &self.cell.with(|v| v.as_ref().map(redacted)))
            .field("custom_validator", &self.validator.is_some())
            .finish()
    }
}
