use crate::cell::{Cell, CellState};
use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::pkcs8::DecodePrivateKey;
use ed25519_dalek::SigningKey;
use hotparam_core::{DynamicType, ParamError, REDACTED_PLACEHOLDER};
use std::fmt;

/// Dynamic Ed25519 private key, given as a PKCS#8 `PRIVATE KEY` PEM block.
///
/// The key never shows up in usage text, dumps or violations: its raw value
/// and its default are always replaced by a placeholder.
pub struct DynEd25519PrivateKey {
    base64: bool,
    cell: Cell<Option<SigningKey>>,
}

impl DynEd25519PrivateKey {
    #[must_use]
    pub fn new(default: SigningKey) -> Self {
        Self::with_default(Some(default))
    }

    /// A key parameter without a default
    #[must_use]
    pub fn empty() -> Self {
        Self::with_default(None)
    }

    fn with_default(default: Option<SigningKey>) -> Self {
        Self {
            base64: false,
            cell: Cell::new(default),
        }
    }

    /// Expect the PEM block wrapped in standard base64, for sources that
    /// cannot carry line breaks
    #[must_use]
    pub fn base64(mut self) -> Self {
        self.base64 = true;
        self
    }

    #[must_use]
    pub fn on_update(mut self, f: impl Fn(Option<&SigningKey>) + Send + Sync + 'static) -> Self {
        self.cell = self
            .cell
            .on_update(move |value: &Option<SigningKey>| f(value.as_ref()));
        self
    }

    pub fn state(&self) -> CellState {
        self.cell.state()
    }

    fn parse(&self, raw: &str) -> Result<SigningKey, ParamError> {
        if !self.base64 {
            return parse_pem(raw);
        }

        let decoded = STANDARD
            .decode(raw.trim())
            .map_err(|_| ParamError::invalid("not a valid base64 document"))?;
        let pem = String::from_utf8(decoded)
            .map_err(|_| ParamError::invalid("base64 content is not a PEM document"))?;
        parse_pem(&pem)
    }
}

fn parse_pem(pem: &str) -> Result<SigningKey, ParamError> {
    SigningKey::from_pkcs8_pem(pem)
        .map_err(|err| ParamError::invalid(format!("invalid Ed25519 private key: {err}")))
}

impl DynamicType for DynEd25519PrivateKey {
    type Value = Option<SigningKey>;

    fn value(&self) -> Option<SigningKey> {
        self.cell.get()
    }

    fn unmarshal_param(&self, raw: Option<&str>) -> Result<(), ParamError> {
        let next = raw.map(|raw| self.parse(raw)).transpose()?;
        self.cell.store(next.map(Some));
        Ok(())
    }

    fn value_valid(&self, raw: &str) -> Result<(), ParamError> {
        self.parse(raw).map(drop)
    }

    fn default_value(&self) -> Result<String, ParamError> {
        Ok(REDACTED_PLACEHOLDER.to_string())
    }

    fn redact_value(&self, _raw: &str) -> String {
        REDACTED_PLACEHOLDER.to_string()
    }

    fn describe_type(&self) -> String {
        "ed25519-private-key".to_string()
    }
}

impl fmt::Debug for DynEd25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynEd25519PrivateKey")
            .field("state", &self.state())
            .field("base64", &self.base64)
            .finish_non_exhaustive()
    }
}
