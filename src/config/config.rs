use crate::Result;
use crate::expr::{BackendCapabilities, ExtraAttribute, LdapAttributes, NamedExpression, UserAttributeResolver};
use camino::Utf8Path;
use ohno::{IntoAppError, app_err};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;

const LOG_TARGET: &str = "    config";

/// The LDAP identity backend: user details live in a directory, reachable only
/// through the configured attribute mappings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LdapBackend {
    pub attributes: LdapAttributes,
}

/// The flat-file identity backend: user details are loaded whole, so every
/// built-in attribute is available unconditionally.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileBackend {
    pub extra_attributes: BTreeMap<String, ExtraAttribute>,
}

/// The configured identity backend. Exactly one should be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthenticationBackend {
    pub ldap: Option<LdapBackend>,
    pub file: Option<FileBackend>,
}

impl AuthenticationBackend {
    /// Derive the capability snapshot for the active backend.
    ///
    /// # Errors
    ///
    /// Returns an error if no identity backend is configured.
    pub fn capabilities(&self) -> Result<BackendCapabilities> {
        if let Some(ldap) = &self.ldap {
            return Ok(BackendCapabilities::from_ldap(&ldap.attributes));
        }

        if let Some(file) = &self.file {
            return Ok(BackendCapabilities::all(file.extra_attributes.clone()));
        }

        Err(app_err!("no identity backend is configured"))
    }
}

/// A named attribute definition as written by an administrator.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAttributeDefinition {
    pub expression: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub authentication_backend: AuthenticationBackend,

    /// Custom attribute definitions, keyed by the attribute name they produce.
    pub definitions: BTreeMap<String, UserAttributeDefinition>,
}

impl Config {
    /// Load configuration from a file, dispatching on the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or has an
    /// unsupported extension.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading attribute configuration from {path}"))?;

        let extension = path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        log::debug!(target: LOG_TARGET, "Loaded {} attribute definitions from {path}", config.definitions.len());
        Ok(config)
    }

    /// The configured attribute definitions as named expressions, in name order.
    #[must_use]
    pub fn named_expressions(&self) -> Vec<NamedExpression> {
        self.definitions
            .iter()
            .map(|(name, def)| NamedExpression::new(name.clone(), def.expression.clone()))
            .collect()
    }

    /// Build and initialize the resolver for this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no backend is configured or any attribute definition
    /// fails to compile.
    pub fn resolver(&self) -> Result<UserAttributeResolver> {
        let capabilities = self.authentication_backend.capabilities()?;
        let mut resolver = UserAttributeResolver::new(capabilities, self.named_expressions());
        resolver.initialize()?;
        Ok(resolver)
    }
}
