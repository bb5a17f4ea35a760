use crate::common::errors::Error;
use crate::common::{ORDERS_COLLECTION, USERS_COLLECTION};

const KEY_ATTRIBUTE_DEFAULT: &str = "id";
const FCM_ENDPOINT_DEFAULT: &str = "https://fcm.googleapis.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub users_table: String,
    pub orders_table: String,
    pub key_attribute: String,
    pub fcm: FcmConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FcmConfig {
    pub endpoint: String,
    pub project_id: String,
    pub access_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(Error::MissingEnv(name))
        };

        Ok(Self {
            users_table: lookup("USERS_TABLE").unwrap_or(USERS_COLLECTION.into()),
            orders_table: lookup("ORDERS_TABLE").unwrap_or(ORDERS_COLLECTION.into()),
            key_attribute: lookup("KEY_ATTRIBUTE").unwrap_or(KEY_ATTRIBUTE_DEFAULT.into()),
            fcm: FcmConfig {
                endpoint: lookup("FCM_ENDPOINT").unwrap_or(FCM_ENDPOINT_DEFAULT.into()),
                project_id: required("FCM_PROJECT_ID")?,
                access_token: required("FCM_ACCESS_TOKEN")?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config = Config::from_lookup(lookup_from(&[
            ("FCM_PROJECT_ID", "demo"),
            ("FCM_ACCESS_TOKEN", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.users_table, "user");
        assert_eq!(config.orders_table, "orders");
        assert_eq!(config.key_attribute, "id");
        assert_eq!(config.fcm.endpoint, "https://fcm.googleapis.com");
        assert_eq!(config.fcm.project_id, "demo");
    }

    #[test]
    fn overrides_are_respected() {
        let config = Config::from_lookup(lookup_from(&[
            ("USERS_TABLE", "prod-users"),
            ("KEY_ATTRIBUTE", "userId"),
            ("FCM_PROJECT_ID", "demo"),
            ("FCM_ACCESS_TOKEN", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.users_table, "prod-users");
        assert_eq!(config.key_attribute, "userId");
    }

    #[test]
    fn missing_project_id_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("FCM_ACCESS_TOKEN", "secret")])).unwrap_err();
        assert!(matches!(err, Error::MissingEnv("FCM_PROJECT_ID")));
    }

    #[test]
    fn empty_access_token_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("FCM_PROJECT_ID", "demo"),
            ("FCM_ACCESS_TOKEN", ""),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::MissingEnv("FCM_ACCESS_TOKEN")));
    }
}
