/// Which [`BlobStore`](crate::BlobStore) implementation the server builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// S3-compatible object storage.
    S3,
    /// In-process map; uploads are lost on restart.
    Memory,
}

impl StorageBackend {
    /// Parse the `STORAGE_BACKEND` value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "s3" => Some(Self::S3),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Blob storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Bucket that holds all variants (the "container").
    pub container: String,
    pub region: String,
    /// Custom S3-compatible endpoint; `None` uses AWS.
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Domain prefix of every public URL handed to clients.
    pub public_base_url: String,
}

impl StorageConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                                   |
    /// |-----------------------------|-------------------------------------------|
    /// | `STORAGE_BACKEND`           | `s3`                                      |
    /// | `STORAGE_CONTAINER`         | `movie-images`                            |
    /// | `STORAGE_REGION`            | `us-east-1`                               |
    /// | `STORAGE_ENDPOINT`          | unset                                     |
    /// | `STORAGE_ACCESS_KEY_ID`     | unset (default AWS credential chain)      |
    /// | `STORAGE_SECRET_ACCESS_KEY` | unset (default AWS credential chain)      |
    /// | `STORAGE_PUBLIC_URL`        | endpoint, else `https://s3.{region}.amazonaws.com` |
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Panics on an unknown `STORAGE_BACKEND` so misconfiguration fails at
    /// startup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match non_empty("STORAGE_BACKEND") {
            Some(name) => StorageBackend::from_name(&name)
                .unwrap_or_else(|| panic!("STORAGE_BACKEND must be 's3' or 'memory', got '{name}'")),
            None => StorageBackend::S3,
        };

        let container = non_empty("STORAGE_CONTAINER").unwrap_or_else(|| "movie-images".into());
        let region = non_empty("STORAGE_REGION").unwrap_or_else(|| "us-east-1".into());
        let endpoint = non_empty("STORAGE_ENDPOINT");

        let public_base_url = non_empty("STORAGE_PUBLIC_URL")
            .or_else(|| endpoint.clone())
            .unwrap_or_else(|| format!("https://s3.{region}.amazonaws.com"))
            .trim_end_matches('/')
            .to_string();

        Self {
            backend,
            container,
            region,
            endpoint,
            access_key_id: non_empty("STORAGE_ACCESS_KEY_ID"),
            secret_access_key: non_empty("STORAGE_SECRET_ACCESS_KEY"),
            public_base_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> StorageConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StorageConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_any_variables() {
        let config = config_from(&[]);
        assert_eq!(config.backend, StorageBackend::S3);
        assert_eq!(config.container, "movie-images");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.endpoint, None);
        assert_eq!(config.public_base_url, "https://s3.us-east-1.amazonaws.com");
    }

    #[test]
    fn public_url_falls_back_to_endpoint() {
        let config = config_from(&[("STORAGE_ENDPOINT", "http://localhost:9000/")]);
        assert_eq!(config.public_base_url, "http://localhost:9000");
    }

    #[test]
    fn custom_domain_wins_over_endpoint() {
        let config = config_from(&[
            ("STORAGE_ENDPOINT", "http://localhost:9000"),
            ("STORAGE_PUBLIC_URL", "https://img.festival.example"),
        ]);
        assert_eq!(config.public_base_url, "https://img.festival.example");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("STORAGE_CONTAINER", "  "), ("STORAGE_ACCESS_KEY_ID", "")]);
        assert_eq!(config.container, "movie-images");
        assert_eq!(config.access_key_id, None);
    }

    #[test]
    fn memory_backend_is_case_insensitive() {
        let config = config_from(&[("STORAGE_BACKEND", "Memory")]);
        assert_eq!(config.backend, StorageBackend::Memory);
    }

    #[test]
    #[should_panic(expected = "STORAGE_BACKEND")]
    fn unknown_backend_panics() {
        config_from(&[("STORAGE_BACKEND", "ftp")]);
    }
}
