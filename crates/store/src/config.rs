//! Sanity project configuration loaded from environment variables.

/// Connection settings for the Sanity content store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Sanity project id (the subdomain of `api.sanity.io`).
    pub project_id: String,
    /// Dataset name (default: `production`).
    pub dataset: String,
    /// Sanity API version date string (default: `2024-01-01`).
    pub api_version: String,
    /// Token used for queries and mutations. Mutations require a write
    /// token; a read token is accepted as a fallback so local setups can at
    /// least query.
    pub token: String,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Default       |
    /// |-------------------------|---------------|
    /// | `SANITY_PROJECT_ID`     | (required)    |
    /// | `SANITY_DATASET`        | `production`  |
    /// | `SANITY_API_VERSION`    | `2024-01-01`  |
    /// | `SANITY_API_WRITE_TOKEN`| falls back to `SANITY_API_READ_TOKEN`, required |
    pub fn from_env() -> Self {
        let project_id =
            std::env::var("SANITY_PROJECT_ID").expect("SANITY_PROJECT_ID must be set");

        let dataset = std::env::var("SANITY_DATASET").unwrap_or_else(|_| "production".into());

        let api_version =
            std::env::var("SANITY_API_VERSION").unwrap_or_else(|_| "2024-01-01".into());

        let token = std::env::var("SANITY_API_WRITE_TOKEN")
            .or_else(|_| {
                tracing::warn!(
                    "SANITY_API_WRITE_TOKEN not set, falling back to SANITY_API_READ_TOKEN \
                     (mutations will be rejected by the store)"
                );
                std::env::var("SANITY_API_READ_TOKEN")
            })
            .expect("SANITY_API_WRITE_TOKEN or SANITY_API_READ_TOKEN must be set");

        Self {
            project_id,
            dataset,
            api_version,
            token,
        }
    }
}
