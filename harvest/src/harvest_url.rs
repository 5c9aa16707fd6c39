pub const DEFAULT_API_URL: &str = "https://api.harvestapp.com/v2";

#[derive(Debug, Clone)]
pub struct HarvestURL(String);

impl AsRef<str> for HarvestURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl HarvestURL {
    pub fn new(base: &str) -> Self {
        Self(base.trim_end_matches('/').to_string())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Append query parameters, skipping the ones without a value.
    pub fn with_query(&self, params: &[(&str, Option<String>)]) -> Self {
        let pairs = params
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| format!("{}={}", key, v)))
            .collect::<Vec<_>>();

        if pairs.is_empty() {
            return self.clone();
        }

        let separator = if self.0.contains('?') { '&' } else { '?' };
        Self(format!("{}{}{}", self.0, separator, pairs.join("&")))
    }
}
