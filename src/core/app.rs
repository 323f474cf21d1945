use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A network endpoint exposed by a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApp {
    /// Zero-based index into the job's ports.
    pub port_index: usize,
    /// Unique within the job.
    pub app_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_query_params: Option<BTreeMap<String, String>>,
}

impl JobApp {
    pub fn new(port_index: usize, app_name: impl Into<String>) -> Self {
        Self {
            port_index,
            app_name: app_name.into(),
            url_path: None,
            url_query_params: None,
        }
    }

    pub fn url_path(mut self, url_path: impl Into<String>) -> Self {
        self.url_path = Some(url_path.into());
        self
    }

    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_query_params
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let app = JobApp::new(1, "tensorboard")
            .url_path("/logs")
            .query_param("token", "abc")
            .query_param("theme", "dark");
        assert_eq!(app.port_index, 1);
        assert_eq!(app.url_path.as_deref(), Some("/logs"));
        let params = app.url_query_params.unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["token"], "abc");
    }

    #[test]
    fn test_debug_is_stable() {
        let app = JobApp::new(0, "ui")
            .query_param("b", "2")
            .query_param("a", "1");
        assert_eq!(
            format!("{app:?}"),
            r#"JobApp { port_index: 0, app_name: "ui", url_path: None, url_query_params: Some({"a": "1", "b": "2"}) }"#
        );
    }
}
