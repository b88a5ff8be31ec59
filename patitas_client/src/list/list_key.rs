use crate::client::api_model::ListQueryParams;

/// Cache identity of one list query.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct ListKey {
    pub endpoint: String,
    pub params: ListQueryParams,
}

impl ListKey {
    pub fn new(endpoint: &str, params: &ListQueryParams) -> Self {
        Self {
            endpoint: endpoint.to_owned(),
            params: params.clone(),
        }
    }

    /// Two keys are the same query when they encode to the same request.
    pub fn build_key(&self) -> String {
        format!("{}\x02{}", self.endpoint, self.params.to_query_string())
    }

    /// Shared by every page of one query, which all report the same `count`.
    pub fn count_key(&self) -> String {
        let params = ListQueryParams {
            page: 1,
            ..self.params.clone()
        };
        ListKey::new(&self.endpoint, &params).build_key()
    }
}
