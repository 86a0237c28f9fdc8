use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::list_controller::{BulkAction, Command, Outcome};
use crate::types::{CountBody, ErrorBody, IdsBody, Item, ListParams, NameBody};

/// Items endpoint used when `CATALOG_API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:3333/api/teceo/items";

/// HTTP client for the `/items` resource
#[derive(Debug, Clone)]
pub struct ItemClient {
    http: Client,
    base_url: Url,
}

impl ItemClient {
    /// `base_url` points at the items collection, e.g. `DEFAULT_API_URL`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("not a hierarchical URL".to_string()))?
            .pop_if_empty();

        Ok(Self {
            http: Client::new(),
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Collection URL with extra path segments appended, each percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejected URLs without a path
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    /// Turn a non-success response into `ClientError::Api`, else decode the body
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string()
            });

        Err(ClientError::api(status.as_u16(), message))
    }

    pub async fn find_many(&self, params: &ListParams) -> Result<Vec<Item>, ClientError> {
        tracing::debug!(?params, "GET {}", self.base_url);
        let response = self
            .http
            .get(self.base_url.clone())
            .query(params)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn create(&self, name: &str) -> Result<Item, ClientError> {
        let response = self
            .http
            .post(self.base_url.clone())
            .json(&NameBody { name })
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn update_name(&self, id: &str, name: &str) -> Result<Item, ClientError> {
        let response = self
            .http
            .patch(self.url(&[id, "name"]))
            .json(&NameBody { name })
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn bulk_deactivate(&self, ids: &[String]) -> Result<u64, ClientError> {
        self.bulk("deactivate", ids).await
    }

    pub async fn bulk_activate(&self, ids: &[String]) -> Result<u64, ClientError> {
        self.bulk("activate", ids).await
    }

    async fn bulk(&self, action: &str, ids: &[String]) -> Result<u64, ClientError> {
        let response = self
            .http
            .patch(self.url(&["bulk", action]))
            .json(&IdsBody { ids })
            .send()
            .await?;
        let body: CountBody = Self::decode(response).await?;
        Ok(body.count)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.url(&[id])).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Run a controller command and package the result for `handle_outcome`
    pub async fn execute(&self, command: Command) -> Outcome {
        match command {
            Command::Fetch(request) => {
                let result = self.find_many(&request.params).await;
                Outcome::Fetched { request, result }
            }
            Command::Bulk { action, ids } => {
                let result = match action {
                    BulkAction::Activate => self.bulk_activate(&ids).await,
                    BulkAction::Deactivate => self.bulk_deactivate(&ids).await,
                };
                Outcome::BulkCompleted { action, result }
            }
            Command::Create { name } => Outcome::Created {
                result: self.create(&name).await,
            },
            Command::UpdateName { id, name } => Outcome::Renamed {
                result: self.update_name(&id, &name).await,
            },
            Command::Delete { id } => {
                let result = self.delete(&id).await;
                Outcome::Deleted { id, result }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ItemClient::new("http://localhost:3333/api/teceo/items/").unwrap();

        assert_eq!(client.base_url(), DEFAULT_API_URL);
        assert_eq!(
            client.url(&["abc", "name"]).as_str(),
            "http://localhost:3333/api/teceo/items/abc/name"
        );
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let client = ItemClient::new(DEFAULT_API_URL).unwrap();

        assert_eq!(
            client.url(&["a/b c?", "name"]).as_str(),
            "http://localhost:3333/api/teceo/items/a%2Fb%20c%3F/name"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(matches!(
            ItemClient::new("not a url"),
            Err(ClientError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ItemClient::new("mailto:admin@example.com"),
            Err(ClientError::InvalidUrl { .. })
        ));
    }
}
