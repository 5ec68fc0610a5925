//! Resource catalog CRUD on `/resources`.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::{ApiError, Operation};

/// A catalog entry. Owned by the backend; the client never caches it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body for creating or replacing a resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewResource {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ApiClient {
    pub async fn list_resources(&self) -> Result<Vec<Resource>, ApiError> {
        self.get_json(Operation::ListResources, "/resources").await
    }

    pub async fn get_resource(&self, id: i64) -> Result<Resource, ApiError> {
        self.get_json(Operation::GetResource, &format!("/resources/{id}"))
            .await
    }

    pub async fn create_resource(&self, resource: &NewResource) -> Result<Resource, ApiError> {
        self.send_json(Operation::CreateResource, Method::POST, "/resources", resource)
            .await
    }

    pub async fn update_resource(
        &self,
        id: i64,
        resource: &NewResource,
    ) -> Result<Resource, ApiError> {
        self.send_json(
            Operation::UpdateResource,
            Method::PUT,
            &format!("/resources/{id}"),
            resource,
        )
        .await
    }

    pub async fn delete_resource(&self, id: i64) -> Result<(), ApiError> {
        self.send(
            Operation::DeleteResource,
            Method::DELETE,
            &format!("/resources/{id}"),
            None,
        )
        .await?;
        Ok(())
    }
}
