use menu_catalog::{
    Drink, DrinkDraft, DrinkId, ack_id, map_record, map_records, to_raw, validate_draft,
};
use serde_json::Value;

use crate::{
    ApiRequest, ApiResponse, CatalogError, ClientConfig, HttpTransport, Transport, TransportError,
};

const MENU_PATH: &str = "menu";

// Ids are opaque, so `/`, `?` and `#` must not leak into the URL structure.
fn drink_path(id: &DrinkId) -> String {
    format!("{MENU_PATH}/{}", urlencoding::encode(id.as_str()))
}

/// Typed CRUD operations against the menu API.
///
/// Every call is a single request: failures are returned as-is and never retried.
#[derive(Clone, Debug)]
pub struct CatalogClient<T = HttpTransport> {
    transport: T,
}

impl CatalogClient<HttpTransport> {
    pub fn from_config(config: ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    /// Create from environment variables (see [`ClientConfig::from_env`]).
    pub fn from_env() -> Result<Self, TransportError> {
        Self::from_config(ClientConfig::from_env())
    }
}

impl<T: Transport> CatalogClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!(%method, %path, "menu api request");
        match self.transport.send(request).await {
            Ok(response) => {
                tracing::debug!(%method, %path, status = response.status, "menu api response");
                Ok(response)
            }
            Err(e) => {
                tracing::debug!(%method, %path, error = %e, "menu api request failed");
                Err(e)
            }
        }
    }

    /// `GET /menu`
    pub async fn list(&self) -> Result<Vec<Drink>, CatalogError> {
        let response = self.send(ApiRequest::get(MENU_PATH)).await?;
        let body = success_body(response, None)?;
        Ok(map_records(&body)?)
    }

    /// `GET /menu/{id}`
    pub async fn get(&self, id: &DrinkId) -> Result<Drink, CatalogError> {
        let response = self.send(ApiRequest::get(drink_path(id))).await?;
        let body = success_body(response, Some(id))?;
        Ok(map_record(&body)?)
    }

    /// `POST /menu`
    ///
    /// The backend may answer with the stored record or just `{"message", "id"}`; in the latter
    /// case the draft is stamped with the returned id. Drafts that would not map back (e.g. an
    /// ABV outside `0..=100`) are rejected before anything is sent.
    pub async fn create(&self, draft: &DrinkDraft) -> Result<Drink, CatalogError> {
        validate_draft(draft)?;
        let response = self
            .send(ApiRequest::post(MENU_PATH, to_raw(draft)))
            .await?;
        let body = success_body(response, None)?;
        if looks_like_record(&body) {
            return Ok(map_record(&body)?);
        }
        let id = ack_id(&body).ok_or(menu_catalog::MappingError::MissingField { field: "id" })?;
        Ok(draft.clone().into_drink(id))
    }

    /// `PUT /menu/{id}`
    pub async fn update(&self, id: &DrinkId, draft: &DrinkDraft) -> Result<Drink, CatalogError> {
        validate_draft(draft)?;
        let response = self
            .send(ApiRequest::put(drink_path(id), to_raw(draft)))
            .await?;
        let body = success_body(response, Some(id))?;
        if looks_like_record(&body) {
            return Ok(map_record(&body)?);
        }
        Ok(draft.clone().into_drink(id.clone()))
    }

    /// `DELETE /menu/{id}`
    pub async fn delete(&self, id: &DrinkId) -> Result<(), CatalogError> {
        let response = self.send(ApiRequest::delete(drink_path(id))).await?;
        success_body(response, Some(id))?;
        Ok(())
    }
}

/// Accepts 2xx, maps 404 on an item path to `NotFound`, and everything else to a status error.
fn success_body(response: ApiResponse, id: Option<&DrinkId>) -> Result<Value, CatalogError> {
    if response.is_success() {
        return Ok(response.body.unwrap_or(Value::Null));
    }
    if let (true, Some(id)) = (response.is_not_found(), id) {
        return Err(CatalogError::NotFound { id: id.clone() });
    }
    Err(response.into_status_error().into())
}

// Acknowledgements carry a message and maybe an id; records carry the required fields.
fn looks_like_record(body: &Value) -> bool {
    body.as_object()
        .is_some_and(|obj| obj.contains_key("base") || obj.contains_key("abv"))
}
