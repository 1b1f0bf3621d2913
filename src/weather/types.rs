//! Wire types for the service endpoints and the geocoding API.

use serde::{Deserialize, Serialize};

/// Body accepted by both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalCodeRequest {
    pub cep: String,
}

/// Body accepted by the resolver: the object form, or the bare JSON string
/// older gateways sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ForwardedRequest {
    Object(PostalCodeRequest),
    Bare(String),
}

impl ForwardedRequest {
    pub fn into_cep(self) -> String {
        match self {
            ForwardedRequest::Object(req) => req.cep,
            ForwardedRequest::Bare(cep) => cep,
        }
    }
}

/// Address returned by the geocoding API. Only `city_name` is used downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(rename = "cep", default)]
    pub postal_code: Option<String>,

    #[serde(rename = "logradouro", default)]
    pub street: Option<String>,

    #[serde(rename = "bairro", default)]
    pub district: Option<String>,

    #[serde(rename = "localidade", default)]
    pub city_name: Option<String>,

    #[serde(rename = "uf", default)]
    pub state_code: Option<String>,
}

impl LocationRecord {
    /// City name, or an empty string when the API returned none.
    pub fn city(&self) -> &str {
        self.city_name.as_deref().unwrap_or_default()
    }
}
