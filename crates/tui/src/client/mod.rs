use std::time::Duration;

use api_types::{
    error::ErrorResponse,
    gasto::{Gasto, GastoId},
};
use async_trait::async_trait;
use engine::{ApiError, GastosApi};
use reqwest::{Response, Url};

use crate::error::{AppError, Result};

/// HTTP implementation of [`GastosApi`].
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::Server(format!("invalid endpoint {path}: {err}")))
    }
}

/// `Url::join` drops the last segment unless the base ends with a slash.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut normalized = base_url.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|err| AppError::Settings(format!("invalid base_url: {err}")))
}

async fn error_for(res: Response) -> ApiError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| status.to_string());

    match status.as_u16() {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden,
        404 => ApiError::NotFound,
        409 => ApiError::Conflict(body),
        422 | 400 => ApiError::Validation(body),
        _ => ApiError::Server(body),
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

#[async_trait]
impl GastosApi for Client {
    async fn list(&self) -> std::result::Result<Vec<Gasto>, ApiError> {
        let res = self
            .http
            .get(self.endpoint("gastos")?)
            .send()
            .await
            .map_err(transport)?;

        if res.status().is_success() {
            return res.json::<Vec<Gasto>>().await.map_err(transport);
        }
        Err(error_for(res).await)
    }

    async fn delete(&self, id: GastoId) -> std::result::Result<(), ApiError> {
        let res = self
            .http
            .delete(self.endpoint(&format!("gastos/{id}"))?)
            .send()
            .await
            .map_err(transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error_for(res).await)
    }

    async fn delete_all(&self) -> std::result::Result<(), ApiError> {
        let res = self
            .http
            .delete(self.endpoint("gastos")?)
            .send()
            .await
            .map_err(transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error_for(res).await)
    }

    async fn update(&self, gasto: &Gasto) -> std::result::Result<Gasto, ApiError> {
        let res = self
            .http
            .put(self.endpoint(&format!("gastos/{}", gasto.id))?)
            .json(gasto)
            .send()
            .await
            .map_err(transport)?;

        if !res.status().is_success() {
            return Err(error_for(res).await);
        }

        // Some backends answer 204 or an empty 200 to an update.
        let bytes = res.bytes().await.map_err(transport)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(gasto.clone());
        }
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> Client {
        Client::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn endpoints_keep_base_path() {
        let client = client("http://localhost:8080/api");
        assert_eq!(
            client.endpoint("gastos").unwrap().as_str(),
            "http://localhost:8080/api/gastos"
        );
        assert_eq!(
            client.endpoint("gastos/12").unwrap().as_str(),
            "http://localhost:8080/api/gastos/12"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let res = Client::new("not a url", Duration::from_secs(1));
        assert!(matches!(res, Err(AppError::Settings(_))));
    }
}
