use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT},
    Client, Method,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::{
    configuration::Config,
    error::{self, Error},
    provider::Fetcher,
    types::FetchRequest,
};

/// reqwest backed [`Fetcher`] for notification click callbacks.
#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
    pub http: Client,
}

impl HTTP {
    pub fn new(config: Config) -> Result<HTTP, Error> {
        let http = match Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                return Err(error::Error::ReqwestError(e));
            },
        };

        Ok(HTTP { config, http })
    }

    fn header_map(&self, headers: &[(String, String)]) -> Result<HeaderMap, Error> {
        let mut header_map = HeaderMap::new();

        header_map.insert(
            USER_AGENT,
            HeaderValue::from_str(self.config.user_agent.as_str())?,
        );

        for (name, value) in headers {
            header_map.insert(
                HeaderName::from_str(name)?,
                HeaderValue::from_str(value)?,
            );
        }

        Ok(header_map)
    }
}

#[async_trait]
impl Fetcher for HTTP {
    async fn fetch(&self, url: &str, request: FetchRequest) -> Result<u16, Error> {
        let method = Method::from_bytes(request.method.to_uppercase().as_bytes())
            .map_err(|_| Error::InvalidOption {
                option: format!("method {}", request.method),
            })?;
        let url = reqwest::Url::parse(url)?;
        let header_map = self.header_map(&request.headers)?;

        let data = self
            .http
            .request(method, url)
            .headers(header_map)
            .body(request.body)
            .send()
            .await?;
        let status = data.status().as_u16();

        debug!("Notification callback answered with {}", status);

        Ok(status)
    }
}
