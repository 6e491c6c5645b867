use reqwest::Client;

use crate::config::Config;
use crate::error::FplError;

pub fn http_client(config: &Config) -> Result<Client, FplError> {
    Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(FplError::Client)
}
