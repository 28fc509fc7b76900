use crate::config::CalculatorConfig;
use crate::error::AcquireError;
use coli_model::MetroOption;
use serde::Serialize;

/// Source of calculator pages (to allow mocking).
#[async_trait::async_trait]
pub trait Calculator: Send + Sync {
    /// GET the calculator form containing the metro dropdowns.
    async fn fetch_options(&self) -> Result<String, AcquireError>;

    /// POST a comparison of `metro` against the configured destination and
    /// return the results page body.
    async fn compute(&self, metro: &MetroOption) -> Result<String, AcquireError>;
}

/// Form body of the compute request, in the field order the calculator's
/// own form submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputeForm {
    pub salary: u32,
    #[serde(rename = "selectMovingFrom")]
    pub select_moving_from: u32,
    #[serde(rename = "selectMovingTo")]
    pub select_moving_to: u32,
    #[serde(rename = "Submit")]
    pub submit: &'static str,
    #[serde(rename = "hidMovingFromVal")]
    pub hid_moving_from_val: u32,
    #[serde(rename = "hidMovingFrom")]
    pub hid_moving_from: String,
    #[serde(rename = "hidMovingToVal")]
    pub hid_moving_to_val: u32,
    #[serde(rename = "hidMovingTo")]
    pub hid_moving_to: String,
    #[serde(rename = "strGUID")]
    pub str_guid: String,
}

impl ComputeForm {
    pub fn new(config: &CalculatorConfig, metro: &MetroOption) -> Self {
        Self {
            salary: config.salary,
            select_moving_from: metro.id,
            select_moving_to: config.destination_id,
            submit: "calculate",
            hid_moving_from_val: metro.id,
            hid_moving_from: metro.name.clone(),
            hid_moving_to_val: config.destination_id,
            hid_moving_to: config.destination_name.clone(),
            str_guid: config.guid.clone(),
        }
    }
}

/// [`Calculator`] backed by the live site over HTTP.
///
/// One `reqwest::Client` is shared by every request so the connection pool
/// is reused across the metro loop.
pub struct HttpCalculator {
    client: reqwest::Client,
    config: CalculatorConfig,
}

impl HttpCalculator {
    pub fn new(config: CalculatorConfig) -> Result<Self, AcquireError> {
        let client = reqwest::Client::builder()
            .user_agent("coli/0.1 (cost-of-living scraper)")
            .timeout(config.timeout)
            .build()
            .map_err(AcquireError::Client)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Send a request and return the body regardless of status; the results
    /// page extractor decides whether the body is usable.
    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<String, AcquireError> {
        let network = |source: reqwest::Error| AcquireError::Network {
            url: url.to_string(),
            source,
        };

        let response = request.send().await.map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Calculator returned non-success status");
        }

        response.text().await.map_err(network)
    }
}

#[async_trait::async_trait]
impl Calculator for HttpCalculator {
    async fn fetch_options(&self) -> Result<String, AcquireError> {
        let url = self.config.options_url();
        tracing::debug!(url = %url, "GET calculator form");
        self.send(self.client.get(&url), &url).await
    }

    async fn compute(&self, metro: &MetroOption) -> Result<String, AcquireError> {
        let url = self.config.compute_url();
        let form = ComputeForm::new(&self.config, metro);
        tracing::debug!(url = %url, metro_id = metro.id, "POST compute form");
        self.send(self.client.post(&url).form(&form), &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_form_fields() {
        let config = CalculatorConfig::default();
        let metro = MetroOption {
            id: 12,
            name: "City A".into(),
        };
        let form = ComputeForm::new(&config, &metro);

        assert_eq!(form.salary, 100_000);
        assert_eq!(form.select_moving_from, 12);
        assert_eq!(form.hid_moving_from_val, 12);
        assert_eq!(form.hid_moving_from, "City A");
        assert_eq!(form.select_moving_to, 56);
        assert_eq!(form.hid_moving_to_val, 56);
        assert_eq!(form.hid_moving_to, "DE Dover");
        assert_eq!(form.submit, "calculate");
        assert_eq!(form.str_guid, "{80C33227-3056-4F17-A547-8B0CE11B356C}");
    }

    #[test]
    fn test_compute_form_follows_config() {
        let config = CalculatorConfig {
            salary: 55_000,
            destination_id: 7,
            destination_name: "AK Anchorage".into(),
            ..CalculatorConfig::default()
        };
        let metro = MetroOption {
            id: 34,
            name: "City B".into(),
        };
        let form = ComputeForm::new(&config, &metro);
        assert_eq!(form.salary, 55_000);
        assert_eq!(form.select_moving_to, 7);
        assert_eq!(form.hid_moving_to, "AK Anchorage");
    }

    #[test]
    fn test_compute_form_encoded_body() {
        let config = CalculatorConfig::default();
        let metro = MetroOption {
            id: 12,
            name: "AK Anchorage".into(),
        };
        let form = ComputeForm::new(&config, &metro);

        let request = reqwest::Client::new()
            .post(config.compute_url())
            .form(&form)
            .build()
            .unwrap();
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();

        assert_eq!(
            std::str::from_utf8(body).unwrap(),
            "salary=100000&selectMovingFrom=12&selectMovingTo=56&Submit=calculate\
             &hidMovingFromVal=12&hidMovingFrom=AK+Anchorage&hidMovingToVal=56\
             &hidMovingTo=DE+Dover&strGUID=%7B80C33227-3056-4F17-A547-8B0CE11B356C%7D"
        );
        assert_eq!(
            request.headers()[reqwest::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn test_client_builds() {
        let calculator = HttpCalculator::new(CalculatorConfig::default()).unwrap();
        assert_eq!(calculator.config().destination_id, 56);
    }
}
