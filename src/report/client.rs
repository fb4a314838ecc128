//! The HTTP client for the external chart rendering service.

use std::time::Duration;

use serde::Deserialize;

use crate::Error;

use super::document::ChartDocument;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Renders a chart document into a URL where the chart image can be viewed.
///
/// The report route is generic over this trait so tests can swap in a
/// renderer that never touches the network.
pub trait ChartRenderer {
    fn render(
        &self,
        document: ChartDocument,
    ) -> impl Future<Output = Result<String, Error>> + Send;
}

/// A [`ChartRenderer`] backed by a QuickChart-compatible rendering service.
#[derive(Debug, Clone)]
pub struct QuickChartClient {
    http_client: reqwest::Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct ChartCreated {
    url: String,
}

impl QuickChartClient {
    /// Create a client that POSTs chart documents to `endpoint`.
    pub fn new(endpoint: &str) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::ChartService(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.to_owned(),
        })
    }
}

impl ChartRenderer for QuickChartClient {
    fn render(
        &self,
        document: ChartDocument,
    ) -> impl Future<Output = Result<String, Error>> + Send {
        async move {
            let response = self
                .http_client
                .post(&self.endpoint)
                .json(&document)
                .send()
                .await
                .map_err(|e| Error::ChartService(e.to_string()))?;

            if !response.status().is_success() {
                return Err(Error::ChartService(format!(
                    "chart service returned {}",
                    response.status()
                )));
            }

            let created: ChartCreated = response
                .json()
                .await
                .map_err(|e| Error::ChartService(e.to_string()))?;

            Ok(created.url)
        }
    }
}
