//! Adapters calling the inventory and payment services over HTTP.

use async_trait::async_trait;
use domain::ProductId;
use payment::PaymentRequest;
use reqwest::{Client, Response, Url};
use serde::Serialize;

use super::{CollaboratorError, InventoryClient, PaymentClient};

/// Inventory service reached at `{base}/inventory/check/{productId}?quantity=N`.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: Client,
    base_url: Url,
}

impl HttpInventoryClient {
    /// Creates a client for the inventory service rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, CollaboratorError> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_base(base_url)?,
        })
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn check_availability(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, CollaboratorError> {
        let url = endpoint(
            &self.base_url,
            &["inventory", "check", product_id.as_str()],
        )?;

        let response = self
            .client
            .get(url)
            .query(&[("quantity", quantity)])
            .send()
            .await
            .map_err(|e| CollaboratorError::Transport(e.to_string()))?;

        read_bool(response).await
    }
}

/// Payment service reached at `POST {base}/payment/process`.
#[derive(Debug, Clone)]
pub struct HttpPaymentClient {
    client: Client,
    base_url: Url,
}

impl HttpPaymentClient {
    /// Creates a client for the payment service rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, CollaboratorError> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_base(base_url)?,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessPaymentBody {
    order_id: String,
    amount: f64,
    customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_method: Option<String>,
}

impl From<PaymentRequest> for ProcessPaymentBody {
    fn from(request: PaymentRequest) -> Self {
        Self {
            order_id: request.order_id.to_string(),
            amount: request.amount.as_decimal(),
            customer_id: request.customer_id.as_str().to_string(),
            payment_method: request.payment_method,
        }
    }
}

#[async_trait]
impl PaymentClient for HttpPaymentClient {
    async fn process_payment(&self, request: PaymentRequest) -> Result<bool, CollaboratorError> {
        let url = endpoint(&self.base_url, &["payment", "process"])?;

        let response = self
            .client
            .post(url)
            .json(&ProcessPaymentBody::from(request))
            .send()
            .await
            .map_err(|e| CollaboratorError::Transport(e.to_string()))?;

        read_bool(response).await
    }
}

fn parse_base(base_url: &str) -> Result<Url, CollaboratorError> {
    let url = Url::parse(base_url)
        .map_err(|e| CollaboratorError::InvalidUrl(format!("{base_url}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(CollaboratorError::InvalidUrl(base_url.to_string()));
    }
    Ok(url)
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, CollaboratorError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| CollaboratorError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn read_bool(response: Response) -> Result<bool, CollaboratorError> {
    let status = response.status();
    if !status.is_success() {
        return Err(CollaboratorError::UnexpectedStatus(status.as_u16()));
    }
    response
        .json::<bool>()
        .await
        .map_err(|e| CollaboratorError::Decode(e.to_string()))
}
