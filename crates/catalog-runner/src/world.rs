//! Per-scenario state for the catalog steps.

use reqwest::StatusCode;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use catalog_test_utils::{
    ApiClient, HttpError, Product, ProductBuilder, ProductStore, Settings, TestCode,
};

use crate::error::{StepError, StepResult};

/// Long-lived dependencies shared by every scenario of a run
pub struct Services {
    pub settings: Settings,
    pub client: ApiClient,
    pub store: Arc<dyn ProductStore>,
}

impl Services {
    pub fn new(settings: Settings, store: Arc<dyn ProductStore>) -> Result<Self, HttpError> {
        let client = ApiClient::new(&settings.api)?;
        Ok(Self {
            settings,
            client,
            store,
        })
    }

    pub fn with_client(settings: Settings, client: ApiClient, store: Arc<dyn ProductStore>) -> Self {
        Self {
            settings,
            client,
            store,
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// State owned by a single scenario.
///
/// Created fresh for every scenario, so nothing a step records can leak
/// into the next one.
#[derive(Debug)]
pub struct CatalogWorld {
    pub services: Arc<Services>,
    pub test_code: TestCode,
    /// Product under construction
    pub draft: Option<ProductBuilder>,
    /// Last product sent to the API
    pub sent: Option<Product>,
    pub created_product_id: Option<String>,
    pub sent_long_description: Option<String>,
    pub sent_short_description: Option<String>,
    pub last_status: Option<StatusCode>,
    pub last_body: Option<String>,
}

impl CatalogWorld {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            services,
            test_code: TestCode::default(),
            draft: None,
            sent: None,
            created_product_id: None,
            sent_long_description: None,
            sent_short_description: None,
            last_status: None,
            last_body: None,
        }
    }

    /// Replaces the test code; on error the previous code is kept.
    pub fn set_test_code(&mut self, code: &str) -> StepResult {
        let parsed = TestCode::parse(code)?;
        debug!(code = %code, test_code = %parsed, "Test code set");
        self.test_code = parsed;
        Ok(())
    }

    /// Applies `f` to the draft, starting one from the defaults if needed.
    pub fn update_draft<F>(&mut self, f: F)
    where
        F: FnOnce(ProductBuilder) -> ProductBuilder,
    {
        let draft = self
            .draft
            .take()
            .unwrap_or_else(|| ProductBuilder::new(&self.test_code));
        self.draft = Some(f(draft));
    }

    /// The product the draft would build, or the defaults for the current code.
    pub fn current_product(&self) -> Product {
        match &self.draft {
            Some(draft) => draft.product().clone(),
            None => ProductBuilder::new(&self.test_code).build(),
        }
    }

    /// POSTs `product` to the products endpoint and records the response.
    pub async fn send_product(&mut self, product: Product) -> StepResult {
        let api = &self.services.settings.api;
        let response = self
            .services
            .client
            .post_json(api, &api.products_path, &product)
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StepError::ResponseBody(e.to_string()))?;

        info!(
            product_code = %product.product_code,
            status = %status,
            "Product sent"
        );

        self.last_status = Some(status);
        self.last_body = Some(body);
        self.created_product_id = Some(product.product_code.clone());
        self.sent_long_description = Some(product.long_description.clone());
        self.sent_short_description = Some(product.short_description.clone());
        self.sent = Some(product);
        Ok(())
    }

    pub fn status(&self) -> Result<StatusCode, StepError> {
        self.last_status
            .ok_or_else(|| StepError::Precondition("no request has been sent".to_string()))
    }

    pub fn product_id(&self) -> Result<&str, StepError> {
        self.created_product_id
            .as_deref()
            .ok_or_else(|| StepError::Precondition("no product has been created".to_string()))
    }

    pub fn store(&self) -> &dyn ProductStore {
        self.services.store.as_ref()
    }
}
