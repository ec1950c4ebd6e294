use std::cell::{Ref, RefCell};
use std::time::Duration;

use futures::future::{self, Either};
use size_chart_api_types::ProductId;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::ChartClient;
use crate::modal::{Applied, LookupOutcome};
use crate::page::{ClickAction, ElementId, SizeChartPage};
use crate::timer::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub lookup_timeout: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(10),
        }
    }
}

/// Drives the page from browser events. Runs on a single threaded event loop, the lookup is
/// the only await point and the page is never borrowed across it.
pub struct SizeChartController<C> {
    client: C,
    page: RefCell<SizeChartPage>,
    config: ControllerConfig,
    observer: Option<Box<dyn Fn(&SizeChartPage)>>,
}

impl<C: ChartClient> SizeChartController<C> {
    /// Takes over `page`, building its modal if it has none yet.
    pub fn new(client: C, mut page: SizeChartPage, config: ControllerConfig) -> Self {
        page.ensure_modal();
        Self {
            client,
            page: RefCell::new(page),
            config,
            observer: None,
        }
    }

    /// Called with the page after every change, this is where the view gets redrawn.
    pub fn on_change(mut self, observer: impl Fn(&SizeChartPage) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn page(&self) -> Ref<'_, SizeChartPage> {
        self.page.borrow()
    }

    fn changed(&self) {
        if let Some(observer) = &self.observer {
            observer(&self.page.borrow());
        }
    }

    pub fn dismiss_notice(&self, id: Uuid) {
        self.page.borrow_mut().dismiss_notice(id);
        self.changed();
    }

    pub async fn click(&self, target: ElementId) -> Option<Applied> {
        let action = self.page.borrow().click_action(target);
        match action {
            ClickAction::Open(product_id) => Some(self.open(product_id).await),
            ClickAction::Close => {
                self.page.borrow_mut().close();
                self.changed();
                None
            }
            ClickAction::Ignore => None,
        }
    }

    pub fn key_up(&self, key: &str) -> bool {
        let closed = self.page.borrow_mut().key_up(key);
        if closed {
            self.changed();
        }
        closed
    }

    pub async fn open(&self, product_id: ProductId) -> Applied {
        let ticket = self.page.borrow_mut().begin_open(product_id);
        self.changed();
        let lookup = self.client.lookup(product_id);
        let timeout = sleep(self.config.lookup_timeout);
        let outcome = match future::select(Box::pin(lookup), Box::pin(timeout)).await {
            Either::Left((Ok(result), _)) => LookupOutcome::Answered(result),
            Either::Left((Err(e), _)) => {
                warn!("size chart lookup for product {product_id} failed {e}");
                LookupOutcome::Failed
            }
            Either::Right(_) => {
                info!("size chart lookup for product {product_id} timed out");
                LookupOutcome::TimedOut
            }
        };
        let applied = self.page.borrow_mut().finish_open(ticket, outcome);
        if applied != Applied::Stale {
            self.changed();
        }
        applied
    }
}
