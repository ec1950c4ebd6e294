use size_chart_api_types::lookup::TIMEOUT;
use size_chart_api_types::{LookupResult, ProductId};
use tracing::debug;

/// Notice shown when the lookup could not be answered at all.
pub const TEMPORARILY_UNAVAILABLE: &str = "size chart is temporarily unavailable";

/// What the modal currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    pub visible: bool,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Closed,
    Loading,
    Open,
}

/// Handed out when a lookup starts; its result is only applied while the ticket is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    pub product_id: ProductId,
}

/// How a lookup ended, as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Answered(LookupResult),
    TimedOut,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Shown,
    Notice(String),
    /// A newer lookup started (or the modal was closed) before this one finished.
    Stale,
}

/// The modal's state machine: `Closed -> Loading -> Open -> Closed`.
#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
    phase: Phase,
    generation: u64,
}

impl ModalController {
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Supersedes any lookup still in flight. The modal stays hidden until this lookup answers.
    pub fn begin_open(&mut self, product_id: ProductId) -> LookupTicket {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.state.visible = false;
        LookupTicket {
            generation: self.generation,
            product_id,
        }
    }

    pub fn apply(&mut self, ticket: LookupTicket, outcome: LookupOutcome) -> Applied {
        if ticket.generation != self.generation || self.phase != Phase::Loading {
            debug!(
                "dropping stale size chart lookup for product {}",
                ticket.product_id
            );
            return Applied::Stale;
        }
        let notice = match outcome {
            LookupOutcome::Answered(LookupResult::Found { image_url }) => {
                self.state.image_url = Some(image_url);
                self.state.visible = true;
                self.phase = Phase::Open;
                return Applied::Shown;
            }
            LookupOutcome::Answered(
                LookupResult::NotFound { reason } | LookupResult::Invalid { reason },
            ) => reason,
            LookupOutcome::TimedOut => TIMEOUT.to_string(),
            LookupOutcome::Failed => TEMPORARILY_UNAVAILABLE.to_string(),
        };
        self.state.visible = false;
        self.phase = Phase::Closed;
        Applied::Notice(notice)
    }

    /// Hides the modal and abandons a pending lookup. The last image stays loaded so a quick
    /// reopen of the same chart doesn't flash.
    pub fn close(&mut self) {
        if self.phase == Phase::Loading {
            self.generation += 1;
        }
        self.state.visible = false;
        self.phase = Phase::Closed;
    }
}
