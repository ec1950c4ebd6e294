use std::collections::HashMap;

use size_chart_api_types::ProductId;

use crate::modal::{Applied, LookupOutcome, LookupTicket, ModalController, ModalState, Phase};
use crate::toasts::Toasts;

pub const CANCEL_KEY: &str = "Escape";

/// Identity of an element on the page. Clicks are attributed by exact identity, an element
/// nested inside another is a different target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u32);

/// The elements making up the modal overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalElements {
    pub backdrop: ElementId,
    pub content: ElementId,
    pub image: ElementId,
    pub close: ElementId,
}

/// What a click asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    Open(ProductId),
    Close,
    Ignore,
}

/// One product page: its size chart buttons, the lazily built modal and the notices shown to
/// the shopper.
#[derive(Debug, Default)]
pub struct SizeChartPage {
    next_element: u32,
    modal: Option<ModalElements>,
    buttons: HashMap<ElementId, ProductId>,
    controller: ModalController,
    toasts: Toasts,
}

impl SizeChartPage {
    fn allocate(&mut self) -> ElementId {
        self.next_element += 1;
        ElementId(self.next_element)
    }

    /// Builds the modal the first time, later calls hand back the same elements.
    pub fn ensure_modal(&mut self) -> ModalElements {
        if let Some(modal) = self.modal {
            return modal;
        }
        let modal = ModalElements {
            backdrop: self.allocate(),
            content: self.allocate(),
            image: self.allocate(),
            close: self.allocate(),
        };
        self.modal = Some(modal);
        modal
    }

    pub fn modal_count(&self) -> usize {
        usize::from(self.modal.is_some())
    }

    pub fn modal(&self) -> Option<ModalElements> {
        self.modal
    }

    /// Places a size chart button for `product_id`, as rendered by the server.
    pub fn add_button(&mut self, product_id: ProductId) -> ElementId {
        let id = self.allocate();
        self.buttons.insert(id, product_id);
        id
    }

    /// Any other element on the page, for clicks that should do nothing.
    pub fn add_element(&mut self) -> ElementId {
        self.allocate()
    }

    pub fn state(&self) -> &ModalState {
        self.controller.state()
    }

    pub fn controller(&self) -> &ModalController {
        &self.controller
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn click_action(&self, target: ElementId) -> ClickAction {
        if let Some(product_id) = self.buttons.get(&target) {
            return ClickAction::Open(*product_id);
        }
        match self.modal {
            Some(modal) if target == modal.backdrop || target == modal.close => ClickAction::Close,
            _ => ClickAction::Ignore,
        }
    }

    /// Returns whether the key closed the modal, a modal that was already closed stays so and
    /// reports `false`.
    pub fn key_up(&mut self, key: &str) -> bool {
        if key != CANCEL_KEY {
            return false;
        }
        let was_active = matches!(self.controller.phase(), Phase::Open | Phase::Loading);
        self.controller.close();
        was_active
    }

    pub fn close(&mut self) {
        self.controller.close();
    }

    pub fn dismiss_notice(&mut self, id: uuid::Uuid) {
        self.toasts.remove(id);
    }

    pub fn begin_open(&mut self, product_id: ProductId) -> LookupTicket {
        self.controller.begin_open(product_id)
    }

    /// Applies a finished lookup, turning failures into an error notice.
    pub fn finish_open(&mut self, ticket: LookupTicket, outcome: LookupOutcome) -> Applied {
        let applied = self.controller.apply(ticket, outcome);
        if let Applied::Notice(message) = &applied {
            self.toasts.error(message.clone());
        }
        applied
    }
}

#[cfg(test)]
mod test {
    use size_chart_api_types::LookupResult;

    use super::*;

    fn product(id: i64) -> ProductId {
        ProductId::new(id).unwrap()
    }

    #[test]
    fn modal_is_built_once() {
        let mut page = SizeChartPage::default();
        assert_eq!(page.modal_count(), 0);
        let first = page.ensure_modal();
        let second = page.ensure_modal();
        assert_eq!(first, second);
        assert_eq!(page.modal_count(), 1);
    }

    #[test]
    fn click_attribution() {
        let mut page = SizeChartPage::default();
        let modal = page.ensure_modal();
        let button = page.add_button(product(42));
        let elsewhere = page.add_element();
        assert_eq!(page.click_action(button), ClickAction::Open(product(42)));
        assert_eq!(page.click_action(modal.backdrop), ClickAction::Close);
        assert_eq!(page.click_action(modal.close), ClickAction::Close);
        assert_eq!(page.click_action(modal.image), ClickAction::Ignore);
        assert_eq!(page.click_action(modal.content), ClickAction::Ignore);
        assert_eq!(page.click_action(elsewhere), ClickAction::Ignore);
    }

    #[test]
    fn escape_closes() {
        let mut page = SizeChartPage::default();
        page.ensure_modal();
        let ticket = page.begin_open(product(42));
        page.finish_open(
            ticket,
            LookupOutcome::Answered(LookupResult::found("https://cdn.example/img/42.jpg")),
        );
        assert!(page.state().visible);
        assert!(!page.key_up("Enter"));
        assert!(page.state().visible);
        assert!(page.key_up("Escape"));
        assert!(!page.state().visible);
        assert!(!page.key_up("Escape"));
    }

    #[test]
    fn notices_become_toasts() {
        let mut page = SizeChartPage::default();
        let ticket = page.begin_open(product(99));
        page.finish_open(
            ticket,
            LookupOutcome::Answered(LookupResult::not_found("no size chart image found")),
        );
        assert_eq!(
            page.toasts().latest().map(|t| t.message.as_str()),
            Some("no size chart image found")
        );
    }
}
