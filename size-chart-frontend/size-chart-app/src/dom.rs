//! Binds the server rendered product page to a [`SizeChartController`].

use std::rc::Rc;
use std::time::Duration;

use size_chart_api_types::markup::{
    BUTTON_CLASS, CLOSE_CLASS, CONTENT_CLASS, DATA_ID, IMAGE_ALT, IMAGE_CLASS, MODAL_CLASS,
    MODAL_ID, NOTICES_ID,
};
use size_chart_api_types::ProductId;
use tracing::{debug, warn};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, KeyboardEvent, MouseEvent};

use crate::api::HttpChartClient;
use crate::controller::{ControllerConfig, SizeChartController};
use crate::error::{AppError, AppResult};
use crate::modal::Applied;
use crate::page::{ElementId, SizeChartPage};
use crate::timer::sleep;

type PageController = SizeChartController<HttpChartClient>;

fn dom_error(e: JsValue) -> AppError {
    AppError::Dom(format!("{e:?}"))
}

fn missing(what: &str) -> AppError {
    AppError::Dom(format!("{what} not found"))
}

struct ModalNodes {
    backdrop: HtmlElement,
    content: Element,
    close: Element,
    image: HtmlImageElement,
}

/// The live nodes behind the page model. Clicks are attributed by node identity.
struct DomView {
    bindings: Vec<(JsValue, ElementId)>,
    modal: ModalNodes,
    notices: Element,
    document: Document,
}

impl DomView {
    fn element_id(&self, target: &JsValue) -> Option<ElementId> {
        self.bindings
            .iter()
            .find(|(node, _)| node == target)
            .map(|(_, id)| *id)
    }

    fn render(&self, page: &SizeChartPage) {
        if let Err(e) = self.try_render(page) {
            warn!("unable to draw size chart modal {e}");
        }
    }

    fn try_render(&self, page: &SizeChartPage) -> AppResult<()> {
        let state = page.state();
        if let Some(url) = &state.image_url {
            if self.modal.image.src() != *url {
                self.modal.image.set_src(url);
            }
        }
        let display = if state.visible { "block" } else { "none" };
        self.modal
            .backdrop
            .style()
            .set_property("display", display)
            .map_err(dom_error)?;

        self.notices.set_inner_html("");
        for toast in page.toasts().all() {
            let notice = self.document.create_element("div").map_err(dom_error)?;
            notice.set_class_name("size-chart-notice");
            notice.set_text_content(Some(&toast.message));
            self.notices.append_child(&notice).map_err(dom_error)?;
        }
        Ok(())
    }
}

fn build_modal(document: &Document) -> AppResult<()> {
    let body = document.body().ok_or_else(|| missing("body"))?;
    let backdrop = document.create_element("div").map_err(dom_error)?;
    backdrop.set_id(MODAL_ID);
    backdrop.set_class_name(MODAL_CLASS);
    backdrop
        .set_attribute("style", "display:none")
        .map_err(dom_error)?;
    let content = document.create_element("div").map_err(dom_error)?;
    content.set_class_name(CONTENT_CLASS);
    let close = document.create_element("span").map_err(dom_error)?;
    close.set_class_name(CLOSE_CLASS);
    close.set_inner_html("&times;");
    let image = document.create_element("img").map_err(dom_error)?;
    image.set_class_name(IMAGE_CLASS);
    image.set_attribute("alt", IMAGE_ALT).map_err(dom_error)?;
    content.append_child(&close).map_err(dom_error)?;
    content.append_child(&image).map_err(dom_error)?;
    backdrop.append_child(&content).map_err(dom_error)?;
    body.append_child(&backdrop).map_err(dom_error)?;
    Ok(())
}

/// Uses the modal the server rendered, building it only when the page has none.
fn find_or_build_modal(document: &Document) -> AppResult<ModalNodes> {
    if document.get_element_by_id(MODAL_ID).is_none() {
        debug!("no size chart modal on the page, building one");
        build_modal(document)?;
    }
    let backdrop = document
        .get_element_by_id(MODAL_ID)
        .ok_or_else(|| missing(MODAL_ID))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| missing("modal element"))?;
    let find = |class: &str| -> AppResult<Element> {
        backdrop
            .query_selector(&format!(".{class}"))
            .map_err(dom_error)?
            .ok_or_else(|| missing(class))
    };
    let content = find(CONTENT_CLASS)?;
    let close = find(CLOSE_CLASS)?;
    let image = find(IMAGE_CLASS)?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| missing("image element"))?;
    Ok(ModalNodes {
        backdrop,
        content,
        close,
        image,
    })
}

fn find_or_build_notices(document: &Document) -> AppResult<Element> {
    if let Some(notices) = document.get_element_by_id(NOTICES_ID) {
        return Ok(notices);
    }
    let body = document.body().ok_or_else(|| missing("body"))?;
    let notices = document.create_element("div").map_err(dom_error)?;
    notices.set_id(NOTICES_ID);
    body.append_child(&notices).map_err(dom_error)?;
    Ok(notices)
}

fn bind_buttons(
    document: &Document,
    page: &mut SizeChartPage,
    bindings: &mut Vec<(JsValue, ElementId)>,
) -> AppResult<()> {
    let buttons = document
        .query_selector_all(&format!(".{BUTTON_CLASS}"))
        .map_err(dom_error)?;
    for index in 0..buttons.length() {
        let Some(node) = buttons.item(index) else {
            continue;
        };
        let Ok(button) = node.dyn_into::<Element>() else {
            continue;
        };
        let product = button
            .get_attribute("data-product-id")
            .and_then(|id| id.parse::<ProductId>().ok());
        match product {
            Some(product) => bindings.push((JsValue::from(button), page.add_button(product))),
            None => warn!("size chart button without a usable product id"),
        }
    }
    Ok(())
}

/// Drops the newest notice once its display time ran out.
fn expire_latest_notice(controller: &Rc<PageController>) {
    let latest = controller
        .page()
        .toasts()
        .latest()
        .map(|toast| (toast.id, toast.duration));
    let Some((id, Some(millis))) = latest else {
        return;
    };
    let controller = controller.clone();
    spawn_local(async move {
        sleep(Duration::from_millis(millis)).await;
        controller.dismiss_notice(id);
    });
}

/// Wires the size chart buttons, the modal and the cancel key of the current document.
pub fn mount() -> AppResult<()> {
    let window = web_sys::window().ok_or_else(|| missing("window"))?;
    let document = window.document().ok_or_else(|| missing("document"))?;
    let data = document
        .get_element_by_id(DATA_ID)
        .ok_or_else(|| missing(DATA_ID))?;
    let ajax_url = data
        .get_attribute("data-ajax-url")
        .ok_or_else(|| missing("data-ajax-url"))?;
    let nonce = data
        .get_attribute("data-nonce")
        .ok_or_else(|| missing("data-nonce"))?;

    let mut page = SizeChartPage::default();
    let modal_ids = page.ensure_modal();
    let modal = find_or_build_modal(&document)?;
    let mut bindings = vec![
        (JsValue::from(modal.backdrop.clone()), modal_ids.backdrop),
        (JsValue::from(modal.content.clone()), modal_ids.content),
        (JsValue::from(modal.image.clone()), modal_ids.image),
        (JsValue::from(modal.close.clone()), modal_ids.close),
    ];
    bind_buttons(&document, &mut page, &mut bindings)?;
    let notices = find_or_build_notices(&document)?;

    let view = Rc::new(DomView {
        bindings,
        modal,
        notices,
        document: document.clone(),
    });
    let observer = view.clone();
    let controller = Rc::new(
        SizeChartController::new(
            HttpChartClient::new(ajax_url, nonce),
            page,
            ControllerConfig::default(),
        )
        .on_change(move |page| observer.render(page)),
    );
    view.render(&controller.page());

    let on_click = {
        let controller = controller.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let Some(target) = event.target() else {
                return;
            };
            let Some(id) = view.element_id(&JsValue::from(target)) else {
                return;
            };
            let controller = controller.clone();
            spawn_local(async move {
                if let Some(Applied::Notice(_)) = controller.click(id).await {
                    expire_latest_notice(&controller);
                }
            });
        })
    };
    document
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    on_click.forget();

    let on_key_up = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        controller.key_up(&event.key());
    });
    document
        .add_event_listener_with_callback("keyup", on_key_up.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    on_key_up.forget();
    Ok(())
}
