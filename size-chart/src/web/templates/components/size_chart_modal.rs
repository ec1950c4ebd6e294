use maud::{html, PreEscaped, Render};
use size_chart_api_types::markup::{
    CLOSE_CLASS, CONTENT_CLASS, IMAGE_ALT, IMAGE_CLASS, MODAL_CLASS, MODAL_ID,
};

/// The overlay the client shows the chart in. The backdrop is the outer element, clicks on
/// it close the modal while clicks inside the content do not.
pub(crate) struct SizeChartModal;

impl Render for SizeChartModal {
    fn render(&self) -> maud::Markup {
        html! {
          div id=(MODAL_ID) class=(MODAL_CLASS) style="display:none" {
            div class=(CONTENT_CLASS) {
              span class=(CLOSE_CLASS) { (PreEscaped("&times;")) }
              img class=(IMAGE_CLASS) src="" alt=(IMAGE_ALT);
            }
          }
        }
    }
}
