use maud::{html, Render};
use size_chart_api_types::markup::BUTTON_CLASS;

use crate::lookup_service::ChartButton;

/// Renders nothing at all when the product has no usable chart.
pub(crate) struct SizeChartButton<'a> {
    pub(crate) button: Option<&'a ChartButton>,
}

impl<'a> Render for SizeChartButton<'a> {
    fn render(&self) -> maud::Markup {
        html! {
          @if let Some(button) = self.button {
            button type="button" class={ "button " (BUTTON_CLASS) } data-product-id=(button.product_id.get()) {
              (button.label)
            }
          }
        }
    }
}
