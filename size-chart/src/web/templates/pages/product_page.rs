use maud::html;

use crate::lookup_service::ChartButton;
use crate::web::templates::{
    components::{ClientScript, SizeChartButton, SizeChartModal},
    page::Page,
};
use size_chart_api_types::{markup::DATA_ID, ProductId};

pub(crate) struct ProductPage {
    pub(crate) product_id: ProductId,
    pub(crate) button: Option<ChartButton>,
    pub(crate) ajax_url: String,
    pub(crate) nonce: String,
}

impl Page for ProductPage {
    fn get_name(&'_ self) -> String {
        format!("Product {}", self.product_id)
    }

    fn get_description(&'_ self) -> Option<String> {
        Some(format!(
            "Product {} with its size chart and sizing details",
            self.product_id
        ))
    }

    fn draw_body(&self) -> maud::Markup {
        html! {
          div class="product" id=(DATA_ID) data-ajax-url=(self.ajax_url) data-nonce=(self.nonce) {
            h1 class="product_title" { "Product " (self.product_id.get()) }
            form class="cart" method="post" {
              button type="submit" class="single_add_to_cart_button button" { "Add to cart" }
              (SizeChartButton { button: self.button.as_ref() })
            }
          }
          (SizeChartModal)
          (ClientScript)
        }
    }
}
