use maud::html;
use size_chart_api_types::ProductId;
use size_chart_db::ProductChartConfig;

use crate::web::templates::page::Page;

/// The product edit panel for the size chart fields.
pub(crate) struct SettingsPage {
    pub(crate) product_id: ProductId,
    pub(crate) config: ProductChartConfig,
    pub(crate) nonce: String,
}

impl Page for SettingsPage {
    fn get_name(&'_ self) -> String {
        format!("Size chart settings for product {}", self.product_id)
    }

    fn draw_body(&self) -> maud::Markup {
        let image_id = self
            .config
            .image_ref
            .map(|image| image.to_string())
            .unwrap_or_default();
        html! {
          form class="size-chart-settings" method="post" action={ "/products/" (self.product_id.get()) "/size-chart" } {
            input type="hidden" name="_size_chart_admin_nonce" value=(self.nonce);
            p class="form-field" {
              label for="_enable_size_chart" { "Enable size chart" }
              input type="checkbox" id="_enable_size_chart" name="_enable_size_chart" value="yes" checked[self.config.enabled];
            }
            p class="form-field" {
              label for="_size_chart_button_text" { "Button text" }
              input type="text" id="_size_chart_button_text" name="_size_chart_button_text" value=(self.config.button_label) placeholder="Size Chart";
            }
            p class="form-field" {
              label for="_size_chart_image_id" { "Size chart image id" }
              input type="text" id="_size_chart_image_id" name="_size_chart_image_id" value=(image_id);
            }
            button type="submit" class="button" { "Save" }
          }
        }
    }
}
