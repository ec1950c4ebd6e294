use maud::{html, PreEscaped, Render};

/// Loads the wasm client from `/pkg` and binds the size chart.
pub(crate) struct ClientScript;

impl Render for ClientScript {
    fn render(&self) -> maud::Markup {
        html! {
          script type="module" {
            (PreEscaped("import init, { hydrate } from '/pkg/size_chart_client.js'; init().then(hydrate);"))
          }
        }
    }
}
