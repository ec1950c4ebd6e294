pub(crate) mod product_page;
pub(crate) mod settings_page;
