pub mod attachment;
pub mod product_meta;
