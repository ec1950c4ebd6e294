mod lookup;
mod media;

pub(crate) use lookup::handle_lookup_request;
pub(crate) use media::register_media;
