pub mod api_utils;
pub mod components;
pub mod icons;
pub mod modal_frame;
pub mod object_url;
pub mod page_frame;
pub mod toast;
