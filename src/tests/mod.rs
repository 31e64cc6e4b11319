use super::*;

mod carousel_widget;
mod config_and_request;
mod dom_and_selector;
mod html_parsing;
mod lazy_images;
