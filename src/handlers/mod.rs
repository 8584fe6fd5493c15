pub mod gallery_handlers;
pub mod health_handlers;

pub use gallery_handlers::list_images_handler;
pub use health_handlers::health_handler;
