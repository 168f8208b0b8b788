//! HTTP handlers and route configuration.

pub mod blogs;
mod health;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());

    cfg.app_data(json_config).app_data(query_config).service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::resource("/blogs")
                    .route(web::get().to(blogs::list_blogs))
                    .route(web::post().to(blogs::create_blog))
                    .default_service(web::to(blogs::method_not_allowed)),
            )
            .service(
                web::resource("/blogs/{slug}")
                    .route(web::get().to(blogs::get_blog))
                    .route(web::put().to(blogs::update_blog))
                    .route(web::delete().to(blogs::delete_blog))
                    .default_service(web::to(blogs::method_not_allowed)),
            )
            .service(
                web::resource("/blogs/{slug}/related")
                    .route(web::get().to(blogs::related_blogs))
                    .default_service(web::to(blogs::method_not_allowed)),
            )
            .service(
                web::resource("/blogs/{slug}/like")
                    .route(web::post().to(blogs::like_blog))
                    .default_service(web::to(blogs::method_not_allowed)),
            )
            .service(
                web::resource("/blogs/{slug}/view")
                    .route(web::post().to(blogs::view_blog))
                    .default_service(web::to(blogs::method_not_allowed)),
            ),
    );
}
