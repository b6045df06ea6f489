//! HTTP handlers and route configuration.

mod admin;
mod health;
mod pages;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::home))
        .route("/post/{slug}", web::get().to(pages::post_detail))
        .route("/category/{slug}", web::get().to(pages::category_posts))
        .route("/tag/{slug}", web::get().to(pages::tag_posts))
        .service(web::scope("/api").route("/health", web::get().to(health::health_check)))
        .service(
            web::scope("/admin/api")
                .route("/login", web::post().to(admin::login))
                .service(
                    web::resource("/categories")
                        .route(web::get().to(admin::list_categories))
                        .route(web::post().to(admin::create_category)),
                )
                .service(
                    web::resource("/categories/{id}")
                        .route(web::put().to(admin::update_category))
                        .route(web::delete().to(admin::delete_category)),
                )
                .service(
                    web::resource("/posts")
                        .route(web::get().to(admin::list_posts))
                        .route(web::post().to(admin::create_post)),
                )
                .service(
                    web::resource("/posts/{id}")
                        .route(web::get().to(admin::get_post))
                        .route(web::put().to(admin::update_post))
                        .route(web::delete().to(admin::delete_post)),
                )
                .route("/tags", web::get().to(admin::list_tags)),
        );
}
