use actix_web::web;

use crate::handlers::photos;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/photos")
            .service(
                web::resource("")
                    .route(web::get().to(photos::list_photos))
                    .route(web::post().to(photos::upload_photo)),
            )
            .service(web::resource("/{photo_id}").route(web::delete().to(photos::delete_photo)))
            .service(
                web::resource("/{photo_id}/file").route(web::get().to(photos::serve_photo_file)),
            ),
    );
}
