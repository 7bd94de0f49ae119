use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use crate::{
    configuration::ScraperSettings,
    routes::{default_route, job_route},
};

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    cors_origin: String,
    scraper_settings: ScraperSettings,
) -> Result<Server, std::io::Error> {
    let db_pool = web::Data::new(db_pool);
    let scraper_settings = web::Data::new(scraper_settings);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .service(default_route::default)
            .service(
                web::scope("/job")
                    .service(job_route::scrape)
                    .service(job_route::export_jobs)
                    .service(job_route::list_jobs)
                    .service(job_route::create_job)
                    .service(job_route::get_job)
                    .service(job_route::update_job)
                    .service(job_route::delete_job),
            )
            .app_data(db_pool.clone())
            .app_data(scraper_settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
