use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::{
    configuration::ScraperSettings,
    dal::job_db,
    domain::job::{Job, JobPatch},
    services::{exporter, jobstreet_scraper},
};

#[derive(Deserialize)]
struct TagQuery {
    tag: Option<String>,
}

#[get("/scrape/{tag}")]
async fn scrape(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
    scraper_settings: web::Data<ScraperSettings>,
) -> HttpResponse {
    let tag = path.into_inner();

    let jobs = match jobstreet_scraper::scrape_jobs(&tag, &scraper_settings.base_url).await {
        Ok(jobs) => jobs,
        Err(e) => {
            log::error!("Scrape failed for tag {}: {:?}", tag, e);
            return HttpResponse::InternalServerError()
                .body("Error occurred while scraping the site");
        }
    };

    if let Err(e) = job_db::insert_jobs(&jobs, &pool).await {
        log::error!("Failed to persist {} scraped jobs: {:?}", jobs.len(), e);
        return HttpResponse::InternalServerError().body("Error occurred while scraping the site");
    }

    HttpResponse::Ok().json(jobs)
}

#[get("")]
async fn list_jobs(query: web::Query<TagQuery>, pool: web::Data<PgPool>) -> HttpResponse {
    match job_db::list_jobs(query.tag.as_deref(), &pool).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("Error fetching jobs: {:?}", e);
            HttpResponse::InternalServerError().body("Error fetching jobs")
        }
    }
}

#[post("")]
async fn create_job(body: web::Json<Job>, pool: web::Data<PgPool>) -> HttpResponse {
    match job_db::insert_job(&body, &pool).await {
        Ok(row) => HttpResponse::Created().json(row),
        Err(e) => {
            log::error!("Error creating job: {:?}", e);
            HttpResponse::InternalServerError().body("Error creating job")
        }
    }
}

#[post("/export")]
async fn export_jobs(query: web::Query<TagQuery>, pool: web::Data<PgPool>) -> HttpResponse {
    let rows = match job_db::list_jobs(query.tag.as_deref(), &pool).await {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Error fetching jobs for export: {:?}", e);
            return HttpResponse::InternalServerError()
                .body("An error occurred while exporting data to Excel");
        }
    };

    match exporter::build_workbook(&rows) {
        Ok(buffer) => HttpResponse::Ok()
            .insert_header(("Content-Disposition", "attachment; filename=jobs.xlsx"))
            .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
            .body(buffer),
        Err(e) => {
            log::error!("Error building workbook: {:?}", e);
            HttpResponse::InternalServerError()
                .body("An error occurred while exporting data to Excel")
        }
    }
}

#[get("/{id}")]
async fn get_job(path: web::Path<i64>, pool: web::Data<PgPool>) -> HttpResponse {
    match job_db::get_job(path.into_inner(), &pool).await {
        Ok(Some(row)) => HttpResponse::Ok().json(row),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Job not found" })),
        Err(e) => {
            log::error!("Error fetching job: {:?}", e);
            HttpResponse::InternalServerError().body("Error fetching job")
        }
    }
}

#[put("/{id}")]
async fn update_job(
    path: web::Path<i64>,
    body: web::Json<JobPatch>,
    pool: web::Data<PgPool>,
) -> HttpResponse {
    match job_db::update_job(path.into_inner(), &body, &pool).await {
        Ok(Some(row)) => HttpResponse::Ok().json(row),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Job not found" })),
        Err(e) => {
            log::error!("Error updating job: {:?}", e);
            HttpResponse::InternalServerError().body("Error updating job")
        }
    }
}

#[delete("/{id}")]
async fn delete_job(path: web::Path<i64>, pool: web::Data<PgPool>) -> HttpResponse {
    match job_db::delete_job(path.into_inner(), &pool).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(json!({ "error": "Job not found" })),
        Err(e) => {
            log::error!("Error deleting job: {:?}", e);
            HttpResponse::InternalServerError().body("Error deleting job")
        }
    }
}
