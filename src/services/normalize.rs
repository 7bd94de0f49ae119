use serde_json::Value;

use crate::{domain::job::Job, services::jobstreet_scraper::ScrapeError};

/// Where the decoded payload keeps its job list.
const JOBS_POINTER: &str = "/results/results/jobs";

/// Map every upstream job in the decoded payload to a [`Job`], injecting the
/// tag the page was scraped for. Pure function of its inputs; order of the
/// upstream list is preserved.
pub fn normalize_jobs(payload: &Value, tag: &str) -> Result<Vec<Job>, ScrapeError> {
    let jobs = payload
        .pointer(JOBS_POINTER)
        .and_then(Value::as_array)
        .ok_or(ScrapeError::SchemaShape)?;

    Ok(jobs.iter().map(|job| normalize_job(job, tag)).collect())
}

fn normalize_job(job: &Value, tag: &str) -> Job {
    Job {
        title: text_field(job, "title"),
        company_name: company_name(job),
        work_type: text_field(job, "workType"),
        location: job
            .pointer("/jobLocation/label")
            .and_then(Value::as_str)
            .map(str::to_string),
        salary: text_field(job, "salary"),
        benefit: job
            .get("bulletPoints")
            .and_then(Value::as_array)
            .map(|points| {
                points
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        listing_date: text_field(job, "listingDate"),
        tag: tag.to_string(),
    }
}

// companyName, then the advertiser description, then empty.
fn company_name(job: &Value) -> String {
    match text_field(job, "companyName") {
        Some(name) if !name.is_empty() => name,
        _ => job
            .pointer("/advertiser/description")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
    }
}

fn text_field(job: &Value, key: &str) -> Option<String> {
    job.get(key).and_then(Value::as_str).map(str::to_string)
}
