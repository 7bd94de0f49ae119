use std::time::Duration;

use fake_user_agent::get_rua;
use reqwest::header::USER_AGENT;

use crate::{
    domain::job::Job,
    services::{normalize::normalize_jobs, payload},
};

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("failed to fetch listing page: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("no server-state element found in listing page")]
    MarkerNotFound,
    #[error("failed to parse hydration payload: {0}")]
    PayloadParse(String),
    #[error("payload has no jobs array at results.results.jobs")]
    SchemaShape,
}

/// Scrape one listing page: fetch the page for `tag`, extract the hydration
/// payload, decode it and normalize every job in it.
///
/// The stages run strictly in sequence and any failure aborts the whole run;
/// a partial list is never returned. No state is kept across calls, so
/// scraping two tags concurrently is safe.
pub async fn scrape_jobs(tag: &str, base_url: &str) -> Result<Vec<Job>, ScrapeError> {
    let html = fetch_listing_page(tag, base_url).await?;
    let jobs = parse_listing_page(&html, tag)?;

    log::info!("Scraped {} jobs for tag: {}", jobs.len(), tag);
    Ok(jobs)
}

/// The pure tail of the pipeline: extract, decode, normalize.
pub fn parse_listing_page(html: &str, tag: &str) -> Result<Vec<Job>, ScrapeError> {
    let server_state = payload::extract_server_state(html)?;
    let decoded = payload::parse_payload(&server_state)?;
    normalize_jobs(&decoded, tag)
}

// One GET, no retries. The tag is used verbatim in the path and must already
// be URL-safe.
async fn fetch_listing_page(tag: &str, base_url: &str) -> Result<String, ScrapeError> {
    let url = format!("{}/{}-jobs", base_url, tag);
    let client = reqwest::Client::builder()
        .read_timeout(Duration::from_secs(30))
        .build()?;

    let response = client
        .get(&url)
        .header(USER_AGENT, get_rua())
        .send()
        .await?
        .error_for_status()?;

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::{parse_listing_page, scrape_jobs, ScrapeError};

    fn listing_page(script: &str) -> String {
        format!(
            r#"<html><head><title>Jobs</title></head><body>
                <div id="app"></div>
                <script data-automation="server-state">{}</script>
            </body></html>"#,
            script
        )
    }

    #[test]
    fn single_job_page_normalizes_end_to_end() {
        let html = listing_page(concat!(
            r#"window.SEEK_REDUX_DATA = {"results":{"results":{"jobs":["#,
            r#"{"title":"Software Engineer","companyName":"Tech Company","#,
            r#""workType":"Full-time","jobLocation":{"label":"Jakarta"},"#,
            r#""salary":"5000 USD","bulletPoints":["Good pay","Flexible hours"],"#,
            r#""listingDate":"2024-09-17T00:00:00Z"}"#,
            r#"]}}};(function(){})();"#,
        ));

        let jobs = parse_listing_page(&html, "java").unwrap();

        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.title.as_deref(), Some("Software Engineer"));
        assert_eq!(job.company_name, "Tech Company");
        assert_eq!(job.work_type.as_deref(), Some("Full-time"));
        assert_eq!(job.location.as_deref(), Some("Jakarta"));
        assert_eq!(job.salary.as_deref(), Some("5000 USD"));
        assert_eq!(job.benefit, vec!["Good pay", "Flexible hours"]);
        assert_eq!(job.listing_date.as_deref(), Some("2024-09-17T00:00:00Z"));
        assert_eq!(job.tag, "java");
    }

    #[test]
    fn job_count_and_order_follow_the_payload() {
        let html = listing_page(concat!(
            r#"window.SEEK_REDUX_DATA = {"results":{"results":{"jobs":["#,
            r#"{"title":"Alpha"},{"title":"Beta"},{"title":"Gamma"}"#,
            r#"]}}};window.OTHER = 1;"#,
        ));

        let jobs = parse_listing_page(&html, "python").unwrap();

        let titles: Vec<_> = jobs.iter().map(|j| j.title.as_deref().unwrap()).collect();
        assert_eq!(titles, ["Alpha", "Beta", "Gamma"]);
        assert!(jobs.iter().all(|j| j.tag == "python"));
    }

    #[test]
    fn page_without_marker_element_yields_no_records() {
        let html = "<html><body><h1>Maintenance</h1></body></html>";

        let result = parse_listing_page(html, "java");

        assert!(matches!(result, Err(ScrapeError::MarkerNotFound)));
    }

    #[test]
    fn payload_with_unexpected_shape_is_a_schema_error() {
        let html = listing_page(r#"window.SEEK_REDUX_DATA = {"results":{}};"#);

        let result = parse_listing_page(&html, "java");

        assert!(matches!(result, Err(ScrapeError::SchemaShape)));
    }

    #[tokio::test]
    async fn unreachable_site_is_a_fetch_error() {
        let result = scrape_jobs("java", "http://127.0.0.1:9").await;

        assert!(matches!(result, Err(ScrapeError::Fetch(_))));
    }
}
