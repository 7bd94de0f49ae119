use scraper::{Html, Selector};
use serde_json::Value;

use crate::services::jobstreet_scraper::ScrapeError;

/// Attribute the vendor puts on the element whose text content carries the
/// state-hydration script.
const SERVER_STATE_SELECTOR: &str = r#"[data-automation="server-state"]"#;

/// Start of the assignment statement inside the server-state script.
const REDUX_ASSIGNMENT_MARKER: &str = "window.SEEK_REDUX_DATA = ";

/// Find the server-state element and return its full inner text.
///
/// A page without the element means the vendor changed its markup, which is
/// a different failure than a present-but-unparsable script.
pub fn extract_server_state(html: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse(SERVER_STATE_SELECTOR).expect("server-state selector must be valid");

    match document.select(&selector).next() {
        Some(element) => Ok(element.text().collect()),
        None => Err(ScrapeError::MarkerNotFound),
    }
}

/// Carve the redux object literal out of the server-state script.
///
/// The script reads `window.SEEK_REDUX_DATA = {...};` followed by further
/// statements, so the text after the assignment marker is not valid JSON on
/// its own. Truncating at the first `};` and re-appending `}` matches the
/// observed vendor output. Known fragility: a literal `};` inside a string
/// value of the payload truncates too early and the parse fails.
pub fn repair_payload(server_state: &str) -> Result<String, ScrapeError> {
    let (_, tail) = server_state
        .split_once(REDUX_ASSIGNMENT_MARKER)
        .ok_or_else(|| {
            ScrapeError::PayloadParse(
                "redux assignment not found in server-state script".to_string(),
            )
        })?;

    let object_text = match tail.split_once("};") {
        Some((object_body, _)) => format!("{}}}", object_body),
        // No terminator in sight: keep the whole tail and let the parse
        // report what is wrong with it.
        None => format!("{}}}", tail),
    };

    Ok(object_text)
}

/// Repair the extracted script text and decode it as JSON.
pub fn parse_payload(server_state: &str) -> Result<Value, ScrapeError> {
    let object_text = repair_payload(server_state)?;

    serde_json::from_str(&object_text).map_err(|e| {
        ScrapeError::PayloadParse(format!("repaired payload is not valid JSON: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{extract_server_state, parse_payload, repair_payload};
    use crate::services::jobstreet_scraper::ScrapeError;

    #[test]
    fn extracts_server_state_script_text() {
        let html = r#"
            <html><body>
                <script data-automation="server-state">window.SEEK_REDUX_DATA = {"a":1};</script>
            </body></html>
        "#;

        let state = extract_server_state(html).unwrap();

        assert_eq!(state, r#"window.SEEK_REDUX_DATA = {"a":1};"#);
    }

    #[test]
    fn page_without_server_state_element_is_marker_not_found() {
        let html = "<html><body><p>nothing to see</p></body></html>";

        let result = extract_server_state(html);

        assert!(matches!(result, Err(ScrapeError::MarkerNotFound)));
    }

    #[test]
    fn truncates_at_first_close_brace_semicolon() {
        let state = r#"window.SEEK_REDUX_DATA = {"a":1,"b":{"c":2}};more_script();"#;

        let repaired = repair_payload(state).unwrap();

        assert_eq!(repaired, r#"{"a":1,"b":{"c":2}}"#);
        assert_eq!(parse_payload(state).unwrap(), json!({"a": 1, "b": {"c": 2}}));
    }

    #[test]
    fn missing_assignment_marker_is_a_parse_error() {
        let state = r#"window.SOMETHING_ELSE = {"a":1};"#;

        let result = parse_payload(state);

        assert!(matches!(result, Err(ScrapeError::PayloadParse(_))));
    }

    #[test]
    fn unterminated_payload_is_a_parse_error() {
        let state = r#"window.SEEK_REDUX_DATA = {"a":1,"b":"#;

        let result = parse_payload(state);

        assert!(matches!(result, Err(ScrapeError::PayloadParse(_))));
    }

    // The truncation rule is a substring match, not a brace scanner. A `};`
    // inside a string value cuts the payload short and the decode fails.
    #[test]
    fn close_brace_semicolon_inside_string_value_truncates_early() {
        let state = r#"window.SEEK_REDUX_DATA = {"note":"ends with };","a":1};rest();"#;

        let repaired = repair_payload(state).unwrap();

        assert_eq!(repaired, r#"{"note":"ends with }"#);
        assert!(matches!(
            parse_payload(state),
            Err(ScrapeError::PayloadParse(_))
        ));
    }
}
