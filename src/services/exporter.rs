use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::domain::job::JobRow;

const COLUMNS: [(&str, f64); 8] = [
    ("Title", 30.0),
    ("Company Name", 30.0),
    ("Work Type", 15.0),
    ("Location", 30.0),
    ("Salary", 30.0),
    ("Benefits", 50.0),
    ("Listing Date", 15.0),
    ("Tags", 15.0),
];

/// Render the given rows as an xlsx workbook with a single `Jobs` sheet.
pub fn build_workbook(jobs: &[JobRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Jobs")?;

    let header_format = Format::new().set_bold();
    for (col, (header, width)) in COLUMNS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, job) in jobs.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write(row, 0, job.title.as_str())?;
        worksheet.write(row, 1, job.company_name.as_str())?;
        worksheet.write(row, 2, job.work_type.as_str())?;
        worksheet.write(row, 3, job.location.as_str())?;
        worksheet.write(row, 4, job.salary.as_str())?;
        worksheet.write(row, 5, job.benefit.join(", "))?;
        worksheet.write(row, 6, date_part(&job.listing_date))?;
        worksheet.write(row, 7, display_tag(job.tag.as_deref().unwrap_or("")))?;
    }

    workbook.save_to_buffer()
}

/// Title-case a tag for display: `full-stack-developer` becomes
/// `Full Stack Developer`.
pub fn display_tag(tag: &str) -> String {
    tag.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// Listing dates are stored as ISO-8601 date-times; the sheet only shows the
// date part.
fn date_part(listing_date: &str) -> &str {
    listing_date.split('T').next().unwrap_or(listing_date)
}

#[cfg(test)]
mod tests {
    use super::{build_workbook, date_part, display_tag};
    use crate::domain::job::JobRow;

    #[test]
    fn display_tag_title_cases_hyphenated_tags() {
        assert_eq!(display_tag("java"), "Java");
        assert_eq!(display_tag("full-stack-developer"), "Full Stack Developer");
        assert_eq!(display_tag(""), "");
    }

    #[test]
    fn date_part_drops_the_time_component() {
        assert_eq!(date_part("2024-09-17T00:00:00Z"), "2024-09-17");
        assert_eq!(date_part("2024-09-17"), "2024-09-17");
    }

    #[test]
    fn workbook_builds_for_a_row_with_all_fields() {
        let rows = vec![JobRow {
            id: 1,
            title: "Software Engineer".to_string(),
            company_name: "Tech Company".to_string(),
            work_type: "Full-time".to_string(),
            location: "Jakarta".to_string(),
            salary: "5000 USD".to_string(),
            benefit: vec!["Good pay".to_string(), "Flexible hours".to_string()],
            listing_date: "2024-09-17T00:00:00Z".to_string(),
            tag: Some("java".to_string()),
        }];

        let buffer = build_workbook(&rows).unwrap();

        assert!(!buffer.is_empty());
    }
}
