//! In-memory sample data standing in for the document and check services

use chrono::NaiveDate;
use review_types::{
    Check, CheckDefinition, CheckMapping, CheckStatus, Document, DocumentStatus, Section,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn document(
    id: &str,
    name: &str,
    client: &str,
    editor: &str,
    updated: NaiveDate,
    status: DocumentStatus,
) -> Document {
    Document {
        document_id: id.to_string(),
        document_name: name.to_string(),
        document_type: "PDF".to_string(),
        client_name: client.to_string(),
        last_updated_by: editor.to_string(),
        last_updated_date: updated,
        status,
    }
}

pub fn documents() -> Vec<Document> {
    vec![
        document(
            "1",
            "Contract 2024",
            "Acme Corp",
            "John Doe",
            date(2024, 3, 20),
            DocumentStatus::ChecksComplete,
        ),
        document(
            "2",
            "Financial Report Q1",
            "Tech Corp",
            "Jane Smith",
            date(2024, 3, 19),
            DocumentStatus::ExtractionInProgress,
        ),
        document(
            "3",
            "Legal Document",
            "Acme Corp",
            "Mike Johnson",
            date(2024, 3, 15),
            DocumentStatus::ChecksInProgress,
        ),
        document(
            "4",
            "Project Proposal",
            "Global Inc",
            "Sarah Wilson",
            date(2024, 3, 10),
            DocumentStatus::ExtractionCompleted,
        ),
        document(
            "5",
            "Annual Report 2023",
            "Acme Corp",
            "John Doe",
            date(2024, 3, 5),
            DocumentStatus::FileUploaded,
        ),
    ]
}

fn check(id: &str, name: &str, status: CheckStatus, details: [&str; 3]) -> Check {
    Check {
        check_id: id.to_string(),
        check_short_name: name.to_string(),
        details: details.iter().map(|d| d.to_string()).collect(),
        check_status: status,
        check_feedback: None,
    }
}

/// Review sections shown next to every document.
pub fn sections() -> Vec<Section> {
    use CheckStatus::{Fail, Pass};

    vec![
        Section {
            id: "formatting".to_string(),
            section_title: "Document Formatting".to_string(),
            page_number: 1,
            checks: vec![
                check(
                    "format-1",
                    "Page Margins",
                    Fail,
                    [
                        "Verify that all pages have consistent margins",
                        "Check for proper spacing around headers and footers",
                        "Ensure no content is cut off at the edges",
                    ],
                ),
                check(
                    "format-2",
                    "Font Consistency",
                    Pass,
                    [
                        "Check for consistent font usage throughout the document",
                        "Verify heading styles are properly applied",
                        "Ensure no mixed font families in paragraphs",
                    ],
                ),
            ],
        },
        Section {
            id: "content".to_string(),
            section_title: "Content Review".to_string(),
            page_number: 3,
            checks: vec![
                check(
                    "content-1",
                    "Executive Summary",
                    Pass,
                    [
                        "Review the executive summary for completeness",
                        "Check for key findings and recommendations",
                        "Verify alignment with main document content",
                    ],
                ),
                check(
                    "content-2",
                    "Financial Data",
                    Fail,
                    [
                        "Verify all financial figures and calculations",
                        "Check for proper formatting of currency values",
                        "Ensure all tables are properly labeled and referenced",
                    ],
                ),
            ],
        },
        Section {
            id: "legal".to_string(),
            section_title: "Legal Compliance".to_string(),
            page_number: 5,
            checks: vec![
                check(
                    "legal-1",
                    "Regulatory Requirements",
                    Pass,
                    [
                        "Verify compliance with industry regulations",
                        "Check for required legal disclaimers",
                        "Ensure proper citation of laws and regulations",
                    ],
                ),
                check(
                    "legal-2",
                    "Data Privacy",
                    Fail,
                    [
                        "Review data protection statements",
                        "Check for proper handling of personal information",
                        "Verify GDPR compliance where applicable",
                    ],
                ),
            ],
        },
        Section {
            id: "technical".to_string(),
            section_title: "Technical Specifications".to_string(),
            page_number: 7,
            checks: vec![
                check(
                    "tech-1",
                    "System Requirements",
                    Pass,
                    [
                        "Verify minimum system requirements are listed",
                        "Check for compatibility information",
                        "Ensure all dependencies are documented",
                    ],
                ),
                check(
                    "tech-2",
                    "API Documentation",
                    Pass,
                    [
                        "Review API endpoint documentation",
                        "Check for proper request/response examples",
                        "Verify authentication requirements are clear",
                    ],
                ),
            ],
        },
        Section {
            id: "quality".to_string(),
            section_title: "Quality Assurance".to_string(),
            page_number: 9,
            checks: vec![
                check(
                    "qa-1",
                    "Testing Procedures",
                    Fail,
                    [
                        "Review test coverage documentation",
                        "Check for test case descriptions",
                        "Verify test environment requirements",
                    ],
                ),
                check(
                    "qa-2",
                    "Performance Metrics",
                    Pass,
                    [
                        "Verify performance benchmarks are documented",
                        "Check for load testing results",
                        "Ensure scalability requirements are clear",
                    ],
                ),
            ],
        },
    ]
}

fn definition(
    id: &str,
    name: &str,
    description: &str,
    prompt: &str,
    sections: [&str; 2],
    updated: NaiveDate,
) -> CheckDefinition {
    CheckDefinition {
        id: id.to_string(),
        check_name: name.to_string(),
        check_description: description.to_string(),
        detailed_prompt: prompt.to_string(),
        associated_sections: sections.iter().map(|s| s.to_string()).collect(),
        last_updated_date: updated,
    }
}

pub fn check_definitions() -> Vec<CheckDefinition> {
    vec![
        definition(
            "1",
            "Page Margins",
            "Verify that all page margins are set to 1 inch on all sides of the document. \
             The margins should be consistent throughout the entire document.",
            "Check all pages of the document for consistent 1-inch margins. Verify that no \
             content extends beyond the margins and that the layout is uniform throughout.",
            ["Document Formatting", "Page Layout"],
            date(2024, 3, 20),
        ),
        definition(
            "2",
            "Executive Summary",
            "Check if executive summary is present and properly formatted. The summary should \
             include key findings, recommendations, and a brief overview of the document.",
            "Review the executive summary section for completeness and proper formatting. \
             Ensure it captures the main points of the document.",
            ["Content Review", "Document Structure"],
            date(2024, 3, 19),
        ),
        definition(
            "3",
            "Financial Data",
            "Verify all financial data is accurate and properly formatted, including numerical \
             values, currency symbols, decimal places, and date formats.",
            "Examine all financial figures, tables, and calculations in the document. Verify \
             the accuracy of numbers and consistent decimal places.",
            ["Content Review", "Data Validation"],
            date(2024, 3, 18),
        ),
        definition(
            "4",
            "Document Headers",
            "Ensure that all document headers are properly formatted and consistent \
             throughout the document, including title, section numbers, and page numbers.",
            "Review all headers in the document for consistency in style, formatting, and \
             content. Check that the header style matches the document template.",
            ["Document Formatting", "Page Layout"],
            date(2024, 3, 17),
        ),
        definition(
            "5",
            "Table Formatting",
            "Review all tables in the document for proper formatting and consistency, \
             including column widths, cell padding, borders, and text alignment.",
            "Examine all tables in the document for proper formatting and consistency. Verify \
             that tables are properly numbered and referenced in the text.",
            ["Document Formatting", "Content Review"],
            date(2024, 3, 16),
        ),
    ]
}

fn mapping(id: &str, document_section: &str, section: &str, check: &str) -> CheckMapping {
    CheckMapping {
        id: id.to_string(),
        document_section: document_section.to_string(),
        associated_section: section.to_string(),
        associated_check: check.to_string(),
    }
}

pub fn check_mappings() -> Vec<CheckMapping> {
    vec![
        mapping("1", "Introduction", "Document Formatting", "Page Margins"),
        mapping("2", "Executive Summary", "Content Review", "Executive Summary"),
        mapping("3", "Financial Data", "Content Review", "Financial Data"),
    ]
}
