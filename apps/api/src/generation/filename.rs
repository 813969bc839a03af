//! Deterministic filename derivation, used when the Renderer delegates
//! filename choice back to the orchestrator.
//!
//! Convention: `Resume_<name-with-spaces-as-underscores>_<job-host>_<YYYYMMDD>.<ext>`.
//! Unique enough for storage within a per-generation scope; no global
//! uniqueness guarantee beyond per-call freshness.

use chrono::NaiveDate;
use url::Url;

use crate::renderer::FilenamePair;

/// The hostname of a job-posting URL, or "job" when one cannot be extracted.
pub fn job_host(job_url: &str) -> String {
    Url::parse(job_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "job".to_string())
}

pub fn derive_filenames(full_name: &str, job_url: &str, date: NaiveDate) -> FilenamePair {
    let name = full_name.trim();
    let name_safe = if name.is_empty() {
        "Resume".to_string()
    } else {
        name.split_whitespace().collect::<Vec<_>>().join("_")
    };
    let host = job_host(job_url);
    let stamp = date.format("%Y%m%d");
    FilenamePair {
        pdf: format!("Resume_{name_safe}_{host}_{stamp}.pdf"),
        docx: format!("Resume_{name_safe}_{host}_{stamp}.docx"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    #[test]
    fn test_derives_from_name_host_and_date() {
        let pair = derive_filenames("Jane Doe", "https://boards.example.com/job/42", date());
        assert_eq!(pair.pdf, "Resume_Jane_Doe_boards.example.com_20260830.pdf");
        assert_eq!(pair.docx, "Resume_Jane_Doe_boards.example.com_20260830.docx");
    }

    #[test]
    fn test_collapses_inner_whitespace() {
        let pair = derive_filenames("  Jane   van  Doe ", "https://x.com/j", date());
        assert_eq!(pair.pdf, "Resume_Jane_van_Doe_x.com_20260830.pdf");
    }

    #[test]
    fn test_host_falls_back_to_job() {
        assert_eq!(job_host("not a url"), "job");
        assert_eq!(job_host(""), "job");
        let pair = derive_filenames("Jane", "garbage", date());
        assert_eq!(pair.pdf, "Resume_Jane_job_20260830.pdf");
    }
}
