use std::io::Write;
use std::path::Path;

use ep_analysis::OverlapAnalyzer;
use ep_core::PairError;
use ep_ingest::{RecordParser, UploadPolicy, UploadedFile};

use crate::args::{Cli, Command};

/// Exit code for a failed command
///
/// 1 for invalid input, 2 when there is nothing to report, 3 when the file
/// could not be read.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PairError>() {
        Some(PairError::Validation(_)) => 1,
        Some(PairError::DataNotFound(_)) => 2,
        Some(PairError::FileProcessing { .. }) => 3,
        None => 1,
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(cli, &mut out)
}

pub fn run_with<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    match cli.command {
        Command::Analyze { file, all, today } => {
            let mut parser = RecordParser::default();
            if let Some(today) = today {
                parser = parser.with_reference_date(today);
            }

            let upload = read_upload(&file)?;
            let records = parser.parse_bytes(&upload.content)?;
            tracing::debug!(records = records.len(), "Parsed assignment file");

            let analyzer = OverlapAnalyzer::new();
            if all {
                let ranked = analyzer.pair_totals(&records)?;
                serde_json::to_writer_pretty(&mut *out, &ranked)?;
            } else {
                let best = analyzer.longest_pair(&records)?;
                serde_json::to_writer_pretty(&mut *out, &best)?;
            }
            writeln!(out)?;
        }
        Command::Validate { file } => {
            let upload = read_upload(&file)?;
            UploadPolicy::default()
                .check(Some(&upload))
                .map_err(PairError::from)?;

            let records = RecordParser::default().parse_bytes(&upload.content)?;
            writeln!(
                out,
                "{}: {} valid records",
                upload.display_name(),
                records.len()
            )?;
        }
    }

    Ok(())
}

fn read_upload(path: &Path) -> anyhow::Result<UploadedFile> {
    let content = std::fs::read(path).map_err(|e| {
        PairError::file_processing(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    Ok(UploadedFile {
        filename,
        content: content.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "EmpID,ProjectID,DateFrom,DateTo\n\
                          101,1,2024-01-01,2024-01-10\n\
                          102,1,2024-01-05,2024-01-20\n\
                          103,2,2024-06-01,2024-06-10\n";

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn analyze(file: PathBuf, all: bool, today: Option<NaiveDate>) -> anyhow::Result<String> {
        let cli = Cli {
            command: Command::Analyze { file, all, today },
        };
        let mut out = Vec::new();
        run_with(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn validate(file: PathBuf) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run_with(
            Cli {
                command: Command::Validate { file },
            },
            &mut out,
        )?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_analyze_prints_longest_pair() {
        let file = csv_file(SAMPLE);
        let output = analyze(file.path().to_path_buf(), false, None).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["pair"], "101,102");
        assert_eq!(json["totalDays"], 6);
    }

    #[test]
    fn test_analyze_all_ranks_pairs() {
        let file = csv_file(
            "1,1,2024-01-01,2024-01-10\n\
             2,1,2024-01-01,2024-01-04\n\
             3,1,2024-01-01,2024-01-07\n",
        );
        let output = analyze(file.path().to_path_buf(), true, None).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        let pairs: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["pair"].as_str().unwrap())
            .collect();
        assert_eq!(pairs, vec!["1,3", "1,2", "2,3"]);
    }

    #[test]
    fn test_today_resolves_open_tenures() {
        let file = csv_file("1,1,2024-01-01,NULL\n2,1,2024-01-01,\n");
        let today = NaiveDate::from_ymd_opt(2024, 1, 31);
        let output = analyze(file.path().to_path_buf(), false, today).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["totalDays"], 31);
        assert_eq!(json["projects"][0]["dateTo"], "2024-01-31");
    }

    #[test]
    fn test_validate_counts_records() {
        let file = csv_file(SAMPLE);
        let output = validate(file.path().to_path_buf()).unwrap();
        assert!(output.trim_end().ends_with(": 3 valid records"));
    }

    #[test]
    fn test_exit_codes() {
        let invalid = csv_file("abc,1,2024-01-01,2024-01-10\n");
        let err = validate(invalid.path().to_path_buf()).unwrap_err();
        assert_eq!(exit_code(&err), 1);
        assert_eq!(err.to_string(), "Line 1: Invalid Employee ID 'abc'");

        let lonely = csv_file("1,1,2024-01-01,2024-01-10\n2,2,2024-01-01,2024-01-10\n");
        let err = analyze(lonely.path().to_path_buf(), false, None).unwrap_err();
        assert_eq!(exit_code(&err), 2);

        let err = analyze(PathBuf::from("/nonexistent/assignments.csv"), false, None).unwrap_err();
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_validate_applies_upload_policy() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let err = validate(file.path().to_path_buf()).unwrap_err();
        assert_eq!(exit_code(&err), 1);
        assert_eq!(err.to_string(), "File must be a CSV file");
    }
}
