//! Integration tests for the file-level runners.

use std::fs;
use std::path::Path;

use adv_cli::pipeline::{
    TermPair, run_collapse, run_date_parts, run_foot_traffic, run_hs_matriculation, run_retention,
    run_summary,
};
use adv_model::{DateParseMode, PipelineOptions};
use adv_output::CsvExportOptions;

const INDICATORS: &str = "APPT,DISTANCE,CURRENT STUDENT,NEW STUDENT,RETURNING STUDENT,\
HIGH SCHOOL,WORKFORCE,VETERAN,ENROLL,ADD/DROP,QUESTIONS,MAJOR CHANGE,DEGREE CHECK,SUSPENSION";

fn sheet(time_header: &str, athlete: bool, rows: &[&str]) -> String {
    let mut text = format!("DATE,#,NAME,{time_header},{INDICATORS}");
    if athlete {
        text.push_str(",ATHLETE");
    }
    text.push_str(",ADVISOR SIGN,ADV TIME\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

fn blanks(count: usize) -> String {
    ",".repeat(count)
}

fn write_locations(dir: &Path) {
    let b14 = blanks(13);
    let boa = sheet(
        "\"Time\nIn\"",
        true,
        &[
            &format!("1/5/2023,1,Ann,9:30 AM,x{b14},,JD,15"),
            &format!("1/5/2023,2,Bob,,{b14},,JD,10"),
        ],
    );
    let boe = sheet(
        "TIME OF CONTACT",
        false,
        &[&format!("1/6/2023,1,Cy,1:05 PM,{b14}x,KL,20")],
    );
    fs::write(dir.join("boa.csv"), boa).unwrap();
    fs::write(dir.join("boe.csv"), boe).unwrap();
}

/// Export lines with quoted empty strings shown as empty cells.
fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.replace("\"\"", ""))
        .collect()
}

#[test]
fn foot_traffic_writes_canonical_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("exports");
    fs::create_dir(&input).unwrap();
    write_locations(&input);
    let output = dir.path().join("out/foot_traffic.csv");

    let result = run_foot_traffic(
        &input,
        &output,
        &PipelineOptions::default(),
        &CsvExportOptions::default(),
    )
    .unwrap();
    assert_eq!(result.inputs.len(), 2);
    assert_eq!(result.inputs[0].label, "BOA");
    assert_eq!(result.rows, 2);
    assert_eq!(result.columns, 26);

    let lines = read_lines(&output);
    assert!(lines[0].starts_with("DATE,#,NAME,TIME OF CONTACT,TIME RANGE,LOCATION,APPT"));
    assert!(lines[0].ends_with("ADVISOR SIGN,ADV TIME,MONTH,DAY,ID"));
    assert!(lines[1].starts_with("2023-01-05,1,Ann,09:30:00,9:00-9:59,BOA,x,"));
    assert!(lines[1].ends_with(",JD,15,Jan,Thur,449291"));
    assert!(lines[2].starts_with("2023-01-06,3,Cy,13:05:00,13:00-13:59,BOE,"));
    assert!(lines[2].ends_with(",KL,20,Jan,Fri,449303"));
}

#[test]
fn foot_traffic_strict_dates_fail() {
    let dir = tempfile::tempdir().unwrap();
    let b14 = blanks(13);
    let text = sheet(
        "TIME IN",
        true,
        &[&format!("not a date,1,Ann,9:30 AM,{b14},,JD,15")],
    );
    fs::write(dir.path().join("boa.csv"), text).unwrap();
    let output = dir.path().join("out.csv");

    let err = run_foot_traffic(
        dir.path(),
        &output,
        &PipelineOptions::default(),
        &CsvExportOptions::default(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("not a valid date"));
    assert!(!output.exists());

    let lossy = PipelineOptions::default().with_date_mode(DateParseMode::Lossy);
    let result =
        run_foot_traffic(dir.path(), &output, &lossy, &CsvExportOptions::default()).unwrap();
    assert_eq!(result.rows, 1);
}

#[test]
fn collapse_writes_index_and_label() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("modes.csv");
    fs::write(&input, "IN PERSON,ZOOM,PHONE\nx,,\n,X,x\n,,\nx,x,\n").unwrap();

    let columns = vec!["IN PERSON".to_string(), "ZOOM".to_string(), "PHONE".to_string()];
    let result = run_collapse(
        &input,
        &columns,
        "MODE",
        None,
        &PipelineOptions::default(),
        &CsvExportOptions::default(),
    )
    .unwrap();
    assert_eq!(result.output, dir.path().join("modes_mode.csv"));
    assert_eq!(
        read_lines(&result.output),
        vec!["index,MODE", "0,IN PERSON", "1,ZOOM", "2,", "3,IN PERSON"]
    );
}

#[test]
fn summary_counts_values() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("traffic.csv");
    fs::write(&input, "LOCATION\nBOA\nBOE\nBOA\n").unwrap();

    let rows = run_summary(&input, "LOCATION").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].value, "BOA");
    assert_eq!(rows[0].count, 2);
    assert!((rows[0].percent - 66.67).abs() < 1e-9);
    assert!((rows[1].percent - 33.33).abs() < 1e-9);

    assert!(run_summary(&input, "NAME").is_err());
}

#[test]
fn retention_with_holds() {
    let dir = tempfile::tempdir().unwrap();
    let enrollment = dir.path().join("enrollment.csv");
    fs::write(
        &enrollment,
        "ID,TERM,RESD\n100,202380,I\n200,202380,O\n100,202410,I\n",
    )
    .unwrap();
    let holds = dir.path().join("holds.csv");
    fs::write(
        &holds,
        "ID,PRPHONE,BRPHONE,CARPHONE,EMAIL,OTHEREMAIL,ARNOENRHOLD,SUSPHOLD,COLLHLTHHOLD,VPSSHOLD\n\
         200,555-0200,,,b@x.edu,,N,Y,Y,N\n",
    )
    .unwrap();
    let output = dir.path().join("retention.csv");

    let terms = TermPair {
        previous: 202380,
        upcoming: 202410,
    };
    let result = run_retention(
        &enrollment,
        terms,
        Some(&holds),
        &output,
        &CsvExportOptions::default(),
    )
    .unwrap();
    assert_eq!(result.rows, 2);
    assert_eq!(
        read_lines(&output),
        vec![
            "ID,TERM,RESCODE,ENROLLED,PRPHONE,BRPHONE,CARPHONE,EMAIL,OTHEREMAIL,HOLDS",
            "100,202380,I,Enrolled,,,,,,",
            "200,202380,O,Not Enrolled,555-0200,,,b@x.edu,,Acad Sus Hold",
        ]
    );
}

#[test]
fn hs_matriculation_over_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("fa23.csv"),
        "STDTID,TERMENTERED,HSGRADDTE\n1,202380,5/25/2023\n2,202380,\n",
    )
    .unwrap();
    let output = dir.path().join("out").join("hs.csv");
    let result = run_hs_matriculation(
        dir.path(),
        &output,
        &PipelineOptions::default(),
        &CsvExportOptions::default(),
    )
    .unwrap();
    assert_eq!(result.rows, 2);
    assert_eq!(
        read_lines(&output),
        vec![
            "id,term,hsgraddte,grad_year,hs_matriculation",
            "1,202380,2023-05-25,2023,From HS",
            "2,202380,,0,Not From HS",
        ]
    );
}

#[test]
fn hs_matriculation_bad_grad_date_needs_lossy_mode() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("extracts");
    fs::create_dir(&input).unwrap();
    fs::write(
        input.join("fa23.csv"),
        "STDTID,TERMENTERED,HSGRADDTE\n1,202380,2023-13-45\n",
    )
    .unwrap();
    let output = dir.path().join("hs.csv");

    let err = run_hs_matriculation(
        &input,
        &output,
        &PipelineOptions::default(),
        &CsvExportOptions::default(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("2023-13-45"));
    assert!(!output.exists());

    let lossy = PipelineOptions::default().with_date_mode(DateParseMode::Lossy);
    run_hs_matriculation(&input, &output, &lossy, &CsvExportOptions::default()).unwrap();
    assert_eq!(
        read_lines(&output),
        vec![
            "id,term,hsgraddte,grad_year,hs_matriculation",
            "1,202380,,0,Not From HS",
        ]
    );
}

#[test]
fn date_parts_appends_month_and_day() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("boa.csv");
    fs::write(&input, "DATE,NAME\n1/9/2023,Ann\n,Bob\n").unwrap();
    let output = dir.path().join("out").join("boa_dates.csv");

    let export = CsvExportOptions {
        null_value: "NA".to_string(),
        ..CsvExportOptions::default()
    };
    let result =
        run_date_parts(&input, &output, &PipelineOptions::default(), &export).unwrap();
    assert_eq!(result.rows, 2);
    assert_eq!(result.columns, 4);
    assert_eq!(
        read_lines(&output),
        vec!["DATE,NAME,MONTH,DAY", "1/9/2023,Ann,Jan,Mon", "NA,Bob,NA,NA"]
    );
}

#[test]
fn date_parts_strict_rejects_bad_date() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("boa.csv");
    fs::write(&input, "DATE,NAME\nsoon,Ann\n").unwrap();
    let output = dir.path().join("boa_dates.csv");

    let err = run_date_parts(
        &input,
        &output,
        &PipelineOptions::default(),
        &CsvExportOptions::default(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("not a valid date"));

    let lossy = PipelineOptions::default().with_date_mode(DateParseMode::Lossy);
    let result = run_date_parts(&input, &output, &lossy, &CsvExportOptions::default()).unwrap();
    assert_eq!(result.rows, 1);
}
