//! CSV rendering for the benchmark report
//!
//! Three sections (`OFFICE`, `BREAKDOWN`, `PEOPLE`), each preceded by a
//! header row; fields mirror the report payload. Quoting (commas, quotes,
//! newlines) is handled by the csv writer.

use chrono::NaiveDate;
use csv::WriterBuilder;
use paceledger_domain::{BenchmarkReport, PaceLedgerError, Result};

/// Download filename for a benchmark export over `[start, end]`
pub fn csv_filename(start: NaiveDate, end: NaiveDate) -> String {
    format!("benchmarks_{start}_to_{end}.csv")
}

/// Render the three-section CSV export for a benchmark report
pub fn render_benchmark_csv(report: &BenchmarkReport) -> Result<String> {
    // Sections have different widths, so the writer must accept
    // variable-length records
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

    write_row(&mut writer, &["OFFICE"])?;
    write_row(
        &mut writer,
        &[
            "planMode",
            "appsActual",
            "appsTarget",
            "premiumActual",
            "premiumTarget",
            "appsDelta",
            "premiumDelta",
            "appsPaceRatio",
            "premiumPaceRatio",
        ],
    )?;
    let office = &report.office;
    write_row(
        &mut writer,
        &[
            office.plan_mode.clone(),
            num(office.apps_actual),
            num(office.apps_target),
            num(office.premium_actual),
            num(office.premium_target),
            num(office.apps_delta),
            num(office.premium_delta),
            opt_num(office.pace.apps_pace.pace_ratio),
            opt_num(office.pace.premium_pace.pace_ratio),
        ],
    )?;

    write_row(&mut writer, &["BREAKDOWN"])?;
    write_row(
        &mut writer,
        &[
            "key",
            "category",
            "appsActual",
            "appsTarget",
            "premiumActual",
            "premiumTarget",
            "premiumDelta",
            "pacePremium",
        ],
    )?;
    for row in &report.breakdown.rows {
        write_row(
            &mut writer,
            &[
                row.key.clone(),
                row.category.clone(),
                num(row.apps_actual),
                num(row.apps_target),
                num(row.premium_actual),
                num(row.premium_target),
                num(row.premium_delta),
                opt_num(row.pace_premium),
            ],
        )?;
    }

    write_row(&mut writer, &["PEOPLE"])?;
    write_row(
        &mut writer,
        &[
            "personId",
            "name",
            "roleName",
            "appsActual",
            "appsTarget",
            "premiumActual",
            "premiumTarget",
            "premiumDelta",
            "pacePremium",
            "expectationSource",
        ],
    )?;
    for person in &report.people {
        let source = match person.expectation_source {
            paceledger_domain::TargetSource::Override => "OVERRIDE",
            paceledger_domain::TargetSource::Role => "ROLE",
            paceledger_domain::TargetSource::None => "NONE",
        };
        write_row(
            &mut writer,
            &[
                person.person_id.to_string(),
                person.name.clone(),
                person.role_name.clone().unwrap_or_default(),
                num(person.apps_actual),
                num(person.apps_target),
                num(person.premium_actual),
                num(person.premium_target),
                num(person.premium_delta),
                opt_num(person.pace_premium),
                source.to_string(),
            ],
        )?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PaceLedgerError::Internal(format!("csv flush failed: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| PaceLedgerError::Internal(format!("csv output not utf-8: {e}")))
}

fn write_row<W, S>(writer: &mut csv::Writer<W>, fields: &[S]) -> Result<()>
where
    W: std::io::Write,
    S: AsRef<[u8]>,
{
    writer
        .write_record(fields.iter().map(AsRef::as_ref))
        .map_err(|e| PaceLedgerError::Internal(format!("csv write failed: {e}")))
}

fn num(value: f64) -> String {
    value.to_string()
}

fn opt_num(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
