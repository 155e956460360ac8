use crate::breach::model::Incident;
use crate::error::CoreResult;
use crate::flaws::model::Flaw;

/// Render the ranked flaw list as a CSV attachment.
pub fn render_flaws_csv(flaws: &[Flaw]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record(["severity", "category", "subgroup", "term", "count", "reason"])?;
    for flaw in flaws {
        wtr.write_record(&[
            flaw.severity.to_string(),
            flaw.category.clone(),
            flaw.subgroup.clone(),
            flaw.term.clone(),
            flaw.count.to_string(),
            flaw.reason.clone(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}

/// Render the incident list as a CSV attachment.
pub fn render_incidents_csv(incidents: &[Incident]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record(["date", "event", "impact", "severity", "source_url"])?;
    for incident in incidents {
        wtr.write_record(&[
            incident.date.clone(),
            incident.event.clone(),
            incident.impact.clone(),
            incident.severity.to_string(),
            incident.source_url.clone(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}
